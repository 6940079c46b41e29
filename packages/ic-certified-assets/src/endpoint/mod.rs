//! The endpoint module contains the builder with which callers describe an
//! HTTP exchange to certify, and the frozen record the builder produces.

mod builder;
pub use builder::*;

mod record;
pub use record::*;
