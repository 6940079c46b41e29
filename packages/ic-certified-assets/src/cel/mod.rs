//! The CEL module compiles certified endpoint descriptions into the CEL
//! expression definitions understood by HTTP gateways, together with the
//! expression path locating them in the certification tree.

mod create_cel_expr;
pub use create_cel_expr::*;

mod expression;
pub use expression::*;
