/// A `(name, value)` tuple representing an HTTP header.
pub type HeaderField = (String, String);
