/// Layer value types.
pub mod model;
/// Ordered layer collection.
pub mod store;
