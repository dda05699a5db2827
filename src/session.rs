/// Authoritative session state and its operations.
pub mod controller;
/// Async decode-and-load helpers.
pub mod loader;
