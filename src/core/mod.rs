// Public modules
pub mod error;
pub mod invocation;
pub mod scaffold;
pub mod validator;

// Re-export common types for convenience
pub use error::{Error, Result};
