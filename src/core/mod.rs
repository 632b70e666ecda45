pub mod error;
pub mod types;

pub use error::WorkflowError;
pub use types::*;
