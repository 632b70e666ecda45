pub mod credential;
pub mod registration;
pub mod state;

pub use credential::{CredentialHolder, CredentialPrompt, ImageCredential};
pub use registration::{GenerationOutcome, RegistrationWorkflow, WorkflowDeps};
pub use state::Phase;
