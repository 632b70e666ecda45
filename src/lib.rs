pub mod app;
pub mod clients;
pub mod core;
pub mod logger;
pub mod presenter;
pub mod shell;
pub mod store;
pub mod terminal;
pub mod workflow;

pub use app::AppConfig;
pub use clients::{BookApiClient, BookService, ClientError, ImageApiClient, ImageGenerator};
pub use crate::core::{BookDraft, BookRecord, Category, Session, User, WorkflowError};
pub use presenter::{Presenter, Route};
pub use shell::AppShell;
pub use store::BookStore;
pub use workflow::{GenerationOutcome, Phase, RegistrationWorkflow, WorkflowDeps};
