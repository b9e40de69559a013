//! Core module - project, configuration, record loading and session state

pub mod auth;
pub mod config;
pub mod loader;
pub mod project;
pub mod session;

pub use auth::{AuthError, AuthService, PendingSignup, Role, SignupRequest, User};
pub use config::Config;
pub use loader::{DataSource, LoadError};
pub use project::{Project, ProjectError};
pub use session::{FileStorage, MemoryStorage, SessionError, SessionStorage, SessionStore};
