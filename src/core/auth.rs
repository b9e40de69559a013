//! Mock authentication against demo accounts and a single pending signup
//!
//! There is no identity provider behind this: demo accounts share one
//! password, a signup is held in the session until its first login, and the
//! Google flow signs in a fixed demo user.

use chrono::{DateTime, Utc};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::{info, warn};

use crate::core::session::{SessionError, SessionStorage, SessionStore};

/// Password accepted for every demo account
pub const DEMO_PASSWORD: &str = "password123";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Manager,
    User,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Manager => write!(f, "manager"),
            Role::User => write!(f, "user"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "manager" => Ok(Role::Manager),
            "user" => Ok(Role::User),
            _ => Err(format!("Unknown role: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login: Option<DateTime<Utc>>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub company: Option<String>,
}

/// A signup waiting for its first login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingSignup {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub company: Option<String>,
    /// Hex SHA-256 of the chosen password
    pub password_sha256: String,
}

impl PendingSignup {
    fn accepts(&self, email: &str, password: &str) -> bool {
        self.email == email && self.password_sha256 == hash_password(password)
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum AuthError {
    #[error("invalid credentials")]
    #[diagnostic(
        code(rfp::auth::invalid_credentials),
        help("demo accounts: admin@example.com, manager@example.com, user@example.com (password: password123)")
    )]
    InvalidCredentials,

    #[error(transparent)]
    #[diagnostic(transparent)]
    Session(#[from] SessionError),
}

fn hash_password(password: &str) -> String {
    format!("{:x}", Sha256::digest(password.as_bytes()))
}

fn demo_user(email: &str) -> Option<User> {
    let (id, first, last, company, role) = match email {
        "admin@example.com" => ("1", "John", "Admin", "ACME Corp", Role::Admin),
        "manager@example.com" => ("2", "Jane", "Manager", "Tech Solutions Inc", Role::Manager),
        "user@example.com" => ("3", "Bob", "User", "StartupXYZ", Role::User),
        _ => return None,
    };
    Some(User {
        id: id.to_string(),
        email: email.to_string(),
        first_name: first.to_string(),
        last_name: last.to_string(),
        company: Some(company.to_string()),
        role,
        last_login: None,
    })
}

pub struct AuthService<S> {
    sessions: SessionStore<S>,
}

impl<S: SessionStorage> AuthService<S> {
    pub fn new(storage: S) -> Self {
        Self {
            sessions: SessionStore::new(storage),
        }
    }

    /// Sign in; a matching pending signup takes precedence over demo accounts
    pub fn login(&mut self, email: &str, password: &str) -> Result<User, AuthError> {
        if let Some(signup) = self.sessions.pending_signup()? {
            if signup.accepts(email, password) {
                let user = User {
                    id: signup.id,
                    email: signup.email,
                    first_name: signup.first_name,
                    last_name: signup.last_name,
                    company: signup.company,
                    role: Role::User,
                    last_login: Some(Utc::now()),
                };
                self.sessions.set_user(&user)?;
                self.sessions.clear_pending_signup()?;
                info!(email = %user.email, "signed in with new account");
                return Ok(user);
            }
        }

        match demo_user(email) {
            Some(mut user) if password == DEMO_PASSWORD => {
                user.last_login = Some(Utc::now());
                self.sessions.set_user(&user)?;
                info!(email = %user.email, role = %user.role, "signed in with demo account");
                Ok(user)
            }
            _ => {
                warn!(email, "rejected login");
                Err(AuthError::InvalidCredentials)
            }
        }
    }

    /// Hold a new account until its first login; replaces any earlier signup
    pub fn signup(&mut self, request: SignupRequest) -> Result<PendingSignup, AuthError> {
        let pending = PendingSignup {
            id: ulid::Ulid::new().to_string(),
            email: request.email,
            first_name: request.first_name,
            last_name: request.last_name,
            company: request.company,
            password_sha256: hash_password(&request.password),
        };
        self.sessions.set_pending_signup(&pending)?;
        info!(email = %pending.email, "signup stored");
        Ok(pending)
    }

    pub fn google_login(&mut self) -> Result<User, AuthError> {
        let user = User {
            id: format!("google_{}", ulid::Ulid::new()),
            email: "google.user@gmail.com".to_string(),
            first_name: "Google".to_string(),
            last_name: "User".to_string(),
            company: Some("Google Login Test".to_string()),
            role: Role::User,
            last_login: Some(Utc::now()),
        };
        self.sessions.set_user(&user)?;
        info!("signed in with Google demo user");
        Ok(user)
    }

    pub fn logout(&mut self) -> Result<(), AuthError> {
        self.sessions.clear()?;
        Ok(())
    }

    pub fn current_user(&self) -> Result<Option<User>, AuthError> {
        Ok(self.sessions.user()?)
    }

    pub fn sessions(&self) -> &SessionStore<S> {
        &self.sessions
    }
}
