//! Local accounts and sessions.
//!
//! Accounts live in the same SQLite database as the history. Passwords are
//! stored as bcrypt hashes; sessions are opaque UUID tokens.

mod context;

pub use context::*;

use std::sync::{Arc, Mutex};

use thiserror::Error;

use crate::db::{Database, DbError, UserCredentials};
use crate::models::{timestamp_now, AuthUser, Session, UserProfile};

/// Minimum accepted password length.
pub const MIN_PASSWORD_LEN: usize = 6;

/// `app_state` key holding the remembered session token.
pub const SESSION_STATE_KEY: &str = "current_session";

/// Auth errors.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    #[error("Password must be at least 6 characters")]
    WeakPassword,

    #[error("An account with this email already exists")]
    EmailTaken,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Database error: {0}")]
    Database(#[from] DbError),

    #[error("Password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("Lock poisoned: {0}")]
    LockPoisoned(String),
}

impl<T> From<std::sync::PoisonError<T>> for AuthError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        AuthError::LockPoisoned(e.to_string())
    }
}

pub type AuthResult<T> = Result<T, AuthError>;

/// Sign-up form.
#[derive(Debug, Clone, Default)]
pub struct SignUpData {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub farm_location: Option<String>,
}

/// Sign-in form.
#[derive(Debug, Clone, Default)]
pub struct SignInData {
    pub email: String,
    pub password: String,
}

/// Account and session manager.
#[derive(Clone)]
pub struct Authenticator {
    db: Arc<Mutex<Database>>,
    cost: u32,
}

impl Authenticator {
    pub fn new(db: Arc<Mutex<Database>>) -> Self {
        Self::with_cost(db, bcrypt::DEFAULT_COST)
    }

    /// Authenticator with an explicit bcrypt work factor (4..=31).
    pub fn with_cost(db: Arc<Mutex<Database>>, cost: u32) -> Self {
        Self { db, cost }
    }

    /// Register a new account and its profile.
    pub fn sign_up(&self, data: SignUpData) -> AuthResult<AuthUser> {
        let email = normalize_email(&data.email);
        if !email.contains('@') {
            return Err(AuthError::InvalidEmail(data.email));
        }
        if data.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::WeakPassword);
        }

        let user = AuthUser {
            id: uuid::Uuid::new_v4().to_string(),
            email,
        };
        let credentials = UserCredentials {
            password_hash: bcrypt::hash(&data.password, self.cost)?,
            user: user.clone(),
        };
        let profile =
            UserProfile::new(&user, data.full_name.trim().to_string(), data.farm_location);

        let mut db = self.db.lock()?;
        match db.insert_user(&credentials, &profile) {
            Ok(()) => {}
            Err(DbError::Constraint(_)) => return Err(AuthError::EmailTaken),
            Err(e) => return Err(e.into()),
        }

        tracing::info!(user_id = %user.id, "Registered user");
        Ok(user)
    }

    /// Check credentials and open a session.
    pub fn sign_in(&self, data: SignInData) -> AuthResult<Session> {
        let email = normalize_email(&data.email);
        let credentials = self
            .db
            .lock()?
            .find_user_by_email(&email)?
            .ok_or(AuthError::InvalidCredentials)?;
        if !bcrypt::verify(&data.password, &credentials.password_hash)? {
            tracing::warn!(email = %email, "Rejected sign-in");
            return Err(AuthError::InvalidCredentials);
        }

        let db = self.db.lock()?;

        let session = Session {
            token: uuid::Uuid::new_v4().to_string(),
            user: credentials.user,
            created_at: timestamp_now(),
        };
        db.insert_session(&session)?;

        tracing::info!(user_id = %session.user.id, "Signed in");
        Ok(session)
    }

    /// End a session. Unknown tokens are ignored.
    pub fn sign_out(&self, token: &str) -> AuthResult<()> {
        let db = self.db.lock()?;
        if db.delete_session(token)? {
            tracing::info!("Signed out");
        }
        Ok(())
    }

    /// User behind a session token.
    pub fn current_user(&self, token: &str) -> AuthResult<Option<AuthUser>> {
        let db = self.db.lock()?;
        Ok(db.get_session(token)?.map(|s| s.user))
    }

    /// Persist a token so the next process can resume the session.
    pub fn remember_session(&self, token: &str) -> AuthResult<()> {
        let db = self.db.lock()?;
        db.set_state(SESSION_STATE_KEY, token)?;
        Ok(())
    }

    /// The remembered session, if its token is still valid.
    pub fn remembered_session(&self) -> AuthResult<Option<Session>> {
        let db = self.db.lock()?;
        match db.get_state(SESSION_STATE_KEY)? {
            Some(token) => Ok(db.get_session(&token)?),
            None => Ok(None),
        }
    }

    pub fn forget_session(&self) -> AuthResult<()> {
        let db = self.db.lock()?;
        db.clear_state(SESSION_STATE_KEY)?;
        Ok(())
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
