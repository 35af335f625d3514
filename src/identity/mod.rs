//! Account and session management
//!
//! The budgeting core never consults identity. The only thing the rest of
//! the application takes from here is whether someone is signed in, which
//! the command line uses as a gate when `require_sign_in` is set.

pub mod local;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{BudgetError, BudgetResult};

pub use local::LocalIdentityProvider;

/// An active session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub email: String,
    pub signed_in_at: DateTime<Utc>,
}

/// Called with the new session (or `None` after sign-out) whenever it changes
pub type SessionListener = Box<dyn Fn(Option<&Session>)>;

/// An account backend
///
/// Each operation completes once with a success or failure; failures are
/// `BudgetError::Identity` and never touch budget data.
pub trait IdentityProvider {
    /// The current session, if someone is signed in
    fn get_session(&self) -> BudgetResult<Option<Session>>;

    /// Sign in with email and password
    fn sign_in(&mut self, email: &str, password: &str) -> BudgetResult<Session>;

    /// End the current session; signing out while signed out is not an error
    fn sign_out(&mut self) -> BudgetResult<()>;

    /// Register a listener for session changes
    fn subscribe(&mut self, listener: SessionListener);
}

/// Fail unless someone is signed in
pub fn require_session(provider: &dyn IdentityProvider) -> BudgetResult<Session> {
    provider.get_session()?.ok_or_else(|| {
        BudgetError::Identity("Sign in first with 'pocket account sign-in'".into())
    })
}
