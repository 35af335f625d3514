//! Local account provider
//!
//! Keeps a single registered account in `account.json`, with the password
//! stored as an Argon2id PHC hash, and the active session in `session.json`.

use std::path::PathBuf;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{IdentityProvider, Session, SessionListener};
use crate::config::paths::BudgetPaths;
use crate::error::{BudgetError, BudgetResult};
use crate::storage::file_io::{read_json, write_json_atomic};

/// The registered account as stored on disk
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredAccount {
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

/// Account provider backed by files in the data directory
pub struct LocalIdentityProvider {
    account_path: PathBuf,
    session_path: PathBuf,
    listeners: Vec<SessionListener>,
}

impl LocalIdentityProvider {
    /// Create a provider using the standard account and session files
    pub fn new(paths: &BudgetPaths) -> Self {
        Self::with_files(paths.account_file(), paths.session_file())
    }

    /// Create a provider with explicit file locations
    pub fn with_files(account_path: PathBuf, session_path: PathBuf) -> Self {
        Self {
            account_path,
            session_path,
            listeners: Vec::new(),
        }
    }

    /// Register the local account
    ///
    /// Only one account can be registered.
    pub fn register(&self, email: &str, password: &str) -> BudgetResult<()> {
        let email = normalize_email(email)?;
        if password.is_empty() {
            return Err(BudgetError::Identity("Password cannot be empty".into()));
        }
        if let Some(existing) = self.account()? {
            return Err(BudgetError::Identity(format!(
                "An account is already registered for {}",
                existing.email
            )));
        }

        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| BudgetError::Identity(format!("Failed to hash password: {}", e)))?
            .to_string();

        let account = StoredAccount {
            email,
            password_hash,
            created_at: Utc::now(),
        };
        write_json_atomic(&self.account_path, &account)
    }

    /// Email of the registered account, if any
    pub fn registered_email(&self) -> BudgetResult<Option<String>> {
        Ok(self.account()?.map(|a| a.email))
    }

    fn account(&self) -> BudgetResult<Option<StoredAccount>> {
        read_json::<Option<StoredAccount>, _>(&self.account_path)
            .map_err(|e| BudgetError::Identity(format!("Failed to read account: {}", e)))
    }

    fn notify(&self, session: Option<&Session>) {
        for listener in &self.listeners {
            listener(session);
        }
    }
}

impl IdentityProvider for LocalIdentityProvider {
    fn get_session(&self) -> BudgetResult<Option<Session>> {
        read_json::<Option<Session>, _>(&self.session_path)
            .map_err(|e| BudgetError::Identity(format!("Failed to read session: {}", e)))
    }

    fn sign_in(&mut self, email: &str, password: &str) -> BudgetResult<Session> {
        let account = self.account()?.ok_or_else(|| {
            BudgetError::Identity("No account registered; run 'pocket account register'".into())
        })?;

        let parsed = PasswordHash::new(&account.password_hash)
            .map_err(|e| BudgetError::Identity(format!("Stored password hash is invalid: {}", e)))?;

        let email_matches = normalize_email(email)
            .map(|e| e == account.email)
            .unwrap_or(false);
        let password_matches = Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok();

        if !email_matches || !password_matches {
            return Err(BudgetError::Identity("Invalid email or password".into()));
        }

        let session = Session {
            email: account.email,
            signed_in_at: Utc::now(),
        };
        write_json_atomic(&self.session_path, &session)
            .map_err(|e| BudgetError::Identity(format!("Failed to save session: {}", e)))?;

        self.notify(Some(&session));
        Ok(session)
    }

    fn sign_out(&mut self) -> BudgetResult<()> {
        if self.session_path.exists() {
            std::fs::remove_file(&self.session_path)
                .map_err(|e| BudgetError::Identity(format!("Failed to end session: {}", e)))?;
        }
        self.notify(None);
        Ok(())
    }

    fn subscribe(&mut self, listener: SessionListener) {
        self.listeners.push(listener);
    }
}

fn normalize_email(email: &str) -> BudgetResult<String> {
    let email = email.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        return Err(BudgetError::Identity(format!(
            "Invalid email address: {}",
            email
        )));
    }
    Ok(email)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::require_session;
    use std::cell::RefCell;
    use std::rc::Rc;
    use tempfile::TempDir;

    fn create_test_provider() -> (TempDir, LocalIdentityProvider) {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp_dir.path().to_path_buf());
        (temp_dir, LocalIdentityProvider::new(&paths))
    }

    #[test]
    fn test_signed_out_by_default() {
        let (_temp, provider) = create_test_provider();
        assert!(provider.get_session().unwrap().is_none());
        assert!(matches!(
            require_session(&provider),
            Err(BudgetError::Identity(_))
        ));
    }

    #[test]
    fn test_register_and_sign_in() {
        let (_temp, mut provider) = create_test_provider();
        provider.register("Me@Example.com", "hunter2").unwrap();
        assert_eq!(
            provider.registered_email().unwrap(),
            Some("me@example.com".to_string())
        );

        let session = provider.sign_in("me@example.com ", "hunter2").unwrap();
        assert_eq!(session.email, "me@example.com");
        assert!(provider.get_session().unwrap().is_some());
        assert_eq!(require_session(&provider).unwrap(), session);
    }

    #[test]
    fn test_wrong_password_rejected() {
        let (_temp, mut provider) = create_test_provider();
        provider.register("me@example.com", "hunter2").unwrap();

        let err = provider.sign_in("me@example.com", "wrong").unwrap_err();
        assert!(matches!(err, BudgetError::Identity(_)));
        assert!(provider.get_session().unwrap().is_none());
    }

    #[test]
    fn test_password_is_not_stored_in_clear() {
        let (temp, provider) = create_test_provider();
        provider.register("me@example.com", "hunter2").unwrap();

        let stored = std::fs::read_to_string(temp.path().join("data").join("account.json")).unwrap();
        assert!(!stored.contains("hunter2"));
        assert!(stored.contains("$argon2id$"));
    }

    #[test]
    fn test_second_registration_rejected() {
        let (_temp, provider) = create_test_provider();
        provider.register("me@example.com", "hunter2").unwrap();
        assert!(provider.register("you@example.com", "pw").is_err());
    }

    #[test]
    fn test_sign_in_without_account() {
        let (_temp, mut provider) = create_test_provider();
        assert!(provider.sign_in("me@example.com", "pw").is_err());
    }

    #[test]
    fn test_listeners_see_changes() {
        let (_temp, mut provider) = create_test_provider();
        provider.register("me@example.com", "hunter2").unwrap();

        let seen: Rc<RefCell<Vec<Option<String>>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        provider.subscribe(Box::new(move |session| {
            sink.borrow_mut().push(session.map(|s| s.email.clone()));
        }));

        provider.sign_in("me@example.com", "hunter2").unwrap();
        provider.sign_out().unwrap();

        assert_eq!(
            *seen.borrow(),
            vec![Some("me@example.com".to_string()), None]
        );
        assert!(provider.get_session().unwrap().is_none());
    }
}
