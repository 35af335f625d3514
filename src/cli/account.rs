//! Account CLI commands
//!
//! Registration and sign-in for the local account. Passwords are read from
//! the terminal without echo and wiped from memory after use.

use clap::Subcommand;
use zeroize::Zeroizing;

use crate::config::paths::BudgetPaths;
use crate::error::{BudgetError, BudgetResult};
use crate::identity::{IdentityProvider, LocalIdentityProvider};

/// Environment variable supplying the password non-interactively
pub const PASSWORD_ENV: &str = "POCKET_BUDGET_PASSWORD";

/// Account subcommands
#[derive(Subcommand)]
pub enum AccountCommands {
    /// Register the local account
    Register {
        /// Email address
        email: String,
    },

    /// Sign in
    #[command(name = "sign-in")]
    SignIn {
        /// Email address
        email: String,
    },

    /// Sign out
    #[command(name = "sign-out")]
    SignOut,

    /// Show who is signed in
    Status,
}

/// Handle an account command
pub fn handle_account_command(paths: &BudgetPaths, cmd: AccountCommands) -> BudgetResult<()> {
    let mut provider = LocalIdentityProvider::new(paths);

    match cmd {
        AccountCommands::Register { email } => {
            let password = read_password("Choose a password: ")?;
            if std::env::var(PASSWORD_ENV).is_err() {
                let confirm = read_password("Confirm password: ")?;
                if *password != *confirm {
                    return Err(BudgetError::Identity("Passwords do not match".into()));
                }
            }
            provider.register(&email, &password)?;
            println!("Registered {}", email.trim().to_lowercase());
            println!("Run 'pocket account sign-in {}' to sign in.", email.trim());
        }

        AccountCommands::SignIn { email } => {
            let password = read_password("Password: ")?;
            let session = provider.sign_in(&email, &password)?;
            println!("Signed in as {}", session.email);
        }

        AccountCommands::SignOut => {
            provider.sign_out()?;
            println!("Signed out");
        }

        AccountCommands::Status => match provider.get_session()? {
            Some(session) => println!(
                "Signed in as {} since {}",
                session.email,
                session.signed_in_at.format("%Y-%m-%d %H:%M UTC")
            ),
            None => match provider.registered_email()? {
                Some(email) => println!("Not signed in (registered account: {})", email),
                None => println!("No account registered"),
            },
        },
    }

    Ok(())
}

fn read_password(prompt: &str) -> BudgetResult<Zeroizing<String>> {
    if let Ok(password) = std::env::var(PASSWORD_ENV) {
        return Ok(Zeroizing::new(password));
    }
    rpassword::prompt_password(prompt)
        .map(Zeroizing::new)
        .map_err(|e| BudgetError::Identity(format!("Failed to read password: {}", e)))
}
