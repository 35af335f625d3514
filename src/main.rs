use anyhow::Result;
use clap::{Parser, Subcommand};

use pocket_budget::cli::{
    handle_account_command, handle_category_command, handle_expense_command,
    handle_income_command, handle_month_command,
};
use pocket_budget::config::{paths::BudgetPaths, settings::Settings};
use pocket_budget::identity::{self, IdentityProvider, LocalIdentityProvider};
use pocket_budget::services::MonthResolver;
use pocket_budget::storage::{LoadOutcome, Storage};

#[derive(Parser)]
#[command(
    name = "pocket",
    version,
    about = "Personal monthly budgeting from the command line",
    long_about = "Pocket Budget keeps one budget per calendar month: an income, \
                  monthly spending categories, annual savings categories, and \
                  the expenses logged against them."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Month management commands
    #[command(subcommand)]
    Month(pocket_budget::cli::MonthCommands),

    /// Category management commands
    #[command(subcommand)]
    Category(pocket_budget::cli::CategoryCommands),

    /// Income commands
    #[command(subcommand)]
    Income(pocket_budget::cli::IncomeCommands),

    /// Expense commands
    #[command(subcommand, alias = "exp")]
    Expense(pocket_budget::cli::ExpenseCommands),

    /// Account and sign-in commands
    #[command(subcommand)]
    Account(pocket_budget::cli::AccountCommands),

    /// Show recent changes from the audit log
    History {
        /// Only show changes made in this month
        #[arg(short, long)]
        month: Option<String>,
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        count: usize,
    },

    /// Initialize the data directory
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = BudgetPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    // Initialize storage
    let mut storage = Storage::new(paths.clone())?;
    if let LoadOutcome::Recovered { reason, moved_to } = storage.load_all()? {
        eprintln!("Warning: budget data could not be read ({})", reason);
        match moved_to {
            Some(path) => eprintln!("The unreadable file was kept at {}", path.display()),
            None => eprintln!("The unreadable file could not be moved aside"),
        }
        eprintln!("Starting from an empty ledger.");
    }

    let needs_session = matches!(
        cli.command,
        Some(Commands::Month(_))
            | Some(Commands::Category(_))
            | Some(Commands::Income(_))
            | Some(Commands::Expense(_))
    );
    if needs_session && settings.require_sign_in {
        identity::require_session(&LocalIdentityProvider::new(&paths))?;
    }

    match cli.command {
        Some(Commands::Month(cmd)) => {
            handle_month_command(&storage, &mut settings, cmd)?;
        }
        Some(Commands::Category(cmd)) => {
            handle_category_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Income(cmd)) => {
            handle_income_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Expense(cmd)) => {
            handle_expense_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Account(cmd)) => {
            handle_account_command(&paths, cmd)?;
        }
        Some(Commands::History { month, count }) => {
            let entries = match month {
                Some(month) => {
                    let month = MonthResolver::new(&settings).parse(&month)?;
                    storage.audit().read_month(&month, count)?
                }
                None => storage.audit().read_recent(count)?,
            };
            if entries.is_empty() {
                println!("No changes recorded yet.");
            }
            for entry in entries {
                println!("{}", entry);
            }
        }
        Some(Commands::Init) => {
            if !pocket_budget::storage::init::needs_initialization(&paths) {
                println!("Pocket Budget is already initialized at: {}", paths.base_dir().display());
                return Ok(());
            }
            println!("Initializing Pocket Budget at: {}", paths.base_dir().display());
            pocket_budget::storage::init::initialize_storage(&paths)?;
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Run 'pocket month create' to start budgeting this month.");
        }
        Some(Commands::Config) => {
            let provider = LocalIdentityProvider::new(&paths);
            let selected = settings
                .default_month()
                .map(|m| m.to_string())
                .unwrap_or_else(|| "(current month)".to_string());
            let session = match provider.get_session() {
                Ok(Some(session)) => format!("signed in as {}", session.email),
                Ok(None) => "signed out".to_string(),
                Err(e) => format!("unknown ({})", e),
            };

            println!("Pocket Budget Configuration");
            println!("===========================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Budget file:    {}", paths.budgets_file().display());
            println!("Audit log:      {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:  {}", settings.currency_symbol);
            println!("  Selected month:   {}", selected);
            println!("  Require sign-in:  {}", settings.require_sign_in);
            println!("  Session:          {}", session);
        }
        None => {
            println!("Pocket Budget - monthly budgeting from the command line");
            println!();
            println!("Run 'pocket --help' for usage information.");
        }
    }

    Ok(())
}
