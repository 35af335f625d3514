//! Where Pocket Budget keeps its files and the preferences stored in `config.json`

pub mod paths;
pub mod settings;

pub use paths::BudgetPaths;
pub use settings::Settings;
