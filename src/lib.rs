pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command, TaskName};

pub use config::log_store::LocalLogStore;
pub use config::toml_config::TomlConfig;
pub use core::graphql::GraphqlClient;
pub use core::runner::TaskRunner;
pub use core::scheduler::Scheduler;
pub use utils::error::{CrmError, Result};
