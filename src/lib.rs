pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod server;
pub mod utils;

pub use adapters::SqliteStudentStore;
pub use config::{CliConfig, RegistryConfig};
pub use crate::core::registry::RegistryPage;
pub use server::Server;
pub use utils::error::{RegistryError, Result};
