pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use app::jobs::{run_all, sync_mano_obra, sync_materiales, sync_materiales_month};
pub use config::{cli::Cli, AppConfig};
pub use core::{SyncEngine, SyncReport, SyncResult};
pub use utils::error::{Result, SyncError};
