pub mod documents;
pub mod labor_csv;
pub mod period;
pub mod pipeline;
pub mod worksheet;

pub use crate::domain::model::{Row, SyncReport, SyncResult};
pub use crate::domain::ports::{DocumentSource, FileStore, SpreadsheetService, TokenProvider};
pub use crate::utils::error::Result;
pub use pipeline::{Pipeline, SyncEngine};
