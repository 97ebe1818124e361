pub mod mano_obra;
pub mod materiales;

use crate::config::AppConfig;
use crate::core::{SyncReport, SyncResult};
use crate::utils::error::ErrorCategory;
use chrono::{Datelike, NaiveDate};
use std::future::Future;
use std::sync::Arc;
use tokio::task::JoinError;

pub use mano_obra::sync_mano_obra;
pub use materiales::{sync_materiales, sync_materiales_month};

/// 取出 panic 訊息，或 join 錯誤本身
pub fn join_error_message(err: JoinError) -> String {
    if !err.is_panic() {
        return err.to_string();
    }
    let payload = err.into_panic();
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "job panicked".to_string()
    }
}

/// 在獨立的 task 中執行任務，panic 只影響該任務
async fn isolated<F>(name: &str, job: F) -> Result<SyncResult, String>
where
    F: Future<Output = SyncResult> + Send + 'static,
{
    tokio::spawn(job).await.map_err(|e| {
        let message = join_error_message(e);
        tracing::error!("💥 {} sync aborted: {}", name, message);
        message
    })
}

/// 先執行 `today` 所在月份的 materiales 任務，再執行 mano de obra 任務
/// 任一失敗不會影響另一個
pub async fn run_all(config: Arc<AppConfig>, today: NaiveDate) -> SyncReport {
    let materiales = {
        let config = Arc::clone(&config);
        isolated("materiales", async move {
            sync_materiales_month(&config, today.year(), today.month(), None).await
        })
        .await
        .unwrap_or_else(|message| SyncResult::failure(ErrorCategory::Internal, message))
    };

    let mano_obra = {
        let config = Arc::clone(&config);
        isolated("mano_obra", async move { sync_mano_obra(&config, None, None).await })
            .await
            .unwrap_or_else(|message| {
                SyncResult::failure(ErrorCategory::Internal, message).with_file("")
            })
    };

    SyncReport {
        materiales,
        mano_obra,
    }
}
