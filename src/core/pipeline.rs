use crate::domain::model::SyncResult;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Instant;

/// 同步任務：prepare → extract → transform → load
#[async_trait]
pub trait Pipeline: Send + Sync {
    /// `prepare` 產生、`load` 使用的目標 (例如工作表)
    type Target: Send;
    type Extracted: Send;
    type Batch: Send;

    fn name(&self) -> &'static str;

    async fn prepare(&self) -> Result<Self::Target>;
    async fn extract(&self) -> Result<Self::Extracted>;
    async fn transform(&self, data: Self::Extracted) -> Result<Self::Batch>;
    async fn load(&self, target: Self::Target, batch: Self::Batch) -> Result<SyncResult>;

    /// 在失敗結果上補充任務專屬欄位
    fn on_failure(&self, result: SyncResult) -> SyncResult {
        result
    }
}

pub struct SyncEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> SyncEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<SyncResult> {
        let name = self.pipeline.name();
        let started = Instant::now();
        tracing::info!("🚀 Starting {} sync", name);

        let target = self.pipeline.prepare().await?;

        tracing::debug!("Extracting {} data...", name);
        let extracted = self.pipeline.extract().await?;

        tracing::debug!("Transforming {} data...", name);
        let batch = self.pipeline.transform(extracted).await?;

        tracing::debug!("Loading {} data...", name);
        let result = self.pipeline.load(target, batch).await?;

        tracing::info!(
            "✅ {} sync finished: {} rows written in {:?}",
            name,
            result.rows_written,
            started.elapsed()
        );
        Ok(result)
    }

    /// 執行 pipeline，錯誤轉為失敗的 `SyncResult`
    pub async fn run_to_result(&self) -> SyncResult {
        match self.run().await {
            Ok(result) => result,
            Err(e) => {
                tracing::error!(
                    "❌ {} sync failed: {} (Category: {:?})",
                    self.pipeline.name(),
                    e,
                    e.category()
                );
                tracing::debug!("💡 Suggestion: {}", e.recovery_suggestion());
                self.pipeline.on_failure(SyncResult::from(&e))
            }
        }
    }
}
