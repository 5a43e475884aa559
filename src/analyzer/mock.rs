//! モック解析サービス
//!
//! 一定時間待ってから固定の解析結果を返す。

use super::{AnalysisResult, AnalysisService};
use crate::image_ref::ImageRef;
use async_trait::async_trait;
use organic_ai_common::{parse_analysis_response, sample, Result};
use std::path::Path;
use std::time::Duration;

/// 既定の応答遅延
pub const DEFAULT_DELAY: Duration = Duration::from_millis(2500);

#[derive(Debug, Clone)]
pub struct MockAnalysisService {
    delay: Duration,
    payload: AnalysisResult,
}

impl MockAnalysisService {
    pub fn new(delay: Duration, payload: AnalysisResult) -> Self {
        Self { delay, payload }
    }

    /// JSONフィクスチャから返却ペイロードを読み込む
    ///
    /// 生のJSONでも ```json ブロックでもよい。
    pub fn from_fixture(path: &Path, delay: Duration) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let payload = parse_analysis_response(&content)?;
        Ok(Self::new(delay, payload))
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn payload(&self) -> &AnalysisResult {
        &self.payload
    }
}

impl Default for MockAnalysisService {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY, sample::friedel_crafts_acylation())
    }
}

#[async_trait]
impl AnalysisService for MockAnalysisService {
    async fn analyze(&self, image: &ImageRef) -> Result<AnalysisResult> {
        tracing::debug!(
            image = image.short_fingerprint(),
            delay_ms = self.delay.as_millis() as u64,
            "mock analysis started"
        );
        tokio::time::sleep(self.delay).await;
        Ok(self.payload.clone())
    }

    fn name(&self) -> &str {
        "mock"
    }
}
