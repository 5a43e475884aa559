//! 解析サービス境界
//!
//! コントローラは `AnalysisService` を通してのみ解析を依頼する。
//! 実際の認識エンジンの代わりに `MockAnalysisService` が固定の結果を返す。

mod mock;

pub use mock::MockAnalysisService;
pub use organic_ai_common::AnalysisResult;

use crate::image_ref::ImageRef;
use async_trait::async_trait;
use organic_ai_common::Result;

/// 画像から反応を解析する外部サービス
#[async_trait]
pub trait AnalysisService: Send + Sync {
    /// 1枚の画像を解析する
    async fn analyze(&self, image: &ImageRef) -> Result<AnalysisResult>;

    /// ログ表示用の名前
    fn name(&self) -> &str {
        "analysis-service"
    }
}
