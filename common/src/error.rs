//! エラー型定義

use std::time::Duration;
use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    /// 画像として解釈できないペイロード
    #[error("Decode error: {0}")]
    Decode(String),

    /// 解析サービスの失敗
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// 解析サービスが制限時間内に応答しなかった
    #[error("Analysis timed out after {0:?}")]
    Timeout(Duration),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// 同じ入力で再試行する価値があるか
    ///
    /// 解析サービス側の失敗とタイムアウトのみ再試行可能。
    /// デコード失敗は別の画像を選び直す必要がある。
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Analysis(_) | Error::Timeout(_))
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
