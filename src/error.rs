use thiserror::Error;

#[derive(Error, Debug)]
pub enum OrganicAiError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("画像が選択されていません。先に画像を選択してください")]
    NoImageSelected,

    #[error("解析結果がありません")]
    NoResult,

    #[error("入力エラー: {0}")]
    Prompt(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] organic_ai_common::Error),
}

pub type Result<T> = std::result::Result<T, OrganicAiError>;
