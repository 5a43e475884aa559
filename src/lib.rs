//! organic-ai - 有机反应图片AI解析
//!
//! 画像の選択から解析、結果表示までの画面状態を `controller` が管理し、
//! 解析そのものは `analyzer::AnalysisService` に委ねる。

pub mod analyzer;
pub mod cli;
pub mod config;
pub mod controller;
pub mod error;
pub mod image_ref;
pub mod report;
pub mod session;

pub use controller::{Applied, ViewMode, ViewStateController};
pub use image_ref::ImageRef;
