//! Organic AI Common Library
//!
//! CLIと解析サービスで共有される型とユーティリティ

pub mod types;
pub mod error;
pub mod parser;
pub mod render;
pub mod sample;

pub use types::{AnalysisResult, BadgeTone, MechanismStep, StepKind};
pub use error::{Error, Result};
pub use parser::{extract_json, parse_analysis_response};
pub use render::render_result;
