//! 解析レポート出力（Markdown / JSON / テキスト）

use crate::error::{OrganicAiError, Result};
use crate::image_ref::ImageRef;
use chrono::{DateTime, Local};
use clap::ValueEnum;
use organic_ai_common::render::{confidence_badge, format_step_number, render_result};
use organic_ai_common::AnalysisResult;
use std::fmt::Write as _;
use std::path::Path;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Markdown,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Text => "txt",
            OutputFormat::Json => "json",
            OutputFormat::Markdown => "md",
        }
    }

    /// 出力先を指定しない場合のレポートファイル名
    pub fn default_file_name(&self) -> String {
        format!("report.{}", self.extension())
    }
}

/// 指定形式で解析結果を文字列化
pub fn format_result(
    result: &AnalysisResult,
    image: Option<&ImageRef>,
    format: OutputFormat,
    generated_at: DateTime<Local>,
) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_result(result)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
        OutputFormat::Markdown => Ok(to_markdown(result, image, generated_at)),
    }
}

/// Markdownレポートを生成
pub fn to_markdown(
    result: &AnalysisResult,
    image: Option<&ImageRef>,
    generated_at: DateTime<Local>,
) -> String {
    let mut md = String::new();

    let _ = writeln!(md, "# {}", result.reaction_name);
    md.push('\n');
    let _ = writeln!(md, "- {}", confidence_badge(result.confidence));
    let _ = writeln!(md, "- 生成时间: {}", generated_at.format("%Y-%m-%d %H:%M:%S"));
    if let Some(image) = image {
        let (w, h) = image.dimensions();
        let _ = writeln!(
            md,
            "- 图片: {} ({}x{}, {} bytes, sha256 {})",
            image.mime_type(),
            w,
            h,
            image.byte_len(),
            image.short_fingerprint()
        );
    }
    md.push('\n');

    let _ = writeln!(md, "## 总反应式\n");
    let _ = writeln!(md, "`{}`\n", result.equation);
    for cond in &result.conditions {
        let _ = writeln!(md, "- {}", cond);
    }
    if !result.conditions.is_empty() {
        md.push('\n');
    }

    let _ = writeln!(md, "## 反应机理推断\n");
    for step in &result.mechanism_steps {
        let _ = writeln!(
            md,
            "### {}. {} ({})\n",
            format_step_number(step.step),
            step.title,
            step.kind.label()
        );
        let _ = writeln!(md, "{}\n", step.description);
    }

    let _ = writeln!(md, "## AI 摘要\n");
    let _ = writeln!(md, "{}\n", result.summary);

    if !result.similar_reactions.is_empty() {
        let _ = writeln!(md, "## 相关反应推荐\n");
        for name in &result.similar_reactions {
            let _ = writeln!(md, "- {}", name);
        }
        md.push('\n');
    }

    if !result.hazards.is_empty() {
        let _ = writeln!(md, "## 实验安全提示\n");
        for hazard in &result.hazards {
            let _ = writeln!(md, "- ⚠ {}", hazard);
        }
    }

    md
}

/// レポートをファイルに書き出す
pub fn write_report(
    path: &Path,
    result: &AnalysisResult,
    image: Option<&ImageRef>,
    format: OutputFormat,
) -> Result<()> {
    let content = format_result(result, image, format, Local::now())?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.exists() {
            return Err(OrganicAiError::FileNotFound(parent.display().to_string()));
        }
    }
    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use organic_ai_common::sample::friedel_crafts_acylation;
    use tempfile::tempdir;

    fn fixed_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_markdown_sections() {
        let md = to_markdown(&friedel_crafts_acylation(), None, fixed_time());
        assert!(md.starts_with("# Friedel-Crafts 酰基化反应"));
        assert!(md.contains("- 置信度 98.5%"));
        assert!(md.contains("- 生成时间: 2025-03-01 09:30:00"));
        assert!(md.contains("`C6H6 + CH3COCl → C6H5COCH3 + HCl`"));
        assert!(md.contains("### 01. 亲电试剂的生成 (活化)"));
        assert!(md.contains("### 03. 去质子化与芳香性恢复 (消除)"));
        assert!(md.contains("- ⚠ AlCl3 遇水剧烈反应"));
        assert!(!md.contains("图片:"));
    }

    #[test]
    fn test_json_format_roundtrips_payload() {
        let result = friedel_crafts_acylation();
        let json = format_result(&result, None, OutputFormat::Json, fixed_time()).unwrap();
        let parsed: AnalysisResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, result);
    }

    #[test]
    fn test_write_report() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("report.md");
        write_report(&path, &friedel_crafts_acylation(), None, OutputFormat::Markdown).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("## 反应机理推断"));
    }

    #[test]
    fn test_write_report_missing_dir() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("report.md");
        let err = write_report(&path, &friedel_crafts_acylation(), None, OutputFormat::Text).unwrap_err();
        assert!(matches!(err, OrganicAiError::FileNotFound(_)));
    }

    #[test]
    fn test_extensions() {
        assert_eq!(OutputFormat::Markdown.extension(), "md");
        assert_eq!(OutputFormat::Json.extension(), "json");
        assert_eq!(OutputFormat::Text.extension(), "txt");
    }

    #[test]
    fn test_default_file_name() {
        assert_eq!(OutputFormat::Markdown.default_file_name(), "report.md");
        assert_eq!(OutputFormat::Json.default_file_name(), "report.json");
    }
}
