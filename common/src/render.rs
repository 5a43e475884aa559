//! 解析結果のテキスト表示
//!
//! 結果ページの各カード（反応式・機構・要約・関連反応・安全注意）を
//! 端末向けのプレーンテキストに整形する。

use crate::types::{AnalysisResult, BadgeTone, MechanismStep};
use std::fmt::Write;

/// 解析中画面の見出し
pub const ANALYZING_TITLE: &str = "正在解析分子结构...";
/// 解析中画面の補足
pub const ANALYZING_SUBTITLE: &str = "比对 12,000,000+ 条反应数据库";
/// 待機画面の見出し
pub const IDLE_TITLE: &str = "瞬间解析 有机合成 路径";
/// 待機画面の説明
pub const IDLE_HINT: &str = "上传反应式图片或直接拍照，AI 引擎将在几秒钟内为您推断反应机理、产物及合成路线。";

/// 段階番号を2桁ゼロ埋めで表示
pub fn format_step_number(step: u32) -> String {
    format!("{:02}", step)
}

/// 信頼度バッジの文言
pub fn confidence_badge(confidence: f32) -> String {
    format!("置信度 {}%", confidence)
}

/// バッジをテキストで表現
pub fn badge(text: &str, tone: BadgeTone) -> String {
    match tone {
        BadgeTone::Warning => format!("[!{}]", text),
        BadgeTone::Success => format!("[✔{}]", text),
        BadgeTone::Primary => format!("[*{}]", text),
        BadgeTone::Neutral => format!("[{}]", text),
    }
}

fn render_step(out: &mut String, step: &MechanismStep) {
    let _ = writeln!(
        out,
        "  {}  {} {}",
        format_step_number(step.step),
        step.title,
        badge(step.kind.label(), step.kind.tone())
    );
    let _ = writeln!(out, "      {}", step.description);
}

/// 結果ページ全体をテキスト化
pub fn render_result(result: &AnalysisResult) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", badge(&confidence_badge(result.confidence), BadgeTone::Success));
    let _ = writeln!(out, "{}", result.reaction_name);
    out.push('\n');

    // 総反応式カード
    let _ = writeln!(out, "总反应式");
    let _ = writeln!(out, "  {}", result.equation);
    if !result.conditions.is_empty() {
        let chips: Vec<String> = result.conditions.iter().map(|c| format!("[{}]", c)).collect();
        let _ = writeln!(out, "  {}", chips.join(" "));
    }
    out.push('\n');

    // 反応機構
    let _ = writeln!(out, "反应机理推断");
    for step in &result.mechanism_steps {
        render_step(&mut out, step);
    }
    out.push('\n');

    let _ = writeln!(out, "AI 摘要");
    let _ = writeln!(out, "  {}", result.summary);

    if !result.similar_reactions.is_empty() {
        out.push('\n');
        let _ = writeln!(out, "相关反应推荐");
        for name in &result.similar_reactions {
            let _ = writeln!(out, "  › {}", name);
        }
    }

    if !result.hazards.is_empty() {
        out.push('\n');
        let _ = writeln!(out, "实验安全提示");
        for hazard in &result.hazards {
            let _ = writeln!(out, "  • {}", hazard);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::friedel_crafts_acylation;

    #[test]
    fn test_format_step_number() {
        assert_eq!(format_step_number(1), "01");
        assert_eq!(format_step_number(12), "12");
        assert_eq!(format_step_number(123), "123");
    }

    #[test]
    fn test_confidence_badge() {
        assert_eq!(confidence_badge(98.5), "置信度 98.5%");
        assert_eq!(confidence_badge(98.0), "置信度 98%");
    }

    #[test]
    fn test_badge_tone() {
        assert_eq!(badge("进攻", BadgeTone::Warning), "[!进攻]");
        assert_eq!(badge("活化", BadgeTone::Neutral), "[活化]");
    }

    #[test]
    fn test_render_result_sections() {
        let text = render_result(&friedel_crafts_acylation());
        assert!(text.contains("置信度 98.5%"));
        assert!(text.contains("C6H6 + CH3COCl → C6H5COCH3 + HCl"));
        assert!(text.contains("[催化剂: AlCl3 (无水)]"));
        assert!(text.contains("01  亲电试剂的生成 [活化]"));
        assert!(text.contains("02  亲电进攻 [!进攻]"));
        assert!(text.contains("03  去质子化与芳香性恢复 [消除]"));
        assert!(text.contains("› Gattermann-Koch 反应"));
        assert!(text.contains("• HCl 气体有腐蚀性"));
    }

    #[test]
    fn test_render_result_skips_empty_sections() {
        let result = AnalysisResult {
            reaction_name: "Unknown".into(),
            ..Default::default()
        };
        let text = render_result(&result);
        assert!(!text.contains("相关反应推荐"));
        assert!(!text.contains("实验安全提示"));
    }
}
