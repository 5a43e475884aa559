//! 解析結果の型定義
//!
//! CLIと解析サービスで共有される型:
//! - AnalysisResult: 反応解析の最終出力
//! - MechanismStep: 反応機構の1段階
//! - StepKind: 段階の種別（活化・進攻・消除）

use serde::{Deserialize, Serialize};

/// 反応機構ステップの種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    Activation,
    Attack,
    Restoration,
}

impl StepKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepKind::Activation => "activation",
            StepKind::Attack => "attack",
            StepKind::Restoration => "restoration",
        }
    }

    /// バッジ表示用ラベル
    pub fn label(&self) -> &'static str {
        match self {
            StepKind::Activation => "活化",
            StepKind::Attack => "进攻",
            StepKind::Restoration => "消除",
        }
    }

    /// バッジの色調（進攻のみ警告色）
    pub fn tone(&self) -> BadgeTone {
        match self {
            StepKind::Attack => BadgeTone::Warning,
            StepKind::Activation | StepKind::Restoration => BadgeTone::Neutral,
        }
    }
}

/// バッジの色調
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeTone {
    Neutral,
    Success,
    Warning,
    Primary,
}

/// 反応機構の1段階
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MechanismStep {
    /// 1始まりの段階番号
    pub step: u32,
    pub title: String,
    #[serde(rename = "desc")]
    pub description: String,
    #[serde(rename = "type")]
    pub kind: StepKind,
}

/// AI解析結果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub reaction_name: String,

    /// 信頼度（0〜100）
    pub confidence: f32,

    #[serde(default)]
    pub summary: String,

    #[serde(default)]
    pub equation: String,         // 総反応式

    #[serde(default)]
    pub conditions: Vec<String>,  // 反応条件

    #[serde(default)]
    pub mechanism_steps: Vec<MechanismStep>,

    #[serde(default)]
    pub hazards: Vec<String>,     // 安全上の注意

    #[serde(default)]
    pub similar_reactions: Vec<String>,
}

impl AnalysisResult {
    /// 段階番号が 1, 2, ..., n の連番になっているか
    ///
    /// 解析サービス側の契約。フィクスチャ読み込み時に検証する。
    pub fn has_sequential_steps(&self) -> bool {
        self.mechanism_steps
            .iter()
            .enumerate()
            .all(|(i, s)| s.step as usize == i + 1)
    }

    /// 信頼度が 0〜100 の範囲内か
    pub fn confidence_in_range(&self) -> bool {
        (0.0..=100.0).contains(&self.confidence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(n: u32, kind: StepKind) -> MechanismStep {
        MechanismStep {
            step: n,
            title: format!("step {}", n),
            description: String::new(),
            kind,
        }
    }

    #[test]
    fn test_analysis_result_default() {
        let result = AnalysisResult::default();
        assert_eq!(result.reaction_name, "");
        assert!(result.mechanism_steps.is_empty());
        assert!(result.has_sequential_steps());
    }

    #[test]
    fn test_analysis_result_serialize() {
        let result = AnalysisResult {
            reaction_name: "Diels-Alder".to_string(),
            confidence: 91.0,
            mechanism_steps: vec![step(1, StepKind::Attack)],
            similar_reactions: vec!["Hetero-Diels-Alder".to_string()],
            ..Default::default()
        };

        let json = serde_json::to_string(&result).expect("シリアライズ失敗");
        assert!(json.contains("\"reactionName\":\"Diels-Alder\""));
        assert!(json.contains("\"mechanismSteps\""));
        assert!(json.contains("\"type\":\"attack\""));
        assert!(json.contains("\"desc\":\"\""));
        assert!(json.contains("\"similarReactions\""));
    }

    #[test]
    fn test_analysis_result_deserialize() {
        let json = r#"{
            "reactionName": "Aldol",
            "confidence": 87.5,
            "equation": "2 CH3CHO → CH3CH(OH)CH2CHO",
            "mechanismSteps": [
                {"step": 1, "title": "烯醇化", "desc": "碱夺取 α-氢", "type": "activation"},
                {"step": 2, "title": "亲核加成", "desc": "烯醇负离子进攻羰基", "type": "attack"}
            ]
        }"#;

        let result: AnalysisResult = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(result.reaction_name, "Aldol");
        assert_eq!(result.confidence, 87.5);
        assert_eq!(result.mechanism_steps.len(), 2);
        assert_eq!(result.mechanism_steps[0].description, "碱夺取 α-氢");
        assert_eq!(result.mechanism_steps[1].kind, StepKind::Attack);
        assert!(result.conditions.is_empty()); // デフォルト値
        assert!(result.hazards.is_empty());
    }

    #[test]
    fn test_unknown_step_kind_rejected() {
        let json = r#"{"step": 1, "title": "x", "desc": "y", "type": "rearrangement"}"#;
        assert!(serde_json::from_str::<MechanismStep>(json).is_err());
    }

    #[test]
    fn test_sequential_steps() {
        let mut result = AnalysisResult {
            mechanism_steps: vec![
                step(1, StepKind::Activation),
                step(2, StepKind::Attack),
                step(3, StepKind::Restoration),
            ],
            ..Default::default()
        };
        assert!(result.has_sequential_steps());

        result.mechanism_steps[2].step = 4;
        assert!(!result.has_sequential_steps());

        result.mechanism_steps.remove(0);
        assert!(!result.has_sequential_steps());
    }

    #[test]
    fn test_confidence_range() {
        let mut result = AnalysisResult { confidence: 100.0, ..Default::default() };
        assert!(result.confidence_in_range());
        result.confidence = 100.5;
        assert!(!result.confidence_in_range());
        result.confidence = -1.0;
        assert!(!result.confidence_in_range());
    }

    #[test]
    fn test_step_kind_labels() {
        assert_eq!(StepKind::Activation.label(), "活化");
        assert_eq!(StepKind::Attack.label(), "进攻");
        assert_eq!(StepKind::Restoration.label(), "消除");
        assert_eq!(StepKind::Attack.tone(), BadgeTone::Warning);
        assert_eq!(StepKind::Restoration.tone(), BadgeTone::Neutral);
        assert_eq!(StepKind::Activation.as_str(), "activation");
    }
}
