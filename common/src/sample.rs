//! 固定の解析結果
//!
//! 実際の解析エンジンの代わりにモックサービスが返すペイロード。

use crate::types::{AnalysisResult, MechanismStep, StepKind};

/// Friedel-Crafts 酰基化反应 の解析結果
pub fn friedel_crafts_acylation() -> AnalysisResult {
    AnalysisResult {
        reaction_name: "Friedel-Crafts 酰基化反应 (Friedel-Crafts Acylation)".into(),
        confidence: 98.5,
        summary: "该反应展示了苯与乙酰氯在无水三氯化铝催化下生成苯乙酮的过程。属于亲电芳香取代反应。".into(),
        equation: "C6H6 + CH3COCl → C6H5COCH3 + HCl".into(),
        conditions: vec![
            "催化剂: AlCl3 (无水)".into(),
            "溶剂: 硝基苯 或 CS2".into(),
            "温度: 60°C".into(),
        ],
        mechanism_steps: vec![
            MechanismStep {
                step: 1,
                title: "亲电试剂的生成".into(),
                description: "乙酰氯与路易斯酸 AlCl3 反应，生成酰基正离子 (CH3-C+=O)。这是反应中的活性亲电物种。".into(),
                kind: StepKind::Activation,
            },
            MechanismStep {
                step: 2,
                title: "亲电进攻".into(),
                description: "酰基正离子进攻苯环，打破苯环的芳香性，形成共振稳定的 σ-络合物 (Wheland 中间体)。".into(),
                kind: StepKind::Attack,
            },
            MechanismStep {
                step: 3,
                title: "去质子化与芳香性恢复".into(),
                description: "AlCl4- 作为碱夺取中间体上的质子，恢复苯环的芳香性，生成酮与 HCl，并再生催化剂。".into(),
                kind: StepKind::Restoration,
            },
        ],
        hazards: vec!["AlCl3 遇水剧烈反应".into(), "HCl 气体有腐蚀性".into()],
        similar_reactions: vec!["Friedel-Crafts 烷基化".into(), "Gattermann-Koch 反应".into()],
    }
}
