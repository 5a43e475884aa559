//! 表示モード
//!
//! 保持せず、3つのフラグから毎回導出する。

/// 画面の表示モード
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// 待機中（画像未選択、または選択済みで解析前）
    Idle { image_staged: bool },
    /// 解析中
    Analyzing,
    /// 結果表示
    Result,
}

impl ViewMode {
    /// (画像あり, 解析中, 結果あり) から表示モードを導出
    pub fn derive(image_staged: bool, analyzing: bool, has_result: bool) -> Self {
        if analyzing {
            ViewMode::Analyzing
        } else if has_result {
            ViewMode::Result
        } else {
            ViewMode::Idle { image_staged }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Idle { .. } => "idle",
            ViewMode::Analyzing => "analyzing",
            ViewMode::Result => "result",
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, ViewMode::Idle { .. })
    }
}
