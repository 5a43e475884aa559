//! 解析サービスレスポンスパーサー
//!
//! サービスやフィクスチャファイルのテキストからJSONを抽出し、
//! AnalysisResult をパースする

use crate::error::{Error, Result};
use crate::types::AnalysisResult;

/// レスポンスからJSON部分を抽出
///
/// 抽出優先順位:
/// 1. ```json ... ``` ブロック
/// 2. 生の {...} オブジェクト
/// 3. エラー
///
/// # Examples
/// ```
/// use organic_ai_common::extract_json;
///
/// let response = "result: {\"reactionName\": \"Aldol\"}";
/// let json = extract_json(response).unwrap();
/// assert!(json.starts_with('{'));
/// ```
pub fn extract_json(response: &str) -> Result<&str> {
    // ```json ... ``` ブロックを探す
    if let Some(start_marker) = response.find("```json") {
        let start = start_marker + 7; // "```json" の長さ
        if let Some(end_offset) = response[start..].find("```") {
            let end = start + end_offset;
            return Ok(response[start..end].trim());
        }
    }

    // 生の {...} を探す
    if let Some(start) = response.find('{') {
        if let Some(end) = response.rfind('}') {
            if end >= start {
                return Ok(&response[start..=end]);
            }
        }
    }

    Err(Error::Parse("JSONが見つかりません".into()))
}

/// 解析結果レスポンスをパース
///
/// # Returns
/// * `Ok(AnalysisResult)` - パース成功
/// * `Err` - JSONが見つからない、パース失敗、または結果の契約違反
///   （信頼度が 0〜100 の範囲外、段階番号が 1..n の連番でない）
pub fn parse_analysis_response(response: &str) -> Result<AnalysisResult> {
    let json_str = extract_json(response)?;
    let result: AnalysisResult = serde_json::from_str(json_str.trim())
        .map_err(|e| Error::Parse(format!("解析結果 JSONパースエラー: {}", e)))?;

    if !result.confidence_in_range() {
        return Err(Error::Parse(format!(
            "信頼度が範囲外です: {}（0〜100）",
            result.confidence
        )));
    }
    if !result.has_sequential_steps() {
        let steps: Vec<u32> = result.mechanism_steps.iter().map(|s| s.step).collect();
        return Err(Error::Parse(format!("段階番号が連番ではありません: {:?}", steps)));
    }
    Ok(result)
}
