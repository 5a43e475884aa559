//! 画像ハンドル
//!
//! 生のバイト列を検証し、そのまま表示できる Data URL に変換する。

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::GenericImageView;
use organic_ai_common::{Error, Result};
use sha2::{Digest, Sha256};

/// デコード済み画像への不透明なハンドル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    data_url: String,
    mime_type: &'static str,
    width: u32,
    height: u32,
    byte_len: usize,
    fingerprint: String,
}

impl ImageRef {
    /// "data:image/png;base64,..." 形式
    pub fn data_url(&self) -> &str {
        &self.data_url
    }

    pub fn mime_type(&self) -> &'static str {
        self.mime_type
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn byte_len(&self) -> usize {
        self.byte_len
    }

    /// 元バイト列の SHA-256（16進）
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    /// ログ表示用の短縮フィンガープリント
    pub fn short_fingerprint(&self) -> &str {
        &self.fingerprint[..12]
    }
}

/// バイト列を画像としてデコードし ImageRef を作る
///
/// MIMEタイプやサイズの制限はかけない。画像として読めない場合のみ
/// `Error::Decode` を返す。
pub fn decode(bytes: &[u8]) -> Result<ImageRef> {
    if bytes.is_empty() {
        return Err(Error::Decode("空のペイロードです".into()));
    }

    let format = image::guess_format(bytes)
        .map_err(|e| Error::Decode(format!("画像形式を判別できません: {}", e)))?;
    let decoded = image::load_from_memory_with_format(bytes, format)
        .map_err(|e| Error::Decode(format!("画像を読み込めません: {}", e)))?;
    let (width, height) = decoded.dimensions();

    let mime_type = format.to_mime_type();
    let data_url = format!("data:{};base64,{}", mime_type, STANDARD.encode(bytes));
    let fingerprint = hex::encode(Sha256::digest(bytes));

    Ok(ImageRef {
        data_url,
        mime_type,
        width,
        height,
        byte_len: bytes.len(),
        fingerprint,
    })
}
