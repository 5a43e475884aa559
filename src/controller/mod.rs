//! 画面状態コントローラ
//!
//! 選択画像・解析中フラグ・解析結果・一時的なUIフラグ（メニュー、ドラッグ）を保持し、
//! ユーザー操作と非同期処理の完了で状態を遷移させる。
//!
//! 非同期処理（画像デコード、解析サービス呼び出し）は Tokio タスクとして起動し、
//! 完了通知をチャネル経由で受け取って適用する。完了通知には世代番号が付いており、
//! reset 後や新しい選択後に届いた古い通知は破棄される。

mod state;

pub use state::ViewMode;

use crate::analyzer::{AnalysisResult, AnalysisService};
use crate::image_ref::{self, ImageRef};
use organic_ai_common::{Error, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// 解析サービスの既定タイムアウト
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// 非同期タスクからの完了通知
enum Completion {
    ImageDecoded { selection: u64, outcome: Result<ImageRef> },
    AnalysisFinished { generation: u64, outcome: Result<AnalysisResult> },
}

/// 完了通知を適用した結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// 画像を差し替えた
    ImageStaged,
    /// デコード失敗（画像は変更なし）
    DecodeFailed,
    /// 解析結果を保存した
    ResultStored,
    /// 解析失敗（再試行可能）
    AnalysisFailed,
    /// 古い通知なので破棄した
    Discarded,
}

pub struct ViewStateController {
    service: Arc<dyn AnalysisService>,
    timeout: Duration,
    image: Option<ImageRef>,
    analyzing: bool,
    result: Option<AnalysisResult>,
    menu_open: bool,
    drag_over: bool,
    last_error: Option<Error>,
    /// 最新の選択がデコード中
    decoding: bool,
    /// 解析の世代。開始と reset で進む
    generation: u64,
    /// 画像選択の世代。選択と reset で進む
    selection: u64,
    pending: usize,
    tx: mpsc::UnboundedSender<Completion>,
    rx: mpsc::UnboundedReceiver<Completion>,
}

impl ViewStateController {
    pub fn new(service: Arc<dyn AnalysisService>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            service,
            timeout: DEFAULT_TIMEOUT,
            image: None,
            analyzing: false,
            result: None,
            menu_open: false,
            drag_over: false,
            last_error: None,
            decoding: false,
            generation: 0,
            selection: 0,
            pending: 0,
            tx,
            rx,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    // =============================================
    // 状態の参照
    // =============================================

    pub fn mode(&self) -> ViewMode {
        ViewMode::derive(self.image.is_some(), self.analyzing, self.result.is_some())
    }

    pub fn image(&self) -> Option<&ImageRef> {
        self.image.as_ref()
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    pub fn is_analyzing(&self) -> bool {
        self.analyzing
    }

    pub fn last_error(&self) -> Option<&Error> {
        self.last_error.as_ref()
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn is_drag_over(&self) -> bool {
        self.drag_over
    }

    pub fn is_decoding(&self) -> bool {
        self.decoding
    }

    /// 未完了の非同期タスクがあるか
    pub fn has_pending_work(&self) -> bool {
        self.pending > 0
    }

    pub fn service_name(&self) -> &str {
        self.service.name()
    }

    // =============================================
    // ユーザー操作
    // =============================================

    /// 画像を選択（ファイル選択・ドロップ共通）
    ///
    /// デコードは非同期。完了時に画像を差し替え、既存の解析結果を消す。
    /// 解析中は受け付けない。Tokio ランタイム内から呼ぶこと。
    pub fn select_image(&mut self, raw: Vec<u8>) -> bool {
        self.drag_over = false;
        if self.analyzing {
            tracing::warn!("image selection ignored while analysis is running");
            return false;
        }

        self.selection += 1;
        self.decoding = true;
        let selection = self.selection;
        let tx = self.tx.clone();
        self.pending += 1;
        tracing::debug!(selection, bytes = raw.len(), "decoding selected image");

        tokio::spawn(async move {
            let outcome = match tokio::task::spawn_blocking(move || image_ref::decode(&raw)).await {
                Ok(outcome) => outcome,
                Err(e) => Err(Error::Decode(format!("デコードタスクが異常終了しました: {}", e))),
            };
            let _ = tx.send(Completion::ImageDecoded { selection, outcome });
        });
        true
    }

    /// 解析を開始
    ///
    /// 画像未選択、解析中、または新しい選択のデコード中なら何もしない。
    /// 開始した場合のみ `true` を返す。Tokio ランタイム内から呼ぶこと。
    pub fn begin_analysis(&mut self) -> bool {
        let Some(image) = self.image.clone() else {
            tracing::debug!("begin_analysis ignored: no image selected");
            return false;
        };
        if self.analyzing {
            tracing::debug!("begin_analysis ignored: analysis already in flight");
            return false;
        }
        if self.decoding {
            tracing::warn!(selection = self.selection, "begin_analysis ignored: selected image still decoding");
            return false;
        }

        self.analyzing = true;
        self.result = None;
        self.last_error = None;
        self.generation += 1;

        let generation = self.generation;
        let service = Arc::clone(&self.service);
        let timeout = self.timeout;
        let tx = self.tx.clone();
        self.pending += 1;
        tracing::info!(
            generation,
            service = service.name(),
            image = image.short_fingerprint(),
            "analysis started"
        );

        tokio::spawn(async move {
            let mut task = tokio::spawn(async move { service.analyze(&image).await });
            let outcome = match tokio::time::timeout(timeout, &mut task).await {
                Ok(Ok(outcome)) => outcome,
                Ok(Err(e)) => Err(Error::Analysis(format!("解析タスクが異常終了しました: {}", e))),
                Err(_) => {
                    task.abort();
                    Err(Error::Timeout(timeout))
                }
            };
            let _ = tx.send(Completion::AnalysisFinished { generation, outcome });
        });
        true
    }

    /// 画像・結果・解析中フラグをすべてクリア
    ///
    /// 実行中のタスクは止めないが、その完了通知は破棄される。
    pub fn reset(&mut self) {
        if self.analyzing {
            tracing::info!(generation = self.generation, "reset while analysis in flight");
        }
        self.image = None;
        self.result = None;
        self.analyzing = false;
        self.last_error = None;
        self.decoding = false;
        self.generation += 1;
        self.selection += 1;
    }

    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    pub fn close_menu(&mut self) {
        self.menu_open = false;
    }

    pub fn set_drag_over(&mut self, drag_over: bool) {
        self.drag_over = drag_over;
    }

    /// 直近のエラーを取り出してクリア
    pub fn take_error(&mut self) -> Option<Error> {
        self.last_error.take()
    }

    // =============================================
    // 完了通知の処理
    // =============================================

    /// 届いている完了通知をすべて適用（待たない）
    pub fn poll_events(&mut self) -> Vec<Applied> {
        let mut applied = Vec::new();
        while let Ok(completion) = self.rx.try_recv() {
            applied.push(self.apply(completion));
        }
        applied
    }

    /// 完了通知を1件待って適用
    ///
    /// 未完了のタスクがなければ `None`。
    pub async fn next_event(&mut self) -> Option<Applied> {
        if self.pending == 0 {
            return None;
        }
        let completion = self.rx.recv().await?;
        Some(self.apply(completion))
    }

    /// 未完了のタスクがなくなるまで待って適用
    pub async fn settle(&mut self) -> Vec<Applied> {
        let mut applied = Vec::new();
        while let Some(a) = self.next_event().await {
            applied.push(a);
        }
        applied
    }

    fn apply(&mut self, completion: Completion) -> Applied {
        self.pending = self.pending.saturating_sub(1);

        match completion {
            Completion::ImageDecoded { selection, outcome } => {
                if selection != self.selection {
                    tracing::debug!(selection, current = self.selection, "stale image decode discarded");
                    return Applied::Discarded;
                }
                self.decoding = false;
                match outcome {
                    Ok(image) => {
                        tracing::info!(
                            image = image.short_fingerprint(),
                            mime = image.mime_type(),
                            width = image.dimensions().0,
                            height = image.dimensions().1,
                            "image staged"
                        );
                        self.image = Some(image);
                        self.result = None;
                        self.last_error = None;
                        Applied::ImageStaged
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "image decode failed");
                        self.last_error = Some(e);
                        Applied::DecodeFailed
                    }
                }
            }
            Completion::AnalysisFinished { generation, outcome } => {
                if generation != self.generation || !self.analyzing {
                    tracing::debug!(generation, current = self.generation, "stale analysis result discarded");
                    return Applied::Discarded;
                }
                self.analyzing = false;
                match outcome {
                    Ok(result) => {
                        tracing::info!(
                            generation,
                            reaction = %result.reaction_name,
                            confidence = result.confidence,
                            "analysis finished"
                        );
                        self.result = Some(result);
                        Applied::ResultStored
                    }
                    Err(e) => {
                        let e = into_analysis_error(e);
                        tracing::warn!(generation, error = %e, "analysis failed");
                        self.last_error = Some(e);
                        Applied::AnalysisFailed
                    }
                }
            }
        }
    }
}

/// サービス由来のエラーを再試行可能な解析エラーに揃える
fn into_analysis_error(e: Error) -> Error {
    if e.is_retryable() {
        e
    } else {
        Error::Analysis(e.to_string())
    }
}
