//! 端末セッション
//!
//! コントローラを端末から操作する。`analyze` は1枚を一括処理し、
//! `interactive` は画面の操作（画像選択・解析開始・再アップロード・レポート出力）を
//! メニューで再現する。

use crate::analyzer::{AnalysisService, MockAnalysisService};
use crate::config::Config;
use crate::controller::{ViewMode, ViewStateController};
use crate::error::{OrganicAiError, Result};
use crate::report::{self, OutputFormat};
use dialoguer::{Input, Select};
use indicatif::{ProgressBar, ProgressStyle};
use organic_ai_common::render::{self, ANALYZING_SUBTITLE, ANALYZING_TITLE, IDLE_HINT, IDLE_TITLE};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// 1回の実行で設定を上書きする値
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub fixture: Option<PathBuf>,
    pub delay_ms: Option<u64>,
}

impl Overrides {
    pub fn apply(&self, config: &Config) -> Config {
        let mut config = config.clone();
        if let Some(delay) = self.delay_ms {
            config.analysis_delay_ms = delay;
        }
        if let Some(fixture) = &self.fixture {
            config.fixture_path = Some(fixture.clone());
        }
        config
    }
}

/// 設定から解析サービスを組み立てる
pub fn build_service(config: &Config) -> Result<Arc<dyn AnalysisService>> {
    let service = match &config.fixture_path {
        Some(path) => MockAnalysisService::from_fixture(path, config.analysis_delay())?,
        None => MockAnalysisService::default().with_delay(config.analysis_delay()),
    };
    Ok(Arc::new(service))
}

pub fn build_controller(config: &Config) -> Result<ViewStateController> {
    config.validate()?;
    let service = build_service(config)?;
    Ok(ViewStateController::new(service).with_timeout(config.timeout()))
}

/// 画像ファイルを読み込む
pub fn read_image_file(path: &Path) -> Result<Vec<u8>> {
    if !path.is_file() {
        return Err(OrganicAiError::FileNotFound(path.display().to_string()));
    }
    Ok(std::fs::read(path)?)
}

fn spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(format!("{}  {}", ANALYZING_TITLE, ANALYZING_SUBTITLE));
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}

/// 画像を選択してデコード完了まで待つ
pub async fn stage_image(controller: &mut ViewStateController, bytes: Vec<u8>) -> Result<()> {
    controller.select_image(bytes);
    controller.settle().await;
    match controller.take_error() {
        Some(e) => Err(e.into()),
        None if controller.image().is_none() => Err(OrganicAiError::NoImageSelected),
        None => Ok(()),
    }
}

/// 解析を開始し、スピナーを出しながら完了まで待つ
pub async fn analyze_staged(controller: &mut ViewStateController, show_spinner: bool) -> Result<()> {
    if !controller.begin_analysis() {
        return Err(OrganicAiError::NoImageSelected);
    }

    let pb = show_spinner.then(spinner);
    controller.settle().await;
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    if let Some(e) = controller.take_error() {
        return Err(e.into());
    }
    if controller.mode() != ViewMode::Result {
        return Err(OrganicAiError::NoResult);
    }
    Ok(())
}

/// `analyze` サブコマンド
pub async fn run_analyze(
    config: &Config,
    image_path: &Path,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<()> {
    let mut controller = build_controller(config)?;

    println!("[1/2] 画像を読み込み中...");
    let bytes = read_image_file(image_path)?;
    stage_image(&mut controller, bytes).await?;
    if let Some(image) = controller.image() {
        let (w, h) = image.dimensions();
        println!("✔ {} ({}x{})\n", image.mime_type(), w, h);
    }

    println!("[2/2] AI解析中...");
    analyze_staged(&mut controller, true).await?;
    println!("✔ 解析完了\n");

    let result = controller.result().ok_or(OrganicAiError::NoResult)?;
    match output {
        Some(path) => {
            report::write_report(path, result, controller.image(), format)?;
            println!("✔ 結果を保存: {}", path.display());
        }
        None => {
            let text = report::format_result(result, controller.image(), format, chrono::Local::now())?;
            println!("{}", text);
        }
    }
    Ok(())
}

/// 対話メニューの項目
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    SelectImage,
    StartAnalysis,
    ClearImage,
    ShowResult,
    ExportReport,
    Reupload,
    ToggleMenu,
    Quit,
}

impl MenuItem {
    pub fn label(&self) -> &'static str {
        match self {
            MenuItem::SelectImage => "点击或拖拽上传图片",
            MenuItem::StartAnalysis => "开始智能分析",
            MenuItem::ClearImage => "移除图片",
            MenuItem::ShowResult => "查看结果",
            MenuItem::ExportReport => "导出报告",
            MenuItem::Reupload => "重新上传",
            MenuItem::ToggleMenu => "菜单",
            MenuItem::Quit => "退出",
        }
    }
}

/// 表示モードごとに選べる操作
pub fn available_items(mode: ViewMode) -> Vec<MenuItem> {
    match mode {
        ViewMode::Idle { image_staged: false } => {
            vec![MenuItem::SelectImage, MenuItem::ToggleMenu, MenuItem::Quit]
        }
        ViewMode::Idle { image_staged: true } => vec![
            MenuItem::StartAnalysis,
            MenuItem::SelectImage,
            MenuItem::ClearImage,
            MenuItem::ToggleMenu,
            MenuItem::Quit,
        ],
        ViewMode::Analyzing => Vec::new(),
        ViewMode::Result => vec![
            MenuItem::ShowResult,
            MenuItem::ExportReport,
            MenuItem::Reupload,
            MenuItem::ToggleMenu,
            MenuItem::Quit,
        ],
    }
}

const NAV_LINKS: &[&str] = &["反应库", "机理教学", "历史记录"];

fn prompt_path(prompt: &str, default: Option<String>) -> Result<PathBuf> {
    let mut input = Input::<String>::new().with_prompt(prompt);
    if let Some(default) = default {
        input = input.default(default);
    }
    let value = input
        .interact_text()
        .map_err(|e| OrganicAiError::Prompt(e.to_string()))?;
    Ok(PathBuf::from(value.trim()))
}

/// `interactive` サブコマンド
pub async fn run_interactive(config: &Config) -> Result<()> {
    let mut controller = build_controller(config)?;

    println!("{}", IDLE_TITLE);
    println!("{}\n", IDLE_HINT);

    loop {
        if controller.is_menu_open() {
            for link in NAV_LINKS {
                println!("  - {}", link);
            }
        }

        let items = available_items(controller.mode());
        if items.is_empty() {
            // 解析中はメニューを出さずに完了を待つ
            controller.settle().await;
            continue;
        }

        let labels: Vec<&str> = items.iter().map(|i| i.label()).collect();
        let choice = Select::new()
            .with_prompt(format!("[{}]", controller.mode().as_str()))
            .items(&labels)
            .default(0)
            .interact()
            .map_err(|e| OrganicAiError::Prompt(e.to_string()))?;

        match items[choice] {
            MenuItem::SelectImage => {
                let path = prompt_path("图片路径", None)?;
                match read_image_file(&path) {
                    Ok(bytes) => match stage_image(&mut controller, bytes).await {
                        Ok(()) => println!("✔ 已选择: {}", path.display()),
                        Err(e) => println!("✗ {}", e),
                    },
                    Err(e) => println!("✗ {}", e),
                }
            }
            MenuItem::StartAnalysis => match analyze_staged(&mut controller, true).await {
                Ok(()) => {
                    if let Some(result) = controller.result() {
                        println!("{}", render::render_result(result));
                    }
                }
                Err(e) => println!("✗ {} (可重试)", e),
            },
            MenuItem::ClearImage | MenuItem::Reupload => controller.reset(),
            MenuItem::ShowResult => {
                if let Some(result) = controller.result() {
                    println!("{}", render::render_result(result));
                }
            }
            MenuItem::ExportReport => {
                let format = OutputFormat::Markdown;
                let path = prompt_path("报告路径", Some(format.default_file_name()))?;
                if let Some(result) = controller.result() {
                    match report::write_report(&path, result, controller.image(), format) {
                        Ok(()) => println!("✔ 已导出: {}", path.display()),
                        Err(e) => println!("✗ {}", e),
                    }
                }
            }
            MenuItem::ToggleMenu => controller.toggle_menu(),
            MenuItem::Quit => break,
        }
    }

    Ok(())
}
