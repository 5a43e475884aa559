use crate::report::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "organic-ai")]
#[command(about = "有机反应图片AI解析工具", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 画像を1枚解析して結果を表示
    Analyze {
        /// 反応式の画像ファイル
        #[arg(required = true)]
        image: PathBuf,

        /// 出力形式
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// 結果を書き出すファイル（省略時は標準出力）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 解析サービスが返すJSONフィクスチャ
        #[arg(long)]
        fixture: Option<PathBuf>,

        /// 解析サービスの応答遅延（ミリ秒）
        #[arg(long)]
        delay_ms: Option<u64>,
    },

    /// 対話モード（画像選択 → 解析 → 結果 → 再アップロード）
    Interactive {
        /// 解析サービスが返すJSONフィクスチャ
        #[arg(long)]
        fixture: Option<PathBuf>,

        /// 解析サービスの応答遅延（ミリ秒）
        #[arg(long)]
        delay_ms: Option<u64>,
    },

    /// 設定を表示・変更
    Config {
        /// 設定を表示
        #[arg(long)]
        show: bool,

        /// 解析サービスの応答遅延を設定（ミリ秒）
        #[arg(long)]
        set_delay_ms: Option<u64>,

        /// 解析タイムアウトを設定（秒）
        #[arg(long)]
        set_timeout: Option<u64>,

        /// 既定のJSONフィクスチャを設定
        #[arg(long)]
        set_fixture: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_analyze() {
        let cli = Cli::parse_from(["organic-ai", "analyze", "reaction.png", "-f", "markdown", "--delay-ms", "0"]);
        match cli.command {
            Commands::Analyze { image, format, delay_ms, output, .. } => {
                assert_eq!(image, PathBuf::from("reaction.png"));
                assert_eq!(format, OutputFormat::Markdown);
                assert_eq!(delay_ms, Some(0));
                assert!(output.is_none());
            }
            _ => panic!("analyze サブコマンドのはず"),
        }
    }

    #[test]
    fn test_parse_config() {
        let cli = Cli::parse_from(["organic-ai", "-v", "config", "--show", "--set-timeout", "10"]);
        assert!(cli.verbose);
        match cli.command {
            Commands::Config { show, set_timeout, .. } => {
                assert!(show);
                assert_eq!(set_timeout, Some(10));
            }
            _ => panic!("config サブコマンドのはず"),
        }
    }
}
