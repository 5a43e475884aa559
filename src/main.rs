use clap::Parser;
use organic_ai::{cli, config, error, session};
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use session::Overrides;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// RUST_LOG 未指定時のフィルタ
fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "organic_ai=debug"
    } else {
        "organic_ai=info"
    }
}

fn init_tracing(verbose: bool) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(verbose).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Analyze { image, format, output, fixture, delay_ms } => {
            println!("⚗ organic-ai - 反应解析\n");
            let config = Overrides { fixture, delay_ms }.apply(&config);
            session::run_analyze(&config, &image, format, output.as_deref()).await?;
            println!("\n✅ 完了");
        }

        Commands::Interactive { fixture, delay_ms } => {
            let config = Overrides { fixture, delay_ms }.apply(&config);
            session::run_interactive(&config).await?;
        }

        Commands::Config { show, set_delay_ms, set_timeout, set_fixture } => {
            let mut config = config;
            let changed = set_delay_ms.is_some() || set_timeout.is_some() || set_fixture.is_some();

            if let Some(delay) = set_delay_ms {
                config.analysis_delay_ms = delay;
            }
            if let Some(timeout) = set_timeout {
                config.timeout_seconds = timeout;
            }
            if let Some(fixture) = set_fixture {
                config.fixture_path = Some(fixture);
            }
            if changed {
                config.validate()?;
                config.save()?;
                println!("✔ 設定を保存しました");
            }

            if show || !changed {
                println!("設定:");
                println!("  パス: {}", Config::config_path()?.display());
                println!("  解析遅延: {}ms", config.analysis_delay_ms);
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                println!(
                    "  フィクスチャ: {}",
                    config
                        .fixture_path
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "未設定（既定の結果）".to_string())
                );
            }
        }
    }

    Ok(())
}
