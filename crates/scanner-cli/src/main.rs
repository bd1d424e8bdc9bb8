//! Crypto opportunity scanner CLI.

use std::path::PathBuf;

use chrono::Utc;
use clap::{Parser, Subcommand};
use scanner_cli::{explain_regime, modules, render_catalyst_report, render_scan_report};
use scanner_core::{init_logging, LogConfig, ScannerConfig};

#[derive(Parser)]
#[command(name = "scanner")]
#[command(about = "Crypto Opportunity Scanner", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// 설정 파일 경로 (TOML, 없으면 기본값 + 환경변수)
    #[arg(long, short, global = true, default_value = "scanner.toml")]
    config: PathBuf,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// 로그 형식 (pretty, json, compact). 없으면 LOG_FORMAT 환경변수
    #[arg(long, global = true)]
    log_format: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// 기회 스캔 1회 실행 후 리포트 출력
    Scan {
        /// 시가총액 상위 몇 개 종목을 스캔할지
        #[arg(long)]
        universe_size: Option<usize>,

        /// 최소 점수 (0~160)
        #[arg(long)]
        min_score: Option<u32>,

        /// 시장 레짐 확인 생략
        #[arg(long)]
        no_regime: bool,

        /// 카탈리스트 채점 방식
        #[arg(long, value_enum, default_value_t = modules::CatalystMode::Constant)]
        catalyst: modules::CatalystMode,

        /// 내러티브 채점 방식
        #[arg(long, value_enum, default_value_t = modules::NarrativeMode::Constant)]
        narrative: modules::NarrativeMode,

        /// 텍스트 리포트 대신 JSON 출력
        #[arg(long)]
        json: bool,
    },

    /// 현재 시장 레짐 출력
    Regime,

    /// 뉴스 기반 카탈리스트 탐지
    Catalysts,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // 설정 로드
    let mut config = ScannerConfig::load(Some(&cli.config))?;
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    if let Some(format) = cli.log_format.or_else(|| std::env::var("LOG_FORMAT").ok()) {
        config.logging.format = format;
    }

    // 로깅 초기화
    init_logging(LogConfig::from_settings(&config.logging))
        .map_err(|e| anyhow::anyhow!("로깅 초기화 실패: {}", e))?;

    tracing::info!("Crypto Opportunity Scanner 시작");
    tracing::debug!(config = ?cli.config, "설정 로드 완료");

    // 명령 실행
    match cli.command {
        Commands::Scan {
            universe_size,
            min_score,
            no_regime,
            catalyst,
            narrative,
            json,
        } => {
            let options = modules::ScanOptions {
                universe_size,
                min_score,
                skip_regime: no_regime,
                catalyst,
                narrative,
            };
            let result = modules::run_scan(&config, &options).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("{}", render_scan_report(&result, &config.coingecko.vs_currency));
            }

            if result.status.is_aborted() {
                tracing::warn!(status = ?result.status, "스캔이 중단되었습니다");
            }
        }
        Commands::Regime => {
            let reading = modules::check_regime(&config).await?;
            println!("{}", explain_regime(&reading));
        }
        Commands::Catalysts => {
            let catalysts = modules::detect_catalysts(&config).await?;
            println!("{}", render_catalyst_report(&catalysts, Utc::now()));
        }
    }

    tracing::info!("Crypto Opportunity Scanner 종료");
    Ok(())
}
