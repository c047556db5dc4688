//! Standalone extraction pipeline CLI.

use alphaflow_core::{init_logging, AppConfig, LogConfig, LogFormat};
use alphaflow_extractor::{modules, DEFAULT_PROFILE};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "alphaflow-extractor")]
#[command(about = "AlphaFlow Intraday Data Extractor", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// 콘솔 로그 형식 (pretty, json, compact)
    #[arg(long, default_value = "pretty")]
    log_format: String,

    /// append 전용 추출 기록 로그 파일
    #[arg(long, default_value = "logs/extraction_record.log")]
    log_file: PathBuf,

    /// 설정 파일 경로
    #[arg(long, default_value = "config/default.yaml")]
    config: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// 시계열 데이터 추출 (호출당 단일 요청)
    Extract {
        /// 검증 프로파일 이름
        #[arg(long, default_value = DEFAULT_PROFILE)]
        profile: String,
    },

    /// 최신 원본 아티팩트를 타입 레코드로 변환
    Transform,

    /// 전체 워크플로우 실행 (추출 → 변환)
    RunAll,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // .env 파일의 환경변수 로드 (시크릿 + 설정 오버라이드)
    dotenvy::dotenv().ok();

    let format = cli
        .log_format
        .parse::<LogFormat>()
        .map_err(|e| anyhow::anyhow!(e))?;
    init_logging(
        LogConfig::new(&cli.log_level)
            .with_format(format)
            .with_file(&cli.log_file),
    )
    .map_err(|e| anyhow::anyhow!("로깅 초기화 실패: {}", e))?;

    tracing::info!("AlphaFlow Extractor 시작");

    let config = match AppConfig::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(path = %cli.config.display(), error = %e, "설정 로드 실패");
            std::process::exit(1);
        }
    };

    if let Err(e) = run(cli.command, &config).await {
        tracing::error!(error = %e, "파이프라인 실행 실패");
        std::process::exit(1);
    }

    tracing::info!("AlphaFlow Extractor 종료");
    Ok(())
}

async fn run(command: Commands, config: &AppConfig) -> alphaflow_extractor::Result<()> {
    match command {
        Commands::Extract { profile } => {
            let outcome = modules::run_extract(config, &profile).await?;
            println!(
                "Data extracted and saved to {}",
                outcome.artifact_path.display()
            );
        }
        Commands::Transform => {
            let stats = modules::run_transform(config)?;
            stats.log_summary("변환");
        }
        Commands::RunAll => {
            tracing::info!("=== 전체 워크플로우 시작 ===");

            tracing::info!("Step 1/2: 추출");
            let outcome = modules::run_extract(config, DEFAULT_PROFILE).await?;
            println!(
                "Data extracted and saved to {}",
                outcome.artifact_path.display()
            );

            tracing::info!("Step 2/2: 변환");
            let stats = modules::run_transform(config)?;
            stats.log_summary("변환");

            tracing::info!("=== 전체 워크플로우 완료 ===");
        }
    }
    Ok(())
}
