//! 추출 워크플로우 모듈.
//!
//! 설정 해석 → 요청 → 검증 → 타임스탬프 → 저장을 순서대로 수행합니다.
//! 어느 단계든 실패하면 즉시 중단하며 부분 복구나 재시도는 하지 않습니다.

use alphaflow_core::AppConfig;
use alphaflow_data::provider::AlphaVantageClient;
use alphaflow_data::storage::raw;
use alphaflow_data::validate;
use chrono::Utc;
use std::path::PathBuf;

use crate::config::{resolve_profile, ResolvedProfile};
use crate::error::Result;

/// 추출 실행 결과.
#[derive(Debug)]
pub struct ExtractOutcome {
    /// 저장된 원본 아티팩트 경로
    pub artifact_path: PathBuf,
    /// 페이로드에 주입된 추출 시각 토큰
    pub extraction_time: String,
}

/// 단일 추출 실행.
pub async fn run_extract(config: &AppConfig, profile_name: &str) -> Result<ExtractOutcome> {
    tracing::info!(profile = profile_name, "추출 시작");

    // 설정 오류는 네트워크 호출 전에 전부 걸러짐
    let profile = resolve_profile(config, profile_name)?;
    let required_fields = profile.required_response_fields();
    let ResolvedProfile {
        endpoint,
        symbol,
        interval,
        timeout_ms,
        api_key,
    } = profile;

    let client = AlphaVantageClient::new(endpoint.as_str(), api_key, timeout_ms)?;
    let payload = client.fetch_intraday(&symbol, &interval).await?;

    // API 에러 신호 탐지가 구조 검증보다 먼저다. 제한되거나 거부된 응답은
    // 기대하는 데이터 형태가 아니므로 순서를 바꾸면 오진이 나온다.
    validate::check_api_signals(&payload)?;
    validate::check_required_fields(&payload, &required_fields)?;

    let token = raw::timestamp_token(Utc::now());
    let artifact_path = raw::save_raw_payload(payload, &token, &config.storage.raw_data_dir)?;

    tracing::info!(
        symbol = %symbol,
        path = %artifact_path.display(),
        "추출 완료"
    );

    Ok(ExtractOutcome {
        artifact_path,
        extraction_time: token,
    })
}
