//! 프로파일 해석 모듈.
//!
//! 정적 설정과 환경 시크릿을 합쳐 요청 구성에 필요한 완전한 프로파일로
//! 해석합니다. 모든 설정 오류는 네트워크 호출이 일어나기 전에 여기서
//! 걸러집니다.

use alphaflow_core::AppConfig;
use secrecy::SecretString;
use std::time::Duration;

use crate::error::{ExtractorError, Result};

/// 기본 검증 프로파일 이름.
pub const DEFAULT_PROFILE: &str = "alpha_vantage_intraday";

/// API 키를 담는 환경변수 이름.
const API_KEY_VAR: &str = "API_KEY";

/// 설정에 간격이 없을 때 사용하는 기본값.
pub const DEFAULT_INTERVAL: &str = "5min";

/// 해석이 끝난 요청 프로파일.
#[derive(Debug)]
pub struct ResolvedProfile {
    /// REST 엔드포인트 URL
    pub endpoint: String,
    /// 조회할 심볼
    pub symbol: String,
    /// 조회 간격
    pub interval: String,
    /// 요청 타임아웃 (밀리초)
    pub timeout_ms: u64,
    /// API 키
    pub api_key: SecretString,
}

impl ResolvedProfile {
    /// 요청 타임아웃을 Duration으로 반환.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// 응답에 존재해야 하는 필수 필드 목록.
    ///
    /// 시계열 필드명은 해석된 간격에서 파생됩니다.
    pub fn required_response_fields(&self) -> Vec<String> {
        vec!["Meta Data".to_string(), time_series_field(&self.interval)]
    }
}

/// 간격에 대응하는 시계열 필드명 (예: "Time Series (5min)").
pub fn time_series_field(interval: &str) -> String {
    format!("Time Series ({})", interval)
}

/// 설정과 환경에서 프로파일을 해석합니다.
///
/// 해석 순서:
/// 1. 검증 프로파일 조회
/// 2. `required_keys` 대비 `api` 섹션 키 존재 확인
/// 3. 환경변수 시크릿 로드 (누락 시 치명적 에러)
/// 4. 요청 파라미터 확정 (간격은 기본값 "5min" 적용)
pub fn resolve_profile(config: &AppConfig, profile_name: &str) -> Result<ResolvedProfile> {
    let profile = config.validation.get(profile_name).ok_or_else(|| {
        ExtractorError::Config(format!("validation profile '{}' not found", profile_name))
    })?;

    let missing: Vec<String> = profile
        .required_keys
        .iter()
        .filter(|key| !config.api.has_key(key))
        .cloned()
        .collect();
    if !missing.is_empty() {
        tracing::error!(profile = profile_name, keys = ?missing, "필수 설정 키 누락");
        return Err(ExtractorError::MissingConfigKeys { keys: missing });
    }

    let api_key = match std::env::var(API_KEY_VAR) {
        Ok(value) if !value.trim().is_empty() => SecretString::from(value),
        _ => {
            tracing::error!(var = API_KEY_VAR, "필수 시크릿이 설정되지 않음");
            return Err(ExtractorError::MissingSecret(API_KEY_VAR.to_string()));
        }
    };

    let endpoint = config
        .api
        .endpoint
        .clone()
        .ok_or_else(|| ExtractorError::Config("api.endpoint is not set".to_string()))?;
    let symbol = config
        .api
        .symbol
        .clone()
        .ok_or_else(|| ExtractorError::Config("api.symbol is not set".to_string()))?;
    let timeout_ms = config
        .api
        .timeout_ms
        .ok_or_else(|| ExtractorError::Config("api.timeout is not set".to_string()))?;
    let interval = config
        .api
        .interval
        .clone()
        .unwrap_or_else(|| DEFAULT_INTERVAL.to_string());

    tracing::debug!(
        profile = profile_name,
        symbol = %symbol,
        interval = %interval,
        timeout_ms = timeout_ms,
        "프로파일 해석 완료"
    );

    Ok(ResolvedProfile {
        endpoint,
        symbol,
        interval,
        timeout_ms,
        api_key,
    })
}
