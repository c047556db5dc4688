//! 에러 타입 정의.

use alphaflow_data::DataError;
use thiserror::Error;

/// 추출 파이프라인 에러 타입.
#[derive(Debug, Error)]
pub enum ExtractorError {
    /// 설정 로드/해석 에러
    #[error("Configuration error: {0}")]
    Config(String),

    /// 필수 설정 키 누락 (네트워크 호출 전에 탐지됨)
    #[error("Missing required config keys: {}", .keys.join(", "))]
    MissingConfigKeys { keys: Vec<String> },

    /// 필수 시크릿 누락
    #[error("Missing required secret: {0}")]
    MissingSecret(String),

    /// 데이터 플레인 에러 (전송, 검증, 저장)
    #[error("Data error: {0}")]
    Data(#[from] DataError),
}

impl From<config::ConfigError> for ExtractorError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result 타입 별칭.
pub type Result<T> = std::result::Result<T, ExtractorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_keys_display() {
        let err = ExtractorError::MissingConfigKeys {
            keys: vec!["endpoint".to_string(), "symbol".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Missing required config keys: endpoint, symbol"
        );
    }

    #[test]
    fn test_data_error_conversion() {
        let err: ExtractorError = DataError::Timeout("10000ms".to_string()).into();
        assert!(matches!(err, ExtractorError::Data(DataError::Timeout(_))));
    }
}
