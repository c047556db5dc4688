//! 데이터 모듈 오류 타입.

use std::path::Path;
use thiserror::Error;

/// 데이터 관련 오류.
#[derive(Debug, Error)]
pub enum DataError {
    /// 요청이 타임아웃을 초과함
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// 비정상 HTTP 상태로 응답이 수신됨
    #[error("HTTP error {status}: {message}")]
    Http { status: u16, message: String },

    /// 응답을 받지 못함 (DNS 실패, 연결 거부 등)
    #[error("Connection error: {0}")]
    Connection(String),

    /// 요청 URL 구성 실패
    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),

    /// 응답 페이로드에 포함된 API 에러 신호
    #[error("API error signal ({kind}): {message}")]
    ApiSignal {
        kind: ApiSignalKind,
        message: String,
    },

    /// 필수 필드 구조 검증 실패
    #[error("Validation failed for field '{field}': {reason}")]
    Structural {
        field: String,
        reason: StructuralReason,
    },

    /// 아티팩트 경로의 디렉토리 누락
    #[error("Directory missing: {0}")]
    DirectoryMissing(String),

    /// 아티팩트 경로에 대한 접근 권한 없음
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// 대상을 찾을 수 없음
    #[error("Not found: {0}")]
    NotFound(String),

    /// 파싱/역직렬화 오류
    #[error("Parse error: {0}")]
    Parse(String),

    /// 알 수 없는 오류
    #[error("Unknown error: {0}")]
    Unknown(String),
}

/// 응답 페이로드의 API 에러 신호 종류.
///
/// 전송 계층 실패와 달리, 제공자 자신이 요청을 거부하거나 제한했음을
/// 페이로드 필드로 알리는 경우입니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiSignalKind {
    /// 요청 한도 초과 안내 ("Note" 필드)
    RateLimit,
    /// 명시적 에러 메시지 ("Error Message" 필드)
    ErrorMessage,
    /// 일반 에러 ("error" 필드)
    Generic,
}

impl std::fmt::Display for ApiSignalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RateLimit => write!(f, "rate limit"),
            Self::ErrorMessage => write!(f, "error message"),
            Self::Generic => write!(f, "generic error"),
        }
    }
}

/// 구조 검증 실패 사유.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructuralReason {
    /// 필드 키가 페이로드에 없음
    Missing,
    /// 필드 값이 null
    Null,
    /// 필드 값이 엔트리가 없는 컨테이너
    Empty,
}

impl std::fmt::Display for StructuralReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing => write!(f, "field is missing"),
            Self::Null => write!(f, "field is null"),
            Self::Empty => write!(f, "field is empty"),
        }
    }
}

impl DataError {
    /// 재시도 가능한 오류인지 확인합니다.
    ///
    /// 이 시스템은 재시도하지 않으므로 분류 용도로만 사용됩니다.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            DataError::Timeout(_)
                | DataError::Connection(_)
                | DataError::ApiSignal {
                    kind: ApiSignalKind::RateLimit,
                    ..
                }
        )
    }

    /// 파일 I/O 오류를 저장 오류로 매핑합니다.
    pub fn from_io(err: std::io::Error, path: &Path) -> Self {
        let detail = format!("{}: {}", path.display(), err);
        match err.kind() {
            std::io::ErrorKind::NotFound => DataError::DirectoryMissing(detail),
            std::io::ErrorKind::PermissionDenied => DataError::PermissionDenied(detail),
            _ => DataError::Unknown(detail),
        }
    }
}

impl From<reqwest::Error> for DataError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            DataError::Timeout(err.to_string())
        } else if err.is_connect() {
            DataError::Connection(err.to_string())
        } else if err.is_decode() {
            DataError::Parse(err.to_string())
        } else {
            DataError::Unknown(err.to_string())
        }
    }
}

impl From<serde_json::Error> for DataError {
    fn from(err: serde_json::Error) -> Self {
        DataError::Parse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DataError>;
