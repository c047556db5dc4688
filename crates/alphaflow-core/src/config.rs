//! 설정 관리.
//!
//! 이 모듈은 파이프라인 설정을 정의하고 관리합니다.
//! 설정은 YAML 파일에서 로드되며 `ALPHAFLOW__*` 환경변수로 오버라이드할 수 있습니다.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// 애플리케이션 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// API 요청 파라미터
    #[serde(default)]
    pub api: ApiConfig,
    /// 프로파일별 검증 규칙
    #[serde(default)]
    pub validation: HashMap<String, ValidationProfile>,
    /// 아티팩트 저장 경로 설정
    pub storage: StorageConfig,
    /// 변환 단계 설정
    pub transform: TransformConfig,
}

/// API 요청 파라미터 설정.
///
/// 모든 필드는 `Option`입니다. 키의 존재 여부는 프로파일의 `required_keys`
/// 검사 대상이며, 누락은 파싱 에러가 아니라 해석 단계의 설정 에러로 처리됩니다.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ApiConfig {
    /// REST 엔드포인트 URL
    pub endpoint: Option<String>,
    /// 조회할 심볼
    pub symbol: Option<String>,
    /// 조회 간격 (예: "5min")
    pub interval: Option<String>,
    /// 요청 타임아웃 (밀리초)
    #[serde(rename = "timeout")]
    pub timeout_ms: Option<u64>,
}

impl ApiConfig {
    /// 주어진 이름의 키가 설정에 존재하는지 확인합니다.
    pub fn has_key(&self, key: &str) -> bool {
        match key {
            "endpoint" => self.endpoint.is_some(),
            "symbol" => self.symbol.is_some(),
            "interval" => self.interval.is_some(),
            "timeout" => self.timeout_ms.is_some(),
            _ => false,
        }
    }
}

/// 프로파일별 검증 규칙.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ValidationProfile {
    /// 요청 구성 전에 존재해야 하는 `api` 섹션 키 목록
    #[serde(default)]
    pub required_keys: Vec<String>,
}

/// 아티팩트 저장 경로 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// 원본 아티팩트 디렉토리
    pub raw_data_dir: PathBuf,
    /// 변환 결과 디렉토리
    pub processed_data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            raw_data_dir: PathBuf::from("data/raw_data"),
            processed_data_dir: PathBuf::from("data/processed_data"),
        }
    }
}

/// 변환 단계 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TransformConfig {
    /// 각 시계열 엔트리에 존재해야 하는 값 필드 목록
    pub required_fields: Vec<String>,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            required_fields: default_transform_fields(),
        }
    }
}

fn default_transform_fields() -> Vec<String> {
    ["1. open", "2. high", "3. low", "4. close", "5. volume"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            // 기본값으로 시작
            .set_default("storage.raw_data_dir", "data/raw_data")?
            .set_default("storage.processed_data_dir", "data/processed_data")?
            .set_default(
                "transform.required_fields",
                default_transform_fields(),
            )?
            // 파일에서 로드
            .add_source(config::File::from(path.as_ref()))
            // 환경 변수로 오버라이드
            .add_source(
                config::Environment::with_prefix("ALPHAFLOW")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// 기본 경로에서 설정을 로드합니다.
    pub fn load_default() -> Result<Self, config::ConfigError> {
        Self::load("config/default.yaml")
    }
}
