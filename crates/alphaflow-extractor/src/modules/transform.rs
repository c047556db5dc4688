//! 변환 워크플로우 모듈.
//!
//! 가장 최근의 원본 아티팩트에서 시계열 맵을 꺼내 타입 레코드로 변환하고
//! 변환 아티팩트로 저장합니다.

use alphaflow_core::AppConfig;
use alphaflow_data::storage::{processed, raw};
use alphaflow_data::{transform, DataError};
use chrono::Utc;
use std::time::Instant;

use crate::config::{time_series_field, DEFAULT_INTERVAL};
use crate::error::Result;
use crate::stats::TransformStats;

/// 최신 원본 아티팩트 변환 실행.
pub fn run_transform(config: &AppConfig) -> Result<TransformStats> {
    let start = Instant::now();
    tracing::info!("변환 시작");

    let raw_path = raw::latest_raw_file(&config.storage.raw_data_dir)?;
    tracing::info!(path = %raw_path.display(), "원본 아티팩트 선택");

    let payload = raw::load_raw_payload(&raw_path)?;

    let interval = config.api.interval.as_deref().unwrap_or(DEFAULT_INTERVAL);
    let series_field = time_series_field(interval);
    let series = payload
        .get(&series_field)
        .and_then(|value| value.as_object())
        .ok_or_else(|| {
            DataError::NotFound(format!(
                "'{}' not present in {}",
                series_field,
                raw_path.display()
            ))
        })?;

    let mut stats = TransformStats::new();
    stats.total = series.len();

    let records = transform::transform_series(series, &config.transform.required_fields);
    stats.transformed = records.len();
    stats.skipped = stats.total - stats.transformed;

    if records.is_empty() {
        return Err(DataError::NotFound("no valid records after transform".to_string()).into());
    }

    let token = raw::timestamp_token(Utc::now());
    processed::save_processed_records(&records, &token, &config.storage.processed_data_dir)?;

    stats.elapsed = start.elapsed();
    Ok(stats)
}
