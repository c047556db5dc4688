//! 원본 아티팩트 저장.
//!
//! 검증된 페이로드에 추출 시각을 주입하고 타임스탬프가 포함된 고유 파일명으로
//! 저장합니다. 파일명 토큰은 밀리초 해상도의 숫자 문자열이므로 정상적인 시계
//! 해상도에서는 동시 실행된 두 프로세스도 서로 다른 파일에 기록합니다.

use chrono::{DateTime, Utc};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{DataError, Result};

/// 파일명과 추출 시각 기록에 쓰이는 타임스탬프 토큰 생성.
///
/// ISO-8601 시각에서 `-`, `T`, `:`, `.` 구분자를 제거한 형태로,
/// 숫자만 포함하므로 파일명에 안전합니다.
pub fn timestamp_token(instant: DateTime<Utc>) -> String {
    instant.format("%Y%m%d%H%M%S%3f").to_string()
}

/// 원본 페이로드를 `<dir>/data_<token>.json`에 저장.
///
/// 직렬화 전에 `extraction_time` 필드를 주입합니다. 디렉토리가 없으면
/// 생성하며, 경로 구성 실패와 권한 문제는 각각
/// [`DataError::DirectoryMissing`]과 [`DataError::PermissionDenied`]로
/// 보고됩니다.
pub fn save_raw_payload(mut payload: Value, token: &str, dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir).map_err(|e| DataError::from_io(e, dir))?;

    let fields = payload
        .as_object_mut()
        .ok_or_else(|| DataError::Parse("payload is not a JSON object".to_string()))?;
    fields.insert("extraction_time".to_string(), Value::String(token.to_string()));

    let path = dir.join(format!("data_{}.json", token));
    let contents = serde_json::to_string_pretty(&payload)?;
    fs::write(&path, contents).map_err(|e| DataError::from_io(e, &path))?;

    tracing::info!(path = %path.display(), "원본 아티팩트 저장 완료");
    Ok(path)
}

/// 원본 아티팩트 파일을 읽어 JSON으로 파싱.
pub fn load_raw_payload(path: &Path) -> Result<Value> {
    let contents = fs::read_to_string(path).map_err(|e| DataError::from_io(e, path))?;
    Ok(serde_json::from_str(&contents)?)
}

/// 디렉토리에서 가장 최근의 원본 아티팩트 탐색.
///
/// 토큰이 고정 폭 숫자 문자열이므로 파일명 사전순 최댓값이 곧 최신입니다.
pub fn latest_raw_file(dir: &Path) -> Result<PathBuf> {
    let entries = fs::read_dir(dir).map_err(|e| DataError::from_io(e, dir))?;

    let mut latest: Option<PathBuf> = None;
    for entry in entries {
        let entry = entry.map_err(|e| DataError::from_io(e, dir))?;
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if !name.starts_with("data_") || !name.ends_with(".json") {
            continue;
        }
        let path = entry.path();
        if latest.as_ref().map_or(true, |cur| path > *cur) {
            latest = Some(path);
        }
    }

    latest.ok_or_else(|| {
        DataError::NotFound(format!("no raw data files in {}", dir.display()))
    })
}
