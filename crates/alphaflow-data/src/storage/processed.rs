//! 변환 결과 아티팩트 저장.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{DataError, Result};
use crate::transform::IntradayRecord;

/// 변환된 레코드를 `<dir>/processed_data_<token>.json`에 저장.
pub fn save_processed_records(
    records: &[IntradayRecord],
    token: &str,
    dir: &Path,
) -> Result<PathBuf> {
    fs::create_dir_all(dir).map_err(|e| DataError::from_io(e, dir))?;

    let path = dir.join(format!("processed_data_{}.json", token));
    let contents = serde_json::to_string_pretty(records)?;
    fs::write(&path, contents).map_err(|e| DataError::from_io(e, &path))?;

    tracing::info!(
        path = %path.display(),
        records = records.len(),
        "변환 아티팩트 저장 완료"
    );
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn sample_record() -> IntradayRecord {
        IntradayRecord {
            timestamp: NaiveDate::from_ymd_opt(2024, 11, 1)
                .unwrap()
                .and_hms_opt(16, 0, 0)
                .unwrap(),
            open: dec!(210.50),
            high: dec!(211.00),
            low: dec!(209.75),
            close: dec!(210.80),
            volume: 123456,
        }
    }

    #[test]
    fn test_save_processed_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let records = vec![sample_record()];

        let path =
            save_processed_records(&records, "20241101160530250", dir.path()).unwrap();
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "processed_data_20241101160530250.json"
        );

        let written: Vec<IntradayRecord> =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, records);
    }

    #[test]
    fn test_save_processed_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("data").join("processed_data");

        let path = save_processed_records(&[], "20240101000000000", &nested).unwrap();
        assert!(path.exists());
    }
}
