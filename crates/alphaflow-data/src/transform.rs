//! 시계열 엔트리의 타입 변환.
//!
//! 원본 아티팩트의 "Time Series" 맵을 타입이 지정된 OHLCV 레코드로 변환합니다.
//! 필수 값 필드가 없거나 숫자 파싱에 실패한 엔트리는 경고와 함께 건너뛰며,
//! 배치 전체를 실패시키지 않습니다.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 시계열 타임스탬프 형식 (예: "2024-11-01 16:00:00").
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 장중 OHLCV 레코드.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntradayRecord {
    /// 캔들 타임스탬프
    pub timestamp: NaiveDateTime,
    /// 시가
    pub open: Decimal,
    /// 고가
    pub high: Decimal,
    /// 저가
    pub low: Decimal,
    /// 종가
    pub close: Decimal,
    /// 거래량
    pub volume: i64,
}

/// 시계열 엔트리 하나를 타입 레코드로 변환.
///
/// 필수 값 필드 누락, 타임스탬프/숫자 파싱 실패 시 `None`을 반환하고
/// 사유를 로그에 남깁니다.
pub fn transform_entry(
    timestamp: &str,
    values: &Value,
    required_fields: &[String],
) -> Option<IntradayRecord> {
    let fields = match values.as_object() {
        Some(fields) => fields,
        None => {
            tracing::warn!(timestamp = timestamp, "엔트리가 객체가 아님, 건너뜀");
            return None;
        }
    };

    let missing: Vec<&str> = required_fields
        .iter()
        .filter(|f| !fields.contains_key(f.as_str()))
        .map(|f| f.as_str())
        .collect();
    if !missing.is_empty() {
        tracing::warn!(
            timestamp = timestamp,
            missing = ?missing,
            "필수 값 필드 누락, 건너뜀"
        );
        return None;
    }

    let parsed = NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT);
    let timestamp_value = match parsed {
        Ok(ts) => ts,
        Err(e) => {
            tracing::error!(timestamp = timestamp, error = %e, "타임스탬프 파싱 실패, 건너뜀");
            return None;
        }
    };

    let open = decimal_field(fields, "1. open");
    let high = decimal_field(fields, "2. high");
    let low = decimal_field(fields, "3. low");
    let close = decimal_field(fields, "4. close");
    let volume = integer_field(fields, "5. volume");

    match (open, high, low, close, volume) {
        (Some(open), Some(high), Some(low), Some(close), Some(volume)) => Some(IntradayRecord {
            timestamp: timestamp_value,
            open,
            high,
            low,
            close,
            volume,
        }),
        _ => {
            tracing::error!(timestamp = timestamp, "값 필드 파싱 실패, 건너뜀");
            None
        }
    }
}

/// 시계열 맵 전체를 변환. 유효한 레코드만 반환합니다.
pub fn transform_series(
    series: &serde_json::Map<String, Value>,
    required_fields: &[String],
) -> Vec<IntradayRecord> {
    series
        .iter()
        .filter_map(|(timestamp, values)| transform_entry(timestamp, values, required_fields))
        .collect()
}

fn decimal_field(fields: &serde_json::Map<String, Value>, key: &str) -> Option<Decimal> {
    fields.get(key)?.as_str()?.parse().ok()
}

fn integer_field(fields: &serde_json::Map<String, Value>, key: &str) -> Option<i64> {
    fields.get(key)?.as_str()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn required_fields() -> Vec<String> {
        ["1. open", "2. high", "3. low", "4. close", "5. volume"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    fn valid_values() -> Value {
        json!({
            "1. open": "210.5000",
            "2. high": "211.0000",
            "3. low": "209.7500",
            "4. close": "210.8000",
            "5. volume": "123456"
        })
    }

    #[test]
    fn test_transform_valid_entry() {
        let record =
            transform_entry("2024-11-01 16:00:00", &valid_values(), &required_fields()).unwrap();

        assert_eq!(
            record.timestamp,
            NaiveDateTime::parse_from_str("2024-11-01 16:00:00", TIMESTAMP_FORMAT).unwrap()
        );
        assert_eq!(record.open, dec!(210.5000));
        assert_eq!(record.high, dec!(211.0000));
        assert_eq!(record.low, dec!(209.7500));
        assert_eq!(record.close, dec!(210.8000));
        assert_eq!(record.volume, 123456);
    }

    #[test]
    fn test_transform_skips_missing_field() {
        let values = json!({
            "1. open": "210.5000",
            "2. high": "211.0000"
        });

        assert!(transform_entry("2024-11-01 16:00:00", &values, &required_fields()).is_none());
    }

    #[test]
    fn test_transform_skips_bad_number() {
        let mut values = valid_values();
        values["4. close"] = json!("not-a-number");

        assert!(transform_entry("2024-11-01 16:00:00", &values, &required_fields()).is_none());
    }

    #[test]
    fn test_transform_skips_bad_timestamp() {
        assert!(transform_entry("yesterday", &valid_values(), &required_fields()).is_none());
    }

    #[test]
    fn test_transform_series_keeps_valid_entries_only() {
        let series = json!({
            "2024-11-01 15:55:00": valid_values(),
            "2024-11-01 16:00:00": {"1. open": "210.0"},
            "2024-11-01 16:05:00": valid_values()
        });

        let records = transform_series(series.as_object().unwrap(), &required_fields());
        assert_eq!(records.len(), 2);
    }
}
