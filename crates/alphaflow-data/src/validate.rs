//! 응답 페이로드 2단계 검증.
//!
//! 1단계는 제공자가 페이로드에 심어 보내는 에러 신호 필드를 탐지하고,
//! 2단계는 필수 필드의 구조적 존재를 확인합니다.
//!
//! 순서가 중요합니다. 요청 한도에 걸리거나 거부된 응답은 기대하는 데이터
//! 형태를 갖추지 못하므로, 구조 검증을 먼저 하면 진짜 원인 대신 "필드 누락"
//! 이라는 잘못된 진단이 나옵니다.

use serde_json::Value;

use crate::error::{ApiSignalKind, DataError, Result, StructuralReason};

/// 탐지할 에러 신호 필드. 배열 순서대로 검사합니다.
const API_SIGNAL_FIELDS: [(&str, ApiSignalKind); 3] = [
    ("Note", ApiSignalKind::RateLimit),
    ("Error Message", ApiSignalKind::ErrorMessage),
    ("error", ApiSignalKind::Generic),
];

/// 1단계: API 에러 신호 탐지.
///
/// 신호 필드 중 하나라도 존재하면 해당 실행의 종료 조건입니다.
/// 페이로드를 변경하지 않으므로 반복 호출해도 결과가 같습니다.
pub fn check_api_signals(payload: &Value) -> Result<()> {
    for (field, kind) in API_SIGNAL_FIELDS {
        if let Some(value) = payload.get(field) {
            let message = signal_message(value);
            tracing::error!(field = field, kind = %kind, message = %message, "API 에러 신호 탐지");
            return Err(DataError::ApiSignal { kind, message });
        }
    }
    Ok(())
}

/// 2단계: 필수 필드 구조 검증.
///
/// 각 필드에 대해 키 존재, null 여부, 빈 컨테이너 여부를 확인합니다.
/// 첫 번째로 실패한 필드에서 중단하고 필드명과 사유를 보고합니다.
pub fn check_required_fields(payload: &Value, required_fields: &[String]) -> Result<()> {
    for field in required_fields {
        let reason = match payload.get(field.as_str()) {
            None => Some(StructuralReason::Missing),
            Some(Value::Null) => Some(StructuralReason::Null),
            Some(Value::Object(map)) if map.is_empty() => Some(StructuralReason::Empty),
            Some(Value::Array(items)) if items.is_empty() => Some(StructuralReason::Empty),
            Some(_) => None,
        };

        if let Some(reason) = reason {
            tracing::error!(field = %field, reason = %reason, "필수 필드 검증 실패");
            return Err(DataError::Structural {
                field: field.clone(),
                reason,
            });
        }
    }
    Ok(())
}

/// 신호 필드 값을 로그/에러용 메시지로 변환.
fn signal_message(value: &Value) -> String {
    match value.as_str() {
        Some(s) => s.to_string(),
        None => value.to_string(),
    }
}
