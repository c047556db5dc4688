//! 실행 통계 구조체.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// 변환 작업 통계.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransformStats {
    /// 시계열 엔트리 총 수
    pub total: usize,
    /// 변환된 레코드 수
    pub transformed: usize,
    /// 건너뛴 엔트리 수 (필드 누락/파싱 실패)
    pub skipped: usize,
    /// 소요 시간
    #[serde(skip)]
    pub elapsed: Duration,
}

impl TransformStats {
    /// 새 통계 객체 생성.
    pub fn new() -> Self {
        Self::default()
    }

    /// 변환 성공률 계산 (%).
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.transformed as f64 / self.total as f64) * 100.0
        }
    }

    /// 통계 요약 로그 출력.
    pub fn log_summary(&self, operation: &str) {
        tracing::info!(
            operation = operation,
            total = self.total,
            transformed = self.transformed,
            skipped = self.skipped,
            success_rate = format!("{:.1}%", self.success_rate()),
            elapsed = format!("{:.1}s", self.elapsed.as_secs_f64()),
            "변환 완료"
        );
    }
}
