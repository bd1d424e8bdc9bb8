//! 스캔 요청, 상태, 통계, 결과.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use uuid::Uuid;

use super::{OpportunityBreakdown, RegimeReading};

/// 스캔 요청 파라미터.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanRequest {
    /// 시가총액 상위 몇 개 종목을 가져올지
    pub universe_size: usize,
    /// 설정된 최소 점수
    pub min_score: u32,
    /// 레짐 확인 여부
    pub check_regime: bool,
}

impl ScanRequest {
    /// 새 요청 생성
    pub fn new(universe_size: usize, min_score: u32, check_regime: bool) -> Self {
        Self {
            universe_size,
            min_score,
            check_regime,
        }
    }
}

/// 사전 필터 제외 사유.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExclusionReason {
    /// 스테이블코인
    Stablecoin,
    /// 24시간 변동률 과대
    ExtremeVolatility,
    /// 거래대금/시가총액 비율 부족
    LowLiquidity,
}

impl fmt::Display for ExclusionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Stablecoin => "stablecoin",
            Self::ExtremeVolatility => "extreme_volatility",
            Self::LowLiquidity => "low_liquidity",
        };
        write!(f, "{}", s)
    }
}

/// 스캔 종료 상태.
///
/// "데이터 없음", "후보 없음으로 중단", "정상 완료(결과 0건 포함)"를 구분합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScanStatus {
    /// 모든 단계 완료
    Completed,
    /// 시장 데이터를 가져오지 못함
    NoMarketData,
    /// 사전 필터 후 후보가 없어 중단
    AbortedNoCandidates,
}

impl ScanStatus {
    /// 조기 종료 여부
    pub fn is_aborted(self) -> bool {
        !matches!(self, Self::Completed)
    }
}

impl fmt::Display for ScanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Completed => "COMPLETED",
            Self::NoMarketData => "NO_MARKET_DATA",
            Self::AbortedNoCandidates => "ABORTED_NO_CANDIDATES",
        };
        write!(f, "{}", s)
    }
}

/// 단계별 스캔 통계.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanStats {
    /// 가져온 종목 수
    pub fetched: usize,
    /// 필수 필드 누락으로 건너뛴 종목 수
    pub malformed: usize,
    /// 스테이블코인 제외
    pub excluded_stablecoin: usize,
    /// 변동성 과대 제외
    pub excluded_volatility: usize,
    /// 유동성 부족 제외
    pub excluded_liquidity: usize,
    /// 과매수 경고 (제외하지 않음)
    pub overbought_advisories: usize,
    /// 사전 필터 통과
    pub candidates: usize,
    /// 점수 계산 시도
    pub scored: usize,
    /// 지표를 사용할 수 없었던 종목 수
    pub indicators_unavailable: usize,
    /// 점수 조립 실패
    pub scoring_failures: usize,
    /// RSI 사후 필터 제외
    pub rsi_dropped: usize,
    /// 최종 기준 통과
    pub qualified: usize,
    /// 소요 시간
    #[serde(skip)]
    pub elapsed: Duration,
}

impl ScanStats {
    /// 새 통계 객체 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// 제외 사유별 카운트 증가
    pub fn record_exclusion(&mut self, reason: ExclusionReason) {
        match reason {
            ExclusionReason::Stablecoin => self.excluded_stablecoin += 1,
            ExclusionReason::ExtremeVolatility => self.excluded_volatility += 1,
            ExclusionReason::LowLiquidity => self.excluded_liquidity += 1,
        }
    }

    /// 사전 필터 제외 합계
    pub fn total_excluded(&self) -> usize {
        self.excluded_stablecoin + self.excluded_volatility + self.excluded_liquidity
    }

    /// 통계 요약 로그 출력
    pub fn log_summary(&self, scan_id: Uuid) {
        tracing::info!(
            scan_id = %scan_id,
            fetched = self.fetched,
            malformed = self.malformed,
            excluded = self.total_excluded(),
            overbought_advisories = self.overbought_advisories,
            candidates = self.candidates,
            scored = self.scored,
            indicators_unavailable = self.indicators_unavailable,
            scoring_failures = self.scoring_failures,
            rsi_dropped = self.rsi_dropped,
            qualified = self.qualified,
            elapsed = format!("{:.1}s", self.elapsed.as_secs_f64()),
            "스캔 완료"
        );
    }
}

/// 한 번의 스캔 결과.
///
/// 기준을 통과한 기회들을 총점 내림차순으로 담습니다.
/// 동점은 입력(시가총액) 순서를 유지합니다.
#[derive(Debug, Clone, Serialize)]
pub struct ScanResult {
    /// 스캔 ID
    pub scan_id: Uuid,
    /// 시작 시각
    pub started_at: DateTime<Utc>,
    /// 종료 상태
    pub status: ScanStatus,
    /// 레짐 판정
    pub regime: RegimeReading,
    /// 요청된 최소 점수
    pub configured_min_score: u32,
    /// 레짐 반영 후 실제 적용된 최소 점수
    pub effective_min_score: u32,
    /// 단계별 통계
    pub stats: ScanStats,
    /// 랭킹된 기회 목록
    pub opportunities: Vec<OpportunityBreakdown>,
}

impl ScanResult {
    /// 빈 결과로 시작합니다.
    pub fn new(request: &ScanRequest, regime: RegimeReading, effective_min_score: u32) -> Self {
        Self {
            scan_id: Uuid::new_v4(),
            started_at: Utc::now(),
            status: ScanStatus::Completed,
            regime,
            configured_min_score: request.min_score,
            effective_min_score,
            stats: ScanStats::new(),
            opportunities: Vec::new(),
        }
    }

    /// 결과가 비었는지 여부
    pub fn is_empty(&self) -> bool {
        self.opportunities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_exclusion() {
        let mut stats = ScanStats::new();
        stats.record_exclusion(ExclusionReason::Stablecoin);
        stats.record_exclusion(ExclusionReason::Stablecoin);
        stats.record_exclusion(ExclusionReason::LowLiquidity);

        assert_eq!(stats.excluded_stablecoin, 2);
        assert_eq!(stats.excluded_liquidity, 1);
        assert_eq!(stats.total_excluded(), 3);
    }

    #[test]
    fn test_status_abort_flag() {
        assert!(!ScanStatus::Completed.is_aborted());
        assert!(ScanStatus::NoMarketData.is_aborted());
        assert!(ScanStatus::AbortedNoCandidates.is_aborted());
    }

    #[test]
    fn test_new_result_keeps_thresholds() {
        let request = ScanRequest::new(250, 95, true);
        let result = ScanResult::new(&request, RegimeReading::from_index(20), 110);

        assert_eq!(result.configured_min_score, 95);
        assert_eq!(result.effective_min_score, 110);
        assert_eq!(result.status, ScanStatus::Completed);
        assert!(result.is_empty());
    }
}
