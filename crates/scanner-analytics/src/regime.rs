//! 레짐 정책 (Regime Policy).
//!
//! 외부 심리지수로 시장 레짐을 판정하고, BEAR 레짐에서는 해당 스캔의
//! 최소 점수를 `max(설정값, bear_min_score)`로 올립니다. 상향은 스캔 단위이며
//! 저장되지 않습니다. 지수 조회 실패는 UNKNOWN으로 처리되고 스캔은 계속됩니다.

use scanner_core::{MarketRegime, RegimeReading, SentimentIndexSource};

/// BEAR 레짐 기본 최소 점수.
pub const DEFAULT_BEAR_MIN_SCORE: u32 = 110;

/// 레짐 정책.
#[derive(Debug, Clone, Copy)]
pub struct RegimePolicy {
    bear_min_score: u32,
}

impl Default for RegimePolicy {
    fn default() -> Self {
        Self::new(DEFAULT_BEAR_MIN_SCORE)
    }
}

impl RegimePolicy {
    /// BEAR 레짐 최소 점수를 지정하여 생성합니다.
    pub fn new(bear_min_score: u32) -> Self {
        Self { bear_min_score }
    }

    /// 심리지수 소스에서 레짐을 판정합니다.
    ///
    /// 조회에 실패하면 UNKNOWN을 반환합니다.
    pub async fn assess(&self, source: &dyn SentimentIndexSource) -> RegimeReading {
        match source.fetch_index().await {
            Ok(value) => {
                let reading = RegimeReading::from_index(value);
                tracing::info!(
                    regime = %reading.regime,
                    index = value,
                    "시장 레짐 판정"
                );
                reading
            }
            Err(e) => {
                tracing::warn!(error = %e, "심리지수 조회 실패, 레짐 UNKNOWN으로 진행");
                RegimeReading::unknown()
            }
        }
    }

    /// 레짐을 반영한 실제 최소 점수.
    pub fn effective_threshold(&self, configured: u32, regime: MarketRegime) -> u32 {
        if regime.raises_threshold() {
            configured.max(self.bear_min_score)
        } else {
            configured
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use scanner_core::ProviderError;

    struct FixedIndex(Result<u8, ()>);

    #[async_trait]
    impl SentimentIndexSource for FixedIndex {
        async fn fetch_index(&self) -> Result<u8, ProviderError> {
            self.0
                .map_err(|_| ProviderError::Network("connection refused".to_string()))
        }
    }

    #[test]
    fn test_bear_raises_threshold() {
        let policy = RegimePolicy::default();

        assert_eq!(policy.effective_threshold(95, MarketRegime::Bear), 110);
        assert_eq!(policy.effective_threshold(120, MarketRegime::Bear), 120);
    }

    #[test]
    fn test_other_regimes_keep_threshold() {
        let policy = RegimePolicy::default();

        assert_eq!(policy.effective_threshold(95, MarketRegime::Bull), 95);
        assert_eq!(policy.effective_threshold(95, MarketRegime::Neutral), 95);
        assert_eq!(policy.effective_threshold(95, MarketRegime::Unknown), 95);
    }

    #[tokio::test]
    async fn test_assess_maps_index() {
        let policy = RegimePolicy::default();

        let reading = policy.assess(&FixedIndex(Ok(22))).await;
        assert_eq!(reading.regime, MarketRegime::Bear);
        assert_eq!(reading.index_value, Some(22));
    }

    #[tokio::test]
    async fn test_assess_failure_is_unknown() {
        let policy = RegimePolicy::default();

        let reading = policy.assess(&FixedIndex(Err(()))).await;
        assert_eq!(reading, RegimeReading::unknown());
    }
}
