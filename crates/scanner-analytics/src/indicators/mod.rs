//! 기술적 지표 모듈.
//!
//! 가격 시계열로부터 스캐너가 사용하는 기술적 지표를 계산합니다.
//! 모든 계산은 `Decimal`로 수행되며, 계산할 수 없는 지표는 `None`으로 표현합니다.
//!
//! # 지원 지표
//!
//! ## 추세 지표 (Trend Indicators)
//! - **SMA**: 단순 이동평균 (Simple Moving Average)
//! - **EMA**: 지수 이동평균 (Exponential Moving Average)
//! - **MACD**: 이동평균 수렴/확산 (Moving Average Convergence Divergence)
//!
//! ## 모멘텀 지표 (Momentum Indicators)
//! - **RSI**: 상대강도지수 (Relative Strength Index)
//!
//! ## 변동성 지표 (Volatility Indicators)
//! - **Bollinger Bands**: 볼린저 밴드
//!
//! # 사용 예시
//!
//! ```ignore
//! use scanner_analytics::indicators::IndicatorEngine;
//!
//! let engine = IndicatorEngine::new();
//!
//! // 스캔용 지표 스냅샷 (26개 미만이면 None)
//! let indicators = engine.compute(&series);
//! ```

pub mod momentum;
pub mod trend;
pub mod volatility;

use rust_decimal::Decimal;
use scanner_core::{PriceSeries, TechnicalIndicators};
use thiserror::Error;

pub use momentum::{MomentumCalculator, RsiParams};
pub use trend::{EmaParams, MacdParams, MacdResult, SmaParams, TrendIndicators};
pub use volatility::{BollingerBandsParams, BollingerBandsResult, VolatilityIndicators};

/// 지표 스냅샷 계산에 필요한 최소 가격 개수 (MACD 장기 EMA 기간).
pub const MIN_SERIES_LEN: usize = 26;

/// 지표 계산 오류.
#[derive(Debug, Error)]
pub enum IndicatorError {
    /// 데이터 부족 오류
    #[error("데이터가 부족합니다: 필요 {required}개, 제공 {provided}개")]
    InsufficientData { required: usize, provided: usize },

    /// 잘못된 파라미터
    #[error("잘못된 파라미터: {0}")]
    InvalidParameter(String),

    /// 계산 오류
    #[error("계산 오류: {0}")]
    CalculationError(String),
}

/// 지표 계산 결과 타입.
pub type IndicatorResult<T> = Result<T, IndicatorError>;

/// 통합 지표 엔진.
///
/// 모든 기술적 지표 계산을 위한 통합 인터페이스를 제공합니다.
#[derive(Debug, Default)]
pub struct IndicatorEngine {
    trend: TrendIndicators,
    momentum: MomentumCalculator,
    volatility: VolatilityIndicators,
    rsi_params: RsiParams,
    macd_params: MacdParams,
    bollinger_params: BollingerBandsParams,
}

impl IndicatorEngine {
    /// 새로운 지표 엔진 생성.
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== 스냅샷 ====================

    /// 가격 시계열로부터 스캔용 지표 스냅샷을 계산합니다.
    ///
    /// 가격이 [`MIN_SERIES_LEN`]개 미만이면 `None`(지표 없음)을 반환합니다.
    /// 개별 지표 계산이 실패하면 해당 지표만 `None`이 됩니다.
    /// 부작용이 없는 순수 함수입니다.
    pub fn compute(&self, series: &PriceSeries) -> Option<TechnicalIndicators> {
        if series.len() < MIN_SERIES_LEN {
            tracing::debug!(
                provided = series.len(),
                required = MIN_SERIES_LEN,
                "가격 데이터 부족으로 지표 계산 생략"
            );
            return None;
        }

        let prices = series.prices();
        let current_price = *prices.last()?;
        let mut indicators = TechnicalIndicators::empty(current_price);

        match self.rsi(&prices, self.rsi_params) {
            Ok(values) => indicators.rsi = values.last().copied().flatten(),
            Err(e) => tracing::debug!(error = %e, "RSI 계산 실패"),
        }

        match self.macd(&prices, self.macd_params) {
            Ok(values) => {
                if let Some(last) = values.last() {
                    indicators.macd = Some(last.macd);
                    indicators.macd_signal = Some(last.signal);
                    indicators.macd_diff = Some(last.histogram);
                }
            }
            Err(e) => tracing::debug!(error = %e, "MACD 계산 실패"),
        }

        match self.bollinger_bands(&prices, self.bollinger_params) {
            Ok(values) => {
                if let Some(last) = values.last() {
                    indicators.bb_upper = last.upper;
                    indicators.bb_middle = last.middle;
                    indicators.bb_lower = last.lower;
                    indicators.bb_position = last.percent_b;
                }
            }
            Err(e) => tracing::debug!(error = %e, "볼린저 밴드 계산 실패"),
        }

        Some(indicators)
    }

    // ==================== 추세 지표 ====================

    /// 단순 이동평균 (SMA) 계산.
    pub fn sma(&self, prices: &[Decimal], params: SmaParams) -> IndicatorResult<Vec<Option<Decimal>>> {
        self.trend.sma(prices, params)
    }

    /// 지수 이동평균 (EMA) 계산.
    pub fn ema(&self, prices: &[Decimal], params: EmaParams) -> IndicatorResult<Vec<Decimal>> {
        self.trend.ema(prices, params)
    }

    /// MACD (Moving Average Convergence Divergence) 계산.
    pub fn macd(&self, prices: &[Decimal], params: MacdParams) -> IndicatorResult<Vec<MacdResult>> {
        self.trend.macd(prices, params)
    }

    // ==================== 모멘텀 지표 ====================

    /// RSI (Relative Strength Index) 계산.
    pub fn rsi(&self, prices: &[Decimal], params: RsiParams) -> IndicatorResult<Vec<Option<Decimal>>> {
        self.momentum.rsi(prices, params)
    }

    // ==================== 변동성 지표 ====================

    /// 볼린저 밴드 계산.
    pub fn bollinger_bands(
        &self,
        prices: &[Decimal],
        params: BollingerBandsParams,
    ) -> IndicatorResult<Vec<BollingerBandsResult>> {
        self.volatility.bollinger_bands(prices, params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use proptest::prelude::*;
    use rust_decimal_macros::dec;
    use scanner_core::PricePoint;

    fn series(prices: &[Decimal]) -> PriceSeries {
        let start = Utc.timestamp_opt(1_735_689_600, 0).unwrap();
        PriceSeries::new(
            prices
                .iter()
                .enumerate()
                .map(|(i, p)| PricePoint::new(start + Duration::hours(i as i64), *p))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_short_series_is_not_available() {
        let engine = IndicatorEngine::new();
        let prices: Vec<Decimal> = (1..=20).map(Decimal::from).collect();

        assert!(engine.compute(&series(&prices)).is_none());
    }

    #[test]
    fn test_flat_series_has_neutral_band_and_no_rsi() {
        let engine = IndicatorEngine::new();
        let prices = vec![dec!(2.5); 30];

        let indicators = engine.compute(&series(&prices)).unwrap();

        assert_eq!(indicators.rsi, None);
        assert_eq!(indicators.bb_position, Some(dec!(0.5)));
        assert!(indicators.macd_diff.unwrap().abs() < dec!(0.0000001));
        assert_eq!(indicators.current_price, dec!(2.5));
    }

    #[test]
    fn test_minimum_series_computes_every_indicator() {
        let engine = IndicatorEngine::new();
        let prices: Vec<Decimal> = (0..26)
            .map(|i| dec!(100) + Decimal::from(i % 5) - Decimal::from(i % 3))
            .collect();

        let indicators = engine.compute(&series(&prices)).unwrap();

        assert!(indicators.rsi.is_some());
        assert!(indicators.macd.is_some());
        assert!(indicators.macd_signal.is_some());
        assert!(indicators.macd_diff.is_some());
        assert!(indicators.bb_upper.is_some());
        assert!(indicators.bb_middle.is_some());
        assert!(indicators.bb_lower.is_some());
        assert!(indicators.bb_position.is_some());
    }

    #[test]
    fn test_compute_is_pure() {
        let engine = IndicatorEngine::new();
        let prices: Vec<Decimal> = (0..40).map(|i| Decimal::from(100 + (i * 7) % 11)).collect();
        let s = series(&prices);

        assert_eq!(engine.compute(&s), engine.compute(&s));
    }

    proptest! {
        #[test]
        fn prop_bb_position_within_unit_interval(
            raw in proptest::collection::vec(1u32..1_000_000, 26..120)
        ) {
            let engine = IndicatorEngine::new();
            let prices: Vec<Decimal> = raw.iter().map(|v| Decimal::new(i64::from(*v), 2)).collect();

            let indicators = engine.compute(&series(&prices)).unwrap();
            let position = indicators.bb_position.unwrap();

            match (indicators.bb_upper, indicators.bb_lower) {
                (Some(upper), Some(lower)) if upper > lower => {
                    prop_assert!(position >= Decimal::ZERO && position <= Decimal::ONE);
                }
                (Some(upper), Some(lower)) if upper == lower => {
                    prop_assert_eq!(position, dec!(0.5));
                }
                _ => {}
            }

            if let Some(rsi) = indicators.rsi {
                prop_assert!(rsi >= Decimal::ZERO && rsi <= dec!(100));
            }
        }
    }
}
