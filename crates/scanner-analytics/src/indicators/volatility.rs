//! 변동성 지표 (Volatility Indicators).
//!
//! - Bollinger Bands (모집단 표준편차 기준)

use rust_decimal::prelude::MathematicalOps;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::{IndicatorError, IndicatorResult};

/// 볼린저 밴드 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BollingerBandsParams {
    /// 이동평균 기간 (기본: 20).
    pub period: usize,
    /// 표준편차 배수 (기본: 2.0).
    pub std_dev_multiplier: Decimal,
}

impl Default for BollingerBandsParams {
    fn default() -> Self {
        Self {
            period: 20,
            std_dev_multiplier: dec!(2.0),
        }
    }
}

/// 볼린저 밴드 결과.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BollingerBandsResult {
    /// 상단 밴드.
    pub upper: Option<Decimal>,
    /// 중간 밴드 (SMA).
    pub middle: Option<Decimal>,
    /// 하단 밴드.
    pub lower: Option<Decimal>,
    /// %B: 밴드 내 가격 위치, [0, 1]로 제한. 밴드 폭이 0이면 0.5.
    pub percent_b: Option<Decimal>,
}

/// 변동성 지표 계산기.
#[derive(Debug, Default)]
pub struct VolatilityIndicators;

impl VolatilityIndicators {
    /// 새로운 변동성 지표 계산기 생성.
    pub fn new() -> Self {
        Self
    }

    /// 볼린저 밴드 계산.
    ///
    /// 중간 = SMA(period), 상단/하단 = 중간 ± (배수 × 모집단 표준편차)
    ///
    /// # 반환
    /// 각 시점의 밴드 값 (처음 period-1개는 모두 None)
    pub fn bollinger_bands(
        &self,
        prices: &[Decimal],
        params: BollingerBandsParams,
    ) -> IndicatorResult<Vec<BollingerBandsResult>> {
        let period = params.period;

        if period == 0 {
            return Err(IndicatorError::InvalidParameter(
                "기간은 0보다 커야 합니다".to_string(),
            ));
        }

        if prices.len() < period {
            return Err(IndicatorError::InsufficientData {
                required: period,
                provided: prices.len(),
            });
        }

        let mut result = Vec::with_capacity(prices.len());
        let period_decimal = Decimal::from(period);

        for i in 0..prices.len() {
            if i < period - 1 {
                result.push(BollingerBandsResult::default());
                continue;
            }

            let window = &prices[i + 1 - period..=i];

            // 이동평균 (중간 밴드)
            let sum: Decimal = window.iter().sum();
            let ma = sum / period_decimal;

            // 모집단 분산
            let variance: Decimal = window
                .iter()
                .map(|&p| {
                    let diff = p - ma;
                    diff * diff
                })
                .sum::<Decimal>()
                / period_decimal;

            // 제곱근 계산 실패 시 밴드는 계산 불가로 남긴다
            let Some(std_dev) = variance.sqrt() else {
                result.push(BollingerBandsResult {
                    middle: Some(ma),
                    ..Default::default()
                });
                continue;
            };

            let deviation = params.std_dev_multiplier * std_dev;
            let upper = ma + deviation;
            let lower = ma - deviation;

            result.push(BollingerBandsResult {
                upper: Some(upper),
                middle: Some(ma),
                lower: Some(lower),
                percent_b: Some(Self::percent_b(prices[i], upper, lower)),
            });
        }

        Ok(result)
    }

    /// 밴드 내 가격 위치 (0 = 하단, 1 = 상단).
    fn percent_b(price: Decimal, upper: Decimal, lower: Decimal) -> Decimal {
        let width = upper - lower;
        if width <= Decimal::ZERO {
            // 밴드가 수렴하면 중립값
            return dec!(0.5);
        }

        ((price - lower) / width).clamp(Decimal::ZERO, Decimal::ONE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bollinger_population_std() {
        let volatility = VolatilityIndicators::new();
        // 평균 5, 모집단 분산 4, 표준편차 2
        let prices = vec![
            dec!(2), dec!(4), dec!(4), dec!(4), dec!(5), dec!(5), dec!(7), dec!(9),
        ];

        let bands = volatility
            .bollinger_bands(
                &prices,
                BollingerBandsParams {
                    period: 8,
                    std_dev_multiplier: dec!(2),
                },
            )
            .unwrap();

        let close = |a: Option<Decimal>, b: Decimal| (a.unwrap() - b).abs() < dec!(0.000001);

        let last = bands[7];
        assert_eq!(last.middle, Some(dec!(5)));
        assert!(close(last.upper, dec!(9)));
        assert!(close(last.lower, dec!(1)));
        assert!(close(last.percent_b, Decimal::ONE));
        assert_eq!(bands[6], BollingerBandsResult::default());
    }

    #[test]
    fn test_flat_prices_give_neutral_position() {
        let volatility = VolatilityIndicators::new();
        let prices = vec![dec!(3.5); 20];

        let bands = volatility
            .bollinger_bands(&prices, BollingerBandsParams::default())
            .unwrap();

        let last = bands[19];
        assert_eq!(last.upper, last.lower);
        assert_eq!(last.percent_b, Some(dec!(0.5)));
    }

    #[test]
    fn test_percent_b_is_clamped() {
        assert_eq!(
            VolatilityIndicators::percent_b(dec!(20), dec!(12), dec!(8)),
            Decimal::ONE
        );
        assert_eq!(
            VolatilityIndicators::percent_b(dec!(1), dec!(12), dec!(8)),
            Decimal::ZERO
        );
        assert_eq!(
            VolatilityIndicators::percent_b(dec!(9), dec!(12), dec!(8)),
            dec!(0.25)
        );
    }
}
