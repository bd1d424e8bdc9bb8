//! 모멘텀 지표 (Momentum Indicators).
//!
//! 가격 모멘텀과 과매수/과매도 상태를 측정하는 지표를 제공합니다.
//! - RSI (Relative Strength Index, Wilder 평활)

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::{IndicatorError, IndicatorResult};

/// RSI 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RsiParams {
    /// RSI 기간 (기본: 14).
    pub period: usize,
}

impl Default for RsiParams {
    fn default() -> Self {
        Self { period: 14 }
    }
}

/// 모멘텀 지표 계산기.
#[derive(Debug, Default)]
pub struct MomentumCalculator;

impl MomentumCalculator {
    /// 새로운 모멘텀 계산기 생성.
    pub fn new() -> Self {
        Self
    }

    /// RSI (Relative Strength Index) 계산.
    ///
    /// RSI = 100 - (100 / (1 + RS)), RS = 평균 상승폭 / 평균 하락폭
    ///
    /// Wilder 평활: 처음 `period`개 변화량의 단순 평균으로 시작한 뒤
    /// `avg = (prev × (period - 1) + 현재) / period`로 갱신합니다.
    ///
    /// # 반환
    /// 가격과 같은 길이의 벡터. 처음 `period`개는 None.
    /// 평균 상승폭과 하락폭이 모두 0인 구간(가격 변화 없음)도 None입니다.
    pub fn rsi(&self, prices: &[Decimal], params: RsiParams) -> IndicatorResult<Vec<Option<Decimal>>> {
        let period = params.period;

        if period == 0 {
            return Err(IndicatorError::InvalidParameter(
                "기간은 0보다 커야 합니다".to_string(),
            ));
        }

        if prices.len() < period + 1 {
            return Err(IndicatorError::InsufficientData {
                required: period + 1,
                provided: prices.len(),
            });
        }

        // 상승/하락 분리 (deltas[i]는 prices[i+1] - prices[i])
        let (gains, losses): (Vec<Decimal>, Vec<Decimal>) = prices
            .windows(2)
            .map(|w| {
                let delta = w[1] - w[0];
                if delta > Decimal::ZERO {
                    (delta, Decimal::ZERO)
                } else {
                    (Decimal::ZERO, -delta)
                }
            })
            .unzip();

        let period_decimal = Decimal::from(period);
        let prev_weight = Decimal::from(period - 1);

        let mut avg_gain: Decimal = gains[..period].iter().sum::<Decimal>() / period_decimal;
        let mut avg_loss: Decimal = losses[..period].iter().sum::<Decimal>() / period_decimal;

        let mut result = vec![None; period];
        result.push(Self::rsi_value(avg_gain, avg_loss));

        for (gain, loss) in gains.iter().zip(losses.iter()).skip(period) {
            avg_gain = (avg_gain * prev_weight + *gain) / period_decimal;
            avg_loss = (avg_loss * prev_weight + *loss) / period_decimal;
            result.push(Self::rsi_value(avg_gain, avg_loss));
        }

        Ok(result)
    }

    fn rsi_value(avg_gain: Decimal, avg_loss: Decimal) -> Option<Decimal> {
        if avg_loss.is_zero() {
            if avg_gain.is_zero() {
                None
            } else {
                Some(dec!(100))
            }
        } else {
            let rs = avg_gain / avg_loss;
            Some(dec!(100) - (dec!(100) / (Decimal::ONE + rs)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zigzag(len: usize) -> Vec<Decimal> {
        (0..len)
            .map(|i| if i % 2 == 0 { dec!(100) } else { dec!(101) })
            .collect()
    }

    #[test]
    fn test_rsi_warm_up() {
        let momentum = MomentumCalculator::new();
        let rsi = momentum.rsi(&zigzag(20), RsiParams::default()).unwrap();

        assert_eq!(rsi.len(), 20);
        assert!(rsi[13].is_none());
        assert!(rsi[14].is_some());
    }

    #[test]
    fn test_rsi_balanced_moves_is_fifty() {
        let momentum = MomentumCalculator::new();
        // 14개 변화량: +1, -1 각각 7개
        let rsi = momentum.rsi(&zigzag(15), RsiParams::default()).unwrap();

        assert_eq!(rsi[14], Some(dec!(50)));
    }

    #[test]
    fn test_rsi_only_gains_is_hundred() {
        let momentum = MomentumCalculator::new();
        let prices: Vec<Decimal> = (1..=20).map(Decimal::from).collect();

        let rsi = momentum.rsi(&prices, RsiParams::default()).unwrap();
        assert_eq!(rsi[19], Some(dec!(100)));
    }

    #[test]
    fn test_rsi_flat_series_is_not_available() {
        let momentum = MomentumCalculator::new();
        let prices = vec![dec!(1); 30];

        let rsi = momentum.rsi(&prices, RsiParams::default()).unwrap();
        assert!(rsi.iter().all(Option::is_none));
    }

    #[test]
    fn test_rsi_within_bounds() {
        let momentum = MomentumCalculator::new();
        let prices = vec![
            dec!(44.34), dec!(44.09), dec!(44.15), dec!(43.61), dec!(44.33), dec!(44.83),
            dec!(45.10), dec!(45.42), dec!(45.84), dec!(46.08), dec!(45.89), dec!(46.03),
            dec!(45.61), dec!(46.28), dec!(46.28), dec!(46.00), dec!(46.03), dec!(46.41),
        ];

        let rsi = momentum.rsi(&prices, RsiParams::default()).unwrap();
        for value in rsi.iter().flatten() {
            assert!(*value >= Decimal::ZERO && *value <= dec!(100));
        }
        // Wilder 예제: 첫 RSI는 약 70.5
        let first = rsi[14].unwrap();
        assert!(first > dec!(70) && first < dec!(71));
    }

    #[test]
    fn test_rsi_insufficient_data() {
        let momentum = MomentumCalculator::new();
        let result = momentum.rsi(&zigzag(14), RsiParams::default());
        assert!(matches!(
            result,
            Err(IndicatorError::InsufficientData {
                required: 15,
                provided: 14
            })
        ));
    }
}
