//! 추세 지표 (Trend Indicators).
//!
//! 이동평균 기반의 추세 지표들을 제공합니다.
//! - SMA (Simple Moving Average)
//! - EMA (Exponential Moving Average)
//! - MACD (Moving Average Convergence Divergence)

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::{IndicatorError, IndicatorResult};

/// SMA 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SmaParams {
    /// 이동평균 기간.
    pub period: usize,
}

impl Default for SmaParams {
    fn default() -> Self {
        Self { period: 20 }
    }
}

/// EMA 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EmaParams {
    /// 이동평균 기간.
    pub period: usize,
}

impl Default for EmaParams {
    fn default() -> Self {
        Self { period: 12 }
    }
}

/// MACD 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MacdParams {
    /// 단기 EMA 기간 (기본: 12).
    pub fast_period: usize,
    /// 장기 EMA 기간 (기본: 26).
    pub slow_period: usize,
    /// 시그널 라인 기간 (기본: 9).
    pub signal_period: usize,
}

impl Default for MacdParams {
    fn default() -> Self {
        Self {
            fast_period: 12,
            slow_period: 26,
            signal_period: 9,
        }
    }
}

/// MACD 결과.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacdResult {
    /// MACD 라인 (단기 EMA - 장기 EMA).
    pub macd: Decimal,
    /// 시그널 라인 (MACD의 EMA).
    pub signal: Decimal,
    /// 히스토그램 (MACD - 시그널).
    pub histogram: Decimal,
}

/// 추세 지표 계산기.
#[derive(Debug, Default)]
pub struct TrendIndicators;

impl TrendIndicators {
    /// 새로운 추세 지표 계산기 생성.
    pub fn new() -> Self {
        Self
    }

    /// 단순 이동평균 (SMA) 계산.
    ///
    /// SMA = (P1 + P2 + ... + Pn) / n
    ///
    /// # 반환
    /// 각 시점의 SMA 값 (처음 period-1개는 None)
    pub fn sma(
        &self,
        prices: &[Decimal],
        params: SmaParams,
    ) -> IndicatorResult<Vec<Option<Decimal>>> {
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
                result.push(None);
            } else {
                let sum: Decimal = prices[i + 1 - period..=i].iter().sum();
                result.push(Some(sum / period_decimal));
            }
        }

        Ok(result)
    }

    /// 지수 이동평균 (EMA) 계산.
    ///
    /// EMA = (현재가 × k) + (이전 EMA × (1 - k)), k = 2 / (period + 1)
    ///
    /// 첫 값으로 시작하여 전체 구간에 대해 재귀적으로 계산하므로
    /// 입력과 같은 길이의 벡터를 반환합니다. 최소 `period`개의 데이터가 필요합니다.
    pub fn ema(&self, prices: &[Decimal], params: EmaParams) -> IndicatorResult<Vec<Decimal>> {
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

        let multiplier = dec!(2) / Decimal::from(period + 1);
        let mut result = Vec::with_capacity(prices.len());

        let mut prev_ema = prices[0];
        result.push(prev_ema);
        for price in prices.iter().skip(1) {
            let ema = (*price * multiplier) + (prev_ema * (Decimal::ONE - multiplier));
            result.push(ema);
            prev_ema = ema;
        }

        Ok(result)
    }

    /// MACD 계산.
    ///
    /// MACD 라인 = 단기 EMA - 장기 EMA
    /// 시그널 라인 = MACD 라인의 EMA
    /// 히스토그램 = MACD 라인 - 시그널 라인
    ///
    /// 모든 EMA는 전체 구간에 대해 계산되며, 장기 기간 이상의 데이터가 필요합니다.
    pub fn macd(&self, prices: &[Decimal], params: MacdParams) -> IndicatorResult<Vec<MacdResult>> {
        if params.fast_period >= params.slow_period {
            return Err(IndicatorError::InvalidParameter(format!(
                "단기 기간({})은 장기 기간({})보다 작아야 합니다",
                params.fast_period, params.slow_period
            )));
        }

        if prices.len() < params.slow_period {
            return Err(IndicatorError::InsufficientData {
                required: params.slow_period,
                provided: prices.len(),
            });
        }

        let fast_ema = self.ema(
            prices,
            EmaParams {
                period: params.fast_period,
            },
        )?;
        let slow_ema = self.ema(
            prices,
            EmaParams {
                period: params.slow_period,
            },
        )?;

        let macd_line: Vec<Decimal> = fast_ema
            .iter()
            .zip(slow_ema.iter())
            .map(|(fast, slow)| *fast - *slow)
            .collect();

        let signal_line = self.ema(
            &macd_line,
            EmaParams {
                period: params.signal_period,
            },
        )?;

        Ok(macd_line
            .into_iter()
            .zip(signal_line)
            .map(|(macd, signal)| MacdResult {
                macd,
                signal,
                histogram: macd - signal,
            })
            .collect())
    }
}
