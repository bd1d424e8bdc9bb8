//! 기술적 점수 (0~60).
//!
//! RSI, MACD 히스토그램, 볼린저 밴드 위치를 각각 0~20점 구간으로 매핑하여 합산합니다.
//!
//! | 신호 | 구간 → 점수 |
//! |---|---|
//! | RSI | <20→5, [20,30)→18, [30,40)→20, [40,60)→15, [60,70)→10, [70,80)→3, ≥80→0 |
//! | MACD diff | >5→20, (2,5]→17, (0,2]→14, [-2,0]→11, [-5,-2)→8, <-5→5 |
//! | BB 위치 | <0.2→18, [0.2,0.4)→20, [0.4,0.6)→15, [0.6,0.8)→10, [0.8,1.0]→5, >1→3 |
//!
//! 지표가 없으면 각 신호는 10점(중립)입니다. 과매도 극단(RSI < 20)이
//! 일반 과매도보다 낮은 점수를 받는 것은 의도된 정책입니다.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use scanner_core::{DecimalExt, Factor, ScoringResult, SubScore, TechnicalIndicators};

/// 지표 전체가 없을 때의 중립 점수.
pub const NO_DATA_POINTS: u32 = 30;

/// 개별 신호가 없을 때의 중립 점수.
pub const NOT_AVAILABLE_POINTS: u32 = 10;

/// 기술적 점수를 계산합니다.
pub fn score_technical(indicators: Option<&TechnicalIndicators>) -> ScoringResult<SubScore> {
    let Some(indicators) = indicators else {
        return SubScore::new(
            Factor::Technical,
            NO_DATA_POINTS,
            vec!["No technical data available".to_string()],
        );
    };

    let bands = [
        rsi_band(indicators.rsi),
        macd_band(indicators.macd_diff),
        bb_band(indicators.bb_position),
    ];

    let points = bands.iter().map(|(p, _)| p).sum();
    let rationale = bands.into_iter().map(|(_, r)| r).collect();

    SubScore::new(Factor::Technical, points, rationale)
}

/// RSI 구간 점수와 근거.
pub fn rsi_band(rsi: Option<Decimal>) -> (u32, String) {
    let Some(rsi) = rsi else {
        return (NOT_AVAILABLE_POINTS, "RSI: N/A (neutral: +10)".to_string());
    };

    let (points, label) = if rsi < dec!(20) {
        (5, "extremely oversold")
    } else if rsi < dec!(30) {
        (18, "oversold, good entry")
    } else if rsi < dec!(40) {
        (20, "optimal buy zone")
    } else if rsi < dec!(60) {
        (15, "neutral")
    } else if rsi < dec!(70) {
        (10, "getting overbought")
    } else if rsi < dec!(80) {
        (3, "overbought - SKIP")
    } else {
        (0, "extremely overbought - AVOID")
    };

    (
        points,
        format!("RSI: {} ({}: +{})", rsi.to_fixed(1), label, points),
    )
}

/// MACD 히스토그램 구간 점수와 근거.
///
/// 정확히 -2는 약한 약세(11점) 구간에 속합니다.
pub fn macd_band(macd_diff: Option<Decimal>) -> (u32, String) {
    let Some(diff) = macd_diff else {
        return (NOT_AVAILABLE_POINTS, "MACD: N/A (neutral: +10)".to_string());
    };

    let (points, label) = if diff > dec!(5) {
        (20, "strong bullish")
    } else if diff > dec!(2) {
        (17, "bullish")
    } else if diff > Decimal::ZERO {
        (14, "weak bullish")
    } else if diff >= dec!(-2) {
        (11, "weak bearish")
    } else if diff >= dec!(-5) {
        (8, "bearish")
    } else {
        (5, "strong bearish")
    };

    let value = if diff > Decimal::ZERO {
        diff.to_signed_fixed(2)
    } else {
        diff.to_fixed(2)
    };

    (points, format!("MACD: {} ({}: +{})", value, label, points))
}

/// 볼린저 밴드 위치 구간 점수와 근거.
///
/// 하단 밴드 아래(음수)는 하단 근접 구간(18점)으로 취급합니다.
pub fn bb_band(bb_position: Option<Decimal>) -> (u32, String) {
    let Some(position) = bb_position else {
        return (NOT_AVAILABLE_POINTS, "BB: N/A (neutral: +10)".to_string());
    };

    let (points, label) = if position < dec!(0.2) {
        (18, "near lower band, good entry")
    } else if position < dec!(0.4) {
        (20, "optimal buy zone")
    } else if position < dec!(0.6) {
        (15, "middle zone")
    } else if position < dec!(0.8) {
        (10, "upper zone")
    } else if position <= Decimal::ONE {
        (5, "near upper band, overbought")
    } else {
        (3, "outside bands")
    };

    (
        points,
        format!("BB: {} ({}: +{})", position.to_fixed(2), label, points),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn indicators(
        rsi: Option<Decimal>,
        macd_diff: Option<Decimal>,
        bb_position: Option<Decimal>,
    ) -> TechnicalIndicators {
        TechnicalIndicators {
            rsi,
            macd_diff,
            bb_position,
            ..TechnicalIndicators::empty(dec!(1))
        }
    }

    #[test]
    fn test_missing_indicators_is_neutral_thirty() {
        let score = score_technical(None).unwrap();
        assert_eq!(score.points(), 30);
        assert_eq!(score.rationale_text(), "No technical data available");
    }

    #[test]
    fn test_all_signals_not_available() {
        let score = score_technical(Some(&indicators(None, None, None))).unwrap();
        assert_eq!(score.points(), 30);
        assert_eq!(
            score.rationale_text(),
            "RSI: N/A (neutral: +10) | MACD: N/A (neutral: +10) | BB: N/A (neutral: +10)"
        );
    }

    #[test]
    fn test_rsi_bands_reward_moderate_oversold_over_extreme() {
        assert_eq!(rsi_band(Some(dec!(19.9))).0, 5);
        assert_eq!(rsi_band(Some(dec!(20))).0, 18);
        assert_eq!(rsi_band(Some(dec!(30))).0, 20);
        assert_eq!(rsi_band(Some(dec!(40))).0, 15);
        assert_eq!(rsi_band(Some(dec!(60))).0, 10);
        assert_eq!(rsi_band(Some(dec!(70))).0, 3);
        assert_eq!(rsi_band(Some(dec!(80))).0, 0);
        assert_eq!(
            rsi_band(Some(dec!(35.26))).1,
            "RSI: 35.3 (optimal buy zone: +20)"
        );
    }

    #[test]
    fn test_macd_bands() {
        assert_eq!(macd_band(Some(dec!(5.01))).0, 20);
        assert_eq!(macd_band(Some(dec!(5))).0, 17);
        assert_eq!(macd_band(Some(dec!(2))).0, 14);
        assert_eq!(macd_band(Some(dec!(0.01))).0, 14);
        assert_eq!(macd_band(Some(Decimal::ZERO)).0, 11);
        assert_eq!(macd_band(Some(dec!(-2))).0, 11);
        assert_eq!(macd_band(Some(dec!(-2.01))).0, 8);
        assert_eq!(macd_band(Some(dec!(-5))).0, 8);
        assert_eq!(macd_band(Some(dec!(-5.01))).0, 5);
        assert_eq!(macd_band(Some(dec!(3.456))).1, "MACD: +3.46 (bullish: +17)");
        assert_eq!(
            macd_band(Some(dec!(-6))).1,
            "MACD: -6.00 (strong bearish: +5)"
        );
    }

    #[test]
    fn test_bb_bands() {
        assert_eq!(bb_band(Some(dec!(0.19))).0, 18);
        assert_eq!(bb_band(Some(dec!(0.2))).0, 20);
        assert_eq!(bb_band(Some(dec!(0.4))).0, 15);
        assert_eq!(bb_band(Some(dec!(0.6))).0, 10);
        assert_eq!(bb_band(Some(dec!(0.8))).0, 5);
        assert_eq!(bb_band(Some(Decimal::ONE)).0, 5);
        assert_eq!(bb_band(Some(dec!(1.01))).0, 3);
        assert_eq!(bb_band(Some(dec!(-0.01))).0, 18);
        assert_eq!(bb_band(Some(dec!(0.5))).1, "BB: 0.50 (middle zone: +15)");
    }

    #[test]
    fn test_best_case_is_sixty() {
        let score = score_technical(Some(&indicators(
            Some(dec!(35)),
            Some(dec!(6)),
            Some(dec!(0.3)),
        )))
        .unwrap();
        assert_eq!(score.points(), 60);
        assert_eq!(score.rationale().len(), 3);
    }

    fn optional_decimal(range: std::ops::Range<i64>) -> impl Strategy<Value = Option<Decimal>> {
        proptest::option::of(range.prop_map(|v| Decimal::new(v, 2)))
    }

    proptest! {
        #[test]
        fn prop_technical_within_bounds(
            rsi in optional_decimal(0..10_000),
            macd in optional_decimal(-100_000..100_000),
            bb in optional_decimal(-200..300),
            missing in any::<bool>(),
        ) {
            let input = indicators(rsi, macd, bb);
            let score = if missing {
                score_technical(None)
            } else {
                score_technical(Some(&input))
            }
            .unwrap();

            prop_assert!(score.points() <= Factor::Technical.max_points());
        }
    }
}
