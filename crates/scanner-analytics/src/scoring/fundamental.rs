//! 펀더멘털 점수 (0~40).
//!
//! 시장 스냅샷만으로 계산합니다.
//!
//! | 항목 | 상한 | 구간 → 점수 |
//! |---|---|---|
//! | 24h 변동률 | 15 | >20→3, (10,20]→10, (5,10]→15, (0,5]→12, [-5,0]→8, <-5→5 |
//! | 거래대금/시총 | 10 | >0.5→10, >0.2→8, >0.1→6, 그 외→3 |
//! | 시총 순위 | 10 | ≤50→7, ≤100→10, ≤250→8, 그 외(누락 포함)→5 |
//! | 7d 변동률 절대값 | 5 | >50→1, >25→3, 그 외→5 |

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use scanner_core::{AssetSnapshot, DecimalExt, Factor, ScoringResult, SubScore};

/// 순위 누락 시 사용하는 순위.
pub const MISSING_RANK: u32 = 999;

/// 펀더멘털 점수를 계산합니다.
pub fn score_fundamental(snapshot: &AssetSnapshot) -> ScoringResult<SubScore> {
    let bands = [
        momentum_band(snapshot.change_24h_pct),
        volume_band(snapshot.volume_to_market_cap()),
        rank_band(snapshot.market_cap_rank),
        volatility_band(snapshot.change_7d_pct),
    ];

    let points = bands.iter().map(|(p, _)| p).sum();
    let rationale = bands.into_iter().map(|(_, r)| r).collect();

    SubScore::new(Factor::Fundamental, points, rationale)
}

/// 24시간 변동률 구간 (최대 15점). +5%~+10%에서 최고점.
pub fn momentum_band(change_24h: Decimal) -> (u32, String) {
    let (points, label) = if change_24h > dec!(20) {
        (3, "too hot")
    } else if change_24h > dec!(10) {
        (10, "strong")
    } else if change_24h > dec!(5) {
        (15, "optimal")
    } else if change_24h > Decimal::ZERO {
        (12, "weak positive")
    } else if change_24h >= dec!(-5) {
        (8, "slight decline")
    } else {
        (5, "declining")
    };

    let value = if change_24h > Decimal::ZERO {
        change_24h.to_signed_fixed(1)
    } else {
        change_24h.to_fixed(1)
    };

    (points, format!("24h: {}% ({}: +{})", value, label, points))
}

/// 거래대금/시가총액 비율 구간 (최대 10점).
pub fn volume_band(ratio: Decimal) -> (u32, String) {
    let (points, label) = if ratio > dec!(0.5) {
        (10, "very high")
    } else if ratio > dec!(0.2) {
        (8, "high")
    } else if ratio > dec!(0.1) {
        (6, "good")
    } else {
        (3, "low")
    };

    (
        points,
        format!("Vol/MCap: {} ({}: +{})", ratio.to_fixed(2), label, points),
    )
}

/// 시가총액 순위 구간 (최대 10점). 51~100위 중형주가 최고점.
pub fn rank_band(rank: Option<u32>) -> (u32, String) {
    let effective = rank.unwrap_or(MISSING_RANK);

    let (points, label) = if effective <= 50 {
        (7, "large cap")
    } else if effective <= 100 {
        (10, "mid cap")
    } else if effective <= 250 {
        (8, "small cap")
    } else {
        (5, "micro cap")
    };

    let shown = match rank {
        Some(r) => format!("#{}", r),
        None => "N/A".to_string(),
    };

    (points, format!("Rank: {} ({}: +{})", shown, label, points))
}

/// 7일 변동률 절대값 기반 변동성 구간 (최대 5점).
pub fn volatility_band(change_7d: Decimal) -> (u32, String) {
    let magnitude = change_7d.abs();

    let (points, label) = if magnitude > dec!(50) {
        (1, "very volatile")
    } else if magnitude > dec!(25) {
        (3, "volatile")
    } else {
        (5, "stable")
    };

    (
        points,
        format!("7d: {}% ({}: +{})", change_7d.to_signed_fixed(1), label, points),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn snapshot(change_24h: Decimal, change_7d: Decimal, rank: Option<u32>) -> AssetSnapshot {
        AssetSnapshot {
            id: "render-token".to_string(),
            symbol: "render".to_string(),
            name: "Render".to_string(),
            current_price: dec!(11.2),
            change_24h_pct: change_24h,
            change_7d_pct: change_7d,
            total_volume: dec!(150_000_000),
            market_cap: dec!(1_000_000_000),
            market_cap_rank: rank,
        }
    }

    #[test]
    fn test_momentum_bands() {
        assert_eq!(momentum_band(dec!(20.1)).0, 3);
        assert_eq!(momentum_band(dec!(20)).0, 10);
        assert_eq!(momentum_band(dec!(10)).0, 15);
        assert_eq!(momentum_band(dec!(5)).0, 12);
        assert_eq!(momentum_band(Decimal::ZERO).0, 8);
        assert_eq!(momentum_band(dec!(-5)).0, 8);
        assert_eq!(momentum_band(dec!(-5.1)).0, 5);
        assert_eq!(momentum_band(dec!(6.04)).1, "24h: +6.0% (optimal: +15)");
        assert_eq!(momentum_band(dec!(-7.25)).1, "24h: -7.3% (declining: +5)");
    }

    #[test]
    fn test_volume_bands() {
        assert_eq!(volume_band(dec!(0.51)).0, 10);
        assert_eq!(volume_band(dec!(0.5)).0, 8);
        assert_eq!(volume_band(dec!(0.2)).0, 6);
        assert_eq!(volume_band(dec!(0.1)).0, 3);
    }

    #[test]
    fn test_rank_bands_prefer_mid_caps() {
        assert_eq!(rank_band(Some(1)).0, 7);
        assert_eq!(rank_band(Some(51)).0, 10);
        assert_eq!(rank_band(Some(100)).0, 10);
        assert_eq!(rank_band(Some(250)).0, 8);
        assert_eq!(rank_band(Some(251)).0, 5);
        assert_eq!(rank_band(None), (5, "Rank: N/A (micro cap: +5)".to_string()));
    }

    #[test]
    fn test_volatility_bands() {
        assert_eq!(volatility_band(dec!(-51)).0, 1);
        assert_eq!(volatility_band(dec!(30)).0, 3);
        assert_eq!(volatility_band(dec!(25)).0, 5);
        assert_eq!(volatility_band(dec!(-3.2)).1, "7d: -3.2% (stable: +5)");
    }

    #[test]
    fn test_fundamental_sum() {
        // 24h +7 (15) + vol 0.15 (6) + rank 80 (10) + 7d 12 (5)
        let score = score_fundamental(&snapshot(dec!(7), dec!(12), Some(80))).unwrap();
        assert_eq!(score.points(), 36);
        assert_eq!(score.rationale().len(), 4);
    }

    proptest! {
        #[test]
        fn prop_fundamental_within_bounds(
            change_24h in -10_000i64..10_000,
            change_7d in -20_000i64..20_000,
            rank in proptest::option::of(1u32..20_000),
        ) {
            let snap = snapshot(Decimal::new(change_24h, 2), Decimal::new(change_7d, 2), rank);
            let score = score_fundamental(&snap).unwrap();
            prop_assert!(score.points() <= Factor::Fundamental.max_points());
        }
    }
}
