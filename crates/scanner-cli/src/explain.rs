//! 비전문가용 설명 문구.
//!
//! RSI, 총점, 시장 레짐을 일상적인 비유로 풀어 쓴 문장을 만듭니다.
//! 구간 경계는 채점 구간과 같습니다 (RSI 20/30/40/60/70/80, 총점 130/110/95/80).

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use scanner_core::{DecimalExt, MarketRegime, RegimeReading, MAX_TOTAL_SCORE};

/// RSI 값 설명.
pub fn explain_rsi(rsi: Decimal) -> String {
    let analogy = if rsi < dec!(20) {
        "Think of this like a store having a massive clearance sale. The price has dropped so \
         much that it might be a bargain, but there could be a reason everyone's selling. \
         Proceed with caution."
    } else if rsi < dec!(30) {
        "This is like finding a quality item on sale. The price has come down enough that it \
         could be a good entry point."
    } else if rsi < dec!(40) {
        "This is the sweet spot, like buying during a seasonal sale. Not too cheap (suspicious) \
         and not too expensive."
    } else if rsi < dec!(60) {
        "Fair price territory. Like buying at regular retail price. Nothing special, but nothing \
         wrong either."
    } else if rsi < dec!(70) {
        "Getting a bit pricey. Like buying something that's trending and the price is starting \
         to go up."
    } else if rsi < dec!(80) {
        "Overpriced territory. Like buying a hot item at a premium. Most of the easy gains are \
         probably gone."
    } else {
        "Extremely overpriced. Like buying concert tickets from a scalper. The smart money has \
         already taken profits."
    };

    format!("RSI is {} - {}", rsi.to_fixed(0), analogy)
}

/// 총점 설명.
pub fn explain_score(total: u32) -> String {
    let (grade, analogy) = match total {
        130.. => (
            "EXCELLENT",
            "This is like finding a diamond in the rough. Multiple indicators are all pointing \
             in the same direction.",
        ),
        110..=129 => (
            "VERY GOOD",
            "Like a restaurant with 4.5 stars. Strong opportunity with minor concerns.",
        ),
        95..=109 => (
            "GOOD",
            "Like a solid 4-star review. Worth considering but do your own research too.",
        ),
        80..=94 => (
            "AVERAGE",
            "Like a 3-star hotel. It'll do the job but nothing to write home about.",
        ),
        _ => (
            "BELOW AVERAGE",
            "Like a 2-star review. Probably best to look elsewhere.",
        ),
    };

    format!("Score: {}/{} - {}. {}", total, MAX_TOTAL_SCORE, grade, analogy)
}

/// 레짐별 비유 문단.
pub fn regime_analogy(regime: MarketRegime) -> &'static str {
    match regime {
        MarketRegime::Bear => {
            "Think of this like winter for the market. People are scared and selling. Like a \
             housing market crash - prices are falling and everyone's nervous. Be extra careful \
             and only buy the absolute best opportunities."
        }
        MarketRegime::Neutral => {
            "Think of this like autumn/spring for the market. Neither hot nor cold. Like a stable \
             housing market - normal activity, normal prices. Good time for selective buying."
        }
        MarketRegime::Bull => {
            "Think of this like summer for the market. Everyone's excited and buying. Like a \
             booming housing market - prices going up, lots of activity. Good time to trade but \
             don't get greedy."
        }
        MarketRegime::Unknown => {
            "The market mood reading is unavailable right now, like a weather forecast that \
             didn't come in. Thresholds stay at their usual level, so judge each opportunity on \
             its own merits."
        }
    }
}

/// 레짐 설명 (헤드라인 + 비유 문단).
pub fn explain_regime(reading: &RegimeReading) -> String {
    let index = reading
        .index_value
        .map(|value| value.to_string())
        .unwrap_or_else(|| "N/A".to_string());

    format!(
        "Market Regime: {} (Fear & Greed: {})\n{}",
        reading.regime,
        index,
        regime_analogy(reading.regime)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rsi_band_edges() {
        assert!(explain_rsi(dec!(19.99)).contains("clearance sale"));
        assert!(explain_rsi(dec!(20)).contains("quality item on sale"));
        assert!(explain_rsi(dec!(29.99)).contains("quality item on sale"));
        assert!(explain_rsi(dec!(30)).contains("sweet spot"));
        assert!(explain_rsi(dec!(40)).contains("Fair price territory"));
        assert!(explain_rsi(dec!(59.99)).contains("Fair price territory"));
        assert!(explain_rsi(dec!(60)).contains("Getting a bit pricey"));
        assert!(explain_rsi(dec!(70)).contains("Overpriced territory"));
        assert!(explain_rsi(dec!(80)).contains("Extremely overpriced"));
    }

    #[test]
    fn test_rsi_value_is_rounded() {
        assert!(explain_rsi(dec!(35.27)).starts_with("RSI is 35 - This is the sweet spot"));
        assert!(explain_rsi(dec!(79.6)).starts_with("RSI is 80 - Overpriced territory"));
    }

    #[test]
    fn test_score_tier_edges() {
        assert!(explain_score(160).contains("EXCELLENT"));
        assert!(explain_score(130).contains("EXCELLENT"));
        assert!(explain_score(129).contains("VERY GOOD"));
        assert!(explain_score(110).contains("VERY GOOD"));
        assert!(explain_score(109).contains("- GOOD."));
        assert!(explain_score(95).contains("- GOOD."));
        assert!(explain_score(94).contains("- AVERAGE."));
        assert!(explain_score(80).contains("- AVERAGE."));
        assert!(explain_score(79).contains("BELOW AVERAGE"));
        assert!(explain_score(0).starts_with("Score: 0/160 - BELOW AVERAGE."));
    }

    #[test]
    fn test_regime_explanations() {
        let bear = explain_regime(&RegimeReading::from_index(20));
        assert!(bear.starts_with("Market Regime: BEAR (Fear & Greed: 20)\n"));
        assert!(bear.contains("winter for the market"));

        let neutral = explain_regime(&RegimeReading::from_index(52));
        assert!(neutral.starts_with("Market Regime: NEUTRAL (Fear & Greed: 52)\n"));
        assert!(neutral.contains("autumn/spring"));

        let bull = explain_regime(&RegimeReading::from_index(65));
        assert!(bull.contains("summer for the market"));

        let unknown = explain_regime(&RegimeReading::unknown());
        assert!(unknown.starts_with("Market Regime: UNKNOWN (Fear & Greed: N/A)\n"));
    }
}
