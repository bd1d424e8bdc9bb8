//! 점수 요소, 하위 점수, 기회 분석 레코드.
//!
//! 하위 점수의 상한은 생성 시점에 검증되며, 총점은 항상
//! 네 하위 점수의 합으로만 계산됩니다.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use super::{AssetSnapshot, TechnicalIndicators};
use crate::types::{Percentage, Price};

/// 최대 총점 (60 + 40 + 40 + 20).
pub const MAX_TOTAL_SCORE: u32 = 160;

/// 점수 계산 에러.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ScoringError {
    /// 요소 상한 초과
    #[error("{factor} 점수 상한 초과: {points} > {max}")]
    OutOfBounds {
        factor: Factor,
        points: u32,
        max: u32,
    },

    /// 잘못된 요소 슬롯에 할당된 점수
    #[error("점수 요소 불일치: {expected} 슬롯에 {actual} 점수")]
    FactorMismatch { expected: Factor, actual: Factor },

    /// 채점기 내부 실패
    #[error("채점기 에러 ({scorer}): {message}")]
    Scorer { scorer: String, message: String },
}

/// 점수 계산 Result 타입.
pub type ScoringResult<T> = Result<T, ScoringError>;

/// 점수 요소.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Factor {
    /// 기술적 지표 (0~60)
    Technical,
    /// 펀더멘털 (0~40)
    Fundamental,
    /// 카탈리스트 (0~40)
    Catalyst,
    /// 내러티브 (0~20)
    Narrative,
}

impl Factor {
    /// 모든 요소 (총점 합산 순서)
    pub const ALL: [Factor; 4] = [
        Factor::Technical,
        Factor::Fundamental,
        Factor::Catalyst,
        Factor::Narrative,
    ];

    /// 요소별 최대 점수
    pub fn max_points(self) -> u32 {
        match self {
            Self::Technical => 60,
            Self::Fundamental => 40,
            Self::Catalyst => 40,
            Self::Narrative => 20,
        }
    }

    /// 리포트 표기명
    pub fn label(self) -> &'static str {
        match self {
            Self::Technical => "Technical",
            Self::Fundamental => "Fundamental",
            Self::Catalyst => "Catalyst",
            Self::Narrative => "Narrative",
        }
    }
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// 한 요소의 하위 점수와 발동된 규칙별 근거.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubScore {
    factor: Factor,
    points: u32,
    rationale: Vec<String>,
}

impl SubScore {
    /// 하위 점수를 생성합니다.
    ///
    /// # 에러
    ///
    /// `points`가 요소 상한을 넘으면 `ScoringError::OutOfBounds`.
    pub fn new(factor: Factor, points: u32, rationale: Vec<String>) -> ScoringResult<Self> {
        let max = factor.max_points();
        if points > max {
            return Err(ScoringError::OutOfBounds {
                factor,
                points,
                max,
            });
        }

        Ok(Self {
            factor,
            points,
            rationale,
        })
    }

    /// 요소
    pub fn factor(&self) -> Factor {
        self.factor
    }

    /// 점수
    pub fn points(&self) -> u32 {
        self.points
    }

    /// 규칙별 근거 목록
    pub fn rationale(&self) -> &[String] {
        &self.rationale
    }

    /// 근거를 한 줄로 연결합니다 (`" | "` 구분).
    pub fn rationale_text(&self) -> String {
        self.rationale.join(" | ")
    }
}

/// 한 종목의 점수 분석 결과.
///
/// 생성 후 변경되지 않으며 랭킹, 필터, 리포트에서 소비됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpportunityBreakdown {
    /// 종목 ID
    pub asset_id: String,
    /// 종목명
    pub coin_name: String,
    /// 대문자 심볼
    pub symbol: String,
    /// 현재가
    pub price: Price,
    /// 시가총액 순위
    pub market_cap_rank: Option<u32>,
    /// 24시간 변동률
    pub change_24h: Percentage,
    /// 7일 변동률
    pub change_7d: Percentage,
    technical: SubScore,
    fundamental: SubScore,
    catalyst: SubScore,
    narrative: SubScore,
    technical_indicators: Option<TechnicalIndicators>,
    total_score: u32,
}

impl OpportunityBreakdown {
    /// 스냅샷과 네 하위 점수로 분석 결과를 생성합니다.
    ///
    /// # 에러
    ///
    /// 하위 점수가 다른 요소 슬롯에 전달되면 `ScoringError::FactorMismatch`.
    pub fn new(
        snapshot: &AssetSnapshot,
        technical: SubScore,
        fundamental: SubScore,
        catalyst: SubScore,
        narrative: SubScore,
        technical_indicators: Option<TechnicalIndicators>,
    ) -> ScoringResult<Self> {
        for (expected, score) in Factor::ALL
            .iter()
            .zip([&technical, &fundamental, &catalyst, &narrative])
        {
            if score.factor() != *expected {
                return Err(ScoringError::FactorMismatch {
                    expected: *expected,
                    actual: score.factor(),
                });
            }
        }

        let total_score =
            technical.points() + fundamental.points() + catalyst.points() + narrative.points();

        Ok(Self {
            asset_id: snapshot.id.clone(),
            coin_name: snapshot.name.clone(),
            symbol: snapshot.display_symbol(),
            price: snapshot.current_price,
            market_cap_rank: snapshot.market_cap_rank,
            change_24h: snapshot.change_24h_pct,
            change_7d: snapshot.change_7d_pct,
            technical,
            fundamental,
            catalyst,
            narrative,
            technical_indicators,
            total_score,
        })
    }

    /// 기술적 점수
    pub fn technical(&self) -> &SubScore {
        &self.technical
    }

    /// 펀더멘털 점수
    pub fn fundamental(&self) -> &SubScore {
        &self.fundamental
    }

    /// 카탈리스트 점수
    pub fn catalyst(&self) -> &SubScore {
        &self.catalyst
    }

    /// 내러티브 점수
    pub fn narrative(&self) -> &SubScore {
        &self.narrative
    }

    /// 요소별 하위 점수 (합산 순서)
    pub fn sub_scores(&self) -> [&SubScore; 4] {
        [
            &self.technical,
            &self.fundamental,
            &self.catalyst,
            &self.narrative,
        ]
    }

    /// 계산된 지표 (조회 실패 시 None)
    pub fn technical_indicators(&self) -> Option<&TechnicalIndicators> {
        self.technical_indicators.as_ref()
    }

    /// RSI (지표가 없거나 계산 불가 시 None)
    pub fn rsi(&self) -> Option<Decimal> {
        self.technical_indicators.as_ref().and_then(|i| i.rsi)
    }

    /// 총점 (네 하위 점수의 합)
    pub fn total_score(&self) -> u32 {
        self.total_score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn snapshot() -> AssetSnapshot {
        AssetSnapshot {
            id: "chainlink".to_string(),
            symbol: "link".to_string(),
            name: "Chainlink".to_string(),
            current_price: dec!(28.4),
            change_24h_pct: dec!(3.1),
            change_7d_pct: dec!(-4.2),
            total_volume: dec!(900_000_000),
            market_cap: dec!(17_000_000_000),
            market_cap_rank: Some(14),
        }
    }

    fn score(factor: Factor, points: u32) -> SubScore {
        SubScore::new(factor, points, vec![format!("{} rule", factor)]).unwrap()
    }

    #[test]
    fn test_sub_score_rejects_out_of_bounds() {
        assert!(SubScore::new(Factor::Technical, 60, vec![]).is_ok());
        assert_eq!(
            SubScore::new(Factor::Narrative, 21, vec![]).unwrap_err(),
            ScoringError::OutOfBounds {
                factor: Factor::Narrative,
                points: 21,
                max: 20,
            }
        );
    }

    #[test]
    fn test_rationale_text_joins_rules() {
        let sub = SubScore::new(
            Factor::Fundamental,
            22,
            vec!["24h: +6.0% (optimal: +15)".to_string(), "Rank #14 (large cap: +7)".to_string()],
        )
        .unwrap();
        assert_eq!(
            sub.rationale_text(),
            "24h: +6.0% (optimal: +15) | Rank #14 (large cap: +7)"
        );
    }

    #[test]
    fn test_breakdown_copies_identity() {
        let breakdown = OpportunityBreakdown::new(
            &snapshot(),
            score(Factor::Technical, 45),
            score(Factor::Fundamental, 30),
            score(Factor::Catalyst, 20),
            score(Factor::Narrative, 10),
            None,
        )
        .unwrap();

        assert_eq!(breakdown.symbol, "LINK");
        assert_eq!(breakdown.coin_name, "Chainlink");
        assert_eq!(breakdown.market_cap_rank, Some(14));
        assert_eq!(breakdown.total_score(), 105);
        assert_eq!(breakdown.rsi(), None);
    }

    #[test]
    fn test_breakdown_rejects_swapped_slots() {
        let err = OpportunityBreakdown::new(
            &snapshot(),
            score(Factor::Technical, 45),
            score(Factor::Catalyst, 20),
            score(Factor::Fundamental, 30),
            score(Factor::Narrative, 10),
            None,
        )
        .unwrap_err();

        assert_eq!(
            err,
            ScoringError::FactorMismatch {
                expected: Factor::Fundamental,
                actual: Factor::Catalyst,
            }
        );
    }

    proptest! {
        #[test]
        fn prop_total_is_sum_of_sub_scores(
            t in 0u32..=60, f in 0u32..=40, c in 0u32..=40, n in 0u32..=20,
        ) {
            let breakdown = OpportunityBreakdown::new(
                &snapshot(),
                score(Factor::Technical, t),
                score(Factor::Fundamental, f),
                score(Factor::Catalyst, c),
                score(Factor::Narrative, n),
                None,
            ).unwrap();

            let sum: u32 = breakdown.sub_scores().iter().map(|s| s.points()).sum();
            prop_assert_eq!(breakdown.total_score(), sum);
            prop_assert!(breakdown.total_score() <= MAX_TOTAL_SCORE);
        }
    }
}
