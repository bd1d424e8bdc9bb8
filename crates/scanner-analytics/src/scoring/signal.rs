//! 교체 가능한 신호 채점기 (카탈리스트 / 내러티브 슬롯).
//!
//! 조립기는 [`SignalScorer`] trait만 알고 있으므로 구현체를 바꿔도
//! 조립 로직은 변경되지 않습니다. 모든 구현체는 전달받은 요소의
//! 상한(`Factor::max_points`)에 맞춰 점수를 스케일합니다.
//!
//! - [`ConstantScorer`]: 고정 점수
//! - [`SentimentAggregateScorer`]: 종목별 뉴스 투표 집계 기반
//! - [`SectorMomentumScorer`]: 섹터 24시간 성과 + 섹터 대비 상대강도 기반

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal_macros::dec;
use std::collections::HashMap;

use scanner_core::{
    AssetSnapshot, DecimalExt, Factor, ScoringError, ScoringResult, SentimentTally, SubScore,
};

/// 카탈리스트/내러티브 채점 인터페이스.
pub trait SignalScorer: Send + Sync {
    /// 로깅용 채점기 이름.
    fn name(&self) -> &str;

    /// 스냅샷을 `factor` 슬롯의 하위 점수로 채점합니다.
    ///
    /// # Errors
    ///
    /// 점수가 요소 상한을 넘으면 `ScoringError::OutOfBounds`.
    fn score(&self, snapshot: &AssetSnapshot, factor: Factor) -> ScoringResult<SubScore>;
}

/// `max × fraction`을 반올림한 정수 점수.
fn scaled_points(max: u32, fraction: Decimal) -> ScoringResult<u32> {
    (Decimal::from(max) * fraction)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u32()
        .ok_or_else(|| ScoringError::Scorer {
            scorer: "scaled_points".to_string(),
            message: format!("점수 변환 실패: {} × {}", max, fraction),
        })
}

// =============================================================================
// ConstantScorer
// =============================================================================

/// 고정 점수 채점기.
#[derive(Debug, Clone)]
pub struct ConstantScorer {
    name: String,
    points: u32,
    rationale: String,
}

impl ConstantScorer {
    /// 새 고정 채점기 생성.
    pub fn new(name: impl Into<String>, points: u32, rationale: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            points,
            rationale: rationale.into(),
        }
    }

    /// 카탈리스트 슬롯 기본값 (20점).
    pub fn catalyst_placeholder() -> Self {
        Self::new(
            "constant-catalyst",
            20,
            "Catalyst detection requires separate module",
        )
    }

    /// 내러티브 슬롯 기본값 (10점).
    pub fn narrative_placeholder() -> Self {
        Self::new(
            "constant-narrative",
            10,
            "Narrative analysis requires sector data",
        )
    }
}

impl SignalScorer for ConstantScorer {
    fn name(&self) -> &str {
        &self.name
    }

    fn score(&self, _snapshot: &AssetSnapshot, factor: Factor) -> ScoringResult<SubScore> {
        SubScore::new(factor, self.points, vec![self.rationale.clone()])
    }
}

// =============================================================================
// SentimentAggregateScorer
// =============================================================================

/// 뉴스 심리 집계 기반 채점기.
///
/// 뉴스가 없으면 상한의 절반, 있으면 `round(max × (1 + strength) / 2)`.
/// `strength = (긍정 - 부정) / 전체`이므로 점수는 항상 [0, max]입니다.
#[derive(Debug, Clone, Default)]
pub struct SentimentAggregateScorer {
    /// 대문자 심볼 → 집계
    tallies: HashMap<String, SentimentTally>,
    /// 카탈리스트 클러스터로 표기할 최소 긍정 뉴스 수
    min_positive: u32,
}

impl SentimentAggregateScorer {
    /// 심볼별 집계로 채점기를 생성합니다.
    pub fn new(tallies: HashMap<String, SentimentTally>, min_positive: u32) -> Self {
        let tallies = tallies
            .into_iter()
            .map(|(symbol, tally)| (symbol.to_uppercase(), tally))
            .collect();
        Self {
            tallies,
            min_positive,
        }
    }
}

impl SignalScorer for SentimentAggregateScorer {
    fn name(&self) -> &str {
        "news-sentiment"
    }

    fn score(&self, snapshot: &AssetSnapshot, factor: Factor) -> ScoringResult<SubScore> {
        let max = factor.max_points();
        let tally = self
            .tallies
            .get(&snapshot.display_symbol())
            .filter(|t| t.total() > 0);

        let Some(tally) = tally else {
            let points = max / 2;
            return SubScore::new(
                factor,
                points,
                vec![format!("News: no recent coverage (neutral: +{})", points)],
            );
        };

        let strength = tally.strength();
        let points = scaled_points(max, (Decimal::ONE + strength) / dec!(2))?;

        let mut rationale = vec![format!(
            "News: {} positive / {} negative / {} neutral (sentiment {}: +{})",
            tally.positive,
            tally.negative,
            tally.neutral,
            strength.to_signed_fixed(2),
            points
        )];
        if tally.positive >= self.min_positive && tally.positive > tally.negative {
            rationale.push(format!(
                "Catalyst cluster: {} positive headlines",
                tally.positive
            ));
        }

        SubScore::new(factor, points, rationale)
    }
}

// =============================================================================
// SectorMomentumScorer
// =============================================================================

/// 섹터 모멘텀 비중 (나머지는 섹터 대비 상대강도).
const SECTOR_WEIGHT: Decimal = dec!(0.6);
const RELATIVE_WEIGHT: Decimal = dec!(0.4);

/// 섹터 모멘텀 기반 채점기.
///
/// 상한의 60%는 섹터 24시간 변동률 구간에서, 40%는 종목의 섹터 대비
/// 상대강도에서 얻습니다. 섹터를 알 수 없으면 상한의 절반입니다.
#[derive(Debug, Clone, Default)]
pub struct SectorMomentumScorer {
    /// 소문자 심볼 → 섹터 ID
    sectors: HashMap<String, String>,
    /// 섹터 ID → 24시간 변동률 (%)
    sector_changes: HashMap<String, Decimal>,
}

impl SectorMomentumScorer {
    /// 심볼→섹터 매핑과 섹터 성과로 채점기를 생성합니다.
    pub fn new(
        sectors: HashMap<String, String>,
        sector_changes: HashMap<String, Decimal>,
    ) -> Self {
        let sectors = sectors
            .into_iter()
            .map(|(symbol, sector)| (symbol.to_lowercase(), sector))
            .collect();
        Self {
            sectors,
            sector_changes,
        }
    }

    /// 섹터 변동률 구간 비율.
    fn momentum_share(change: Decimal) -> (Decimal, &'static str) {
        if change > dec!(5) {
            (Decimal::ONE, "hot sector")
        } else if change > dec!(2) {
            (dec!(0.8), "strong sector")
        } else if change > Decimal::ZERO {
            (dec!(0.6), "positive sector")
        } else if change > dec!(-3) {
            (dec!(0.4), "soft sector")
        } else {
            (dec!(0.1), "weak sector")
        }
    }

    /// 섹터 대비 상대강도 비율.
    fn relative_share(relative: Decimal) -> (Decimal, &'static str) {
        if relative > Decimal::ZERO {
            (Decimal::ONE, "outperforming")
        } else if relative >= dec!(-2) {
            (dec!(0.5), "in line")
        } else {
            (Decimal::ZERO, "lagging")
        }
    }
}

impl SignalScorer for SectorMomentumScorer {
    fn name(&self) -> &str {
        "sector-momentum"
    }

    fn score(&self, snapshot: &AssetSnapshot, factor: Factor) -> ScoringResult<SubScore> {
        let max = factor.max_points();
        let neutral = max / 2;

        let Some(sector) = self.sectors.get(&snapshot.symbol.to_lowercase()) else {
            return SubScore::new(
                factor,
                neutral,
                vec![format!("Sector: unmapped (neutral: +{})", neutral)],
            );
        };

        let Some(change) = self.sector_changes.get(sector).copied() else {
            return SubScore::new(
                factor,
                neutral,
                vec![format!(
                    "Sector {}: no performance data (neutral: +{})",
                    sector, neutral
                )],
            );
        };

        let (momentum, momentum_label) = Self::momentum_share(change);
        let momentum_points = scaled_points(max, SECTOR_WEIGHT * momentum)?;

        let relative = snapshot.change_24h_pct - change;
        let (strength, strength_label) = Self::relative_share(relative);
        let relative_points = scaled_points(max, RELATIVE_WEIGHT * strength)?;

        let points = (momentum_points + relative_points).min(max);

        SubScore::new(
            factor,
            points,
            vec![
                format!(
                    "Sector {}: {}% 24h ({}: +{})",
                    sector,
                    change.to_signed_fixed(1),
                    momentum_label,
                    momentum_points
                ),
                format!(
                    "vs sector: {}pt ({}: +{})",
                    relative.to_signed_fixed(1),
                    strength_label,
                    relative_points
                ),
            ],
        )
    }
}
