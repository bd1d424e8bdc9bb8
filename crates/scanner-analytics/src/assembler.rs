//! 기회 조립기 (Opportunity Assembler).
//!
//! 네 요소 채점기를 호출하여 종목 하나의 [`OpportunityBreakdown`]을 만듭니다.
//! 어느 채점기든 실패하면 해당 종목의 조립 전체가 실패하며,
//! 나머지 종목 스캔을 계속하는 것은 호출자의 책임입니다.

use std::sync::Arc;

use scanner_core::{
    AssetSnapshot, Factor, OpportunityBreakdown, ScoringResult, TechnicalIndicators,
};

use crate::scoring::{score_fundamental, score_technical, ConstantScorer, SignalScorer};

/// 기회 조립기.
#[derive(Clone)]
pub struct OpportunityAssembler {
    catalyst: Arc<dyn SignalScorer>,
    narrative: Arc<dyn SignalScorer>,
}

impl Default for OpportunityAssembler {
    fn default() -> Self {
        Self::new(
            Arc::new(ConstantScorer::catalyst_placeholder()),
            Arc::new(ConstantScorer::narrative_placeholder()),
        )
    }
}

impl std::fmt::Debug for OpportunityAssembler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpportunityAssembler")
            .field("catalyst", &self.catalyst.name())
            .field("narrative", &self.narrative.name())
            .finish()
    }
}

impl OpportunityAssembler {
    /// 카탈리스트/내러티브 채점기를 지정하여 생성합니다.
    pub fn new(catalyst: Arc<dyn SignalScorer>, narrative: Arc<dyn SignalScorer>) -> Self {
        Self {
            catalyst,
            narrative,
        }
    }

    /// 네 요소 점수를 계산하고 합산합니다.
    ///
    /// 같은 입력에 대해 항상 같은 결과를 반환합니다.
    pub fn assemble(
        &self,
        snapshot: &AssetSnapshot,
        indicators: Option<TechnicalIndicators>,
    ) -> ScoringResult<OpportunityBreakdown> {
        let technical = score_technical(indicators.as_ref())?;
        let fundamental = score_fundamental(snapshot)?;
        let catalyst = self.catalyst.score(snapshot, Factor::Catalyst)?;
        let narrative = self.narrative.score(snapshot, Factor::Narrative)?;

        OpportunityBreakdown::new(
            snapshot,
            technical,
            fundamental,
            catalyst,
            narrative,
            indicators,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use scanner_core::{ScoringError, SubScore};

    fn snapshot() -> AssetSnapshot {
        AssetSnapshot {
            id: "injective-protocol".to_string(),
            symbol: "inj".to_string(),
            name: "Injective".to_string(),
            current_price: dec!(38.1),
            change_24h_pct: dec!(7.5),
            change_7d_pct: dec!(14),
            total_volume: dec!(300_000_000),
            market_cap: dec!(1_000_000_000),
            market_cap_rank: Some(62),
        }
    }

    fn indicators() -> TechnicalIndicators {
        TechnicalIndicators {
            rsi: Some(dec!(34)),
            macd: Some(dec!(1.2)),
            macd_signal: Some(dec!(0.4)),
            macd_diff: Some(dec!(0.8)),
            bb_upper: Some(dec!(42)),
            bb_middle: Some(dec!(38)),
            bb_lower: Some(dec!(34)),
            bb_position: Some(dec!(0.51)),
            current_price: dec!(38.1),
        }
    }

    /// 잘못된 요소를 반환하는 채점기.
    struct WrongFactorScorer;

    impl SignalScorer for WrongFactorScorer {
        fn name(&self) -> &str {
            "wrong-factor"
        }

        fn score(&self, _snapshot: &AssetSnapshot, _factor: Factor) -> ScoringResult<SubScore> {
            SubScore::new(Factor::Technical, 5, vec![])
        }
    }

    #[test]
    fn test_assemble_default_placeholders() {
        let assembler = OpportunityAssembler::default();
        let breakdown = assembler.assemble(&snapshot(), Some(indicators())).unwrap();

        // 기술: 20 + 14 + 15 = 49
        assert_eq!(breakdown.technical().points(), 49);
        // 펀더멘털: 15 + 8 + 10 + 5 = 38
        assert_eq!(breakdown.fundamental().points(), 38);
        assert_eq!(breakdown.catalyst().points(), 20);
        assert_eq!(breakdown.narrative().points(), 10);
        assert_eq!(breakdown.total_score(), 117);
        assert_eq!(breakdown.symbol, "INJ");
        assert_eq!(breakdown.rsi(), Some(dec!(34)));
    }

    #[test]
    fn test_assemble_without_indicators() {
        let assembler = OpportunityAssembler::default();
        let breakdown = assembler.assemble(&snapshot(), None).unwrap();

        assert_eq!(breakdown.technical().points(), 30);
        assert!(breakdown.technical_indicators().is_none());
        assert_eq!(breakdown.total_score(), 30 + 38 + 20 + 10);
    }

    #[test]
    fn test_assemble_is_idempotent() {
        let assembler = OpportunityAssembler::default();

        let first = assembler.assemble(&snapshot(), Some(indicators())).unwrap();
        let second = assembler.assemble(&snapshot(), Some(indicators())).unwrap();

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_scorer_failure_fails_assembly() {
        let assembler = OpportunityAssembler::new(
            Arc::new(WrongFactorScorer),
            Arc::new(ConstantScorer::narrative_placeholder()),
        );

        let err = assembler.assemble(&snapshot(), None).unwrap_err();
        assert!(matches!(err, ScoringError::FactorMismatch { .. }));
    }

    #[test]
    fn test_total_equals_sum() {
        let assembler = OpportunityAssembler::default();
        let breakdown = assembler.assemble(&snapshot(), Some(indicators())).unwrap();

        let sum: u32 = breakdown.sub_scores().iter().map(|s| s.points()).sum();
        assert_eq!(breakdown.total_score(), sum);
    }
}
