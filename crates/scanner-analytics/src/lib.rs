//! 스캔 분석 엔진.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - 기술적 지표 (RSI, MACD, 볼린저 밴드)
//! - 요소별 점수 계산 (기술, 펀더멘털, 카탈리스트, 내러티브)
//! - 기회 조립기
//! - 사전/사후 필터
//! - 시장 레짐 정책
//! - 뉴스 기반 카탈리스트 탐지
//! - 스캔 오케스트레이터
//!
//! # Re-exports
//!
//! - [`indicators`]: 지표 엔진 (IndicatorEngine 등)
//! - [`scoring`]: 요소 채점기 (SignalScorer 등)
//! - [`orchestrator`]: 스캔 진입점 (ScanOrchestrator)

pub mod assembler;
pub mod catalyst;
pub mod filters;
pub mod indicators;
pub mod orchestrator;
pub mod regime;
pub mod scoring;

// Indicators 모듈 re-exports
pub use indicators::{
    // 변동성 지표
    BollingerBandsParams,
    BollingerBandsResult,
    EmaParams,
    IndicatorEngine,
    IndicatorError,
    IndicatorResult,
    MacdParams,
    MacdResult,
    MomentumCalculator,
    // 모멘텀 지표
    RsiParams,
    // 추세 지표
    SmaParams,
    TrendIndicators,
    VolatilityIndicators,
    MIN_SERIES_LEN,
};

// Scoring 모듈 re-exports
pub use scoring::{
    score_fundamental, score_technical, ConstantScorer, SectorMomentumScorer,
    SentimentAggregateScorer, SignalScorer,
};

pub use assembler::OpportunityAssembler;
pub use catalyst::CatalystDetector;
pub use filters::{is_stablecoin, FilterOutcome, FilterPipeline, STABLECOINS};
pub use orchestrator::ScanOrchestrator;
pub use regime::{RegimePolicy, DEFAULT_BEAR_MIN_SCORE};
