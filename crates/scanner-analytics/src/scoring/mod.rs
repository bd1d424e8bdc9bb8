//! 요소별 점수 계산.
//!
//! - [`technical`]: 기술적 점수 (0~60)
//! - [`fundamental`]: 펀더멘털 점수 (0~40)
//! - [`signal`]: 카탈리스트 (0~40) / 내러티브 (0~20) 슬롯용 교체 가능 채점기

pub mod fundamental;
pub mod signal;
pub mod technical;

pub use fundamental::score_fundamental;
pub use signal::{ConstantScorer, SectorMomentumScorer, SentimentAggregateScorer, SignalScorer};
pub use technical::score_technical;
