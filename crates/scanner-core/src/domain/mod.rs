//! 스캐너 도메인 모델.

mod indicators;
mod market_data;
mod market_regime;
mod news;
mod providers;
mod scan;
mod score;

pub use indicators::*;
pub use market_data::*;
pub use market_regime::*;
pub use news::*;
pub use providers::*;
pub use scan::*;
pub use score::*;
