//! 현재 시장 레짐 조회.

use anyhow::Context;

use scanner_analytics::RegimePolicy;
use scanner_core::{RegimeReading, ScannerConfig};
use scanner_data::FearGreedClient;

/// 공포탐욕지수로 현재 레짐을 판정합니다.
///
/// 지수 조회 실패는 UNKNOWN으로 반환됩니다.
pub async fn check_regime(config: &ScannerConfig) -> anyhow::Result<RegimeReading> {
    let client = FearGreedClient::new(&config.sentiment).context("공포탐욕지수 클라이언트 생성 실패")?;
    let policy = RegimePolicy::new(config.scan.bear_min_score);

    Ok(policy.assess(&client).await)
}
