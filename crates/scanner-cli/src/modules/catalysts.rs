//! 뉴스 기반 카탈리스트 탐지.

use anyhow::Context;

use scanner_analytics::CatalystDetector;
use scanner_core::{Catalyst, ScannerConfig};
use scanner_data::CryptoPanicClient;

/// 뉴스 게시물을 가져와 카탈리스트 목록을 반환합니다.
pub async fn detect_catalysts(config: &ScannerConfig) -> anyhow::Result<Vec<Catalyst>> {
    let client = CryptoPanicClient::new(config.news.clone()).context("뉴스 클라이언트 생성 실패")?;
    if !client.is_configured() {
        anyhow::bail!(
            "뉴스 API 토큰이 없습니다. SCANNER__NEWS__API_KEY 환경변수를 설정하세요"
        );
    }

    let detector = CatalystDetector::new(config.news.min_positive);
    let catalysts = detector
        .detect(&client)
        .await
        .context("뉴스 게시물 조회 실패")?;

    Ok(catalysts)
}
