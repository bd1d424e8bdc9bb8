//! 외부 데이터 소스 Provider.
//!
//! - [`coingecko`]: 시장 목록, 가격 이력, 카테고리 성과
//! - [`fear_greed`]: 공포탐욕지수
//! - [`cryptopanic`]: 뉴스 게시물

pub mod coingecko;
pub mod cryptopanic;
pub mod fear_greed;

pub use coingecko::CoinGeckoClient;
pub use cryptopanic::CryptoPanicClient;
pub use fear_greed::FearGreedClient;

use std::time::Duration;

use crate::error::{DataError, Result};

const USER_AGENT: &str = concat!("opportunity-scanner/", env!("CARGO_PKG_VERSION"));

/// 고정 타임아웃을 가진 HTTP 클라이언트 생성.
pub(crate) fn http_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| DataError::Network(format!("HTTP 클라이언트 생성 실패: {}", e)))
}

/// 성공 응답이 아니면 상태 코드와 본문으로 오류를 만듭니다.
pub(crate) async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(DataError::Api {
        status: status.as_u16(),
        message: body.chars().take(200).collect(),
    })
}
