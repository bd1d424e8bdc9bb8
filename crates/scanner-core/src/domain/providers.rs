//! 외부 데이터 소스 추상화.
//!
//! 스캔 파이프라인은 시세 목록, 가격 이력, 심리지수, 뉴스, 섹터 성과를
//! 아래 trait를 통해서만 조회합니다. 페이지네이션, 요청 간격, HTTP 타임아웃은
//! 구현체의 책임입니다. 가격 이력의 요청 간격 대기는 [`PriceHistorySource::pace`]로
//! 분리되어 있어 호출자가 요청 타임아웃과 별도로 기다릴 수 있습니다.

use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::HashMap;
use thiserror::Error;

use super::{MarketListing, NewsPost, PriceSeries};

// =============================================================================
// 에러 타입
// =============================================================================

/// 데이터 소스 에러.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// 네트워크 에러
    #[error("네트워크 에러: {0}")]
    Network(String),

    /// 요청 시간 초과
    #[error("시간 초과: {0}")]
    Timeout(String),

    /// API 에러 (HTTP 상태 코드 등)
    #[error("API 에러: {0}")]
    Api(String),

    /// 파싱 에러
    #[error("파싱 에러: {0}")]
    Parse(String),

    /// 필요한 설정(API 키 등)이 없음
    #[error("설정되지 않음: {0}")]
    NotConfigured(String),
}

// =============================================================================
// Source Traits
// =============================================================================

/// 시가총액 순 시장 목록 소스.
#[async_trait]
pub trait MarketSnapshotSource: Send + Sync {
    /// 시가총액 상위 `universe_size`개 종목을 시가총액 순으로 조회합니다.
    ///
    /// 일부 페이지 실패는 구현체가 흡수할 수 있으며, 결과는
    /// `universe_size`개보다 적을 수 있습니다.
    ///
    /// # Errors
    ///
    /// - `ProviderError::Network`: 네트워크 연결 실패
    /// - `ProviderError::Api`: API 에러 응답
    async fn fetch_markets(&self, universe_size: usize)
        -> Result<Vec<MarketListing>, ProviderError>;
}

/// 가격 이력 소스.
#[async_trait]
pub trait PriceHistorySource: Send + Sync {
    /// 다음 요청이 허용될 때까지 대기합니다.
    ///
    /// 요청 간격 제한이 있는 구현체는 여기서 제한기를 거치고,
    /// [`fetch_price_history`](Self::fetch_price_history)는 요청만 수행합니다.
    /// 호출자는 요청마다 먼저 `pace`를 기다려야 합니다.
    async fn pace(&self) {}

    /// 최근 `days`일간의 가격 시계열을 조회합니다.
    ///
    /// 요청 간격 대기는 포함하지 않습니다.
    ///
    /// # Errors
    ///
    /// - `ProviderError::Timeout`: 요청 시간 초과
    /// - `ProviderError::Api`: API 에러 응답 (rate limit 포함)
    async fn fetch_price_history(
        &self,
        asset_id: &str,
        days: u32,
    ) -> Result<PriceSeries, ProviderError>;
}

/// 시장 심리지수 소스 (0~100).
#[async_trait]
pub trait SentimentIndexSource: Send + Sync {
    /// 최신 심리지수 값을 조회합니다.
    async fn fetch_index(&self) -> Result<u8, ProviderError>;
}

/// 뉴스 게시물 소스.
#[async_trait]
pub trait NewsSource: Send + Sync {
    /// 최근 게시물을 조회합니다.
    ///
    /// # Errors
    ///
    /// - `ProviderError::NotConfigured`: API 키 없음
    async fn fetch_posts(&self) -> Result<Vec<NewsPost>, ProviderError>;
}

/// 섹터(카테고리) 성과 소스.
#[async_trait]
pub trait SectorPerformanceSource: Send + Sync {
    /// 섹터 ID → 24시간 변동률(%) 맵을 조회합니다.
    async fn fetch_sector_changes(&self) -> Result<HashMap<String, Decimal>, ProviderError>;
}
