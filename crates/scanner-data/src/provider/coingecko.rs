//! CoinGecko REST API 클라이언트.
//!
//! # 지원 데이터
//!
//! - 시가총액 순 시장 목록 (`/coins/markets`, 페이지당 최대 250개)
//! - 가격 이력 (`/coins/{id}/market_chart`)
//! - 카테고리별 24시간 시가총액 변동률 (`/coins/categories`)
//!
//! 무료 API는 분당 요청 수가 제한되므로 시장 목록/카테고리 요청은 페이지 제한기,
//! 가격 이력 요청은 이력 제한기를 거칩니다. [`PriceHistorySource`]로 사용할 때는
//! 이력 제한기 대기가 `pace`로 분리됩니다. 제한기는 외부에서 주입할 수 있어
//! 여러 클라이언트가 같은 간격을 공유할 수 있습니다.
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use scanner_data::CoinGeckoClient;
//! use scanner_core::CoinGeckoSettings;
//!
//! let client = CoinGeckoClient::new(CoinGeckoSettings::default())?;
//! let listings = client.fetch_markets(250).await?;
//! ```

use async_trait::async_trait;
use chrono::DateTime;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;

use scanner_core::{
    CoinGeckoSettings, MarketListing, MarketSnapshotSource, PriceHistorySource, PricePoint,
    PriceSeries, ProviderError, RateLimiter, SectorPerformanceSource,
};

use super::{ensure_success, http_client};
use crate::error::{DataError, Result};

/// CoinGecko API 클라이언트.
#[derive(Clone)]
pub struct CoinGeckoClient {
    client: reqwest::Client,
    history_client: reqwest::Client,
    settings: CoinGeckoSettings,
    page_limiter: Arc<RateLimiter>,
    history_limiter: Arc<RateLimiter>,
}

/// `/coins/{id}/market_chart` 응답.
#[derive(Debug, Deserialize)]
struct MarketChart {
    /// [밀리초 타임스탬프, 가격] 쌍
    prices: Vec<(f64, Decimal)>,
}

/// `/coins/categories` 응답의 한 행.
#[derive(Debug, Deserialize)]
struct CategoryRow {
    id: String,
    #[serde(default)]
    market_cap_change_24h: Option<Decimal>,
}

impl CoinGeckoClient {
    /// 설정의 타임아웃과 요청 간격으로 클라이언트를 생성합니다.
    pub fn new(settings: CoinGeckoSettings) -> Result<Self> {
        let page_limiter = Arc::new(RateLimiter::new("coingecko-pages", settings.page_interval()));
        let history_limiter = Arc::new(RateLimiter::new(
            "coingecko-history",
            settings.history_interval(),
        ));
        Self::with_limiters(settings, page_limiter, history_limiter)
    }

    /// 외부 제한기를 주입하여 클라이언트를 생성합니다.
    pub fn with_limiters(
        settings: CoinGeckoSettings,
        page_limiter: Arc<RateLimiter>,
        history_limiter: Arc<RateLimiter>,
    ) -> Result<Self> {
        Ok(Self {
            client: http_client(settings.page_timeout())?,
            history_client: http_client(settings.history_timeout())?,
            settings,
            page_limiter,
            history_limiter,
        })
    }

    /// 설정
    pub fn settings(&self) -> &CoinGeckoSettings {
        &self.settings
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.settings.base_url.trim_end_matches('/'), path)
    }

    /// 시장 목록 한 페이지 조회 (1부터 시작).
    pub async fn fetch_market_page(&self, page: usize, per_page: usize) -> Result<Vec<MarketListing>> {
        self.page_limiter.acquire().await;

        let per_page = per_page.to_string();
        let page = page.to_string();
        let params = [
            ("vs_currency", self.settings.vs_currency.as_str()),
            ("order", "market_cap_desc"),
            ("per_page", per_page.as_str()),
            ("page", page.as_str()),
            ("sparkline", "false"),
            ("price_change_percentage", "24h,7d"),
        ];

        tracing::debug!(page = %page, per_page = %per_page, "CoinGecko 시장 목록 요청");

        let response = self
            .client
            .get(self.url("/coins/markets"))
            .query(&params)
            .header("Accept", "application/json")
            .send()
            .await?;
        let response = ensure_success(response).await?;

        Ok(response.json().await?)
    }

    /// 시가총액 상위 `universe_size`개 종목 조회.
    ///
    /// 실패한 페이지는 경고 후 건너뜁니다. 모든 페이지가 실패하면 마지막 오류를 반환합니다.
    pub async fn fetch_top_markets(&self, universe_size: usize) -> Result<Vec<MarketListing>> {
        let per_page = self.settings.per_page.clamp(1, 250);
        let pages = universe_size.div_ceil(per_page);

        let mut listings = Vec::with_capacity(universe_size);
        let mut last_error = None;

        for page in 1..=pages {
            match self.fetch_market_page(page, per_page).await {
                Ok(rows) => {
                    let short_page = rows.len() < per_page;
                    tracing::debug!(page, count = rows.len(), "시장 목록 페이지 수신");
                    listings.extend(rows);
                    if short_page {
                        break;
                    }
                }
                Err(e) => {
                    tracing::warn!(page, error = %e, "시장 목록 페이지 조회 실패, 건너뜀");
                    last_error = Some(e);
                }
            }
        }

        if listings.is_empty() {
            if let Some(e) = last_error {
                return Err(e);
            }
        }

        listings.truncate(universe_size);
        tracing::info!(count = listings.len(), pages, "CoinGecko 시장 목록 조회 완료");
        Ok(listings)
    }

    /// 종목 가격 이력 조회 (이력 제한기 대기 포함).
    pub async fn fetch_history(&self, asset_id: &str, days: u32) -> Result<PriceSeries> {
        self.history_limiter.acquire().await;
        self.request_history(asset_id, days).await
    }

    /// 제한기 대기 없이 가격 이력을 요청합니다.
    async fn request_history(&self, asset_id: &str, days: u32) -> Result<PriceSeries> {
        let days = days.to_string();
        let params = [
            ("vs_currency", self.settings.vs_currency.as_str()),
            ("days", days.as_str()),
        ];

        tracing::debug!(asset = asset_id, days = %days, "CoinGecko 가격 이력 요청");

        let response = self
            .history_client
            .get(self.url(&format!("/coins/{}/market_chart", asset_id)))
            .query(&params)
            .header("Accept", "application/json")
            .send()
            .await?;
        let response = ensure_success(response).await?;

        let chart: MarketChart = response.json().await?;
        parse_chart(chart)
    }

    /// 카테고리 ID → 24시간 시가총액 변동률 (%).
    pub async fn fetch_categories(&self) -> Result<HashMap<String, Decimal>> {
        self.page_limiter.acquire().await;

        let response = self
            .client
            .get(self.url("/coins/categories"))
            .header("Accept", "application/json")
            .send()
            .await?;
        let response = ensure_success(response).await?;

        let rows: Vec<CategoryRow> = response.json().await?;
        let changes: HashMap<String, Decimal> = rows
            .into_iter()
            .filter_map(|row| row.market_cap_change_24h.map(|change| (row.id, change)))
            .collect();

        tracing::debug!(count = changes.len(), "카테고리 성과 조회 완료");
        Ok(changes)
    }
}

fn parse_chart(chart: MarketChart) -> Result<PriceSeries> {
    let points = chart
        .prices
        .into_iter()
        .map(|(millis, price)| {
            DateTime::from_timestamp_millis(millis as i64)
                .map(|timestamp| PricePoint::new(timestamp, price))
                .ok_or_else(|| DataError::Parse(format!("잘못된 타임스탬프: {}", millis)))
        })
        .collect::<Result<Vec<_>>>()?;

    PriceSeries::new(points).map_err(|e| DataError::Parse(e.to_string()))
}

#[async_trait]
impl MarketSnapshotSource for CoinGeckoClient {
    async fn fetch_markets(
        &self,
        universe_size: usize,
    ) -> std::result::Result<Vec<MarketListing>, ProviderError> {
        Ok(self.fetch_top_markets(universe_size).await?)
    }
}

#[async_trait]
impl PriceHistorySource for CoinGeckoClient {
    async fn pace(&self) {
        self.history_limiter.acquire().await;
    }

    async fn fetch_price_history(
        &self,
        asset_id: &str,
        days: u32,
    ) -> std::result::Result<PriceSeries, ProviderError> {
        Ok(self.request_history(asset_id, days).await?)
    }
}

#[async_trait]
impl SectorPerformanceSource for CoinGeckoClient {
    async fn fetch_sector_changes(
        &self,
    ) -> std::result::Result<HashMap<String, Decimal>, ProviderError> {
        Ok(self.fetch_categories().await?)
    }
}

impl std::fmt::Debug for CoinGeckoClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoinGeckoClient")
            .field("base_url", &self.settings.base_url)
            .field("vs_currency", &self.settings.vs_currency)
            .finish()
    }
}
