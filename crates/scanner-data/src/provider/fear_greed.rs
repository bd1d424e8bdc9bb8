//! alternative.me 공포탐욕지수 클라이언트.
//!
//! 응답 예: `{"data":[{"value":"54","value_classification":"Neutral"}]}`.
//! 지수 값은 문자열로 내려옵니다.

use async_trait::async_trait;
use serde::Deserialize;

use scanner_core::{ProviderError, SentimentIndexSource, SentimentSettings};

use super::{ensure_success, http_client};
use crate::error::{DataError, Result};

/// 공포탐욕지수 클라이언트.
#[derive(Debug, Clone)]
pub struct FearGreedClient {
    client: reqwest::Client,
    url: String,
}

#[derive(Debug, Deserialize)]
struct IndexResponse {
    #[serde(default)]
    data: Vec<IndexEntry>,
}

#[derive(Debug, Deserialize)]
struct IndexEntry {
    value: String,
    #[serde(default)]
    value_classification: Option<String>,
}

impl FearGreedClient {
    /// 설정의 URL과 타임아웃으로 생성합니다.
    pub fn new(settings: &SentimentSettings) -> Result<Self> {
        Ok(Self {
            client: http_client(settings.timeout())?,
            url: settings.url.clone(),
        })
    }

    /// 최신 지수 값 (0~100) 조회.
    pub async fn fetch_latest(&self) -> Result<u8> {
        let response = self.client.get(&self.url).send().await?;
        let response = ensure_success(response).await?;
        let body: IndexResponse = response.json().await?;

        let entry = body
            .data
            .into_iter()
            .next()
            .ok_or_else(|| DataError::Parse("지수 데이터 없음".to_string()))?;
        let value = parse_index(&entry.value)?;

        tracing::debug!(
            value,
            classification = entry.value_classification.as_deref().unwrap_or("-"),
            "공포탐욕지수 수신"
        );
        Ok(value)
    }
}

fn parse_index(raw: &str) -> Result<u8> {
    let value: u8 = raw
        .trim()
        .parse()
        .map_err(|_| DataError::Parse(format!("잘못된 지수 값: {}", raw)))?;

    if value > 100 {
        return Err(DataError::Parse(format!("지수 범위 초과: {}", value)));
    }
    Ok(value)
}

#[async_trait]
impl SentimentIndexSource for FearGreedClient {
    async fn fetch_index(&self) -> std::result::Result<u8, ProviderError> {
        Ok(self.fetch_latest().await?)
    }
}
