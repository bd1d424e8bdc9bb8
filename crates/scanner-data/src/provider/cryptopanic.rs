//! CryptoPanic 뉴스 클라이언트.
//!
//! `{base}/posts/?auth_token=...&filter=...&public=true` 응답의 `results`를
//! [`NewsPost`]로 변환합니다. API 토큰이 없으면 요청하지 않고
//! `NotConfigured`를 반환합니다.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use scanner_core::{NewsPost, NewsSettings, NewsSource, ProviderError};

use super::{ensure_success, http_client};
use crate::error::{DataError, Result};

/// CryptoPanic 클라이언트.
#[derive(Clone)]
pub struct CryptoPanicClient {
    client: reqwest::Client,
    settings: NewsSettings,
}

#[derive(Debug, Deserialize)]
struct PostsResponse {
    #[serde(default)]
    results: Vec<RawPost>,
}

#[derive(Debug, Deserialize)]
struct RawPost {
    #[serde(default)]
    title: String,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    published_at: Option<DateTime<Utc>>,
    #[serde(default, alias = "currencies")]
    instruments: Option<Vec<Instrument>>,
    #[serde(default)]
    votes: Option<Votes>,
}

#[derive(Debug, Deserialize)]
struct Instrument {
    code: String,
}

#[derive(Debug, Default, Deserialize)]
struct Votes {
    #[serde(default)]
    positive: u32,
    #[serde(default)]
    negative: u32,
}

impl From<RawPost> for NewsPost {
    fn from(raw: RawPost) -> Self {
        let votes = raw.votes.unwrap_or_default();
        Self {
            title: raw.title,
            url: raw.url,
            published_at: raw.published_at,
            symbols: raw
                .instruments
                .unwrap_or_default()
                .into_iter()
                .map(|i| i.code)
                .collect(),
            positive_votes: votes.positive,
            negative_votes: votes.negative,
        }
    }
}

impl CryptoPanicClient {
    /// 설정으로 생성합니다.
    pub fn new(settings: NewsSettings) -> Result<Self> {
        Ok(Self {
            client: http_client(settings.timeout())?,
            settings,
        })
    }

    /// API 토큰이 설정되었는지 여부
    pub fn is_configured(&self) -> bool {
        self.settings
            .api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty())
    }

    /// 최신 게시물 조회.
    pub async fn fetch_latest_posts(&self) -> Result<Vec<NewsPost>> {
        let api_key = match self.settings.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => key,
            _ => {
                return Err(DataError::NotConfigured(
                    "news.api_key (CryptoPanic API 토큰)".to_string(),
                ))
            }
        };

        let url = format!("{}/posts/", self.settings.base_url.trim_end_matches('/'));
        let params = [
            ("auth_token", api_key),
            ("filter", self.settings.filter.as_str()),
            ("public", "true"),
        ];

        tracing::debug!(filter = %self.settings.filter, "CryptoPanic 게시물 요청");

        let response = self.client.get(&url).query(&params).send().await?;
        let response = ensure_success(response).await?;
        let body: PostsResponse = response.json().await?;

        let posts: Vec<NewsPost> = body.results.into_iter().map(NewsPost::from).collect();
        tracing::debug!(count = posts.len(), "CryptoPanic 게시물 수신");
        Ok(posts)
    }
}

#[async_trait]
impl NewsSource for CryptoPanicClient {
    async fn fetch_posts(&self) -> std::result::Result<Vec<NewsPost>, ProviderError> {
        Ok(self.fetch_latest_posts().await?)
    }
}

impl std::fmt::Debug for CryptoPanicClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CryptoPanicClient")
            .field("base_url", &self.settings.base_url)
            .field("filter", &self.settings.filter)
            .field("configured", &self.is_configured())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_post_conversion() {
        let raw: RawPost = serde_json::from_str(
            r#"{
                "title": "Solana ETF filing",
                "url": "https://example.com/sol",
                "published_at": "2024-03-01T12:00:00Z",
                "instruments": [{"code": "SOL"}, {"code": "ETH"}],
                "votes": {"positive": 7, "negative": 1, "important": 3}
            }"#,
        )
        .unwrap();

        let post = NewsPost::from(raw);
        assert_eq!(post.symbols, vec!["SOL", "ETH"]);
        assert_eq!(post.positive_votes, 7);
        assert_eq!(post.negative_votes, 1);
        assert!(post.published_at.is_some());
    }

    #[test]
    fn test_raw_post_legacy_currencies_and_missing_votes() {
        let raw: RawPost =
            serde_json::from_str(r#"{"title": "Quiet", "currencies": [{"code": "BTC"}]}"#).unwrap();

        let post = NewsPost::from(raw);
        assert_eq!(post.symbols, vec!["BTC"]);
        assert_eq!((post.positive_votes, post.negative_votes), (0, 0));
        assert!(post.url.is_none());
    }

    #[test]
    fn test_not_configured_without_key() {
        let client = CryptoPanicClient::new(NewsSettings::default()).unwrap();
        assert!(!client.is_configured());
    }
}
