//! 뉴스 게시물, 종목별 심리 집계, 카탈리스트.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 게시물 하나의 심리 (투표 기반).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostSentiment {
    Positive,
    Negative,
    Neutral,
}

impl fmt::Display for PostSentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
        };
        write!(f, "{}", s)
    }
}

/// 뉴스 게시물.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsPost {
    /// 제목
    pub title: String,
    /// 원문 URL
    pub url: Option<String>,
    /// 게시 시각
    pub published_at: Option<DateTime<Utc>>,
    /// 언급된 종목 심볼 (원본 표기)
    pub symbols: Vec<String>,
    /// 긍정 투표 수
    pub positive_votes: u32,
    /// 부정 투표 수
    pub negative_votes: u32,
}

impl NewsPost {
    /// 투표 수로 게시물 심리를 판정합니다. 동수이면 중립입니다.
    pub fn sentiment(&self) -> PostSentiment {
        if self.positive_votes > self.negative_votes {
            PostSentiment::Positive
        } else if self.negative_votes > self.positive_votes {
            PostSentiment::Negative
        } else {
            PostSentiment::Neutral
        }
    }
}

/// 집계에 포함된 헤드라인.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Headline {
    pub title: String,
    pub url: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub sentiment: PostSentiment,
}

/// 한 종목의 뉴스 심리 집계.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentTally {
    pub positive: u32,
    pub negative: u32,
    pub neutral: u32,
    /// 집계 순서대로의 헤드라인
    pub headlines: Vec<Headline>,
}

impl SentimentTally {
    /// 게시물 하나를 집계에 반영합니다.
    pub fn record(&mut self, post: &NewsPost) {
        let sentiment = post.sentiment();
        match sentiment {
            PostSentiment::Positive => self.positive += 1,
            PostSentiment::Negative => self.negative += 1,
            PostSentiment::Neutral => self.neutral += 1,
        }
        self.headlines.push(Headline {
            title: post.title.clone(),
            url: post.url.clone(),
            published_at: post.published_at,
            sentiment,
        });
    }

    /// 전체 뉴스 수
    pub fn total(&self) -> u32 {
        self.positive + self.negative + self.neutral
    }

    /// 순 심리 (긍정 - 부정)
    pub fn net(&self) -> i64 {
        i64::from(self.positive) - i64::from(self.negative)
    }

    /// 순 심리 / 전체 뉴스 수, [-1, 1]. 뉴스가 없으면 0.
    pub fn strength(&self) -> Decimal {
        let total = self.total();
        if total == 0 {
            Decimal::ZERO
        } else {
            Decimal::from(self.net()) / Decimal::from(total)
        }
    }

    /// 긍정 헤드라인 (최대 `limit`개)
    pub fn positive_headlines(&self, limit: usize) -> impl Iterator<Item = &Headline> {
        self.headlines
            .iter()
            .filter(|h| h.sentiment == PostSentiment::Positive)
            .take(limit)
    }
}

/// 긍정 뉴스가 몰린 종목 (카탈리스트 후보).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalyst {
    /// 대문자 심볼
    pub symbol: String,
    pub positive_count: u32,
    pub negative_count: u32,
    pub neutral_count: u32,
    /// 긍정 - 부정
    pub net_sentiment: i64,
    /// 전체 뉴스 수
    pub total_news: u32,
    /// 순 심리 / 전체 뉴스 수
    pub strength: Decimal,
    /// 원본 헤드라인
    pub headlines: Vec<Headline>,
}

impl Catalyst {
    /// 집계로부터 카탈리스트를 생성합니다.
    pub fn from_tally(symbol: impl Into<String>, tally: &SentimentTally) -> Self {
        Self {
            symbol: symbol.into(),
            positive_count: tally.positive,
            negative_count: tally.negative,
            neutral_count: tally.neutral,
            net_sentiment: tally.net(),
            total_news: tally.total(),
            strength: tally.strength(),
            headlines: tally.headlines.clone(),
        }
    }
}
