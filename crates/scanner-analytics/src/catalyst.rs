//! 카탈리스트 탐지기 (Catalyst Detector).
//!
//! 뉴스 게시물의 투표를 종목별로 집계하여 긍정 뉴스가 몰린 종목을 찾습니다.
//!
//! 1. 게시물 심리 판정: 긍정 투표 > 부정 → positive, 반대 → negative, 동수 → neutral
//! 2. 게시물이 언급한 모든 종목(대문자 심볼)에 반영
//! 3. 긍정 ≥ `min_positive` 이고 긍정 > 부정인 종목만 카탈리스트
//! 4. 강도(순 심리 / 전체 뉴스 수) 내림차순 정렬

use std::collections::HashMap;

use scanner_core::{Catalyst, NewsPost, NewsSource, ProviderError, SentimentTally};

/// 카탈리스트 탐지기.
#[derive(Debug, Clone, Copy)]
pub struct CatalystDetector {
    min_positive: u32,
}

impl Default for CatalystDetector {
    fn default() -> Self {
        Self::new(2)
    }
}

impl CatalystDetector {
    /// 최소 긍정 뉴스 수를 지정하여 생성합니다.
    pub fn new(min_positive: u32) -> Self {
        Self { min_positive }
    }

    /// 최소 긍정 뉴스 수
    pub fn min_positive(&self) -> u32 {
        self.min_positive
    }

    /// 게시물을 종목별 심리 집계로 변환합니다.
    pub fn analyze_sentiment(&self, posts: &[NewsPost]) -> HashMap<String, SentimentTally> {
        let mut tallies: HashMap<String, SentimentTally> = HashMap::new();

        for post in posts {
            for symbol in &post.symbols {
                let symbol = symbol.trim().to_uppercase();
                if symbol.is_empty() {
                    continue;
                }
                tallies.entry(symbol).or_default().record(post);
            }
        }

        tallies
    }

    /// 집계에서 카탈리스트를 추려 강도 내림차순으로 정렬합니다.
    ///
    /// 강도가 같으면 심볼 알파벳 순입니다.
    pub fn identify_catalysts(&self, tallies: &HashMap<String, SentimentTally>) -> Vec<Catalyst> {
        let mut catalysts: Vec<Catalyst> = tallies
            .iter()
            .filter(|(_, t)| t.positive >= self.min_positive && t.positive > t.negative)
            .map(|(symbol, tally)| Catalyst::from_tally(symbol.clone(), tally))
            .collect();

        catalysts.sort_by(|a, b| {
            b.strength
                .cmp(&a.strength)
                .then_with(|| a.symbol.cmp(&b.symbol))
        });

        catalysts
    }

    /// 뉴스 소스에서 게시물을 가져와 카탈리스트를 탐지합니다.
    pub async fn detect(&self, source: &dyn NewsSource) -> Result<Vec<Catalyst>, ProviderError> {
        let posts = source.fetch_posts().await?;
        tracing::info!(posts = posts.len(), "뉴스 게시물 수집");

        let tallies = self.analyze_sentiment(&posts);
        let catalysts = self.identify_catalysts(&tallies);
        tracing::info!(
            symbols = tallies.len(),
            catalysts = catalysts.len(),
            "카탈리스트 탐지 완료"
        );

        Ok(catalysts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn post(title: &str, symbols: &[&str], positive: u32, negative: u32) -> NewsPost {
        NewsPost {
            title: title.to_string(),
            url: None,
            published_at: None,
            symbols: symbols.iter().map(|s| s.to_string()).collect(),
            positive_votes: positive,
            negative_votes: negative,
        }
    }

    fn posts() -> Vec<NewsPost> {
        vec![
            post("ETF inflows", &["btc", "ETH"], 10, 1),
            post("Upgrade ships", &["eth"], 5, 0),
            post("Exploit rumor", &["eth"], 0, 4),
            post("Partnership", &["link"], 3, 1),
            post("Integration", &["link"], 2, 0),
            post("Quiet day", &["btc"], 1, 1),
            post("Listing", &["btc"], 6, 2),
        ]
    }

    #[test]
    fn test_analyze_sentiment_credits_every_symbol() {
        let detector = CatalystDetector::default();
        let tallies = detector.analyze_sentiment(&posts());

        let eth = &tallies["ETH"];
        assert_eq!((eth.positive, eth.negative, eth.neutral), (2, 1, 0));

        let btc = &tallies["BTC"];
        assert_eq!((btc.positive, btc.negative, btc.neutral), (2, 0, 1));
        assert_eq!(btc.headlines.len(), 3);
    }

    #[test]
    fn test_identify_catalysts_sorted_by_strength() {
        let detector = CatalystDetector::new(2);
        let tallies = detector.analyze_sentiment(&posts());

        let catalysts = detector.identify_catalysts(&tallies);
        let symbols: Vec<&str> = catalysts.iter().map(|c| c.symbol.as_str()).collect();

        // LINK 2/2 = 1.0, BTC 2/3, ETH 1/3
        assert_eq!(symbols, vec!["LINK", "BTC", "ETH"]);
        assert_eq!(catalysts[0].strength, dec!(1));
        assert_eq!(catalysts[0].net_sentiment, 2);
    }

    #[test]
    fn test_min_positive_and_dominance_required() {
        let detector = CatalystDetector::new(3);
        let tallies = detector.analyze_sentiment(&posts());
        assert!(detector.identify_catalysts(&tallies).is_empty());

        let balanced = detector.analyze_sentiment(&[
            post("a", &["sui"], 3, 0),
            post("b", &["sui"], 3, 0),
            post("c", &["sui"], 3, 0),
            post("d", &["sui"], 0, 3),
            post("e", &["sui"], 0, 3),
            post("f", &["sui"], 0, 3),
        ]);
        assert!(detector.identify_catalysts(&balanced).is_empty());
    }
}
