//! 설정 관리.
//!
//! 스캐너 설정은 선택적 TOML 파일과 `SCANNER__` 접두사 환경 변수로 구성됩니다.
//! 모든 섹션은 기본값을 가지므로 설정 파일 없이도 동작합니다.
//!
//! ```toml
//! [scan]
//! universe_size = 250
//! min_score = 95
//!
//! [sectors]
//! sol = "layer-1"
//! ```

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use crate::error::ScannerResult;

/// 스캐너 전체 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ScannerConfig {
    /// 스캔 파이프라인 설정
    pub scan: ScanSettings,
    /// 사전/사후 필터 임계값
    pub filters: FilterSettings,
    /// CoinGecko 시세 소스 설정
    pub coingecko: CoinGeckoSettings,
    /// 공포탐욕지수 소스 설정
    pub sentiment: SentimentSettings,
    /// 뉴스(CryptoPanic) 소스 설정
    pub news: NewsSettings,
    /// 심볼 → 섹터(카테고리 ID) 매핑
    pub sectors: HashMap<String, String>,
    /// 로깅 설정
    pub logging: LoggingSettings,
}

/// 스캔 파이프라인 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ScanSettings {
    /// 시가총액 상위 몇 개 종목을 가져올지
    pub universe_size: usize,
    /// 기본 최소 점수 (0~160)
    pub min_score: u32,
    /// 점수 계산 대상 상한 (사전 필터 통과 종목 중 상위 K개)
    pub score_limit: usize,
    /// 가격 이력 조회 기간 (일)
    pub lookback_days: u32,
    /// 시장 레짐 확인 여부
    pub check_regime: bool,
    /// BEAR 레짐에서 적용할 최소 점수 하한
    pub bear_min_score: u32,
    /// 가격 이력 조회 타임아웃 (초)
    pub fetch_timeout_secs: u64,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            universe_size: 250,
            min_score: 95,
            score_limit: 20,
            lookback_days: 30,
            check_regime: true,
            bear_min_score: 110,
            fetch_timeout_secs: 10,
        }
    }
}

impl ScanSettings {
    /// 가격 이력 조회 타임아웃을 Duration으로 반환
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

/// 필터 임계값.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FilterSettings {
    /// 24시간 변동률 절대값 상한 (%). 초과 시 제외
    pub max_abs_change_24h: Decimal,
    /// 거래대금/시가총액 비율 하한. 미만 시 제외
    pub min_volume_ratio: Decimal,
    /// 과매수 경고 기준 24시간 변동률 (%). 제외하지 않음
    pub overbought_change_24h: Decimal,
    /// 사후 필터 RSI 상한. 초과 시 제외
    pub max_rsi: Decimal,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            max_abs_change_24h: dec!(50),
            min_volume_ratio: dec!(0.01),
            overbought_change_24h: dec!(30),
            max_rsi: dec!(70),
        }
    }
}

/// CoinGecko 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CoinGeckoSettings {
    /// REST API 기본 URL
    pub base_url: String,
    /// 호가 통화
    pub vs_currency: String,
    /// 페이지당 종목 수 (최대 250)
    pub per_page: usize,
    /// 시장 목록 페이지 요청 타임아웃 (초)
    pub page_timeout_secs: u64,
    /// 가격 이력 요청 타임아웃 (초)
    pub history_timeout_secs: u64,
    /// 시장 목록 페이지 간 최소 간격 (밀리초)
    pub page_interval_ms: u64,
    /// 가격 이력 요청 간 최소 간격 (밀리초)
    pub history_interval_ms: u64,
}

impl Default for CoinGeckoSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.coingecko.com/api/v3".to_string(),
            vs_currency: "aud".to_string(),
            per_page: 250,
            page_timeout_secs: 15,
            history_timeout_secs: 10,
            page_interval_ms: 1500,
            history_interval_ms: 6000,
        }
    }
}

impl CoinGeckoSettings {
    /// 페이지 요청 타임아웃
    pub fn page_timeout(&self) -> Duration {
        Duration::from_secs(self.page_timeout_secs)
    }

    /// 가격 이력 요청 타임아웃
    pub fn history_timeout(&self) -> Duration {
        Duration::from_secs(self.history_timeout_secs)
    }

    /// 페이지 간 최소 간격
    pub fn page_interval(&self) -> Duration {
        Duration::from_millis(self.page_interval_ms)
    }

    /// 가격 이력 요청 간 최소 간격
    pub fn history_interval(&self) -> Duration {
        Duration::from_millis(self.history_interval_ms)
    }
}

/// 공포탐욕지수 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SentimentSettings {
    /// 지수 API URL
    pub url: String,
    /// 요청 타임아웃 (초)
    pub timeout_secs: u64,
}

impl Default for SentimentSettings {
    fn default() -> Self {
        Self {
            url: "https://api.alternative.me/fng/?limit=1".to_string(),
            timeout_secs: 10,
        }
    }
}

impl SentimentSettings {
    /// 요청 타임아웃
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// 뉴스 소스 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NewsSettings {
    /// REST API 기본 URL
    pub base_url: String,
    /// API 토큰 (없으면 뉴스 기반 기능 비활성)
    pub api_key: Option<String>,
    /// 게시물 필터 (rising, hot, bullish, important ...)
    pub filter: String,
    /// 요청 타임아웃 (초)
    pub timeout_secs: u64,
    /// 카탈리스트로 인정할 최소 긍정 뉴스 수
    pub min_positive: u32,
}

impl Default for NewsSettings {
    fn default() -> Self {
        Self {
            base_url: "https://cryptopanic.com/api/developer/v2".to_string(),
            api_key: None,
            filter: "rising".to_string(),
            timeout_secs: 15,
            min_positive: 2,
        }
    }
}

impl NewsSettings {
    /// 요청 타임아웃
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
    /// 종목 span 종료 이벤트 출력 (종목별 소요 시간)
    pub span_events: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            span_events: false,
        }
    }
}

impl ScannerConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    ///
    /// 파일이 없으면 기본값과 환경 변수만 사용합니다.
    /// 환경 변수 예: `SCANNER__SCAN__MIN_SCORE=100`.
    pub fn load<P: AsRef<Path>>(path: Option<P>) -> ScannerResult<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path.as_ref()).required(false));
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix("SCANNER")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// 심볼의 섹터를 조회합니다 (대소문자 무시).
    pub fn sector_of(&self, symbol: &str) -> Option<&str> {
        self.sectors
            .get(&symbol.to_lowercase())
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_scanner_policy() {
        let config = ScannerConfig::default();

        assert_eq!(config.scan.universe_size, 250);
        assert_eq!(config.scan.min_score, 95);
        assert_eq!(config.scan.score_limit, 20);
        assert_eq!(config.scan.bear_min_score, 110);
        assert_eq!(config.filters.max_rsi, dec!(70));
        assert_eq!(config.coingecko.history_interval(), Duration::from_secs(6));
        assert_eq!(config.coingecko.page_interval(), Duration::from_millis(1500));
        assert!(config.news.api_key.is_none());
    }

    #[test]
    fn test_load_partial_file_keeps_defaults() {
        let path = std::env::temp_dir().join(format!(
            "scanner-config-{}.toml",
            uuid::Uuid::new_v4()
        ));
        {
            let mut file = std::fs::File::create(&path).unwrap();
            writeln!(file, "[scan]\nmin_score = 120\n\n[sectors]\nsol = \"layer-1\"").unwrap();
        }

        let config = ScannerConfig::load(Some(&path)).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.scan.min_score, 120);
        assert_eq!(config.scan.universe_size, 250);
        assert_eq!(config.sector_of("SOL"), Some("layer-1"));
        assert_eq!(config.sector_of("btc"), None);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let config = ScannerConfig::load(Some("/nonexistent/scanner.toml")).unwrap();
        assert_eq!(config.scan.lookback_days, 30);
    }
}
