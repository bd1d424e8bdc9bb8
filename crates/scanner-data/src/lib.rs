//! 외부 데이터 수집.
//!
//! 이 crate는 스캐너의 데이터 소스 trait를 HTTP로 구현합니다:
//! - CoinGecko 시장 목록 / 가격 이력 / 카테고리 성과
//! - alternative.me 공포탐욕지수
//! - CryptoPanic 뉴스
//!
//! 모든 요청은 고정 타임아웃을 가지며, CoinGecko 요청은 주입된
//! [`RateLimiter`](scanner_core::RateLimiter)로 간격을 유지합니다.

pub mod error;
pub mod provider;

pub use error::{DataError, Result};
pub use provider::{CoinGeckoClient, CryptoPanicClient, FearGreedClient};
