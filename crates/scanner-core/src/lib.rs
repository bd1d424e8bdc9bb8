//! # Scanner Core
//!
//! 암호화폐 기회 스캐너의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! 이 크레이트는 스캐너 전반에서 사용되는 기본 타입을 제공합니다:
//! - 가격 시계열 및 시장 스냅샷
//! - 기술적 지표, 하위 점수, 기회 분석 레코드
//! - 시장 레짐 및 스캔 결과
//! - 외부 데이터 소스 trait
//! - 설정 관리
//! - 로깅 인프라
//! - 요청 속도 제한기

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod rate_limiter;
pub mod types;

pub use config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
pub use rate_limiter::RateLimiter;
pub use types::*;
