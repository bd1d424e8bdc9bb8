//! 스캐너 시스템의 에러 타입.
//!
//! 이 모듈은 스캐너 전반에서 사용되는 에러 타입을 정의합니다.
//! 외부 협력자(시세/뉴스/심리지수 소스) 에러는 [`crate::ProviderError`]를 사용합니다.

use thiserror::Error;

/// 핵심 스캐너 에러.
#[derive(Debug, Error)]
pub enum ScannerError {
    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// 데이터 에러
    #[error("데이터 에러: {0}")]
    Data(String),

    /// 네트워크 에러
    #[error("네트워크 에러: {0}")]
    Network(String),

    /// 요청 시간 초과
    #[error("시간 초과: {0}")]
    Timeout(String),

    /// 파싱 에러
    #[error("파싱 에러: {0}")]
    Parse(String),

    /// 잘못된 입력
    #[error("잘못된 입력: {0}")]
    InvalidInput(String),
}

/// 스캐너 작업을 위한 Result 타입.
pub type ScannerResult<T> = Result<T, ScannerError>;

impl ScannerError {
    /// 재시도 가능한 에러인지 확인합니다.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ScannerError::Network(_) | ScannerError::Timeout(_))
    }
}

impl From<serde_json::Error> for ScannerError {
    fn from(err: serde_json::Error) -> Self {
        ScannerError::Parse(err.to_string())
    }
}

impl From<config::ConfigError> for ScannerError {
    fn from(err: config::ConfigError) -> Self {
        ScannerError::Config(err.to_string())
    }
}
