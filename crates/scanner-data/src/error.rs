//! 데이터 모듈 오류 타입.

use scanner_core::ProviderError;
use thiserror::Error;

/// 데이터 관련 오류.
#[derive(Debug, Error)]
pub enum DataError {
    /// 네트워크 오류
    #[error("네트워크 오류: {0}")]
    Network(String),

    /// 요청 시간 초과
    #[error("요청 시간 초과: {0}")]
    Timeout(String),

    /// HTTP 오류 응답
    #[error("API 오류 [{status}]: {message}")]
    Api { status: u16, message: String },

    /// 응답 파싱 오류
    #[error("파싱 오류: {0}")]
    Parse(String),

    /// 필요한 설정(API 키 등)이 없음
    #[error("설정 누락: {0}")]
    NotConfigured(String),
}

impl DataError {
    /// 재시도 가능한 오류인지 확인
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) | Self::Timeout(_) => true,
            Self::Api { status, .. } => *status == 429 || *status >= 500,
            Self::Parse(_) | Self::NotConfigured(_) => false,
        }
    }
}

impl From<reqwest::Error> for DataError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            DataError::Timeout(err.to_string())
        } else if err.is_decode() {
            DataError::Parse(err.to_string())
        } else if let Some(status) = err.status() {
            DataError::Api {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            DataError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for DataError {
    fn from(err: serde_json::Error) -> Self {
        DataError::Parse(err.to_string())
    }
}

impl From<DataError> for ProviderError {
    fn from(err: DataError) -> Self {
        match err {
            DataError::Network(msg) => ProviderError::Network(msg),
            DataError::Timeout(msg) => ProviderError::Timeout(msg),
            DataError::Api { status, message } => {
                ProviderError::Api(format!("[{}] {}", status, message))
            }
            DataError::Parse(msg) => ProviderError::Parse(msg),
            DataError::NotConfigured(msg) => ProviderError::NotConfigured(msg),
        }
    }
}

pub type Result<T> = std::result::Result<T, DataError>;
