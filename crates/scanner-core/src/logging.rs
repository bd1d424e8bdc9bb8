//! tracing 로깅 초기화.
//!
//! 출력 형식은 pretty(터미널), json(로그 수집), compact(한 줄) 중 하나입니다.
//! 스캔은 종목마다 [`asset_span!`] span 안에서 진행되므로, `span_events`를 켜면
//! 종목별 점수 계산 소요 시간이 span 종료 이벤트로 기록됩니다.

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

use crate::config::LoggingSettings;
use crate::error::{ScannerError, ScannerResult};

/// 로그 출력 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
    Compact,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            "compact" => Ok(Self::Compact),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// 필터 (예: "info", "scanner_analytics=debug"). `RUST_LOG`가 우선합니다.
    pub level: String,
    pub format: LogFormat,
    /// span 종료 이벤트 출력 여부
    pub span_events: bool,
}

impl LogConfig {
    /// `logging` 설정 섹션에서 생성합니다. 알 수 없는 형식은 pretty로 대체됩니다.
    pub fn from_settings(settings: &LoggingSettings) -> Self {
        Self {
            level: settings.level.clone(),
            format: settings.format.parse().unwrap_or_default(),
            span_events: settings.span_events,
        }
    }

    fn fmt_layer(&self) -> Box<dyn Layer<Registry> + Send + Sync> {
        let span_events = if self.span_events {
            FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        };
        let layer = fmt::layer().with_span_events(span_events);

        match self.format {
            LogFormat::Pretty => layer.pretty().boxed(),
            LogFormat::Json => layer.json().boxed(),
            LogFormat::Compact => layer.compact().boxed(),
        }
    }
}

/// 전역 subscriber를 설치합니다.
///
/// # Errors
///
/// 필터 문자열이 잘못되었거나 subscriber가 이미 설치된 경우 `ScannerError::Config`.
pub fn init_logging(config: LogConfig) -> ScannerResult<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| ScannerError::Config(format!("잘못된 로그 필터 '{}': {}", config.level, e)))?;

    tracing_subscriber::registry()
        .with(config.fmt_layer())
        .with(env_filter)
        .try_init()
        .map_err(|e| ScannerError::Config(format!("로깅 초기화 실패: {}", e)))?;

    tracing::debug!(format = ?config.format, level = %config.level, "로깅 초기화 완료");
    Ok(())
}

/// 종목 단위 작업용 span을 생성하는 매크로.
#[macro_export]
macro_rules! asset_span {
    ($name:expr, $asset_id:expr) => {
        tracing::info_span!($name, asset = %$asset_id)
    };
    ($name:expr, $asset_id:expr, $scan_id:expr) => {
        tracing::info_span!($name, asset = %$asset_id, scan_id = %$scan_id)
    };
}
