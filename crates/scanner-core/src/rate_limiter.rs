//! 최소 간격 기반 요청 속도 제한기.
//!
//! 외부 API 호출 사이에 최소 간격을 보장합니다. 첫 호출은 즉시 통과하고,
//! 이후 호출은 직전 허가 시각으로부터 `min_interval`이 지날 때까지 대기합니다.
//! 여러 클라이언트가 `Arc`로 공유할 수 있습니다.

use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

/// 최소 간격 속도 제한기.
#[derive(Debug)]
pub struct RateLimiter {
    /// 로깅용 이름
    name: String,
    /// 허가 간 최소 간격
    min_interval: Duration,
    /// 직전 허가 시각
    last_grant: Mutex<Option<Instant>>,
}

impl RateLimiter {
    /// 새 속도 제한기를 생성합니다.
    pub fn new(name: impl Into<String>, min_interval: Duration) -> Self {
        Self {
            name: name.into(),
            min_interval,
            last_grant: Mutex::new(None),
        }
    }

    /// 이름
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 최소 간격
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// 허가를 획득합니다. 필요하면 최소 간격이 지날 때까지 대기합니다.
    ///
    /// 락을 쥔 채 대기하므로 동시 호출자도 순서대로 간격을 두고 통과합니다.
    pub async fn acquire(&self) {
        let mut last_grant = self.last_grant.lock().await;

        if let Some(last) = *last_grant {
            let ready_at = last + self.min_interval;
            let now = Instant::now();
            if ready_at > now {
                let wait = ready_at - now;
                debug!(
                    limiter = %self.name,
                    wait_ms = wait.as_millis() as u64,
                    "요청 간격 대기"
                );
                tokio::time::sleep_until(ready_at).await;
            }
        }

        *last_grant = Some(Instant::now());
    }
}
