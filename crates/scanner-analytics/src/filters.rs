//! 스캔 필터 (사전 / 사후).
//!
//! 사전 필터는 비싼 점수 계산 전에 후보를 줄입니다:
//! 1. 스테이블코인 제외 (심볼, 대소문자 무시)
//! 2. 24시간 변동률 절대값 과대 제외
//! 3. 거래대금/시가총액 비율 부족 제외
//! 4. 24시간 급등 경고 (제외하지 않음)
//!
//! 사후 필터는 계산된 RSI가 상한을 넘는 종목을 총점과 무관하게 제외합니다.
//! 과매수 판단은 RSI가 최종 기준이며, 4번 경고는 참고용입니다.

use rust_decimal::Decimal;

use scanner_core::{AssetSnapshot, ExclusionReason, FilterSettings, OpportunityBreakdown};

/// 알려진 스테이블코인 심볼 (소문자).
pub const STABLECOINS: &[&str] = &[
    "usdt", "usdc", "dai", "busd", "tusd", "usdp", "gusd", "frax", "usdd", "lusd", "susd",
    "eurs", "usdx", "usds", "fdusd", "pyusd", "eurc", "usd1", "usde", "usdy", "usdtb", "cusd",
    "usdr", "usdj", "ustb", "usdf", "usd0", "usda", "ylds", "ust", "flexusd",
];

/// 스테이블코인 여부 (대소문자 무시).
pub fn is_stablecoin(symbol: &str) -> bool {
    let symbol = symbol.to_lowercase();
    STABLECOINS.contains(&symbol.as_str())
}

/// 사전 필터 판정 결과.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOutcome {
    /// 통과
    Pass,
    /// 통과 (24시간 급등 경고)
    PassWithOverboughtAdvisory,
    /// 제외
    Excluded(ExclusionReason),
}

impl FilterOutcome {
    /// 통과 여부
    pub fn passed(self) -> bool {
        !matches!(self, Self::Excluded(_))
    }
}

/// 사전/사후 필터 파이프라인.
#[derive(Debug, Clone, Default)]
pub struct FilterPipeline {
    settings: FilterSettings,
}

impl FilterPipeline {
    /// 필터 임계값으로 생성합니다.
    pub fn new(settings: FilterSettings) -> Self {
        Self { settings }
    }

    /// 필터 임계값
    pub fn settings(&self) -> &FilterSettings {
        &self.settings
    }

    /// 스냅샷 하나에 사전 필터를 순서대로 적용합니다.
    pub fn evaluate(&self, snapshot: &AssetSnapshot) -> FilterOutcome {
        if is_stablecoin(&snapshot.symbol) {
            return FilterOutcome::Excluded(ExclusionReason::Stablecoin);
        }

        if snapshot.change_24h_pct.abs() > self.settings.max_abs_change_24h {
            return FilterOutcome::Excluded(ExclusionReason::ExtremeVolatility);
        }

        if snapshot.volume_to_market_cap() < self.settings.min_volume_ratio {
            return FilterOutcome::Excluded(ExclusionReason::LowLiquidity);
        }

        if snapshot.change_24h_pct > self.settings.overbought_change_24h {
            return FilterOutcome::PassWithOverboughtAdvisory;
        }

        FilterOutcome::Pass
    }

    /// 사후 필터: RSI가 상한을 넘으면 false. RSI가 없으면 통과.
    pub fn passes_rsi(&self, breakdown: &OpportunityBreakdown) -> bool {
        !breakdown
            .rsi()
            .is_some_and(|rsi| rsi > self.settings.max_rsi)
    }

    /// 최종 기준: 총점이 최소 점수 이상인지.
    pub fn qualifies(breakdown: &OpportunityBreakdown, min_score: u32) -> bool {
        breakdown.total_score() >= min_score
    }

    /// RSI 상한
    pub fn max_rsi(&self) -> Decimal {
        self.settings.max_rsi
    }
}
