//! 기회 스캔 실행.
//!
//! HTTP 소스를 생성하고, 옵션에 따라 카탈리스트/내러티브 채점기를 고른 뒤
//! 오케스트레이터로 스캔을 한 번 실행합니다.

use anyhow::Context;
use std::sync::Arc;
use tracing::{info, warn};

use scanner_analytics::{
    CatalystDetector, ConstantScorer, OpportunityAssembler, ScanOrchestrator,
    SectorMomentumScorer, SentimentAggregateScorer, SignalScorer,
};
use scanner_core::{
    NewsSource, ScanRequest, ScanResult, ScannerConfig, SectorPerformanceSource,
};
use scanner_data::{CoinGeckoClient, CryptoPanicClient, FearGreedClient};

/// 카탈리스트 슬롯 채점 방식.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum CatalystMode {
    /// 고정 점수 (20점)
    #[default]
    Constant,
    /// 뉴스 투표 집계
    News,
}

/// 내러티브 슬롯 채점 방식.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum NarrativeMode {
    /// 고정 점수 (10점)
    #[default]
    Constant,
    /// 섹터 모멘텀
    Sector,
}

/// 스캔 옵션 (설정값 덮어쓰기).
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    pub universe_size: Option<usize>,
    pub min_score: Option<u32>,
    pub skip_regime: bool,
    pub catalyst: CatalystMode,
    pub narrative: NarrativeMode,
}

impl ScanOptions {
    /// 설정과 옵션으로 스캔 요청을 만듭니다.
    pub fn request(&self, config: &ScannerConfig) -> ScanRequest {
        ScanRequest::new(
            self.universe_size.unwrap_or(config.scan.universe_size),
            self.min_score.unwrap_or(config.scan.min_score),
            config.scan.check_regime && !self.skip_regime,
        )
    }
}

/// 스캔을 한 번 실행합니다.
pub async fn run_scan(config: &ScannerConfig, options: &ScanOptions) -> anyhow::Result<ScanResult> {
    let coingecko = Arc::new(
        CoinGeckoClient::new(config.coingecko.clone()).context("CoinGecko 클라이언트 생성 실패")?,
    );
    let fear_greed =
        Arc::new(FearGreedClient::new(&config.sentiment).context("공포탐욕지수 클라이언트 생성 실패")?);

    let catalyst = catalyst_scorer(config, options.catalyst).await?;
    let narrative = narrative_scorer(config, options.narrative, coingecko.as_ref()).await;
    info!(
        catalyst = catalyst.name(),
        narrative = narrative.name(),
        "채점기 구성"
    );

    let orchestrator = ScanOrchestrator::new(coingecko.clone(), coingecko, config)
        .with_sentiment(fear_greed)
        .with_assembler(OpportunityAssembler::new(catalyst, narrative));

    Ok(orchestrator.run_scan(options.request(config)).await)
}

async fn catalyst_scorer(
    config: &ScannerConfig,
    mode: CatalystMode,
) -> anyhow::Result<Arc<dyn SignalScorer>> {
    if mode == CatalystMode::Constant {
        return Ok(Arc::new(ConstantScorer::catalyst_placeholder()));
    }

    let client = CryptoPanicClient::new(config.news.clone()).context("뉴스 클라이언트 생성 실패")?;
    match client.fetch_posts().await {
        Ok(posts) => {
            let detector = CatalystDetector::new(config.news.min_positive);
            let tallies = detector.analyze_sentiment(&posts);
            info!(posts = posts.len(), symbols = tallies.len(), "뉴스 심리 집계 완료");
            Ok(Arc::new(SentimentAggregateScorer::new(
                tallies,
                config.news.min_positive,
            )))
        }
        Err(e) => {
            warn!(error = %e, "뉴스 조회 실패, 카탈리스트 고정 점수 사용");
            Ok(Arc::new(ConstantScorer::catalyst_placeholder()))
        }
    }
}

async fn narrative_scorer(
    config: &ScannerConfig,
    mode: NarrativeMode,
    source: &dyn SectorPerformanceSource,
) -> Arc<dyn SignalScorer> {
    if mode == NarrativeMode::Constant {
        return Arc::new(ConstantScorer::narrative_placeholder());
    }

    if config.sectors.is_empty() {
        warn!("섹터 매핑이 비어 있어 모든 종목이 중립 점수를 받습니다");
    }

    match source.fetch_sector_changes().await {
        Ok(changes) => Arc::new(SectorMomentumScorer::new(config.sectors.clone(), changes)),
        Err(e) => {
            warn!(error = %e, "섹터 성과 조회 실패, 내러티브 고정 점수 사용");
            Arc::new(ConstantScorer::narrative_placeholder())
        }
    }
}
