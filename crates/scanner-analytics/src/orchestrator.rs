//! 스캔 오케스트레이터.
//!
//! 스캔 한 번은 다음 단계를 순서대로 수행합니다.
//!
//! ```text
//! REGIME → FETCH → PRE_FILTER → (비었으면 중단) → SCORE(상위 K개)
//!        → POST_FILTER(RSI) → THRESHOLD → RANK → DONE
//! ```
//!
//! 종목별 가격 이력 조회는 한 번에 하나씩 순차로 수행하며, 요청 간격은
//! 가격 이력 소스에 주입된 [`RateLimiter`](scanner_core::RateLimiter)가 보장합니다.
//! 간격 대기(`pace`)는 타임아웃 바깥에서 끝내고, `fetch_timeout`은 요청 자체에만
//! 적용됩니다. 조회 실패나 시간 초과는 해당 종목의 기술 지표를 "없음"으로 처리할 뿐
//! 스캔을 중단하지 않습니다.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn, Instrument};

use scanner_core::{
    asset_span, AssetSnapshot, MarketSnapshotSource, OpportunityBreakdown, PriceHistorySource,
    RegimeReading, ScanRequest, ScanResult, ScanSettings, ScanStatus, ScannerConfig,
    SentimentIndexSource, TechnicalIndicators,
};

use crate::assembler::OpportunityAssembler;
use crate::filters::{FilterOutcome, FilterPipeline};
use crate::indicators::IndicatorEngine;
use crate::regime::RegimePolicy;

/// 스캔 오케스트레이터.
pub struct ScanOrchestrator {
    markets: Arc<dyn MarketSnapshotSource>,
    history: Arc<dyn PriceHistorySource>,
    sentiment: Option<Arc<dyn SentimentIndexSource>>,
    assembler: OpportunityAssembler,
    engine: IndicatorEngine,
    filters: FilterPipeline,
    regime_policy: RegimePolicy,
    settings: ScanSettings,
}

impl ScanOrchestrator {
    /// 시세/가격 이력 소스와 설정으로 생성합니다.
    ///
    /// 심리지수 소스가 없으면 레짐은 항상 UNKNOWN입니다.
    pub fn new(
        markets: Arc<dyn MarketSnapshotSource>,
        history: Arc<dyn PriceHistorySource>,
        config: &ScannerConfig,
    ) -> Self {
        Self {
            markets,
            history,
            sentiment: None,
            assembler: OpportunityAssembler::default(),
            engine: IndicatorEngine::new(),
            filters: FilterPipeline::new(config.filters.clone()),
            regime_policy: RegimePolicy::new(config.scan.bear_min_score),
            settings: config.scan.clone(),
        }
    }

    /// 심리지수 소스를 설정합니다.
    pub fn with_sentiment(mut self, source: Arc<dyn SentimentIndexSource>) -> Self {
        self.sentiment = Some(source);
        self
    }

    /// 카탈리스트/내러티브 채점기가 설정된 조립기로 교체합니다.
    pub fn with_assembler(mut self, assembler: OpportunityAssembler) -> Self {
        self.assembler = assembler;
        self
    }

    /// 기본 요청 (설정의 universe_size, min_score, check_regime).
    pub fn default_request(&self) -> ScanRequest {
        ScanRequest::new(
            self.settings.universe_size,
            self.settings.min_score,
            self.settings.check_regime,
        )
    }

    /// 스캔을 한 번 실행합니다.
    ///
    /// 이 함수는 실패하지 않습니다. 최악의 경우 `status`가 중단 상태인 빈 결과를 반환합니다.
    pub async fn run_scan(&self, request: ScanRequest) -> ScanResult {
        let started = Instant::now();

        // 1. 레짐
        let regime = self.assess_regime(request.check_regime).await;
        let effective_min_score = self
            .regime_policy
            .effective_threshold(request.min_score, regime.regime);

        let mut result = ScanResult::new(&request, regime, effective_min_score);
        if effective_min_score != request.min_score {
            info!(
                configured = request.min_score,
                effective = effective_min_score,
                regime = %result.regime.regime,
                "레짐에 따라 최소 점수 상향"
            );
        }

        info!(
            scan_id = %result.scan_id,
            universe_size = request.universe_size,
            min_score = effective_min_score,
            "스캔 시작"
        );

        // 2. 시세 조회
        let snapshots = self.fetch_snapshots(&request, &mut result).await;
        if snapshots.is_empty() {
            warn!(scan_id = %result.scan_id, "사용 가능한 시장 데이터 없음, 스캔 중단");
            result.status = ScanStatus::NoMarketData;
            return self.finish(result, started);
        }

        // 3. 사전 필터
        let mut candidates = self.pre_filter(snapshots, &mut result);
        if candidates.is_empty() {
            warn!(scan_id = %result.scan_id, "사전 필터 통과 종목 없음, 스캔 중단");
            result.status = ScanStatus::AbortedNoCandidates;
            return self.finish(result, started);
        }

        // 4. 점수 계산 (시가총액 순 상위 K개)
        if candidates.len() > self.settings.score_limit {
            debug!(
                candidates = candidates.len(),
                score_limit = self.settings.score_limit,
                "점수 계산 대상 제한"
            );
            candidates.truncate(self.settings.score_limit);
        }
        let scored = self.score_candidates(&candidates, &mut result).await;

        // 5. 사후 필터 (RSI)
        let mut survivors = Vec::with_capacity(scored.len());
        for breakdown in scored {
            if self.filters.passes_rsi(&breakdown) {
                survivors.push(breakdown);
            } else {
                info!(
                    asset = %breakdown.asset_id,
                    rsi = ?breakdown.rsi(),
                    total = breakdown.total_score(),
                    "RSI 과매수로 제외"
                );
                result.stats.rsi_dropped += 1;
            }
        }

        // 6. 최소 점수
        let mut qualified: Vec<OpportunityBreakdown> = survivors
            .into_iter()
            .filter(|b| FilterPipeline::qualifies(b, effective_min_score))
            .collect();

        // 7. 랭킹 (총점 내림차순, 동점은 시가총액 순서 유지)
        qualified.sort_by(|a, b| b.total_score().cmp(&a.total_score()));

        result.stats.qualified = qualified.len();
        result.opportunities = qualified;
        self.finish(result, started)
    }

    async fn assess_regime(&self, check_regime: bool) -> RegimeReading {
        if !check_regime {
            debug!("레짐 확인 생략");
            return RegimeReading::unknown();
        }

        match &self.sentiment {
            Some(source) => self.regime_policy.assess(source.as_ref()).await,
            None => {
                warn!("심리지수 소스가 없어 레짐 UNKNOWN으로 진행");
                RegimeReading::unknown()
            }
        }
    }

    async fn fetch_snapshots(
        &self,
        request: &ScanRequest,
        result: &mut ScanResult,
    ) -> Vec<AssetSnapshot> {
        let listings = match self.markets.fetch_markets(request.universe_size).await {
            Ok(listings) => listings,
            Err(e) => {
                warn!(error = %e, "시장 목록 조회 실패");
                return Vec::new();
            }
        };
        result.stats.fetched = listings.len();

        let mut snapshots = Vec::with_capacity(listings.len());
        for listing in listings {
            match AssetSnapshot::try_from(listing) {
                Ok(snapshot) => snapshots.push(snapshot),
                Err(e) => {
                    warn!(error = %e, "불완전한 시장 데이터, 종목 건너뜀");
                    result.stats.malformed += 1;
                }
            }
        }

        info!(
            fetched = result.stats.fetched,
            malformed = result.stats.malformed,
            "시장 데이터 조회 완료"
        );
        snapshots
    }

    fn pre_filter(
        &self,
        snapshots: Vec<AssetSnapshot>,
        result: &mut ScanResult,
    ) -> Vec<AssetSnapshot> {
        let mut candidates = Vec::with_capacity(snapshots.len());

        for snapshot in snapshots {
            match self.filters.evaluate(&snapshot) {
                FilterOutcome::Pass => candidates.push(snapshot),
                FilterOutcome::PassWithOverboughtAdvisory => {
                    debug!(
                        asset = %snapshot.id,
                        change_24h = %snapshot.change_24h_pct,
                        "24시간 급등 경고 (RSI로 최종 판단)"
                    );
                    result.stats.overbought_advisories += 1;
                    candidates.push(snapshot);
                }
                FilterOutcome::Excluded(reason) => {
                    debug!(asset = %snapshot.id, reason = %reason, "사전 필터 제외");
                    result.stats.record_exclusion(reason);
                }
            }
        }

        result.stats.candidates = candidates.len();
        info!(
            candidates = candidates.len(),
            excluded = result.stats.total_excluded(),
            "사전 필터 완료"
        );
        candidates
    }

    async fn score_candidates(
        &self,
        candidates: &[AssetSnapshot],
        result: &mut ScanResult,
    ) -> Vec<OpportunityBreakdown> {
        let total = candidates.len();
        let mut scored = Vec::with_capacity(total);

        for (idx, snapshot) in candidates.iter().enumerate() {
            let span = asset_span!("score_asset", snapshot.id, result.scan_id);

            let indicators = self.load_indicators(snapshot).instrument(span.clone()).await;
            if indicators.is_none() {
                result.stats.indicators_unavailable += 1;
            }

            let _guard = span.enter();
            match self.assembler.assemble(snapshot, indicators) {
                Ok(breakdown) => {
                    debug!(
                        total = breakdown.total_score(),
                        technical = breakdown.technical().points(),
                        fundamental = breakdown.fundamental().points(),
                        "점수 계산 완료"
                    );
                    result.stats.scored += 1;
                    scored.push(breakdown);
                }
                Err(e) => {
                    warn!(error = %e, "점수 계산 실패, 종목 건너뜀");
                    result.stats.scoring_failures += 1;
                }
            }

            if (idx + 1) % 5 == 0 || idx + 1 == total {
                info!(progress = format!("{}/{}", idx + 1, total), "점수 계산 진행 중");
            }
        }

        scored
    }

    async fn load_indicators(&self, snapshot: &AssetSnapshot) -> Option<TechnicalIndicators> {
        self.history.pace().await;

        let fetch = self
            .history
            .fetch_price_history(&snapshot.id, self.settings.lookback_days);

        match tokio::time::timeout(self.settings.fetch_timeout(), fetch).await {
            Ok(Ok(series)) => {
                let indicators = self.engine.compute(&series);
                if indicators.is_none() {
                    debug!(points = series.len(), "가격 이력 부족, 기술 지표 없음");
                }
                indicators
            }
            Ok(Err(e)) => {
                warn!(error = %e, "가격 이력 조회 실패, 기술 지표 없음");
                None
            }
            Err(_) => {
                warn!(
                    timeout_secs = self.settings.fetch_timeout_secs,
                    "가격 이력 조회 시간 초과, 기술 지표 없음"
                );
                None
            }
        }
    }

    fn finish(&self, mut result: ScanResult, started: Instant) -> ScanResult {
        result.stats.elapsed = started.elapsed();
        result.stats.log_summary(result.scan_id);
        result
    }
}

impl std::fmt::Debug for ScanOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScanOrchestrator")
            .field("assembler", &self.assembler)
            .field("has_sentiment", &self.sentiment.is_some())
            .field("settings", &self.settings)
            .finish()
    }
}
