//! 텍스트 리포트 렌더러.
//!
//! [`ScanResult`]와 카탈리스트 목록을 사람이 읽는 텍스트로 변환합니다.
//! 점수와 근거 문자열은 결과에 이미 들어 있으므로 다시 계산하지 않습니다.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::fmt::Write;

use crate::explain::{explain_rsi, explain_score, regime_analogy};
use scanner_core::{
    Catalyst, DecimalExt, OpportunityBreakdown, PostSentiment, RegimeReading, ScanResult,
    ScanStatus, SubScore, MAX_TOTAL_SCORE,
};

const RULE: &str =
    "================================================================================";

fn timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// 스캔 리포트 렌더링.
pub fn render_scan_report(result: &ScanResult, currency: &str) -> String {
    let mut out = String::new();
    let stats = &result.stats;

    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(out, "AUTOMATED MARKET SCAN REPORT");
    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(out, "Scan Time: {}", timestamp(result.started_at));
    let _ = writeln!(out, "Coins Scanned: {}", stats.fetched);
    let _ = writeln!(
        out,
        "Candidates: {} passed pre-filter, {} scored",
        stats.candidates, stats.scored
    );
    if result.effective_min_score != result.configured_min_score {
        let _ = writeln!(
            out,
            "Min Score Threshold: {}/{} (raised from {} by {} regime)",
            result.effective_min_score,
            MAX_TOTAL_SCORE,
            result.configured_min_score,
            result.regime.regime
        );
    } else {
        let _ = writeln!(
            out,
            "Min Score Threshold: {}/{}",
            result.effective_min_score, MAX_TOTAL_SCORE
        );
    }
    let _ = writeln!(out, "Market Regime: {}", render_regime(&result.regime));
    let _ = writeln!(out);

    match result.status {
        ScanStatus::NoMarketData => {
            let _ = writeln!(out, "Scan aborted: no market data available.");
        }
        ScanStatus::AbortedNoCandidates => {
            let _ = writeln!(
                out,
                "Scan aborted: no assets passed the pre-filter ({} excluded).",
                stats.total_excluded()
            );
        }
        ScanStatus::Completed => {
            let _ = writeln!(out, "{}", RULE);
            let _ = writeln!(out, "TOP OPPORTUNITIES ({} found)", result.opportunities.len());
            let _ = writeln!(out, "{}", RULE);

            for (i, opportunity) in result.opportunities.iter().enumerate() {
                render_opportunity(&mut out, i + 1, opportunity, currency);
            }

            if result.is_empty() {
                let _ = writeln!(out, "No opportunities found meeting criteria.");
                let _ = writeln!(
                    out,
                    "Consider lowering min_score threshold or waiting for better conditions."
                );
            }
        }
    }

    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(out, "END OF REPORT");
    let _ = writeln!(out, "{}", RULE);
    out
}

fn render_opportunity(out: &mut String, rank: usize, o: &OpportunityBreakdown, currency: &str) {
    let _ = writeln!(out, "#{}. {} ({})", rank, o.coin_name, o.symbol);
    let _ = writeln!(out, "    Score: {}/{}", o.total_score(), MAX_TOTAL_SCORE);
    let _ = writeln!(out, "    {}", explain_score(o.total_score()));
    let _ = writeln!(out, "    Price: ${} {}", o.price.to_fixed(4), currency.to_uppercase());
    let _ = writeln!(
        out,
        "    24h: {}% | 7d: {}%",
        o.change_24h.to_signed_fixed(2),
        o.change_7d.to_signed_fixed(2)
    );
    match o.market_cap_rank {
        Some(rank) => {
            let _ = writeln!(out, "    Rank: #{}", rank);
        }
        None => {
            let _ = writeln!(out, "    Rank: N/A");
        }
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "    Breakdown:");
    for sub in o.sub_scores() {
        render_sub_score(out, sub);
    }
    let _ = writeln!(out);

    if let Some(tech) = o.technical_indicators() {
        let _ = writeln!(out, "    Technical Indicators:");
        if let Some(rsi) = tech.rsi {
            let _ = writeln!(out, "      - RSI: {}", rsi.to_fixed(1));
            let _ = writeln!(out, "        {}", explain_rsi(rsi));
        }
        if let Some(diff) = tech.macd_diff {
            let _ = writeln!(out, "      - MACD: {}", diff.to_fixed(2));
        }
        if let Some(position) = tech.bb_position {
            let _ = writeln!(out, "      - BB Position: {}", position.to_fixed(2));
        }
    }

    let _ = writeln!(out, "\n{}\n", "=".repeat(40));
}

fn render_sub_score(out: &mut String, sub: &SubScore) {
    let factor = sub.factor();
    let _ = writeln!(
        out,
        "      - {}: {}/{}",
        factor.label(),
        sub.points(),
        factor.max_points()
    );
    let _ = writeln!(out, "        {}", sub.rationale_text());
}

/// 레짐 표시 (한 줄 요약 + 비유 설명).
pub fn render_regime(reading: &RegimeReading) -> String {
    format!(
        "{} {} - {}\n  {}",
        reading.regime.icon(),
        reading,
        reading.regime.description(),
        regime_analogy(reading.regime)
    )
}

/// 카탈리스트 리포트 렌더링.
pub fn render_catalyst_report(catalysts: &[Catalyst], scanned_at: DateTime<Utc>) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(out, "CATALYST DETECTION REPORT");
    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(out, "Scan Time: {}", timestamp(scanned_at));
    let _ = writeln!(out, "Catalysts Found: {}", catalysts.len());
    let _ = writeln!(out, "{}", RULE);

    if catalysts.is_empty() {
        let _ = writeln!(out, "No significant catalysts detected in the past 24 hours.");
    } else {
        let _ = writeln!(out, "DETECTED CATALYSTS");
        let _ = writeln!(out, "{}", RULE);

        for (i, catalyst) in catalysts.iter().enumerate() {
            let _ = writeln!(out, "#{}. {}", i + 1, catalyst.symbol);
            let _ = writeln!(out, "    Catalyst Strength: {}", percent(catalyst.strength));
            let _ = writeln!(out, "    Positive News: {}", catalyst.positive_count);
            let _ = writeln!(out, "    Negative News: {}", catalyst.negative_count);
            let _ = writeln!(out, "    Net Sentiment: {:+}", catalyst.net_sentiment);
            let _ = writeln!(out);
            let _ = writeln!(out, "    Recent Headlines:");

            let positive = catalyst
                .headlines
                .iter()
                .filter(|h| h.sentiment == PostSentiment::Positive)
                .take(3);
            for (j, headline) in positive.enumerate() {
                let _ = writeln!(out, "      {}. {}", j + 1, headline.title);
                if let Some(published_at) = headline.published_at {
                    let _ = writeln!(out, "         {}", timestamp(published_at));
                }
                if let Some(url) = &headline.url {
                    let _ = writeln!(out, "         {}", url);
                }
            }

            let _ = writeln!(out, "\n{}\n", "=".repeat(40));
        }
    }

    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(out, "END OF REPORT");
    let _ = writeln!(out, "{}", RULE);
    out
}

fn percent(fraction: Decimal) -> String {
    format!("{}%", (fraction * dec!(100)).to_fixed(0))
}
