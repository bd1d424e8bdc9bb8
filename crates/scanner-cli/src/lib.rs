//! 암호화폐 기회 스캐너 CLI.
//!
//! 이 crate는 `scanner` 바이너리와 그 명령 구현을 제공합니다:
//! - 기회 스캔 (시세 조회 → 필터 → 점수 → 랭킹) 및 텍스트 리포트
//! - 현재 시장 레짐 조회
//! - 뉴스 기반 카탈리스트 탐지
//! - 지표/점수/레짐의 비전문가용 설명

pub mod explain;
pub mod modules;
pub mod report;

pub use explain::{explain_regime, explain_rsi, explain_score};
pub use modules::{CatalystMode, NarrativeMode, ScanOptions};
pub use report::{render_catalyst_report, render_regime, render_scan_report};
