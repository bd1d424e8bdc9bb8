//! CLI 명령 모듈.

pub mod catalysts;
pub mod regime;
pub mod scan;

pub use catalysts::detect_catalysts;
pub use regime::check_regime;
pub use scan::{run_scan, CatalystMode, NarrativeMode, ScanOptions};
