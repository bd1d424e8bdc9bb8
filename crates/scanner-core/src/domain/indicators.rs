//! 종목별 기술적 지표 스냅샷.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::Price;

/// 가격 시계열에서 계산된 기술적 지표.
///
/// 각 지표는 계산할 수 없으면 `None`이며, 이는 실제 0 값과 구분됩니다.
/// 스캔마다 종목당 한 번 생성되고 이후 변경되지 않습니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechnicalIndicators {
    /// RSI (14)
    pub rsi: Option<Decimal>,
    /// MACD 라인 (EMA12 - EMA26)
    pub macd: Option<Decimal>,
    /// MACD 시그널 (MACD의 EMA9)
    pub macd_signal: Option<Decimal>,
    /// MACD 히스토그램 (MACD - 시그널)
    pub macd_diff: Option<Decimal>,
    /// 볼린저 상단
    pub bb_upper: Option<Decimal>,
    /// 볼린저 중심선 (SMA20)
    pub bb_middle: Option<Decimal>,
    /// 볼린저 하단
    pub bb_lower: Option<Decimal>,
    /// 밴드 내 위치 (0 = 하단, 1 = 상단)
    pub bb_position: Option<Decimal>,
    /// 시계열의 마지막 가격
    pub current_price: Price,
}

impl TechnicalIndicators {
    /// 모든 지표가 없는 상태로 생성합니다.
    pub fn empty(current_price: Price) -> Self {
        Self {
            rsi: None,
            macd: None,
            macd_signal: None,
            macd_diff: None,
            bb_upper: None,
            bb_middle: None,
            bb_lower: None,
            bb_position: None,
            current_price,
        }
    }
}
