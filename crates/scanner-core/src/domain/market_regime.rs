//! MarketRegime - 시장 심리 레짐 분류.
//!
//! 외부 심리지수(0~100, 공포탐욕지수)를 4단계 레짐으로 분류하여
//! 스캔의 최소 점수 정책을 조정하는 데 사용합니다.

use serde::{Deserialize, Serialize};
use std::fmt;

/// BEAR 레짐 상한 (미만이면 BEAR).
pub const BEAR_UPPER_BOUND: u8 = 35;

/// NEUTRAL 레짐 상한 (미만이면 NEUTRAL, 이상이면 BULL).
pub const NEUTRAL_UPPER_BOUND: u8 = 65;

/// 시장 심리 레짐.
///
/// # 상태 설명
///
/// - **Bear**: 지수 < 35 (공포 구간)
/// - **Neutral**: 35 <= 지수 < 65
/// - **Bull**: 지수 >= 65 (탐욕 구간)
/// - **Unknown**: 지수 조회 실패 또는 확인 생략
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[derive(Default)]
pub enum MarketRegime {
    /// 약세 (공포)
    Bear,
    /// 중립
    Neutral,
    /// 강세 (탐욕)
    Bull,
    /// 알 수 없음
    #[default]
    Unknown,
}

impl MarketRegime {
    /// 심리지수 값으로부터 레짐을 분류합니다.
    pub fn from_index(value: u8) -> Self {
        if value < BEAR_UPPER_BOUND {
            Self::Bear
        } else if value < NEUTRAL_UPPER_BOUND {
            Self::Neutral
        } else {
            Self::Bull
        }
    }

    /// 임계값 상향이 필요한 레짐인지 여부
    pub fn raises_threshold(self) -> bool {
        matches!(self, Self::Bear)
    }

    /// 아이콘 (리포트용)
    pub fn icon(self) -> &'static str {
        match self {
            Self::Bear => "🐻",
            Self::Neutral => "↔️",
            Self::Bull => "🐂",
            Self::Unknown => "❔",
        }
    }

    /// 설명 문자열
    pub fn description(self) -> &'static str {
        match self {
            Self::Bear => "약세/공포",
            Self::Neutral => "중립",
            Self::Bull => "강세/탐욕",
            Self::Unknown => "알 수 없음",
        }
    }
}

impl fmt::Display for MarketRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Bear => "BEAR",
            Self::Neutral => "NEUTRAL",
            Self::Bull => "BULL",
            Self::Unknown => "UNKNOWN",
        };
        write!(f, "{}", s)
    }
}

/// 한 스캔 사이클의 레짐 판정 결과.
///
/// 스캔 하나의 수명 동안만 유효하며 저장되지 않습니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RegimeReading {
    /// 분류된 레짐
    pub regime: MarketRegime,
    /// 분류에 사용된 원본 지수 값 (조회 실패 시 None)
    pub index_value: Option<u8>,
}

impl RegimeReading {
    /// 지수 값으로부터 판정합니다.
    pub fn from_index(value: u8) -> Self {
        Self {
            regime: MarketRegime::from_index(value),
            index_value: Some(value),
        }
    }

    /// 지수를 사용할 수 없는 경우의 판정.
    pub fn unknown() -> Self {
        Self::default()
    }
}

impl fmt::Display for RegimeReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index_value {
            Some(value) => write!(f, "{} (Fear & Greed: {})", self.regime, value),
            None => write!(f, "{}", self.regime),
        }
    }
}
