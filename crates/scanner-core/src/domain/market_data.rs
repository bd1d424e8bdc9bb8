//! 시장 데이터 타입 및 구조체.
//!
//! 이 모듈은 시장 데이터 관련 타입을 정의합니다:
//! - `PricePoint` / `PriceSeries` - 지표 계산용 가격 시계열
//! - `MarketListing` - 외부 시장 목록 응답 (모든 수치 필드 선택)
//! - `AssetSnapshot` - 검증된 스캔 시점 종목 스냅샷

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::{ScannerError, ScannerResult};
use crate::types::{Percentage, Price};

/// 가격 시계열의 한 시점.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePoint {
    /// 시각
    pub timestamp: DateTime<Utc>,
    /// 가격
    pub price: Price,
}

impl PricePoint {
    /// 새 가격 포인트를 생성합니다.
    pub fn new(timestamp: DateTime<Utc>, price: Price) -> Self {
        Self { timestamp, price }
    }
}

/// 한 종목의 가격 시계열 (시간 오름차순).
///
/// 생성 후 변경되지 않으며, 지표 계산 한 번에 소비됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// 가격 포인트로 시계열을 생성합니다.
    ///
    /// # 에러
    ///
    /// 시각이 오름차순이 아니면 `ScannerError::InvalidInput`.
    pub fn new(points: Vec<PricePoint>) -> ScannerResult<Self> {
        if let Some(pos) = points
            .windows(2)
            .position(|w| w[1].timestamp < w[0].timestamp)
        {
            return Err(ScannerError::InvalidInput(format!(
                "가격 시계열이 시간 오름차순이 아닙니다 (index {})",
                pos + 1
            )));
        }

        Ok(Self { points })
    }

    /// 가격 포인트 슬라이스.
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// 가격만 추출합니다.
    pub fn prices(&self) -> Vec<Price> {
        self.points.iter().map(|p| p.price).collect()
    }

    /// 포인트 개수.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// 비어있는지 여부.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// 마지막 가격.
    pub fn last_price(&self) -> Option<Price> {
        self.points.last().map(|p| p.price)
    }
}

/// 스냅샷 변환 실패.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SnapshotError {
    /// 필수 필드 누락
    #[error("필수 필드 누락: {asset} ({field})")]
    MissingField {
        /// 종목 식별자 (없으면 "<unknown>")
        asset: String,
        /// 누락된 필드명
        field: &'static str,
    },
}

/// 외부 시장 목록 응답의 한 행.
///
/// 외부 소스는 null 값을 자주 내려주므로 모든 필드가 선택적입니다.
/// 스캔에 사용하기 전에 [`AssetSnapshot::try_from`]으로 검증합니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarketListing {
    pub id: Option<String>,
    pub symbol: Option<String>,
    pub name: Option<String>,
    pub current_price: Option<Decimal>,
    pub price_change_percentage_24h: Option<Decimal>,
    #[serde(alias = "price_change_percentage_7d")]
    pub price_change_percentage_7d_in_currency: Option<Decimal>,
    pub total_volume: Option<Decimal>,
    pub market_cap: Option<Decimal>,
    pub market_cap_rank: Option<u32>,
}

/// 스캔 시점의 종목 스냅샷.
///
/// 읽기 전용 입력으로 취급됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetSnapshot {
    /// 외부 소스의 종목 ID (예: "bitcoin")
    pub id: String,
    /// 티커 심볼 (원본 대소문자 유지)
    pub symbol: String,
    /// 종목명
    pub name: String,
    /// 현재가
    pub current_price: Price,
    /// 24시간 변동률 (%). 누락 시 0
    pub change_24h_pct: Percentage,
    /// 7일 변동률 (%). 누락 시 0
    pub change_7d_pct: Percentage,
    /// 24시간 거래대금
    pub total_volume: Decimal,
    /// 시가총액
    pub market_cap: Decimal,
    /// 시가총액 순위 (누락 가능)
    pub market_cap_rank: Option<u32>,
}

impl AssetSnapshot {
    /// 거래대금 / 시가총액 비율.
    ///
    /// 시가총액이 0 이하이면 0을 반환합니다.
    pub fn volume_to_market_cap(&self) -> Decimal {
        if self.market_cap > Decimal::ZERO {
            self.total_volume / self.market_cap
        } else {
            Decimal::ZERO
        }
    }

    /// 대문자 심볼.
    pub fn display_symbol(&self) -> String {
        self.symbol.to_uppercase()
    }
}

impl TryFrom<MarketListing> for AssetSnapshot {
    type Error = SnapshotError;

    fn try_from(listing: MarketListing) -> Result<Self, Self::Error> {
        let asset = listing
            .id
            .clone()
            .or_else(|| listing.symbol.clone())
            .unwrap_or_else(|| "<unknown>".to_string());
        let missing = |field: &'static str| SnapshotError::MissingField {
            asset: asset.clone(),
            field,
        };

        Ok(Self {
            id: listing.id.clone().ok_or_else(|| missing("id"))?,
            symbol: listing.symbol.clone().ok_or_else(|| missing("symbol"))?,
            name: listing.name.clone().ok_or_else(|| missing("name"))?,
            current_price: listing.current_price.ok_or_else(|| missing("current_price"))?,
            change_24h_pct: listing.price_change_percentage_24h.unwrap_or_default(),
            change_7d_pct: listing
                .price_change_percentage_7d_in_currency
                .unwrap_or_default(),
            total_volume: listing.total_volume.ok_or_else(|| missing("total_volume"))?,
            market_cap: listing.market_cap.ok_or_else(|| missing("market_cap"))?,
            market_cap_rank: listing.market_cap_rank,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn listing() -> MarketListing {
        MarketListing {
            id: Some("solana".to_string()),
            symbol: Some("sol".to_string()),
            name: Some("Solana".to_string()),
            current_price: Some(dec!(210.5)),
            price_change_percentage_24h: Some(dec!(6.2)),
            price_change_percentage_7d_in_currency: None,
            total_volume: Some(dec!(5_000_000_000)),
            market_cap: Some(dec!(100_000_000_000)),
            market_cap_rank: Some(6),
        }
    }

    #[test]
    fn test_snapshot_from_complete_listing() {
        let snapshot = AssetSnapshot::try_from(listing()).unwrap();

        assert_eq!(snapshot.id, "solana");
        assert_eq!(snapshot.display_symbol(), "SOL");
        assert_eq!(snapshot.change_7d_pct, Decimal::ZERO);
        assert_eq!(snapshot.volume_to_market_cap(), dec!(0.05));
    }

    #[test]
    fn test_snapshot_rejects_missing_price() {
        let mut raw = listing();
        raw.current_price = None;

        let err = AssetSnapshot::try_from(raw).unwrap_err();
        assert_eq!(
            err,
            SnapshotError::MissingField {
                asset: "solana".to_string(),
                field: "current_price",
            }
        );
    }

    #[test]
    fn test_zero_market_cap_ratio() {
        let mut raw = listing();
        raw.market_cap = Some(Decimal::ZERO);
        let snapshot = AssetSnapshot::try_from(raw).unwrap();
        assert_eq!(snapshot.volume_to_market_cap(), Decimal::ZERO);
    }

    #[test]
    fn test_listing_deserializes_nulls_and_7d_alias() {
        let json = r#"{
            "id": "pepe", "symbol": "pepe", "name": "Pepe",
            "current_price": 0.00001234, "price_change_percentage_24h": null,
            "price_change_percentage_7d": -12.5,
            "total_volume": 900000000, "market_cap": 4500000000, "market_cap_rank": null
        }"#;
        let raw: MarketListing = serde_json::from_str(json).unwrap();
        let snapshot = AssetSnapshot::try_from(raw).unwrap();

        assert_eq!(snapshot.change_24h_pct, Decimal::ZERO);
        assert_eq!(snapshot.change_7d_pct, dec!(-12.5));
        assert_eq!(snapshot.market_cap_rank, None);
    }

    #[test]
    fn test_series_rejects_descending_time() {
        let t0 = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let t1 = Utc.timestamp_opt(1_700_086_400, 0).unwrap();

        assert!(PriceSeries::new(vec![
            PricePoint::new(t0, dec!(1)),
            PricePoint::new(t1, dec!(2)),
        ])
        .is_ok());

        assert!(PriceSeries::new(vec![
            PricePoint::new(t1, dec!(1)),
            PricePoint::new(t0, dec!(2)),
        ])
        .is_err());
    }
}
