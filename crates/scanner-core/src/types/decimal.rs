//! 정밀한 금융 계산을 위한 Decimal 유틸리티.
//!
//! 가격, 변동률, 지표 값은 모두 `Decimal`로 다루며
//! 리포트/근거 문자열 출력을 위한 서식 헬퍼를 제공합니다.

use rust_decimal::{Decimal, RoundingStrategy};

/// 금융 정밀도를 위한 가격 타입.
pub type Price = Decimal;

/// 퍼센트 타입 (5 = 5%).
pub type Percentage = Decimal;

/// Decimal 연산을 위한 확장 트레이트.
pub trait DecimalExt {
    /// 지정된 소수점 자릿수로 반올림합니다 (사사오입).
    fn round_half_up(&self, dp: u32) -> Decimal;

    /// 고정 소수점 문자열로 변환합니다 (예: `12.30`).
    fn to_fixed(&self, dp: u32) -> String;

    /// 부호를 항상 붙인 고정 소수점 문자열로 변환합니다 (예: `+5.2`, `-3.0`).
    fn to_signed_fixed(&self, dp: u32) -> String;
}

impl DecimalExt for Decimal {
    fn round_half_up(&self, dp: u32) -> Decimal {
        self.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
    }

    fn to_fixed(&self, dp: u32) -> String {
        let mut rounded = self.round_half_up(dp);
        if rounded.is_zero() {
            rounded.set_sign_positive(true);
        }
        rounded.rescale(dp);
        rounded.to_string()
    }

    fn to_signed_fixed(&self, dp: u32) -> String {
        let fixed = self.to_fixed(dp);
        if fixed.starts_with('-') {
            fixed
        } else {
            format!("+{}", fixed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_to_fixed_pads_and_rounds() {
        assert_eq!(dec!(12.3).to_fixed(2), "12.30");
        assert_eq!(dec!(0.125).to_fixed(2), "0.13");
        assert_eq!(dec!(42).to_fixed(1), "42.0");
    }

    #[test]
    fn test_to_signed_fixed() {
        assert_eq!(dec!(5.24).to_signed_fixed(1), "+5.2");
        assert_eq!(dec!(-3).to_signed_fixed(1), "-3.0");
        assert_eq!(Decimal::ZERO.to_signed_fixed(2), "+0.00");
    }
}
