//! Per-second compound interest in 64.64 binary fixed point.
//!
//! Growth is computed as `(1 + r)^elapsed` where `r` is the per-second rate,
//! using binary exponentiation with a 127-bit mantissa. Every intermediate
//! multiply truncates, so the result never exceeds the mathematically exact
//! value: repeated compounding can only under-credit, never fabricate value.
//! The relative error is bounded by one mantissa ulp per multiply, well under
//! 2^-63 for any reachable elapsed time.

use crate::error::ErrorCode;
use crate::RATE_PER_SECOND_WAD;
use anchor_lang::prelude::*;

// The generated impls use the two-parameter std `Result`, which the Anchor
// prelude's `Result<T>` alias would shadow; keep the expansion prelude-free.
mod wide {
    uint::construct_uint! {
        pub struct U256(4);
    }
}
pub use wide::U256;

/// 1.0 in 64.64 fixed point.
pub const ONE_64X64: u128 = 1 << 64;

const WAD: u128 = 1_000_000_000_000_000_000;

/// Fixed-rate compound growth calculator.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CompoundCurve;

impl CompoundCurve {
    /// The per-second growth factor `1 + r` as a 64.64 fixed-point value.
    ///
    /// The division truncates, keeping the factor a lower bound of the exact
    /// rational rate.
    pub fn per_second_factor() -> u128 {
        ONE_64X64 + (RATE_PER_SECOND_WAD << 64) / WAD
    }

    /// Raises the 64.64 value `x` to the integer power `n`.
    ///
    /// Requires `x` in `[1, 2)`. The mantissa is normalized into
    /// `[2^127, 2^128)` and every multiply truncates at 127 fractional bits;
    /// integer-part growth is carried in a separate shift counter and must
    /// stay below 2^63 or the call fails with `MathOverflow`.
    pub fn pow_64x64(x: u128, n: u64) -> Result<u128> {
        require!(
            (ONE_64X64..2 * ONE_64X64).contains(&x),
            ErrorCode::MathOverflow
        );
        let two_128 = U256::one() << 128;

        let mut mantissa = U256::from(x) << 63;
        let mut mantissa_shift: u32 = 0;
        let mut acc = two_128;
        let mut acc_shift: u32 = 0;

        let mut n = n;
        while n != 0 {
            require!(mantissa_shift < 64, ErrorCode::MathOverflow);
            if n & 1 != 0 {
                acc = (acc * mantissa) >> 127;
                acc_shift += mantissa_shift;
                if acc > two_128 {
                    acc >>= 1;
                    acc_shift += 1;
                }
            }
            mantissa = (mantissa * mantissa) >> 127;
            mantissa_shift <<= 1;
            if mantissa >= two_128 {
                mantissa >>= 1;
                mantissa_shift += 1;
            }
            n >>= 1;
        }

        require!(acc_shift < 64, ErrorCode::MathOverflow);
        Ok((acc >> (64 - acc_shift) as usize).as_u128())
    }

    /// `floor(x * y / 2^64)` where `x` is 64.64 fixed point and `y` an integer.
    pub fn mulu_64x64(x: u128, y: u128) -> Result<u128> {
        let product = (U256::from(x) * U256::from(y)) >> 64;
        if product.bits() > 128 {
            return Err(ErrorCode::MathOverflow.into());
        }
        Ok(product.as_u128())
    }

    /// Principal plus interest after compounding `principal` for `elapsed`
    /// seconds at the fixed program rate. Identity when `elapsed == 0`.
    pub fn compounded(principal: u128, elapsed: u64) -> Result<u128> {
        if principal == 0 || elapsed == 0 {
            return Ok(principal);
        }
        let growth = Self::pow_64x64(Self::per_second_factor(), elapsed)?;
        Self::mulu_64x64(growth, principal)
    }

    /// Interest alone: `compounded(principal, elapsed) - principal`.
    pub fn accrued(principal: u128, elapsed: u64) -> Result<u128> {
        let total = Self::compounded(principal, elapsed)?;
        total
            .checked_sub(principal)
            .ok_or_else(|| ErrorCode::MathOverflow.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SECONDS_PER_YEAR;
    use proptest::prelude::*;

    const MONTH_IN_SECONDS: u64 = 2_628_000;

    // 100,000 tokens at 18 decimals, the reference deposit.
    const PRINCIPAL: u128 = 100_000_000_000_000_000_000_000;

    #[test]
    fn zero_elapsed_is_identity() {
        assert_eq!(CompoundCurve::compounded(PRINCIPAL, 0).unwrap(), PRINCIPAL);
        assert_eq!(CompoundCurve::accrued(PRINCIPAL, 0).unwrap(), 0);
    }

    #[test]
    fn zero_principal_accrues_nothing() {
        assert_eq!(CompoundCurve::accrued(0, SECONDS_PER_YEAR).unwrap(), 0);
    }

    #[test]
    fn interest_after_one_month() {
        assert_eq!(
            CompoundCurve::accrued(PRINCIPAL, MONTH_IN_SECONDS).unwrap(),
            1_680_633_033_310_046_341_168
        );
    }

    #[test]
    fn interest_after_two_months() {
        assert_eq!(
            CompoundCurve::accrued(PRINCIPAL, 2 * MONTH_IN_SECONDS).unwrap(),
            3_389_511_340_546_621_956_208
        );
    }

    #[test]
    fn interest_after_one_year_minus_one_second() {
        assert_eq!(
            CompoundCurve::accrued(PRINCIPAL, SECONDS_PER_YEAR - 1).unwrap(),
            22_140_274_964_779_807_753_125
        );
    }

    #[test]
    fn interest_after_one_year() {
        assert_eq!(
            CompoundCurve::accrued(PRINCIPAL, SECONDS_PER_YEAR).unwrap(),
            22_140_275_739_388_350_171_449
        );
    }

    #[test]
    fn never_exceeds_continuous_compounding() {
        // e^(rt) is a strict upper bound for per-second discrete compounding.
        for elapsed in [1u64, 60, 3600, MONTH_IN_SECONDS, SECONDS_PER_YEAR, 10 * SECONDS_PER_YEAR] {
            let accrued = CompoundCurve::accrued(PRINCIPAL, elapsed).unwrap();
            let rt = 0.20_f64 * elapsed as f64 / SECONDS_PER_YEAR as f64;
            let bound = PRINCIPAL as f64 * (rt.exp() - 1.0);
            assert!(
                (accrued as f64) <= bound * (1.0 + 1e-9) + 1.0,
                "accrued {} above continuous bound {} at {}s",
                accrued,
                bound,
                elapsed
            );
        }
    }

    #[test]
    fn growth_is_monotone_over_a_year() {
        let mut prev = 0u128;
        for elapsed in (0..=SECONDS_PER_YEAR).step_by(1_000_000) {
            let accrued = CompoundCurve::accrued(PRINCIPAL, elapsed).unwrap();
            assert!(accrued >= prev, "accrual decreased at {}s", elapsed);
            prev = accrued;
        }
    }

    proptest! {
        #[test]
        fn compounded_monotone_in_elapsed(
            principal in 1u128..=u64::MAX as u128,
            a in 0u64..=10 * SECONDS_PER_YEAR,
            b in 0u64..=10 * SECONDS_PER_YEAR,
        ) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(
                CompoundCurve::compounded(principal, lo).unwrap()
                    <= CompoundCurve::compounded(principal, hi).unwrap()
            );
        }

        #[test]
        fn compounded_never_below_principal(
            principal in 0u128..=u64::MAX as u128,
            elapsed in 0u64..=10 * SECONDS_PER_YEAR,
        ) {
            prop_assert!(CompoundCurve::compounded(principal, elapsed).unwrap() >= principal);
        }
    }
}
