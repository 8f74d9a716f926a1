// Copyright Materialize, Inc. All rights reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository, or online at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Lookup tables backing digit counting and powers of ten.
//!
//! Both tables are initialized once and immutable afterwards.

use std::borrow::Cow;
use std::sync::LazyLock;

use num_bigint::{BigInt, BigUint};
use num_traits::One;

/// log10(2); used to estimate a decimal digit count from a bit length.
const LOG10_2: f64 = 0.3010299956639812;

/// Largest exponent served from the precomputed power-of-ten table.
const POW10_TABLE_SIZE: i64 = 64;

static POW10: LazyLock<Vec<BigInt>> = LazyLock::new(|| {
    let mut table = Vec::with_capacity(POW10_TABLE_SIZE as usize + 1);
    let mut p = BigInt::one();
    for _ in 0..=POW10_TABLE_SIZE {
        table.push(p.clone());
        p *= 10;
    }
    table
});

/// Returns 10^n for n >= 0.
///
/// Exponents up to the table size are served from a shared table; the
/// returned value must not be mutated, which `Cow` encodes directly.
pub(crate) fn exp10(n: i64) -> Cow<'static, BigInt> {
    debug_assert!(n >= 0, "exp10 requires a nonnegative exponent");
    if n <= POW10_TABLE_SIZE {
        Cow::Borrowed(&POW10[n as usize])
    } else {
        Cow::Owned(BigInt::from(10).pow(n as u32))
    }
}

/// Digit-count information for one magnitude bit length.
struct BitDigits {
    /// Digits in the smallest value of this bit length (2^(bits-1)).
    min_digits: i64,
    /// Digits in the largest value of this bit length (2^bits - 1).
    max_digits: i64,
    /// The smallest integer with `min_digits + 1` digits; compared against
    /// when the bit length alone is ambiguous.
    border: BigUint,
}

/// Bit lengths covered by the digit-count table.
const DIGITS_TABLE_SIZE: u64 = 64;

static DIGITS: LazyLock<Vec<BitDigits>> = LazyLock::new(|| {
    let mut table = Vec::with_capacity(DIGITS_TABLE_SIZE as usize + 1);
    // Index 0 is unused; bit lengths start at 1.
    table.push(BitDigits {
        min_digits: 1,
        max_digits: 1,
        border: BigUint::from(10u32),
    });
    for bits in 1..=DIGITS_TABLE_SIZE {
        let min = BigUint::one() << (bits - 1);
        let max = (BigUint::one() << bits) - BigUint::one();
        let min_digits = decimal_len(&min);
        let max_digits = decimal_len(&max);
        let border = BigUint::from(10u32).pow(min_digits as u32);
        table.push(BitDigits {
            min_digits,
            max_digits,
            border,
        });
    }
    table
});

fn decimal_len(n: &BigUint) -> i64 {
    n.to_string().len() as i64
}

/// Returns the number of base-10 digits of `b`. Zero has one digit.
pub(crate) fn num_digits(b: &BigInt) -> i64 {
    let bits = b.bits();
    if bits == 0 {
        return 1;
    }
    let mag = b.magnitude();
    if bits <= DIGITS_TABLE_SIZE {
        let entry = &DIGITS[bits as usize];
        if entry.min_digits == entry.max_digits {
            return entry.min_digits;
        }
        // One comparison with the border settles the ambiguous case.
        if *mag < entry.border {
            return entry.min_digits;
        }
        return entry.max_digits;
    }
    // Estimate from the bit length, then verify against powers of ten. The
    // estimate is at most one short, so this loop runs once or twice.
    let mut n = (((bits - 1) as f64) * LOG10_2) as i64;
    if n < 1 {
        n = 1;
    }
    loop {
        let e = exp10(n);
        if mag < e.as_ref().magnitude() {
            return n;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use num_bigint::BigInt;

    use super::{exp10, num_digits};

    #[test]
    fn test_exp10() {
        assert_eq!(*exp10(0).as_ref(), BigInt::from(1));
        assert_eq!(*exp10(1).as_ref(), BigInt::from(10));
        assert_eq!(*exp10(20).as_ref(), BigInt::from_str("100000000000000000000").unwrap());
        let big = exp10(70);
        assert_eq!(big.as_ref().to_string().len(), 71);
    }

    #[test]
    fn test_num_digits_small() {
        assert_eq!(num_digits(&BigInt::from(0)), 1);
        assert_eq!(num_digits(&BigInt::from(1)), 1);
        assert_eq!(num_digits(&BigInt::from(-1)), 1);
        assert_eq!(num_digits(&BigInt::from(9)), 1);
        assert_eq!(num_digits(&BigInt::from(10)), 2);
        assert_eq!(num_digits(&BigInt::from(99)), 2);
        assert_eq!(num_digits(&BigInt::from(100)), 3);
        assert_eq!(num_digits(&BigInt::from(-12345)), 5);
    }

    #[test]
    fn test_num_digits_borders() {
        // Every power-of-ten border within and just beyond the table.
        for digits in 1..=30i64 {
            let p = exp10(digits);
            let below = p.as_ref() - 1;
            assert_eq!(num_digits(&below), digits, "10^{digits} - 1");
            assert_eq!(num_digits(p.as_ref()), digits + 1, "10^{digits}");
        }
    }

    #[test]
    fn test_num_digits_large() {
        // Past the bit-length table; exercises the estimate-and-verify path.
        for digits in [21i64, 40, 64, 65, 100] {
            let p = exp10(digits);
            let below = p.as_ref() - 1;
            assert_eq!(num_digits(&below), digits);
            assert_eq!(num_digits(p.as_ref()), digits + 1);
        }
    }

    #[test]
    fn test_num_digits_around_word_sizes() {
        assert_eq!(num_digits(&BigInt::from(u64::MAX)), 20);
        assert_eq!(num_digits(&BigInt::from(i64::MIN)), 19);
        assert_eq!(num_digits(&(BigInt::from(1u8) << 64)), 20);
    }
}
