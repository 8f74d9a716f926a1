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

//! Shared decimal constants, initialized once and immutable afterwards.

use std::sync::LazyLock;

use crate::decimal::Decimal;

pub(crate) static ONE: LazyLock<Decimal> = LazyLock::new(|| Decimal::new(1, 0));
pub(crate) static TWO: LazyLock<Decimal> = LazyLock::new(|| Decimal::new(2, 0));
pub(crate) static THREE: LazyLock<Decimal> = LazyLock::new(|| Decimal::new(3, 0));
pub(crate) static EIGHT: LazyLock<Decimal> = LazyLock::new(|| Decimal::new(8, 0));
pub(crate) static HALF: LazyLock<Decimal> = LazyLock::new(|| Decimal::new(5, -1));
pub(crate) static ONE_EIGHTH: LazyLock<Decimal> = LazyLock::new(|| Decimal::new(125, -3));

// Seed polynomial coefficients for the cube-root estimate on [1/8, 1]:
// (C1 * x + C2) * x + C3.
pub(crate) static CBRT_C1: LazyLock<Decimal> = LazyLock::new(|| Decimal::new(-46_946_116, -8));
pub(crate) static CBRT_C2: LazyLock<Decimal> = LazyLock::new(|| Decimal::new(1_072_302, -6));
pub(crate) static CBRT_C3: LazyLock<Decimal> = LazyLock::new(|| Decimal::new(3_812_513, -7));

const LN10_STR: &str = "2.30258509299404568401799145468436420760110148862877297603332790096757\
2609677352480235997205089598298341967784042286";

const INV_LN10_STR: &str = "0.4342944819032518276511289189166050822943970058036665661144537831658\
646492088707747292249493384317483";

/// ln(10) to one hundred decimal places.
pub(crate) static LN10: LazyLock<Decimal> =
    LazyLock::new(|| LN10_STR.parse().expect("ln(10) constant parses"));

/// 1/ln(10) to one hundred decimal places; multiplying by this constant
/// stands in for dividing by ln(10).
pub(crate) static INV_LN10: LazyLock<Decimal> =
    LazyLock::new(|| INV_LN10_STR.parse().expect("1/ln(10) constant parses"));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants_parse() {
        assert_eq!(HALF.to_string(), "0.5");
        assert_eq!(ONE_EIGHTH.to_string(), "0.125");
        assert_eq!(LN10.num_digits(), 115);
        assert_eq!(INV_LN10.num_digits(), 100);
        assert!(*LN10 > Decimal::new(23, -1));
        assert!(*LN10 < Decimal::new(24, -1));
        assert!(*INV_LN10 > Decimal::new(43, -2));
        assert!(*INV_LN10 < Decimal::new(44, -2));
    }
}
