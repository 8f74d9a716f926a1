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

use std::cmp::Ordering;

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{Signed, Zero};

use crate::condition::Condition;
use crate::constants;
use crate::context::Context;
use crate::decimal::{Decimal, MAX_EXPONENT};
use crate::table;

/// Algorithms for rounding decimal numbers.
///
/// The rounding modes are precisely defined in [The Arithmetic Model][model]
/// chapter of the General Decimal Arithmetic specification.
///
/// [model]: http://speleotrove.com/decimal/damodel.html
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Rounding {
    /// Round towards positive infinity.
    Ceiling,
    /// Round towards zero (truncation).
    Down,
    /// Round towards negative infinity.
    Floor,
    /// Round to nearest; if equidistant, round down.
    HalfDown,
    /// Round to nearest; if equidistant, round so that the final digit is
    /// even.
    HalfEven,
    /// Round to nearest; if equidistant, round up.
    HalfUp,
    /// Round away from zero.
    Up,
    /// The same as [`Rounding::Up`], except that rounding up only occurs if
    /// the digit to be rounded up is 0 or 5.
    ZeroFiveUp,
}

impl Default for Rounding {
    fn default() -> Rounding {
        Rounding::HalfUp
    }
}

impl Rounding {
    /// Reports whether one should be added to the absolute value of a number
    /// being rounded.
    ///
    /// `result` is the pre-round value the one would be added to. `half` is
    /// the comparison of the discarded digits against one half: `Less` for
    /// under a half, `Equal` for exactly a half, `Greater` for over.
    pub(crate) fn should_add_one(&self, result: &BigInt, half: Ordering) -> bool {
        match self {
            Rounding::Down => false,
            Rounding::Up => true,
            Rounding::HalfUp => half != Ordering::Less,
            Rounding::HalfDown => half == Ordering::Greater,
            Rounding::HalfEven => match half {
                Ordering::Greater => true,
                Ordering::Less => false,
                Ordering::Equal => result.is_odd(),
            },
            Rounding::Ceiling => !result.is_negative(),
            Rounding::Floor => result.is_negative(),
            Rounding::ZeroFiveUp => {
                let last: BigInt = result % 5;
                last.is_zero()
            }
        }
    }

    /// Rounds `d` to the precision of `cx` in place, returning the raised
    /// conditions. The exponent policy runs as the final step.
    pub(crate) fn round(&self, cx: &Context, d: &mut Decimal) -> Condition {
        let nd = d.num_digits();
        let xs = if d.is_negative() {
            -1
        } else if d.is_zero() {
            0
        } else {
            1
        };
        let mut res = Condition::empty();

        // Subnormal is defined before rounding; applying the exponent policy
        // here prevents double-rounded subnormals.
        let adj = d.exponent() as i64 + nd - 1;
        if xs != 0 && adj < cx.min_exponent as i64 {
            res |= Condition::SUBNORMAL;
            res |= cx.set_exponent(d, res, &[d.exponent() as i64]);
            return res;
        }

        let mut diff = nd - cx.precision as i64;
        if diff > 0 {
            if diff > MAX_EXPONENT as i64 {
                return Condition::SYSTEM_OVERFLOW | Condition::OVERFLOW;
            }
            res |= Condition::ROUNDED;
            let e = table::exp10(diff);
            let (mut quo, rem) = d.coefficient().div_rem(e.as_ref());
            if !rem.is_zero() {
                res |= Condition::INEXACT;
                let discard = Decimal::from_bigint(rem.abs(), -diff as i32);
                if self.should_add_one(&quo, discard.cmp(&constants::HALF)) {
                    round_add_one(&mut quo, &mut diff, xs);
                }
            }
            d.coeff = quo;
        } else {
            diff = 0;
        }
        res |= cx.set_exponent(d, res, &[d.exponent() as i64, diff]);
        res
    }
}

/// Adds one to the absolute value of `b`, moving it in the direction of
/// `sign` (the sign of the number being rounded, which may differ from the
/// sign of `b` when every digit was discarded). If the digit count grows
/// (9…9 becomes 10…0), the trailing zero is divided back out and `diff` is
/// incremented so the exponent absorbs it.
pub(crate) fn round_add_one(b: &mut BigInt, diff: &mut i64, sign: i32) {
    let nd = table::num_digits(b);
    if sign >= 0 {
        *b += 1;
    } else {
        *b -= 1;
    }
    let nd2 = table::num_digits(b);
    if nd2 > nd {
        *b /= 10;
        *diff += 1;
    }
}

#[cfg(test)]
mod tests {
    use crate::{Condition, Context, Decimal, Rounding};

    fn round(cx: &Context, s: &str) -> (String, Condition) {
        let mut d: Decimal = s.parse().unwrap();
        let res = cx.round(&mut d).unwrap();
        (d.to_string(), res)
    }

    #[test]
    fn test_round() {
        let cases: &[(Rounding, &[(&str, u32, &str)])] = &[
            (
                Rounding::Down,
                &[
                    ("12", 0, "12"),
                    ("12", 1, "1E+1"),
                    ("12", 2, "12"),
                    ("12", 3, "12"),
                    ("19", 1, "1E+1"),
                    ("-19", 1, "-1E+1"),
                    ("1234.5678e10", 5, "1.2345E+13"),
                ],
            ),
            (
                Rounding::HalfUp,
                &[
                    ("14", 1, "1E+1"),
                    ("15", 1, "2E+1"),
                    ("16", 1, "2E+1"),
                    ("-15", 1, "-2E+1"),
                    ("149", 1, "1E+2"),
                    ("150", 1, "2E+2"),
                    ("151", 1, "2E+2"),
                    ("149", 2, "1.5E+2"),
                    ("155", 2, "1.6E+2"),
                    ("95", 1, "1E+2"),
                ],
            ),
            (
                Rounding::HalfEven,
                &[
                    ("15", 1, "2E+1"),
                    ("25", 1, "2E+1"),
                    ("35", 1, "4E+1"),
                    ("-25", 1, "-2E+1"),
                    ("145", 2, "1.4E+2"),
                    ("155", 2, "1.6E+2"),
                    ("156", 2, "1.6E+2"),
                ],
            ),
            (
                Rounding::Ceiling,
                &[
                    ("11", 1, "2E+1"),
                    ("-11", 1, "-1E+1"),
                    ("10", 1, "1E+1"),
                ],
            ),
            (
                Rounding::Floor,
                &[
                    ("11", 1, "1E+1"),
                    ("-11", 1, "-2E+1"),
                ],
            ),
            (
                Rounding::Up,
                &[
                    ("11", 1, "2E+1"),
                    ("-11", 1, "-2E+1"),
                    ("10", 1, "1E+1"),
                ],
            ),
            (
                Rounding::ZeroFiveUp,
                &[
                    ("101", 2, "1.1E+2"),
                    ("111", 2, "1.1E+2"),
                    ("150", 2, "1.5E+2"),
                    ("151", 2, "1.6E+2"),
                    ("161", 2, "1.6E+2"),
                ],
            ),
        ];
        for (rounding, cases) in cases {
            for (x, p, expect) in *cases {
                let mut cx = Context::default().with_precision(*p);
                cx.rounding = *rounding;
                let (got, _) = round(&cx, x);
                assert_eq!(&got, expect, "{rounding:?} {x} @ {p}");
            }
        }
    }

    #[test]
    fn test_round_flags() {
        let cx = Context::default().with_precision(2);
        let (_, res) = round(&cx, "123");
        assert!(res.rounded());
        assert!(res.inexact());
        let (_, res) = round(&cx, "120");
        assert!(res.rounded());
        assert!(!res.inexact());
        let (_, res) = round(&cx, "12");
        assert!(!res.rounded());
        assert!(!res.inexact());
    }

    #[test]
    fn test_round_carry() {
        // 99 rounds up to 100; the extra digit moves into the exponent.
        let cx = Context::default().with_precision(2);
        let (got, _) = round(&cx, "998");
        assert_eq!(got, "1.0E+3");
    }
}
