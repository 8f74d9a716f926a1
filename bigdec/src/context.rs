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

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{Signed, Zero};

use crate::condition::Condition;
use crate::decimal::{parse_parts, upscale, Decimal, MAX_EXPONENT, MIN_EXPONENT};
use crate::error::{Error, InvalidPrecisionError};
use crate::round::{round_add_one, Rounding};
use crate::table;

/// Division refuses precisions beyond this bound to keep the long-division
/// loop from running away.
const QUO_PRECISION_LIMIT: u32 = 5000;

/// A context for performing decimal operations.
///
/// A context configures the precision, rounding algorithm, exponent limits,
/// and trap set that govern every operation performed through it. Contexts
/// are plain values: copy them freely, share them across threads, and derive
/// variants with [`Context::with_precision`].
///
/// Operations take their left operand as `&mut Decimal`, which doubles as
/// the destination, and return the [`Condition`] flags the operation raised.
/// Conditions selected by [`Context::traps`] are converted into an
/// [`Error`] instead; flags are never stored on the context itself, so a
/// shared context stays read-only during operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Context {
    /// The number of digits results are rounded to. Zero disables rounding,
    /// making every operation that can be exact exact.
    pub precision: u32,
    /// The rounding algorithm to use.
    pub rounding: Rounding,
    /// The largest allowed adjusted exponent, i.e. the exponent of the value
    /// written in scientific notation. Results above it raise
    /// [`Condition::OVERFLOW`].
    pub max_exponent: i32,
    /// The smallest allowed adjusted exponent. Nonzero results below it are
    /// subnormal and may be rounded to a coarser exponent.
    pub min_exponent: i32,
    /// The conditions which trigger an error result when raised.
    pub traps: Condition,
}

impl Default for Context {
    /// Returns the base context: no precision limit, half-up rounding, the
    /// system exponent range, and [`Condition::DEFAULT_TRAPS`].
    fn default() -> Context {
        Context {
            precision: 0,
            rounding: Rounding::default(),
            max_exponent: MAX_EXPONENT,
            min_exponent: MIN_EXPONENT,
            traps: Condition::DEFAULT_TRAPS,
        }
    }
}

impl Context {
    /// Creates the base context. Identical to [`Context::default`].
    pub fn new() -> Context {
        Context::default()
    }

    /// Returns a copy of the context with the given precision.
    pub fn with_precision(&self, precision: u32) -> Context {
        Context { precision, ..*self }
    }

    /// Routes accumulated conditions through the context's traps.
    pub(crate) fn check(&self, res: Condition) -> Result<Condition, Error> {
        res.check(self.traps)
    }

    /// Places `d` at the exponent summed from `deltas` while enforcing every
    /// exponent-range rule, returning the conditions raised.
    ///
    /// This routine is the sole authority on exponent range and subnormal
    /// handling. `res` carries the conditions accumulated so far, consulted
    /// when deciding whether a subnormal result also underflowed.
    pub(crate) fn set_exponent(&self, d: &mut Decimal, res: Condition, deltas: &[i64]) -> Condition {
        let mut sum: i64 = 0;
        for &delta in deltas {
            if delta > MAX_EXPONENT as i64 {
                return Condition::SYSTEM_OVERFLOW | Condition::OVERFLOW;
            }
            if delta < MIN_EXPONENT as i64 {
                return Condition::SYSTEM_UNDERFLOW | Condition::UNDERFLOW;
            }
            sum += delta;
        }

        // adj is the adjusted exponent: exponent + digit count - 1.
        let adj = sum + d.num_digits() - 1;
        if adj > MAX_EXPONENT as i64 {
            return Condition::SYSTEM_OVERFLOW | Condition::OVERFLOW;
        }
        if adj < MIN_EXPONENT as i64 {
            return Condition::SYSTEM_UNDERFLOW | Condition::UNDERFLOW;
        }
        let mut r = sum as i32;
        let adj = adj as i32;

        let mut out = Condition::empty();
        if adj < self.min_exponent && !d.is_zero() {
            out |= Condition::SUBNORMAL;
            let etiny = self.min_exponent - (self.precision as i32 - 1);
            if r < etiny {
                // Round digits away so the result can sit at etiny.
                let sign = if d.is_negative() { -1 } else { 1 };
                let scaled = Decimal::from_bigint(d.coefficient().clone(), r - etiny);
                let (integ, mut frac) = scaled.modf();
                let mut coeff = integ.coefficient().clone();
                if !frac.is_zero() {
                    out |= Condition::INEXACT;
                    if frac.is_negative() {
                        frac.negate();
                    }
                    if self
                        .rounding
                        .should_add_one(&coeff, frac.cmp(&crate::constants::HALF))
                    {
                        let mut unused = 0;
                        round_add_one(&mut coeff, &mut unused, sign);
                    }
                }
                if coeff.is_zero() {
                    out |= Condition::CLAMPED;
                }
                d.coeff = coeff;
                r = etiny;
                out |= Condition::ROUNDED;
            }
            if (res | out).inexact() {
                out |= Condition::UNDERFLOW;
            }
        } else if adj > self.max_exponent {
            if d.is_zero() {
                out |= Condition::CLAMPED;
                r = self.max_exponent;
            } else {
                out |= Condition::OVERFLOW;
            }
        }

        d.exponent = r;
        out
    }

    /// Rounds `d` to the context's precision without routing conditions
    /// through the traps.
    pub(crate) fn round_raw(&self, d: &mut Decimal) -> Condition {
        if self.precision == 0 {
            let exp = d.exponent() as i64;
            return self.set_exponent(d, Condition::empty(), &[exp]);
        }
        self.rounding.round(self, d)
    }

    /// Rounds `d` to the context's precision. If the precision is zero, only
    /// the exponent-range rules apply.
    pub fn round(&self, d: &mut Decimal) -> Result<Condition, Error> {
        let res = self.round_raw(d);
        self.check(res)
    }

    /// Parses a number from its string representation, rounding it to the
    /// context's precision.
    pub fn parse<S>(&self, s: S) -> Result<(Decimal, Condition), Error>
    where
        S: AsRef<str>,
    {
        let (coeff, exps) = parse_parts(s.as_ref())?;
        let mut d = Decimal::from_bigint(coeff, 0);
        let mut res = self.set_exponent(&mut d, Condition::empty(), &exps);
        res |= self.round_raw(&mut d);
        let res = self.check(res)?;
        Ok((d, res))
    }

    /// Adds `rhs` to `lhs`, storing the result in `lhs`.
    pub fn add(&self, lhs: &mut Decimal, rhs: &Decimal) -> Result<Condition, Error> {
        let (a, b, s) = upscale(lhs, rhs)?;
        lhs.coeff = a + b;
        lhs.exponent = s;
        self.round(lhs)
    }

    /// Subtracts `rhs` from `lhs`, storing the result in `lhs`.
    pub fn sub(&self, lhs: &mut Decimal, rhs: &Decimal) -> Result<Condition, Error> {
        let (a, b, s) = upscale(lhs, rhs)?;
        lhs.coeff = a - b;
        lhs.exponent = s;
        self.round(lhs)
    }

    /// Replaces `d` with its absolute value.
    pub fn abs(&self, d: &mut Decimal) -> Result<Condition, Error> {
        if d.is_negative() {
            d.negate();
        }
        self.round(d)
    }

    /// Negates `d`.
    pub fn neg(&self, d: &mut Decimal) -> Result<Condition, Error> {
        d.negate();
        self.round(d)
    }

    /// Multiplies `lhs` by `rhs`, storing the result in `lhs`.
    pub fn mul(&self, lhs: &mut Decimal, rhs: &Decimal) -> Result<Condition, Error> {
        let xe = lhs.exponent() as i64;
        let ye = rhs.exponent() as i64;
        lhs.coeff = &lhs.coeff * &rhs.coeff;
        // Handing both exponents to the policy catches joint overflow.
        let mut res = self.set_exponent(lhs, Condition::empty(), &[xe, ye]);
        res |= self.round_raw(lhs);
        self.check(res)
    }

    /// Divides `lhs` by `rhs`, storing the result in `lhs`.
    ///
    /// The context's precision must be nonzero and at most 5000. If an exact
    /// division is required, use a high precision and verify exactness by
    /// checking the `INEXACT` flag on the returned conditions.
    pub fn quo(&self, lhs: &mut Decimal, rhs: &Decimal) -> Result<Condition, Error> {
        // The required number of digits is computed from the precision during
        // the 10**x calculation, so an unlimited context cannot divide.
        if self.precision == 0 || self.precision > QUO_PRECISION_LIMIT {
            return Err(Error::Precision(InvalidPrecisionError));
        }

        if rhs.is_zero() {
            let res = if lhs.is_zero() {
                Condition::DIVISION_UNDEFINED
            } else {
                Condition::DIVISION_BY_ZERO
            };
            return self.check(res);
        }

        let mut adjust: i64 = 0;
        let mut quo = Decimal::zero();
        let mut res = Condition::empty();
        let mut diff: i64 = 0;
        if !lhs.is_zero() {
            let mut dividend = lhs.coeff.abs();
            let mut divisor = rhs.coeff.abs();

            // Scale the operands so the dividend is at least the divisor and
            // less than ten times the divisor.
            while dividend < divisor {
                dividend *= 10;
                adjust += 1;
            }
            loop {
                let next = &divisor * 10;
                if dividend < next {
                    break;
                }
                divisor = next;
                adjust -= 1;
            }

            let prec = self.precision as i64;
            loop {
                while divisor <= dividend {
                    dividend -= &divisor;
                    quo.coeff += 1;
                }
                // Complete when the dividend is exhausted at a nonnegative
                // adjustment, or the quotient has filled the precision.
                if (dividend.is_zero() && adjust >= 0) || quo.num_digits() == prec {
                    break;
                }
                quo.coeff *= 10;
                dividend *= 10;
                adjust += 1;
            }

            // A remaining dividend rounds the quotient, unless the result is
            // headed below the subnormal boundary.
            let adj =
                lhs.exponent() as i64 - rhs.exponent() as i64 - adjust + quo.num_digits() - 1;
            if !dividend.is_zero() && adj >= self.min_exponent as i64 {
                res |= Condition::INEXACT | Condition::ROUNDED;
                dividend *= 2;
                let half = dividend.cmp(&divisor);
                if self.rounding.should_add_one(&quo.coeff, half) {
                    round_add_one(&mut quo.coeff, &mut diff, 1);
                }
            }
        }

        res |= self.set_exponent(
            &mut quo,
            res,
            &[
                lhs.exponent() as i64,
                -(rhs.exponent() as i64),
                -adjust,
                diff,
            ],
        );

        // The sign of the result is the exclusive or of the operand signs.
        if lhs.is_negative() != rhs.is_negative() {
            quo.negate();
        }

        *lhs = quo;
        self.check(res)
    }

    /// Divides `lhs` by `rhs`, storing the truncated integer quotient in
    /// `lhs`. Raises `DIVISION_IMPOSSIBLE` if the quotient needs more digits
    /// than the context's precision.
    pub fn quo_integer(&self, lhs: &mut Decimal, rhs: &Decimal) -> Result<Condition, Error> {
        let mut res = Condition::empty();
        if rhs.is_zero() {
            res |= if lhs.is_zero() {
                Condition::DIVISION_UNDEFINED
            } else {
                Condition::DIVISION_BY_ZERO
            };
            return self.check(res);
        }
        let (a, b, _) = upscale(lhs, rhs)?;
        lhs.coeff = a / b;
        if lhs.num_digits() > self.precision as i64 {
            res |= Condition::DIVISION_IMPOSSIBLE;
        }
        lhs.exponent = 0;
        self.check(res)
    }

    /// Divides `lhs` by `rhs`, storing the remainder in `lhs`. Raises
    /// `DIVISION_IMPOSSIBLE` if the implied integer quotient needs more
    /// digits than the context's precision.
    pub fn rem(&self, lhs: &mut Decimal, rhs: &Decimal) -> Result<Condition, Error> {
        let mut res = Condition::empty();
        if rhs.is_zero() {
            res |= if lhs.is_zero() {
                Condition::DIVISION_UNDEFINED
            } else {
                Condition::INVALID_OPERATION
            };
            return self.check(res);
        }
        let (a, b, s) = upscale(lhs, rhs)?;
        let (q, r) = a.div_rem(&b);
        if table::num_digits(&q) > self.precision as i64 {
            res |= Condition::DIVISION_IMPOSSIBLE;
        }
        lhs.coeff = r;
        lhs.exponent = s;
        res |= self.round_raw(lhs);
        self.check(res)
    }

    /// Rescales `d` without changing its value so that its exponent is
    /// `exp`, rounding the coefficient if digits must be discarded.
    ///
    /// Raises `INVALID_OPERATION` if the result needs more digits than the
    /// context's precision. Quantize never raises `UNDERFLOW`.
    pub fn quantize(&self, d: &mut Decimal, exp: i32) -> Result<Condition, Error> {
        let mut res = self.quantize_raw(d, exp);
        if d.num_digits() > self.precision as i64 {
            res |= Condition::INVALID_OPERATION;
        }
        res |= self.round_raw(d);
        res.remove(Condition::UNDERFLOW);
        self.check(res)
    }

    fn quantize_raw(&self, d: &mut Decimal, exp: i32) -> Condition {
        let diff = exp as i64 - d.exponent() as i64;
        let mut res = Condition::empty();
        if diff < 0 {
            if diff < MIN_EXPONENT as i64 {
                return Condition::SYSTEM_UNDERFLOW | Condition::UNDERFLOW;
            }
            d.coeff = &d.coeff * table::exp10(-diff).as_ref();
        } else if diff > 0 {
            let p = d.num_digits() - diff;
            if p < 0 {
                // Every digit is discarded; the result collapses to zero.
                if !d.is_zero() {
                    d.coeff = BigInt::zero();
                    res = Condition::INEXACT | Condition::ROUNDED;
                }
            } else {
                // Round at exactly the digits that survive, bypassing the
                // zero-precision shortcut.
                let nc = self.with_precision(p as u32);
                res = nc.rounding.round(&nc, d);
                // A digit-count carry (9…9 to 10…0) leaves the exponent one
                // high; fold the ten back into the coefficient.
                let over = d.exponent() as i64 - exp as i64;
                if over > 0 {
                    d.coeff = &d.coeff * table::exp10(over).as_ref();
                }
            }
        }
        d.exponent = exp;
        res
    }

    /// Rounds `d` to an integral value, ignoring and clearing the `INEXACT`
    /// and `ROUNDED` flags.
    pub fn to_integral(&self, d: &mut Decimal) -> Result<Condition, Error> {
        let mut res = self.quantize_raw(d, 0);
        res.remove(Condition::INEXACT | Condition::ROUNDED);
        self.check(res)
    }

    /// Rounds `d` to an integral value, keeping the `INEXACT` and `ROUNDED`
    /// flags the rounding raised.
    pub fn to_integral_exact(&self, d: &mut Decimal) -> Result<Condition, Error> {
        let res = self.quantize_raw(d, 0);
        self.check(res)
    }

    /// Replaces `d` with the smallest integer greater than or equal to it.
    pub fn ceil(&self, d: &mut Decimal) -> Result<Condition, Error> {
        let (integ, frac) = d.modf();
        *d = integ;
        if frac.is_positive() {
            return self.add(d, &crate::constants::ONE);
        }
        Ok(Condition::empty())
    }

    /// Replaces `d` with the largest integer less than or equal to it.
    pub fn floor(&self, d: &mut Decimal) -> Result<Condition, Error> {
        let (integ, frac) = d.modf();
        *d = integ;
        if frac.is_negative() {
            return self.sub(d, &crate::constants::ONE);
        }
        Ok(Condition::empty())
    }

    /// Removes trailing zeros from `d`'s coefficient, then rounds it to the
    /// context's precision.
    pub fn reduce(&self, d: &mut Decimal) -> Result<Condition, Error> {
        d.reduce();
        self.round(d)
    }
}
