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

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::{Product, Sum};
use std::num::IntErrorKind;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

use num_bigint::{BigInt, BigUint, Sign};
use num_integer::Integer;
use num_traits::{ToPrimitive, Zero};

use crate::condition::Condition;
use crate::context::Context;
use crate::error::{Error, ParseDecimalError, TryFromDecimalError};
use crate::table;

/// The largest supported adjusted exponent.
///
/// Operations whose result would carry an adjusted exponent beyond this bound
/// fail with [`Error::ExponentOutOfRange`] regardless of the context's own
/// limits. Exponents near this range perform slowly: scaling a coefficient
/// across the full range requires a 10^n computation of matching size.
pub const MAX_EXPONENT: i32 = 100_000;

/// The smallest supported adjusted exponent, with the same limitations as
/// [`MAX_EXPONENT`].
pub const MIN_EXPONENT: i32 = -MAX_EXPONENT;

/// An arbitrary-precision decimal number.
///
/// The value of a `Decimal` is `coefficient · 10^exponent`. The sign lives on
/// the coefficient; there is no NaN or infinity representation.
///
/// Two decimals with equal value may carry different encodings (`1` versus
/// `1.0`, which is `10·10⁻¹`). Comparison traits compare by numeric value,
/// not by encoding; use [`Decimal::coefficient`] and [`Decimal::exponent`] to
/// observe the encoding itself.
///
/// Most arithmetic lives on [`Context`], which supplies precision, rounding,
/// exponent limits, and traps. The operator impls on `Decimal` itself compute
/// exact, unrounded results and exist for convenience.
#[derive(Clone, Default)]
pub struct Decimal {
    pub(crate) coeff: BigInt,
    pub(crate) exponent: i32,
}

impl Decimal {
    /// Creates a decimal with the given coefficient and exponent.
    pub fn new(coeff: i64, exponent: i32) -> Decimal {
        Decimal {
            coeff: BigInt::from(coeff),
            exponent,
        }
    }

    /// Creates a decimal with the given arbitrary-precision coefficient and
    /// exponent.
    pub fn from_bigint(coeff: BigInt, exponent: i32) -> Decimal {
        Decimal { coeff, exponent }
    }

    /// The decimal representing zero, with a zero exponent.
    pub fn zero() -> Decimal {
        Decimal::default()
    }

    /// Returns a reference to the coefficient.
    pub fn coefficient(&self) -> &BigInt {
        &self.coeff
    }

    /// Replaces the coefficient, leaving the exponent unchanged.
    pub fn set_coefficient(&mut self, coeff: i64) {
        self.coeff = BigInt::from(coeff);
    }

    /// Returns the exponent.
    pub fn exponent(&self) -> i32 {
        self.exponent
    }

    /// Replaces the exponent, leaving the coefficient unchanged.
    ///
    /// This edits the raw encoding. To change the exponent while preserving
    /// the numeric value, use [`Context::quantize`].
    pub fn set_exponent(&mut self, exponent: i32) {
        self.exponent = exponent;
    }

    /// Reports whether the value is zero.
    pub fn is_zero(&self) -> bool {
        self.coeff.is_zero()
    }

    /// Reports whether the value is less than zero.
    pub fn is_negative(&self) -> bool {
        self.coeff.sign() == Sign::Minus
    }

    /// Reports whether the value is greater than zero.
    pub fn is_positive(&self) -> bool {
        self.coeff.sign() == Sign::Plus
    }

    /// Returns the number of base-10 digits in the coefficient. Zero has one
    /// digit.
    pub fn num_digits(&self) -> i64 {
        table::num_digits(&self.coeff)
    }

    /// Negates the value in place without rounding.
    pub(crate) fn negate(&mut self) {
        let coeff = std::mem::take(&mut self.coeff);
        self.coeff = -coeff;
    }

    /// Splits the value into integral and fractional parts such that
    /// `self = integ + frac`.
    ///
    /// The integral part carries a nonnegative exponent and the fractional
    /// part a nonpositive one. Both parts carry the sign of `self` or are
    /// zero.
    pub fn modf(&self) -> (Decimal, Decimal) {
        // No fractional part.
        if self.exponent >= 0 {
            return (self.clone(), Decimal::zero());
        }
        let nd = self.num_digits();
        let exp = -(self.exponent as i64);
        // No integral part: the exponent outweighs the digit count.
        if exp > nd {
            return (Decimal::zero(), self.clone());
        }
        let e = table::exp10(exp);
        let (integ, frac) = self.coeff.div_rem(e.as_ref());
        (
            Decimal::from_bigint(integ, 0),
            Decimal::from_bigint(frac, self.exponent),
        )
    }

    /// Removes trailing zeros from the coefficient, incrementing the exponent
    /// for each factor of ten divided out. Zero collapses to a zero exponent.
    pub fn reduce(&mut self) {
        if self.coeff.is_zero() {
            self.exponent = 0;
            return;
        }
        loop {
            // Machine-word division while the coefficient fits.
            if let Some(mut v) = self.coeff.to_i64() {
                while v % 10 == 0 {
                    v /= 10;
                    self.exponent += 1;
                }
                self.coeff = BigInt::from(v);
                return;
            }
            let (q, r) = self.coeff.div_rem(table::exp10(1).as_ref());
            if !r.is_zero() {
                return;
            }
            self.coeff = q;
            self.exponent += 1;
        }
    }

    /// Renders the value in scientific notation when an exponent is needed.
    ///
    /// This is the [`Display`](fmt::Display) format: plain notation is used
    /// while the adjusted exponent is at least -6 and the exponent is at most
    /// zero; otherwise `D.DDDE±NN`. Zero renders as `0`.
    pub fn to_sci(&self) -> String {
        if self.coeff.is_zero() {
            return "0".into();
        }
        let digits = self.coeff.magnitude().to_string();
        let adj = self.exponent as i64 + digits.len() as i64 - 1;
        let mut s = if self.exponent <= 0 && adj >= -6 {
            if self.exponent < 0 {
                place_decimal_point(&digits, self.exponent)
            } else {
                digits
            }
        } else {
            let dot = if digits.len() > 1 {
                format!(".{}", &digits[1..])
            } else {
                String::new()
            };
            format!("{}{}E{:+}", &digits[..1], dot, adj)
        };
        if self.is_negative() {
            s.insert(0, '-');
        }
        s
    }

    /// Renders the value in standard notation, never using an exponent part.
    ///
    /// Large positive exponents append trailing zeros and large negative
    /// exponents emit leading zeros after the decimal point, so the result
    /// can be long.
    pub fn to_standard_notation_string(&self) -> String {
        let digits = self.coeff.magnitude().to_string();
        let mut s = if self.exponent < 0 {
            place_decimal_point(&digits, self.exponent)
        } else if self.exponent > 0 {
            format!("{}{}", digits, "0".repeat(self.exponent as usize))
        } else {
            digits
        };
        if self.is_negative() {
            s.insert(0, '-');
        }
        s
    }

    /// Returns the value as an `f64`.
    ///
    /// The conversion may lose precision; values outside the `f64` range
    /// produce infinities.
    pub fn to_f64(&self) -> Result<f64, TryFromDecimalError> {
        self.to_sci().parse().map_err(|_| TryFromDecimalError)
    }

    /// Decomposes the value into interchange parts.
    ///
    /// Returns `(form, negative, coefficient, exponent)` where `form` is `0`
    /// (finite; the only form this library produces), `negative` is the sign,
    /// and `coefficient` is the big-endian magnitude written into `buf`. The
    /// buffer is cleared first and may be reused across calls.
    pub fn decompose<'a>(&self, buf: &'a mut Vec<u8>) -> (u8, bool, &'a [u8], i32) {
        buf.clear();
        buf.extend_from_slice(&self.coeff.magnitude().to_bytes_be());
        (0, self.is_negative(), buf.as_slice(), self.exponent)
    }

    /// Composes a value from interchange parts, as produced by
    /// [`Decimal::decompose`].
    ///
    /// Only the finite form (`0`) can be represented; the infinite (`1`) and
    /// NaN (`2`) forms are rejected, as is any unknown form byte.
    pub fn compose(
        form: u8,
        negative: bool,
        coefficient: &[u8],
        exponent: i32,
    ) -> Result<Decimal, TryFromDecimalError> {
        if form != 0 {
            return Err(TryFromDecimalError);
        }
        let mag = BigUint::from_bytes_be(coefficient);
        let sign = if mag.is_zero() {
            Sign::NoSign
        } else if negative {
            Sign::Minus
        } else {
            Sign::Plus
        };
        Ok(Decimal {
            coeff: BigInt::from_biguint(sign, mag),
            exponent,
        })
    }
}

/// Inserts the decimal point into an unsigned digit string with the given
/// negative exponent, adding leading zeros as needed.
fn place_decimal_point(digits: &str, exponent: i32) -> String {
    let left = -(exponent as i64) - digits.len() as i64;
    if left > 0 {
        format!("0.{}{}", "0".repeat(left as usize), digits)
    } else if left < 0 {
        let offset = (-left) as usize;
        format!("{}.{}", &digits[..offset], &digits[offset..])
    } else {
        format!("0.{digits}")
    }
}

/// Splits a decimal string into its coefficient and the exponent
/// contributions of the exponent field and the decimal point.
pub(crate) fn parse_parts(s: &str) -> Result<(BigInt, Vec<i64>), ParseDecimalError> {
    let mut exps = Vec::with_capacity(2);
    let (mantissa, exp_str) = match s.find(['e', 'E']) {
        Some(i) => (&s[..i], Some(&s[i + 1..])),
        None => (s, None),
    };
    if let Some(exp_str) = exp_str {
        let exp = exp_str.parse::<i32>().map_err(|e| match e.kind() {
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
                ParseDecimalError::exponent_out_of_range()
            }
            _ => ParseDecimalError::syntax(),
        })?;
        exps.push(exp as i64);
    }
    let coeff_str: Cow<str> = match mantissa.find('.') {
        Some(i) => {
            exps.push(-((mantissa.len() - i - 1) as i64));
            let mut owned = String::with_capacity(mantissa.len() - 1);
            owned.push_str(&mantissa[..i]);
            owned.push_str(&mantissa[i + 1..]);
            Cow::Owned(owned)
        }
        None => Cow::Borrowed(mantissa),
    };
    let coeff = BigInt::from_str(&coeff_str).map_err(|_| ParseDecimalError::syntax())?;
    Ok((coeff, exps))
}

/// Aligns `a` and `b` to a shared exponent by scaling the coefficient with
/// the larger exponent, returning the scaled coefficients and the shared
/// exponent. Fails if the exponent difference escapes the system range.
pub(crate) fn upscale(a: &Decimal, b: &Decimal) -> Result<(BigInt, BigInt, i32), Error> {
    if a.exponent == b.exponent {
        return Ok((a.coeff.clone(), b.coeff.clone(), a.exponent));
    }
    let swapped = a.exponent < b.exponent;
    let (hi, lo) = if swapped { (b, a) } else { (a, b) };
    let s = hi.exponent as i64 - lo.exponent as i64;
    if s > MAX_EXPONENT as i64 {
        return Err(Error::ExponentOutOfRange);
    }
    let scaled = &hi.coeff * table::exp10(s).as_ref();
    let (x, y) = if swapped {
        (lo.coeff.clone(), scaled)
    } else {
        (scaled, lo.coeff.clone())
    };
    Ok((x, y, lo.exponent))
}

impl fmt::Debug for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if f.alternate() {
            f.write_str(&self.to_standard_notation_string())
        } else {
            f.write_str(&self.to_sci())
        }
    }
}

impl FromStr for Decimal {
    type Err = ParseDecimalError;

    fn from_str(s: &str) -> Result<Decimal, ParseDecimalError> {
        let (coeff, exps) = parse_parts(s)?;
        let mut d = Decimal::from_bigint(coeff, 0);
        // The default context imposes no precision, only the system exponent
        // range.
        let cx = Context::default();
        let res = cx.set_exponent(&mut d, Condition::empty(), &exps);
        match res.check(cx.traps) {
            Ok(_) => Ok(d),
            Err(_) => Err(ParseDecimalError::exponent_out_of_range()),
        }
    }
}

impl PartialEq for Decimal {
    fn eq(&self, other: &Decimal) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Decimal {}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Decimal) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Decimal {
    fn cmp(&self, other: &Decimal) -> Ordering {
        // First compare signs.
        let ds = self.coeff.sign();
        let xs = other.coeff.sign();
        match ds.cmp(&xs) {
            Ordering::Equal => {}
            ord => return ord,
        }
        if ds == Sign::NoSign {
            return Ordering::Equal;
        }

        // Next compare adjusted exponents: the larger adjusted exponent has
        // the larger magnitude, inverted for negative values.
        let dn = self.num_digits() + self.exponent as i64;
        let xn = other.num_digits() + other.exponent as i64;
        match dn.cmp(&xn) {
            Ordering::Equal => {}
            ord => {
                return if ds == Sign::Minus { ord.reverse() } else { ord };
            }
        }

        // Finally align the coefficients and compare exactly.
        let diff = (self.exponent as i64 - other.exponent as i64).abs();
        let e = table::exp10(diff);
        match self.exponent.cmp(&other.exponent) {
            Ordering::Greater => (&self.coeff * e.as_ref()).cmp(&other.coeff),
            Ordering::Less => self.coeff.cmp(&(&other.coeff * e.as_ref())),
            Ordering::Equal => self.coeff.cmp(&other.coeff),
        }
    }
}

impl Hash for Decimal {
    fn hash<H>(&self, state: &mut H)
    where
        H: Hasher,
    {
        // Hash the reduced encoding so equal values hash equally.
        let mut d = self.clone();
        d.reduce();
        d.coeff.hash(state);
        d.exponent.hash(state);
    }
}

macro_rules! impl_from_int {
    ($($t:ty),* $(,)?) => {
        $(
            impl From<$t> for Decimal {
                fn from(n: $t) -> Decimal {
                    Decimal::from_bigint(BigInt::from(n), 0)
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, i128, u8, u16, u32, u64, u128);

impl TryFrom<f64> for Decimal {
    type Error = TryFromDecimalError;

    /// Converts an `f64` to the decimal holding its shortest round-tripping
    /// representation. Non-finite floats are rejected.
    fn try_from(n: f64) -> Result<Decimal, TryFromDecimalError> {
        if !n.is_finite() {
            return Err(TryFromDecimalError);
        }
        format!("{n:e}").parse().map_err(|_| TryFromDecimalError)
    }
}

impl TryFrom<&Decimal> for i64 {
    type Error = TryFromDecimalError;

    /// Converts a decimal to an `i64` if it has no fractional part and fits.
    fn try_from(d: &Decimal) -> Result<i64, TryFromDecimalError> {
        let (integ, frac) = d.modf();
        if !frac.is_zero() {
            return Err(TryFromDecimalError);
        }
        let mut v = integ.coeff.to_i64().ok_or(TryFromDecimalError)?;
        for _ in 0..integ.exponent {
            v = v.checked_mul(10).ok_or(TryFromDecimalError)?;
        }
        Ok(v)
    }
}

impl TryFrom<Decimal> for i64 {
    type Error = TryFromDecimalError;

    fn try_from(d: Decimal) -> Result<i64, TryFromDecimalError> {
        i64::try_from(&d)
    }
}

fn exact_op(
    op: impl FnOnce(&Context) -> Result<Condition, Error>,
) {
    let cx = Context::default();
    op(&cx).expect("exponent out of range");
}

impl Neg for Decimal {
    type Output = Decimal;

    fn neg(mut self) -> Decimal {
        self.negate();
        self
    }
}

impl Neg for &Decimal {
    type Output = Decimal;

    fn neg(self) -> Decimal {
        let mut d = self.clone();
        d.negate();
        d
    }
}

impl Add for Decimal {
    type Output = Decimal;

    /// Computes the exact, unrounded sum.
    ///
    /// Panics if the result's exponent leaves the system range; use
    /// [`Context::add`] to handle that case as an error.
    fn add(mut self, rhs: Decimal) -> Decimal {
        exact_op(|cx| cx.add(&mut self, &rhs));
        self
    }
}

impl Add<&Decimal> for Decimal {
    type Output = Decimal;

    fn add(mut self, rhs: &Decimal) -> Decimal {
        exact_op(|cx| cx.add(&mut self, rhs));
        self
    }
}

impl AddAssign for Decimal {
    fn add_assign(&mut self, rhs: Decimal) {
        exact_op(|cx| cx.add(self, &rhs));
    }
}

impl Sub for Decimal {
    type Output = Decimal;

    /// Computes the exact, unrounded difference.
    ///
    /// Panics if the result's exponent leaves the system range; use
    /// [`Context::sub`] to handle that case as an error.
    fn sub(mut self, rhs: Decimal) -> Decimal {
        exact_op(|cx| cx.sub(&mut self, &rhs));
        self
    }
}

impl Sub<&Decimal> for Decimal {
    type Output = Decimal;

    fn sub(mut self, rhs: &Decimal) -> Decimal {
        exact_op(|cx| cx.sub(&mut self, rhs));
        self
    }
}

impl SubAssign for Decimal {
    fn sub_assign(&mut self, rhs: Decimal) {
        exact_op(|cx| cx.sub(self, &rhs));
    }
}

impl Mul for Decimal {
    type Output = Decimal;

    /// Computes the exact, unrounded product.
    ///
    /// Panics if the result's exponent leaves the system range; use
    /// [`Context::mul`] to handle that case as an error.
    fn mul(mut self, rhs: Decimal) -> Decimal {
        exact_op(|cx| cx.mul(&mut self, &rhs));
        self
    }
}

impl Mul<&Decimal> for Decimal {
    type Output = Decimal;

    fn mul(mut self, rhs: &Decimal) -> Decimal {
        exact_op(|cx| cx.mul(&mut self, rhs));
        self
    }
}

impl MulAssign for Decimal {
    fn mul_assign(&mut self, rhs: Decimal) {
        exact_op(|cx| cx.mul(self, &rhs));
    }
}

impl Sum for Decimal {
    fn sum<I>(iter: I) -> Decimal
    where
        I: Iterator<Item = Decimal>,
    {
        iter.fold(Decimal::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Decimal> for Decimal {
    fn sum<I>(iter: I) -> Decimal
    where
        I: Iterator<Item = &'a Decimal>,
    {
        iter.fold(Decimal::zero(), Add::add)
    }
}

impl Product for Decimal {
    fn product<I>(iter: I) -> Decimal
    where
        I: Iterator<Item = Decimal>,
    {
        iter.fold(Decimal::new(1, 0), Mul::mul)
    }
}

impl<'a> Product<&'a Decimal> for Decimal {
    fn product<I>(iter: I) -> Decimal
    where
        I: Iterator<Item = &'a Decimal>,
    {
        iter.fold(Decimal::new(1, 0), Mul::mul)
    }
}

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
impl serde::Serialize for Decimal {
    /// Serializes the decimal as its scientific-notation string.
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_sci())
    }
}

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
impl<'de> serde::Deserialize<'de> for Decimal {
    fn deserialize<D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct DecimalVisitor;

        impl serde::de::Visitor<'_> for DecimalVisitor {
            type Value = Decimal;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a decimal number string")
            }

            fn visit_str<E>(self, v: &str) -> Result<Decimal, E>
            where
                E: serde::de::Error,
            {
                v.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_str(DecimalVisitor)
    }
}
