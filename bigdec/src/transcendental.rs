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

//! The iterative operations: roots, logarithms, exponentials, and powers.
//!
//! Each routine works in a private context with elevated precision, then
//! rounds the finished value down to the caller's precision.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{Signed, Zero};

use crate::accumulator::Accumulator;
use crate::condition::Condition;
use crate::constants;
use crate::context::Context;
use crate::decimal::Decimal;
use crate::error::{Error, InvalidPrecisionError};
use crate::iteration::Loop;
use crate::round::Rounding;
use crate::table;

impl Context {
    /// Replaces `d` with its square root.
    ///
    /// The square root of a negative number raises `INVALID_OPERATION`.
    pub fn sqrt(&self, d: &mut Decimal) -> Result<Condition, Error> {
        // See: Properly Rounded Variable Precision Square Root by T. E. Hull
        // and A. Abrham, ACM Transactions on Mathematical Software, Vol 11
        // #3, pp 229-237, ACM, September 1985.
        if d.is_negative() {
            return self.check(Condition::INVALID_OPERATION);
        }
        if d.is_zero() {
            *d = Decimal::zero();
            return Ok(Condition::empty());
        }

        // Normalize d = f * 10^e with f in [0.1, 1) and e even.
        let x = d.clone();
        let nd = x.num_digits();
        let mut e = nd + x.exponent() as i64;
        let mut f = x.clone();
        f.set_exponent(-nd as i32);

        let mut ed = Accumulator::new(self.with_precision(self.precision));
        let mut approx = Decimal::zero();
        if e % 2 == 0 {
            // approx := 0.259 + 0.819 * f
            approx.clone_from(&Decimal::new(819, -3));
            ed.mul(&mut approx, &f);
            ed.add(&mut approx, &Decimal::new(259, -3));
        } else {
            // Shift one digit to make e even; the estimate constants shift
            // with it.
            f.set_exponent(f.exponent() - 1);
            e += 1;
            approx.clone_from(&Decimal::new(259, -2));
            ed.mul(&mut approx, &f);
            ed.add(&mut approx, &Decimal::new(819, -4));
        }

        // Newton's iteration, doubling the working precision each round
        // until it covers the target plus guard digits.
        let mut p: u32 = 3;
        let maxp = self.precision + 7;
        let mut tmp = Decimal::zero();
        while p != maxp {
            p = 2 * p - 2;
            if p > maxp {
                p = maxp;
            }
            ed.cx.precision = p;
            // approx = 0.5 * (approx + f / approx)
            tmp.clone_from(&f);
            ed.quo(&mut tmp, &approx);
            ed.add(&mut tmp, &approx);
            approx.clone_from(&tmp);
            ed.mul(&mut approx, &constants::HALF);
        }

        // Correct the estimate by one ulp if squaring it under directed
        // rounding brackets f on the wrong side.
        ed.cx.precision = self.precision;
        let dp = self.precision as i32;
        let mut approx_sub_half = approx.clone();
        ed.sub(&mut approx_sub_half, &Decimal::new(5, -1 - dp));
        ed.cx.rounding = Rounding::Up;
        let t = approx_sub_half.clone();
        ed.mul(&mut approx_sub_half, &t);
        if approx_sub_half > f {
            ed.sub(&mut approx, &Decimal::new(1, -dp));
        } else {
            let mut approx_add_half = approx.clone();
            ed.add(&mut approx_add_half, &Decimal::new(5, -1 - dp));
            ed.cx.rounding = Rounding::Down;
            let t = approx_add_half.clone();
            ed.mul(&mut approx_add_half, &t);
            if approx_add_half < f {
                ed.add(&mut approx, &Decimal::new(1, -dp));
            }
        }

        ed.result()?;

        *d = approx;
        d.set_exponent(d.exponent() + (e / 2) as i32);
        let mut nc = self.with_precision(self.precision);
        nc.rounding = Rounding::HalfEven;
        nc.round(d)
    }

    /// Replaces `d` with its cube root.
    ///
    /// The cube root of a negative number raises `INVALID_OPERATION`.
    pub fn cbrt(&self, d: &mut Decimal) -> Result<Condition, Error> {
        // Newton-Raphson from an initial polynomial estimate, after reducing
        // the operand into [1/8, 1] by factors of eight; see Turkowski,
        // Computing the Cube Root.
        if d.is_negative() {
            return self.check(Condition::INVALID_OPERATION);
        }
        if d.is_zero() {
            *d = Decimal::zero();
            return Ok(Condition::empty());
        }

        let x = d.clone();
        let mut z = x.clone();
        let nc = Context::default().with_precision(self.precision * 2 + 2);
        let mut ed = Accumulator::new(nc);

        let mut exp8: i64 = 0;
        while z < *constants::ONE_EIGHTH {
            exp8 -= 1;
            ed.mul(&mut z, &constants::EIGHT);
            ed.result()?;
        }
        while z > *constants::ONE {
            exp8 += 1;
            ed.mul(&mut z, &constants::ONE_EIGHTH);
            ed.result()?;
        }

        // Initial estimate: (C1 * z + C2) * z + C3. Its accuracy only
        // affects iteration count, not correctness.
        let z0 = z.clone();
        ed.mul(&mut z, &constants::CBRT_C1);
        ed.add(&mut z, &constants::CBRT_C2);
        ed.mul(&mut z, &z0);
        ed.add(&mut z, &constants::CBRT_C3);

        // Unwind the scaling: cbrt(8) == 2.
        while exp8 < 0 {
            ed.mul(&mut z, &constants::HALF);
            exp8 += 1;
        }
        while exp8 > 0 {
            ed.mul(&mut z, &constants::TWO);
            exp8 -= 1;
        }

        let mut z0 = z.clone();
        let loop_cx = ed.cx;
        let mut lp = Loop::new(&loop_cx, "cbrt", 1);
        loop {
            // z = (2 * z0 + x / z0^2) / 3
            z.clone_from(&z0);
            ed.mul(&mut z, &z0);
            let sq = z.clone();
            z.clone_from(&x);
            ed.quo(&mut z, &sq);
            ed.add(&mut z, &z0);
            ed.add(&mut z, &z0);
            ed.quo(&mut z, &constants::THREE);

            ed.result()?;
            if lp.done(&z)? {
                break;
            }
            z0.clone_from(&z);
        }

        ed.result()?;
        *d = z;
        self.round(d)
    }

    /// Replaces `d` with its natural logarithm.
    ///
    /// Nonpositive arguments raise `INVALID_OPERATION`. The result carries
    /// `INEXACT` except for the exact case `ln(1) == 0`, and may be off by
    /// one ulp for arguments very near 1.
    pub fn ln(&self, d: &mut Decimal) -> Result<Condition, Error> {
        if !d.is_positive() {
            return self.check(Condition::INVALID_OPERATION);
        }
        if *d == *constants::ONE {
            *d = Decimal::zero();
            return Ok(Condition::empty());
        }

        let x = d.clone();

        // Guard digits found experimentally; some inputs may still round
        // wrong in the last place.
        let mut p = self.precision.max(7);
        p = p.max(x.num_digits() as u32) + 2 + 5;
        let mut nc = self.with_precision(p);
        nc.rounding = Rounding::HalfEven;
        let mut ed = Accumulator::new(nc);

        // Reduce x = z * 10^k with z in [0.1, 1); ln(x) = ln(z) + k ln(10).
        let mut z = x.clone();
        let k = z.num_digits() + z.exponent() as i64;
        z.set_exponent(-(z.num_digits() as i32));

        // Square-root until z is within 0.1 of 1, so the series converges in
        // a few terms; each root doubles the factor to undo afterwards.
        let tenth = Decimal::new(1, -1);
        let mut fact = Decimal::new(1, 0);
        loop {
            let mut dist = z.clone();
            ed.sub(&mut dist, &constants::ONE);
            if dist.is_negative() {
                dist.negate();
            }
            ed.result()?;
            if dist <= tenth {
                break;
            }
            ed.sqrt(&mut z);
            ed.mul(&mut fact, &constants::TWO);
            ed.result()?;
        }

        // ln(z) = 2 atanh(u) = 2 (u + u^3/3 + u^5/5 + ...), u = (z-1)/(z+1).
        let mut u = z.clone();
        ed.sub(&mut u, &constants::ONE);
        let mut v = z.clone();
        ed.add(&mut v, &constants::ONE);
        ed.quo(&mut u, &v);
        let mut usq = u.clone();
        let uc = u.clone();
        ed.mul(&mut usq, &uc);

        let mut sum = u.clone();
        let mut term = u;
        let threshold = Decimal::new(1, -(p as i32));
        let max_terms = 10 + 2 * p as u64;
        let mut terms: u64 = 0;
        let mut n: i64 = 1;
        loop {
            ed.mul(&mut term, &usq);
            n += 2;
            let mut elem = term.clone();
            ed.quo(&mut elem, &Decimal::new(n, 0));
            ed.add(&mut sum, &elem);
            ed.result()?;
            if elem.is_negative() {
                elem.negate();
            }
            if elem <= threshold {
                break;
            }
            terms += 1;
            if terms == max_terms {
                return Err(Error::NonConvergence {
                    op: "ln",
                    iterations: max_terms,
                });
            }
        }

        // Undo the square roots, then add back the exponent reduction.
        ed.mul(&mut sum, &constants::TWO);
        ed.mul(&mut sum, &fact);
        if k != 0 {
            // The ln(10) constant is long enough to brush the subnormal
            // check on narrow contexts.
            ed.cx.traps.remove(Condition::SUBNORMAL);
            let mut kd = Decimal::new(k, 0);
            ed.mul(&mut kd, &constants::LN10);
            ed.add(&mut sum, &kd);
        }
        ed.result()?;

        *d = sum;
        let mut res = self.round_raw(d);
        res |= Condition::INEXACT;
        self.check(res)
    }

    /// Replaces `d` with its base-10 logarithm.
    ///
    /// Computed as `ln(d)` at elevated precision times the tabled
    /// `1/ln(10)`. Nonpositive arguments raise `INVALID_OPERATION`.
    pub fn log10(&self, d: &mut Decimal) -> Result<Condition, Error> {
        if !d.is_positive() {
            return self.check(Condition::INVALID_OPERATION);
        }
        if *d == *constants::ONE {
            *d = Decimal::zero();
            return Ok(Condition::empty());
        }

        let res = Condition::INEXACT;

        let p = self.precision.max(d.num_digits() as u32 + 6) + 3;
        let mut nc = Context::default().with_precision(p);
        nc.rounding = Rounding::HalfEven;
        nc.ln(d)?;
        nc.precision = self.precision;
        let qr = nc.mul(d, &constants::INV_LN10)?;
        self.check(res | qr)
    }

    /// Replaces `d` with *e* raised to the power of `d`.
    ///
    /// The context's precision must be nonzero. Arguments whose magnitude
    /// exceeds `23 * precision` overflow directly (underflow when negative).
    pub fn exp(&self, d: &mut Decimal) -> Result<Condition, Error> {
        // See: Variable Precision Exponential Function, T. E. Hull and
        // A. Abrham, ACM Transactions on Mathematical Software, Vol 12 #2,
        // pp 79-91, ACM, June 1986.
        if d.is_zero() {
            *d = constants::ONE.clone();
            return Ok(Condition::empty());
        }
        if self.precision == 0 {
            return Err(Error::Precision(InvalidPrecisionError));
        }

        let x = d.clone();
        let mut nc = self.with_precision(self.precision);
        nc.rounding = Rounding::HalfEven;
        let mut res = Condition::INEXACT | Condition::ROUNDED;

        let cp = self.precision as i64;
        let mut ax = x.clone();
        if ax.is_negative() {
            ax.negate();
        }
        if ax > Decimal::new(cp * 23, 0) {
            res |= Condition::OVERFLOW;
            if x.is_negative() {
                res = res.negate_overflow_flags();
            }
            return self.check(res);
        }
        // Arguments at most 0.9 * 10^-precision collapse to exactly 1.
        if ax <= Decimal::new(9, (-cp - 1) as i32) {
            *d = constants::ONE.clone();
            return self.check(res);
        }

        // Split x = r * 10^t with |r| < 1.
        let mut t = x.exponent() as i64 + x.num_digits();
        if t < 0 {
            t = 0;
        }
        let k = Decimal::new(1, t as i32);
        let mut r = x.clone();
        nc.quo(&mut r, &k)?;
        let mut ra = r.clone();
        if ra.is_negative() {
            ra.negate();
        }
        let p = cp + t + 2;

        // Iteration count for the Taylor series, from the paper.
        let rf = ra.to_f64().map_err(Error::Conversion)?;
        let pf = p as f64;
        let nf = ((1.435 * pf - 1.182) / (pf / rf).log10()).ceil();
        if !nf.is_finite() || nf > 1000.0 {
            return Err(Error::NonConvergence {
                op: "exp",
                iterations: 1000,
            });
        }
        let n = nf as i64;

        // sum = 1 + r/1 (1 + r/2 (1 + ... (1 + r/(n-1))))
        nc.precision = p as u32;
        let mut ed = Accumulator::new(nc);
        let mut sum = Decimal::new(1, 0);
        let mut term = Decimal::zero();
        let mut idx = Decimal::zero();
        for i in (1..n).rev() {
            idx.set_coefficient(i);
            term.clone_from(&r);
            ed.quo(&mut term, &idx);
            ed.mul(&mut sum, &term);
            ed.add(&mut sum, &constants::ONE);
        }
        ed.result()?;

        // e^x = sum^(10^t).
        let ki = table::exp10(t);
        *d = sum;
        let pc = ed.cx;
        pc.integer_power(d, ki.as_ref())?;
        let mut fc = pc;
        fc.precision = self.precision;
        res |= fc.round_raw(d);
        self.check(res)
    }

    /// Replaces `d` with `d` raised to the integer power `y`, by binary
    /// exponentiation.
    ///
    /// A negative `y` computes `d**|y|` and then takes the reciprocal at a
    /// precision wide enough to keep terminating reciprocals exact; an
    /// overflow on the way converts into an underflow.
    pub(crate) fn integer_power(&self, d: &mut Decimal, y: &BigInt) -> Result<Condition, Error> {
        let neg = y.is_negative();
        let mut b = y.abs();

        let mut n = d.clone();
        let mut z = constants::ONE.clone();
        let mut ed = Accumulator::new(*self);
        while !b.is_zero() {
            if b.is_odd() {
                ed.mul(&mut z, &n);
            }
            b >>= 1u32;
            let sq = n.clone();
            ed.mul(&mut n, &sq);
            if let Some(e) = ed.error() {
                let e = if neg {
                    match e {
                        Error::Trapped(c) => Error::Trapped(c.negate_overflow_flags()),
                        other => other,
                    }
                } else {
                    e
                };
                return Err(e);
            }
        }

        if neg {
            let exp_mag = z.exponent().unsigned_abs();
            let qp = (z.num_digits() as u32 + exp_mag) * 2;
            let qc = self.with_precision(qp);
            let mut ed2 = Accumulator::new(qc);
            let mut inv = constants::ONE.clone();
            ed2.quo(&mut inv, &z);
            z = inv;
            ed.flags |= ed2.flags;
            if let Some(e) = ed2.error() {
                return Err(e);
            }
        }

        *d = z;
        ed.result()
    }

    /// Replaces `d` with `d` raised to the power of `y`.
    ///
    /// A negative base with a non-integral exponent raises
    /// `INVALID_OPERATION`. The result carries `INEXACT` when `y` is not an
    /// integer.
    pub fn pow(&self, d: &mut Decimal, y: &Decimal) -> Result<Condition, Error> {
        // x ** 1 == x and 1 ** y == 1: round the operand through unchanged.
        if *y == *constants::ONE || *d == *constants::ONE {
            return self.round(d);
        }

        let x = d.clone();

        if x.is_zero() {
            return if y.is_zero() {
                *d = constants::ONE.clone();
                Ok(Condition::empty())
            } else if y.is_positive() {
                *d = Decimal::zero();
                Ok(Condition::empty())
            } else {
                self.check(Condition::INVALID_OPERATION)
            };
        }
        if y.is_zero() {
            *d = constants::ONE.clone();
            return Ok(Condition::empty());
        }

        let (yinteg, yfrac) = y.modf();
        let y_is_int = yfrac.is_zero();
        if x.is_negative() && !y_is_int {
            return self.check(Condition::INVALID_OPERATION);
        }

        let p = self.precision.max(x.num_digits() as u32 + 6) + 4;

        if y_is_int {
            // Whole-number exponents of moderate size go through binary
            // exponentiation, which keeps exactly-representable powers
            // exact.
            let ybig = yinteg.coefficient() * table::exp10(yinteg.exponent() as i64).as_ref();
            if ybig.bits() <= 32 {
                let mut nc = Context::default().with_precision(p);
                nc.rounding = Rounding::HalfEven;
                let pres = nc.integer_power(d, &ybig)?;
                let res = pres | self.round_raw(d);
                return self.check(res);
            }
        }

        // General case: x**y = exp(y * ln(|x|)), negated when a negative
        // base is raised to an odd integer.
        let nc = Context::default().with_precision(p);
        let mut ed = Accumulator::new(nc);
        let mut t = x.clone();
        ed.abs(&mut t);
        ed.ln(&mut t);
        ed.mul(&mut t, y);
        ed.exp(&mut t);
        if x.is_negative() && yinteg.coefficient().is_odd() && yinteg.exponent() == 0 {
            ed.neg(&mut t);
        }
        ed.result()?;

        *d = t;
        let mut res = self.round_raw(d);
        if !y_is_int {
            res |= Condition::INEXACT;
        }
        self.check(res)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Condition, Context, Decimal, Error, Rounding};

    fn parse(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn ctx(p: u32) -> Context {
        let mut cx = Context::default().with_precision(p);
        cx.rounding = Rounding::HalfEven;
        cx
    }

    #[test]
    fn test_sqrt() {
        // Irrational roots fill the full precision, so their strings are
        // exact; perfect squares are compared by value.
        for (p, x, expect) in [
            (10, "2", "1.414213562"),
            (16, "2", "1.414213562373095"),
            (10, "3", "1.732050808"),
        ] {
            let cx = ctx(p);
            let mut d = parse(x);
            cx.sqrt(&mut d).unwrap();
            assert_eq!(d.to_string(), expect, "sqrt({x}) @ {p}");
        }
        for (p, x, expect) in [
            (10, "4", "2"),
            (5, "0.09", "0.3"),
            (5, "100", "10"),
            (10, "1e4", "100"),
        ] {
            let cx = ctx(p);
            let mut d = parse(x);
            cx.sqrt(&mut d).unwrap();
            assert_eq!(d, parse(expect), "sqrt({x}) @ {p}");
        }
        let cx = ctx(10);
        let mut d = parse("0");
        assert_eq!(cx.sqrt(&mut d), Ok(Condition::empty()));
        assert_eq!(d.to_string(), "0");
        let mut d = parse("-1");
        assert_eq!(
            cx.sqrt(&mut d),
            Err(Error::Trapped(Condition::INVALID_OPERATION))
        );
    }

    #[test]
    fn test_sqrt_inexact_flag() {
        let cx = ctx(10);
        let mut d = parse("2");
        let res = cx.sqrt(&mut d).unwrap();
        assert!(res.inexact());
    }

    #[test]
    fn test_cbrt() {
        let cx = ctx(10);
        let mut d = parse("2");
        cx.cbrt(&mut d).unwrap();
        assert_eq!(d.to_string(), "1.259921050");
        for (p, x, expect) in [(10, "8", "2"), (10, "27", "3"), (5, "0.001", "0.1")] {
            let cx = ctx(p);
            let mut d = parse(x);
            cx.cbrt(&mut d).unwrap();
            assert_eq!(d, parse(expect), "cbrt({x}) @ {p}");
        }
        let cx = ctx(10);
        let mut d = parse("-8");
        assert_eq!(
            cx.cbrt(&mut d),
            Err(Error::Trapped(Condition::INVALID_OPERATION))
        );
    }

    #[test]
    fn test_ln() {
        for (p, x, expect) in [
            (10, "2", "0.6931471806"),
            (10, "10", "2.302585093"),
            (10, "100", "4.605170186"),
            (10, "0.5", "-0.6931471806"),
            (10, "0.1", "-2.302585093"),
        ] {
            let cx = ctx(p);
            let mut d = parse(x);
            let res = cx.ln(&mut d).unwrap();
            assert_eq!(d.to_string(), expect, "ln({x}) @ {p}");
            assert!(res.inexact(), "ln({x})");
        }
        let cx = ctx(10);
        let mut d = parse("1");
        let res = cx.ln(&mut d).unwrap();
        assert_eq!(d.to_string(), "0");
        assert!(!res.inexact());
        for bad in ["0", "-1"] {
            let mut d = parse(bad);
            assert_eq!(
                cx.ln(&mut d),
                Err(Error::Trapped(Condition::INVALID_OPERATION))
            );
        }
    }

    #[test]
    fn test_log10() {
        for (p, x, expect) in [
            (10, "100", "2.000000000"),
            (10, "2", "0.3010299957"),
            (5, "1000", "3.0000"),
            (10, "0.01", "-2.000000000"),
        ] {
            let cx = ctx(p);
            let mut d = parse(x);
            cx.log10(&mut d).unwrap();
            assert_eq!(d.to_string(), expect, "log10({x}) @ {p}");
        }
    }

    #[test]
    fn test_exp() {
        for (p, x, expect) in [
            (10, "1", "2.718281828"),
            (10, "2", "7.389056099"),
            (10, "-1", "0.3678794412"),
            (5, "10", "22026"),
        ] {
            let cx = ctx(p);
            let mut d = parse(x);
            let res = cx.exp(&mut d).unwrap();
            assert_eq!(d.to_string(), expect, "exp({x}) @ {p}");
            assert!(res.inexact(), "exp({x})");
        }
        let cx = ctx(10);
        let mut d = parse("0");
        let res = cx.exp(&mut d).unwrap();
        assert_eq!(d.to_string(), "1");
        assert!(!res.inexact());
    }

    #[test]
    fn test_exp_overflow() {
        let mut cx = ctx(5);
        cx.traps = Condition::empty();
        let mut d = parse("200");
        let res = cx.exp(&mut d).unwrap();
        assert!(res.overflow());
        let mut d = parse("-200");
        let res = cx.exp(&mut d).unwrap();
        assert!(res.underflow());
        assert!(!res.overflow());
    }

    #[test]
    fn test_pow() {
        for (p, x, y, expect) in [
            (5, "2", "10", "1024"),
            (5, "2", "-2", "0.25"),
            (10, "2", "0.5", "1.414213562"),
            (10, "-2", "3", "-8"),
            (10, "-2", "2", "4"),
            (5, "9", "0.5", "3.0000"),
            (5, "10", "3", "1000"),
        ] {
            let cx = ctx(p);
            let mut d = parse(x);
            cx.pow(&mut d, &parse(y)).unwrap();
            assert_eq!(d.to_string(), expect, "{x} ** {y} @ {p}");
        }
    }

    #[test]
    fn test_pow_shortcuts() {
        let cx = ctx(10);
        let mut d = parse("7.5");
        let res = cx.pow(&mut d, &parse("1")).unwrap();
        assert_eq!(d.to_string(), "7.5");
        assert!(!res.inexact());

        let mut d = parse("1");
        cx.pow(&mut d, &parse("123.456")).unwrap();
        assert_eq!(d.to_string(), "1");

        let mut d = parse("5");
        cx.pow(&mut d, &parse("0")).unwrap();
        assert_eq!(d.to_string(), "1");

        let mut d = parse("0");
        cx.pow(&mut d, &parse("3")).unwrap();
        assert_eq!(d.to_string(), "0");

        let mut d = parse("0");
        cx.pow(&mut d, &parse("0")).unwrap();
        assert_eq!(d.to_string(), "1");

        let mut d = parse("0");
        assert_eq!(
            cx.pow(&mut d, &parse("-1")),
            Err(Error::Trapped(Condition::INVALID_OPERATION))
        );

        let mut d = parse("-2");
        assert_eq!(
            cx.pow(&mut d, &parse("0.5")),
            Err(Error::Trapped(Condition::INVALID_OPERATION))
        );
    }

    #[test]
    fn test_pow_integer_is_exact() {
        let cx = ctx(5);
        let mut d = parse("2");
        let res = cx.pow(&mut d, &parse("10")).unwrap();
        assert_eq!(d.to_string(), "1024");
        assert!(!res.inexact());
    }

    #[test]
    fn test_pow_non_integer_sets_inexact() {
        let cx = ctx(10);
        let mut d = parse("2");
        let res = cx.pow(&mut d, &parse("0.5")).unwrap();
        assert!(res.inexact());
    }
}
