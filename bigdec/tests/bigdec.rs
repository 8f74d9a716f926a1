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

use std::error::Error as StdError;

use rand::Rng;

use bigdec::{Condition, Context, Decimal, Error, Rounding};

fn parse(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn ctx(p: u32, rounding: Rounding) -> Context {
    let mut cx = Context::default().with_precision(p);
    cx.rounding = rounding;
    cx
}

#[test]
fn test_parse_and_quantize() -> Result<(), Box<dyn StdError>> {
    let cx = ctx(5, Rounding::HalfEven);
    let (mut d, _) = cx.parse("1.23456")?;
    let res = cx.quantize(&mut d, -2)?;
    assert_eq!(d.to_string(), "1.23");
    assert!(res.inexact());
    assert!(res.rounded());
    Ok(())
}

#[test]
fn test_add_mixed_notation() -> Result<(), Box<dyn StdError>> {
    let cx = ctx(10, Rounding::HalfUp);
    let mut d = Decimal::new(1, 0);
    let res = cx.add(&mut d, &parse("1e1"))?;
    assert_eq!(d.to_string(), "11");
    assert!(!res.any());
    Ok(())
}

#[test]
fn test_quo_one_third() -> Result<(), Box<dyn StdError>> {
    let cx = ctx(5, Rounding::HalfEven);
    let mut d = Decimal::new(1, 0);
    let res = cx.quo(&mut d, &Decimal::new(3, 0))?;
    assert_eq!(d.to_string(), "0.33333");
    assert!(res.inexact());
    assert!(res.rounded());
    Ok(())
}

#[test]
fn test_division_by_zero_traps() {
    let cx = ctx(5, Rounding::HalfUp);
    let mut d = Decimal::new(1, 0);
    let err = cx.quo(&mut d, &Decimal::new(0, 0)).unwrap_err();
    assert_eq!(err, Error::Trapped(Condition::DIVISION_BY_ZERO));
    assert_eq!(err.to_string(), "division by zero");
}

#[test]
fn test_sqrt_two() -> Result<(), Box<dyn StdError>> {
    let cx = ctx(10, Rounding::HalfEven);
    let mut d = Decimal::new(2, 0);
    let res = cx.sqrt(&mut d)?;
    assert_eq!(d.to_string(), "1.414213562");
    assert!(res.inexact());
    Ok(())
}

#[test]
fn test_pow_integer_exact() -> Result<(), Box<dyn StdError>> {
    let cx = ctx(5, Rounding::HalfEven);
    let mut d = Decimal::new(2, 0);
    let res = cx.pow(&mut d, &Decimal::new(10, 0))?;
    assert_eq!(d.to_string(), "1024");
    assert!(!res.inexact());
    Ok(())
}

#[test]
fn test_repeated_add_overflows_context_limit() -> Result<(), Box<dyn StdError>> {
    let mut cx = ctx(5, Rounding::HalfUp);
    cx.max_exponent = 2;
    cx.traps = Condition::OVERFLOW;
    let one = Decimal::new(1, 0);
    let mut d = Decimal::new(997, 0);
    cx.add(&mut d, &one)?;
    assert_eq!(d.to_string(), "998");
    cx.add(&mut d, &one)?;
    assert_eq!(d.to_string(), "999");
    let err = cx.add(&mut d, &one).unwrap_err();
    assert_eq!(err.to_string(), "overflow");
    match err {
        Error::Trapped(res) => assert!(res.overflow()),
        other => panic!("unexpected error: {other:?}"),
    }
    Ok(())
}

#[test]
fn test_subnormal_parse_rounds_toward_ceiling() -> Result<(), Box<dyn StdError>> {
    let mut cx = ctx(5, Rounding::Ceiling);
    cx.min_exponent = -3;
    cx.traps = Condition::empty();
    let (d, res) = cx.parse("1e-10")?;
    assert_eq!(d.to_string(), "1E-7");
    assert!(res.subnormal());
    assert!(res.underflow());
    Ok(())
}

const LAW_VALUES: &[&str] = &[
    "0", "1", "-1", "0.5", "-0.5", "12.345", "-12.345", "1e10", "-1e-10", "999.999", "0.001",
    "123456789", "-987654321e-9",
];

#[test]
fn test_algebraic_laws() -> Result<(), Box<dyn StdError>> {
    let cx = ctx(30, Rounding::HalfEven);
    let one = Decimal::new(1, 0);
    let zero = Decimal::zero();
    for s in LAW_VALUES {
        let x = parse(s);

        // x + (-x) == 0
        let mut d = -x.clone();
        cx.add(&mut d, &x)?;
        assert_eq!(d, zero, "{s} + -{s}");

        // x - x == 0
        let mut d = x.clone();
        cx.sub(&mut d, &x)?;
        assert_eq!(d, zero, "{s} - {s}");

        // x * 1 == x
        let mut d = x.clone();
        cx.mul(&mut d, &one)?;
        assert_eq!(d, x, "{s} * 1");

        // x / 1 == x
        let mut d = x.clone();
        cx.quo(&mut d, &one)?;
        assert_eq!(d, x, "{s} / 1");

        // x / x == 1
        if !x.is_zero() {
            let mut d = x.clone();
            cx.quo(&mut d, &x.clone())?;
            assert_eq!(d, one, "{s} / {s}");
        }
    }
    Ok(())
}

#[test]
fn test_cmp_consistent_with_sub_sign() -> Result<(), Box<dyn StdError>> {
    let cx = ctx(30, Rounding::HalfEven);
    for x in LAW_VALUES {
        for y in LAW_VALUES {
            let xd = parse(x);
            let yd = parse(y);
            let mut diff = xd.clone();
            cx.sub(&mut diff, &yd)?;
            let by_sign = if diff.is_negative() {
                std::cmp::Ordering::Less
            } else if diff.is_zero() {
                std::cmp::Ordering::Equal
            } else {
                std::cmp::Ordering::Greater
            };
            assert_eq!(xd.cmp(&yd), by_sign, "{x} vs {y}");
        }
    }
    Ok(())
}

#[test]
fn test_sqrt_squares_back() -> Result<(), Box<dyn StdError>> {
    let cx = ctx(20, Rounding::HalfEven);
    for s in ["2", "3", "5", "0.7", "123.456", "1e10"] {
        let x = parse(s);
        let mut root = x.clone();
        cx.sqrt(&mut root)?;
        let mut sq = root.clone();
        let rc = root.clone();
        cx.mul(&mut sq, &rc)?;
        // The square of the rounded root is within one ulp of x.
        let mut diff = sq;
        cx.sub(&mut diff, &x)?;
        if diff.is_negative() {
            diff = -diff;
        }
        let ulp = Decimal::new(1, root.exponent());
        let mut bound = ulp.clone();
        cx.mul(&mut bound, &root)?;
        let half = bound.clone();
        cx.add(&mut bound, &half)?;
        assert!(diff <= bound, "sqrt({s}): diff {diff} bound {bound}");
    }
    Ok(())
}

#[test]
fn test_exp_ln_round_trip() -> Result<(), Box<dyn StdError>> {
    let cx = ctx(12, Rounding::HalfEven);
    for s in ["0.5", "1", "2", "10"] {
        let x = parse(s);
        let mut y = x.clone();
        cx.ln(&mut y)?;
        cx.exp(&mut y)?;
        // Round-tripping through ln and exp reproduces x to precision.
        let mut got = y.clone();
        let check = ctx(8, Rounding::HalfEven);
        check.round(&mut got)?;
        let mut want = x.clone();
        check.round(&mut want)?;
        assert_eq!(got, want, "exp(ln({s}))");
    }
    Ok(())
}

#[test]
fn test_log10_powers_of_ten() -> Result<(), Box<dyn StdError>> {
    let cx = ctx(10, Rounding::HalfEven);
    for n in [1i64, 2, 5, 9] {
        let mut d = Decimal::new(1, n as i32);
        cx.log10(&mut d)?;
        assert_eq!(d, Decimal::new(n, 0), "log10(1e{n})");
    }
    Ok(())
}

#[test]
fn test_default_traps_pass_inexact() -> Result<(), Box<dyn StdError>> {
    // Inexact and rounded alone never error under the default traps.
    let cx = Context::default().with_precision(3);
    let mut d = Decimal::new(1, 0);
    let res = cx.quo(&mut d, &Decimal::new(3, 0))?;
    assert_eq!(res, Condition::INEXACT | Condition::ROUNDED);
    Ok(())
}

#[test]
fn test_in_place_operand_matches_scratch() -> Result<(), Box<dyn StdError>> {
    // Using the destination as an operand (the aliasing the API permits)
    // agrees with computing into a scratch value.
    let cx = ctx(15, Rounding::HalfEven);
    for s in LAW_VALUES {
        let x = parse(s);

        let mut in_place = x.clone();
        let rhs = x.clone();
        cx.add(&mut in_place, &rhs)?;
        let mut scratch = x.clone();
        cx.mul(&mut scratch, &Decimal::new(2, 0))?;
        assert_eq!(in_place, scratch, "x + x vs 2x for {s}");

        let mut in_place = x.clone();
        cx.sub(&mut in_place, &x.clone())?;
        assert!(in_place.is_zero(), "x - x for {s}");
    }
    Ok(())
}

#[test]
fn test_modf_recombines() {
    for s in LAW_VALUES {
        let x = parse(s);
        let (integ, frac) = x.modf();
        assert!(integ.exponent() >= 0, "{s}");
        assert!(frac.exponent() <= 0, "{s}");
        assert!(integ.is_zero() || (integ.is_negative() == x.is_negative()), "{s}");
        assert!(frac.is_zero() || (frac.is_negative() == x.is_negative()), "{s}");
        assert_eq!(integ + frac, x, "{s}");
    }
}

#[test]
fn test_random_string_round_trip() {
    let mut rng = rand::thread_rng();
    for _ in 0..1000 {
        let coeff: i64 = rng.gen();
        let exponent: i32 = rng.gen_range(-300..=300);
        let d = bigdec::Decimal::new(coeff, exponent);
        let sci: Decimal = d.to_string().parse().unwrap();
        assert_eq!(sci, d, "sci {d}");
        let std_form: Decimal = d.to_standard_notation_string().parse().unwrap();
        assert_eq!(std_form, d, "standard {d}");
    }
}

#[test]
fn test_random_reduce_and_digits() {
    let mut rng = rand::thread_rng();
    for _ in 0..1000 {
        let coeff: i64 = rng.gen();
        let d = Decimal::new(coeff, rng.gen_range(-50..=50));
        let mut r = d.clone();
        r.reduce();
        assert_eq!(r, d, "{d}");
        let digits = d.num_digits() as usize;
        let formatted = coeff.unsigned_abs().to_string();
        assert_eq!(digits, formatted.len(), "{d}");
    }
}

#[test]
fn test_random_addition_matches_i128() {
    let mut rng = rand::thread_rng();
    let cx = Context::default();
    for _ in 0..1000 {
        let a: i64 = rng.gen();
        let b: i64 = rng.gen();
        let mut d = Decimal::new(a, 0);
        cx.add(&mut d, &Decimal::new(b, 0)).unwrap();
        let expect = i128::from(a) + i128::from(b);
        assert_eq!(d, Decimal::from(expect), "{a} + {b}");
    }
}
