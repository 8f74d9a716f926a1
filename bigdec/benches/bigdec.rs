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

use criterion::{criterion_group, criterion_main, Bencher, Criterion};
use rand::{thread_rng, Rng};

use bigdec::{Context, Decimal, Rounding};

fn bench_parse(s: &str, b: &mut Bencher) {
    b.iter(|| s.parse::<Decimal>().unwrap())
}

fn bench_add(cx: Context, x: Decimal, y: Decimal, b: &mut Bencher) {
    b.iter_with_setup(
        || x.clone(),
        |mut x| {
            cx.add(&mut x, &y).unwrap();
            x
        },
    )
}

fn bench_quo(cx: Context, x: Decimal, y: Decimal, b: &mut Bencher) {
    b.iter_with_setup(
        || x.clone(),
        |mut x| {
            cx.quo(&mut x, &y).unwrap();
            x
        },
    )
}

fn bench_sqrt(cx: Context, x: Decimal, b: &mut Bencher) {
    b.iter_with_setup(
        || x.clone(),
        |mut x| {
            cx.sqrt(&mut x).unwrap();
            x
        },
    )
}

pub fn bench_arith(c: &mut Criterion) {
    let mut rng = thread_rng();

    c.bench_function("parse_short", |b| bench_parse("12345.6789", b));
    c.bench_function("parse_long", |b| {
        bench_parse("-9.299999999999999999999999999999999999999999999e-42", b)
    });

    let mut cx = Context::default().with_precision(34);
    cx.rounding = Rounding::HalfEven;

    let x = Decimal::from(rng.gen::<i64>());
    let y = Decimal::from(rng.gen::<i64>());
    c.bench_function("add_i64", |b| bench_add(cx, x.clone(), y.clone(), b));

    let x = Decimal::from(rng.gen::<i64>());
    c.bench_function("quo_by_three", |b| {
        bench_quo(cx, x.clone(), Decimal::new(3, 0), b)
    });

    let x = Decimal::new(2, 0);
    c.bench_function("sqrt_two", |b| bench_sqrt(cx, x.clone(), b));
}

criterion_group!(benches, bench_arith);
criterion_main!(benches);
