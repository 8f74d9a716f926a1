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

use std::fmt;

use crate::condition::Condition;
use crate::context::Context;
use crate::decimal::Decimal;
use crate::error::Error;

/// Performs a sequence of context operations with a single error check at
/// the end.
///
/// Each wrapped operation is skipped once an error has occurred or an
/// accumulated condition matches the context's traps, so multi-step
/// computations stay linear instead of checking every call. Retrieve the
/// outcome with [`Accumulator::result`].
pub struct Accumulator {
    /// The context the wrapped operations run in. The context is a plain
    /// value; adjust precision or rounding between steps as needed.
    pub cx: Context,
    /// The conditions accumulated so far.
    pub flags: Condition,
    err: Option<Error>,
}

impl Accumulator {
    /// Creates an accumulator performing operations in `cx`.
    pub fn new(cx: Context) -> Accumulator {
        Accumulator {
            cx,
            flags: Condition::empty(),
            err: None,
        }
    }

    /// Returns the first error produced by a wrapped operation, or the error
    /// implied by the accumulated conditions and the context's traps.
    pub fn error(&mut self) -> Option<Error> {
        if self.err.is_none() {
            if let Err(e) = self.flags.check(self.cx.traps) {
                self.err = Some(e);
            }
        }
        self.err.clone()
    }

    /// Returns the accumulated conditions, or the first error.
    pub fn result(&mut self) -> Result<Condition, Error> {
        match self.error() {
            Some(e) => Err(e),
            None => Ok(self.flags),
        }
    }

    fn skip(&mut self) -> bool {
        self.error().is_some()
    }

    fn update(&mut self, r: Result<Condition, Error>) {
        match r {
            Ok(res) => self.flags |= res,
            Err(e) => {
                if let Error::Trapped(res) = &e {
                    self.flags |= *res;
                }
                self.err = Some(e);
            }
        }
    }

    /// Performs [`Context::abs`].
    pub fn abs(&mut self, d: &mut Decimal) {
        if self.skip() {
            return;
        }
        let cx = self.cx;
        self.update(cx.abs(d));
    }

    /// Performs [`Context::add`].
    pub fn add(&mut self, lhs: &mut Decimal, rhs: &Decimal) {
        if self.skip() {
            return;
        }
        let cx = self.cx;
        self.update(cx.add(lhs, rhs));
    }

    /// Performs [`Context::sub`].
    pub fn sub(&mut self, lhs: &mut Decimal, rhs: &Decimal) {
        if self.skip() {
            return;
        }
        let cx = self.cx;
        self.update(cx.sub(lhs, rhs));
    }

    /// Performs [`Context::neg`].
    pub fn neg(&mut self, d: &mut Decimal) {
        if self.skip() {
            return;
        }
        let cx = self.cx;
        self.update(cx.neg(d));
    }

    /// Performs [`Context::mul`].
    pub fn mul(&mut self, lhs: &mut Decimal, rhs: &Decimal) {
        if self.skip() {
            return;
        }
        let cx = self.cx;
        self.update(cx.mul(lhs, rhs));
    }

    /// Performs [`Context::quo`].
    pub fn quo(&mut self, lhs: &mut Decimal, rhs: &Decimal) {
        if self.skip() {
            return;
        }
        let cx = self.cx;
        self.update(cx.quo(lhs, rhs));
    }

    /// Performs [`Context::quo_integer`].
    pub fn quo_integer(&mut self, lhs: &mut Decimal, rhs: &Decimal) {
        if self.skip() {
            return;
        }
        let cx = self.cx;
        self.update(cx.quo_integer(lhs, rhs));
    }

    /// Performs [`Context::rem`].
    pub fn rem(&mut self, lhs: &mut Decimal, rhs: &Decimal) {
        if self.skip() {
            return;
        }
        let cx = self.cx;
        self.update(cx.rem(lhs, rhs));
    }

    /// Performs [`Context::quantize`].
    pub fn quantize(&mut self, d: &mut Decimal, exp: i32) {
        if self.skip() {
            return;
        }
        let cx = self.cx;
        self.update(cx.quantize(d, exp));
    }

    /// Performs [`Context::reduce`].
    pub fn reduce(&mut self, d: &mut Decimal) {
        if self.skip() {
            return;
        }
        let cx = self.cx;
        self.update(cx.reduce(d));
    }

    /// Performs [`Context::round`].
    pub fn round(&mut self, d: &mut Decimal) {
        if self.skip() {
            return;
        }
        let cx = self.cx;
        self.update(cx.round(d));
    }

    /// Performs [`Context::sqrt`].
    pub fn sqrt(&mut self, d: &mut Decimal) {
        if self.skip() {
            return;
        }
        let cx = self.cx;
        self.update(cx.sqrt(d));
    }

    /// Performs [`Context::cbrt`].
    pub fn cbrt(&mut self, d: &mut Decimal) {
        if self.skip() {
            return;
        }
        let cx = self.cx;
        self.update(cx.cbrt(d));
    }

    /// Performs [`Context::exp`].
    pub fn exp(&mut self, d: &mut Decimal) {
        if self.skip() {
            return;
        }
        let cx = self.cx;
        self.update(cx.exp(d));
    }

    /// Performs [`Context::ln`].
    pub fn ln(&mut self, d: &mut Decimal) {
        if self.skip() {
            return;
        }
        let cx = self.cx;
        self.update(cx.ln(d));
    }

    /// Performs [`Context::log10`].
    pub fn log10(&mut self, d: &mut Decimal) {
        if self.skip() {
            return;
        }
        let cx = self.cx;
        self.update(cx.log10(d));
    }

    /// Performs [`Context::pow`].
    pub fn pow(&mut self, d: &mut Decimal, y: &Decimal) {
        if self.skip() {
            return;
        }
        let cx = self.cx;
        self.update(cx.pow(d, y));
    }
}

impl fmt::Debug for Accumulator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Accumulator")
            .field("cx", &self.cx)
            .field("flags", &self.flags)
            .field("err", &self.err)
            .finish()
    }
}
