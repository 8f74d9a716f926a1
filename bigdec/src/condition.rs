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

use bitflags::bitflags;

use crate::error::Error;

/// Represents exceptional conditions resulting from operations on decimal
/// numbers.
///
/// A single operation may raise several conditions at once (e.g.
/// `INEXACT | ROUNDED | SUBNORMAL | UNDERFLOW`). Conditions are returned to
/// the caller in the [`Condition`] bitset; the subset selected by
/// [`Context::traps`](crate::Context::traps) is converted into an error
/// instead.
///
/// For details about the various exceptional conditions, consult the
/// [Exceptional Conditions][conditions] chapter of the General Decimal
/// Arithmetic specification.
///
/// [conditions]: http://speleotrove.com/decimal/daexcep.html
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Condition(u32);

bitflags! {
    impl Condition: u32 {
        /// Raised when an adjusted exponent is greater than
        /// [`MAX_EXPONENT`](crate::MAX_EXPONENT). Always an error, never a
        /// mere flag.
        const SYSTEM_OVERFLOW = 1 << 0;
        /// Raised when an adjusted exponent is less than
        /// [`MIN_EXPONENT`](crate::MIN_EXPONENT). Always an error, never a
        /// mere flag.
        const SYSTEM_UNDERFLOW = 1 << 1;
        /// Raised when an adjusted exponent is greater than
        /// [`Context::max_exponent`](crate::Context::max_exponent).
        const OVERFLOW = 1 << 2;
        /// Raised when a result is both subnormal and inexact.
        const UNDERFLOW = 1 << 3;
        /// Raised when an operation discards nonzero digits from a result.
        const INEXACT = 1 << 4;
        /// Raised when an operation's adjusted exponent, before rounding, is
        /// less than [`Context::min_exponent`](crate::Context::min_exponent).
        const SUBNORMAL = 1 << 5;
        /// Raised when an operation discards digits (zero or nonzero) from a
        /// result.
        const ROUNDED = 1 << 6;
        /// Raised when the exponent of a result has been altered to fit the
        /// constraints of the context.
        const CLAMPED = 1 << 7;
        /// Raised when both operands of a division are zero.
        const DIVISION_UNDEFINED = 1 << 8;
        /// Raised when a nonzero dividend is divided by zero.
        const DIVISION_BY_ZERO = 1 << 9;
        /// Raised when the result of an integer division or remainder cannot
        /// be represented within the context's precision.
        const DIVISION_IMPOSSIBLE = 1 << 10;
        /// Raised by operations on invalid arguments, like the square root of
        /// a negative number.
        const INVALID_OPERATION = 1 << 11;
    }
}

impl Condition {
    /// The trap set used by the default context: every condition except
    /// [`INEXACT`](Condition::INEXACT) and [`ROUNDED`](Condition::ROUNDED)
    /// converts into an error.
    pub const DEFAULT_TRAPS: Condition =
        Condition::all().difference(Condition::INEXACT.union(Condition::ROUNDED));

    /// Reports whether any condition is set.
    pub fn any(&self) -> bool {
        !self.is_empty()
    }

    /// Reports whether the system overflow condition is set.
    pub fn system_overflow(&self) -> bool {
        self.contains(Condition::SYSTEM_OVERFLOW)
    }

    /// Reports whether the system underflow condition is set.
    pub fn system_underflow(&self) -> bool {
        self.contains(Condition::SYSTEM_UNDERFLOW)
    }

    /// Reports whether the overflow condition is set.
    pub fn overflow(&self) -> bool {
        self.contains(Condition::OVERFLOW)
    }

    /// Reports whether the underflow condition is set.
    pub fn underflow(&self) -> bool {
        self.contains(Condition::UNDERFLOW)
    }

    /// Reports whether the inexact condition is set.
    pub fn inexact(&self) -> bool {
        self.contains(Condition::INEXACT)
    }

    /// Reports whether the subnormal condition is set.
    pub fn subnormal(&self) -> bool {
        self.contains(Condition::SUBNORMAL)
    }

    /// Reports whether the rounded condition is set.
    pub fn rounded(&self) -> bool {
        self.contains(Condition::ROUNDED)
    }

    /// Reports whether the clamped condition is set.
    pub fn clamped(&self) -> bool {
        self.contains(Condition::CLAMPED)
    }

    /// Reports whether the division undefined condition is set.
    pub fn division_undefined(&self) -> bool {
        self.contains(Condition::DIVISION_UNDEFINED)
    }

    /// Reports whether the division by zero condition is set.
    pub fn division_by_zero(&self) -> bool {
        self.contains(Condition::DIVISION_BY_ZERO)
    }

    /// Reports whether the division impossible condition is set.
    pub fn division_impossible(&self) -> bool {
        self.contains(Condition::DIVISION_IMPOSSIBLE)
    }

    /// Reports whether the invalid operation condition is set.
    pub fn invalid_operation(&self) -> bool {
        self.contains(Condition::INVALID_OPERATION)
    }

    /// Converts the conditions in `self` into an error based on `traps`.
    ///
    /// The system range conditions are always errors. Otherwise, any condition
    /// present in both `self` and `traps` produces
    /// [`Error::Trapped`] naming the trapped subset. Conditions that are set
    /// but not trapped are returned for inspection.
    pub fn check(self, traps: Condition) -> Result<Condition, Error> {
        const SYSTEM_ERRORS: Condition =
            Condition::SYSTEM_OVERFLOW.union(Condition::SYSTEM_UNDERFLOW);
        if self.intersects(SYSTEM_ERRORS) {
            return Err(Error::ExponentOutOfRange);
        }
        let trapped = self & traps;
        if trapped.any() {
            return Err(Error::Trapped(trapped));
        }
        Ok(self)
    }

    /// Converts overflow conditions into their equivalent underflows.
    ///
    /// Used when a result is inverted, as during negative integer powers.
    pub(crate) fn negate_overflow_flags(mut self) -> Condition {
        if self.overflow() {
            // Underflowed results are subnormal before they vanish.
            self |= Condition::UNDERFLOW | Condition::SUBNORMAL;
            self.remove(Condition::OVERFLOW);
        }
        if self.system_overflow() {
            self |= Condition::SYSTEM_UNDERFLOW;
            self.remove(Condition::SYSTEM_OVERFLOW);
        }
        self
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut first = true;
        for flag in self.iter() {
            let name = match flag {
                // The system range conditions surface through their own error
                // and have no flag name.
                Condition::SYSTEM_OVERFLOW | Condition::SYSTEM_UNDERFLOW => continue,
                Condition::OVERFLOW => "overflow",
                Condition::UNDERFLOW => "underflow",
                Condition::INEXACT => "inexact",
                Condition::SUBNORMAL => "subnormal",
                Condition::ROUNDED => "rounded",
                Condition::CLAMPED => "clamped",
                Condition::DIVISION_UNDEFINED => "division undefined",
                Condition::DIVISION_BY_ZERO => "division by zero",
                Condition::DIVISION_IMPOSSIBLE => "division impossible",
                Condition::INVALID_OPERATION => "invalid operation",
                _ => continue,
            };
            if !first {
                f.write_str(", ")?;
            }
            f.write_str(name)?;
            first = false;
        }
        Ok(())
    }
}

impl fmt::Debug for Condition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Condition")
            .field("system_overflow", &self.system_overflow())
            .field("system_underflow", &self.system_underflow())
            .field("overflow", &self.overflow())
            .field("underflow", &self.underflow())
            .field("inexact", &self.inexact())
            .field("subnormal", &self.subnormal())
            .field("rounded", &self.rounded())
            .field("clamped", &self.clamped())
            .field("division_undefined", &self.division_undefined())
            .field("division_by_zero", &self.division_by_zero())
            .field("division_impossible", &self.division_impossible())
            .field("invalid_operation", &self.invalid_operation())
            .finish()
    }
}
