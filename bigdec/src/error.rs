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

/// An error indicating that a string is not a valid decimal number.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ParseDecimalError {
    kind: ParseErrorKind,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
enum ParseErrorKind {
    Syntax,
    ExponentOutOfRange,
}

impl ParseDecimalError {
    pub(crate) fn syntax() -> ParseDecimalError {
        ParseDecimalError {
            kind: ParseErrorKind::Syntax,
        }
    }

    pub(crate) fn exponent_out_of_range() -> ParseDecimalError {
        ParseDecimalError {
            kind: ParseErrorKind::ExponentOutOfRange,
        }
    }
}

impl fmt::Display for ParseDecimalError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.kind {
            ParseErrorKind::Syntax => f.write_str("invalid decimal syntax"),
            ParseErrorKind::ExponentOutOfRange => f.write_str("exponent out of range"),
        }
    }
}

impl std::error::Error for ParseDecimalError {}

/// An error indicating that a precision is not valid for a given operation.
///
/// Division requires a context whose precision is nonzero and at most 5000;
/// the exponential function requires a nonzero precision.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct InvalidPrecisionError;

impl fmt::Display for InvalidPrecisionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("invalid decimal precision")
    }
}

impl std::error::Error for InvalidPrecisionError {}

/// An error indicating that a decimal cannot be represented in the target
/// type, or that a value of another type cannot be represented as a decimal.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TryFromDecimalError;

impl fmt::Display for TryFromDecimalError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("decimal conversion out of range")
    }
}

impl std::error::Error for TryFromDecimalError {}

/// An error resulting from a decimal operation.
///
/// Most operational failures are [`Error::Trapped`]: the operation raised
/// conditions selected by the context's trap set. The remaining variants
/// report failures that precede or bypass the condition machinery.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Error {
    /// A string could not be parsed as a decimal number.
    Parse(ParseDecimalError),
    /// The context's precision is unsupported by the operation.
    Precision(InvalidPrecisionError),
    /// A conversion to or from another numeric type failed.
    Conversion(TryFromDecimalError),
    /// A computed exponent escaped the library-wide exponent range.
    ExponentOutOfRange,
    /// An iterative computation did not converge.
    NonConvergence {
        /// The operation that was being computed.
        op: &'static str,
        /// The number of iterations performed before giving up.
        iterations: u64,
    },
    /// The operation raised conditions selected by the context's traps.
    Trapped(Condition),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Parse(e) => e.fmt(f),
            Error::Precision(e) => e.fmt(f),
            Error::Conversion(e) => e.fmt(f),
            Error::ExponentOutOfRange => f.write_str("exponent out of range"),
            Error::NonConvergence { op, iterations } => {
                write!(f, "{op} did not converge after {iterations} iterations")
            }
            Error::Trapped(cond) => cond.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Parse(e) => Some(e),
            Error::Precision(e) => Some(e),
            Error::Conversion(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ParseDecimalError> for Error {
    fn from(e: ParseDecimalError) -> Error {
        Error::Parse(e)
    }
}

impl From<InvalidPrecisionError> for Error {
    fn from(e: InvalidPrecisionError) -> Error {
        Error::Precision(e)
    }
}

impl From<TryFromDecimalError> for Error {
    fn from(e: TryFromDecimalError) -> Error {
        Error::Conversion(e)
    }
}
