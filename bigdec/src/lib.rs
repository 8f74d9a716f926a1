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

//! bigdec is an arbitrary-precision decimal arithmetic library for Rust.
//!
//! # Introduction
//!
//! From the [Decimal Arithmetic FAQ][faq]:
//!
//! > Most people in the world use decimal (base 10) arithmetic. When large or
//! > small values are needed, exponents which are powers of ten are used.
//! > However, most computers have only binary (base two) arithmetic, and when
//! > exponents are used (in floating-poing numbers) they are powers of two.
//! >
//! > Binary floating-point numbers can only approximate common decimal
//! > numbers. The value 0.1, for example, would need an infinitely recurring
//! > binary fraction. In contrast, a decimal number system can represent 0.1
//! > exactly, as one tenth (that is, 10<sup>-1</sup>). Consequently, binary
//! > floating-point cannot be used for financial calculations, or indeed for
//! > any calculations where the results achieved are required to match those
//! > which might be calculated by hand.
//!
//! bigdec implements the arbitrary-precision arithmetic described by the
//! [General Decimal Arithmetic][gda] standard: exact base-10 computation with
//! user-selectable precision, rounding modes, and exponent ranges.
//!
//! # Details
//!
//! The main types exposed by this library are as follows:
//!
//!  * [`Decimal`], an arbitrary-precision decimal value: a bignum
//!    coefficient paired with a base-10 exponent. There is no NaN or
//!    infinity representation.
//!
//!  * [`Context`], which hosts the arithmetic functions. A context
//!    configures precision, the rounding algorithm, exponent limits, and
//!    which exceptional conditions convert into errors.
//!
//!  * [`Condition`], the bitset of exceptional conditions an operation
//!    raised (inexact, rounded, overflow, and so on).
//!
//!  * [`Rounding`], the eight rounding algorithms of the standard.
//!
//! Operations take their left operand as `&mut Decimal`, which doubles as
//! the destination, and report the conditions they raised:
//!
//! ```
//! use bigdec::Context;
//!
//! let cx = Context::default().with_precision(10);
//! let (mut x, _) = cx.parse(".1")?;
//! let (y, _) = cx.parse(".2")?;
//! cx.add(&mut x, &y)?;
//! assert_eq!(x.to_string(), "0.3");
//! # Ok::<_, bigdec::Error>(())
//! ```
//!
//! Rounding is under the caller's control:
//!
//! ```
//! use bigdec::{Context, Decimal};
//!
//! let cx = Context::default().with_precision(5);
//! let mut q = Decimal::new(1, 0);
//! let res = cx.quo(&mut q, &Decimal::new(3, 0))?;
//! assert_eq!(q.to_string(), "0.33333");
//! assert!(res.inexact());
//! # Ok::<_, bigdec::Error>(())
//! ```
//!
//! [faq]: http://speleotrove.com/decimal/decifaq.html
//! [gda]: http://speleotrove.com/decimal/decarith.html

#![deny(missing_debug_implementations, missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod accumulator;
mod condition;
mod constants;
mod context;
mod decimal;
mod error;
mod iteration;
mod round;
mod table;
mod transcendental;

pub use accumulator::Accumulator;
pub use condition::Condition;
pub use context::Context;
pub use decimal::{Decimal, MAX_EXPONENT, MIN_EXPONENT};
pub use error::{Error, InvalidPrecisionError, ParseDecimalError, TryFromDecimalError};
pub use round::Rounding;
