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

use crate::context::Context;
use crate::decimal::Decimal;
use crate::error::Error;

/// Convergence checker for the iterative routines.
///
/// Tracks the change between successive iterates and reports completion when
/// the change reaches zero, or when its magnitude stalls for several
/// iterations (which catches two-value oscillation in the last digit). Gives
/// up with an error once the iteration cap is reached.
pub(crate) struct Loop<'a> {
    cx: &'a Context,
    /// The name of the function being evaluated, for diagnostics.
    name: &'static str,
    /// Iteration count.
    i: u64,
    /// When to give up.
    max_iterations: u64,
    /// Iterations since |delta| last changed.
    stall_count: u32,
    /// Result from the previous iteration.
    prev_z: Decimal,
    /// |Change| from the previous iteration.
    delta: Decimal,
    /// The previous |delta|, for stall detection.
    prev_delta: Decimal,
}

impl<'a> Loop<'a> {
    /// Returns a new convergence checker. `iters_per_digit` scales the
    /// iteration cap with the context's precision, so callers need not
    /// account for the precision themselves.
    pub fn new(cx: &'a Context, name: &'static str, iters_per_digit: u64) -> Loop<'a> {
        Loop {
            cx,
            name,
            i: 0,
            max_iterations: 10 + iters_per_digit * cx.precision as u64,
            stall_count: 0,
            prev_z: Decimal::zero(),
            delta: Decimal::zero(),
            prev_delta: Decimal::zero(),
        }
    }

    /// Reports whether the iteration producing `z` has converged. Returns an
    /// error if it has not after the maximum number of iterations.
    pub fn done(&mut self, z: &Decimal) -> Result<bool, Error> {
        self.delta.clone_from(&self.prev_z);
        // Failures here leave a stale delta; the iteration cap still bounds
        // the loop.
        let _ = self.cx.sub(&mut self.delta, z);
        if self.delta.is_zero() {
            return Ok(true);
        }
        if self.delta.is_negative() {
            self.delta.negate();
        }
        if self.delta == self.prev_delta {
            // Near the end of a computation the iterates can hop between the
            // same two values; seeing the same |delta| a few times in a row
            // counts as convergence.
            self.stall_count += 1;
            if self.stall_count > 3 {
                return Ok(true);
            }
        } else {
            self.stall_count = 0;
        }
        self.i += 1;
        if self.i == self.max_iterations {
            return Err(Error::NonConvergence {
                op: self.name,
                iterations: self.max_iterations,
            });
        }
        self.prev_delta.clone_from(&self.delta);
        self.prev_z.clone_from(z);
        Ok(false)
    }
}
