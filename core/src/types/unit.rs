// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use serde_derive::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Div, Mul};

/// Number of base dimensions tracked per unit: the seven SI base
/// quantities plus plane angle.
pub const NUM_DIMS: usize = 8;

/// Display symbols of the internal base unit system, one per dimension.
/// Lengths are millimeter-based, angles are degree-based.
const BASE_SYMBOLS: [&str; NUM_DIMS] =
    ["mm", "kg", "s", "A", "K", "mol", "cd", "deg"];

/// Largest component magnitude [`Unit::checked_pow`] accepts. Keeps
/// exponent vectors far from `i32` wraparound even when multiplied.
pub const MAX_EXPONENT: i32 = 32767;

/// An exponent vector over the base dimensions. Immutable; arithmetic
/// produces new values. The all-zero vector is the dimensionless unit.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
#[serde(transparent)]
pub struct Unit {
    dims: [i32; NUM_DIMS],
}

impl Unit {
    /// Order of components: length, mass, time, current, temperature,
    /// amount of substance, luminous intensity, angle.
    pub const fn new(dims: [i32; NUM_DIMS]) -> Unit {
        Unit { dims }
    }

    pub const NONE: Unit = Unit::new([0; NUM_DIMS]);

    pub const LENGTH: Unit = Unit::new([1, 0, 0, 0, 0, 0, 0, 0]);
    pub const AREA: Unit = Unit::new([2, 0, 0, 0, 0, 0, 0, 0]);
    pub const VOLUME: Unit = Unit::new([3, 0, 0, 0, 0, 0, 0, 0]);
    pub const MASS: Unit = Unit::new([0, 1, 0, 0, 0, 0, 0, 0]);
    pub const TIME: Unit = Unit::new([0, 0, 1, 0, 0, 0, 0, 0]);
    pub const CURRENT: Unit = Unit::new([0, 0, 0, 1, 0, 0, 0, 0]);
    pub const TEMPERATURE: Unit = Unit::new([0, 0, 0, 0, 1, 0, 0, 0]);
    pub const AMOUNT: Unit = Unit::new([0, 0, 0, 0, 0, 1, 0, 0]);
    pub const LUMINOUS_INTENSITY: Unit = Unit::new([0, 0, 0, 0, 0, 0, 1, 0]);
    pub const ANGLE: Unit = Unit::new([0, 0, 0, 0, 0, 0, 0, 1]);

    pub const VELOCITY: Unit = Unit::new([1, 0, -1, 0, 0, 0, 0, 0]);
    pub const ACCELERATION: Unit = Unit::new([1, 0, -2, 0, 0, 0, 0, 0]);
    pub const FORCE: Unit = Unit::new([1, 1, -2, 0, 0, 0, 0, 0]);
    pub const PRESSURE: Unit = Unit::new([-1, 1, -2, 0, 0, 0, 0, 0]);
    pub const ENERGY: Unit = Unit::new([2, 1, -2, 0, 0, 0, 0, 0]);
    pub const POWER: Unit = Unit::new([2, 1, -3, 0, 0, 0, 0, 0]);

    /// True for the all-zero exponent vector.
    pub fn is_empty(&self) -> bool {
        self.dims.iter().all(|&exp| exp == 0)
    }

    /// Scales every exponent. `u.pow(0)` is the dimensionless unit.
    /// Components saturate at the `i32` bounds rather than wrapping;
    /// use [`Unit::checked_pow`] to detect exponents leaving the
    /// representable range.
    pub fn pow(&self, exp: i32) -> Unit {
        let mut dims = self.dims;
        for value in dims.iter_mut() {
            *value = value.saturating_mul(exp);
        }
        Unit { dims }
    }

    /// Scales every exponent, returning `None` when any component
    /// would leave `[-MAX_EXPONENT, MAX_EXPONENT]`.
    pub fn checked_pow(&self, exp: i32) -> Option<Unit> {
        let mut dims = self.dims;
        for value in dims.iter_mut() {
            let scaled = value.checked_mul(exp)?;
            if scaled.abs() > MAX_EXPONENT {
                return None;
            }
            *value = scaled;
        }
        Some(Unit { dims })
    }

    pub fn dims(&self) -> &[i32; NUM_DIMS] {
        &self.dims
    }
}

impl Mul for Unit {
    type Output = Unit;

    fn mul(self, other: Unit) -> Unit {
        let mut dims = self.dims;
        for (value, &rhs) in dims.iter_mut().zip(other.dims.iter()) {
            *value = value.saturating_add(rhs);
        }
        Unit { dims }
    }
}

impl Div for Unit {
    type Output = Unit;

    fn div(self, other: Unit) -> Unit {
        let mut dims = self.dims;
        for (value, &rhs) in dims.iter_mut().zip(other.dims.iter()) {
            *value = value.saturating_sub(rhs);
        }
        Unit { dims }
    }
}

fn write_factors(out: &mut String, factors: &[(usize, i32)]) {
    for (i, &(dim, exp)) in factors.iter().enumerate() {
        if i > 0 {
            out.push('*');
        }
        out.push_str(BASE_SYMBOLS[dim]);
        if exp != 1 {
            out.push('^');
            out.push_str(&exp.to_string());
        }
    }
}

impl fmt::Display for Unit {
    /// Renders the unit in internal base symbols. The output re-parses
    /// under the expression grammar, so a denominator with more than
    /// one factor is parenthesized: `mm*kg/(s^2*K)`.
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut num = vec![];
        let mut den = vec![];
        for (dim, &exp) in self.dims.iter().enumerate() {
            if exp > 0 {
                num.push((dim, exp));
            } else if exp < 0 {
                den.push((dim, -exp));
            }
        }

        let mut out = String::new();
        if num.is_empty() && !den.is_empty() {
            out.push('1');
        } else {
            write_factors(&mut out, &num);
        }
        if !den.is_empty() {
            out.push('/');
            if den.len() > 1 {
                out.push('(');
            }
            write_factors(&mut out, &den);
            if den.len() > 1 {
                out.push(')');
            }
        }
        fmt.write_str(&out)
    }
}
