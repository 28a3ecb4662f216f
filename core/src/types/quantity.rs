// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::Unit;
use crate::schema::UnitSchema;
use serde_derive::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Magnitude reserved for the "unset" state. Never produced by
/// arithmetic on valid operands.
const UNSET: f64 = f64::MIN;

/// Largest magnitude accepted as a dimensional exponent by
/// [`Quantity::pow`]. Fractional exponents of a dimensioned base are
/// truncated toward zero; values beyond this bound are rejected
/// instead of silently narrowed.
pub const MAX_UNIT_EXPONENT: f64 = 32767.0;

/// Failures of dimension-checked arithmetic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum QuantityError {
    /// Addition or subtraction of operands with differing units.
    UnitMismatch { left: Unit, right: Unit },
    /// The exponent of `pow` carried a unit.
    InvalidExponent(Unit),
    /// The exponent of `pow` cannot be applied to a dimensioned base.
    ExponentOutOfRange(f64),
    /// An unset quantity was used where a valid value is required.
    Invalid,
}

impl fmt::Display for QuantityError {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            QuantityError::UnitMismatch { ref left, ref right } => write!(
                fmt,
                "Unit mismatch: cannot combine `{}` and `{}`",
                DimLabel(left),
                DimLabel(right)
            ),
            QuantityError::InvalidExponent(ref unit) => write!(
                fmt,
                "Exponent must be dimensionless, got `{}`",
                DimLabel(unit)
            ),
            QuantityError::ExponentOutOfRange(value) => write!(
                fmt,
                "Exponent {} is out of range for a dimensioned base",
                value
            ),
            QuantityError::Invalid => write!(fmt, "Quantity is unset"),
        }
    }
}

impl Error for QuantityError {}

/// Renders a unit for error messages, with a stand-in for the empty vector.
struct DimLabel<'a>(&'a Unit);

impl<'a> fmt::Display for DimLabel<'a> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            fmt.write_str("dimensionless")
        } else {
            self.0.fmt(fmt)
        }
    }
}

/// A magnitude paired with a unit. The magnitude is expressed in the
/// internal base system (millimeter, kilogram, second, ampere, kelvin,
/// mole, candela, degree).
///
/// Equality is exact on both magnitude and unit; there is no epsilon
/// tolerance.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Quantity {
    pub value: f64,
    pub unit: Unit,
}

impl Quantity {
    pub const fn new(value: f64, unit: Unit) -> Quantity {
        Quantity { value, unit }
    }

    /// A dimensionless value.
    pub const fn dimensionless(value: f64) -> Quantity {
        Quantity::new(value, Unit::NONE)
    }

    /// The sentinel "no value" quantity.
    pub const fn unset() -> Quantity {
        Quantity::new(UNSET, Unit::NONE)
    }

    /// True if a magnitude has been set, with or without a unit.
    pub fn is_valid(&self) -> bool {
        self.value != UNSET
    }

    /// True if valid and carrying no unit.
    pub fn is_dimensionless(&self) -> bool {
        self.is_valid() && self.unit.is_empty()
    }

    /// True if valid and carrying a unit.
    pub fn is_quantity(&self) -> bool {
        self.is_valid() && !self.unit.is_empty()
    }

    /// Raises to a dimensionless power. The magnitude exponent may be
    /// fractional; the unit exponent is truncated toward zero. When
    /// the base is dimensioned, both the exponent and every component
    /// of the resulting vector must stay within
    /// [`MAX_UNIT_EXPONENT`], so stacked powers cannot wrap.
    pub fn pow(&self, exp: &Quantity) -> Result<Quantity, QuantityError> {
        if !self.is_valid() || !exp.is_valid() {
            return Err(QuantityError::Invalid);
        }
        if !exp.unit.is_empty() {
            return Err(QuantityError::InvalidExponent(exp.unit));
        }
        let unit = if self.unit.is_empty() {
            self.unit
        } else if exp.value.is_finite() && exp.value.abs() <= MAX_UNIT_EXPONENT {
            // the bound is cumulative: scaling an already-large vector
            // out of range is rejected, not wrapped
            self.unit
                .checked_pow(exp.value.trunc() as i32)
                .ok_or(QuantityError::ExponentOutOfRange(exp.value))?
        } else {
            return Err(QuantityError::ExponentOutOfRange(exp.value));
        };
        Ok(Quantity::new(self.value.powf(exp.value), unit))
    }

    /// Debug rendering: the internal base magnitude followed by the
    /// unit string, e.g. `8000 mm` or `8`. Re-parses to an equal unit
    /// and a magnitude within floating tolerance.
    pub fn to_user_string(&self) -> String {
        if self.unit.is_empty() {
            return format!("{}", self.value);
        }
        let unit = self.unit.to_string();
        // a pure-denominator unit renders as `0.25/s`, not `0.25 1/s`,
        // so the output stays parseable
        match unit.strip_prefix("1/") {
            Some(rest) => format!("{}/{}", self.value, rest),
            None => format!("{} {}", self.value, unit),
        }
    }

    /// Re-expresses the magnitude in the display unit chosen by
    /// `schema` for this dimension vector, returning the converted
    /// magnitude and the unit label.
    pub fn to_preferred(
        &self,
        schema: &dyn UnitSchema,
    ) -> Result<(f64, String), QuantityError> {
        if !self.is_valid() {
            return Err(QuantityError::Invalid);
        }
        let preferred = schema.resolve(&self.unit);
        Ok((self.value / preferred.factor, preferred.label))
    }
}

impl Add for Quantity {
    type Output = Result<Quantity, QuantityError>;

    fn add(self, other: Quantity) -> Self::Output {
        if !self.is_valid() || !other.is_valid() {
            return Err(QuantityError::Invalid);
        }
        if self.unit != other.unit {
            return Err(QuantityError::UnitMismatch {
                left: self.unit,
                right: other.unit,
            });
        }
        Ok(Quantity::new(self.value + other.value, self.unit))
    }
}

impl Sub for Quantity {
    type Output = Result<Quantity, QuantityError>;

    fn sub(self, other: Quantity) -> Self::Output {
        if !self.is_valid() || !other.is_valid() {
            return Err(QuantityError::Invalid);
        }
        if self.unit != other.unit {
            return Err(QuantityError::UnitMismatch {
                left: self.unit,
                right: other.unit,
            });
        }
        Ok(Quantity::new(self.value - other.value, self.unit))
    }
}

impl Mul for Quantity {
    type Output = Quantity;

    fn mul(self, other: Quantity) -> Quantity {
        Quantity::new(self.value * other.value, self.unit * other.unit)
    }
}

impl Div for Quantity {
    type Output = Quantity;

    /// Division by a zero magnitude is not checked here; the IEEE
    /// infinity or NaN propagates to the caller.
    fn div(self, other: Quantity) -> Quantity {
        Quantity::new(self.value / other.value, self.unit / other.unit)
    }
}

impl Neg for Quantity {
    type Output = Quantity;

    fn neg(self) -> Quantity {
        Quantity::new(-self.value, self.unit)
    }
}

// === Predefined units =====================================================
//
// Conversion factors into the internal base system. Length is
// millimeter-based, so METER is 1.0e3; mass is kilogram-based, so
// KILOGRAM is 1.0.

impl Quantity {
    pub const NANOMETER: Quantity = Quantity::new(1.0e-6, Unit::LENGTH);
    pub const MICROMETER: Quantity = Quantity::new(1.0e-3, Unit::LENGTH);
    pub const MILLIMETER: Quantity = Quantity::new(1.0, Unit::LENGTH);
    pub const CENTIMETER: Quantity = Quantity::new(10.0, Unit::LENGTH);
    pub const DECIMETER: Quantity = Quantity::new(100.0, Unit::LENGTH);
    pub const METER: Quantity = Quantity::new(1.0e3, Unit::LENGTH);
    pub const KILOMETER: Quantity = Quantity::new(1.0e6, Unit::LENGTH);

    pub const LITER: Quantity = Quantity::new(1.0e6, Unit::VOLUME);

    pub const MICROGRAM: Quantity = Quantity::new(1.0e-9, Unit::MASS);
    pub const MILLIGRAM: Quantity = Quantity::new(1.0e-6, Unit::MASS);
    pub const GRAM: Quantity = Quantity::new(1.0e-3, Unit::MASS);
    pub const KILOGRAM: Quantity = Quantity::new(1.0, Unit::MASS);
    pub const TONNE: Quantity = Quantity::new(1.0e3, Unit::MASS);

    pub const SECOND: Quantity = Quantity::new(1.0, Unit::TIME);
    pub const MINUTE: Quantity = Quantity::new(60.0, Unit::TIME);
    pub const HOUR: Quantity = Quantity::new(3600.0, Unit::TIME);

    pub const AMPERE: Quantity = Quantity::new(1.0, Unit::CURRENT);
    pub const MILLIAMPERE: Quantity = Quantity::new(0.001, Unit::CURRENT);
    pub const KILOAMPERE: Quantity = Quantity::new(1000.0, Unit::CURRENT);
    pub const MEGAAMPERE: Quantity = Quantity::new(1.0e6, Unit::CURRENT);

    pub const KELVIN: Quantity = Quantity::new(1.0, Unit::TEMPERATURE);
    pub const MILLIKELVIN: Quantity = Quantity::new(0.001, Unit::TEMPERATURE);
    pub const MICROKELVIN: Quantity = Quantity::new(1.0e-6, Unit::TEMPERATURE);

    pub const MOLE: Quantity = Quantity::new(1.0, Unit::AMOUNT);

    pub const CANDELA: Quantity = Quantity::new(1.0, Unit::LUMINOUS_INTENSITY);

    pub const INCH: Quantity = Quantity::new(25.4, Unit::LENGTH);
    pub const FOOT: Quantity = Quantity::new(304.8, Unit::LENGTH);
    pub const THOU: Quantity = Quantity::new(0.0254, Unit::LENGTH);
    pub const YARD: Quantity = Quantity::new(914.4, Unit::LENGTH);

    pub const POUND: Quantity = Quantity::new(0.45359237, Unit::MASS);
    pub const OUNCE: Quantity = Quantity::new(0.028349523125, Unit::MASS);
    pub const STONE: Quantity = Quantity::new(6.35029318, Unit::MASS);
    pub const HUNDREDWEIGHT: Quantity = Quantity::new(50.80234544, Unit::MASS);

    // newton is kg*m/s^2, which is 1000 in mm-based lengths
    pub const NEWTON: Quantity = Quantity::new(1000.0, Unit::FORCE);
    pub const KILONEWTON: Quantity = Quantity::new(1.0e6, Unit::FORCE);
    pub const MEGANEWTON: Quantity = Quantity::new(1.0e9, Unit::FORCE);
    pub const MILLINEWTON: Quantity = Quantity::new(1.0, Unit::FORCE);

    pub const PASCAL: Quantity = Quantity::new(0.001, Unit::PRESSURE);
    pub const KILOPASCAL: Quantity = Quantity::new(1.0, Unit::PRESSURE);
    pub const MEGAPASCAL: Quantity = Quantity::new(1000.0, Unit::PRESSURE);
    pub const GIGAPASCAL: Quantity = Quantity::new(1.0e6, Unit::PRESSURE);
    pub const PSI: Quantity = Quantity::new(6.894757293168, Unit::PRESSURE);

    pub const WATT: Quantity = Quantity::new(1.0e6, Unit::POWER);
    pub const VOLT_AMPERE: Quantity = Quantity::new(1.0e6, Unit::POWER);

    pub const JOULE: Quantity = Quantity::new(1.0e6, Unit::ENERGY);
    pub const NEWTON_METER: Quantity = Quantity::new(1.0e6, Unit::ENERGY);
    pub const VOLT_AMPERE_SECOND: Quantity = Quantity::new(1.0e6, Unit::ENERGY);
    pub const WATT_SECOND: Quantity = Quantity::new(1.0e6, Unit::ENERGY);

    // degree is the internal standard angle
    pub const DEGREE: Quantity = Quantity::new(1.0, Unit::ANGLE);
    pub const RADIAN: Quantity = Quantity::new(57.29577951308232, Unit::ANGLE);
    pub const GON: Quantity = Quantity::new(0.9, Unit::ANGLE);
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn add_same_unit() {
        let a = Quantity::new(5.0, Unit::LENGTH);
        let b = Quantity::new(3.0, Unit::LENGTH);
        assert_eq!(a + b, Ok(Quantity::new(8.0, Unit::LENGTH)));
        assert_eq!(a - b, Ok(Quantity::new(2.0, Unit::LENGTH)));
    }

    #[test]
    fn add_mismatch() {
        let a = Quantity::new(1.0, Unit::LENGTH);
        let b = Quantity::new(1.0, Unit::MASS);
        assert_eq!(
            a + b,
            Err(QuantityError::UnitMismatch {
                left: Unit::LENGTH,
                right: Unit::MASS,
            })
        );
    }

    #[test]
    fn mul_combines_units() {
        let a = Quantity::new(2.0, Unit::LENGTH);
        let b = Quantity::new(3.0, Unit::MASS);
        let prod = a * b;
        assert_eq!(prod.value, 6.0);
        assert_eq!(prod.unit, Unit::LENGTH * Unit::MASS);
    }

    #[test]
    fn div_by_zero_passes_through() {
        let q = Quantity::new(1.0, Unit::LENGTH) / Quantity::dimensionless(0.0);
        assert!(q.value.is_infinite());
        assert_eq!(q.unit, Unit::LENGTH);
    }

    #[test]
    fn pow_dimensionless_exponent() {
        let res = Quantity::new(2.0, Unit::LENGTH)
            .pow(&Quantity::dimensionless(3.0))
            .unwrap();
        assert_eq!(res.value, 8.0);
        assert_eq!(res.unit, Unit::VOLUME);
    }

    #[test]
    fn pow_rejects_dimensioned_exponent() {
        let res = Quantity::new(2.0, Unit::LENGTH).pow(&Quantity::new(3.0, Unit::TIME));
        assert_eq!(res, Err(QuantityError::InvalidExponent(Unit::TIME)));
    }

    #[test]
    fn pow_truncates_unit_exponent() {
        // magnitude exponent stays fractional, unit exponent truncates
        let res = Quantity::new(4.0, Unit::LENGTH)
            .pow(&Quantity::dimensionless(1.5))
            .unwrap();
        assert_eq!(res.value, 8.0);
        assert_eq!(res.unit, Unit::LENGTH);
    }

    #[test]
    fn pow_bounds() {
        let res = Quantity::new(2.0, Unit::LENGTH).pow(&Quantity::dimensionless(1.0e9));
        assert_eq!(res, Err(QuantityError::ExponentOutOfRange(1.0e9)));
        // repeated in-range powers must not wrap the vector either
        let stacked = Quantity::new(2.0, Unit::LENGTH)
            .pow(&Quantity::dimensionless(30000.0))
            .unwrap()
            .pow(&Quantity::dimensionless(30000.0));
        assert_eq!(stacked, Err(QuantityError::ExponentOutOfRange(30000.0)));
        // a dimensionless base has no unit exponent to narrow
        let res = Quantity::dimensionless(2.0)
            .pow(&Quantity::dimensionless(100000.0))
            .unwrap();
        assert!(res.value.is_infinite());
    }

    #[test]
    fn unset_is_sticky() {
        assert!(!Quantity::unset().is_valid());
        assert_eq!(
            Quantity::unset() + Quantity::dimensionless(1.0),
            Err(QuantityError::Invalid)
        );
    }

    #[test]
    fn predicates() {
        assert!(Quantity::dimensionless(4.0).is_dimensionless());
        assert!(!Quantity::dimensionless(4.0).is_quantity());
        assert!(Quantity::METER.is_quantity());
        assert!(Quantity::METER.is_valid());
    }

    #[test]
    fn meter_is_millimeter_based() {
        assert_eq!(Quantity::new(1000.0, Unit::LENGTH), Quantity::METER);
    }

    #[test]
    fn user_string() {
        assert_eq!(Quantity::new(8.0, Unit::LENGTH).to_user_string(), "8 mm");
        assert_eq!(Quantity::dimensionless(8.0).to_user_string(), "8");
        assert_eq!(Quantity::NEWTON.to_user_string(), "1000 mm*kg/s^2");
        let hz = Quantity::dimensionless(0.25) / Quantity::new(1.0, Unit::TIME);
        assert_eq!(hz.to_user_string(), "0.25/s");
    }
}
