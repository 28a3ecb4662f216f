// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Preferred-unit resolution: how a dimension vector maps to the unit a
//! user wants to see. Parsing and arithmetic never touch this; only
//! display formatting does.

use crate::types::{Quantity, Unit};

/// A display unit chosen for some dimension vector: the conversion
/// factor from the internal base magnitude and the label to print.
#[derive(Debug, Clone, PartialEq)]
pub struct PreferredUnit {
    pub factor: f64,
    pub label: String,
}

impl PreferredUnit {
    fn new(factor: f64, label: &str) -> PreferredUnit {
        PreferredUnit {
            factor,
            label: label.to_owned(),
        }
    }

    /// Identity conversion: keep the internal base magnitude and render
    /// the raw unit string.
    fn internal(unit: &Unit) -> PreferredUnit {
        PreferredUnit {
            factor: 1.0,
            label: unit.to_string(),
        }
    }
}

/// Maps a dimension vector to the user's preferred display unit.
/// Resolution is total: a schema that has no opinion about a vector
/// falls back to the internal base rendering.
pub trait UnitSchema {
    fn resolve(&self, unit: &Unit) -> PreferredUnit;
}

/// The internal base system itself: factor 1 everywhere, labels in
/// millimeter/kilogram/second symbols.
#[derive(Debug, Default, Clone, Copy)]
pub struct InternalSchema;

impl UnitSchema for InternalSchema {
    fn resolve(&self, unit: &Unit) -> PreferredUnit {
        PreferredUnit::internal(unit)
    }
}

/// Standard SI display units for the common dimension vectors; other
/// vectors fall back to the internal rendering.
#[derive(Debug, Default, Clone, Copy)]
pub struct SiSchema;

impl UnitSchema for SiSchema {
    fn resolve(&self, unit: &Unit) -> PreferredUnit {
        match *unit {
            Unit::NONE => PreferredUnit::new(1.0, ""),
            Unit::LENGTH => PreferredUnit::new(Quantity::METER.value, "m"),
            Unit::AREA => PreferredUnit::new(1.0e6, "m^2"),
            Unit::VOLUME => PreferredUnit::new(1.0e9, "m^3"),
            Unit::MASS => PreferredUnit::new(1.0, "kg"),
            Unit::TIME => PreferredUnit::new(1.0, "s"),
            Unit::CURRENT => PreferredUnit::new(1.0, "A"),
            Unit::TEMPERATURE => PreferredUnit::new(1.0, "K"),
            Unit::AMOUNT => PreferredUnit::new(1.0, "mol"),
            Unit::LUMINOUS_INTENSITY => PreferredUnit::new(1.0, "cd"),
            Unit::ANGLE => PreferredUnit::new(1.0, "deg"),
            Unit::VELOCITY => PreferredUnit::new(1.0e3, "m/s"),
            Unit::ACCELERATION => PreferredUnit::new(1.0e3, "m/s^2"),
            Unit::FORCE => PreferredUnit::new(Quantity::NEWTON.value, "N"),
            Unit::PRESSURE => PreferredUnit::new(Quantity::PASCAL.value, "Pa"),
            Unit::ENERGY => PreferredUnit::new(Quantity::JOULE.value, "J"),
            Unit::POWER => PreferredUnit::new(Quantity::WATT.value, "W"),
            ref other => PreferredUnit::internal(other),
        }
    }
}
