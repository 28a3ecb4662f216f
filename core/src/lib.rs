// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Caliper is a dimensioned-quantity engine: a value type coupling a
//! floating-point magnitude to a physical dimension vector, plus a
//! textual-expression parser that turns strings like `12 kg*m/s^2`
//! into such values. `caliper_core` is the library the frontends use.
//!
//! Magnitudes are stored in an internal base system (millimeter,
//! kilogram, second, ampere, kelvin, mole, candela, degree); named
//! units are conversion factors into that system. Addition and
//! subtraction are dimension-checked, so `5m + 3kg` fails rather than
//! producing a nonsense value.
//!
//! ## Example
//!
//! ```rust
//! use caliper_core::{parse, Quantity, Unit};
//!
//! # fn main() -> Result<(), caliper_core::ParseError> {
//! let force = parse("12 kg*m/s^2")?;
//! assert_eq!(force.unit, Unit::FORCE);
//!
//! let sum = parse("5m + 3m")?;
//! assert_eq!(sum, Quantity::new(8000.0, Unit::LENGTH));
//! # Ok(())
//! # }
//! ```
//!
//! Display formatting is decoupled from the internal base system: a
//! [`schema::UnitSchema`] decides which unit a dimension vector is
//! shown in, and [`Quantity::to_preferred`] re-expresses the magnitude
//! accordingly.

pub mod catalog;
pub mod parsing;
pub mod schema;
pub mod types;

mod helpers;

pub use crate::parsing::ParseError;
pub use crate::types::{Quantity, QuantityError, Unit};
pub use helpers::{one_line, parse};
