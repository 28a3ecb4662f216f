// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::parsing::text_expr;
use crate::schema::UnitSchema;
use crate::types::Quantity;

/// Parses a complete expression into a single [`Quantity`].
pub fn parse(input: &str) -> Result<Quantity, text_expr::ParseError> {
    text_expr::parse(input)
}

/// Parses an expression and renders the result through the given
/// display schema, as a single output line.
pub fn one_line(input: &str, schema: &dyn UnitSchema) -> Result<String, String> {
    let quantity = text_expr::parse(input).map_err(|e| e.to_string())?;
    let (value, label) = quantity.to_preferred(schema).map_err(|e| e.to_string())?;
    if label.is_empty() {
        Ok(format!("{}", value))
    } else {
        Ok(format!("{} {}", value, label))
    }
}
