// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::config::Config;
use ansi_term::Colour;
use caliper_core::one_line;

/// Evaluates one expression and renders the result or error message
/// per the configured colors. Returns false on failure.
pub fn eval_line(config: &Config, line: &str) -> (String, bool) {
    match one_line(line, config.schema()) {
        Ok(result) => (result, true),
        Err(message) if config.colors.enabled => {
            (Colour::Red.paint(message).to_string(), false)
        }
        Err(message) => (message, false),
    }
}
