// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use caliper_core::catalog;
use rustyline::{
    completion::{Completer, Pair},
    highlight::Highlighter,
    hint::Hinter,
    validate::Validator,
    Context as LineContext, Helper, Result,
};

/// Completes unit names from the predefined catalog.
pub struct CaliperHelper;

impl Completer for CaliperHelper {
    type Candidate = Pair;

    fn complete(&self, line: &str, pos: usize, _ctx: &LineContext) -> Result<(usize, Vec<Pair>)> {
        let start = line[..pos]
            .rfind(|c: char| !c.is_alphanumeric() && c != '_')
            .map(|i| i + c_len(line, i))
            .unwrap_or(0);
        let word = &line[start..pos];
        if word.is_empty() {
            return Ok((start, vec![]));
        }

        let results = catalog::search(word, 100)
            .into_iter()
            .filter(|name| name.starts_with(word))
            .take(10)
            .map(|name| Pair {
                display: name.to_owned(),
                replacement: name.to_owned(),
            })
            .collect();

        Ok((start, results))
    }
}

fn c_len(line: &str, i: usize) -> usize {
    line[i..].chars().next().map(char::len_utf8).unwrap_or(0)
}

impl Helper for CaliperHelper {}

impl Validator for CaliperHelper {}

impl Highlighter for CaliperHelper {}

impl Hinter for CaliperHelper {
    type Hint = String;
}
