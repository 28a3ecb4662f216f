// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The predefined unit catalog: a process-wide, immutable table mapping
//! unit names to their [`Quantity`] constants. Built once on first use
//! and shared freely across threads; all lookups are read-only.

use crate::types::Quantity;
use once_cell::sync::Lazy;
use std::collections::BTreeMap;
use strsim::jaro_winkler;

static UNITS: Lazy<BTreeMap<&'static str, Quantity>> = Lazy::new(|| {
    let mut map = BTreeMap::new();
    let mut define = |names: &[&'static str], quantity: Quantity| {
        for &name in names {
            map.insert(name, quantity);
        }
    };

    define(&["nm", "nanometer"], Quantity::NANOMETER);
    define(&["µm", "um", "micrometer"], Quantity::MICROMETER);
    define(&["mm", "millimeter"], Quantity::MILLIMETER);
    define(&["cm", "centimeter"], Quantity::CENTIMETER);
    define(&["dm", "decimeter"], Quantity::DECIMETER);
    define(&["m", "meter"], Quantity::METER);
    define(&["km", "kilometer"], Quantity::KILOMETER);

    define(&["l", "L", "liter"], Quantity::LITER);

    define(&["µg", "ug", "microgram"], Quantity::MICROGRAM);
    define(&["mg", "milligram"], Quantity::MILLIGRAM);
    define(&["g", "gram"], Quantity::GRAM);
    define(&["kg", "kilogram"], Quantity::KILOGRAM);
    define(&["t", "ton", "tonne"], Quantity::TONNE);

    define(&["s", "second"], Quantity::SECOND);
    define(&["min", "minute"], Quantity::MINUTE);
    define(&["h", "hour"], Quantity::HOUR);

    define(&["A", "ampere"], Quantity::AMPERE);
    define(&["mA", "milliampere"], Quantity::MILLIAMPERE);
    define(&["kA", "kiloampere"], Quantity::KILOAMPERE);
    define(&["MA", "megaampere"], Quantity::MEGAAMPERE);

    define(&["K", "kelvin"], Quantity::KELVIN);
    define(&["mK", "millikelvin"], Quantity::MILLIKELVIN);
    define(&["µK", "uK", "microkelvin"], Quantity::MICROKELVIN);

    define(&["mol", "mole"], Quantity::MOLE);
    define(&["cd", "candela"], Quantity::CANDELA);

    define(&["in", "inch"], Quantity::INCH);
    define(&["ft", "foot"], Quantity::FOOT);
    define(&["thou", "mil"], Quantity::THOU);
    define(&["yd", "yard"], Quantity::YARD);

    define(&["lb", "pound"], Quantity::POUND);
    define(&["oz", "ounce"], Quantity::OUNCE);
    define(&["st", "stone"], Quantity::STONE);
    define(&["cwt", "hundredweight"], Quantity::HUNDREDWEIGHT);

    define(&["N", "newton"], Quantity::NEWTON);
    define(&["kN", "kilonewton"], Quantity::KILONEWTON);
    define(&["MN", "meganewton"], Quantity::MEGANEWTON);
    define(&["mN", "millinewton"], Quantity::MILLINEWTON);

    define(&["Pa", "pascal"], Quantity::PASCAL);
    define(&["kPa", "kilopascal"], Quantity::KILOPASCAL);
    define(&["MPa", "megapascal"], Quantity::MEGAPASCAL);
    define(&["GPa", "gigapascal"], Quantity::GIGAPASCAL);
    define(&["psi"], Quantity::PSI);

    define(&["W", "watt"], Quantity::WATT);
    define(&["VA", "voltampere"], Quantity::VOLT_AMPERE);

    define(&["J", "joule"], Quantity::JOULE);
    define(&["Nm", "newtonmeter"], Quantity::NEWTON_METER);
    define(&["VAs"], Quantity::VOLT_AMPERE_SECOND);
    define(&["Ws"], Quantity::WATT_SECOND);

    define(&["deg", "°", "degree"], Quantity::DEGREE);
    define(&["rad", "radian"], Quantity::RADIAN);
    define(&["gon"], Quantity::GON);

    map
});

/// Looks up a unit name. Names are case-sensitive, since SI symbols
/// are (`mN` is millinewton, `MN` meganewton).
pub fn lookup(name: &str) -> Option<Quantity> {
    UNITS.get(name).copied()
}

/// All catalog names, in sorted order.
pub fn names() -> impl Iterator<Item = &'static str> {
    UNITS.keys().copied()
}

/// Ranks catalog names against a query, best first. Exact and affix
/// matches outrank plain string similarity.
pub fn search(query: &str, num_results: usize) -> Vec<&'static str> {
    let query = query.to_lowercase();
    let mut results = UNITS
        .keys()
        .map(|&name| {
            let lowercased = name.to_lowercase();
            let modifier = if lowercased == query {
                4_000
            } else if lowercased.starts_with(&query) {
                3_000
            } else if lowercased.ends_with(&query) {
                2_000
            } else if lowercased.contains(&query) {
                1_000
            } else {
                0
            };
            let score = (jaro_winkler(&lowercased, &query) * 1000.0) as i32 + modifier;
            (score, name)
        })
        .collect::<Vec<_>>();
    results.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(b.1)));
    results.truncate(num_results);
    results.into_iter().map(|(_, name)| name).collect()
}

/// A "did you mean" candidate for an unknown unit name, if any catalog
/// entry is close enough.
pub fn suggest(name: &str) -> Option<&'static str> {
    let query = name.to_lowercase();
    UNITS
        .keys()
        .map(|&candidate| {
            let score = jaro_winkler(&candidate.to_lowercase(), &query);
            (score, candidate)
        })
        .filter(|&(score, _)| score >= 0.75)
        .max_by(|a, b| a.0.partial_cmp(&b.0).unwrap().then_with(|| b.1.cmp(a.1)))
        .map(|(_, candidate)| candidate)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::types::Unit;

    #[test]
    fn lookup_symbols() {
        assert_eq!(lookup("kg"), Some(Quantity::KILOGRAM));
        assert_eq!(lookup("m"), Some(Quantity::METER));
        assert_eq!(lookup("N"), Some(Quantity::NEWTON));
        assert_eq!(lookup("frobnicate"), None);
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert_eq!(lookup("mN"), Some(Quantity::MILLINEWTON));
        assert_eq!(lookup("MN"), Some(Quantity::MEGANEWTON));
        assert_eq!(lookup("KG"), None);
    }

    #[test]
    fn aliases_agree() {
        assert_eq!(lookup("meter"), lookup("m"));
        assert_eq!(lookup("°"), lookup("deg"));
        assert_eq!(lookup("mil"), lookup("thou"));
    }

    #[test]
    fn factors_are_internal_base() {
        // millimeter, kilogram, second, degree are the base scales
        assert_eq!(lookup("mm").unwrap().value, 1.0);
        assert_eq!(lookup("kg").unwrap().value, 1.0);
        assert_eq!(lookup("s").unwrap().value, 1.0);
        assert_eq!(lookup("deg").unwrap().value, 1.0);
        assert_eq!(lookup("m").unwrap().unit, Unit::LENGTH);
    }

    #[test]
    fn suggestions() {
        assert_eq!(suggest("metre"), Some("meter"));
        assert_eq!(suggest("kilogramm"), Some("kilogram"));
        assert_eq!(suggest("zzzzqqqq"), None);
    }

    #[test]
    fn search_ranks_prefix_matches() {
        let results = search("kilo", 5);
        assert!(!results.is_empty());
        assert!(results[0].starts_with("kilo"));
    }
}
