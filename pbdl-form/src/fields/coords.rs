// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (C) 2025 Michael Büsch <m@bues.ch>

use crate::{check::Checked, state::LocationInput};
use regex::Regex;
use std::sync::LazyLock;

static RE_DEC_NUM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?(\d+[.]\d*|\d*[.]\d+|\d+)$").expect("RE_DEC_NUM"));
static RE_NS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(\d+[.]\d*|\d*[.]\d+|\d+)([ns])$").expect("RE_NS"));
static RE_EW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(\d+[.]\d*|\d*[.]\d+|\d+)([ew])$").expect("RE_EW"));

const REVERSED_NOTE: &str = "Note: the longitude coordinates are reversed.  \
    This will select a strip stretching the long way around the earth.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Lat,
    Lng,
}

/// Parse one coordinate into its signed decimal string.
fn clean_coord(coord: &str, axis: Axis) -> Option<String> {
    if RE_DEC_NUM.is_match(coord) {
        return Some(coord.to_string());
    }
    let re = match axis {
        Axis::Lat => &*RE_NS,
        Axis::Lng => &*RE_EW,
    };
    let caps = re.captures(coord)?;
    let negative = matches!(&caps[2], "s" | "S" | "w" | "W");
    Some(format!("{}{}", if negative { "-" } else { "" }, &caps[1]))
}

fn is_reversed(min: &str, max: &str) -> bool {
    let (Ok(min), Ok(max)) = (min.parse::<f64>(), max.parse::<f64>()) else {
        return false;
    };
    let span = max - min;
    span > 180.0 || (span < 0.0 && span > -180.0)
}

/// Normalized bounding box values. Empty strings are unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoordParams {
    pub latmin: String,
    pub latmax: String,
    pub lngmin: String,
    pub lngmax: String,
}

impl CoordParams {
    pub fn is_empty(&self) -> bool {
        self.latmin.is_empty()
            && self.latmax.is_empty()
            && self.lngmin.is_empty()
            && self.lngmax.is_empty()
    }
}

pub fn check_coords(input: &LocationInput) -> Checked<CoordParams> {
    let mut ret = Checked::new(
        format!(
            "{} {} {} {}",
            input.latmin, input.latmax, input.lngmin, input.lngmax
        ),
        CoordParams::default(),
    );

    let fields = [
        (&input.latmin, Axis::Lat, "minimum latitude"),
        (&input.latmax, Axis::Lat, "maximum latitude"),
        (&input.lngmin, Axis::Lng, "minimum longitude"),
        (&input.lngmax, Axis::Lng, "maximum longitude"),
    ];
    let mut values: [String; 4] = Default::default();
    for ((raw, axis, label), value) in fields.into_iter().zip(values.iter_mut()) {
        let raw = raw.trim();
        if raw.is_empty() {
            continue;
        }
        match clean_coord(raw, axis) {
            Some(v) => *value = v,
            None => ret.error(format!("invalid value '{raw}' for {label}")),
        }
    }
    let [latmin, latmax, lngmin, lngmax] = values;

    if input.lngmin.trim().is_empty() != input.lngmax.trim().is_empty() {
        ret.error("you must specify both longitude values if you specify one of them");
    }

    if !ret.is_blocking() && !lngmin.is_empty() && !lngmax.is_empty() && is_reversed(&lngmin, &lngmax)
    {
        ret.note(REVERSED_NOTE);
    }

    ret.value = CoordParams {
        latmin,
        latmax,
        lngmin,
        lngmax,
    };
    ret
}

#[cfg(test)]
mod test {
    use super::*;

    fn input(latmin: &str, latmax: &str, lngmin: &str, lngmax: &str) -> LocationInput {
        LocationInput {
            latmin: latmin.to_string(),
            latmax: latmax.to_string(),
            lngmin: lngmin.to_string(),
            lngmax: lngmax.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_clean() {
        assert_eq!(clean_coord("-12.5", Axis::Lat).as_deref(), Some("-12.5"));
        assert_eq!(clean_coord("+3", Axis::Lng).as_deref(), Some("+3"));
        assert_eq!(clean_coord("12.5S", Axis::Lat).as_deref(), Some("-12.5"));
        assert_eq!(clean_coord("40n", Axis::Lat).as_deref(), Some("40"));
        assert_eq!(clean_coord("100w", Axis::Lng).as_deref(), Some("-100"));
        assert_eq!(clean_coord("100E", Axis::Lng).as_deref(), Some("100"));
        assert_eq!(clean_coord("100e", Axis::Lat), None);
        assert_eq!(clean_coord("-10s", Axis::Lat), None);
        assert_eq!(clean_coord("abc", Axis::Lng), None);
    }

    #[test]
    fn test_check() {
        let c = check_coords(&input("10s", "20n", "10w", "30e"));
        assert!(!c.is_blocking());
        assert!(c.notes.is_empty());
        assert_eq!(c.value.latmin, "-10");
        assert_eq!(c.value.latmax, "20");
        assert_eq!(c.value.lngmin, "-10");
        assert_eq!(c.value.lngmax, "30");

        let c = check_coords(&input("x", "", "", ""));
        assert_eq!(c.errors, ["invalid value 'x' for minimum latitude"]);

        let c = check_coords(&input("", "", "", ""));
        assert!(!c.is_blocking());
        assert!(c.value.is_empty());
    }

    #[test]
    fn test_longitude_pair() {
        let c = check_coords(&input("", "", "10", ""));
        assert_eq!(
            c.errors,
            ["you must specify both longitude values if you specify one of them"]
        );

        let c = check_coords(&input("", "", "", "5e"));
        assert!(c.is_blocking());
    }

    #[test]
    fn test_reversed() {
        let c = check_coords(&input("", "", "-100", "100"));
        assert!(!c.is_blocking());
        assert_eq!(c.notes, [REVERSED_NOTE]);

        let c = check_coords(&input("", "", "100", "-50"));
        assert_eq!(c.notes, [REVERSED_NOTE]);

        for (min, max) in [("-10", "100"), ("100", "-90"), ("170", "-170")] {
            let c = check_coords(&input("", "", min, max));
            assert!(c.notes.is_empty(), "{min} {max}");
        }

        let c = check_coords(&input("x", "", "-100", "100"));
        assert!(c.notes.is_empty());
    }
}

// vim: ts=4 sw=4 expandtab
