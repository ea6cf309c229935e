// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (C) 2025 Michael Büsch <m@bues.ch>

use crate::{
    check::Checked,
    refdata::ReferenceData,
    state::{TimeInput, TimeRule},
};
use regex::Regex;
use std::sync::LazyLock;

static RE_DEC_POS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+[.]\d*|\d*[.]\d+|\d+)$").expect("RE_DEC_POS"));

/// Which of the two time fields was edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalSide {
    /// Maximum age (select 1).
    Early,
    /// Minimum age (select 2).
    Late,
}

/// Classification of a time field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeValue {
    Empty,
    /// Age in millions of years.
    Age(String),
    /// Contains digits, but is no valid number.
    BadAge(String),
    Interval(String),
    UnknownInterval(String),
}

pub(crate) fn is_positive_decimal(s: &str) -> bool {
    RE_DEC_POS.is_match(s)
}

fn has_digit(s: &str) -> bool {
    s.bytes().any(|c| c.is_ascii_digit())
}

pub fn classify(value: &str, refdata: &ReferenceData) -> TimeValue {
    let value = value.trim();
    if value.is_empty() {
        TimeValue::Empty
    } else if is_positive_decimal(value) {
        TimeValue::Age(value.to_string())
    } else if has_digit(value) {
        TimeValue::BadAge(value.to_string())
    } else if refdata.is_interval(value) {
        TimeValue::Interval(value.to_string())
    } else {
        TimeValue::UnknownInterval(value.to_string())
    }
}

/// Clear the field opposite to `side` if it holds an incompatible value.
///
/// A number in the edited field clears a name in the other one,
/// and a valid name clears a number. The edited field is never touched.
pub fn clear_on_select(input: &mut TimeInput, side: IntervalSide, refdata: &ReferenceData) {
    let (edited, other) = match side {
        IntervalSide::Early => (&input.early, &mut input.late),
        IntervalSide::Late => (&input.late, &mut input.early),
    };
    let clear = match classify(edited, refdata) {
        TimeValue::Age(_) => !has_digit(other),
        TimeValue::Interval(_) => has_digit(other),
        _ => false,
    };
    if clear && !other.is_empty() {
        log::debug!("Clearing incompatible time field '{other}'");
        other.clear();
    }
}

/// Normalized time section values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeParams {
    pub intervals: Vec<String>,
    pub max_ma: Option<String>,
    pub min_ma: Option<String>,
    pub rule: TimeRule,
    pub buffer: Option<String>,
    /// Diversity time resolution, if not the default.
    pub div_reso: Option<String>,
    pub div_recent: bool,
}

pub fn check_time(input: &TimeInput, refdata: &ReferenceData, advanced: bool) -> Checked<TimeParams> {
    let mut ret = Checked::new(
        format!("{} - {}", input.early, input.late),
        TimeParams {
            rule: input.rule,
            div_recent: input.div_recent,
            ..Default::default()
        },
    );

    for (side, value) in [(IntervalSide::Early, &input.early), (IntervalSide::Late, &input.late)] {
        match classify(value, refdata) {
            TimeValue::Empty => (),
            TimeValue::Age(age) => match side {
                IntervalSide::Early => ret.value.max_ma = Some(age),
                IntervalSide::Late => ret.value.min_ma = Some(age),
            },
            TimeValue::BadAge(v) => {
                ret.error(format!("The string '{v}' is not a valid age or interval"));
            }
            TimeValue::Interval(name) => ret.value.intervals.push(name),
            TimeValue::UnknownInterval(v) => {
                ret.error(format!("The interval '{v}' was not found in the database"));
            }
        }
    }

    if let (Some(max), Some(min)) = (&ret.value.max_ma, &ret.value.min_ma)
        && let (Ok(max), Ok(min)) = (max.parse::<f64>(), min.parse::<f64>())
        && max < min
    {
        ret.error("You must specify the maximum age on the left and the minimum on the right");
    }

    let buffer = input.buffer.trim();
    if input.rule == TimeRule::Buffer && !buffer.is_empty() {
        if advanced && !is_positive_decimal(buffer) {
            ret.error(format!("invalid value '{buffer}' for timebuffer"));
        } else {
            ret.value.buffer = Some(buffer.to_string());
        }
    }

    let div_reso = input.div_reso.trim();
    if !div_reso.is_empty() && div_reso != "stage" {
        ret.value.div_reso = Some(div_reso.to_string());
    }

    ret
}


// vim: ts=4 sw=4 expandtab
