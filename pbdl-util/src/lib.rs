// -*- coding: utf-8 -*-
// Copyright (C) 2025 Michael Büsch <m@bues.ch>
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![forbid(unsafe_code)]

mod errors;
mod query;
mod strings;

pub use errors::{InitError, NoUrlError};
pub use query::{Query, escape_value};
pub use strings::{split_delim, split_list, split_off_first_item};

// vim: ts=4 sw=4 expandtab
