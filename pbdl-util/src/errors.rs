// -*- coding: utf-8 -*-
// Copyright (C) 2025 Michael Büsch <m@bues.ch>
// SPDX-License-Identifier: Apache-2.0 OR MIT

macro_rules! define_simple_error {
    ($name:ident, $text:literal) => {
        #[derive(Debug, Copy, Clone, PartialEq, Eq)]
        pub struct $name;

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
                write!(f, $text)
            }
        }

        impl std::error::Error for $name {}
    };
}

define_simple_error!(
    InitError,
    "Initialization failed! Please contact the data service administrator."
);
define_simple_error!(NoUrlError, "No download URL could be generated.");

// vim: ts=4 sw=4 expandtab
