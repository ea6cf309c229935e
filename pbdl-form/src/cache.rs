// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (C) 2025 Michael Büsch <m@bues.ch>

use lru::LruCache;
use std::num::NonZeroUsize;

/// Bounded lookup cache.
///
/// Entries are only reused for byte-identical keys.
/// Reading does not refresh an entry, so the least recently
/// stored entry is evicted first.
#[derive(Debug)]
pub struct LookupCache<V> {
    cache: LruCache<String, V>,
}

impl<V> LookupCache<V> {
    /// A capacity of 0 is treated as 1.
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: LruCache::new(capacity),
        }
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.cache.peek(key)
    }

    pub fn insert(&mut self, key: &str, value: V) {
        self.cache.put(key.to_string(), value);
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    pub fn clear(&mut self) {
        self.cache.clear();
    }
}


// vim: ts=4 sw=4 expandtab
