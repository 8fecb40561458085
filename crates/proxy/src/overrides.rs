// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Layered override table.
//!
//! Lookup order for a call, highest first:
//!
//! 1. an override for the call's index
//! 2. an override whose argument pattern equals the call's arguments
//! 3. the global override
//! 4. passthrough

use crate::behavior::Behavior;
use std::collections::HashMap;
use std::fmt;

/// Which layer of the table supplied a call's behavior
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    Index,
    Args,
    Global,
    Default,
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Resolution::Index => "index",
            Resolution::Args => "args",
            Resolution::Global => "global",
            Resolution::Default => "default",
        };
        f.write_str(name)
    }
}

/// Behavior overrides keyed by call index, argument pattern, or nothing.
///
/// Each key holds one behavior; installing again for the same key replaces it.
pub struct OverrideTable<A, R, E> {
    global: Option<Behavior<A, R, E>>,
    by_index: HashMap<usize, Behavior<A, R, E>>,
    by_args: Vec<(A, Behavior<A, R, E>)>,
}

impl<A, R, E> OverrideTable<A, R, E> {
    /// Create an empty table (every call passes through)
    pub fn new() -> Self {
        Self {
            global: None,
            by_index: HashMap::new(),
            by_args: Vec::new(),
        }
    }

    /// Install the fallback behavior for calls without a specific override
    pub fn set_global(&mut self, behavior: Behavior<A, R, E>) {
        self.global = Some(behavior);
    }

    /// Install the behavior for the call at `index`
    pub fn set_index(&mut self, index: usize, behavior: Behavior<A, R, E>) {
        self.by_index.insert(index, behavior);
    }

    /// Number of argument patterns registered
    pub fn args_patterns(&self) -> usize {
        self.by_args.len()
    }

    /// Number of index overrides registered
    pub fn index_overrides(&self) -> usize {
        self.by_index.len()
    }

    /// Check if nothing has been configured
    pub fn is_empty(&self) -> bool {
        self.global.is_none() && self.by_index.is_empty() && self.by_args.is_empty()
    }
}

impl<A: PartialEq, R, E> OverrideTable<A, R, E> {
    /// Install the behavior for calls whose arguments equal `args`.
    ///
    /// An equal pattern already present keeps its position and gets the new
    /// behavior.
    pub fn set_args(&mut self, args: A, behavior: Behavior<A, R, E>) {
        match self.by_args.iter_mut().find(|(pattern, _)| *pattern == args) {
            Some((_, existing)) => *existing = behavior,
            None => self.by_args.push((args, behavior)),
        }
    }

    fn lookup(&self, index: usize, args: &A) -> Option<(&Behavior<A, R, E>, Resolution)> {
        if let Some(behavior) = self.by_index.get(&index) {
            return Some((behavior, Resolution::Index));
        }

        if let Some((_, behavior)) = self.by_args.iter().find(|(pattern, _)| pattern == args) {
            return Some((behavior, Resolution::Args));
        }

        self.global.as_ref().map(|b| (b, Resolution::Global))
    }
}

impl<A: PartialEq, R: Clone, E: Clone> OverrideTable<A, R, E> {
    /// Resolve the behavior for the call at `index` made with `args`
    pub fn resolve(&self, index: usize, args: &A) -> (Behavior<A, R, E>, Resolution) {
        match self.lookup(index, args) {
            Some((behavior, resolution)) => (behavior.clone(), resolution),
            None => (Behavior::Passthrough, Resolution::Default),
        }
    }
}

impl<A, R, E> Default for OverrideTable<A, R, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: fmt::Debug, R: fmt::Debug, E: fmt::Debug> fmt::Debug for OverrideTable<A, R, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverrideTable")
            .field("global", &self.global)
            .field("by_index", &self.by_index)
            .field("by_args", &self.by_args)
            .finish()
    }
}

#[cfg(test)]
#[path = "overrides_tests.rs"]
mod tests;
