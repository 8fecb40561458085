// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Append-only call ledger.

use crate::call::CallRecord;

/// Ordered record of every call made through a proxy.
///
/// Records are only ever appended; indices are assigned from the current
/// length so the k-th call always lands at index k.
#[derive(Clone, Debug)]
pub struct CallLedger<A> {
    records: Vec<CallRecord<A>>,
}

impl<A> CallLedger<A> {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Append a call and return the index it was assigned
    pub fn record(&mut self, args: A) -> usize {
        let index = self.records.len();
        self.records.push(CallRecord::new(index, args));
        index
    }

    /// Get the record at `index`, if that call has happened
    pub fn get(&self, index: usize) -> Option<&CallRecord<A>> {
        self.records.get(index)
    }

    /// All records in call order
    pub fn records(&self) -> &[CallRecord<A>] {
        &self.records
    }

    /// Iterate records in call order
    pub fn iter(&self) -> std::slice::Iter<'_, CallRecord<A>> {
        self.records.iter()
    }

    /// The last N records, oldest first
    pub fn last(&self, n: usize) -> &[CallRecord<A>] {
        &self.records[self.records.len().saturating_sub(n)..]
    }

    /// Count records matching a predicate
    pub fn count<F: Fn(&CallRecord<A>) -> bool>(&self, pred: F) -> usize {
        self.records.iter().filter(|r| pred(r)).count()
    }

    /// Get the total number of calls
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if no call has been made
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<A: PartialEq> CallLedger<A> {
    /// Records whose arguments equal `args`, in call order
    pub fn matching<'a>(&'a self, args: &'a A) -> impl Iterator<Item = &'a CallRecord<A>> + 'a {
        self.records.iter().filter(move |r| r.args == *args)
    }

    /// Whether any recorded call was made with `args`
    pub fn any(&self, args: &A) -> bool {
        self.records.iter().any(|r| r.args == *args)
    }
}

impl<A> Default for CallLedger<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, A> IntoIterator for &'a CallLedger<A> {
    type Item = &'a CallRecord<A>;
    type IntoIter = std::slice::Iter<'a, CallRecord<A>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
#[path = "ledger_tests.rs"]
mod tests;
