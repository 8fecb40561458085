// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Recorded call data types.

use serde::{Deserialize, Serialize};

/// One invocation made through a proxy
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CallRecord<A> {
    /// Position among all calls to the proxy (0-based)
    pub index: usize,

    /// 1-based call number, always `index + 1`
    pub count: usize,

    /// Arguments the call was made with
    pub args: A,
}

impl<A> CallRecord<A> {
    pub(crate) fn new(index: usize, args: A) -> Self {
        Self {
            index,
            count: index + 1,
            args,
        }
    }

    /// Call info handed to substitute implementations for this call
    pub fn info(&self) -> CallInfo {
        CallInfo { count: self.count }
    }
}

/// Trailing argument passed to a substitute implementation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallInfo {
    /// 1-based call number of the invocation being served
    pub count: usize,
}

#[cfg(test)]
#[path = "call_tests.rs"]
mod tests;
