// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! What a proxied call does once its override has been resolved.

use crate::call::CallInfo;
use std::fmt;
use std::sync::Arc;

/// The wrapped function a proxy forwards to by default
pub type Target<A, R, E> = Arc<dyn Fn(A) -> Result<R, E> + Send + Sync>;

/// A function installed in place of a return value, invoked per call
pub type Substitute<A, R, E> = Arc<dyn Fn(A, CallInfo) -> Result<R, E> + Send + Sync>;

/// Outcome override for a call.
///
/// Whether a configured return is a literal or a substitute implementation is
/// fixed when it is configured, so executing a behavior never inspects values.
pub enum Behavior<A, R, E> {
    /// Forward to the target
    Passthrough,
    /// Hand back a clone of the value
    Return(R),
    /// Invoke the substitute with the call's arguments and call info
    ReturnComputed(Substitute<A, R, E>),
    /// Fail with a clone of the error
    Throw(E),
}

impl<A, R, E> Behavior<A, R, E> {
    /// Short name used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            Behavior::Passthrough => "passthrough",
            Behavior::Return(_) => "return",
            Behavior::ReturnComputed(_) => "return_computed",
            Behavior::Throw(_) => "throw",
        }
    }

    /// Whether this is the default forwarding behavior
    pub fn is_passthrough(&self) -> bool {
        matches!(self, Behavior::Passthrough)
    }

    /// Run the behavior for one call.
    ///
    /// Errors from the target or a substitute are returned untouched.
    pub fn execute(self, target: &Target<A, R, E>, args: A, info: CallInfo) -> Result<R, E> {
        match self {
            Behavior::Passthrough => target(args),
            Behavior::Return(value) => Ok(value),
            Behavior::ReturnComputed(substitute) => substitute(args, info),
            Behavior::Throw(error) => Err(error),
        }
    }
}

impl<A, R: Clone, E: Clone> Clone for Behavior<A, R, E> {
    fn clone(&self) -> Self {
        match self {
            Behavior::Passthrough => Behavior::Passthrough,
            Behavior::Return(value) => Behavior::Return(value.clone()),
            Behavior::ReturnComputed(substitute) => {
                Behavior::ReturnComputed(Arc::clone(substitute))
            }
            Behavior::Throw(error) => Behavior::Throw(error.clone()),
        }
    }
}

impl<A, R, E> Default for Behavior<A, R, E> {
    fn default() -> Self {
        Behavior::Passthrough
    }
}

impl<A, R: fmt::Debug, E: fmt::Debug> fmt::Debug for Behavior<A, R, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Behavior::Passthrough => f.write_str("Passthrough"),
            Behavior::Return(value) => f.debug_tuple("Return").field(value).finish(),
            Behavior::ReturnComputed(_) => f.write_str("ReturnComputed(..)"),
            Behavior::Throw(error) => f.debug_tuple("Throw").field(error).finish(),
        }
    }
}

#[cfg(test)]
#[path = "behavior_tests.rs"]
mod tests;
