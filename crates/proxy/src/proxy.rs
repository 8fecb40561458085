// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The proxy engine: records calls, resolves overrides, forwards the rest.

use crate::behavior::{Behavior, Target};
use crate::call::{CallInfo, CallRecord};
use crate::ledger::CallLedger;
use crate::overrides::OverrideTable;
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// Ledger and override table, guarded together so that assigning a call's
/// index and resolving its behavior happen as one step.
struct State<A, R, E> {
    ledger: CallLedger<A>,
    overrides: OverrideTable<A, R, E>,
}

/// A recording, configurable stand-in for a function.
///
/// Arguments are a single value `A`; use a tuple for multi-argument
/// functions. Clones share the same ledger and overrides.
///
/// ```
/// use callproxy::Proxy;
///
/// let lookup = Proxy::<(&str,), u32, String>::from_fn(|_| 42);
/// lookup.with_args(("a",)).throws("doh".to_string());
/// lookup.on_call(1).returns(7);
///
/// assert_eq!(lookup.invoke(("a",)), Err("doh".to_string()));
/// assert_eq!(lookup.invoke(("a",)), Ok(7));
/// assert_eq!(lookup.invoke(("b",)), Ok(42));
///
/// assert_eq!(lookup.call(2).map(|c| c.args), Some(("b",)));
/// assert!(lookup.received_any(&("a",)));
/// ```
pub struct Proxy<A, R, E> {
    target: Target<A, R, E>,
    state: Arc<Mutex<State<A, R, E>>>,
}

/// Create a proxy around a fallible target
pub fn proxy<A, R, E, F>(target: F) -> Proxy<A, R, E>
where
    F: Fn(A) -> Result<R, E> + Send + Sync + 'static,
{
    Proxy::new(target)
}

impl<A, R, E> Proxy<A, R, E> {
    /// Wrap a target whose `Err` results are forwarded to callers unchanged
    pub fn new<F>(target: F) -> Self
    where
        F: Fn(A) -> Result<R, E> + Send + Sync + 'static,
    {
        Self {
            target: Arc::new(target),
            state: Arc::new(Mutex::new(State {
                ledger: CallLedger::new(),
                overrides: OverrideTable::new(),
            })),
        }
    }

    /// Wrap a target that cannot fail
    pub fn from_fn<F>(target: F) -> Self
    where
        F: Fn(A) -> R + Send + Sync + 'static,
    {
        Self::new(move |args| Ok(target(args)))
    }

    /// Configure the call at `index` (0-based).
    ///
    /// The index does not need to have been reached yet.
    pub fn on_call(&self, index: usize) -> CallConfig<'_, A, R, E> {
        CallConfig {
            proxy: self,
            key: OverrideKey::Index(index),
        }
    }

    /// Configure every call made with arguments equal to `args`
    pub fn with_args(&self, args: A) -> CallConfig<'_, A, R, E> {
        CallConfig {
            proxy: self,
            key: OverrideKey::Args(args),
        }
    }

    /// Number of calls made so far
    pub fn call_count(&self) -> usize {
        self.state.lock().ledger.len()
    }

    /// Whether the proxy has been called at all
    pub fn was_called(&self) -> bool {
        !self.state.lock().ledger.is_empty()
    }

    fn install(&self, key: OverrideKey<A>, behavior: Behavior<A, R, E>)
    where
        A: PartialEq,
    {
        debug!(key = %key, behavior = behavior.kind(), "installing override");
        let mut state = self.state.lock();
        match key {
            OverrideKey::Global => state.overrides.set_global(behavior),
            OverrideKey::Index(index) => state.overrides.set_index(index, behavior),
            OverrideKey::Args(args) => state.overrides.set_args(args, behavior),
        }
    }
}

impl<A: PartialEq, R, E> Proxy<A, R, E> {
    /// Return `value` from every call without a more specific override
    pub fn returns(&self, value: R) -> &Self {
        self.install(OverrideKey::Global, Behavior::Return(value));
        self
    }

    /// Compute the result of every call without a more specific override
    pub fn returns_with<F>(&self, substitute: F) -> &Self
    where
        F: Fn(A, CallInfo) -> Result<R, E> + Send + Sync + 'static,
    {
        self.install(OverrideKey::Global, Behavior::ReturnComputed(Arc::new(substitute)));
        self
    }

    /// Fail every call without a more specific override
    pub fn throws(&self, error: E) -> &Self {
        self.install(OverrideKey::Global, Behavior::Throw(error));
        self
    }

    /// Restore forwarding to the target for calls without a specific override
    pub fn passes_through(&self) -> &Self {
        self.install(OverrideKey::Global, Behavior::Passthrough);
        self
    }
}

impl<A: Clone + PartialEq, R: Clone, E: Clone> Proxy<A, R, E> {
    /// Call through the proxy.
    ///
    /// The call is recorded before anything runs, so it is in the ledger even
    /// when it fails.
    pub fn invoke(&self, args: A) -> Result<R, E> {
        let (index, behavior, resolution) = {
            let mut state = self.state.lock();
            let index = state.ledger.record(args.clone());
            let (behavior, resolution) = state.overrides.resolve(index, &args);
            (index, behavior, resolution)
        };

        trace!(index, resolution = %resolution, behavior = behavior.kind(), "proxied call");
        behavior.execute(&self.target, args, CallInfo { count: index + 1 })
    }

    /// The call at `index`, or `None` if it has not happened
    pub fn call(&self, index: usize) -> Option<CallRecord<A>> {
        self.state.lock().ledger.get(index).cloned()
    }

    pub fn first_call(&self) -> Option<CallRecord<A>> {
        self.call(0)
    }

    pub fn second_call(&self) -> Option<CallRecord<A>> {
        self.call(1)
    }

    pub fn third_call(&self) -> Option<CallRecord<A>> {
        self.call(2)
    }

    /// The most recent call
    pub fn last_call(&self) -> Option<CallRecord<A>> {
        self.state.lock().ledger.last(1).first().cloned()
    }

    /// Every call so far, in order
    pub fn calls(&self) -> Vec<CallRecord<A>> {
        self.state.lock().ledger.records().to_vec()
    }

    /// Calls made with arguments equal to `args`, or `None` if there are none.
    ///
    /// Never returns `Some` with an empty list.
    pub fn received(&self, args: &A) -> Option<Vec<CallRecord<A>>> {
        let matched: Vec<_> = self.state.lock().ledger.matching(args).cloned().collect();
        if matched.is_empty() {
            None
        } else {
            Some(matched)
        }
    }

    /// Whether any call was made with arguments equal to `args`
    pub fn received_any(&self, args: &A) -> bool {
        self.state.lock().ledger.any(args)
    }
}

impl<A, R, E> Clone for Proxy<A, R, E> {
    fn clone(&self) -> Self {
        Self {
            target: Arc::clone(&self.target),
            state: Arc::clone(&self.state),
        }
    }
}

impl<A, R, E> fmt::Debug for Proxy<A, R, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("Proxy")
            .field("calls", &state.ledger.len())
            .field("index_overrides", &state.overrides.index_overrides())
            .field("args_patterns", &state.overrides.args_patterns())
            .finish_non_exhaustive()
    }
}

enum OverrideKey<A> {
    Global,
    Index(usize),
    Args(A),
}

impl<A> fmt::Display for OverrideKey<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverrideKey::Global => f.write_str("global"),
            OverrideKey::Index(index) => write!(f, "call {}", index),
            OverrideKey::Args(_) => f.write_str("args"),
        }
    }
}

/// Configurator for one call index or one argument pattern.
///
/// Returned by [`Proxy::on_call`] and [`Proxy::with_args`]; each method
/// replaces whatever was configured for the same key before.
#[must_use = "a call configuration does nothing until a behavior is installed"]
pub struct CallConfig<'a, A, R, E> {
    proxy: &'a Proxy<A, R, E>,
    key: OverrideKey<A>,
}

impl<'a, A: PartialEq, R, E> CallConfig<'a, A, R, E> {
    /// Return `value` from matching calls
    pub fn returns(self, value: R) -> &'a Proxy<A, R, E> {
        self.install(Behavior::Return(value))
    }

    /// Compute the result of matching calls.
    ///
    /// The substitute gets the call's arguments and its [`CallInfo`].
    pub fn returns_with<F>(self, substitute: F) -> &'a Proxy<A, R, E>
    where
        F: Fn(A, CallInfo) -> Result<R, E> + Send + Sync + 'static,
    {
        self.install(Behavior::ReturnComputed(Arc::new(substitute)))
    }

    /// Fail matching calls with `error`
    pub fn throws(self, error: E) -> &'a Proxy<A, R, E> {
        self.install(Behavior::Throw(error))
    }

    /// Forward matching calls to the target, dropping any earlier override
    pub fn passes_through(self) -> &'a Proxy<A, R, E> {
        self.install(Behavior::Passthrough)
    }

    fn install(self, behavior: Behavior<A, R, E>) -> &'a Proxy<A, R, E> {
        self.proxy.install(self.key, behavior);
        self.proxy
    }
}

#[cfg(test)]
#[path = "proxy_tests.rs"]
mod tests;
