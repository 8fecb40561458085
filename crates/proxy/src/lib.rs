// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Function call interception for tests.
//!
//! A [`Proxy`] wraps a function, records every call made through it, and
//! forwards to the wrapped function unless an override says otherwise.
//! Overrides can target one call index, one argument pattern, or every call:
//!
//! | layer | configured with | wins over |
//! |-------|-----------------|-----------|
//! | index | [`Proxy::on_call`] | args, global |
//! | args | [`Proxy::with_args`] | global |
//! | global | [`Proxy::returns`], [`Proxy::throws`] | passthrough |
//!
//! Each layer can return a literal, compute a result from the call's
//! arguments ([`CallConfig::returns_with`]), or fail with an error.
//!
//! ```
//! use callproxy::proxy;
//!
//! let fetch = proxy(|(id,): (u32,)| Ok::<_, String>(id * 2));
//! fetch.on_call(0).throws("timeout".to_string());
//! fetch.with_args((5,)).returns_with(|(id,), call| Ok(id + call.count as u32));
//!
//! assert_eq!(fetch.invoke((1,)), Err("timeout".to_string()));
//! assert_eq!(fetch.invoke((1,)), Ok(2));
//! assert_eq!(fetch.invoke((5,)), Ok(8));
//!
//! assert_eq!(fetch.received(&(1,)).map(|calls| calls.len()), Some(2));
//! assert!(fetch.received(&(9,)).is_none());
//! ```
//!
//! Overrides can also be written as TOML or JSON and applied to proxies over
//! [`serde_json::Value`]s; see [`ProxyScript`].

mod behavior;
mod call;
mod ledger;
mod overrides;
mod proxy;
mod script;

pub use behavior::{Behavior, Substitute, Target};
pub use call::{CallInfo, CallRecord};
pub use ledger::CallLedger;
pub use overrides::{OverrideTable, Resolution};
pub use proxy::{proxy, CallConfig, Proxy};
pub use script::{
    ArgsRule, IndexRule, ProxyScript, ScriptError, ScriptedError, ScriptedProxy, ScriptOutcome,
};
