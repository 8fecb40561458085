// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

//! Property tests over arbitrary call sequences.

use callproxy::Proxy;
use proptest::prelude::*;

fn target(a: i64, b: i64) -> Result<i64, String> {
    if b == 0 {
        Err(format!("{} / 0", a))
    } else {
        Ok(a.wrapping_div(b))
    }
}

fn divide() -> Proxy<(i64, i64), i64, String> {
    Proxy::new(|(a, b): (i64, i64)| target(a, b))
}

fn calls() -> impl Strategy<Value = Vec<(i64, i64)>> {
    proptest::collection::vec((-50i64..50, -3i64..3), 0..40)
}

proptest! {
    #[test]
    fn prop_unconfigured_proxy_is_transparent(args in calls()) {
        let p = divide();
        for (a, b) in &args {
            prop_assert_eq!(p.invoke((*a, *b)), target(*a, *b));
        }
    }

    #[test]
    fn prop_ledger_mirrors_invocations(args in calls(), probe in 0usize..60) {
        let p = divide();
        p.throws("configured".to_string());
        for (a, b) in &args {
            let _ = p.invoke((*a, *b));
        }

        prop_assert_eq!(p.call_count(), args.len());
        for (i, expected) in args.iter().enumerate() {
            let record = p.call(i).unwrap();
            prop_assert_eq!(record.index, i);
            prop_assert_eq!(record.count, i + 1);
            prop_assert_eq!(&record.args, expected);
        }

        if probe >= args.len() {
            prop_assert!(p.call(probe).is_none());
        }
    }

    #[test]
    fn prop_index_override_hits_only_its_call(args in calls(), k in 0usize..40) {
        let p = divide();
        p.on_call(k).returns(i64::MIN);

        for (i, (a, b)) in args.iter().enumerate() {
            let result = p.invoke((*a, *b));
            if i == k {
                prop_assert_eq!(result, Ok(i64::MIN));
            } else {
                prop_assert_eq!(result, target(*a, *b));
            }
        }
    }

    #[test]
    fn prop_args_override_hits_every_equal_call(args in calls(), pick in any::<prop::sample::Index>()) {
        prop_assume!(!args.is_empty());
        let pattern = args[pick.index(args.len())];

        let p = divide();
        p.with_args(pattern).throws("matched".to_string());

        for (a, b) in &args {
            let result = p.invoke((*a, *b));
            if (*a, *b) == pattern {
                prop_assert_eq!(result, Err("matched".to_string()));
            } else {
                prop_assert_eq!(result, target(*a, *b));
            }
        }
    }

    #[test]
    fn prop_received_agrees_with_received_any(args in calls(), a in -50i64..50, b in -3i64..3) {
        let p = divide();
        for call in &args {
            let _ = p.invoke(*call);
        }

        let expected: Vec<usize> = args
            .iter()
            .enumerate()
            .filter(|(_, call)| **call == (a, b))
            .map(|(i, _)| i)
            .collect();

        match p.received(&(a, b)) {
            Some(records) => {
                prop_assert!(p.received_any(&(a, b)));
                let indices: Vec<usize> = records.iter().map(|r| r.index).collect();
                prop_assert_eq!(indices, expected);
            }
            None => {
                prop_assert!(!p.received_any(&(a, b)));
                prop_assert!(expected.is_empty());
            }
        }
    }

    #[test]
    fn prop_substitute_sees_one_based_count(n in 1usize..30) {
        let p = divide();
        p.returns_with(|_, call| Ok(call.count as i64));

        for i in 0..n {
            prop_assert_eq!(p.invoke((0, 1)), Ok(i as i64 + 1));
        }
    }
}
