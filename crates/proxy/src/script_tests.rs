// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use rstest::rstest;
use serde_json::json;

fn forty_two() -> ScriptedProxy {
    Proxy::from_fn(|_| json!(42))
}

#[test]
fn test_parse_full_toml_script() {
    let script = ProxyScript::from_toml_str(
        r#"
        name = "flaky"
        returns = 43

        [[on_call]]
        index = 0
        throws = "doh"

        [[with_args]]
        args = ["a", 1]
        returns = { ok = true }
        "#,
    )
    .unwrap();

    assert_eq!(script.name, "flaky");
    assert_eq!(script.returns, Some(json!(43)));
    assert_eq!(script.on_call.len(), 1);
    assert_eq!(script.with_args[0].args, vec![json!("a"), json!(1)]);
    assert_eq!(
        script.with_args[0].outcome().unwrap(),
        ScriptOutcome::Returns(json!({ "ok": true }))
    );
}

#[test]
fn test_parse_json_script() {
    let script = ProxyScript::from_json_str(
        r#"{ "throws": "down", "on_call": [{ "index": 2, "returns": [1, 2] }] }"#,
    )
    .unwrap();

    assert_eq!(
        script.global_outcome().unwrap(),
        Some(ScriptOutcome::Throws(ScriptedError::new("down")))
    );
    assert_eq!(script.on_call[0].index, 2);
}

#[test]
fn test_empty_script_is_valid() {
    let script = ProxyScript::from_toml_str("").unwrap();
    assert!(script.global_outcome().unwrap().is_none());

    let p = script.proxy(|_| Ok(json!(42))).unwrap();
    assert_eq!(p.invoke(vec![]), Ok(json!(42)));
}

#[test]
fn test_unknown_field_rejected() {
    let err = ProxyScript::from_toml_str("retruns = 1").unwrap_err();
    assert!(matches!(err, ScriptError::Toml(_)));
    assert!(err.to_string().contains("retruns"));
}

#[rstest]
#[case::both_global("returns = 1\nthrows = \"x\"", "not both")]
#[case::rule_without_outcome("[[on_call]]\nindex = 0", "required")]
#[case::rule_with_both("[[with_args]]\nargs = []\nreturns = 1\nthrows = \"x\"", "not both")]
#[case::duplicate_index(
    "[[on_call]]\nindex = 1\nreturns = 1\n[[on_call]]\nindex = 1\nreturns = 2",
    "Duplicate on_call index 1"
)]
fn test_validation_errors(#[case] content: &str, #[case] expected: &str) {
    let err = ProxyScript::from_toml_str(content).unwrap_err();
    assert!(matches!(err, ScriptError::Validation(_)), "got {:?}", err);
    assert!(err.to_string().contains(expected), "got {}", err);
}

#[test]
fn test_apply_installs_all_layers() {
    let script = ProxyScript::from_toml_str(
        r#"
        returns = 43

        [[on_call]]
        index = 0
        returns = 44

        [[with_args]]
        args = ["a"]
        throws = "doh"
        "#,
    )
    .unwrap();

    let p = forty_two();
    script.apply(&p).unwrap();

    assert_eq!(p.invoke(vec![json!("a")]), Ok(json!(44)));
    assert_eq!(p.invoke(vec![json!("a")]), Err(ScriptedError::new("doh")));
    assert_eq!(p.invoke(vec![json!("b")]), Ok(json!(43)));
    assert_eq!(p.invoke(vec![]), Ok(json!(43)));
}

#[test]
fn test_apply_invalid_script_installs_nothing() {
    let script = ProxyScript {
        returns: Some(json!(1)),
        on_call: vec![IndexRule {
            index: 0,
            returns: None,
            throws: None,
        }],
        ..Default::default()
    };

    let p = forty_two();
    assert!(script.apply(&p).is_err());
    assert_eq!(p.invoke(vec![]), Ok(json!(42)));
}

#[test]
fn test_toml_integers_match_json_integers() {
    let script = ProxyScript::from_toml_str("[[with_args]]\nargs = [7, -3]\nreturns = \"hit\"").unwrap();
    let p = script.proxy(|_| Ok(Value::Null)).unwrap();

    assert_eq!(p.invoke(vec![json!(7), json!(-3)]), Ok(json!("hit")));
    assert_eq!(p.invoke(vec![json!(7)]), Ok(Value::Null));
}

#[test]
fn test_scripted_error_display() {
    assert_eq!(ScriptedError::new("doh").to_string(), "doh");
}
