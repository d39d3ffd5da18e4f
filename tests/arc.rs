// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg(feature = "arc")]

use lazy_static::lazy_static;

use styleexpr::*;

// Ensure that compiled expressions can be shared across threads.
lazy_static! {
    static ref VALUE: Value = Value::Null;
    static ref STYLE: StyleExpression = {
        let raw = Value::from_json_str(r#"["coalesce", ["get", "name"], "unnamed"]"#)
            .expect("valid json");
        compile(&raw, Some(&PropertySpec::new("string"))).expect("valid expression")
    };
}

fn assert_send_sync<T: Send + Sync>(_: &T) {}

#[test]
fn shared_expression() -> anyhow::Result<()> {
    assert_send_sync(&*VALUE);
    assert_send_sync(&*STYLE);

    let handles: Vec<_> = (0..4)
        .map(|i| {
            std::thread::spawn(move || {
                let feature =
                    FeatureProperties::new(Value::from_json_str(&format!(r#"{{"name": "road {i}"}}"#))?);
                let ctx = EvaluationContext::default().with_feature(&feature);
                anyhow::Ok(STYLE.evaluate(&ctx))
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let value = handle.join().map_err(|_| anyhow::anyhow!("thread panicked"))??;
        assert_eq!(value, Value::from(format!("road {i}")));
    }

    assert_eq!(STYLE.evaluate(&EvaluationContext::default()), Value::from("unnamed"));
    Ok(())
}
