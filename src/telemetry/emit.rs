use anyhow::Result;
use serde::Serialize;
use serde_json::json;
use std::io::{self, Write};

#[derive(Serialize)]
pub struct Meta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u128>,
}

fn envelope<T: Serialize>(op: &str, result: &T, meta: Option<&Meta>) -> serde_json::Value {
    json!({ "op": op, "result": result, "meta": meta })
}

pub fn print_result<T: Serialize>(op: &str, result: &T, meta: Option<Meta>) -> Result<()> {
    let env = envelope(op, result, meta.as_ref());
    let mut out = io::stdout();
    serde_json::to_writer(&mut out, &env)?;
    writeln!(&mut out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_envelope_carries_op_result_and_duration() {
        let env = envelope(
            "agg",
            &json!({ "inserted": 3 }),
            Some(&Meta { duration_ms: Some(42) }),
        );
        assert_eq!(env["op"], "agg");
        assert_eq!(env["result"]["inserted"], 3);
        assert_eq!(env["meta"]["duration_ms"], 42);
    }

    #[test]
    fn meta_is_null_when_absent() {
        let env = envelope("feed", &json!({}), None);
        assert!(env["meta"].is_null());
    }
}
