//! Value encoder: argument values → GraphQL literal text.
use std::fmt::Write as _;

use chrono::{DateTime, FixedOffset};

use crate::error::{Error, Result};
use crate::format::Layout;
use crate::parameter::Argument;
use crate::value::{InputObject, Value};

/// Encodes `value` as written on a line indented `level` deep.
pub fn encode(value: &Value, layout: Layout, level: usize) -> Result<String> {
    let mut out = String::new();
    write_value(&mut out, value, layout, level)?;
    Ok(out)
}

pub(crate) fn write_argument(out: &mut String, argument: &Argument, layout: Layout, level: usize) -> Result<()> {
    match argument {
        Argument::Variable(name) => {
            out.push('$');
            out.push_str(name);
            Ok(())
        }
        Argument::Literal(value) => write_value(out, value, layout, level),
    }
}

pub(crate) fn write_value(out: &mut String, value: &Value, layout: Layout, level: usize) -> Result<()> {
    match value {
        Value::Null => out.push_str("null"),
        Value::Json(json) => write_json(out, json, layout, level)?,
        Value::Enum(e) => out.push_str(e.literal()),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::DateTime(dt) => {
            out.push('"');
            write_date_time(out, dt);
            out.push('"');
        }
        Value::Object(obj) => write_input_object(out, obj, layout, level)?,
        Value::String(s) | Value::Id(s) => write_quoted(out, s),
        Value::Uuid(id) => {
            let _ = write!(out, "\"{id}\"");
        }
        Value::List(items) => {
            write_list(out, items.iter(), layout, level, |out, item, level| write_value(out, item, layout, level))?
        }
        Value::Int(i) => {
            let _ = write!(out, "{i}");
        }
        Value::UInt(u) => {
            let _ = write!(out, "{u}");
        }
        Value::Float(f) if f.is_finite() => {
            let _ = write!(out, "{f}");
        }
        Value::Float(_) => out.push_str("null"),
        Value::Other(text) => write_quoted(out, text),
    }
    Ok(())
}

// ————————————————————————————————————————————————————————————————————————————
// COMPOSITES
// ————————————————————————————————————————————————————————————————————————————

/// `[a,b]` compact; one element per line when indented, closing bracket
/// back at `level`.
fn write_list<'a, T: 'a>(
    out: &mut String,
    items: impl ExactSizeIterator<Item = &'a T>,
    layout: Layout,
    level: usize,
    mut write_item: impl FnMut(&mut String, &'a T, usize) -> Result<()>,
) -> Result<()> {
    out.push('[');
    let empty = items.len() == 0;
    for (i, item) in items.enumerate() {
        if i > 0 {
            out.push(',');
        }
        layout.push_line_break(out, level + 1);
        write_item(out, item, level + 1)?;
    }
    if !empty {
        layout.push_line_break(out, level);
    }
    out.push(']');
    Ok(())
}

/// `{a:1,b:2}` compact; one `name: value` per line when indented.
fn write_properties<'a, V: 'a>(
    out: &mut String,
    properties: impl Iterator<Item = (&'a str, &'a V)>,
    layout: Layout,
    level: usize,
    mut write_property: impl FnMut(&mut String, &'a V, usize) -> Result<()>,
) -> Result<()> {
    out.push('{');
    let mut any = false;
    for (name, value) in properties {
        if any && !layout.is_indented() {
            out.push(',');
        }
        layout.push_line_break(out, level + 1);
        out.push_str(name);
        out.push(':');
        out.push_str(layout.space());
        write_property(out, value, level + 1)?;
        any = true;
    }
    if any {
        layout.push_line_break(out, level);
    }
    out.push('}');
    Ok(())
}

fn write_input_object(out: &mut String, obj: &InputObject, layout: Layout, level: usize) -> Result<()> {
    write_properties(out, obj.properties(), layout, level, |out, arg, level| {
        write_argument(out, arg, layout, level)
    })
}

fn write_json(out: &mut String, json: &serde_json::Value, layout: Layout, level: usize) -> Result<()> {
    use serde_json::Value as Json;
    match json {
        Json::Null => out.push_str("null"),
        Json::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Json::Number(n) => {
            let _ = write!(out, "{n}");
        }
        Json::String(s) => write_quoted(out, s),
        Json::Array(items) => {
            write_list(out, items.iter(), layout, level, |out, item, level| write_json(out, item, layout, level))?
        }
        Json::Object(map) => {
            if let Some(key) = map.keys().find(|k| k.chars().any(char::is_whitespace)) {
                return Err(Error::WhitespaceInKey(key.clone()));
            }
            write_properties(out, map.iter().map(|(k, v)| (k.as_str(), v)), layout, level, |out, v, level| {
                write_json(out, v, layout, level)
            })?
        }
    }
    Ok(())
}

// ————————————————————————————————————————————————————————————————————————————
// SCALARS
// ————————————————————————————————————————————————————————————————————————————

/// Round-trip form with seven fractional digits; `Z` for a zero offset.
fn write_date_time(out: &mut String, dt: &DateTime<FixedOffset>) {
    let ticks = (dt.timestamp_subsec_nanos() % 1_000_000_000) / 100;
    let _ = write!(out, "{}.{ticks:07}", dt.format("%Y-%m-%dT%H:%M:%S"));
    if dt.offset().local_minus_utc() == 0 {
        out.push('Z');
    } else {
        let _ = write!(out, "{}", dt.format("%:z"));
    }
}

/// Double-quoted with GraphQL string escapes.
fn write_quoted(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04X}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::Formatting;
    use crate::parameter::Parameter;
    use crate::value::EnumValue;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn compact(value: impl Into<Value>) -> String {
        encode(&value.into(), Layout::COMPACT, 0).unwrap()
    }

    fn indented(value: impl Into<Value>) -> String {
        encode(&value.into(), Layout::indented(2), 0).unwrap()
    }

    #[test]
    fn literal_table() {
        assert_eq!(compact(true), "true");
        assert_eq!(compact(4), "4");
        assert_eq!(compact(10.789), "10.789");
        assert_eq!(compact("a b"), "\"a b\"");
        assert_eq!(compact(Value::Null), "null");
        assert_eq!(compact(None::<String>), "null");
        assert_eq!(compact(vec![1, 2]), "[1,2]");
        assert_eq!(indented(vec![1, 2]), "[\n  1,\n  2\n]");
    }

    #[test]
    fn date_times_use_round_trip_format() {
        let utc = Utc.with_ymd_and_hms(2019, 6, 30, 0, 27, 47).unwrap();
        assert_eq!(compact(utc), "\"2019-06-30T00:27:47.0000000Z\"");

        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let local = offset.with_ymd_and_hms(2019, 6, 30, 2, 27, 47).unwrap()
            + chrono::Duration::nanoseconds(123_456_700);
        assert_eq!(compact(local), "\"2019-06-30T02:27:47.1234567+02:00\"");
    }

    #[test]
    fn enums_ids_and_fallbacks() {
        assert_eq!(compact(EnumValue::new("NewHope").with_wire_name("NEWHOPE")), "NEWHOPE");
        assert_eq!(compact(EnumValue::new("EMPIRE")), "EMPIRE");
        assert_eq!(compact(Value::id("1000")), "\"1000\"");
        let id = uuid::Uuid::nil();
        assert_eq!(compact(id), "\"00000000-0000-0000-0000-000000000000\"");
        assert_eq!(compact(Value::display(std::net::Ipv4Addr::LOCALHOST)), "\"127.0.0.1\"");
        assert_eq!(compact(f64::NAN), "null");
        assert_eq!(compact(u64::MAX), "18446744073709551615");
    }

    #[test]
    fn strings_are_escaped() {
        assert_eq!(compact("say \"hi\""), r#""say \"hi\"""#);
        assert_eq!(compact("C:\\tmp"), r#""C:\\tmp""#);
        assert_eq!(compact("a\nb\u{1}"), r#""a\nb\u0001""#);
    }

    #[test]
    fn nested_lists_indent_per_level() {
        assert_eq!(compact(vec![vec![1, 2], vec![]]), "[[1,2],[]]");
        assert_eq!(indented(vec![vec![1], vec![2]]), "[\n  [\n    1\n  ],\n  [\n    2\n  ]\n]");
    }

    #[test]
    fn input_objects_render_variables_and_literals() {
        let mut inner = InputObject::new();
        inner.set("lte", Value::from(5)).unwrap();
        let mut obj = InputObject::new();
        obj.set("name", Value::from("Luke")).unwrap();
        obj.set("first", &Parameter::<i32>::variable("first", "Int").unwrap()).unwrap();
        obj.set("height", Value::from(inner)).unwrap();

        assert_eq!(compact(obj.clone()), r#"{name:"Luke",first:$first,height:{lte:5}}"#);
        assert_eq!(
            encode(&Value::from(obj), Layout::new(Formatting::Indented, 2), 1).unwrap(),
            "{\n    name: \"Luke\"\n    first: $first\n    height: {\n      lte: 5\n    }\n  }"
        );
        assert_eq!(compact(InputObject::new()), "{}");
    }

    #[test]
    fn dynamic_json_dispatches_on_kind() {
        assert_eq!(compact(json!(null)), "null");
        assert_eq!(compact(json!(3)), "3");
        assert_eq!(compact(json!(2.5)), "2.5");
        assert_eq!(compact(json!(false)), "false");
        assert_eq!(compact(json!("x")), "\"x\"");
        assert_eq!(compact(json!({"a": [1, "b"], "c": {"d": null}})), r#"{a:[1,"b"],c:{d:null}}"#);
    }

    #[test]
    fn json_keys_with_whitespace_are_rejected() {
        let err = encode(&Value::from(json!({"bad key": 1})), Layout::COMPACT, 0).unwrap_err();
        assert_eq!(err, Error::WhitespaceInKey("bad key".into()));
        assert!(err.is_invalid_argument());
    }
}
