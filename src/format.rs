//! Naming Template Formatter
//!
//! Renders naming templates like `"{data[value]} {data[unit]} Resistor"`
//! against a JSON record. Subset of Python's `str.format`: doubled braces
//! escape, `a.b` and `a[b]` walk into objects, conversions and format specs
//! are accepted and ignored.

use serde_json::Value;

/// Placeholder emitted for fields that cannot be resolved
pub const ERROR_PLACEHOLDER: &str = "error";

/// Render `template` against `kwargs`
pub fn format(template: &str, kwargs: &Value) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        let (before, from_brace) = rest.split_at(open);
        let leading = from_brace.len() - from_brace.trim_start_matches('{').len();
        let Some(close) = from_brace[leading..].find('}').map(|i| i + leading) else {
            break;
        };
        let after_close = &from_brace[close..];
        let trailing = after_close.len() - after_close.trim_start_matches('}').len();
        let inner = &from_brace[leading..close];

        out.push_str(before);
        out.push_str(&"{".repeat(leading / 2));
        out.push_str(&replacement(inner, leading, trailing, kwargs));
        out.push_str(&"}".repeat(trailing / 2));
        rest = &from_brace[close + trailing..];
    }
    out.push_str(rest);
    out
}

fn replacement(inner: &str, leading: usize, trailing: usize, kwargs: &Value) -> String {
    if leading % 2 != trailing % 2 {
        log::error!("Unbalanced brackets around '{}'", inner);
        return inner.to_string();
    }
    if leading % 2 == 0 {
        return inner.to_string();
    }
    let field_name = inner
        .split(|c: char| c == '!' || c == ':')
        .next()
        .unwrap_or_default();
    match lookup(field_name, kwargs) {
        Some(value) => render(value),
        None => {
            log::error!("Can't get {}", field_name);
            ERROR_PLACEHOLDER.to_string()
        }
    }
}

/// Split `a.b[c]` into `["a", "b", "c"]`
fn steps(field_name: &str) -> Option<Vec<&str>> {
    let first_end = field_name
        .find(|c: char| c == '.' || c == '[')
        .unwrap_or(field_name.len());
    if first_end == 0 {
        return None;
    }
    let mut steps = vec![&field_name[..first_end]];
    let mut rest = &field_name[first_end..];
    while !rest.is_empty() {
        if let Some(attr) = rest.strip_prefix('.') {
            let end = attr.find(|c: char| c == '.' || c == '[').unwrap_or(attr.len());
            if end == 0 {
                return None;
            }
            steps.push(&attr[..end]);
            rest = &attr[end..];
        } else if let Some(index) = rest.strip_prefix('[') {
            let end = index.find(']')?;
            if end == 0 {
                return None;
            }
            steps.push(&index[..end]);
            rest = &index[end + 1..];
        } else {
            return None;
        }
    }
    Some(steps)
}

fn lookup<'a>(field_name: &str, kwargs: &'a Value) -> Option<&'a Value> {
    let mut value = kwargs;
    for step in steps(field_name)? {
        value = match value {
            Value::Object(map) => map.get(step)?,
            Value::Array(list) => list.get(step.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(value)
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "None".to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_subscript_lookup() {
        let kwargs = json!({"data": {"name": "Widget"}});
        assert_eq!(format("Item {data[name]}", &kwargs), "Item Widget");
    }

    #[test]
    fn test_doubled_braces_escape() {
        assert_eq!(format("{{literal}}", &json!({})), "{literal}");
        assert_eq!(format("{{{data[n]}}}", &json!({"data": {"n": 3}})), "{3}");
    }

    #[test]
    fn test_attribute_and_index_paths() {
        let kwargs = json!({"data": {"pins": [8, 14]}});
        assert_eq!(format("{data.pins[1]} pins", &kwargs), "14 pins");
    }

    #[test]
    fn test_conversion_and_format_spec_ignored() {
        let kwargs = json!({"data": {"v": 4.7}});
        assert_eq!(format("{data[v]!s:>8} Ohm", &kwargs), "4.7 Ohm");
    }

    #[test]
    fn test_missing_field_degrades() {
        assert_eq!(format("{data[nope]} x", &json!({"data": {}})), "error x");
        assert_eq!(format("{}", &json!({})), "error");
    }

    #[test]
    fn test_unbalanced_emits_inner() {
        assert_eq!(format("{{name}", &json!({})), "{name");
    }

    #[test]
    fn test_no_closing_brace_is_verbatim() {
        assert_eq!(format("open { only", &json!({})), "open { only");
        assert_eq!(format("plain", &json!({})), "plain");
    }
}
