//! `{{name}}` placeholder substitution.
//!
//! A placeholder is `{{name}}` or `{{name:fallback}}`. Bound names are
//! replaced by their value, unbound names by the inline fallback. A
//! placeholder with neither is kept verbatim for the runtime property
//! resolver.

use std::collections::BTreeMap;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Replaces the placeholders of `text`; returns whether anything changed.
pub(crate) fn substitute(text: &mut String, bindings: &BTreeMap<String, String>) -> bool {
    if !text.contains(OPEN) {
        return false;
    }

    let mut output = String::with_capacity(text.len());
    let mut rest = text.as_str();
    let mut changed = false;

    while let Some(start) = rest.find(OPEN) {
        let after_open = &rest[start + OPEN.len()..];
        let Some(end) = after_open.find(CLOSE) else {
            break;
        };

        output.push_str(&rest[..start]);
        let body = &after_open[..end];
        match resolve(body, bindings) {
            Some(value) => {
                output.push_str(value);
                changed = true;
            }
            None => {
                output.push_str(OPEN);
                output.push_str(body);
                output.push_str(CLOSE);
            }
        }
        rest = &after_open[end + CLOSE.len()..];
    }
    output.push_str(rest);

    if changed {
        *text = output;
    }
    changed
}

fn resolve<'a>(body: &'a str, bindings: &'a BTreeMap<String, String>) -> Option<&'a str> {
    let (name, fallback) = split(body);
    if name.is_empty() {
        return None;
    }
    bindings.get(name).map(String::as_str).or(fallback)
}

fn split(body: &str) -> (&str, Option<&str>) {
    match body.split_once(':') {
        Some((name, fallback)) => (name.trim(), Some(fallback)),
        None => (body.trim(), None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bindings(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn run(text: &str, pairs: &[(&str, &str)]) -> String {
        let mut text = text.to_owned();
        substitute(&mut text, &bindings(pairs));
        text
    }

    #[test]
    fn test_substitutes_bound_names() {
        assert_eq!(run("{{count}}", &[("count", "4")]), "4");
        assert_eq!(
            run("jms:queue:{{queue}}?ttl={{ttl}}", &[("queue", "orders"), ("ttl", "60")]),
            "jms:queue:orders?ttl=60"
        );
        assert_eq!(run("{{ count }}", &[("count", "4")]), "4");
    }

    #[test]
    fn test_inline_fallback() {
        assert_eq!(run("{{count:10}}", &[]), "10");
        assert_eq!(run("{{count:10}}", &[("count", "4")]), "4");
        assert_eq!(run("{{url:http://x:80}}", &[]), "http://x:80");
    }

    #[test]
    fn test_unknown_placeholders_are_kept() {
        assert_eq!(run("{{other}} and {{count}}", &[("count", "1")]), "{{other}} and 1");
        assert_eq!(run("{{}}", &[]), "{{}}");
        assert_eq!(run("unterminated {{count", &[("count", "1")]), "unterminated {{count");
    }

    #[test]
    fn test_reports_changes() {
        let mut text = "plain".to_owned();
        assert!(!substitute(&mut text, &bindings(&[("a", "b")])));
        let mut text = "{{a}}".to_owned();
        assert!(substitute(&mut text, &bindings(&[("a", "b")])));
    }
}
