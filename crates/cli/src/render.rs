use std::fmt::Write;

use owo_colors::{OwoColorize, Stream};
use serde::Serialize;
use seqlinq::Value;

use crate::json::{number_to_json, to_json};
use crate::pipeline::Outcome;

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "type")]
pub(crate) enum OutcomeSummary {
    Sequence { items: Vec<serde_json::Value> },
    Count { count: usize },
    Element { value: serde_json::Value },
    Number { value: serde_json::Value },
}

fn summarize(outcome: &Outcome) -> OutcomeSummary {
    match outcome {
        Outcome::Sequence(items) => OutcomeSummary::Sequence { items: items.iter().map(to_json).collect() },
        Outcome::Count(count) => OutcomeSummary::Count { count: *count },
        Outcome::Element(value) => OutcomeSummary::Element { value: to_json(value) },
        Outcome::Number(n) => OutcomeSummary::Number { value: number_to_json(*n) },
    }
}

pub(crate) fn render_json(outcome: &Outcome) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(&summarize(outcome))?)
}

/// One value per line; strings, numbers and nulls are coloured when stdout
/// supports it.
pub(crate) fn render_text(outcome: &Outcome) -> String {
    let mut output = String::new();
    match outcome {
        Outcome::Sequence(items) => {
            for item in items {
                let _ = writeln!(&mut output, "{}", colorize_value(item));
            }
        }
        Outcome::Count(count) => {
            let _ = writeln!(&mut output, "{}", colorize_value(&Value::from(*count as f64)));
        }
        Outcome::Element(value) => {
            let _ = writeln!(&mut output, "{}", colorize_value(value));
        }
        Outcome::Number(n) => {
            let _ = writeln!(&mut output, "{}", colorize_value(&Value::from(*n)));
        }
    }
    output.trim_end().to_owned()
}

fn colorize_value(value: &Value) -> String {
    let plain = value.to_string();
    match value {
        Value::Null => plain.if_supports_color(Stream::Stdout, |text| text.dimmed().to_string()).to_string(),
        _ if value.as_str().is_some() => {
            plain.if_supports_color(Stream::Stdout, |text| text.fg_rgb::<136, 192, 74>().to_string()).to_string()
        }
        _ if value.as_number().is_some() => {
            plain.if_supports_color(Stream::Stdout, |text| text.fg_rgb::<79, 166, 255>().to_string()).to_string()
        }
        Value::Object(_) => plain.if_supports_color(Stream::Stdout, |text| text.bold().to_string()).to_string(),
        _ => plain,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::strip_ansi;
    use rstest::rstest;
    use seqlinq::Object;

    #[rstest]
    fn text_lists_values_one_per_line() {
        let outcome = Outcome::Sequence(vec![
            Value::from("a"),
            Value::from(1.5),
            Value::Null,
            Value::from(Object::plain().with_field("key", "k")),
        ]);
        assert_eq!(strip_ansi(&render_text(&outcome)), "\"a\"\n1.5\nnull\nObject { key: \"k\" }");
    }

    #[rstest]
    fn empty_sequence_renders_nothing() {
        assert_eq!(render_text(&Outcome::Sequence(vec![])), "");
    }

    #[rstest]
    fn json_is_tagged_by_outcome() {
        let payload = render_json(&Outcome::Count(4)).expect("json");
        let json: serde_json::Value = serde_json::from_str(&payload).expect("parse");
        assert_eq!(json, serde_json::json!({"type": "Count", "count": 4}));

        let payload = render_json(&Outcome::Number(2.5)).expect("json");
        let json: serde_json::Value = serde_json::from_str(&payload).expect("parse");
        assert_eq!(json, serde_json::json!({"type": "Number", "value": 2.5}));
    }
}
