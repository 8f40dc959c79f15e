use std::fs;
use std::str::FromStr;

use anyhow::Context;
use clap::ValueEnum;
use seqlinq::{CastMode, Enumerable, TypeDescriptor, TypeMode, TypeRegistry, Value, type_of};
use tracing::debug;

use crate::render::{render_json, render_text};
use crate::{OutputFormat, QueryArgs, json};

/// One `--op` argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Skip(usize),
    Take(usize),
    OfType(String),
    OfTypeStrict(String),
    Cast { ty: String, mode: CastMode },
    DefaultIfEmpty(serde_json::Value),
    Distinct,
    /// Projects the `value` field of record entries.
    Values,
    NotNull,
}

impl FromStr for Op {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, arg) = match s.split_once(':') {
            Some((name, arg)) => (name, Some(arg)),
            None => (s, None),
        };
        let require = |what: &str| arg.ok_or_else(|| format!("operator `{name}` expects {what}"));
        let count = |raw: &str| raw.parse::<usize>().map_err(|err| format!("invalid count `{raw}`: {err}"));

        match name {
            "skip" => Ok(Op::Skip(count(require("a count")?)?)),
            "take" => Ok(Op::Take(count(require("a count")?)?)),
            "of-type" => Ok(Op::OfType(require("a type name")?.to_owned())),
            "of-type-strict" => Ok(Op::OfTypeStrict(require("a type name")?.to_owned())),
            "cast" => {
                let target = require("a type name")?;
                let (ty, mode) = match target.split_once(':') {
                    Some((ty, mode)) => (ty, parse_cast_mode(mode)?),
                    None => (target, CastMode::Inherit),
                };
                Ok(Op::Cast { ty: ty.to_owned(), mode })
            }
            "default-if-empty" => {
                let raw = require("a JSON value")?;
                serde_json::from_str(raw)
                    .map(Op::DefaultIfEmpty)
                    .map_err(|err| format!("invalid JSON default `{raw}`: {err}"))
            }
            "distinct" | "values" | "not-null" if arg.is_some() => Err(format!("operator `{name}` takes no argument")),
            "distinct" => Ok(Op::Distinct),
            "values" => Ok(Op::Values),
            "not-null" => Ok(Op::NotNull),
            other => Err(format!("unknown operator `{other}`")),
        }
    }
}

fn parse_cast_mode(raw: &str) -> Result<CastMode, String> {
    match raw {
        "primitive" => Ok(CastMode::ToPrimitive),
        "boxed" => Ok(CastMode::ToBoxed),
        "inherit" => Ok(CastMode::Inherit),
        other => Err(format!("unknown cast mode `{other}` (expected primitive, boxed or inherit)")),
    }
}

impl Op {
    pub fn apply(&self, seq: &Enumerable<Value>, registry: &TypeRegistry) -> anyhow::Result<Enumerable<Value>> {
        let next = match self {
            Op::Skip(n) => seq.skip(*n),
            Op::Take(n) => seq.take(*n),
            Op::OfType(name) => seq.of_type(resolve(registry, name)?, TypeMode::Either),
            Op::OfTypeStrict(name) => seq.of_type_strict(resolve(registry, name)?),
            Op::Cast { ty, mode } => seq.cast(resolve(registry, ty)?, *mode),
            Op::DefaultIfEmpty(default) => seq.default_if_empty(json::from_json(default.clone())),
            Op::Distinct => seq.distinct(),
            Op::Values => seq.select(|entry| {
                entry.as_object().and_then(|object| object.get("value")).cloned().unwrap_or_default()
            }),
            Op::NotNull => seq.not_null(),
        };
        Ok(next)
    }
}

fn resolve<'r>(registry: &'r TypeRegistry, name: &str) -> anyhow::Result<&'r TypeDescriptor> {
    registry.lookup(name).with_context(|| format!("unknown type `{name}` (known: {})", registry.names().join(", ")))
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminal {
    ToArray,
    Count,
    First,
    Last,
    Sum,
    Average,
    Min,
    Max,
}

/// Result of a terminal operator.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Sequence(Vec<Value>),
    Count(usize),
    Element(Value),
    Number(f64),
}

impl Terminal {
    /// Numeric terminals read every element as a number and fail on the
    /// first element that is not one.
    pub fn evaluate(self, seq: &Enumerable<Value>) -> seqlinq::Result<Outcome> {
        let numbers = || seq.cast(&type_of::NUMBER, CastMode::ToPrimitive);
        let number = |value: &Value| value.as_number().unwrap_or_default();
        let outcome = match self {
            Terminal::ToArray => Outcome::Sequence(seq.to_vec()?),
            Terminal::Count => Outcome::Count(seq.count()?),
            Terminal::First => Outcome::Element(seq.first()?),
            Terminal::Last => Outcome::Element(seq.last()?),
            Terminal::Sum => Outcome::Number(numbers().sum(number)?),
            Terminal::Average => Outcome::Number(numbers().average(number)?),
            Terminal::Min => Outcome::Number(numbers().min(number)?),
            Terminal::Max => Outcome::Number(numbers().max(number)?),
        };
        Ok(outcome)
    }
}

pub fn run(args: &QueryArgs) -> anyhow::Result<String> {
    let text = fs::read_to_string(&args.input).with_context(|| format!("failed to read {}", args.input.display()))?;
    let document: serde_json::Value =
        serde_json::from_str(&text).with_context(|| format!("{} is not valid JSON", args.input.display()))?;

    let registry = TypeRegistry::new();
    let mut seq = json::source(document);
    for op in &args.ops {
        seq = op.apply(&seq, &registry)?;
        debug!(?op, "applied operator");
    }

    let outcome = args.terminal.evaluate(&seq).with_context(|| format!("{:?} failed", args.terminal))?;
    match args.format {
        OutputFormat::Text => Ok(render_text(&outcome)),
        OutputFormat::Json => render_json(&outcome),
    }
}
