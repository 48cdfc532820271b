//! Declarative request validation.
//!
//! A [`ValidationChain`] is an immutable, ordered list of [`FieldRule`]s.
//! Running it never stops at the first problem: every rule and every step
//! inside a rule is evaluated, and all violations come back in declaration
//! order. Sanitizing steps (trim, case folding, escaping) feed later steps
//! and later rules on the same field, then the sanitized values are handed
//! to the handler as [`Validated`].

pub mod rules;

use std::collections::HashMap;

use serde::Serialize;
use serde_json::{Map, Value};

/// Where a field is read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Body,
    Query,
    Params,
}

/// One failed check, serialized as `{type, value?, msg, path, location}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(rename = "msg")]
    pub message: String,
    #[serde(rename = "path")]
    pub field: String,
    pub location: Location,
}

impl Violation {
    pub fn new(
        field: impl Into<String>,
        location: Location,
        message: impl Into<String>,
        value: Option<String>,
    ) -> Self {
        Self {
            kind: "field",
            value,
            message: message.into(),
            field: field.into(),
            location,
        }
    }
}

/// Raw request input, gathered once per request
#[derive(Debug, Default, Clone)]
pub struct RequestInput {
    body: Map<String, Value>,
    query: HashMap<String, String>,
    params: HashMap<String, String>,
}

impl RequestInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Anything other than a JSON object is treated as an empty body
    pub fn with_body(mut self, body: Value) -> Self {
        if let Value::Object(map) = body {
            self.body = map;
        }
        self
    }

    pub fn with_query(mut self, query: HashMap<String, String>) -> Self {
        self.query = query;
        self
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Textual form of a field, `None` when absent or JSON null
    fn lookup(&self, location: Location, field: &str) -> Option<String> {
        match location {
            Location::Body => match self.body.get(field)? {
                Value::Null => None,
                Value::String(s) => Some(s.clone()),
                Value::Bool(b) => Some(b.to_string()),
                Value::Number(n) => Some(n.to_string()),
                other => Some(other.to_string()),
            },
            Location::Query => self.query.get(field).cloned(),
            Location::Params => self.params.get(field).cloned(),
        }
    }
}

/// A single predicate or transform
#[derive(Debug, Clone)]
pub enum Step {
    Trim,
    Lowercase,
    Uppercase,
    Escape,
    /// Alphanumeric after removing the listed punctuation
    Charset {
        punctuation: &'static str,
        message: &'static str,
    },
    Length {
        min: usize,
        max: Option<usize>,
        message: &'static str,
    },
    Int {
        message: &'static str,
    },
    OneOf {
        values: &'static [&'static str],
        message: &'static str,
    },
    NotEmpty {
        message: &'static str,
    },
}

enum StepOutcome {
    Passed,
    Transformed(String),
    Failed(&'static str),
}

impl Step {
    fn apply(&self, value: &str) -> StepOutcome {
        match self {
            Step::Trim => StepOutcome::Transformed(value.trim().to_string()),
            Step::Lowercase => StepOutcome::Transformed(value.to_lowercase()),
            Step::Uppercase => StepOutcome::Transformed(value.to_uppercase()),
            Step::Escape => StepOutcome::Transformed(escape_html(value)),
            Step::Charset { punctuation, message } => check(is_allowed_text(value, punctuation), *message),
            Step::Length { min, max, message } => {
                let len = value.chars().count();
                check(len >= *min && max.map_or(true, |max| len <= max), *message)
            }
            Step::Int { message } => check(is_int(value), *message),
            Step::OneOf { values, message } => check(values.contains(&value), *message),
            Step::NotEmpty { message } => check(!value.is_empty(), *message),
        }
    }
}

fn check(ok: bool, message: &'static str) -> StepOutcome {
    if ok {
        StepOutcome::Passed
    } else {
        StepOutcome::Failed(message)
    }
}

/// Letters accepted on top of ASCII alphanumerics
const EXTRA_LETTERS: &str = "ÁÉÍÑÓÚÜáéíñóúü";

fn is_allowed_text(value: &str, punctuation: &str) -> bool {
    let mut remaining = value.chars().filter(|c| !punctuation.contains(*c)).peekable();
    remaining.peek().is_some()
        && remaining.all(|c| c.is_ascii_alphanumeric() || EXTRA_LETTERS.contains(c))
}

fn is_int(value: &str) -> bool {
    let digits = value.strip_prefix(&['+', '-'][..]).unwrap_or(value);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) && value.parse::<i64>().is_ok()
}

fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '/' => out.push_str("&#x2F;"),
            '\\' => out.push_str("&#x5C;"),
            '`' => out.push_str("&#96;"),
            other => out.push(other),
        }
    }
    out
}

/// Declaration of the checks for one field
#[derive(Debug, Clone)]
pub struct FieldRule {
    field: &'static str,
    location: Location,
    optional: bool,
    steps: Vec<Step>,
}

struct Evaluation {
    value: Option<String>,
    violations: Vec<Violation>,
}

impl FieldRule {
    fn new(field: &'static str, location: Location) -> Self {
        Self {
            field,
            location,
            optional: false,
            steps: Vec::new(),
        }
    }

    pub fn body(field: &'static str) -> Self {
        Self::new(field, Location::Body)
    }

    pub fn query(field: &'static str) -> Self {
        Self::new(field, Location::Query)
    }

    pub fn param(field: &'static str) -> Self {
        Self::new(field, Location::Params)
    }

    /// Skip the whole rule when the field is absent or null
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    pub fn trim(self) -> Self {
        self.step(Step::Trim)
    }

    pub fn lowercase(self) -> Self {
        self.step(Step::Lowercase)
    }

    pub fn uppercase(self) -> Self {
        self.step(Step::Uppercase)
    }

    pub fn escape(self) -> Self {
        self.step(Step::Escape)
    }

    pub fn charset(self, punctuation: &'static str, message: &'static str) -> Self {
        self.step(Step::Charset { punctuation, message })
    }

    pub fn length(self, min: usize, max: Option<usize>, message: &'static str) -> Self {
        self.step(Step::Length { min, max, message })
    }

    pub fn int(self, message: &'static str) -> Self {
        self.step(Step::Int { message })
    }

    pub fn one_of(self, values: &'static [&'static str], message: &'static str) -> Self {
        self.step(Step::OneOf { values, message })
    }

    pub fn not_empty(self, message: &'static str) -> Self {
        self.step(Step::NotEmpty { message })
    }

    fn key(&self) -> (Location, &'static str) {
        (self.location, self.field)
    }

    fn evaluate(&self, current: Option<String>) -> Evaluation {
        if self.optional && current.is_none() {
            return Evaluation {
                value: None,
                violations: Vec::new(),
            };
        }

        let present = current.is_some();
        let mut value = current.unwrap_or_default();
        let mut violations = Vec::new();

        for step in &self.steps {
            match step.apply(&value) {
                StepOutcome::Passed => {}
                StepOutcome::Transformed(next) => value = next,
                StepOutcome::Failed(message) => violations.push(Violation::new(
                    self.field,
                    self.location,
                    message,
                    present.then(|| value.clone()),
                )),
            }
        }

        Evaluation {
            value: present.then_some(value),
            violations,
        }
    }
}

/// Sanitized values of every declared field that was present
#[derive(Debug, Default, Clone)]
pub struct Validated {
    values: HashMap<Location, HashMap<&'static str, String>>,
}

impl Validated {
    pub fn get(&self, location: Location, field: &str) -> Option<&str> {
        self.values
            .get(&location)?
            .get(field)
            .map(String::as_str)
    }

    pub fn body(&self, field: &str) -> Option<&str> {
        self.get(Location::Body, field)
    }

    pub fn query(&self, field: &str) -> Option<&str> {
        self.get(Location::Query, field)
    }

    pub fn param(&self, field: &str) -> Option<&str> {
        self.get(Location::Params, field)
    }
}

/// Ordered, immutable list of field rules
#[derive(Debug, Clone)]
pub struct ValidationChain {
    rules: Vec<FieldRule>,
}

impl ValidationChain {
    pub fn new(rules: Vec<FieldRule>) -> Self {
        Self { rules }
    }

    /// Run every rule against `input`. Returns the sanitized values, or all
    /// violations in declaration order.
    pub fn run(&self, input: &RequestInput) -> Result<Validated, Vec<Violation>> {
        let mut values: HashMap<(Location, &'static str), Option<String>> = HashMap::new();
        let mut violations = Vec::new();

        for rule in &self.rules {
            let current = match values.get(&rule.key()) {
                Some(value) => value.clone(),
                None => input.lookup(rule.location, rule.field),
            };
            let evaluation = rule.evaluate(current);
            violations.extend(evaluation.violations);
            values.insert(rule.key(), evaluation.value);
        }

        if !violations.is_empty() {
            return Err(violations);
        }

        let mut validated = Validated::default();
        for ((location, field), value) in values {
            if let Some(value) = value {
                validated
                    .values
                    .entry(location)
                    .or_default()
                    .insert(field, value);
            }
        }
        Ok(validated)
    }
}
