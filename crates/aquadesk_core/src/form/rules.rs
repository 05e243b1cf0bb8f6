//! Declarative field rules and the pure `validate` function.

use std::sync::LazyLock;

use regex::Regex;

use super::draft::Draft;
use super::errors::FormErrors;

/// Exactly ten digits
pub static PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{10}$").expect("phone pattern compiles"));

/// Something, an `@`, something, a dot, something
pub static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("email pattern compiles"));

/// Meter serials such as `MTR-00123`
pub static METER_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]{2,4}-?\d{3,8}$").expect("meter pattern compiles"));

/// Billing periods written `YYYY-MM`
pub static BILLING_PERIOD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-(0[1-9]|1[0-2])$").expect("period pattern compiles"));

/// Calendar dates written `YYYY-MM-DD`
pub static ISO_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("date pattern compiles"));

/// How a draft value is typed when it is sent to the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldKind {
    #[default]
    Text,
    Integer,
    Number,
    /// One of `FieldSpec::options`
    Select,
}

/// Validation rule for one field
#[derive(Debug, Clone, Default)]
pub struct FieldRule {
    pub required: bool,
    pub pattern: Option<&'static Regex>,
    pub pattern_message: Option<&'static str>,
    pub range: Option<(f64, f64)>,
}

impl FieldRule {
    pub fn optional() -> Self {
        Self::default()
    }

    pub fn required() -> Self {
        Self {
            required: true,
            ..Self::default()
        }
    }

    pub fn pattern(mut self, pattern: &'static LazyLock<Regex>, message: &'static str) -> Self {
        self.pattern = Some(LazyLock::force(pattern));
        self.pattern_message = Some(message);
        self
    }

    /// Required, exactly ten digits
    pub fn phone() -> Self {
        Self::required().pattern(&PHONE, "Phone must be exactly 10 digits")
    }

    /// Required, loose `x@y.z` shape
    pub fn email() -> Self {
        Self::required().pattern(&EMAIL, "Email is invalid")
    }

    /// Optional `YYYY-MM-DD` date
    pub fn date() -> Self {
        Self::optional().pattern(&ISO_DATE, "Date must be YYYY-MM-DD")
    }

    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.range = Some((min, max));
        self
    }
}

/// A form field: its draft key, display label, type, rule and options.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub rule: FieldRule,
    pub options: Vec<&'static str>,
}

/// Ordered field specs for one entity form.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    fields: Vec<FieldSpec>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(
        mut self,
        name: &'static str,
        label: &'static str,
        kind: FieldKind,
        rule: FieldRule,
    ) -> Self {
        self.fields.push(FieldSpec {
            name,
            label,
            kind,
            rule,
            options: Vec::new(),
        });
        self
    }

    pub fn text(self, name: &'static str, label: &'static str, rule: FieldRule) -> Self {
        self.push(name, label, FieldKind::Text, rule)
    }

    pub fn integer(self, name: &'static str, label: &'static str, rule: FieldRule) -> Self {
        self.push(name, label, FieldKind::Integer, rule)
    }

    pub fn number(self, name: &'static str, label: &'static str, rule: FieldRule) -> Self {
        self.push(name, label, FieldKind::Number, rule)
    }

    pub fn select(
        mut self,
        name: &'static str,
        label: &'static str,
        options: &[&'static str],
        rule: FieldRule,
    ) -> Self {
        self.fields.push(FieldSpec {
            name,
            label,
            kind: FieldKind::Select,
            rule,
            options: options.to_vec(),
        });
        self
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

fn check_field(spec: &FieldSpec, raw: &str) -> Option<String> {
    let value = raw.trim();
    let rule = &spec.rule;

    if value.is_empty() {
        return rule
            .required
            .then(|| format!("{} is required", spec.label));
    }

    if let Some(pattern) = rule.pattern
        && !pattern.is_match(value)
    {
        return Some(
            rule.pattern_message
                .map_or_else(|| format!("{} is invalid", spec.label), str::to_string),
        );
    }

    // A ranged field reports unparsable input as out of range
    let unranged = rule.range.is_none();
    match spec.kind {
        FieldKind::Integer if unranged && value.parse::<i64>().is_err() => {
            return Some(format!("{} must be a whole number", spec.label));
        }
        FieldKind::Number if unranged && value.parse::<f64>().is_err() => {
            return Some(format!("{} must be a number", spec.label));
        }
        FieldKind::Select
            if !spec.options.is_empty() && !spec.options.iter().any(|o| *o == value) =>
        {
            return Some(format!(
                "{} must be one of {}",
                spec.label,
                spec.options.join(", ")
            ));
        }
        _ => {}
    }

    if let Some((min, max)) = rule.range {
        let in_range = value
            .parse::<f64>()
            .is_ok_and(|v| !v.is_nan() && v >= min && v <= max);
        if !in_range {
            return Some(format!("{} must be between {} and {}", spec.label, min, max));
        }
    }

    None
}

/// Check a draft against a rule set.
///
/// Pure: the same draft and rules always produce the same errors. Returns an
/// empty mapping iff the draft is valid.
pub fn validate(draft: &Draft, rules: &RuleSet) -> FormErrors {
    let mut errors = FormErrors::new();
    for spec in rules.fields() {
        if let Some(message) = check_field(spec, draft.get(spec.name)) {
            errors.insert(spec.name, message);
        }
    }
    errors
}
