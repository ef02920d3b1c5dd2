// File: src/rules.rs
// Purpose: Compiled field rules and the evaluate predicate

use regex::Regex;

use crate::error::RuleError;
use crate::field::{AttributeSource, Field, ValidatorKind};
use crate::validators;

/// The check applied to a non-empty value
#[derive(Debug, Clone)]
pub enum Rule {
    /// Bounds are strict; a NaN bound (non-numeric attribute) is never met.
    Number { min: Option<f64>, max: Option<f64> },
    Letters,
    Pattern(Regex),
    Any,
}

/// A field's constraints with bounds parsed and the pattern compiled.
///
/// Built once when a form is bound; [`FieldRules::check`] then runs on every
/// event without touching the attributes again.
#[derive(Debug, Clone)]
pub struct FieldRules {
    required: bool,
    rule: Rule,
}

impl FieldRules {
    pub fn compile(field: &Field) -> Result<Self, RuleError> {
        let rule = match field.validator {
            ValidatorKind::Number => Rule::Number {
                min: validators::parse_bound("validatorMin", field.min.as_deref()),
                max: validators::parse_bound("validatorMax", field.max.as_deref()),
            },
            ValidatorKind::Letters => Rule::Letters,
            // A missing pattern behaves like `RegExp(undefined)`, which matches anything.
            ValidatorKind::Regexp => {
                Rule::Pattern(validators::compile_pattern(field.pattern.as_deref().unwrap_or(""))?)
            }
            ValidatorKind::None => Rule::Any,
        };

        Ok(Self {
            required: field.required,
            rule,
        })
    }

    pub fn from_attributes(source: &(impl AttributeSource + ?Sized)) -> Result<Self, RuleError> {
        Self::compile(&Field::from_attributes(String::new(), source))
    }

    pub fn required(&self) -> bool {
        self.required
    }

    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    /// An empty value passes unless required; anything else must satisfy the rule.
    pub fn check(&self, value: &str) -> bool {
        if value.is_empty() {
            return !self.required;
        }

        match &self.rule {
            Rule::Number { min, max } => check_number(value, *min, *max),
            Rule::Letters => validators::is_letters(value),
            Rule::Pattern(pattern) => validators::matches_pattern(value, pattern),
            Rule::Any => true,
        }
    }
}

fn check_number(value: &str, min: Option<f64>, max: Option<f64>) -> bool {
    if !validators::is_number(value) {
        return false;
    }

    // Digit-only strings always parse; overly long ones become infinity.
    let Ok(number) = value.parse::<f64>() else {
        return false;
    };

    min.map_or(true, |min| validators::exceeds_min(number, min))
        && max.map_or(true, |max| validators::below_max(number, max))
}

/// Evaluate a field's current value against its declared constraints.
///
/// Invalid input is `Ok(false)`. A malformed pattern is the only error, and
/// it is only reported once there is a value to check.
pub fn evaluate(field: &Field) -> Result<bool, RuleError> {
    if field.value.is_empty() {
        return Ok(!field.required);
    }
    let rules = FieldRules::compile(field)?;
    Ok(rules.check(&field.value))
}
