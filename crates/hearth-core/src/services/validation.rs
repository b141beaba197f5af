//! Rule-based value validation.
//!
//! Rules are written as `"required|email|min:3"`. Except for `required`,
//! rules pass on absent or empty values.
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;

use crate::container::Service;
use crate::kernel::error::Result;
use crate::services::error::ServiceError;

/// A rule: the value under test and the rule argument (`min:3` -> `"3"`).
pub type RuleFn = Arc<dyn Fn(&Value, Option<&str>) -> Result<bool> + Send + Sync>;

/// Outcome of validating a set of fields: failed rule names per field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validation {
    failures: BTreeMap<String, Vec<String>>,
}

impl Validation {
    pub fn passes(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn fails(&self) -> bool {
        !self.passes()
    }

    /// Failed rules of one field.
    pub fn failed(&self, field: &str) -> &[String] {
        self.failures.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn failures(&self) -> &BTreeMap<String, Vec<String>> {
        &self.failures
    }
}

pub struct Validator {
    rules: RwLock<HashMap<String, RuleFn>>,
}

impl Service for Validator {
    const ID: &'static str = "hearth.validator";
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator {
    /// A validator with the built-in rules.
    pub fn new() -> Self {
        let validator = Self {
            rules: RwLock::new(HashMap::new()),
        };
        validator.extend("required", |v, _| Ok(!is_empty(v)));
        validator.extend("numeric", |v, _| {
            Ok(match v {
                Value::Number(_) => true,
                Value::String(s) => s.trim().parse::<f64>().is_ok(),
                _ => false,
            })
        });
        validator.extend("email", |v, _| Ok(v.as_str().is_some_and(looks_like_email)));
        validator.extend("alpha_num", |v, _| {
            Ok(v.as_str().is_some_and(|s| s.chars().all(char::is_alphanumeric)))
        });
        validator.extend("min", |v, arg| Ok(size_of(v) >= bound("min", arg)?));
        validator.extend("max", |v, arg| Ok(size_of(v) <= bound("max", arg)?));
        validator
    }

    /// Add or replace a rule.
    pub fn extend<F>(&self, name: impl Into<String>, rule: F)
    where
        F: Fn(&Value, Option<&str>) -> Result<bool> + Send + Sync + 'static,
    {
        self.rules.write().insert(name.into(), Arc::new(rule));
    }

    pub fn has_rule(&self, name: &str) -> bool {
        self.rules.read().contains_key(name)
    }

    /// Rules of `rules` that `value` fails, in order.
    pub fn check(&self, value: &Value, rules: &str) -> Result<Vec<String>> {
        let mut failed = Vec::new();
        for rule in rules.split('|').map(str::trim).filter(|r| !r.is_empty()) {
            let (name, arg) = match rule.split_once(':') {
                Some((name, arg)) => (name, Some(arg)),
                None => (rule, None),
            };
            let rule_fn = self
                .rules
                .read()
                .get(name)
                .cloned()
                .ok_or_else(|| ServiceError::UnknownRule(name.to_string()))?;

            let applies = name == "required" || !is_empty(value);
            if applies && !rule_fn(value, arg)? {
                failed.push(name.to_string());
            }
        }
        Ok(failed)
    }

    /// Whether `value` passes every rule.
    pub fn is_valid(&self, value: &Value, rules: &str) -> Result<bool> {
        Ok(self.check(value, rules)?.is_empty())
    }

    /// Validate fields of a JSON object. Missing fields are checked as `null`.
    pub fn validate<'a, I>(&self, data: &Value, rules: I) -> Result<Validation>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut validation = Validation::default();
        for (field, field_rules) in rules {
            let value = data.get(field).unwrap_or(&Value::Null);
            let failed = self.check(value, field_rules)?;
            if !failed.is_empty() {
                validation.failures.insert(field.to_string(), failed);
            }
        }
        Ok(validation)
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<String> = self.rules.read().keys().cloned().collect();
        names.sort();
        f.debug_struct("Validator").field("rules", &names).finish()
    }
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

/// Numbers by value, strings by character count, collections by length.
fn size_of(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.chars().count() as f64,
        Value::Array(items) => items.len() as f64,
        Value::Object(map) => map.len() as f64,
        _ => 0.0,
    }
}

fn bound(rule: &str, arg: Option<&str>) -> Result<f64> {
    let arg = arg.ok_or_else(|| ServiceError::InvalidRule {
        rule: rule.to_string(),
        message: "a numeric argument is required".to_string(),
    })?;
    arg.trim().parse::<f64>().map_err(|_| {
        ServiceError::InvalidRule {
            rule: rule.to_string(),
            message: format!("'{}' is not a number", arg),
        }
        .into()
    })
}

fn looks_like_email(s: &str) -> bool {
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !s.chars().any(char::is_whitespace)
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'))
}
