//! Declarative form schemas
//!
//! A [`FormSchema`] lists the fields a form accepts. Each field runs its
//! filters first, then every validator; all failures are collected so the
//! user sees every problem at once.

use crate::core::error::FieldErrors;
use crate::core::payment::{MAX_ORDER_AMOUNT, NewPayment, PaymentScheme};
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::OnceLock;

use super::{filters, validators};

type Filter = Box<dyn Fn(&str, Value) -> Value + Send + Sync>;
type Validator = Box<dyn Fn(&str, &Value) -> Result<(), String> + Send + Sync>;

/// Pattern raw handles must match, before `@` normalization
pub const HANDLE_PATTERN: &str = r"^[A-Za-z0-9_-]+$";

/// Filters and validators for a single field
pub struct FieldRule {
    name: &'static str,
    filters: Vec<Filter>,
    validators: Vec<Validator>,
}

impl FieldRule {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            filters: Vec::new(),
            validators: Vec::new(),
        }
    }

    /// Add a filter, applied in declaration order
    pub fn filter(mut self, f: impl Fn(&str, Value) -> Value + Send + Sync + 'static) -> Self {
        self.filters.push(Box::new(f));
        self
    }

    /// Add a validator
    pub fn validate(
        mut self,
        v: impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + 'static,
    ) -> Self {
        self.validators.push(Box::new(v));
        self
    }

    fn apply(&self, raw: Option<&Value>, errors: &mut FieldErrors) -> Value {
        let value = self
            .filters
            .iter()
            .fold(raw.cloned().unwrap_or(Value::Null), |value, f| {
                f(self.name, value)
            });

        for validator in &self.validators {
            if let Err(message) = validator(self.name, &value) {
                errors.add(self.name, message);
            }
        }

        value
    }
}

/// The set of fields accepted by a form
#[derive(Default)]
pub struct FormSchema {
    fields: Vec<FieldRule>,
}

impl FormSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, rule: FieldRule) -> Self {
        self.fields.push(rule);
        self
    }

    /// Filter and validate `payload`
    ///
    /// Returns the filtered values of the declared fields only; anything else
    /// in the payload is dropped. A non-object payload behaves as if every
    /// field were missing.
    pub fn validate_and_filter(&self, payload: &Value) -> Result<Map<String, Value>, FieldErrors> {
        let mut errors = FieldErrors::new();
        let mut output = Map::new();

        for rule in &self.fields {
            let value = rule.apply(payload.get(rule.name), &mut errors);
            output.insert(rule.name.to_string(), value);
        }

        if errors.is_empty() {
            Ok(output)
        } else {
            Err(errors)
        }
    }
}

/// Schema of the "create payment" form
pub fn create_payment_schema() -> &'static FormSchema {
    static SCHEMA: OnceLock<FormSchema> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        let handle_pattern = Regex::new(HANDLE_PATTERN).expect("valid handle pattern");

        FormSchema::new()
            .field(
                FieldRule::new("scheme")
                    .validate(validators::one_of(&["limit", "credit", "wallet"], "Invalid scheme")),
            )
            .field(
                FieldRule::new("handle")
                    .validate(validators::required("Handle is required"))
                    .validate(validators::non_empty("Handle is required"))
                    .validate(validators::matches(
                        handle_pattern,
                        "Handle must contain only letters, numbers, hyphens and underscores",
                    )),
            )
            .field(
                FieldRule::new("amount")
                    .filter(filters::trim())
                    .filter(filters::coerce_number())
                    .validate(validators::number("Amount must be a valid number"))
                    .validate(validators::positive("Amount must be greater than 0"))
                    .validate(validators::max_value(MAX_ORDER_AMOUNT, "Amount is too large")),
            )
            .field(
                FieldRule::new("wallet")
                    .validate(validators::required("Wallet is required"))
                    .validate(validators::non_empty("Wallet is required")),
            )
    })
}

/// Validate a raw creation form into a [`NewPayment`]
///
/// `amount` may be a JSON number or a numeric string. Every failing field is
/// reported, not only the first one.
pub fn validate_create_payment(payload: &Value) -> Result<NewPayment, FieldErrors> {
    let fields = create_payment_schema().validate_and_filter(payload)?;

    let mut errors = FieldErrors::new();
    let scheme = fields
        .get("scheme")
        .and_then(Value::as_str)
        .and_then(|s| s.parse::<PaymentScheme>().ok());
    let handle = fields.get("handle").and_then(Value::as_str);
    let amount = fields.get("amount").and_then(Value::as_f64);
    let wallet = fields.get("wallet").and_then(Value::as_str);

    match (scheme, handle, amount, wallet) {
        (Some(scheme), Some(handle), Some(amount), Some(wallet)) => Ok(NewPayment {
            scheme,
            handle: handle.to_string(),
            amount,
            wallet: wallet.to_string(),
        }),
        _ => {
            // Only reachable if the schema and this conversion drift apart
            for (field, present) in [
                ("scheme", scheme.is_some()),
                ("handle", handle.is_some()),
                ("amount", amount.is_some()),
                ("wallet", wallet.is_some()),
            ] {
                if !present {
                    errors.add(field, "Invalid value");
                }
            }
            Err(errors)
        }
    }
}
