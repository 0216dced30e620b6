//! Rule sets for product payloads and the `:id` path parameter.
//!
//! Each rule set takes the raw JSON body, collects every failed rule as a
//! [`FieldIssue`], and on success hands back the typed input the repository expects.
//! Unknown fields are ignored.

use std::fmt;

use chrono::{DateTime, Utc};
use common::types::FieldIssue;
use models::product::{NewProduct, ProductPatch, CATEGORY_MAX_CHARS, NAME_MAX_CHARS};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub issues: Vec<FieldIssue>,
}

impl ValidationError {
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self { issues: vec![FieldIssue::new(field, message)] }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, issue) in self.issues.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            if issue.field.is_empty() {
                f.write_str(&issue.message)?;
            } else {
                write!(f, "{}: {}", issue.field, issue.message)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// A named group of field rules producing `Self` from a raw request body.
pub trait RuleSet: Sized {
    fn validate(raw: &Value) -> Result<Self, ValidationError>;
}

struct TextRule {
    field: &'static str,
    max: usize,
    too_short: &'static str,
    too_long: &'static str,
}

const NAME: TextRule = TextRule {
    field: "name",
    max: NAME_MAX_CHARS,
    too_short: "Product name is required",
    too_long: "Product name must be less than 100 characters",
};

const CATEGORY: TextRule = TextRule {
    field: "category",
    max: CATEGORY_MAX_CHARS,
    too_short: "Category is required",
    too_long: "Category must be less than 50 characters",
};

const STOCK_TOO_LARGE: &str = "Number must be less than or equal to 9223372036854775807";

fn type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn mismatch(expected: &str, got: &Value) -> String {
    format!("Expected {expected}, received {}", type_name(got))
}

/// Walks one body, remembering every issue.
struct Checker<'a> {
    body: &'a Map<String, Value>,
    issues: Vec<FieldIssue>,
}

impl<'a> Checker<'a> {
    fn new(raw: &'a Value) -> Result<Self, ValidationError> {
        match raw {
            Value::Object(body) => Ok(Self { body, issues: Vec::new() }),
            other => Err(ValidationError::single("", mismatch("object", other))),
        }
    }

    fn fail(&mut self, field: &str, message: impl Into<String>) {
        self.issues.push(FieldIssue::new(field, message));
    }

    /// The field's value; a missing required field is recorded as `Required`.
    fn field(&mut self, field: &str, required: bool) -> Option<&'a Value> {
        let body = self.body;
        match body.get(field) {
            Some(v) => Some(v),
            None => {
                if required {
                    self.fail(field, "Required");
                }
                None
            }
        }
    }

    fn string(&mut self, field: &str, required: bool) -> Option<&'a str> {
        match self.field(field, required)? {
            Value::String(s) => Some(s.as_str()),
            other => {
                self.fail(field, mismatch("string", other));
                None
            }
        }
    }

    fn bounded_text(&mut self, rule: &TextRule, required: bool) -> Option<String> {
        let s = self.string(rule.field, required)?;
        let len = s.chars().count();
        if len < 1 {
            self.fail(rule.field, rule.too_short);
            None
        } else if len > rule.max {
            self.fail(rule.field, rule.too_long);
            None
        } else {
            Some(s.to_string())
        }
    }

    fn number(&mut self, field: &str, required: bool) -> Option<f64> {
        match self.field(field, required)? {
            Value::Number(n) => n.as_f64(),
            other => {
                self.fail(field, mismatch("number", other));
                None
            }
        }
    }

    fn price(&mut self, required: bool) -> Option<f64> {
        let p = self.number("price", required)?;
        if p > 0.0 {
            Some(p)
        } else {
            self.fail("price", "Price must be greater than zero");
            None
        }
    }

    fn stock(&mut self, required: bool) -> Option<i64> {
        let n = match self.field("stock", required)? {
            Value::Number(n) => n,
            other => {
                self.fail("stock", mismatch("number", other));
                return None;
            }
        };
        if let Some(i) = n.as_i64() {
            if i < 0 {
                self.fail("stock", "Stock must be zero or greater");
                return None;
            }
            return Some(i);
        }
        if n.as_u64().is_some() {
            self.fail("stock", STOCK_TOO_LARGE);
            return None;
        }
        let s = n.as_f64()?;
        if s < 0.0 {
            self.fail("stock", "Stock must be zero or greater");
            return None;
        }
        // 50 and 50.0 are the same JSON number as far as clients are concerned
        if s.fract() != 0.0 {
            self.fail("stock", "Expected integer, received float");
            return None;
        }
        // 2^63 is the first float outside i64
        if s >= 9.223372036854775808e18 {
            self.fail("stock", STOCK_TOO_LARGE);
            return None;
        }
        Some(s as i64)
    }

    fn datetime(&mut self, field: &str) -> Option<DateTime<Utc>> {
        let s = self.string(field, false)?;
        match DateTime::parse_from_rfc3339(s) {
            Ok(dt) => Some(dt.with_timezone(&Utc)),
            Err(_) => {
                self.fail(field, "Invalid datetime");
                None
            }
        }
    }

    fn finish<T>(self, value: impl FnOnce() -> T) -> Result<T, ValidationError> {
        if self.issues.is_empty() {
            Ok(value())
        } else {
            Err(ValidationError { issues: self.issues })
        }
    }
}

impl RuleSet for NewProduct {
    fn validate(raw: &Value) -> Result<Self, ValidationError> {
        let mut c = Checker::new(raw)?;
        let name = c.bounded_text(&NAME, true);
        let description = c.string("description", false).map(str::to_string);
        let price = c.price(true);
        let category = c.bounded_text(&CATEGORY, true);
        let stock = c.stock(false);
        let release_date = c.datetime("releaseDate");
        c.finish(|| NewProduct {
            name: name.unwrap_or_default(),
            description,
            price: price.unwrap_or_default(),
            category: category.unwrap_or_default(),
            stock: stock.unwrap_or(0),
            release_date,
        })
    }
}

impl RuleSet for ProductPatch {
    fn validate(raw: &Value) -> Result<Self, ValidationError> {
        let mut c = Checker::new(raw)?;
        let patch = ProductPatch {
            name: c.bounded_text(&NAME, false),
            description: c.string("description", false).map(str::to_string),
            price: c.price(false),
            category: c.bounded_text(&CATEGORY, false),
            stock: c.stock(false),
            release_date: c.datetime("releaseDate"),
        };
        c.finish(|| patch)
    }
}

/// The `:id` parameter must look like a store-assigned object id.
pub fn validate_product_id(id: &str) -> Result<(), ValidationError> {
    if models::object_id::is_valid(id) {
        Ok(())
    } else {
        Err(ValidationError::single("id", "Invalid product ID format"))
    }
}
