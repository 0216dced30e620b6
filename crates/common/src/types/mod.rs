use serde::{Deserialize, Serialize};

/// Liveness probe body.
#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub status: String,
    #[serde(rename = "timeStamp")]
    pub time_stamp: String,
}

impl Health {
    pub fn ok(time_stamp: String) -> Self {
        Self { status: "OK".to_string(), time_stamp }
    }
}

/// One failed rule: the offending field path (empty for the whole body) and a message.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    pub field: String,
    pub message: String,
}

impl FieldIssue {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field: field.into(), message: message.into() }
    }
}

/// Uniform response wrapper: `{success, message?, data?, error?, errors?}`.
#[derive(Serialize, Deserialize, Debug)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldIssue>>,
}

impl<T> Envelope<T> {
    pub fn data(data: T) -> Self {
        Self { success: true, message: None, data: Some(data), error: None, errors: None }
    }

    pub fn with_message(message: impl Into<String>, data: T) -> Self {
        Self { message: Some(message.into()), ..Self::data(data) }
    }
}

impl Envelope<()> {
    pub fn ok(message: impl Into<String>) -> Self {
        Self { success: true, message: Some(message.into()), data: None, error: None, errors: None }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self { success: false, message: Some(message.into()), data: None, error: None, errors: None }
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn with_issues(mut self, issues: Vec<FieldIssue>) -> Self {
        self.errors = Some(issues);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn failure_envelope_omits_absent_parts() {
        let v = serde_json::to_value(Envelope::failure("Product not found")).unwrap();
        assert_eq!(v, json!({"success": false, "message": "Product not found"}));
    }

    #[test]
    fn validation_envelope_lists_issues() {
        let env = Envelope::failure("Validation error")
            .with_issues(vec![FieldIssue::new("name", "Required")]);
        let v = serde_json::to_value(env).unwrap();
        assert_eq!(v["errors"][0]["field"], "name");
        assert_eq!(v["errors"][0]["message"], "Required");
        assert!(v.get("data").is_none());
    }

    #[test]
    fn data_envelope_round_trips() {
        let env = Envelope::with_message("Product created successfully", json!({"name": "x"}));
        let text = serde_json::to_string(&env).unwrap();
        let back: Envelope<serde_json::Value> = serde_json::from_str(&text).unwrap();
        assert!(back.success);
        assert_eq!(back.data.unwrap()["name"], "x");
    }
}
