use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Identifier of a job as delivered by the listing endpoint.
///
/// The endpoint is free to use strings or numbers, so both are kept verbatim
/// and compared strictly: `1` and `"1"` are different jobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JobId {
    Number(Number),
    Text(String),
}

impl JobId {
    /// An id is usable when it is a non-empty string or a non-zero number.
    pub fn is_valid(&self) -> bool {
        match self {
            JobId::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
            JobId::Text(s) => !s.is_empty(),
        }
    }

    fn from_value(value: &Value) -> Option<Self> {
        let id = match value {
            Value::Number(n) => JobId::Number(n.clone()),
            Value::String(s) => JobId::Text(s.clone()),
            _ => return None,
        };
        id.is_valid().then_some(id)
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobId::Number(n) => write!(f, "{n}"),
            JobId::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for JobId {
    fn from(value: u64) -> Self {
        JobId::Number(value.into())
    }
}

impl From<&str> for JobId {
    fn from(value: &str) -> Self {
        JobId::Text(value.to_string())
    }
}

/// A job record: the two required fields plus every other attribute the
/// endpoint sent, passed through untouched.
///
/// Serializing a job reproduces the original record, which is what the
/// bookmark blob stores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    /// Raw title; any truthy value is accepted. Use [`Job::title_text`] for display.
    pub title: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Job {
    pub fn new(id: impl Into<JobId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: Value::String(title.into()),
            extra: Map::new(),
        }
    }

    /// Builder-style helper to attach a loosely-typed attribute.
    pub fn with_attr(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Validates a raw item from the endpoint.
    ///
    /// Returns `None` unless the item is an object with a usable `id` and a
    /// truthy `title` (anything but null, false, 0 or "").
    pub fn from_value(raw: &Value) -> Option<Self> {
        let object = raw.as_object()?;
        let id = object.get("id").and_then(JobId::from_value)?;
        let title = object.get("title").filter(|title| is_truthy(title))?.clone();

        let extra = object
            .iter()
            .filter(|(key, _)| key.as_str() != "id" && key.as_str() != "title")
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        Some(Self { id, title, extra })
    }

    /// The full record as JSON, required fields included.
    pub fn to_value(&self) -> Value {
        let mut object = Map::with_capacity(self.extra.len() + 2);
        object.insert(
            "id".to_string(),
            match &self.id {
                JobId::Number(n) => Value::Number(n.clone()),
                JobId::Text(s) => Value::String(s.clone()),
            },
        );
        object.insert("title".to_string(), self.title.clone());
        for (key, value) in &self.extra {
            object.insert(key.clone(), value.clone());
        }
        Value::Object(object)
    }

    /// Title for display: strings verbatim, anything else as compact JSON.
    pub fn title_text(&self) -> String {
        match &self.title {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }

    pub fn attr(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    pub fn location(&self) -> Option<String> {
        self.first_text(&[&["primary_details", "location_string"], &["location_string"]])
    }

    /// Raw salary value; pass it to [`crate::format_salary`] for display.
    pub fn salary(&self) -> Option<&Value> {
        let paths: [&[&str]; 3] = [
            &["primary_details", "Salary"],
            &["job_details", "Salary"],
            &["salary_range"],
        ];
        paths
            .into_iter()
            .filter_map(|path| self.lookup(path))
            .find(|value| is_truthy(value))
    }

    pub fn experience(&self) -> Option<String> {
        self.detail_text("Experience")
    }

    pub fn job_type(&self) -> Option<String> {
        self.detail_text("job_type")
    }

    pub fn qualification(&self) -> Option<String> {
        self.detail_text("Qualification")
    }

    pub fn english_level(&self) -> Option<String> {
        self.detail_text("english_knowledge")
    }

    pub fn description(&self) -> Option<String> {
        self.first_text(&[&["primary_details", "Job_Description"], &["job_description"]])
    }

    pub fn phone_number(&self) -> Option<String> {
        self.first_text(&[&["phone_number_details", "phone_number"]])
    }

    /// Text used when sharing a job with another app.
    pub fn share_message(&self) -> String {
        match self.attr("location_string").and_then(text_of) {
            Some(location) => {
                format!("Check out this job: {} at {}.", self.title_text(), location)
            }
            None => format!("Check out this job: {}.", self.title_text()),
        }
    }

    fn detail_text(&self, key: &str) -> Option<String> {
        self.first_text(&[&["primary_details", key], &["job_details", key]])
    }

    fn first_text(&self, paths: &[&[&str]]) -> Option<String> {
        paths
            .iter()
            .filter_map(|path| self.lookup(path))
            .find_map(text_of)
    }

    fn lookup(&self, path: &[&str]) -> Option<&Value> {
        let (first, rest) = path.split_first()?;
        rest.iter()
            .try_fold(self.extra.get(*first)?, |value, key| value.get(*key))
    }
}

/// Falsy values (null, false, 0, "") never satisfy a fallback chain.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn text_of(value: &Value) -> Option<String> {
    if !is_truthy(value) {
        return None;
    }
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

