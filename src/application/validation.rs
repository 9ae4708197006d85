use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};
use thiserror::Error;

use crate::domain::{NewTask, Priority, Status, TaskUpdate};

const TITLE_MAX_CHARS: usize = 200;
const DESCRIPTION_MAX_CHARS: usize = 1000;

/// A single field violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

/// Every violation found in one input, reported together so the caller
/// can present a complete correction list in one round trip.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", join_messages(.0))]
pub struct ValidationErrors(pub Vec<ValidationError>);

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Untrusted create payload. Unknown fields are ignored; every known
/// field is optional here so validation can report all violations at once.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub due_date: Option<String>,
}

/// Untrusted update payload. The double `Option` keeps an omitted field
/// distinguishable from an explicit `null`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskInput {
    #[serde(default, deserialize_with = "double_option")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub priority: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub status: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub due_date: Option<Option<String>>,
}

fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

pub fn validate_create(input: CreateTaskInput) -> Result<NewTask, ValidationErrors> {
    let mut errors = Vec::new();

    let title = match input.title.as_deref().map(str::trim) {
        None | Some("") => {
            errors.push(violation("title", "Title is required"));
            None
        }
        Some(t) if t.chars().count() > TITLE_MAX_CHARS => {
            errors.push(violation("title", "Title must be less than 200 characters"));
            None
        }
        Some(t) => Some(t.to_string()),
    };

    let description = match input.description {
        Some(d) if d.chars().count() > DESCRIPTION_MAX_CHARS => {
            errors.push(violation(
                "description",
                "Description must be less than 1000 characters",
            ));
            None
        }
        Some(d) if d.is_empty() => None,
        other => other,
    };

    let priority = match input.priority.as_deref() {
        None => {
            errors.push(violation("priority", "Priority is required"));
            None
        }
        Some(p) => parse_priority(p, &mut errors),
    };

    let due_date = match input.due_date.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(s) => parse_due_date(s, &mut errors),
    };

    match (title, priority) {
        (Some(title), Some(priority)) if errors.is_empty() => Ok(NewTask {
            title,
            description,
            priority,
            due_date,
        }),
        _ => Err(ValidationErrors(errors)),
    }
}

pub fn validate_update(input: UpdateTaskInput) -> Result<TaskUpdate, ValidationErrors> {
    let mut errors = Vec::new();
    let mut update = TaskUpdate::default();

    if let Some(title) = input.title {
        match title.as_deref().map(str::trim) {
            None | Some("") => errors.push(violation("title", "Title cannot be empty")),
            Some(t) if t.chars().count() > TITLE_MAX_CHARS => {
                errors.push(violation("title", "Title must be less than 200 characters"));
            }
            Some(t) => update.title = Some(t.to_string()),
        }
    }

    if let Some(description) = input.description {
        match description {
            Some(d) if d.chars().count() > DESCRIPTION_MAX_CHARS => {
                errors.push(violation(
                    "description",
                    "Description must be less than 1000 characters",
                ));
            }
            // Explicit null or empty string clears the field.
            Some(d) if d.is_empty() => update.description = Some(None),
            None => update.description = Some(None),
            Some(d) => update.description = Some(Some(d)),
        }
    }

    if let Some(priority) = input.priority {
        match priority.as_deref() {
            None => errors.push(violation(
                "priority",
                "Priority must be high, medium, or low",
            )),
            Some(p) => update.priority = parse_priority(p, &mut errors),
        }
    }

    if let Some(status) = input.status {
        match status.as_deref() {
            None => errors.push(violation(
                "status",
                "Status must be pending or completed",
            )),
            Some(s) => update.status = parse_status(s, &mut errors),
        }
    }

    if let Some(due_date) = input.due_date {
        match due_date.as_deref().map(str::trim) {
            None | Some("") => update.due_date = Some(None),
            Some(s) => {
                if let Some(date) = parse_due_date(s, &mut errors) {
                    update.due_date = Some(Some(date));
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(update)
    } else {
        Err(ValidationErrors(errors))
    }
}

fn violation(field: &'static str, message: &str) -> ValidationError {
    ValidationError {
        field,
        message: message.to_string(),
    }
}

fn parse_priority(raw: &str, errors: &mut Vec<ValidationError>) -> Option<Priority> {
    let parsed = Priority::parse(raw);
    if parsed.is_none() {
        errors.push(violation(
            "priority",
            "Priority must be high, medium, or low",
        ));
    }
    parsed
}

fn parse_status(raw: &str, errors: &mut Vec<ValidationError>) -> Option<Status> {
    let parsed = Status::parse(raw);
    if parsed.is_none() {
        errors.push(violation(
            "status",
            "Status must be pending or completed",
        ));
    }
    parsed
}

/// Accepts a plain calendar date or a full RFC 3339 timestamp.
fn parse_due_date(raw: &str, errors: &mut Vec<ValidationError>) -> Option<NaiveDate> {
    let parsed = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok().or_else(|| {
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|dt| dt.with_timezone(&Utc).date_naive())
    });
    if parsed.is_none() {
        errors.push(violation("dueDate", "Due date must be a valid ISO date"));
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_collects_every_violation_in_one_pass() {
        let input = CreateTaskInput {
            title: Some("   ".to_string()),
            priority: Some("urgent".to_string()),
            ..Default::default()
        };

        let errors = validate_create(input).unwrap_err();
        assert_eq!(errors.0.len(), 2);
        assert_eq!(
            errors.to_string(),
            "Title is required, Priority must be high, medium, or low"
        );
    }

    #[test]
    fn create_accepts_minimal_valid_input() {
        let input = CreateTaskInput {
            title: Some("Buy milk".to_string()),
            priority: Some("low".to_string()),
            ..Default::default()
        };

        let new_task = validate_create(input).unwrap();
        assert_eq!(new_task.title, "Buy milk");
        assert_eq!(new_task.priority, Priority::Low);
        assert_eq!(new_task.description, None);
        assert_eq!(new_task.due_date, None);
    }

    #[test]
    fn create_trims_title_and_enforces_length() {
        let input = CreateTaskInput {
            title: Some(format!("  {}  ", "x".repeat(200))),
            priority: Some("high".to_string()),
            ..Default::default()
        };
        assert!(validate_create(input).is_ok());

        let too_long = CreateTaskInput {
            title: Some("x".repeat(201)),
            priority: Some("high".to_string()),
            ..Default::default()
        };
        let errors = validate_create(too_long).unwrap_err();
        assert_eq!(
            errors.to_string(),
            "Title must be less than 200 characters"
        );
    }

    #[test]
    fn create_treats_empty_description_and_due_date_as_absent() {
        let input = CreateTaskInput {
            title: Some("Buy milk".to_string()),
            description: Some(String::new()),
            priority: Some("low".to_string()),
            due_date: Some(String::new()),
        };

        let new_task = validate_create(input).unwrap();
        assert_eq!(new_task.description, None);
        assert_eq!(new_task.due_date, None);
    }

    #[test]
    fn create_parses_due_date_formats() {
        let plain = CreateTaskInput {
            title: Some("t".to_string()),
            priority: Some("low".to_string()),
            due_date: Some("2025-01-20".to_string()),
            ..Default::default()
        };
        assert_eq!(
            validate_create(plain).unwrap().due_date,
            Some(NaiveDate::from_ymd_opt(2025, 1, 20).unwrap())
        );

        let rfc3339 = CreateTaskInput {
            title: Some("t".to_string()),
            priority: Some("low".to_string()),
            due_date: Some("2025-01-20T08:30:00Z".to_string()),
            ..Default::default()
        };
        assert_eq!(
            validate_create(rfc3339).unwrap().due_date,
            Some(NaiveDate::from_ymd_opt(2025, 1, 20).unwrap())
        );

        let invalid = CreateTaskInput {
            title: Some("t".to_string()),
            priority: Some("low".to_string()),
            due_date: Some("not-a-date".to_string()),
            ..Default::default()
        };
        let errors = validate_create(invalid).unwrap_err();
        assert_eq!(errors.to_string(), "Due date must be a valid ISO date");
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let input: CreateTaskInput = serde_json::from_value(serde_json::json!({
            "title": "Buy milk",
            "priority": "low",
            "assignee": "someone",
        }))
        .unwrap();

        assert!(validate_create(input).is_ok());
    }

    #[test]
    fn update_with_no_fields_is_a_no_op() {
        let update = validate_update(UpdateTaskInput::default()).unwrap();
        assert_eq!(update, TaskUpdate::default());
    }

    #[test]
    fn update_distinguishes_omitted_from_explicit_null() {
        let input: UpdateTaskInput = serde_json::from_value(serde_json::json!({
            "description": null,
        }))
        .unwrap();

        let update = validate_update(input).unwrap();
        assert_eq!(update.description, Some(None));
        // Fields absent from the payload stay untouched.
        assert_eq!(update.title, None);
        assert_eq!(update.due_date, None);
    }

    #[test]
    fn update_clears_due_date_on_empty_string() {
        let input: UpdateTaskInput = serde_json::from_value(serde_json::json!({
            "dueDate": "",
        }))
        .unwrap();

        let update = validate_update(input).unwrap();
        assert_eq!(update.due_date, Some(None));
    }

    #[test]
    fn update_rejects_invalid_status_and_empty_title_together() {
        let input: UpdateTaskInput = serde_json::from_value(serde_json::json!({
            "title": "",
            "status": "done",
        }))
        .unwrap();

        let errors = validate_update(input).unwrap_err();
        assert_eq!(
            errors.to_string(),
            "Title cannot be empty, Status must be pending or completed"
        );
    }
}
