//! Typed, defaulted arguments for each tool, parsed from the raw JSON bag.
//!
//! Parsing is pure: nothing here touches the network.

use serde_json::{Map, Value};

use crate::error::ToolError;
use crate::project::Projects;
use crate::scrapbox::is_dot_segment;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetPageArgs {
    pub title: String,
    pub project: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePageArgs {
    pub title: String,
    pub body: Vec<String>,
    pub project: String,
    pub append_if_exists: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPagesArgs {
    pub query: String,
    /// `None` searches every configured project.
    pub project: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchAllArgs {
    pub query: String,
}

impl GetPageArgs {
    pub fn parse(raw: &Value, projects: &Projects) -> Result<Self, ToolError> {
        let args = as_object(raw);
        Ok(Self {
            title: page_title(&args)?,
            project: project_or_default(&args, projects)?,
        })
    }
}

impl CreatePageArgs {
    pub fn parse(raw: &Value, projects: &Projects) -> Result<Self, ToolError> {
        let args = as_object(raw);
        let title = page_title(&args)?;
        let body = required_str(&args, "body")?;
        Ok(Self {
            title,
            body: split_body(&body),
            project: project_or_default(&args, projects)?,
            append_if_exists: optional_bool(&args, "appendIfExists")?.unwrap_or(false),
        })
    }
}

impl SearchPagesArgs {
    pub fn parse(raw: &Value) -> Result<Self, ToolError> {
        let args = as_object(raw);
        Ok(Self {
            query: required_text(&args, "query")?,
            project: optional_project(&args)?,
        })
    }
}

impl SearchAllArgs {
    pub fn parse(raw: &Value) -> Result<Self, ToolError> {
        let args = as_object(raw);
        Ok(Self {
            query: required_text(&args, "query")?,
        })
    }
}

/// Split a newline-delimited body into page lines.
pub fn split_body(body: &str) -> Vec<String> {
    body.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
        .collect()
}

/// Absent or non-object arguments behave like `{}`.
fn as_object(raw: &Value) -> Map<String, Value> {
    raw.as_object().cloned().unwrap_or_default()
}

fn required_str(args: &Map<String, Value>, field: &'static str) -> Result<String, ToolError> {
    match args.get(field) {
        None | Some(Value::Null) => Err(ToolError::validation(field, "required")),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(ToolError::validation(
            field,
            format!("expected string, got {}", type_name(other)),
        )),
    }
}

/// A required string that must not be blank.
fn required_text(args: &Map<String, Value>, field: &'static str) -> Result<String, ToolError> {
    let value = required_str(args, field)?;
    if value.trim().is_empty() {
        return Err(ToolError::validation(field, "must not be empty"));
    }
    Ok(value)
}

/// A page title the upstream URL scheme can address.
fn page_title(args: &Map<String, Value>) -> Result<String, ToolError> {
    let title = required_text(args, "title")?;
    if is_dot_segment(&title) {
        return Err(ToolError::validation(
            "title",
            format!("\"{}\" cannot be addressed by the Scrapbox API", title),
        ));
    }
    Ok(title)
}

fn optional_str(args: &Map<String, Value>, field: &'static str) -> Result<Option<String>, ToolError> {
    match args.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(ToolError::validation(
            field,
            format!("expected string, got {}", type_name(other)),
        )),
    }
}

fn optional_bool(args: &Map<String, Value>, field: &'static str) -> Result<Option<bool>, ToolError> {
    match args.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(other) => Err(ToolError::validation(
            field,
            format!("expected boolean, got {}", type_name(other)),
        )),
    }
}

/// `collection`, falling back to the `projectName` alias. Blank means unset.
fn optional_project(args: &Map<String, Value>) -> Result<Option<String>, ToolError> {
    let non_blank = |p: Option<String>| p.map(|p| p.trim().to_string()).filter(|p| !p.is_empty());

    match non_blank(optional_str(args, "collection")?) {
        Some(project) => Ok(Some(project)),
        None => Ok(non_blank(optional_str(args, "projectName")?)),
    }
}

fn project_or_default(args: &Map<String, Value>, projects: &Projects) -> Result<String, ToolError> {
    Ok(optional_project(args)?.unwrap_or_else(|| projects.default_project().to_string()))
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn projects() -> Projects {
        Projects::new(vec!["notes".into(), "team".into()]).unwrap()
    }

    #[test]
    fn test_get_page_defaults_to_first_project() {
        let args = GetPageArgs::parse(&json!({"title": "Home"}), &projects()).unwrap();
        assert_eq!(args.title, "Home");
        assert_eq!(args.project, "notes");
    }

    #[test]
    fn test_collection_and_alias() {
        let args =
            GetPageArgs::parse(&json!({"title": "Home", "projectName": "team"}), &projects()).unwrap();
        assert_eq!(args.project, "team");

        let args = GetPageArgs::parse(
            &json!({"title": "Home", "collection": "notes", "projectName": "team"}),
            &projects(),
        )
        .unwrap();
        assert_eq!(args.project, "notes");
    }

    #[test]
    fn test_missing_title_names_field() {
        let err = GetPageArgs::parse(&json!({}), &projects()).unwrap_err();
        assert_eq!(err, ToolError::validation("title", "required"));
    }

    #[test]
    fn test_blank_title_is_rejected() {
        let err = GetPageArgs::parse(&json!({"title": "   "}), &projects()).unwrap_err();
        assert!(matches!(err, ToolError::Validation { field: "title", .. }));
    }

    #[test]
    fn test_wrong_type_is_reported() {
        let err = GetPageArgs::parse(&json!({"title": 42}), &projects()).unwrap_err();
        assert_eq!(
            err,
            ToolError::validation("title", "expected string, got number")
        );
    }

    #[test]
    fn test_create_page_defaults() {
        let args =
            CreatePageArgs::parse(&json!({"title": "T", "body": "x\r\ny"}), &projects()).unwrap();
        assert_eq!(args.body, vec!["x", "y"]);
        assert_eq!(args.project, "notes");
        assert!(!args.append_if_exists);
    }

    #[test]
    fn test_create_page_empty_body_is_one_empty_line() {
        let args = CreatePageArgs::parse(&json!({"title": "T", "body": ""}), &projects()).unwrap();
        assert_eq!(args.body, vec![""]);
    }

    #[test]
    fn test_create_page_rejects_non_boolean_append() {
        let err = CreatePageArgs::parse(
            &json!({"title": "T", "body": "x", "appendIfExists": "yes"}),
            &projects(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ToolError::Validation {
                field: "appendIfExists",
                ..
            }
        ));
    }

    #[test]
    fn test_create_page_requires_body() {
        let err = CreatePageArgs::parse(&json!({"title": "T"}), &projects()).unwrap_err();
        assert_eq!(err, ToolError::validation("body", "required"));
    }

    #[test]
    fn test_search_without_collection_is_unset() {
        let args = SearchPagesArgs::parse(&json!({"query": "rust"})).unwrap();
        assert_eq!(args.project, None);

        let args = SearchPagesArgs::parse(&json!({"query": "rust", "collection": ""})).unwrap();
        assert_eq!(args.project, None);
    }

    #[test]
    fn test_blank_collection_falls_back_to_alias() {
        let args = GetPageArgs::parse(
            &json!({"title": "Home", "collection": "  ", "projectName": "team"}),
            &projects(),
        )
        .unwrap();
        assert_eq!(args.project, "team");

        let args =
            SearchPagesArgs::parse(&json!({"query": "q", "collection": "", "projectName": "team"}))
                .unwrap();
        assert_eq!(args.project.as_deref(), Some("team"));
    }

    #[test]
    fn test_dot_titles_are_rejected() {
        for title in [".", ".."] {
            let err = GetPageArgs::parse(&json!({"title": title}), &projects()).unwrap_err();
            assert!(matches!(err, ToolError::Validation { field: "title", .. }));

            let err = CreatePageArgs::parse(&json!({"title": title, "body": "x"}), &projects())
                .unwrap_err();
            assert!(matches!(err, ToolError::Validation { field: "title", .. }));
        }

        let args = GetPageArgs::parse(&json!({"title": "..."}), &projects()).unwrap();
        assert_eq!(args.title, "...");
    }

    #[test]
    fn test_non_object_arguments_behave_like_empty() {
        let err = SearchAllArgs::parse(&Value::Null).unwrap_err();
        assert_eq!(err, ToolError::validation("query", "required"));
    }
}
