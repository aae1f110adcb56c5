use serde_json::{json, Value};
use std::sync::Arc;

use super::args::CreatePageArgs;
use super::Tool;
use crate::error::ToolError;
use crate::pages::{self, WriteOutcome};
use crate::project::Projects;
use crate::scrapbox::PageStore;

/// Creates a page, or appends to an existing one when asked to.
pub struct CreateOrAppendPage {
    store: Arc<dyn PageStore>,
    projects: Arc<Projects>,
}

impl CreateOrAppendPage {
    pub fn new(store: Arc<dyn PageStore>, projects: Arc<Projects>) -> Self {
        Self { store, projects }
    }
}

#[async_trait::async_trait]
impl Tool for CreateOrAppendPage {
    type Args = CreatePageArgs;

    fn name(&self) -> &'static str {
        "create_or_append_page"
    }

    fn definition(&self) -> Value {
        let allowed: Vec<&str> = self.projects.iter().collect();
        json!({
            "name": self.name(),
            "description": "Create a new page in a Scrapbox project, or append to it if it already exists and appendIfExists is true.",
            "inputSchema": {
                "type": "object",
                "required": ["title", "body"],
                "properties": {
                    "title": {
                        "type": "string",
                        "description": "The title of the page"
                    },
                    "body": {
                        "type": "string",
                        "description": "The content of the page, one line per newline"
                    },
                    "collection": {
                        "type": "string",
                        "enum": allowed,
                        "description": format!(
                            "Project to write to (default: {})",
                            self.projects.default_project()
                        )
                    },
                    "appendIfExists": {
                        "type": "boolean",
                        "description": "If true, appends to the existing page if it exists. If false, returns an error if the page exists.",
                        "default": false
                    }
                }
            }
        })
    }

    fn parse(&self, arguments: &Value) -> Result<CreatePageArgs, ToolError> {
        CreatePageArgs::parse(arguments, &self.projects)
    }

    async fn run(&self, args: CreatePageArgs) -> Result<String, ToolError> {
        let outcome = pages::upsert(
            self.store.as_ref(),
            &self.projects,
            &args.project,
            &args.title,
            args.body,
            args.append_if_exists,
        )
        .await?;

        Ok(match outcome {
            WriteOutcome::Created => format!(
                "Successfully created page \"{}\" in project \"{}\".",
                args.title, args.project
            ),
            WriteOutcome::Appended => format!(
                "Successfully appended to page \"{}\" in project \"{}\".",
                args.title, args.project
            ),
        })
    }
}
