use serde_json::{json, Value};
use std::sync::Arc;

use super::args::GetPageArgs;
use super::Tool;
use crate::error::ToolError;
use crate::pages::{self, PageState};
use crate::project::Projects;
use crate::scrapbox::PageStore;

/// Returns the text of one page.
pub struct GetPage {
    store: Arc<dyn PageStore>,
    projects: Arc<Projects>,
}

impl GetPage {
    pub fn new(store: Arc<dyn PageStore>, projects: Arc<Projects>) -> Self {
        Self { store, projects }
    }
}

#[async_trait::async_trait]
impl Tool for GetPage {
    type Args = GetPageArgs;

    fn name(&self) -> &'static str {
        "get_page"
    }

    fn definition(&self) -> Value {
        json!({
            "name": self.name(),
            "description": "Get the content of a specific Scrapbox (Cosense) page.",
            "inputSchema": {
                "type": "object",
                "required": ["title"],
                "properties": {
                    "title": {
                        "type": "string",
                        "description": "The title of the page to retrieve"
                    },
                    "collection": {
                        "type": "string",
                        "description": format!(
                            "Project to read from (default: {})",
                            self.projects.default_project()
                        )
                    }
                }
            }
        })
    }

    fn parse(&self, arguments: &Value) -> Result<GetPageArgs, ToolError> {
        GetPageArgs::parse(arguments, &self.projects)
    }

    async fn run(&self, args: GetPageArgs) -> Result<String, ToolError> {
        let state = pages::resolve(self.store.as_ref(), &args.project, &args.title)
            .await
            .map_err(|e| ToolError::transport(self.name(), e))?;

        match state {
            PageState::Exists(lines) => Ok(lines.join("\n")),
            PageState::Absent => Err(ToolError::NotFound {
                project: args.project,
                title: args.title,
            }),
        }
    }
}
