use serde_json::{json, Value};
use std::sync::Arc;

use super::args::{SearchAllArgs, SearchPagesArgs};
use super::Tool;
use crate::error::ToolError;
use crate::project::Projects;
use crate::scrapbox::PageStore;
use crate::search::{self, SearchHit};

/// Searches one project, or every configured project when none is named.
pub struct SearchPages {
    store: Arc<dyn PageStore>,
    projects: Arc<Projects>,
}

/// Searches every configured project.
pub struct SearchAll {
    store: Arc<dyn PageStore>,
    projects: Arc<Projects>,
}

impl SearchPages {
    pub fn new(store: Arc<dyn PageStore>, projects: Arc<Projects>) -> Self {
        Self { store, projects }
    }
}

impl SearchAll {
    pub fn new(store: Arc<dyn PageStore>, projects: Arc<Projects>) -> Self {
        Self { store, projects }
    }
}

fn render(hits: &[SearchHit], empty: &str) -> String {
    if hits.is_empty() {
        return empty.to_string();
    }
    hits.iter()
        .map(SearchHit::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

#[async_trait::async_trait]
impl Tool for SearchPages {
    type Args = SearchPagesArgs;

    fn name(&self) -> &'static str {
        "search_pages"
    }

    fn definition(&self) -> Value {
        let allowed: Vec<&str> = self.projects.iter().collect();
        json!({
            "name": self.name(),
            "description": "Search for pages by query keywords. Searches every configured project unless one is given.",
            "inputSchema": {
                "type": "object",
                "required": ["query"],
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Search keywords"
                    },
                    "collection": {
                        "type": "string",
                        "enum": allowed,
                        "description": "Restrict the search to this project"
                    }
                }
            }
        })
    }

    fn parse(&self, arguments: &Value) -> Result<SearchPagesArgs, ToolError> {
        SearchPagesArgs::parse(arguments)
    }

    async fn run(&self, args: SearchPagesArgs) -> Result<String, ToolError> {
        let hits = match &args.project {
            Some(project) => {
                if !self.projects.contains(project) {
                    return Err(ToolError::UnauthorizedCollection(project.clone()));
                }
                search::fan_out(self.store.as_ref(), [project.as_str()], &args.query).await
            }
            None => search::fan_out(self.store.as_ref(), self.projects.iter(), &args.query).await,
        };

        Ok(render(&hits, "No pages found."))
    }
}

#[async_trait::async_trait]
impl Tool for SearchAll {
    type Args = SearchAllArgs;

    fn name(&self) -> &'static str {
        "search_all"
    }

    fn definition(&self) -> Value {
        json!({
            "name": self.name(),
            "description": format!(
                "Search for pages across all configured projects ({}).",
                self.projects.iter().collect::<Vec<_>>().join(", ")
            ),
            "inputSchema": {
                "type": "object",
                "required": ["query"],
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Search keywords"
                    }
                }
            }
        })
    }

    fn parse(&self, arguments: &Value) -> Result<SearchAllArgs, ToolError> {
        SearchAllArgs::parse(arguments)
    }

    async fn run(&self, args: SearchAllArgs) -> Result<String, ToolError> {
        log::debug!("SearchAll: fanning out over {} project(s)", self.projects.len());
        let hits = search::fan_out(self.store.as_ref(), self.projects.iter(), &args.query).await;
        Ok(render(&hits, "No pages found in any project."))
    }
}
