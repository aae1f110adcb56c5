pub mod args;
pub mod create_page;
pub mod get_page;
pub mod search_pages;

pub use create_page::CreateOrAppendPage;
pub use get_page::GetPage;
pub use search_pages::{SearchAll, SearchPages};

use serde_json::Value;
use std::sync::Arc;

use crate::error::ToolError;
use crate::project::Projects;
use crate::scrapbox::PageStore;

/// A tool callable through `tools/call`.
///
/// Not object-safe (associated types): the registry routes to concrete types.
#[async_trait::async_trait]
pub trait Tool: Send + Sync {
    type Args: Send;

    fn name(&self) -> &'static str;

    /// `tools/list` entry: name, description and JSON-Schema `inputSchema`.
    fn definition(&self) -> Value;

    /// Validate the raw argument bag. Must not perform I/O.
    fn parse(&self, arguments: &Value) -> Result<Self::Args, ToolError>;

    async fn run(&self, args: Self::Args) -> Result<String, ToolError>;
}

/// Dispatch table from tool name to validator and handler.
pub struct ToolRegistry {
    get_page: GetPage,
    create_page: CreateOrAppendPage,
    search_pages: SearchPages,
    search_all: SearchAll,
}

impl ToolRegistry {
    pub fn new(store: Arc<dyn PageStore>, projects: Arc<Projects>) -> Self {
        Self {
            get_page: GetPage::new(store.clone(), projects.clone()),
            create_page: CreateOrAppendPage::new(store.clone(), projects.clone()),
            search_pages: SearchPages::new(store.clone(), projects.clone()),
            search_all: SearchAll::new(store, projects),
        }
    }

    pub fn definitions(&self) -> Vec<Value> {
        vec![
            self.get_page.definition(),
            self.create_page.definition(),
            self.search_pages.definition(),
            self.search_all.definition(),
        ]
    }

    pub async fn dispatch(&self, name: &str, arguments: &Value) -> Result<String, ToolError> {
        match name {
            "get_page" => invoke(&self.get_page, arguments).await,
            // `create_page` is the name older clients use.
            "create_or_append_page" | "create_page" => invoke(&self.create_page, arguments).await,
            "search_pages" => invoke(&self.search_pages, arguments).await,
            "search_all" => invoke(&self.search_all, arguments).await,
            _ => {
                log::warn!("Tool call: unknown tool {:?}", name);
                Err(ToolError::UnknownOperation(name.to_string()))
            }
        }
    }
}

async fn invoke<T: Tool>(tool: &T, arguments: &Value) -> Result<String, ToolError> {
    log::info!("Tool call: {}", tool.name());
    log::debug!("Tool call: {} arguments={}", tool.name(), arguments);

    let result = match tool.parse(arguments) {
        Ok(args) => tool.run(args).await,
        Err(e) => Err(e),
    };

    match &result {
        Err(e @ ToolError::Transport { .. }) => log::error!("Tool call: {}", e),
        Err(e) => log::info!("Tool call: {} rejected: {}", tool.name(), e),
        Ok(_) => {}
    }
    result
}
