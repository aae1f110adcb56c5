//! In-memory `PageStore` used by unit tests.

use anyhow::Result;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use crate::scrapbox::PageStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Fetch { project: String, title: String },
    Write { project: String, title: String, lines: Vec<String> },
    Query { project: String, text: String },
}

#[derive(Default)]
pub struct MemoryStore {
    pages: Mutex<HashMap<(String, String), Vec<String>>>,
    search_results: Mutex<HashMap<String, Vec<String>>>,
    failing: Mutex<HashSet<String>>,
    /// Lines an "external writer" saves right after the next fetch.
    racing_edit: Mutex<Option<Vec<String>>>,
    calls: Mutex<Vec<Call>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(self, project: &str, title: &str, lines: &[&str]) -> Self {
        self.pages.lock().unwrap().insert(
            (project.to_string(), title.to_string()),
            lines.iter().map(|l| l.to_string()).collect(),
        );
        self
    }

    pub fn with_search_results(self, project: &str, titles: &[&str]) -> Self {
        self.search_results.lock().unwrap().insert(
            project.to_string(),
            titles.iter().map(|t| t.to_string()).collect(),
        );
        self
    }

    /// Every request against `project` fails like an upstream 5xx.
    pub fn with_failing_project(self, project: &str) -> Self {
        self.failing.lock().unwrap().insert(project.to_string());
        self
    }

    pub fn with_racing_edit(self, lines: &[&str]) -> Self {
        *self.racing_edit.lock().unwrap() = Some(lines.iter().map(|l| l.to_string()).collect());
        self
    }

    pub fn page(&self, project: &str, title: &str) -> Option<Vec<String>> {
        self.pages
            .lock()
            .unwrap()
            .get(&(project.to_string(), title.to_string()))
            .cloned()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn writes(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, Call::Write { .. }))
            .collect()
    }

    fn check_failing(&self, project: &str) -> Result<()> {
        if self.failing.lock().unwrap().contains(project) {
            anyhow::bail!("Scrapbox API error (503 Service Unavailable): {}", project);
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl PageStore for MemoryStore {
    async fn fetch(&self, project: &str, title: &str) -> Result<Option<Vec<String>>> {
        self.calls.lock().unwrap().push(Call::Fetch {
            project: project.to_string(),
            title: title.to_string(),
        });
        self.check_failing(project)?;

        let current = self.page(project, title);
        if let Some(lines) = self.racing_edit.lock().unwrap().take() {
            self.pages
                .lock()
                .unwrap()
                .insert((project.to_string(), title.to_string()), lines);
        }
        Ok(current)
    }

    async fn write(&self, project: &str, title: &str, lines: &[String]) -> Result<()> {
        self.calls.lock().unwrap().push(Call::Write {
            project: project.to_string(),
            title: title.to_string(),
            lines: lines.to_vec(),
        });
        self.check_failing(project)?;

        self.pages
            .lock()
            .unwrap()
            .insert((project.to_string(), title.to_string()), lines.to_vec());
        Ok(())
    }

    async fn query(&self, project: &str, text: &str) -> Result<Vec<String>> {
        self.calls.lock().unwrap().push(Call::Query {
            project: project.to_string(),
            text: text.to_string(),
        });
        self.check_failing(project)?;

        Ok(self
            .search_results
            .lock()
            .unwrap()
            .get(project)
            .cloned()
            .unwrap_or_default())
    }
}
