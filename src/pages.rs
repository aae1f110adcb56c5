use anyhow::Result;

use crate::error::ToolError;
use crate::project::Projects;
use crate::scrapbox::PageStore;

/// Current state of a page on the upstream service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageState {
    Exists(Vec<String>),
    Absent,
}

/// What a successful `upsert` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Created,
    Appended,
}

/// Look up a page. A missing page is `Absent`; any other failure propagates.
pub async fn resolve(store: &dyn PageStore, project: &str, title: &str) -> Result<PageState> {
    Ok(match store.fetch(project, title).await? {
        Some(lines) => PageState::Exists(lines),
        None => PageState::Absent,
    })
}

/// Create a page, or append to it when it exists and `append_if_exists` is set.
///
/// Not atomic: the existence check and the write are two separate requests, so an
/// external edit landing in between is overwritten (last write wins upstream).
pub async fn upsert(
    store: &dyn PageStore,
    projects: &Projects,
    project: &str,
    title: &str,
    body: Vec<String>,
    append_if_exists: bool,
) -> Result<WriteOutcome, ToolError> {
    const OPERATION: &str = "create_or_append_page";

    if !projects.contains(project) {
        return Err(ToolError::UnauthorizedCollection(project.to_string()));
    }

    let state = resolve(store, project, title)
        .await
        .map_err(|e| ToolError::transport(OPERATION, e))?;

    let (lines, outcome) = match state {
        PageState::Exists(_) if !append_if_exists => {
            return Err(ToolError::AlreadyExists {
                project: project.to_string(),
                title: title.to_string(),
            });
        }
        PageState::Exists(mut existing) => {
            existing.extend(body);
            (existing, WriteOutcome::Appended)
        }
        PageState::Absent => {
            let mut lines = Vec::with_capacity(body.len() + 1);
            lines.push(title.to_string());
            lines.extend(body);
            (lines, WriteOutcome::Created)
        }
    };

    store
        .write(project, title, &lines)
        .await
        .map_err(|e| ToolError::transport(OPERATION, e))?;

    log::info!(
        "Pages: {:?} \"{}\" in project \"{}\" ({} lines)",
        outcome,
        title,
        project,
        lines.len()
    );
    Ok(outcome)
}
