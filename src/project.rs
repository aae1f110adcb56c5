use anyhow::Result;

/// The fixed allow-list of Scrapbox projects this server may touch.
///
/// Never empty: the first entry is the default target for reads and writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projects {
    names: Vec<String>,
}

impl Projects {
    pub fn new(names: Vec<String>) -> Result<Self> {
        let names: Vec<String> = names
            .into_iter()
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .collect();

        if names.is_empty() {
            anyhow::bail!("no Scrapbox project configured");
        }

        Ok(Self { names })
    }

    /// Split a comma-separated project list, dropping blank entries.
    pub fn split_list(csv: &str) -> Vec<String> {
        csv.split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(String::from)
            .collect()
    }

    pub fn default_project(&self) -> &str {
        &self.names[0]
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }
}
