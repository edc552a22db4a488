use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::DataStore;

#[derive(Debug, Clone, Default)]
pub struct PageFilter {
    /// Include retired pages
    pub include_inactive: bool,
    /// Only pages whose path starts with this prefix
    pub under: Option<String>,
}

/// List pages ordered by path.
pub fn run<S: DataStore>(store: &S, filter: PageFilter) -> Result<CmdResult> {
    let mut pages = if filter.include_inactive {
        store.list_pages()?
    } else {
        store.active_pages()?
    };

    if let Some(prefix) = filter.under.as_deref() {
        let nested = format!("{}/", prefix);
        pages.retain(|p| p.path == prefix || p.path.starts_with(&nested));
    }
    pages.sort_by(|a, b| a.path.cmp(&b.path));

    let mut result = CmdResult::default();
    if pages.is_empty() {
        result.add_message(CmdMessage::info("No pages found."));
    }
    result.listed_pages = pages;
    Ok(result)
}
