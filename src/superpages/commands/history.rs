use crate::commands::{page_by_path, CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::DataStore;

/// Snapshots of the page at `path`, newest first, optionally capped at `limit`.
pub fn run<S: DataStore>(store: &S, path: &str, limit: Option<usize>) -> Result<CmdResult> {
    let page = page_by_path(store, path)?;
    let history = store.history_for(&page.id)?;
    let snapshots: Vec<_> = match limit {
        Some(limit) => history.take(limit).collect(),
        None => history.collect(),
    };

    let mut result = CmdResult::default();
    if snapshots.is_empty() {
        result.add_message(CmdMessage::warning(format!(
            "No snapshots recorded for {}",
            page.path
        )));
    }
    result.snapshots = snapshots;
    result.listed_pages.push(page);
    Ok(result)
}
