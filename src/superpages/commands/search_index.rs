use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::DataStore;

/// Search documents for every active page, ordered by path.
pub fn run<S: DataStore>(store: &S) -> Result<CmdResult> {
    let mut pages = store.active_pages()?;
    pages.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(CmdResult {
        documents: pages.iter().map(|p| p.search_document()).collect(),
        ..Default::default()
    })
}
