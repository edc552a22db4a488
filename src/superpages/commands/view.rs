use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::DataStore;

/// Resolve `path` the way the page renderer does: active pages only, with
/// template candidates ending in `default_template`.
pub fn run<S: DataStore>(store: &S, path: &str, default_template: &str) -> Result<CmdResult> {
    let page = store.resolve(path.trim_matches('/'))?;
    Ok(CmdResult {
        template_names: page.template_names(default_template),
        listed_pages: vec![page],
        ..Default::default()
    })
}
