use crate::commands::{parent_by_path, CmdMessage, CmdResult, PageDraft};
use crate::error::Result;
use crate::model::Page;
use crate::store::DataStore;

pub fn run<S: DataStore>(store: &mut S, draft: PageDraft, message: Option<&str>) -> Result<CmdResult> {
    let mut page = Page::new(draft.title, draft.content, draft.author)
        .with_format(draft.format.unwrap_or_default());

    if let Some(parent_path) = draft.parent.as_deref() {
        page.parent_id = Some(parent_by_path(store, parent_path)?.id);
    }
    page.slug = draft.slug.unwrap_or_default();
    page.path = draft.path.unwrap_or_default();
    page.custom_template = draft.custom_template.filter(|t| !t.trim().is_empty());
    page.extra_css = draft.extra_css.unwrap_or_default();
    page.extra_js = draft.extra_js.unwrap_or_default();

    let page = store.save_page(page, message)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Page created: {} ({})",
        page.title, page.path
    )));
    result.affected_pages.push(page);
    Ok(result)
}
