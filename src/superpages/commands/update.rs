use crate::commands::{page_by_path, parent_by_path, CmdMessage, CmdResult, PageEdit};
use crate::error::Result;
use crate::store::DataStore;

pub fn run<S: DataStore>(
    store: &mut S,
    path: &str,
    edit: PageEdit,
    message: Option<&str>,
) -> Result<CmdResult> {
    let mut page = page_by_path(store, path)?;

    if edit.clear_parent {
        page.parent_id = None;
    } else if let Some(parent_path) = edit.parent.as_deref() {
        page.parent_id = Some(parent_by_path(store, parent_path)?.id);
    }
    if let Some(title) = edit.title {
        page.title = title;
    }
    if let Some(content) = edit.content {
        page.content = content;
    }
    if let Some(author) = edit.author {
        page.last_modified_by = author;
    }
    if let Some(format) = edit.format {
        page.content_format = format;
    }
    if edit.clear_slug {
        page.slug.clear();
    } else if let Some(slug) = edit.slug {
        page.slug = slug;
    }
    if let Some(template) = edit.custom_template {
        page.custom_template = Some(template).filter(|t| !t.trim().is_empty());
    }
    if let Some(css) = edit.extra_css {
        page.extra_css = css;
    }
    if let Some(js) = edit.extra_js {
        page.extra_js = js;
    }

    let page = store.save_page(page, message)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Page updated ({}): {}",
        page.path, page.title
    )));
    result.affected_pages.push(page);
    Ok(result)
}
