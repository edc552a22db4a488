use crate::commands::{page_by_path, CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::DataStore;

/// Activate or retire the page at `path`.
///
/// This is an ordinary save, so it records a snapshot even when the flag
/// already had the requested value.
pub fn run<S: DataStore>(
    store: &mut S,
    path: &str,
    active: bool,
    message: Option<&str>,
) -> Result<CmdResult> {
    let mut page = page_by_path(store, path)?;
    let was_active = page.is_active;
    page.is_active = active;
    let page = store.save_page(page, message)?;

    let mut result = CmdResult::default();
    let verb = if active { "activated" } else { "deactivated" };
    if was_active == active {
        result.add_message(CmdMessage::info(format!("Page already {}: {}", verb, page.path)));
    } else {
        result.add_message(CmdMessage::success(format!("Page {}: {}", verb, page.path)));
    }
    result.affected_pages.push(page);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{create, PageDraft};
    use crate::commands::MessageLevel;
    use crate::error::SuperpagesError;
    use crate::store::memory::InMemoryStore;

    fn setup() -> InMemoryStore {
        let mut store = InMemoryStore::new();
        create::run(&mut store, PageDraft::new("About", "About us", "testy"), None).unwrap();
        store
    }

    #[test]
    fn deactivate_hides_from_resolve() {
        let mut store = setup();
        run(&mut store, "about", false, Some("Retired")).unwrap();

        assert!(matches!(
            store.resolve("about"),
            Err(SuperpagesError::PathNotFound(_))
        ));
        assert_eq!(store.snapshot_count().unwrap(), 2);

        let page = store.find_by_path("about").unwrap().unwrap();
        let latest = store.history_for(&page.id).unwrap().latest().unwrap();
        assert!(!latest.is_active);
        assert_eq!(latest.message, "Retired");
    }

    #[test]
    fn reactivate_restores_resolve() {
        let mut store = setup();
        run(&mut store, "about", false, None).unwrap();
        run(&mut store, "about", true, None).unwrap();
        assert!(store.resolve("about").is_ok());
        assert_eq!(store.snapshot_count().unwrap(), 3);
    }

    #[test]
    fn repeated_status_is_reported_but_still_saved() {
        let mut store = setup();
        let result = run(&mut store, "about", true, None).unwrap();
        assert!(matches!(result.messages[0].level, MessageLevel::Info));
        assert_eq!(store.snapshot_count().unwrap(), 2);
    }
}
