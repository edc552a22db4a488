use chrono::{DateTime, Utc};
use colored::Colorize;
use superpages::api::{CmdMessage, MessageLevel};
use superpages::config::SuperpagesConfig;
use superpages::model::{Page, Snapshot};
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 16;
const PATH_WIDTH: usize = 40;
const RETIRED_MARKER: &str = "⊘";

pub(crate) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(crate) fn print_pages(pages: &[Page]) {
    for page in pages {
        let marker = if page.is_active { " " } else { RETIRED_MARKER };
        let path = truncate_to_width(&page.path, PATH_WIDTH);
        let path_padding = PATH_WIDTH.saturating_sub(path.width());

        let available = LINE_WIDTH.saturating_sub(PATH_WIDTH + TIME_WIDTH + 4);
        let title = truncate_to_width(&page.title, available);
        let title_padding = available.saturating_sub(title.width());

        let path_colored = if page.is_active {
            path.normal()
        } else {
            path.red()
        };

        println!(
            "{} {}{} {}{} {}",
            marker,
            path_colored,
            " ".repeat(path_padding),
            title,
            " ".repeat(title_padding),
            format_time_ago(page.modified).dimmed()
        );
    }
}

pub(crate) fn print_page(page: &Page, template_names: &[String]) {
    println!("{} {}", page.path.yellow(), page.title.bold());
    println!(
        "{}",
        format!(
            "format: {}  author: {}  templates: {}",
            page.content_format.label(),
            page.last_modified_by,
            template_names.join(", ")
        )
        .dimmed()
    );
    println!("--------------------------------");
    println!("{}", page.content);
}

pub(crate) fn print_history(page: &Page, snapshots: &[Snapshot]) {
    println!("{} {}", page.path.yellow(), page.title.bold());
    for snapshot in snapshots {
        let id = snapshot.id.to_string();
        let short_id = &id[..8];
        let status = if snapshot.is_active { "" } else { " (retired)" };
        println!(
            "  {} {} {}{}",
            short_id.cyan(),
            format_time_ago(snapshot.snapped_on).dimmed(),
            snapshot.message,
            status.red()
        );
    }
}

pub(crate) fn print_config(config: &SuperpagesConfig) {
    for key in superpages::config::CONFIG_KEYS {
        let value = config.get(key).unwrap_or_default();
        println!("{} = {}", key.bold(), value);
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let time_str = Formatter::new().convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_strings() {
        assert_eq!(truncate_to_width("docs/install", 40), "docs/install");
    }

    #[test]
    fn truncate_marks_cut_strings() {
        let cut = truncate_to_width("a-very-long-path-segment", 10);
        assert!(cut.ends_with('…'));
        assert!(cut.width() <= 10);
    }
}
