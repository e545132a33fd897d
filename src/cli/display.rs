// src/cli/display.rs

use crate::domain::record::BookmarkRecord;
use crate::domain::search::{highlight_ranges, SearchHit};
use crate::domain::stats::BookmarkStats;
use chrono::{TimeZone, Utc};
use crossterm::style::{Color, Stylize};
use std::io::{self, IsTerminal};
use std::sync::atomic::{AtomicBool, Ordering};
use url::Url;

/// Characters of a url shown in listings before it is cut off.
pub const URL_DISPLAY_WIDTH: usize = 30;

static COLOR_ENABLED: AtomicBool = AtomicBool::new(false);

/// Colors are used only when stdout is a terminal, `NO_COLOR` is unset and
/// the user did not pass `--no-color`.
pub fn init_color(no_color: bool) {
    let enabled =
        !no_color && std::env::var_os("NO_COLOR").is_none() && io::stdout().is_terminal();
    COLOR_ENABLED.store(enabled, Ordering::Relaxed);
}

fn paint(text: &str, color: Color) -> String {
    if COLOR_ENABLED.load(Ordering::Relaxed) {
        text.to_string().with(color).to_string()
    } else {
        text.to_string()
    }
}

/// `dateAdded` (epoch ms) as `YYYY-MM-DD`, `-` when out of range.
pub fn format_date(date_added: i64) -> String {
    Utc.timestamp_millis_opt(date_added)
        .single()
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Favicon service url for a link's host; `None` for folders and unparseable urls.
pub fn favicon_url(record: &BookmarkRecord) -> Option<String> {
    let url = Url::parse(record.url()?).ok()?;
    let host = url.host_str()?;
    Some(format!(
        "https://www.google.com/s2/favicons?domain={}&sz=32",
        host
    ))
}

pub fn truncate_url(url: &str, max_chars: usize) -> String {
    if url.chars().count() <= max_chars {
        return url.to_string();
    }
    let cut: String = url.chars().take(max_chars).collect();
    format!("{}...", cut)
}

/// Marks every case-insensitive occurrence of `query` in `text`.
/// Without colors matches are wrapped in `[` `]`.
pub fn highlight(text: &str, query: &str) -> String {
    let ranges = highlight_ranges(text, query);
    if ranges.is_empty() {
        return text.to_string();
    }

    let colored = COLOR_ENABLED.load(Ordering::Relaxed);
    let mut out = String::with_capacity(text.len() + ranges.len() * 8);
    let mut last = 0;
    for range in ranges {
        out.push_str(&text[last..range.start]);
        let matched = &text[range.clone()];
        if colored {
            out.push_str(&matched.to_string().bold().yellow().to_string());
        } else {
            out.push('[');
            out.push_str(matched);
            out.push(']');
        }
        last = range.end;
    }
    out.push_str(&text[last..]);
    out
}

/// One listing line: id, name (folders end in `/`) and optionally the url.
pub fn record_line(record: &BookmarkRecord, id_width: usize, show_urls: bool) -> String {
    let id = record.id_str().unwrap_or("?");
    match record.url() {
        None => format!(
            "{:>id_width$}  {}",
            paint(id, Color::DarkGrey),
            paint(&format!("{}/", record.name), Color::Blue)
        ),
        Some(url) if show_urls => format!(
            "{:>id_width$}  {}  {}",
            paint(id, Color::DarkGrey),
            record.name,
            paint(&truncate_url(url, URL_DISPLAY_WIDTH), Color::Yellow)
        ),
        Some(_) => format!("{:>id_width$}  {}", paint(id, Color::DarkGrey), record.name),
    }
}

fn id_width<'a>(records: impl Iterator<Item = &'a BookmarkRecord>) -> usize {
    records
        .map(|r| r.id_str().map_or(1, str::len))
        .max()
        .unwrap_or(1)
}

pub fn show_records(records: &[&BookmarkRecord], show_urls: bool) {
    if records.is_empty() {
        eprintln!("No bookmarks to display");
        return;
    }
    let width = id_width(records.iter().copied());
    for record in records {
        println!("{}", record_line(record, width, show_urls));
    }
}

/// Search results on stderr: name with matches marked, breadcrumb, url.
pub fn show_hits(hits: &[SearchHit], query: &str) {
    let width = hits.len().to_string().len();
    for (i, hit) in hits.iter().enumerate() {
        let kind = if hit.record.is_folder() { "/" } else { "" };
        eprintln!(
            "{:width$}. {}{} [{}]",
            i + 1,
            highlight(&hit.record.name, query),
            kind,
            hit.record.id_str().unwrap_or("?")
        );
        let breadcrumb = hit.breadcrumb();
        if !breadcrumb.is_empty() {
            eprintln!("{:width$}  {}", "", paint(&breadcrumb, Color::DarkGrey));
        }
        if let Some(url) = hit.record.url() {
            eprintln!("{:width$}  {}", "", highlight(url, query));
        }
    }
}

pub fn show_record_detail(record: &BookmarkRecord, path: &[String]) {
    println!(
        "{} [{}]",
        paint(&record.name, Color::Green),
        record.id_str().unwrap_or("?")
    );
    let kind = if record.is_folder() { "folder" } else { "link" };
    println!("  Type: {}", kind);
    if path.is_empty() {
        println!("  Path: (top level)");
    } else {
        println!("  Path: {}", path.join(" > "));
    }
    println!("  Parent: {}", record.parent_id);
    println!("  Added: {}", format_date(record.date_added));
    if let Some(url) = record.url() {
        println!("  URL: {}", paint(url, Color::Yellow));
    }
    if let Some(favicon) = favicon_url(record) {
        println!("  Favicon: {}", favicon);
    }
    if !record.tags().is_empty() {
        println!("  Tags: {}", paint(&record.tags().join(", "), Color::Blue));
    }
    if let Some(metadata) = record.metadata() {
        println!("  Metadata:");
        for (key, value) in metadata {
            println!("    {}: {}", key, value);
        }
    }
}

pub fn show_stats(stats: &BookmarkStats, preset: bool) {
    println!("Bookmarks: {}", stats.total_bookmarks);
    println!("Folders:   {}", stats.total_folders);
    println!("Max depth: {}", stats.max_depth);
    match stats.last_sync {
        Some(ts) => println!("Last sync: {}", ts.format("%Y-%m-%d %H:%M:%S UTC")),
        None => println!("Last sync: never"),
    }
    if preset {
        eprintln!("(stats as shipped with the payload, use --computed to recount)");
    }
}

/// Indented tree lines from a [`descendants`](crate::domain::tree::BookmarkTree::descendants) walk.
pub fn render_tree(entries: &[(usize, &BookmarkRecord)], show_urls: bool) -> Vec<String> {
    entries
        .iter()
        .map(|(level, record)| {
            let indent = "  ".repeat(*level);
            match record.url() {
                None => format!("{}{}/", indent, paint(&record.name, Color::Blue)),
                Some(url) if show_urls => format!(
                    "{}{}  {}",
                    indent,
                    record.name,
                    paint(&truncate_url(url, URL_DISPLAY_WIDTH), Color::Yellow)
                ),
                Some(_) => format!("{}{}", indent, record.name),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn given_epoch_millis_when_format_date_then_iso_day() {
        assert_eq!(format_date(1627894500000), "2021-08-02");
        assert_eq!(format_date(0), "1970-01-01");
        assert_eq!(format_date(i64::MAX), "-");
    }

    #[rstest]
    #[case("https://www.youtube.com/watch?v=1", Some("https://www.google.com/s2/favicons?domain=www.youtube.com&sz=32"))]
    #[case("not a url", None)]
    #[case("", None)]
    fn given_link_when_favicon_url_then_host_based(#[case] url: &str, #[case] expected: Option<&str>) {
        let record = BookmarkRecord::link("1", "0", "x", url);
        assert_eq!(favicon_url(&record).as_deref(), expected);
    }

    #[test]
    fn given_folder_when_favicon_url_then_none() {
        assert_eq!(favicon_url(&BookmarkRecord::folder("1", "0", "Work")), None);
    }

    #[test]
    fn given_long_url_when_truncate_then_cut_with_ellipsis() {
        let url = "https://developer.mozilla.org/en-US/docs/Web";
        assert_eq!(truncate_url(url, 30), "https://developer.mozilla.org/...");
        assert_eq!(truncate_url("https://a.b/", 30), "https://a.b/");
    }

    #[test]
    fn given_multibyte_url_when_truncate_then_char_boundary_safe() {
        let url = "https://例え.jp/パス/ファイル/とても長い名前";
        let cut = truncate_url(url, 12);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), 15);
    }

    #[test]
    fn given_no_color_when_highlight_then_matches_bracketed() {
        COLOR_ENABLED.store(false, Ordering::Relaxed);
        assert_eq!(highlight("React Docs", "docs"), "React [Docs]");
        assert_eq!(highlight("a.b a*b", "a*b"), "a.b [a*b]");
        assert_eq!(highlight("plain", ""), "plain");
    }

    #[test]
    fn given_entries_when_render_tree_then_indented() {
        COLOR_ENABLED.store(false, Ordering::Relaxed);
        let work = BookmarkRecord::folder("1", "0", "Work");
        let docs = BookmarkRecord::link("11", "1", "Docs", "https://docs.example.com/");
        let lines = render_tree(&[(0, &work), (1, &docs)], false);
        assert_eq!(lines, ["Work/", "  Docs"]);
    }

    #[test]
    fn given_folder_and_link_when_record_line_then_folder_marked() {
        COLOR_ENABLED.store(false, Ordering::Relaxed);
        let folder = BookmarkRecord::folder("7", "0", "Work");
        let link = BookmarkRecord::link("42", "7", "Rust", "https://www.rust-lang.org/learn/get-started");
        assert_eq!(record_line(&folder, 2, false), " 7  Work/");
        assert_eq!(
            record_line(&link, 2, true),
            "42  Rust  https://www.rust-lang.org/lear..."
        );
    }
}
