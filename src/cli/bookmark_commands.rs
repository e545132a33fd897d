// src/cli/bookmark_commands.rs
use crate::application::services::catalog_service::{CatalogSnapshot, SnapshotOrigin};
use crate::cli::args::{Cli, Commands};
use crate::cli::display::{
    favicon_url, render_tree, show_hits, show_record_detail, show_records, show_stats,
};
use crate::cli::error::{CliError, CliResult};
use crate::config::{default_config_path, Settings};
use crate::domain::record::{BookmarkRecord, ROOT_ID};
use crate::domain::query::SearchFilterBuilder;
use crate::domain::search::suggestions;
use crate::domain::sort::SortDirection;
use crate::domain::tree::PathTermination;
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::json::write_json;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use crossterm::style::Stylize;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Record plus derived fields, as printed by `show --json`.
#[derive(Serialize)]
struct RecordView<'a> {
    #[serde(flatten)]
    record: &'a BookmarkRecord,
    path: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    favicon: Option<String>,
}

/// Current snapshot, loading it on first use. Tells the user when the
/// configured source failed and the built-in data is shown instead.
pub fn load_snapshot(services: &ServiceContainer) -> CliResult<Arc<CatalogSnapshot>> {
    let snapshot = services.catalog.ensure_loaded()?;
    if snapshot.origin == SnapshotOrigin::Fallback {
        eprintln!(
            "{}",
            format!(
                "Could not load {}, showing {}",
                services.catalog.source_description(),
                snapshot.source
            )
            .yellow()
        );
    }
    Ok(snapshot)
}

/// `YYYY-MM-DD` (start of day, or end of day for upper bounds) or RFC 3339.
pub fn parse_date(value: &str, end_of_day: bool) -> CliResult<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    let day = NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        CliError::InvalidInput(format!(
            "'{}' is not a date, expected YYYY-MM-DD or RFC 3339",
            value
        ))
    })?;
    let time = if end_of_day {
        NaiveTime::from_hms_milli_opt(23, 59, 59, 999)
    } else {
        NaiveTime::from_hms_opt(0, 0, 0)
    }
    .unwrap_or_default();
    Ok(day.and_time(time).and_utc())
}

pub fn parse_tags(tags: Option<&str>) -> Vec<String> {
    tags.map(|t| {
        t.split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

fn require_folder<'a>(snapshot: &'a CatalogSnapshot, id: &str) -> CliResult<Vec<&'a BookmarkRecord>> {
    let children = snapshot.tree.children(id);
    match snapshot.tree.find_by_id(id) {
        Some(record) if !record.is_folder() => Err(CliError::InvalidInput(format!(
            "'{}' ({}) is a link, not a folder",
            record.name, id
        ))),
        None if id != ROOT_ID && children.is_empty() => {
            Err(CliError::InvalidInput(format!("No folder with id '{}'", id)))
        }
        _ => Ok(children),
    }
}

#[instrument(skip_all, level = "debug")]
pub fn ls(cli: Cli, services: &ServiceContainer, settings: &Settings) -> CliResult<()> {
    if let Some(Commands::Ls {
        folder_id,
        sort,
        desc,
        is_json,
    }) = cli.command
    {
        let snapshot = load_snapshot(services)?;
        let mut records = require_folder(&snapshot, &folder_id)?;

        let mut order = settings.display.sort_order();
        if let Some(key) = sort {
            order.key = key;
        }
        if desc {
            order.direction = SortDirection::Descending;
        }
        debug!("Listing '{}' ordered by {:?}", folder_id, order);
        order.sort(&mut records);

        if is_json {
            write_json(&records)?;
        } else {
            show_records(&records, settings.display.show_urls);
        }
    }
    Ok(())
}

pub fn show(cli: Cli, services: &ServiceContainer, settings: &Settings) -> CliResult<()> {
    if let Some(Commands::Show { id, is_json }) = cli.command {
        let snapshot = load_snapshot(services)?;
        let record = snapshot.require_record(&id)?;
        let path = snapshot.tree.build_path_with(&id, settings.path_termination);

        if is_json {
            write_json(&RecordView {
                record,
                favicon: favicon_url(record),
                path,
            })?;
        } else {
            show_record_detail(record, &path);
        }
    }
    Ok(())
}

pub fn path(cli: Cli, services: &ServiceContainer, settings: &Settings) -> CliResult<()> {
    if let Some(Commands::Path { id, any_root }) = cli.command {
        let snapshot = load_snapshot(services)?;
        snapshot.require_record(&id)?;

        let termination = if any_root {
            PathTermination::AnyRoot
        } else {
            settings.path_termination
        };
        let path = snapshot.tree.build_path_with(&id, termination);
        if path.is_empty() {
            eprintln!("(top level)");
        } else {
            println!("{}", path.join(" > "));
        }
    }
    Ok(())
}

#[instrument(skip_all, level = "debug")]
pub fn search(cli: Cli, services: &ServiceContainer) -> CliResult<()> {
    if let Some(Commands::Search {
        query,
        kind,
        tags,
        since,
        until,
        limit,
        is_json,
    }) = cli.command
    {
        let query = query.trim();
        if query.is_empty() {
            return Err(CliError::InvalidInput(
                "search query must not be empty".to_string(),
            ));
        }

        let filter = SearchFilterBuilder::default()
            .kind(kind)
            .since(since.as_deref().map(|d| parse_date(d, false)).transpose()?)
            .until(until.as_deref().map(|d| parse_date(d, true)).transpose()?)
            .tags(parse_tags(tags.as_deref()))
            .build()
            .map_err(|e| CliError::Other(format!("building search filter: {}", e)))?;
        debug!("Search '{}' with {:?}", query, filter);

        let snapshot = load_snapshot(services)?;
        let mut hits = if filter.is_empty() {
            snapshot.tree.search(query)
        } else {
            let spec = filter.to_specification();
            snapshot.tree.search_filtered(query, &*spec)
        };
        if let Some(limit) = limit {
            hits.truncate(limit);
        }

        if is_json {
            write_json(&hits)?;
            return Ok(());
        }

        show_hits(&hits, query);
        eprintln!("Found {} records", hits.len());
        if !hits.is_empty() {
            let ids: Vec<&str> = hits.iter().filter_map(|h| h.record.id_str()).collect();
            println!("{}", ids.join(","));
        }
    }
    Ok(())
}

pub fn suggest(cli: Cli, services: &ServiceContainer) -> CliResult<()> {
    if let Some(Commands::Suggest { query, limit }) = cli.command {
        if query.trim().is_empty() {
            return Ok(());
        }
        let snapshot = load_snapshot(services)?;
        for suggestion in suggestions(snapshot.tree.records(), query.trim(), limit) {
            println!("{}", suggestion);
        }
    }
    Ok(())
}

pub fn stats(cli: Cli, services: &ServiceContainer) -> CliResult<()> {
    if let Some(Commands::Stats { computed, is_json }) = cli.command {
        let snapshot = load_snapshot(services)?;
        let preset = !computed && snapshot.preset_stats.is_some();
        let stats = if computed {
            snapshot.tree.compute_stats()
        } else {
            snapshot.effective_stats()
        };

        if is_json {
            write_json(&stats)?;
        } else {
            show_stats(&stats, preset);
        }
    }
    Ok(())
}

pub fn tree(cli: Cli, services: &ServiceContainer, settings: &Settings) -> CliResult<()> {
    if let Some(Commands::Tree { id, max_depth }) = cli.command {
        let snapshot = load_snapshot(services)?;
        require_folder(&snapshot, &id)?;

        let entries = snapshot.tree.descendants(&id, max_depth);
        if entries.is_empty() {
            eprintln!("Folder is empty");
        }
        for line in render_tree(&entries, settings.display.show_urls) {
            println!("{}", line);
        }
    }
    Ok(())
}

pub fn open(cli: Cli, services: &ServiceContainer) -> CliResult<()> {
    if let Some(Commands::Open { id }) = cli.command {
        let snapshot = load_snapshot(services)?;
        let record = snapshot.require_record(&id)?;
        let url = match record.url() {
            Some(url) if !url.is_empty() => url,
            Some(_) => {
                return Err(CliError::InvalidInput(format!("'{}' has no url", record.name)))
            }
            None => {
                return Err(CliError::InvalidInput(format!(
                    "'{}' is a folder, use 'ls {}'",
                    record.name, id
                )))
            }
        };

        debug!("Opening URL with default OS command: {}", url);
        open::that(url).map_err(|e| CliError::CommandFailed(format!("Failed to open URL: {}", e)))?;
        println!("Opened: {}", url);
    }
    Ok(())
}

pub fn info(cli: Cli, services: &ServiceContainer, settings: &Settings) -> CliResult<()> {
    let config_file = cli
        .config
        .clone()
        .or_else(|| default_config_path().filter(|p| p.exists()));

    println!("Program Version: {}", env!("CARGO_PKG_VERSION"));
    println!("\nConfiguration:");
    match config_file {
        Some(path) => println!("  Config file: {}", path.display()),
        None => println!("  Config file: (defaults)"),
    }
    println!("  Source: {}", services.catalog.source_description());
    println!("  HTTP timeout: {} ms", settings.http_timeout_ms);
    println!("  Path termination: {:?}", settings.path_termination);
    println!(
        "  Sort: {} {:?}",
        settings.display.sort_by, settings.display.order
    );

    let reachable = services.catalog.check_source();
    println!("  Reachable: {}", if reachable { "yes" } else { "no" });

    let snapshot = load_snapshot(services)?;
    println!("\nSnapshot:");
    println!("  Loaded from: {} ({})", snapshot.source, snapshot.origin);
    println!(
        "  Payload version: {}",
        snapshot.version.as_deref().unwrap_or("-")
    );
    match snapshot.count {
        Some(count) => println!("  Records: {} (payload claims {})", snapshot.tree.len(), count),
        None => println!("  Records: {}", snapshot.tree.len()),
    }
    match snapshot.tree.last_sync() {
        Some(ts) => println!("  Last sync: {}", ts.to_rfc3339()),
        None => println!("  Last sync: unknown"),
    }
    println!(
        "  Loaded at: {}",
        snapshot.loaded_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    Ok(())
}
