// src/cli/browse.rs
use crate::application::services::catalog_service::{CatalogSnapshot, SnapshotReceiver};
use crate::cli::bookmark_commands::load_snapshot;
use crate::cli::display::{show_hits, show_records, show_stats};
use crate::cli::error::{CliError, CliResult};
use crate::config::Settings;
use crate::domain::navigation::NavigationState;
use crate::domain::record::ROOT_ID;
use crate::infrastructure::di::ServiceContainer;
use crossterm::style::Stylize;
use rustyline::{error::ReadlineError, DefaultEditor};
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, instrument};

const HELP: &str = "\
Commands:
  ls           list the current folder
  cd <id>      enter a folder (cd .. goes back)
  back         return to the previous location
  home         jump to the top level
  up <n>       jump to breadcrumb entry n (0 is Root)
  find <text>  search names and urls
  stats        collection statistics
  refresh      reload from the source
  help         this text
  quit         leave the browser";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    List,
    Enter(String),
    Back,
    Home,
    Up(usize),
    Find(String),
    Stats,
    Refresh,
    Help,
    Quit,
}

impl FromStr for BrowseCommand {
    type Err = CliError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (cmd, arg) = match line.split_once(char::is_whitespace) {
            Some((cmd, arg)) => (cmd, arg.trim()),
            None => (line, ""),
        };

        let command = match (cmd.to_lowercase().as_str(), arg) {
            ("ls" | "l", _) => BrowseCommand::List,
            ("cd", "..") | ("back" | "b", _) => BrowseCommand::Back,
            ("cd", "" | "/" | "~") | ("home", _) => BrowseCommand::Home,
            ("cd", id) => BrowseCommand::Enter(id.to_string()),
            ("up", n) => BrowseCommand::Up(n.parse().map_err(|_| {
                CliError::InvalidInput(format!("'up' needs a breadcrumb index, got '{}'", n))
            })?),
            ("find" | "f" | "/", "") => {
                return Err(CliError::InvalidInput("'find' needs a search text".to_string()))
            }
            ("find" | "f" | "/", query) => BrowseCommand::Find(query.to_string()),
            ("stats", _) => BrowseCommand::Stats,
            ("refresh" | "r", _) => BrowseCommand::Refresh,
            ("help" | "?" | "h", _) => BrowseCommand::Help,
            ("quit" | "exit" | "q", _) => BrowseCommand::Quit,
            (other, _) => {
                return Err(CliError::InvalidInput(format!(
                    "unknown command '{}', try 'help'",
                    other
                )))
            }
        };
        Ok(command)
    }
}

/// Moves into `id` if it is a folder of the current snapshot.
pub fn enter_folder(
    nav: &mut NavigationState,
    snapshot: &CatalogSnapshot,
    id: &str,
) -> CliResult<()> {
    if id == ROOT_ID {
        nav.go_home();
        return Ok(());
    }
    let record = snapshot.require_record(id)?;
    if !record.is_folder() {
        return Err(CliError::InvalidInput(format!(
            "'{}' is a link: {}",
            record.name,
            record.url().unwrap_or_default()
        )));
    }
    nav.navigate_to(id, &record.name);
    Ok(())
}

/// After a reload the trail may point at folders that no longer exist.
pub fn revalidate(nav: &mut NavigationState, snapshot: &CatalogSnapshot) {
    let stale = nav
        .trail()
        .iter()
        .skip(1)
        .any(|loc| snapshot.tree.find_by_id(&loc.id).is_none());
    if stale {
        debug!("Current trail vanished after reload, going home");
        nav.go_home();
    }
}

struct Browser<'a> {
    services: &'a ServiceContainer,
    settings: &'a Settings,
    nav: NavigationState,
    updates: SnapshotReceiver,
    snapshot: Arc<CatalogSnapshot>,
}

impl Browser<'_> {
    fn list(&self) {
        println!("{}", self.nav.breadcrumb().bold());
        let mut records = self.snapshot.tree.children(self.nav.current_id());
        self.settings.display.sort_order().sort(&mut records);
        show_records(&records, self.settings.display.show_urls);
    }

    fn pick_up_changes(&mut self) {
        if self.updates.has_changed().unwrap_or(false) {
            if let Some(snapshot) = self.updates.borrow_and_update().clone() {
                self.snapshot = snapshot;
            }
            revalidate(&mut self.nav, &self.snapshot);
        }
    }

    fn run(&mut self, command: BrowseCommand) -> CliResult<bool> {
        match command {
            BrowseCommand::List => self.list(),
            BrowseCommand::Enter(id) => {
                enter_folder(&mut self.nav, &self.snapshot, &id)?;
                self.list();
            }
            BrowseCommand::Back => {
                self.nav.go_back();
                self.list();
            }
            BrowseCommand::Home => {
                self.nav.go_home();
                self.list();
            }
            BrowseCommand::Up(index) => {
                self.nav.navigate_to_index(index);
                self.list();
            }
            BrowseCommand::Find(query) => {
                let hits = self.snapshot.tree.search(&query);
                show_hits(&hits, &query);
                eprintln!("Found {} records", hits.len());
            }
            BrowseCommand::Stats => show_stats(&self.snapshot.effective_stats(), false),
            BrowseCommand::Refresh => {
                self.services.catalog.refresh()?;
                self.pick_up_changes();
                eprintln!("Reloaded {} records", self.snapshot.tree.len());
                self.list();
            }
            BrowseCommand::Help => println!("{}", HELP),
            BrowseCommand::Quit => return Ok(false),
        }
        Ok(true)
    }
}

#[instrument(skip_all, level = "debug")]
pub fn browse(
    services: &ServiceContainer,
    settings: &Settings,
) -> CliResult<()> {
    let snapshot = load_snapshot(services)?;
    let mut editor = DefaultEditor::new()
        .map_err(|e| CliError::CommandFailed(format!("Failed to create readline editor: {}", e)))?;

    let mut browser = Browser {
        services,
        settings,
        nav: NavigationState::new(),
        updates: services.catalog.subscribe(),
        snapshot,
    };
    browser.updates.mark_unchanged();
    browser.list();

    loop {
        let prompt = format!("{}> ", browser.nav.current_name());
        match editor.readline(&prompt) {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(line.as_str());
                browser.pick_up_changes();

                let result = line
                    .parse::<BrowseCommand>()
                    .and_then(|command| browser.run(command));
                match result {
                    Ok(true) => {}
                    Ok(false) => break,
                    Err(e) => eprintln!("{}", e.to_string().red()),
                }
            }
            Err(ReadlineError::Eof) => break,
            Err(ReadlineError::Interrupted) => {
                debug!("User cancelled browse with Ctrl-C");
                return Err(CliError::OperationAborted);
            }
            Err(e) => return Err(CliError::CommandFailed(format!("Readline error: {}", e))),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::catalog_service::SnapshotOrigin;
    use crate::domain::payload::BookmarkPayload;
    use crate::domain::record::BookmarkRecord;
    use rstest::rstest;

    fn snapshot(records: Vec<BookmarkRecord>) -> CatalogSnapshot {
        CatalogSnapshot::new(
            BookmarkPayload::from_records(records),
            SnapshotOrigin::Primary,
            "test".to_string(),
        )
    }

    #[rstest]
    #[case("ls", BrowseCommand::List)]
    #[case("cd 11", BrowseCommand::Enter("11".to_string()))]
    #[case("cd ..", BrowseCommand::Back)]
    #[case("cd", BrowseCommand::Home)]
    #[case("  HOME ", BrowseCommand::Home)]
    #[case("up 0", BrowseCommand::Up(0))]
    #[case("find react docs", BrowseCommand::Find("react docs".to_string()))]
    #[case("q", BrowseCommand::Quit)]
    fn given_line_when_parse_then_command(#[case] line: &str, #[case] expected: BrowseCommand) {
        assert_eq!(line.parse::<BrowseCommand>().unwrap(), expected);
    }

    #[rstest]
    #[case("up two")]
    #[case("find")]
    #[case("rm -rf")]
    fn given_bad_line_when_parse_then_invalid_input(#[case] line: &str) {
        assert!(matches!(
            line.parse::<BrowseCommand>(),
            Err(CliError::InvalidInput(_))
        ));
    }

    #[test]
    fn given_folder_and_link_when_enter_then_only_folder_accepted() {
        let snapshot = snapshot(vec![
            BookmarkRecord::folder("5", "0", "Work"),
            BookmarkRecord::link("51", "5", "Rust", "https://www.rust-lang.org/"),
        ]);
        let mut nav = NavigationState::new();

        enter_folder(&mut nav, &snapshot, "5").unwrap();
        assert_eq!(nav.breadcrumb(), "Root > Work");

        assert!(enter_folder(&mut nav, &snapshot, "51").is_err());
        assert!(enter_folder(&mut nav, &snapshot, "missing").is_err());
        assert_eq!(nav.current_id(), "5");

        enter_folder(&mut nav, &snapshot, "0").unwrap();
        assert_eq!(nav.current_id(), "0");
    }

    #[test]
    fn given_max_usize_up_when_applied_then_location_kept() {
        let snapshot = snapshot(vec![BookmarkRecord::folder("5", "0", "Work")]);
        let mut nav = NavigationState::new();
        enter_folder(&mut nav, &snapshot, "5").unwrap();

        let command = format!("up {}", usize::MAX).parse::<BrowseCommand>().unwrap();
        let BrowseCommand::Up(index) = command else {
            panic!("expected Up, got {:?}", command);
        };
        nav.navigate_to_index(index);

        assert_eq!(nav.current_id(), "5");
        assert_eq!(nav.breadcrumb(), "Root > Work");
    }

    #[test]
    fn given_trail_missing_after_reload_when_revalidate_then_home() {
        let before = snapshot(vec![BookmarkRecord::folder("5", "0", "Work")]);
        let after = snapshot(vec![BookmarkRecord::folder("6", "0", "Other")]);
        let mut nav = NavigationState::new();
        enter_folder(&mut nav, &before, "5").unwrap();

        revalidate(&mut nav, &before);
        assert_eq!(nav.current_id(), "5");

        revalidate(&mut nav, &after);
        assert_eq!(nav.current_id(), "0");
        assert!(!nav.can_go_back());
    }
}
