// src/domain/navigation.rs
use crate::domain::record::ROOT_ID;

/// Display name of the top level.
pub const ROOT_NAME: &str = "Root";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub id: String,
    pub name: String,
}

impl Location {
    fn root() -> Self {
        Self {
            id: ROOT_ID.to_string(),
            name: ROOT_NAME.to_string(),
        }
    }
}

/// Folder trail of an interactive session plus back-history.
///
/// The trail always starts at the root; `go_back` prefers the history
/// (where the user came from) over simply going up one level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    trail: Vec<Location>,
    history: Vec<Vec<Location>>,
}

impl Default for NavigationState {
    fn default() -> Self {
        Self::new()
    }
}

impl NavigationState {
    pub fn new() -> Self {
        Self {
            trail: vec![Location::root()],
            history: Vec::new(),
        }
    }

    pub fn navigate_to(&mut self, id: &str, name: &str) {
        self.history.push(self.trail.clone());
        self.trail.push(Location {
            id: id.to_string(),
            name: name.to_string(),
        });
    }

    pub fn go_back(&mut self) {
        if let Some(previous) = self.history.pop() {
            self.trail = previous;
        } else if self.trail.len() > 1 {
            self.trail.pop();
        }
    }

    pub fn go_home(&mut self) {
        self.history.clear();
        self.trail = vec![Location::root()];
    }

    /// Jumps to an earlier breadcrumb; indexes at or past the current one are ignored.
    pub fn navigate_to_index(&mut self, index: usize) {
        if index < self.trail.len() - 1 {
            self.trail.truncate(index + 1);
        }
    }

    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty() || self.trail.len() > 1
    }

    pub fn current(&self) -> &Location {
        // trail is never empty: it starts at root and truncation keeps index 0
        &self.trail[self.trail.len() - 1]
    }

    pub fn current_id(&self) -> &str {
        &self.current().id
    }

    pub fn current_name(&self) -> &str {
        &self.current().name
    }

    pub fn trail(&self) -> &[Location] {
        &self.trail
    }

    pub fn breadcrumb(&self) -> String {
        self.trail
            .iter()
            .map(|l| l.name.as_str())
            .collect::<Vec<_>>()
            .join(" > ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_huge_index_when_navigate_to_index_then_ignored() {
        let mut nav = NavigationState::new();
        nav.navigate_to("1", "Work");

        nav.navigate_to_index(usize::MAX);

        assert_eq!(nav.current_id(), "1");
        assert_eq!(nav.breadcrumb(), "Root > Work");
    }

    #[test]
    fn given_new_state_when_inspect_then_at_root() {
        let nav = NavigationState::new();
        assert_eq!(nav.current_id(), "0");
        assert_eq!(nav.breadcrumb(), "Root");
        assert!(!nav.can_go_back());
    }

    #[test]
    fn given_two_levels_when_go_back_then_restores_previous_trail() {
        let mut nav = NavigationState::new();
        nav.navigate_to("1", "Work");
        nav.navigate_to("11", "Docs");
        assert_eq!(nav.breadcrumb(), "Root > Work > Docs");

        nav.go_back();
        assert_eq!(nav.current_id(), "1");
        nav.go_back();
        assert_eq!(nav.current_id(), "0");
        assert!(!nav.can_go_back());
    }

    #[test]
    fn given_index_jump_when_go_back_then_history_wins_over_parent() {
        let mut nav = NavigationState::new();
        nav.navigate_to("1", "Work");
        nav.navigate_to("11", "Docs");
        nav.navigate_to_index(0);
        assert_eq!(nav.current_id(), "0");

        // history still remembers where the user came from
        nav.go_back();
        assert_eq!(nav.current_id(), "1");
    }

    #[test]
    fn given_current_index_when_navigate_to_index_then_no_change() {
        let mut nav = NavigationState::new();
        nav.navigate_to("1", "Work");
        nav.navigate_to_index(1);
        nav.navigate_to_index(7);
        assert_eq!(nav.current_name(), "Work");
    }

    #[test]
    fn given_deep_trail_when_go_home_then_history_cleared() {
        let mut nav = NavigationState::new();
        nav.navigate_to("1", "Work");
        nav.navigate_to("11", "Docs");
        nav.go_home();

        assert_eq!(nav.trail().len(), 1);
        assert!(!nav.can_go_back());
        nav.go_back();
        assert_eq!(nav.current_id(), "0");
    }
}
