/// Filter panel state: facet options, pending input, debounced commit

use std::collections::BTreeMap;
use std::time::Duration;

use super::data::{FacetKind, FacetValue};
use super::filter::FilterState;
use super::schedule::{Debounce, Ticket};

/// Quiescence window before pending input is committed
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Raw user input to the panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterInput {
    Toggle(FacetKind, String),
    Query(String),
}

#[derive(Debug)]
pub struct FilterPanel {
    kinds: Vec<FacetKind>,
    options: BTreeMap<FacetKind, Vec<FacetValue>>,
    pending: FilterState,
    committed: FilterState,
    debounce: Debounce,
}

impl FilterPanel {
    pub fn new(kinds: &[FacetKind], delay: Duration) -> Self {
        Self {
            kinds: kinds.to_vec(),
            options: BTreeMap::new(),
            pending: FilterState::new(),
            committed: FilterState::new(),
            debounce: Debounce::new(delay),
        }
    }

    /// Facet groups in display order
    pub fn kinds(&self) -> &[FacetKind] {
        &self.kinds
    }

    /// Checkbox options for one group (empty until fetched)
    pub fn options(&self, kind: FacetKind) -> &[FacetValue] {
        self.options.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn set_options(&mut self, kind: FacetKind, values: Vec<FacetValue>) {
        self.options.insert(kind, values);
    }

    /// In-progress input, reflected by checkboxes and the name field
    pub fn pending(&self) -> &FilterState {
        &self.pending
    }

    pub fn committed(&self) -> &FilterState {
        &self.committed
    }

    pub fn delay(&self) -> Duration {
        self.debounce.delay()
    }

    /// Input has arrived that is not yet committed
    pub fn is_settling(&self) -> bool {
        self.debounce.is_pending()
    }

    /// Fold one input event into the pending state and restart the debounce
    pub fn input(&mut self, input: FilterInput) -> Ticket {
        self.pending = match input {
            FilterInput::Toggle(kind, label) => self.pending.toggled(kind, &label),
            FilterInput::Query(query) => self.pending.with_name_query(query),
        };
        self.debounce.restart()
    }

    /// Debounce elapsed; returns the newly committed state for the latest ticket
    pub fn settle(&mut self, ticket: Ticket) -> Option<&FilterState> {
        if !self.debounce.settle(ticket) {
            return None;
        }
        self.committed = self.pending.clone();
        Some(&self.committed)
    }

    /// Drop any pending commit, used when the owning view unmounts
    pub fn cancel(&mut self) {
        self.debounce.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panel() -> FilterPanel {
        FilterPanel::new(&[FacetKind::Clan, FacetKind::Affiliation], DEFAULT_DEBOUNCE)
    }

    #[test]
    fn test_rapid_toggles_commit_once_with_final_state() {
        let mut panel = panel();
        let first = panel.input(FilterInput::Toggle(FacetKind::Clan, "Uchiha Clan".into()));
        let second = panel.input(FilterInput::Toggle(FacetKind::Clan, "Hyuga Clan".into()));
        let third = panel.input(FilterInput::Toggle(FacetKind::Clan, "Uchiha Clan".into()));
        assert!(panel.is_settling());

        let mut commits = Vec::new();
        for ticket in [first, second, third] {
            if let Some(state) = panel.settle(ticket) {
                commits.push(state.clone());
            }
        }

        assert_eq!(commits.len(), 1);
        assert!(!panel.is_settling());
        let expected = FilterState::new().toggled(FacetKind::Clan, "Hyuga Clan");
        assert_eq!(commits[0], expected);
        assert_eq!(panel.committed(), &expected);
    }

    #[test]
    fn test_pending_is_not_committed_before_settle() {
        let mut panel = panel();
        panel.input(FilterInput::Query("sasuke".into()));
        assert_eq!(panel.pending().name_query(), "sasuke");
        assert!(panel.committed().is_empty());
    }

    #[test]
    fn test_query_and_toggles_aggregate() {
        let mut panel = panel();
        panel.input(FilterInput::Toggle(FacetKind::Affiliation, "Konohagakure".into()));
        let ticket = panel.input(FilterInput::Query("uchiha".into()));
        let committed = panel.settle(ticket).cloned().expect("commit");
        assert!(committed.is_selected(FacetKind::Affiliation, "Konohagakure"));
        assert_eq!(committed.name_query(), "uchiha");
    }

    #[test]
    fn test_cancel_drops_pending_commit() {
        let mut panel = panel();
        let ticket = panel.input(FilterInput::Query("gaara".into()));
        panel.cancel();
        assert!(panel.settle(ticket).is_none());
        assert!(panel.committed().is_empty());
    }

    #[test]
    fn test_options_default_to_empty() {
        let mut panel = panel();
        assert!(panel.options(FacetKind::Clan).is_empty());
        panel.set_options(FacetKind::Clan, vec![FacetValue::new("Uchiha Clan")]);
        assert_eq!(panel.options(FacetKind::Clan).len(), 1);
    }
}
