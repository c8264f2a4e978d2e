/// Faceted filtering of a collection snapshot
///
/// A `FilterState` is an immutable value: every change produces a new state,
/// which the filter panel then commits wholesale.

use std::collections::{BTreeMap, BTreeSet};

use super::data::{Entity, FacetKind};

/// Committed or pending filter criteria
///
/// Selections within a kind are OR'd, kinds are AND'd with each other and
/// with the name query. An empty selection for a kind means no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    selections: BTreeMap<FacetKind, BTreeSet<String>>,
    name_query: String,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected labels for one kind (empty when unconstrained)
    pub fn selected(&self, kind: FacetKind) -> impl Iterator<Item = &str> {
        self.selections
            .get(&kind)
            .into_iter()
            .flat_map(|labels| labels.iter().map(String::as_str))
    }

    pub fn is_selected(&self, kind: FacetKind, label: &str) -> bool {
        self.selections
            .get(&kind)
            .is_some_and(|labels| labels.contains(label))
    }

    pub fn name_query(&self) -> &str {
        &self.name_query
    }

    /// New state with `label` added to or removed from `kind`'s selection
    pub fn toggled(&self, kind: FacetKind, label: &str) -> Self {
        let mut next = self.clone();
        let labels = next.selections.entry(kind).or_default();
        if !labels.remove(label) {
            labels.insert(label.to_owned());
        }
        if labels.is_empty() {
            next.selections.remove(&kind);
        }
        next
    }

    /// New state with the name query replaced
    pub fn with_name_query(&self, query: impl Into<String>) -> Self {
        Self {
            selections: self.selections.clone(),
            name_query: query.into(),
        }
    }

    /// Check if this state constrains nothing
    pub fn is_empty(&self) -> bool {
        self.selections.values().all(BTreeSet::is_empty) && self.name_query.is_empty()
    }

    /// Whether a single entity passes every active constraint
    pub fn matches(&self, entity: &Entity) -> bool {
        let facets_match = self
            .selections
            .iter()
            .filter(|(_, labels)| !labels.is_empty())
            .all(|(kind, labels)| {
                entity
                    .facet(*kind)
                    .iter()
                    .any(|value| labels.contains(&value.label))
            });

        facets_match && self.name_matches(&entity.name)
    }

    fn name_matches(&self, name: &str) -> bool {
        self.name_query.is_empty()
            || name
                .to_lowercase()
                .contains(&self.name_query.to_lowercase())
    }
}

/// Entities passing `state`, in input order
#[cfg(test)]
pub fn filter<'a>(all: &'a [Entity], state: &FilterState) -> Vec<&'a Entity> {
    all.iter().filter(|entity| state.matches(entity)).collect()
}

/// Positions in `all` of the entities passing `state`, ascending
pub fn matching_indices(all: &[Entity], state: &FilterState) -> Vec<usize> {
    all.iter()
        .enumerate()
        .filter(|(_, entity)| state.matches(entity))
        .map(|(index, _)| index)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::{CatalogKind, FacetValue};

    fn character(id: &str, name: &str, clan: Option<&str>, villages: &[&str]) -> Entity {
        Entity::new(id, CatalogKind::Characters, name)
            .with_facet(
                FacetKind::Clan,
                clan.into_iter().map(FacetValue::new).collect(),
            )
            .with_facet(
                FacetKind::Affiliation,
                villages.iter().copied().map(FacetValue::new).collect(),
            )
    }

    fn roster() -> Vec<Entity> {
        vec![
            character("1", "Naruto Uzumaki", Some("Uzumaki Clan"), &["Konohagakure"]),
            character("2", "Sasuke Uchiha", Some("Uchiha Clan"), &["Konohagakure", "Otogakure"]),
            character("3", "Gaara", None, &["Sunagakure"]),
            character("4", "Itachi Uchiha", Some("Uchiha Clan"), &["Akatsuki"]),
        ]
    }

    fn ids(entities: &[&Entity]) -> Vec<String> {
        entities.iter().map(|e| e.id.0.clone()).collect()
    }

    #[test]
    fn test_empty_state_is_identity() {
        let all = roster();
        let state = FilterState::new();
        assert!(state.is_empty());
        let filtered = filter(&all, &state);
        assert_eq!(ids(&filtered), vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn test_selection_within_kind_is_or() {
        let all = roster();
        let state = FilterState::new()
            .toggled(FacetKind::Affiliation, "Sunagakure")
            .toggled(FacetKind::Affiliation, "Akatsuki");
        assert_eq!(ids(&filter(&all, &state)), vec!["3", "4"]);
    }

    #[test]
    fn test_kinds_are_and() {
        let all = roster();
        let state = FilterState::new()
            .toggled(FacetKind::Clan, "Uchiha Clan")
            .toggled(FacetKind::Affiliation, "Konohagakure");
        // Itachi matches the clan but fails the village constraint
        assert_eq!(ids(&filter(&all, &state)), vec!["2"]);
    }

    #[test]
    fn test_missing_facet_fails_non_empty_selection() {
        let all = roster();
        let state = FilterState::new().toggled(FacetKind::Clan, "Uzumaki Clan");
        let filtered = filter(&all, &state);
        assert!(filtered.iter().all(|e| e.name != "Gaara"));
        assert_eq!(ids(&filtered), vec!["1"]);
    }

    #[test]
    fn test_name_query_is_case_insensitive_substring() {
        let all = roster();
        let state = FilterState::new().with_name_query("UCHI");
        assert_eq!(ids(&filter(&all, &state)), vec!["2", "4"]);
    }

    #[test]
    fn test_unknown_value_matches_nothing() {
        let all = roster();
        let state = FilterState::new().toggled(FacetKind::Clan, "Hyuga Clan");
        assert!(filter(&all, &state).is_empty());
        assert!(matching_indices(&all, &state).is_empty());
    }

    #[test]
    fn test_toggle_twice_removes_selection() {
        let state = FilterState::new()
            .toggled(FacetKind::Clan, "Uchiha Clan")
            .toggled(FacetKind::Clan, "Uchiha Clan");
        assert!(state.is_empty());
        assert_eq!(state, FilterState::new());
    }

    #[test]
    fn test_toggled_leaves_original_untouched() {
        let original = FilterState::new();
        let next = original.toggled(FacetKind::Nature, "Fire Release");
        assert!(original.is_empty());
        assert!(next.is_selected(FacetKind::Nature, "Fire Release"));
    }

    #[test]
    fn test_matching_indices_preserve_order() {
        let all = roster();
        let state = FilterState::new().toggled(FacetKind::Affiliation, "Konohagakure");
        assert_eq!(matching_indices(&all, &state), vec![0, 1]);
    }
}
