use derive_more::Display;
use std::collections::BTreeMap;
use std::rc::Rc;
use yew::prelude::*;

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum FilterValue {
    Text(String),
    Number(i64),
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

/// Active filters by key. A key is either present with a value or absent;
/// there is no "set but empty" state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    filters: BTreeMap<String, FilterValue>,
}

impl FilterState {
    /// Set `key` to `value`, or remove it when `value` is `None` or empty
    /// text (an empty select option means "all").
    pub fn update(&mut self, key: &str, value: Option<FilterValue>) {
        match value {
            Some(FilterValue::Text(text)) if text.trim().is_empty() => {
                self.filters.remove(key);
            }
            Some(value) => {
                self.filters.insert(key.to_string(), value);
            }
            None => {
                self.filters.remove(key);
            }
        }
    }

    /// Remove every filter.
    pub fn clear(&mut self) {
        self.filters.clear();
    }

    pub fn get(&self, key: &str) -> Option<&FilterValue> {
        self.filters.get(key)
    }

    /// Filters in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
        self.filters.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

pub enum FilterAction {
    Update(String, Option<FilterValue>),
    Clear,
}

impl Reducible for FilterState {
    type Action = FilterAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            FilterAction::Update(key, value) => next.update(&key, value),
            FilterAction::Clear => next.clear(),
        }
        Rc::new(next)
    }
}

pub struct UseFiltersHandle {
    pub filters: FilterState,
    pub update_filters: Callback<(String, Option<FilterValue>)>,
    pub clear_filters: Callback<()>,
}

/// Filter state for a dashboard page, starting empty.
#[hook]
pub fn use_filters() -> UseFiltersHandle {
    let state = use_reducer(FilterState::default);

    let update_filters = {
        let state = state.clone();
        Callback::from(move |(key, value): (String, Option<FilterValue>)| {
            state.dispatch(FilterAction::Update(key, value))
        })
    };

    let clear_filters = {
        let state = state.clone();
        Callback::from(move |_| state.dispatch(FilterAction::Clear))
    };

    UseFiltersHandle {
        filters: (*state).clone(),
        update_filters,
        clear_filters,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsetting_a_key_equals_never_setting_it() {
        let mut state = FilterState::default();
        state.update("zone_id", Some("1".into()));
        assert_eq!(state.get("zone_id"), Some(&FilterValue::from("1")));

        state.update("zone_id", None);
        assert_eq!(state, FilterState::default());
        assert_eq!(state.get("zone_id"), None);
    }

    #[test]
    fn empty_text_removes_the_key() {
        let mut state = FilterState::default();
        state.update("client", Some("Atlas".into()));
        state.update("client", Some("".into()));
        assert!(state.is_empty());
    }

    #[test]
    fn later_update_replaces_value() {
        let mut state = FilterState::default();
        state.update("year", Some(FilterValue::Number(2023)));
        state.update("year", Some(FilterValue::Number(2024)));
        assert_eq!(state.len(), 1);
        assert_eq!(state.get("year"), Some(&FilterValue::Number(2024)));
    }

    #[test]
    fn clear_always_empties() {
        let mut state = FilterState::default();
        state.clear();
        assert!(state.is_empty());

        state.update("zone_id", Some(FilterValue::Number(1)));
        state.update("client", Some("Atlas".into()));
        state.clear();
        assert_eq!(state, FilterState::default());
    }

    #[test]
    fn iterates_in_key_order() {
        let mut state = FilterState::default();
        state.update("zone_id", Some(FilterValue::Number(3)));
        state.update("client", Some("Atlas".into()));

        let keys: Vec<_> = state.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, ["client", "zone_id"]);
    }

    #[test]
    fn values_display_as_query_text() {
        assert_eq!(FilterValue::Number(12).to_string(), "12");
        assert_eq!(FilterValue::from("Zone B").to_string(), "Zone B");
    }

    #[test]
    fn reducer_updates_and_clears() {
        let state = Rc::new(FilterState::default());
        let state =
            state.reduce(FilterAction::Update("zone_id".into(), Some(FilterValue::Number(2))));
        assert_eq!(state.len(), 1);

        let state = state.reduce(FilterAction::Clear);
        assert!(state.is_empty());
    }
}
