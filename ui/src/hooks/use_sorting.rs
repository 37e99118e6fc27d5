use payloads::SortDirection;
use std::rc::Rc;
use yew::prelude::*;

/// A single sort column, or none. `direction` means nothing while
/// `column` is `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortState {
    column: Option<String>,
    direction: SortDirection,
}

impl SortState {
    pub fn column(&self) -> Option<&str> {
        self.column.as_deref()
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    /// Same column flips the direction; any other column becomes the sort
    /// column, ascending.
    pub fn toggle(&mut self, column: &str) {
        if self.column.as_deref() == Some(column) {
            self.direction = self.direction.flipped();
        } else {
            self.column = Some(column.to_string());
            self.direction = SortDirection::Asc;
        }
    }

    /// The backend `ordering` parameter, `-column` when descending.
    pub fn ordering(&self) -> Option<String> {
        self.column.as_ref().map(|column| match self.direction {
            SortDirection::Asc => column.clone(),
            SortDirection::Desc => format!("-{column}"),
        })
    }
}

pub enum SortAction {
    Toggle(String),
}

impl Reducible for SortState {
    type Action = SortAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            SortAction::Toggle(column) => next.toggle(&column),
        }
        Rc::new(next)
    }
}

pub struct UseSortingHandle {
    pub sort_column: Option<String>,
    pub sort_direction: SortDirection,
    pub toggle_sorting: Callback<String>,
}

impl UseSortingHandle {
    pub fn state(&self) -> SortState {
        SortState {
            column: self.sort_column.clone(),
            direction: self.sort_direction,
        }
    }
}

/// Column sort state for a table. Nothing is sorted until the first toggle.
#[hook]
pub fn use_sorting() -> UseSortingHandle {
    let state = use_reducer(SortState::default);

    let toggle_sorting = {
        let state = state.clone();
        Callback::from(move |column: String| {
            state.dispatch(SortAction::Toggle(column))
        })
    };

    UseSortingHandle {
        sort_column: state.column.clone(),
        sort_direction: state.direction,
        toggle_sorting,
    }
}
