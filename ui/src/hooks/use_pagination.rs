use std::rc::Rc;
use yew::prelude::*;

/// Current page (1-based) and a fixed page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    current_page: u64,
    page_size: u64,
}

impl PaginationState {
    /// Start on page 1. A zero page size is raised to 1.
    pub fn new(page_size: u64) -> Self {
        Self::with_page(1, page_size)
    }

    pub fn with_page(page: u64, page_size: u64) -> Self {
        Self {
            current_page: page.max(1),
            page_size: page_size.max(1),
        }
    }

    pub fn current_page(&self) -> u64 {
        self.current_page
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    /// Move to `page`, never below 1. There is no upper bound here; the
    /// caller knows the row count and disables navigation past the end.
    pub fn go_to_page(&mut self, page: i64) {
        self.current_page = page.max(1).unsigned_abs();
    }

    pub fn limit(&self) -> u64 {
        self.page_size
    }

    pub fn offset(&self) -> u64 {
        (self.current_page - 1).saturating_mul(self.page_size)
    }

    pub fn total_pages(&self, count: u64) -> u64 {
        count.div_ceil(self.page_size)
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self, count: u64) -> bool {
        self.current_page < self.total_pages(count)
    }
}

pub enum PaginationAction {
    GoToPage(i64),
}

impl Reducible for PaginationState {
    type Action = PaginationAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = *self;
        match action {
            PaginationAction::GoToPage(page) => next.go_to_page(page),
        }
        if next == *self { self } else { Rc::new(next) }
    }
}

pub struct UsePaginationHandle {
    pub current_page: u64,
    pub page_size: u64,
    pub go_to_page: Callback<i64>,
}

impl UsePaginationHandle {
    pub fn state(&self) -> PaginationState {
        PaginationState::with_page(self.current_page, self.page_size)
    }
}

/// Page tracking for a paginated table. `page_size` is read on mount only.
#[hook]
pub fn use_pagination(page_size: u64) -> UsePaginationHandle {
    let state = use_reducer(|| PaginationState::new(page_size));

    let go_to_page = {
        let state = state.clone();
        Callback::from(move |page: i64| {
            state.dispatch(PaginationAction::GoToPage(page))
        })
    };

    UsePaginationHandle {
        current_page: state.current_page(),
        page_size: state.page_size(),
        go_to_page,
    }
}
