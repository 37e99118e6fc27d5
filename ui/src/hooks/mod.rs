pub mod cache;
pub mod fetch;
pub mod query;
pub mod use_api;
pub mod use_filters;
pub mod use_pagination;
pub mod use_sorting;

pub use cache::ResponseCache;
pub use fetch::{ApiOptions, FetchController, FetchState, RequestTicket};
pub use query::list_path;
pub use use_api::{ApiHookReturn, use_api};
pub use use_filters::{FilterState, FilterValue, UseFiltersHandle, use_filters};
pub use use_pagination::{PaginationState, UsePaginationHandle, use_pagination};
pub use use_sorting::{SortState, UseSortingHandle, use_sorting};
