use payloads::ListQuery;

use super::{FilterState, PaginationState, SortState};

/// Build the request path for a list `resource` from a page's table state.
///
/// Equal states always give the same string, so the result can be passed to
/// `use_api` on every render without defeating its cache.
pub fn list_path(
    resource: &str,
    pagination: &PaginationState,
    sorting: &SortState,
    filters: &FilterState,
) -> String {
    let mut query = ListQuery::new(pagination.limit(), pagination.offset());
    if let Some(column) = sorting.column() {
        query = query.ordering(column, sorting.direction());
    }
    for (key, value) in filters.iter() {
        query = query.filter(key, value);
    }
    query.path(resource)
}
