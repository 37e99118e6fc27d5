pub mod pagination_controls;
pub mod sortable_header;

pub use pagination_controls::PaginationControls;
pub use sortable_header::SortableHeader;
