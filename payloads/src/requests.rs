use derive_more::Display;
use serde::{Deserialize, Serialize};
use url::form_urlencoded;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    #[display("asc")]
    Asc,
    #[display("desc")]
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// Query parameters for a list endpoint.
///
/// Serialization order is fixed (`limit`, `offset`, `ordering`, then filters
/// in insertion order) so equal queries always produce the same string.
/// That string is also the cache key on the client side.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub limit: Option<u64>,
    pub offset: Option<u64>,
    pub ordering: Option<String>,
    pub filters: Vec<(String, String)>,
}

impl ListQuery {
    pub fn new(limit: u64, offset: u64) -> Self {
        Self {
            limit: Some(limit),
            offset: Some(offset),
            ..Self::default()
        }
    }

    /// Order by `column`, prefixed with `-` for descending.
    pub fn ordering(
        mut self,
        column: impl Into<String>,
        direction: SortDirection,
    ) -> Self {
        let column: String = column.into();
        self.ordering = Some(match direction {
            SortDirection::Asc => column,
            SortDirection::Desc => format!("-{column}"),
        });
        self
    }

    pub fn filter(
        mut self,
        key: impl Into<String>,
        value: impl ToString,
    ) -> Self {
        self.filters.push((key.into(), value.to_string()));
        self
    }

    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        if let Some(limit) = self.limit {
            serializer.append_pair("limit", &limit.to_string());
        }
        if let Some(offset) = self.offset {
            serializer.append_pair("offset", &offset.to_string());
        }
        if let Some(ordering) = &self.ordering {
            serializer.append_pair("ordering", ordering);
        }
        for (key, value) in &self.filters {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }

    /// Join a resource path with this query, e.g.
    /// `/implantation-suivi/?limit=10&offset=0`.
    pub fn path(&self, resource: &str) -> String {
        let query = self.to_query_string();
        if query.is_empty() {
            resource.to_string()
        } else {
            format!("{resource}?{query}")
        }
    }
}
