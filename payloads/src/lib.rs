pub mod api_client;
pub mod error;
pub mod requests;
pub mod responses;

pub use api_client::{APIClient, ClientError};
pub use error::ApiError;
pub use requests::{ListQuery, SortDirection};
pub use responses::Paginated;

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Identifier of an occupation zone as assigned by the backend.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct ZoneId(pub i64);

/// Identifier of a client account as assigned by the backend.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct ClientId(pub i64);
