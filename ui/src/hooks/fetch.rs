//! The request lifecycle behind `use_api`, kept free of Yew so it can be
//! driven directly.
//!
//! Every network call is represented by a [`RequestTicket`] carrying the
//! generation it was issued under. Only the ticket from the latest generation
//! may change state; anything older resolves into the void. That covers both
//! a path changing while a request is in flight and the owning component
//! going away.

use jiff::SignedDuration;
use payloads::{APIClient, ApiError};
use serde::de::DeserializeOwned;

use super::cache::ResponseCache;

pub const DEFAULT_CACHE_TIME: SignedDuration = SignedDuration::from_secs(5 * 60);

/// What a consumer of `use_api` sees.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchState<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<ApiError>,
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiOptions {
    /// Serve and store responses through the shared [`ResponseCache`].
    pub cache: bool,
    /// How long a cached response may be served. Only used with `cache`.
    pub cache_time: SignedDuration,
}

impl Default for ApiOptions {
    fn default() -> Self {
        Self {
            cache: false,
            cache_time: DEFAULT_CACHE_TIME,
        }
    }
}

impl ApiOptions {
    /// Caching on, with the default five minute lifetime.
    pub fn cached() -> Self {
        Self {
            cache: true,
            ..Self::default()
        }
    }

    pub fn cache_time(mut self, cache_time: SignedDuration) -> Self {
        self.cache_time = cache_time;
        self
    }
}

/// A network call the controller is waiting on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTicket {
    generation: u64,
    path: String,
}

impl RequestTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

pub struct FetchController<T> {
    state: FetchState<T>,
    options: ApiOptions,
    cache: Option<ResponseCache>,
    path: Option<String>,
    generation: u64,
    disposed: bool,
}

impl<T: Clone + 'static> FetchController<T> {
    /// `cache` is only consulted when `options.cache` is set.
    pub fn new(options: ApiOptions, cache: Option<ResponseCache>) -> Self {
        Self {
            state: FetchState::default(),
            options,
            cache: cache.filter(|_| options.cache),
            path: None,
            generation: 0,
            disposed: false,
        }
    }

    pub fn state(&self) -> &FetchState<T> {
        &self.state
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Point the controller at `path`.
    ///
    /// Returns the request to perform, or `None` when nothing needs to go
    /// over the network: the path is unchanged, a fresh cached response was
    /// applied, or the controller is disposed.
    pub fn load(&mut self, path: &str) -> Option<RequestTicket> {
        if self.disposed || self.path.as_deref() == Some(path) {
            return None;
        }
        self.path = Some(path.to_string());

        if let Some(value) = self.cached(path) {
            tracing::debug!(path, "Serving response from cache");
            // whatever is still in flight belongs to the previous path
            self.generation += 1;
            self.state.data = Some(value);
            self.state.error = None;
            self.state.loading = false;
            return None;
        }

        Some(self.issue(path))
    }

    /// Request the current path again, bypassing the cache. `None` until the
    /// first `load`.
    pub fn refetch(&mut self) -> Option<RequestTicket> {
        if self.disposed {
            return None;
        }
        let path = self.path.clone()?;
        Some(self.issue(&path))
    }

    /// Apply the outcome of `ticket`'s request. Returns false when the
    /// result was discarded because a newer request has been issued since,
    /// or the controller was disposed.
    pub fn resolve(
        &mut self,
        ticket: &RequestTicket,
        result: Result<T, ApiError>,
    ) -> bool {
        if self.disposed || ticket.generation != self.generation {
            tracing::debug!(
                path = ticket.path(),
                generation = ticket.generation,
                latest = self.generation,
                "Discarding superseded response"
            );
            return false;
        }

        match result {
            Ok(value) => {
                if let Some(cache) = &self.cache {
                    cache.insert(ticket.path.clone(), value.clone());
                }
                self.state.data = Some(value);
                self.state.error = None;
            }
            Err(error) => {
                tracing::warn!(
                    path = ticket.path(),
                    status = ?error.status,
                    "Request failed: {error}"
                );
                // previous data stays visible next to the error
                self.state.error = Some(error);
            }
        }
        self.state.loading = false;
        true
    }

    /// The owner is gone; ignore everything that resolves from now on.
    pub fn dispose(&mut self) {
        self.disposed = true;
        self.state.loading = false;
    }

    fn cached(&self, path: &str) -> Option<T> {
        self.cache
            .as_ref()
            .and_then(|cache| cache.get::<T>(path, self.options.cache_time))
    }

    fn issue(&mut self, path: &str) -> RequestTicket {
        self.generation += 1;
        self.state.loading = true;
        self.state.error = None;
        RequestTicket {
            generation: self.generation,
            path: path.to_string(),
        }
    }
}

/// Perform the request for `ticket`.
pub async fn fetch<T: DeserializeOwned>(
    client: &APIClient,
    ticket: &RequestTicket,
) -> Result<T, ApiError> {
    tracing::debug!(
        path = ticket.path(),
        generation = ticket.generation(),
        "Issuing request"
    );
    client.get(ticket.path()).await.map_err(ApiError::from)
}
