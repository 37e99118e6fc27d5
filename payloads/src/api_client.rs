use crate::{
    ListQuery, Paginated,
    responses::{
        self, AgedReceivable, ClientPortfolio, FinancialSummary,
        ImplantationSuivi, ZoneOccupation,
    },
};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

type ReqwestResult = Result<reqwest::Response, reqwest::Error>;

/// An API client for interfacing with the dashboard backend.
#[derive(Clone)]
pub struct APIClient {
    pub address: String,
    pub inner_client: reqwest::Client,
}

impl APIClient {
    /// Create a client for the backend at `address`, e.g.
    /// `http://localhost:8000`. A trailing slash is ignored.
    pub fn new(address: impl Into<String>) -> Self {
        let address: String = address.into();
        Self {
            address: address.trim_end_matches('/').to_string(),
            inner_client: reqwest::Client::new(),
        }
    }
}

/// Helper methods for http actions
impl APIClient {
    fn format_url(&self, path: &str) -> String {
        format!("{}/api/{}", &self.address, path.trim_start_matches('/'))
    }

    async fn empty_get(&self, path: &str) -> ReqwestResult {
        let request = self.inner_client.get(self.format_url(path));

        #[cfg(target_arch = "wasm32")]
        let request = request.fetch_credentials_include();

        request.send().await
    }
}

/// Methods on the backend API
impl APIClient {
    pub async fn health_check(&self) -> Result<(), ClientError> {
        let response = self.empty_get("health_check").await?;
        ok_empty(response).await
    }

    /// GET a resource and decode its JSON body.
    ///
    /// `path` is relative to the api root and carries its own query string,
    /// e.g. `/implantation-suivi/?limit=10&offset=0`.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<T, ClientError> {
        let response = self.empty_get(path).await?;
        ok_body(response).await
    }

    /// One page of zone occupation follow-up rows.
    pub async fn list_implantation_suivi(
        &self,
        query: &ListQuery,
    ) -> Result<Paginated<ImplantationSuivi>, ClientError> {
        self.get(&query.path(responses::resources::IMPLANTATION_SUIVI))
            .await
    }

    pub async fn list_zone_occupation(
        &self,
        query: &ListQuery,
    ) -> Result<Paginated<ZoneOccupation>, ClientError> {
        self.get(&query.path(responses::resources::ZONE_OCCUPATION))
            .await
    }

    pub async fn list_client_portfolio(
        &self,
        query: &ListQuery,
    ) -> Result<Paginated<ClientPortfolio>, ClientError> {
        self.get(&query.path(responses::resources::CLIENT_PORTFOLIO))
            .await
    }

    pub async fn list_aged_receivables(
        &self,
        query: &ListQuery,
    ) -> Result<Paginated<AgedReceivable>, ClientError> {
        self.get(&query.path(responses::resources::AGED_RECEIVABLES))
            .await
    }

    /// Yearly financial performance, one record per year (not paginated).
    pub async fn get_financial_summary(
        &self,
    ) -> Result<Vec<FinancialSummary>, ClientError> {
        self.get(responses::resources::FINANCIAL_SUMMARY).await
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// A non-2xx response, containing the response text.
    #[error("{1}")]
    APIError(StatusCode, String),
    /// A 2xx response whose body did not have the expected shape.
    #[error("Unexpected response from server: {1}")]
    Decode(StatusCode, #[source] serde_json::Error),
    #[error("Network error. Please check your connection.")]
    Network(#[from] reqwest::Error),
}

impl ClientError {
    /// The HTTP status, if the server answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::APIError(status, _) | Self::Decode(status, _) => {
                Some(*status)
            }
            Self::Network(_) => None,
        }
    }
}

/// Deserialize a successful request into the desired type, or return an
/// appropriate error.
pub async fn ok_body<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ClientError> {
    let status = response.status();
    if !status.is_success() {
        return Err(ClientError::APIError(status, response.text().await?));
    }
    let body = response.bytes().await?;
    serde_json::from_slice(&body).map_err(|e| ClientError::Decode(status, e))
}

/// Check that an empty response is OK, returning a ClientError if not.
pub async fn ok_empty(response: reqwest::Response) -> Result<(), ClientError> {
    if !response.status().is_success() {
        return Err(ClientError::APIError(
            response.status(),
            response.text().await?,
        ));
    }
    Ok(())
}
