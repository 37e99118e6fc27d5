use payloads::{
    ApiError, ClientError, ListQuery, Paginated,
    responses::{ImplantationSuivi, resources},
};
use serde_json::json;
use test_helpers::{assert_status_code, spawn_app, unreachable_client};

#[tokio::test]
async fn server_error_keeps_status_and_body() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let result = app.client.get::<serde_json::Value>("/failing/").await;
    let error = ApiError::from(result.unwrap_err());

    assert_eq!(error.message, "server error");
    assert_eq!(error.status, Some(500));
    assert_eq!(error.details, Some(json!({ "detail": "server error" })));
    assert!(error.is_http());
    Ok(())
}

#[tokio::test]
async fn injected_failure_uses_message_field() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.fail_with(503, json!({ "message": "Maintenance in progress" }));

    let result = app
        .client
        .list_implantation_suivi(&ListQuery::new(10, 0))
        .await;
    let error = ApiError::from(result.unwrap_err());
    assert_eq!(error.message, "Maintenance in progress");
    assert_eq!(error.status, Some(503));

    app.recover();
    app.client
        .list_implantation_suivi(&ListQuery::new(10, 0))
        .await?;
    Ok(())
}

#[tokio::test]
async fn failure_without_readable_message_names_the_status()
-> anyhow::Result<()> {
    let app = spawn_app().await;
    app.fail_with(502, json!({ "errors": ["upstream"] }));

    let result = app.client.get_financial_summary().await;
    let error = ApiError::from(result.unwrap_err());

    assert_eq!(error.message, "Request failed with status code 502");
    assert_eq!(error.details, Some(json!({ "errors": ["upstream"] })));
    Ok(())
}

#[tokio::test]
async fn invalid_query_is_rejected() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let query = ListQuery::new(10, 0).filter("zone_id", "north");

    let result = app.client.list_implantation_suivi(&query).await;

    assert_status_code(result, 400);
    Ok(())
}

#[tokio::test]
async fn unknown_resource_is_not_found() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let result = app.client.get::<serde_json::Value>("/kpi/unknown/").await;

    assert_status_code(result, 404);
    Ok(())
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let result = app
        .client
        .get::<Paginated<ImplantationSuivi>>("/malformed/")
        .await;

    let error = result.unwrap_err();
    assert!(matches!(error, ClientError::Decode(..)));
    let error = ApiError::from(error);
    assert_eq!(error.status, Some(200));
    assert!(!error.message.is_empty());
    Ok(())
}

#[tokio::test]
async fn wrong_shape_is_a_decode_error() -> anyhow::Result<()> {
    let app = spawn_app().await;

    // a bare array where a paginated envelope is expected
    let result = app
        .client
        .get::<Paginated<ImplantationSuivi>>(resources::FINANCIAL_SUMMARY)
        .await;

    assert!(matches!(result, Err(ClientError::Decode(..))));
    Ok(())
}

#[tokio::test]
async fn unreachable_backend_is_a_network_error() -> anyhow::Result<()> {
    let client = unreachable_client();

    let result = client.health_check().await;
    let error = ApiError::from(result.unwrap_err());

    assert_eq!(error.status, None);
    assert_eq!(error.message, "Network error. Please check your connection.");
    assert!(error.is_network());
    Ok(())
}
