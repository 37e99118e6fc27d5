//! Fetch controller and response cache against the mock backend.

use jiff::{SignedDuration, Timestamp};
use payloads::{
    ListQuery, Paginated,
    responses::{ImplantationSuivi, resources},
};
use serde_json::json;
use test_helpers::{TestApp, mock::IMPLANTATION_COUNT, spawn_app};
use ui::{
    hooks::{ApiOptions, FetchController, ResponseCache, fetch::fetch},
    time::TimeSource,
};

type Page = Paginated<ImplantationSuivi>;

fn page_path(offset: u64) -> String {
    ListQuery::new(10, offset).path(resources::IMPLANTATION_SUIVI)
}

fn setup() -> (ResponseCache, TimeSource) {
    let time = TimeSource::mocked(Timestamp::UNIX_EPOCH);
    (ResponseCache::new(time.clone()), time)
}

/// Load `path` and resolve whatever request that issues.
async fn load(
    app: &TestApp,
    controller: &mut FetchController<Page>,
    path: &str,
) -> bool {
    match controller.load(path) {
        Some(ticket) => {
            let result = fetch(&app.client, &ticket).await;
            controller.resolve(&ticket, result)
        }
        None => false,
    }
}

#[tokio::test]
async fn second_consumer_within_ttl_does_not_hit_the_network()
-> anyhow::Result<()> {
    let app = spawn_app().await;
    let (cache, _) = setup();
    let path = page_path(0);

    let mut first =
        FetchController::new(ApiOptions::cached(), Some(cache.clone()));
    assert!(load(&app, &mut first, &path).await);
    let data = first.state().data.clone();
    assert_eq!(
        data.as_ref().map(|page| page.count),
        Some(IMPLANTATION_COUNT as u64)
    );
    assert_eq!(app.requests.hits(&path), 1);

    let mut second = FetchController::new(ApiOptions::cached(), Some(cache));
    assert!(second.load(&path).is_none());
    assert_eq!(second.state().data, data);
    assert!(!second.state().loading);
    assert_eq!(app.requests.hits(&path), 1);
    Ok(())
}

#[tokio::test]
async fn expired_entry_is_fetched_again() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let (cache, time) = setup();
    let path = page_path(0);

    let mut first =
        FetchController::new(ApiOptions::cached(), Some(cache.clone()));
    load(&app, &mut first, &path).await;

    time.advance(SignedDuration::from_mins(5) + SignedDuration::from_secs(1));

    let mut second = FetchController::new(ApiOptions::cached(), Some(cache));
    assert!(load(&app, &mut second, &path).await);
    assert_eq!(app.requests.hits(&path), 2);
    Ok(())
}

#[tokio::test]
async fn uncached_consumers_always_hit_the_network() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let (cache, _) = setup();
    let path = page_path(0);

    for _ in 0..2 {
        let mut controller =
            FetchController::new(ApiOptions::default(), Some(cache.clone()));
        assert!(load(&app, &mut controller, &path).await);
    }

    assert_eq!(app.requests.hits(&path), 2);
    assert!(cache.is_empty());
    Ok(())
}

#[tokio::test]
async fn refetch_bypasses_a_fresh_cache() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let (cache, _) = setup();
    let path = page_path(10);

    let mut controller =
        FetchController::new(ApiOptions::cached(), Some(cache));
    load(&app, &mut controller, &path).await;

    let ticket = controller.refetch().expect("path was loaded");
    assert!(controller.state().loading);
    let result = fetch(&app.client, &ticket).await;
    assert!(controller.resolve(&ticket, result));

    assert_eq!(app.requests.hits(&path), 2);
    assert!(!controller.state().loading);
    Ok(())
}

#[tokio::test]
async fn failed_refetch_keeps_previous_data() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let (cache, _) = setup();
    let path = page_path(0);

    let mut controller =
        FetchController::new(ApiOptions::cached(), Some(cache));
    load(&app, &mut controller, &path).await;
    let data = controller.state().data.clone();

    app.fail_with(500, json!({ "detail": "server error" }));
    let ticket = controller.refetch().expect("path was loaded");
    let result = fetch(&app.client, &ticket).await;
    assert!(controller.resolve(&ticket, result));

    let state = controller.state();
    assert_eq!(state.data, data);
    assert!(!state.loading);
    let error = state.error.as_ref().expect("refetch failed");
    assert_eq!(error.status, Some(500));
    assert_eq!(error.message, "server error");

    // the next success clears the error
    app.recover();
    let ticket = controller.refetch().expect("path was loaded");
    let result = fetch(&app.client, &ticket).await;
    controller.resolve(&ticket, result);
    assert!(controller.state().error.is_none());
    Ok(())
}

#[tokio::test]
async fn slow_response_for_a_previous_page_is_discarded()
-> anyhow::Result<()> {
    let app = spawn_app().await;
    let (cache, _) = setup();
    let slow_path = ListQuery::new(10, 0)
        .filter("delay_ms", 200)
        .path(resources::IMPLANTATION_SUIVI);
    let fast_path = page_path(10);

    let mut controller =
        FetchController::<Page>::new(ApiOptions::cached(), Some(cache.clone()));
    let slow = controller.load(&slow_path).expect("not cached");
    let fast = controller.load(&fast_path).expect("not cached");

    // both requests in flight at once; the fast one lands first
    let (slow_result, fast_result) = tokio::join!(
        fetch::<Page>(&app.client, &slow),
        fetch::<Page>(&app.client, &fast),
    );
    assert!(controller.resolve(&fast, fast_result));
    assert!(!controller.resolve(&slow, slow_result));

    let ids: Vec<i64> = controller
        .state()
        .data
        .as_ref()
        .map(|page| page.results.iter().map(|row| row.id).collect())
        .unwrap_or_default();
    assert_eq!(ids, (11..=20).collect::<Vec<_>>());
    assert!(!controller.state().loading);
    // only the applied response was cached
    assert_eq!(cache.len(), 1);
    Ok(())
}

#[tokio::test]
async fn unreachable_backend_reports_network_error() -> anyhow::Result<()> {
    let client = test_helpers::unreachable_client();
    let mut controller =
        FetchController::<Page>::new(ApiOptions::default(), None);

    let ticket = controller.load(&page_path(0)).expect("no cache");
    let result = fetch(&client, &ticket).await;
    controller.resolve(&ticket, result);

    let error = controller.state().error.as_ref().expect("request failed");
    assert!(error.is_network());
    assert!(controller.state().data.is_none());
    Ok(())
}
