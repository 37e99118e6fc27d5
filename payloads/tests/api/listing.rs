use payloads::{
    ListQuery, SortDirection,
    responses::{ImplantationSuivi, resources},
};
use test_helpers::{mock::IMPLANTATION_COUNT, spawn_app};

#[tokio::test]
async fn first_page_carries_total_count() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let page = app
        .client
        .list_implantation_suivi(&ListQuery::new(10, 0))
        .await?;

    assert_eq!(page.count, IMPLANTATION_COUNT as u64);
    assert_eq!(page.results.len(), 10);
    assert_eq!(page.total_pages(10), 5);
    assert_eq!(page.results[0], app.dataset().implantations[0]);
    Ok(())
}

#[tokio::test]
async fn last_page_is_partial() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let page = app
        .client
        .list_implantation_suivi(&ListQuery::new(10, 40))
        .await?;

    assert_eq!(page.count, IMPLANTATION_COUNT as u64);
    let ids: Vec<i64> = page.results.iter().map(|row| row.id).collect();
    assert_eq!(ids, vec![41, 42]);
    Ok(())
}

#[tokio::test]
async fn offset_past_the_end_is_empty() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let page = app
        .client
        .list_implantation_suivi(&ListQuery::new(10, 100))
        .await?;

    assert!(page.results.is_empty());
    assert_eq!(page.count, IMPLANTATION_COUNT as u64);
    Ok(())
}

#[tokio::test]
async fn descending_ordering_sorts_largest_first() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let query =
        ListQuery::new(5, 0).ordering("surface_m2", SortDirection::Desc);

    let page = app.client.list_implantation_suivi(&query).await?;

    let largest = app
        .dataset()
        .implantations
        .iter()
        .map(|row| row.surface_m2)
        .max();
    assert_eq!(page.results.first().map(|row| row.surface_m2), largest);
    assert!(
        page.results
            .windows(2)
            .all(|pair| pair[0].surface_m2 >= pair[1].surface_m2)
    );
    Ok(())
}

#[tokio::test]
async fn ascending_ordering_by_name() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let query = ListQuery::new(50, 0).ordering("client", SortDirection::Asc);

    let page = app.client.list_implantation_suivi(&query).await?;

    assert!(
        page.results
            .windows(2)
            .all(|pair| pair[0].client <= pair[1].client)
    );
    Ok(())
}

#[tokio::test]
async fn zone_filter_narrows_count() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let query = ListQuery::new(50, 0).filter("zone_id", 2);

    let page = app.client.list_implantation_suivi(&query).await?;

    let expected = app
        .dataset()
        .implantations
        .iter()
        .filter(|row| row.zone_id.0 == 2)
        .count();
    assert_eq!(page.count, expected as u64);
    assert!(page.results.iter().all(|row| row.zone_id.0 == 2));
    Ok(())
}

#[tokio::test]
async fn text_filter_is_encoded_and_case_insensitive() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let query = ListQuery::new(50, 0).filter("client", "boréal");

    let page = app.client.list_implantation_suivi(&query).await?;

    assert!(page.count > 0);
    assert!(
        page.results
            .iter()
            .all(|row: &ImplantationSuivi| row.client == "Boréal Textiles")
    );
    Ok(())
}

#[tokio::test]
async fn requests_are_sent_with_the_query_string() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let query = ListQuery::new(10, 20)
        .ordering("zone", SortDirection::Desc)
        .filter("zone_id", 3);

    app.client.list_implantation_suivi(&query).await?;

    let path = query.path(resources::IMPLANTATION_SUIVI);
    assert_eq!(
        path,
        "/implantation-suivi/?limit=10&offset=20&ordering=-zone&zone_id=3"
    );
    assert_eq!(app.requests.hits(&path), 1);
    Ok(())
}
