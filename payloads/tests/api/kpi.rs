use payloads::{ListQuery, SortDirection};
use rust_decimal::Decimal;
use test_helpers::{
    mock::{CLIENTS, ZONES},
    spawn_app,
};

#[tokio::test]
async fn zone_occupation_is_paginated() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let page = app
        .client
        .list_zone_occupation(&ListQuery::new(2, 0))
        .await?;

    assert_eq!(page.count, ZONES.len() as u64);
    assert_eq!(page.results.len(), 2);
    for zone in &page.results {
        assert!(zone.occupied_surface <= zone.total_surface);
    }
    Ok(())
}

#[tokio::test]
async fn client_portfolio_orders_by_revenue() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let query =
        ListQuery::new(50, 0).ordering("annual_revenue", SortDirection::Desc);

    let page = app.client.list_client_portfolio(&query).await?;

    assert_eq!(page.count, CLIENTS.len() as u64);
    assert!(
        page.results
            .windows(2)
            .all(|pair| pair[0].annual_revenue >= pair[1].annual_revenue)
    );
    // one client has no sector on record
    assert!(page.results.iter().any(|client| client.sector.is_none()));
    Ok(())
}

#[tokio::test]
async fn aged_receivables_add_up() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let page = app
        .client
        .list_aged_receivables(&ListQuery::new(50, 0))
        .await?;

    assert_eq!(page.results, app.dataset().receivables);
    for row in &page.results {
        assert_eq!(
            row.total(),
            row.current + row.days_30 + row.days_60 + row.days_90_plus
        );
        assert!(row.total() >= Decimal::ZERO);
    }
    Ok(())
}

#[tokio::test]
async fn financial_summary_is_a_bare_list() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let years = app.client.get_financial_summary().await?;

    assert_eq!(years, app.dataset().financials);
    for year in &years {
        assert_eq!(year.margin, year.revenue - year.expenses);
    }
    Ok(())
}
