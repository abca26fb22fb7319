// SPDX-FileCopyrightText: 2026 Dashwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dashboard resolution, mounting, and concurrent rendering.

use std::sync::Arc;

use dashwire_core::{
    CatalogEntry, DisabledWidget, WidgetCatalog, WidgetId, WidgetPermissions,
};
use dashwire_engine::{EngineSettings, UpdateBus, WidgetEngine};
use dashwire_render::{ErrorKind, RenderOutcome, WidgetView};
use dashwire_test_utils::{MockToolClient, fixtures};

fn catalog() -> WidgetCatalog {
    let mut catalog = WidgetCatalog::new();
    catalog.insert_widget(fixtures::stats_card("orders", "orders"));
    catalog.insert_widget(fixtures::with_permissions(
        fixtures::stats_card("payroll", "payroll"),
        WidgetPermissions::roles(&["admin"]),
    ));
    catalog.insert_widget(fixtures::stats_card("failing", "offline"));
    catalog.insert(CatalogEntry::Disabled(DisabledWidget {
        id: WidgetId::from("broken"),
        reason: "invalid refresh interval `soon`".into(),
        permissions: None,
        published: true,
    }));
    let mut draft = fixtures::stats_card("draft", "orders");
    draft.published = false;
    catalog.insert_widget(draft);

    catalog.add_dashboard(fixtures::dashboard(
        "sales",
        &["failing", "orders", "payroll", "broken", "draft", "missing"],
    ));
    catalog.add_dashboard(fixtures::dashboard("lean", &["orders"]));
    catalog
}

async fn scripted_client() -> MockToolClient {
    let client = MockToolClient::new();
    client
        .push_data("shop", "orders", fixtures::stats_data(23141, "Products"))
        .await;
    client
        .push_data("shop", "payroll", fixtures::stats_data(99, "People"))
        .await;
    client
}

fn engine(client: &MockToolClient, settings: EngineSettings) -> WidgetEngine {
    WidgetEngine::new(Arc::new(client.clone()), settings, UpdateBus::default())
}

fn ids(outcomes: &[(WidgetId, RenderOutcome)]) -> Vec<&str> {
    outcomes.iter().map(|(id, _)| id.as_str()).collect()
}

#[tokio::test(start_paused = true)]
async fn viewer_sees_permitted_widgets_in_display_order() {
    let client = scripted_client().await;
    let engine = engine(&client, EngineSettings::default());
    let catalog = catalog();
    let sales = catalog.dashboard("sales").unwrap();

    let guest = fixtures::viewer("guest", &[]);
    let outcomes = engine.render_dashboard(sales, &catalog, &guest).await;
    assert_eq!(ids(&outcomes), ["failing", "orders", "broken"]);

    assert!(matches!(
        &outcomes[0].1,
        RenderOutcome::Error { kind: ErrorKind::Fetch, .. }
    ));
    match outcomes[1].1.view() {
        Some(WidgetView::StatsCard { value, .. }) => assert_eq!(value, "23.141"),
        other => panic!("expected stats card, got {other:?}"),
    }
    match &outcomes[2].1 {
        RenderOutcome::Error { kind, message } => {
            assert_eq!(*kind, ErrorKind::Config);
            assert!(message.contains("soon"));
        }
        other => panic!("expected config error, got {other:?}"),
    }

    assert_eq!(client.calls_to("shop", "payroll").await, 0);
    assert!(!engine.is_mounted(&WidgetId::from("broken")));

    let admin = fixtures::viewer("root", &["admin"]);
    let outcomes = engine.render_dashboard(sales, &catalog, &admin).await;
    assert_eq!(ids(&outcomes), ["failing", "orders", "payroll", "broken"]);
    assert_eq!(client.calls_to("shop", "orders").await, 1, "orders stays cached");
}

#[tokio::test(start_paused = true)]
async fn unpublished_widgets_can_be_included() {
    let client = scripted_client().await;
    let settings = EngineSettings {
        include_unpublished: true,
        ..EngineSettings::default()
    };
    let engine = engine(&client, settings);
    let catalog = catalog();

    let outcomes = engine
        .render_dashboard(
            catalog.dashboard("sales").unwrap(),
            &catalog,
            &fixtures::viewer("guest", &[]),
        )
        .await;
    assert_eq!(ids(&outcomes), ["failing", "orders", "broken", "draft"]);
}

#[tokio::test(start_paused = true)]
async fn switching_dashboards_unmounts_leftovers() {
    let client = scripted_client().await;
    let engine = engine(&client, EngineSettings::default());
    let catalog = catalog();
    let viewer = fixtures::viewer("guest", &[]);

    engine.mount_dashboard(catalog.dashboard("sales").unwrap(), &catalog, &viewer);
    let mut mounted = engine.mounted_ids();
    mounted.sort();
    assert_eq!(mounted, [WidgetId::from("failing"), WidgetId::from("orders")]);

    let entries = engine.mount_dashboard(catalog.dashboard("lean").unwrap(), &catalog, &viewer);
    assert_eq!(entries.len(), 1);
    assert_eq!(engine.mounted_ids(), [WidgetId::from("orders")]);
}

#[tokio::test(start_paused = true)]
async fn denied_dashboard_renders_nothing() {
    let client = scripted_client().await;
    let engine = engine(&client, EngineSettings::default());
    let catalog = catalog();
    let mut sales = catalog.dashboard("sales").unwrap().clone();
    sales.permissions = Some(WidgetPermissions::users(&["ceo"]));

    let outcomes = engine
        .render_dashboard(&sales, &catalog, &fixtures::viewer("guest", &["admin"]))
        .await;
    assert!(outcomes.is_empty());
    assert_eq!(client.call_count().await, 0);
}
