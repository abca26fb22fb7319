// SPDX-FileCopyrightText: 2026 Dashwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rendering tests across every widget type.

use dashwire_core::{ChartType, ClickAction, WidgetConfig};
use dashwire_mapping::{NumberFormatter, NumberLocale};
use dashwire_render::{
    RenderOptions, RenderOutcome, Renderer, SortDirection, SortSpec, WidgetView,
};
use serde_json::{Value, json};

fn widget(widget_type: &str, mapping: Value) -> WidgetConfig {
    serde_json::from_value(json!({
        "id": "w1",
        "name": "Widget",
        "type": widget_type,
        "dataSource": "shop",
        "tool": "query",
        "mapping": mapping,
    }))
    .unwrap()
}

fn view(outcome: RenderOutcome) -> WidgetView {
    match outcome {
        RenderOutcome::Ok { view, .. } => view,
        other => panic!("expected ok outcome, got {other:?}"),
    }
}

fn orders() -> Value {
    json!({
        "orders": [
            {"id": 3, "customer": "Carla", "total": 1250.5, "paid": true},
            {"id": 1, "customer": "Anton", "total": 80, "paid": false},
            {"id": 2, "customer": "Bea", "paid": true},
        ]
    })
}

fn orders_table() -> WidgetConfig {
    widget(
        "data-table",
        json!({
            "rows": "$.orders",
            "columns": [
                {"key": "id", "label": "#", "sortable": true},
                {"key": "customer", "label": "Customer", "sortable": true},
                {"key": "total", "label": "Total", "type": "currency", "sortable": true},
                {"key": "paid", "label": "Paid", "type": "boolean"},
            ]
        }),
    )
}

#[test]
fn stats_card_formats_value_and_subtitle() {
    let config = widget("stats-card", json!({"value": "$.total", "subtitle": "{{label}}"}));
    let data = json!({"total": 23141, "label": "Products"});

    let WidgetView::StatsCard { value, subtitle, .. } =
        view(Renderer::default().render(&config, Some(&data)))
    else {
        panic!("expected stats card");
    };
    assert_eq!(value, "23.141");
    assert_eq!(subtitle.as_deref(), Some("Products"));
}

#[test]
fn stats_card_uses_configured_locale() {
    let config = widget("stats-card", json!({"value": "total"}));
    let renderer = Renderer::new(10, NumberFormatter::new(NumberLocale::EnUs, 3));

    let WidgetView::StatsCard { value, .. } =
        view(renderer.render(&config, Some(&json!({"total": 23141}))))
    else {
        panic!("expected stats card");
    };
    assert_eq!(value, "23,141");
}

#[test]
fn stats_card_missing_value_is_placeholder() {
    let config = widget("stats-card", json!({"value": "$.nope", "subtitle": "{{missing}}"}));

    let WidgetView::StatsCard { value, subtitle, .. } =
        view(Renderer::default().render(&config, Some(&json!({"total": 1}))))
    else {
        panic!("expected stats card");
    };
    assert_eq!(value, "-");
    assert_eq!(subtitle.as_deref(), Some(""));
}

#[test]
fn no_data_renders_empty() {
    let config = widget("stats-card", json!({"value": "$.total"}));
    let renderer = Renderer::default();

    assert_eq!(renderer.render(&config, None), RenderOutcome::Empty);
    assert_eq!(renderer.render(&config, Some(&Value::Null)), RenderOutcome::Empty);
}

#[test]
fn unknown_type_renders_raw_json() {
    let config = widget("gauge", json!({"needle": "$.x"}));
    let data = json!({"x": 1});

    let WidgetView::Raw { json } = view(Renderer::default().render(&config, Some(&data))) else {
        panic!("expected raw view");
    };
    assert_eq!(json, serde_json::to_string_pretty(&data).unwrap());
}

#[test]
fn table_with_non_array_rows_renders_raw() {
    let config = widget("data-table", json!({"rows": "$.rows"}));

    let outcome = Renderer::default().render(&config, Some(&json!({"rows": 42})));
    assert!(matches!(view(outcome), WidgetView::Raw { .. }));
}

#[test]
fn table_formats_cells_by_column_type() {
    let WidgetView::Table {
        columns,
        rows,
        total_rows,
        truncated,
    } = view(Renderer::default().render(&orders_table(), Some(&orders())))
    else {
        panic!("expected table");
    };

    assert_eq!(columns.len(), 4);
    assert_eq!(columns[2].label, "Total");
    assert_eq!(total_rows, 3);
    assert!(!truncated);
    assert_eq!(rows[0].cells, vec!["3", "Carla", "1.250,5", "✓"]);
    assert_eq!(rows[1].cells, vec!["1", "Anton", "80", "✗"]);
    assert_eq!(rows[2].cells, vec!["2", "Bea", "-", "✓"]);
}

#[test]
fn table_sorts_numerically_with_missing_last() {
    let renderer = Renderer::default();
    let config = orders_table();
    let data = orders();

    let sorted = |column: &str, direction| {
        let options = RenderOptions {
            sort: Some(SortSpec::new(column, direction)),
        };
        let WidgetView::Table { rows, .. } =
            view(renderer.render_with(&config, Some(&data), &options))
        else {
            panic!("expected table");
        };
        rows.into_iter().map(|r| r.cells[1].clone()).collect::<Vec<_>>()
    };

    assert_eq!(sorted("id", SortDirection::Asc), vec!["Anton", "Bea", "Carla"]);
    assert_eq!(sorted("id", SortDirection::Desc), vec!["Carla", "Bea", "Anton"]);
    assert_eq!(sorted("total", SortDirection::Asc), vec!["Anton", "Carla", "Bea"]);
    assert_eq!(sorted("total", SortDirection::Desc), vec!["Carla", "Anton", "Bea"]);
    assert_eq!(sorted("customer", SortDirection::Desc), vec!["Carla", "Bea", "Anton"]);
    // Not sortable: original order is kept.
    assert_eq!(sorted("paid", SortDirection::Asc), vec!["Carla", "Anton", "Bea"]);
}

#[test]
fn table_pages_and_marks_truncation() {
    let rows: Vec<Value> = (0..25).map(|i| json!({"n": i})).collect();
    let config = widget("data-table", json!({"rows": "$.rows", "pageSize": 5}));

    let WidgetView::Table {
        columns,
        rows,
        total_rows,
        truncated,
    } = view(Renderer::default().render(&config, Some(&json!({ "rows": rows }))))
    else {
        panic!("expected table");
    };

    assert_eq!(rows.len(), 5);
    assert_eq!(total_rows, 25);
    assert!(truncated);
    assert_eq!(columns[0].key, "n");
    assert!(!columns[0].sortable);
}

#[test]
fn table_rows_carry_click_targets() {
    let mut config = orders_table();
    config.click_action = Some(ClickAction::Navigate);
    config.click_target = Some("/orders/{{id}}".into());

    let WidgetView::Table { rows, .. } =
        view(Renderer::default().render(&config, Some(&orders())))
    else {
        panic!("expected table");
    };
    let target = rows[0].target.as_ref().unwrap();
    assert_eq!(target.action, ClickAction::Navigate);
    assert_eq!(target.target, "/orders/3");
}

#[test]
fn list_uses_item_template_for_objects() {
    let config = widget(
        "list",
        json!({"items": "$.people", "itemTemplate": "{{name}} ({{age}})"}),
    );
    let data = json!({"people": [{"name": "Ada", "age": 36}, "plain", 7]});

    let WidgetView::List { items, total_items, .. } =
        view(Renderer::default().render(&config, Some(&data)))
    else {
        panic!("expected list");
    };
    let texts: Vec<&str> = items.iter().map(|i| i.text.as_str()).collect();
    assert_eq!(texts, vec!["Ada (36)", "plain", "7"]);
    assert_eq!(total_items, 3);
}

#[test]
fn list_without_template_shows_compact_json() {
    let config = widget("list", json!({"items": "$.people"}));
    let data = json!({"people": [{"name": "Ada"}]});

    let WidgetView::List { items, .. } = view(Renderer::default().render(&config, Some(&data)))
    else {
        panic!("expected list");
    };
    assert_eq!(items[0].text, r#"{"name":"Ada"}"#);
}

#[test]
fn list_with_non_array_items_renders_raw() {
    let config = widget("list", json!({"items": "$.people"}));
    let renderer = Renderer::default();

    for data in [json!({"people": 42}), json!({"people": {"name": "Ada"}}), json!({})] {
        let WidgetView::Raw { json } = view(renderer.render(&config, Some(&data))) else {
            panic!("expected raw view for {data}");
        };
        assert_eq!(json, serde_json::to_string_pretty(&data).unwrap());
    }
}

#[test]
fn list_caps_at_engine_page_size() {
    let config = widget("list", json!({}));
    let data: Value = (0..12).map(|i| json!(i)).collect();

    let WidgetView::List { items, truncated, .. } =
        view(Renderer::default().render(&config, Some(&data)))
    else {
        panic!("expected list");
    };
    assert_eq!(items.len(), 10);
    assert!(truncated);
}

#[test]
fn chart_resolves_labels_and_series() {
    let config = widget(
        "chart",
        json!({
            "labels": "$.months",
            "chartType": "bar",
            "datasets": [
                {"label": "Revenue", "dataPath": "$.revenue", "color": "#f00"},
                {"label": "Trend", "dataPath": "$.trend", "type": "line"},
                {"label": "Missing", "dataPath": "$.nothing"},
            ]
        }),
    );
    let data = json!({
        "months": ["Jan", "Feb"],
        "revenue": [100, "250.5"],
        "trend": [1, null],
    });

    let WidgetView::Chart {
        chart_type,
        labels,
        datasets,
    } = view(Renderer::default().render(&config, Some(&data)))
    else {
        panic!("expected chart");
    };
    assert_eq!(chart_type, ChartType::Bar);
    assert_eq!(labels, vec!["Jan", "Feb"]);
    assert_eq!(datasets[0].values, vec![Some(100.0), Some(250.5)]);
    assert_eq!(datasets[0].series_type, ChartType::Bar);
    assert_eq!(datasets[1].series_type, ChartType::Line);
    assert_eq!(datasets[1].values, vec![Some(1.0), None]);
    assert!(datasets[2].values.is_empty());
}

#[test]
fn chart_series_keep_source_length() {
    let config = widget(
        "chart",
        json!({
            "labels": "$.days",
            "datasets": [{"label": "Visits", "dataPath": "$.visits"}]
        }),
    );
    let data = json!({"days": ["Mon", "Tue"], "visits": [5, 6, 7]});

    let WidgetView::Chart { labels, datasets, .. } =
        view(Renderer::default().render(&config, Some(&data)))
    else {
        panic!("expected chart");
    };
    assert_eq!(labels.len(), 2);
    assert_eq!(datasets[0].values, vec![Some(5.0), Some(6.0), Some(7.0)]);
}

#[test]
fn search_box_with_missing_results_is_empty() {
    let config = widget(
        "search-box",
        json!({"placeholder": "Find…", "queryArg": "q", "results": "$.hits"}),
    );

    let WidgetView::SearchBox {
        placeholder,
        query_arg,
        results,
    } = view(Renderer::default().render(&config, Some(&json!({"hits": "none"}))))
    else {
        panic!("expected search box");
    };
    assert_eq!(placeholder.as_deref(), Some("Find…"));
    assert_eq!(query_arg.as_deref(), Some("q"));
    assert!(results.is_empty());
}

#[test]
fn product_card_formats_price() {
    let config = widget(
        "product-card",
        json!({"title": "$.name", "price": "$.price", "currency": "EUR", "image": "$.img"}),
    );
    let data = json!({"name": "Lamp", "price": 1999.9});

    let WidgetView::ProductCard {
        image,
        title,
        price,
        ..
    } = view(Renderer::default().render(&config, Some(&data)))
    else {
        panic!("expected product card");
    };
    assert_eq!(title.as_deref(), Some("Lamp"));
    assert_eq!(price.as_deref(), Some("1.999,9 EUR"));
    assert_eq!(image, None);
}

#[test]
fn text_prefers_item_template() {
    let config = widget(
        "text",
        json!({"value": "$.body", "itemTemplate": "Hello {{who}}"}),
    );
    let data = json!({"body": "ignored", "who": "world"});

    assert_eq!(
        view(Renderer::default().render(&config, Some(&data))),
        WidgetView::Text {
            text: "Hello world".into()
        }
    );
}

#[test]
fn custom_resolves_named_fields() {
    let config = widget(
        "custom",
        json!({"fields": {"count": "$.stats.count", "gone": "$.nope"}}),
    );
    let data = json!({"stats": {"count": 4}});

    let WidgetView::Custom { fields } = view(Renderer::default().render(&config, Some(&data)))
    else {
        panic!("expected custom view");
    };
    assert_eq!(fields["count"], json!(4));
    assert_eq!(fields["gone"], Value::Null);
}

#[test]
fn custom_without_fields_renders_raw() {
    let config = widget("custom", json!({}));
    let outcome = Renderer::default().render(&config, Some(&json!({"a": 1})));
    assert!(matches!(view(outcome), WidgetView::Raw { .. }));
}
