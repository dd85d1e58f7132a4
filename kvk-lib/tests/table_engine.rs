//! Behavioral tests for the table engine through its public API.

use kvk_lib::model::ColumnDescriptor;
use kvk_lib::model::Row;
use kvk_lib::model::Value;
use kvk_lib::table::Direction;
use kvk_lib::table::PageClamp;
use kvk_lib::table::SortState;
use kvk_lib::table::TableConfig;
use kvk_lib::table::TableEngine;
use kvk_lib::table::apply_filter;
use kvk_lib::table::apply_sort;
use kvk_lib::table::paginate;

fn districts() -> Vec<Row> {
    vec![
        Row::new().set("id", 1).set("name", "Banka").set("qty", 5),
        Row::new().set("id", 2).set("name", "Araria").set("qty", 12),
        Row::new().set("id", 3).set("name", "Arwal").set("qty", 3),
    ]
}

fn columns() -> Vec<ColumnDescriptor> {
    vec![
        ColumnDescriptor::new("name", "District").sortable(),
        ColumnDescriptor::new("qty", "Quantity").sortable(),
        ColumnDescriptor::new("id", "ID"),
    ]
}

fn names(rows: &[&Row]) -> Vec<String> {
    rows.iter().map(|r| r.value_or_null("name").to_string()).collect()
}

/// Rows with a mix of field shapes for property checks.
fn staff() -> Vec<Row> {
    let designations = ["Senior Scientist", "SMS (Agronomy)", "Programme Assistant", "Driver"];
    (0..23)
        .map(|i| {
            let mut row = Row::new()
                .set("id", i)
                .set("name", format!("Staff {:02}", i))
                .set("designation", designations[i as usize % designations.len()]);
            if i % 5 != 0 {
                row.insert("payScale", 15600 + (i * 37) % 900);
            }
            row
        })
        .collect()
}

#[test]
fn test_qty_sort_scenario() {
    let mut table = TableEngine::new(districts(), columns());
    assert!(table.toggle_sort("qty"));
    assert_eq!(names(&table.view().rows), ["Arwal", "Banka", "Araria"]);

    assert!(table.toggle_sort("qty"));
    assert_eq!(table.sort(), Some(&SortState::desc("qty")));
    assert_eq!(names(&table.view().rows), ["Araria", "Banka", "Arwal"]);
}

#[test]
fn test_search_scenario() {
    let mut table = TableEngine::new(districts(), columns());
    table.set_search_query("ar");
    let view = table.view();
    assert_eq!(names(&view.rows), ["Araria", "Arwal"]);
    assert_eq!(view.total_filtered, 2);

    table.set_search_query("AR");
    assert_eq!(table.view().total_filtered, 2);
}

#[test]
fn test_pagination_scenario() {
    let rows: Vec<Row> = (1..=25).map(|i| Row::new().set("id", i)).collect();

    let (slice, pages) = paginate(&rows, 3, 10);
    assert_eq!(pages, 3);
    assert_eq!(slice.len(), 5);

    let (slice, pages) = paginate(&rows, 4, 10);
    assert!(slice.is_empty());
    assert_eq!(pages, 3);
}

#[test]
fn test_filter_is_exact_partition() {
    let rows = staff();
    for query in ["staff 1", "sms", "ASSIST", "1565", "zzz"] {
        let matched = apply_filter(&rows, query);
        let needle = query.to_lowercase();
        let contains = |row: &Row| {
            row.fields()
                .values()
                .any(|v| v.to_string().to_lowercase().contains(&needle))
        };
        for row in &rows {
            let included = matched.iter().any(|m| std::ptr::eq(*m, row));
            assert_eq!(included, contains(row), "query {:?}", query);
        }
    }
}

#[test]
fn test_empty_filter_is_identity() {
    let rows = staff();
    for query in ["", "   "] {
        let matched = apply_filter(&rows, query);
        assert_eq!(matched.len(), rows.len());
        assert!(matched.iter().zip(&rows).all(|(a, b)| std::ptr::eq(*a, b)));
    }
}

#[test]
fn test_toggle_alternates_without_changing_membership() {
    let mut table = TableEngine::new(staff(), vec![ColumnDescriptor::new("payScale", "Pay").sortable()]);
    let mut expected = Direction::Asc;
    for _ in 0..4 {
        table.toggle_sort("payScale");
        assert_eq!(table.sort().map(|s| s.direction), Some(expected));

        let mut ids: Vec<String> = table.filtered_sorted().iter().map(|r| r.value_or_null("id").to_string()).collect();
        ids.sort();
        let mut all: Vec<String> = table.rows().iter().map(|r| r.value_or_null("id").to_string()).collect();
        all.sort();
        assert_eq!(ids, all);

        expected = expected.flipped();
    }
}

#[test]
fn test_sort_is_idempotent_and_nulls_order() {
    let rows = staff();
    let refs: Vec<&Row> = rows.iter().collect();

    let asc = SortState::asc("payScale");
    let once = apply_sort(refs.clone(), Some(&asc));
    let twice = apply_sort(once.clone(), Some(&asc));
    assert_eq!(once, twice);
    assert!(once[0].value_or_null("payScale").is_null());
    assert!(!once.last().unwrap().value_or_null("payScale").is_null());

    let desc = apply_sort(refs, Some(&SortState::desc("payScale")));
    assert!(desc.last().unwrap().value_or_null("payScale").is_null());
}

#[test]
fn test_pages_reconstruct_sorted_order() {
    let mut table = TableEngine::with_config(
        staff(),
        columns(),
        TableConfig {
            page_size: 4,
            page_clamp: PageClamp::Preserve,
        },
    );
    table.toggle_sort("name");
    table.toggle_sort("name");
    table.set_search_query("s");

    let expected: Vec<String> = table.filtered_sorted().iter().map(|r| r.value_or_null("id").to_string()).collect();
    let total_pages = table.view().total_pages;
    assert_eq!(total_pages, expected.len().div_ceil(4));

    let mut collected = Vec::new();
    for page in 1..=total_pages {
        table.set_page(page);
        let view = table.view();
        assert!(view.rows.len() <= 4);
        collected.extend(view.rows.iter().map(|r| r.value_or_null("id").to_string()));
    }
    assert_eq!(collected, expected);

    table.set_page(total_pages + 1);
    assert!(table.view().rows.is_empty());
}

#[test]
fn test_search_resets_page_from_anywhere() {
    let mut table = TableEngine::new(staff(), columns());
    for page in [0, 1, 3, 99] {
        table.set_page(page);
        table.set_search_query("staff");
        assert_eq!(table.page().current_page, 1);
    }
}

#[test]
fn test_mixed_values_sort_by_kind() {
    let rows = vec![
        Row::new().set("v", "text"),
        Row::new().set("v", 2.5),
        Row::new().set("v", Value::Null),
        Row::new().set("v", true),
        Row::new().set("v", 1),
    ];
    let sorted = apply_sort(rows.iter().collect(), Some(&SortState::asc("v")));
    let rendered: Vec<String> = sorted.iter().map(|r| r.value_or_null("v").to_string()).collect();
    assert_eq!(rendered, ["", "true", "1", "2.5", "text"]);
}
