//! Tests for key-based selection.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use datatable::prelude::*;

fn countries() -> Vec<Record> {
    [
        ("IT", "Italy", 60_483_973),
        ("US", "United States", 327_167_434),
        ("FR", "France", 66_991_000),
        ("DE", "Germany", 82_792_351),
        ("ES", "Spain", 46_659_302),
    ]
    .into_iter()
    .map(|(code, name, population)| {
        Record::new()
            .set("code", code)
            .set("name", name)
            .set("population", population)
    })
    .collect()
}

fn config() -> TableConfig<Record> {
    TableConfig::new(vec![
        Column::new("name", "Name"),
        Column::new("code", "ISO Code"),
        Column::new("population", "Population").numeric(),
    ])
    .primary_key("code")
    .options(
        TableOptions::default()
            .with_selection(true)
            .with_sorting(true)
            .with_paging(true)
            .with_page_size(2),
    )
}

/// Records every selection the observer receives, as codes.
fn observed(config: TableConfig<Record>) -> (TableConfig<Record>, Arc<Mutex<Vec<Vec<String>>>>) {
    let calls: Arc<Mutex<Vec<Vec<String>>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&calls);
    let config = config.on_selection_change(move |rows: &[Record]| {
        let codes: Vec<String> = rows
            .iter()
            .filter_map(|r| r.get("code").map(|v| v.to_string()))
            .collect();
        sink.lock().unwrap().push(codes);
    });
    (config, calls)
}

fn key(code: &str) -> RowKey {
    RowKey::from(code)
}

#[test]
fn test_toggle_notifies_in_selection_order() {
    let (config, calls) = observed(config());
    let table = DataTable::with_data(config, countries()).unwrap();

    assert_eq!(table.toggle_row(&key("FR")), Some(true));
    assert_eq!(table.toggle_row(&key("IT")), Some(true));
    assert_eq!(table.toggle_row(&key("FR")), Some(false));
    assert_eq!(table.toggle_row(&key("DE")), Some(true));

    let calls = calls.lock().unwrap();
    assert_eq!(
        *calls,
        vec![
            vec!["FR".to_string()],
            vec!["FR".to_string(), "IT".to_string()],
            vec!["IT".to_string()],
            vec!["IT".to_string(), "DE".to_string()],
        ]
    );
}

#[test]
fn test_selection_survives_sort_and_page() {
    let table = DataTable::with_data(config(), countries()).unwrap();
    table.toggle_row(&key("DE"));

    table.toggle_sort("population");
    table.set_page(1);
    let view = table.view();
    let selected: Vec<String> = view
        .rows
        .iter()
        .filter(|r| r.selected)
        .map(|r| r.key.to_string())
        .collect();
    // Ascending by population: ES, IT, FR, DE, US.
    assert_eq!(selected, ["DE"]);

    table.toggle_sort("population");
    table.set_page(0);
    assert!(table.is_selected(&key("DE")));
    assert_eq!(table.selected_keys(), [key("DE")]);
}

#[test]
fn test_select_all_skips_disabled() {
    let config = config().disabled(|row: &Record| {
        row.get("code").and_then(|v| v.as_str()) == Some("US")
    });
    let table = DataTable::with_data(config, countries()).unwrap();

    assert_eq!(table.selectable_count(), 4);
    assert_eq!(table.select_all(true), Some(4));
    assert!(!table.is_selected(&key("US")));
    assert_eq!(table.select_all_state(), CheckState::Checked);
    assert_eq!(
        table.selected_keys(),
        [key("IT"), key("FR"), key("DE"), key("ES")]
    );

    let disabled: Vec<bool> = table.view().rows.iter().map(|r| r.disabled).collect();
    assert_eq!(disabled, [false, true]);

    assert_eq!(table.select_all(false), Some(0));
    assert_eq!(table.select_all_state(), CheckState::Unchecked);
}

/// Config whose disabled predicate reads a shared, mutable set of codes.
fn with_disabled_codes(codes: &[&str]) -> (TableConfig<Record>, Arc<Mutex<HashSet<String>>>) {
    let disabled: Arc<Mutex<HashSet<String>>> =
        Arc::new(Mutex::new(codes.iter().map(|c| c.to_string()).collect()));
    let lookup = Arc::clone(&disabled);
    let config = config().disabled(move |row: &Record| {
        row.get("code")
            .and_then(|v| v.as_str())
            .is_some_and(|code| lookup.lock().unwrap().contains(code))
    });
    (config, disabled)
}

#[test]
fn test_toggle_accepts_disabled_key() {
    let (config, _) = with_disabled_codes(&["US"]);
    let table = DataTable::with_data(config, countries()).unwrap();
    let us = table.row(&key("US")).unwrap();
    assert!(table.is_row_disabled(&us));

    assert_eq!(table.toggle_row(&key("US")), Some(true));
    assert_eq!(table.selected_keys(), [key("US")]);
    assert_eq!(table.toggle_row(&key("US")), Some(false));
    assert!(table.selected_keys().is_empty());

    table.toggle_row(&key("US"));
    table.toggle_row(&key("IT"));
    assert_eq!(table.selected_keys(), [key("US"), key("IT")]);
}

#[test]
fn test_disabled_after_selection_is_kept() {
    let (config, disabled) = with_disabled_codes(&[]);
    let table = DataTable::with_data(config, countries()).unwrap();
    table.toggle_row(&key("FR"));
    assert_eq!(table.selectable_count(), 5);

    disabled.lock().unwrap().insert("FR".to_string());
    assert_eq!(table.selectable_count(), 4);
    assert!(table.is_selected(&key("FR")));
    assert_eq!(table.selected_keys(), [key("FR")]);
    assert_eq!(table.select_all_state(), CheckState::Indeterminate);

    table.set_page(1);
    let fr = table
        .view()
        .rows
        .into_iter()
        .find(|r| r.key == key("FR"))
        .unwrap();
    assert!(fr.selected);
    assert!(fr.disabled);

    // Select all re-derives its targets and leaves the disabled row out.
    table.select_all(true);
    assert!(!table.is_selected(&key("FR")));
    assert_eq!(table.selected_keys().len(), 4);
}

#[test]
fn test_select_all_state_indeterminate() {
    let table = DataTable::with_data(config(), countries()).unwrap();
    table.toggle_row(&key("IT"));
    assert_eq!(table.select_all_state(), CheckState::Indeterminate);
}

#[test]
fn test_selection_disabled_is_ignored() {
    let config = TableConfig::new(vec![Column::new("name", "Name")]).primary_key("code");
    let table = DataTable::with_data(config, countries()).unwrap();
    assert_eq!(table.toggle_row(&key("IT")), None);
    assert_eq!(table.select_all(true), None);
    assert!(table.selected_keys().is_empty());
}

#[test]
fn test_new_dataset_clears_selection() {
    let (config, calls) = observed(config());
    let table = DataTable::with_data(config, countries()).unwrap();
    table.toggle_row(&key("IT"));
    table.set_page(2);

    assert!(table.set_data(countries()));
    assert!(table.selected_keys().is_empty());
    assert_eq!(table.page_info().page, 0);

    let calls = calls.lock().unwrap();
    assert_eq!(calls.last(), Some(&Vec::new()));
    assert_eq!(calls.len(), 2);
}

#[test]
fn test_same_dataset_keeps_selection() {
    let data: Arc<[Record]> = countries().into();
    let table = DataTable::with_data(config(), Arc::clone(&data)).unwrap();
    table.toggle_row(&key("IT"));
    assert!(!table.set_data(Arc::clone(&data)));
    assert!(table.is_selected(&key("IT")));
}

#[test]
fn test_selected_rows() {
    let table = DataTable::with_data(config(), countries()).unwrap();
    table.toggle_row(&key("ES"));
    table.toggle_row(&key("IT"));
    let names: Vec<String> = table
        .selected_rows()
        .iter()
        .map(|r| r.get("name").map(|v| v.to_string()).unwrap_or_default())
        .collect();
    assert_eq!(names, ["Spain", "Italy"]);
}

#[test]
fn test_observer_can_read_table() {
    let config = config();
    let slot: Arc<Mutex<Option<DataTable<Record>>>> = Arc::new(Mutex::new(None));
    let seen = Arc::new(Mutex::new(0usize));
    let (slot_cb, seen_cb) = (Arc::clone(&slot), Arc::clone(&seen));
    let config = config.on_selection_change(move |_: &[Record]| {
        if let Some(table) = slot_cb.lock().unwrap().as_ref() {
            *seen_cb.lock().unwrap() = table.selected_keys().len();
        }
    });
    let table = DataTable::with_data(config, countries()).unwrap();
    *slot.lock().unwrap() = Some(table.clone());

    table.toggle_row(&key("IT"));
    table.toggle_row(&key("FR"));
    assert_eq!(*seen.lock().unwrap(), 2);
}

#[test]
fn test_toolbar() {
    let deleted: Arc<Mutex<Vec<Record>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&deleted);
    let config = config()
        .title("Countries")
        .action(SelectionAction::new("Delete", "delete", move |rows: &[Record]| {
            sink.lock().unwrap().extend(rows.iter().cloned());
        }));
    let table = DataTable::with_data(config, countries()).unwrap();

    let toolbar = table.toolbar().unwrap();
    assert_eq!(toolbar.title.as_deref(), Some("Countries"));
    assert!(!toolbar.highlighted);
    assert!(toolbar.actions.is_empty());

    table.toggle_row(&key("DE"));
    let toolbar = table.toolbar().unwrap();
    assert_eq!(toolbar.selected, 1);
    assert!(toolbar.highlighted);
    assert_eq!(toolbar.actions, [("Delete".to_string(), "delete".to_string())]);

    table.run_action("Delete").unwrap();
    assert_eq!(deleted.lock().unwrap().len(), 1);
    assert!(matches!(
        table.run_action("Archive"),
        Err(TableError::UnknownAction(_))
    ));
}
