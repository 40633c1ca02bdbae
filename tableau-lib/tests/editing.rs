//! End-to-end editing against the in-memory store.

use tableau_lib::config::ColumnSpec;
use tableau_lib::config::Configuration;
use tableau_lib::config::TableConfig;
use tableau_lib::edit::CellEditor;
use tableau_lib::edit::EditKey;
use tableau_lib::model::SelectOption;
use tableau_lib::model::Value;
use tableau_lib::store::MemoryStore;
use tableau_lib::store::TableStore;
use tableau_lib::types::TypeRegistry;
use tableau_lib::view::TableView;

#[test]
fn test_number_default_then_invalid_commit() {
    let mut store = MemoryStore::new();
    let table = store.create_table("Scores").unwrap();
    let column_id = store.add_column(&table, ColumnSpec::number("Score")).unwrap();
    let row = store.create_row(&table).unwrap();
    let config = Configuration::default();
    let column = store.column(&column_id).unwrap();

    let current = TableView::new(&config, &store, &table).cell_value(&row, &column);
    assert_eq!(current, Value::Number(0.0));

    let mut editor = CellEditor::new(row.clone(), column_id.clone());
    assert!(editor.begin(&column, &current, &config));
    for c in "abc".chars() {
        editor.on_key(EditKey::Char(c), &mut store, &column, &config).unwrap();
    }
    editor.on_key(EditKey::Enter, &mut store, &column, &config).unwrap();

    assert_eq!(store.cell(&row, &column_id).unwrap().value, Value::Number(0.0));
}

#[test]
fn test_repeated_commit_only_moves_timestamp() {
    let mut store = MemoryStore::new();
    let table = store.create_table("T").unwrap();
    let column_id = store.add_column(&table, ColumnSpec::text("Name")).unwrap();
    let row = store.create_row(&table).unwrap();
    let config = Configuration::default();
    let column = store.column(&column_id).unwrap();

    let commit = |store: &mut MemoryStore| {
        let mut editor = CellEditor::new(row.clone(), column_id.clone());
        editor.begin(&column, &Value::Null, &config);
        editor.set_text("same");
        editor.commit(store, &column, &config).unwrap();
        store.cell(&row, &column_id).unwrap()
    };

    let first = commit(&mut store);
    let second = commit(&mut store);
    assert_eq!(first.id, second.id);
    assert_eq!(first.value, second.value);
    assert!(second.updated_at >= first.updated_at);
}

#[test]
fn test_select_column_commits_resolved_value() {
    let mut store = MemoryStore::new();
    let table = store.create_table("T").unwrap();
    let spec = ColumnSpec::select("Status").options([
        SelectOption::new("todo", "To do"),
        SelectOption::new("done", "Done"),
    ]);
    let column_id = store.add_column(&table, spec).unwrap();
    let row = store.create_row(&table).unwrap();
    let config = Configuration::default();
    let column = store.column(&column_id).unwrap();

    let mut editor = CellEditor::new(row.clone(), column_id.clone());
    editor.begin(&column, &Value::Null, &config);
    editor.set_text("DONE");
    editor.blur(&mut store, &column, &config).unwrap();

    assert_eq!(store.cell(&row, &column_id).unwrap().value, Value::from("done"));
    let view = TableView::new(&config, &store, &table);
    assert_eq!(view.display_text(&row, &column), "Done");
}

#[test]
fn test_overridden_builtin_drives_commit() {
    let shouting = tableau_lib::types::CustomType::new("text", "Shouting text", Value::from(""))
        .validator(|v| Value::Text(v.to_plain_string().to_uppercase()));
    let config = TableConfig::new().register_type(shouting).build().unwrap();
    assert_eq!(config.registry().len(), TypeRegistry::with_builtins().len());

    let mut store = MemoryStore::new();
    let table = store.create_table("T").unwrap();
    let column_id = store.add_column(&table, ColumnSpec::text("Name")).unwrap();
    let row = store.create_row(&table).unwrap();
    let column = store.column(&column_id).unwrap();

    let mut editor = CellEditor::new(row.clone(), column_id.clone());
    editor.begin(&column, &Value::Null, &config);
    editor.set_text("quiet");
    editor.commit(&mut store, &column, &config).unwrap();
    assert_eq!(store.cell(&row, &column_id).unwrap().value, Value::from("QUIET"));
}

#[test]
fn test_boolean_toggle_commit() {
    let mut store = MemoryStore::new();
    let table = store.bootstrap_sample().unwrap().unwrap();
    let config = Configuration::default();
    let columns = store.table_columns(&table);
    let rows = store.table_rows(&table);
    let active = &columns[2];

    // Bob is inactive in the sample data.
    let bob = &rows[1].id;
    let current = store.cell(bob, &active.id).unwrap().value;
    let mut editor = CellEditor::new(bob.clone(), active.id.clone());
    editor.begin(active, &current, &config);
    editor.commit(&mut store, active, &config).unwrap();
    assert_eq!(store.cell(bob, &active.id).unwrap().value, Value::Bool(true));
}
