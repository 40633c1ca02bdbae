use log::debug;
use log::info;
use tableau_lib::config::ColumnSpec;
use tableau_lib::config::Configuration;
use tableau_lib::config::OptionsPatch;
use tableau_lib::edit::CellEditor;
use tableau_lib::model::Column;
use tableau_lib::model::ColumnConfig;
use tableau_lib::model::RowId;
use tableau_lib::model::SelectConfig;
use tableau_lib::model::SelectOption;
use tableau_lib::model::TableId;
use tableau_lib::store::MemoryStore;
use tableau_lib::store::TableStore;
use tableau_lib::view::TableView;

use crate::cli::Commands;
use crate::error::CliError;
use crate::error::Result;
use crate::output;

/// Session state for one invocation.
pub struct Session {
    pub store: MemoryStore,
    pub table: Option<String>,
}

impl Session {
    /// Runs a command and returns the lines to print, plus whether the store
    /// changed.
    pub fn execute(&mut self, command: Commands) -> Result<(Vec<String>, bool)> {
        match command {
            Commands::Show { width, mode, widths } => {
                let table = self.table_id()?;
                let mut config = self.config()?;
                if let Some(mode) = mode {
                    config = config.apply(&OptionsPatch {
                        column_sizing: Some(mode.into()),
                        ..OptionsPatch::default()
                    })?;
                }
                let view = TableView::new(&config, &self.store, &table);
                let lines = if widths {
                    let allocated = view.column_widths(width);
                    view.columns()
                        .iter()
                        .filter_map(|c| allocated.get(&c.id).map(|w| format!("{}\t{w:.2}", c.name)))
                        .collect()
                } else {
                    output::render_table(&view, &config, width)
                };
                Ok((lines, false))
            }
            Commands::Tables => {
                let lines = self
                    .store
                    .tables()
                    .into_iter()
                    .map(|t| {
                        let rows = self.store.table_rows(&t.id).len();
                        let columns = self.store.table_columns(&t.id).len();
                        format!("{}\t{}\t{columns} columns\t{rows} rows", t.id, t.name)
                    })
                    .collect();
                Ok((lines, false))
            }
            Commands::CreateTable { name } => {
                let id = self.store.create_table(name)?;
                Ok((vec![id.to_string()], true))
            }
            Commands::RenameTable { name } => {
                let table = self.table_id()?;
                self.store.rename_table(&table, name)?;
                Ok((Vec::new(), true))
            }
            Commands::DeleteTable => {
                let table = self.table_id()?;
                self.store.delete_table(&table)?;
                Ok((Vec::new(), true))
            }
            Commands::Types => {
                let config = self.config()?;
                let lines = config
                    .available_types()
                    .into_iter()
                    .map(|t| {
                        format!(
                            "{}\t{}\t{}\t{}",
                            t.type_name(),
                            t.label(),
                            t.category(),
                            t.alignment()
                        )
                    })
                    .collect();
                Ok((lines, false))
            }
            Commands::AddRow { count } => {
                let table = self.table_id()?;
                let ids = self.store.add_rows(&table, count)?;
                Ok((ids.iter().map(ToString::to_string).collect(), true))
            }
            Commands::DuplicateRow { row } => {
                let table = self.table_id()?;
                let row = self.row_id(&table, &row)?;
                let copy = self.store.duplicate_row(&row)?;
                Ok((vec![copy.to_string()], true))
            }
            Commands::DeleteRow { row } => {
                let table = self.table_id()?;
                let row = self.row_id(&table, &row)?;
                self.store.delete_row(&row)?;
                Ok((Vec::new(), true))
            }
            Commands::Set { row, column, value } => {
                let table = self.table_id()?;
                let config = self.config()?;
                let row = self.row_id(&table, &row)?;
                let column = self.column(&table, &column)?;
                let current = TableView::new(&config, &self.store, &table).cell_value(&row, &column);

                let mut editor = CellEditor::new(row, column.id.clone());
                if !editor.begin(&column, &current, &config) {
                    return Err(CliError::NotEditable(column.name));
                }
                editor.set_text(value);
                let committed = editor.commit(&mut self.store, &column, &config)?;
                let lines = committed
                    .map(|v| config.display_value(&v, &column))
                    .into_iter()
                    .collect();
                Ok((lines, true))
            }
            Commands::AddColumn {
                name,
                column_type,
                width,
                required,
                readonly,
                choices,
            } => {
                let table = self.table_id()?;
                let config = self.config()?;
                let Some(definition) = config.type_definition(&column_type) else {
                    return Err(CliError::UnknownType(column_type));
                };
                let mut spec = ColumnSpec::new(name, column_type.as_str())
                    .with_config(definition.default_config())
                    .required(required)
                    .readonly(readonly);
                if let Some(width) = width {
                    spec = spec.width(width);
                }
                if !choices.is_empty() {
                    spec = spec.with_config(ColumnConfig::Select(SelectConfig {
                        options: choices
                            .iter()
                            .map(|c| SelectOption::new(c.trim(), c.trim()))
                            .collect(),
                        multiple: false,
                    }));
                }
                let id = self.store.add_column(&table, spec)?;
                Ok((vec![id.to_string()], true))
            }
            Commands::DeleteColumn { column } => {
                let table = self.table_id()?;
                let column = self.column(&table, &column)?;
                self.store.delete_column(&column.id)?;
                Ok((Vec::new(), true))
            }
            Commands::Options {
                mode,
                density,
                min_width,
                max_width,
                row_numbers,
                action_column,
                striped,
                editing,
            } => {
                let patch = OptionsPatch {
                    column_sizing: mode.map(Into::into),
                    density: density.map(Into::into),
                    min_column_width: min_width,
                    max_column_width: max_width,
                    show_row_numbers: row_numbers,
                    show_action_column: action_column,
                    striped,
                    enable_editing: editing,
                    ..OptionsPatch::default()
                };
                // Check against the registry before touching the store.
                self.config()?.apply(&patch)?;
                self.store.set_options(&patch)?;
                let options = self.store.options();
                info!("Options updated: sizing {:?}, density {:?}", options.column_sizing, options.density);
                Ok((Vec::new(), true))
            }
        }
    }

    fn config(&self) -> Result<Configuration> {
        Ok(Configuration::default().with_options(self.store.options().clone())?)
    }

    /// The table named by `--table`, or the oldest one.
    fn table_id(&self) -> Result<TableId> {
        let tables = self.store.tables();
        match &self.table {
            Some(wanted) => tables
                .into_iter()
                .find(|t| t.id.as_str() == wanted || t.name.eq_ignore_ascii_case(wanted))
                .map(|t| t.id)
                .ok_or_else(|| CliError::NoSuchTable(wanted.clone())),
            None => tables
                .into_iter()
                .next()
                .map(|t| t.id)
                .ok_or(CliError::NoTables),
        }
    }

    /// Resolves a 1-based row number or a row id.
    fn row_id(&self, table: &TableId, wanted: &str) -> Result<RowId> {
        let rows = self.store.table_rows(table);
        let found = match wanted.parse::<usize>() {
            Ok(n) if n >= 1 => rows.get(n - 1).map(|r| r.id.clone()),
            _ => rows.into_iter().find(|r| r.id.as_str() == wanted).map(|r| r.id),
        };
        debug!("Resolved row '{wanted}' to {found:?}");
        found.ok_or_else(|| CliError::NoSuchRow(wanted.to_string()))
    }

    fn column(&self, table: &TableId, wanted: &str) -> Result<Column> {
        self.store
            .table_columns(table)
            .into_iter()
            .find(|c| c.id.as_str() == wanted || c.name.eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CliError::NoSuchColumn(wanted.to_string()))
    }
}
