use log::info;

use super::MemoryStore;
use super::TableStore;
use crate::config::ColumnSpec;
use crate::error::StoreError;
use crate::model::TableId;
use crate::model::Value;

pub const SAMPLE_TABLE_NAME: &str = "Sample Table";

const SAMPLE_ROWS: [(&str, f64, bool); 3] = [
    ("Alice Johnson", 28.0, true),
    ("Bob Smith", 34.0, false),
    ("Carol Davis", 25.0, true),
];

impl MemoryStore {
    /// Seeds a small demo table when the store holds no tables yet.
    ///
    /// Returns the new table's id, or `None` if tables already existed.
    pub fn bootstrap_sample(&mut self) -> Result<Option<TableId>, StoreError> {
        if !self.is_empty() {
            return Ok(None);
        }
        let table = self.create_table(SAMPLE_TABLE_NAME)?;
        let name = self.add_column(&table, ColumnSpec::text("Name").placeholder("Enter name..."))?;
        let age = self.add_column(
            &table,
            ColumnSpec::number("Age").min(0.0).max(120.0).step(1.0).width(100.0),
        )?;
        let active = self.add_column(&table, ColumnSpec::boolean("Active").width(100.0))?;

        for (n, a, on) in SAMPLE_ROWS {
            let row = self.create_row(&table)?;
            self.create_cell(&row, &name, Value::from(n))?;
            self.create_cell(&row, &age, Value::Number(a))?;
            self.create_cell(&row, &active, Value::Bool(on))?;
        }
        info!("Bootstrapped sample table {table}");
        Ok(Some(table))
    }
}
