//! Table configuration
//!
//! [`TableOptions`] holds global display settings. [`TableConfig`] is the
//! fluent builder that combines options, column types and renderers into an
//! immutable [`Configuration`] shared by everything that renders a table.

mod column;
mod configuration;
mod options;

pub use column::ColumnSpec;
pub use configuration::Configuration;
pub use configuration::TableConfig;
pub use options::*;
