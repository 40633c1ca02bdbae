use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use tableau_lib::config::Density;
use tableau_lib::config::SizingMode;

#[derive(Parser)]
#[command(name = "tableau")]
#[command(about = "Inspect and edit tables stored as JSON collections")]
#[command(version)]
pub struct Cli {
    /// Directory holding the table collections
    #[arg(long, global = true, value_name = "DIR")]
    pub data: Option<PathBuf>,

    /// Table to operate on, by name or id (defaults to the oldest table)
    #[arg(long, short = 't', global = true)]
    pub table: Option<String>,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(long, short = 'v', global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print a table laid out with the configured sizing mode
    Show {
        /// Container width in pixels
        #[arg(long, default_value_t = 1200.0)]
        width: f64,

        /// Override the stored sizing mode
        #[arg(long)]
        mode: Option<ModeArg>,

        /// Print allocated column widths instead of the table
        #[arg(long)]
        widths: bool,
    },

    /// List tables
    Tables,

    /// Create a new empty table
    CreateTable { name: String },

    /// Rename the selected table
    RenameTable { name: String },

    /// Delete the selected table with all of its data
    DeleteTable,

    /// List column types that can be added
    Types,

    /// Append empty rows
    AddRow {
        #[arg(long, short = 'n', default_value_t = 1)]
        count: usize,
    },

    /// Append a copy of a row
    DuplicateRow {
        /// 1-based row number or row id
        row: String,
    },

    /// Delete a row
    DeleteRow {
        /// 1-based row number or row id
        row: String,
    },

    /// Edit a cell; the value is coerced by the column's type
    Set {
        /// 1-based row number or row id
        row: String,
        /// Column name or id
        column: String,
        value: String,
    },

    /// Append a column
    AddColumn {
        name: String,
        /// Column type, for example text, number, date, boolean or select
        #[arg(long = "type", default_value = "text")]
        column_type: String,
        #[arg(long)]
        width: Option<f64>,
        #[arg(long)]
        required: bool,
        #[arg(long)]
        readonly: bool,
        /// Options for select columns, comma separated
        #[arg(long, value_delimiter = ',')]
        choices: Vec<String>,
    },

    /// Delete a column and its cells
    DeleteColumn {
        /// Column name or id
        column: String,
    },

    /// Update display options
    Options {
        #[arg(long)]
        mode: Option<ModeArg>,
        #[arg(long)]
        density: Option<DensityArg>,
        #[arg(long)]
        min_width: Option<f64>,
        #[arg(long)]
        max_width: Option<f64>,
        #[arg(long)]
        row_numbers: Option<bool>,
        #[arg(long)]
        action_column: Option<bool>,
        #[arg(long)]
        striped: Option<bool>,
        #[arg(long)]
        editing: Option<bool>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Fixed,
    Auto,
    Balanced,
    Equal,
}

impl From<ModeArg> for SizingMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Fixed => SizingMode::Fixed,
            ModeArg::Auto => SizingMode::Auto,
            ModeArg::Balanced => SizingMode::Balanced,
            ModeArg::Equal => SizingMode::Equal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DensityArg {
    Compact,
    Normal,
    Comfortable,
}

impl From<DensityArg> for Density {
    fn from(density: DensityArg) -> Self {
        match density {
            DensityArg::Compact => Density::Compact,
            DensityArg::Normal => Density::Normal,
            DensityArg::Comfortable => Density::Comfortable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_set() {
        let cli = Cli::parse_from(["tableau", "--table", "People", "set", "2", "Age", "41"]);
        assert_eq!(cli.table.as_deref(), Some("People"));
        match cli.command {
            Commands::Set { row, column, value } => {
                assert_eq!((row.as_str(), column.as_str(), value.as_str()), ("2", "Age", "41"));
            }
            _ => panic!("expected set"),
        }
    }

    #[test]
    fn test_parse_show_mode() {
        let cli = Cli::parse_from(["tableau", "show", "--mode", "auto", "--width", "800", "-vv"]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Show { width, mode, widths } => {
                assert_eq!(width, 800.0);
                assert_eq!(mode.map(SizingMode::from), Some(SizingMode::Auto));
                assert!(!widths);
            }
            _ => panic!("expected show"),
        }
    }

    #[test]
    fn test_parse_choices() {
        let cli = Cli::parse_from([
            "tableau",
            "add-column",
            "Status",
            "--type",
            "select",
            "--choices",
            "todo,done",
        ]);
        match cli.command {
            Commands::AddColumn { column_type, choices, .. } => {
                assert_eq!(column_type, "select");
                assert_eq!(choices, vec!["todo", "done"]);
            }
            _ => panic!("expected add-column"),
        }
    }
}
