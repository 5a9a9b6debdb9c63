use crate::cli::CliError;
use crate::cli::OutputFormat;
use colored::Colorize;
use comfy_table::{presets, Table};
use serde::Serialize;

/// Output formatter for CLI results
pub struct OutputFormatter {
    format: OutputFormat,
    no_color: bool,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat, no_color: bool) -> Self {
        Self { format, no_color }
    }

    /// Format and print data
    pub fn print<T: Serialize + TableDisplay>(&self, data: &T) -> Result<(), CliError> {
        match self.format {
            OutputFormat::Table => self.print_table(data),
            OutputFormat::Json => self.print_json(data),
            OutputFormat::Csv => self.print_csv(data),
        }
    }

    /// Print a message with appropriate formatting
    pub fn print_message(&self, message: &str, message_type: MessageType) {
        if self.no_color {
            println!("{}", message);
            return;
        }

        let formatted_message = match message_type {
            MessageType::Success => message.green(),
            MessageType::Warning => message.yellow(),
        };
        println!("{}", formatted_message);
    }

    fn print_table<T: TableDisplay>(&self, data: &T) -> Result<(), CliError> {
        println!("{}", data.to_table());
        Ok(())
    }

    fn print_json<T: Serialize>(&self, data: &T) -> Result<(), CliError> {
        let json = serde_json::to_string_pretty(data).map_err(|e| -> CliError { e.into() })?;
        println!("{}", json);
        Ok(())
    }

    fn print_csv<T: TableDisplay>(&self, data: &T) -> Result<(), CliError> {
        let mut writer = csv::Writer::from_writer(std::io::stdout());
        data.to_csv(&mut writer)?;
        writer.flush()?;
        Ok(())
    }
}

/// Message type for colored output
pub enum MessageType {
    Success,
    Warning,
}

/// Trait for types that can be displayed as tables
pub trait TableDisplay {
    fn to_table(&self) -> Table;
    fn to_csv<W: std::io::Write>(&self, writer: &mut csv::Writer<W>) -> Result<(), CliError>;
}

/// Create a new table with consistent styling
pub fn create_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.set_header(header);
    table
}

/// Helper macro to create table rows
#[macro_export]
macro_rules! table_row {
    ($table:expr, $($cell:expr),* $(,)?) => {
        $table.add_row(vec![$($cell.to_string()),*]);
    };
}

/// Joins folder names the way they appear on disk
pub fn display_folders(folders: &[String]) -> String {
    if folders.is_empty() {
        "/".to_string()
    } else {
        folders.join("/")
    }
}
