use comfy_table::Table;
use serde::Serialize;

use crate::cli::commands::{CliCommand, CliContext};
use crate::cli::output::{create_table, display_folders, MessageType, OutputFormatter, TableDisplay};
use crate::cli::{CliError, OutputFormat};
use crate::table_row;
use crate::{list_presets, PresetListing};

/// Prints the presets of the configured archive without exporting them
pub struct ListCommand {
    pub format: OutputFormat,
}

/// Rows printed by `list`
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct PresetListings(pub Vec<PresetListing>);

impl CliCommand for ListCommand {
    fn execute(&self, ctx: &CliContext) -> Result<(), CliError> {
        let listings = PresetListings(list_presets(&ctx.config)?);
        let formatter = OutputFormatter::new(self.format, ctx.no_color);

        if listings.0.is_empty() && self.format == OutputFormat::Table {
            formatter.print_message("No instrument presets found", MessageType::Warning);
            return Ok(());
        }

        formatter.print(&listings)
    }
}

impl TableDisplay for PresetListings {
    fn to_table(&self) -> Table {
        let mut table = create_table(vec!["Device", "Name", "Folder", "Class", "Preset File"]);
        for listing in &self.0 {
            table_row!(
                table,
                listing.device_id,
                listing.name,
                display_folders(&listing.folders),
                listing.class_name,
                listing.preset_file
            );
        }
        table
    }

    fn to_csv<W: std::io::Write>(&self, writer: &mut csv::Writer<W>) -> Result<(), CliError> {
        writer.write_record(["device_id", "name", "folder", "class_name", "preset_file"])?;
        for listing in &self.0 {
            let folder = display_folders(&listing.folders);
            writer.write_record([
                listing.device_id.as_str(),
                listing.name.as_str(),
                folder.as_str(),
                listing.class_name.as_str(),
                listing.preset_file.as_str(),
            ])?;
        }
        Ok(())
    }
}
