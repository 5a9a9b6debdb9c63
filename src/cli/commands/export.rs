use comfy_table::Table;
use indicatif::{ProgressBar, ProgressStyle};

use crate::cli::commands::{CliCommand, CliContext};
use crate::cli::output::{create_table, display_folders, MessageType, OutputFormatter, TableDisplay};
use crate::cli::{CliError, OutputFormat};
use crate::export_archive_with_progress;
use crate::table_row;
use crate::{ExportSummary, ExportedPreset};

/// Runs the full export for the configured archive
pub struct ExportCommand;

impl CliCommand for ExportCommand {
    fn execute(&self, ctx: &CliContext) -> Result<(), CliError> {
        let pb = ProgressBar::new(0);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
                .progress_chars("#>-"),
        );

        let result = export_archive_with_progress(
            &ctx.config,
            Some(|completed: usize, total: usize, preset: &ExportedPreset| {
                pb.set_length(total as u64);
                pb.set_position(completed as u64);
                pb.set_message(preset.name.clone());
            }),
        );
        pb.finish_and_clear();
        let summary = result?;

        let formatter = OutputFormatter::new(OutputFormat::Table, ctx.no_color);
        if summary.exported.is_empty() {
            formatter.print_message("No instrument presets found", MessageType::Warning);
            return Ok(());
        }

        formatter.print(&summary)?;
        formatter.print_message(
            &format!(
                "Exported {} presets into {}",
                summary.exported.len(),
                summary.output_dir.display()
            ),
            MessageType::Success,
        );
        Ok(())
    }
}

impl TableDisplay for ExportSummary {
    fn to_table(&self) -> Table {
        let mut table = create_table(vec!["Name", "Folder", "File"]);
        for preset in &self.exported {
            table_row!(
                table,
                preset.name,
                display_folders(&preset.folders),
                preset.path.display()
            );
        }
        table
    }

    fn to_csv<W: std::io::Write>(&self, writer: &mut csv::Writer<W>) -> Result<(), CliError> {
        writer.write_record(["device_id", "name", "folder", "path"])?;
        for preset in &self.exported {
            let folder = display_folders(&preset.folders);
            let path = preset.path.to_string_lossy();
            writer.write_record([
                preset.device_id.as_str(),
                preset.name.as_str(),
                folder.as_str(),
                &*path,
            ])?;
        }
        Ok(())
    }
}
