use crate::config::Config;

pub const DEFAULT_OUTPUT_DIR: &str = "exported";
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_DOCUMENT_CREATOR: &str = "preset-exporter";
pub const DEFAULT_DOCUMENT_GENERATOR: &str = "Studio One/6.0.0.89694";
pub const DEFAULT_PRESET_EXTENSION: &str = "instrument";

/// Generates the content of a default configuration file
pub fn generate_default_config() -> String {
    format!(
        r#"# Preset Exporter Configuration

# Studio One project archive to export from (can be given on the command line)
# archive_path = '{{USER_HOME}}/Documents/Studio One/Songs/Demo/Demo.song'

# Directory the preset tree is written to
output_dir = '{}'

# Directory the archive is unpacked into; omit to use a temporary directory
# work_dir = '{{USER_HOME}}/.cache/preset-exporter'

# Logging configuration
# Options: error, warn, info, debug, trace
log_level = "{}"

# Values written into metainfo.xml
document_creator = "{}"
document_generator = "{}"

# Extension of the exported packages
preset_extension = "{}"
"#,
        DEFAULT_OUTPUT_DIR,
        DEFAULT_LOG_LEVEL,
        DEFAULT_DOCUMENT_CREATOR,
        DEFAULT_DOCUMENT_GENERATOR,
        DEFAULT_PRESET_EXTENSION
    )
}

/// Default value functions for serde deserialization

pub fn default_output_dir() -> String {
    DEFAULT_OUTPUT_DIR.to_string()
}

pub fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

pub fn default_document_creator() -> String {
    DEFAULT_DOCUMENT_CREATOR.to_string()
}

pub fn default_document_generator() -> String {
    DEFAULT_DOCUMENT_GENERATOR.to_string()
}

pub fn default_preset_extension() -> String {
    DEFAULT_PRESET_EXTENSION.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            archive_path: String::new(),
            output_dir: default_output_dir(),
            work_dir: None,
            log_level: default_log_level(),
            document_creator: default_document_creator(),
            document_generator: default_document_generator(),
            preset_extension: default_preset_extension(),
        }
    }
}
