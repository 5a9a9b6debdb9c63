use quick_xml::events::attributes::AttrError;
use quick_xml::Error as QuickXmlError;
use std::io;
use std::path::PathBuf;
use std::str::Utf8Error;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum XmlParseError {
    #[error("Failed to read XML document {path:?}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Root tag not found")]
    RootTagNotFound,

    #[error("UTF-8 conversion error: {0}")]
    Utf8Error(#[from] Utf8Error),

    #[error("XML attribute error: {0}")]
    AttrError(#[from] AttrError),

    #[error("XML parsing error: {0}")]
    QuickXmlError(#[from] QuickXmlError),

    #[error("Unbalanced closing tag: {0}")]
    UnbalancedTag(String),

    #[error("Invalid structure in {document}: expected {expected}")]
    InvalidStructure {
        document: &'static str,
        expected: String,
    },

    #[error("Required attribute '{attribute}' not found on <{tag}> in {document}")]
    MissingAttribute {
        document: &'static str,
        tag: String,
        attribute: String,
    },
}

#[derive(Error, Debug)]
pub enum FormatError {
    #[error("Preset path '{0}' does not match 'Presets/<folder>/<file>'")]
    PresetPath(String),
}

#[derive(Error, Debug)]
pub enum JoinError {
    #[error("Unresolved device link: no track device entry for device '{0}'")]
    UnresolvedDeviceLink(String),

    #[error("Unresolved song entry: device '{device_id}' points at media track '{song_id}'")]
    UnresolvedSongEntry { device_id: String, song_id: String },

    #[error("Unresolved folder track '{0}'")]
    UnresolvedFolder(String),

    #[error("Record '{record}' has no '{field}' attribute")]
    IncompleteRecord { record: String, field: String },
}

#[derive(Error, Debug)]
#[error("Folder ancestry of '{start}' exceeds {limit} folder tracks; parent links form a cycle")]
pub struct CycleError {
    pub start: String,
    pub limit: usize,
}

#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("Archive not found: {0}")]
    NotFound(PathBuf),

    #[error("Zip error in {path:?}")]
    ZipError {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("IO error on {path:?}")]
    IoError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Preset payload missing from archive: {0:?}")]
    MissingPayload(PathBuf),

    #[error("Preset path '{0}' points outside the archive")]
    UnsafePresetPath(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error in config: {0}")]
    IoError(#[from] io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to get home directory")]
    HomeDirError,

    #[error("Invalid path in config: {0}")]
    InvalidPath(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),

    #[error("Missing required setting: {0}")]
    MissingValue(&'static str),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("XML error: {0}")]
    XmlError(#[from] XmlParseError),

    #[error("Format error: {0}")]
    FormatError(#[from] FormatError),

    #[error("Join error: {0}")]
    JoinError(#[from] JoinError),

    #[error("Cycle error: {0}")]
    CycleError(#[from] CycleError),

    #[error("Archive error: {0}")]
    ArchiveError(#[from] ArchiveError),

    #[error("Configuration error: {0}")]
    ConfigError(#[from] ConfigError),
}

impl From<quick_xml::Error> for ExportError {
    fn from(err: quick_xml::Error) -> Self {
        ExportError::XmlError(XmlParseError::QuickXmlError(err))
    }
}
