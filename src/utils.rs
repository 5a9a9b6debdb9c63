use std::str::from_utf8;

use quick_xml::name::QName;

use crate::error::XmlParseError;

pub mod xml_parsing;

#[macro_export]
macro_rules! trace_fn {
    ($fn_name:expr, $($arg:tt)+) => {
        {
            use colored::Colorize;
            log::trace!("[{}] {}", $fn_name.to_string().bright_blue().bold(), format!($($arg)+))
        }
    };
}

#[macro_export]
macro_rules! debug_fn {
    ($fn_name:expr, $($arg:tt)+) => {
        {
            use colored::Colorize;
            log::debug!("[{}] {}", $fn_name.to_string().cyan().bold(), format!($($arg)+))
        }
    };
}

#[macro_export]
macro_rules! info_fn {
    ($fn_name:expr, $($arg:tt)+) => {
        {
            use colored::Colorize;
            log::info!("[{}] {}", $fn_name.to_string().green().bold(), format!($($arg)+))
        }
    };
}

#[macro_export]
macro_rules! warn_fn {
    ($fn_name:expr, $($arg:tt)+) => {
        {
            use colored::Colorize;
            log::warn!("[{}] {}", $fn_name.to_string().yellow().bold(), format!($($arg)+))
        }
    };
}

pub trait StringResultExt {
    fn to_string_result(&self) -> Result<String, XmlParseError>;
    fn to_str_result(&self) -> Result<&str, XmlParseError>;
}

impl<'a> StringResultExt for QName<'a> {
    fn to_string_result(&self) -> Result<String, XmlParseError> {
        self.to_str_result().map(String::from)
    }

    fn to_str_result(&self) -> Result<&str, XmlParseError> {
        from_utf8(self.as_ref()).map_err(XmlParseError::Utf8Error)
    }
}

/// Makes a track or folder name usable as a single path component.
///
/// Studio One allows `"` in names (`7" Kick`), which most filesystems reject,
/// so every occurrence is spelled out as ` inch`. Path separators and drive
/// colons become `_`, and names that would still not be a plain file name
/// (empty, `.` or `..`) are replaced by underscores, so the result never
/// leaves the directory it is joined onto.
///
/// # Examples
///
/// ```
/// use studio_preset_exporter::utils::sanitize_file_name;
///
/// assert_eq!(sanitize_file_name("7\" Kick"), "7 inch Kick");
/// assert_eq!(sanitize_file_name("Lead"), "Lead");
/// assert_eq!(sanitize_file_name("../up"), ".._up");
/// assert_eq!(sanitize_file_name(".."), "__");
/// ```
pub fn sanitize_file_name(name: &str) -> String {
    let name: String = name
        .replace('"', " inch")
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' => '_',
            c => c,
        })
        .collect();

    match name.trim() {
        "" => "_".to_string(),
        "." | ".." => "_".repeat(name.len()),
        _ => name,
    }
}
