//! Reader for `Devices/audiosynthfolder.xml`.
//!
//! Every child of the root element is one instrument slot. Occupied slots
//! have a fixed child layout; empty slots have no children at all.
//!
//! ```text
//! <AudioSynthFolder>
//!   <Attributes x:id="...">                            occupied slot
//!     <Attributes x:id="ghostData"/>                   0  (unused)
//!     <UID x:id="classID" uid="{...}"/>                1  device class id
//!     <Attributes x:id="deviceData" name="Mai Tai">    2  device name
//!       <UID x:id="uniqueID" uid="{...}"/>                device uid
//!     </Attributes>
//!     <Attributes x:id="classInfo">                    3
//!       <ClassInfo category=".." subCategory=".." name=".."/>
//!     </Attributes>
//!     <Attributes x:id="presetInfo"/>                  4  (unused)
//!     <String x:id="presetPath" text="Presets/../x.preset"/>  5
//!     <Attributes x:id="inputConnection">              6
//!       <UID uid="{...}"/>                                music track device id
//!     </Attributes>
//!   </Attributes>
//!   <Attributes x:id="..."/>                           empty slot
//! </AudioSynthFolder>
//! ```

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

use crate::error::{ExportError, FormatError, XmlParseError};
use crate::models::{keys, DeviceDescriptor, SynthFolderTable};
use crate::utils::xml_parsing::{load_document, XmlNode};
use crate::{trace_fn, warn_fn};

pub const SYNTH_FOLDER_DOCUMENT: &str = "Devices/audiosynthfolder.xml";

const CLASS_ID_SLOT: usize = 1;
const DEVICE_DATA_SLOT: usize = 2;
const CLASS_INFO_SLOT: usize = 3;
const PRESET_PATH_SLOT: usize = 5;
const INPUT_CONNECTION_SLOT: usize = 6;

static PRESET_FILE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Presets/.*/(.*)").expect("preset path pattern is valid"));

pub fn read_synth_folder_table(path: &Path) -> Result<SynthFolderTable, ExportError> {
    let root = load_document(path)?;
    synth_folder_table_from_document(&root)
}

pub fn synth_folder_table_from_document(root: &XmlNode) -> Result<SynthFolderTable, ExportError> {
    let mut table = SynthFolderTable::new();
    let mut empty_slots = 0;

    for slot in &root.children {
        if !slot.has_children() {
            empty_slots += 1;
            trace_fn!(
                "synth_folder_table_from_document",
                "Skipping empty slot <{}>",
                slot.name
            );
            continue;
        }

        let descriptor = read_slot(slot)?;
        if let Some(previous) = table.insert(descriptor.music_track_device_id.clone(), descriptor) {
            warn_fn!(
                "synth_folder_table_from_document",
                "Device '{}' appears in more than one slot; keeping the last",
                previous.music_track_device_id
            );
        }
    }

    debug!(
        "Read {} devices from {} ({} empty slots skipped)",
        table.len(),
        SYNTH_FOLDER_DOCUMENT,
        empty_slots
    );
    Ok(table)
}

fn read_slot(slot: &XmlNode) -> Result<DeviceDescriptor, ExportError> {
    let device_data = slot.required_child(DEVICE_DATA_SLOT, SYNTH_FOLDER_DOCUMENT)?;
    let class_info = class_info(slot)?;
    let preset_path = preset_path(slot)?;

    Ok(DeviceDescriptor {
        music_track_device_id: music_track_device_id(slot)?.to_string(),
        device_class_id: required(slot.required_child(CLASS_ID_SLOT, SYNTH_FOLDER_DOCUMENT)?, keys::UID)?,
        device_name: required(device_data, keys::NAME)?,
        device_uid: required(device_data.required_child(0, SYNTH_FOLDER_DOCUMENT)?, keys::UID)?,
        device_category: required(class_info, "category")?,
        device_sub_category: required(class_info, "subCategory")?,
        device_base_name: required(class_info, keys::NAME)?,
        preset_file_name: preset_file_name(preset_path)?,
        preset_path: preset_path.to_string(),
    })
}

fn music_track_device_id(slot: &XmlNode) -> Result<&str, XmlParseError> {
    slot.required_child(INPUT_CONNECTION_SLOT, SYNTH_FOLDER_DOCUMENT)?
        .required_child(0, SYNTH_FOLDER_DOCUMENT)?
        .required_attribute(keys::UID, SYNTH_FOLDER_DOCUMENT)
}

fn class_info(slot: &XmlNode) -> Result<&XmlNode, XmlParseError> {
    slot.required_child(CLASS_INFO_SLOT, SYNTH_FOLDER_DOCUMENT)?
        .required_child(0, SYNTH_FOLDER_DOCUMENT)
}

fn preset_path(slot: &XmlNode) -> Result<&str, XmlParseError> {
    slot.required_child(PRESET_PATH_SLOT, SYNTH_FOLDER_DOCUMENT)?
        .required_attribute("text", SYNTH_FOLDER_DOCUMENT)
}

fn required(node: &XmlNode, attribute: &str) -> Result<String, XmlParseError> {
    node.required_attribute(attribute, SYNTH_FOLDER_DOCUMENT)
        .map(String::from)
}

/// Extracts the payload file name from a preset path of the form
/// `Presets/<folder...>/<file>`.
///
/// # Examples
///
/// ```
/// use studio_preset_exporter::scan::synth_folder::preset_file_name;
///
/// let name = preset_file_name("Presets/SomeCategory/MyPreset.preset").unwrap();
/// assert_eq!(name, "MyPreset.preset");
/// assert!(preset_file_name("MyPreset.preset").is_err());
/// ```
pub fn preset_file_name(preset_path: &str) -> Result<String, FormatError> {
    PRESET_FILE_NAME
        .captures(preset_path)
        .and_then(|captures| captures.get(1))
        .map(|file_name| file_name.as_str().to_string())
        .ok_or_else(|| FormatError::PresetPath(preset_path.to_string()))
}
