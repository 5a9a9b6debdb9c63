//! Reader for `Devices/musictrackdevice.xml`.
//!
//! ```text
//! <MusicTrackDevice>
//!   <Attributes x:id="Root">                    child 0
//!     <List x:id="Connections">                 child 0: one element per link
//!       <Connection ...>
//!         <UID objectID="{device}/Input"/>      0  links a device input ...
//!         <UID uid="{media track uid}"/>        1  ... to a media track
//!       </Connection>
//!       <Connection ...>
//!         <UID objectID="{device}/Output"/>     not a device input, skipped
//!         ...
//! ```

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

use crate::error::XmlParseError;
use crate::models::{keys, DeviceTrackLink, TrackDeviceTable};
use crate::trace_fn;
use crate::utils::xml_parsing::{load_document, XmlNode};

pub const TRACK_DEVICE_DOCUMENT: &str = "Devices/musictrackdevice.xml";

static DEVICE_INPUT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.*)/Input$").expect("device input pattern is valid"));

pub fn read_track_device_table(path: &Path) -> Result<TrackDeviceTable, XmlParseError> {
    let root = load_document(path)?;
    track_device_table_from_document(&root)
}

pub fn track_device_table_from_document(root: &XmlNode) -> Result<TrackDeviceTable, XmlParseError> {
    let mut table = TrackDeviceTable::new();
    let links = link_list(root)?;

    for link in links {
        let Some(device_id) = input_device_id(link) else {
            trace_fn!(
                "track_device_table_from_document",
                "Skipping <{}> without a device input",
                link.name
            );
            continue;
        };

        let song_id = link
            .required_child(1, TRACK_DEVICE_DOCUMENT)?
            .required_attribute(keys::UID, TRACK_DEVICE_DOCUMENT)?;

        table.insert(
            device_id.to_string(),
            DeviceTrackLink {
                attributes: link.attributes.clone(),
                music_track_device_id: device_id.to_string(),
                song_id: song_id.to_string(),
            },
        );
    }

    debug!(
        "Read {} device links from {} ({} elements skipped)",
        table.len(),
        TRACK_DEVICE_DOCUMENT,
        links.len() - table.len()
    );
    Ok(table)
}

fn link_list(root: &XmlNode) -> Result<&[XmlNode], XmlParseError> {
    let list = root
        .required_child(0, TRACK_DEVICE_DOCUMENT)?
        .required_child(0, TRACK_DEVICE_DOCUMENT)?;
    Ok(&list.children)
}

/// Device id of a link whose first child points at `<device id>/Input`.
/// Output and control links have no such reference.
fn input_device_id(link: &XmlNode) -> Option<&str> {
    let object_id = link.child(0)?.attribute("objectID")?;
    DEVICE_INPUT
        .captures(object_id)
        .and_then(|captures| captures.get(1))
        .map(|device_id| device_id.as_str())
        .filter(|device_id| !device_id.is_empty())
}
