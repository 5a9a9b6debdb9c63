//! # Core Data Models
//!
//! Normalized tables built from the three project documents and the joined
//! record they produce.
//!
//! ## Key Types
//!
//! - [`TrackKind`]: the kind of a track element in `Song/song.xml`
//! - [`SongTable`]: tracks grouped by kind, then by id
//! - [`DeviceDescriptor`]: one instrument slot from `Devices/audiosynthfolder.xml`
//! - [`DeviceTrackLink`]: one device-to-track link from `Devices/musictrackdevice.xml`
//! - [`ResolvedPreset`]: the join of all three for one device
//! - [`FolderPath`]: root-first ancestor folder names of a track

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Attribute name to value, as read from an XML element.
pub type AttributeMap = BTreeMap<String, String>;

/// Instrument slots keyed by music track device id.
pub type SynthFolderTable = HashMap<String, DeviceDescriptor>;

/// Device links keyed by music track device id.
pub type TrackDeviceTable = HashMap<String, DeviceTrackLink>;

/// Root-first list of the folder tracks enclosing a track.
pub type FolderPath = Vec<String>;

/// Attribute keys shared between the documents and the merged record.
pub mod keys {
    pub const NAME: &str = "name";
    pub const TRACK_ID: &str = "trackID";
    pub const PARENT_FOLDER: &str = "parentFolder";
    pub const UID: &str = "uid";
    pub const SONG_ID: &str = "songId";
    pub const MUSIC_TRACK_DEVICE_ID: &str = "musicTrackDeviceId";
    pub const DEVICE_CLASS_ID: &str = "deviceClassId";
    pub const DEVICE_NAME: &str = "deviceName";
    pub const DEVICE_UID: &str = "deviceUID";
    pub const DEVICE_CATEGORY: &str = "deviceCategory";
    pub const DEVICE_SUB_CATEGORY: &str = "deviceSubCategory";
    pub const DEVICE_BASE_NAME: &str = "deviceBaseName";
    pub const PRESET_PATH: &str = "presetPath";
    pub const PRESET_FILE_NAME: &str = "presetFileName";
}

/// Kind of a track element, taken from its tag name.
///
/// Only media and folder tracks take part in preset resolution; every other
/// track element is kept under [`TrackKind::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TrackKind {
    /// Instrument or audio track; identified by the `uid` of its first child
    MediaTrack,
    /// Folder track; identified by its own `trackID`
    FolderTrack,
    /// Any other track element (automation, bus, ...); identified by `trackID`
    Other(String),
}

impl TrackKind {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "MediaTrack" => TrackKind::MediaTrack,
            "FolderTrack" => TrackKind::FolderTrack,
            other => TrackKind::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            TrackKind::MediaTrack => "MediaTrack",
            TrackKind::FolderTrack => "FolderTrack",
            TrackKind::Other(tag) => tag,
        }
    }
}

impl fmt::Display for TrackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every track element of the song, grouped by kind and then by track id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SongTable {
    tracks: HashMap<TrackKind, HashMap<String, AttributeMap>>,
}

impl SongTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `attributes` under `kind`/`id`, replacing an earlier track with
    /// the same id.
    pub fn insert(&mut self, kind: TrackKind, id: String, attributes: AttributeMap) {
        self.tracks.entry(kind).or_default().insert(id, attributes);
    }

    pub fn get(&self, kind: &TrackKind, id: &str) -> Option<&AttributeMap> {
        self.tracks.get(kind).and_then(|tracks| tracks.get(id))
    }

    pub fn media_track(&self, id: &str) -> Option<&AttributeMap> {
        self.get(&TrackKind::MediaTrack, id)
    }

    pub fn folder_track(&self, id: &str) -> Option<&AttributeMap> {
        self.get(&TrackKind::FolderTrack, id)
    }

    /// Number of tracks of `kind`.
    pub fn count(&self, kind: &TrackKind) -> usize {
        self.tracks.get(kind).map_or(0, HashMap::len)
    }

    pub fn kinds(&self) -> impl Iterator<Item = &TrackKind> {
        self.tracks.keys()
    }
}

/// An instrument slot of the synth folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceDescriptor {
    pub music_track_device_id: String,
    pub device_class_id: String,
    pub device_name: String,
    pub device_uid: String,
    pub device_category: String,
    pub device_sub_category: String,
    pub device_base_name: String,
    /// Location of the preset payload relative to the archive root
    pub preset_path: String,
    /// Basename of `preset_path`
    pub preset_file_name: String,
}

impl DeviceDescriptor {
    /// The descriptor as attributes, under the keys used in the merged record.
    pub fn to_attributes(&self) -> AttributeMap {
        [
            (keys::MUSIC_TRACK_DEVICE_ID, &self.music_track_device_id),
            (keys::DEVICE_CLASS_ID, &self.device_class_id),
            (keys::DEVICE_NAME, &self.device_name),
            (keys::DEVICE_UID, &self.device_uid),
            (keys::DEVICE_CATEGORY, &self.device_category),
            (keys::DEVICE_SUB_CATEGORY, &self.device_sub_category),
            (keys::DEVICE_BASE_NAME, &self.device_base_name),
            (keys::PRESET_PATH, &self.preset_path),
            (keys::PRESET_FILE_NAME, &self.preset_file_name),
        ]
        .into_iter()
        .map(|(key, value)| (key.to_string(), value.clone()))
        .collect()
    }
}

/// Link between a music track device and the media track that owns it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceTrackLink {
    /// Attributes of the link element itself
    pub attributes: AttributeMap,
    pub music_track_device_id: String,
    /// `uid` of the owning media track
    pub song_id: String,
}

impl DeviceTrackLink {
    pub fn to_attributes(&self) -> AttributeMap {
        let mut attributes = self.attributes.clone();
        attributes.insert(
            keys::MUSIC_TRACK_DEVICE_ID.to_string(),
            self.music_track_device_id.clone(),
        );
        attributes.insert(keys::SONG_ID.to_string(), self.song_id.clone());
        attributes
    }
}

/// Everything known about one device after the join.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPreset {
    pub descriptor: DeviceDescriptor,
    /// Media track, link and descriptor fields merged in that order, later
    /// sources winning on key collisions
    pub fields: AttributeMap,
}

impl ResolvedPreset {
    pub fn device_id(&self) -> &str {
        &self.descriptor.music_track_device_id
    }

    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Display name of the owning track.
    pub fn name(&self) -> Option<&str> {
        self.field(keys::NAME)
    }

    /// Track id of the owning track, written as the device slot uid.
    pub fn track_id(&self) -> Option<&str> {
        self.field(keys::TRACK_ID)
    }

    /// Folder track directly enclosing the owning track. Empty values count
    /// as absent.
    pub fn parent_folder(&self) -> Option<&str> {
        parent_folder_of(&self.fields)
    }
}

/// Reads a non-empty `parentFolder` reference from a track's attributes.
pub fn parent_folder_of(attributes: &AttributeMap) -> Option<&str> {
    attributes
        .get(keys::PARENT_FOLDER)
        .map(String::as_str)
        .filter(|id| !id.is_empty())
}
