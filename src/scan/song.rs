//! Reader for `Song/song.xml`.
//!
//! The track list sits at a fixed depth below the root element:
//!
//! ```text
//! <Song>
//!   <Attributes x:id="Root">                    child 0
//!     <Attributes .../>                         child 0
//!     <List x:id="Tracks">                      child 1: one element per track
//!       <MediaTrack name=".." trackID=".." parentFolder="..">
//!         <UID uid="{...}"/>                    child 0: media track id
//!         ...
//!       </MediaTrack>
//!       <FolderTrack name=".." trackID=".." parentFolder=".."/>
//!     </List>
//!   </Attributes>
//! </Song>
//! ```

use log::debug;
use std::path::Path;

use crate::error::XmlParseError;
use crate::models::{keys, SongTable, TrackKind};
use crate::trace_fn;
use crate::utils::xml_parsing::{load_document, XmlNode};

pub const SONG_DOCUMENT: &str = "Song/song.xml";

pub fn read_song_table(path: &Path) -> Result<SongTable, XmlParseError> {
    let root = load_document(path)?;
    song_table_from_document(&root)
}

pub fn song_table_from_document(root: &XmlNode) -> Result<SongTable, XmlParseError> {
    let mut table = SongTable::new();

    for track in track_list(root)? {
        let kind = TrackKind::from_tag(&track.name);
        match track_id(&kind, track)? {
            Some(id) => table.insert(kind, id.to_string(), track.attributes.clone()),
            None => trace_fn!(
                "song_table_from_document",
                "Skipping <{}> without a track id",
                track.name
            ),
        }
    }

    debug!(
        "Read {} media tracks and {} folder tracks from {}",
        table.count(&TrackKind::MediaTrack),
        table.count(&TrackKind::FolderTrack),
        SONG_DOCUMENT
    );
    Ok(table)
}

fn track_list(root: &XmlNode) -> Result<&[XmlNode], XmlParseError> {
    let list = root
        .required_child(0, SONG_DOCUMENT)?
        .required_child(1, SONG_DOCUMENT)?;
    Ok(&list.children)
}

/// Media and folder tracks must carry an id. Other track elements without a
/// `trackID` are not tracks the exporter can refer to and yield `None`.
fn track_id<'a>(kind: &TrackKind, track: &'a XmlNode) -> Result<Option<&'a str>, XmlParseError> {
    match kind {
        TrackKind::MediaTrack => track
            .required_child(0, SONG_DOCUMENT)?
            .required_attribute(keys::UID, SONG_DOCUMENT)
            .map(Some),
        TrackKind::FolderTrack => track
            .required_attribute(keys::TRACK_ID, SONG_DOCUMENT)
            .map(Some),
        TrackKind::Other(_) => Ok(track.attribute(keys::TRACK_ID)),
    }
}
