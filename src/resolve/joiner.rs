use std::collections::BTreeMap;

use crate::debug_fn;
use crate::error::JoinError;
use crate::models::{
    AttributeMap, ResolvedPreset, SongTable, SynthFolderTable, TrackDeviceTable,
};

/// Joins every synth folder device with its track link and owning media track.
///
/// Each record's fields are the media track attributes, overridden by the
/// link attributes, overridden by the device descriptor. A device without a
/// link, or a link without a media track, fails the whole join: the preset
/// would be incomplete.
pub fn join_tables(
    song: &SongTable,
    synth_folder: &SynthFolderTable,
    track_devices: &TrackDeviceTable,
) -> Result<BTreeMap<String, ResolvedPreset>, JoinError> {
    let mut device_ids: Vec<&String> = synth_folder.keys().collect();
    device_ids.sort();

    let mut resolved = BTreeMap::new();
    for device_id in device_ids {
        let descriptor = &synth_folder[device_id];

        let link = track_devices
            .get(device_id)
            .ok_or_else(|| JoinError::UnresolvedDeviceLink(device_id.clone()))?;

        let media_track =
            song.media_track(&link.song_id)
                .ok_or_else(|| JoinError::UnresolvedSongEntry {
                    device_id: device_id.clone(),
                    song_id: link.song_id.clone(),
                })?;

        let fields = merge_fields([
            media_track.clone(),
            link.to_attributes(),
            descriptor.to_attributes(),
        ]);

        resolved.insert(
            device_id.clone(),
            ResolvedPreset {
                descriptor: descriptor.clone(),
                fields,
            },
        );
    }

    debug_fn!("join_tables", "Joined {} devices with their tracks", resolved.len());
    Ok(resolved)
}

/// Rightmost source wins on key collisions.
fn merge_fields<I>(sources: I) -> AttributeMap
where
    I: IntoIterator<Item = AttributeMap>,
{
    let mut merged = AttributeMap::new();
    for source in sources {
        merged.extend(source);
    }
    merged
}
