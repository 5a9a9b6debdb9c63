use crate::error::{CycleError, ExportError, JoinError};
use crate::models::{keys, parent_folder_of, AttributeMap, FolderPath, SongTable, TrackKind};
use crate::trace_fn;

/// Names of the folder tracks enclosing `track`, outermost first.
///
/// Follows `parentFolder` links through the song's folder tracks until a
/// folder without a parent is reached. A track without `parentFolder` lives
/// at the top level and yields an empty path. A chain can visit at most every
/// folder track once; anything longer is a cycle and fails with
/// [`CycleError`].
pub fn resolve_folder_path(track: &AttributeMap, song: &SongTable) -> Result<FolderPath, ExportError> {
    let limit = song.count(&TrackKind::FolderTrack);
    let mut folders = FolderPath::new();
    let mut next = parent_folder_of(track);

    while let Some(folder_id) = next {
        let folder = song
            .folder_track(folder_id)
            .ok_or_else(|| JoinError::UnresolvedFolder(folder_id.to_string()))?;

        if folders.len() == limit {
            return Err(CycleError {
                start: record_label(track),
                limit,
            }
            .into());
        }

        let name = folder
            .get(keys::NAME)
            .ok_or_else(|| JoinError::IncompleteRecord {
                record: folder_id.to_string(),
                field: keys::NAME.to_string(),
            })?;
        trace_fn!("resolve_folder_path", "{} is inside '{}'", folder_id, name);

        folders.push(name.clone());
        next = parent_folder_of(folder);
    }

    folders.reverse();
    Ok(folders)
}

fn record_label(track: &AttributeMap) -> String {
    track
        .get(keys::NAME)
        .or_else(|| track.get(keys::TRACK_ID))
        .cloned()
        .unwrap_or_else(|| "<unnamed track>".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(name: &str, parent: Option<&str>) -> AttributeMap {
        let mut attributes = AttributeMap::new();
        attributes.insert(keys::NAME.into(), name.into());
        if let Some(parent) = parent {
            attributes.insert(keys::PARENT_FOLDER.into(), parent.into());
        }
        attributes
    }

    fn song_with_folders(folders: &[(&str, &str, Option<&str>)]) -> SongTable {
        let mut song = SongTable::new();
        for (id, name, parent) in folders {
            song.insert(TrackKind::FolderTrack, id.to_string(), track(name, *parent));
        }
        song
    }

    #[test]
    fn test_top_level_track_has_empty_path() {
        let song = song_with_folders(&[("{A}", "A", None)]);
        assert!(resolve_folder_path(&track("Lead", None), &song).unwrap().is_empty());
    }

    #[test]
    fn test_empty_parent_folder_means_top_level() {
        let song = song_with_folders(&[]);
        let path = resolve_folder_path(&track("Lead", Some("")), &song).unwrap();
        assert!(path.is_empty());
    }

    #[test]
    fn test_three_level_chain_is_root_first() {
        let song = song_with_folders(&[
            ("{A}", "A", None),
            ("{B}", "B", Some("{A}")),
            ("{C}", "C", Some("{B}")),
        ]);
        let path = resolve_folder_path(&track("Lead", Some("{C}")), &song).unwrap();
        assert_eq!(path, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_chain_using_every_folder_is_not_a_cycle() {
        let song = song_with_folders(&[("{A}", "A", None), ("{B}", "B", Some("{A}"))]);
        let path = resolve_folder_path(&track("Lead", Some("{B}")), &song).unwrap();
        assert_eq!(path, vec!["A", "B"]);
    }

    #[test]
    fn test_cyclic_chain_is_cycle_error() {
        let song = song_with_folders(&[
            ("{A}", "A", Some("{B}")),
            ("{B}", "B", Some("{A}")),
        ]);
        let error = resolve_folder_path(&track("Lead", Some("{A}")), &song).unwrap_err();
        assert!(matches!(
            error,
            ExportError::CycleError(CycleError { limit: 2, ref start }) if start == "Lead"
        ));
    }

    #[test]
    fn test_self_parent_is_cycle_error() {
        let song = song_with_folders(&[("{A}", "A", Some("{A}"))]);
        let error = resolve_folder_path(&track("Lead", Some("{A}")), &song).unwrap_err();
        assert!(matches!(error, ExportError::CycleError(_)));
    }

    #[test]
    fn test_unknown_parent_is_join_error() {
        let song = song_with_folders(&[]);
        let error = resolve_folder_path(&track("Lead", Some("{X}")), &song).unwrap_err();
        assert!(matches!(
            error,
            ExportError::JoinError(JoinError::UnresolvedFolder(ref id)) if id == "{X}"
        ));
    }
}
