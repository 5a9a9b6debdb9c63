#![allow(dead_code)]
use quick_xml::escape::escape;
use std::sync::Once;

static INIT: Once = Once::new();

/// Initialise logging exactly once for all unit tests
pub fn setup() {
    INIT.call_once(|| {
        let _ = env_logger::builder()
            .is_test(true)
            .filter_level(log::LevelFilter::Debug)
            .try_init();
    });
}

fn optional_attribute(key: &str, value: Option<&str>) -> String {
    value
        .map(|value| format!(r#" {}="{}""#, key, escape(value)))
        .unwrap_or_default()
}

/// Builder for `Song/song.xml` documents
pub struct SongXml {
    tracks: Vec<String>,
}

impl SongXml {
    pub fn new() -> Self {
        Self { tracks: Vec::new() }
    }

    pub fn media_track(mut self, uid: &str, track_id: &str, name: &str, parent: Option<&str>) -> Self {
        self.tracks.push(format!(
            r#"<MediaTrack name="{}" trackID="{}"{}><UID x:id="uniqueID" uid="{}"/><Attributes x:id="channel"/></MediaTrack>"#,
            escape(name),
            track_id,
            optional_attribute("parentFolder", parent),
            uid
        ));
        self
    }

    pub fn folder_track(mut self, track_id: &str, name: &str, parent: Option<&str>) -> Self {
        self.tracks.push(format!(
            r#"<FolderTrack name="{}" trackID="{}"{}/>"#,
            escape(name),
            track_id,
            optional_attribute("parentFolder", parent)
        ));
        self
    }

    pub fn raw_track(mut self, xml: &str) -> Self {
        self.tracks.push(xml.to_string());
        self
    }

    pub fn build(self) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<Song>
  <Attributes x:id="Root">
    <Attributes x:id="Timing"/>
    <List x:id="Tracks">
      {}
    </List>
  </Attributes>
</Song>"#,
            self.tracks.join("\n      ")
        )
    }
}

/// Builder for `Devices/audiosynthfolder.xml` documents.
///
/// Derived fields follow the device id: class id `<id>-class`, device uid
/// `<id>-uid`, category `AudioSynth`, sub category `Synth`, base name equal
/// to the device name.
pub struct SynthFolderXml {
    slots: Vec<String>,
}

impl SynthFolderXml {
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    pub fn instrument(mut self, device_id: &str, device_name: &str, preset_path: &str) -> Self {
        let name = escape(device_name);
        self.slots.push(format!(
            r#"<Attributes x:id="slot" name="{name}">
      <Attributes x:id="ghostData"/>
      <UID x:id="classID" uid="{device_id}-class"/>
      <Attributes x:id="deviceData" name="{name}"><UID x:id="uniqueID" uid="{device_id}-uid"/></Attributes>
      <Attributes x:id="classInfo"><ClassInfo category="AudioSynth" subCategory="Synth" name="{name}"/></Attributes>
      <Attributes x:id="presetInfo"/>
      <String x:id="presetPath" text="{path}"/>
      <Attributes x:id="inputConnection"><UID x:id="musicTrackDevice" uid="{device_id}"/></Attributes>
    </Attributes>"#,
            path = escape(preset_path),
        ));
        self
    }

    pub fn empty_slot(mut self) -> Self {
        self.slots.push(r#"<Attributes x:id="emptySlot"/>"#.to_string());
        self
    }

    pub fn build(self) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<AudioSynthFolder>
    {}
</AudioSynthFolder>"#,
            self.slots.join("\n    ")
        )
    }
}

/// Builder for `Devices/musictrackdevice.xml` documents
pub struct TrackDeviceXml {
    links: Vec<String>,
}

impl TrackDeviceXml {
    pub fn new() -> Self {
        Self { links: Vec::new() }
    }

    pub fn link(mut self, device_id: &str, song_id: &str, attributes: &[(&str, &str)]) -> Self {
        let attributes: String = attributes
            .iter()
            .map(|(key, value)| format!(r#" {}="{}""#, key, escape(*value)))
            .collect();
        self.links.push(format!(
            r#"<Connection{attributes}><UID x:id="source" objectID="{device_id}/Input"/><UID x:id="song" uid="{song_id}"/></Connection>"#
        ));
        self
    }

    pub fn raw_link(mut self, xml: &str) -> Self {
        self.links.push(xml.to_string());
        self
    }

    pub fn build(self) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<MusicTrackDevice>
  <Attributes x:id="Root">
    <List x:id="Connections">
      {}
    </List>
  </Attributes>
</MusicTrackDevice>"#,
            self.links.join("\n      ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::xml_parsing::parse_document;

    #[test]
    fn test_builders_produce_well_formed_documents() {
        let song = SongXml::new()
            .media_track("{M1}", "{T1}", "7\" Kick", None)
            .build();
        let synth = SynthFolderXml::new()
            .instrument("{D1}", "Impact", "Presets/Drums/Kit.preset")
            .build();
        let links = TrackDeviceXml::new().link("{D1}", "{M1}", &[]).build();

        for xml in [song, synth, links] {
            assert!(parse_document(xml.as_bytes()).is_ok(), "{}", xml);
        }
    }
}
