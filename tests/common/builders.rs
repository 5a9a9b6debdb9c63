//! Builds complete Studio One projects for the integration tests.
//!
//! A [`ProjectFixture`] describes folders and instruments once and renders
//! the three device documents consistently, either as an unpacked project
//! directory or as a zipped `.song` archive.

use quick_xml::escape::escape;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

pub const DEVICE_NAME: &str = "Mai Tai";

struct Folder {
    track_id: String,
    name: String,
    parent: Option<String>,
}

struct Instrument {
    device_id: String,
    track_name: String,
    preset_path: String,
    parent: Option<String>,
    linked: bool,
}

impl Instrument {
    fn track_id(&self) -> String {
        format!("{}-track", self.device_id)
    }

    fn media_uid(&self) -> String {
        format!("{}-media", self.device_id)
    }
}

/// Payload bytes written for a device's preset
pub fn payload_for(device_id: &str) -> Vec<u8> {
    format!("preset data of {}", device_id).into_bytes()
}

#[derive(Default)]
pub struct ProjectFixture {
    folders: Vec<Folder>,
    instruments: Vec<Instrument>,
    skip_payloads: bool,
}

impl ProjectFixture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn folder(mut self, track_id: &str, name: &str, parent: Option<&str>) -> Self {
        self.folders.push(Folder {
            track_id: track_id.to_string(),
            name: name.to_string(),
            parent: parent.map(str::to_string),
        });
        self
    }

    /// Adds a media track named `track_name` playing device `device_id`
    pub fn instrument(mut self, device_id: &str, track_name: &str, preset_path: &str, parent: Option<&str>) -> Self {
        self.instruments.push(Instrument {
            device_id: device_id.to_string(),
            track_name: track_name.to_string(),
            preset_path: preset_path.to_string(),
            parent: parent.map(str::to_string),
            linked: true,
        });
        self
    }

    /// Adds a device that no track device link points at
    pub fn unlinked_instrument(mut self, device_id: &str, preset_path: &str) -> Self {
        self.instruments.push(Instrument {
            device_id: device_id.to_string(),
            track_name: String::new(),
            preset_path: preset_path.to_string(),
            parent: None,
            linked: false,
        });
        self
    }

    /// Leaves the preset payloads out of the project
    pub fn without_payloads(mut self) -> Self {
        self.skip_payloads = true;
        self
    }

    pub fn song_xml(&self) -> String {
        let mut tracks = Vec::new();
        for folder in &self.folders {
            tracks.push(format!(
                r#"<FolderTrack name="{}" trackID="{}"{}/>"#,
                escape(folder.name.as_str()),
                folder.track_id,
                parent_attribute(folder.parent.as_deref())
            ));
        }
        for instrument in self.instruments.iter().filter(|i| i.linked) {
            tracks.push(format!(
                r#"<MediaTrack name="{}" trackID="{}"{}><UID x:id="uniqueID" uid="{}"/></MediaTrack>"#,
                escape(instrument.track_name.as_str()),
                instrument.track_id(),
                parent_attribute(instrument.parent.as_deref()),
                instrument.media_uid()
            ));
        }

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
            tracks.join("\n      ")
        )
    }

    pub fn synth_folder_xml(&self) -> String {
        let slots: Vec<String> = self
            .instruments
            .iter()
            .map(|instrument| {
                format!(
                    r#"<Attributes x:id="slot">
      <Attributes x:id="ghostData"/>
      <UID x:id="classID" uid="{id}-class"/>
      <Attributes x:id="deviceData" name="{name}"><UID x:id="uniqueID" uid="{id}-uid"/></Attributes>
      <Attributes x:id="classInfo"><ClassInfo category="AudioSynth" subCategory="Synth" name="{name}"/></Attributes>
      <Attributes x:id="presetInfo"/>
      <String x:id="presetPath" text="{path}"/>
      <Attributes x:id="inputConnection"><UID x:id="musicTrackDevice" uid="{id}"/></Attributes>
    </Attributes>"#,
                    id = instrument.device_id,
                    name = DEVICE_NAME,
                    path = escape(instrument.preset_path.as_str()),
                )
            })
            .collect();

        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<AudioSynthFolder>
    {}
</AudioSynthFolder>"#,
            slots.join("\n    ")
        )
    }

    pub fn track_device_xml(&self) -> String {
        let links: Vec<String> = self
            .instruments
            .iter()
            .filter(|i| i.linked)
            .map(|instrument| {
                format!(
                    r#"<Connection><UID x:id="source" objectID="{}/Input"/><UID x:id="song" uid="{}"/></Connection>"#,
                    instrument.device_id,
                    instrument.media_uid()
                )
            })
            .collect();

        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<MusicTrackDevice>
  <Attributes x:id="Root">
    <List x:id="Connections">
      {}
    </List>
  </Attributes>
</MusicTrackDevice>"#,
            links.join("\n      ")
        )
    }

    fn entries(&self) -> Vec<(String, Vec<u8>)> {
        let mut entries = vec![
            ("Song/song.xml".to_string(), self.song_xml().into_bytes()),
            (
                "Devices/audiosynthfolder.xml".to_string(),
                self.synth_folder_xml().into_bytes(),
            ),
            (
                "Devices/musictrackdevice.xml".to_string(),
                self.track_device_xml().into_bytes(),
            ),
        ];
        if !self.skip_payloads {
            for instrument in &self.instruments {
                entries.push((instrument.preset_path.clone(), payload_for(&instrument.device_id)));
            }
        }
        entries
    }

    /// Writes the project unpacked under `root`
    pub fn write_dir(&self, root: &Path) {
        for (name, data) in self.entries() {
            let path = root.join(name);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, data).unwrap();
        }
    }

    /// Writes the project as a `.song` archive at `path`
    pub fn write_archive(&self, path: &Path) {
        let mut zip = ZipWriter::new(File::create(path).unwrap());
        for (name, data) in self.entries() {
            zip.start_file(name, SimpleFileOptions::default()).unwrap();
            zip.write_all(&data).unwrap();
        }
        zip.finish().unwrap();
    }
}

fn parent_attribute(parent: Option<&str>) -> String {
    parent
        .map(|parent| format!(r#" parentFolder="{}""#, parent))
        .unwrap_or_default()
}
