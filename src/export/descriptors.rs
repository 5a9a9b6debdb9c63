//! The two descriptor documents packaged next to a preset payload.
//!
//! Both are flat lists of `<Attribute id=".." value=".."/>` elements:
//!
//! - `metainfo.xml`: `<MetaInformation>` with the class and device slot
//!   attributes plus document title, creator and generator
//! - `presetparts.xml`: `<PresetParts><PresetPart>` with the class and device
//!   slot attributes, marking the payload as the instrument's main preset

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::Writer;
use std::io;

use crate::error::JoinError;
use crate::export::EmitOptions;
use crate::models::{keys, ResolvedPreset};

pub const META_INFORMATION_ENTRY: &str = "metainfo.xml";
pub const PRESET_PARTS_ENTRY: &str = "presetparts.xml";

/// Values written into the descriptor documents of one preset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptorFields<'a> {
    pub class_id: &'a str,
    pub class_name: &'a str,
    pub category: &'a str,
    pub sub_category: &'a str,
    pub device_name: &'a str,
    pub device_uid: &'a str,
    pub slot_uid: &'a str,
    pub title: &'a str,
    pub data_file: &'a str,
}

impl<'a> DescriptorFields<'a> {
    pub fn from_preset(preset: &'a ResolvedPreset) -> Result<Self, JoinError> {
        let descriptor = &preset.descriptor;
        Ok(Self {
            class_id: &descriptor.device_class_id,
            class_name: &descriptor.device_base_name,
            category: &descriptor.device_category,
            sub_category: &descriptor.device_sub_category,
            device_name: &descriptor.device_name,
            device_uid: &descriptor.device_uid,
            slot_uid: required_field(preset, keys::TRACK_ID)?,
            title: required_field(preset, keys::NAME)?,
            data_file: &descriptor.preset_file_name,
        })
    }

    fn class_and_slot(&self) -> [(&'static str, &'a str); 7] {
        [
            ("Class:ID", self.class_id),
            ("Class:Name", self.class_name),
            ("Class:Category", self.category),
            ("Class:SubCategory", self.sub_category),
            ("DeviceSlot:deviceName", self.device_name),
            ("DeviceSlot:deviceUID", self.device_uid),
            ("DeviceSlot:slotUID", self.slot_uid),
        ]
    }
}

fn required_field<'a>(preset: &'a ResolvedPreset, key: &str) -> Result<&'a str, JoinError> {
    preset.field(key).ok_or_else(|| JoinError::IncompleteRecord {
        record: preset.device_id().to_string(),
        field: key.to_string(),
    })
}

pub fn meta_information_xml(fields: &DescriptorFields, options: &EmitOptions) -> io::Result<Vec<u8>> {
    let mut writer = Writer::new_with_indent(Vec::new(), b'\t', 1);

    writer.write_event(Event::Start(BytesStart::new("MetaInformation")))?;
    for (id, value) in fields.class_and_slot() {
        write_attribute(&mut writer, id, value)?;
    }
    write_attribute(&mut writer, "Document:Title", fields.title)?;
    write_attribute(&mut writer, "Document:Creator", &options.document_creator)?;
    write_attribute(&mut writer, "Document:Generator", &options.document_generator)?;
    writer.write_event(Event::End(BytesEnd::new("MetaInformation")))?;

    Ok(writer.into_inner())
}

pub fn preset_parts_xml(fields: &DescriptorFields) -> io::Result<Vec<u8>> {
    let mut writer = Writer::new_with_indent(Vec::new(), b'\t', 1);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    writer.write_event(Event::Start(BytesStart::new("PresetParts")))?;
    writer.write_event(Event::Start(BytesStart::new("PresetPart")))?;
    for (id, value) in fields.class_and_slot() {
        write_attribute(&mut writer, id, value)?;
    }
    write_attribute(&mut writer, "AudioSynth:IsMainPreset", "1")?;
    write_attribute(&mut writer, "Preset:DataFile", fields.data_file)?;
    writer.write_event(Event::End(BytesEnd::new("PresetPart")))?;
    writer.write_event(Event::End(BytesEnd::new("PresetParts")))?;

    Ok(writer.into_inner())
}

fn write_attribute(writer: &mut Writer<Vec<u8>>, id: &str, value: &str) -> io::Result<()> {
    let mut element = BytesStart::new("Attribute");
    element.push_attribute(("id", id));
    element.push_attribute(("value", value));
    writer.write_event(Event::Empty(element))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AttributeMap, DeviceDescriptor};
    use crate::utils::xml_parsing::{parse_document, XmlNode};

    fn preset(name: Option<&str>) -> ResolvedPreset {
        let descriptor = DeviceDescriptor {
            music_track_device_id: "{D1}".into(),
            device_class_id: "{CLASS}".into(),
            device_name: "Mai Tai".into(),
            device_uid: "{UID}".into(),
            device_category: "AudioSynth".into(),
            device_sub_category: "Synth".into(),
            device_base_name: "Mai Tai Engine".into(),
            preset_path: "Presets/Synths/Lead.preset".into(),
            preset_file_name: "Lead.preset".into(),
        };
        let mut fields = AttributeMap::new();
        fields.insert(keys::TRACK_ID.into(), "{T1}".into());
        if let Some(name) = name {
            fields.insert(keys::NAME.into(), name.into());
        }
        ResolvedPreset { descriptor, fields }
    }

    fn attribute_pairs(node: &XmlNode) -> Vec<(String, String)> {
        node.children
            .iter()
            .map(|child| {
                assert_eq!(child.name, "Attribute");
                (
                    child.attribute("id").unwrap().to_string(),
                    child.attribute("value").unwrap().to_string(),
                )
            })
            .collect()
    }

    fn pair(id: &str, value: &str) -> (String, String) {
        (id.to_string(), value.to_string())
    }

    #[test]
    fn test_meta_information_has_ten_attributes() {
        let preset = preset(Some("7\" Kick"));
        let fields = DescriptorFields::from_preset(&preset).unwrap();
        let options = EmitOptions {
            document_creator: "tester".into(),
            ..EmitOptions::default()
        };

        let xml = meta_information_xml(&fields, &options).unwrap();
        let root = parse_document(&xml).unwrap();

        assert_eq!(root.name, "MetaInformation");
        assert_eq!(
            attribute_pairs(&root),
            vec![
                pair("Class:ID", "{CLASS}"),
                pair("Class:Name", "Mai Tai Engine"),
                pair("Class:Category", "AudioSynth"),
                pair("Class:SubCategory", "Synth"),
                pair("DeviceSlot:deviceName", "Mai Tai"),
                pair("DeviceSlot:deviceUID", "{UID}"),
                pair("DeviceSlot:slotUID", "{T1}"),
                pair("Document:Title", "7\" Kick"),
                pair("Document:Creator", "tester"),
                pair("Document:Generator", "Studio One/6.0.0.89694"),
            ]
        );
    }

    #[test]
    fn test_preset_parts_marks_main_preset() {
        let preset = preset(Some("Lead"));
        let fields = DescriptorFields::from_preset(&preset).unwrap();

        let xml = preset_parts_xml(&fields).unwrap();
        assert!(xml.starts_with(b"<?xml version=\"1.0\" encoding=\"utf-8\"?>"));

        let root = parse_document(&xml).unwrap();
        assert_eq!(root.name, "PresetParts");
        let part = root.child(0).unwrap();
        assert_eq!(part.name, "PresetPart");

        let pairs = attribute_pairs(part);
        assert_eq!(pairs.len(), 9);
        assert_eq!(pairs[6], pair("DeviceSlot:slotUID", "{T1}"));
        assert_eq!(pairs[7], pair("AudioSynth:IsMainPreset", "1"));
        assert_eq!(pairs[8], pair("Preset:DataFile", "Lead.preset"));
    }

    #[test]
    fn test_missing_track_name_is_incomplete_record() {
        let preset = preset(None);
        let error = DescriptorFields::from_preset(&preset).unwrap_err();
        assert!(matches!(
            error,
            JoinError::IncompleteRecord { ref field, .. } if field == "name"
        ));
    }
}
