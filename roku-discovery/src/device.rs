//! Device-info document parsing.
//!
//! `GET <address>query/device-info` returns a flat XML document describing
//! the player. Discovery uses it to put a human-readable name on each
//! candidate; the ECP client uses it for the `device-info` command.

use serde::Deserialize;

use crate::error::{DiscoveryError, Result};

/// Parsed `<device-info>` document.
///
/// Every field defaults to an empty string so firmware that omits an element
/// still parses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct DeviceInfo {
    pub udn: String,
    pub serial_number: String,
    pub device_id: String,
    pub vendor_name: String,
    pub model_number: String,
    pub model_name: String,
    pub friendly_device_name: String,
    pub user_device_name: String,
    pub software_version: String,
}

impl DeviceInfo {
    /// Parse a device-info document.
    ///
    /// # Errors
    ///
    /// Returns `DiscoveryError::ParseError` if the XML is malformed.
    pub fn from_xml(xml: &str) -> Result<Self> {
        quick_xml::de::from_str(xml)
            .map_err(|e| DiscoveryError::ParseError(format!("Failed to parse device-info XML: {}", e)))
    }

    /// Name shown to the user: the name set on the device, else the
    /// firmware's friendly name, else `None`.
    pub fn display_name(&self) -> Option<&str> {
        [&self.user_device_name, &self.friendly_device_name]
            .into_iter()
            .map(|name| name.trim())
            .find(|name| !name.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEVICE_INFO: &str = r#"<?xml version="1.0" encoding="UTF-8" ?>
<device-info>
	<udn>29600009-5406-1005-8080-b83e59c7a1b2</udn>
	<serial-number>X00400ABCDEF</serial-number>
	<device-id>S00000ABCDEF</device-id>
	<vendor-name>Roku</vendor-name>
	<model-number>3930X</model-number>
	<model-name>Roku Express</model-name>
	<supports-ethernet>false</supports-ethernet>
	<friendly-device-name>Roku Express - X00400ABCDEF</friendly-device-name>
	<user-device-name>Living Room</user-device-name>
	<software-version>11.5.0</software-version>
</device-info>"#;

    #[test]
    fn test_device_info_from_xml() {
        let info = DeviceInfo::from_xml(DEVICE_INFO).unwrap();

        assert_eq!(info.serial_number, "X00400ABCDEF");
        assert_eq!(info.model_number, "3930X");
        assert_eq!(info.model_name, "Roku Express");
        assert_eq!(info.user_device_name, "Living Room");
        assert_eq!(info.software_version, "11.5.0");
        assert_eq!(info.display_name(), Some("Living Room"));
    }

    #[test]
    fn test_display_name_falls_back_to_friendly_name() {
        let xml = r#"<device-info>
  <model-name>Roku Ultra</model-name>
  <friendly-device-name>Roku Ultra - YH00AB</friendly-device-name>
</device-info>"#;

        let info = DeviceInfo::from_xml(xml).unwrap();
        assert_eq!(info.user_device_name, "");
        assert_eq!(info.display_name(), Some("Roku Ultra - YH00AB"));
    }

    #[test]
    fn test_display_name_none_when_unnamed() {
        let info = DeviceInfo {
            user_device_name: "   ".to_string(),
            ..Default::default()
        };
        assert_eq!(info.display_name(), None);
    }

    #[test]
    fn test_malformed_xml_is_parse_error() {
        let result = DeviceInfo::from_xml("<device-info><udn>abc");
        assert!(matches!(result, Err(DiscoveryError::ParseError(_))));
    }
}
