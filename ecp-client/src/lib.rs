//! HTTP client for the Roku External Control Protocol (ECP)
//!
//! Every call takes the control-base-URL (with trailing slash) of the device,
//! as returned by device resolution, and issues one request against it.

mod error;
mod key;

pub use error::EcpError;
pub use key::Key;

use std::time::Duration;

use roku_discovery::DeviceInfo;
use tracing::debug;
use xmltree::{Element, XMLNode};

/// An application installed on the device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct App {
    pub id: String,
    pub app_type: String,
    pub version: String,
    pub name: String,
}

/// A minimal ECP client
#[derive(Debug, Clone)]
pub struct EcpClient {
    agent: ureq::Agent,
}

impl EcpClient {
    /// Create a new ECP client with default configuration
    pub fn new() -> Self {
        Self {
            agent: ureq::AgentBuilder::new()
                .timeout_connect(Duration::from_secs(5))
                .timeout_read(Duration::from_secs(10))
                .build(),
        }
    }

    /// Press and release a key
    pub fn keypress(&self, base: &str, key: Key) -> Result<(), EcpError> {
        self.post(&format!("{}keypress/{}", base, key.path()))
    }

    /// Type `text` one character at a time
    pub fn send_text(&self, base: &str, text: &str) -> Result<(), EcpError> {
        text.chars().try_for_each(|c| self.keypress(base, Key::Lit(c)))
    }

    /// Launch an installed application by id
    pub fn launch(&self, base: &str, app_id: &str) -> Result<(), EcpError> {
        self.post(&format!("{}launch/{}", base, urlencoding::encode(app_id)))
    }

    /// List installed applications
    pub fn query_apps(&self, base: &str) -> Result<Vec<App>, EcpError> {
        let xml = self.get(&format!("{}query/apps", base))?;
        parse_apps(&xml)
    }

    /// Fetch the device-info document
    pub fn query_device_info(&self, base: &str) -> Result<DeviceInfo, EcpError> {
        let xml = self.get(&format!("{}query/device-info", base))?;
        Ok(DeviceInfo::from_xml(&xml)?)
    }

    fn post(&self, url: &str) -> Result<(), EcpError> {
        debug!(%url, "POST");
        self.agent
            .post(url)
            .send_string("")
            .map_err(|e| EcpError::Network(e.to_string()))?;
        Ok(())
    }

    fn get(&self, url: &str) -> Result<String, EcpError> {
        debug!(%url, "GET");
        self.agent
            .get(url)
            .call()
            .map_err(|e| EcpError::Network(e.to_string()))?
            .into_string()
            .map_err(|e| EcpError::Network(e.to_string()))
    }
}

impl Default for EcpClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse the `<apps>` document returned by `query/apps`
fn parse_apps(xml: &str) -> Result<Vec<App>, EcpError> {
    let root = Element::parse(xml.as_bytes()).map_err(|e| EcpError::Parse(e.to_string()))?;

    if root.name != "apps" {
        return Err(EcpError::Parse(format!(
            "Expected <apps> root element, found <{}>",
            root.name
        )));
    }

    let attribute = |element: &Element, name: &str| {
        element.attributes.get(name).cloned().unwrap_or_default()
    };

    Ok(root
        .children
        .iter()
        .filter_map(|node| match node {
            XMLNode::Element(element) if element.name == "app" => Some(element),
            _ => None,
        })
        .map(|element| App {
            id: attribute(element, "id"),
            app_type: attribute(element, "type"),
            version: attribute(element, "version"),
            name: element
                .get_text()
                .map(|text| text.trim().to_string())
                .unwrap_or_default(),
        })
        .collect())
}
