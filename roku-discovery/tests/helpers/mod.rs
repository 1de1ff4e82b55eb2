//! Test helpers: a loopback UDP socket standing in for devices on the LAN

use std::net::{SocketAddr, UdpSocket};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use roku_discovery::DiscoveryConfig;

/// Answers the first M-SEARCH it receives with a fixed list of datagrams
pub struct FakeResponder {
    addr: SocketAddr,
    handle: JoinHandle<Option<String>>,
}

impl FakeResponder {
    pub fn spawn(replies: Vec<String>) -> Self {
        let socket = UdpSocket::bind("127.0.0.1:0").expect("bind fake responder");
        socket
            .set_read_timeout(Some(Duration::from_secs(5)))
            .expect("set responder timeout");
        let addr = socket.local_addr().expect("responder address");

        let handle = thread::spawn(move || {
            let mut buffer = [0u8; 2048];
            let (size, from) = socket.recv_from(&mut buffer).ok()?;
            for reply in &replies {
                socket.send_to(reply.as_bytes(), from).ok()?;
            }
            Some(String::from_utf8_lossy(&buffer[..size]).into_owned())
        });

        Self { addr, handle }
    }

    /// A responder that reads the probe and never answers
    pub fn silent() -> Self {
        Self::spawn(Vec::new())
    }

    pub fn config(&self, window: Duration) -> DiscoveryConfig {
        DiscoveryConfig::new()
            .with_search_addr(self.addr)
            .with_window(window)
            .with_http_timeout(Duration::from_millis(500))
    }

    /// The probe datagram the responder received
    pub fn received_probe(self) -> Option<String> {
        self.handle.join().expect("responder thread panicked")
    }
}

/// A reply shaped like the ones Roku firmware sends
pub fn roku_reply(location: &str) -> String {
    format!(
        "HTTP/1.1 200 OK\r\n\
         Cache-Control: max-age=3600\r\n\
         ST: roku:ecp\r\n\
         USN: uuid:roku:ecp:P0A070000007\r\n\
         Ext: \r\n\
         Server: Roku/9.4.0 UPnP/1.0 Roku/9.4.0\r\n\
         LOCATION: {}\r\n\
         \r\n",
        location
    )
}

/// A reply from some other UPnP device without a LOCATION header
pub fn malformed_reply() -> String {
    "HTTP/1.1 200 OK\r\n\
     ST: roku:ecp\r\n\
     USN: uuid:something-else\r\n\
     \r\n"
        .to_string()
}

pub fn device_info_xml(user_device_name: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" ?>
<device-info>
	<udn>29600009-5406-1005-8080-b83e59c7a1b2</udn>
	<serial-number>X00400ABCDEF</serial-number>
	<model-number>3930X</model-number>
	<model-name>Roku Express</model-name>
	<friendly-device-name>Roku Express - X00400ABCDEF</friendly-device-name>
	<user-device-name>{}</user-device-name>
</device-info>"#,
        user_device_name
    )
}
