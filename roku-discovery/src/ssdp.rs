//! SSDP (Simple Service Discovery Protocol) probe and reply reading
//!
//! Internal to the crate: sends one M-SEARCH datagram and yields the
//! `LOCATION` of every well-formed reply until the listening deadline.

use std::io::ErrorKind;
use std::net::UdpSocket;
use std::time::Instant;

use tracing::{debug, trace};

use crate::config::DiscoveryConfig;
use crate::error::{DiscoveryError, Result};

/// SSDP client owning the probe socket
pub(crate) struct SsdpClient {
    socket: UdpSocket,
}

impl SsdpClient {
    /// Bind an ephemeral UDP socket for one discovery session
    pub fn new() -> Result<Self> {
        let socket = UdpSocket::bind("0.0.0.0:0")
            .map_err(|e| DiscoveryError::NetworkError(format!("Failed to bind UDP socket: {}", e)))?;

        socket
            .set_multicast_loop_v4(true)
            .map_err(|e| DiscoveryError::NetworkError(format!("Failed to set multicast loop: {}", e)))?;

        Ok(Self { socket })
    }

    /// Send the M-SEARCH request and return the reply stream.
    ///
    /// The deadline starts when the datagram has been sent. The socket moves
    /// into the returned iterator and is closed when it is dropped.
    pub fn search(self, config: &DiscoveryConfig) -> Result<SsdpResponseIterator> {
        let request = config.search_request();

        self.socket
            .send_to(request.as_bytes(), config.search_addr)
            .map_err(|e| DiscoveryError::NetworkError(format!("Failed to send M-SEARCH: {}", e)))?;

        debug!(addr = %config.search_addr, st = %config.service_type, "sent M-SEARCH");

        Ok(SsdpResponseIterator {
            socket: self.socket,
            buffer: [0; 2048],
            deadline: Instant::now() + config.window,
            finished: false,
        })
    }
}

/// Iterator over the `LOCATION` values of SSDP replies
pub(crate) struct SsdpResponseIterator {
    socket: UdpSocket,
    buffer: [u8; 2048],
    deadline: Instant,
    finished: bool,
}

impl Iterator for SsdpResponseIterator {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.finished {
            let remaining = self.deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                self.finished = true;
                break;
            }

            if let Err(e) = self.socket.set_read_timeout(Some(remaining)) {
                self.finished = true;
                return Some(Err(DiscoveryError::NetworkError(format!(
                    "Failed to set read timeout: {}",
                    e
                ))));
            }

            match self.socket.recv_from(&mut self.buffer) {
                Ok((size, from)) => {
                    let Ok(text) = std::str::from_utf8(&self.buffer[..size]) else {
                        debug!(%from, "discarding non UTF-8 SSDP reply");
                        continue;
                    };

                    match parse_location(text) {
                        Some(location) => {
                            trace!(%from, %location, "SSDP reply");
                            return Some(Ok(location));
                        }
                        None => debug!(%from, "discarding SSDP reply without usable LOCATION"),
                    }
                }
                Err(e) if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) => {
                    // loop re-checks the deadline
                }
                Err(e) => {
                    self.finished = true;
                    return Some(Err(DiscoveryError::NetworkError(format!("Socket error: {}", e))));
                }
            }
        }

        None
    }
}

/// Extract the control-base-URL from an SSDP reply.
///
/// Header lines are scanned from the end. The value must be an http(s) URL;
/// a trailing `/` is appended when missing so paths can be concatenated.
pub(crate) fn parse_location(response: &str) -> Option<String> {
    let value = response
        .lines()
        .rev()
        .map(str::trim)
        .find_map(|line| extract_header_value(line, "LOCATION:"))?;

    if !(value.starts_with("http://") || value.starts_with("https://")) {
        return None;
    }

    let after_scheme = value.split_once("//").map(|(_, rest)| rest).unwrap_or("");
    if after_scheme.is_empty() || after_scheme.starts_with('/') {
        return None;
    }

    if value.ends_with('/') {
        Some(value)
    } else {
        Some(format!("{}/", value))
    }
}

/// Extract header value from a line like "HEADER: value"
fn extract_header_value(line: &str, header: &str) -> Option<String> {
    if line.len() > header.len()
        && line.is_char_boundary(header.len())
        && line[..header.len()].eq_ignore_ascii_case(header)
    {
        Some(line[header.len()..].trim().to_string())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const ROKU_REPLY: &str = "HTTP/1.1 200 OK\r\n\
        Cache-Control: max-age=3600\r\n\
        ST: roku:ecp\r\n\
        USN: uuid:roku:ecp:P0A070000007\r\n\
        Ext: \r\n\
        Server: Roku/9.4.0 UPnP/1.0 Roku/9.4.0\r\n\
        LOCATION: http://192.168.1.134:8060/\r\n\
        \r\n";

    #[test]
    fn test_parse_location_from_roku_reply() {
        assert_eq!(
            parse_location(ROKU_REPLY),
            Some("http://192.168.1.134:8060/".to_string())
        );
    }

    #[rstest]
    #[case::lowercase("location: http://10.0.0.5:8060/\r\n", Some("http://10.0.0.5:8060/"))]
    #[case::adds_trailing_slash("LOCATION: http://10.0.0.5:8060\r\n", Some("http://10.0.0.5:8060/"))]
    #[case::extra_whitespace("LOCATION:    http://10.0.0.5:8060/   \r\n", Some("http://10.0.0.5:8060/"))]
    #[case::missing("HTTP/1.1 200 OK\r\nST: roku:ecp\r\n\r\n", None)]
    #[case::empty_value("LOCATION: \r\n", None)]
    #[case::not_a_url("LOCATION: somewhere\r\n", None)]
    #[case::no_host("LOCATION: http:///\r\n", None)]
    #[case::empty("", None)]
    fn test_parse_location_cases(#[case] reply: &str, #[case] expected: Option<&str>) {
        assert_eq!(parse_location(reply), expected.map(str::to_string));
    }

    #[test]
    fn test_parse_location_prefers_last_header() {
        let reply = "LOCATION: http://10.0.0.1:8060/\r\nLOCATION: http://10.0.0.2:8060/\r\n";
        assert_eq!(parse_location(reply), Some("http://10.0.0.2:8060/".to_string()));
    }

    #[test]
    fn test_extract_header_value_case_insensitive() {
        assert_eq!(
            extract_header_value("Location: http://example.com", "LOCATION:"),
            Some("http://example.com".to_string())
        );
        assert_eq!(extract_header_value("LOCATIONS: value", "LOCATION:"), None);
        assert_eq!(extract_header_value("LOCATION:", "LOCATION:"), None);
    }

    #[test]
    fn test_extract_header_value_multibyte_line() {
        assert_eq!(extract_header_value("ÜÜÜÜÜ: value", "LOCATION:"), None);
    }
}
