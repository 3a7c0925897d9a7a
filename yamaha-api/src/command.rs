//! Request envelope encoding
//!
//! Every request is an XML document whose `YAMAHA_AV` root declares whether
//! it reads (`GET`) or writes (`PUT`) the nested command path.

use std::borrow::Cow;

/// XML declaration prefixed to every request
pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="utf-8"?>"#;

/// Root element of requests and responses
pub const ROOT_ELEMENT: &str = "YAMAHA_AV";

/// Path of the control endpoint on the receiver
pub const CONTROL_PATH: &str = "/YamahaRemoteControl/ctrl";

/// Request verb carried in the `cmd` attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Read the values under the command path
    Get,
    /// Write the values under the command path
    Put,
}

impl Command {
    /// The attribute value sent on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Get => "GET",
            Command::Put => "PUT",
        }
    }
}

/// Wrap a command fragment in the request envelope
pub fn encode_envelope(command: Command, body: &str) -> String {
    format!(
        r#"{decl}<{root} cmd="{cmd}">{body}</{root}>"#,
        decl = XML_DECLARATION,
        root = ROOT_ELEMENT,
        cmd = command.as_str(),
        body = body,
    )
}

/// Escape a text value before it is interpolated into a request body
pub fn escape_text(value: &str) -> Cow<'_, str> {
    quick_xml::escape::escape(value)
}

/// Build the control URL for a receiver host
///
/// `host` may be a bare address (`192.168.1.20`, `receiver.lan:80`) or an
/// explicit base URL (`http://127.0.0.1:8080`).
pub fn control_url(host: &str) -> String {
    let host = host.trim_end_matches('/');
    if host.starts_with("http://") || host.starts_with("https://") {
        format!("{}{}", host, CONTROL_PATH)
    } else {
        format!("http://{}{}", host, CONTROL_PATH)
    }
}
