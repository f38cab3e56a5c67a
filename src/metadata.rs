// src/metadata.rs

//! Static plugin descriptor printed by `switchcmd --describe`.
//!
//! The scheduler reads this once when the plugin is registered to build the
//! job parameter form; the order of `params` is the order of the form fields.

use std::io::Write;

use serde::Serialize;

use crate::errors::Result;

#[derive(Debug, Clone, Serialize)]
pub struct PluginDescriptor {
    pub name: &'static str,
    pub version: &'static str,
    pub description: &'static str,
    pub author: &'static str,
    pub category: &'static str,
    pub params: Vec<ParamSpec>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParamSpec {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    /// UI hint, e.g. `textarea` for multi-line input.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<&'static str>,
}

impl ParamSpec {
    const fn string(name: &'static str, title: &'static str, description: &'static str) -> Self {
        Self {
            name,
            kind: "string",
            title,
            description,
            format: None,
        }
    }
}

pub fn descriptor() -> PluginDescriptor {
    PluginDescriptor {
        name: "Switch Command Runner",
        version: env!("CARGO_PKG_VERSION"),
        description: "Runs commands on a network switch",
        author: env!("CARGO_PKG_AUTHORS"),
        category: "Utilities",
        params: vec![
            ParamSpec::string("switch_ip", "Switch IP Address", "The IP address of the switch"),
            ParamSpec::string("username", "Username", "The SSH username"),
            ParamSpec::string("password", "Password", "The SSH password"),
            ParamSpec {
                format: Some("textarea"),
                ..ParamSpec::string("commands", "Commands", "The commands to run on the switch")
            },
        ],
    }
}

/// Serialize the descriptor as one JSON line.
pub fn write_descriptor(mut writer: impl Write) -> Result<()> {
    serde_json::to_writer(&mut writer, &descriptor())?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}
