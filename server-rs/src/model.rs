//! The parts of a ModStatistics report the server looks at.
//!
//! Clients send a lot more than this (scene timings, system info, per-assembly
//! hashes). Nothing here is validated: fields are optional and a summary that
//! fails to deserialize is simply not logged.

use std::fmt;

use serde::de::IgnoredAny;
use serde::Deserialize;
use serde_json::Value;

use crate::error::ReportError;

/// Read the reporting client's identifier from a parsed report.
pub fn report_id(report: &Value) -> Result<&str, ReportError> {
    match report.get("id") {
        None => Err(ReportError::MissingField("id")),
        Some(Value::String(id)) => Ok(id),
        Some(_) => Err(ReportError::InvalidField("id")),
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    /// `true` for checkpoint reports recovered after the game died.
    pub crashed: Option<bool>,
    pub statistics_version: Option<u32>,
    pub platform: Option<Platform>,
    pub game_version: Option<GameVersion>,
    assemblies: Option<Vec<IgnoredAny>>,
}

impl ReportSummary {
    /// Best-effort extraction; `None` when the known fields have an unexpected shape.
    pub fn from_report(report: &Value) -> Option<ReportSummary> {
        ReportSummary::deserialize(report).ok()
    }

    pub fn assembly_count(&self) -> Option<usize> {
        self.assemblies.as_ref().map(Vec::len)
    }
}

/// The client serialises its platform enum either by name or by ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    Linux,
    Mac,
    Unknown,
}

impl<'de> Deserialize<'de> for Platform {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        #[allow(dead_code)]
        enum Raw {
            Name(String),
            Ordinal(u64),
            Other(IgnoredAny),
        }

        let platform = match Raw::deserialize(deserializer)? {
            Raw::Name(name) => match name.as_str() {
                "Windows" => Platform::Windows,
                "Linux" => Platform::Linux,
                "Mac" => Platform::Mac,
                _ => Platform::Unknown,
            },
            Raw::Ordinal(0) => Platform::Windows,
            Raw::Ordinal(1) => Platform::Linux,
            Raw::Ordinal(2) => Platform::Mac,
            Raw::Ordinal(_) | Raw::Other(_) => Platform::Unknown,
        };
        Ok(platform)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Platform::Windows => "windows",
            Platform::Linux => "linux",
            Platform::Mac => "mac",
            Platform::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GameVersion {
    pub major: u32,
    pub minor: u32,
    pub revision: u32,
    pub build: Option<u32>,
    #[serde(default)]
    pub is_steam: bool,
    #[serde(default)]
    pub is64: bool,
}

impl fmt::Display for GameVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.revision)
    }
}
