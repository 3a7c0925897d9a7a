//! Bidirectional mapping between source names and device tokens

use serde::{Deserialize, Serialize};

use crate::error::{Result, StateError};

/// One configured input source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceEntry {
    /// Name shown to the user, e.g. `Net Radio`
    pub name: String,
    /// Token the device uses, e.g. `NET RADIO`
    pub token: String,
}

/// Static, injective mapping between human-facing names and device tokens
///
/// Entries keep their configuration order, which is also the order of
/// [`SourceMapping::names`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<SourceEntry>", into = "Vec<SourceEntry>")]
pub struct SourceMapping {
    entries: Vec<SourceEntry>,
}

impl SourceMapping {
    /// Build a mapping, rejecting duplicate names or tokens
    pub fn new<I, N, T>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (N, T)>,
        N: Into<String>,
        T: Into<String>,
    {
        let mut entries: Vec<SourceEntry> = Vec::new();
        for (name, token) in pairs {
            let entry = SourceEntry {
                name: name.into(),
                token: token.into(),
            };
            if entry.name.is_empty() || entry.token.is_empty() {
                return Err(StateError::EmptySourceEntry);
            }
            if entries.iter().any(|e| e.name == entry.name) {
                return Err(StateError::DuplicateSourceName(entry.name));
            }
            if entries.iter().any(|e| e.token == entry.token) {
                return Err(StateError::DuplicateSourceToken(entry.token));
            }
            entries.push(entry);
        }
        Ok(Self { entries })
    }

    /// Device token for a human-facing name
    pub fn token_for(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.token.as_str())
    }

    /// Human-facing name for a device token
    pub fn name_for(&self, token: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.token == token)
            .map(|e| e.name.as_str())
    }

    /// Configured names in order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for SourceMapping {
    fn default() -> Self {
        Self {
            entries: [
                ("Optical", "OPTICAL"),
                ("CD", "CD"),
                ("Spotify", "Spotify"),
                ("Net Radio", "NET RADIO"),
                ("Server", "SERVER"),
            ]
            .into_iter()
            .map(|(name, token)| SourceEntry {
                name: name.to_string(),
                token: token.to_string(),
            })
            .collect(),
        }
    }
}

impl TryFrom<Vec<SourceEntry>> for SourceMapping {
    type Error = StateError;

    fn try_from(entries: Vec<SourceEntry>) -> Result<Self> {
        Self::new(entries.into_iter().map(|e| (e.name, e.token)))
    }
}

impl From<SourceMapping> for Vec<SourceEntry> {
    fn from(mapping: SourceMapping) -> Self {
        mapping.entries
    }
}

/// Raw source key derived from a device token (spaces become underscores)
pub fn raw_source(token: &str) -> String {
    token.replace(' ', "_")
}
