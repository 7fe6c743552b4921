use std::collections::BTreeMap;

use serde::Deserialize;

/// Addresses a contact uses on one messaging platform
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PlatformAddresses {
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl PlatformAddresses {
    /// Preferred address for the platform: phone first, then email
    pub fn preferred(&self) -> Option<&str> {
        self.phone
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .or_else(|| self.email.as_deref().filter(|e| !e.trim().is_empty()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DirectoryEntry {
    pub name: String,
    #[serde(default)]
    pub nicknames: Vec<String>,
    #[serde(default)]
    pub platforms: BTreeMap<String, PlatformAddresses>,
}

impl DirectoryEntry {
    /// Preferred address of this contact on `platform`, if any
    pub fn address_for(&self, platform: &str) -> Option<&str> {
        self.platforms.get(platform).and_then(PlatformAddresses::preferred)
    }
}

/// Ordered, read-only contact directory
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Directory {
    #[serde(default)]
    pub contacts: Vec<DirectoryEntry>,
}

impl Directory {
    pub fn new(contacts: Vec<DirectoryEntry>) -> Self {
        Self { contacts }
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DirectoryEntry> {
        self.contacts.iter()
    }
}
