use crate::models::{ConversationAddress, Directory, DirectoryEntry};

/// Platform whose addresses key the Messages store
pub const DEFAULT_PLATFORM: &str = "imessage";

/// Which rule produced a [`Resolution`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionSource {
    /// The input already looked like a phone number or email address
    PassThrough,
    /// Matched a contact's primary name
    ExactName,
    /// Matched one of a contact's nicknames
    Nickname,
    /// Nothing matched; the raw input is used as the address
    Unresolved,
}

/// Display name and address to query for a user-supplied identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub display_name: String,
    pub address: String,
    pub source: ResolutionSource,
}

impl Resolution {
    fn unchanged(input: &str, source: ResolutionSource) -> Self {
        Self { display_name: input.to_string(), address: input.to_string(), source }
    }

    fn from_entry(entry: &DirectoryEntry, address: &str, source: ResolutionSource) -> Self {
        Self { display_name: entry.name.clone(), address: address.to_string(), source }
    }

    /// The address in canonical form, if it is one
    pub fn canonical(&self) -> Option<ConversationAddress> {
        ConversationAddress::parse(&self.address)
    }
}

/// Inputs starting with `+` or containing `@` are taken as addresses already
pub fn is_address_like(input: &str) -> bool {
    input.starts_with('+') || input.contains('@')
}

/// Resolve a name, nickname or address against the directory for iMessage
///
/// See [`resolve_for_platform`].
pub fn resolve_contact(input: &str, directory: &Directory) -> Resolution {
    resolve_for_platform(input, directory, DEFAULT_PLATFORM)
}

/// Resolve `input` to the address a contact uses on `platform`
///
/// Rules, in order:
/// 1. Address-like input is returned unchanged
/// 2. Case-insensitive match on primary names, across every entry
/// 3. Case-insensitive match on nicknames, across every entry
/// 4. Otherwise the raw input, so the caller can still try it
///
/// A primary-name match always beats a nickname match, wherever the entries sit in the
/// directory. Entries without an address for `platform` are skipped. Phone numbers are
/// preferred over email addresses.
///
/// # Examples
///
/// ```
/// use message_history_explorer::contacts::{ResolutionSource, resolve_contact};
/// use message_history_explorer::models::Directory;
///
/// let resolution = resolve_contact("+14155550123", &Directory::default());
/// assert_eq!(resolution.address, "+14155550123");
/// assert_eq!(resolution.source, ResolutionSource::PassThrough);
/// ```
pub fn resolve_for_platform(input: &str, directory: &Directory, platform: &str) -> Resolution {
    if is_address_like(input) {
        return Resolution::unchanged(input, ResolutionSource::PassThrough);
    }

    let wanted = input.to_lowercase();

    let by_name = directory
        .iter()
        .filter(|entry| entry.name.to_lowercase() == wanted)
        .find_map(|entry| entry.address_for(platform).map(|address| (entry, address)));
    if let Some((entry, address)) = by_name {
        return Resolution::from_entry(entry, address, ResolutionSource::ExactName);
    }

    let by_nickname = directory
        .iter()
        .filter(|entry| entry.nicknames.iter().any(|nick| nick.to_lowercase() == wanted))
        .find_map(|entry| entry.address_for(platform).map(|address| (entry, address)));
    if let Some((entry, address)) = by_nickname {
        return Resolution::from_entry(entry, address, ResolutionSource::Nickname);
    }

    Resolution::unchanged(input, ResolutionSource::Unresolved)
}
