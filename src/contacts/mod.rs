//! Contact directory loading and identifier resolution
//!
//! The directory is an external collaborator: it is loaded read-only from YAML once per
//! invocation and only consumed here. Resolution turns a human-supplied name or nickname
//! into the canonical address the message store is keyed by.

pub mod loader;
pub mod resolver;

pub use loader::load_directory;
pub use resolver::{
    DEFAULT_PLATFORM, Resolution, ResolutionSource, is_address_like, resolve_contact,
    resolve_for_platform,
};
