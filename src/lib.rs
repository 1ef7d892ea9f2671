//! Steam Account Identifier Codec
//!
//! This crate implements the 64-bit packed identifier used to name accounts
//! and entities (users, game servers, clan groups, chat rooms, lobbies,
//! content servers) across the Steam universe namespaces. All four semantic
//! fields live in fixed bit ranges of a single u64, so identifiers are cheap
//! to store, transmit, and compare, and decompose back into their fields
//! without lookup tables.
//!
//! ## Quick Start
//!
//! ```rust
//! use steamid::{AccountType, SteamId, Universe};
//!
//! // Construct from fields
//! let user = SteamId::new(1234, Universe::Public, AccountType::Individual);
//! assert!(user.is_valid());
//! assert_eq!(user.render(true), "[U:1:1234]");
//!
//! // Round-trip through the packed wire form
//! let raw: u64 = user.to_u64();
//! assert_eq!(SteamId::from_u64(raw), user);
//!
//! // Parse the legacy text form
//! let parsed = SteamId::from_steam2_string("STEAM_0:1:100", Universe::Public)?;
//! assert_eq!(parsed.account_id(), 201);
//! # Ok::<(), steamid::ParseError>(())
//! ```
//!
//! ## Module Organization
//!
//! - [`bits`] - **Masked bit-field word** (generic get/set over bit ranges)
//! - [`steam_id`] - **Identifier codec** (field layout, validation, predicates)
//! - [`text`] - **Text encodings** (Steam2/Steam3 rendering, Steam2 parsing)

use thiserror::Error;

pub mod bits;
pub mod steam_id;
pub mod text;

pub use bits::BitField;
pub use steam_id::*;
pub use text::{ParseError, ParseResult};

/// Identifier errors
#[derive(Debug, Error)]
pub enum SteamIdError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Unknown account type: {0}")]
    UnknownAccountType(u8),

    #[error("Unknown universe: {0}")]
    UnknownUniverse(u8),
}

/// Result type for identifier operations
pub type Result<T> = std::result::Result<T, SteamIdError>;

/// Top-level namespace partition an identifier belongs to
#[repr(u8)]
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    num_enum::TryFromPrimitive,
    serde::Serialize,
    serde::Deserialize,
)]
pub enum Universe {
    Invalid = 0,
    Public = 1,
    Beta = 2,
    Internal = 3,
    Dev = 4,
    Rc = 5,

    /// Sentinel, one past the last real universe.
    Max = 6,
}

/// Category of entity an identifier names
#[repr(u8)]
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    num_enum::TryFromPrimitive,
    serde::Serialize,
    serde::Deserialize,
)]
pub enum AccountType {
    Invalid = 0,
    /// A single user account.
    Individual = 1,
    /// A multiseat (e.g. cybercafe) host.
    Multiseat = 2,
    /// A persistent game server.
    GameServer = 3,
    /// An anonymous game server.
    AnonGameServer = 4,
    Pending = 5,
    ContentServer = 6,
    Clan = 7,
    /// Chat rooms and lobbies; the instance field becomes a flag bitfield.
    Chat = 8,
    P2PSuperSeeder = 9,
    AnonUser = 10,

    /// Sentinel, one past the last real account type.
    Max = 11,
}
