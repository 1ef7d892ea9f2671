//! Text Encodings
//!
//! Two human-readable renderings of a packed identifier, plus the parser
//! for the legacy form:
//!
//! - Steam2: `STEAM_X:Y:Z`, only meaningful for individual accounts
//! - Steam3: `[T:U:A]` / `[T:U:A:I]`, tag letter dispatched on type
//!
//! Rendering never fails; unmapped account types fall back to a generic
//! tag in Steam3 form and to the plain decimal of the packed word in
//! Steam2 form.

use crate::steam_id::{
    SteamId, ACCOUNT_ID_MASK, CHAT_INSTANCE_FLAG_CLAN, CHAT_INSTANCE_FLAG_LOBBY, DESKTOP_INSTANCE,
};
use crate::{AccountType, Universe};
use std::fmt;
use thiserror::Error;

/// Steam2 text parsing errors
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Empty input")]
    Empty,

    #[error("Input does not match STEAM_X:Y:Z: {input}")]
    Malformed { input: String },

    #[error("Account number out of range: {0}")]
    AccountNumberOutOfRange(u64),
}

/// Result type for text parsing
pub type ParseResult<T> = std::result::Result<T, ParseError>;

impl SteamId {
    /// Render to text. `steam3` picks the modern bracketed form;
    /// otherwise the legacy `STEAM_X:Y:Z` form is used.
    pub fn render(&self, steam3: bool) -> String {
        if steam3 {
            self.render_steam3()
        } else {
            self.render_steam2()
        }
    }

    /// Legacy `STEAM_X:Y:Z` form.
    ///
    /// Only individual (and Invalid-typed) identifiers have a Steam2
    /// rendering. Universes up to Public carry the historical `0` digit;
    /// later universes carry their numeric value. Every other account
    /// type renders as the plain decimal of the packed word.
    pub fn render_steam2(&self) -> String {
        let account_type = self.account_type_raw();
        if account_type != AccountType::Invalid as u8 && account_type != AccountType::Individual as u8
        {
            return self.to_u64().to_string();
        }

        let account_id = self.account_id();
        let universe = self.universe_raw();
        if universe <= Universe::Public as u8 {
            format!("STEAM_0:{}:{}", account_id & 1, account_id >> 1)
        } else {
            format!("STEAM_{}:{}:{}", universe, account_id & 1, account_id >> 1)
        }
    }

    /// Modern `[T:U:A]` form, tag letter dispatched on account type.
    ///
    /// Anonymous game servers and multiseat hosts always carry their
    /// instance; individuals only when it differs from the desktop
    /// default. Chat tags split on the instance flag bits.
    pub fn render_steam3(&self) -> String {
        let instance = self.instance();

        let (tag, with_instance) = match AccountType::try_from(self.account_type_raw()) {
            Ok(AccountType::AnonGameServer) => ('A', true),
            Ok(AccountType::GameServer) => ('G', false),
            Ok(AccountType::Multiseat) => ('M', true),
            Ok(AccountType::Pending) => ('P', false),
            Ok(AccountType::ContentServer) => ('C', false),
            Ok(AccountType::Clan) => ('g', false),
            Ok(AccountType::Chat) => {
                let tag = if instance & CHAT_INSTANCE_FLAG_CLAN != 0 {
                    'c'
                } else if instance & CHAT_INSTANCE_FLAG_LOBBY != 0 {
                    'L'
                } else {
                    'T'
                };
                (tag, false)
            }
            Ok(AccountType::Invalid) => ('I', false),
            Ok(AccountType::Individual) => ('U', instance != DESKTOP_INSTANCE),
            Ok(AccountType::AnonUser) => ('a', false),
            // P2P seeders, the Max sentinel, and unmapped discriminants
            // share the generic tag.
            _ => ('i', false),
        };

        if with_instance {
            format!(
                "[{}:{}:{}:{}]",
                tag,
                self.universe_raw(),
                self.account_id(),
                instance
            )
        } else {
            format!("[{}:{}:{}]", tag, self.universe_raw(), self.account_id())
        }
    }

    /// Parse the legacy `STEAM_X:Y:Z` form.
    ///
    /// The universe digit embedded in the text is matched against the
    /// pattern but discarded; the identifier takes its universe from the
    /// caller. The auth bit folds into the account id as
    /// `(number << 1) | auth`, the type is Individual, and the instance
    /// is the desktop default. Failure leaves nothing half-built.
    pub fn from_steam2_string(input: &str, universe: Universe) -> ParseResult<Self> {
        if input.is_empty() {
            return Err(ParseError::Empty);
        }

        let Some((auth_bit, account_number)) = split_steam2(input) else {
            tracing::trace!(input, "rejected steam2 text");
            return Err(ParseError::Malformed {
                input: input.to_string(),
            });
        };

        if account_number > ACCOUNT_ID_MASK >> 1 {
            return Err(ParseError::AccountNumberOutOfRange(account_number));
        }
        let account_id = ((account_number << 1) | auth_bit) as u32;

        Ok(Self::with_instance(
            account_id,
            DESKTOP_INSTANCE,
            universe,
            AccountType::Individual,
        ))
    }
}

/// Split `STEAM_X:Y:Z` into auth bit and account number.
///
/// The prefix is case-insensitive. The embedded universe digit is
/// validated against 0-5 and then dropped.
fn split_steam2(input: &str) -> Option<(u64, u64)> {
    let prefix = input.get(..6)?;
    if !prefix.eq_ignore_ascii_case("STEAM_") {
        return None;
    }

    let mut parts = input[6..].splitn(3, ':');
    let universe_digit = parts.next()?;
    if !matches!(universe_digit, "0" | "1" | "2" | "3" | "4" | "5") {
        return None;
    }

    let auth_bit = match parts.next()? {
        "0" => 0u64,
        "1" => 1,
        _ => return None,
    };

    let number_part = parts.next()?;
    if number_part.is_empty() || !number_part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let account_number = number_part.parse().ok()?;
    Some((auth_bit, account_number))
}

impl fmt::Display for SteamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_steam3())
    }
}
