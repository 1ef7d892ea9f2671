//! Packed Account Identifier
//!
//! Maps the four semantic fields (account id, instance, type, universe)
//! onto fixed bit ranges of a single u64:
//!
//! ```text
//! ┌─────────────┬─────────────┬────────────────┬────────────────┐
//! │ universe    │ type        │ instance       │ account id     │
//! │ bits 56-63  │ bits 52-55  │ bits 32-51     │ bits 0-31      │
//! └─────────────┴─────────────┴────────────────┴────────────────┘
//! ```
//!
//! The layout is a wire contract: the packed u64 is exchanged with
//! external systems and must match bit-for-bit. Bits 60-63 are unused in
//! practice but belong to the universe field's full-byte mask.

use crate::bits::BitField;
use crate::{AccountType, SteamIdError, Universe};
use zerocopy::{AsBytes, FromBytes, FromZeroes};

/// Account id field: 32 bits at offset 0.
pub const ACCOUNT_ID_OFFSET: u32 = 0;
pub const ACCOUNT_ID_MASK: u64 = 0xFFFF_FFFF;

/// Instance field: 20 bits at offset 32.
pub const INSTANCE_OFFSET: u32 = 32;
pub const INSTANCE_MASK: u64 = 0xF_FFFF;

/// Account type field: 4 bits at offset 52.
pub const ACCOUNT_TYPE_OFFSET: u32 = 52;
pub const ACCOUNT_TYPE_MASK: u64 = 0xF;

/// Universe field: 8 bits at offset 56.
pub const UNIVERSE_OFFSET: u32 = 56;
pub const UNIVERSE_MASK: u64 = 0xFF;

/// Desktop session instance.
pub const DESKTOP_INSTANCE: u32 = 1;
/// Console session instance.
pub const CONSOLE_INSTANCE: u32 = 2;
/// Web session instance.
pub const WEB_INSTANCE: u32 = 4;

/// Chat identifiers repurpose the instance field as a flag bitfield.
/// The flags occupy the top bits of the 20-bit instance range.
pub const CHAT_INSTANCE_FLAG_CLAN: u32 = ((INSTANCE_MASK + 1) >> 1) as u32;
pub const CHAT_INSTANCE_FLAG_LOBBY: u32 = ((INSTANCE_MASK + 1) >> 2) as u32;
pub const CHAT_INSTANCE_FLAG_MMS_LOBBY: u32 = ((INSTANCE_MASK + 1) >> 3) as u32;

/// A packed 64-bit Steam account identifier.
///
/// Equality, ordering, and hashing are defined solely on the packed
/// word: two identifiers are equal iff their u64 forms are equal. Field
/// setters are unchecked; [`SteamId::is_valid`] is an advisory check
/// probed on demand, never an enforced precondition.
#[repr(transparent)]
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    AsBytes,
    FromBytes,
    FromZeroes,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(transparent)]
pub struct SteamId(BitField);

impl SteamId {
    /// The all-zero identifier: anonymous account id, Invalid type and
    /// universe, instance 0.
    pub const INVALID: Self = Self(BitField::new());

    /// Create an identifier from fields, defaulting the instance: clans
    /// carry no instance, everything else starts as a desktop session.
    pub fn new(account_id: u32, universe: Universe, account_type: AccountType) -> Self {
        let instance = if account_type == AccountType::Clan {
            0
        } else {
            DESKTOP_INSTANCE
        };
        Self::with_instance(account_id, instance, universe, account_type)
    }

    /// Create an identifier with every field explicit.
    pub fn with_instance(
        account_id: u32,
        instance: u32,
        universe: Universe,
        account_type: AccountType,
    ) -> Self {
        let mut id = Self::INVALID;
        id.set_account_id(account_id);
        id.set_instance(instance);
        id.set_universe(universe);
        id.set_account_type(account_type);
        id
    }

    /// Wrap a raw 64-bit value verbatim. No validation is performed.
    pub const fn from_u64(raw: u64) -> Self {
        Self(BitField::from_raw(raw))
    }

    /// The packed 64-bit wire value.
    pub const fn to_u64(self) -> u64 {
        self.0.raw()
    }

    /// Replace the entire packed word. No validation is performed.
    pub fn set_from_u64(&mut self, raw: u64) {
        self.0 = BitField::from_raw(raw);
    }

    /// Universe-scoped account number. 0 is unset/anonymous.
    pub fn account_id(self) -> u32 {
        self.0.get(ACCOUNT_ID_OFFSET, ACCOUNT_ID_MASK) as u32
    }

    pub fn set_account_id(&mut self, account_id: u32) {
        self.0
            .set(ACCOUNT_ID_OFFSET, ACCOUNT_ID_MASK, account_id as u64);
    }

    /// Session/sub-entity disambiguator; a flag bitfield for chat ids.
    pub fn instance(self) -> u32 {
        self.0.get(INSTANCE_OFFSET, INSTANCE_MASK) as u32
    }

    pub fn set_instance(&mut self, instance: u32) {
        self.0.set(INSTANCE_OFFSET, INSTANCE_MASK, instance as u64);
    }

    /// Raw account type bits. Total, even for discriminants no
    /// [`AccountType`] variant maps.
    pub fn account_type_raw(self) -> u8 {
        self.0.get(ACCOUNT_TYPE_OFFSET, ACCOUNT_TYPE_MASK) as u8
    }

    /// The account type, if the stored bits map a known variant.
    pub fn account_type(self) -> crate::Result<AccountType> {
        AccountType::try_from(self.account_type_raw())
            .map_err(|_| SteamIdError::UnknownAccountType(self.account_type_raw()))
    }

    pub fn set_account_type(&mut self, account_type: AccountType) {
        self.0
            .set(ACCOUNT_TYPE_OFFSET, ACCOUNT_TYPE_MASK, account_type as u64);
    }

    /// Raw universe bits. Total, even for discriminants no [`Universe`]
    /// variant maps.
    pub fn universe_raw(self) -> u8 {
        self.0.get(UNIVERSE_OFFSET, UNIVERSE_MASK) as u8
    }

    /// The universe, if the stored bits map a known variant.
    pub fn universe(self) -> crate::Result<Universe> {
        Universe::try_from(self.universe_raw())
            .map_err(|_| SteamIdError::UnknownUniverse(self.universe_raw()))
    }

    pub fn set_universe(&mut self, universe: Universe) {
        self.0.set(UNIVERSE_OFFSET, UNIVERSE_MASK, universe as u64);
    }

    /// Coarse 64-bit key grouping an account across differing instances.
    ///
    /// Recomputed from universe, type, and account id only. The instance
    /// bits never enter the key, so a desktop session and a web session
    /// of the same account collide on purpose.
    pub fn static_account_key(self) -> u64 {
        ((self.universe_raw() as u64) << UNIVERSE_OFFSET)
            + ((self.account_type_raw() as u64) << ACCOUNT_TYPE_OFFSET)
            + self.account_id() as u64
    }

    /// Advisory structural validity check.
    ///
    /// Type and universe must lie strictly between their Invalid and Max
    /// sentinels; individual accounts need a nonzero id and an instance
    /// no higher than Web; clans need a nonzero id and no instance;
    /// persistent game servers need a nonzero id.
    pub fn is_valid(self) -> bool {
        let account_type = self.account_type_raw();
        if account_type <= AccountType::Invalid as u8 || account_type >= AccountType::Max as u8 {
            return false;
        }

        let universe = self.universe_raw();
        if universe <= Universe::Invalid as u8 || universe >= Universe::Max as u8 {
            return false;
        }

        if account_type == AccountType::Individual as u8
            && (self.account_id() == 0 || self.instance() > WEB_INSTANCE)
        {
            return false;
        }

        if account_type == AccountType::Clan as u8
            && (self.account_id() == 0 || self.instance() != 0)
        {
            return false;
        }

        if account_type == AccountType::GameServer as u8 && self.account_id() == 0 {
            return false;
        }

        true
    }

    fn is_type(self, account_type: AccountType) -> bool {
        self.account_type_raw() == account_type as u8
    }

    pub fn is_individual_account(self) -> bool {
        self.is_type(AccountType::Individual)
    }

    pub fn is_clan_account(self) -> bool {
        self.is_type(AccountType::Clan)
    }

    /// Persistent or anonymous game server.
    pub fn is_game_server_account(self) -> bool {
        self.is_type(AccountType::GameServer) || self.is_type(AccountType::AnonGameServer)
    }

    pub fn is_persistent_game_server_account(self) -> bool {
        self.is_type(AccountType::GameServer)
    }

    pub fn is_anon_game_server_account(self) -> bool {
        self.is_type(AccountType::AnonGameServer)
    }

    /// Anonymous user or anonymous game server.
    pub fn is_anon_account(self) -> bool {
        self.is_type(AccountType::AnonUser) || self.is_type(AccountType::AnonGameServer)
    }

    pub fn is_anon_user_account(self) -> bool {
        self.is_type(AccountType::AnonUser)
    }

    /// An anonymous account that has not yet been allocated an id or
    /// instance.
    pub fn is_blank_anon_account(self) -> bool {
        self.account_id() == 0 && self.is_anon_account() && self.instance() == 0
    }

    pub fn is_content_server_account(self) -> bool {
        self.is_type(AccountType::ContentServer)
    }

    pub fn is_chat_account(self) -> bool {
        self.is_type(AccountType::Chat)
    }

    /// A chat identifier with the lobby flag set in its instance field.
    pub fn is_lobby(self) -> bool {
        self.is_type(AccountType::Chat) && self.instance() & CHAT_INSTANCE_FLAG_LOBBY != 0
    }

    /// An individual account logged in through a console.
    pub fn is_console_user_account(self) -> bool {
        self.is_type(AccountType::Individual) && self.instance() == CONSOLE_INSTANCE
    }
}

impl From<u64> for SteamId {
    fn from(raw: u64) -> Self {
        Self::from_u64(raw)
    }
}

impl From<SteamId> for u64 {
    fn from(id: SteamId) -> u64 {
        id.to_u64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_round_trip() {
        let cases = [
            (1u32, DESKTOP_INSTANCE, Universe::Public, AccountType::Individual),
            (46_143_802, WEB_INSTANCE, Universe::Beta, AccountType::Individual),
            (5, 0, Universe::Internal, AccountType::GameServer),
            (10, 0, Universe::Public, AccountType::Clan),
            (u32::MAX, 0xF_FFFF, Universe::Rc, AccountType::AnonGameServer),
            (0, 0, Universe::Dev, AccountType::AnonUser),
        ];

        for (account_id, instance, universe, account_type) in cases {
            let id = SteamId::with_instance(account_id, instance, universe, account_type);
            assert_eq!(id.account_id(), account_id);
            assert_eq!(id.instance(), instance);
            assert_eq!(id.universe().unwrap(), universe);
            assert_eq!(id.account_type().unwrap(), account_type);

            // And again after a trip through the wire form.
            let rewrapped = SteamId::from_u64(id.to_u64());
            assert_eq!(rewrapped.account_id(), account_id);
            assert_eq!(rewrapped.instance(), instance);
            assert_eq!(rewrapped.universe().unwrap(), universe);
            assert_eq!(rewrapped.account_type().unwrap(), account_type);
        }
    }

    #[test]
    fn test_raw_round_trip_is_exact() {
        for raw in [0u64, 1, 0x0110_0001_0000_04D2, u64::MAX, 0xF3FF_FFFF_FFFF_FFFF] {
            assert_eq!(SteamId::from_u64(raw).to_u64(), raw);
        }
    }

    #[test]
    fn test_new_defaults_instance() {
        let user = SteamId::new(42, Universe::Public, AccountType::Individual);
        assert_eq!(user.instance(), DESKTOP_INSTANCE);

        let clan = SteamId::new(42, Universe::Public, AccountType::Clan);
        assert_eq!(clan.instance(), 0);

        let server = SteamId::new(42, Universe::Public, AccountType::GameServer);
        assert_eq!(server.instance(), DESKTOP_INSTANCE);
    }

    #[test]
    fn test_setters_touch_only_their_field() {
        let mut id = SteamId::with_instance(7, WEB_INSTANCE, Universe::Public, AccountType::Individual);
        id.set_account_id(u32::MAX);
        assert_eq!(id.instance(), WEB_INSTANCE);
        assert_eq!(id.universe().unwrap(), Universe::Public);
        assert_eq!(id.account_type().unwrap(), AccountType::Individual);

        id.set_instance(0);
        assert_eq!(id.account_id(), u32::MAX);
        assert_eq!(id.account_type().unwrap(), AccountType::Individual);
    }

    #[test]
    fn test_static_account_key_ignores_instance() {
        let desktop =
            SteamId::with_instance(1234, DESKTOP_INSTANCE, Universe::Public, AccountType::Individual);
        let web = SteamId::with_instance(1234, WEB_INSTANCE, Universe::Public, AccountType::Individual);
        let bare = SteamId::with_instance(1234, 0, Universe::Public, AccountType::Individual);

        assert_ne!(desktop.to_u64(), web.to_u64());
        assert_eq!(desktop.static_account_key(), web.static_account_key());
        assert_eq!(desktop.static_account_key(), bare.static_account_key());

        // Universe, type, and account id all still matter.
        let other_universe =
            SteamId::with_instance(1234, DESKTOP_INSTANCE, Universe::Beta, AccountType::Individual);
        assert_ne!(desktop.static_account_key(), other_universe.static_account_key());
        let other_account =
            SteamId::with_instance(1235, DESKTOP_INSTANCE, Universe::Public, AccountType::Individual);
        assert_ne!(desktop.static_account_key(), other_account.static_account_key());
    }

    #[test]
    fn test_static_account_key_layout() {
        let id = SteamId::with_instance(0x4D2, WEB_INSTANCE, Universe::Public, AccountType::Individual);
        let expected = (1u64 << 56) + (1u64 << 52) + 0x4D2;
        assert_eq!(id.static_account_key(), expected);
    }

    #[test]
    fn test_validity_rules() {
        assert!(SteamId::new(1, Universe::Public, AccountType::Individual).is_valid());
        assert!(SteamId::new(10, Universe::Public, AccountType::Clan).is_valid());
        assert!(SteamId::new(5, Universe::Beta, AccountType::GameServer).is_valid());

        // Individual with a zero account id.
        assert!(!SteamId::new(0, Universe::Public, AccountType::Individual).is_valid());
        // Individual with an instance past Web.
        assert!(!SteamId::with_instance(1, WEB_INSTANCE + 1, Universe::Public, AccountType::Individual)
            .is_valid());
        // Clan with an instance.
        assert!(!SteamId::with_instance(10, 1, Universe::Public, AccountType::Clan).is_valid());
        // Clan with a zero account id.
        assert!(!SteamId::new(0, Universe::Public, AccountType::Clan).is_valid());
        // Persistent game server with a zero account id.
        assert!(!SteamId::new(0, Universe::Public, AccountType::GameServer).is_valid());
        // Invalid universe / type.
        assert!(!SteamId::new(1, Universe::Invalid, AccountType::Individual).is_valid());
        assert!(!SteamId::new(1, Universe::Max, AccountType::Individual).is_valid());
        assert!(!SteamId::new(1, Universe::Public, AccountType::Invalid).is_valid());
        assert!(!SteamId::new(1, Universe::Public, AccountType::Max).is_valid());

        // Anonymous game server with a zero id is structurally fine.
        assert!(SteamId::new(0, Universe::Public, AccountType::AnonGameServer).is_valid());
    }

    #[test]
    fn test_validity_of_unmapped_discriminants() {
        // Type nibble 0xD maps no variant; the id is invalid but every
        // accessor stays total on the raw view.
        let mut id = SteamId::new(1, Universe::Public, AccountType::Individual);
        let raw =
            (id.to_u64() & !(ACCOUNT_TYPE_MASK << ACCOUNT_TYPE_OFFSET)) | (0xD << ACCOUNT_TYPE_OFFSET);
        id.set_from_u64(raw);

        assert_eq!(id.account_type_raw(), 0xD);
        assert!(id.account_type().is_err());
        assert!(!id.is_valid());
    }

    #[test]
    fn test_predicates() {
        let user = SteamId::new(1, Universe::Public, AccountType::Individual);
        assert!(user.is_individual_account());
        assert!(!user.is_clan_account());
        assert!(!user.is_console_user_account());

        let console =
            SteamId::with_instance(1, CONSOLE_INSTANCE, Universe::Public, AccountType::Individual);
        assert!(console.is_console_user_account());

        let clan = SteamId::new(10, Universe::Public, AccountType::Clan);
        assert!(clan.is_clan_account());
        assert!(!clan.is_game_server_account());

        let gs = SteamId::new(5, Universe::Public, AccountType::GameServer);
        assert!(gs.is_game_server_account());
        assert!(gs.is_persistent_game_server_account());
        assert!(!gs.is_anon_game_server_account());
        assert!(!gs.is_anon_account());

        let anon_gs = SteamId::new(5, Universe::Public, AccountType::AnonGameServer);
        assert!(anon_gs.is_game_server_account());
        assert!(!anon_gs.is_persistent_game_server_account());
        assert!(anon_gs.is_anon_game_server_account());
        assert!(anon_gs.is_anon_account());

        let anon_user = SteamId::new(0, Universe::Public, AccountType::AnonUser);
        assert!(anon_user.is_anon_user_account());
        assert!(anon_user.is_anon_account());
        assert!(!anon_user.is_blank_anon_account()); // desktop instance set

        let blank = SteamId::with_instance(0, 0, Universe::Public, AccountType::AnonUser);
        assert!(blank.is_blank_anon_account());

        let cs = SteamId::new(3, Universe::Public, AccountType::ContentServer);
        assert!(cs.is_content_server_account());

        let chat = SteamId::with_instance(8, 0, Universe::Public, AccountType::Chat);
        assert!(chat.is_chat_account());
        assert!(!chat.is_lobby());

        let lobby = SteamId::with_instance(
            8,
            CHAT_INSTANCE_FLAG_LOBBY,
            Universe::Public,
            AccountType::Chat,
        );
        assert!(lobby.is_lobby());

        // Lobby flag without the chat type is not a lobby.
        let not_chat = SteamId::with_instance(
            8,
            CHAT_INSTANCE_FLAG_LOBBY,
            Universe::Public,
            AccountType::Individual,
        );
        assert!(!not_chat.is_lobby());
    }

    #[test]
    fn test_chat_instance_flags() {
        assert_eq!(CHAT_INSTANCE_FLAG_CLAN, 0x80000);
        assert_eq!(CHAT_INSTANCE_FLAG_LOBBY, 0x40000);
        assert_eq!(CHAT_INSTANCE_FLAG_MMS_LOBBY, 0x20000);
        // All flags fit the 20-bit instance field.
        assert_eq!(
            (CHAT_INSTANCE_FLAG_CLAN | CHAT_INSTANCE_FLAG_LOBBY | CHAT_INSTANCE_FLAG_MMS_LOBBY)
                as u64
                & !INSTANCE_MASK,
            0
        );
    }

    #[test]
    fn test_equality_tracks_raw_value() {
        let a = SteamId::new(77, Universe::Public, AccountType::Individual);
        let b = SteamId::new(77, Universe::Public, AccountType::Individual);
        assert_eq!(a, b);
        assert_eq!(a.to_u64(), b.to_u64());

        let mut c = b;
        c.set_instance(WEB_INSTANCE);
        assert_ne!(a, c);
    }

    #[test]
    fn test_conversions() {
        let id = SteamId::new(1234, Universe::Public, AccountType::Individual);
        let raw: u64 = id.into();
        let back: SteamId = raw.into();
        assert_eq!(back, id);

        assert_eq!(SteamId::default(), SteamId::INVALID);
        assert_eq!(SteamId::INVALID.to_u64(), 0);
    }

    #[test]
    fn test_wire_layout() {
        assert_eq!(std::mem::size_of::<SteamId>(), 8);

        let id = SteamId::from_u64(0x0110_0001_0000_04D2);
        assert_eq!(id.as_bytes(), 0x0110_0001_0000_04D2u64.to_ne_bytes().as_slice());
    }
}
