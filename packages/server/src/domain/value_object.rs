//! Value objects for the lobby domain.

use std::fmt;

use serde::Serialize;
use uuid::Uuid;

/// Maximum number of characters kept from a client-supplied display name
pub const MAX_DISPLAY_NAME_CHARS: usize = 16;

/// Maximum number of characters kept from a client-supplied wallet string
pub const MAX_WALLET_CHARS: usize = 64;

/// Wallets longer than this are shortened for display
const SHORT_WALLET_THRESHOLD: usize = 8;

/// Opaque identifier assigned to a session at connect time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Generate a fresh random identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    #[cfg(test)]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Unix timestamp in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// Keep at most `max` characters of `input`
fn truncate_chars(input: &str, max: usize) -> String {
    input.chars().take(max).collect()
}

/// Untrusted display name, truncated to [`MAX_DISPLAY_NAME_CHARS`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayName(String);

impl DisplayName {
    /// Build a display name from raw client input.
    ///
    /// Returns `None` when nothing remains after truncation, so the roster
    /// falls back to the anonymous label.
    pub fn from_untrusted(raw: &str) -> Option<Self> {
        let name = truncate_chars(raw, MAX_DISPLAY_NAME_CHARS);
        if name.is_empty() { None } else { Some(Self(name)) }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Untrusted wallet string, truncated to [`MAX_WALLET_CHARS`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletAddress(String);

impl WalletAddress {
    pub fn from_untrusted(raw: &str) -> Option<Self> {
        let wallet = truncate_chars(raw, MAX_WALLET_CHARS);
        if wallet.is_empty() { None } else { Some(Self(wallet)) }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Display form: first 3 + "…" + last 3 characters when longer than 8
    pub fn shortened(&self) -> String {
        shorten_wallet(&self.0)
    }
}

/// Shorten a wallet string for display in the roster.
pub fn shorten_wallet(wallet: &str) -> String {
    let chars: Vec<char> = wallet.chars().collect();
    if chars.len() <= SHORT_WALLET_THRESHOLD {
        return wallet.to_string();
    }
    let head: String = chars[..3].iter().collect();
    let tail: String = chars[chars.len() - 3..].iter().collect();
    format!("{head}…{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shorten_wallet_long_input() {
        // given:
        let wallet = "abcdefghijklmnop";

        // when:
        let result = shorten_wallet(wallet);

        // then:
        assert_eq!(result, "abc…nop");
    }

    #[test]
    fn test_shorten_wallet_short_input_is_unchanged() {
        assert_eq!(shorten_wallet("short"), "short");
        assert_eq!(shorten_wallet("12345678"), "12345678");
        assert_eq!(shorten_wallet(""), "");
    }

    #[test]
    fn test_shorten_wallet_nine_chars() {
        assert_eq!(shorten_wallet("123456789"), "123…789");
    }

    #[test]
    fn test_display_name_is_truncated_to_limit() {
        // given:
        let raw = "a-very-long-player-name-indeed";

        // when:
        let name = DisplayName::from_untrusted(raw).unwrap();

        // then:
        assert_eq!(name.as_str(), "a-very-long-play");
        assert_eq!(name.as_str().chars().count(), MAX_DISPLAY_NAME_CHARS);
    }

    #[test]
    fn test_display_name_truncation_respects_char_boundaries() {
        // given: multi-byte characters
        let raw = "ぷれいやーぷれいやーぷれいやーぷれいやー";

        // when:
        let name = DisplayName::from_untrusted(raw).unwrap();

        // then:
        assert_eq!(name.as_str().chars().count(), MAX_DISPLAY_NAME_CHARS);
    }

    #[test]
    fn test_empty_display_name_is_none() {
        assert_eq!(DisplayName::from_untrusted(""), None);
    }

    #[test]
    fn test_wallet_is_truncated_to_limit() {
        // given:
        let raw = "x".repeat(100);

        // when:
        let wallet = WalletAddress::from_untrusted(&raw).unwrap();

        // then:
        assert_eq!(wallet.as_str().len(), MAX_WALLET_CHARS);
        assert_eq!(wallet.shortened(), "xxx…xxx");
    }

    #[test]
    fn test_session_ids_are_unique() {
        let a = SessionId::generate();
        let b = SessionId::generate();
        assert_ne!(a, b);
    }
}
