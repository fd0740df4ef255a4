use core::fmt;

/// EUI-64 (8 bytes, MSB first)
pub type EUI64 = [u8; 8];
/// AES-128 key (16 bytes)
pub type AESKey = [u8; 16];

/// Error returned when an EUI or key literal cannot be parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// A character that is neither a hex digit nor an accepted separator
    #[error("invalid character at offset {0}")]
    InvalidDigit(usize),
    /// Wrong number of hex digits in a single literal
    #[error("expected {expected} hex digits, found {found}")]
    Length {
        /// Digits required for the value
        expected: usize,
        /// Digits present in the input
        found: usize,
    },
    /// Wrong number of entries in a byte list
    #[error("expected {expected} bytes, found {found}")]
    Entries {
        /// Bytes required for the value
        expected: usize,
        /// Entries present in the input
        found: usize,
    },
}

/// LoRaWAN revision implied by the root keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LoRaWanVersion {
    /// 1.0.x: a single root key, NwkKey mirrors AppKey
    V1_0,
    /// 1.1: separate network and application root keys
    V1_1,
}

/// OTAA root credentials of the end device
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Credentials {
    /// JoinEUI (formerly AppEUI)
    pub join_eui: u64,
    /// DevEUI
    pub dev_eui: u64,
    /// Application root key
    pub app_key: AESKey,
    /// Network root key
    pub nwk_key: AESKey,
}

impl Credentials {
    /// Credentials for a LoRaWAN 1.0.x device, where NwkKey equals AppKey
    pub const fn new_v1_0(join_eui: u64, dev_eui: u64, app_key: AESKey) -> Self {
        Self {
            join_eui,
            dev_eui,
            app_key,
            nwk_key: app_key,
        }
    }

    /// Credentials with distinct root keys
    pub const fn new(join_eui: u64, dev_eui: u64, app_key: AESKey, nwk_key: AESKey) -> Self {
        Self {
            join_eui,
            dev_eui,
            app_key,
            nwk_key,
        }
    }

    /// Apply the `LORAWAN_*` environment overrides captured at build time.
    ///
    /// Unset variables keep the current value. When `LORAWAN_NWK_KEY` is not
    /// set, NwkKey follows the resolved AppKey.
    ///
    /// # Panics
    /// During const evaluation if an override is malformed, which fails the build.
    pub const fn with_build_overrides(self) -> Self {
        let join_eui = match option_env!("LORAWAN_JOIN_EUI") {
            Some(s) => expect_eui(s),
            None => self.join_eui,
        };
        let dev_eui = match option_env!("LORAWAN_DEV_EUI") {
            Some(s) => expect_eui(s),
            None => self.dev_eui,
        };
        let app_key = match option_env!("LORAWAN_APP_KEY") {
            Some(s) => expect_key(s),
            None => self.app_key,
        };
        let nwk_key = match option_env!("LORAWAN_NWK_KEY") {
            Some(s) => expect_key(s),
            None => app_key,
        };
        Self {
            join_eui,
            dev_eui,
            app_key,
            nwk_key,
        }
    }

    /// JoinEUI as bytes, MSB first
    pub const fn join_eui_bytes(&self) -> EUI64 {
        self.join_eui.to_be_bytes()
    }

    /// DevEUI as bytes, MSB first
    pub const fn dev_eui_bytes(&self) -> EUI64 {
        self.dev_eui.to_be_bytes()
    }

    /// Revision implied by the root keys
    pub fn version(&self) -> LoRaWanVersion {
        if self.nwk_key == self.app_key {
            LoRaWanVersion::V1_0
        } else {
            LoRaWanVersion::V1_1
        }
    }
}

// Root keys never end up in logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("join_eui", &format_args!("{:016X}", self.join_eui))
            .field("dev_eui", &format_args!("{:016X}", self.dev_eui))
            .field("app_key", &"<redacted>")
            .field("nwk_key", &"<redacted>")
            .finish()
    }
}

/// Parse a 64-bit EUI.
///
/// Accepts `16ED77AD6ABFE51D`, `0x16ED77AD6ABFE51D`, the C literal form
/// `0x16ED77AD6ABFE51DULL`, and byte lists such as `16:ED:77:AD:6A:BF:E5:1D`
/// or `0x16,0xED,...` (see [`parse_key`]).
pub const fn parse_eui(s: &str) -> Result<u64, ParseError> {
    let bytes = strip_ull_suffix(s.as_bytes());
    match parse_hex::<8>(bytes) {
        Ok(bytes) => Ok(u64::from_be_bytes(bytes)),
        Err(e) => Err(e),
    }
}

/// Parse a 128-bit root key, MSB first.
///
/// Either 32 hex digits with an optional leading `0x`, or exactly 16 entries
/// separated by `,` `:` or `-`. Each entry is one or two hex digits with an
/// optional leading `0x` and may be padded with spaces, so the C initializer
/// `0x55,0x26,0x0C,0xF5, 0xE9,...` is taken as is.
pub const fn parse_key(s: &str) -> Result<AESKey, ParseError> {
    parse_hex::<16>(s.as_bytes())
}

const fn expect_eui(s: &str) -> u64 {
    match parse_eui(s) {
        Ok(v) => v,
        Err(_) => panic!("malformed EUI in LORAWAN_* build override"),
    }
}

const fn expect_key(s: &str) -> AESKey {
    match parse_key(s) {
        Ok(v) => v,
        Err(_) => panic!("malformed key in LORAWAN_* build override"),
    }
}

const fn hex_value(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

const fn is_separator(c: u8) -> bool {
    matches!(c, b',' | b':' | b'-')
}

const fn has_prefix(bytes: &[u8], at: usize) -> bool {
    at + 1 < bytes.len() && bytes[at] == b'0' && (bytes[at + 1] == b'x' || bytes[at + 1] == b'X')
}

/// Drop a trailing `ULL` (any case) left over from a C `uint64_t` literal.
const fn strip_ull_suffix(bytes: &[u8]) -> &[u8] {
    let mut end = bytes.len();
    while end > 0 && bytes[end - 1] == b' ' {
        end -= 1;
    }
    if end >= 3
        && (bytes[end - 3] == b'u' || bytes[end - 3] == b'U')
        && (bytes[end - 2] == b'l' || bytes[end - 2] == b'L')
        && (bytes[end - 1] == b'l' || bytes[end - 1] == b'L')
    {
        end -= 3;
    }
    bytes.split_at(end).0
}

/// Decode `bytes` into `N` bytes, either as a single hex literal or as a list
/// of `N` separated entries.
const fn parse_hex<const N: usize>(bytes: &[u8]) -> Result<[u8; N], ParseError> {
    let mut i = 0;
    while i < bytes.len() {
        if is_separator(bytes[i]) {
            return parse_list::<N>(bytes);
        }
        i += 1;
    }
    parse_literal::<N>(bytes)
}

/// `[0x]<2N hex digits>`, surrounding spaces allowed
const fn parse_literal<const N: usize>(bytes: &[u8]) -> Result<[u8; N], ParseError> {
    let mut start = 0;
    let mut end = bytes.len();
    while start < end && bytes[start] == b' ' {
        start += 1;
    }
    while end > start && bytes[end - 1] == b' ' {
        end -= 1;
    }
    if has_prefix(bytes, start) {
        start += 2;
    }

    let digits = bytes.split_at(end).0.split_at(start).1;
    if digits.len() != N * 2 {
        return Err(ParseError::Length {
            expected: N * 2,
            found: digits.len(),
        });
    }
    match const_hex::const_decode_to_array::<N>(digits) {
        Ok(out) => Ok(out),
        Err(const_hex::FromHexError::InvalidHexCharacter { index, .. }) => {
            Err(ParseError::InvalidDigit(start + index))
        }
        Err(_) => Err(ParseError::Length {
            expected: N * 2,
            found: digits.len(),
        }),
    }
}

/// `[0x]h[h]` entries separated by `,` `:` or `-`
const fn parse_list<const N: usize>(bytes: &[u8]) -> Result<[u8; N], ParseError> {
    let mut out = [0u8; N];
    let mut entries = 0;
    let mut i = 0;
    loop {
        while i < bytes.len() && bytes[i] == b' ' {
            i += 1;
        }
        if has_prefix(bytes, i) {
            i += 2;
        }

        let mut value = 0u8;
        let mut digits = 0;
        while i < bytes.len() && digits < 2 {
            match hex_value(bytes[i]) {
                Some(v) => {
                    value = (value << 4) | v;
                    digits += 1;
                    i += 1;
                }
                None => break,
            }
        }
        if digits == 0 {
            return Err(ParseError::InvalidDigit(i));
        }
        if entries < N {
            out[entries] = value;
        }
        entries += 1;

        while i < bytes.len() && bytes[i] == b' ' {
            i += 1;
        }
        if i == bytes.len() {
            break;
        }
        if !is_separator(bytes[i]) {
            return Err(ParseError::InvalidDigit(i));
        }
        i += 1;
    }

    if entries != N {
        return Err(ParseError::Entries {
            expected: N,
            found: entries,
        });
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_eui_formats() {
        assert_eq!(parse_eui("16ED77AD6ABFE51D"), Ok(0x16ED77AD6ABFE51D));
        assert_eq!(parse_eui("0x16ed77ad6abfe51d"), Ok(0x16ED77AD6ABFE51D));
        assert_eq!(parse_eui("16:ED:77:AD:6A:BF:E5:1D"), Ok(0x16ED77AD6ABFE51D));
        assert_eq!(
            parse_eui("0x16,0xED,0x77,0xAD,0x6A,0xBF,0xE5,0x1D"),
            Ok(0x16ED77AD6ABFE51D)
        );
    }

    #[test]
    fn test_parse_eui_rejects_bad_input() {
        assert_eq!(parse_eui("16ED77AD6ABFE51G"), Err(ParseError::InvalidDigit(15)));
        assert_eq!(
            parse_eui("16ED77"),
            Err(ParseError::Length {
                expected: 16,
                found: 6
            })
        );
        assert_eq!(
            parse_eui("16ED77AD6ABFE51D00"),
            Err(ParseError::Length {
                expected: 16,
                found: 18
            })
        );
    }

    #[test]
    fn test_parse_eui_c_literal_suffix() {
        assert_eq!(parse_eui("0x16ED77AD6ABFE51DULL"), Ok(0x16ED77AD6ABFE51D));
        assert_eq!(parse_eui("0x70b3d57ed0067002ull"), Ok(0x70B3D57ED0067002));
        // the suffix is not valid on keys
        assert!(parse_key("0xA1B2C3D4E5F60123456789ABCDEF0123ULL").is_err());
    }

    #[test]
    fn test_parse_eui_prefix_only_at_start() {
        assert_eq!(parse_eui("16ED77AD0x6ABFE5"), Err(ParseError::InvalidDigit(9)));
        assert!(parse_eui("16ED77AD0x6ABFE51D").is_err());
        assert!(parse_eui("0x16,0xED,0x77,0xAD,0x6A,0xBF,0xE5,1D0x").is_err());
    }

    #[test]
    fn test_parse_key_byte_list() {
        let key = parse_key(
            "0x55,0x26,0x0C,0xF5, 0xE9,0x32,0xF9,0xA1, 0x4A,0x39,0x4D,0x1D, 0xF4,0x2F,0xED,0x24",
        )
        .unwrap();
        assert_eq!(
            key,
            [
                0x55, 0x26, 0x0C, 0xF5, 0xE9, 0x32, 0xF9, 0xA1, 0x4A, 0x39, 0x4D, 0x1D, 0xF4,
                0x2F, 0xED, 0x24
            ]
        );
    }

    #[test]
    fn test_parse_key_single_digit_entry() {
        let key = parse_key(
            "0x5,0x26,0x0C,0xF5, 0xE9,0x32,0xF9,0xA1, 0x4A,0x39,0x4D,0x1D, 0xF4,0x2F,0xED,0x24",
        )
        .unwrap();
        assert_eq!(key[0], 0x05);
        assert_eq!(key[1], 0x26);
        assert_eq!(key[15], 0x24);
    }

    #[test]
    fn test_parse_key_entry_count() {
        // one entry too many: the digits alone would still add up to 32
        assert_eq!(
            parse_key("0x5,0x6,0x0C,0xF5,0xE9,0x32,0xF9,0xA1,0x4A,0x39,0x4D,0x1D,0xF4,0x2F,0xED,0x24,0x12"),
            Err(ParseError::Entries {
                expected: 16,
                found: 17
            })
        );
        assert_eq!(
            parse_key("0x55,0x26,0x0C"),
            Err(ParseError::Entries {
                expected: 16,
                found: 3
            })
        );
        // trailing separator leaves an empty entry
        assert_eq!(parse_eui("16,ED,77,AD,6A,BF,E5,1D,"), Err(ParseError::InvalidDigit(24)));
    }

    #[test]
    fn test_parse_key_rejects_wide_entry() {
        assert_eq!(
            parse_key("0x552,0x26,0x0C,0xF5,0xE9,0x32,0xF9,0xA1,0x4A,0x39,0x4D,0x1D,0xF4,0x2F,0xED,0x24"),
            Err(ParseError::InvalidDigit(4))
        );
    }

    #[test]
    fn test_version_from_keys() {
        let v10 = Credentials::new_v1_0(1, 2, [0xAA; 16]);
        assert_eq!(v10.nwk_key, v10.app_key);
        assert_eq!(v10.version(), LoRaWanVersion::V1_0);

        let v11 = Credentials::new(1, 2, [0xAA; 16], [0xBB; 16]);
        assert_eq!(v11.version(), LoRaWanVersion::V1_1);
    }

    #[test]
    fn test_eui_bytes_are_msb_first() {
        let creds = Credentials::new_v1_0(0x16ED77AD6ABFE51D, 0x49351A037F5327AA, [0; 16]);
        assert_eq!(
            creds.join_eui_bytes(),
            [0x16, 0xED, 0x77, 0xAD, 0x6A, 0xBF, 0xE5, 0x1D]
        );
        assert_eq!(creds.dev_eui_bytes()[7], 0xAA);
    }

    #[test]
    fn test_debug_redacts_keys() {
        let creds = Credentials::new_v1_0(0x16ED77AD6ABFE51D, 0x49351A037F5327AA, [0x55; 16]);
        let out = format!("{:?}", creds);
        assert!(out.contains("16ED77AD6ABFE51D"));
        assert!(out.contains("<redacted>"));
        assert!(!out.contains("85, 85"));
    }
}
