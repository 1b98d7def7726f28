use rand::RngCore;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The Bluetooth base UUID, `00000000-0000-1000-8000-00805F9B34FB`, read
/// as a single 128-bit big-endian value. SIG-assigned 16-bit and 32-bit
/// UUIDs are offsets from this base.
pub const BLUETOOTH_BASE_UUID: u128 = 0x00000000_0000_1000_8000_00805F9B34FB;

const SHORT_SHIFT: u32 = 96;
const BASE_MASK: u128 = (1u128 << SHORT_SHIFT) - 1;

/// A 128-bit Bluetooth UUID.
///
/// Stored as the canonical big-endian value, so ordering and equality are
/// plain integer operations. Conversions cover the 16-bit and 32-bit
/// SIG-assigned short forms and the little-endian wire encoding used by
/// attribute PDUs.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Uuid(u128);

impl Uuid {
    /// Creates a UUID from 16 bytes in little-endian wire order.
    pub const fn from_bytes_le(bytes: [u8; 16]) -> Self {
        Uuid(u128::from_le_bytes(bytes))
    }

    /// Creates a UUID from 16 bytes in canonical big-endian order.
    pub const fn from_bytes_be(bytes: [u8; 16]) -> Self {
        Uuid(u128::from_be_bytes(bytes))
    }

    /// Creates a 128-bit UUID from a 16-bit SIG-assigned value.
    /// Formula: `value * 2^96 + BASE_UUID`
    pub const fn from_u16(uuid16: u16) -> Self {
        Uuid(BLUETOOTH_BASE_UUID | (uuid16 as u128) << SHORT_SHIFT)
    }

    /// Creates a 128-bit UUID from a 32-bit SIG-assigned value.
    /// Formula: `value * 2^96 + BASE_UUID`
    pub const fn from_u32(uuid32: u32) -> Self {
        Uuid(BLUETOOTH_BASE_UUID | (uuid32 as u128) << SHORT_SHIFT)
    }

    /// Tries to create a UUID from a byte slice in little-endian order.
    ///
    /// Accepts slices of length 2 (16-bit), 4 (32-bit), or 16 (128-bit).
    /// Returns `None` for any other length.
    pub fn try_from_slice_le(slice: &[u8]) -> Option<Self> {
        match slice.len() {
            2 => {
                let uuid16 = u16::from_le_bytes([slice[0], slice[1]]);
                Some(Uuid::from_u16(uuid16))
            }
            4 => {
                let uuid32 = u32::from_le_bytes([slice[0], slice[1], slice[2], slice[3]]);
                Some(Uuid::from_u32(uuid32))
            }
            16 => {
                let mut bytes = [0u8; 16];
                bytes.copy_from_slice(slice);
                Some(Uuid::from_bytes_le(bytes))
            }
            _ => None,
        }
    }

    /// Generates a random (Version 4) UUID.
    pub fn new_random_v4() -> Self {
        let mut bytes = [0u8; 16];
        rand::thread_rng().fill_bytes(&mut bytes);

        // Set version (4) and variant (RFC 4122) on the canonical bytes
        bytes[6] = (bytes[6] & 0x0F) | 0x40;
        bytes[8] = (bytes[8] & 0x3F) | 0x80;

        Uuid::from_bytes_be(bytes)
    }

    /// The UUID as 16 bytes in little-endian wire order.
    pub const fn as_bytes_le(&self) -> [u8; 16] {
        self.0.to_le_bytes()
    }

    /// The UUID as 16 bytes in canonical big-endian order.
    pub const fn as_bytes_be(&self) -> [u8; 16] {
        self.0.to_be_bytes()
    }

    /// The short value, if this UUID is built on the Bluetooth base UUID.
    fn short_value(&self) -> Option<u32> {
        if self.0 & BASE_MASK == BLUETOOTH_BASE_UUID {
            Some((self.0 >> SHORT_SHIFT) as u32)
        } else {
            None
        }
    }

    /// Tries to represent the UUID as a 16-bit SIG-assigned value.
    pub fn as_u16(&self) -> Option<u16> {
        match self.short_value() {
            Some(v) if v <= u32::from(u16::MAX) => Some(v as u16),
            _ => None,
        }
    }

    /// Tries to represent the UUID as a 32-bit SIG-assigned value.
    pub fn as_u32(&self) -> Option<u32> {
        self.short_value()
    }
}

impl From<u16> for Uuid {
    fn from(uuid16: u16) -> Self {
        Uuid::from_u16(uuid16)
    }
}

impl From<u32> for Uuid {
    fn from(uuid32: u32) -> Self {
        Uuid::from_u32(uuid32)
    }
}

impl From<[u8; 16]> for Uuid {
    /// Assumes bytes are in little-endian order.
    fn from(bytes: [u8; 16]) -> Self {
        Uuid::from_bytes_le(bytes)
    }
}

impl PartialEq<u16> for Uuid {
    fn eq(&self, other: &u16) -> bool {
        self.as_u16() == Some(*other)
    }
}

impl PartialEq<Uuid> for u16 {
    fn eq(&self, other: &Uuid) -> bool {
        other.as_u16() == Some(*self)
    }
}

impl PartialEq<u32> for Uuid {
    fn eq(&self, other: &u32) -> bool {
        self.as_u32() == Some(*other)
    }
}

impl PartialEq<Uuid> for u32 {
    fn eq(&self, other: &Uuid) -> bool {
        other.as_u32() == Some(*self)
    }
}

impl fmt::Display for Uuid {
    /// Shows the short form for SIG-assigned UUIDs, the standard
    /// hyphenated form otherwise.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(uuid16) = self.as_u16() {
            return write!(f, "{:#06x}", uuid16);
        }
        if let Some(uuid32) = self.as_u32() {
            return write!(f, "{:#010x}", uuid32);
        }
        let b = self.as_bytes_be();
        write!(
            f,
            "{:02x}{:02x}{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}{:02x}{:02x}{:02x}{:02x}",
            b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7],
            b[8], b[9], b[10], b[11], b[12], b[13], b[14], b[15]
        )
    }
}

impl fmt::Debug for Uuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(uuid16) = self.as_u16() {
            write!(f, "Uuid(0x{:04X})", uuid16)
        } else if let Some(uuid32) = self.as_u32() {
            write!(f, "Uuid(0x{:08X})", uuid32)
        } else {
            write!(f, "Uuid({})", self)
        }
    }
}

#[derive(Debug, Error)]
pub enum UuidParseError {
    #[error("expected 4, 8, or 32 hex digits")]
    InvalidLength,
    #[error("invalid hex digit")]
    InvalidFormat,
    #[error(transparent)]
    HexError(#[from] hex::FromHexError),
}

impl FromStr for Uuid {
    type Err = UuidParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cleaned: String = s.chars().filter(|c| *c != '-').collect();

        match cleaned.len() {
            4 => {
                let val = u16::from_str_radix(&cleaned, 16)
                    .map_err(|_| UuidParseError::InvalidFormat)?;
                Ok(Uuid::from_u16(val))
            }
            8 => {
                let val = u32::from_str_radix(&cleaned, 16)
                    .map_err(|_| UuidParseError::InvalidFormat)?;
                Ok(Uuid::from_u32(val))
            }
            32 => {
                let mut bytes = [0u8; 16];
                hex::decode_to_slice(&cleaned, &mut bytes)?;
                Ok(Uuid::from_bytes_be(bytes))
            }
            _ => Err(UuidParseError::InvalidLength),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_forms_sit_on_the_base_uuid() {
        let uuid = Uuid::from_u16(0x2800);
        assert_eq!(uuid.as_u16(), Some(0x2800));
        assert_eq!(uuid.as_u32(), Some(0x2800));
        assert_eq!(
            "00002800-0000-1000-8000-00805f9b34fb".parse::<Uuid>().unwrap(),
            uuid
        );

        let wide = Uuid::from_u32(0x0001_0000);
        assert_eq!(wide.as_u16(), None);
        assert_eq!(wide.as_u32(), Some(0x0001_0000));
    }

    #[test]
    fn byte_order_round_trips() {
        let uuid = Uuid::from_u32(0xDEAD_BEEF);
        assert_eq!(Uuid::from_bytes_le(uuid.as_bytes_le()), uuid);
        assert_eq!(Uuid::from_bytes_be(uuid.as_bytes_be()), uuid);

        let le = uuid.as_bytes_le();
        assert_eq!(&le[12..16], &[0xEF, 0xBE, 0xAD, 0xDE]);
    }

    #[test]
    fn slice_conversions_check_length() {
        assert_eq!(
            Uuid::try_from_slice_le(&[0x0A, 0x18]),
            Some(Uuid::from_u16(0x180A))
        );
        assert_eq!(
            Uuid::try_from_slice_le(&[0xEF, 0xBE, 0xAD, 0xDE]),
            Some(Uuid::from_u32(0xDEADBEEF))
        );
        assert_eq!(Uuid::try_from_slice_le(&[0x01, 0x02, 0x03]), None);
    }

    #[test]
    fn parses_short_and_long_forms() {
        assert_eq!("180A".parse::<Uuid>().unwrap(), Uuid::from_u16(0x180A));
        assert_eq!("0000180a".parse::<Uuid>().unwrap(), Uuid::from_u32(0x180A));
        assert_eq!(
            "00002800-0000-1000-8000-00805f9b34fb".parse::<Uuid>().unwrap(),
            Uuid::from_u16(0x2800)
        );
        assert!("12345".parse::<Uuid>().is_err());
        assert!("18zz".parse::<Uuid>().is_err());
    }

    #[test]
    fn display_prefers_short_forms() {
        assert_eq!(Uuid::from_u16(0x2800).to_string(), "0x2800");
        assert_eq!(Uuid::from_u32(0x0001_0000).to_string(), "0x00010000");
        let custom = Uuid::from_bytes_be([0x12; 16]);
        assert_eq!(custom.to_string(), "12121212-1212-1212-1212-121212121212");
    }

    #[test]
    fn random_v4_sets_version_and_variant() {
        for _ in 0..16 {
            let bytes = Uuid::new_random_v4().as_bytes_be();
            assert_eq!(bytes[6] & 0xF0, 0x40);
            assert_eq!(bytes[8] & 0xC0, 0x80);
        }
    }

    #[test]
    fn mixed_comparisons() {
        let uuid = Uuid::from_u16(0x2803);
        assert_eq!(uuid, 0x2803u16);
        assert_eq!(0x2803u16, uuid);
        assert_eq!(uuid, 0x2803u32);
        assert!(Uuid::from_bytes_be([0xAB; 16]) != 0x2803u16);
    }
}
