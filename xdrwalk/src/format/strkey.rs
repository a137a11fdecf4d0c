//! Checksummed base-32 address encoding for ed25519 account keys.
//!
//! An address is the base-32 encoding (RFC 4648 alphabet, padding stripped)
//! of: one version byte, the raw key bytes, and a little-endian CRC16-XMODEM
//! checksum over version byte plus key. Account addresses use version byte
//! `0x30`, so they always start with `G`. This must stay bit-exact with the
//! network's own address encoding for compatibility with external tools.

use data_encoding::BASE32_NOPAD;

/// Version byte for account (public key) addresses: `6 << 3`, base-32 `G`.
const VERSION_BYTE_ACCOUNT: u8 = 6 << 3;

/// Errors from decoding a checksummed address.
#[derive(Debug, thiserror::Error)]
pub enum StrkeyError {
    /// The address is not valid unpadded base-32.
    #[error("invalid base32: {0}")]
    Base32(#[from] data_encoding::DecodeError),

    /// The decoded payload is too short to hold a version byte and checksum.
    #[error("address payload too short: {0} bytes")]
    TooShort(usize),

    /// The version byte is not the account tag.
    #[error("unexpected version byte: {0:#04x}")]
    BadVersionByte(u8),

    /// The embedded checksum does not match the payload.
    #[error("checksum mismatch")]
    BadChecksum,
}

/// Encode a raw ed25519 public key as a checksummed `G...` address.
pub fn encode_account(key: &[u8]) -> String {
    let mut payload = Vec::with_capacity(key.len() + 3);
    payload.push(VERSION_BYTE_ACCOUNT);
    payload.extend_from_slice(key);
    let checksum = crc16_xmodem(&payload);
    payload.extend_from_slice(&checksum.to_le_bytes());
    BASE32_NOPAD.encode(&payload)
}

/// Decode a checksummed `G...` address back to the raw key bytes, verifying
/// the version byte and checksum.
pub fn decode_account(address: &str) -> Result<Vec<u8>, StrkeyError> {
    let payload = BASE32_NOPAD.decode(address.as_bytes())?;
    if payload.len() < 3 {
        return Err(StrkeyError::TooShort(payload.len()));
    }

    let (body, checksum_bytes) = payload.split_at(payload.len() - 2);
    let expected = u16::from_le_bytes([checksum_bytes[0], checksum_bytes[1]]);
    if crc16_xmodem(body) != expected {
        return Err(StrkeyError::BadChecksum);
    }
    if body[0] != VERSION_BYTE_ACCOUNT {
        return Err(StrkeyError::BadVersionByte(body[0]));
    }

    Ok(body[1..].to_vec())
}

/// CRC16-XMODEM: polynomial 0x1021, initial value 0, no reflection.
fn crc16_xmodem(data: &[u8]) -> u16 {
    let mut crc: u16 = 0;
    for byte in data {
        crc ^= (*byte as u16) << 8;
        for _ in 0..8 {
            if crc & 0x8000 != 0 {
                crc = (crc << 1) ^ 0x1021;
            } else {
                crc <<= 1;
            }
        }
    }
    crc
}
