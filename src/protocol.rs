use core::ops::Range;

use crate::crypto::{HashChoice, ct_eq, digest};
use crate::error::{Error, Result};

/// Leading bytes of the buffer that are never authenticated.
pub const HEADER_LEN: usize = 4;

/// Size of the pad-length byte written after the payload.
pub const PAD_MARKER_LEN: usize = 1;

/// Pad marker value meaning "no integrity padding".
pub const PAD_MARKER_NO_PADDING: u8 = 0x00;

/// Length of the authentication code trailer on the wire.
///
/// Always 20 bytes, independent of the negotiated algorithm's nominal width.
pub const TRAILER_LEN: usize = 20;

/// Bytes the integrity transform appends after the payload.
pub const INTEGRITY_OVERHEAD: usize = PAD_MARKER_LEN + TRAILER_LEN;

/// Algorithm numbers (IPMI v2.0 Table 13-18).
pub mod algorithm {
    /// No integrity protection.
    pub const INTEGRITY_NONE: u8 = 0x00;
    /// HMAC-SHA1-96.
    pub const INTEGRITY_HMAC_SHA1_96: u8 = 0x01;
    /// HMAC-MD5-128.
    pub const INTEGRITY_HMAC_MD5_128: u8 = 0x02;
    /// MD5-128.
    pub const INTEGRITY_MD5_128: u8 = 0x03;
    /// HMAC-SHA256-128.
    pub const INTEGRITY_HMAC_SHA256_128: u8 = 0x04;
    /// Highest identifier that fits the 6-bit algorithm field.
    pub const MAX_ID: u8 = 0x3F;
}

/// Named regions of a packet carrying an integrity trailer.
///
/// ```text
/// [header: 4][payload][pad marker: 1][trailer: 20]
/// ```
///
/// `body_end` is the offset of the pad marker, i.e. the payload length before
/// the integrity transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacketLayout {
    body_end: usize,
}

impl PacketLayout {
    /// Layout for authenticating `payload_len` bytes in a buffer of `max_len`.
    pub fn outbound(payload_len: usize, max_len: usize) -> Result<Self> {
        let required = payload_len
            .checked_add(INTEGRITY_OVERHEAD)
            .ok_or(Error::InvalidArgument("payload length overflows"))?;
        if required > max_len {
            return Err(Error::BufferTooSmall {
                required,
                available: max_len,
            });
        }
        if payload_len < HEADER_LEN {
            return Err(Error::BufferTooSmall {
                required: HEADER_LEN,
                available: payload_len,
            });
        }
        Ok(Self {
            body_end: payload_len,
        })
    }

    /// Layout for verifying a packet of `total_len` bytes whose authenticated
    /// length (pad marker included) is `payload_len`.
    pub fn inbound(payload_len: usize, total_len: usize) -> Result<Self> {
        if payload_len < HEADER_LEN + PAD_MARKER_LEN {
            return Err(Error::BufferTooSmall {
                required: HEADER_LEN + PAD_MARKER_LEN,
                available: payload_len,
            });
        }
        let body_end = payload_len - PAD_MARKER_LEN;
        let available = total_len.saturating_sub(body_end);
        if available < INTEGRITY_OVERHEAD {
            return Err(Error::TruncatedTrailer {
                required: INTEGRITY_OVERHEAD,
                available,
            });
        }
        Ok(Self { body_end })
    }

    /// Unauthenticated session header.
    pub fn header(&self) -> Range<usize> {
        0..HEADER_LEN
    }

    /// Protocol body.
    pub fn payload(&self) -> Range<usize> {
        HEADER_LEN..self.body_end
    }

    /// Offset of the pad marker byte.
    pub fn pad_marker(&self) -> usize {
        self.body_end
    }

    /// Region covered by the digest: payload and pad marker.
    pub fn authenticated(&self) -> Range<usize> {
        HEADER_LEN..self.body_end + PAD_MARKER_LEN
    }

    /// Authentication code.
    pub fn trailer(&self) -> Range<usize> {
        let start = self.body_end + PAD_MARKER_LEN;
        start..start + TRAILER_LEN
    }

    /// Payload length including the pad marker, as reported to the caller.
    pub fn authenticated_len(&self) -> usize {
        self.body_end + PAD_MARKER_LEN
    }

    /// Total bytes occupied by the packet once the trailer is present.
    pub fn total_len(&self) -> usize {
        self.body_end + INTEGRITY_OVERHEAD
    }
}

/// Lengths reported by a successful authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Authenticated {
    /// Payload length including the appended pad marker.
    pub payload_len: usize,
    /// Bytes of trailer written after the payload.
    pub trailer_len: usize,
}

impl Authenticated {
    /// Total bytes to transmit.
    pub fn total_len(&self) -> usize {
        self.payload_len + self.trailer_len
    }
}

/// Append the pad marker and trailer to `buffer[..payload_len]`.
pub(crate) fn integrity_add(
    hash: HashChoice,
    key: &[u8],
    buffer: &mut [u8],
    payload_len: usize,
) -> Result<Authenticated> {
    let layout = PacketLayout::outbound(payload_len, buffer.len())?;

    buffer[layout.pad_marker()] = PAD_MARKER_NO_PADDING;
    let code = digest(hash, key, &buffer[layout.authenticated()])?;
    buffer[layout.trailer()].copy_from_slice(code.padded());

    Ok(Authenticated {
        payload_len: layout.authenticated_len(),
        trailer_len: TRAILER_LEN,
    })
}

/// Recompute the trailer over `packet` and compare it in constant time.
pub(crate) fn integrity_check(
    hash: HashChoice,
    key: &[u8],
    packet: &[u8],
    payload_len: usize,
) -> Result<()> {
    let layout = PacketLayout::inbound(payload_len, packet.len())?;

    let expected = digest(hash, key, &packet[layout.authenticated()])?;
    if !ct_eq(expected.padded(), &packet[layout.trailer()]) {
        return Err(Error::IntegrityMismatch);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outbound_layout_regions() {
        let layout = PacketLayout::outbound(6, 64).expect("layout");
        assert_eq!(layout.header(), 0..4);
        assert_eq!(layout.payload(), 4..6);
        assert_eq!(layout.pad_marker(), 6);
        assert_eq!(layout.authenticated(), 4..7);
        assert_eq!(layout.trailer(), 7..27);
        assert_eq!(layout.authenticated_len(), 7);
        assert_eq!(layout.total_len(), 27);
    }

    #[test]
    fn inbound_layout_matches_outbound() {
        let out = PacketLayout::outbound(10, 31).expect("outbound");
        let inb =
            PacketLayout::inbound(out.authenticated_len(), out.total_len()).expect("inbound");
        assert_eq!(out, inb);
    }

    #[test]
    fn outbound_rejects_missing_headroom() {
        assert!(PacketLayout::outbound(10, 31).is_ok());
        assert_eq!(
            PacketLayout::outbound(10, 30),
            Err(Error::BufferTooSmall {
                required: 31,
                available: 30
            })
        );
    }

    #[test]
    fn outbound_rejects_missing_header() {
        assert_eq!(
            PacketLayout::outbound(3, 64),
            Err(Error::BufferTooSmall {
                required: 4,
                available: 3
            })
        );
        assert!(PacketLayout::outbound(4, 64).is_ok());
    }

    #[test]
    fn outbound_rejects_overflowing_length() {
        assert!(matches!(
            PacketLayout::outbound(usize::MAX, usize::MAX),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn inbound_rejects_short_trailer() {
        assert_eq!(
            PacketLayout::inbound(7, 26),
            Err(Error::TruncatedTrailer {
                required: 21,
                available: 20
            })
        );
        // Authenticated length beyond the packet itself.
        assert_eq!(
            PacketLayout::inbound(40, 27),
            Err(Error::TruncatedTrailer {
                required: 21,
                available: 0
            })
        );
    }

    #[test]
    fn inbound_rejects_missing_pad_marker() {
        assert!(matches!(
            PacketLayout::inbound(4, 64),
            Err(Error::BufferTooSmall { .. })
        ));
    }

    #[test]
    fn add_writes_pad_marker_and_trailer() {
        let key = [0x42u8; 20];
        let mut buf = [0xEEu8; 32];
        buf[..6].copy_from_slice(&[0x00, 0x00, 0x00, 0x00, 0x11, 0x22]);

        let out = integrity_add(HashChoice::Sha1, &key, &mut buf, 6).expect("add");
        assert_eq!(out.payload_len, 7);
        assert_eq!(out.trailer_len, TRAILER_LEN);
        assert_eq!(out.total_len(), 27);
        assert_eq!(buf[6], PAD_MARKER_NO_PADDING);

        let code = digest(HashChoice::Sha1, &key, &[0x11, 0x22, 0x00]).expect("hmac");
        assert_eq!(&buf[7..27], code.as_bytes());
        // Bytes past the trailer are untouched.
        assert_eq!(&buf[27..], &[0xEE; 5]);
    }

    #[test]
    fn md5_trailer_is_zero_filled() {
        let key = [0x42u8; 20];
        let mut buf = [0xEEu8; 27];
        buf[..6].copy_from_slice(&[0x00, 0x00, 0x00, 0x00, 0x11, 0x22]);

        integrity_add(HashChoice::Md5, &key, &mut buf, 6).expect("add");
        assert_eq!(&buf[23..27], &[0u8; 4]);
        integrity_check(HashChoice::Md5, &key, &buf, 7).expect("check");
    }

    #[test]
    fn check_rejects_wrong_key() {
        let mut buf = [0u8; 27];
        buf[4] = 0xAA;
        buf[5] = 0xAA;
        integrity_add(HashChoice::Sha1, &[0x01; 20], &mut buf, 6).expect("add");
        assert_eq!(
            integrity_check(HashChoice::Sha1, &[0x02; 20], &buf, 7),
            Err(Error::IntegrityMismatch)
        );
    }
}
