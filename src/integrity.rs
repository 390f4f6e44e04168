//! Page integrity layer
//!
//! A single designated trailer byte authenticates the rest of the page:
//! the last byte of every page image holds the low byte of the CRC32 of
//! all preceding bytes. Sealing writes the trailer, verification recomputes
//! and compares it.

/// Compute the trailer byte for a page payload
pub fn trailer(payload: &[u8]) -> u8 {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(payload);
    (hasher.finalize() & 0xFF) as u8
}

/// Seal a full page image in place: write the checksum of everything before
/// the trailer position into the last byte
///
/// Panics if `image` is empty; arena pages are always at least 2 bytes
/// (enforced by config validation).
pub fn seal(image: &mut [u8]) {
    let last = image.len() - 1;
    image[last] = trailer(&image[..last]);
}

/// Verify a full page image against its trailer byte
pub fn verify(image: &[u8]) -> bool {
    let last = image.len() - 1;
    image[last] == trailer(&image[..last])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seal_then_verify_roundtrips() {
        let mut image = vec![0u8; 64];
        image[..5].copy_from_slice(b"hello");
        seal(&mut image);
        assert!(verify(&image));
    }

    #[test]
    fn payload_corruption_is_detected() {
        let mut image = vec![0u8; 64];
        image[..5].copy_from_slice(b"hello");
        seal(&mut image);
        image[2] ^= 0x01;
        assert!(!verify(&image));
    }

    #[test]
    fn trailer_corruption_is_detected() {
        let mut image = vec![0u8; 64];
        image[..5].copy_from_slice(b"hello");
        seal(&mut image);
        let last = image.len() - 1;
        image[last] ^= 0xFF;
        assert!(!verify(&image));
    }
}
