//! Placeholder keystore containers
//!
//! When provisioning finds no keystore on disk it writes a minimal valid
//! container so that downstream TLS initialization opens an empty store
//! instead of failing on a missing or unparseable file. For PKCS#12 this is
//! the DER encoding of a PFX (RFC 7292) with version 3, an `id-data`
//! authSafe wrapping an empty AuthenticatedSafe, and no MacData (the MAC is
//! optional per RFC 7292 §4, and there is nothing to authenticate yet).

/// DER encoding of an empty PKCS#12 PFX.
///
/// Layout, outermost first:
///
/// ```text
/// 30 16            SEQUENCE (PFX), 22 bytes
///   02 01 03       INTEGER 3 (version)
///   30 11          SEQUENCE (ContentInfo), 17 bytes
///     06 09 2a 86 48 86 f7 0d 01 07 01   OID 1.2.840.113549.1.7.1 (id-data)
///     a0 04        [0] EXPLICIT, 4 bytes
///       04 02      OCTET STRING, 2 bytes
///         30 00    SEQUENCE (empty AuthenticatedSafe)
/// ```
pub const EMPTY_PFX: [u8; 24] = [
    0x30, 0x16, 0x02, 0x01, 0x03, 0x30, 0x11, 0x06, 0x09, 0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d,
    0x01, 0x07, 0x01, 0xa0, 0x04, 0x04, 0x02, 0x30, 0x00,
];

#[cfg(test)]
mod tests {
    use super::*;

    const ID_DATA_OID: [u8; 11] = [
        0x06, 0x09, 0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x07, 0x01,
    ];

    #[test]
    fn empty_pfx_outer_structure() {
        // Outer SEQUENCE whose length covers the rest of the buffer
        assert_eq!(EMPTY_PFX[0], 0x30);
        assert_eq!(EMPTY_PFX[1] as usize, EMPTY_PFX.len() - 2);
    }

    #[test]
    fn empty_pfx_version_is_three() {
        assert_eq!(&EMPTY_PFX[2..5], &[0x02, 0x01, 0x03]);
    }

    #[test]
    fn empty_pfx_authsafe_is_id_data() {
        assert_eq!(&EMPTY_PFX[7..18], &ID_DATA_OID);
    }

    #[test]
    fn empty_pfx_wraps_empty_authenticated_safe() {
        // [0] EXPLICIT -> OCTET STRING -> empty SEQUENCE, ending the buffer
        assert_eq!(&EMPTY_PFX[18..], &[0xa0, 0x04, 0x04, 0x02, 0x30, 0x00]);
    }
}
