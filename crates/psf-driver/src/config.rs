/// Configuration for unpacking a container.
///
/// All settings come through this struct — the driver itself is
/// stateless and every call sees only the config it was handed.
#[derive(Clone, Debug)]
pub struct UnpackConfig {
    /// Decryption key for encrypted streams.
    ///
    /// Required only when a stream carries the encrypted flag; a
    /// container with no encrypted streams unpacks without one.
    pub key: Option<u16>,

    /// Verify header checksums against the decoded bytes.
    ///
    /// On by default. Turning it off skips verification but still
    /// parses the checksum field.
    pub verify_checksums: bool,
}

impl Default for UnpackConfig {
    fn default() -> Self {
        Self {
            key: None,
            verify_checksums: true,
        }
    }
}

impl UnpackConfig {
    /// Config with a decryption key and default verification.
    #[must_use]
    pub fn with_key(key: u16) -> Self {
        Self {
            key: Some(key),
            ..Self::default()
        }
    }
}
