//! The identity of a transferred unit.

use std::fmt;

/// Number of characters of the encoded digest shown in bar labels.
const SHORT_DIGEST_LEN: usize = 8;

/// Opaque identity of a blob being transferred: its content digest and its
/// declared size in bytes.
///
/// ```rust
/// use tally::Descriptor;
///
/// let d = Descriptor::new("sha256:2c26b46b68ffc68ff99b453c1d30413413422d706483bfa0f98a5e886266e7ae", 3);
/// assert_eq!(d.short_digest(), "2c26b46b");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Descriptor {
    digest: String,
    size: u64,
}

impl Descriptor {
    /// Create a new [`Descriptor`].
    pub fn new(digest: impl Into<String>, size: u64) -> Self {
        Self {
            digest: digest.into(),
            size,
        }
    }

    /// Full digest, including the algorithm prefix if any.
    pub fn digest(&self) -> &str {
        &self.digest
    }

    /// Declared size in bytes.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Digest without its `algorithm:` prefix.
    pub fn encoded(&self) -> &str {
        match self.digest.split_once(':') {
            Some((_, encoded)) => encoded,
            None => &self.digest,
        }
    }

    /// Short display form of the digest.
    ///
    /// Only meant for labels: two descriptors may share a short digest.
    pub fn short_digest(&self) -> &str {
        let encoded = self.encoded();
        match encoded.char_indices().nth(SHORT_DIGEST_LEN) {
            Some((idx, _)) => &encoded[..idx],
            None => encoded,
        }
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} bytes)", self.digest, self.size)
    }
}
