//! Human-readable truncation of hashes and addresses.

/// Display density for truncated hashes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HashFormat {
    /// First 4 and last 2 characters, for tight layouts.
    Compact,
    /// First 6 and last 4 characters.
    #[default]
    Standard,
    /// First 10 and last 6 characters.
    Detailed,
}

impl HashFormat {
    fn affixes(self) -> (usize, usize) {
        match self {
            Self::Compact => (4, 2),
            Self::Standard => (6, 4),
            Self::Detailed => (10, 6),
        }
    }
}

/// Truncate a transaction hash for display.
///
/// Hashes no longer than the kept prefix + suffix are returned unchanged, as
/// is any non-ASCII input (hex hashes are always ASCII).
pub fn truncate_hash(hash: &str, format: HashFormat) -> String {
    let (prefix, suffix) = format.affixes();
    if !hash.is_ascii() || hash.len() <= prefix + suffix {
        return hash.to_string();
    }
    format!("{}...{}", &hash[..prefix], &hash[hash.len() - suffix..])
}

/// Truncate an account address for display (standard 6/4 form).
pub fn truncate_address(address: &str) -> String {
    truncate_hash(address, HashFormat::Standard)
}
