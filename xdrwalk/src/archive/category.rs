//! Archive category resolution.
//!
//! History archives name their files `<category>-<checkpoint>.xdr[.gz]`
//! (buckets use the bucket hash instead of a checkpoint number). The
//! category token selects the codec decode routine and, for ledger files,
//! the expected record count.

use std::fmt;

use crate::archive::error::ParseError;

/// The designated first checkpoint, recognisable by these low 8 hex digits
/// in the archive identifier. Its ledger file holds one record fewer.
const FIRST_CHECKPOINT_SENTINEL: &str = "0000003f";

/// Records per ledger checkpoint file.
const LEDGER_RECORDS: usize = 64;

/// The semantic kind of a history archive file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArchiveCategory {
    /// Bucket list entries.
    Bucket,
    /// Ledger header history entries.
    Ledger,
    /// Transaction set history entries.
    Transactions,
    /// Transaction result set history entries.
    Results,
    /// Consensus (SCP) history entries.
    Scp,
}

impl ArchiveCategory {
    /// Parse a category token, as it appears in an archive file name.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "bucket" => Some(Self::Bucket),
            "ledger" => Some(Self::Ledger),
            "transactions" => Some(Self::Transactions),
            "results" => Some(Self::Results),
            "scp" => Some(Self::Scp),
            _ => None,
        }
    }

    /// The token naming this category in archive file names.
    pub fn token(&self) -> &'static str {
        match self {
            Self::Bucket => "bucket",
            Self::Ledger => "ledger",
            Self::Transactions => "transactions",
            Self::Results => "results",
            Self::Scp => "scp",
        }
    }
}

impl fmt::Display for ArchiveCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// A resolved archive identifier: category plus checkpoint position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedArchive {
    /// The archive's category.
    pub category: ArchiveCategory,
    /// Whether the identifier names the designated first checkpoint.
    pub first_checkpoint: bool,
}

impl ResolvedArchive {
    /// The record count this archive must contain, where the category has a
    /// count rule. Only ledger files are counted: 64 records per checkpoint,
    /// 63 for the first (the genesis ledger has no predecessor).
    pub fn expected_record_count(&self) -> Option<usize> {
        match self.category {
            ArchiveCategory::Ledger if self.first_checkpoint => Some(LEDGER_RECORDS - 1),
            ArchiveCategory::Ledger => Some(LEDGER_RECORDS),
            _ => None,
        }
    }
}

/// Resolve an archive identifier to its category and checkpoint position.
///
/// The category token is the last `-`/`_`-delimited component before the
/// extension: `path/to/transactions-0043733f.xdr.gz` resolves to
/// `transactions`. Directory components (both `/` and `\`) are ignored.
/// Unknown tokens are an error, not a default.
pub fn resolve_identifier(identifier: &str) -> Result<ResolvedArchive, ParseError> {
    let file_name = identifier
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(identifier);

    let pieces: Vec<&str> = file_name.split(['-', '_']).collect();
    let token = if pieces.len() >= 2 {
        pieces[pieces.len() - 2]
    } else {
        return Err(ParseError::UnknownCategory(file_name.to_string()));
    };

    let category = ArchiveCategory::from_token(token)
        .ok_or_else(|| ParseError::UnknownCategory(token.to_string()))?;

    Ok(ResolvedArchive {
        category,
        first_checkpoint: file_name.contains(FIRST_CHECKPOINT_SENTINEL),
    })
}
