//! Archive parsing: category resolution, record framing and tree
//! normalisation.

pub mod category;
pub mod error;
pub mod framer;
pub mod normalize;
pub mod value;

pub use category::{resolve_identifier, ArchiveCategory, ResolvedArchive};
pub use error::ParseError;
pub use framer::frame_records;
pub use normalize::normalize_records;
pub use value::{TreeValue, XdrValue};

use tracing::{debug, warn};

use crate::codec::ArchiveCodec;
use crate::format::FormatOptions;
use crate::hashing;

/// Options for one parse invocation.
///
/// Mirrors the switches of the archive tooling: `raw_amounts` leaves
/// ledger-native scaled integers unconverted, and a `network_id` requests
/// canonical transaction hashes (only meaningful for transaction archives).
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// Leave `amount`-like fields as raw scaled integers.
    pub raw_amounts: bool,
    /// Network identifier string; when set, a content hash is computed and
    /// attached to every transaction before normalisation.
    pub network_id: Option<String>,
}

/// Parse one archive buffer into a JSON-compatible value tree.
///
/// `identifier` is the archive's file name (directories are ignored), used
/// to resolve the category and the first-checkpoint sentinel. `data` must
/// already be decompressed; see [`crate::input`] for gzip handling.
///
/// Either the full record sequence for the buffer is produced, or the first
/// fatal condition aborts the pass. There is no partial-result recovery.
pub fn parse_archive(
    codec: &dyn ArchiveCodec,
    identifier: &str,
    data: &[u8],
    options: &ParseOptions,
) -> Result<TreeValue, ParseError> {
    let archive = resolve_identifier(identifier)?;
    debug!(
        category = %archive.category,
        bytes = data.len(),
        "parsing archive buffer"
    );

    let mut records = frame_records(codec, &archive, data)?;

    if let Some(network_id) = &options.network_id {
        if archive.category == ArchiveCategory::Transactions {
            let network_hash = hashing::network_hash(network_id);
            hashing::attach_transaction_hashes(codec, &mut records, &network_hash)?;
        } else {
            warn!(
                category = %archive.category,
                "network id supplied for a non-transaction archive, skipping hashes"
            );
        }
    }

    normalize_records(
        &records,
        &FormatOptions {
            raw_amounts: options.raw_amounts,
        },
    )
}
