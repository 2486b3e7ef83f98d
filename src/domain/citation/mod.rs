//! SourceIndex - out-of-band citations correlated to rendered messages.

mod header;
mod source_index;

pub use header::{decode_citation_header, CitationDecodeError};
pub use source_index::{Citation, PositionKey, SourceIndex};
