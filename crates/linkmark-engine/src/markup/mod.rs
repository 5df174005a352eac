//! # Inline Markup
//!
//! The textual form of inline nodes used when a recognized link is embedded
//! back into a text stream (paste conversion) and re-ingested by the host.
//!
//! - **`kinds`**: `Tag`, owner of the delimiter bytes
//! - **`cursor`**: `Cursor` for byte-by-byte scanning
//! - **`parser`**: `parse_markup()`, lenient: anything malformed stays text
//! - **`serialize`**: `serialize_element()` / `serialize_nodes()`
//!
//! `parse_markup(serialize_nodes(nodes)) == nodes` for any node list whose
//! adjacent text runs are merged.

pub mod cursor;
pub mod kinds;
pub mod parser;
pub mod serialize;

pub use parser::parse_markup;
pub use serialize::{escape_text, serialize_element, serialize_nodes};
