/// Tag delimiters for the inline markup the host re-ingests.
///
/// The parser and serializer both read these; neither hardcodes `<` or `</`.
pub struct Tag;

impl Tag {
    pub const OPEN: u8 = b'<';
    pub const CLOSE: u8 = b'>';
    pub const END_OPEN: &'static [u8; 2] = b"</";
    pub const ASSIGN: u8 = b'=';
    pub const QUOTE: u8 = b'"';

    /// Bytes allowed in tag names after the first (alphabetic) byte.
    pub fn is_name_byte(b: u8) -> bool {
        b.is_ascii_alphanumeric() || b == b'-'
    }

    /// Bytes allowed in attribute names.
    pub fn is_attribute_byte(b: u8) -> bool {
        b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b':' | b'.')
    }
}
