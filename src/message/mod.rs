//! Message payloads exchanged between the sender and the receiver.
//!
//! Payloads are plain UTF-8 text of the form `Message #N`, with no headers
//! and no schema.

/// Builds the payload text for the `sequence`-th message (1-based).
pub fn text(sequence: u32) -> String {
    format!("Message #{sequence}")
}

/// Decodes a delivery body as UTF-8, replacing invalid sequences with
/// U+FFFD instead of failing.
pub fn decode(body: &[u8]) -> String {
    String::from_utf8_lossy(body).into_owned()
}
