//! Clipping and chunking of transcript text.
//!
//! Lengths are counted in characters (Unicode scalar values), never bytes, so
//! neither operation can split a multi-byte character.

/// Return the prefix of `text` holding at most `max_chars` characters.
#[must_use]
pub fn clip(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// Split `text` into consecutive pieces of at most `chunk_size` characters.
///
/// Concatenating the result in order yields `text` again. An empty input
/// yields no chunks. A `chunk_size` of zero is treated as one.
#[must_use]
pub fn split(text: &str, chunk_size: usize) -> Vec<&str> {
    let chunk_size = chunk_size.max(1);
    let mut chunks = Vec::new();
    let mut start = 0;
    let mut count = 0;

    for (byte_idx, _) in text.char_indices() {
        if count == chunk_size {
            chunks.push(&text[start..byte_idx]);
            start = byte_idx;
            count = 0;
        }
        count += 1;
    }

    if start < text.len() {
        chunks.push(&text[start..]);
    }

    chunks
}
