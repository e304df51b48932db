//! Paragraph-aligned chunking with tail overlap.
//!
//! Article text is packed paragraph by paragraph into chunks of at most `chunk_size`
//! characters. A paragraph is never split: one longer than `chunk_size` becomes its own
//! oversized chunk. When more than one chunk results, every chunk after the first is prefixed
//! with the last `overlap` characters of the previous chunk (as it was before its own prefix
//! was added) so the model keeps some context across the boundary.
//!
//! Sizes are counted in `char`s, so Hangul and other multi-byte text is measured by visible
//! characters and slicing never lands inside a code point.

/// Default soft bound on chunk length, in characters.
pub const DEFAULT_CHUNK_SIZE: usize = 3500;
/// Default number of trailing characters carried into the next chunk.
pub const DEFAULT_CHUNK_OVERLAP: usize = 300;

/// Chunk sizing parameters applied by the analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkingOptions {
    /// Soft upper bound on chunk length, in characters.
    pub chunk_size: usize,
    /// Characters carried from the tail of the previous chunk.
    pub overlap: usize,
}

impl Default for ChunkingOptions {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            overlap: DEFAULT_CHUNK_OVERLAP,
        }
    }
}

/// Split cleaned text into paragraph-aligned chunks.
///
/// Returns an empty vector when the text holds no non-blank paragraph.
pub fn chunk_text(text: &str, chunk_size: usize, overlap: usize) -> Vec<String> {
    let chunks = pack_paragraphs(text, chunk_size);
    if overlap == 0 || chunks.len() < 2 {
        return chunks;
    }

    let mut overlapped = Vec::with_capacity(chunks.len());
    overlapped.push(chunks[0].clone());
    for window in chunks.windows(2) {
        let tail = char_tail(&window[0], overlap);
        overlapped.push(format!("{tail}\n{}", window[1]).trim().to_string());
    }
    overlapped
}

fn pack_paragraphs(text: &str, chunk_size: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for paragraph in text.split('\n').map(str::trim).filter(|p| !p.is_empty()) {
        let paragraph_len = paragraph.chars().count();
        if current_len + paragraph_len + 1 <= chunk_size {
            if current.is_empty() {
                current.push_str(paragraph);
                current_len = paragraph_len;
            } else {
                current.push('\n');
                current.push_str(paragraph);
                current_len += paragraph_len + 1;
            }
        } else {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
            }
            current.push_str(paragraph);
            current_len = paragraph_len;
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

/// Last `count` characters of `text` (the whole string when it is shorter).
fn char_tail(text: &str, count: usize) -> &str {
    if count == 0 {
        return "";
    }
    match text.char_indices().rev().nth(count - 1) {
        Some((index, _)) => &text[index..],
        None => text,
    }
}
