/*!
 * Sentence-aligned text chunking.
 *
 * Splits extracted document text into chunks small enough for the
 * translation backend. Sentences are never cut: a sentence longer than the
 * cap becomes a chunk of its own.
 *
 * Sentence boundaries are a `.`, `!` or `?` followed by whitespace. This
 * misreads abbreviations ("e.g. this"), some decimals and quoted punctuation,
 * and chunk boundaries depend on exactly this rule.
 */

use once_cell::sync::Lazy;
use regex::Regex;

/// Default maximum characters per chunk
pub const DEFAULT_CHUNK_SIZE: usize = 500;

/// Terminal punctuation followed by the whitespace run that ends a sentence
static SENTENCE_BREAK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[.!?]\s+").expect("sentence break pattern is valid")
});

/// Chunker bound to a size cap
#[derive(Debug, Clone, Copy)]
pub struct Chunker {
    max_chars: usize,
}

impl Default for Chunker {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE)
    }
}

impl Chunker {
    /// Create a chunker with the given cap in characters
    pub fn new(max_chars: usize) -> Self {
        Self { max_chars }
    }

    /// The configured cap
    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    /// Split text into chunks
    pub fn split(&self, text: &str) -> Vec<String> {
        split_into_chunks(text, self.max_chars)
    }
}

/// Split text into sentences, keeping the terminal punctuation with its sentence
///
/// The whitespace separating two sentences is dropped. Leading whitespace of
/// the first sentence and trailing whitespace of the last are kept.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for m in SENTENCE_BREAK.find_iter(text) {
        // The punctuation mark is ASCII, so the sentence ends one byte into the match
        let end = m.start() + 1;
        sentences.push(&text[start..end]);
        start = m.end();
    }
    sentences.push(&text[start..]);

    sentences
}

/// Greedily pack sentences into chunks of at most `max_chars` characters
///
/// Lengths count Unicode scalar values and include the single space that
/// joins two sentences in a chunk. Chunks are trimmed, empty ones are dropped.
pub fn split_into_chunks(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for sentence in split_sentences(text) {
        // Only the outer ends of the text carry whitespace, chunks are trimmed there anyway
        let sentence = sentence.trim();
        if sentence.is_empty() {
            continue;
        }
        let sentence_len = sentence.chars().count();

        if !current.is_empty() && current_len + 1 + sentence_len > max_chars {
            push_trimmed(&mut chunks, &current);
            current.clear();
            current.push_str(sentence);
            current_len = sentence_len;
        } else {
            if !current.is_empty() {
                current.push(' ');
                current_len += 1;
            }
            current.push_str(sentence);
            current_len += sentence_len;
        }
    }

    if !current.is_empty() {
        push_trimmed(&mut chunks, &current);
    }

    chunks
}

fn push_trimmed(chunks: &mut Vec<String>, chunk: &str) {
    let trimmed = chunk.trim();
    if !trimmed.is_empty() {
        chunks.push(trimmed.to_string());
    }
}
