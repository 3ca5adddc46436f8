/*!
 * Translation of extracted document text.
 *
 * - `chunker`: sentence-aligned splitting of text into bounded chunks
 * - `pipeline`: sequential translation of chunks through a provider
 */

// Re-export main types for easier usage
pub use self::chunker::{Chunker, split_into_chunks, split_sentences, DEFAULT_CHUNK_SIZE};
pub use self::pipeline::{ChunkTranslator, CHUNK_SEPARATOR};

// Submodules
pub mod chunker;
pub mod pipeline;
