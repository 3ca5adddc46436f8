/*!
 * Sequential chunk translation.
 *
 * The pipeline sends one request per chunk, strictly in order, and never has
 * two requests in flight. The backend is a rate-limited hosted API, so total
 * latency grows linearly with the number of chunks. Keep it that way unless
 * the backend's rate limits are revisited.
 */

use log::{debug, info, warn};
use std::time::Instant;

use crate::errors::TranslationError;
use crate::language_utils::{self, Language};
use crate::providers::Provider;

use super::chunker::Chunker;

/// Separator placed between translated chunks
pub const CHUNK_SEPARATOR: &str = "\n\n";

/// Translates chunk sequences through a provider
#[derive(Debug, Clone)]
pub struct ChunkTranslator<P: Provider> {
    /// Backend used for every chunk
    provider: P,

    /// Chunker used by `translate_text`
    chunker: Chunker,
}

impl<P: Provider> ChunkTranslator<P> {
    /// Create a new chunk translator
    pub fn new(provider: P, chunker: Chunker) -> Self {
        Self { provider, chunker }
    }

    /// The underlying provider
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// The chunker used for whole texts
    pub fn chunker(&self) -> &Chunker {
        &self.chunker
    }

    /// Chunk a whole text and translate it
    pub async fn translate_text(&self, text: &str, language_code: &str) -> Result<String, TranslationError> {
        // Resolve first so an unsupported code never costs a chunking pass
        let language = language_utils::resolve_language(language_code)?;
        let chunks = self.chunker.split(text);
        self.translate_with_language(&chunks, language, |_, _| {}).await
    }

    /// Translate chunks into the language with the given code
    ///
    /// The code is resolved against the language table before any request is
    /// made. Whitespace-only chunks are skipped.
    pub async fn translate_chunks(
        &self,
        chunks: &[String],
        language_code: &str,
        progress_callback: impl Fn(usize, usize),
    ) -> Result<String, TranslationError> {
        let language = language_utils::resolve_language(language_code)?;
        self.translate_with_language(chunks, language, progress_callback).await
    }

    /// Translate chunks with an already resolved language
    ///
    /// The first failing chunk aborts the run and nothing translated so far is
    /// returned. The callback receives `(completed, total)` after each chunk,
    /// skipped chunks included.
    pub async fn translate_with_language(
        &self,
        chunks: &[String],
        language: Language,
        progress_callback: impl Fn(usize, usize),
    ) -> Result<String, TranslationError> {
        let total = chunks.len();
        let start_time = Instant::now();
        let mut translated_chunks: Vec<String> = Vec::with_capacity(total);

        for (index, chunk) in chunks.iter().enumerate() {
            if chunk.trim().is_empty() {
                debug!("Skipping empty chunk {}", index);
                progress_callback(index + 1, total);
                continue;
            }

            let request = P::build_request(chunk, language.model);
            let response = match self.provider.complete(request).await {
                Ok(response) => response,
                Err(source) => {
                    warn!("Chunk {} of {} failed after {:?}: {}", index + 1, total, start_time.elapsed(), source);
                    return Err(TranslationError::Chunk { index, source });
                }
            };

            translated_chunks.push(P::extract_text(&response));
            progress_callback(index + 1, total);
        }

        info!(
            "Translated {} chunk(s) to {} in {:?}",
            translated_chunks.len(),
            language.name,
            start_time.elapsed()
        );

        Ok(translated_chunks.join(CHUNK_SEPARATOR))
    }
}
