/*!
 * Tests for sentence-aligned chunking
 */

use pdflingo::translation::{split_into_chunks, split_sentences, Chunker, DEFAULT_CHUNK_SIZE};

const SAMPLE: &str = "This is sentence one. This is sentence two. This is a third one that is reasonably short.";

/// Concatenating the chunks must give back every non-whitespace character in order
fn non_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

#[test]
fn test_split_withSampleText_shouldProduceThreeChunks() {
    let chunks = split_into_chunks(SAMPLE, 40);
    assert_eq!(chunks, vec![
        "This is sentence one.".to_string(),
        "This is sentence two.".to_string(),
        "This is a third one that is reasonably short.".to_string(),
    ]);
}

#[test]
fn test_split_withLargeCap_shouldKeepSingleChunk() {
    let chunks = split_into_chunks(SAMPLE, DEFAULT_CHUNK_SIZE);
    assert_eq!(chunks, vec![SAMPLE.to_string()]);
}

#[test]
fn test_split_withOversizedSentence_shouldEmitItAlone() {
    let long = "a".repeat(120);
    let text = format!("Short one. {}. Tail.", long);
    let chunks = split_into_chunks(&text, 50);

    assert_eq!(chunks.len(), 3);
    assert_eq!(chunks[0], "Short one.");
    assert_eq!(chunks[1], format!("{}.", long));
    assert_eq!(chunks[2], "Tail.");
}

#[test]
fn test_split_withVariousCaps_shouldPreserveContentAndBound() {
    let text = "Alpha beta gamma. Delta epsilon! Zeta eta theta iota? Kappa lambda mu.\n\nNu xi omicron pi. Rho sigma tau.";
    let sentences = split_sentences(text);
    let longest = sentences.iter().map(|s| s.trim().chars().count()).max().unwrap();

    for cap in [1, 10, 20, 35, 60, 500] {
        let chunks = split_into_chunks(text, cap);
        assert_eq!(non_whitespace(&chunks.concat()), non_whitespace(text), "cap {}", cap);
        for chunk in &chunks {
            assert!(!chunk.is_empty());
            assert_eq!(chunk.trim(), chunk);
            assert!(chunk.chars().count() <= cap.max(longest), "cap {} chunk {:?}", cap, chunk);
        }
    }
}

#[test]
fn test_split_withEmptyOrBlankText_shouldReturnNoChunks() {
    assert!(split_into_chunks("", 40).is_empty());
    assert!(split_into_chunks("  \n\n  ", 40).is_empty());
}

#[test]
fn test_split_withoutTerminalPunctuation_shouldKeepWholeText() {
    let chunks = split_into_chunks("no punctuation at all here", 5);
    assert_eq!(chunks, vec!["no punctuation at all here".to_string()]);
}

#[test]
fn test_splitSentences_withAbbreviation_shouldSplitThere() {
    // The heuristic treats any terminal mark followed by whitespace as a boundary
    let sentences = split_sentences("See e.g. this case. Done.");
    assert_eq!(sentences, vec!["See e.g.", "this case.", "Done."]);
}

#[test]
fn test_splitSentences_withNewlines_shouldTreatThemAsWhitespace() {
    let sentences = split_sentences("One.\n\nTwo?\tThree!");
    assert_eq!(sentences, vec!["One.", "Two?", "Three!"]);
}

#[test]
fn test_chunker_withMultibyteText_shouldCountCharacters() {
    // 10 characters, 20+ bytes
    let text = "ééééééééé. ààààààààà.";
    let chunks = Chunker::new(21).split(text);
    assert_eq!(chunks.len(), 1);

    let chunks = Chunker::new(20).split(text);
    assert_eq!(chunks.len(), 2);
}

#[test]
fn test_chunker_default_shouldUseDefaultCap() {
    assert_eq!(Chunker::default().max_chars(), DEFAULT_CHUNK_SIZE);
}
