/*!
 * Tests for the target language table
 */

use pdflingo::language_utils::{
    default_language, find_language, is_iso_639_1, resolve_language, supported_codes,
    validate_target_language, DEFAULT_LANGUAGE_CODE, SUPPORTED_LANGUAGES,
};
use pdflingo::errors::TranslationError;

#[test]
fn test_table_shouldMapEveryCodeToItsModel() {
    assert_eq!(SUPPORTED_LANGUAGES.len(), 10);
    for lang in SUPPORTED_LANGUAGES.iter() {
        assert_eq!(lang.model, format!("Helsinki-NLP/opus-mt-en-{}", lang.code));
        assert!(is_iso_639_1(lang.code), "{} should be an ISO 639-1 code", lang.code);
    }
}

#[test]
fn test_supportedCodes_shouldKeepTableOrder() {
    assert_eq!(
        supported_codes(),
        vec!["fr", "es", "de", "it", "pt", "ru", "ja", "ko", "zh", "hi"]
    );
}

#[test]
fn test_defaultLanguage_shouldBeSpanish() {
    let lang = default_language();
    assert_eq!(lang.code, DEFAULT_LANGUAGE_CODE);
    assert_eq!(lang.name, "Spanish");
}

#[test]
fn test_findLanguage_withUnknownCode_shouldReturnNone() {
    assert!(find_language("xx").is_none());
    assert!(find_language("").is_none());
    assert_eq!(find_language("JA").map(|l| l.name), Some("Japanese"));
}

#[test]
fn test_resolveLanguage_withRealButUnlistedLanguage_shouldFail() {
    let result = resolve_language("nl");
    assert!(matches!(result, Err(TranslationError::UnsupportedLanguage(ref code)) if code == "nl"));
}

#[test]
fn test_validateTargetLanguage_shouldExplainRejection() {
    let err = validate_target_language("nl").unwrap_err().to_string();
    assert!(err.contains("Dutch"), "unexpected message: {}", err);

    let err = validate_target_language("zz-top").unwrap_err().to_string();
    assert!(err.contains("Invalid language code"), "unexpected message: {}", err);

    assert_eq!(validate_target_language("ko").unwrap().code, "ko");
}
