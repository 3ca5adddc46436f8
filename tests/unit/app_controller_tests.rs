/*!
 * Tests for application controller functionality
 */

use anyhow::Result;
use pdflingo::errors::{AppError, InputError, TranslationError};
use pdflingo::providers::mock::MockProvider;
use pdflingo::session::RunState;
use crate::common;

/// Test creating a controller with the default configuration
#[test]
fn test_withConfig_withDefaults_shouldSelectDefaultLanguage() -> Result<()> {
    let controller = pdflingo::Controller::with_config(common::test_config())?;
    let session = controller.session();
    assert_eq!(session.selected_language().code, "es");
    assert_eq!(session.run_state(), RunState::Idle);
    assert!(session.extracted_text().is_empty());
    Ok(())
}

/// Test that an unsupported configured language is rejected up front
#[test]
fn test_withProvider_withUnsupportedLanguage_shouldFail() {
    let mut config = common::test_config();
    config.target_language = "nl".to_string();

    let result = common::mock_controller(config, MockProvider::working());
    assert!(result.is_err());
}

#[test]
fn test_selectLanguage_shouldUpdateSession() -> Result<()> {
    let (controller, _) = common::mock_controller(common::test_config(), MockProvider::working())?;

    assert_eq!(controller.select_language("ko")?.name, "Korean");
    assert_eq!(controller.session().selected_language().code, "ko");

    assert!(matches!(
        controller.select_language("xx"),
        Err(TranslationError::UnsupportedLanguage(_))
    ));
    assert_eq!(controller.session().selected_language().code, "ko");
    Ok(())
}

/// Test that translating without a document is rejected
#[test]
fn test_translate_withoutDocument_shouldReject() -> Result<()> {
    let provider = MockProvider::working();
    let (controller, _) = common::mock_controller(common::test_config(), provider.clone())?;

    let result = tokio_test::block_on(controller.translate());
    assert!(matches!(result, Err(TranslationError::NothingToTranslate)));
    assert_eq!(provider.request_count(), 0);
    Ok(())
}

/// Test that download and speech need a finished translation
#[test]
fn test_downloadAndSpeak_withoutTranslation_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let (controller, speech) = common::mock_controller(common::test_config(), MockProvider::working())?;

    assert!(matches!(controller.download(temp_dir.path(), false), Err(AppError::File(_))));
    assert!(controller.speak().is_err());
    assert!(speech.spoken.lock().is_empty());
    Ok(())
}

/// Test that a missing input is reported as an input error
#[tokio::test]
async fn test_loadDocument_withMissingFile_shouldFail() -> Result<()> {
    let (controller, _) = common::mock_controller(common::test_config(), MockProvider::working())?;

    let result = controller.load_document(std::path::Path::new("/no/such/file.pdf")).await;
    assert!(matches!(result, Err(AppError::Input(InputError::NotFound(_)))));
    assert!(!controller.session().is_loading());
    Ok(())
}

/// Test that an unparseable PDF leaves the extracted text empty
#[tokio::test]
async fn test_loadDocument_withCorruptPdf_shouldClearText() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let (controller, _) = common::mock_controller(common::test_config(), MockProvider::working())?;

    let good = common::create_sample_pdf(temp_dir.path())?;
    controller.load_document(&good).await?;
    assert!(!controller.session().extracted_text().is_empty());

    let bad = common::create_test_file(temp_dir.path(), "broken.pdf", b"%PDF-1.4\nthis is not a pdf body")?;
    let result = controller.load_document(&bad).await;

    assert!(matches!(result, Err(AppError::Extraction(_))));
    let session = controller.session();
    assert!(session.extracted_text().is_empty());
    assert!(!session.is_loading());
    Ok(())
}

/// Test that the connection check goes to the selected language's model
#[tokio::test]
async fn test_testConnection_shouldUseSelectedModel() -> Result<()> {
    let provider = MockProvider::working();
    let (controller, _) = common::mock_controller(common::test_config(), provider.clone())?;
    controller.select_language("hi")?;

    let language = controller.test_connection().await?;
    assert_eq!(language.code, "hi");
    assert_eq!(provider.requests()[0].model, "Helsinki-NLP/opus-mt-en-hi");
    Ok(())
}

/// Test that a document without a text layer is reported as such
#[tokio::test]
async fn test_translate_withTextlessPdf_shouldReportNoExtractableText() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let pdf = common::create_test_pdf(temp_dir.path(), "scan.pdf", &[&[]])?;
    let provider = MockProvider::working();
    let (controller, _) = common::mock_controller(common::test_config(), provider.clone())?;
    controller.load_document(&pdf).await?;

    let err = controller.translate().await.unwrap_err();
    assert!(matches!(err, TranslationError::NothingToTranslate));
    assert_eq!(err.user_message(), pdflingo::errors::MSG_NO_EXTRACTABLE_TEXT);
    assert_eq!(provider.request_count(), 0);
    assert_eq!(controller.session().run_state(), RunState::Idle);
    Ok(())
}
