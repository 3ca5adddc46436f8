/*!
 * Tests for file input checks and output paths
 */

use anyhow::Result;
use std::path::{Path, PathBuf};
use pdflingo::errors::InputError;
use pdflingo::file_utils::FileManager;
use crate::common;

/// Test that a small PDF passes validation
#[test]
fn test_validatePdf_withValidFile_shouldReturnSize() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "doc.pdf", b"%PDF-1.5 rest")?;

    assert_eq!(FileManager::validate_pdf(&path, 1024)?, 13);
    Ok(())
}

/// Test that a file over the cap is rejected with the size error
#[test]
fn test_validatePdf_withOversizedFile_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "big.pdf", &vec![b'x'; 2048])?;

    let result = FileManager::validate_pdf(&path, 1024);
    assert!(matches!(result, Err(InputError::TooLarge { size: 2048, max: 1024 })));
    Ok(())
}

/// Test that a PDF exactly at the cap is accepted
#[test]
fn test_validatePdf_atExactCap_shouldPass() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "edge.pdf", &vec![b'x'; 1024])?;

    assert!(FileManager::validate_pdf(&path, 1024).is_ok());
    Ok(())
}

/// Test content sniffing for files without the extension
#[test]
fn test_validatePdf_withoutExtension_shouldSniffHeader() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let pdf = common::create_test_file(temp_dir.path(), "scan", b"%PDF-1.4\n")?;
    let text = common::create_test_file(temp_dir.path(), "notes.txt", b"hello")?;

    assert!(FileManager::validate_pdf(&pdf, 1024).is_ok());
    assert!(matches!(FileManager::validate_pdf(&text, 1024), Err(InputError::NotPdf(_))));
    Ok(())
}

#[test]
fn test_validatePdf_withMissingFile_shouldFail() {
    let result = FileManager::validate_pdf("/definitely/not/here.pdf", 1024);
    assert!(matches!(result, Err(InputError::NotFound(_))));
}

#[test]
fn test_hasPdfExtension_shouldIgnoreCase() {
    assert!(FileManager::has_pdf_extension("paper.PDF"));
    assert!(FileManager::has_pdf_extension(Path::new("dir/paper.pdf")));
    assert!(!FileManager::has_pdf_extension("paper.pdf.txt"));
}

#[test]
fn test_pickSingleInput_shouldUseFirstFile() {
    let files = vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")];
    assert_eq!(FileManager::pick_single_input(&files).unwrap(), PathBuf::from("a.pdf"));
    assert!(matches!(FileManager::pick_single_input(&[]), Err(InputError::Missing)));
}

#[test]
fn test_downloadFileName_shouldEmbedLanguageCode() {
    assert_eq!(FileManager::download_file_name("fr"), "translated_document_fr.txt");
}

#[test]
fn test_extractedOutputPath_shouldReplaceExtension() {
    let path = FileManager::extracted_output_path("/in/report.final.pdf", "/out");
    assert_eq!(path, PathBuf::from("/out/report.final.txt"));
}

/// Test that writing creates missing parent directories
#[test]
fn test_writeToFile_shouldCreateParents() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("nested").join("out.txt");

    FileManager::write_to_file(&path, "Hola.")?;
    assert_eq!(std::fs::read_to_string(&path)?, "Hola.");
    Ok(())
}
