use anyhow::{Result, Context};
use log::warn;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::errors::InputError;

// @module: File input boundary and download helpers

/// Leading bytes of every PDF file
const PDF_MAGIC: &[u8] = b"%PDF-";

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    /// Pick the one file that gets processed out of everything handed over
    pub fn pick_single_input(paths: &[PathBuf]) -> Result<PathBuf, InputError> {
        let (first, rest) = paths.split_first().ok_or(InputError::Missing)?;
        if !rest.is_empty() {
            warn!("Only one document is processed at a time, ignoring {} other file(s)", rest.len());
        }
        Ok(first.clone())
    }

    /// Check that a path is a PDF no larger than `max_bytes`
    ///
    /// A file counts as a PDF when it has a `.pdf` extension or starts with
    /// the PDF magic bytes. Returns the file size.
    pub fn validate_pdf<P: AsRef<Path>>(path: P, max_bytes: u64) -> Result<u64, InputError> {
        let path = path.as_ref();
        if !Self::file_exists(path) {
            return Err(InputError::NotFound(path.to_path_buf()));
        }

        let size = fs::metadata(path)?.len();
        if size > max_bytes {
            return Err(InputError::TooLarge { size, max: max_bytes });
        }

        if !Self::has_pdf_extension(path) && !Self::has_pdf_header(path)? {
            return Err(InputError::NotPdf(path.to_path_buf()));
        }

        Ok(size)
    }

    // @checks: `.pdf` extension, any case
    pub fn has_pdf_extension<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref()
            .extension()
            .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case("pdf"))
    }

    // @checks: PDF magic bytes at the start of the file
    pub fn has_pdf_header<P: AsRef<Path>>(path: P) -> Result<bool, InputError> {
        let mut file = fs::File::open(path.as_ref())?;
        let mut header = [0u8; 5];
        let mut read = 0;
        while read < header.len() {
            let n = file.read(&mut header[read..])?;
            if n == 0 {
                break;
            }
            read += n;
        }
        Ok(read == header.len() && header == PDF_MAGIC)
    }

    /// File name the translated document is downloaded as
    pub fn download_file_name(language_code: &str) -> String {
        format!("translated_document_{}.txt", language_code)
    }

    // @generates: Output path for extracted text, `<stem>.txt`
    pub fn extracted_output_path<P1: AsRef<Path>, P2: AsRef<Path>>(input_file: P1, output_dir: P2) -> PathBuf {
        let stem = input_file.as_ref().file_stem().unwrap_or_default();
        let mut output_filename = stem.to_string_lossy().to_string();
        if output_filename.is_empty() {
            output_filename.push_str("document");
        }
        output_filename.push_str(".txt");
        output_dir.as_ref().join(output_filename)
    }

    /// Directory downloads go to when nothing is configured
    pub fn default_output_dir() -> PathBuf {
        dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }
}
