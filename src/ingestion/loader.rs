//! Format-specific document loaders

use std::path::Path;

use crate::error::{Error, Result};
use crate::types::{Document, FileType};

/// Loader variant resolved once from the file extension
///
/// Each variant extracts plain text from its format into a [`Document`].
/// New formats are added here as variants rather than branched deep in
/// the ingestion call stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentLoader {
    /// `.pdf` via pdf-extract
    Pdf,
    /// `.docx` via docx-rs
    Docx,
    /// `.html` / `.htm` via scraper
    Html,
    /// `.txt` read as UTF-8
    Txt,
}

impl DocumentLoader {
    /// Select a loader by extension, failing on unsupported formats
    pub fn for_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match FileType::from_extension(&extension) {
            Some(FileType::Pdf) => Ok(Self::Pdf),
            Some(FileType::Docx) => Ok(Self::Docx),
            Some(FileType::Html) => Ok(Self::Html),
            Some(FileType::Txt) => Ok(Self::Txt),
            None => Err(Error::UnsupportedFormat(if extension.is_empty() {
                "(no extension)".to_string()
            } else {
                format!(".{}", extension)
            })),
        }
    }

    /// File type tag for this loader
    pub fn file_type(&self) -> FileType {
        match self {
            Self::Pdf => FileType::Pdf,
            Self::Docx => FileType::Docx,
            Self::Html => FileType::Html,
            Self::Txt => FileType::Txt,
        }
    }

    /// Extract the document text from a file
    pub fn load(&self, path: &Path) -> Result<Document> {
        let filename = display_name(path);

        let content = match self {
            Self::Pdf => load_pdf(path, &filename)?,
            Self::Docx => load_docx(path, &filename)?,
            Self::Html => load_html(path, &filename)?,
            Self::Txt => std::fs::read_to_string(path)
                .map_err(|e| Error::load(&filename, e.to_string()))?,
        };

        Ok(Document::new(content))
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

fn load_pdf(path: &Path, filename: &str) -> Result<String> {
    let raw = pdf_extract::extract_text(path)
        .map_err(|e| Error::load(filename, e.to_string()))?;

    // Strip null chars and collapse blank lines left behind by extraction
    let content = raw
        .replace('\0', "")
        .lines()
        .map(|l| l.trim_end())
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    if content.trim().is_empty() {
        return Err(Error::load(
            filename,
            "No text content could be extracted from PDF",
        ));
    }

    Ok(content)
}

fn load_docx(path: &Path, filename: &str) -> Result<String> {
    let data = std::fs::read(path).map_err(|e| Error::load(filename, e.to_string()))?;
    let docx = docx_rs::read_docx(&data).map_err(|e| Error::load(filename, e.to_string()))?;

    let mut content = String::new();
    for child in docx.document.children {
        if let docx_rs::DocumentChild::Paragraph(paragraph) = child {
            for child in paragraph.children {
                if let docx_rs::ParagraphChild::Run(run) = child {
                    for child in run.children {
                        if let docx_rs::RunChild::Text(text) = child {
                            content.push_str(&text.text);
                        }
                    }
                }
            }
            content.push('\n');
        }
    }

    Ok(content)
}

fn load_html(path: &Path, filename: &str) -> Result<String> {
    let html = std::fs::read_to_string(path).map_err(|e| Error::load(filename, e.to_string()))?;
    let document = scraper::Html::parse_document(&html);

    let body_selector = scraper::Selector::parse("body").unwrap();
    let mut content = String::new();

    if let Some(body) = document.select(&body_selector).next() {
        for text in body.text() {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                if !content.is_empty() {
                    content.push(' ');
                }
                content.push_str(trimmed);
            }
        }
    }

    Ok(content)
}
