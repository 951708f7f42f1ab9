use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use quire_core::{pdf, Document, DocumentStore, QuestionExtractor};

use crate::config::{self, Config};

/// Run the upload pipeline from the command line: extract text, surface
/// questions, store the document.
pub async fn execute(file: &Path, config: &Config) -> Result<()> {
    let data = fs::read(file).with_context(|| format!("Failed to read {:?}", file))?;
    let filename = file
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload.pdf")
        .to_string();

    let extracted = pdf::extract(&data)?;
    info!(filename = %filename, pages = extracted.page_count, "Extracted text");

    let llm = config::build_llm_client(config)?;
    let questions = QuestionExtractor::new(llm).extract(&extracted.text).await?;

    let document = Document {
        id: Uuid::new_v4().to_string(),
        filename: filename.clone(),
        text: extracted.text,
        questions,
        answers: HashMap::new(),
        uploaded_at: Some(Utc::now()),
    };

    println!(
        "Stored {} ({} pages, {} questions, id {})",
        filename,
        extracted.page_count,
        document.questions.len(),
        document.id
    );
    for question in &document.questions {
        println!("  - {}", question);
    }

    let store = DocumentStore::open(config::store_path(config))?;
    store.upsert(document).await?;

    Ok(())
}
