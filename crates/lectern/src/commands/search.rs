use anyhow::Result;

use quire_core::{DocumentStore, SearchResult, SearchScope};

use crate::config::{self, Config};

pub async fn execute(term: &str, scope: SearchScope, config: &Config) -> Result<()> {
    let store = DocumentStore::open(config::store_path(config))?;
    let results = store.search(term, scope).await?;

    if results.is_empty() {
        println!("No matches for \"{}\"", term);
        return Ok(());
    }

    println!("{} match(es):", results.len());
    for result in &results {
        match result {
            SearchResult::Question {
                content, filename, ..
            } => println!("  [question] {} ({})", content, filename),
            SearchResult::Answer {
                content,
                question,
                filename,
                ..
            } => println!("  [answer]   {}: {} ({})", question, content, filename),
            SearchResult::Document { filename, .. } => {
                println!("  [document] {}", filename)
            }
        }
    }

    Ok(())
}
