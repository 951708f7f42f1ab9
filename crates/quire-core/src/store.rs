//! Flat-file document store: one JSON file holding every document, read and
//! rewritten whole on each mutation. All access is serialized behind an async
//! RwLock so concurrent writers cannot lose updates.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::document::{Document, SearchResult, SearchScope};

/// On-disk shape: `{"documents": [...]}`.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    #[serde(default)]
    documents: Vec<Document>,
}

pub struct DocumentStore {
    path: PathBuf,
    lock: RwLock<()>,
}

impl DocumentStore {
    /// Open the store, creating parent directories and an empty backing file
    /// if absent.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create store directory {:?}", parent))?;
            }
        }

        if !path.exists() {
            let empty = serde_json::to_string_pretty(&StoreFile::default())?;
            fs::write(&path, empty)
                .with_context(|| format!("Failed to initialize store file {:?}", path))?;
        }

        Ok(Self {
            path,
            lock: RwLock::new(()),
        })
    }

    /// All documents, in insertion order.
    pub async fn list(&self) -> Result<Vec<Document>> {
        let _guard = self.lock.read().await;
        Ok(self.read_file()?.documents)
    }

    /// Replace the document with a matching id, or append if none exists.
    pub async fn upsert(&self, document: Document) -> Result<()> {
        let _guard = self.lock.write().await;
        let mut db = self.read_file()?;

        match db.documents.iter_mut().find(|d| d.id == document.id) {
            Some(existing) => *existing = document,
            None => db.documents.push(document),
        }

        self.write_file(&db)
    }

    /// Remove the document with a matching id. Removing an unknown id is
    /// not an error; the store is simply left unchanged.
    pub async fn delete(&self, id: &str) -> Result<()> {
        let _guard = self.lock.write().await;
        let mut db = self.read_file()?;
        db.documents.retain(|d| d.id != id);
        self.write_file(&db)
    }

    /// Case-insensitive substring scan over every document, restricted by
    /// scope. Filename matches are only reported when scanning both fields.
    pub async fn search(&self, term: &str, scope: SearchScope) -> Result<Vec<SearchResult>> {
        let _guard = self.lock.read().await;
        let db = self.read_file()?;
        let needle = term.to_lowercase();
        let mut results = Vec::new();

        for doc in &db.documents {
            if scope.includes_questions() {
                for question in &doc.questions {
                    if question.to_lowercase().contains(&needle) {
                        results.push(SearchResult::Question {
                            content: question.clone(),
                            document_id: doc.id.clone(),
                            filename: doc.filename.clone(),
                            answer: doc.answer_for(question),
                        });
                    }
                }
            }

            if scope.includes_answers() {
                for (question, answer) in &doc.answers {
                    if answer.to_lowercase().contains(&needle) {
                        results.push(SearchResult::Answer {
                            content: answer.clone(),
                            question: question.clone(),
                            document_id: doc.id.clone(),
                            filename: doc.filename.clone(),
                        });
                    }
                }
            }

            if scope == SearchScope::Both && doc.filename.to_lowercase().contains(&needle) {
                results.push(SearchResult::Document {
                    content: doc.filename.clone(),
                    document_id: doc.id.clone(),
                    filename: doc.filename.clone(),
                });
            }
        }

        Ok(results)
    }

    fn read_file(&self) -> Result<StoreFile> {
        let data = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read store file {:?}", self.path))?;
        serde_json::from_str(&data).context("Store file is not valid JSON")
    }

    /// Write via a sibling temp file and rename so a crash mid-write cannot
    /// truncate the store.
    fn write_file(&self, db: &StoreFile) -> Result<()> {
        let json = serde_json::to_string_pretty(db).context("Failed to serialize store")?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json).with_context(|| format!("Failed to write store file {:?}", tmp))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("Failed to replace store file {:?}", self.path))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn open_temp_store() -> (DocumentStore, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::open(dir.path().join("documents.json")).unwrap();
        (store, dir)
    }

    fn doc(id: &str, filename: &str) -> Document {
        Document {
            id: id.to_string(),
            filename: filename.to_string(),
            ..Document::default()
        }
    }

    #[test]
    fn test_open_creates_backing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("documents.json");
        let _store = DocumentStore::open(&path).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["documents"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_upsert_new_id_grows_store() {
        let (store, _dir) = open_temp_store();

        store.upsert(doc("a", "a.pdf")).await.unwrap();
        assert_eq!(store.list().await.unwrap().len(), 1);

        store.upsert(doc("b", "b.pdf")).await.unwrap();
        assert_eq!(store.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_upsert_existing_id_replaces() {
        let (store, _dir) = open_temp_store();

        store.upsert(doc("a", "old.pdf")).await.unwrap();
        store.upsert(doc("a", "new.pdf")).await.unwrap();

        let docs = store.list().await.unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].filename, "new.pdf");
    }

    #[tokio::test]
    async fn test_delete_unknown_id_leaves_store_unchanged() {
        let (store, _dir) = open_temp_store();
        store.upsert(doc("a", "a.pdf")).await.unwrap();

        store.delete("no-such-id").await.unwrap();
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_removes_document() {
        let (store, _dir) = open_temp_store();
        store.upsert(doc("a", "a.pdf")).await.unwrap();
        store.upsert(doc("b", "b.pdf")).await.unwrap();

        store.delete("a").await.unwrap();

        let docs = store.list().await.unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id, "b");
    }

    #[tokio::test]
    async fn test_list_preserves_insertion_order() {
        let (store, _dir) = open_temp_store();
        for i in 0..5 {
            store
                .upsert(doc(&format!("id-{i}"), &format!("{i}.pdf")))
                .await
                .unwrap();
        }

        let docs = store.list().await.unwrap();
        assert_eq!(docs.len(), 5);
        for (i, d) in docs.iter().enumerate() {
            assert_eq!(d.id, format!("id-{i}"));
        }
    }

    #[tokio::test]
    async fn test_question_scope_never_returns_answer_results() {
        let (store, _dir) = open_temp_store();
        let mut d = doc("a", "a.pdf");
        d.questions = vec!["What is rust?".into()];
        d.answers = HashMap::from([("What is rust?".into(), "rust is a language".into())]);
        store.upsert(d).await.unwrap();

        let results = store.search("rust", SearchScope::Questions).await.unwrap();
        assert_eq!(results.len(), 1);
        assert!(matches!(results[0], SearchResult::Question { .. }));

        let results = store.search("rust", SearchScope::Answers).await.unwrap();
        assert_eq!(results.len(), 1);
        assert!(matches!(results[0], SearchResult::Answer { .. }));
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_substring() {
        let (store, _dir) = open_temp_store();
        let mut d = doc("a", "a.pdf");
        d.questions = vec!["This has FOO in it".into()];
        store.upsert(d).await.unwrap();

        let results = store.search("foo", SearchScope::Questions).await.unwrap();
        assert_eq!(results.len(), 1);
    }

    #[tokio::test]
    async fn test_filename_match_only_in_both_scope() {
        let (store, _dir) = open_temp_store();
        store.upsert(doc("a", "report.pdf")).await.unwrap();

        let both = store.search("report", SearchScope::Both).await.unwrap();
        assert_eq!(both.len(), 1);
        assert!(matches!(both[0], SearchResult::Document { .. }));

        assert!(store
            .search("report", SearchScope::Questions)
            .await
            .unwrap()
            .is_empty());
        assert!(store
            .search("report", SearchScope::Answers)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_question_match_carries_stored_answer() {
        let (store, _dir) = open_temp_store();
        let mut d = doc("a", "a.pdf");
        d.questions = vec!["What is X?".into(), "What is Y?".into()];
        d.answers = HashMap::from([("What is X?".into(), "X is a letter".into())]);
        store.upsert(d).await.unwrap();

        let results = store.search("what is x", SearchScope::Questions).await.unwrap();
        match &results[0] {
            SearchResult::Question { answer, .. } => assert_eq!(answer, "X is a letter"),
            other => panic!("expected question result, got {:?}", other),
        }

        // Unanswered question matches carry an empty answer.
        let results = store.search("what is y", SearchScope::Questions).await.unwrap();
        match &results[0] {
            SearchResult::Question { answer, .. } => assert!(answer.is_empty()),
            other => panic!("expected question result, got {:?}", other),
        }
    }
}
