// ./infrastructure/src/persistence/in_memory_repository.rs
use application::DocumentRepository;
use domain::{Document, DocumentId};
use std::collections::HashMap;
use tracing::{debug, instrument};
use uuid::Uuid;

// --- Document Repository Implementation ---

/// In-memory document store: a process-lifetime mapping from identifier to
/// document, plus the first-insertion order of the keys so snapshots are
/// deterministic. Replaced entries keep their original slot.
///
/// Not synchronised: a single logical caller (or caller-supplied external
/// locking) is assumed. Construct one instance per independent store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDocumentRepository {
    documents: HashMap<DocumentId, Document>,
    order: Vec<DocumentId>,
}

impl InMemoryDocumentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Random identifier guaranteed absent from the current key set.
    /// Uniqueness, not orderability, is the contract; collisions retry.
    fn generate_id(&self) -> DocumentId {
        loop {
            let id = DocumentId::new(Uuid::new_v4().to_string());
            if !self.documents.contains_key(&id) {
                return id;
            }
        }
    }
}

impl DocumentRepository for InMemoryDocumentRepository {
    #[instrument(skip(self, document))]
    fn save(&mut self, mut document: Document) -> Document {
        let id = match document.id.as_ref().filter(|id| !id.is_empty()) {
            Some(id) => id.clone(),
            None => {
                let id = self.generate_id();
                debug!(doc_id = %id, "Assigned generated identifier");
                document.id = Some(id.clone());
                id
            }
        };
        debug!(doc_id = %id, "Saving document to in-memory store");
        if self.documents.insert(id.clone(), document.clone()).is_none() {
            self.order.push(id);
        }
        document
    }

    #[instrument(skip(self))]
    fn find_by_id(&self, id: &str) -> Option<Document> {
        debug!(doc_id = %id, "Getting document from in-memory store");
        self.documents.get(&DocumentId::from(id)).cloned()
    }

    fn documents(&self) -> Vec<Document> {
        self.order
            .iter()
            .filter_map(|id| self.documents.get(id))
            .cloned()
            .collect()
    }
}

// --- Tests ---
