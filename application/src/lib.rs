use domain::{Document, SearchRequest};
use thiserror::Error;
use tracing::{debug, instrument};

// --- Application Errors ---

#[derive(Error, Debug, PartialEq)]
pub enum ApplicationError {
    /// The author-id criterion dereferences the document's author directly.
    /// A matched-so-far document without one surfaces as this error rather
    /// than a silent non-match.
    #[error("document '{document_id}' has no author while an author-id criterion is active")]
    MissingAuthor { document_id: String },
}

// --- Infrastructure Interface (Trait) ---

/// Interface for storing and retrieving documents.
pub trait DocumentRepository {
    /// Inserts or replaces a document keyed by its identifier, assigning a
    /// fresh unique identifier first when the incoming one is absent or
    /// empty. Returns the saved document with its identifier populated.
    /// Always succeeds; `created` is never generated or altered here.
    fn save(&mut self, document: Document) -> Document;
    /// Exact-key lookup; `None` when no entry exists for `id`.
    fn find_by_id(&self, id: &str) -> Option<Document>;
    /// Snapshot of every stored document, in insertion order. Later
    /// mutations do not affect an already-returned snapshot.
    fn documents(&self) -> Vec<Document>;
}

// --- Query Engine ---

/// A single search criterion, evaluated per document. Fallible because the
/// author-id criterion can hit a document that has no author.
type Criterion<'a> = Box<dyn Fn(&Document) -> Result<bool, ApplicationError> + 'a>;

/// Non-null candidates of an optional candidate list.
///
/// Null entries are ignored, never treated as matches. A list left without
/// usable candidates (empty, or nulls only) yields `None`, which skips the
/// criterion exactly like an absent field.
fn usable_candidates(list: &Option<Vec<Option<String>>>) -> Option<Vec<&str>> {
    let candidates: Vec<&str> = list.as_ref()?.iter().flatten().map(String::as_str).collect();
    if candidates.is_empty() {
        None
    } else {
        Some(candidates)
    }
}

/// Builds the predicate table for a request: one entry per present
/// criterion, in evaluation order (title prefix, content substring,
/// author id, createdFrom, createdTo). Criteria are ANDed per document with
/// short-circuiting, so a document rejected by an earlier criterion never
/// reaches the author dereference.
fn criteria(request: &SearchRequest) -> Vec<Criterion<'_>> {
    let mut table: Vec<Criterion<'_>> = Vec::new();

    if let Some(prefixes) = usable_candidates(&request.title_prefixes) {
        table.push(Box::new(move |doc: &Document| {
            Ok(doc
                .title
                .as_deref()
                .is_some_and(|title| prefixes.iter().any(|p| title.starts_with(p))))
        }));
    }

    if let Some(needles) = usable_candidates(&request.contains_contents) {
        table.push(Box::new(move |doc: &Document| {
            Ok(doc
                .content
                .as_deref()
                .is_some_and(|content| needles.iter().any(|n| content.contains(n))))
        }));
    }

    if let Some(author_ids) = usable_candidates(&request.author_ids) {
        table.push(Box::new(move |doc: &Document| {
            let author = doc
                .author
                .as_ref()
                .ok_or_else(|| ApplicationError::MissingAuthor {
                    document_id: doc
                        .id
                        .as_ref()
                        .map(|id| id.to_string())
                        .unwrap_or_default(),
                })?;
            Ok(author_ids.iter().any(|id| *id == author.id))
        }));
    }

    // Both bounds are exclusive: a document created exactly at the bound
    // does not match. An absent `created` fails either bound.
    if let Some(from) = request.created_from {
        table.push(Box::new(move |doc: &Document| {
            Ok(doc.created.is_some_and(|created| created > from))
        }));
    }

    if let Some(to) = request.created_to {
        table.push(Box::new(move |doc: &Document| {
            Ok(doc.created.is_some_and(|created| created < to))
        }));
    }

    table
}

// --- Application Service (Use Case) ---

/// Use-case layer over a document repository: upsert, point lookup, and
/// multi-criteria filtered search.
///
/// Owns its repository; construct one service per independent store.
pub struct DocumentService<R> {
    repo: R,
}

impl<R: DocumentRepository> DocumentService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Access to the underlying repository.
    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Upserts `document`, returning it with its identifier populated.
    #[instrument(skip(self, document))]
    pub fn save(&mut self, document: Document) -> Document {
        let document = self.repo.save(document);
        debug!(doc_id = ?document.id, "Document saved");
        document
    }

    /// Exact-key lookup by identifier.
    #[instrument(skip(self))]
    pub fn find_by_id(&self, id: &str) -> Option<Document> {
        let found = self.repo.find_by_id(id);
        debug!(doc_id = %id, found = found.is_some(), "Point lookup");
        found
    }

    /// Evaluates `request` against the full stored set and returns the
    /// matches in the store's insertion order.
    ///
    /// A document matches when it passes every criterion present in the
    /// request; absent request fields are skipped. The one error condition
    /// is [`ApplicationError::MissingAuthor`], raised when the author-id
    /// criterion reaches a document without an author.
    #[instrument(skip(self, request))]
    pub fn search(&self, request: &SearchRequest) -> Result<Vec<Document>, ApplicationError> {
        let table = criteria(request);
        let mut matches = Vec::new();
        'documents: for document in self.repo.documents() {
            for criterion in &table {
                if !criterion(&document)? {
                    continue 'documents;
                }
            }
            matches.push(document);
        }
        debug!(
            criteria = table.len(),
            matched = matches.len(),
            "Search finished"
        );
        Ok(matches)
    }
}

// --- Tests ---
