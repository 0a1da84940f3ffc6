//! Form Document Store
//!
//! Owns the current `FormDocument` and exposes every query and mutation the
//! builder, preview and fill views need.
//!
//! Each mutation works on a copy of the current snapshot, edits only the
//! entities it targets and swaps the result in atomically. Readers holding
//! an older snapshot keep seeing it unchanged. A mutation that targets a
//! missing id, or an option/grid operation against the wrong kind of field,
//! leaves the snapshot in place and reports `Mutation::Skipped`.

mod fields;
mod options;
mod sections;

use crate::config::StoreConfig;
use crate::domain::{
    ChoiceOption, FormDocument, FormEvent, FormField, FormHeader, GridAxis, HeaderPatch,
    Mutation, Section, SkipReason, StoreEvent, UserInputOption,
};
use crate::integrity::ensure_integrity;
use arc_swap::ArcSwap;
use forms_common::{FormsError, FormsResult, IdGenerator};
use parking_lot::{Mutex, RwLock};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

type Callback = Arc<dyn Fn(&StoreEvent) + Send + Sync>;

/// Handle returned by `subscribe`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// What a successful edit reports back to `commit`
struct Applied {
    event: FormEvent,
    created: Option<String>,
}

impl Applied {
    fn event(event: FormEvent) -> Self {
        Self {
            event,
            created: None,
        }
    }

    fn created(event: FormEvent, id: String) -> Self {
        Self {
            event,
            created: Some(id),
        }
    }
}

/// Form document store
pub struct FormStore {
    document: ArcSwap<FormDocument>,
    /// Bumped once per applied mutation
    version: AtomicU64,
    /// Serializes writers; readers never take it
    writer: Mutex<()>,
    subscribers: RwLock<Vec<(SubscriptionId, Callback)>>,
    next_subscription: AtomicU64,
    ids: IdGenerator,
    config: StoreConfig,
}

impl FormStore {
    /// Store holding a fresh default document
    pub fn new(config: StoreConfig) -> Self {
        let document = FormDocument::with_default_section(&config);
        Self::with_document(document, config)
    }

    /// Store holding `document`
    pub fn with_document(document: FormDocument, config: StoreConfig) -> Self {
        tracing::debug!(document_id = document.id(), "form store created");
        Self {
            document: ArcSwap::from_pointee(document),
            version: AtomicU64::new(0),
            writer: Mutex::new(()),
            subscribers: RwLock::new(Vec::new()),
            next_subscription: AtomicU64::new(0),
            ids: config.id_generator(),
            config,
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn id_generator(&self) -> &IdGenerator {
        &self.ids
    }

    /// Number of applied mutations so far
    #[inline]
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::Acquire)
    }

    /// Current document
    #[inline]
    pub fn snapshot(&self) -> Arc<FormDocument> {
        self.document.load_full()
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn header(&self) -> Arc<FormHeader> {
        self.document.load().header_arc().clone()
    }

    pub fn get_section(&self, id: &str) -> Option<Arc<Section>> {
        self.document.load().section(id).cloned()
    }

    pub fn get_field(&self, id: &str) -> Option<Arc<FormField>> {
        self.document.load().field(id).cloned()
    }

    /// Like `get_field`, for callers that want a hard failure
    pub fn require_field(&self, id: &str) -> FormsResult<Arc<FormField>> {
        self.get_field(id)
            .ok_or_else(|| FormsError::FieldNotFound(id.to_string()))
    }

    pub fn get_option(&self, field_id: &str, option_id: &str) -> Option<UserInputOption> {
        self.document.load().option(field_id, option_id)
    }

    pub fn get_row(&self, field_id: &str, row_id: &str) -> Option<ChoiceOption> {
        self.document.load().grid_option(field_id, GridAxis::Rows, row_id)
    }

    pub fn get_column(&self, field_id: &str, column_id: &str) -> Option<ChoiceOption> {
        self.document
            .load()
            .grid_option(field_id, GridAxis::Columns, column_id)
    }

    // =========================================================================
    // Subscriptions
    // =========================================================================

    /// Register `callback` for every applied mutation.
    ///
    /// Callbacks run on the mutating thread after the new snapshot is
    /// visible and may call back into the store.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&StoreEvent) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_subscription.fetch_add(1, Ordering::Relaxed));
        self.subscribers.write().push((id, Arc::new(callback)));
        id
    }

    /// Returns `false` when `id` was not subscribed
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.subscribers.write();
        let before = subscribers.len();
        subscribers.retain(|(sub, _)| *sub != id);
        subscribers.len() != before
    }

    // =========================================================================
    // Document and header
    // =========================================================================

    /// Replace the whole document, unchecked
    pub fn set_form(&self, document: FormDocument) -> Mutation {
        self.commit("set_form", move |doc| {
            *doc = document;
            Ok(Applied::event(FormEvent::DocumentReplaced {
                document_id: doc.id().to_string(),
            }))
        })
    }

    /// Replace the whole document after an integrity check.
    ///
    /// On failure the current document stays in place.
    pub fn try_set_form(&self, document: FormDocument) -> FormsResult<()> {
        if let Err(err) = ensure_integrity(&document) {
            tracing::warn!(document_id = document.id(), "rejected document: {}", err);
            return Err(err);
        }
        self.set_form(document);
        Ok(())
    }

    /// Start over with a fresh default document
    pub fn reset(&self) -> Mutation {
        let fresh = FormDocument::with_default_section(&self.config);
        self.set_form(fresh)
    }

    pub fn set_header(&self, header: FormHeader) -> Mutation {
        self.commit("set_header", move |doc| {
            *doc.header_mut() = header;
            Ok(Applied::event(FormEvent::HeaderUpdated))
        })
    }

    pub fn update_header(&self, patch: HeaderPatch) -> Mutation {
        self.commit("update_header", move |doc| {
            patch.apply(doc.header_mut());
            Ok(Applied::event(FormEvent::HeaderUpdated))
        })
    }

    // =========================================================================
    // Commit path
    // =========================================================================

    fn commit<F>(&self, op: &'static str, edit: F) -> Mutation
    where
        F: FnOnce(&mut FormDocument) -> Result<Applied, SkipReason>,
    {
        let guard = self.writer.lock();
        let current = self.document.load_full();
        let mut next = FormDocument::clone(&current);

        let applied = match edit(&mut next) {
            Ok(applied) => applied,
            Err(reason) => {
                tracing::trace!(op, %reason, "mutation skipped");
                return Mutation::Skipped(reason);
            }
        };

        let snapshot = Arc::new(next);
        self.document.store(snapshot.clone());
        let version = self.version.fetch_add(1, Ordering::AcqRel) + 1;
        drop(guard);

        tracing::debug!(op, version, event = applied.event.event_type(), "mutation applied");
        self.notify(StoreEvent {
            event: applied.event,
            version,
            snapshot,
        });

        match applied.created {
            Some(id) => Mutation::Created(id),
            None => Mutation::Applied,
        }
    }

    fn notify(&self, event: StoreEvent) {
        let callbacks: Vec<Callback> = self
            .subscribers
            .read()
            .iter()
            .map(|(_, cb)| cb.clone())
            .collect();
        for callback in callbacks {
            callback(&event);
        }
    }
}

impl Default for FormStore {
    fn default() -> Self {
        Self::new(StoreConfig::default())
    }
}

impl std::fmt::Debug for FormStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormStore")
            .field("document_id", &self.snapshot().id())
            .field("version", &self.version())
            .field("subscribers", &self.subscribers.read().len())
            .finish()
    }
}

#[cfg(test)]
mod tests;
