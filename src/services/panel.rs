//! Per-entity engine: store, query, form session and sync controller.
//!
//! All methods take `&self`; state lives in `Cell`/`RefCell` and no borrow
//! is held across an `.await`, so several operations can be pending on the
//! same single-threaded runtime.

use std::cell::{Cell, Ref, RefCell};
use std::rc::Rc;

use crate::api::{ApiRequest, Resource, Transport, to_body};
use crate::domain::types::TypeConstraintError;
use crate::forms::{FormError, FormMode, FormSession, WriteTarget};
use crate::query::{QueryState, View, derive_view};
use crate::services::store::{CollectionStore, fetch_collection};
use crate::services::{FetchError, SyncError, SyncResult, WriteError};

/// Yes/no decision taken before a delete is sent.
#[cfg_attr(any(test, feature = "test-mocks"), mockall::automock)]
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Result of [`EntityPanel::submit`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Another submission was pending; nothing was sent.
    AlreadyInFlight,
    /// The API accepted the write and the form closed. `refresh` is the
    /// outcome of the follow-up reload.
    Saved {
        created: bool,
        refresh: Result<usize, FetchError>,
    },
}

/// Result of [`EntityPanel::delete`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeleteOutcome {
    Declined,
    Deleted,
}

type Session<E> = FormSession<<E as Resource>::Id, <E as Resource>::Draft>;

/// Clears the in-flight flag when dropped, whatever way the submit ends.
struct InFlight<'a, E: Resource> {
    form: &'a RefCell<Session<E>>,
}

impl<E: Resource> Drop for InFlight<'_, E> {
    fn drop(&mut self) {
        match self.form.try_borrow_mut() {
            Ok(mut form) => form.release(),
            Err(err) => log::warn!("Could not release {} submission flag: {err}", E::NAME),
        }
    }
}

/// Marks a load as pending while alive.
struct Loading<'a> {
    pending: &'a Cell<usize>,
}

impl<'a> Loading<'a> {
    fn start(pending: &'a Cell<usize>) -> Self {
        pending.set(pending.get() + 1);
        Self { pending }
    }
}

impl Drop for Loading<'_> {
    fn drop(&mut self) {
        self.pending.set(self.pending.get().saturating_sub(1));
    }
}

/// Everything one entity view needs: the collection, the active query, the
/// form and the network writes that tie them together.
pub struct EntityPanel<E: Resource, T> {
    transport: Rc<T>,
    store: RefCell<CollectionStore<E>>,
    query: RefCell<QueryState<E::Filter>>,
    form: RefCell<Session<E>>,
    pending_loads: Cell<usize>,
}

impl<E, T> EntityPanel<E, T>
where
    E: Resource,
    T: Transport,
{
    pub fn new(transport: Rc<T>) -> Self {
        Self {
            transport,
            store: RefCell::new(CollectionStore::new()),
            query: RefCell::new(QueryState::default()),
            form: RefCell::new(FormSession::new()),
            pending_loads: Cell::new(0),
        }
    }

    // --- collection -------------------------------------------------------

    /// Replaces the collection with the server's. On failure the previous
    /// contents stay in place.
    pub async fn load(&self) -> Result<usize, FetchError> {
        let _loading = Loading::start(&self.pending_loads);
        match fetch_collection::<E, T>(&*self.transport).await {
            Ok(items) => {
                let count = items.len();
                self.store.borrow_mut().replace(items);
                log::info!("Loaded {count} {} records", E::NAME);
                Ok(count)
            }
            Err(err) => {
                log::error!("Failed to load {} records: {err}", E::NAME);
                Err(err)
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        self.pending_loads.get() > 0
    }

    pub fn items(&self) -> Ref<'_, [E]> {
        Ref::map(self.store.borrow(), |store| store.items())
    }

    pub fn get(&self, id: E::Id) -> Option<E> {
        self.store.borrow().get(id).cloned()
    }

    // --- query ------------------------------------------------------------

    pub fn query(&self) -> QueryState<E::Filter> {
        self.query.borrow().clone()
    }

    /// Filtered items plus counts over the whole collection.
    pub fn view(&self) -> View<E> {
        derive_view(self.store.borrow().items(), &self.query.borrow())
    }

    pub fn set_search(&self, text: impl Into<String>) {
        self.query.replace_with(|query| query.clone().with_search(text));
    }

    pub fn toggle_filter(&self, filter: E::Filter) {
        self.query.replace_with(|query| query.clone().toggle_filter(filter));
    }

    pub fn clear_filter(&self) {
        self.query.replace_with(|query| query.clone().with_filter(None));
    }

    /// Selects the filter named by `label`, folding case and accents.
    pub fn set_filter_label(&self, label: &str) -> Result<(), TypeConstraintError> {
        let next = self.query().with_filter_label(label)?;
        self.query.replace(next);
        Ok(())
    }

    // --- form -------------------------------------------------------------

    pub fn form_mode(&self) -> FormMode<E::Id> {
        self.form.borrow().mode()
    }

    pub fn draft(&self) -> E::Draft {
        self.form.borrow().draft().clone()
    }

    pub fn is_submitting(&self) -> bool {
        self.form.borrow().is_submitting()
    }

    /// "New" action.
    pub fn begin_create(&self) -> Result<(), FormError> {
        self.form.borrow_mut().open_create()
    }

    /// "Edit" action on a stored entity.
    pub fn begin_edit(&self, id: E::Id) -> SyncResult<()> {
        let store = self.store.borrow();
        let entity = store
            .get(id)
            .ok_or_else(|| SyncError::NotFound(format!("{} {id}", E::NAME)))?;
        self.form.borrow_mut().open_edit(id, entity)?;
        Ok(())
    }

    /// Field edit; the mode does not change.
    pub fn update_draft<F, R>(&self, apply: F) -> Result<R, FormError>
    where
        F: FnOnce(&mut E::Draft) -> R,
    {
        self.form.borrow_mut().edit(apply)
    }

    pub fn cancel(&self) -> Result<(), FormError> {
        self.form.borrow_mut().cancel()
    }

    // --- sync -------------------------------------------------------------

    /// Sends the open draft. Create or update follows the form mode.
    ///
    /// A call made while another submission is pending returns
    /// [`SubmitOutcome::AlreadyInFlight`] without sending anything. On
    /// success the form closes and the collection is reloaded; on failure
    /// the form and its draft are left as they were.
    pub async fn submit(&self) -> SyncResult<SubmitOutcome> {
        let begun = self.form.borrow_mut().begin_submission();
        let submission = match begun {
            Ok(Some(submission)) => submission,
            Ok(None) => {
                log::warn!("Ignoring {} submit while another is in flight", E::NAME);
                return Ok(SubmitOutcome::AlreadyInFlight);
            }
            Err(err) => {
                log::warn!("Rejected {} submit: {err}", E::NAME);
                return Err(err.into());
            }
        };
        let in_flight = InFlight::<E> { form: &self.form };

        let body = to_body(&submission.payload)
            .map_err(|err| SyncError::Write(WriteError::Encode(err.to_string())))?;
        let (request, created) = match submission.target {
            WriteTarget::Create => (ApiRequest::post(E::COLLECTION_PATH, body), true),
            WriteTarget::Update(id) => (ApiRequest::put(E::member_path(id), body), false),
        };

        let response = self.transport.send(request).await.map_err(|err| {
            log::error!("Failed to save {}: {err}", E::NAME);
            SyncError::Write(err.into())
        })?;
        if !response.is_success() {
            log::error!("Failed to save {}: status {}", E::NAME, response.status);
            return Err(SyncError::Write(WriteError::Rejected(response.status)));
        }

        self.form.borrow_mut().close();
        drop(in_flight);
        log::info!(
            "{} {}",
            if created { "Created" } else { "Updated" },
            E::NAME
        );

        let refresh = self.load().await;
        Ok(SubmitOutcome::Saved { created, refresh })
    }

    /// Deletes a stored entity after `confirm` agrees. On success it is
    /// removed locally without a reload.
    pub async fn delete<C>(&self, id: E::Id, confirm: &C) -> SyncResult<DeleteOutcome>
    where
        C: Confirm + ?Sized,
    {
        let prompt = self
            .store
            .borrow()
            .get(id)
            .map(E::delete_prompt)
            .ok_or_else(|| SyncError::NotFound(format!("{} {id}", E::NAME)))?;
        if !confirm.confirm(&prompt) {
            return Ok(DeleteOutcome::Declined);
        }

        let response = self
            .transport
            .send(ApiRequest::delete(E::member_path(id)))
            .await
            .map_err(|err| {
                log::error!("Failed to delete {} {id}: {err}", E::NAME);
                SyncError::Write(err.into())
            })?;
        if !response.is_success() {
            log::error!(
                "Failed to delete {} {id}: status {}",
                E::NAME,
                response.status
            );
            return Err(SyncError::Write(WriteError::Rejected(response.status)));
        }

        self.store.borrow_mut().remove(id);
        log::info!("Deleted {} {id}", E::NAME);
        Ok(DeleteOutcome::Deleted)
    }
}
