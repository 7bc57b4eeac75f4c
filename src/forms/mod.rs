//! Draft records and the single-form create/edit session.
//!
//! Only one draft is live per entity view. The session owns it, along with
//! the flag that marks a submission as in flight.

use std::fmt::Debug;

use serde::Serialize;
use thiserror::Error;

pub mod client;
pub mod project;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
/// Local, synchronous rejections of a draft. These never reach the network.
pub enum ValidationError {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("invalid form: {0}")]
    Invalid(String),
}

impl ValidationError {
    /// Message shown next to the form.
    pub fn user_message(&self) -> &'static str {
        match self {
            ValidationError::MissingField("cliente_id") => "Seleccione un cliente.",
            ValidationError::MissingField("nombre_proyecto") => "Nombre obligatorio.",
            ValidationError::MissingField("fecha_inicio") => "Fecha inicio obligatoria.",
            ValidationError::MissingField(_) => "Complete los campos obligatorios.",
            ValidationError::Invalid(_) => "Revise los datos del formulario.",
        }
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
/// Errors that can occur when driving the form session.
pub enum FormError {
    #[error("no form is open")]
    NotOpen,

    #[error("a form is already open")]
    AlreadyOpen,

    #[error("a submission is already in flight")]
    SubmissionInFlight,

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Scratch copy of an entity edited by the form.
pub trait Draft: Clone + Debug + Default + PartialEq {
    /// Entity the draft is copied from in edit mode.
    type Entity;
    /// Body sent to the API once the draft validates.
    type Payload: Serialize + Debug;

    /// Copies the user-editable fields of `entity`, leaving server-only
    /// fields behind.
    fn from_entity(entity: &Self::Entity) -> Self;

    /// Validates the draft and builds the request body.
    fn to_payload(&self) -> Result<Self::Payload, ValidationError>;
}

/// Current mode of the form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FormMode<Id> {
    #[default]
    Closed,
    Creating,
    Editing(Id),
}

/// Where an accepted draft is written.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WriteTarget<Id> {
    Create,
    Update(Id),
}

/// A validated draft ready to be sent.
#[derive(Debug)]
pub struct Submission<Id, P> {
    pub target: WriteTarget<Id>,
    pub payload: P,
}

/// State machine behind the create/edit form.
#[derive(Clone, Debug, PartialEq)]
pub struct FormSession<Id, D> {
    mode: FormMode<Id>,
    draft: D,
    submitting: bool,
}

impl<Id, D> Default for FormSession<Id, D>
where
    Id: Copy,
    D: Draft,
{
    fn default() -> Self {
        Self {
            mode: FormMode::Closed,
            draft: D::default(),
            submitting: false,
        }
    }
}

impl<Id, D> FormSession<Id, D>
where
    Id: Copy,
    D: Draft,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> FormMode<Id> {
        self.mode
    }

    pub fn draft(&self) -> &D {
        &self.draft
    }

    pub fn is_open(&self) -> bool {
        !matches!(self.mode, FormMode::Closed)
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// `Closed → Creating` with a default draft.
    pub fn open_create(&mut self) -> Result<(), FormError> {
        if self.is_open() {
            return Err(FormError::AlreadyOpen);
        }
        self.mode = FormMode::Creating;
        self.draft = D::default();
        Ok(())
    }

    /// `Closed → Editing(id)` with a draft copied from `entity`.
    pub fn open_edit(&mut self, id: Id, entity: &D::Entity) -> Result<(), FormError> {
        if self.is_open() {
            return Err(FormError::AlreadyOpen);
        }
        self.mode = FormMode::Editing(id);
        self.draft = D::from_entity(entity);
        Ok(())
    }

    /// Mutates the draft in place and hands back whatever `apply` returns.
    /// The mode does not change.
    pub fn edit<F, R>(&mut self, apply: F) -> Result<R, FormError>
    where
        F: FnOnce(&mut D) -> R,
    {
        if !self.is_open() {
            return Err(FormError::NotOpen);
        }
        Ok(apply(&mut self.draft))
    }

    /// User-initiated close. Refused while a submission is pending.
    pub fn cancel(&mut self) -> Result<(), FormError> {
        if !self.is_open() {
            return Err(FormError::NotOpen);
        }
        if self.submitting {
            return Err(FormError::SubmissionInFlight);
        }
        self.close();
        Ok(())
    }

    /// Returns to `Closed`, resetting the draft and clearing the in-flight flag.
    pub fn close(&mut self) {
        self.mode = FormMode::Closed;
        self.draft = D::default();
        self.submitting = false;
    }

    /// Validates the draft and marks the submission as in flight.
    ///
    /// Returns `Ok(None)` without touching anything when a submission is
    /// already pending.
    pub fn begin_submission(&mut self) -> Result<Option<Submission<Id, D::Payload>>, FormError> {
        let target = match self.mode {
            FormMode::Closed => return Err(FormError::NotOpen),
            FormMode::Creating => WriteTarget::Create,
            FormMode::Editing(id) => WriteTarget::Update(id),
        };
        if self.submitting {
            return Ok(None);
        }
        let payload = self.draft.to_payload()?;
        self.submitting = true;
        Ok(Some(Submission { target, payload }))
    }

    /// Clears the in-flight flag, keeping mode and draft.
    pub fn release(&mut self) {
        self.submitting = false;
    }
}
