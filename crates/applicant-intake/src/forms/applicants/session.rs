use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use super::collection::{ApplicantCollection, CollectionError};
use super::domain::{Applicant, ApplicantField, ApplicantId};
use super::validation::{validate_applicant, FieldError, FieldErrors};
use crate::forms::theme::ColorScheme;

/// Presentation state of one input.
///
/// A field stays untouched until it is edited or a validation pass runs over it. Only a
/// validation pass sets `error`; editing the field clears it again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldState {
    pub touched: bool,
    pub error: Option<FieldError>,
}

type FieldStates = BTreeMap<ApplicantField, FieldState>;

/// Applicant collection plus the per-field state the form renders.
#[derive(Debug, Clone)]
pub struct FormSession {
    collection: ApplicantCollection,
    fields: HashMap<ApplicantId, FieldStates>,
    color_scheme: ColorScheme,
}

impl Default for FormSession {
    fn default() -> Self {
        Self::new(ColorScheme::default())
    }
}

impl FormSession {
    pub fn new(color_scheme: ColorScheme) -> Self {
        Self::from_collection(ApplicantCollection::new(), color_scheme)
    }

    /// Wraps an existing collection; every field starts untouched.
    pub fn from_collection(collection: ApplicantCollection, color_scheme: ColorScheme) -> Self {
        let fields = collection
            .applicants()
            .iter()
            .map(|applicant| (applicant.id.clone(), FieldStates::new()))
            .collect();

        Self {
            collection,
            fields,
            color_scheme,
        }
    }

    pub fn collection(&self) -> &ApplicantCollection {
        &self.collection
    }

    pub fn applicants(&self) -> &[Applicant] {
        self.collection.applicants()
    }

    /// Removal is offered only while more than one applicant exists.
    pub fn can_delete(&self) -> bool {
        self.collection.len() > 1
    }

    /// The primary checkbox is locked while the primary is the only applicant.
    pub fn can_change_primary(&self) -> bool {
        self.collection.len() > 1
    }

    pub fn color_scheme(&self) -> ColorScheme {
        self.color_scheme
    }

    pub fn toggle_color_scheme(&mut self) -> ColorScheme {
        self.color_scheme = self.color_scheme.toggled();
        debug!(scheme = %self.color_scheme, "color scheme toggled");
        self.color_scheme
    }

    pub fn add_applicant(&mut self) -> ApplicantId {
        let id = self.collection.add_applicant();
        self.fields.insert(id.clone(), FieldStates::new());
        id
    }

    pub fn delete_applicant(
        &mut self,
        id: &ApplicantId,
    ) -> Result<Option<Applicant>, CollectionError> {
        let removed = self.collection.delete_applicant(id)?;
        if removed.is_some() {
            self.fields.remove(id);
        }
        Ok(removed)
    }

    /// Stores the raw value, marks the field touched, and clears its visible error.
    pub fn update_field(
        &mut self,
        id: &ApplicantId,
        field: ApplicantField,
        value: impl Into<String>,
    ) -> Result<(), CollectionError> {
        self.collection.update_field(id, field, value)?;
        let state = self
            .fields
            .entry(id.clone())
            .or_default()
            .entry(field)
            .or_default();
        state.touched = true;
        state.error = None;
        Ok(())
    }

    pub fn set_primary(&mut self, id: &ApplicantId) -> Result<(), CollectionError> {
        self.collection.set_primary(id)
    }

    /// Current state of one input; unknown applicants report the untouched default.
    pub fn field_state(&self, id: &ApplicantId, field: ApplicantField) -> FieldState {
        self.fields
            .get(id)
            .and_then(|states| states.get(&field))
            .copied()
            .unwrap_or_default()
    }

    /// Visible error message for one input.
    pub fn visible_error(&self, id: &ApplicantId, field: ApplicantField) -> Option<String> {
        self.field_state(id, field)
            .error
            .map(|error| error.to_string())
    }

    /// Validates every applicant in list order, regardless of touched state, and publishes
    /// the results to the field state.
    pub fn validate_all(&mut self) -> Vec<(ApplicantId, FieldErrors)> {
        let results: Vec<(ApplicantId, FieldErrors)> = self
            .collection
            .applicants()
            .iter()
            .map(|applicant| (applicant.id.clone(), validate_applicant(applicant)))
            .collect();

        for (id, errors) in &results {
            let states = self.fields.entry(id.clone()).or_default();
            for field in ApplicantField::ALL {
                states.insert(
                    field,
                    FieldState {
                        touched: true,
                        error: errors.get(field).copied(),
                    },
                );
            }
        }

        results
    }
}
