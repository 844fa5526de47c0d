use tracing::debug;

use super::domain::{Applicant, ApplicantDraft, ApplicantField, ApplicantId};

/// Errors raised by collection edits. The collection is left untouched whenever one is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CollectionError {
    #[error("at least one applicant is required; the last applicant cannot be removed")]
    LastApplicant,
    #[error("no applicant with id {0}")]
    UnknownApplicant(ApplicantId),
    #[error("an applicant collection needs at least one applicant")]
    Empty,
}

/// Ordered applicant list holding the non-empty and single-primary invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicantCollection {
    applicants: Vec<Applicant>,
}

impl Default for ApplicantCollection {
    fn default() -> Self {
        Self::new()
    }
}

impl ApplicantCollection {
    /// Starts with a single blank applicant marked primary.
    pub fn new() -> Self {
        Self {
            applicants: vec![Applicant::blank(true)],
        }
    }

    /// Builds a collection from prefilled drafts; the first draft becomes primary.
    pub fn from_drafts(drafts: Vec<ApplicantDraft>) -> Result<Self, CollectionError> {
        if drafts.is_empty() {
            return Err(CollectionError::Empty);
        }

        let applicants = drafts
            .into_iter()
            .enumerate()
            .map(|(index, draft)| Applicant::from_draft(draft, index == 0))
            .collect();

        Ok(Self { applicants })
    }

    pub fn applicants(&self) -> &[Applicant] {
        &self.applicants
    }

    pub fn len(&self) -> usize {
        self.applicants.len()
    }

    /// Never true for a collection built through this API.
    pub fn is_empty(&self) -> bool {
        self.applicants.is_empty()
    }

    pub fn get(&self, id: &ApplicantId) -> Option<&Applicant> {
        self.applicants.iter().find(|applicant| &applicant.id == id)
    }

    pub fn position(&self, id: &ApplicantId) -> Option<usize> {
        self.applicants
            .iter()
            .position(|applicant| &applicant.id == id)
    }

    /// Id of the applicant at a zero-based position.
    pub fn id_at(&self, index: usize) -> Option<&ApplicantId> {
        self.applicants.get(index).map(|applicant| &applicant.id)
    }

    pub fn primary(&self) -> Option<&Applicant> {
        self.applicants.iter().find(|applicant| applicant.is_primary)
    }

    /// Appends a blank, non-primary applicant and returns its id.
    pub fn add_applicant(&mut self) -> ApplicantId {
        let applicant = Applicant::blank(false);
        let id = applicant.id.clone();
        self.applicants.push(applicant);
        debug!(applicant_id = %id, total = self.applicants.len(), "applicant added");
        id
    }

    /// Removes an applicant, promoting the new first applicant when the primary is removed.
    ///
    /// Unknown ids are a no-op returning `Ok(None)`.
    pub fn delete_applicant(
        &mut self,
        id: &ApplicantId,
    ) -> Result<Option<Applicant>, CollectionError> {
        let Some(index) = self.position(id) else {
            return Ok(None);
        };

        if self.applicants.len() == 1 {
            return Err(CollectionError::LastApplicant);
        }

        let removed = self.applicants.remove(index);
        if removed.is_primary {
            if let Some(first) = self.applicants.first_mut() {
                first.is_primary = true;
                debug!(applicant_id = %first.id, "primary reassigned after removal");
            }
        }

        debug!(applicant_id = %removed.id, total = self.applicants.len(), "applicant removed");
        Ok(Some(removed))
    }

    /// Stores a raw, unvalidated value for one field.
    pub fn update_field(
        &mut self,
        id: &ApplicantId,
        field: ApplicantField,
        value: impl Into<String>,
    ) -> Result<(), CollectionError> {
        let applicant = self
            .applicants
            .iter_mut()
            .find(|applicant| &applicant.id == id)
            .ok_or_else(|| CollectionError::UnknownApplicant(id.clone()))?;

        applicant.set_value(field, value.into());
        Ok(())
    }

    /// Marks `id` primary and clears the flag on every other applicant.
    pub fn set_primary(&mut self, id: &ApplicantId) -> Result<(), CollectionError> {
        if self.position(id).is_none() {
            return Err(CollectionError::UnknownApplicant(id.clone()));
        }

        for applicant in &mut self.applicants {
            applicant.is_primary = &applicant.id == id;
        }
        debug!(applicant_id = %id, "primary applicant changed");
        Ok(())
    }
}
