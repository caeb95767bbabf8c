use tracing::{info, warn};

use super::options::{GarageType, Occupancy, BATHROOM_OPTIONS, BEDROOM_OPTIONS};
use super::record::{LeadRecord, PropertyDetailRecord};
use crate::workflows::delivery::{LeadIntake, LeadSubmission, SubmissionAck};
use crate::workflows::handoff::{DraftHandoff, HandoffError};

pub const PROPERTY_DETAILS_SOURCE: &str = "property-details-form";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PropertyDetailError {
    #[error("'{value}' is not a {field} option")]
    UnknownOption { field: &'static str, value: String },
    #[error("property details have already been submitted")]
    AlreadySubmitted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailState {
    Editing,
    Complete,
}

/// Second-stage form: a single screen of optional property facts layered on the lead
/// captured by the qualifying funnel.
#[derive(Debug, Clone)]
pub struct PropertyDetailSession {
    lead: Option<LeadRecord>,
    details: PropertyDetailRecord,
    page_url: String,
    state: DetailState,
}

impl PropertyDetailSession {
    /// Open the form, picking up the stored draft if one exists.
    pub fn resume(drafts: &DraftHandoff, page_url: impl Into<String>) -> Self {
        let lead = match drafts.peek_draft() {
            Ok(lead) => lead,
            Err(error) => {
                warn!(%error, "ignoring unreadable lead draft");
                None
            }
        };

        Self {
            lead,
            details: PropertyDetailRecord::default(),
            page_url: page_url.into(),
            state: DetailState::Editing,
        }
    }

    pub fn lead(&self) -> Option<&LeadRecord> {
        self.lead.as_ref()
    }

    pub fn details(&self) -> &PropertyDetailRecord {
        &self.details
    }

    pub fn state(&self) -> DetailState {
        self.state
    }

    pub fn set_bedrooms(&mut self, value: &str) -> Result<(), PropertyDetailError> {
        self.ensure_editing()?;
        self.details.bedrooms = pick_option("bedrooms", &BEDROOM_OPTIONS, value)?;
        Ok(())
    }

    pub fn set_bathrooms(&mut self, value: &str) -> Result<(), PropertyDetailError> {
        self.ensure_editing()?;
        self.details.bathrooms = pick_option("bathrooms", &BATHROOM_OPTIONS, value)?;
        Ok(())
    }

    pub fn set_square_feet(&mut self, value: impl Into<String>) -> Result<(), PropertyDetailError> {
        self.ensure_editing()?;
        self.details.square_feet = value.into();
        Ok(())
    }

    pub fn set_year_built(&mut self, value: impl Into<String>) -> Result<(), PropertyDetailError> {
        self.ensure_editing()?;
        self.details.year_built = value.into();
        Ok(())
    }

    pub fn set_garage(&mut self, garage: Option<GarageType>) -> Result<(), PropertyDetailError> {
        self.ensure_editing()?;
        self.details.garage = garage;
        Ok(())
    }

    pub fn set_occupancy(
        &mut self,
        occupancy: Option<Occupancy>,
    ) -> Result<(), PropertyDetailError> {
        self.ensure_editing()?;
        self.details.occupancy = occupancy;
        Ok(())
    }

    pub fn set_mortgage_balance(
        &mut self,
        value: impl Into<String>,
    ) -> Result<(), PropertyDetailError> {
        self.ensure_editing()?;
        self.details.mortgage_balance = value.into();
        Ok(())
    }

    pub fn set_asking_price(&mut self, value: impl Into<String>) -> Result<(), PropertyDetailError> {
        self.ensure_editing()?;
        self.details.asking_price = value.into();
        Ok(())
    }

    pub fn set_additional_notes(
        &mut self,
        value: impl Into<String>,
    ) -> Result<(), PropertyDetailError> {
        self.ensure_editing()?;
        self.details.additional_notes = value.into();
        Ok(())
    }

    /// Merge the draft with the details, hand the result to `intake`, then drop the draft.
    pub fn submit(
        &mut self,
        intake: &dyn LeadIntake,
        drafts: &DraftHandoff,
    ) -> Result<(LeadSubmission, SubmissionAck), PropertyDetailError> {
        self.ensure_editing()?;

        let mut submission = self
            .lead
            .as_ref()
            .map(LeadRecord::to_submission)
            .unwrap_or_default();
        self.details.apply_to(&mut submission);
        submission.source = PROPERTY_DETAILS_SOURCE.to_string();
        submission.page_url = self.page_url.clone();

        let ack = intake.submit(submission.clone());
        info!(
            source = PROPERTY_DETAILS_SOURCE,
            resumed = self.lead.is_some(),
            "property details submitted"
        );

        match drafts.take_draft() {
            Ok(_) => {}
            Err(HandoffError::Corrupt(error)) => {
                warn!(%error, "discarded unreadable lead draft");
            }
            Err(error) => warn!(%error, "unable to clear lead draft"),
        }
        self.state = DetailState::Complete;
        Ok((submission, ack))
    }

    fn ensure_editing(&self) -> Result<(), PropertyDetailError> {
        match self.state {
            DetailState::Editing => Ok(()),
            DetailState::Complete => Err(PropertyDetailError::AlreadySubmitted),
        }
    }
}

/// Empty input clears a select back to "Select".
fn pick_option(
    field: &'static str,
    options: &[&str],
    value: &str,
) -> Result<Option<String>, PropertyDetailError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    if options.contains(&value) {
        Ok(Some(value.to_string()))
    } else {
        Err(PropertyDetailError::UnknownOption {
            field,
            value: value.to_string(),
        })
    }
}
