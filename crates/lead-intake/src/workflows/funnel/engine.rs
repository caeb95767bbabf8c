use tracing::{debug, info, warn};

use super::options::{PropertyCondition, SellingReason, Timeline};
use super::phone::format_phone;
use super::record::LeadRecord;
use crate::workflows::delivery::{LeadIntake, LeadSubmission, SubmissionAck};
use crate::workflows::handoff::DraftHandoff;

/// One screen of the funnel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunnelStep {
    Address,
    Reason,
    Condition,
    Timeline,
    Contact,
}

impl FunnelStep {
    pub fn label(self) -> &'static str {
        match self {
            FunnelStep::Address => "Property address",
            FunnelStep::Reason => "Reason for selling",
            FunnelStep::Condition => "Property condition",
            FunnelStep::Timeline => "Timeline",
            FunnelStep::Contact => "Contact details",
        }
    }
}

/// Step layout plus what happens after the visitor finishes. Contact is always the last step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunnelVariant {
    pub name: &'static str,
    pub steps: &'static [FunnelStep],
    pub source_tag: &'static str,
    /// Page the visitor is sent to on completion. `None` shows a confirmation instead.
    pub continuation: Option<&'static str>,
}

const COMPACT_STEPS: [FunnelStep; 4] = [
    FunnelStep::Address,
    FunnelStep::Condition,
    FunnelStep::Timeline,
    FunnelStep::Contact,
];

const QUALIFYING_STEPS: [FunnelStep; 5] = [
    FunnelStep::Address,
    FunnelStep::Reason,
    FunnelStep::Condition,
    FunnelStep::Timeline,
    FunnelStep::Contact,
];

pub const PROPERTY_DETAILS_PATH: &str = "/property-details";

impl FunnelVariant {
    /// Four-step offer form embedded in the landing pages.
    pub fn compact() -> Self {
        Self {
            name: "compact",
            steps: &COMPACT_STEPS,
            source_tag: "multi-step-form",
            continuation: None,
        }
    }

    /// Five-step funnel that hands the lead to the property-detail form.
    pub fn qualifying() -> Self {
        Self {
            name: "qualifying",
            steps: &QUALIFYING_STEPS,
            source_tag: "qualifying-funnel",
            continuation: Some(PROPERTY_DETAILS_PATH),
        }
    }

    pub fn total_steps(&self) -> usize {
        self.steps.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    /// 1-based index into the variant's steps.
    Step(usize),
    Submitting,
    Complete,
}

/// What the visitor sees once the funnel completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionView {
    Confirmation,
    Redirect(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub submission: LeadSubmission,
    pub ack: SubmissionAck,
    pub view: CompletionView,
}

/// Actions the funnel refuses. The visitor never sees these as failures; they are
/// the transitions a UI would render disabled.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FunnelError {
    #[error("enter the property address to continue")]
    AddressRequired,
    #[error("'{attempted:?}' is not the current step ({current:?})")]
    WrongStep {
        attempted: FunnelStep,
        current: Option<FunnelStep>,
    },
    #[error("step {0:?} advances by selecting an option")]
    SelectionRequired(FunnelStep),
    #[error("already on the first step")]
    AtFirstStep,
    #[error("missing required contact fields: {}", .0.join(", "))]
    MissingContactFields(Vec<&'static str>),
    #[error("the form has already been submitted")]
    AlreadySubmitted,
}

/// Per-visitor funnel state machine.
#[derive(Debug, Clone)]
pub struct FormSession {
    variant: FunnelVariant,
    state: FormState,
    record: LeadRecord,
}

impl FormSession {
    pub fn new(variant: FunnelVariant, page_url: impl Into<String>) -> Self {
        let record = LeadRecord {
            page_url: page_url.into(),
            ..LeadRecord::default()
        };
        Self {
            variant,
            state: FormState::Step(1),
            record,
        }
    }

    pub fn variant(&self) -> &FunnelVariant {
        &self.variant
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn record(&self) -> &LeadRecord {
        &self.record
    }

    pub fn total_steps(&self) -> usize {
        self.variant.total_steps()
    }

    pub fn step_index(&self) -> Option<usize> {
        match self.state {
            FormState::Step(index) => Some(index),
            FormState::Submitting | FormState::Complete => None,
        }
    }

    pub fn current_step(&self) -> Option<FunnelStep> {
        self.step_index()
            .and_then(|index| self.variant.steps.get(index - 1).copied())
    }

    pub fn is_complete(&self) -> bool {
        self.state == FormState::Complete
    }

    /// Whether the explicit "Next" control is enabled. Only the address step has one.
    pub fn can_advance(&self) -> bool {
        self.current_step() == Some(FunnelStep::Address) && !self.record.address.trim().is_empty()
    }

    pub fn set_address(&mut self, address: impl Into<String>) -> Result<(), FunnelError> {
        self.expect_step(FunnelStep::Address)?;
        self.record.address = address.into();
        Ok(())
    }

    /// Confirm the address and move on.
    pub fn next(&mut self) -> Result<usize, FunnelError> {
        let step = self.active_step()?;
        if step != FunnelStep::Address {
            return Err(FunnelError::SelectionRequired(step));
        }
        if !self.can_advance() {
            return Err(FunnelError::AddressRequired);
        }
        Ok(self.advance())
    }

    pub fn select_reason(&mut self, reason: SellingReason) -> Result<usize, FunnelError> {
        self.expect_step(FunnelStep::Reason)?;
        self.record.reason = Some(reason);
        Ok(self.advance())
    }

    pub fn select_condition(&mut self, condition: PropertyCondition) -> Result<usize, FunnelError> {
        self.expect_step(FunnelStep::Condition)?;
        self.record.condition = Some(condition);
        Ok(self.advance())
    }

    pub fn select_timeline(&mut self, timeline: Timeline) -> Result<usize, FunnelError> {
        self.expect_step(FunnelStep::Timeline)?;
        self.record.timeline = Some(timeline);
        Ok(self.advance())
    }

    pub fn set_full_name(&mut self, name: impl Into<String>) -> Result<(), FunnelError> {
        self.expect_step(FunnelStep::Contact)?;
        self.record.full_name = name.into();
        Ok(())
    }

    /// Store the phone in display form.
    pub fn set_phone(&mut self, raw: &str) -> Result<(), FunnelError> {
        self.expect_step(FunnelStep::Contact)?;
        self.record.phone_number = format_phone(raw);
        Ok(())
    }

    pub fn set_email(&mut self, email: impl Into<String>) -> Result<(), FunnelError> {
        self.expect_step(FunnelStep::Contact)?;
        self.record.email_address = email.into();
        Ok(())
    }

    /// Go back one step, keeping every recorded value.
    pub fn back(&mut self) -> Result<usize, FunnelError> {
        self.active_step()?;
        match self.state {
            FormState::Step(index) if index > 1 => {
                self.state = FormState::Step(index - 1);
                debug!(funnel = self.variant.name, step = index - 1, "funnel moved back");
                Ok(index - 1)
            }
            _ => Err(FunnelError::AtFirstStep),
        }
    }

    /// Hand the finished lead to `intake` and complete.
    ///
    /// The intake is called exactly once and its delivery is never awaited. For variants
    /// with a continuation the record is also saved to `drafts`; a failed save is logged
    /// and the visitor is redirected regardless.
    pub fn submit(
        &mut self,
        intake: &dyn LeadIntake,
        drafts: &DraftHandoff,
    ) -> Result<Completion, FunnelError> {
        self.expect_step(FunnelStep::Contact)?;

        let missing = self.record.missing_contact_fields();
        if !missing.is_empty() {
            return Err(FunnelError::MissingContactFields(missing));
        }

        self.state = FormState::Submitting;
        self.record.source_tag = self.variant.source_tag.to_string();

        let submission = self.record.to_submission();
        let ack = intake.submit(submission.clone());
        info!(
            funnel = self.variant.name,
            source = self.variant.source_tag,
            "funnel lead submitted"
        );

        let view = match self.variant.continuation {
            Some(path) => {
                if let Err(error) = drafts.save_draft(&self.record) {
                    warn!(%error, funnel = self.variant.name, "unable to save lead draft");
                }
                CompletionView::Redirect(path)
            }
            None => CompletionView::Confirmation,
        };

        self.state = FormState::Complete;
        Ok(Completion {
            submission,
            ack,
            view,
        })
    }

    /// Start over with an empty record on step 1.
    pub fn reset(&mut self) {
        let page_url = std::mem::take(&mut self.record.page_url);
        self.record = LeadRecord {
            page_url,
            ..LeadRecord::default()
        };
        self.state = FormState::Step(1);
    }

    fn active_step(&self) -> Result<FunnelStep, FunnelError> {
        match self.state {
            FormState::Step(_) => self.current_step().ok_or(FunnelError::AlreadySubmitted),
            FormState::Submitting | FormState::Complete => Err(FunnelError::AlreadySubmitted),
        }
    }

    fn expect_step(&self, step: FunnelStep) -> Result<(), FunnelError> {
        let current = self.active_step()?;
        if current == step {
            Ok(())
        } else {
            Err(FunnelError::WrongStep {
                attempted: step,
                current: Some(current),
            })
        }
    }

    fn advance(&mut self) -> usize {
        let index = self.step_index().unwrap_or(1);
        let next = if index < self.total_steps() {
            index + 1
        } else {
            index
        };
        self.state = FormState::Step(next);
        debug!(funnel = self.variant.name, step = next, "funnel advanced");
        next
    }
}
