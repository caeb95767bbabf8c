use super::phone::format_phone;
use crate::workflows::delivery::{LeadIntake, LeadSubmission, SubmissionAck};

pub const CONTACT_SOURCE: &str = "contact";

/// General enquiry from the contact page. No field is required.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

impl ContactMessage {
    /// Store the phone in display form.
    pub fn set_phone(&mut self, raw: &str) {
        self.phone = format_phone(raw);
    }

    pub fn to_submission(&self) -> LeadSubmission {
        LeadSubmission {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            message: self.message.clone(),
            source: CONTACT_SOURCE.to_string(),
            ..LeadSubmission::default()
        }
    }

    pub fn send(&self, intake: &dyn LeadIntake) -> SubmissionAck {
        intake.submit(self.to_submission())
    }
}
