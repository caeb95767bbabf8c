use serde::{Deserialize, Serialize};

use super::options::{GarageType, Occupancy, PropertyCondition, SellingReason, Timeline};
use crate::workflows::delivery::LeadSubmission;

/// Everything a visitor has entered in one funnel session.
///
/// Serialized with the same keys the lead endpoint uses so a stored draft can be merged
/// straight into a submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeadRecord {
    pub address: String,
    pub reason: Option<SellingReason>,
    pub condition: Option<PropertyCondition>,
    pub timeline: Option<Timeline>,
    #[serde(rename = "name")]
    pub full_name: String,
    #[serde(rename = "phone")]
    pub phone_number: String,
    #[serde(rename = "email")]
    pub email_address: String,
    #[serde(rename = "source")]
    pub source_tag: String,
    pub page_url: String,
}

impl LeadRecord {
    pub fn to_submission(&self) -> LeadSubmission {
        LeadSubmission {
            name: self.full_name.clone(),
            email: self.email_address.clone(),
            phone: self.phone_number.clone(),
            address: self.address.clone(),
            reason: self.reason.map(|r| r.value().to_string()).unwrap_or_default(),
            condition: self
                .condition
                .map(|c| c.value().to_string())
                .unwrap_or_default(),
            timeline: self
                .timeline
                .map(|t| t.value().to_string())
                .unwrap_or_default(),
            source: self.source_tag.clone(),
            page_url: self.page_url.clone(),
            ..LeadSubmission::default()
        }
    }

    /// Contact fields still blank, by wire name.
    pub fn missing_contact_fields(&self) -> Vec<&'static str> {
        [
            ("name", &self.full_name),
            ("phone", &self.phone_number),
            ("email", &self.email_address),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect()
    }
}

/// Optional property facts collected on the second-stage form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDetailRecord {
    pub bedrooms: Option<String>,
    pub bathrooms: Option<String>,
    pub square_feet: String,
    pub year_built: String,
    pub garage: Option<GarageType>,
    pub occupancy: Option<Occupancy>,
    pub mortgage_balance: String,
    pub asking_price: String,
    pub additional_notes: String,
}

impl PropertyDetailRecord {
    pub fn apply_to(&self, submission: &mut LeadSubmission) {
        submission.bedrooms = self.bedrooms.clone().unwrap_or_default();
        submission.bathrooms = self.bathrooms.clone().unwrap_or_default();
        submission.sqft = self.square_feet.clone();
        submission.year_built = self.year_built.clone();
        submission.garage = self
            .garage
            .map(|g| g.value().to_string())
            .unwrap_or_default();
        submission.occupied = self
            .occupancy
            .map(|o| o.value().to_string())
            .unwrap_or_default();
        submission.mortgage_balance = self.mortgage_balance.clone();
        submission.asking_price = self.asking_price.clone();
        submission.additional_notes = self.additional_notes.clone();
    }
}
