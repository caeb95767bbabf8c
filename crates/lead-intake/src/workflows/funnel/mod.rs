//! Seller intake funnels: the step-by-step offer form, the property-detail follow-up,
//! and the contact form.

pub mod contact;
pub mod details;
pub mod engine;
pub mod options;
pub mod phone;
pub mod record;

#[cfg(test)]
mod tests;

pub use contact::{ContactMessage, CONTACT_SOURCE};
pub use details::{
    DetailState, PropertyDetailError, PropertyDetailSession, PROPERTY_DETAILS_SOURCE,
};
pub use engine::{
    Completion, CompletionView, FormSession, FormState, FunnelError, FunnelStep, FunnelVariant,
    PROPERTY_DETAILS_PATH,
};
pub use options::{
    GarageType, Occupancy, PropertyCondition, SellingReason, Timeline, BATHROOM_OPTIONS,
    BEDROOM_OPTIONS,
};
pub use phone::format_phone;
pub use record::{LeadRecord, PropertyDetailRecord};
