use serde::{Deserialize, Serialize};

/// Why the owner wants to sell. Closed set presented as buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SellingReason {
    Foreclosure,
    Divorce,
    Inherited,
    Relocation,
    BehindOnPayments,
    TiredLandlord,
    Downsizing,
    Other,
}

impl SellingReason {
    pub const ALL: [SellingReason; 8] = [
        SellingReason::Foreclosure,
        SellingReason::Divorce,
        SellingReason::Inherited,
        SellingReason::Relocation,
        SellingReason::BehindOnPayments,
        SellingReason::TiredLandlord,
        SellingReason::Downsizing,
        SellingReason::Other,
    ];

    pub fn value(self) -> &'static str {
        match self {
            SellingReason::Foreclosure => "foreclosure",
            SellingReason::Divorce => "divorce",
            SellingReason::Inherited => "inherited",
            SellingReason::Relocation => "relocation",
            SellingReason::BehindOnPayments => "behind-on-payments",
            SellingReason::TiredLandlord => "tired-landlord",
            SellingReason::Downsizing => "downsizing",
            SellingReason::Other => "other",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SellingReason::Foreclosure => "Facing Foreclosure",
            SellingReason::Divorce => "Divorce",
            SellingReason::Inherited => "Inherited Property",
            SellingReason::Relocation => "Relocating",
            SellingReason::BehindOnPayments => "Behind on Payments",
            SellingReason::TiredLandlord => "Tired Landlord",
            SellingReason::Downsizing => "Downsizing",
            SellingReason::Other => "Other",
        }
    }

    pub fn from_value(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|reason| reason.value() == value.trim())
    }
}

/// Seller's self-assessed condition, ordered best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyCondition {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl PropertyCondition {
    pub const ALL: [PropertyCondition; 4] = [
        PropertyCondition::Excellent,
        PropertyCondition::Good,
        PropertyCondition::Fair,
        PropertyCondition::Poor,
    ];

    pub fn value(self) -> &'static str {
        match self {
            PropertyCondition::Excellent => "excellent",
            PropertyCondition::Good => "good",
            PropertyCondition::Fair => "fair",
            PropertyCondition::Poor => "poor",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PropertyCondition::Excellent => "Excellent",
            PropertyCondition::Good => "Good",
            PropertyCondition::Fair => "Fair",
            PropertyCondition::Poor => "Poor",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            PropertyCondition::Excellent => "Move-in ready, well maintained",
            PropertyCondition::Good => "Minor cosmetic updates needed",
            PropertyCondition::Fair => "Needs some repairs",
            PropertyCondition::Poor => "Major repairs or damage",
        }
    }

    pub fn from_value(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|condition| condition.value() == value.trim())
    }
}

/// How soon the seller wants to close.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeline {
    #[serde(rename = "asap")]
    Asap,
    #[serde(rename = "1-3-months")]
    OneToThreeMonths,
    #[serde(rename = "3-6-months")]
    ThreeToSixMonths,
    #[serde(rename = "exploring")]
    Exploring,
}

impl Timeline {
    pub const ALL: [Timeline; 4] = [
        Timeline::Asap,
        Timeline::OneToThreeMonths,
        Timeline::ThreeToSixMonths,
        Timeline::Exploring,
    ];

    pub fn value(self) -> &'static str {
        match self {
            Timeline::Asap => "asap",
            Timeline::OneToThreeMonths => "1-3-months",
            Timeline::ThreeToSixMonths => "3-6-months",
            Timeline::Exploring => "exploring",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Timeline::Asap => "ASAP",
            Timeline::OneToThreeMonths => "1-3 Months",
            Timeline::ThreeToSixMonths => "3-6 Months",
            Timeline::Exploring => "Just Exploring",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Timeline::Asap => "As fast as possible",
            Timeline::OneToThreeMonths => "Some flexibility",
            Timeline::ThreeToSixMonths => "No rush",
            Timeline::Exploring => "Seeing my options",
        }
    }

    pub fn from_value(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|timeline| timeline.value() == value.trim())
    }
}

/// Garage select on the property-detail form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GarageType {
    #[serde(rename = "none")]
    NoGarage,
    #[serde(rename = "1-car")]
    OneCar,
    #[serde(rename = "2-car")]
    TwoCar,
    #[serde(rename = "3-car")]
    ThreePlusCar,
    #[serde(rename = "carport")]
    Carport,
}

impl GarageType {
    pub const ALL: [GarageType; 5] = [
        GarageType::NoGarage,
        GarageType::OneCar,
        GarageType::TwoCar,
        GarageType::ThreePlusCar,
        GarageType::Carport,
    ];

    pub fn value(self) -> &'static str {
        match self {
            GarageType::NoGarage => "none",
            GarageType::OneCar => "1-car",
            GarageType::TwoCar => "2-car",
            GarageType::ThreePlusCar => "3-car",
            GarageType::Carport => "carport",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GarageType::NoGarage => "No Garage",
            GarageType::OneCar => "1-Car Garage",
            GarageType::TwoCar => "2-Car Garage",
            GarageType::ThreePlusCar => "3+ Car Garage",
            GarageType::Carport => "Carport",
        }
    }
}

/// Who currently lives in the property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Occupancy {
    OwnerOccupied,
    TenantOccupied,
    Vacant,
}

impl Occupancy {
    pub const ALL: [Occupancy; 3] = [
        Occupancy::OwnerOccupied,
        Occupancy::TenantOccupied,
        Occupancy::Vacant,
    ];

    pub fn value(self) -> &'static str {
        match self {
            Occupancy::OwnerOccupied => "owner-occupied",
            Occupancy::TenantOccupied => "tenant-occupied",
            Occupancy::Vacant => "vacant",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Occupancy::OwnerOccupied => "Yes, I live here",
            Occupancy::TenantOccupied => "Yes, tenant lives here",
            Occupancy::Vacant => "No, it's vacant",
        }
    }
}

pub const BEDROOM_OPTIONS: [&str; 6] = ["1", "2", "3", "4", "5", "6+"];
pub const BATHROOM_OPTIONS: [&str; 7] = ["1", "1.5", "2", "2.5", "3", "3.5", "4+"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_names_match_option_values() {
        for reason in SellingReason::ALL {
            let json = serde_json::to_value(reason).expect("serializes");
            assert_eq!(json, serde_json::json!(reason.value()));
        }
        for timeline in Timeline::ALL {
            let json = serde_json::to_value(timeline).expect("serializes");
            assert_eq!(json, serde_json::json!(timeline.value()));
        }
        for garage in GarageType::ALL {
            let json = serde_json::to_value(garage).expect("serializes");
            assert_eq!(json, serde_json::json!(garage.value()));
        }
        for occupancy in Occupancy::ALL {
            let json = serde_json::to_value(occupancy).expect("serializes");
            assert_eq!(json, serde_json::json!(occupancy.value()));
        }
    }

    #[test]
    fn conditions_are_ordered_best_to_worst() {
        let mut sorted = PropertyCondition::ALL;
        sorted.sort();
        assert_eq!(sorted, PropertyCondition::ALL);
        assert_eq!(PropertyCondition::Fair.description(), "Needs some repairs");
    }

    #[test]
    fn unknown_values_are_rejected() {
        assert_eq!(
            SellingReason::from_value("tired-landlord"),
            Some(SellingReason::TiredLandlord)
        );
        assert_eq!(Timeline::from_value("someday"), None);
        assert_eq!(PropertyCondition::from_value(" poor "), Some(PropertyCondition::Poor));
    }
}
