pub mod delivery;
pub mod funnel;
pub mod handoff;
pub mod places;
