//! Business logic services for the Provincial Agriculture Management Platform

pub mod association;
pub mod auth;
pub mod farmer;
pub mod harvest;
pub mod inspection;
pub mod location;
pub mod planting;
pub mod print;
pub mod report;

pub use association::AssociationService;
pub use auth::AuthService;
pub use farmer::FarmerService;
pub use harvest::HarvestService;
pub use inspection::InspectionService;
pub use location::LocationService;
pub use planting::PlantingService;
pub use report::ReportService;
