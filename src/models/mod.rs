pub mod gender;
pub mod officer;
pub mod unit;

pub use gender::Gender;
pub use officer::{NewOfficer, OfficerPatch, OfficerRecord};
pub use unit::Unit;
