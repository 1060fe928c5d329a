pub mod calendar;
pub mod dates;
pub mod priority;
pub mod query;
pub mod timeline;
