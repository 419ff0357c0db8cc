pub mod affordability;
pub mod compare;
pub mod schedule;
pub mod session;
