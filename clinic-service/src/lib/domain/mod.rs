pub mod patient;
pub mod principal;
