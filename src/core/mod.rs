pub mod date;
pub mod plant;
pub mod registry;
