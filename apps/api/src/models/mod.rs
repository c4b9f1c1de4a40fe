pub mod application;
pub mod reference;
