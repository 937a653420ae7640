pub mod admin;
pub mod catalog;
pub mod intake;
pub mod session;
