pub mod booking;
pub mod package;

pub use booking::{BookingRecord, BookingStatus, NewBooking};
pub use package::ServicePackage;
