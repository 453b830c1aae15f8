mod booking_service;
mod errors;
mod item_annotations;

#[allow(unused_imports)]
pub use booking_service::{
    ServiceDependencies, create_booking, decide_booking, find_booking, list_bookings_for_booker,
    list_bookings_for_owner,
};
#[allow(unused_imports)]
pub use errors::{BookingApplicationError, Result};
#[allow(unused_imports)]
pub use item_annotations::{BookingAnnotations, booking_annotations};
