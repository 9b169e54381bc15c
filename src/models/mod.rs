pub mod auth;
pub mod breakfast;
pub mod contact;
pub mod day;
pub mod hotel_booking;
pub mod program_item;
pub mod reservation;
pub mod venue;
