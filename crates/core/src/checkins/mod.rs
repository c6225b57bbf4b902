//! Check-ins module - recording daily check-ins against goals.

mod checkins_model;
mod checkins_service;
mod checkins_traits;


pub use checkins_model::{CheckIn, CheckInOutcome, NewCheckIn, PhotoVerification};
pub use checkins_service::CheckInService;
pub use checkins_traits::{CheckInMutation, CheckInRepositoryTrait, CheckInServiceTrait};
