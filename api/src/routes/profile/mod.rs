pub mod checkin_route;
pub mod profile_response;
pub mod profile_route;
