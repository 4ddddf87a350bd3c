mod booking;
mod profile;
mod statistics;
mod user;
mod venue;

pub use self::{booking::*, profile::*, statistics::*, user::*, venue::*};
