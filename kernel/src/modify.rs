mod booking;
mod profile;
mod user;
mod venue;

pub use self::{booking::*, profile::*, user::*, venue::*};
