mod admin;
mod api;
mod booking;
mod profile;
mod venue;

pub use self::{admin::*, api::*, booking::*, profile::*, venue::*};
