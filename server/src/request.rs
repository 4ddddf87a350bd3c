mod admin;
mod booking;
mod profile;
mod venue;

pub use self::{admin::*, booking::*, profile::*, venue::*};
