mod booking;
mod profile;
mod statistics;
mod venue;

pub use self::{booking::*, profile::*, statistics::*, venue::*};
