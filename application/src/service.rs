mod booking;
mod profile;
mod receipt;
mod statistics;
mod venue;

pub use self::{booking::*, profile::*, receipt::*, statistics::*, venue::*};
