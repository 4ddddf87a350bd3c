mod booking;
mod common;
mod statistics;
mod user;
mod venue;

pub use self::{booking::*, common::*, statistics::*, user::*, venue::*};
