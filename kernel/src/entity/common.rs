mod contact;
mod operation;
mod price;
mod time;

pub use self::{contact::*, operation::*, price::*, time::*};
