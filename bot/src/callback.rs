use std::fmt::Display;
use std::str::FromStr;

use uuid::Uuid;

/// Payload carried by the inline keyboard buttons.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Callback {
    Confirm(Uuid),
    Cancel(Uuid),
    NewBookings,
    Stats,
    RefreshBookings,
}

impl Display for Callback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Callback::Confirm(id) => write!(f, "confirm:{id}"),
            Callback::Cancel(id) => write!(f, "cancel:{id}"),
            Callback::NewBookings => write!(f, "new_bookings"),
            Callback::Stats => write!(f, "stats"),
            Callback::RefreshBookings => write!(f, "refresh_bookings"),
        }
    }
}

#[derive(Debug, Eq, PartialEq)]
pub struct UnknownCallback(pub String);

impl FromStr for Callback {
    type Err = UnknownCallback;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || UnknownCallback(s.to_string());
        match s {
            "new_bookings" => return Ok(Callback::NewBookings),
            "stats" => return Ok(Callback::Stats),
            "refresh_bookings" => return Ok(Callback::RefreshBookings),
            _ => {}
        }
        let (action, id) = s.split_once(':').ok_or_else(unknown)?;
        let id = Uuid::parse_str(id).map_err(|_| unknown())?;
        match action {
            "confirm" => Ok(Callback::Confirm(id)),
            "cancel" => Ok(Callback::Cancel(id)),
            _ => Err(unknown()),
        }
    }
}
