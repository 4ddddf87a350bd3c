use std::net::SocketAddr;
use std::path::PathBuf;

use error_stack::ResultExt;
use kernel::KernelError;
use time::macros::format_description;
use time::UtcOffset;

const BIND_ADDR: &str = "BIND_ADDR";
const ADMIN_TOKEN: &str = "ADMIN_TOKEN";
const LOG_DIR: &str = "LOG_DIR";
const UTC_OFFSET: &str = "UTC_OFFSET";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_LOG_DIR: &str = "./logs/";

pub const SITE_NAME: &str = "Poolly";

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub admin_token: Option<String>,
    pub log_dir: PathBuf,
    /// Offset of the venues' local time, used to decide which booking dates are in the past.
    pub utc_offset: UtcOffset,
}

impl Config {
    pub fn from_env() -> error_stack::Result<Self, KernelError> {
        let bind_addr = dotenvy::var(BIND_ADDR).unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr
            .parse::<SocketAddr>()
            .change_context(KernelError::Internal)
            .attach_printable_lazy(|| format!("{BIND_ADDR}={bind_addr} is not a socket address"))?;
        let admin_token = dotenvy::var(ADMIN_TOKEN)
            .ok()
            .filter(|token| !token.trim().is_empty());
        let log_dir = dotenvy::var(LOG_DIR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_LOG_DIR));
        let utc_offset = match dotenvy::var(UTC_OFFSET) {
            Ok(raw) if !raw.trim().is_empty() => parse_utc_offset(&raw)?,
            _ => UtcOffset::UTC,
        };
        Ok(Self {
            bind_addr,
            admin_token,
            log_dir,
            utc_offset,
        })
    }
}

/// `+05:00`, `-03:30` or `Z`.
fn parse_utc_offset(raw: &str) -> error_stack::Result<UtcOffset, KernelError> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("z") {
        return Ok(UtcOffset::UTC);
    }
    UtcOffset::parse(
        raw,
        format_description!("[offset_hour sign:mandatory]:[offset_minute]"),
    )
    .change_context(KernelError::Internal)
    .attach_printable_lazy(|| format!("{UTC_OFFSET}={raw} is not an offset like +05:00"))
}

#[cfg(test)]
mod test {
    use time::macros::offset;
    use time::UtcOffset;

    use super::parse_utc_offset;

    #[test]
    fn utc_offsets_are_signed_hours_and_minutes() {
        assert_eq!(parse_utc_offset("+05:00").unwrap(), offset!(+5));
        assert_eq!(parse_utc_offset(" -03:30 ").unwrap(), offset!(-3:30));
        assert_eq!(parse_utc_offset("Z").unwrap(), UtcOffset::UTC);
        assert!(parse_utc_offset("5").is_err());
        assert!(parse_utc_offset("Asia/Tashkent").is_err());
    }
}
