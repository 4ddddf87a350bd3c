use kernel::KernelError;

use crate::error::ConvertError;

pub mod database;
pub mod error;
pub mod notify;

pub(crate) fn env(key: &str) -> error_stack::Result<String, KernelError> {
    dotenvy::var(key)
        .convert_error()
        .map_err(|report| report.attach_printable(format!("missing env {key}")))
}

/// Like [`env`], but an unset variable is `None` instead of an error.
pub(crate) fn env_opt(key: &str) -> Option<String> {
    dotenvy::var(key).ok().filter(|value| !value.trim().is_empty())
}
