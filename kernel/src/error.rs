use std::borrow::Cow;
use std::fmt::Display;

use error_stack::{Context, Report};

#[derive(Debug)]
pub enum KernelError {
    NotFound,
    Invalid,
    Unauthorized,
    Timeout,
    Internal,
}

impl Display for KernelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KernelError::NotFound => write!(f, "Requested resource was not found"),
            KernelError::Invalid => write!(f, "Input was rejected by validation"),
            KernelError::Unauthorized => write!(f, "Caller is not allowed to do this"),
            KernelError::Timeout => write!(f, "Process timed out"),
            KernelError::Internal => write!(f, "Internal kernel error"),
        }
    }
}

impl Context for KernelError {}

/// Attached to `KernelError::Invalid` reports so the caller can point at the offending field.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct FieldViolation {
    field: Cow<'static, str>,
    message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<Cow<'static, str>>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn into_report(self) -> Report<KernelError> {
        Report::new(KernelError::Invalid).attach_printable(self)
    }

    /// Every violation attached anywhere in the report, outermost first.
    pub fn collect(report: &Report<KernelError>) -> Vec<&FieldViolation> {
        report
            .frames()
            .filter_map(|frame| frame.downcast_ref::<FieldViolation>())
            .collect()
    }
}

impl Display for FieldViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Accumulates field failures so a form can report all of them at once.
#[derive(Debug, Default)]
pub struct Violations(Option<Report<KernelError>>);

impl Violations {
    pub fn check<T>(&mut self, result: error_stack::Result<T, KernelError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(report) => {
                self.absorb(report);
                None
            }
        }
    }

    pub fn push(&mut self, violation: FieldViolation) {
        self.absorb(violation.into_report());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    pub fn finish(self) -> error_stack::Result<(), KernelError> {
        match self.0 {
            None => Ok(()),
            Some(report) => Err(report),
        }
    }

    /// The accumulated report, or a bare `Invalid` one when nothing was recorded.
    pub fn into_report(self) -> Report<KernelError> {
        self.0
            .unwrap_or_else(|| Report::new(KernelError::Invalid))
    }

    fn absorb(&mut self, report: Report<KernelError>) {
        match &mut self.0 {
            Some(acc) => acc.extend_one(report),
            None => self.0 = Some(report),
        }
    }
}

#[cfg(test)]
mod test {
    use super::{FieldViolation, KernelError, Violations};

    #[test]
    fn violations_keep_every_field() {
        let mut violations = Violations::default();
        let ok: Option<i32> = violations.check(Ok(1));
        assert_eq!(ok, Some(1));
        violations.push(FieldViolation::new("customer_name", "This field is required."));
        violations.push(FieldViolation::new("customer_phone", "This field is required."));

        let report = violations.finish().unwrap_err();
        assert!(matches!(report.current_context(), KernelError::Invalid));
        let fields = FieldViolation::collect(&report)
            .into_iter()
            .map(FieldViolation::field)
            .collect::<Vec<_>>();
        assert_eq!(fields.len(), 2);
        assert!(fields.contains(&"customer_name"));
        assert!(fields.contains(&"customer_phone"));
    }

    #[test]
    fn empty_violations_pass() {
        assert!(Violations::default().finish().is_ok());
    }
}
