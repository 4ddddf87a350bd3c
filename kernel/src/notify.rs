use crate::entity::BookingEntry;
use crate::KernelError;

/// Outbound message to administrators about a freshly placed booking.
#[async_trait::async_trait]
pub trait BookingNotifier: 'static + Sync + Send {
    async fn notify_created(&self, entry: &BookingEntry) -> error_stack::Result<(), KernelError>;
}

pub trait DependOnBookingNotifier: 'static + Sync + Send {
    type BookingNotifier: BookingNotifier;
    fn booking_notifier(&self) -> &Self::BookingNotifier;
}
