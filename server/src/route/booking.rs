use axum::extract::{Path, State};
use axum::routing::get;
use axum::Router;
use uuid::Uuid;

use application::service::{GetBookingService, ReceiptService};

use crate::controller::Controller;
use crate::extract::CurrentUser;
use crate::handler::AppModule;
use crate::request::{BookingTransformer, OwnBookingRequest};
use crate::response::BookingPresenter;

pub trait BookingRouter {
    fn route_booking(self) -> Self;
}

impl BookingRouter for Router<AppModule> {
    fn route_booking(self) -> Self {
        self.route(
            "/bookings/:id",
            get(
                |State(module): State<AppModule>,
                 CurrentUser(user_id): CurrentUser,
                 Path(id): Path<Uuid>| async move {
                    Controller::new(BookingTransformer, BookingPresenter)
                        .intake(OwnBookingRequest::new(id, user_id))
                        .try_handle(|dto| async move { module.get_booking(dto).await })
                        .await
                },
            ),
        )
        .route(
            "/bookings/:id/receipt",
            get(
                |State(module): State<AppModule>,
                 CurrentUser(user_id): CurrentUser,
                 Path(id): Path<Uuid>| async move {
                    Controller::new(BookingTransformer, BookingPresenter)
                        .intake(OwnBookingRequest::new(id, user_id))
                        .try_handle(|dto| async move { module.receipt(dto).await })
                        .await
                },
            ),
        )
    }
}
