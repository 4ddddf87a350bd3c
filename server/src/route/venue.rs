use axum::extract::{Path, State};
use axum::routing::get;
use axum::Router;
use uuid::Uuid;

use application::service::{
    BookVenueService, BookingFormService, BrowseVenueService, GetVenueService,
};

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::extract::{CurrentUser, JsonBody, QueryParams};
use crate::handler::AppModule;
use crate::request::{
    BookVenueRequest, BookingFormRequest, BookingTransformer, BrowseVenueRequest,
    CreateBookingRequest, GetVenueRequest, VenueTransformer,
};
use crate::response::{BookingPresenter, CreatedBookingPresenter, VenuePresenter};

pub trait VenueRouter {
    fn route_venue(self) -> Self;
}

impl VenueRouter for Router<AppModule> {
    fn route_venue(self) -> Self {
        self.route(
            "/venues",
            get(
                |State(module): State<AppModule>,
                 QueryParams(req): QueryParams<BrowseVenueRequest>| async move {
                    Controller::new(VenueTransformer, VenuePresenter)
                        .try_intake(req)
                        .map_err(ErrorStatus::from)?
                        .handle(|dto| async move { module.browse_venues(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/venues/:id",
            get(
                |State(module): State<AppModule>, Path(id): Path<Uuid>| async move {
                    Controller::new(VenueTransformer, VenuePresenter)
                        .intake(GetVenueRequest::new(id))
                        .try_handle(|dto| async move { module.get_venue(dto).await })
                        .await
                },
            ),
        )
        .route(
            "/venues/:id/book",
            get(
                |State(module): State<AppModule>,
                 CurrentUser(user_id): CurrentUser,
                 Path(id): Path<Uuid>| async move {
                    Controller::new(BookingTransformer, BookingPresenter)
                        .intake(BookingFormRequest::new(user_id, id))
                        .try_handle(|dto| async move { module.booking_form(dto).await })
                        .await
                },
            )
            .post(
                |State(module): State<AppModule>,
                 CurrentUser(user_id): CurrentUser,
                 Path(id): Path<Uuid>,
                 JsonBody(req): JsonBody<CreateBookingRequest>| async move {
                    let utc_offset = *module.utc_offset();
                    Controller::new(BookingTransformer, CreatedBookingPresenter)
                        .intake(BookVenueRequest::new(user_id, id, utc_offset, req))
                        .handle(|dto| async move { module.book_venue(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
