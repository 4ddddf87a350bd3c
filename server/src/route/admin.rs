use axum::extract::{Path, State};
use axum::routing::{get, patch, post};
use axum::Router;
use uuid::Uuid;

use application::service::{
    BookingStatisticsService, ListBookingService, ManageVenueService, UpdateBookingStatusService,
};

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::extract::{AdminGuard, JsonBody, ValidatedQuery};
use crate::handler::AppModule;
use crate::request::{
    AdminTransformer, CreateVenueRequest, DeleteVenueRequest, ListBookingRequest,
    UpdateBookingStatusRequest, UpdateVenueRequest, VenueTransformer,
};
use crate::response::{BookingPresenter, StatisticsPresenter, VenueAdminPresenter, VenuePresenter};

pub trait AdminRouter {
    fn route_admin(self) -> Self;
}

impl AdminRouter for Router<AppModule> {
    fn route_admin(self) -> Self {
        self.route(
            "/admin/bookings",
            get(
                |_: AdminGuard,
                 State(module): State<AppModule>,
                 ValidatedQuery(req): ValidatedQuery<ListBookingRequest>| async move {
                    Controller::new(AdminTransformer, BookingPresenter)
                        .try_intake(req)
                        .map_err(ErrorStatus::from)?
                        .handle(|dto| async move { module.list_bookings(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/admin/bookings/:id/status",
            patch(
                |_: AdminGuard,
                 State(module): State<AppModule>,
                 Path(id): Path<Uuid>,
                 JsonBody(req): JsonBody<UpdateBookingStatusRequest>| async move {
                    Controller::new(AdminTransformer, BookingPresenter)
                        .try_intake((id, req))
                        .map_err(ErrorStatus::from)?
                        .handle(|dto| async move { module.update_booking_status(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/admin/statistics",
            get(|_: AdminGuard, State(module): State<AppModule>| async move {
                Controller::new((), StatisticsPresenter)
                    .bypass(|| async move { module.booking_statistics().await })
                    .await
                    .map_err(ErrorStatus::from)
            }),
        )
        .route(
            "/admin/venues",
            post(
                |_: AdminGuard,
                 State(module): State<AppModule>,
                 JsonBody(req): JsonBody<CreateVenueRequest>| async move {
                    Controller::new(VenueTransformer, VenueAdminPresenter)
                        .intake(req)
                        .handle(|dto| async move { module.create_venue(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/admin/venues/:id",
            patch(
                |_: AdminGuard,
                 State(module): State<AppModule>,
                 Path(id): Path<Uuid>,
                 JsonBody(req): JsonBody<UpdateVenueRequest>| async move {
                    Controller::new(VenueTransformer, VenuePresenter)
                        .intake((id, req))
                        .handle(|dto| async move { module.update_venue(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .delete(
                |_: AdminGuard, State(module): State<AppModule>, Path(id): Path<Uuid>| async move {
                    Controller::new(AdminTransformer, VenueAdminPresenter)
                        .intake(DeleteVenueRequest::new(id))
                        .handle(|dto| async move { module.delete_venue(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
