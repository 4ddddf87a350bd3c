use axum::extract::{Path, State};
use axum::routing::get;
use axum::Router;
use uuid::Uuid;

use application::service::{BrowseVenueService, GetVenueService};

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::request::{GetVenueRequest, VenueTransformer};
use crate::response::VenuePresenter;

/// Read-only JSON views of active venues.
pub trait ApiRouter {
    fn route_api(self) -> Self;
}

impl ApiRouter for Router<AppModule> {
    fn route_api(self) -> Self {
        self.route(
            "/api/venues",
            get(|State(module): State<AppModule>| async move {
                Controller::new((), VenuePresenter)
                    .bypass(|| async move { module.list_active_venues().await })
                    .await
                    .map_err(ErrorStatus::from)
            }),
        )
        .route(
            "/api/venues/:id",
            get(
                |State(module): State<AppModule>, Path(id): Path<Uuid>| async move {
                    Controller::new(VenueTransformer, VenuePresenter)
                        .intake(GetVenueRequest::new(id))
                        .try_handle(|dto| async move { module.get_venue(dto).await })
                        .await
                },
            ),
        )
    }
}
