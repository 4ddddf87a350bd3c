use axum::extract::State;
use axum::routing::get;
use axum::Router;

use application::service::ProfileService;

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::extract::{CurrentUser, JsonBody};
use crate::handler::AppModule;
use crate::request::{ProfileTransformer, UpdateProfileRequest};
use crate::response::ProfilePresenter;

pub trait ProfileRouter {
    fn route_profile(self) -> Self;
}

impl ProfileRouter for Router<AppModule> {
    fn route_profile(self) -> Self {
        self.route(
            "/profile",
            get(
                |State(module): State<AppModule>, CurrentUser(user_id): CurrentUser| async move {
                    Controller::new(ProfileTransformer, ProfilePresenter)
                        .intake(user_id)
                        .handle(|dto| async move { module.get_profile(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .patch(
                |State(module): State<AppModule>,
                 CurrentUser(user_id): CurrentUser,
                 JsonBody(req): JsonBody<UpdateProfileRequest>| async move {
                    Controller::new(ProfileTransformer, ProfilePresenter)
                        .intake((user_id, req))
                        .handle(|dto| async move { module.update_profile(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
