use crate::controller::Controller;
use crate::handler::AppModule;
use crate::request::{GetAllUserRequest, UserTransformer};
use crate::response::UserPresenter;
use application::service::GetUserService;
use axum::extract::State;
use axum::routing::get;
use axum::Router;

pub trait UserRouter {
    fn route_user(self) -> Self;
}

impl<D> UserRouter for Router<AppModule<D>>
where
    D: GetUserService,
{
    fn route_user(self) -> Self {
        self.route(
            "/",
            get(|State(module): State<AppModule<D>>| async move {
                Controller::new(UserTransformer, UserPresenter::new(module.pages().clone()))
                    .intake(GetAllUserRequest)
                    .try_handle(|dto| async move { module.database().get_all_users(dto).await })
                    .await
            }),
        )
    }
}
