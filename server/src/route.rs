use application::service::{GetBookService, GetUserService};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handler::AppModule;

pub use self::{book::*, user::*};

mod book;
mod user;

pub fn build<D>(module: AppModule<D>) -> Router
where
    D: GetBookService + GetUserService,
{
    Router::<AppModule<D>>::new()
        .route_user()
        .route_book()
        .layer(TraceLayer::new_for_http())
        .with_state(module)
}
