use crate::controller::TryExhaust;
use crate::error::ErrorStatus;
use crate::page::{Pages, HOME};
use application::transfer::UserDto;
use axum::response::Html;
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct UserResponse {
    id: Uuid,
    name: String,
}

#[derive(Debug, Serialize)]
struct HomePage {
    users: Vec<UserResponse>,
}

pub struct UserPresenter {
    pages: Pages,
}

impl UserPresenter {
    pub fn new(pages: Pages) -> Self {
        Self { pages }
    }
}

impl TryExhaust<Vec<UserDto>> for UserPresenter {
    type To = Html<String>;
    type Error = ErrorStatus;
    fn emit(&self, input: Vec<UserDto>) -> Result<Self::To, Self::Error> {
        let users = input
            .into_iter()
            .map(|user| UserResponse {
                id: user.id,
                name: user.name,
            })
            .collect::<Vec<_>>();

        self.pages
            .render(HOME, &HomePage { users })
            .map_err(ErrorStatus::from)
    }
}
