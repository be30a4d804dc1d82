use crate::controller::TryExhaust;
use crate::error::ErrorStatus;
use crate::page::{Pages, BOOK_LIST};
use application::transfer::BookDto;
use axum::response::Html;
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct BookResponse {
    id: Uuid,
    title: String,
    summary: String,
    author: String,
}

impl From<BookDto> for BookResponse {
    fn from(value: BookDto) -> Self {
        Self {
            id: value.id,
            title: value.title,
            summary: value.summary,
            author: value.author.name,
        }
    }
}

#[derive(Debug, Serialize)]
struct BookListPage {
    books: Vec<BookResponse>,
}

pub struct BookPresenter {
    pages: Pages,
}

impl BookPresenter {
    pub fn new(pages: Pages) -> Self {
        Self { pages }
    }
}

impl TryExhaust<Vec<BookDto>> for BookPresenter {
    type To = Html<String>;
    type Error = ErrorStatus;
    fn emit(&self, input: Vec<BookDto>) -> Result<Self::To, Self::Error> {
        let books = input
            .into_iter()
            .map(BookResponse::from)
            .collect::<Vec<_>>();

        self.pages
            .render(BOOK_LIST, &BookListPage { books })
            .map_err(ErrorStatus::from)
    }
}
