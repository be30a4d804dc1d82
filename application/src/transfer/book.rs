use time::OffsetDateTime;
use uuid::Uuid;

use kernel::prelude::entity::{Book, DestructBook, DestructUser, User};

#[derive(Debug, Clone)]
pub struct BookDto {
    pub id: Uuid,
    pub title: String,
    pub summary: String,
    pub author: AuthorDto,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct AuthorDto {
    pub id: Uuid,
    pub name: String,
}

impl From<(Book, User)> for BookDto {
    fn from((book, author): (Book, User)) -> Self {
        let DestructBook {
            id,
            title,
            summary,
            created_at,
            ..
        } = book.into_destruct();
        let DestructUser { id: author_id, name, .. } = author.into_destruct();
        Self {
            id: id.into(),
            title: title.into(),
            summary: summary.into(),
            author: AuthorDto {
                id: author_id.into(),
                name: name.into(),
            },
            created_at: created_at.into(),
        }
    }
}

pub struct GetAllBookDto;

pub struct CreateBookDto {
    pub title: String,
    pub summary: String,
    pub author_id: Uuid,
}
