mod id;
mod summary;
mod title;

pub use self::{id::*, summary::*, title::*};
use crate::entity::common::CreatedAt;
use crate::entity::UserId;
use destructure::Destructure;
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct Book {
    id: BookId,
    title: BookTitle,
    summary: BookSummary,
    author: UserId,
    created_at: CreatedAt<Book>,
}

impl Book {
    pub fn new(
        id: BookId,
        title: BookTitle,
        summary: BookSummary,
        author: UserId,
        created_at: CreatedAt<Book>,
    ) -> Self {
        Self {
            id,
            title,
            summary,
            author,
            created_at,
        }
    }
}
