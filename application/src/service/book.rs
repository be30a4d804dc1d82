use std::collections::HashMap;

use error_stack::Report;
use uuid::Uuid;

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::{BookQuery, DependOnBookQuery, DependOnUserQuery, UserQuery};
use kernel::interface::update::{BookModifier, DependOnBookModifier};
use kernel::prelude::entity::{
    Book, BookId, BookSummary, BookTitle, CreatedAt, User, UserId,
};
use kernel::KernelError;

use crate::transfer::{BookDto, CreateBookDto, GetAllBookDto};

#[async_trait::async_trait]
pub trait GetBookService: 'static + Sync + Send + DependOnBookQuery + DependOnUserQuery {
    /// Every book with its author resolved, read in a single transaction.
    async fn get_all_books(
        &self,
        _dto: GetAllBookDto,
    ) -> error_stack::Result<Vec<BookDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let books = self.book_query().find_all(&mut connection).await?;

        let mut ids = books
            .iter()
            .map(|book| book.author().clone())
            .collect::<Vec<UserId>>();
        ids.sort();
        ids.dedup();
        let authors = self
            .user_query()
            .find_by_ids(&mut connection, &ids)
            .await?
            .into_iter()
            .map(|user| (user.id().clone(), user))
            .collect::<HashMap<UserId, User>>();

        let mut result = Vec::with_capacity(books.len());
        for book in books {
            let author = authors.get(book.author()).cloned().ok_or_else(|| {
                Report::new(KernelError::Internal).attach_printable(format!(
                    "author {:?} of book {:?} does not exist",
                    book.author(),
                    book.id()
                ))
            })?;
            result.push(BookDto::from((book, author)));
        }
        Ok(result)
    }
}

impl<T> GetBookService for T where T: DependOnBookQuery + DependOnUserQuery {}

#[async_trait::async_trait]
pub trait CreateBookService: 'static + Sync + Send + DependOnBookModifier {
    async fn create_book(&self, dto: CreateBookDto) -> error_stack::Result<Uuid, KernelError> {
        let uuid = Uuid::new_v4();
        let book = Book::new(
            BookId::new(uuid),
            BookTitle::new(dto.title)?,
            BookSummary::new(dto.summary),
            UserId::new(dto.author_id),
            CreatedAt::now(),
        );

        let mut connection = self.database_connection().transact().await?;
        self.book_modifier().create(&mut connection, &book).await?;
        connection.commit().await?;

        tracing::info!(book_id = %uuid, author_id = %dto.author_id, "created book");
        Ok(uuid)
    }
}

impl<T> CreateBookService for T where T: DependOnBookModifier {}
