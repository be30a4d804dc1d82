use error_stack::Report;

use kernel::interface::query::BookQuery;
use kernel::interface::update::BookModifier;
use kernel::prelude::entity::{Book, BookId};
use kernel::KernelError;

use crate::database::memory::InMemoryConnection;

pub struct InMemoryBookRepository;

#[async_trait::async_trait]
impl BookQuery for InMemoryBookRepository {
    type Transaction = InMemoryConnection;

    async fn find_all(
        &self,
        con: &mut InMemoryConnection,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        let mut books = con.staged.books.clone();
        books.sort_by(|a, b| {
            (a.created_at().as_ref(), a.id()).cmp(&(b.created_at().as_ref(), b.id()))
        });
        Ok(books)
    }

    async fn find_by_id(
        &self,
        con: &mut InMemoryConnection,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        Ok(con.staged.books.iter().find(|book| book.id() == id).cloned())
    }
}

#[async_trait::async_trait]
impl BookModifier for InMemoryBookRepository {
    type Transaction = InMemoryConnection;

    async fn create(
        &self,
        con: &mut InMemoryConnection,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        if !con.staged.users.iter().any(|user| user.id() == book.author()) {
            return Err(Report::new(KernelError::Validation)
                .attach_printable(format!("author {:?} does not exist", book.author())));
        }
        if con.staged.books.iter().any(|stored| stored.id() == book.id()) {
            return Err(Report::new(KernelError::Internal)
                .attach_printable(format!("book {:?} already exists", book.id())));
        }
        con.staged.books.push(book.clone());
        Ok(())
    }
}
