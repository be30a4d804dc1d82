use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::{DependOnBookQuery, DependOnUserQuery};
use kernel::interface::update::{DependOnBookModifier, DependOnUserModifier};
use kernel::prelude::entity::{Book, User};
use kernel::KernelError;

pub use self::{book::*, user::*};

mod book;
mod user;

#[derive(Debug, Clone, Default)]
struct MemoryStore {
    users: Vec<User>,
    books: Vec<Book>,
}

/// Process-local store behind the same traits as the PostgreSQL driver.
/// Used by tests and by the server when no database URL is configured.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDatabase {
    store: Arc<Mutex<MemoryStore>>,
}

/// Holds the store lock until it is committed or dropped, so transactions
/// run one at a time. Writes go to a private copy that is published on commit.
pub struct InMemoryConnection {
    shared: OwnedMutexGuard<MemoryStore>,
    staged: MemoryStore,
}

#[async_trait::async_trait]
impl DatabaseConnection for InMemoryDatabase {
    type Transaction = InMemoryConnection;
    async fn transact(&self) -> error_stack::Result<InMemoryConnection, KernelError> {
        let shared = Arc::clone(&self.store).lock_owned().await;
        let staged = MemoryStore::clone(&shared);
        Ok(InMemoryConnection { shared, staged })
    }
}

#[async_trait::async_trait]
impl Transaction for InMemoryConnection {
    async fn commit(mut self) -> error_stack::Result<(), KernelError> {
        *self.shared = self.staged;
        Ok(())
    }

    async fn roll_back(self) -> error_stack::Result<(), KernelError> {
        Ok(())
    }
}

impl DependOnBookQuery for InMemoryDatabase {
    type BookQuery = InMemoryBookRepository;
    fn book_query(&self) -> &Self::BookQuery {
        &InMemoryBookRepository
    }
}

impl DependOnBookModifier for InMemoryDatabase {
    type BookModifier = InMemoryBookRepository;
    fn book_modifier(&self) -> &Self::BookModifier {
        &InMemoryBookRepository
    }
}

impl DependOnUserQuery for InMemoryDatabase {
    type UserQuery = InMemoryUserRepository;
    fn user_query(&self) -> &Self::UserQuery {
        &InMemoryUserRepository
    }
}

impl DependOnUserModifier for InMemoryDatabase {
    type UserModifier = InMemoryUserRepository;
    fn user_modifier(&self) -> &Self::UserModifier {
        &InMemoryUserRepository
    }
}

#[cfg(test)]
mod test {
    use uuid::Uuid;

    use kernel::interface::database::{DatabaseConnection, Transaction};
    use kernel::interface::query::UserQuery;
    use kernel::interface::update::UserModifier;
    use kernel::prelude::entity::{CreatedAt, User, UserId, UserName};
    use kernel::KernelError;

    use crate::database::{InMemoryDatabase, InMemoryUserRepository};

    fn user() -> error_stack::Result<User, KernelError> {
        Ok(User::new(
            UserId::new(Uuid::new_v4()),
            UserName::new("tx")?,
            CreatedAt::now(),
        ))
    }

    #[tokio::test]
    async fn commit_publishes_changes() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::default();
        let user = user()?;

        let mut con = db.transact().await?;
        InMemoryUserRepository.create(&mut con, &user).await?;
        con.commit().await?;

        let mut con = db.transact().await?;
        let found = InMemoryUserRepository.find_by_id(&mut con, user.id()).await?;
        assert_eq!(found, Some(user));
        Ok(())
    }

    #[tokio::test]
    async fn uncommitted_changes_are_discarded() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::default();

        let mut con = db.transact().await?;
        InMemoryUserRepository.create(&mut con, &user()?).await?;
        con.roll_back().await?;

        let mut con = db.transact().await?;
        InMemoryUserRepository.create(&mut con, &user()?).await?;
        drop(con);

        let mut con = db.transact().await?;
        assert!(InMemoryUserRepository.find_all(&mut con).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn overlapping_transactions_keep_both_writes() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::default();
        let first = user()?;
        let second = user()?;

        let mut t1 = db.transact().await?;
        let waiting = {
            let db = db.clone();
            let second = second.clone();
            tokio::spawn(async move {
                let mut t2 = db.transact().await?;
                InMemoryUserRepository.create(&mut t2, &second).await?;
                t2.commit().await
            })
        };
        tokio::task::yield_now().await;
        InMemoryUserRepository.create(&mut t1, &first).await?;
        t1.commit().await?;
        waiting.await.expect("second transaction panicked")?;

        let mut con = db.transact().await?;
        let users = InMemoryUserRepository.find_all(&mut con).await?;
        assert_eq!(users.len(), 2);
        assert!(users.contains(&first));
        assert!(users.contains(&second));
        Ok(())
    }

    #[tokio::test]
    async fn delete_is_not_undone_by_an_overlapping_commit() -> error_stack::Result<(), KernelError>
    {
        let db = InMemoryDatabase::default();
        let leaving = user()?;
        let staying = user()?;

        let mut con = db.transact().await?;
        InMemoryUserRepository.create(&mut con, &leaving).await?;
        con.commit().await?;

        let mut deleting = db.transact().await?;
        let waiting = {
            let db = db.clone();
            let staying = staying.clone();
            tokio::spawn(async move {
                let mut con = db.transact().await?;
                InMemoryUserRepository.create(&mut con, &staying).await?;
                con.commit().await
            })
        };
        tokio::task::yield_now().await;
        InMemoryUserRepository.delete(&mut deleting, leaving.id()).await?;
        deleting.commit().await?;
        waiting.await.expect("creating transaction panicked")?;

        let mut con = db.transact().await?;
        assert_eq!(InMemoryUserRepository.find_all(&mut con).await?, vec![staying]);
        Ok(())
    }
}
