use error_stack::Report;

use kernel::interface::query::UserQuery;
use kernel::interface::update::UserModifier;
use kernel::prelude::entity::{User, UserId};
use kernel::KernelError;

use crate::database::memory::InMemoryConnection;

pub struct InMemoryUserRepository;

#[async_trait::async_trait]
impl UserQuery for InMemoryUserRepository {
    type Transaction = InMemoryConnection;

    async fn find_all(
        &self,
        con: &mut InMemoryConnection,
    ) -> error_stack::Result<Vec<User>, KernelError> {
        let mut users = con.staged.users.clone();
        users.sort_by(|a, b| {
            (a.created_at().as_ref(), a.id()).cmp(&(b.created_at().as_ref(), b.id()))
        });
        Ok(users)
    }

    async fn find_by_id(
        &self,
        con: &mut InMemoryConnection,
        id: &UserId,
    ) -> error_stack::Result<Option<User>, KernelError> {
        Ok(con.staged.users.iter().find(|user| user.id() == id).cloned())
    }

    async fn find_by_ids(
        &self,
        con: &mut InMemoryConnection,
        ids: &[UserId],
    ) -> error_stack::Result<Vec<User>, KernelError> {
        Ok(con
            .staged
            .users
            .iter()
            .filter(|user| ids.contains(user.id()))
            .cloned()
            .collect())
    }
}

#[async_trait::async_trait]
impl UserModifier for InMemoryUserRepository {
    type Transaction = InMemoryConnection;

    async fn create(
        &self,
        con: &mut InMemoryConnection,
        user: &User,
    ) -> error_stack::Result<(), KernelError> {
        if con.staged.users.iter().any(|stored| stored.id() == user.id()) {
            return Err(Report::new(KernelError::Internal)
                .attach_printable(format!("user {:?} already exists", user.id())));
        }
        con.staged.users.push(user.clone());
        Ok(())
    }

    async fn delete(
        &self,
        con: &mut InMemoryConnection,
        user_id: &UserId,
    ) -> error_stack::Result<(), KernelError> {
        con.staged.users.retain(|user| user.id() != user_id);
        con.staged.books.retain(|book| book.author() != user_id);
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use time::macros::datetime;
    use uuid::Uuid;

    use kernel::interface::database::DatabaseConnection;
    use kernel::interface::query::UserQuery;
    use kernel::interface::update::UserModifier;
    use kernel::prelude::entity::{CreatedAt, User, UserId, UserName};
    use kernel::KernelError;

    use crate::database::{InMemoryDatabase, InMemoryUserRepository};

    fn user(
        id: Uuid,
        name: &str,
        created_at: CreatedAt<User>,
    ) -> error_stack::Result<User, KernelError> {
        Ok(User::new(UserId::new(id), UserName::new(name)?, created_at))
    }

    #[tokio::test]
    async fn find_all_orders_by_creation_then_id() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::default();
        let mut con = db.transact().await?;

        let later = user(
            Uuid::from_u128(0),
            "later",
            CreatedAt::new(datetime!(2024-01-02 0:00 UTC)),
        )?;
        let tie_high = user(
            Uuid::from_u128(2),
            "tie high",
            CreatedAt::new(datetime!(2024-01-01 0:00 UTC)),
        )?;
        let tie_low = user(
            Uuid::from_u128(1),
            "tie low",
            CreatedAt::new(datetime!(2024-01-01 0:00 UTC)),
        )?;
        for user in [&later, &tie_high, &tie_low] {
            InMemoryUserRepository.create(&mut con, user).await?;
        }

        let names = InMemoryUserRepository
            .find_all(&mut con)
            .await?
            .iter()
            .map(|user| user.name().as_ref().clone())
            .collect::<Vec<String>>();
        assert_eq!(names, vec!["tie low", "tie high", "later"]);
        Ok(())
    }

    #[tokio::test]
    async fn find_by_ids_skips_unknown_ids() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::default();
        let mut con = db.transact().await?;
        let known = user(Uuid::new_v4(), "known", CreatedAt::now())?;
        let other = user(Uuid::new_v4(), "other", CreatedAt::now())?;
        InMemoryUserRepository.create(&mut con, &known).await?;
        InMemoryUserRepository.create(&mut con, &other).await?;

        let ids = [known.id().clone(), UserId::new(Uuid::new_v4())];
        let found = InMemoryUserRepository.find_by_ids(&mut con, &ids).await?;
        assert_eq!(found, vec![known]);
        assert!(InMemoryUserRepository
            .find_by_ids(&mut con, &[])
            .await?
            .is_empty());
        Ok(())
    }
}
