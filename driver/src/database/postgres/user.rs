use sqlx::types::Uuid;
use sqlx::PgConnection;
use time::OffsetDateTime;

use kernel::interface::query::UserQuery;
use kernel::interface::update::UserModifier;
use kernel::prelude::entity::{CreatedAt, User, UserId, UserName};
use kernel::KernelError;

use crate::database::postgres::{IdentityTable, PostgresConnection};
use crate::error::ConvertError;

/// Users live in the configured identity table, so statements are built per table.
pub struct PostgresUserRepository {
    table: IdentityTable,
}

impl PostgresUserRepository {
    pub fn new(table: IdentityTable) -> Self {
        Self { table }
    }
}

#[async_trait::async_trait]
impl UserQuery for PostgresUserRepository {
    type Transaction = PostgresConnection;

    async fn find_all(
        &self,
        con: &mut PostgresConnection,
    ) -> error_stack::Result<Vec<User>, KernelError> {
        PgUserInternal::find_all(con.connection(), &self.table).await
    }

    async fn find_by_id(
        &self,
        con: &mut PostgresConnection,
        id: &UserId,
    ) -> error_stack::Result<Option<User>, KernelError> {
        PgUserInternal::find_by_id(con.connection(), &self.table, id).await
    }

    async fn find_by_ids(
        &self,
        con: &mut PostgresConnection,
        ids: &[UserId],
    ) -> error_stack::Result<Vec<User>, KernelError> {
        PgUserInternal::find_by_ids(con.connection(), &self.table, ids).await
    }
}

#[async_trait::async_trait]
impl UserModifier for PostgresUserRepository {
    type Transaction = PostgresConnection;

    async fn create(
        &self,
        con: &mut PostgresConnection,
        user: &User,
    ) -> error_stack::Result<(), KernelError> {
        PgUserInternal::create(con.connection(), &self.table, user).await
    }

    async fn delete(
        &self,
        con: &mut PostgresConnection,
        user_id: &UserId,
    ) -> error_stack::Result<(), KernelError> {
        PgUserInternal::delete(con.connection(), &self.table, user_id).await
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    name: String,
    created_at: OffsetDateTime,
}

impl TryFrom<UserRow> for User {
    type Error = error_stack::Report<KernelError>;
    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User::new(
            UserId::new(row.id),
            UserName::new(row.name)?,
            CreatedAt::new(row.created_at),
        ))
    }
}

pub(in crate::database) struct PgUserInternal;

impl PgUserInternal {
    async fn find_all(
        con: &mut PgConnection,
        table: &IdentityTable,
    ) -> error_stack::Result<Vec<User>, KernelError> {
        // language=postgresql
        let sql = format!(
            r#"
            SELECT id, name, created_at
            FROM {table}
            ORDER BY created_at, id
            "#
        );
        let rows = sqlx::query_as::<_, UserRow>(&sql)
            .fetch_all(con)
            .await
            .convert_error()?;
        rows.into_iter().map(User::try_from).collect()
    }

    async fn find_by_id(
        con: &mut PgConnection,
        table: &IdentityTable,
        id: &UserId,
    ) -> error_stack::Result<Option<User>, KernelError> {
        // language=postgresql
        let sql = format!(
            r#"
            SELECT id, name, created_at
            FROM {table}
            WHERE id = $1
            "#
        );
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(id.as_ref())
            .fetch_optional(con)
            .await
            .convert_error()?;
        row.map(User::try_from).transpose()
    }

    async fn find_by_ids(
        con: &mut PgConnection,
        table: &IdentityTable,
        ids: &[UserId],
    ) -> error_stack::Result<Vec<User>, KernelError> {
        let ids = ids.iter().map(|id| *id.as_ref()).collect::<Vec<Uuid>>();
        // language=postgresql
        let sql = format!(
            r#"
            SELECT id, name, created_at
            FROM {table}
            WHERE id = ANY($1)
            "#
        );
        let rows = sqlx::query_as::<_, UserRow>(&sql)
            .bind(ids)
            .fetch_all(con)
            .await
            .convert_error()?;
        rows.into_iter().map(User::try_from).collect()
    }

    async fn create(
        con: &mut PgConnection,
        table: &IdentityTable,
        user: &User,
    ) -> error_stack::Result<(), KernelError> {
        // language=postgresql
        let sql = format!(
            r#"
            INSERT INTO {table} (id, name, created_at)
            VALUES ($1, $2, $3)
            "#
        );
        sqlx::query(&sql)
            .bind(user.id().as_ref())
            .bind(user.name().as_ref())
            .bind(user.created_at().as_ref())
            .execute(con)
            .await
            .convert_error()?;
        Ok(())
    }

    /// Books go with the user through `ON DELETE CASCADE`.
    async fn delete(
        con: &mut PgConnection,
        table: &IdentityTable,
        user_id: &UserId,
    ) -> error_stack::Result<(), KernelError> {
        // language=postgresql
        let sql = format!(
            r#"
            DELETE FROM {table}
            WHERE id = $1
            "#
        );
        sqlx::query(&sql)
            .bind(user_id.as_ref())
            .execute(con)
            .await
            .convert_error()?;
        Ok(())
    }
}
