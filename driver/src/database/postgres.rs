use std::fmt::{Display, Formatter};

use error_stack::ResultExt;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgConnection, Pool, Postgres};

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::{DependOnBookQuery, DependOnUserQuery};
use kernel::interface::update::{DependOnBookModifier, DependOnUserModifier};
use kernel::KernelError;

use crate::error::{ConvertError, DriverError};
use crate::optional_env;

use self::book::BOOK_TABLE;
pub use self::{book::*, user::*};

mod book;
mod user;

static POSTGRES_URL: &str = "POSTGRES_URL";
static POSTGRES_MAX_CONNECTIONS: &str = "POSTGRES_MAX_CONNECTIONS";
static AUTH_USER_TABLE: &str = "AUTH_USER_TABLE";

const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Name of the table holding user accounts. Books reference it as their author.
///
/// Stored lowercased and rendered double-quoted, so reserved words such as
/// `user` name the same table PostgreSQL would fold an unquoted name to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityTable(String);

impl IdentityTable {
    const MAX_LENGTH: usize = 63;

    pub fn new(name: impl Into<String>) -> Result<Self, DriverError> {
        let name = name.into();
        let invalid = |reason: &str| DriverError::InvalidConfig {
            key: AUTH_USER_TABLE,
            reason: format!("{name:?} {reason}"),
        };
        let mut chars = name.chars();
        match chars.next() {
            Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
            _ => return Err(invalid("must start with a letter or underscore")),
        }
        if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(invalid("may only contain letters, digits and underscores"));
        }
        if name.len() > Self::MAX_LENGTH {
            return Err(invalid("is longer than 63 bytes"));
        }
        if name.eq_ignore_ascii_case(BOOK_TABLE) {
            return Err(invalid("collides with the book table"));
        }
        Ok(Self(name.to_ascii_lowercase()))
    }
}

impl Default for IdentityTable {
    fn default() -> Self {
        Self("users".to_string())
    }
}

impl AsRef<str> for IdentityTable {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for IdentityTable {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "\"{}\"", self.0)
    }
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub user_table: IdentityTable,
}

impl DatabaseConfig {
    /// `None` when `POSTGRES_URL` is unset.
    pub fn from_env() -> Result<Option<Self>, DriverError> {
        Self::from_lookup(optional_env)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Option<Self>, DriverError>
    where
        F: Fn(&'static str) -> Result<Option<String>, DriverError>,
    {
        let Some(url) = lookup(POSTGRES_URL)? else {
            return Ok(None);
        };
        let max_connections = match lookup(POSTGRES_MAX_CONNECTIONS)? {
            None => DEFAULT_MAX_CONNECTIONS,
            Some(value) => value
                .parse()
                .map_err(|error| DriverError::InvalidConfig {
                    key: POSTGRES_MAX_CONNECTIONS,
                    reason: format!("{value:?}: {error}"),
                })?,
        };
        let user_table = match lookup(AUTH_USER_TABLE)? {
            None => IdentityTable::default(),
            Some(name) => IdentityTable::new(name)?,
        };
        Ok(Some(Self {
            url,
            max_connections,
            user_table,
        }))
    }
}

pub struct PostgresDatabase {
    pool: Pool<Postgres>,
    users: PostgresUserRepository,
}

impl PostgresDatabase {
    /// Connects and creates the schema when it is missing.
    pub async fn new(config: &DatabaseConfig) -> error_stack::Result<Self, KernelError> {
        let database = Self::connect(config).await?;
        database.migrate(&config.user_table).await?;
        Ok(database)
    }

    async fn connect(config: &DatabaseConfig) -> error_stack::Result<Self, KernelError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.url)
            .await
            .convert_error()
            .attach_printable("Failed to connect to PostgreSQL")?;
        Ok(Self {
            pool,
            users: PostgresUserRepository::new(config.user_table.clone()),
        })
    }

    async fn migrate(&self, users: &IdentityTable) -> error_stack::Result<(), KernelError> {
        let mut con = self.pool.acquire().await.convert_error()?;
        let statements = [
            format!(
                // language=postgresql
                r#"
                CREATE TABLE IF NOT EXISTS {users} (
                    id UUID PRIMARY KEY,
                    name VARCHAR(150) NOT NULL,
                    created_at TIMESTAMPTZ NOT NULL
                )
                "#
            ),
            format!(
                // language=postgresql
                r#"
                CREATE TABLE IF NOT EXISTS {BOOK_TABLE} (
                    id UUID PRIMARY KEY,
                    title VARCHAR(30) NOT NULL,
                    summary TEXT NOT NULL,
                    author_id UUID NOT NULL REFERENCES {users} (id) ON DELETE CASCADE,
                    created_at TIMESTAMPTZ NOT NULL
                )
                "#
            ),
            format!(
                // language=postgresql
                r#"
                CREATE INDEX IF NOT EXISTS books_author_id_idx ON {BOOK_TABLE} (author_id)
                "#
            ),
        ];
        for statement in &statements {
            sqlx::query(statement)
                .execute(&mut *con)
                .await
                .convert_error()
                .attach_printable("Failed to create schema")?;
        }
        tracing::info!(user_table = users.as_ref(), "database schema ready");
        Ok(())
    }
}

pub struct PostgresConnection(sqlx::Transaction<'static, Postgres>);

impl PostgresConnection {
    fn connection(&mut self) -> &mut PgConnection {
        &mut self.0
    }
}

#[async_trait::async_trait]
impl DatabaseConnection for PostgresDatabase {
    type Transaction = PostgresConnection;
    async fn transact(&self) -> error_stack::Result<PostgresConnection, KernelError> {
        let con = self.pool.begin().await.convert_error()?;
        Ok(PostgresConnection(con))
    }
}

#[async_trait::async_trait]
impl Transaction for PostgresConnection {
    async fn commit(self) -> error_stack::Result<(), KernelError> {
        self.0.commit().await.convert_error()
    }

    async fn roll_back(self) -> error_stack::Result<(), KernelError> {
        self.0.rollback().await.convert_error()
    }
}

impl DependOnBookQuery for PostgresDatabase {
    type BookQuery = PostgresBookRepository;
    fn book_query(&self) -> &Self::BookQuery {
        &PostgresBookRepository
    }
}

impl DependOnBookModifier for PostgresDatabase {
    type BookModifier = PostgresBookRepository;
    fn book_modifier(&self) -> &Self::BookModifier {
        &PostgresBookRepository
    }
}

impl DependOnUserQuery for PostgresDatabase {
    type UserQuery = PostgresUserRepository;
    fn user_query(&self) -> &Self::UserQuery {
        &self.users
    }
}

impl DependOnUserModifier for PostgresDatabase {
    type UserModifier = PostgresUserRepository;
    fn user_modifier(&self) -> &Self::UserModifier {
        &self.users
    }
}
