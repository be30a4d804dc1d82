use driver::database::{DatabaseConfig, InMemoryDatabase, PostgresDatabase};
use kernel::KernelError;
use std::ops::Deref;
use std::sync::Arc;

use crate::page::Pages;

pub struct AppModule<D>(Arc<Handler<D>>);

impl AppModule<PostgresDatabase> {
    pub async fn postgres(config: &DatabaseConfig) -> error_stack::Result<Self, KernelError> {
        let database = PostgresDatabase::new(config).await?;
        let pages = Pages::new()?;

        Ok(Self::from_parts(database, pages))
    }
}

impl AppModule<InMemoryDatabase> {
    pub fn in_memory() -> error_stack::Result<Self, KernelError> {
        Ok(Self::from_parts(InMemoryDatabase::default(), Pages::new()?))
    }
}

impl<D> AppModule<D> {
    pub fn from_parts(database: D, pages: Pages) -> Self {
        Self(Arc::new(Handler { database, pages }))
    }
}

impl<D> Clone for AppModule<D> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<D> Deref for AppModule<D> {
    type Target = Handler<D>;
    fn deref(&self) -> &Self::Target {
        Deref::deref(&self.0)
    }
}

pub struct Handler<D> {
    database: D,
    pages: Pages,
}

impl<D> Handler<D> {
    pub fn database(&self) -> &D {
        &self.database
    }

    pub fn pages(&self) -> &Pages {
        &self.pages
    }
}
