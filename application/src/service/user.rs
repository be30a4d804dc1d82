use uuid::Uuid;

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::{DependOnUserQuery, UserQuery};
use kernel::interface::update::{DependOnUserModifier, UserModifier};
use kernel::prelude::entity::{CreatedAt, User, UserId, UserName};
use kernel::KernelError;

use crate::transfer::{CreateUserDto, DeleteUserDto, GetAllUserDto, UserDto};

#[async_trait::async_trait]
pub trait GetUserService: 'static + Sync + Send + DependOnUserQuery {
    async fn get_all_users(
        &self,
        _dto: GetAllUserDto,
    ) -> error_stack::Result<Vec<UserDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let users = self.user_query().find_all(&mut connection).await?;
        Ok(users.into_iter().map(UserDto::from).collect())
    }
}

impl<T> GetUserService for T where T: DependOnUserQuery {}

#[async_trait::async_trait]
pub trait CreateUserService: 'static + Sync + Send + DependOnUserModifier {
    async fn create_user(&self, dto: CreateUserDto) -> error_stack::Result<Uuid, KernelError> {
        let uuid = Uuid::new_v4();
        let user = User::new(UserId::new(uuid), UserName::new(dto.name)?, CreatedAt::now());

        let mut connection = self.database_connection().transact().await?;
        self.user_modifier().create(&mut connection, &user).await?;
        connection.commit().await?;

        tracing::info!(user_id = %uuid, "created user");
        Ok(uuid)
    }
}

impl<T> CreateUserService for T where T: DependOnUserModifier {}

#[async_trait::async_trait]
pub trait DeleteUserService: 'static + Sync + Send + DependOnUserModifier {
    async fn delete_user(&self, dto: DeleteUserDto) -> error_stack::Result<(), KernelError> {
        let id = UserId::new(dto.id);

        let mut connection = self.database_connection().transact().await?;
        self.user_modifier().delete(&mut connection, &id).await?;
        connection.commit().await?;

        tracing::info!(user_id = %dto.id, "deleted user and their books");
        Ok(())
    }
}

impl<T> DeleteUserService for T where T: DependOnUserModifier {}
