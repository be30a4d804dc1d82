use time::OffsetDateTime;
use uuid::Uuid;

use kernel::prelude::entity::{DestructUser, User};

#[derive(Debug, Clone)]
pub struct UserDto {
    pub id: Uuid,
    pub name: String,
    pub created_at: OffsetDateTime,
}

impl From<User> for UserDto {
    fn from(value: User) -> Self {
        let DestructUser {
            id,
            name,
            created_at,
        } = value.into_destruct();
        Self {
            id: id.into(),
            name: name.into(),
            created_at: created_at.into(),
        }
    }
}

pub struct GetAllUserDto;

pub struct CreateUserDto {
    pub name: String,
}

pub struct DeleteUserDto {
    pub id: Uuid,
}
