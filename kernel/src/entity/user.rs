mod id;
mod name;

pub use self::{id::*, name::*};
use crate::entity::common::CreatedAt;
use destructure::Destructure;
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, Destructure, References)]
pub struct User {
    id: UserId,
    name: UserName,
    created_at: CreatedAt<User>,
}

impl User {
    pub fn new(id: UserId, name: UserName, created_at: CreatedAt<User>) -> Self {
        Self {
            id,
            name,
            created_at,
        }
    }
}
