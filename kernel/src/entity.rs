mod book;
mod common;
mod user;

pub use self::{book::*, common::*, user::*};
