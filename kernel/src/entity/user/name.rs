use error_stack::Report;
use vodca::{AsRefln, Fromln};

use crate::KernelError;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Fromln, AsRefln)]
pub struct UserName(String);

impl UserName {
    pub const MAX_LENGTH: usize = 150;

    pub fn new(name: impl Into<String>) -> error_stack::Result<Self, KernelError> {
        let name = name.into();
        let length = name.chars().count();
        if length == 0 || length > Self::MAX_LENGTH {
            return Err(Report::new(KernelError::Validation).attach_printable(format!(
                "user name must have 1 to {} characters, got {length}",
                Self::MAX_LENGTH
            )));
        }
        Ok(Self(name))
    }
}
