use error_stack::Report;
use vodca::{AsRefln, Fromln};

use crate::KernelError;

#[derive(Debug, Clone, Eq, PartialEq, Fromln, AsRefln)]
pub struct BookTitle(String);

impl BookTitle {
    /// Counted in characters, not bytes.
    pub const MAX_LENGTH: usize = 30;

    pub fn new(title: impl Into<String>) -> error_stack::Result<Self, KernelError> {
        let title = title.into();
        let length = title.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(Report::new(KernelError::Validation).attach_printable(format!(
                "book title has {length} characters, at most {} allowed",
                Self::MAX_LENGTH
            )));
        }
        Ok(Self(title))
    }
}
