use crate::controller::Intake;
use application::transfer::GetAllBookDto;

/// The book list takes no parameters: no paging, no filtering.
#[derive(Debug)]
pub struct GetAllBookRequest;

pub struct BookTransformer;

impl Intake<GetAllBookRequest> for BookTransformer {
    type To = GetAllBookDto;
    fn emit(&self, _input: GetAllBookRequest) -> Self::To {
        GetAllBookDto
    }
}
