use crate::controller::Intake;
use application::transfer::GetAllUserDto;

#[derive(Debug)]
pub struct GetAllUserRequest;

pub struct UserTransformer;

impl Intake<GetAllUserRequest> for UserTransformer {
    type To = GetAllUserDto;
    fn emit(&self, _input: GetAllUserRequest) -> Self::To {
        GetAllUserDto
    }
}
