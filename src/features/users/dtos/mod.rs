mod user_dto;

pub use user_dto::{AuthResponseDto, LoginRequestDto, RegisterRequestDto, UserResponseDto};
