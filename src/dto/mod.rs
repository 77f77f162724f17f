pub mod auth_dto;
pub mod candidate_dto;
pub mod import_dto;
