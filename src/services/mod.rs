pub mod admin_service;
pub mod auth_service;
pub mod candidate_service;
pub mod import_service;
pub mod search;
pub mod spreadsheet;
pub mod template_service;
pub mod user_store;
