pub mod crypto;
pub mod skills;
