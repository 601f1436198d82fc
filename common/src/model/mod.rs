pub mod club;
pub mod logo;
