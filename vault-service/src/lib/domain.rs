pub mod storage;
pub mod user;
