pub mod achievement;
pub mod profile;
pub mod resume;
pub mod user;
