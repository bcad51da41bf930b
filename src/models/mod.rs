pub mod message;
pub mod room;
pub mod space;
pub mod user;
