pub mod jobs;
pub mod server;
pub mod verify;
