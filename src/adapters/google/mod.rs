pub mod auth;
pub mod drive;
pub mod sheets;

pub use auth::ServiceAccountAuth;
pub use drive::DriveClient;
pub use sheets::SheetsClient;
