// Adapters layer: concrete implementations of the domain ports.

pub mod google;
pub mod http;
pub mod remitos;

pub use remitos::RemitosClient;
