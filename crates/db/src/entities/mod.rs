//! Database entities.

pub mod stream;
pub mod stream_client;

pub use stream::Entity as StreamEntity;
pub use stream_client::Entity as StreamClientEntity;
