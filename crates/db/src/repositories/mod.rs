//! `PostgreSQL` implementations of the store contracts.

mod stream;
mod stream_client;

pub use stream::StreamRepository;
pub use stream_client::StreamClientRepository;
