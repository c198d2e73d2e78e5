//! Non-blocking point-to-point halo exchange (§4.5).

pub mod exchange;
pub mod local;
pub mod transport;

pub use exchange::exchange;
pub use local::{LocalCohort, LocalTransport};
pub use transport::{RecvToken, Transport};
