//! The `Transport` abstraction over non-blocking point-to-point messaging
//! (§4.5). Posting is non-blocking from the caller's perspective; completion
//! happens only inside `waitall`.

use core_grid::GridError;

/// Opaque handle for a posted receive, returned by `post_recv` and matched
/// back up in the `waitall` result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecvToken(pub u64);

pub trait Transport {
    fn rank(&self) -> i32;

    /// Queue a send to `dest_rank` tagged `tag`. Does not block and does not
    /// guarantee delivery until `waitall` returns.
    fn post_send(&mut self, dest_rank: i32, tag: u32, data: Vec<f64>) -> Result<(), GridError>;

    /// Queue a receive of `len` doubles from `src_rank` tagged `tag`.
    fn post_recv(&mut self, src_rank: i32, tag: u32, len: usize) -> Result<RecvToken, GridError>;

    /// Complete every posted send and receive. Returns the payload for each
    /// posted receive, keyed by its token. A transport error here is fatal
    /// (§7 `TransportFailure`) — there is no retry.
    fn waitall(&mut self) -> Result<Vec<(RecvToken, Vec<f64>)>, GridError>;
}
