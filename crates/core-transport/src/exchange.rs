//! The halo-exchange driver (§4.5): walks the interface registry in
//! pair-aware steps, posts every send/recv before a single `waitall`, then
//! writes received payloads back into each interface's halo buffer.

use std::collections::HashMap;

use core_grid::{Grid, GridError};
use tracing::{debug, trace};

use crate::transport::{RecvToken, Transport};

/// Collective, blocking from the caller's perspective: returns only after
/// every posted request completes (§4.5 "Concurrency contract").
pub fn exchange<T: Transport>(grid: &mut Grid, transport: &mut T) -> Result<(), GridError> {
    grid.exchange_timer.start();
    let result = run_exchange(grid, transport);
    grid.exchange_timer.stop();
    result
}

fn run_exchange<T: Transport>(grid: &mut Grid, transport: &mut T) -> Result<(), GridError> {
    let count = grid.interfaces_count();
    let mut pending_recvs: Vec<(usize, RecvToken)> = Vec::new();
    let mut i = 0;

    while i < count {
        let iface = grid.interface(i);
        let src_active = iface.is_src_active();
        let neighbor_active = iface.is_neighbor_active();
        let tag = iface.id;

        if src_active {
            if neighbor_active {
                trace!(interface = tag, "both endpoints local, paired skip");
                i += 2;
            } else {
                let neighbor_rank = grid.block(iface.neighbor_block).rank;
                let len = iface.buffer_len();
                let token = transport.post_recv(neighbor_rank, tag, len)?;
                debug!(interface = tag, from_rank = neighbor_rank, "posted recv");
                pending_recvs.push((i, token));
                i += 1;
            }
        } else if neighbor_active {
            let src_rank = grid.block(iface.src_block).rank;
            let data = grid.interface(i).halo().to_vec();
            debug!(interface = tag, to_rank = src_rank, "posted send");
            transport.post_send(src_rank, tag, data)?;
            i += 1;
        } else {
            i += 2;
        }
    }

    let completed = transport.waitall()?;
    let mut by_token: HashMap<u64, Vec<f64>> =
        completed.into_iter().map(|(token, data)| (token.0, data)).collect();

    for (idx, token) in pending_recvs {
        let data = by_token
            .remove(&token.0)
            .ok_or_else(|| GridError::InvariantViolation {
                reason: format!("waitall did not complete recv token {}", token.0),
            })?;
        let iface = grid.interface_mut(idx);
        if data.len() != iface.halo().len() {
            return Err(GridError::InvariantViolation {
                reason: format!(
                    "interface {} received {} doubles, expected {}",
                    iface.id,
                    data.len(),
                    iface.halo().len()
                ),
            });
        }
        iface.halo_mut().copy_from_slice(&data);
    }

    Ok(())
}
