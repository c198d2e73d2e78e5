//! An in-process `Transport` backed by `crossbeam-channel`, standing in for
//! the original's raw MPI calls so the cohort and the exchange protocol are
//! testable (and runnable as a quick demo) without a system MPI library.
//!
//! Each rank runs on its own OS thread; `crossbeam_channel::unbounded` gives
//! every ordered `(sender, receiver)` pair a lock-free mailbox, matching the
//! "no mutual exclusion required between workers" resource policy (§5) —
//! ranks never share a halo buffer, they only hand messages across a channel.

use core_grid::GridError;
use crossbeam_channel::{Receiver, Sender};

use crate::transport::{RecvToken, Transport};

struct Message {
    tag: u32,
    payload: Vec<f64>,
}

/// Builds the `cohort_size` channel pairs for a [`LocalTransport`] cohort and
/// hands back one endpoint per rank.
pub struct LocalCohort;

impl LocalCohort {
    pub fn build(cohort_size: i32) -> Vec<LocalTransport> {
        let n = cohort_size as usize;
        // channels[from][to] carries messages posted by `from` addressed to `to`.
        let mut senders: Vec<Vec<Sender<Message>>> = Vec::with_capacity(n);
        let mut receivers: Vec<Vec<Option<Receiver<Message>>>> = Vec::with_capacity(n);
        for _ in 0..n {
            senders.push(Vec::with_capacity(n));
            receivers.push(Vec::with_capacity(n));
        }
        for _from in 0..n {
            for _to in 0..n {
                let (tx, rx) = crossbeam_channel::unbounded();
                senders[_from].push(tx);
                receivers[_to].push(Some(rx));
            }
        }

        (0..n)
            .map(|rank| LocalTransport {
                rank: rank as i32,
                senders: senders.iter().map(|row| row[rank].clone()).collect(),
                receivers: receivers[rank].iter_mut().map(|r| r.take().unwrap()).collect(),
                pending_sends: Vec::new(),
                pending_recvs: Vec::new(),
                next_token: 0,
            })
            .collect()
    }
}

pub struct LocalTransport {
    rank: i32,
    /// `senders[to]` posts a message addressed to rank `to`.
    senders: Vec<Sender<Message>>,
    /// `receivers[from]` receives messages sent by rank `from`.
    receivers: Vec<Receiver<Message>>,
    pending_sends: Vec<(i32, u32, Vec<f64>)>,
    pending_recvs: Vec<(u64, i32, u32, usize)>,
    next_token: u64,
}

impl Transport for LocalTransport {
    fn rank(&self) -> i32 {
        self.rank
    }

    fn post_send(&mut self, dest_rank: i32, tag: u32, data: Vec<f64>) -> Result<(), GridError> {
        self.pending_sends.push((dest_rank, tag, data));
        Ok(())
    }

    fn post_recv(&mut self, src_rank: i32, tag: u32, len: usize) -> Result<RecvToken, GridError> {
        let token = self.next_token;
        self.next_token += 1;
        self.pending_recvs.push((token, src_rank, tag, len));
        Ok(RecvToken(token))
    }

    fn waitall(&mut self) -> Result<Vec<(RecvToken, Vec<f64>)>, GridError> {
        for (dest, tag, payload) in self.pending_sends.drain(..) {
            let dest = dest as usize;
            self.senders
                .get(dest)
                .ok_or_else(|| GridError::TransportFailure {
                    reason: format!("rank {} has no channel to rank {dest}", self.rank),
                })?
                .send(Message { tag, payload })
                .map_err(|_| GridError::TransportFailure {
                    reason: format!("channel to rank {dest} is closed"),
                })?;
        }

        let mut out = Vec::with_capacity(self.pending_recvs.len());
        for (token, src, tag, len) in self.pending_recvs.drain(..) {
            let src_idx = src as usize;
            let receiver = self
                .receivers
                .get(src_idx)
                .ok_or_else(|| GridError::TransportFailure {
                    reason: format!("rank {} has no channel from rank {src}", self.rank),
                })?;
            let msg = receiver.recv().map_err(|_| GridError::TransportFailure {
                reason: format!("channel from rank {src} is closed"),
            })?;
            if msg.tag != tag || msg.payload.len() != len {
                return Err(GridError::InvariantViolation {
                    reason: format!(
                        "rank {} expected tag {tag} len {len} from rank {src}, got tag {} len {}",
                        self.rank,
                        msg.tag,
                        msg.payload.len()
                    ),
                });
            }
            out.push((RecvToken(token), msg.payload));
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exchange_round_trip_by_index() {
        let mut cohort = LocalCohort::build(2);
        let (left, right) = cohort.split_at_mut(1);
        let tx0 = &mut left[0];
        let tx1 = &mut right[0];

        tx0.post_send(1, 42, vec![1.0, 2.0, 3.0]).unwrap();
        tx1.post_recv(0, 42, 3).unwrap();

        std::thread::scope(|scope| {
            let h0 = scope.spawn(|| tx0.waitall().unwrap());
            let h1 = scope.spawn(|| tx1.waitall().unwrap());
            let sent = h0.join().unwrap();
            let received = h1.join().unwrap();
            assert!(sent.is_empty());
            assert_eq!(received.len(), 1);
            assert_eq!(received[0].1, vec![1.0, 2.0, 3.0]);
        });
    }

    #[test]
    fn tag_mismatch_is_invariant_violation() {
        let mut cohort = LocalCohort::build(2);
        let (left, right) = cohort.split_at_mut(1);
        let tx0 = &mut left[0];
        let tx1 = &mut right[0];

        tx0.post_send(1, 1, vec![9.0]).unwrap();
        tx1.post_recv(0, 2, 1).unwrap();

        std::thread::scope(|scope| {
            scope.spawn(|| tx0.waitall().unwrap());
            let err = scope.spawn(|| tx1.waitall()).join().unwrap();
            assert!(matches!(err, Err(GridError::InvariantViolation { .. })));
        });
    }
}
