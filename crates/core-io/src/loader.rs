//! The `.pfg`/`.ibc` text-format loader (§4.1, §6.1).

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use core_grid::{BoundaryKind, Border, Block, Grid, GridError, Interface};
use tracing::{debug, info};

use crate::balance::{assign_ranks, BalanceStrategy};

struct Tokens {
    items: std::vec::IntoIter<String>,
}

impl Tokens {
    fn from_str(s: &str) -> Self {
        Self {
            items: s.split_whitespace().map(str::to_owned).collect::<Vec<_>>().into_iter(),
        }
    }

    fn next_token(&mut self, source: &str) -> Result<String, GridError> {
        self.items.next().ok_or_else(|| GridError::InputMalformed {
            source: source.to_string(),
            reason: "unexpected end of input".to_string(),
        })
    }

    fn next_usize(&mut self, source: &str) -> Result<usize, GridError> {
        let tok = self.next_token(source)?;
        tok.parse().map_err(|_| GridError::InputMalformed {
            source: source.to_string(),
            reason: format!("expected an integer, got '{tok}'"),
        })
    }

    fn next_u32(&mut self, source: &str) -> Result<u32, GridError> {
        let tok = self.next_token(source)?;
        tok.parse().map_err(|_| GridError::InputMalformed {
            source: source.to_string(),
            reason: format!("expected an integer, got '{tok}'"),
        })
    }
}

struct RawIface {
    id: u32,
    bid: usize,
    i0: usize,
    i1: usize,
    j0: usize,
    j1: usize,
    k0: usize,
    k1: usize,
    nid: usize,
}

fn read_to_string(path: &Path) -> Result<String, GridError> {
    fs::read_to_string(path).map_err(|_| GridError::InputMissing {
        path: path.display().to_string(),
    })
}

/// Parse `<base>.pfg`: a block count followed by one `(i+1, j+1, k+1)` node
/// count triple per block.
fn parse_pfg(path: &Path) -> Result<Vec<Block>, GridError> {
    let text = read_to_string(path)?;
    let source = path.display().to_string();
    let mut tokens = Tokens::from_str(&text);

    let block_count = tokens.next_usize(&source)?;
    let mut blocks = Vec::with_capacity(block_count);
    for id in 0..block_count {
        let ni = tokens.next_usize(&source)?.checked_sub(1).ok_or_else(|| {
            GridError::InputMalformed {
                source: source.clone(),
                reason: "node count must be at least 1".to_string(),
            }
        })?;
        let nj = tokens.next_usize(&source)?.checked_sub(1).ok_or_else(|| {
            GridError::InputMalformed {
                source: source.clone(),
                reason: "node count must be at least 1".to_string(),
            }
        })?;
        let nk = tokens.next_usize(&source)?.checked_sub(1).ok_or_else(|| {
            GridError::InputMalformed {
                source: source.clone(),
                reason: "node count must be at least 1".to_string(),
            }
        })?;
        blocks.push(Block::new_inactive(id, ni, nj, nk));
    }
    Ok(blocks)
}

/// Parse `<base>.ibc`: two skipped header lines, an interface count, then
/// that many `id bid i0 i1 j0 j1 k0 k1 nid` records, reordered so that
/// records sharing an id land at consecutive even/odd positions (§4.1
/// "Interface pairing").
fn parse_ibc(path: &Path) -> Result<Vec<RawIface>, GridError> {
    let text = read_to_string(path)?;
    let source = path.display().to_string();

    let mut lines = text.lines();
    lines.next();
    lines.next();
    let rest: String = lines.collect::<Vec<_>>().join(" ");
    let mut tokens = Tokens::from_str(&rest);

    let iface_count = tokens.next_usize(&source)?;
    let mut slots: Vec<Option<RawIface>> = (0..iface_count).map(|_| None).collect();
    let mut first_seen: HashMap<u32, usize> = HashMap::new();
    let mut next_pos = 0usize;

    for _ in 0..iface_count {
        let id = tokens.next_u32(&source)?;
        let bid = tokens.next_usize(&source)?;
        let i0 = tokens.next_usize(&source)?;
        let i1 = tokens.next_usize(&source)?;
        let j0 = tokens.next_usize(&source)?;
        let j1 = tokens.next_usize(&source)?;
        let k0 = tokens.next_usize(&source)?;
        let k1 = tokens.next_usize(&source)?;
        let nid = tokens.next_usize(&source)?;

        let pos = match first_seen.get(&id) {
            Some(&p) => p + 1,
            None => {
                let p = next_pos;
                next_pos += 2;
                first_seen.insert(id, p);
                p
            }
        };

        if pos >= slots.len() || slots[pos].is_some() {
            return Err(GridError::InputMalformed {
                source: source.clone(),
                reason: format!("interface id {id} has more than two occurrences"),
            });
        }

        slots[pos] = Some(RawIface {
            id,
            bid: bid - 1,
            i0: i0 - 1,
            i1: i1 - 1,
            j0: j0 - 1,
            j1: j1 - 1,
            k0: k0 - 1,
            k1: k1 - 1,
            nid: nid - 1,
        });
    }

    slots
        .into_iter()
        .enumerate()
        .map(|(pos, slot)| {
            slot.ok_or_else(|| GridError::InputMalformed {
                source: source.clone(),
                reason: format!("interface slot {pos} left unpaired"),
            })
        })
        .collect()
}

/// Loads `<base>.pfg`/`<base>.ibc`, balances blocks across `cohort_size`
/// ranks, allocates storage for the blocks owned by `my_rank`, and binds
/// every interface into its source block's facet.
pub fn load(
    base: &str,
    cohort_size: i32,
    my_rank: i32,
    strategy: BalanceStrategy,
) -> Result<Grid, GridError> {
    let pfg_path = Path::new(base).with_extension("pfg");
    let ibc_path = Path::new(base).with_extension("ibc");

    let mut blocks = parse_pfg(&pfg_path)?;
    info!(blocks = blocks.len(), "loaded block extents from {}", pfg_path.display());

    assign_ranks(&mut blocks, cohort_size, strategy)?;
    for block in blocks.iter_mut() {
        if block.rank == my_rank {
            block.allocate();
        }
    }

    let raw_ifaces = parse_ibc(&ibc_path)?;
    debug!(count = raw_ifaces.len(), "loaded interface records");

    let mut interfaces = Vec::with_capacity(raw_ifaces.len());
    for raw in raw_ifaces {
        if raw.bid >= blocks.len() || raw.nid >= blocks.len() {
            return Err(GridError::InputMalformed {
                source: ibc_path.display().to_string(),
                reason: format!(
                    "interface {} references out-of-range block ({}, {})",
                    raw.id, raw.bid, raw.nid
                ),
            });
        }
        let src_active = blocks[raw.bid].is_active();
        let neighbor_active = blocks[raw.nid].is_active();
        let iface = Interface::new(
            raw.id,
            raw.bid,
            raw.nid,
            raw.i0,
            raw.i1,
            raw.j0,
            raw.j1,
            raw.k0,
            raw.k1,
            src_active,
            neighbor_active,
        )?;
        interfaces.push(iface);
    }

    bind_interfaces_to_facets(&mut blocks, &interfaces);

    let grid = Grid::new(blocks, interfaces);
    grid.validate_interface_pairing()?;
    Ok(grid)
}

fn bind_interfaces_to_facets(blocks: &mut [Block], interfaces: &[Interface]) {
    for (pos, iface) in interfaces.iter().enumerate() {
        let (u0, u1, v0, v1) = Block::facet_patch_bounds(
            iface.direction,
            iface.i0,
            iface.i1,
            iface.j0,
            iface.j1,
            iface.k0,
            iface.k1,
        );
        let block = &mut blocks[iface.src_block];
        block
            .facet_mut(iface.direction)
            .fill_rect(u0, u1, v0, v1, Border::Interface(pos));
    }
    for block in blocks.iter_mut() {
        for dir in core_grid::FaceDirection::ALL {
            block.facet_mut(dir).fill_remaining_with_boundary(BoundaryKind::Reflecting);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut f = fs::File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn e4_pair_consecutive_loader() {
        let dir = tempfile::tempdir().unwrap();
        write_temp(&dir, "g.pfg", "2\n11 2 2\n11 2 2\n");
        write_temp(
            &dir,
            "g.ibc",
            "header1\nheader2\n4\n\
             7 1 10 10 0 1 0 1 2\n\
             3 1 0 0 0 1 0 1 2\n\
             7 2 0 0 0 1 0 1 1\n\
             3 2 10 10 0 1 0 1 1\n",
        );
        let base = dir.path().join("g");
        let grid = load(base.to_str().unwrap(), 1, 0, BalanceStrategy::Lpt).unwrap();
        assert_eq!(grid.interfaces_count(), 4);
        assert_eq!(grid.interface(0).id, 7);
        assert_eq!(grid.interface(1).id, 7);
        assert_eq!(grid.interface(2).id, 3);
        assert_eq!(grid.interface(3).id, 3);
    }

    #[test]
    fn missing_file_is_input_missing() {
        let err = load("/nonexistent/base", 1, 0, BalanceStrategy::Lpt).unwrap_err();
        assert!(matches!(err, GridError::InputMissing { .. }));
    }

    #[test]
    fn malformed_block_count_is_input_malformed() {
        let dir = tempfile::tempdir().unwrap();
        write_temp(&dir, "g.pfg", "not-a-number\n");
        write_temp(&dir, "g.ibc", "h1\nh2\n0\n");
        let base = dir.path().join("g");
        let err = load(base.to_str().unwrap(), 1, 0, BalanceStrategy::Lpt).unwrap_err();
        assert!(matches!(err, GridError::InputMalformed { .. }));
    }
}
