/// FrustumArena — reusable bump allocator for one visibility rebuild.
///
/// Hands out frustum records and float scratch for a single frame.
/// Both slabs have a nominal capacity; running out sets a "needs
/// regrow" flag and fails the allocation, and the next `reset` grows
/// the slabs 1.5x. A regrow therefore always costs one discarded frame
/// of visibility data — the propagator treats partial results from an
/// out-of-space frame as discardable and retries in full next frame.
///
/// Every `FrustumId` and scratch range is valid only until the next
/// `reset`.

use std::ops::Range;
use crate::geom::Plane;
use crate::world::RoomKey;
use crate::{vis_debug, Error, Result};
use super::frustum::PortalFrustum;

const SOURCE: &str = "roomvis::FrustumArena";

/// Default frustum slots per frame.
const DEFAULT_FRUSTUM_CAPACITY: usize = 64;
/// Default scratch floats per frame.
const DEFAULT_SCRATCH_CAPACITY: usize = 1024;

/// Index of a frustum within the arena, valid for the current frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrustumId(pub(crate) u32);

/// Per-frame allocator for frustum records and float scratch.
pub struct FrustumArena {
    /// Allocated frustum records; `slab.len()` is the bump cursor.
    slab: Vec<PortalFrustum>,
    /// Nominal frustum budget.
    capacity: usize,
    /// Scratch floats; `scratch.len()` is the bump cursor.
    scratch: Vec<f32>,
    /// Nominal scratch budget.
    scratch_capacity: usize,
    /// Set on exhaustion; consumed by the next `reset`.
    needs_regrow: bool,
}

impl FrustumArena {
    /// Arena with default budgets.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_FRUSTUM_CAPACITY, DEFAULT_SCRATCH_CAPACITY)
    }

    /// Arena with explicit frustum and scratch budgets.
    pub fn with_capacity(frustums: usize, scratch_floats: usize) -> Self {
        Self {
            slab: Vec::with_capacity(frustums),
            capacity: frustums.max(1),
            scratch: Vec::with_capacity(scratch_floats),
            scratch_capacity: scratch_floats.max(1),
            needs_regrow: false,
        }
    }

    /// Invalidate the frame: cursors back to zero, and if the previous
    /// frame flagged exhaustion, grow both budgets 1.5x first.
    pub fn reset(&mut self) {
        if self.needs_regrow {
            self.capacity += (self.capacity / 2).max(1);
            self.scratch_capacity += (self.scratch_capacity / 2).max(1);
            self.needs_regrow = false;
            vis_debug!(
                SOURCE,
                "Regrew to {} frustums / {} scratch floats",
                self.capacity,
                self.scratch_capacity
            );
        }
        self.slab.clear();
        self.scratch.clear();
    }

    /// Bump-allocate a blank frustum record.
    ///
    /// On exhaustion the cursor is left untouched, the regrow flag is
    /// set and `Error::ArenaExhausted` is returned.
    pub fn create_frustum(&mut self) -> Result<FrustumId> {
        if self.slab.len() >= self.capacity {
            self.needs_regrow = true;
            return Err(Error::ArenaExhausted);
        }
        let id = FrustumId(self.slab.len() as u32);
        self.slab.push(PortalFrustum::blank());
        Ok(id)
    }

    /// Bump-allocate `n` zeroed scratch floats.
    pub fn alloc_scratch(&mut self, n: usize) -> Result<Range<usize>> {
        let start = self.scratch.len();
        if start + n > self.scratch_capacity {
            self.needs_regrow = true;
            return Err(Error::ArenaExhausted);
        }
        self.scratch.resize(start + n, 0.0);
        Ok(start..start + n)
    }

    /// Current scratch cursor, for scoped rewinds.
    pub fn scratch_mark(&self) -> usize {
        self.scratch.len()
    }

    /// Roll the scratch cursor back to a previous mark.
    pub fn scratch_rewind(&mut self, mark: usize) {
        self.scratch.truncate(mark);
    }

    /// Roll the frustum cursor back so `id` and everything after it is
    /// deallocated (unwind support for a failed propagation).
    pub fn truncate(&mut self, id: FrustumId) {
        self.slab.truncate(id.0 as usize);
    }

    /// Borrow a frustum record.
    ///
    /// # Panics
    ///
    /// Panics on an id not allocated this frame.
    pub fn get(&self, id: FrustumId) -> &PortalFrustum {
        &self.slab[id.0 as usize]
    }

    pub(crate) fn get_mut(&mut self, id: FrustumId) -> &mut PortalFrustum {
        &mut self.slab[id.0 as usize]
    }

    /// Number of frustums allocated this frame.
    pub fn allocated(&self) -> usize {
        self.slab.len()
    }

    /// Nominal frustum budget.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether this frame exhausted the arena (results are discardable).
    pub fn needs_regrow(&self) -> bool {
        self.needs_regrow
    }

    // ===== CLIPPING =====

    /// Clip a frustum's vertex loop in place against one plane.
    ///
    /// Signed distances are buffered in the scratch slab (and rewound on
    /// every exit path). Returns the surviving vertex count.
    pub fn clip_frustum(&mut self, id: FrustumId, plane: &Plane) -> Result<usize> {
        let idx = id.0 as usize;
        let n = self.slab[idx].vertices.len();

        let mark = self.scratch_mark();
        let range = self.alloc_scratch(n)?;
        for k in 0..n {
            self.scratch[range.start + k] = plane.signed_distance(self.slab[idx].vertices[k]);
        }

        let count = self.slab[idx].clip_with_distances(&self.scratch[range]);
        self.scratch_rewind(mark);
        Ok(count)
    }

    // ===== PARENT CHAIN =====

    /// Whether `ancestor` appears in `of`'s parent chain.
    ///
    /// The walk is bounded by the depth counter, so a corrupted chain
    /// cannot loop forever.
    pub fn is_ancestor(&self, ancestor: FrustumId, of: FrustumId) -> bool {
        let mut current = self.get(of).parent;
        let mut remaining = self.get(of).depth;
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            if remaining == 0 {
                break;
            }
            remaining -= 1;
            current = self.get(id).parent;
        }
        false
    }

    /// Whether any ancestor of `id` (excluding `id` itself) was built
    /// for `room`. The traversal uses this to stop recursing through a
    /// room already on the current portal chain.
    pub fn chain_visits_room(&self, id: FrustumId, room: RoomKey) -> bool {
        let mut current = self.get(id).parent;
        let mut remaining = self.get(id).depth;
        while let Some(ancestor) = current {
            if self.get(ancestor).room == room {
                return true;
            }
            if remaining == 0 {
                break;
            }
            remaining -= 1;
            current = self.get(ancestor).parent;
        }
        false
    }
}

impl Default for FrustumArena {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "arena_tests.rs"]
mod tests;
