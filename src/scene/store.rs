use kurbo::Point;

use crate::foundation::error::{EaselError, EaselResult};
use crate::scene::model::{BLEND_NORMAL, Layer, LayerKind};

/// Ordered collection of layers with z-index semantics.
///
/// Invariant: `z_index` values are unique across the store after every
/// mutation. Reordering swaps z values between rank neighbors rather than
/// renumbering, so move operations permute the existing z set and the
/// invariant holds automatically.
///
/// The store is pure data; it performs no I/O and runs every operation to
/// completion on the calling thread.
#[derive(Clone, Debug, Default)]
pub struct LayerStore {
    layers: Vec<Layer>,
}

impl LayerStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of layers in the store.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Return `true` when the store holds no layers.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Look up a layer by id.
    pub fn get(&self, id: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id == id)
    }

    /// The z index the next added layer will receive: one above the current
    /// maximum, or 1 for an empty store.
    pub fn next_z(&self) -> i64 {
        self.layers
            .iter()
            .map(|l| l.z_index)
            .max()
            .map_or(1, |max| max + 1)
    }

    /// Add a layer on top of the stack and return it.
    ///
    /// The new layer gets a freshly generated collision-resistant id (UUID
    /// v4, never derived from wall-clock time), full opacity, the normal
    /// blend mode and the highest z index in the store.
    pub fn add_layer(&mut self, kind: LayerKind, position: Point) -> &Layer {
        let layer = Layer {
            id: uuid::Uuid::new_v4().to_string(),
            kind,
            position,
            opacity: 1.0,
            blend_mode: BLEND_NORMAL.to_owned(),
            z_index: self.next_z(),
        };
        self.layers.push(layer);
        let last = self.layers.len() - 1;
        &self.layers[last]
    }

    /// Replace the position of the layer with `id`. Never changes z order.
    pub fn update_position(&mut self, id: &str, position: Point) -> EaselResult<()> {
        match self.layers.iter_mut().find(|l| l.id == id) {
            Some(layer) => {
                layer.position = position;
                Ok(())
            }
            None => Err(EaselError::layer_not_found(id)),
        }
    }

    /// Swap this layer's z index with its next neighbor in ascending z order
    /// (one step toward the top). A no-op when the layer is already topmost.
    pub fn move_up(&mut self, id: &str) -> EaselResult<()> {
        self.swap_with_rank_neighbor(id, true)
    }

    /// Swap this layer's z index with its previous neighbor in ascending z
    /// order (one step toward the back). A no-op when the layer is already
    /// at the bottom.
    pub fn move_down(&mut self, id: &str) -> EaselResult<()> {
        self.swap_with_rank_neighbor(id, false)
    }

    // Reorder is by rank, not by offset into the backing sequence: the
    // neighbor is whichever layer paints immediately before/after this one.
    fn swap_with_rank_neighbor(&mut self, id: &str, up: bool) -> EaselResult<()> {
        let mut order: Vec<usize> = (0..self.layers.len()).collect();
        order.sort_by_key(|&i| self.layers[i].z_index);

        let rank = order
            .iter()
            .position(|&i| self.layers[i].id == id)
            .ok_or_else(|| EaselError::layer_not_found(id))?;

        let neighbor_rank = if up {
            if rank + 1 == order.len() {
                return Ok(());
            }
            rank + 1
        } else {
            if rank == 0 {
                return Ok(());
            }
            rank - 1
        };

        let (a, b) = (order[rank], order[neighbor_rank]);
        let z_a = self.layers[a].z_index;
        self.layers[a].z_index = self.layers[b].z_index;
        self.layers[b].z_index = z_a;
        Ok(())
    }

    /// Iterate the layers in ascending z order (back to front).
    ///
    /// Each call produces a fresh iterator over the current state; z
    /// uniqueness makes the order total, so two calls without an intervening
    /// mutation yield identical sequences.
    pub fn ordered_view(&self) -> impl Iterator<Item = &Layer> {
        let mut refs: Vec<&Layer> = self.layers.iter().collect();
        refs.sort_by_key(|l| l.z_index);
        refs.into_iter()
    }

    /// Replace the whole layer set, typically on project load.
    ///
    /// Input with unique z indices is taken as-is. On any duplicate the
    /// store repairs deterministically: every layer is reassigned z = 1..N
    /// in input order, preserving the relative order the input implies.
    pub fn replace_all(&mut self, mut layers: Vec<Layer>) {
        let mut seen = std::collections::HashSet::new();
        let unique = layers.iter().all(|l| seen.insert(l.z_index));
        if !unique {
            tracing::warn!(
                count = layers.len(),
                "duplicate z indices in loaded layers; reassigning in input order"
            );
            for (i, layer) in layers.iter_mut().enumerate() {
                layer.z_index = i as i64 + 1;
            }
        }
        self.layers = layers;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/store.rs"]
mod tests;
