use crate::kg_distance_model::{DistanceModel, DrawPool};
use crate::kg_interface::{manhattan, Node, SimError, TrialResult};
use crate::kg_shortcuts::ShortcutStore;
use rand::Rng;

/// Greedy decentralized routing over one fixed topology.
///
/// Borrows the topology (distance model, shortcut table, draw pool) and
/// the configuration RNG for the duration of a trial. At each hop the
/// current node knows only the destination coordinates, its four lattice
/// neighbors, and its own shortcut; it jumps through the shortcut exactly
/// when that beats the best possible lattice move by more than one unit,
/// and otherwise steps one lattice unit toward the destination.
///
/// Every lattice move shrinks the remaining distance by exactly 1 and
/// every accepted jump shrinks it by at least 2, so a trial always
/// terminates within `manhattan(start, destination)` steps. No step
/// cutoff exists.
pub struct RoutingEngine<'a, R: Rng> {
    model: &'a DistanceModel,
    store: &'a mut ShortcutStore,
    pool: &'a mut DrawPool,
    rng: &'a mut R,
}

impl<'a, R: Rng> RoutingEngine<'a, R> {
    pub fn new(
        model: &'a DistanceModel,
        store: &'a mut ShortcutStore,
        pool: &'a mut DrawPool,
        rng: &'a mut R,
    ) -> Self {
        Self {
            model,
            store,
            pool,
            rng,
        }
    }

    /// Run one routing trial from `start` to `destination`.
    ///
    /// `start == destination` is valid and yields a zero-step result.
    pub fn run(&mut self, start: Node, destination: Node) -> Result<TrialResult, SimError> {
        let baseline = manhattan(start, destination);
        let mut current = start;
        let mut steps = 0usize;

        while current != destination {
            steps += 1;
            let local = manhattan(current, destination);

            let shortcut =
                self.store
                    .get_or_sample(current, self.model, self.rng, self.pool)?;

            // Jump only when the shortcut beats the best lattice move by
            // more than one unit. Strictly: d(shortcut) < d(current) - 1.
            if manhattan(shortcut, destination) + 1 < local {
                current = shortcut;
                continue;
            }

            // Lattice step along a differing axis; fair coin when both
            // axes differ.
            let move_x = if current.x == destination.x {
                false
            } else if current.y == destination.y {
                true
            } else {
                self.rng.gen_bool(0.5)
            };

            if move_x {
                current.x = if destination.x > current.x {
                    current.x + 1
                } else {
                    current.x - 1
                };
            } else {
                current.y = if destination.y > current.y {
                    current.y + 1
                } else {
                    current.y - 1
                };
            }
        }

        Ok(TrialResult { steps, baseline })
    }
}
