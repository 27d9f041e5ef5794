//! Snapshot port: where the clock hands each new state for display or export.

use crate::domain::error::TickbotError;
use crate::domain::simulation::{SimulationState, TickOutcome};

/// Receives the state after every tick. Implementations only read it;
/// the clock stays the single writer.
pub trait SnapshotPort {
    fn on_tick(
        &mut self,
        state: &SimulationState,
        outcome: &TickOutcome,
    ) -> Result<(), TickbotError>;

    /// Called once with the final state when the clock stops, including
    /// when a previous `on_tick` failed.
    fn finish(&mut self, _state: &SimulationState) -> Result<(), TickbotError> {
        Ok(())
    }
}

impl SnapshotPort for Vec<Box<dyn SnapshotPort + Send>> {
    fn on_tick(
        &mut self,
        state: &SimulationState,
        outcome: &TickOutcome,
    ) -> Result<(), TickbotError> {
        for sink in self.iter_mut() {
            sink.on_tick(state, outcome)?;
        }
        Ok(())
    }

    /// Every sink is finished; the first error is returned.
    fn finish(&mut self, state: &SimulationState) -> Result<(), TickbotError> {
        let mut first_err = None;
        for sink in self.iter_mut() {
            if let Err(err) = sink.finish(state) {
                first_err.get_or_insert(err);
            }
        }
        first_err.map_or(Ok(()), Err)
    }
}
