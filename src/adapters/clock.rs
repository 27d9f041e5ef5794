//! Periodic driver for the simulation.
//!
//! Each period the clock snapshots the bot configuration from a `watch`
//! channel, advances the state by one tick and hands the result to the
//! snapshot sink. Ticks run one at a time on this task, which owns the state.

use std::time::Duration;

use rand::Rng;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::domain::bot_config::{BotConfig, SimulationParams};
use crate::domain::error::TickbotError;
use crate::domain::simulation::SimulationState;
use crate::ports::snapshot_port::SnapshotPort;

pub struct SimulationClock {
    params: SimulationParams,
    config: watch::Receiver<BotConfig>,
    cancel: CancellationToken,
    tick_limit: Option<u64>,
    paced: bool,
}

impl SimulationClock {
    pub fn new(
        params: SimulationParams,
        config: watch::Receiver<BotConfig>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            params,
            config,
            cancel,
            tick_limit: None,
            paced: true,
        }
    }

    /// Stop after `limit` ticks of this run.
    pub fn with_tick_limit(mut self, limit: Option<u64>) -> Self {
        self.tick_limit = limit;
        self
    }

    /// Tick back to back instead of waiting `tick_interval_ms` between ticks.
    pub fn unpaced(mut self) -> Self {
        self.paced = false;
        self
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.params.tick_interval_ms)
    }

    /// Drive `state` until cancelled or the tick limit is reached, then
    /// return the final state. A sink error stops the clock, but the sink
    /// is still finished with the last state before the error is returned.
    pub async fn run<R: Rng + ?Sized>(
        self,
        mut state: SimulationState,
        rng: &mut R,
        sink: &mut dyn SnapshotPort,
    ) -> Result<SimulationState, TickbotError> {
        let interval = self.interval();
        let mut ticks = 0u64;
        let mut failure = None;
        info!(
            interval_ms = self.params.tick_interval_ms,
            limit = ?self.tick_limit,
            paced = self.paced,
            "clock started"
        );

        loop {
            if self.tick_limit.is_some_and(|limit| ticks >= limit) {
                break;
            }
            if self.paced {
                tokio::select! {
                    biased;
                    _ = self.cancel.cancelled() => break,
                    _ = tokio::time::sleep(interval) => {}
                }
            } else {
                tokio::task::yield_now().await;
                if self.cancel.is_cancelled() {
                    break;
                }
            }

            let config = self.config.borrow().clone();
            let (next, outcome) = state.tick(&config, &self.params, rng);
            state = next;
            ticks += 1;

            debug!(
                tick = state.tick_count(),
                price = outcome.sample.price,
                rsi = outcome.sample.rsi,
                enabled = config.enabled,
                "tick"
            );
            if let Some(trade) = &outcome.trade {
                info!(
                    id = %trade.id,
                    side = %trade.side,
                    price = trade.price,
                    amount = trade.amount,
                    profit = ?trade.profit,
                    "trade executed"
                );
            }
            if let Err(err) = sink.on_tick(&state, &outcome) {
                warn!(error = %err, tick = state.tick_count(), "snapshot sink failed, stopping");
                failure = Some(err);
                break;
            }
        }

        info!(ticks, total = state.tick_count(), "clock stopped");
        let finished = sink.finish(&state);
        if let Some(err) = failure {
            return Err(err);
        }
        finished?;
        Ok(state)
    }
}
