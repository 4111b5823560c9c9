use std::time::Duration;

use crossbeam_channel::{select, Receiver};

/// Marker returned by every wait once the run timer has fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shutdown;

/// Real-time stand-in for simulated time units.
///
/// Nothing is ever sent on `shutdown`; the run timer drops the sender and
/// every pending or future wait returns `Err(Shutdown)`.
#[derive(Debug, Clone)]
pub struct Pacer {
    unit: Duration,
    shutdown: Receiver<()>,
}

impl Pacer {
    pub fn new(unit: Duration, shutdown: Receiver<()>) -> Self {
        Pacer { unit: unit, shutdown: shutdown }
    }

    pub fn wait(&self, units: u64) -> Result<(), Shutdown> {
        let duration = self.unit.saturating_mul(units.min(u32::MAX as u64) as u32);
        select! {
            recv(self.shutdown) -> _ => Err(Shutdown),
            default(duration) => Ok(()),
        }
    }
}
