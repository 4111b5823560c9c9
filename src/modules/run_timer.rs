/// ----- RUN TIMER MODULE -----
/// Waits out the configured run length, takes the final statistics and
/// tells every other thread to stop.

use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::{after, Sender};
use log::{debug, info};
use parking_lot::Mutex;

use crate::utilities::events::SimEvent;
use crate::utilities::stats::{Stats, Summary};

pub fn main(
    run_length: Duration,
    stats: Arc<Mutex<Stats>>,
    events_tx: Sender<SimEvent>,
    shutdown_tx: Sender<()>,
) -> Summary {
    let deadline = after(run_length);
    let _ = deadline.recv();

    let summary = stats.lock().summary();
    info!("run timer fired after {:?}", run_length);
    if events_tx.send(SimEvent::Finished(summary)).is_err() {
        debug!("console is gone, final figures not printed");
    }
    drop(shutdown_tx);
    summary
}
