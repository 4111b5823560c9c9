use log::debug;
use parking_lot::Mutex;

#[derive(Debug)]
struct BarrierState {
    remaining: u16,
    request_time: u64,
}

/// Logical request clock shared by the call generators.
///
/// Each generator arrives once per cycle. The last arrival of a cycle moves
/// the request clock forward by `interval` and opens the next cycle. Arriving
/// never blocks. This clock is unrelated to the dispatcher's elapsed time.
#[derive(Debug)]
pub struct ClockBarrier {
    state: Mutex<BarrierState>,
    participants: u16,
    interval: u64,
}

impl ClockBarrier {
    pub fn new(participants: u16, interval: u64) -> Self {
        ClockBarrier {
            state: Mutex::new(BarrierState {
                remaining: participants,
                request_time: 0,
            }),
            participants: participants,
            interval: interval,
        }
    }

    pub fn request_time(&self) -> u64 {
        self.state.lock().request_time
    }

    /// Returns the new request time when this arrival completed the cycle.
    pub fn arrive(&self) -> Option<u64> {
        let mut state = self.state.lock();
        state.remaining = state.remaining.saturating_sub(1);
        if state.remaining > 0 {
            return None
        }
        state.request_time += self.interval;
        state.remaining = self.participants;
        debug!("request clock advanced to {}", state.request_time);
        Some(state.request_time)
    }
}
