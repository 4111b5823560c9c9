use std::fmt;

use super::onboard::OnboardRide;

/// Running (sum, count) pair. Division happens only when a summary is taken.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Accumulator {
    pub sum: u64,
    pub count: u64,
}

impl Accumulator {
    pub fn add(&mut self, value: u64) {
        self.sum += value;
        self.count += 1;
    }

    pub fn average(&self) -> u64 {
        if self.count == 0 { 0 } else { self.sum / self.count }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub wait: Accumulator,
    pub turnaround: Accumulator,
    pub passengers_serviced: u64,
}

impl Stats {
    pub fn new() -> Self {
        Stats::default()
    }

    /// Records a group leaving the elevator at dispatcher time `now`.
    pub fn record_drop_off(&mut self, ride: &OnboardRide, now: u64) {
        self.passengers_serviced += ride.passengers as u64;
        self.wait.add(ride.boarded_at.saturating_sub(ride.requested_at));
        self.turnaround.add(now.saturating_sub(ride.requested_at));
    }

    pub fn summary(&self) -> Summary {
        Summary {
            passengers_serviced: self.passengers_serviced,
            average_wait: self.wait.average(),
            average_turnaround: self.turnaround.average(),
            wait_samples: self.wait.count,
            turnaround_samples: self.turnaround.count,
        }
    }
}

/// Final figures printed when the run timer fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub passengers_serviced: u64,
    pub average_wait: u64,
    pub average_turnaround: u64,
    pub wait_samples: u64,
    pub turnaround_samples: u64,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "Number of passengers serviced: {}", self.passengers_serviced)?;
        writeln!(f, "Average wait time for all passengers serviced: {}", self.average_wait)?;
        write!(f, "Average turnaround time for all passengers serviced: {}", self.average_turnaround)
    }
}
