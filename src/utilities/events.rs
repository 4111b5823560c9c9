use std::fmt;

use super::elevator_status::DispatcherStatus;
use super::stats::Summary;

/// Everything the console narrates, in the order it happened.
#[derive(Debug, Clone, PartialEq)]
pub enum SimEvent {
    CallReceived { time: u64, origin: u16, destination: u16 },
    PickedUp { time: u64, passengers: u8, floor: u16 },
    DroppedOff { time: u64, passengers: u32, floor: u16 },
    Travelled { from: u16, to: u16 },
    Status(DispatcherStatus),
    Finished(Summary),
}

impl fmt::Display for SimEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimEvent::CallReceived { time, origin, destination } => {
                write!(f, "Time {:>3}: Call Recieved at F{} with destination to F{}", time, origin, destination)
            },
            SimEvent::PickedUp { time, passengers, floor } => {
                write!(f, "Time {:>3}: The elevator picked up {} passengers at floor {}", time, passengers, floor)
            },
            SimEvent::DroppedOff { time, passengers, floor } => {
                write!(f, "Time {:>3}: The elevator dropped off {} passengers at floor {}", time, passengers, floor)
            },
            SimEvent::Travelled { from, to } => {
                let distance = from.abs_diff(*to);
                match (to > from, distance) {
                    (_, 0) => Ok(()),
                    (true, 1) => write!(f, "Going up 1 floor"),
                    (false, 1) => write!(f, "Going down 1 floor"),
                    (true, _) => write!(f, "Going up {} floors!", distance),
                    (false, _) => write!(f, "Going down {} floors!", distance),
                }
            },
            SimEvent::Status(status) => {
                write!(f, "[{} at F{} t={}]", status.behaviour.as_string(), status.floor, status.elapsed)
            },
            SimEvent::Finished(summary) => write!(f, "{}", summary),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_lines_match_console_format() {
        let call = SimEvent::CallReceived { time: 0, origin: 5, destination: 16 };
        assert_eq!(call.to_string(), "Time   0: Call Recieved at F5 with destination to F16");
        let pickup = SimEvent::PickedUp { time: 12, passengers: 2, floor: 3 };
        assert_eq!(pickup.to_string(), "Time  12: The elevator picked up 2 passengers at floor 3");
        let drop = SimEvent::DroppedOff { time: 1234, passengers: 7, floor: 1 };
        assert_eq!(drop.to_string(), "Time 1234: The elevator dropped off 7 passengers at floor 1");
    }

    #[test]
    fn movement_lines() {
        assert_eq!(SimEvent::Travelled { from: 2, to: 3 }.to_string(), "Going up 1 floor");
        assert_eq!(SimEvent::Travelled { from: 3, to: 2 }.to_string(), "Going down 1 floor");
        assert_eq!(SimEvent::Travelled { from: 1, to: 4 }.to_string(), "Going up 3 floors!");
        assert_eq!(SimEvent::Travelled { from: 6, to: 2 }.to_string(), "Going down 4 floors!");
        assert_eq!(SimEvent::Travelled { from: 2, to: 2 }.to_string(), "");
    }
}
