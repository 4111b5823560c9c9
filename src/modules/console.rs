/// ----- CONSOLE MODULE -----
/// The only writer to stdout. Prints event lines as they arrive, keeps the
/// optional status board under them, and goes quiet after the final summary.

use std::io::{Result, Write};

use crossbeam_channel::Receiver;

use crate::utilities::debug::StatusBoard;
use crate::utilities::elevator_status::DispatcherStatus;
use crate::utilities::events::SimEvent;

pub fn main<W: Write>(mut out: W, events_rx: Receiver<SimEvent>, status_board: bool) -> Result<()> {
    let mut board = StatusBoard::new();
    let mut last_status: Option<DispatcherStatus> = None;

    for event in events_rx.iter() {
        match event {
            SimEvent::Status(status) => {
                if status_board {
                    board.clear(&mut out)?;
                    board.print_status(&mut out, &status)?;
                    last_status = Some(status);
                }
            },
            SimEvent::Travelled { from, to } if from == to => (),
            SimEvent::Finished(summary) => {
                board.clear(&mut out)?;
                writeln!(out, "{}", summary)?;
                out.flush()?;
                return Ok(())
            },
            event => {
                board.clear(&mut out)?;
                writeln!(out, "{}", event)?;
                match &last_status {
                    Some(status) => board.print_status(&mut out, status)?,
                    None => out.flush()?,
                }
            },
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;
    use crate::utilities::stats::Stats;

    #[test]
    fn prints_events_then_summary_and_ignores_the_rest() {
        let (events_tx, events_rx) = unbounded();
        events_tx.send(SimEvent::CallReceived { time: 0, origin: 2, destination: 4 }).unwrap();
        events_tx.send(SimEvent::Travelled { from: 1, to: 1 }).unwrap();
        events_tx.send(SimEvent::Travelled { from: 1, to: 2 }).unwrap();
        events_tx.send(SimEvent::Finished(Stats::new().summary())).unwrap();
        events_tx.send(SimEvent::PickedUp { time: 9, passengers: 1, floor: 2 }).unwrap();

        let mut out = Vec::new();
        main(&mut out, events_rx, false).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "Time   0: Call Recieved at F2 with destination to F4\n\
             Going up 1 floor\n\
             \n\
             Number of passengers serviced: 0\n\
             Average wait time for all passengers serviced: 0\n\
             Average turnaround time for all passengers serviced: 0\n"
        );
    }

    #[test]
    fn status_events_are_silent_without_board() {
        let (events_tx, events_rx) = unbounded();
        events_tx
            .send(SimEvent::Status(DispatcherStatus {
                behaviour: crate::utilities::elevator_status::Behaviour::Idle,
                floor: 1,
                elapsed: 0,
                onboard: 0,
                slots: Vec::new(),
            }))
            .unwrap();
        drop(events_tx);
        let mut out = Vec::new();
        main(&mut out, events_rx, false).unwrap();
        assert!(out.is_empty());
    }
}
