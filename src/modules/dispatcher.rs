/// ----- DISPATCHER MODULE -----
/// The finite state machine driving the elevator. It runs on the main
/// thread, reads and claims calls in the shared call table, boards and
/// drops off groups, and records statistics for every drop-off.

use std::sync::Arc;

use crossbeam_channel::Sender;
use log::{debug, info, warn};
use parking_lot::Mutex;

use crate::utilities::call::CallSlot;
use crate::utilities::call_table::CallTable;
use crate::utilities::config::SimSettings;
use crate::utilities::dice::Dice;
use crate::utilities::direction::Direction;
use crate::utilities::elevator_status::{Behaviour, DispatcherStatus};
use crate::utilities::events::SimEvent;
use crate::utilities::onboard::{OnboardRide, OnboardRides};
use crate::utilities::pacer::{Pacer, Shutdown};
use crate::utilities::stats::Stats;

/// What is left to do on the current sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepScan {
    /// New calls were claimed at or ahead of the current floor.
    WorkAhead,
    /// Nothing new ahead, but a claimed call or a rider is still pending.
    WorkInProgress,
    Exhausted,
}

/// Where a new sweep could start once the current one is exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReversalScan {
    NotNeeded,
    Opposite(CallSlot),
    Same(CallSlot),
    Nothing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Serve the current floor, then move one floor on.
    Continue,
    /// Commit to this call and travel to its floor.
    Relocate(CallSlot),
    GoIdle,
    Poll,
}

pub fn decide_idle(nearest: Option<CallSlot>) -> Transition {
    match nearest {
        Some(call) => Transition::Relocate(call),
        None => Transition::Poll,
    }
}

pub fn decide_moving(sweep: SweepScan, reversal: ReversalScan) -> Transition {
    match (sweep, reversal) {
        (SweepScan::WorkAhead, _) => Transition::Continue,
        (SweepScan::WorkInProgress, _) => Transition::Continue,
        (SweepScan::Exhausted, ReversalScan::Opposite(call)) => Transition::Relocate(call),
        (SweepScan::Exhausted, ReversalScan::Same(call)) => Transition::Relocate(call),
        (SweepScan::Exhausted, ReversalScan::Nothing) => Transition::GoIdle,
        (SweepScan::Exhausted, ReversalScan::NotNeeded) => Transition::GoIdle,
    }
}

pub struct Dispatcher<D: Dice> {
    table: Arc<CallTable>,
    stats: Arc<Mutex<Stats>>,
    rides: OnboardRides,
    pacer: Pacer,
    dice: D,
    events_tx: Sender<SimEvent>,
    settings: SimSettings,
    behaviour: Behaviour,
    floor: u16,
    elapsed: u64,
}

impl<D: Dice> Dispatcher<D> {
    pub fn new(
        table: Arc<CallTable>,
        stats: Arc<Mutex<Stats>>,
        pacer: Pacer,
        dice: D,
        events_tx: Sender<SimEvent>,
        settings: SimSettings,
    ) -> Self {
        let rides = OnboardRides::new(table.num_floors(), settings.max_passengers);
        Dispatcher {
            table: table,
            stats: stats,
            rides: rides,
            pacer: pacer,
            dice: dice,
            events_tx: events_tx,
            settings: settings,
            behaviour: Behaviour::Idle,
            floor: 1,
            elapsed: 0,
        }
    }

    pub fn behaviour(&self) -> Behaviour {
        self.behaviour
    }

    pub fn floor(&self) -> u16 {
        self.floor
    }

    pub fn elapsed(&self) -> u64 {
        self.elapsed
    }

    pub fn rides(&self) -> &OnboardRides {
        &self.rides
    }

    /// Runs until the run timer fires.
    pub fn run(mut self) {
        info!("dispatcher started at floor {}", self.floor);
        while self.step().is_ok() {}
        info!("dispatcher stopped at time {}", self.elapsed);
    }

    pub fn step(&mut self) -> Result<(), Shutdown> {
        let result = match self.behaviour.direction() {
            None => self.idle_step(),
            Some(direction) => self.moving_step(direction),
        };
        if self.settings.status_board {
            self.emit(SimEvent::Status(self.status()));
        }
        result
    }

    pub fn status(&self) -> DispatcherStatus {
        DispatcherStatus {
            behaviour: self.behaviour,
            floor: self.floor,
            elapsed: self.elapsed,
            onboard: self.rides.total_passengers(),
            slots: self.table.snapshot(),
        }
    }

    fn idle_step(&mut self) -> Result<(), Shutdown> {
        match decide_idle(self.table.find_nearest_waiting(self.floor)) {
            Transition::Relocate(call) => {
                debug!("idle: heading for call at F{} going {}", call.floor, call.direction.as_string());
                self.behaviour = Behaviour::moving(call.direction);
                self.travel_to(call.floor)
            },
            _ => self.spend(self.settings.idle_poll_time),
        }
    }

    fn moving_step(&mut self, direction: Direction) -> Result<(), Shutdown> {
        self.drop_off()?;
        let sweep = self.scan_sweep(direction);
        let reversal = match sweep {
            SweepScan::Exhausted => self.scan_reversal(direction),
            _ => ReversalScan::NotNeeded,
        };
        match decide_moving(sweep, reversal) {
            Transition::Continue => {
                self.pick_up(direction)?;
                self.advance(direction)
            },
            Transition::Relocate(call) => {
                if !self.table.claim(call.floor, call.direction) {
                    warn!("call at F{} going {} was no longer waiting, going idle", call.floor, call.direction.as_string());
                    self.behaviour = Behaviour::Idle;
                    return Ok(())
                }
                debug!("reversing: committing to F{} going {}", call.floor, call.direction.as_string());
                self.behaviour = Behaviour::moving(call.direction);
                self.travel_to(call.floor)
            },
            _ => {
                debug!("no work left, going idle at F{}", self.floor);
                self.behaviour = Behaviour::Idle;
                Ok(())
            },
        }
    }

    fn scan_sweep(&self, direction: Direction) -> SweepScan {
        if self.table.claim_ahead(direction, self.floor) {
            SweepScan::WorkAhead
        } else if self.table.any_in_progress() || self.rides.is_occupied() {
            SweepScan::WorkInProgress
        } else {
            SweepScan::Exhausted
        }
    }

    /// Opposite direction first, then the direction of the sweep that just ended.
    /// Both scans cover the whole building.
    fn scan_reversal(&self, direction: Direction) -> ReversalScan {
        if let Some(call) = self.table.find_first_waiting_in_direction(direction.opposite()) {
            ReversalScan::Opposite(call)
        } else if let Some(call) = self.table.find_first_waiting_in_direction(direction) {
            ReversalScan::Same(call)
        } else {
            ReversalScan::Nothing
        }
    }

    fn drop_off(&mut self) -> Result<(), Shutdown> {
        let leaving = self.rides.drop_off(self.floor);
        if leaving.is_empty() {
            return Ok(())
        }
        let mut passengers = 0u32;
        {
            let mut stats = self.stats.lock();
            for ride in &leaving {
                stats.record_drop_off(ride, self.elapsed);
                passengers += ride.passengers as u32;
            }
        }
        self.emit(SimEvent::DroppedOff { time: self.elapsed, passengers: passengers, floor: self.floor });
        self.spend(self.settings.door_time)
    }

    fn pick_up(&mut self, direction: Direction) -> Result<(), Shutdown> {
        let Some(call) = self.table.in_progress_at(self.floor, direction) else { return Ok(()) };
        let passengers = match call.remembered_passengers {
            Some(remembered) => remembered,
            None => self.dice.group_size(self.settings.max_group_size),
        };
        let ride = OnboardRide {
            destination: call.destination,
            passengers: passengers,
            boarded_at: self.elapsed,
            requested_at: call.requested_at,
        };
        if !self.rides.board(ride) {
            debug!("no room for {} passengers at F{}, skipping", passengers, self.floor);
            self.table.skip(self.floor, direction, passengers);
            return Ok(())
        }
        self.table.clear(self.floor, direction);
        self.emit(SimEvent::PickedUp { time: self.elapsed, passengers: passengers, floor: self.floor });
        self.spend(self.settings.door_time)
    }

    fn advance(&mut self, direction: Direction) -> Result<(), Shutdown> {
        match direction.step(self.floor, self.table.num_floors()) {
            Some(next) => {
                self.emit(SimEvent::Travelled { from: self.floor, to: next });
                self.floor = next;
                self.spend(self.settings.floor_travel_time)
            },
            None => {
                warn!("cannot move {} from F{}, holding", direction.as_string(), self.floor);
                self.spend(self.settings.idle_poll_time)
            },
        }
    }

    fn travel_to(&mut self, floor: u16) -> Result<(), Shutdown> {
        let distance = self.floor.abs_diff(floor) as u64;
        if distance > 0 {
            self.emit(SimEvent::Travelled { from: self.floor, to: floor });
        }
        self.spend(distance * self.settings.floor_travel_time)?;
        self.floor = floor;
        Ok(())
    }

    fn spend(&mut self, units: u64) -> Result<(), Shutdown> {
        self.pacer.wait(units)?;
        self.elapsed += units;
        Ok(())
    }

    fn emit(&self, event: SimEvent) {
        if self.events_tx.send(event).is_err() {
            debug!("console is gone, dropping event");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crossbeam_channel::{bounded, unbounded, Receiver};

    use super::*;
    use crate::utilities::call::{slot_index, SlotState};
    use crate::utilities::dice::scripted::ScriptedDice;

    struct Harness {
        dispatcher: Dispatcher<ScriptedDice>,
        table: Arc<CallTable>,
        stats: Arc<Mutex<Stats>>,
        events_rx: Receiver<SimEvent>,
        _shutdown_tx: Sender<()>,
    }

    fn harness(num_floors: u16, groups: &[u8]) -> Harness {
        let table = Arc::new(CallTable::new(num_floors));
        let stats = Arc::new(Mutex::new(Stats::new()));
        let (events_tx, events_rx) = unbounded();
        let (shutdown_tx, shutdown_rx) = bounded(0);
        let dispatcher = Dispatcher::new(
            Arc::clone(&table),
            Arc::clone(&stats),
            Pacer::new(Duration::ZERO, shutdown_rx),
            ScriptedDice::with_groups(groups),
            events_tx,
            SimSettings::default(),
        );
        Harness { dispatcher, table, stats, events_rx, _shutdown_tx: shutdown_tx }
    }

    fn slot(table: &CallTable, floor: u16, direction: Direction) -> CallSlot {
        table.snapshot()[slot_index(floor, direction)]
    }

    fn narrated(events_rx: &Receiver<SimEvent>) -> Vec<String> {
        events_rx.try_iter().map(|event| event.to_string()).collect()
    }

    #[test]
    fn idle_polls_when_table_is_empty() {
        let mut h = harness(4, &[]);
        h.dispatcher.step().unwrap();
        h.dispatcher.step().unwrap();
        assert_eq!(h.dispatcher.behaviour(), Behaviour::Idle);
        assert_eq!(h.dispatcher.floor(), 1);
        assert_eq!(h.dispatcher.elapsed(), 2);
    }

    #[test]
    fn serves_a_single_call_end_to_end() {
        let mut h = harness(5, &[4]);
        h.table.try_post(3, Direction::Up, 5, 0);

        h.dispatcher.step().unwrap();
        assert_eq!(h.dispatcher.floor(), 3);
        assert_eq!(h.dispatcher.elapsed(), 10);
        assert_eq!(h.dispatcher.behaviour(), Behaviour::MovingUp);

        h.dispatcher.step().unwrap();
        assert_eq!(h.dispatcher.rides().total_passengers(), 4);
        assert_eq!(slot(&h.table, 3, Direction::Up).state, SlotState::Empty);
        assert_eq!(h.dispatcher.floor(), 4);
        assert_eq!(h.dispatcher.elapsed(), 17);

        h.dispatcher.step().unwrap();
        assert_eq!(h.dispatcher.floor(), 5);
        assert_eq!(h.dispatcher.elapsed(), 22);

        h.dispatcher.step().unwrap();
        assert_eq!(h.dispatcher.behaviour(), Behaviour::Idle);
        assert_eq!(h.dispatcher.rides().total_passengers(), 0);
        assert_eq!(h.dispatcher.elapsed(), 24);

        let summary = h.stats.lock().summary();
        assert_eq!(summary.passengers_serviced, 4);
        assert_eq!(summary.average_wait, 10);
        assert_eq!(summary.average_turnaround, 22);

        assert_eq!(
            narrated(&h.events_rx),
            vec![
                "Going up 2 floors!",
                "Time  10: The elevator picked up 4 passengers at floor 3",
                "Going up 1 floor",
                "Going up 1 floor",
                "Time  22: The elevator dropped off 4 passengers at floor 5",
            ]
        );
    }

    #[test]
    fn skipped_group_is_remembered_not_redrawn() {
        // Only two group sizes are scripted: a third draw would panic.
        let mut h = harness(6, &[7, 5]);
        h.table.try_post(2, Direction::Up, 6, 0);
        h.table.try_post(3, Direction::Up, 6, 0);

        h.dispatcher.step().unwrap(); // idle -> F2
        h.dispatcher.step().unwrap(); // claim F2 and F3, board 7
        assert_eq!(slot(&h.table, 3, Direction::Up).state, SlotState::InProgress);
        h.dispatcher.step().unwrap(); // F3: 7 + 5 > 10
        let skipped = slot(&h.table, 3, Direction::Up);
        assert_eq!(skipped.state, SlotState::Waiting);
        assert_eq!(skipped.remembered_passengers, Some(5));
        assert_eq!(h.dispatcher.rides().total_passengers(), 7);

        h.dispatcher.step().unwrap(); // F4 -> F5
        h.dispatcher.step().unwrap(); // F5 -> F6
        assert_eq!(h.dispatcher.floor(), 6);

        h.dispatcher.step().unwrap(); // drop 7, sweep exhausted, back down to F3
        assert_eq!(h.dispatcher.rides().total_passengers(), 0);
        assert_eq!(h.dispatcher.floor(), 3);
        assert_eq!(h.dispatcher.behaviour(), Behaviour::MovingUp);
        assert_eq!(slot(&h.table, 3, Direction::Up).state, SlotState::InProgress);
        h.dispatcher.step().unwrap(); // boards the remembered 5
        assert_eq!(h.dispatcher.rides().total_passengers(), 5);
        assert_eq!(slot(&h.table, 3, Direction::Up).state, SlotState::Empty);
    }

    #[test]
    fn reversal_prefers_opposite_direction() {
        let mut h = harness(5, &[2]);
        h.table.try_post(1, Direction::Up, 3, 0);
        h.dispatcher.step().unwrap(); // idle, already at F1
        h.dispatcher.step().unwrap(); // board at F1 -> F2
        h.dispatcher.step().unwrap(); // F2 -> F3
        assert_eq!(h.dispatcher.floor(), 3);

        h.table.try_post(2, Direction::Up, 4, 1);
        h.table.try_post(2, Direction::Down, 1, 1);
        h.dispatcher.step().unwrap(); // drop off, sweep exhausted, reverse

        assert_eq!(h.dispatcher.behaviour(), Behaviour::MovingDown);
        assert_eq!(h.dispatcher.floor(), 2);
        assert_eq!(slot(&h.table, 2, Direction::Down).state, SlotState::InProgress);
        assert_eq!(slot(&h.table, 2, Direction::Up).state, SlotState::Waiting);
    }

    /// Leaves the elevator at F3 going up with an empty sweep ahead.
    fn at_third_floor_going_up(num_floors: u16) -> Harness {
        let mut h = harness(num_floors, &[1]);
        h.table.try_post(1, Direction::Up, 3, 0);
        for _ in 0..3 {
            h.dispatcher.step().unwrap();
        }
        assert_eq!((h.dispatcher.behaviour(), h.dispatcher.floor()), (Behaviour::MovingUp, 3));
        h
    }

    #[test]
    fn reversal_finds_opposite_call_above_the_elevator() {
        let mut h = at_third_floor_going_up(6);
        h.table.try_post(2, Direction::Up, 4, 1);
        h.table.try_post(5, Direction::Down, 1, 1);
        h.dispatcher.step().unwrap();

        assert_eq!((h.dispatcher.behaviour(), h.dispatcher.floor()), (Behaviour::MovingDown, 5));
        assert_eq!(slot(&h.table, 5, Direction::Down).state, SlotState::InProgress);
        assert_eq!(slot(&h.table, 2, Direction::Up).state, SlotState::Waiting);
    }

    #[test]
    fn reversal_retries_same_direction_from_the_bottom() {
        let mut h = at_third_floor_going_up(5);
        h.table.try_post(2, Direction::Up, 5, 2);
        h.dispatcher.step().unwrap();

        assert_eq!((h.dispatcher.behaviour(), h.dispatcher.floor()), (Behaviour::MovingUp, 2));
        assert_eq!(slot(&h.table, 2, Direction::Up).state, SlotState::InProgress);
    }

    #[test]
    fn reversal_goes_idle_when_no_call_is_waiting() {
        let mut h = at_third_floor_going_up(5);
        h.dispatcher.step().unwrap();
        assert_eq!((h.dispatcher.behaviour(), h.dispatcher.floor()), (Behaviour::Idle, 3));
    }

    #[test]
    fn shutdown_interrupts_step() {
        let mut h = harness(3, &[]);
        drop(h._shutdown_tx);
        assert_eq!(h.dispatcher.step(), Err(Shutdown));
        assert_eq!(h.dispatcher.elapsed(), 0);
    }

    #[test]
    fn moving_decision_table() {
        let call = CallSlot::new(2, Direction::Down, 4);
        assert_eq!(decide_moving(SweepScan::WorkAhead, ReversalScan::NotNeeded), Transition::Continue);
        assert_eq!(decide_moving(SweepScan::WorkInProgress, ReversalScan::NotNeeded), Transition::Continue);
        assert_eq!(decide_moving(SweepScan::Exhausted, ReversalScan::Opposite(call)), Transition::Relocate(call));
        assert_eq!(decide_moving(SweepScan::Exhausted, ReversalScan::Same(call)), Transition::Relocate(call));
        assert_eq!(decide_moving(SweepScan::Exhausted, ReversalScan::Nothing), Transition::GoIdle);
        assert_eq!(decide_idle(None), Transition::Poll);
        assert_eq!(decide_idle(Some(call)), Transition::Relocate(call));
    }
}
