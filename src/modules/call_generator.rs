/// ----- CALL GENERATOR MODULE -----
/// One generator per floor. Every cycle it may post a random call for its
/// floor into the call table, then reports to the shared clock barrier.

use std::sync::Arc;

use crossbeam_channel::Sender;
use log::{debug, info};

use crate::utilities::call_table::CallTable;
use crate::utilities::clock_barrier::ClockBarrier;
use crate::utilities::dice::Dice;
use crate::utilities::direction::Direction;
use crate::utilities::events::SimEvent;
use crate::utilities::pacer::Pacer;

pub struct CallGenerator<D: Dice> {
    pub floor: u16,
    table: Arc<CallTable>,
    clock: Arc<ClockBarrier>,
    dice: D,
    events_tx: Sender<SimEvent>,
    call_probability: f64,
}

impl<D: Dice> CallGenerator<D> {
    pub fn new(
        floor: u16,
        table: Arc<CallTable>,
        clock: Arc<ClockBarrier>,
        dice: D,
        events_tx: Sender<SimEvent>,
        call_probability: f64,
    ) -> Self {
        CallGenerator {
            floor: floor,
            table: table,
            clock: clock,
            dice: dice,
            events_tx: events_tx,
            call_probability: call_probability,
        }
    }

    /// One generation cycle. Returns the direction of a call that was posted.
    pub fn cycle(&mut self) -> Option<Direction> {
        let posted = self.try_generate();
        self.clock.arrive();
        posted
    }

    fn try_generate(&mut self) -> Option<Direction> {
        let destination = self.dice.destination(self.table.num_floors());
        let direction = Direction::between(self.floor, destination)?;
        if self.dice.call_roll() >= self.call_probability {
            return None
        }
        let time = self.clock.request_time();
        if !self.table.try_post(self.floor, direction, destination, time) {
            return None
        }
        let event = SimEvent::CallReceived { time: time, origin: self.floor, destination: destination };
        if self.events_tx.send(event).is_err() {
            debug!("console is gone, call at F{} not narrated", self.floor);
        }
        Some(direction)
    }
}

pub fn main<D: Dice>(mut generator: CallGenerator<D>, pacer: Pacer, period: u64) {
    info!("call generator for F{} started", generator.floor);
    loop {
        generator.cycle();
        if pacer.wait(period).is_err() {
            break
        }
    }
    info!("call generator for F{} stopped", generator.floor);
}
