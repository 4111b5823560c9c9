use log::debug;
use parking_lot::RwLock;

use super::call::{slot_index, CallSlot, SlotState};
use super::direction::Direction;

/// Shared registry of calls, one slot per (floor, direction).
///
/// Generators only ever move a slot from `Empty` to `Waiting`; every other
/// transition belongs to the dispatcher. Scans take the read lock, mutations
/// take the write lock.
#[derive(Debug)]
pub struct CallTable {
    slots: RwLock<Vec<CallSlot>>,
    num_floors: u16,
}

impl CallTable {
    pub fn new(num_floors: u16) -> Self {
        let mut slots = Vec::with_capacity(num_floors as usize * 2);
        for floor in 1..=num_floors {
            for direction in Direction::iter() {
                slots.push(CallSlot::new(floor, direction, num_floors));
            }
        }
        CallTable {
            slots: RwLock::new(slots),
            num_floors: num_floors,
        }
    }

    pub fn num_floors(&self) -> u16 {
        self.num_floors
    }

    fn index(&self, floor: u16, direction: Direction) -> Option<usize> {
        if floor == 0 || floor > self.num_floors {
            return None
        }
        Some(slot_index(floor, direction))
    }

    /// Floors of a sweep in `direction` starting at `from`, current floor included.
    fn floors_ahead(&self, direction: Direction, from: u16) -> Vec<u16> {
        let from = from.clamp(1, self.num_floors.max(1));
        match direction {
            Direction::Up => (from..=self.num_floors).collect(),
            Direction::Down => (1..=from).rev().collect(),
        }
    }

    /// Posts a new call. Silently does nothing unless the slot is `Empty`.
    pub fn try_post(&self, floor: u16, direction: Direction, destination: u16, timestamp: u64) -> bool {
        let Some(index) = self.index(floor, direction) else { return false };
        let mut slots = self.slots.write();
        let slot = &mut slots[index];
        if !slot.is(SlotState::Empty) {
            return false
        }
        slot.state = SlotState::Waiting;
        slot.destination = destination;
        slot.requested_at = timestamp;
        slot.remembered_passengers = None;
        debug!("posted call F{} {} -> F{}", floor, direction.as_string(), destination);
        true
    }

    /// Waiting call closest to `from`; the lowest slot index wins a tie.
    pub fn find_nearest_waiting(&self, from: u16) -> Option<CallSlot> {
        let slots = self.slots.read();
        let mut best: Option<CallSlot> = None;
        for slot in slots.iter().filter(|slot| slot.is(SlotState::Waiting)) {
            let distance = slot.floor.abs_diff(from);
            match best {
                Some(current) if current.floor.abs_diff(from) <= distance => (),
                _ => best = Some(*slot),
            }
        }
        best
    }

    /// First waiting call in `direction` across the whole building, in the
    /// order a fresh sweep would meet it: bottom up for `Up`, top down for `Down`.
    pub fn find_first_waiting_in_direction(&self, direction: Direction) -> Option<CallSlot> {
        let start = match direction {
            Direction::Up => 1,
            Direction::Down => self.num_floors,
        };
        let slots = self.slots.read();
        self.floors_ahead(direction, start)
            .into_iter()
            .filter_map(|floor| self.index(floor, direction))
            .map(|index| slots[index])
            .find(|slot| slot.is(SlotState::Waiting))
    }

    /// Marks every waiting call in `direction` at or ahead of `from` as in progress.
    pub fn claim_ahead(&self, direction: Direction, from: u16) -> bool {
        let floors = self.floors_ahead(direction, from);
        let mut slots = self.slots.write();
        let mut claimed = false;
        for floor in floors {
            let Some(index) = self.index(floor, direction) else { continue };
            if slots[index].is(SlotState::Waiting) {
                slots[index].state = SlotState::InProgress;
                debug!("claimed call F{} {}", floor, direction.as_string());
                claimed = true;
            }
        }
        claimed
    }

    pub fn any_in_progress(&self) -> bool {
        self.slots.read().iter().any(|slot| slot.is(SlotState::InProgress))
    }

    /// Claims a single waiting call.
    pub fn claim(&self, floor: u16, direction: Direction) -> bool {
        self.transition(floor, direction, SlotState::Waiting, |slot| {
            slot.state = SlotState::InProgress;
        })
    }

    /// The slot at `floor` for `direction` if the dispatcher has claimed it.
    pub fn in_progress_at(&self, floor: u16, direction: Direction) -> Option<CallSlot> {
        let index = self.index(floor, direction)?;
        let slot = self.slots.read()[index];
        if slot.is(SlotState::InProgress) { Some(slot) } else { None }
    }

    /// A claimed call has boarded; the slot can take new calls again.
    pub fn clear(&self, floor: u16, direction: Direction) -> bool {
        self.transition(floor, direction, SlotState::InProgress, |slot| {
            slot.state = SlotState::Empty;
            slot.remembered_passengers = None;
        })
    }

    /// A claimed call did not fit; it goes back to waiting with its group size kept.
    pub fn skip(&self, floor: u16, direction: Direction, passengers: u8) -> bool {
        self.transition(floor, direction, SlotState::InProgress, |slot| {
            slot.state = SlotState::Waiting;
            slot.remembered_passengers = Some(passengers);
        })
    }

    fn transition(
        &self,
        floor: u16,
        direction: Direction,
        from: SlotState,
        apply: impl FnOnce(&mut CallSlot),
    ) -> bool {
        let Some(index) = self.index(floor, direction) else { return false };
        let mut slots = self.slots.write();
        if !slots[index].is(from) {
            return false
        }
        apply(&mut slots[index]);
        debug!("slot F{} {} is now {}", floor, direction.as_string(), slots[index].state.as_string());
        true
    }

    pub fn snapshot(&self) -> Vec<CallSlot> {
        self.slots.read().clone()
    }
}
