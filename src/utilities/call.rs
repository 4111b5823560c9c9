use super::direction::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    /// Structurally unavailable: floor 1 down, top floor up.
    Inert,
    Empty,
    Waiting,
    InProgress,
}

impl SlotState {
    pub fn as_string(&self) -> String {
        match self {
            SlotState::Inert => String::from("-"),
            SlotState::Empty => String::from("empty"),
            SlotState::Waiting => String::from("waiting"),
            SlotState::InProgress => String::from("active"),
        }
    }
}

/// The record for one (floor, direction) pair of the call table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSlot {
    pub floor: u16,
    pub direction: Direction,
    pub state: SlotState,
    pub destination: u16,
    /// Group size remembered from a boarding attempt that was skipped for lack of room.
    pub remembered_passengers: Option<u8>,
    /// Logical request time of the originating call.
    pub requested_at: u64,
}

impl CallSlot {
    pub fn new(floor: u16, direction: Direction, num_floors: u16) -> Self {
        let inert = match direction {
            Direction::Down => floor <= 1,
            Direction::Up => floor >= num_floors,
        };
        CallSlot {
            floor: floor,
            direction: direction,
            state: if inert { SlotState::Inert } else { SlotState::Empty },
            destination: 0,
            remembered_passengers: None,
            requested_at: 0,
        }
    }

    pub fn is(&self, state: SlotState) -> bool {
        self.state == state
    }
}

/// Arena index of the slot for `floor` (1-based) travelling `direction`.
pub fn slot_index(floor: u16, direction: Direction) -> usize {
    (floor as usize - 1) * 2 + direction as usize
}
