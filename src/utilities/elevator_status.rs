use super::call::CallSlot;
use super::direction::Direction;

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum Behaviour {
    Idle,
    MovingUp,
    MovingDown,
}

impl Behaviour {
    pub fn moving(direction: Direction) -> Self {
        match direction {
            Direction::Up => Behaviour::MovingUp,
            Direction::Down => Behaviour::MovingDown,
        }
    }

    pub fn direction(&self) -> Option<Direction> {
        match self {
            Behaviour::Idle => None,
            Behaviour::MovingUp => Some(Direction::Up),
            Behaviour::MovingDown => Some(Direction::Down),
        }
    }

    pub fn as_string(&self) -> String {
        match self {
            Behaviour::Idle => String::from("idle"),
            Behaviour::MovingUp => String::from("movingUp"),
            Behaviour::MovingDown => String::from("movingDown"),
        }
    }
}

/// Snapshot of the dispatcher published after each step for the status board.
#[derive(Clone, Debug, PartialEq)]
pub struct DispatcherStatus {
    pub behaviour: Behaviour,
    pub floor: u16,
    pub elapsed: u64,
    pub onboard: u32,
    pub slots: Vec<CallSlot>,
}
