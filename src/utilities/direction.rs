#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Down = 0,
    Up = 1,
}

impl Direction {
    /// Direction a passenger travels from `origin` to reach `destination`,
    /// or `None` when they are the same floor.
    pub fn between(origin: u16, destination: u16) -> Option<Self> {
        if destination < origin {
            Some(Direction::Down)
        } else if destination > origin {
            Some(Direction::Up)
        } else {
            None
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Down => Direction::Up,
            Direction::Up => Direction::Down,
        }
    }

    /// The floor one step away, if it exists in a building of `num_floors`.
    pub fn step(self, floor: u16, num_floors: u16) -> Option<u16> {
        match self {
            Direction::Down if floor > 1 => Some(floor - 1),
            Direction::Up if floor < num_floors => Some(floor + 1),
            _ => None,
        }
    }

    pub fn as_string(self) -> String {
        match self {
            Direction::Down => String::from("down"),
            Direction::Up => String::from("up"),
        }
    }

    pub fn iter() -> impl Iterator<Item = Direction> {
        [Direction::Down, Direction::Up].iter().copied()
    }
}
