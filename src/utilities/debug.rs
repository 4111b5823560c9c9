use std::io::{Result, Write};

use crossterm::{cursor, terminal, QueueableCommand};

use super::direction::Direction;
use super::call::slot_index;
use super::elevator_status::DispatcherStatus;

/// Call table and dispatcher state drawn as a footer under the event lines.
pub struct StatusBoard {
    lines_on_screen: u16,
}

impl StatusBoard {
    pub fn new() -> Self {
        StatusBoard { lines_on_screen: 0 }
    }

    /// Erases the board so an event line can take its place.
    pub fn clear<W: Write>(&mut self, out: &mut W) -> Result<()> {
        if self.lines_on_screen > 0 {
            out.queue(cursor::MoveUp(self.lines_on_screen))?;
            out.queue(terminal::Clear(terminal::ClearType::FromCursorDown))?;
            self.lines_on_screen = 0;
        }
        Ok(())
    }

    pub fn print_status<W: Write>(&mut self, out: &mut W, status: &DispatcherStatus) -> Result<()> {
        let num_floors = (status.slots.len() / 2) as u16;
        let mut lines = 0u16;

        writeln!(out, "+------------+------------+------------+")?;
        writeln!(out, "| {0:<10} | {1:<10} | {2:<10} |", "FLOOR", "HALL UP", "HALL DOWN")?;
        lines += 2;
        for floor in (1..=num_floors).rev() {
            let up = status.slots[slot_index(floor, Direction::Up)];
            let down = status.slots[slot_index(floor, Direction::Down)];
            let marker = if floor == status.floor { "*" } else { " " };
            writeln!(out, "+------------+------------+------------+")?;
            writeln!(out, "| {0:<9}{1} | {2:<10} | {3:<10} |", floor, marker, up.state.as_string(), down.state.as_string())?;
            lines = lines.saturating_add(2);
        }
        writeln!(out, "+------------+------------+------------+")?;
        writeln!(out, "| {0:<10} | {1:<23} |", "STATE", status.behaviour.as_string())?;
        writeln!(out, "| {0:<10} | {1:<23} |", "TIME", status.elapsed)?;
        writeln!(out, "| {0:<10} | {1:<23} |", "ONBOARD", status.onboard)?;
        writeln!(out, "+------------+-------------------------+")?;
        lines = lines.saturating_add(5);

        out.flush()?;
        self.lines_on_screen = lines;
        Ok(())
    }
}
