//! Grid cell: the fundamental unit of the universe.

/// One grid position, either dead or alive.
///
/// The discriminants are stable so a universe can be exposed to a host as a
/// flat byte slice (`0` dead, `1` alive).
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Dead = 0,
    Alive = 1,
}

impl Cell {
    /// Whether the cell is alive.
    #[must_use]
    pub const fn is_alive(self) -> bool {
        matches!(self, Self::Alive)
    }

    /// Flip between dead and alive.
    pub fn toggle(&mut self) {
        *self = match *self {
            Self::Alive => Self::Dead,
            Self::Dead => Self::Alive,
        };
    }

    pub fn set_alive(&mut self) {
        *self = Self::Alive;
    }

    /// Symbol used by the text rendering of a universe.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Alive => '◼',
            Self::Dead => '◻',
        }
    }
}

impl From<bool> for Cell {
    fn from(alive: bool) -> Self {
        if alive { Self::Alive } else { Self::Dead }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_dead() {
        assert_eq!(Cell::default(), Cell::Dead);
        assert!(!Cell::default().is_alive());
    }

    #[test]
    fn toggle_flips_both_ways() {
        let mut cell = Cell::Dead;
        cell.toggle();
        assert_eq!(cell, Cell::Alive);
        cell.toggle();
        assert_eq!(cell, Cell::Dead);
    }

    #[test]
    fn set_alive_is_idempotent() {
        let mut cell = Cell::Alive;
        cell.set_alive();
        assert_eq!(cell, Cell::Alive);
    }

    #[test]
    fn discriminants_are_byte_stable() {
        assert_eq!(Cell::Dead as u8, 0);
        assert_eq!(Cell::Alive as u8, 1);
    }
}
