use super::Room;

/// Room categories that carry visibility rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomKind {
    /// Outdoor lawn, never rendered.
    Lawn,
    /// Garage, rendered only on request.
    Garage,
    /// Any other room.
    Interior,
}

impl RoomKind {
    /// Classifies a room by its case-insensitive label.
    #[must_use]
    pub fn of(room: &Room) -> Self {
        let label = room.label();
        if label.eq_ignore_ascii_case("lawn") {
            Self::Lawn
        } else if label.eq_ignore_ascii_case("garage") {
            Self::Garage
        } else {
            Self::Interior
        }
    }
}

/// Decides which rooms enter the rendered set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomFilter {
    pub show_garage: bool,
}

impl Default for RoomFilter {
    fn default() -> Self {
        Self { show_garage: true }
    }
}

impl RoomFilter {
    /// Returns `true` if `room` should be rendered.
    #[must_use]
    pub fn admits(&self, room: &Room) -> bool {
        match RoomKind::of(room) {
            RoomKind::Lawn => false,
            RoomKind::Garage => self.show_garage,
            RoomKind::Interior => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(label: &str) -> Room {
        Room::new(label, 0.0, 0.0, 1.0, 1.0)
    }

    #[test]
    fn lawn_is_never_admitted() {
        for show_garage in [false, true] {
            let filter = RoomFilter { show_garage };
            assert!(!filter.admits(&room("lawn")));
            assert!(!filter.admits(&room("Lawn")));
            assert!(!filter.admits(&room("LAWN")));
        }
    }

    #[test]
    fn garage_follows_flag() {
        assert!(RoomFilter { show_garage: true }.admits(&room("Garage")));
        assert!(!RoomFilter { show_garage: false }.admits(&room("garage")));
    }

    #[test]
    fn other_rooms_always_admitted() {
        for show_garage in [false, true] {
            let filter = RoomFilter { show_garage };
            assert!(filter.admits(&room("Bedroom")));
            assert!(filter.admits(&room("")));
            assert!(filter.admits(&room("garage door")));
        }
    }
}
