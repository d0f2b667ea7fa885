/// Movement keys, named by their keyboard `code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKey {
    Forward,
    Backward,
    Left,
    Right,
}

impl MoveKey {
    /// Maps a key code (`KeyW`, `KeyS`, `KeyA`, `KeyD`) to a movement key.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "KeyW" => Some(Self::Forward),
            "KeyS" => Some(Self::Backward),
            "KeyA" => Some(Self::Left),
            "KeyD" => Some(Self::Right),
            _ => None,
        }
    }
}

/// Which movement keys are currently held.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

impl InputState {
    /// Handles a key-down event. Returns `false` for unbound codes.
    pub fn key_down(&mut self, code: &str) -> bool {
        self.set(code, true)
    }

    /// Handles a key-up event. Returns `false` for unbound codes.
    pub fn key_up(&mut self, code: &str) -> bool {
        self.set(code, false)
    }

    /// Releases every key.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        !(self.forward || self.backward || self.left || self.right)
    }

    fn set(&mut self, code: &str, held: bool) -> bool {
        let Some(key) = MoveKey::from_code(code) else {
            return false;
        };
        match key {
            MoveKey::Forward => self.forward = held,
            MoveKey::Backward => self.backward = held,
            MoveKey::Left => self.left = held,
            MoveKey::Right => self.right = held,
        }
        true
    }
}
