/// Progress of a request whose result the UI is waiting on.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LoadState<T> {
    #[default]
    Idle,
    Pending,
    Failed(String),
    Ready(T),
}

impl<T> LoadState<T> {
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    #[must_use]
    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Marks the request as in flight.
    pub fn start(&mut self) {
        *self = Self::Pending;
    }

    /// Records the outcome, turning errors into their display text.
    pub fn finish<E: std::fmt::Display>(&mut self, result: Result<T, E>) {
        *self = match result {
            Ok(value) => Self::Ready(value),
            Err(err) => Self::Failed(err.to_string()),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifecycle() {
        let mut state = LoadState::<u32>::default();
        assert_eq!(state, LoadState::Idle);
        state.start();
        assert!(state.is_pending());
        state.finish::<String>(Ok(3));
        assert_eq!(state.ready(), Some(&3));
        state.finish(Err("boom"));
        assert_eq!(state.error(), Some("boom"));
        assert!(state.ready().is_none());
    }
}
