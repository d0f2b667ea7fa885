use std::time::{Duration, SystemTime};

/// Source of the current time.
pub trait Clock {
    fn now(&self) -> SystemTime;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub SystemTime);

impl FixedClock {
    pub fn advance(&mut self, by: Duration) {
        self.0 += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> SystemTime {
        self.0
    }
}

/// A bearer token and its lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub issued_at: SystemTime,
    /// `None` never expires.
    pub ttl: Option<Duration>,
}

impl Session {
    /// Returns `true` if the token is non-empty and not yet expired at `now`.
    #[must_use]
    pub fn is_valid_at(&self, now: SystemTime) -> bool {
        if self.token.is_empty() {
            return false;
        }
        match self.ttl {
            None => true,
            Some(ttl) => now
                .duration_since(self.issued_at)
                .map_or(true, |age| age < ttl),
        }
    }
}

/// Outcome of the guard in front of protected routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    Allow,
    RedirectToLogin,
}

impl RouteDecision {
    pub const LOGIN_ROUTE: &'static str = "/login";
}

/// Holds the current session and checks it against an injected clock.
#[derive(Debug, Clone, Default)]
pub struct SessionStore<C> {
    clock: C,
    session: Option<Session>,
}

impl<C: Clock> SessionStore<C> {
    #[must_use]
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            session: None,
        }
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    /// Stores a freshly issued token.
    pub fn login(&mut self, token: impl Into<String>, ttl: Option<Duration>) {
        self.session = Some(Session {
            token: token.into(),
            issued_at: self.clock.now(),
            ttl,
        });
        tracing::info!("session started");
    }

    pub fn logout(&mut self) {
        self.session = None;
    }

    /// Returns the token if a valid session exists.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        let now = self.clock.now();
        self.session
            .as_ref()
            .filter(|s| s.is_valid_at(now))
            .map(|s| s.token.as_str())
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Decides whether a protected route may render.
    #[must_use]
    pub fn guard(&self) -> RouteDecision {
        if self.is_authenticated() {
            RouteDecision::Allow
        } else {
            RouteDecision::RedirectToLogin
        }
    }
}
