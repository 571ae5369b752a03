//! Request generations
//!
//! Each controller issues a [`Ticket`] when a request starts and applies the
//! response only if that ticket is still the newest one. Older responses are
//! dropped as [`ClientError::Superseded`](crate::api::ClientError::Superseded).

/// Monotonic request counter for one kind of request
#[derive(Debug, Clone, Default)]
pub struct Generation {
    current: u64,
}

/// Handle identifying one issued request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

impl Generation {
    /// Start a new request, superseding every earlier ticket
    pub fn issue(&mut self) -> Ticket {
        self.current += 1;
        Ticket(self.current)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.current == ticket.0
    }

    /// Supersede outstanding tickets without starting a request
    pub fn invalidate(&mut self) {
        self.current += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newer_ticket_supersedes() {
        let mut generation = Generation::default();
        let first = generation.issue();
        assert!(generation.is_current(first));

        let second = generation.issue();
        assert!(!generation.is_current(first));
        assert!(generation.is_current(second));

        generation.invalidate();
        assert!(!generation.is_current(second));
    }
}
