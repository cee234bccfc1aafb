//! Trailing-edge debounce as a plain state machine.
//!
//! The caller owns the actual timer. Each `schedule` hands back a [`Ticket`];
//! when the caller's timer for that ticket goes off it calls [`Debouncer::fire`],
//! which only succeeds for the most recent ticket, and only once.

/// Handle for one scheduled refresh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ticket {
    pub id: u64,
    /// Timestamp (ms) at which the refresh is due.
    pub due_at_ms: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Debouncer {
    quiet_ms: u32,
    next_id: u64,
    pending: Option<Ticket>,
}

impl Debouncer {
    pub fn new(quiet_ms: u32) -> Self {
        Self {
            quiet_ms,
            next_id: 0,
            pending: None,
        }
    }

    /// Replace any pending ticket with a new one due `quiet_ms` after `now_ms`.
    pub fn schedule(&mut self, now_ms: f64) -> Ticket {
        self.next_id += 1;
        let ticket = Ticket {
            id: self.next_id,
            due_at_ms: now_ms + f64::from(self.quiet_ms),
        };
        self.pending = Some(ticket);
        ticket
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn pending(&self) -> Option<Ticket> {
        self.pending
    }

    /// Consume `ticket` if it is still the pending one.
    pub fn fire(&mut self, ticket: Ticket) -> bool {
        match self.pending {
            Some(p) if p.id == ticket.id => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    /// Virtual-clock driver: fire the pending ticket if it is due at `now_ms`.
    pub fn poll(&mut self, now_ms: f64) -> Option<Ticket> {
        let due = self.pending.filter(|p| p.due_at_ms <= now_ms)?;
        self.fire(due).then_some(due)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_burst_of_edits_fires_once_at_trailing_edge() {
        let mut debouncer = Debouncer::new(500);
        debouncer.schedule(0.0);
        debouncer.schedule(100.0);
        let last = debouncer.schedule(200.0);
        assert_eq!(last.due_at_ms, 700.0);

        let mut fired = Vec::new();
        for now in (0..=1500).step_by(50) {
            if let Some(ticket) = debouncer.poll(now as f64) {
                fired.push((now, ticket));
            }
        }
        assert_eq!(fired.len(), 1, "Expected exactly one refresh, got {:?}", fired);
        assert_eq!(fired[0].0, 700);
        assert_eq!(fired[0].1, last);
    }

    #[test]
    fn test_superseded_ticket_does_not_fire() {
        let mut debouncer = Debouncer::new(500);
        let first = debouncer.schedule(0.0);
        let second = debouncer.schedule(300.0);
        assert!(!debouncer.fire(first), "Old ticket must be ignored");
        assert!(debouncer.fire(second));
        assert!(!debouncer.fire(second), "A ticket fires at most once");
    }

    #[test]
    fn test_cancel_drops_pending() {
        let mut debouncer = Debouncer::new(500);
        let ticket = debouncer.schedule(0.0);
        debouncer.cancel();
        assert_eq!(debouncer.pending(), None);
        assert!(!debouncer.fire(ticket));
        assert_eq!(debouncer.poll(10_000.0), None);
    }

    #[test]
    fn test_separate_bursts_fire_separately() {
        let mut debouncer = Debouncer::new(500);
        debouncer.schedule(0.0);
        assert!(debouncer.poll(500.0).is_some());
        debouncer.schedule(2000.0);
        assert_eq!(debouncer.poll(2499.0), None);
        assert!(debouncer.poll(2500.0).is_some());
    }
}
