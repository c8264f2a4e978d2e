/// Generation tokens for scheduled callbacks
///
/// Every delayed callback (debounce commit, carousel tick, fetch completion)
/// carries a `Ticket`. The owner bumps its generation to cancel whatever is
/// in flight; a callback presenting an old ticket is dropped.
///
/// Tickets come from one process-wide sequence, so a ticket issued by an
/// unmounted view is never live in the view that replaced it.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use iced::Task;

/// Next ticket value; 0 is never issued and marks "nothing live"
static NEXT_TICKET: AtomicU64 = AtomicU64::new(1);

/// Identifies one scheduled callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

impl Ticket {
    fn fresh() -> Self {
        Ticket(NEXT_TICKET.fetch_add(1, Ordering::Relaxed))
    }
}

/// Per-owner record of the one live ticket
#[derive(Debug, Default)]
pub struct Generations {
    current: u64,
}

impl Generations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Invalidate every outstanding ticket and issue a fresh one
    pub fn issue(&mut self) -> Ticket {
        let ticket = Ticket::fresh();
        self.current = ticket.0;
        ticket
    }

    /// Invalidate every outstanding ticket
    pub fn cancel(&mut self) {
        self.current = 0;
    }

    pub fn is_live(&self, ticket: Ticket) -> bool {
        self.current != 0 && ticket.0 == self.current
    }
}

/// Trailing-edge debounce
///
/// Each `restart` cancels the pending commit and schedules a new one;
/// only the ticket from the last restart before quiescence is honoured.
#[derive(Debug)]
pub struct Debounce {
    delay: Duration,
    generations: Generations,
    pending: bool,
}

impl Debounce {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generations: Generations::new(),
            pending: false,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn restart(&mut self) -> Ticket {
        self.pending = true;
        self.generations.issue()
    }

    /// Returns true exactly once, for the latest ticket
    pub fn settle(&mut self, ticket: Ticket) -> bool {
        if self.pending && self.generations.is_live(ticket) {
            self.pending = false;
            true
        } else {
            false
        }
    }

    pub fn cancel(&mut self) {
        self.pending = false;
        self.generations.cancel();
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

/// Sleep on the runtime, then deliver the ticket back as a message
pub fn after<M: Send + 'static>(
    delay: Duration,
    ticket: Ticket,
    on_elapsed: impl Fn(Ticket) -> M + Send + 'static,
) -> Task<M> {
    Task::perform(
        async move {
            tokio::time::sleep(delay).await;
            ticket
        },
        on_elapsed,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_invalidates_older_tickets() {
        let mut generations = Generations::new();
        let first = generations.issue();
        let second = generations.issue();
        assert!(!generations.is_live(first));
        assert!(generations.is_live(second));
    }

    #[test]
    fn test_cancel_invalidates_current_ticket() {
        let mut generations = Generations::new();
        let ticket = generations.issue();
        generations.cancel();
        assert!(!generations.is_live(ticket));
    }

    #[test]
    fn test_tickets_are_unique_across_owners() {
        let mut first = Generations::new();
        let mut second = Generations::new();
        let a = first.issue();
        let b = second.issue();
        assert_ne!(a, b);
        assert!(!second.is_live(a));
        assert!(!first.is_live(b));
    }

    #[test]
    fn test_fresh_owner_has_nothing_live() {
        let mut other = Generations::new();
        let ticket = other.issue();
        assert!(!Generations::new().is_live(ticket));
    }

    #[test]
    fn test_debounce_settles_only_last_ticket_once() {
        let mut debounce = Debounce::new(Duration::from_millis(300));
        let a = debounce.restart();
        let b = debounce.restart();
        let c = debounce.restart();

        assert!(!debounce.settle(a));
        assert!(!debounce.settle(b));
        assert!(debounce.settle(c));
        // A duplicate delivery does not commit twice
        assert!(!debounce.settle(c));
        assert!(!debounce.is_pending());
    }

    #[test]
    fn test_cancelled_debounce_never_settles() {
        let mut debounce = Debounce::new(Duration::from_millis(300));
        let ticket = debounce.restart();
        debounce.cancel();
        assert!(!debounce.settle(ticket));
    }
}
