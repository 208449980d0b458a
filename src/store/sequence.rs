/// Tag carried by an in-flight request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Last-request-wins gate.
///
/// Every issued request gets a strictly increasing ticket; a response may be applied
/// only if its ticket is the most recently issued one. Older responses are stale and
/// must be dropped without error.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: u64,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self) -> Ticket {
        self.latest += 1;
        Ticket(self.latest)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.latest
    }

    /// Whether any request has been issued yet
    pub fn has_issued(&self) -> bool {
        self.latest > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tickets_increase() {
        let mut seq = RequestSequencer::new();
        let a = seq.issue();
        let b = seq.issue();
        assert!(b > a);
        assert_eq!(b.value(), 2);
    }

    #[test]
    fn test_only_latest_is_current() {
        let mut seq = RequestSequencer::new();
        let first = seq.issue();
        assert!(seq.is_current(first));

        let second = seq.issue();
        assert!(!seq.is_current(first));
        assert!(seq.is_current(second));
    }

    #[test]
    fn test_has_issued() {
        let mut seq = RequestSequencer::new();
        assert!(!seq.has_issued());
        seq.issue();
        assert!(seq.has_issued());
    }
}
