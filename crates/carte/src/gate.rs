//! Event-rate gates over explicit timestamps.

/// Lets through the first event of a burst. A burst ends once `quiet_ms`
/// pass without any event; every event, passed or not, extends it.
#[derive(Clone, Debug)]
pub struct LeadingEdge {
    quiet_ms: u64,
    last_event_ms: Option<u64>,
}

impl LeadingEdge {
    pub fn new(quiet_ms: u64) -> Self {
        LeadingEdge {
            quiet_ms,
            last_event_ms: None,
        }
    }

    pub fn hit(&mut self, now_ms: u64) -> bool {
        let pass = match self.last_event_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) >= self.quiet_ms,
        };
        self.last_event_ms = Some(now_ms);
        pass
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_leading_event_passes() {
        let mut gate = LeadingEdge::new(100);
        assert!(gate.hit(0));
        assert!(!gate.hit(40));
        assert!(!gate.hit(120));
        assert!(gate.hit(220));
    }
}
