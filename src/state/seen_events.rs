use std::collections::HashSet;

/// Names of the event kinds observed at least once.
#[derive(Debug, Default, Clone)]
pub struct SeenEvents {
    events: HashSet<String>,
}

impl SeenEvents {
    pub fn has_seen(
        &self,
        event: &str,
    ) -> bool {
        self.events.contains(event)
    }

    pub fn mark_seen(
        &mut self,
        event: &str,
    ) {
        if !self.events.contains(event) {
            self.events.insert(event.to_string());
        }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
