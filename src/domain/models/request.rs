#[cfg(test)]
#[path = "request_test.rs"]
mod tests;

/// Lifecycle of the latest submission. Success and failure both fall straight
/// back to `Idle`, so they are not kept as states of their own.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RequestPhase {
    #[default]
    Idle,
    Sending(u64),
}

/// Tracks which request generation is allowed to update the transcript.
/// Every submission bumps the generation, so a response that arrives after
/// a newer submission, or after an abort, no longer matches.
#[derive(Debug, Default)]
pub struct RequestTracker {
    generation: u64,
    phase: RequestPhase,
}

impl RequestTracker {
    pub fn begin(&mut self) -> u64 {
        self.generation += 1;
        self.phase = RequestPhase::Sending(self.generation);
        return self.generation;
    }

    pub fn is_in_flight(&self) -> bool {
        return self.phase != RequestPhase::Idle;
    }

    pub fn is_current(&self, generation: u64) -> bool {
        return self.phase == RequestPhase::Sending(generation);
    }

    /// Returns false when the generation is stale and must be ignored.
    pub fn finish(&mut self, generation: u64) -> bool {
        if !self.is_current(generation) {
            return false;
        }

        self.phase = RequestPhase::Idle;
        return true;
    }

    /// Gives up on the in-flight generation, returning it if there was one.
    pub fn abandon(&mut self) -> Option<u64> {
        if let RequestPhase::Sending(generation) = self.phase {
            self.phase = RequestPhase::Idle;
            return Some(generation);
        }

        return None;
    }
}
