//! Score counter

/// Hazards destroyed this session, with its display text kept current
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreTracker {
    value: u32,
    text: String,
}

impl Default for ScoreTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreTracker {
    pub fn new() -> Self {
        Self {
            value: 0,
            text: Self::format(0),
        }
    }

    pub fn increment(&mut self) {
        self.value = self.value.saturating_add(1);
        self.text = Self::format(self.value);
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    /// Display text, e.g. `Score: 3`
    pub fn text(&self) -> &str {
        &self.text
    }

    fn format(value: u32) -> String {
        format!("Score: {}", value)
    }
}
