//! Hit/bug counters

use serde::Serialize;

use super::host::ScoreDisplay;
use crate::consts::HIT_SCORE;

/// Session score. Both counters only ever grow.
pub struct ScoreTracker {
    hits: u32,
    bugs: u32,
    display: Box<dyn ScoreDisplay>,
}

impl std::fmt::Debug for ScoreTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoreTracker")
            .field("hits", &self.hits)
            .field("bugs", &self.bugs)
            .finish_non_exhaustive()
    }
}

/// Plain counter values
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Score {
    pub hits: u32,
    pub bugs: u32,
}

impl ScoreTracker {
    /// Create a zeroed tracker and render the initial line
    pub fn new(display: Box<dyn ScoreDisplay>) -> Self {
        let mut tracker = Self {
            hits: 0,
            bugs: 0,
            display,
        };
        tracker.refresh();
        tracker
    }

    pub fn add_hit(&mut self) {
        self.hits = self.hits.saturating_add(HIT_SCORE);
        self.refresh();
    }

    pub fn add_bugs(&mut self, n: u32) {
        self.bugs = self.bugs.saturating_add(n);
        self.refresh();
    }

    pub fn hits(&self) -> u32 {
        self.hits
    }

    pub fn bugs(&self) -> u32 {
        self.bugs
    }

    pub fn score(&self) -> Score {
        Score {
            hits: self.hits,
            bugs: self.bugs,
        }
    }

    /// Display line
    pub fn label(&self) -> String {
        format!("Bugs: {} Hits: {}", self.bugs, self.hits)
    }

    fn refresh(&mut self) {
        let text = self.label();
        self.display.show(&text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Display that records every line it was shown
    #[derive(Clone, Default)]
    struct RecordingDisplay(Rc<RefCell<Vec<String>>>);

    impl ScoreDisplay for RecordingDisplay {
        fn show(&mut self, text: &str) {
            self.0.borrow_mut().push(text.to_string());
        }
    }

    #[test]
    fn test_initial_label_rendered() {
        let display = RecordingDisplay::default();
        let tracker = ScoreTracker::new(Box::new(display.clone()));
        assert_eq!(tracker.score(), Score::default());
        assert_eq!(display.0.borrow().as_slice(), ["Bugs: 0 Hits: 0"]);
    }

    #[test]
    fn test_every_change_refreshes_display() {
        let display = RecordingDisplay::default();
        let mut tracker = ScoreTracker::new(Box::new(display.clone()));
        tracker.add_hit();
        tracker.add_bugs(5);
        tracker.add_bugs(0);
        let lines = display.0.borrow();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1], "Bugs: 0 Hits: 1");
        assert_eq!(lines[2], "Bugs: 5 Hits: 1");
        assert_eq!(lines[3], "Bugs: 5 Hits: 1");
    }

    proptest! {
        #[test]
        fn prop_counters_match_calls(
            ops in prop::collection::vec(prop::option::of(0u32..10), 0..64)
        ) {
            let mut tracker = ScoreTracker::new(Box::new(crate::sim::host::NullDisplay));
            let mut expected_hits = 0;
            let mut expected_bugs = 0;
            for op in ops {
                let before = tracker.score();
                match op {
                    None => {
                        tracker.add_hit();
                        expected_hits += 1;
                    }
                    Some(n) => {
                        tracker.add_bugs(n);
                        expected_bugs += n;
                    }
                }
                prop_assert!(tracker.hits() >= before.hits);
                prop_assert!(tracker.bugs() >= before.bugs);
            }
            prop_assert_eq!(tracker.hits(), expected_hits);
            prop_assert_eq!(tracker.bugs(), expected_bugs);
        }
    }
}
