//! Remote-control input
//!
//! The host input provider owns an `InputChannel`: a single-slot button
//! sink plus a pull-based acceleration reading. The `InputMapper` turns
//! what arrives there into game actions. Button presses can land between
//! frames, so they are queued and drained by the next frame tick.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use serde::{Deserialize, Serialize};

/// Two-axis accelerometer reading
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Acceleration {
    pub x: f32,
    pub y: f32,
}

impl Acceleration {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Remote buttons
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Button {
    A,
    Other(String),
}

impl Button {
    pub fn from_id(id: &str) -> Self {
        match id {
            "a" => Button::A,
            other => Button::Other(other.to_string()),
        }
    }
}

/// Game action produced by the mapper
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameAction {
    Fire,
    /// Set ship horizontal velocity
    Steer { velocity_x: f32 },
}

/// Callback the channel delivers button ids to
pub type ButtonSink = Box<dyn FnMut(&str)>;

#[derive(Default)]
struct ChannelSlot {
    sink: Option<ButtonSink>,
    /// Bumped by every register/clear
    generation: u64,
    acceleration: Option<Acceleration>,
}

/// Host-side input provider handle. Cloning shares the same slot.
#[derive(Clone, Default)]
pub struct InputChannel {
    slot: Rc<RefCell<ChannelSlot>>,
}

impl std::fmt::Debug for InputChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let slot = self.slot.borrow();
        f.debug_struct("InputChannel")
            .field("registered", &slot.sink.is_some())
            .field("acceleration", &slot.acceleration)
            .finish()
    }
}

impl InputChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the event sink, replacing any previous one
    pub fn register(&self, sink: ButtonSink) {
        let mut slot = self.slot.borrow_mut();
        if slot.sink.is_some() {
            log::warn!("Input sink replaced while another was registered");
        }
        slot.sink = Some(sink);
        slot.generation += 1;
    }

    /// Remove the event sink
    pub fn clear(&self) {
        let mut slot = self.slot.borrow_mut();
        slot.sink = None;
        slot.generation += 1;
    }

    pub fn is_registered(&self) -> bool {
        self.slot.borrow().sink.is_some()
    }

    /// Deliver a button press to the registered sink (dropped if none).
    /// Returns whether a sink received it.
    pub fn press(&self, id: &str) -> bool {
        // Take the sink out so it may touch the channel without a double borrow
        let (mut sink, generation) = {
            let mut slot = self.slot.borrow_mut();
            let Some(sink) = slot.sink.take() else {
                return false;
            };
            (sink, slot.generation)
        };
        sink(id);
        // A register or clear from inside the callback wins
        let mut slot = self.slot.borrow_mut();
        if slot.generation == generation {
            slot.sink = Some(sink);
        }
        true
    }

    /// Latest reading, or None when the device has none
    pub fn set_acceleration(&self, acceleration: Option<Acceleration>) {
        self.slot.borrow_mut().acceleration = acceleration;
    }

    pub fn acceleration(&self) -> Option<Acceleration> {
        self.slot.borrow().acceleration
    }
}

/// Translates remote input into game actions
#[derive(Debug)]
pub struct InputMapper {
    pending: Rc<RefCell<VecDeque<GameAction>>>,
    accel_divisor: f32,
}

impl InputMapper {
    pub fn new(accel_divisor: f32) -> Self {
        Self {
            pending: Rc::new(RefCell::new(VecDeque::new())),
            accel_divisor,
        }
    }

    pub fn map_button(id: &str) -> Option<GameAction> {
        match Button::from_id(id) {
            Button::A => Some(GameAction::Fire),
            _ => None,
        }
    }

    /// Scale a reading into a steer command; None leaves the ship's velocity alone
    pub fn map_acceleration(&self, acceleration: Option<Acceleration>) -> Option<GameAction> {
        acceleration.map(|a| GameAction::Steer {
            velocity_x: a.x / self.accel_divisor,
        })
    }

    /// Sink to register on the input channel. Holds only a weak handle to
    /// the queue, so presses after the mapper is gone are dropped.
    pub fn sink(&self) -> ButtonSink {
        let pending: Weak<RefCell<VecDeque<GameAction>>> = Rc::downgrade(&self.pending);
        Box::new(move |id: &str| {
            let Some(action) = Self::map_button(id) else {
                log::debug!("Ignoring button {:?}", id);
                return;
            };
            if let Some(queue) = pending.upgrade() {
                queue.borrow_mut().push_back(action);
            }
        })
    }

    /// Take queued actions in arrival order
    pub fn drain(&self) -> Vec<GameAction> {
        self.pending.borrow_mut().drain(..).collect()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Drop queued actions
    pub fn reset(&self) {
        self.pending.borrow_mut().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_a_fires() {
        assert_eq!(InputMapper::map_button("a"), Some(GameAction::Fire));
        assert_eq!(InputMapper::map_button("b"), None);
        assert_eq!(InputMapper::map_button("A"), None);
        assert_eq!(InputMapper::map_button(""), None);
    }

    #[test]
    fn test_acceleration_scaled() {
        let mapper = InputMapper::new(2.0);
        assert_eq!(
            mapper.map_acceleration(Some(Acceleration::new(-300.0, 12.0))),
            Some(GameAction::Steer { velocity_x: -150.0 })
        );
        assert_eq!(mapper.map_acceleration(None), None);
    }

    #[test]
    fn test_sink_queues_between_frames() {
        let channel = InputChannel::new();
        let mapper = InputMapper::new(2.0);
        channel.register(mapper.sink());

        assert!(channel.press("a"));
        assert!(channel.press("b"));
        assert!(channel.press("a"));
        assert_eq!(mapper.pending_len(), 2);
        assert_eq!(mapper.drain(), vec![GameAction::Fire, GameAction::Fire]);
        assert!(mapper.drain().is_empty());
    }

    #[test]
    fn test_cleared_channel_drops_presses() {
        let channel = InputChannel::new();
        let mapper = InputMapper::new(2.0);
        channel.register(mapper.sink());
        channel.clear();
        assert!(!channel.is_registered());
        assert!(!channel.press("a"));
        assert_eq!(mapper.pending_len(), 0);
    }

    #[test]
    fn test_sink_outliving_mapper_is_inert() {
        let channel = InputChannel::new();
        let mapper = InputMapper::new(2.0);
        channel.register(mapper.sink());
        drop(mapper);
        assert!(channel.press("a"));
    }

    #[test]
    fn test_single_slot_replaces() {
        let channel = InputChannel::new();
        let first = InputMapper::new(2.0);
        let second = InputMapper::new(2.0);
        channel.register(first.sink());
        channel.register(second.sink());
        channel.press("a");
        assert_eq!(first.pending_len(), 0);
        assert_eq!(second.pending_len(), 1);
    }

    #[test]
    fn test_clear_inside_sink_sticks() {
        let channel = InputChannel::new();
        let handle = channel.clone();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = seen.clone();
        channel.register(Box::new(move |id: &str| {
            log.borrow_mut().push(id.to_string());
            handle.clear();
        }));

        assert!(channel.press("a"));
        assert!(!channel.is_registered());
        assert!(!channel.press("a"));
        assert_eq!(seen.borrow().as_slice(), ["a"]);
    }

    #[test]
    fn test_register_inside_sink_keeps_new_sink() {
        let channel = InputChannel::new();
        let handle = channel.clone();
        let mapper = InputMapper::new(2.0);
        let replacement = RefCell::new(Some(mapper.sink()));
        channel.register(Box::new(move |_: &str| {
            if let Some(sink) = replacement.borrow_mut().take() {
                handle.register(sink);
            }
        }));

        channel.press("a");
        assert_eq!(mapper.pending_len(), 0);
        channel.press("a");
        assert_eq!(mapper.pending_len(), 1);
    }

    #[test]
    fn test_acceleration_slot_is_pull_based() {
        let channel = InputChannel::new();
        assert_eq!(channel.acceleration(), None);
        channel.set_acceleration(Some(Acceleration::new(1.0, 2.0)));
        assert_eq!(channel.acceleration(), Some(Acceleration::new(1.0, 2.0)));
        // Reading does not consume
        assert_eq!(channel.acceleration(), Some(Acceleration::new(1.0, 2.0)));
        channel.set_acceleration(None);
        assert_eq!(channel.acceleration(), None);
    }
}
