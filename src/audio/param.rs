//! Automation timeline for a single audio parameter.
//!
//! The UI thread and the audio thread each hold a copy of every timeline and
//! apply the same [`Automation`] operations to it, so both sides agree on the
//! value at any point of the audio clock.

/// One scheduling operation. Times are seconds on the audio clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Automation {
    /// Drop every event at or after `from`.
    Cancel { from: f64 },
    /// Jump to `value` at `at`.
    SetValue { value: f32, at: f64 },
    /// Move linearly from the previous event to `value`, arriving at `end`.
    LinearRamp { value: f32, end: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Event {
    Set { value: f32, time: f64 },
    Ramp { value: f32, time: f64 },
}

impl Event {
    fn time(&self) -> f64 {
        match *self {
            Event::Set { time, .. } | Event::Ramp { time, .. } => time,
        }
    }

    fn value(&self) -> f32 {
        match *self {
            Event::Set { value, .. } | Event::Ramp { value, .. } => value,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AudioParam {
    base_value: f32,
    base_time: f64,
    events: Vec<Event>,
}

impl AudioParam {
    pub fn new(value: f32) -> Self {
        Self {
            base_value: value,
            base_time: 0.0,
            events: Vec::with_capacity(16),
        }
    }

    pub fn apply(&mut self, automation: Automation) {
        match automation {
            Automation::Cancel { from } => self.cancel_scheduled_values(from),
            Automation::SetValue { value, at } => self.set_value_at_time(value, at),
            Automation::LinearRamp { value, end } => self.linear_ramp_to_value_at_time(value, end),
        }
    }

    pub fn cancel_scheduled_values(&mut self, from: f64) {
        self.events.retain(|e| e.time() < from);
    }

    pub fn set_value_at_time(&mut self, value: f32, at: f64) {
        self.insert(Event::Set { value, time: at });
    }

    pub fn linear_ramp_to_value_at_time(&mut self, value: f32, end: f64) {
        self.insert(Event::Ramp { value, time: end });
    }

    // Events sharing a timestamp keep their insertion order.
    fn insert(&mut self, event: Event) {
        let idx = self.events.partition_point(|e| e.time() <= event.time());
        self.events.insert(idx, event);
    }

    pub fn value_at(&self, t: f64) -> f32 {
        let (mut value, mut time) = (self.base_value, self.base_time);
        for event in &self.events {
            if event.time() <= t {
                value = event.value();
                time = event.time();
                continue;
            }
            return match *event {
                Event::Ramp { value: target, time: end } => {
                    let progress = ((t - time) / (end - time)) as f32;
                    value + (target - value) * progress
                }
                Event::Set { .. } => value,
            };
        }
        value
    }

    /// Fold events that can no longer influence values at or after `now`.
    pub fn prune(&mut self, now: f64) {
        let spent = self
            .events
            .windows(2)
            .take_while(|pair| pair[1].time() <= now)
            .count();
        if spent > 0 {
            self.events.drain(..spent);
        }
        if let &[only] = self.events.as_slice() {
            if only.time() <= now {
                self.base_value = only.value();
                self.base_time = only.time();
                self.events.clear();
            }
        }
    }

    /// Time of the last scheduled event, if any remain.
    #[cfg(test)]
    pub fn end_time(&self) -> Option<f64> {
        self.events.last().map(Event::time)
    }

    /// Value the timeline settles on once every event has passed.
    #[cfg(test)]
    pub fn final_value(&self) -> f32 {
        self.events.last().map_or(self.base_value, Event::value)
    }

    #[cfg(test)]
    pub fn is_idle(&self) -> bool {
        self.events.is_empty()
    }
}
