//! Timed property tweens for on-screen sprites.
//!
//! A [`Motion`] sets one or more properties over a duration; when it ends it
//! may change visibility and hand over to a follow-up motion. Starting a new
//! motion on a sprite replaces the one in flight, continuing from wherever
//! the properties currently are.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Prop {
    Left,
    Top,
    Opacity,
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct Motion {
    targets: Vec<(Prop, f32)>,
    duration: f64,
    visible: Option<bool>,
    then: Option<Box<Motion>>,
}

impl Motion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, prop: Prop, value: f32) -> Self {
        self.targets.push((prop, value));
        self
    }

    /// Seconds. Zero applies the targets on the spot.
    pub fn duration(mut self, secs: f64) -> Self {
        self.duration = secs.max(0.0);
        self
    }

    /// Visibility to apply once the motion has finished.
    pub fn visible_at_end(mut self, visible: bool) -> Self {
        self.visible = Some(visible);
        self
    }

    /// Motion to start when this one ends.
    pub fn then(mut self, next: Motion) -> Self {
        self.then = Some(Box::new(next));
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
struct Running {
    motion: Motion,
    from: Vec<f32>,
    started: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Sprite {
    pub left: f32,
    pub top: f32,
    pub opacity: f32,
    pub visible: bool,
    running: Option<Running>,
}

impl Sprite {
    pub fn new(left: f32, top: f32, visible: bool) -> Self {
        Self {
            left,
            top,
            opacity: 1.0,
            visible,
            running: None,
        }
    }

    pub fn get(&self, prop: Prop) -> f32 {
        match prop {
            Prop::Left => self.left,
            Prop::Top => self.top,
            Prop::Opacity => self.opacity,
        }
    }

    fn put(&mut self, prop: Prop, value: f32) {
        match prop {
            Prop::Left => self.left = value,
            Prop::Top => self.top = value,
            Prop::Opacity => self.opacity = value,
        }
    }

    pub fn animate(&mut self, motion: Motion, now: f64) {
        self.begin(motion, now);
        self.update(now);
    }

    fn begin(&mut self, motion: Motion, started: f64) {
        let from = motion.targets.iter().map(|(p, _)| self.get(*p)).collect();
        self.running = Some(Running {
            motion,
            from,
            started,
        });
    }

    #[cfg(test)]
    pub fn is_animating(&self) -> bool {
        self.running.is_some()
    }

    /// Advance to `now`, running follow-up motions whose turn has come.
    pub fn update(&mut self, now: f64) {
        while let Some(running) = self.running.take() {
            let duration = running.motion.duration;
            let progress = if duration <= 0.0 {
                1.0
            } else {
                ((now - running.started) / duration).clamp(0.0, 1.0) as f32
            };

            for ((prop, to), from) in running.motion.targets.iter().zip(&running.from) {
                self.put(*prop, from + (to - from) * progress);
            }

            if progress < 1.0 {
                self.running = Some(running);
                return;
            }

            if let Some(visible) = running.motion.visible {
                self.visible = visible;
            }
            if let Some(next) = running.motion.then {
                self.begin(*next, running.started + duration);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn zero_duration_applies_immediately() {
        let mut s = Sprite::new(0.0, 0.0, true);
        s.animate(Motion::new().set(Prop::Top, 120.0).duration(0.0), 5.0);
        assert_eq!(s.top, 120.0);
        assert!(!s.is_animating());
    }

    #[test]
    fn interpolates_over_duration() {
        let mut s = Sprite::new(0.0, 0.0, true);
        s.animate(Motion::new().set(Prop::Left, 100.0).duration(1.0), 0.0);
        s.update(0.25);
        assert_approx_eq!(s.left, 25.0);
        s.update(2.0);
        assert_approx_eq!(s.left, 100.0);
        assert!(!s.is_animating());
    }

    #[test]
    fn snap_then_slide() {
        let mut s = Sprite::new(0.0, 0.0, false);
        let motion = Motion::new()
            .set(Prop::Left, 300.0)
            .visible_at_end(true)
            .then(Motion::new().set(Prop::Top, 200.0).duration(0.2));
        s.animate(motion, 10.0);

        assert_eq!(s.left, 300.0);
        assert!(s.visible);
        assert_eq!(s.top, 0.0);

        s.update(10.1);
        assert_approx_eq!(s.top, 100.0, 1e-3);
        s.update(10.2);
        assert_approx_eq!(s.top, 200.0);
    }

    #[test]
    fn new_motion_continues_from_current_position() {
        let mut s = Sprite::new(0.0, 0.0, true);
        s.animate(Motion::new().set(Prop::Left, 100.0).duration(1.0), 0.0);
        s.update(0.5);
        s.animate(Motion::new().set(Prop::Left, 0.0).duration(1.0), 0.5);
        s.update(1.0);
        assert_approx_eq!(s.left, 25.0);
    }

    #[test]
    fn fade_out_hides_at_the_end() {
        let mut s = Sprite::new(0.0, 0.0, true);
        s.animate(
            Motion::new()
                .set(Prop::Opacity, 0.0)
                .duration(0.3)
                .visible_at_end(false),
            0.0,
        );
        s.update(0.15);
        assert!(s.visible);
        assert_approx_eq!(s.opacity, 0.5);
        s.update(0.3);
        assert!(!s.visible);
        assert_eq!(s.opacity, 0.0);
    }
}
