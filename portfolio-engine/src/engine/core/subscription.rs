use bevy::prelude::*;

/// A scoped listener registration.
///
/// The listener is attached for as long as the guard lives; dropping the guard
/// (gesture ended, popup closed, owning stage torn down) detaches it.
#[derive(Debug)]
pub struct Subscription {
    topic: &'static str,
    live_from_frame: u32,
}

impl Subscription {
    /// Attach a listener that reacts from the current frame on.
    pub fn attach(topic: &'static str, frame: u32) -> Self {
        debug!("Attached '{}' listener at frame {}", topic, frame);
        Self {
            topic,
            live_from_frame: frame,
        }
    }

    /// Attach a listener that ignores the frame it was created on, so the
    /// input that opened something cannot immediately close it again.
    pub fn attach_deferred(topic: &'static str, frame: u32) -> Self {
        debug!("Attached '{}' listener, live after frame {}", topic, frame);
        Self {
            topic,
            live_from_frame: frame.wrapping_add(1),
        }
    }

    pub fn topic(&self) -> &'static str {
        self.topic
    }

    pub fn is_live(&self, frame: u32) -> bool {
        frame >= self.live_from_frame
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        debug!("Detached '{}' listener", self.topic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn immediate_subscription_is_live_on_its_own_frame() {
        let subscription = Subscription::attach("drag", 12);
        assert!(subscription.is_live(12));
        assert!(subscription.is_live(13));
        assert_eq!(subscription.topic(), "drag");
    }

    #[test]
    fn deferred_subscription_skips_the_opening_frame() {
        let subscription = Subscription::attach_deferred("outside-click", 40);
        assert!(!subscription.is_live(40));
        assert!(subscription.is_live(41));
    }
}
