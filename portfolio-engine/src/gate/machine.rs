use std::time::Duration;

use bevy::prelude::*;
use constants::gate::GATE_CODE;

use crate::gate::timeline::{OverlayCue, OverlayFlags, TransitionTimeline};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Idle,
    /// Machine clicked; the camera is easing toward it.
    Focused,
    /// Control panel open, code field editable.
    CodeEntry,
    Verifying,
    Transitioning { elapsed: Duration },
    Revealed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateEvent {
    Focused,
    Unfocused,
    PanelOpened,
    CodeRejected,
    TransitionStarted,
    Cue(OverlayCue),
    Revealed,
}

/// Single owner of the gate's progression. Every overlay flag is derived from
/// the state and the transition timeline, never stored separately.
#[derive(Resource, Debug, Clone)]
pub struct GateMachine {
    state: GateState,
    code: String,
    timeline: TransitionTimeline,
}

impl Default for GateMachine {
    fn default() -> Self {
        Self::new(GATE_CODE, TransitionTimeline::standard())
    }
}

impl GateMachine {
    pub fn new(code: &str, timeline: TransitionTimeline) -> Self {
        Self {
            state: GateState::Idle,
            code: code.to_string(),
            timeline,
        }
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    /// Free orbit is only allowed while nothing is focused.
    pub fn camera_locked(&self) -> bool {
        self.state != GateState::Idle
    }

    pub fn accepts_code_input(&self) -> bool {
        self.state == GateState::CodeEntry
    }

    /// The panel goes away as soon as the transition starts.
    pub fn panel_visible(&self) -> bool {
        matches!(self.state, GateState::CodeEntry | GateState::Verifying)
    }

    pub fn focus(&mut self) -> Option<GateEvent> {
        if self.state != GateState::Idle {
            return None;
        }
        self.state = GateState::Focused;
        Some(GateEvent::Focused)
    }

    /// Back button or a click on empty space.
    pub fn unfocus(&mut self) -> Option<GateEvent> {
        match self.state {
            GateState::Focused | GateState::CodeEntry => {
                self.state = GateState::Idle;
                Some(GateEvent::Unfocused)
            }
            _ => None,
        }
    }

    pub fn open_panel(&mut self) -> Option<GateEvent> {
        if self.state != GateState::Focused {
            return None;
        }
        self.state = GateState::CodeEntry;
        Some(GateEvent::PanelOpened)
    }

    /// Compare `entered` with the gate code. A mismatch silently returns to
    /// code entry; a match starts the transition and fires its offset-zero
    /// cues immediately.
    pub fn submit(&mut self, entered: &str) -> Vec<GateEvent> {
        if self.state != GateState::CodeEntry {
            return Vec::new();
        }

        self.state = GateState::Verifying;
        if entered != self.code {
            self.state = GateState::CodeEntry;
            return vec![GateEvent::CodeRejected];
        }

        self.state = GateState::Transitioning {
            elapsed: Duration::ZERO,
        };
        let mut events = vec![GateEvent::TransitionStarted];
        events.extend(self.collect_cues(None, Duration::ZERO));
        events
    }

    pub fn advance(&mut self, dt: Duration) -> Vec<GateEvent> {
        let GateState::Transitioning { elapsed } = self.state else {
            return Vec::new();
        };

        let now = elapsed + dt;
        self.state = GateState::Transitioning { elapsed: now };
        self.collect_cues(Some(elapsed), now)
    }

    pub fn overlay_flags(&self) -> OverlayFlags {
        match self.state {
            GateState::Transitioning { elapsed } => self.timeline.flags_at(elapsed),
            _ => OverlayFlags::default(),
        }
    }

    fn collect_cues(&mut self, after: Option<Duration>, until: Duration) -> Vec<GateEvent> {
        let mut events = Vec::new();
        for entry in self.timeline.cues_between(after, until) {
            if entry.cue == OverlayCue::Reveal {
                events.push(GateEvent::Revealed);
                break;
            }
            events.push(GateEvent::Cue(entry.cue));
        }

        if events.last() == Some(&GateEvent::Revealed) {
            self.state = GateState::Revealed;
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn at_code_entry() -> GateMachine {
        let mut machine = GateMachine::default();
        machine.focus();
        machine.open_panel();
        assert_eq!(machine.state(), GateState::CodeEntry);
        machine
    }

    #[test]
    fn focus_then_panel_then_back() {
        let mut machine = GateMachine::default();
        assert!(!machine.camera_locked());
        assert_eq!(machine.open_panel(), None);

        assert_eq!(machine.focus(), Some(GateEvent::Focused));
        assert!(machine.camera_locked());
        assert_eq!(machine.focus(), None);

        assert_eq!(machine.open_panel(), Some(GateEvent::PanelOpened));
        assert!(machine.accepts_code_input());

        assert_eq!(machine.unfocus(), Some(GateEvent::Unfocused));
        assert_eq!(machine.state(), GateState::Idle);
        assert!(!machine.panel_visible());
    }

    #[test]
    fn only_the_gate_code_starts_the_transition() {
        for wrong in ["", "69", "6990", "996", " 699", "699 ", "abc", "٦٩٩"] {
            let mut machine = at_code_entry();
            assert_eq!(machine.submit(wrong), vec![GateEvent::CodeRejected]);
            assert_eq!(machine.state(), GateState::CodeEntry);
            assert!(machine.accepts_code_input());
        }

        let mut machine = at_code_entry();
        let events = machine.submit("699");
        assert_eq!(
            events,
            vec![
                GateEvent::TransitionStarted,
                GateEvent::Cue(OverlayCue::StripsOn)
            ]
        );
        assert!(matches!(machine.state(), GateState::Transitioning { .. }));
        assert!(!machine.accepts_code_input());
    }

    #[test]
    fn submit_outside_code_entry_is_ignored() {
        let mut machine = GateMachine::default();
        assert!(machine.submit("699").is_empty());
        machine.focus();
        assert!(machine.submit("699").is_empty());
        assert_eq!(machine.state(), GateState::Focused);
    }

    #[test]
    fn panel_hides_once_the_code_is_accepted() {
        let mut machine = at_code_entry();
        assert!(machine.panel_visible());
        machine.submit("nope");
        assert!(machine.panel_visible());

        machine.submit("699");
        assert!(!machine.panel_visible());
        machine.advance(ms(1000));
        assert!(!machine.panel_visible());
    }

    #[test]
    fn transition_cannot_be_interrupted() {
        let mut machine = at_code_entry();
        machine.submit("699");
        assert_eq!(machine.unfocus(), None);
        assert_eq!(machine.focus(), None);
        assert!(machine.submit("699").is_empty());
        assert!(machine.camera_locked());
    }

    #[test]
    fn cues_fire_in_order_and_reveal_once() {
        let mut machine = at_code_entry();
        let mut events = machine.submit("699");
        for _ in 0..200 {
            events.extend(machine.advance(ms(16)));
        }

        let cues: Vec<OverlayCue> = events
            .iter()
            .filter_map(|event| match event {
                GateEvent::Cue(cue) => Some(*cue),
                _ => None,
            })
            .collect();
        assert_eq!(
            cues,
            vec![
                OverlayCue::StripsOn,
                OverlayCue::FlickerOn,
                OverlayCue::FlickerOff,
                OverlayCue::FlickerOn,
                OverlayCue::FlickerOff,
                OverlayCue::FlickerOn,
                OverlayCue::BlackoutOn,
                OverlayCue::FlickerOff,
            ]
        );
        let reveals = events
            .iter()
            .filter(|event| **event == GateEvent::Revealed)
            .count();
        assert_eq!(reveals, 1);
        assert_eq!(events.last(), Some(&GateEvent::Revealed));
        assert_eq!(machine.state(), GateState::Revealed);
        assert!(machine.advance(ms(5000)).is_empty());
    }

    #[test]
    fn reveal_lands_at_twenty_one_hundred_ms() {
        let mut machine = at_code_entry();
        machine.submit("699");
        let before = machine.advance(ms(2099));
        assert!(!before.contains(&GateEvent::Revealed));
        assert_eq!(machine.advance(ms(1)), vec![GateEvent::Revealed]);
    }

    #[test]
    fn overlay_flags_derive_from_elapsed_time() {
        let mut machine = at_code_entry();
        assert_eq!(machine.overlay_flags(), OverlayFlags::default());
        machine.submit("699");
        machine.advance(ms(1750));
        let flags = machine.overlay_flags();
        assert!(flags.strips && flags.flicker && flags.blackout);
    }
}
