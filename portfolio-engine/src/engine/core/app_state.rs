use bevy::prelude::*;

use crate::rpc::web_rpc::WebRpcInterface;

/// The three full-screen stages. Handoff is strictly linear and no stage is
/// entered twice without a reload.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    #[default]
    Boot,
    Gate,
    Portfolio,
}

impl AppState {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppState::Boot => "boot",
            AppState::Gate => "gate",
            AppState::Portfolio => "portfolio",
        }
    }

    /// The stage that follows this one, if any.
    pub fn successor(&self) -> Option<AppState> {
        match self {
            AppState::Boot => Some(AppState::Gate),
            AppState::Gate => Some(AppState::Portfolio),
            AppState::Portfolio => None,
        }
    }
}

/// Move from `current` to its successor. Requests for any other stage are
/// ignored so a stage can never be re-entered.
pub fn advance_stage(
    current: AppState,
    requested: AppState,
    next_state: &mut NextState<AppState>,
) -> bool {
    if current.successor() != Some(requested) {
        warn!(
            "Ignoring stage change {:?} → {:?}",
            current, requested
        );
        return false;
    }

    info!("→ Transitioning to {:?} stage", requested);
    next_state.set(requested);
    true
}

pub fn notify_stage_changes(
    mut transitions: EventReader<StateTransitionEvent<AppState>>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for transition in transitions.read() {
        let Some(entered) = transition.entered else {
            continue;
        };
        if transition.exited == Some(entered) {
            continue;
        }

        rpc_interface.send_notification(
            "stage_changed",
            serde_json::json!({
                "stage": entered.as_str()
            }),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_run_in_a_single_line() {
        let mut stage = AppState::default();
        let mut visited = vec![stage];
        while let Some(next) = stage.successor() {
            stage = next;
            visited.push(stage);
        }
        assert_eq!(
            visited,
            vec![AppState::Boot, AppState::Gate, AppState::Portfolio]
        );
    }

    #[test]
    fn advance_rejects_skips_and_reentry() {
        let mut next_state = NextState::<AppState>::default();
        assert!(!advance_stage(AppState::Boot, AppState::Portfolio, &mut next_state));
        assert!(!advance_stage(AppState::Portfolio, AppState::Boot, &mut next_state));
        assert!(!advance_stage(AppState::Gate, AppState::Gate, &mut next_state));
        assert!(matches!(next_state, NextState::Unchanged));

        assert!(advance_stage(AppState::Gate, AppState::Portfolio, &mut next_state));
        assert!(matches!(next_state, NextState::Pending(AppState::Portfolio)));
    }
}
