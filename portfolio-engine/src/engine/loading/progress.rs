use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadPhase {
    #[default]
    Pending,
    Ready,
    Failed,
}

impl LoadPhase {
    pub fn is_settled(&self) -> bool {
        *self != LoadPhase::Pending
    }
}

#[derive(Resource, Debug, Default)]
pub struct LoadingProgress {
    pub manifest: LoadPhase,
    pub gate_models: LoadPhase,
}

impl LoadingProgress {
    /// The gate takes input only once its models are in. A failed load
    /// stays failed until the page is reloaded.
    pub fn gate_ready(&self) -> bool {
        self.gate_models == LoadPhase::Ready
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gate_waits_for_its_models() {
        let mut progress = LoadingProgress::default();
        assert!(!progress.gate_ready());
        assert!(!progress.gate_models.is_settled());

        progress.gate_models = LoadPhase::Failed;
        assert!(progress.gate_models.is_settled());
        assert!(!progress.gate_ready());

        progress.gate_models = LoadPhase::Ready;
        assert!(progress.gate_ready());
    }
}
