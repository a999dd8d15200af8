//! State of the composition in progress.

use super::indicator::IndicatorKind;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CompositionPhase {
    #[default]
    Idle,
    /// A preedit is shown as tentative text
    Composing,
    /// The final string is being inserted
    Committing,
}

/// Composition bookkeeping. Only the editor's composition handler writes it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompositionState {
    pub phase: CompositionPhase,
    /// Document offset where the first tentative character was inserted
    pub tentative_start: Option<usize>,
    /// Start offset and kind of every painted preedit character
    pub indicators: Vec<(usize, IndicatorKind)>,
    /// Current preedit as UTF-16
    pub preedit: Vec<u16>,
    /// Caret position after the last preedit, for the candidate window
    pub preedit_position: Option<usize>,
    /// Draw a block caret over the composed character
    pub block_caret_override: bool,
}

impl CompositionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_idle(&self) -> bool {
        self.phase == CompositionPhase::Idle
    }

    pub fn is_composing(&self) -> bool {
        self.phase == CompositionPhase::Composing
    }

    /// Enter (or stay in) the composing phase with a fresh preedit
    pub fn begin_preedit(&mut self, tentative_start: usize, preedit: Vec<u16>) {
        self.phase = CompositionPhase::Composing;
        self.tentative_start = Some(tentative_start);
        self.preedit = preedit;
        self.indicators.clear();
        self.block_caret_override = false;
    }

    pub fn push_indicator(&mut self, position: usize, kind: IndicatorKind) {
        self.indicators.push((position, kind));
    }

    pub fn begin_commit(&mut self) {
        self.phase = CompositionPhase::Committing;
        self.block_caret_override = false;
    }

    /// Back to idle, forgetting the preedit
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn preedit_text(&self) -> String {
        String::from_utf16_lossy(&self.preedit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle() {
        let mut state = CompositionState::new();
        assert!(state.is_idle());

        state.begin_preedit(4, "か".encode_utf16().collect());
        state.push_indicator(4, IndicatorKind::Input);
        state.block_caret_override = true;
        assert!(state.is_composing());
        assert_eq!(state.preedit_text(), "か");

        // A new preedit replaces indicators and the caret override
        state.begin_preedit(4, "かな".encode_utf16().collect());
        assert!(state.indicators.is_empty());
        assert!(!state.block_caret_override);

        state.begin_commit();
        assert_eq!(state.phase, CompositionPhase::Committing);

        state.reset();
        assert!(state.is_idle());
        assert_eq!(state.tentative_start, None);
    }
}
