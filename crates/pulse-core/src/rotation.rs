//! Display rotation over the current insight list
//!
//! A pure state machine: the ticker drives `advance` on a timer and calls
//! `replace` whenever a new evaluation lands.

use crate::insights::Insight;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationState {
    /// Nothing to show
    Idle,
    /// Showing the insight at this index
    Displaying(usize),
}

#[derive(Debug, Clone)]
pub struct Rotation {
    insights: Vec<Insight>,
    state: RotationState,
}

impl Default for Rotation {
    fn default() -> Self {
        Self::new()
    }
}

impl Rotation {
    pub fn new() -> Self {
        Self {
            insights: vec![],
            state: RotationState::Idle,
        }
    }

    /// Swap in a freshly evaluated list and restart from the first insight
    pub fn replace(&mut self, insights: Vec<Insight>) {
        self.state = if insights.is_empty() {
            RotationState::Idle
        } else {
            RotationState::Displaying(0)
        };
        self.insights = insights;
    }

    /// Move to the next insight, wrapping to the first
    ///
    /// No-op while idle.
    pub fn advance(&mut self) -> Option<&Insight> {
        if let RotationState::Displaying(index) = self.state {
            self.state = RotationState::Displaying((index + 1) % self.insights.len());
        }
        self.current()
    }

    pub fn state(&self) -> RotationState {
        self.state
    }

    pub fn current_index(&self) -> Option<usize> {
        match self.state {
            RotationState::Idle => None,
            RotationState::Displaying(index) => Some(index),
        }
    }

    pub fn current(&self) -> Option<&Insight> {
        self.current_index().and_then(|i| self.insights.get(i))
    }

    pub fn insights(&self) -> &[Insight] {
        &self.insights
    }

    pub fn len(&self) -> usize {
        self.insights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.insights.is_empty()
    }
}
