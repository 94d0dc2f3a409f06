//! Renderer that remembers every call, for assertions in tests

use std::sync::{Arc, Mutex};

use super::{RenderAdapter, Screen};

#[derive(Debug, Clone, PartialEq)]
pub enum RenderCall {
    DisplayTime(String),
    RingProgress(f64),
    Screen(Screen),
    Completion,
}

#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    calls: Arc<Mutex<Vec<RenderCall>>>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, call: RenderCall) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }

    pub fn calls(&self) -> Vec<RenderCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Return and forget everything recorded so far
    pub fn take(&self) -> Vec<RenderCall> {
        self.calls
            .lock()
            .map(|mut c| std::mem::take(&mut *c))
            .unwrap_or_default()
    }

    pub fn completions(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, RenderCall::Completion))
            .count()
    }

    pub fn last_display(&self) -> Option<String> {
        self.calls().into_iter().rev().find_map(|c| match c {
            RenderCall::DisplayTime(s) => Some(s),
            _ => None,
        })
    }

    pub fn last_progress(&self) -> Option<f64> {
        self.calls().into_iter().rev().find_map(|c| match c {
            RenderCall::RingProgress(p) => Some(p),
            _ => None,
        })
    }

    pub fn last_screen(&self) -> Option<Screen> {
        self.calls().into_iter().rev().find_map(|c| match c {
            RenderCall::Screen(s) => Some(s),
            _ => None,
        })
    }
}

impl RenderAdapter for RecordingRenderer {
    fn display_time(&self, formatted: &str) {
        self.record(RenderCall::DisplayTime(formatted.to_string()));
    }

    fn set_ring_progress(&self, fraction: f64) {
        self.record(RenderCall::RingProgress(fraction));
    }

    fn show_screen(&self, screen: Screen) {
        self.record(RenderCall::Screen(screen));
    }

    fn signal_completion(&self) {
        self.record(RenderCall::Completion);
    }
}
