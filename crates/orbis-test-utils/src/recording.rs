//! Render sink that records frames for later assertions.

use std::sync::Arc;

use orbis_chart::{Frame, RenderItem, RenderSink};
use parking_lot::Mutex;

/// Owned copy of a presented [`Frame`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedFrame {
    pub year: f64,
    pub display_year: i32,
    pub items: Vec<RenderItem>,
}

impl RecordedFrame {
    /// Entity names in draw order.
    pub fn order(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.entity.as_str()).collect()
    }

    pub fn item(&self, entity: &str) -> Option<&RenderItem> {
        self.items.iter().find(|item| item.entity.as_str() == entity)
    }

    /// Labels currently drawn, in draw order.
    pub fn visible_labels(&self) -> Vec<&str> {
        self.items
            .iter()
            .filter(|item| !item.label_hidden)
            .map(|item| &*item.label)
            .collect()
    }
}

/// Mock render sink.
///
/// Methods take `&self`; frames are kept behind a shared `Mutex` so a clone
/// held by the test sees everything presented to the chart's copy.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    frames: Arc<Mutex<Vec<RecordedFrame>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every frame presented so far.
    pub fn frames(&self) -> Vec<RecordedFrame> {
        self.frames.lock().clone()
    }

    pub fn last(&self) -> Option<RecordedFrame> {
        self.frames.lock().last().cloned()
    }

    pub fn frame_count(&self) -> usize {
        self.frames.lock().len()
    }

    /// Display years of every frame, in presentation order.
    pub fn display_years(&self) -> Vec<i32> {
        self.frames.lock().iter().map(|f| f.display_year).collect()
    }

    /// Clear all recorded frames.
    pub fn clear(&self) {
        self.frames.lock().clear();
    }
}

impl RenderSink for RecordingSink {
    fn present(&mut self, frame: &Frame<'_>) {
        self.frames.lock().push(RecordedFrame {
            year: frame.year,
            display_year: frame.display_year,
            items: frame.items.to_vec(),
        });
    }
}
