use std::sync::{Arc, Mutex, MutexGuard};

use super::views::RegionContent;

/// A named dashboard region a flow writes into.
///
/// Each write replaces the region's previous content as a whole.
pub trait RenderTarget: Send + Sync {
    fn write(&self, content: RegionContent);
}

#[derive(Debug, Default)]
struct RegionState {
    current: Option<RegionContent>,
    history: Vec<RegionContent>,
}

/// In-memory region. Clones share the same slot.
#[derive(Debug, Clone)]
pub struct MemoryTarget {
    name: &'static str,
    state: Arc<Mutex<RegionState>>,
}

impl MemoryTarget {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            state: Arc::new(Mutex::new(RegionState::default())),
        }
    }

    /// Region seeded with content that was on screen before any flow ran.
    pub fn with_initial(name: &'static str, content: RegionContent) -> Self {
        let target = Self::new(name);
        target.lock().current = Some(content);
        target
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn current(&self) -> Option<RegionContent> {
        self.lock().current.clone()
    }

    /// Every write in order, excluding the initial content.
    pub fn history(&self) -> Vec<RegionContent> {
        self.lock().history.clone()
    }

    pub fn write_count(&self) -> usize {
        self.lock().history.len()
    }

    fn lock(&self) -> MutexGuard<'_, RegionState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl RenderTarget for MemoryTarget {
    fn write(&self, content: RegionContent) {
        tracing::trace!(region = self.name, "region updated");
        let mut state = self.lock();
        state.history.push(content.clone());
        state.current = Some(content);
    }
}
