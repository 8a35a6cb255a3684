//! Platform abstraction for the UI queue.
//!
//! All view state is confined to a single designated UI queue. Background
//! work (store queries, network calls) runs elsewhere and redelivers its
//! results onto this queue before touching any view.

/// Schedules work on the UI queue that owns all view state.
pub trait UiQueue {
    /// Runs `task` on the UI queue after `delay` seconds.
    fn after(&self, delay: f32, task: Box<dyn FnOnce()>);
}
