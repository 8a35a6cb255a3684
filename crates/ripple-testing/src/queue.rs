//! UI queue doubles.

use std::cell::RefCell;
use std::rc::Rc;

use ripple_flow::UiQueue;

/// Runs every scheduled task synchronously, recording the requested delay.
#[derive(Default)]
pub struct ImmediateQueue {
    delays: RefCell<Vec<f32>>,
}

impl ImmediateQueue {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn scheduled_delays(&self) -> Vec<f32> {
        self.delays.borrow().clone()
    }
}

impl UiQueue for ImmediateQueue {
    fn after(&self, delay: f32, task: Box<dyn FnOnce()>) {
        self.delays.borrow_mut().push(delay);
        task();
    }
}

/// Holds scheduled tasks until the test drives them explicitly.
#[derive(Default)]
pub struct ManualQueue {
    tasks: RefCell<Vec<(f32, Box<dyn FnOnce()>)>>,
}

impl ManualQueue {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn pending(&self) -> usize {
        self.tasks.borrow().len()
    }

    /// Runs the oldest scheduled task. Returns its delay, or `None` when
    /// nothing is pending.
    pub fn run_next(&self) -> Option<f32> {
        let (delay, task) = {
            let mut tasks = self.tasks.borrow_mut();
            if tasks.is_empty() {
                return None;
            }
            tasks.remove(0)
        };
        task();
        Some(delay)
    }
}

impl UiQueue for ManualQueue {
    fn after(&self, delay: f32, task: Box<dyn FnOnce()>) {
        self.tasks.borrow_mut().push((delay, task));
    }
}
