//! Scoped pointer capture for drag and resize gestures.
//!
//! A gesture holds a [`CaptureGuard`] for exactly as long as it runs. Dropping
//! the guard (gesture end, gesture replaced, grid torn down) releases whatever
//! the guard acquired; on wasm that is a pair of document-level listeners.

use std::fmt;

/// Releases a pointer capture when dropped.
pub struct CaptureGuard {
    release: Option<Box<dyn FnOnce()>>,
}

impl CaptureGuard {
    /// A guard that holds nothing (native hosts and tests).
    pub fn noop() -> Self {
        Self { release: None }
    }

    /// A guard that runs `release` once when dropped.
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// True while a release action is still pending.
    pub fn is_holding(&self) -> bool {
        self.release.is_some()
    }
}

impl Default for CaptureGuard {
    fn default() -> Self {
        Self::noop()
    }
}

impl Drop for CaptureGuard {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl fmt::Debug for CaptureGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaptureGuard")
            .field("holding", &self.is_holding())
            .finish()
    }
}

/// Attach `mousemove`/`mouseup` listeners to the document for the lifetime of
/// the returned guard. Callbacks receive the pointer's client x coordinate.
#[cfg(target_arch = "wasm32")]
pub fn capture_document_pointer(
    mut on_move: impl FnMut(f32) + 'static,
    mut on_up: impl FnMut(f32) + 'static,
) -> CaptureGuard {
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::JsCast;
    use web_sys::MouseEvent;

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return CaptureGuard::noop();
    };

    // Listeners from the previous gesture are finished running by now.
    RETIRED.with(|retired| retired.borrow_mut().clear());

    let move_closure = Closure::wrap(Box::new(move |event: MouseEvent| {
        on_move(event.client_x() as f32);
    }) as Box<dyn FnMut(MouseEvent)>);
    let up_closure = Closure::wrap(Box::new(move |event: MouseEvent| {
        on_up(event.client_x() as f32);
    }) as Box<dyn FnMut(MouseEvent)>);

    document
        .add_event_listener_with_callback("mousemove", move_closure.as_ref().unchecked_ref())
        .ok();
    document
        .add_event_listener_with_callback("mouseup", up_closure.as_ref().unchecked_ref())
        .ok();

    CaptureGuard::new(move || {
        document
            .remove_event_listener_with_callback(
                "mousemove",
                move_closure.as_ref().unchecked_ref(),
            )
            .ok();
        document
            .remove_event_listener_with_callback("mouseup", up_closure.as_ref().unchecked_ref())
            .ok();
        // The release usually runs inside the mouseup callback itself, so the
        // closures cannot be freed until the next gesture starts.
        RETIRED.with(|retired| {
            let mut retired = retired.borrow_mut();
            retired.push(move_closure);
            retired.push(up_closure);
        });
    })
}

#[cfg(target_arch = "wasm32")]
thread_local! {
    static RETIRED: std::cell::RefCell<Vec<wasm_bindgen::closure::Closure<dyn FnMut(web_sys::MouseEvent)>>> =
        const { std::cell::RefCell::new(Vec::new()) };
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_release_runs_once_on_drop() {
        let released = Rc::new(Cell::new(0));
        let counter = Rc::clone(&released);
        let guard = CaptureGuard::new(move || counter.set(counter.get() + 1));
        assert!(guard.is_holding());
        drop(guard);
        assert_eq!(released.get(), 1);
    }

    #[test]
    fn test_noop_guard() {
        let guard = CaptureGuard::noop();
        assert!(!guard.is_holding());
    }
}
