//! Leptos DragDrop Utilities
//!
//! Simple drag-and-drop for Leptos using mouse events.
//! Uses movement threshold to distinguish click from drag, and classifies the
//! pointer within a hovered row as upper half, lower half, or the band around
//! the midpoint.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Movement threshold in pixels to start dragging
pub const DRAG_THRESHOLD_PX: i32 = 5;

/// Half-height of the band around a row's midpoint that counts as "onto the row"
pub const ROW_DEADBAND_PX: f64 = 4.0;

/// Where the pointer sits within a hovered row
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RowEdge {
    Upper,
    Lower,
    /// Inside the deadband, or no usable geometry
    #[default]
    Middle,
}

/// Classify a vertical offset inside a row of `height` pixels.
///
/// Offsets within `deadband` of the midpoint are `Middle`.
pub fn classify_row_edge(offset_y: f64, height: f64, deadband: f64) -> RowEdge {
    if !(height > 0.0) || !offset_y.is_finite() {
        return RowEdge::Middle;
    }
    let from_mid = offset_y - height / 2.0;
    if from_mid.abs() <= deadband.max(0.0) {
        RowEdge::Middle
    } else if from_mid < 0.0 {
        RowEdge::Upper
    } else {
        RowEdge::Lower
    }
}

/// True once the pointer moved far enough from the press point
pub fn exceeds_threshold(start: (i32, i32), now: (i32, i32)) -> bool {
    (now.0 - start.0).abs() > DRAG_THRESHOLD_PX || (now.1 - start.1).abs() > DRAG_THRESHOLD_PX
}

/// DnD state signals, generic over the dragged payload
pub struct DndSignals<T: Copy + Send + Sync + 'static> {
    pub dragging_read: ReadSignal<Option<T>>,
    pub dragging_write: WriteSignal<Option<T>>,
    pub drag_just_ended_read: ReadSignal<bool>,
    pub drag_just_ended_write: WriteSignal<bool>,
    /// Pending payload (mousedown but not yet dragging)
    pub pending_read: ReadSignal<Option<T>>,
    pub pending_write: WriteSignal<Option<T>>,
    /// Start position for movement detection
    pub start_read: ReadSignal<(i32, i32)>,
    pub start_write: WriteSignal<(i32, i32)>,
}

impl<T: Copy + Send + Sync + 'static> Clone for DndSignals<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Copy + Send + Sync + 'static> Copy for DndSignals<T> {}

impl<T: Copy + Send + Sync + 'static> DndSignals<T> {
    /// Payload currently being dragged (tracked)
    pub fn dragging(&self) -> Option<T> {
        self.dragging_read.get()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging_read.with_untracked(Option::is_some)
    }
}

pub fn create_dnd_signals<T: Copy + Send + Sync + 'static>() -> DndSignals<T> {
    let (dragging_read, dragging_write) = signal(None::<T>);
    let (drag_just_ended_read, drag_just_ended_write) = signal(false);
    let (pending_read, pending_write) = signal(None::<T>);
    let (start_read, start_write) = signal((0i32, 0i32));
    DndSignals {
        dragging_read,
        dragging_write,
        drag_just_ended_read,
        drag_just_ended_write,
        pending_read,
        pending_write,
        start_read,
        start_write,
    }
}

/// End drag operation
pub fn end_drag<T: Copy + Send + Sync + 'static>(dnd: &DndSignals<T>) {
    dnd.dragging_write.set(None);
    dnd.pending_write.set(None);
    dnd.drag_just_ended_write.set(true);

    // Swallow the click that follows the mouseup
    if let Some(win) = web_sys::window() {
        let clear = dnd.drag_just_ended_write;
        let cb = wasm_bindgen::closure::Closure::<dyn FnMut()>::new(move || {
            clear.set(false);
        });
        let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(cb.as_ref().unchecked_ref(), 100);
        cb.forget();
    }
}

/// Create mousedown handler for draggable rows.
/// Records pending drag with start position
pub fn make_on_mousedown<T: Copy + Send + Sync + 'static>(
    dnd: DndSignals<T>,
    payload: T,
) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |ev: web_sys::MouseEvent| {
        if ev.button() != 0 {
            return;
        }
        if let Some(target) = ev.target() {
            if target.dyn_ref::<web_sys::HtmlInputElement>().is_some()
                || target.dyn_ref::<web_sys::HtmlButtonElement>().is_some()
                || target.dyn_ref::<web_sys::HtmlTextAreaElement>().is_some()
                || target.dyn_ref::<web_sys::HtmlSelectElement>().is_some()
            {
                return;
            }
        }
        // Nested rows: the innermost one wins
        ev.stop_propagation();
        dnd.pending_write.set(Some(payload));
        dnd.start_write.set((ev.client_x(), ev.client_y()));
    }
}

/// Vertical pointer offset within the element the handler is attached to
pub fn row_edge_of(ev: &web_sys::MouseEvent, deadband: f64) -> RowEdge {
    let Some(element) = ev
        .current_target()
        .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
    else {
        return RowEdge::Middle;
    };
    let rect = element.get_bounding_client_rect();
    classify_row_edge(ev.client_y() as f64 - rect.top(), rect.height(), deadband)
}

/// Create mousemove handler for a hover row.
///
/// Calls `on_hover` with the row edge while a drag is in progress.
pub fn make_on_row_mousemove<T, F>(dnd: DndSignals<T>, deadband: f64, on_hover: F) -> impl Fn(web_sys::MouseEvent) + Clone + 'static
where
    T: Copy + Send + Sync + 'static,
    F: Fn(RowEdge) + Clone + 'static,
{
    move |ev: web_sys::MouseEvent| {
        if dnd.is_dragging() {
            ev.stop_propagation();
            on_hover(row_edge_of(&ev, deadband));
        }
    }
}

/// Bind the document mousemove handler that promotes a pending press to a drag
fn bind_global_mousemove<T: Copy + Send + Sync + 'static>(dnd: DndSignals<T>) {
    use wasm_bindgen::closure::Closure;

    let on_mousemove = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
        let pending = dnd.pending_read.get_untracked();
        if pending.is_some() && !dnd.is_dragging() {
            if exceeds_threshold(dnd.start_read.get_untracked(), (ev.client_x(), ev.client_y())) {
                dnd.dragging_write.set(pending);
            }
        }
    });

    if let Some(doc) = web_sys::window().and_then(|w| w.document()) {
        let _ = doc.add_event_listener_with_callback("mousemove", on_mousemove.as_ref().unchecked_ref());
    }
    on_mousemove.forget();
}

/// Bind global mouseup handler for drop detection.
///
/// `on_drop` runs for every finished drag with the dragged payload; it is not
/// called for plain clicks. The caller decides whether a target was hovered.
pub fn bind_global_mouseup<T, F>(dnd: DndSignals<T>, on_drop: F)
where
    T: Copy + Send + Sync + 'static,
    F: Fn(T) + 'static,
{
    use wasm_bindgen::closure::Closure;

    let on_mouseup = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |_ev: web_sys::MouseEvent| {
        let dragged = dnd.dragging_read.get_untracked();
        end_drag(&dnd);
        if let Some(payload) = dragged {
            on_drop(payload);
        }
    });

    if let Some(doc) = web_sys::window().and_then(|w| w.document()) {
        let _ = doc.add_event_listener_with_callback("mouseup", on_mouseup.as_ref().unchecked_ref());
    }
    on_mouseup.forget();

    bind_global_mousemove(dnd);
}
