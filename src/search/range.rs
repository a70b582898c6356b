//! Dual-handle price range control
//!
//! [`PriceRangeControl`] is the page's slot for the slider widget. The
//! widget is attached once; later `initialize` calls hand back the attached
//! instance instead of binding a second one.

use crate::models::PriceBounds;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

static NEXT_SLIDER_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of an attached slider widget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SliderId(u64);

/// Which handle of the slider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handle {
    Low,
    High,
}

type UpdateListener = Box<dyn FnMut([f64; 2]) + Send>;

/// The slider primitive: two handles over a fixed range with a step
pub struct DualHandleSlider {
    id: SliderId,
    range: PriceBounds,
    step: f64,
    handles: [f64; 2],
    listeners: Vec<UpdateListener>,
}

impl DualHandleSlider {
    fn new(bounds: PriceBounds, step: f64) -> Self {
        // Reversed bounds from the service are swapped rather than trusted
        let range = PriceBounds {
            min: bounds.min.min(bounds.max),
            max: bounds.min.max(bounds.max),
        };
        Self {
            id: SliderId(NEXT_SLIDER_ID.fetch_add(1, Ordering::Relaxed)),
            range,
            step,
            handles: [range.min, range.max],
            listeners: Vec::new(),
        }
    }

    pub fn id(&self) -> SliderId {
        self.id
    }

    pub fn range(&self) -> PriceBounds {
        self.range
    }

    /// Number of `update` subscriptions bound to this widget
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn on_update(&mut self, listener: UpdateListener) {
        self.listeners.push(listener);
    }

    fn emit(&mut self) {
        let values = self.handles;
        for listener in self.listeners.iter_mut() {
            listener(values);
        }
    }

    fn clamp(&self, value: f64) -> f64 {
        value.max(self.range.min).min(self.range.max)
    }

    fn snap(&self, value: f64) -> f64 {
        let clamped = self.clamp(value);
        if self.step <= 0.0 {
            return clamped;
        }
        let steps = ((clamped - self.range.min) / self.step).round();
        self.clamp(self.range.min + steps * self.step)
    }

    fn set(&mut self, values: [f64; 2]) {
        let low = self.snap(values[0]);
        let high = self.snap(values[1]);
        self.handles = if low <= high { [low, high] } else { [high, low] };
        self.emit();
    }

    fn move_handle(&mut self, handle: Handle, value: f64) {
        let value = self.snap(value);
        match handle {
            Handle::Low => self.handles[0] = value.min(self.handles[1]),
            Handle::High => self.handles[1] = value.max(self.handles[0]),
        }
        self.emit();
    }
}

impl std::fmt::Debug for DualHandleSlider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DualHandleSlider")
            .field("id", &self.id)
            .field("range", &self.range)
            .field("step", &self.step)
            .field("handles", &self.handles)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Format the range label shown next to the slider, e.g. `"$ 100 - $ 500"`
pub fn format_label(values: [f64; 2]) -> String {
    format!("$ {} - $ {}", values[0].round(), values[1].round())
}

/// Format a single handle tooltip, e.g. `"$ 100"`
pub fn format_tooltip(value: f64) -> String {
    format!("$ {}", value.round())
}

/// Page slot holding the price slider
#[derive(Debug, Default)]
pub struct PriceRangeControl {
    slider: Option<DualHandleSlider>,
    label: Arc<Mutex<String>>,
}

impl PriceRangeControl {
    /// Slider step in currency units
    pub const STEP: f64 = 1.0;

    pub fn new() -> Self {
        Self::default()
    }

    /// Attach the slider over `bounds`, or return the one already attached
    ///
    /// A fresh slider starts at the full range and immediately publishes its
    /// label.
    pub fn initialize(&mut self, bounds: PriceBounds) -> SliderId {
        if let Some(existing) = &self.slider {
            tracing::debug!(id = existing.id.0, "Price slider already attached, reusing it");
            return existing.id;
        }

        let mut slider = DualHandleSlider::new(bounds, Self::STEP);
        let label = Arc::clone(&self.label);
        slider.on_update(Box::new(move |values| {
            if let Ok(mut text) = label.lock() {
                *text = format_label(values);
            }
        }));
        slider.emit();

        let id = slider.id;
        if bounds.min > bounds.max {
            tracing::warn!(min = bounds.min, max = bounds.max, "Price bounds reversed, swapping");
        }
        tracing::info!(min = bounds.min, max = bounds.max, "Attached price slider");
        self.slider = Some(slider);
        id
    }

    pub fn is_initialized(&self) -> bool {
        self.slider.is_some()
    }

    /// The attached slider, if any
    pub fn slider(&self) -> Option<&DualHandleSlider> {
        self.slider.as_ref()
    }

    /// Current `[low, high]` handle positions
    pub fn get(&self) -> Option<[f64; 2]> {
        self.slider.as_ref().map(|s| s.handles)
    }

    /// Move both handles in a single update
    ///
    /// Returns `false` when no slider is attached.
    pub fn set(&mut self, values: [f64; 2]) -> bool {
        match self.slider.as_mut() {
            Some(slider) => {
                slider.set(values);
                true
            }
            None => false,
        }
    }

    /// Drag one handle; it cannot cross the other one
    pub fn move_handle(&mut self, handle: Handle, value: f64) -> bool {
        match self.slider.as_mut() {
            Some(slider) => {
                slider.move_handle(handle, value);
                true
            }
            None => false,
        }
    }

    /// Latest label text, empty before the slider is attached
    pub fn label(&self) -> String {
        self.label.lock().map(|t| t.clone()).unwrap_or_default()
    }

    /// Tooltip text for both handles
    pub fn tooltips(&self) -> Option<[String; 2]> {
        self.get()
            .map(|[low, high]| [format_tooltip(low), format_tooltip(high)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(min: f64, max: f64) -> PriceBounds {
        PriceBounds { min, max }
    }

    #[test]
    fn test_initialize_starts_at_full_range() {
        let mut control = PriceRangeControl::new();
        control.initialize(bounds(99.0, 1499.0));

        assert_eq!(control.get(), Some([99.0, 1499.0]));
        assert_eq!(control.label(), "$ 99 - $ 1499");
    }

    #[test]
    fn test_initialize_twice_reuses_instance() {
        let mut control = PriceRangeControl::new();
        let first = control.initialize(bounds(100.0, 900.0));
        control.set([200.0, 300.0]);

        let second = control.initialize(bounds(100.0, 900.0));
        assert_eq!(first, second);
        assert_eq!(control.slider().unwrap().listener_count(), 1);
        // Reuse leaves the handles where they were
        assert_eq!(control.get(), Some([200.0, 300.0]));
    }

    #[test]
    fn test_get_before_initialize_is_none() {
        let mut control = PriceRangeControl::new();
        assert_eq!(control.get(), None);
        assert!(!control.set([1.0, 2.0]));
        assert_eq!(control.label(), "");
    }

    #[test]
    fn test_set_moves_both_handles_and_refreshes_label() {
        let mut control = PriceRangeControl::new();
        control.initialize(bounds(0.0, 1000.0));

        assert!(control.set([100.4, 500.6]));
        assert_eq!(control.get(), Some([100.0, 501.0]));
        assert_eq!(control.label(), "$ 100 - $ 501");
    }

    #[test]
    fn test_set_clamps_to_range() {
        let mut control = PriceRangeControl::new();
        control.initialize(bounds(50.0, 800.0));

        control.set([0.0, 5000.0]);
        assert_eq!(control.get(), Some([50.0, 800.0]));
    }

    #[test]
    fn test_move_handle_cannot_cross() {
        let mut control = PriceRangeControl::new();
        control.initialize(bounds(0.0, 1000.0));
        control.set([200.0, 400.0]);

        control.move_handle(Handle::Low, 700.0);
        assert_eq!(control.get(), Some([400.0, 400.0]));

        control.move_handle(Handle::High, 10.0);
        let [low, high] = control.get().unwrap();
        assert!(low <= high);
        assert_eq!(control.label(), "$ 400 - $ 400");
    }

    #[test]
    fn test_reversed_bounds_are_swapped() {
        let mut control = PriceRangeControl::new();
        control.initialize(bounds(900.0, 100.0));

        assert_eq!(control.get(), Some([100.0, 900.0]));
        assert!(control.set([200.0, 300.0]));
        assert_eq!(control.get(), Some([200.0, 300.0]));
        assert!(control.move_handle(Handle::High, 5000.0));
        assert_eq!(control.get(), Some([200.0, 900.0]));
    }

    #[test]
    fn test_tooltips_round_values() {
        let mut control = PriceRangeControl::new();
        control.initialize(bounds(0.0, 10.0));
        assert_eq!(
            control.tooltips(),
            Some(["$ 0".to_string(), "$ 10".to_string()])
        );
    }
}
