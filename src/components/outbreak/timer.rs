use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use log::error;
use wasm_bindgen::prelude::*;

use super::stepper::Ticker;

pub type TickCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// `setInterval` backed ticker. The callback is installed after construction
/// because it usually needs a handle to the stepper that owns this ticker.
#[derive(Default)]
pub struct IntervalTicker {
	callback: TickCallback,
}

impl IntervalTicker {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn callback(&self) -> TickCallback {
		self.callback.clone()
	}
}

/// Clears its interval on drop.
pub struct IntervalHandle {
	id: Option<i32>,
}

impl Drop for IntervalHandle {
	fn drop(&mut self) {
		if let (Some(id), Some(window)) = (self.id, web_sys::window()) {
			window.clear_interval_with_handle(id);
		}
	}
}

/// Step period as the `i32` milliseconds `setInterval` takes.
fn interval_millis(period: Duration) -> Option<i32> {
	i32::try_from(period.as_millis())
		.map_err(|_| error!("Step period {:?} does not fit setInterval", period))
		.ok()
}

impl Ticker for IntervalTicker {
	type Handle = IntervalHandle;

	fn arm(&self, period: Duration) -> IntervalHandle {
		let Some(millis) = interval_millis(period) else {
			return IntervalHandle { id: None };
		};
		let id = match (web_sys::window(), self.callback.borrow().as_ref()) {
			(Some(window), Some(cb)) => window
				.set_interval_with_callback_and_timeout_and_arguments_0(
					cb.as_ref().unchecked_ref(),
					millis,
				)
				.map_err(|e| error!("setInterval failed: {:?}", e))
				.ok(),
			_ => {
				error!("Interval ticker armed without a window or callback");
				None
			}
		};
		IntervalHandle { id }
	}
}
