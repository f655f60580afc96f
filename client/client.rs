use dashboard_ui as ui;
use wasm_bindgen::prelude::*;
use web_sys::console;

#[wasm_bindgen(start)]
pub fn start() {
	console_error_panic_hook::set_once();
	if let Err(error) = ui::boot_time_range_select(ui::TimeRangeSelectOptions::default()) {
		console::error_1(&error);
	}
}
