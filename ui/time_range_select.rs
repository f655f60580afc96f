use dashboard_common::time_range::{time_range_href, Selection, TimeRange};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::console;

pub struct TimeRangeSelectOptions {
	/// Selects the buttons of the time range group.
	pub button_selector: String,
	/// The class that marks the selected button.
	pub active_class: String,
	/// The query parameter that carries the number of days.
	pub search_param: String,
	/// The `data-*` key that tags a button with its number of days.
	pub dataset_key: String,
}

impl Default for TimeRangeSelectOptions {
	fn default() -> TimeRangeSelectOptions {
		TimeRangeSelectOptions {
			button_selector: ".time-range .btn".to_owned(),
			active_class: "active".to_owned(),
			search_param: "days".to_owned(),
			dataset_key: "days".to_owned(),
		}
	}
}

/// The parts of the page url the time range select reads.
#[derive(Clone, Debug)]
pub struct PageLocation {
	pub pathname: String,
	pub search: String,
}

pub trait TimeRangeButton {
	/// The explicit number of days the button is tagged with, if any.
	fn tag(&self) -> Option<String>;
	fn label(&self) -> String;
	fn set_active(&self, active: bool);
}

/// The time range a button stands for. An explicit tag wins over the label.
pub fn button_time_range<B: TimeRangeButton + ?Sized>(button: &B) -> Option<TimeRange> {
	button
		.tag()
		.and_then(|tag| tag.parse().ok())
		.or_else(|| TimeRange::from_label(&button.label()))
}

pub struct TimeRangeSelect<B> {
	pathname: String,
	search_param: String,
	selection: Selection,
	buttons: Vec<B>,
}

impl<B: TimeRangeButton> TimeRangeSelect<B> {
	/// Mark the button for the selected time range as active and clear every other button.
	pub fn boot(
		location: PageLocation,
		buttons: Vec<B>,
		options: &TimeRangeSelectOptions,
	) -> TimeRangeSelect<B> {
		let selection = Selection::from_search(&location.search, &options.search_param);
		let highlighted = selection.highlighted();
		for button in buttons.iter() {
			button.set_active(false);
			if let Some(time_range) = button_time_range(button) {
				if Some(time_range) == highlighted {
					button.set_active(true);
				}
			}
		}
		TimeRangeSelect {
			pathname: location.pathname,
			search_param: options.search_param.clone(),
			selection,
			buttons,
		}
	}

	pub fn selection(&self) -> &Selection {
		&self.selection
	}

	pub fn buttons(&self) -> &[B] {
		&self.buttons
	}

	/// The href to navigate to when `button` is clicked. Buttons that do not name a time range load the default.
	pub fn href(&self, button: &B) -> String {
		let time_range = button_time_range(button).unwrap_or_default();
		time_range_href(&self.pathname, &self.search_param, time_range)
	}
}

struct ElementButton {
	element: web_sys::HtmlElement,
	active_class: String,
	dataset_key: String,
}

impl TimeRangeButton for ElementButton {
	fn tag(&self) -> Option<String> {
		self.element.dataset().get(&self.dataset_key)
	}

	fn label(&self) -> String {
		self.element.text_content().unwrap_or_default()
	}

	fn set_active(&self, active: bool) {
		let class_list = self.element.class_list();
		let result = if active {
			class_list.add_1(&self.active_class)
		} else {
			class_list.remove_1(&self.active_class)
		};
		if let Err(error) = result {
			console::error_1(&error);
		}
	}
}

/// Highlight the selected time range button and make every button reload the page with its time range. If the document is still loading, this waits for `DOMContentLoaded`.
pub fn boot_time_range_select(options: TimeRangeSelectOptions) -> Result<(), JsValue> {
	let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
	let document = window
		.document()
		.ok_or_else(|| JsValue::from_str("no document"))?;
	if document.ready_state() != "loading" {
		return hydrate_time_range_select(&window, &document, &options);
	}
	let callback_fn = Closure::<dyn Fn(_)>::wrap(Box::new(move |_event: web_sys::Event| {
		let window = match web_sys::window() {
			Some(window) => window,
			None => return,
		};
		let document = match window.document() {
			Some(document) => document,
			None => return,
		};
		if let Err(error) = hydrate_time_range_select(&window, &document, &options) {
			console::error_1(&error);
		}
	}));
	document.add_event_listener_with_callback(
		"DOMContentLoaded",
		callback_fn.as_ref().unchecked_ref(),
	)?;
	callback_fn.forget();
	Ok(())
}

fn hydrate_time_range_select(
	window: &web_sys::Window,
	document: &web_sys::Document,
	options: &TimeRangeSelectOptions,
) -> Result<(), JsValue> {
	let location = window.location();
	let location = PageLocation {
		pathname: location.pathname()?,
		search: location.search()?,
	};
	let node_list = document.query_selector_all(&options.button_selector)?;
	let buttons: Vec<ElementButton> = (0..node_list.length())
		.filter_map(|index| node_list.get(index))
		.filter_map(|node| node.dyn_into::<web_sys::HtmlElement>().ok())
		.map(|element| ElementButton {
			element,
			active_class: options.active_class.clone(),
			dataset_key: options.dataset_key.clone(),
		})
		.collect();
	let time_range_select = TimeRangeSelect::boot(location, buttons, options);
	if let Selection::Invalid(value) = time_range_select.selection() {
		console::warn_1(
			&format!(
				"ignoring unsupported {} parameter {:?}",
				options.search_param, value
			)
			.into(),
		);
	}
	for button in time_range_select.buttons() {
		let href = time_range_select.href(button);
		let callback_fn = Closure::<dyn Fn(_)>::wrap(Box::new(move |_event: web_sys::Event| {
			if let Some(window) = web_sys::window() {
				if let Err(error) = window.location().set_href(&href) {
					console::error_1(&error);
				}
			}
		}));
		button
			.element
			.add_event_listener_with_callback("click", callback_fn.as_ref().unchecked_ref())?;
		callback_fn.forget();
	}
	Ok(())
}

#[cfg(test)]
struct FakeButton {
	tag: Option<String>,
	label: String,
	active: std::cell::Cell<bool>,
}

#[cfg(test)]
impl FakeButton {
	fn new(label: &str) -> FakeButton {
		FakeButton {
			tag: None,
			label: label.to_owned(),
			active: std::cell::Cell::new(false),
		}
	}

	fn tagged(tag: &str, label: &str) -> FakeButton {
		FakeButton {
			tag: Some(tag.to_owned()),
			..FakeButton::new(label)
		}
	}
}

#[cfg(test)]
impl TimeRangeButton for FakeButton {
	fn tag(&self) -> Option<String> {
		self.tag.clone()
	}

	fn label(&self) -> String {
		self.label.clone()
	}

	fn set_active(&self, active: bool) {
		self.active.set(active);
	}
}

#[cfg(test)]
fn boot_dashboard(search: &str, buttons: Vec<FakeButton>) -> TimeRangeSelect<FakeButton> {
	let location = PageLocation {
		pathname: "/dashboard".to_owned(),
		search: search.to_owned(),
	};
	TimeRangeSelect::boot(location, buttons, &TimeRangeSelectOptions::default())
}

#[cfg(test)]
fn dashboard_buttons() -> Vec<FakeButton> {
	vec![
		FakeButton::new("7 days"),
		FakeButton::new("14 days"),
		FakeButton::new("30 days"),
	]
}

#[cfg(test)]
fn active_labels(time_range_select: &TimeRangeSelect<FakeButton>) -> Vec<String> {
	time_range_select
		.buttons()
		.iter()
		.filter(|button| button.active.get())
		.map(|button| button.label.clone())
		.collect()
}

#[test]
fn test_boot_highlights_selected_time_range() {
	for (search, label) in &[
		("?days=7", "7 days"),
		("?days=14", "14 days"),
		("?days=30", "30 days"),
	] {
		let time_range_select = boot_dashboard(search, dashboard_buttons());
		assert_eq!(active_labels(&time_range_select), vec![label.to_string()]);
	}
}

#[test]
fn test_boot_without_days_highlights_nothing() {
	let time_range_select = boot_dashboard("", dashboard_buttons());
	assert_eq!(time_range_select.selection(), &Selection::Default);
	assert!(active_labels(&time_range_select).is_empty());
}

#[test]
fn test_boot_clears_stale_active_markers() {
	let buttons = dashboard_buttons();
	for button in buttons.iter() {
		button.active.set(true);
	}
	let time_range_select = boot_dashboard("?days=abc", buttons);
	assert_eq!(
		time_range_select.selection(),
		&Selection::Invalid("abc".to_owned())
	);
	assert!(active_labels(&time_range_select).is_empty());
	let time_range_select = boot_dashboard("?days=21", dashboard_buttons());
	assert!(active_labels(&time_range_select).is_empty());
}

#[test]
fn test_boot_without_buttons() {
	let time_range_select = boot_dashboard("?days=14", Vec::new());
	assert!(time_range_select.buttons().is_empty());
}

#[test]
fn test_href_for_clicked_button() {
	let time_range_select = boot_dashboard("?days=14", dashboard_buttons());
	let buttons = time_range_select.buttons();
	assert!(buttons[1].active.get());
	assert_eq!(time_range_select.href(&buttons[0]), "/dashboard?days=7");
	assert_eq!(time_range_select.href(&buttons[1]), "/dashboard?days=14");
	assert_eq!(time_range_select.href(&buttons[2]), "/dashboard?days=30");
}

#[test]
fn test_href_for_unrecognized_button() {
	let time_range_select = boot_dashboard("?days=30", vec![FakeButton::new("All time")]);
	let button = &time_range_select.buttons()[0];
	assert!(!button.active.get());
	assert_eq!(time_range_select.href(button), "/dashboard?days=7");
}

#[test]
fn test_href_drops_other_search_params() {
	let time_range_select = boot_dashboard("?foo=bar&days=14", dashboard_buttons());
	assert_eq!(
		active_labels(&time_range_select),
		vec!["14 days".to_owned()]
	);
	let button = &time_range_select.buttons()[2];
	assert_eq!(time_range_select.href(button), "/dashboard?days=30");
}

#[test]
fn test_tag_takes_precedence_over_label() {
	let buttons = vec![
		FakeButton::tagged("30", "Last month"),
		FakeButton::tagged("14", "7 days"),
		FakeButton::tagged("90", "7 days"),
	];
	let time_range_select = boot_dashboard("?days=30", buttons);
	assert_eq!(
		active_labels(&time_range_select),
		vec!["Last month".to_owned()]
	);
	let buttons = time_range_select.buttons();
	assert_eq!(time_range_select.href(&buttons[0]), "/dashboard?days=30");
	assert_eq!(time_range_select.href(&buttons[1]), "/dashboard?days=14");
	assert_eq!(time_range_select.href(&buttons[2]), "/dashboard?days=7");
}
