use crate::error::Error;
use std::{convert::TryFrom, fmt, str::FromStr};

/// The window of days a dashboard report covers.
#[derive(serde::Serialize, serde::Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(try_from = "u32", into = "u32")]
pub enum TimeRange {
	SevenDays,
	FourteenDays,
	ThirtyDays,
}

impl TimeRange {
	pub const ALL: [TimeRange; 3] = [
		TimeRange::SevenDays,
		TimeRange::FourteenDays,
		TimeRange::ThirtyDays,
	];

	pub fn days(self) -> u32 {
		match self {
			TimeRange::SevenDays => 7,
			TimeRange::FourteenDays => 14,
			TimeRange::ThirtyDays => 30,
		}
	}

	/// The text a button for this time range is rendered with, e.g. "14 days".
	pub fn label(self) -> String {
		format!("{} days", self.days())
	}

	/// Find the time range a button label refers to.
	pub fn from_label(label: &str) -> Option<TimeRange> {
		let label = label.to_lowercase();
		// Longest windows first so "14 days" is never read as a shorter one.
		TimeRange::ALL
			.iter()
			.rev()
			.copied()
			.find(|time_range| label.contains(&time_range.label()))
	}
}

impl Default for TimeRange {
	fn default() -> TimeRange {
		TimeRange::SevenDays
	}
}

impl TryFrom<u32> for TimeRange {
	type Error = Error;
	fn try_from(days: u32) -> Result<TimeRange, Error> {
		match days {
			7 => Ok(TimeRange::SevenDays),
			14 => Ok(TimeRange::FourteenDays),
			30 => Ok(TimeRange::ThirtyDays),
			days => Err(Error::UnsupportedTimeRange { days }),
		}
	}
}

impl From<TimeRange> for u32 {
	fn from(time_range: TimeRange) -> u32 {
		time_range.days()
	}
}

impl FromStr for TimeRange {
	type Err = Error;
	fn from_str(value: &str) -> Result<TimeRange, Error> {
		let days: u32 = value.trim().parse().map_err(|_| Error::InvalidDays {
			value: value.to_owned(),
		})?;
		TimeRange::try_from(days)
	}
}

impl fmt::Display for TimeRange {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{}", self.days())
	}
}

/// The time range requested by the query string of the current page.
#[derive(Clone, Debug, PartialEq)]
pub enum Selection {
	/// The parameter is absent or empty.
	Default,
	Explicit(TimeRange),
	/// The parameter is present but does not name a supported time range.
	Invalid(String),
}

impl Selection {
	/// Read the selection from a query string such as `?days=14&foo=bar`. If the parameter is repeated, the first occurrence is used.
	pub fn from_search(search: &str, search_param: &str) -> Selection {
		let search = search.strip_prefix('?').unwrap_or(search);
		let value = url::form_urlencoded::parse(search.as_bytes())
			.find(|(key, _)| key == search_param)
			.map(|(_, value)| value.into_owned());
		match value {
			None => Selection::Default,
			Some(value) if value.is_empty() => Selection::Default,
			Some(value) => match value.parse() {
				Ok(time_range) => Selection::Explicit(time_range),
				Err(_) => Selection::Invalid(value),
			},
		}
	}

	/// The time range the page is showing, falling back to the default.
	pub fn effective(&self) -> TimeRange {
		match self {
			Selection::Explicit(time_range) => *time_range,
			Selection::Default | Selection::Invalid(_) => TimeRange::default(),
		}
	}

	/// The time range whose button is marked active. The default is never highlighted on its own.
	pub fn highlighted(&self) -> Option<TimeRange> {
		match self {
			Selection::Explicit(time_range) => Some(*time_range),
			Selection::Default | Selection::Invalid(_) => None,
		}
	}
}

/// Build the href that reloads `pathname` for `time_range`. Any other query parameters are dropped.
pub fn time_range_href(pathname: &str, search_param: &str, time_range: TimeRange) -> String {
	let query = url::form_urlencoded::Serializer::new(String::new())
		.append_pair(search_param, &time_range.to_string())
		.finish();
	format!("{}?{}", pathname, query)
}

#[test]
fn test_parse_time_range() {
	assert_eq!("7".parse::<TimeRange>(), Ok(TimeRange::SevenDays));
	assert_eq!(" 14 ".parse::<TimeRange>(), Ok(TimeRange::FourteenDays));
	assert_eq!("030".parse::<TimeRange>(), Ok(TimeRange::ThirtyDays));
	assert_eq!(
		"abc".parse::<TimeRange>(),
		Err(Error::InvalidDays {
			value: "abc".to_owned()
		})
	);
	assert_eq!(
		"-7".parse::<TimeRange>(),
		Err(Error::InvalidDays {
			value: "-7".to_owned()
		})
	);
	assert_eq!(
		"21".parse::<TimeRange>(),
		Err(Error::UnsupportedTimeRange { days: 21 })
	);
	assert_eq!(
		Error::UnsupportedTimeRange { days: 21 }.to_string(),
		"unsupported time range of 21 days"
	);
}

#[test]
fn test_time_range_from_label() {
	assert_eq!(TimeRange::from_label("7 days"), Some(TimeRange::SevenDays));
	assert_eq!(
		TimeRange::from_label("  Last 14 Days\n"),
		Some(TimeRange::FourteenDays)
	);
	assert_eq!(
		TimeRange::from_label("LAST 30 DAYS"),
		Some(TimeRange::ThirtyDays)
	);
	assert_eq!(TimeRange::from_label("All time"), None);
	assert_eq!(TimeRange::from_label("7days"), None);
}

#[test]
fn test_time_range_serde() {
	assert_eq!(
		serde_json::to_string(&TimeRange::FourteenDays).unwrap(),
		"14"
	);
	assert_eq!(
		serde_json::from_str::<TimeRange>("30").unwrap(),
		TimeRange::ThirtyDays
	);
	assert!(serde_json::from_str::<TimeRange>("90").is_err());
}

#[test]
fn test_selection_from_search() {
	let selections = vec![
		Selection::from_search("", "days"),
		Selection::from_search("?days=", "days"),
		Selection::from_search("?days=30", "days"),
		Selection::from_search("?foo=bar&days=14&days=30", "days"),
		Selection::from_search("days=abc", "days"),
		Selection::from_search("?days=21", "days"),
	];
	insta::assert_debug_snapshot!(selections, @r###"
    [
        Default,
        Default,
        Explicit(
            ThirtyDays,
        ),
        Explicit(
            FourteenDays,
        ),
        Invalid(
            "abc",
        ),
        Invalid(
            "21",
        ),
    ]
    "###);
}

#[test]
fn test_selection_effective_and_highlighted() {
	let selection = Selection::from_search("?days=14", "days");
	assert_eq!(selection.effective(), TimeRange::FourteenDays);
	assert_eq!(selection.highlighted(), Some(TimeRange::FourteenDays));
	let selection = Selection::from_search("?foo=bar", "days");
	assert_eq!(selection.effective(), TimeRange::SevenDays);
	assert_eq!(selection.highlighted(), None);
	let selection = Selection::from_search("?days=nope", "days");
	assert_eq!(selection.effective(), TimeRange::SevenDays);
	assert_eq!(selection.highlighted(), None);
}

#[test]
fn test_time_range_href() {
	assert_eq!(
		time_range_href("/dashboard", "days", TimeRange::ThirtyDays),
		"/dashboard?days=30"
	);
	assert_eq!(time_range_href("/", "days", TimeRange::SevenDays), "/?days=7");
}
