use derive_more::{Display, Error};

#[derive(Display, Debug, Error, PartialEq)]
pub enum Error {
	#[display(fmt = "invalid days value {:?}", value)]
	InvalidDays { value: String },
	#[display(fmt = "unsupported time range of {} days", days)]
	UnsupportedTimeRange { days: u32 },
}
