use chrono::NaiveDate;

use crate::errors::CoreError;

/// Input date format used by the chat command surface.
const INPUT_FORMAT: &str = "%m-%d-%Y";

/// Parse a caller-supplied `MM-DD-YYYY` date string into a `NaiveDate`.
/// All dates are normalized through here before anything is stored or
/// compared.
pub fn parse_input_date(s: &str) -> Result<NaiveDate, CoreError> {
    NaiveDate::parse_from_str(s.trim(), INPUT_FORMAT).map_err(|e| {
        CoreError::ValidationError(format!(
            "Invalid date '{s}': expected MM-DD-YYYY ({e})"
        ))
    })
}

/// Format a date back into the chat-facing `MM-DD-YYYY` form.
pub fn format_input_date(date: NaiveDate) -> String {
    date.format(INPUT_FORMAT).to_string()
}
