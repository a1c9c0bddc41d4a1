//! User-facing messages shown inline or in the error banner.

/// Banner shown when the lead backend rate-limits us.
pub const RATE_LIMITED: &str = "Too many requests. Please try again in 15 minutes.";

/// Banner shown for any unclassified failure.
pub const SUBMIT_FAILED: &str = "Failed to submit. Please try again later.";

/// Banner shown when no backend URL is configured.
pub const NOT_CONFIGURED: &str =
    "The rental service is not configured. Please contact support.";

/// Field error when the backend rejects the ZIP code.
pub const ZIP_REJECTED: &str = "Please enter a valid ZIP code. The postal code should be valid.";

/// Field error when the ZIP code is missing or too short.
pub const ZIP_REQUIRED: &str =
    "Please enter a valid ZIP code (we need your location to find nearby rentals).";

/// Field error when no equipment is selected.
pub const EQUIPMENT_REQUIRED: &str = "Please select the Equipter model you'd like to rent.";

/// Field error when no start date is picked.
pub const START_DATE_REQUIRED: &str = "Please select a start date for your rental.";

/// Field error when the end date precedes the start date.
pub const END_DATE_BEFORE_START: &str = "The end date cannot be before the start date.";

/// Field error when the renter type is not chosen.
pub const CUSTOMER_TYPE_REQUIRED: &str =
    "Please tell us whether you are renting as a company or an individual.";

/// Field error for a blank first name.
pub const FIRST_NAME_REQUIRED: &str = "Please enter your first name.";

/// Field error for a blank last name.
pub const LAST_NAME_REQUIRED: &str = "Please enter your last name.";

/// Field error for a blank company name on a business rental.
pub const COMPANY_REQUIRED: &str = "Company name is required for business rentals.";

/// Field error for a blank email.
pub const EMAIL_REQUIRED: &str = "Please provide your contact email.";

/// Field error for a malformed email.
pub const EMAIL_INVALID: &str = "Please enter a valid email address.";

/// Field error for a blank phone.
pub const PHONE_REQUIRED: &str = "Please provide your contact phone number.";

/// Field error for a phone that is not ten digits.
pub const PHONE_INVALID: &str = "Please enter a valid 10-digit phone number.";
