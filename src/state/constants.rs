//! Option lists and defaults for the patient intake form

/// Gender options offered on the personal information section
pub const GENDER_OPTIONS: &[&str] = &["Male", "Female", "Other"];

/// Physicians offered by the primary care select
pub const DOCTORS: &[&str] = &[
    "Dr. Adaeze Okafor",
    "Dr. Miguel Santana",
    "Dr. Priya Raghavan",
    "Dr. Hannah Weiss",
    "Dr. Samuel Osei",
    "Dr. Elena Petrova",
    "Dr. Thomas Gallagher",
    "Dr. Mei-Ling Chou",
    "Dr. Omar Haddad",
];

/// Accepted identification document types
pub const IDENTIFICATION_TYPES: &[&str] = &[
    "Birth Certificate",
    "Driver's License",
    "Medical Insurance Card/Policy",
    "Military ID Card",
    "National Identity Card",
    "Passport",
    "Resident Alien Card (Green Card)",
    "Social Security Card",
    "State ID Card",
    "Student ID Card",
    "Voter ID Card",
];

/// Country prefix applied to phone numbers typed without one
pub const DEFAULT_COUNTRY_CODE: &str = "+91";

/// chrono format dates are entered and parsed in unless configured otherwise
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Name of the identification document upload field. The key handler
/// special-cases it so typed characters build a file path instead of text.
pub const DOCUMENT_FIELD: &str = "identification_document";

/// Name of the gender radio field. The key handler special-cases it so the
/// left/right arrow keys cycle through [`GENDER_OPTIONS`].
pub const GENDER_FIELD: &str = "gender";
