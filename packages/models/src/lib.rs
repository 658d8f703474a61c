#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Distress call taxonomy types and the canonical call record.
//!
//! This crate defines the call category taxonomy, the fixed city set, the
//! 12-column table layout, and the [`IncidentRecord`] type shared by the
//! generation, ingest, and store crates. Records hold their fields as
//! canonical strings: once cleaned, a record is persisted verbatim, so the
//! string form *is* the canonical form.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// The field delimiter used by the generation prompt, the line parser, and
/// the persisted call table.
pub const DELIMITER: char = ',';

/// Number of fields in a call record.
pub const FIELD_COUNT: usize = 12;

/// Number of call records requested per day.
pub const CALLS_PER_DAY: usize = 20;

/// Number of call records requested per city per day.
pub const CALLS_PER_CITY: usize = 5;

/// The fixed city set for a generation run.
pub const CITIES: [&str; 4] = ["Mumbai", "Delhi", "Bangalore", "Chennai"];

/// Column names of the persisted call table, in field order.
pub const CALL_COLUMNS: [&str; FIELD_COUNT] = [
    "date",
    "call_category",
    "city",
    "latitude",
    "longitude",
    "response_time_hr",
    "severity_scale",
    "incident_subtype",
    "incident_radius_km",
    "description",
    "police_action_required",
    "pincode",
];

/// Category of a distress call.
///
/// Used for prompt construction and run summaries. The cleaning pipeline is
/// deliberately lenient and does not reject records whose category falls
/// outside this set; the raw string is kept on the record.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum CallCategory {
    /// Stalking, catcalling, cyberbullying, workplace harassment
    Harassment,
    /// Domestic violence, assault, abduction
    Violence,
    /// Trafficking, forced labor, blackmail
    Exploitation,
    /// Immediate-danger calls requiring rapid response
    Emergency,
    /// Mental health support, panic attacks, distress counseling
    Counseling,
    /// Medical assistance calls
    Health,
}

impl CallCategory {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Harassment,
            Self::Violence,
            Self::Exploitation,
            Self::Emergency,
            Self::Counseling,
            Self::Health,
        ]
    }
}

/// A single cleaned distress call record, ready for persistence.
///
/// Fields mirror the 12 persisted columns in order. All fields are kept as
/// strings: the cleaner validates/repairs the last three and leaves the
/// first nine exactly as the model produced them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncidentRecord {
    /// ISO `YYYY-MM-DD` date of the call.
    pub date: String,
    /// Call category (see [`CallCategory`] for the requested set).
    pub call_category: String,
    /// City the call originated from.
    pub city: String,
    /// Latitude of the incident location.
    pub latitude: String,
    /// Longitude of the incident location.
    pub longitude: String,
    /// Response time in hours.
    pub response_time_hr: String,
    /// Severity on a 1-10 scale.
    pub severity_scale: String,
    /// Free-text incident subtype (e.g., "Domestic Violence").
    pub incident_subtype: String,
    /// Incident radius in kilometers.
    pub incident_radius_km: String,
    /// One-sentence description; quote-wrapped when it contains the delimiter.
    pub description: String,
    /// Canonical `"True"` / `"False"`.
    pub police_action_required: String,
    /// 6-digit postal code.
    pub pincode: String,
}

impl IncidentRecord {
    /// Builds a record from 12 field strings in column order.
    ///
    /// Returns `None` if the slice does not contain exactly
    /// [`FIELD_COUNT`] fields.
    #[must_use]
    pub fn from_fields(fields: &[String]) -> Option<Self> {
        let [
            date,
            call_category,
            city,
            latitude,
            longitude,
            response_time_hr,
            severity_scale,
            incident_subtype,
            incident_radius_km,
            description,
            police_action_required,
            pincode,
        ] = fields
        else {
            return None;
        };

        Some(Self {
            date: date.clone(),
            call_category: call_category.clone(),
            city: city.clone(),
            latitude: latitude.clone(),
            longitude: longitude.clone(),
            response_time_hr: response_time_hr.clone(),
            severity_scale: severity_scale.clone(),
            incident_subtype: incident_subtype.clone(),
            incident_radius_km: incident_radius_km.clone(),
            description: description.clone(),
            police_action_required: police_action_required.clone(),
            pincode: pincode.clone(),
        })
    }

    /// Returns the record's fields in column order.
    #[must_use]
    pub fn fields(&self) -> [&str; FIELD_COUNT] {
        [
            &self.date,
            &self.call_category,
            &self.city,
            &self.latitude,
            &self.longitude,
            &self.response_time_hr,
            &self.severity_scale,
            &self.incident_subtype,
            &self.incident_radius_km,
            &self.description,
            &self.police_action_required,
            &self.pincode,
        ]
    }

    /// Serializes the record as one delimited row, in column order.
    #[must_use]
    pub fn to_row(&self) -> String {
        self.fields().join(&DELIMITER.to_string())
    }
}
