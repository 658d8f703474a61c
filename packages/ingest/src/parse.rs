//! Raw completion line parsing and record cleaning.
//!
//! One raw line either becomes a canonical 12-field [`IncidentRecord`] or is
//! rejected. The split is delimiter-aware: the two trailing fields (police
//! flag, pincode) are peeled off the right end, then the head is split on
//! its first nine delimiters so the free-text description absorbs any
//! embedded commas instead of fragmenting the record.
//!
//! Cleaning is the single quality gate before persistence. The pincode is
//! the sole hard validity check; a miscoded police flag is repaired to
//! `"False"` rather than rejected.

use safety_calls_models::{DELIMITER, FIELD_COUNT, IncidentRecord};

/// Splits one raw line into exactly [`FIELD_COUNT`] fields, or rejects it.
///
/// Returns `None` when the line cannot yield 12 fields.
#[must_use]
pub fn split_call_line(line: &str) -> Option<Vec<&str>> {
    let mut tail = line.rsplitn(3, DELIMITER);
    let pincode = tail.next()?;
    let police_flag = tail.next()?;
    let head = tail.next()?;

    let mut fields: Vec<&str> = head.splitn(FIELD_COUNT - 2, DELIMITER).collect();
    if fields.len() != FIELD_COUNT - 2 {
        return None;
    }

    fields.push(police_flag);
    fields.push(pincode);

    Some(fields)
}

/// Normalizes 12 raw fields into a canonical record, or rejects the record.
///
/// The first nine fields pass through unmodified. The description is
/// re-quoted when needed, the police flag is canonicalized, and the pincode
/// is validated — a record with a pincode that is not exactly six ASCII
/// digits yields `None`.
#[must_use]
pub fn clean_call_parts(parts: &[&str]) -> Option<IncidentRecord> {
    if parts.len() != FIELD_COUNT {
        return None;
    }

    let description = clean_description(parts[9]);
    let police_flag = clean_police_flag(parts[10]);

    let pincode = parts[11].trim();
    if pincode.len() != 6 || !pincode.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let mut fields: Vec<String> = parts[..FIELD_COUNT - 3]
        .iter()
        .map(ToString::to_string)
        .collect();
    fields.push(description);
    fields.push(police_flag);
    fields.push(pincode.to_string());

    IncidentRecord::from_fields(&fields)
}

/// Parses and cleans one raw line in a single step.
#[must_use]
pub fn parse_call_line(line: &str) -> Option<IncidentRecord> {
    split_call_line(line).and_then(|parts| clean_call_parts(&parts))
}

/// Strips one leading and one trailing literal quote if present, then
/// re-wraps the text in quotes when it contains the delimiter. This guards
/// the round trip through the delimited store.
fn clean_description(raw: &str) -> String {
    let trimmed = raw.trim();
    let stripped = trimmed.strip_prefix('"').unwrap_or(trimmed);
    let stripped = stripped.strip_suffix('"').unwrap_or(stripped);

    if stripped.contains(DELIMITER) {
        format!("\"{stripped}\"")
    } else {
        stripped.to_string()
    }
}

/// Canonicalizes the police-action flag to `"True"` or `"False"`, forcing
/// `"False"` on anything else (fail-safe default, not a rejection).
fn clean_police_flag(raw: &str) -> String {
    let capitalized = capitalize(raw.trim());
    if capitalized == "True" || capitalized == "False" {
        capitalized
    } else {
        "False".to_string()
    }
}

/// Uppercases the first character and lowercases the rest.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const CANONICAL: &str = "2024-06-15,Violence,Mumbai,19.1075,72.8654,2.0,9,Domestic Violence,1.5,\"Woman assaulted by husband in Andheri, rushed to hospital\",True,400053";

    #[test]
    fn splits_canonical_line_into_twelve_fields() {
        let parts = split_call_line(CANONICAL).unwrap();
        assert_eq!(parts.len(), FIELD_COUNT);
        assert_eq!(
            parts[9],
            "\"Woman assaulted by husband in Andheri, rushed to hospital\""
        );
        assert_eq!(parts[10], "True");
        assert_eq!(parts[11], "400053");
    }

    #[test]
    fn canonical_line_round_trips_verbatim() {
        let record = parse_call_line(CANONICAL).unwrap();
        assert_eq!(record.to_row(), CANONICAL);
    }

    #[test]
    fn rejects_lines_with_too_few_fields() {
        assert!(split_call_line("2024-06-15,Violence,Mumbai").is_none());
        assert!(split_call_line("2024-06-15,Violence,Mumbai,19.1,72.8,2.0,9,Stalking,1.5,desc,True").is_none());
        assert!(split_call_line("").is_none());
    }

    #[test]
    fn rejects_short_pincode() {
        let line = CANONICAL.replace("400053", "40005");
        assert!(parse_call_line(&line).is_none());
    }

    #[test]
    fn rejects_non_digit_pincode() {
        let line = CANONICAL.replace("400053", "4000S3");
        assert!(parse_call_line(&line).is_none());

        let line = CANONICAL.replace("400053", "4000533");
        assert!(parse_call_line(&line).is_none());
    }

    #[test]
    fn police_flag_is_canonicalized() {
        for (raw, expected) in [
            ("TRUE", "True"),
            ("true", "True"),
            ("false", "False"),
            ("FALSE", "False"),
            (" True ", "True"),
            ("yes", "False"),
            ("maybe", "False"),
            ("", "False"),
        ] {
            let line = CANONICAL.replace(",True,", &format!(",{raw},"));
            let record = parse_call_line(&line).unwrap();
            assert_eq!(record.police_action_required, expected, "raw flag {raw:?}");
        }
    }

    #[test]
    fn unquoted_description_without_delimiter_stays_bare() {
        let line = "2024-06-15,Harassment,Delhi,28.6139,77.2090,1.0,5,Stalking,0.8,Followed on her commute,False,110001";
        let record = parse_call_line(line).unwrap();
        assert_eq!(record.description, "Followed on her commute");
        assert_eq!(record.to_row(), line);
    }

    #[test]
    fn quoted_description_without_delimiter_loses_quotes() {
        let line = "2024-06-15,Harassment,Delhi,28.6139,77.2090,1.0,5,Stalking,0.8,\"Followed on her commute\",False,110001";
        let record = parse_call_line(line).unwrap();
        assert_eq!(record.description, "Followed on her commute");
    }

    #[test]
    fn description_with_delimiter_gets_requoted() {
        let line = "2024-06-15,Emergency,Chennai,13.0827,80.2707,0.5,8,Abduction,2.0,Dragged into a van, bystanders alerted police,True,600001";
        let record = parse_call_line(line).unwrap();
        assert_eq!(
            record.description,
            "\"Dragged into a van, bystanders alerted police\""
        );
    }

    #[test]
    fn first_nine_fields_pass_through_unmodified() {
        let line = "2024-06-15,Health, Bangalore ,12.9716,77.5946,3.5,4,Panic Attack,1.0,Collapsed at a bus stop,False,560001";
        let record = parse_call_line(line).unwrap();
        assert_eq!(record.city, " Bangalore ");
    }
}
