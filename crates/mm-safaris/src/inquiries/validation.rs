use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;
use validator::ValidateEmail;

use super::domain::{BookingForm, ContactForm, NewBooking, NewContactMessage};
use crate::catalog::TourId;

pub const SHORT_TEXT_MAX_LEN: usize = 200;
pub const EMAIL_MAX_LEN: usize = 254;
pub const PHONE_MAX_LEN: usize = 20;
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldErrorKind {
    Required,
    InvalidFormat,
    OutOfRange,
    TooLong { max: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    #[serde(flatten)]
    pub kind: FieldErrorKind,
    pub message: String,
}

impl FieldError {
    fn new(kind: FieldErrorKind) -> Self {
        let message = match kind {
            FieldErrorKind::Required => "This field is required.".to_string(),
            FieldErrorKind::InvalidFormat => "Enter a valid value.".to_string(),
            FieldErrorKind::OutOfRange => {
                "Ensure this value is a whole number greater than or equal to 1.".to_string()
            }
            FieldErrorKind::TooLong { max } => {
                format!("Ensure this value has at most {max} characters.")
            }
        };
        Self { kind, message }
    }
}

/// Per-field rejection reasons, keyed by form field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<&'static str, FieldError>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: &str) -> Option<&FieldError> {
        self.0.get(field)
    }

    pub fn kind(&self, field: &str) -> Option<FieldErrorKind> {
        self.get(field).map(|error| error.kind)
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.keys().copied()
    }

    fn push(&mut self, field: &'static str, kind: FieldErrorKind) {
        self.0.insert(field, FieldError::new(kind));
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<_> = self.fields().collect();
        write!(f, "invalid fields: {}", fields.join(", "))
    }
}

/// Check a posted booking form. Either every field is usable or nothing is.
pub fn validate_booking(tour_id: TourId, form: &BookingForm) -> Result<NewBooking, FieldErrors> {
    let mut errors = FieldErrors::default();

    let full_name = short_text(&mut errors, "full_name", &form.full_name, SHORT_TEXT_MAX_LEN);
    let email = email(&mut errors, "email", &form.email);
    let phone = short_text(&mut errors, "phone", &form.phone, PHONE_MAX_LEN);
    let number_of_people = head_count(&mut errors, "number_of_people", &form.number_of_people);
    let preferred_date = calendar_date(&mut errors, "preferred_date", &form.preferred_date);
    let special_requests = Some(form.special_requests.trim())
        .filter(|text| !text.is_empty())
        .map(str::to_string);

    match (full_name, email, phone, number_of_people, preferred_date) {
        (Some(full_name), Some(email), Some(phone), Some(number_of_people), Some(preferred_date))
            if errors.is_empty() =>
        {
            Ok(NewBooking {
                tour_id,
                full_name,
                email,
                phone,
                number_of_people,
                preferred_date,
                special_requests,
            })
        }
        _ => Err(errors),
    }
}

pub fn validate_contact(form: &ContactForm) -> Result<NewContactMessage, FieldErrors> {
    let mut errors = FieldErrors::default();

    let name = short_text(&mut errors, "name", &form.name, SHORT_TEXT_MAX_LEN);
    let email = email(&mut errors, "email", &form.email);
    let subject = short_text(&mut errors, "subject", &form.subject, SHORT_TEXT_MAX_LEN);
    let message = short_text(&mut errors, "message", &form.message, usize::MAX);

    match (name, email, subject, message) {
        (Some(name), Some(email), Some(subject), Some(message)) if errors.is_empty() => {
            Ok(NewContactMessage {
                name,
                email,
                subject,
                message,
            })
        }
        _ => Err(errors),
    }
}

fn required<'a>(errors: &mut FieldErrors, field: &'static str, raw: &'a str) -> Option<&'a str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        errors.push(field, FieldErrorKind::Required);
        None
    } else {
        Some(trimmed)
    }
}

fn short_text(
    errors: &mut FieldErrors,
    field: &'static str,
    raw: &str,
    max: usize,
) -> Option<String> {
    let value = required(errors, field, raw)?;
    if value.chars().count() > max {
        errors.push(field, FieldErrorKind::TooLong { max });
        return None;
    }
    Some(value.to_string())
}

fn email(errors: &mut FieldErrors, field: &'static str, raw: &str) -> Option<String> {
    let value = short_text(errors, field, raw, EMAIL_MAX_LEN)?;
    if !domain_has_dot(&value) || !value.validate_email() {
        errors.push(field, FieldErrorKind::InvalidFormat);
        return None;
    }
    Some(value)
}

/// `local@domain` where the domain has at least one inner dot.
fn domain_has_dot(value: &str) -> bool {
    value
        .rsplit_once('@')
        .map(|(local, domain)| {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        })
        .unwrap_or(false)
}

fn head_count(errors: &mut FieldErrors, field: &'static str, raw: &str) -> Option<u32> {
    let value = required(errors, field, raw)?;
    match value.parse::<u32>() {
        Ok(count) if count >= 1 => Some(count),
        _ => {
            errors.push(field, FieldErrorKind::OutOfRange);
            None
        }
    }
}

fn calendar_date(errors: &mut FieldErrors, field: &'static str, raw: &str) -> Option<NaiveDate> {
    let value = required(errors, field, raw)?;
    match NaiveDate::parse_from_str(value, DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(_) => {
            errors.push(field, FieldErrorKind::InvalidFormat);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn booking_form() -> BookingForm {
        BookingForm {
            full_name: "  Wanjiru Kamau ".to_string(),
            email: "wanjiru@example.co.ke".to_string(),
            phone: "+254700123456".to_string(),
            number_of_people: "2".to_string(),
            preferred_date: "2025-08-14".to_string(),
            special_requests: String::new(),
        }
    }

    #[test]
    fn accepts_a_complete_booking() {
        let booking = validate_booking(TourId(7), &booking_form()).expect("valid booking");
        assert_eq!(booking.tour_id, TourId(7));
        assert_eq!(booking.full_name, "Wanjiru Kamau");
        assert_eq!(booking.number_of_people, 2);
        assert_eq!(
            booking.preferred_date,
            NaiveDate::from_ymd_opt(2025, 8, 14).expect("valid date")
        );
        assert_eq!(booking.special_requests, None);
    }

    #[test]
    fn reports_every_bad_field_at_once() {
        let form = BookingForm {
            full_name: String::new(),
            email: "bad".to_string(),
            phone: "+1 555 0100".to_string(),
            number_of_people: "0".to_string(),
            preferred_date: "not-a-date".to_string(),
            special_requests: String::new(),
        };
        let errors = validate_booking(TourId(1), &form).expect_err("invalid booking");
        assert_eq!(errors.len(), 4);
        assert_eq!(errors.kind("full_name"), Some(FieldErrorKind::Required));
        assert_eq!(errors.kind("email"), Some(FieldErrorKind::InvalidFormat));
        assert_eq!(errors.kind("number_of_people"), Some(FieldErrorKind::OutOfRange));
        assert_eq!(errors.kind("preferred_date"), Some(FieldErrorKind::InvalidFormat));
    }

    #[test]
    fn head_count_must_be_a_positive_whole_number() {
        for raw in ["0", "-3", "2.5", "two", "99999999999"] {
            let mut form = booking_form();
            form.number_of_people = raw.to_string();
            let errors = validate_booking(TourId(1), &form).expect_err(raw);
            assert_eq!(
                errors.kind("number_of_people"),
                Some(FieldErrorKind::OutOfRange),
                "{raw}"
            );
        }
    }

    #[test]
    fn email_domain_needs_a_dot() {
        for raw in ["guide@localhost", "@example.com", "guide@.com", "guide@example."] {
            let mut form = booking_form();
            form.email = raw.to_string();
            let errors = validate_booking(TourId(1), &form).expect_err(raw);
            assert_eq!(errors.kind("email"), Some(FieldErrorKind::InvalidFormat), "{raw}");
        }
    }

    #[test]
    fn enforces_maximum_lengths() {
        let mut form = booking_form();
        form.phone = "0".repeat(PHONE_MAX_LEN + 1);
        form.full_name = "N".repeat(SHORT_TEXT_MAX_LEN + 1);
        let errors = validate_booking(TourId(1), &form).expect_err("too long");
        assert_eq!(
            errors.kind("phone"),
            Some(FieldErrorKind::TooLong { max: PHONE_MAX_LEN })
        );
        assert_eq!(
            errors.kind("full_name"),
            Some(FieldErrorKind::TooLong { max: SHORT_TEXT_MAX_LEN })
        );
    }

    #[test]
    fn past_dates_are_accepted() {
        let mut form = booking_form();
        form.preferred_date = "1999-01-01".to_string();
        assert!(validate_booking(TourId(1), &form).is_ok());
    }

    #[test]
    fn contact_requires_all_fields_and_allows_long_messages() {
        let errors = validate_contact(&ContactForm::default()).expect_err("empty contact");
        let fields: Vec<_> = errors.fields().collect();
        assert_eq!(fields, ["email", "message", "name", "subject"]);

        let message = validate_contact(&ContactForm {
            name: "Tom".to_string(),
            email: "tom@example.com".to_string(),
            subject: "Honeymoon".to_string(),
            message: "x".repeat(10_000),
        })
        .expect("valid contact");
        assert_eq!(message.message.len(), 10_000);
    }

    #[test]
    fn field_errors_serialize_with_kind_and_message() {
        let errors = validate_contact(&ContactForm {
            name: "Tom".to_string(),
            email: "tom".to_string(),
            subject: "Hi".to_string(),
            message: "Hello".to_string(),
        })
        .expect_err("bad email");
        let json = serde_json::to_value(&errors).expect("serializes");
        assert_eq!(json["email"]["kind"], "invalid_format");
        assert_eq!(json["email"]["message"], "Enter a valid value.");
    }
}
