//! Plain-text bodies for the three notification kinds.

use std::fmt::Write as _;

use super::{Notification, NotificationKind};
use crate::catalog::Tour;
use crate::inquiries::domain::{Booking, ContactMessage};

const SIGNATURE: &str = "MM Africa Safaris";

/// Receipt for the visitor, restating the tour and the requested date.
pub fn booking_receipt(tour: &Tour, booking: &Booking) -> Notification {
    let date = booking.preferred_date.format("%B %-d, %Y");
    let mut body = String::new();
    let _ = writeln!(body, "Dear {},", booking.full_name);
    let _ = writeln!(body);
    let _ = writeln!(
        body,
        "Thank you for your booking request for {} ({} {}) starting {}.",
        tour.name,
        booking.number_of_people,
        if booking.number_of_people == 1 { "traveller" } else { "travellers" },
        date,
    );
    let _ = writeln!(
        body,
        "Our team will review availability and contact you soon to confirm the details."
    );
    let _ = writeln!(body);
    let _ = writeln!(body, "Reference: booking #{}", booking.id);
    let _ = writeln!(body);
    let _ = write!(body, "{SIGNATURE}");

    Notification {
        kind: NotificationKind::BookingReceipt,
        to: booking.email.clone(),
        subject: format!("We received your booking request: {}", tour.name),
        body,
    }
}

/// Operator alert with every submitted booking field.
pub fn booking_alert(tour: &Tour, booking: &Booking, operator_email: &str) -> Notification {
    let mut body = String::new();
    let _ = writeln!(body, "A new booking inquiry was submitted.");
    let _ = writeln!(body);
    let _ = writeln!(body, "Booking:          #{}", booking.id);
    let _ = writeln!(body, "Tour:             {} ({})", tour.name, tour.slug);
    let _ = writeln!(body, "Name:             {}", booking.full_name);
    let _ = writeln!(body, "Email:            {}", booking.email);
    let _ = writeln!(body, "Phone:            {}", booking.phone);
    let _ = writeln!(body, "Travellers:       {}", booking.number_of_people);
    let _ = writeln!(body, "Preferred date:   {}", booking.preferred_date);
    let _ = writeln!(body, "Status:           {}", booking.status.label());
    let _ = write!(
        body,
        "Special requests: {}",
        booking.special_requests.as_deref().unwrap_or("none")
    );

    Notification {
        kind: NotificationKind::BookingAlert,
        to: operator_email.to_string(),
        subject: format!("New booking inquiry: {} - {}", tour.name, booking.full_name),
        body,
    }
}

pub fn contact_alert(message: &ContactMessage, operator_email: &str) -> Notification {
    let mut body = String::new();
    let _ = writeln!(body, "From:    {} <{}>", message.name, message.email);
    let _ = writeln!(body, "Subject: {}", message.subject);
    let _ = writeln!(body);
    let _ = write!(body, "{}", message.message);

    Notification {
        kind: NotificationKind::ContactAlert,
        to: operator_email.to_string(),
        subject: format!("New contact message: {}", message.subject),
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Difficulty, TourId};
    use crate::inquiries::domain::{BookingId, BookingStatus, ContactMessageId};
    use chrono::{NaiveDate, Utc};
    use rust_decimal::Decimal;

    fn tour() -> Tour {
        Tour {
            id: TourId(3),
            name: "Amboseli Elephant Paradise".to_string(),
            slug: "amboseli-elephant-paradise".to_string(),
            description: "Elephants below Kilimanjaro.".to_string(),
            duration_days: 3,
            price: Decimal::new(145000, 2),
            difficulty: Difficulty::Easy,
            max_group_size: 12,
            image: None,
            featured: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn booking() -> Booking {
        Booking {
            id: BookingId(41),
            tour_id: TourId(3),
            full_name: "Amina Otieno".to_string(),
            email: "amina@example.com".to_string(),
            phone: "+254711000111".to_string(),
            number_of_people: 1,
            preferred_date: NaiveDate::from_ymd_opt(2025, 9, 6).expect("valid date"),
            special_requests: Some("Vegetarian meals".to_string()),
            status: BookingStatus::Pending,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn receipt_goes_to_the_submitter_with_tour_and_date() {
        let receipt = booking_receipt(&tour(), &booking());
        assert_eq!(receipt.kind, NotificationKind::BookingReceipt);
        assert_eq!(receipt.to, "amina@example.com");
        assert!(receipt.subject.contains("Amboseli Elephant Paradise"));
        assert!(receipt.body.contains("September 6, 2025"));
        assert!(receipt.body.contains("1 traveller)"));
    }

    #[test]
    fn booking_alert_lists_every_field() {
        let alert = booking_alert(&tour(), &booking(), "ops@example.com");
        assert_eq!(alert.to, "ops@example.com");
        for expected in [
            "Amina Otieno",
            "amina@example.com",
            "+254711000111",
            "2025-09-06",
            "Vegetarian meals",
            "Pending Inquiry",
        ] {
            assert!(alert.body.contains(expected), "missing {expected}");
        }
    }

    #[test]
    fn contact_alert_carries_sender_subject_and_message() {
        let message = ContactMessage {
            id: ContactMessageId(1),
            name: "Lars".to_string(),
            email: "lars@example.se".to_string(),
            subject: "Honeymoon ideas".to_string(),
            message: "Mara and Zanzibar?".to_string(),
            created_at: Utc::now(),
        };
        let alert = contact_alert(&message, "ops@example.com");
        assert_eq!(alert.kind, NotificationKind::ContactAlert);
        assert_eq!(alert.subject, "New contact message: Honeymoon ideas");
        assert!(alert.body.starts_with("From:    Lars <lars@example.se>"));
        assert!(alert.body.ends_with("Mara and Zanzibar?"));
    }
}
