use serde::{Deserialize, Serialize};

use roost_core::rooms::RoomRequest;
use roost_core::CoreError;

use crate::listing::Listing;

/// Priced summary of a multi-room stay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// Nights per room, in plan order.
    pub room_nights: Vec<i64>,
    pub total_nights: i64,
    pub total_guests: u32,
    /// Σ nights × nightly rate, minor units. No fees are folded in.
    pub total_amount: i64,
    pub currency: String,
}

#[derive(Debug, thiserror::Error)]
pub enum QuoteError {
    #[error("No rooms in the plan")]
    EmptyPlan,

    #[error("Room {room}: check-out must fall after check-in")]
    InvalidDates { room: usize },

    #[error("Room {room}: at least one adult required")]
    NoAdults { room: usize },

    #[error("Room {room}: {guests} guests exceed the room capacity of {max}")]
    OverCapacity { room: usize, guests: u32, max: u32 },

    #[error("Listing is not open for booking")]
    ListingInactive,
}

impl From<QuoteError> for CoreError {
    fn from(err: QuoteError) -> Self {
        CoreError::ValidationError(err.to_string())
    }
}

impl Quote {
    /// Price a stay. Pure function of its inputs: no clock, no I/O, same
    /// answer for the same rooms and listing every time.
    pub fn for_stay(rooms: &[RoomRequest], listing: &Listing) -> Result<Quote, QuoteError> {
        if rooms.is_empty() {
            return Err(QuoteError::EmptyPlan);
        }
        if !listing.is_active {
            return Err(QuoteError::ListingInactive);
        }

        let mut room_nights = Vec::with_capacity(rooms.len());
        let mut total_guests = 0u32;
        let mut total_amount = 0i64;

        for (idx, room) in rooms.iter().enumerate() {
            if room.adults == 0 {
                return Err(QuoteError::NoAdults { room: idx });
            }
            let nights = room.nights();
            if nights <= 0 {
                return Err(QuoteError::InvalidDates { room: idx });
            }
            if !listing.accommodates(room.guests()) {
                return Err(QuoteError::OverCapacity {
                    room: idx,
                    guests: room.guests(),
                    max: listing.max_guests,
                });
            }

            room_nights.push(nights);
            total_guests += room.guests();
            total_amount += nights * listing.nightly_rate;
        }

        Ok(Quote {
            total_nights: room_nights.iter().sum(),
            room_nights,
            total_guests,
            total_amount,
            currency: listing.currency.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn listing(nightly_rate: i64) -> Listing {
        Listing {
            id: Uuid::new_v4(),
            title: "Cedar Loft".to_string(),
            location: "Goa".to_string(),
            nightly_rate,
            currency: "INR".to_string(),
            max_guests: 4,
            tags: vec!["beach".to_string()],
            images: vec![],
            is_active: true,
        }
    }

    #[test]
    fn single_room_two_nights() {
        let rooms = [RoomRequest::new(2, 0, date(2024, 6, 1), date(2024, 6, 3))];
        let quote = Quote::for_stay(&rooms, &listing(1000)).unwrap();

        assert_eq!(quote.room_nights, vec![2]);
        assert_eq!(quote.total_nights, 2);
        assert_eq!(quote.total_guests, 2);
        assert_eq!(quote.total_amount, 2000);
        assert_eq!(quote.currency, "INR");
    }

    #[test]
    fn two_rooms_sum_independently() {
        let rooms = [
            RoomRequest::new(2, 0, date(2024, 6, 1), date(2024, 6, 3)),
            RoomRequest::new(1, 1, date(2024, 6, 1), date(2024, 6, 4)),
        ];
        let quote = Quote::for_stay(&rooms, &listing(1500)).unwrap();

        assert_eq!(quote.total_nights, 5);
        assert_eq!(quote.total_amount, 7500);
        assert_eq!(quote.total_guests, 4);
    }

    #[test]
    fn reversed_dates_are_rejected() {
        let rooms = [RoomRequest::new(2, 0, date(2024, 6, 3), date(2024, 6, 1))];
        let err = Quote::for_stay(&rooms, &listing(1000)).unwrap_err();
        assert!(matches!(err, QuoteError::InvalidDates { room: 0 }));

        // And the conversion lands in the validation bucket
        let core: CoreError = err.into();
        assert!(matches!(core, CoreError::ValidationError(_)));
    }

    #[test]
    fn empty_plan_is_rejected() {
        let err = Quote::for_stay(&[], &listing(1000)).unwrap_err();
        assert!(matches!(err, QuoteError::EmptyPlan));
    }

    #[test]
    fn over_capacity_room_is_rejected() {
        let rooms = [RoomRequest::new(4, 2, date(2024, 6, 1), date(2024, 6, 3))];
        let err = Quote::for_stay(&rooms, &listing(1000)).unwrap_err();
        assert!(matches!(err, QuoteError::OverCapacity { guests: 6, max: 4, .. }));
    }

    #[test]
    fn inactive_listing_is_rejected() {
        let rooms = [RoomRequest::new(2, 0, date(2024, 6, 1), date(2024, 6, 3))];
        let mut unlisted = listing(1000);
        unlisted.is_active = false;
        let err = Quote::for_stay(&rooms, &unlisted).unwrap_err();
        assert!(matches!(err, QuoteError::ListingInactive));
    }

    #[test]
    fn quoting_is_idempotent() {
        let rooms = [
            RoomRequest::new(2, 1, date(2024, 6, 1), date(2024, 6, 5)),
            RoomRequest::new(1, 0, date(2024, 6, 2), date(2024, 6, 4)),
        ];
        let subject = listing(1250);
        let first = Quote::for_stay(&rooms, &subject).unwrap();
        let second = Quote::for_stay(&rooms, &subject).unwrap();
        assert_eq!(first, second);
    }
}
