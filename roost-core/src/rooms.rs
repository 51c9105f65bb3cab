use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult};

/// One room within a checkout session: guest counts plus a date range.
/// Maps 1:1 to a booking once the plan is submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomRequest {
    pub adults: u32,
    pub children: u32,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

impl RoomRequest {
    pub fn new(adults: u32, children: u32, check_in: NaiveDate, check_out: NaiveDate) -> Self {
        Self {
            adults,
            children,
            check_in,
            check_out,
        }
    }

    /// Whole nights between check-in and check-out. Negative or zero means
    /// the range is not bookable.
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }

    pub fn guests(&self) -> u32 {
        self.adults + self.children
    }

    pub fn validate(&self) -> CoreResult<()> {
        if self.adults == 0 {
            return Err(CoreError::ValidationError(
                "at least one adult per room".to_string(),
            ));
        }
        if self.nights() <= 0 {
            return Err(CoreError::ValidationError(format!(
                "check-out {} must fall after check-in {}",
                self.check_out, self.check_in
            )));
        }
        Ok(())
    }
}

/// The rooms a guest is assembling for one checkout.
///
/// Plain serializable value with no UI attachments. Every transition consumes
/// the plan and returns the updated one, so stale copies can never alias the
/// state the page is rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomPlan {
    rooms: Vec<RoomRequest>,
}

impl RoomPlan {
    pub fn new() -> Self {
        Self { rooms: Vec::new() }
    }

    pub fn rooms(&self) -> &[RoomRequest] {
        &self.rooms
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn add_room(mut self, room: RoomRequest) -> Self {
        self.rooms.push(room);
        self
    }

    pub fn remove_room(mut self, index: usize) -> CoreResult<Self> {
        if index >= self.rooms.len() {
            return Err(CoreError::ValidationError(format!(
                "no room at index {index}"
            )));
        }
        self.rooms.remove(index);
        Ok(self)
    }

    pub fn set_dates(
        mut self,
        index: usize,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> CoreResult<Self> {
        let room = self.room_mut(index)?;
        room.check_in = check_in;
        room.check_out = check_out;
        Ok(self)
    }

    pub fn set_guests(mut self, index: usize, adults: u32, children: u32) -> CoreResult<Self> {
        let room = self.room_mut(index)?;
        room.adults = adults;
        room.children = children;
        Ok(self)
    }

    /// Check the whole plan is submittable: non-empty, every room valid.
    pub fn validate(&self) -> CoreResult<()> {
        if self.rooms.is_empty() {
            return Err(CoreError::ValidationError(
                "add at least one room before checkout".to_string(),
            ));
        }
        for room in &self.rooms {
            room.validate()?;
        }
        Ok(())
    }

    fn room_mut(&mut self, index: usize) -> CoreResult<&mut RoomRequest> {
        let len = self.rooms.len();
        self.rooms
            .get_mut(index)
            .ok_or_else(|| CoreError::ValidationError(format!("no room at index {index} ({len} rooms in plan)")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn nights_are_whole_days() {
        let room = RoomRequest::new(2, 0, date(2024, 6, 1), date(2024, 6, 3));
        assert_eq!(room.nights(), 2);
        assert_eq!(room.guests(), 2);
    }

    #[test]
    fn reversed_dates_fail_validation() {
        let room = RoomRequest::new(2, 0, date(2024, 6, 3), date(2024, 6, 1));
        assert!(room.validate().is_err());

        // Same-day check-in/check-out is zero nights and also invalid
        let room = RoomRequest::new(2, 0, date(2024, 6, 1), date(2024, 6, 1));
        assert!(room.validate().is_err());
    }

    #[test]
    fn room_needs_an_adult() {
        let room = RoomRequest::new(0, 2, date(2024, 6, 1), date(2024, 6, 3));
        assert!(room.validate().is_err());
    }

    #[test]
    fn plan_transitions_are_pure() {
        let original = RoomPlan::new().add_room(RoomRequest::new(2, 0, date(2024, 6, 1), date(2024, 6, 3)));
        let snapshot = original.clone();

        let updated = original.clone().set_guests(0, 2, 1).unwrap();
        assert_eq!(original, snapshot);
        assert_eq!(updated.rooms()[0].children, 1);

        let two_rooms = updated.add_room(RoomRequest::new(1, 0, date(2024, 6, 1), date(2024, 6, 4)));
        assert_eq!(two_rooms.len(), 2);

        let back_to_one = two_rooms.remove_room(1).unwrap();
        assert_eq!(back_to_one.len(), 1);
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let plan = RoomPlan::new().add_room(RoomRequest::new(2, 0, date(2024, 6, 1), date(2024, 6, 3)));
        assert!(plan.clone().remove_room(3).is_err());
        assert!(plan.set_guests(1, 2, 0).is_err());
    }

    #[test]
    fn empty_plan_is_not_submittable() {
        assert!(RoomPlan::new().validate().is_err());
    }
}
