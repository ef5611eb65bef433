//! Move planning
//!
//! Turns a target record, its requested destination, and snapshots of the
//! affected lanes into the unit of work that restores contiguous
//! priorities. Planning is pure; nothing here reads or writes the store.

use crate::board::{ClientRecord, Lane, Position, Priority};
use crate::storage::UnitOfWork;

/// The writes a move needs, plus where the target ends up
#[derive(Debug, Clone, PartialEq)]
pub struct MovePlan {
    pub from: Position,
    pub to: Position,
    /// Neighbours whose priority changes; the target is not counted
    pub shifted: usize,
    pub unit: UnitOfWork,
}

impl MovePlan {
    /// True when the move resolves to the target's current position
    pub fn is_unchanged(&self) -> bool {
        self.unit.is_empty()
    }
}

/// Plans moving `target` to (`to_lane`, `to_priority`).
///
/// `source` must be the full contents of the target's current lane and
/// `destination` the full contents of `to_lane`. For a same-lane move both
/// are the same lane and `destination` is ignored.
///
/// The requested priority is clamped: within a lane to the lane's size,
/// across lanes to the destination size plus one. Priorities past the end
/// of a lane therefore mean "last", never a gap.
pub fn plan_move(
    target: &ClientRecord,
    to_lane: Lane,
    to_priority: Priority,
    source: &[ClientRecord],
    destination: &[ClientRecord],
) -> MovePlan {
    let from = target.position();
    let mut unit = UnitOfWork::new();

    let to = if to_lane == from.lane {
        let to = Position::new(to_lane, to_priority.clamped_to(source.len()));
        plan_within_lane(target, from.priority, to.priority, source, &mut unit);
        to
    } else {
        let to = Position::new(to_lane, to_priority.clamped_to(destination.len() + 1));
        plan_across_lanes(target, from.priority, to, source, destination, &mut unit);
        to
    };

    if to == from {
        return MovePlan {
            from,
            to,
            shifted: 0,
            unit: UnitOfWork::new(),
        };
    }

    let shifted = unit.len();
    unit.reposition(target.id, to);

    MovePlan {
        from,
        to,
        shifted,
        unit,
    }
}

fn plan_within_lane(
    target: &ClientRecord,
    from: Priority,
    to: Priority,
    lane: &[ClientRecord],
    unit: &mut UnitOfWork,
) {
    let neighbours = lane.iter().filter(|record| record.id != target.id);

    if to > from {
        // Moving back: (from, to] closes up
        for record in neighbours.filter(|r| r.priority > from && r.priority <= to) {
            unit.reposition(
                record.id,
                Position::new(record.lane, record.priority.decremented()),
            );
        }
    } else if to < from {
        // Moving forward: [to, from) makes room
        for record in neighbours.filter(|r| r.priority >= to && r.priority < from) {
            unit.reposition(
                record.id,
                Position::new(record.lane, record.priority.incremented()),
            );
        }
    }
}

fn plan_across_lanes(
    target: &ClientRecord,
    from: Priority,
    to: Position,
    source: &[ClientRecord],
    destination: &[ClientRecord],
    unit: &mut UnitOfWork,
) {
    for record in source
        .iter()
        .filter(|r| r.id != target.id && r.priority > from)
    {
        unit.reposition(
            record.id,
            Position::new(record.lane, record.priority.decremented()),
        );
    }

    for record in destination.iter().filter(|r| r.priority >= to.priority) {
        unit.reposition(
            record.id,
            Position::new(record.lane, record.priority.incremented()),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{NewClient, RecordId};
    use crate::storage::Mutation;
    use chrono::Utc;

    fn lane_of(lane: Lane, first_id: u64, count: u32) -> Vec<ClientRecord> {
        (0..count)
            .map(|offset| {
                ClientRecord::from_new(
                    RecordId::new(first_id + u64::from(offset)),
                    Priority::new(offset + 1).unwrap(),
                    Utc::now(),
                    NewClient::new(format!("client-{}", first_id + u64::from(offset)), lane),
                )
            })
            .collect()
    }

    fn p(value: u32) -> Priority {
        Priority::new(value).unwrap()
    }

    fn writes(plan: &MovePlan) -> Vec<(u64, Lane, u32)> {
        plan.unit
            .mutations()
            .iter()
            .map(|Mutation::Reposition { id, to }| (id.get(), to.lane, to.priority.get()))
            .collect()
    }

    #[test]
    fn test_same_position_plans_nothing() {
        let backlog = lane_of(Lane::Backlog, 1, 3);
        let plan = plan_move(&backlog[1], Lane::Backlog, p(2), &backlog, &backlog);
        assert!(plan.is_unchanged());
        assert_eq!(plan.shifted, 0);
    }

    #[test]
    fn test_same_lane_towards_back() {
        let backlog = lane_of(Lane::Backlog, 1, 4);
        let plan = plan_move(&backlog[0], Lane::Backlog, p(3), &backlog, &backlog);

        assert_eq!(
            writes(&plan),
            vec![
                (2, Lane::Backlog, 1),
                (3, Lane::Backlog, 2),
                (1, Lane::Backlog, 3),
            ]
        );
        assert_eq!(plan.shifted, 2);
    }

    #[test]
    fn test_same_lane_towards_front() {
        let backlog = lane_of(Lane::Backlog, 1, 4);
        let plan = plan_move(&backlog[3], Lane::Backlog, p(2), &backlog, &backlog);

        assert_eq!(
            writes(&plan),
            vec![
                (2, Lane::Backlog, 3),
                (3, Lane::Backlog, 4),
                (4, Lane::Backlog, 2),
            ]
        );
    }

    #[test]
    fn test_same_lane_clamps_to_lane_size() {
        let backlog = lane_of(Lane::Backlog, 1, 3);
        let plan = plan_move(&backlog[0], Lane::Backlog, p(40), &backlog, &backlog);
        assert_eq!(plan.to, Position::new(Lane::Backlog, p(3)));

        let plan = plan_move(&backlog[2], Lane::Backlog, p(40), &backlog, &backlog);
        assert!(plan.is_unchanged());
    }

    #[test]
    fn test_cross_lane() {
        let backlog = lane_of(Lane::Backlog, 1, 3);
        let in_progress = lane_of(Lane::InProgress, 10, 2);
        let plan = plan_move(&backlog[1], Lane::InProgress, p(1), &backlog, &in_progress);

        assert_eq!(
            writes(&plan),
            vec![
                (3, Lane::Backlog, 2),
                (10, Lane::InProgress, 2),
                (11, Lane::InProgress, 3),
                (2, Lane::InProgress, 1),
            ]
        );
        assert_eq!(plan.shifted, 3);
        assert_eq!(plan.from, Position::new(Lane::Backlog, p(2)));
    }

    #[test]
    fn test_cross_lane_past_end_appends() {
        let backlog = lane_of(Lane::Backlog, 1, 2);
        let complete = lane_of(Lane::Complete, 10, 2);
        let plan = plan_move(&backlog[0], Lane::Complete, p(9), &backlog, &complete);

        assert_eq!(plan.to, Position::new(Lane::Complete, p(3)));
        assert_eq!(
            writes(&plan),
            vec![(2, Lane::Backlog, 1), (1, Lane::Complete, 3)]
        );
    }

    #[test]
    fn test_cross_lane_into_empty_lane() {
        let backlog = lane_of(Lane::Backlog, 1, 1);
        let plan = plan_move(&backlog[0], Lane::Complete, p(5), &backlog, &[]);
        assert_eq!(writes(&plan), vec![(1, Lane::Complete, 1)]);
        assert_eq!(plan.shifted, 0);
    }
}
