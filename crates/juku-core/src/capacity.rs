//! Capacity allocator: keeps classrooms and teachers in step with enrollment.
//!
//! Every teacher comes with exactly one classroom of [`CLASS_CAPACITY`]
//! seats. Students are seated by filling classrooms in creation order;
//! students beyond total capacity stay enrolled but unseated, and count
//! toward the crowding penalty of the satisfaction model.

use juku_types::{CLASS_CAPACITY, Classroom, ClassroomId, Teacher, TeacherShortage};
use tracing::{debug, warn};

use crate::error::SimError;
use crate::model::Campus;
use crate::staffing::StaffingPool;

/// Make sure `campus` has enough classrooms, then reseat its students.
///
/// With `allow_hire`, teachers are issued from `pool` until the classroom
/// count meets [`Campus::required_classroom_count`]. Without it, a single
/// teacher is issued only when the campus has neither teachers nor
/// classrooms. Returns the number of teachers hired.
///
/// # Errors
///
/// Returns [`SimError::Configuration`] if a hire is needed and the pool has
/// no templates.
pub fn ensure_capacity(
    campus: &mut Campus,
    pool: &mut StaffingPool,
    allow_hire: bool,
) -> Result<u32, SimError> {
    let required = usize::try_from(campus.required_classroom_count()).unwrap_or(usize::MAX);
    let mut hired = 0_u32;

    if allow_hire {
        while campus.classrooms.len() < required {
            add_teacher(campus, pool.issue_next()?);
            hired = hired.saturating_add(1);
        }
    } else if campus.classrooms.is_empty() && campus.teachers.is_empty() {
        add_teacher(campus, pool.issue_next()?);
        hired = 1;
    }

    reassign_students(campus);

    if hired > 0 {
        debug!(
            campus = %campus.id(),
            hired,
            classrooms = campus.classrooms.len(),
            "Capacity expanded"
        );
    }
    let unseated = campus.unseated_students();
    if unseated > 0 {
        warn!(
            campus = %campus.id(),
            unseated,
            deficit = teacher_deficit(campus),
            "Students without a classroom"
        );
    }
    Ok(hired)
}

/// Seat students into classrooms in list order, up to each room's capacity.
///
/// Students beyond total capacity are left unassigned. Idempotent.
pub fn reassign_students(campus: &mut Campus) {
    let mut remaining = campus.student_count;
    for room in &mut campus.classrooms {
        let seated = remaining.min(room.capacity);
        room.student_count = seated;
        remaining = remaining.saturating_sub(seated);
    }
}

/// Whether any classroom holds more students than its capacity.
pub fn has_overfilled_classroom(campus: &Campus) -> bool {
    campus.classrooms.iter().any(Classroom::is_over_capacity)
}

/// Append `teacher` and a new classroom bound to them.
///
/// Students are not reseated; call [`reassign_students`] afterwards.
pub fn add_teacher(campus: &mut Campus, teacher: Teacher) {
    let position = campus.classrooms.len().saturating_add(1);
    let classroom = Classroom {
        id: ClassroomId::for_position(campus.id(), position),
        campus_id: campus.id().clone(),
        teacher_id: teacher.id.clone(),
        capacity: CLASS_CAPACITY,
        student_count: 0,
    };
    campus.teachers.push(teacher);
    campus.classrooms.push(classroom);
}

/// Teachers missing to seat every student: `max(0, required - teachers)`.
pub fn teacher_deficit(campus: &Campus) -> u32 {
    let teachers = u32::try_from(campus.teachers.len()).unwrap_or(u32::MAX);
    campus.required_classroom_count().saturating_sub(teachers)
}

/// Every campus with a positive teacher deficit, in ownership order.
pub fn shortages(campuses: &[Campus]) -> Vec<TeacherShortage> {
    campuses
        .iter()
        .filter_map(|campus| {
            let deficit = teacher_deficit(campus);
            (deficit > 0).then(|| TeacherShortage {
                campus_id: campus.id().clone(),
                campus_name: campus.name().to_owned(),
                deficit,
            })
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::tests::{profile, teacher};
    use crate::staffing::tests::pool;

    fn campus(students: u32) -> Campus {
        let mut campus = Campus::new(profile(20_000, None));
        campus.student_count = students;
        campus
    }

    #[test]
    fn ensure_capacity_hires_until_seated() {
        let mut campus = campus(200);
        let mut pool = pool();
        let hired = ensure_capacity(&mut campus, &mut pool, true).unwrap();

        assert_eq!(hired, 3);
        assert_eq!(campus.teachers.len(), 3);
        assert_eq!(campus.classrooms.len(), 3);
        let seats: Vec<u32> = campus.classrooms.iter().map(|c| c.student_count).collect();
        assert_eq!(seats, vec![80, 80, 40]);
        assert_eq!(teacher_deficit(&campus), 0);
    }

    #[test]
    fn classroom_ids_follow_position() {
        let mut campus = campus(170);
        ensure_capacity(&mut campus, &mut pool(), true).unwrap();
        let ids: Vec<&str> = campus.classrooms.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["shibuya-cls-1", "shibuya-cls-2", "shibuya-cls-3"]);
        for (room, teacher) in campus.classrooms.iter().zip(&campus.teachers) {
            assert_eq!(room.teacher_id, teacher.id);
        }
    }

    #[test]
    fn empty_campus_gets_one_teacher_even_without_hiring() {
        let mut campus = campus(0);
        let hired = ensure_capacity(&mut campus, &mut pool(), false).unwrap();
        assert_eq!(hired, 1);
        assert_eq!(campus.teachers.len(), 1);
        assert_eq!(campus.classrooms.len(), 1);
    }

    #[test]
    fn growth_without_hiring_leaves_students_unseated() {
        let mut campus = campus(100);
        let mut pool = pool();
        ensure_capacity(&mut campus, &mut pool, true).unwrap();
        assert_eq!(campus.teachers.len(), 2);

        campus.student_count = 250;
        let hired = ensure_capacity(&mut campus, &mut pool, false).unwrap();
        assert_eq!(hired, 0);
        assert_eq!(campus.seated_students(), 160);
        assert_eq!(campus.unseated_students(), 90);
        assert_eq!(teacher_deficit(&campus), 2);
    }

    #[test]
    fn zero_teacher_campus_has_deficit() {
        let crowded = campus(100);
        assert_eq!(teacher_deficit(&crowded), 2);
        assert_eq!(crowded.unseated_students(), 100);

        let empty = campus(0);
        assert_eq!(teacher_deficit(&empty), 1);
    }

    #[test]
    fn staffless_tick_seeds_one_pair_and_keeps_deficit() {
        let mut campus = campus(200);
        let hired = ensure_capacity(&mut campus, &mut pool(), false).unwrap();
        assert_eq!(hired, 1);
        assert_eq!(campus.seated_students(), 80);
        assert_eq!(campus.unseated_students(), 120);
        assert_eq!(teacher_deficit(&campus), 2);
    }

    #[test]
    fn reassign_clears_overfilled_rooms() {
        let mut campus = campus(120);
        add_teacher(&mut campus, teacher("t1", 0.0));
        add_teacher(&mut campus, teacher("t2", 0.0));
        if let Some(room) = campus.classrooms.first_mut() {
            room.student_count = 120;
        }
        assert!(has_overfilled_classroom(&campus));
        reassign_students(&mut campus);
        assert!(!has_overfilled_classroom(&campus));
    }

    #[test]
    fn reassign_is_idempotent() {
        let mut campus = campus(130);
        add_teacher(&mut campus, teacher("t1", 0.0));
        add_teacher(&mut campus, teacher("t2", 0.0));
        reassign_students(&mut campus);
        let first = campus.classrooms.clone();
        reassign_students(&mut campus);
        assert_eq!(campus.classrooms, first);
        assert_eq!(first.iter().map(|c| c.student_count).sum::<u32>(), 130);
    }

    #[test]
    fn shrinking_enrollment_empties_trailing_rooms() {
        let mut campus = campus(160);
        ensure_capacity(&mut campus, &mut pool(), true).unwrap();
        campus.student_count = 50;
        reassign_students(&mut campus);
        let seats: Vec<u32> = campus.classrooms.iter().map(|c| c.student_count).collect();
        assert_eq!(seats, vec![50, 0]);
    }

    #[test]
    fn shortages_list_only_understaffed_campuses() {
        let mut staffed = campus(50);
        ensure_capacity(&mut staffed, &mut pool(), true).unwrap();
        let understaffed = campus(300);

        let list = shortages(&[staffed, understaffed]);
        assert_eq!(list.len(), 1);
        assert_eq!(list.first().unwrap().deficit, 4);
        assert_eq!(list.first().unwrap().campus_name, "渋谷校");
    }
}
