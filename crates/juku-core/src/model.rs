//! In-memory campaign entities: the player and the campuses they own.
//!
//! A [`Campus`] pairs the immutable catalog profile it was opened from with
//! the mutable state the monthly tick evolves. The player owns campuses in
//! opening order; each campus owns its teachers and classrooms.

use juku_types::{
    AdPlan, CLASS_CAPACITY, CampusFinancials, CampusId, CampusTemplate, Classroom,
    ROYALTY_PER_CAMPUS, RevenueRecord, Teacher,
};

use crate::calendar::CampaignCalendar;

/// An owned campus.
#[derive(Debug, Clone, PartialEq)]
pub struct Campus {
    /// Catalog profile this campus was opened from.
    pub profile: CampusTemplate,
    /// Enrolled students.
    pub student_count: u32,
    /// Satisfaction in `-100..=100`.
    pub satisfaction: f64,
    /// Teachers in hiring order.
    pub teachers: Vec<Teacher>,
    /// Classrooms in creation order.
    pub classrooms: Vec<Classroom>,
    /// Ad plan running this month.
    pub ad_plan: AdPlan,
    /// Ad plan taking effect at the start of next month.
    pub next_ad_plan: Option<AdPlan>,
    /// Statement of the most recent tick. Not persisted in snapshots; a
    /// restored campus starts with `None` until its next tick.
    pub last_financials: Option<CampusFinancials>,
}

impl Campus {
    /// A freshly opened campus: no students, no staff, no advertising.
    pub const fn new(profile: CampusTemplate) -> Self {
        Self {
            profile,
            student_count: 0,
            satisfaction: 0.0,
            teachers: Vec::new(),
            classrooms: Vec::new(),
            ad_plan: AdPlan::NoAdvertising,
            next_ad_plan: None,
            last_financials: None,
        }
    }

    /// Catalog id.
    pub const fn id(&self) -> &CampusId {
        &self.profile.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.profile.name
    }

    /// Sum of classroom capacities.
    pub fn total_capacity(&self) -> u32 {
        self.classrooms
            .iter()
            .fold(0_u32, |sum, room| sum.saturating_add(room.capacity))
    }

    /// Students currently seated in a classroom.
    pub fn seated_students(&self) -> u32 {
        self.classrooms
            .iter()
            .fold(0_u32, |sum, room| sum.saturating_add(room.student_count))
    }

    /// Enrolled students without a seat.
    pub fn unseated_students(&self) -> u32 {
        self.student_count.saturating_sub(self.seated_students())
    }

    /// Classrooms needed to seat every student, never less than one.
    pub const fn required_classroom_count(&self) -> u32 {
        let needed = self.student_count.div_ceil(CLASS_CAPACITY);
        if needed == 0 { 1 } else { needed }
    }

    /// Monthly rent in yen.
    pub fn rent_cost(&self) -> i64 {
        juku_ledger::rent_cost(self.profile.rent)
    }

    /// Monthly cost of the active ad plan.
    pub const fn ad_cost(&self) -> i64 {
        self.ad_plan.monthly_cost()
    }

    /// Monthly franchise royalty.
    pub const fn royalty_cost(&self) -> i64 {
        ROYALTY_PER_CAMPUS
    }

    /// Clamp an enrollment figure to the intake ceiling, if any.
    pub fn clamp_to_intake(&self, students: u32) -> u32 {
        self.profile
            .intake_capacity
            .map_or(students, |ceiling| students.min(ceiling))
    }
}

/// The franchise owner and their campaign progress.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Player name.
    pub name: String,
    /// School brand name.
    pub school_name: String,
    /// Cash in yen. May go negative.
    pub funds: i64,
    /// Campaign calendar.
    pub calendar: CampaignCalendar,
    /// Aggregate monthly results, oldest first.
    pub revenue_history: Vec<RevenueRecord>,
    /// Owned campuses in opening order.
    pub campuses: Vec<Campus>,
    /// Set once the campaign end date has been processed.
    pub is_campaign_complete: bool,
}

impl Player {
    /// A new player with no campuses.
    pub fn new(
        name: impl Into<String>,
        school_name: impl Into<String>,
        funds: i64,
        calendar: CampaignCalendar,
    ) -> Self {
        Self {
            name: name.into(),
            school_name: school_name.into(),
            funds,
            calendar,
            revenue_history: Vec::new(),
            campuses: Vec::new(),
            is_campaign_complete: false,
        }
    }

    /// Whether the player owns campus `id`.
    pub fn owns(&self, id: &CampusId) -> bool {
        self.campuses.iter().any(|c| c.id() == id)
    }

    /// Owned campus by id.
    pub fn campus(&self, id: &CampusId) -> Option<&Campus> {
        self.campuses.iter().find(|c| c.id() == id)
    }

    /// Owned campus by id, mutably.
    pub fn campus_mut(&mut self, id: &CampusId) -> Option<&mut Campus> {
        self.campuses.iter_mut().find(|c| c.id() == id)
    }

    /// Total enrollment across every campus.
    pub fn total_students(&self) -> u32 {
        self.campuses
            .iter()
            .fold(0_u32, |sum, c| sum.saturating_add(c.student_count))
    }

    /// Mean satisfaction across campuses, 0 with no campuses.
    pub fn average_satisfaction(&self) -> f64 {
        mean(self.campuses.iter().map(|c| c.satisfaction))
    }
}

/// Arithmetic mean, 0 for an empty sequence.
fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0_f64, 0_u32), |(sum, count), v| {
        (sum + v, count.saturating_add(1))
    });
    if count == 0 {
        0.0
    } else {
        sum / f64::from(count)
    }
}
