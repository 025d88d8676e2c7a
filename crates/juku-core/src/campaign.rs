//! Campaign controller: the owned simulation state and every player action.
//!
//! [`Simulation`] owns the catalogs, the staffing pool, the RNG, and the
//! player (once a campaign has started). Actions validate before they
//! mutate, so a rejected action leaves the simulation exactly as it was.
//!
//! # Monthly tick
//!
//! [`Simulation::advance_month`] processes every campus in ownership order:
//!
//! 1. swap in a pending ad plan
//! 2. apply student flow
//! 3. reseat students (hiring only if the campus has no staff at all)
//! 4. bill tuition on the enrollment from *before* the flow and pay costs
//! 5. update satisfaction from the enrollment change
//!
//! The aggregate result is appended to the revenue history, the calendar
//! advances, and the campaign completes once the configured end month has
//! been processed.

use chrono::{DateTime, Utc};
use juku_ledger::{
    BalanceResult, LedgerError, MonthLedger, StatementInput, campus_statement, salary_total,
};
use juku_types::{
    AdPlan, CampaignPhase, CampusFinancials, CampusId, CampusMonthSummary, CampusTemplate,
    MonthSummary, Snapshot, Teacher, TeacherShortage, TeacherTemplateId,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::advertising::{self, PlanSchedule};
use crate::calendar::{CalendarDate, CampaignCalendar};
use crate::capacity;
use crate::catalog::Catalog;
use crate::config::CampaignConfig;
use crate::error::SimError;
use crate::flow;
use crate::model::{Campus, Player};
use crate::satisfaction;
use crate::snapshot;
use crate::staffing::StaffingPool;

/// Students per seeded student when no explicit count is given.
const INITIAL_STUDENT_DIVISOR: u32 = 200;

/// Options for opening a campus.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpenOptions {
    /// Template of the first teacher to hire, ahead of round-robin hires.
    pub initial_teacher_template: Option<TeacherTemplateId>,
    /// Opening enrollment. Defaults to one student per 200 in the market.
    pub student_count: Option<u32>,
}

/// The simulation.
#[derive(Debug, Clone)]
pub struct Simulation {
    catalog: Catalog,
    staffing: StaffingPool,
    starting_funds: i64,
    start_date: CalendarDate,
    end_date: CalendarDate,
    player: Option<Player>,
    rng: StdRng,
}

impl Simulation {
    /// Create a simulation with no active game. The RNG is seeded from
    /// `settings.seed` when set, from the operating system otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Calendar`] if a configured date is invalid.
    pub fn new(catalog: Catalog, settings: &CampaignConfig) -> Result<Self, SimError> {
        let rng = settings
            .seed
            .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
        Self::with_rng(catalog, settings, rng)
    }

    /// Create a simulation driven by an explicit RNG.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Calendar`] if a configured date is invalid.
    pub fn with_rng(
        catalog: Catalog,
        settings: &CampaignConfig,
        rng: StdRng,
    ) -> Result<Self, SimError> {
        let staffing = StaffingPool::new(catalog.teachers().to_vec());
        Ok(Self {
            catalog,
            staffing,
            starting_funds: settings.starting_funds,
            start_date: settings.start_date()?,
            end_date: settings.end_date()?,
            player: None,
            rng,
        })
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// The template catalogs.
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The staffing pool.
    pub const fn staffing(&self) -> &StaffingPool {
        &self.staffing
    }

    /// The player, once a campaign has started.
    pub const fn player(&self) -> Option<&Player> {
        self.player.as_ref()
    }

    /// Whether a campaign has been started or loaded.
    pub const fn has_active_game(&self) -> bool {
        self.player.is_some()
    }

    /// Whether the campaign end has been processed.
    pub fn is_campaign_complete(&self) -> bool {
        self.player.as_ref().is_some_and(|p| p.is_campaign_complete)
    }

    /// Current campaign phase.
    pub fn phase(&self) -> CampaignPhase {
        match &self.player {
            None => CampaignPhase::NotStarted,
            Some(player) if player.is_campaign_complete => CampaignPhase::Complete,
            Some(_) => CampaignPhase::Active,
        }
    }

    /// Last month of the campaign.
    pub const fn end_date(&self) -> CalendarDate {
        self.end_date
    }

    /// An owned campus by id.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::NoActiveGame`] without a player, or
    /// [`SimError::NotFound`] if the campus is not owned.
    pub fn campus(&self, id: &CampusId) -> Result<&Campus, SimError> {
        self.player
            .as_ref()
            .ok_or(SimError::NoActiveGame)?
            .campus(id)
            .ok_or_else(|| SimError::campus_not_found(id))
    }

    /// Catalog campuses the player does not own yet.
    pub fn available_campuses(&self) -> Vec<&CampusTemplate> {
        self.catalog
            .campuses()
            .iter()
            .filter(|t| !self.player.as_ref().is_some_and(|p| p.owns(&t.id)))
            .collect()
    }

    /// Teacher deficit of an owned campus; 0 for an unknown campus.
    pub fn teacher_deficit(&self, id: &CampusId) -> u32 {
        self.campus(id).map_or(0, capacity::teacher_deficit)
    }

    /// Campuses that need more teachers to seat every student.
    pub fn teacher_shortages(&self) -> Vec<TeacherShortage> {
        self.player
            .as_ref()
            .map_or_else(Vec::new, |p| capacity::shortages(&p.campuses))
    }

    /// Every advertising plan, in catalog order.
    pub const fn ad_plans() -> &'static [AdPlan] {
        &AdPlan::ALL
    }

    // -----------------------------------------------------------------------
    // Actions
    // -----------------------------------------------------------------------

    /// Drop the current game and rewind the staffing cursor.
    pub fn reset(&mut self) {
        self.player = None;
        self.staffing.reset();
        info!("Game state reset");
    }

    /// Start a new campaign, replacing any game in progress.
    ///
    /// With `initial_campus`, the opening cost is paid from the starting
    /// funds and the campus is seeded. An initial teacher template in
    /// `options` is hired first and the round-robin cursor moves past it.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::NotFound`] for an unknown campus or teacher
    /// template, or [`SimError::InsufficientFunds`] if the starting funds
    /// cannot cover the opening cost. Nothing changes on error.
    pub fn start_campaign(
        &mut self,
        player_name: &str,
        school_name: &str,
        initial_campus: Option<&CampusId>,
        options: &OpenOptions,
    ) -> Result<&Player, SimError> {
        let mut staffing = self.staffing.clone();
        staffing.reset();
        if let Some(template) = &options.initial_teacher_template {
            staffing.skip_past(template);
        }

        let mut player = Player::new(
            player_name,
            school_name,
            self.starting_funds,
            CampaignCalendar::new(self.start_date),
        );

        if let Some(id) = initial_campus {
            let template = self
                .catalog
                .campus(id)
                .ok_or_else(|| SimError::campus_not_found(id))?;
            let funds = charge(player.funds, template.opening_cost)?;
            let campus = seed_campus(template.clone(), &mut staffing, options)?;
            player.funds = funds;
            player.campuses.push(campus);
        }

        info!(
            player = player_name,
            school = school_name,
            funds = player.funds,
            initial_campus = initial_campus.map(CampusId::as_str),
            "Campaign started"
        );
        self.staffing = staffing;
        Ok(&*self.player.insert(player))
    }

    /// Open another campus for the active player.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::NoActiveGame`], [`SimError::DuplicateCampus`],
    /// [`SimError::NotFound`], or [`SimError::InsufficientFunds`]. Nothing
    /// changes on error.
    pub fn open_campus(
        &mut self,
        id: &CampusId,
        options: &OpenOptions,
    ) -> Result<&Campus, SimError> {
        let player = self.player.as_mut().ok_or(SimError::NoActiveGame)?;
        if player.owns(id) {
            return Err(SimError::DuplicateCampus(id.clone()));
        }
        let template = self
            .catalog
            .campus(id)
            .ok_or_else(|| SimError::campus_not_found(id))?;
        let funds = charge(player.funds, template.opening_cost)?;

        let mut staffing = self.staffing.clone();
        let campus = seed_campus(template.clone(), &mut staffing, options)?;

        info!(
            campus = %id,
            opening_cost = template.opening_cost,
            students = campus.student_count,
            teachers = campus.teachers.len(),
            funds,
            "Campus opened"
        );
        player.funds = funds;
        player.campuses.push(campus);
        self.staffing = staffing;
        player
            .campuses
            .last()
            .ok_or_else(|| SimError::campus_not_found(id))
    }

    /// Hire a teacher at an owned campus: from `template` when given, the
    /// next round-robin template otherwise. A classroom is added alongside
    /// and students are reseated.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::NoActiveGame`], [`SimError::NotFound`] for an
    /// unknown campus or template, or [`SimError::Configuration`] if the
    /// teacher catalog is empty.
    pub fn hire_teacher(
        &mut self,
        campus_id: &CampusId,
        template: Option<&TeacherTemplateId>,
    ) -> Result<&Teacher, SimError> {
        let player = self.player.as_mut().ok_or(SimError::NoActiveGame)?;
        let campus = player
            .campus_mut(campus_id)
            .ok_or_else(|| SimError::campus_not_found(campus_id))?;
        let teacher = match template {
            Some(id) => self.staffing.issue_from_template(id)?,
            None => self.staffing.issue_next()?,
        };

        info!(
            campus = %campus_id,
            teacher = %teacher.id,
            salary = teacher.base_salary,
            "Teacher hired"
        );
        capacity::add_teacher(campus, teacher);
        capacity::reassign_students(campus);
        campus
            .teachers
            .last()
            .ok_or_else(|| SimError::campus_not_found(campus_id))
    }

    /// Schedule an ad plan for next month at an owned campus. An absent or
    /// blank plan id means no advertising.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::NoActiveGame`], [`SimError::NotFound`] for an
    /// unknown campus, or [`SimError::InvalidPlan`] for an unknown plan id.
    pub fn schedule_ad_plan(
        &mut self,
        campus_id: &CampusId,
        plan_id: Option<&str>,
    ) -> Result<PlanSchedule, SimError> {
        let player = self.player.as_mut().ok_or(SimError::NoActiveGame)?;
        let campus = player
            .campus_mut(campus_id)
            .ok_or_else(|| SimError::campus_not_found(campus_id))?;
        let plan = advertising::resolve_plan(plan_id)?;
        let schedule = advertising::schedule_plan(campus, plan);
        info!(
            campus = %campus_id,
            active = schedule.active_plan.id(),
            next = schedule.next_plan.map(AdPlan::id),
            "Ad plan scheduled"
        );
        Ok(schedule)
    }

    /// Simulate one month.
    ///
    /// Returns `Ok(None)` without touching any state when no game is active
    /// or the campaign is complete.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Ledger`] or [`SimError::Calendar`] on arithmetic
    /// overflow, or [`SimError::Configuration`] if a staffless campus needs a
    /// teacher and the catalog is empty. State may be partially updated.
    pub fn advance_month(&mut self) -> Result<Option<MonthSummary>, SimError> {
        let Self {
            staffing,
            player,
            rng,
            end_date,
            ..
        } = self;
        let Some(player) = player.as_mut() else {
            return Ok(None);
        };
        if player.is_campaign_complete {
            return Ok(None);
        }

        let date = player.calendar.date();
        let funds_before = player.funds;
        let students_before = player.total_students();
        let avg_satisfaction_before = player.average_satisfaction();
        let mut ledger = MonthLedger::new(date.year, date.month);
        let mut campuses = Vec::with_capacity(player.campuses.len());

        for campus in &mut player.campuses {
            let (statement, summary) = tick_campus(campus, staffing, rng)?;
            ledger.record(&statement)?;
            player.funds = player
                .funds
                .checked_add(statement.profit)
                .ok_or(LedgerError::Overflow { context: "funds" })?;
            campuses.push(summary);
        }

        let record = ledger.to_revenue_record()?;
        let balanced = matches!(ledger.verify_balance(), BalanceResult::Balanced);
        player.revenue_history.push(record);

        let processed = player.calendar.advance()?;
        let is_campaign_end = processed >= *end_date;
        if is_campaign_end {
            player.is_campaign_complete = true;
        }

        let students_after = player.total_students();
        let avg_satisfaction_after = player.average_satisfaction();
        let summary = MonthSummary {
            year: processed.year,
            month: processed.month,
            total_revenue: record.revenue,
            total_cost: record.cost,
            total_profit: record.profit,
            funds_before,
            funds_after: player.funds,
            breakdown: ledger.breakdown(),
            students_before,
            students_after,
            student_delta: i64::from(students_after).saturating_sub(i64::from(students_before)),
            avg_satisfaction_before,
            avg_satisfaction_after,
            avg_satisfaction_delta: avg_satisfaction_after - avg_satisfaction_before,
            campuses,
            is_campaign_end,
        };

        info!(
            year = summary.year,
            month = summary.month,
            revenue = summary.total_revenue,
            profit = summary.total_profit,
            funds = summary.funds_after,
            students = summary.students_after,
            balanced,
            "Month completed"
        );
        if is_campaign_end {
            info!(
                funds = player.funds,
                months = player.calendar.elapsed_months(),
                "Campaign complete"
            );
        }
        Ok(Some(summary))
    }

    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    /// Capture the current game, or `None` without an active game.
    pub fn to_snapshot(&self, saved_at: DateTime<Utc>) -> Option<Snapshot> {
        self.player
            .as_ref()
            .map(|player| snapshot::capture(player, self.staffing.cursor(), saved_at))
    }

    /// Replace the current game with a decoded snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidSnapshot`] or [`SimError::NotFound`] if
    /// the snapshot cannot be restored. The current game is untouched on
    /// error.
    pub fn load_snapshot(&mut self, snapshot: &Snapshot) -> Result<(), SimError> {
        let restored = snapshot::restore(snapshot, &self.catalog)?;
        info!(
            player = %restored.player.name,
            campuses = restored.player.campuses.len(),
            year = restored.player.calendar.year(),
            month = restored.player.calendar.month(),
            "Snapshot loaded"
        );
        self.staffing.set_cursor(restored.teacher_cursor);
        self.player = Some(restored.player);
        Ok(())
    }
}

/// Opening enrollment for a market size: one student per 200, at least one.
pub const fn initial_student_estimate(market_students: u32) -> u32 {
    let estimate =
        market_students.saturating_add(INITIAL_STUDENT_DIVISOR / 2) / INITIAL_STUDENT_DIVISOR;
    if estimate == 0 { 1 } else { estimate }
}

/// Funds after paying `cost`.
const fn charge(funds: i64, cost: i64) -> Result<i64, SimError> {
    if funds < cost {
        return Err(SimError::InsufficientFunds {
            required: cost,
            available: funds,
        });
    }
    match funds.checked_sub(cost) {
        Some(rest) => Ok(rest),
        None => Err(SimError::InsufficientFunds {
            required: cost,
            available: funds,
        }),
    }
}

fn seed_campus(
    template: CampusTemplate,
    staffing: &mut StaffingPool,
    options: &OpenOptions,
) -> Result<Campus, SimError> {
    let mut campus = Campus::new(template);
    let seeded = options
        .student_count
        .unwrap_or_else(|| initial_student_estimate(campus.profile.market_students));
    campus.student_count = campus.clamp_to_intake(seeded);

    if let Some(id) = &options.initial_teacher_template {
        capacity::add_teacher(&mut campus, staffing.issue_from_template(id)?);
    }
    capacity::ensure_capacity(&mut campus, staffing, true)?;
    Ok(campus)
}

fn tick_campus<R: Rng + ?Sized>(
    campus: &mut Campus,
    staffing: &mut StaffingPool,
    rng: &mut R,
) -> Result<(CampusFinancials, CampusMonthSummary), SimError> {
    let students_before = campus.student_count;
    let satisfaction_before = campus.satisfaction;

    if let Some(plan) = advertising::apply_pending_plan(campus) {
        debug!(campus = %campus.id(), plan = plan.id(), "Ad plan switched");
    }
    let flow = flow::apply_monthly_flow(campus, rng);
    capacity::ensure_capacity(campus, staffing, false)?;

    let statement = campus_statement(&StatementInput {
        students_before,
        tuition_per_student: campus.profile.tuition_per_student,
        salary_cost: salary_total(&campus.teachers)?,
        rent_cost: campus.rent_cost(),
        ad_cost: campus.ad_cost(),
        royalty_cost: campus.royalty_cost(),
    })?;
    campus.last_financials = Some(statement);
    campus.satisfaction = satisfaction::next_satisfaction(campus, flow.delta(), rng);

    let cost = statement
        .revenue
        .checked_sub(statement.profit)
        .ok_or(LedgerError::Overflow { context: "campus cost" })?;
    let summary = CampusMonthSummary {
        id: campus.id().clone(),
        name: campus.name().to_owned(),
        revenue: statement.revenue,
        rent_cost: statement.rent_cost,
        salary_cost: statement.salary_cost,
        ad_cost: statement.ad_cost,
        royalty_cost: statement.royalty_cost,
        misc_cost: statement.misc_cost,
        cost,
        profit: statement.profit,
        student_count: campus.student_count,
        student_delta: flow.delta(),
        satisfaction: campus.satisfaction,
        satisfaction_delta: campus.satisfaction - satisfaction_before,
        ad_plan_label: campus.ad_plan.label().to_owned(),
        intake_capacity: campus.profile.intake_capacity,
    };
    Ok((statement, summary))
}
