//! One reservation run over every court.

use chrono::{NaiveDate, NaiveDateTime};
use tracing::{error, info, warn};

use crate::api::BookingService;
use crate::error::BookingResult;
use crate::grid::Grid;
use crate::ground::Ground;
use crate::policy::ScanPolicy;
use crate::ranker;
use crate::release;
use crate::request::{RequestBuilder, ReservationRequest, ReservationWindow, Template};
use crate::scanner::{self, CandidateInterval};

#[derive(Debug, Clone)]
pub struct RunPlan {
    pub grounds: Vec<Ground>,
    pub policy: ScanPolicy,
    pub today: NaiveDate,
    pub target: NaiveDate,
    pub day_offset: usize,
    pub start_index: usize,
    pub preferred_start: Option<usize>,
    builder: RequestBuilder,
}

impl RunPlan {
    pub fn new(
        now: NaiveDateTime,
        release_hour: u32,
        policy: ScanPolicy,
        grounds: Vec<Ground>,
        preferred_start: Option<usize>,
    ) -> Self {
        let day_offset = release::target_day_offset(now, release_hour);
        let target = release::target_date(now, release_hour);
        let start_index = policy.start_index_for(target);
        let anchor = target.and_time(policy.day_anchor);
        let builder = RequestBuilder::new(anchor, policy.slot_duration(), now);

        RunPlan {
            grounds,
            policy,
            today: now.date(),
            target,
            day_offset,
            start_index,
            preferred_start,
            builder,
        }
    }

    pub fn with_template(mut self, template: Template) -> Self {
        self.builder = self.builder.with_template(template);
        self
    }

    /// Picks the interval to book on one court from its raw statuses.
    pub fn decide(&self, ground: &Ground, statuses: &[String]) -> BookingResult<Option<CandidateInterval>> {
        let grid = Grid::from_statuses(
            statuses,
            self.policy.day_length,
            &self.policy.available_sentinel,
            &self.policy.ignored_indices,
        )?;
        let candidates = scanner::scan(&grid, ground.index, self.start_index, &self.policy);
        Ok(ranker::select(candidates, self.policy.selection))
    }

    pub fn build(&self, interval: &CandidateInterval, ground: &Ground) -> BookingResult<ReservationRequest> {
        self.builder.build(interval, ground)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CourtOutcome {
    Reserved {
        interval: CandidateInterval,
        window: ReservationWindow,
    },
    FullyBooked,
    Failed(String),
}

#[derive(Debug, Default)]
pub struct RunReport {
    pub outcomes: Vec<(Ground, CourtOutcome)>,
}

impl RunReport {
    pub fn reserved(&self) -> impl Iterator<Item = (&Ground, &CourtOutcome)> {
        self.outcomes
            .iter()
            .filter(|(_, o)| matches!(o, CourtOutcome::Reserved { .. }))
            .map(|(g, o)| (g, o))
    }
}

async fn reserve_ground<S>(service: &S, plan: &RunPlan, ground: &Ground) -> BookingResult<Option<ReservationRequest>>
where
    S: BookingService + Sync,
{
    let statuses = service
        .day_statuses(ground, plan.today, plan.target, plan.day_offset)
        .await?;

    let interval = match plan.decide(ground, &statuses)? {
        Some(interval) => interval,
        None => return Ok(None),
    };

    let request = plan.build(&interval, ground)?;
    info!(
        "Reserving {} from {} to {}",
        ground.label(),
        request.window.start,
        request.window.end
    );
    service.submit(&request).await?;

    Ok(Some(request))
}

/// Books courts in order, logging and skipping failed ones, and stops once
/// the preferred start slot has been booked.
pub async fn run<S>(service: &S, plan: &RunPlan) -> RunReport
where
    S: BookingService + Sync,
{
    info!("Reserving for {} (day offset {})", plan.target, plan.day_offset);
    let mut report = RunReport::default();

    for ground in &plan.grounds {
        info!("Request for {}", ground.label());

        let outcome = match reserve_ground(service, plan, ground).await {
            Ok(Some(request)) => CourtOutcome::Reserved {
                interval: request.interval,
                window: request.window,
            },
            Ok(None) => {
                warn!("{} has been reserved", ground.label());
                CourtOutcome::FullyBooked
            }
            Err(e) => {
                error!("{} failed: {}", ground.label(), e);
                CourtOutcome::Failed(e.to_string())
            }
        };

        let done = match &outcome {
            CourtOutcome::Reserved { interval, .. } => plan.preferred_start == Some(interval.start_index),
            _ => false,
        };
        report.outcomes.push((ground.clone(), outcome));

        if done {
            info!("Preferred slot booked on {}, stopping", ground.label());
            break;
        }
    }

    report
}
