//! Selection state machine and the statistics it displays.
//!
//! The UI loop is the only writer. Hovering a region calls [`SelectionState::select`],
//! which hands back a [`FetchTicket`]; the fetches it triggers come back as
//! [`FetchOutcome`]s and are folded in with [`SelectionState::apply`].

use tracing::{debug, info, warn};

use crate::catalog::Region;
use crate::error::FetchError;
use crate::severity::Severity;
use crate::stats::{RegionStatDetail, RegionStatSummary, StatsTable};

/// How late fetch results are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FreshnessPolicy {
    /// Drop details issued for an earlier selection and summary lists older
    /// than the one already shown
    #[default]
    LatestSelection,
    /// Apply every result in arrival order
    LastWriteWins,
}

/// Tag carried by both fetches issued for one selection change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub generation: u64,
    pub region: &'static Region,
}

impl FetchTicket {
    /// Name the statistics API addresses the region by
    pub fn api_name(&self) -> &'static str {
        self.region.label
    }
}

#[derive(Debug)]
pub enum FetchPayload {
    Summaries(Result<Vec<RegionStatSummary>, FetchError>),
    Detail(Result<RegionStatDetail, FetchError>),
}

/// A resolved fetch, tagged with the ticket it was issued for
#[derive(Debug)]
pub struct FetchOutcome {
    pub ticket: FetchTicket,
    pub payload: FetchPayload,
}

impl FetchOutcome {
    pub fn summaries(ticket: FetchTicket, result: Result<Vec<RegionStatSummary>, FetchError>) -> Self {
        Self {
            ticket,
            payload: FetchPayload::Summaries(result),
        }
    }

    pub fn detail(ticket: FetchTicket, result: Result<RegionStatDetail, FetchError>) -> Self {
        Self {
            ticket,
            payload: FetchPayload::Detail(result),
        }
    }
}

/// What `apply` did with an outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Summaries,
    Detail,
    Stale,
    Failed,
}

pub struct SelectionState {
    selected: &'static Region,
    generation: u64,
    summaries: StatsTable,
    /// Generation of the summary list currently shown
    summaries_generation: Option<u64>,
    detail: Option<RegionStatDetail>,
    accent: Severity,
    policy: FreshnessPolicy,
}

impl SelectionState {
    /// Start with `initial` selected. The returned ticket is the initial fetch.
    pub fn new(initial: &'static Region, policy: FreshnessPolicy) -> (Self, FetchTicket) {
        let state = Self {
            selected: initial,
            generation: 0,
            summaries: StatsTable::default(),
            summaries_generation: None,
            detail: None,
            accent: Severity::NoData,
            policy,
        };
        let ticket = state.ticket();
        (state, ticket)
    }

    fn ticket(&self) -> FetchTicket {
        FetchTicket {
            generation: self.generation,
            region: self.selected,
        }
    }

    /// Move the selection. Returns `None` if `region` is already selected.
    pub fn select(&mut self, region: &'static Region) -> Option<FetchTicket> {
        if region == self.selected {
            return None;
        }
        self.selected = region;
        self.generation += 1;
        self.refresh_accent();
        debug!(region = %region.id, generation = self.generation, "selection changed");
        Some(self.ticket())
    }

    /// Fold a resolved fetch into the store
    pub fn apply(&mut self, outcome: FetchOutcome) -> Applied {
        let FetchOutcome { ticket, payload } = outcome;
        match payload {
            FetchPayload::Summaries(Ok(list)) => {
                if self.policy == FreshnessPolicy::LatestSelection
                    && self.summaries_generation.is_some_and(|g| g > ticket.generation)
                {
                    debug!(generation = ticket.generation, "dropping outdated summary list");
                    return Applied::Stale;
                }
                info!(entries = list.len(), "summary list refreshed");
                self.summaries = StatsTable::new(list);
                self.summaries_generation = Some(ticket.generation);
                self.refresh_accent();
                Applied::Summaries
            }
            FetchPayload::Detail(Ok(detail)) => {
                if self.policy == FreshnessPolicy::LatestSelection && ticket.generation != self.generation {
                    debug!(
                        region = %ticket.region.id,
                        selected = %self.selected.id,
                        "dropping detail for an earlier selection"
                    );
                    return Applied::Stale;
                }
                self.detail = Some(detail);
                Applied::Detail
            }
            FetchPayload::Summaries(Err(e)) => {
                warn!(error = %e, "failed to fetch summary list");
                Applied::Failed
            }
            FetchPayload::Detail(Err(e)) => {
                warn!(region = %ticket.region.id, error = %e, "failed to fetch region detail");
                Applied::Failed
            }
        }
    }

    fn refresh_accent(&mut self) {
        self.accent = self.summaries.severity(self.selected.id);
    }

    pub fn selected(&self) -> &'static Region {
        self.selected
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn summaries(&self) -> &StatsTable {
        &self.summaries
    }

    /// Detail for the card, `None` until the first detail fetch resolves
    pub fn detail(&self) -> Option<&RegionStatDetail> {
        self.detail.as_ref()
    }

    /// Tier of the selected region, used for the frame accent
    pub fn accent(&self) -> Severity {
        self.accent
    }

    /// Fill tier for any region
    pub fn fill(&self, region: &Region) -> Severity {
        self.summaries.severity(region.id)
    }
}
