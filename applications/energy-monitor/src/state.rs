use tracing::{debug, error};

use crate::api::ApiError;
use crate::models::{EnergyReading, Granularity};

/// Identifies one fetch. Only the most recently issued ticket may update
/// the displayed data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub seq: u64,
    pub granularity: Granularity,
}

/// What the dashboard currently shows.
#[derive(Debug, Clone)]
pub struct DashboardState {
    active_tab: Granularity,
    data: Vec<EnergyReading>,
    data_granularity: Granularity,
    loading: bool,
    last_error: Option<ApiError>,
    next_seq: u64,
    latest_seq: Option<u64>,
}

impl DashboardState {
    pub fn new(initial_tab: Granularity) -> Self {
        Self {
            active_tab: initial_tab,
            data: Vec::new(),
            data_granularity: initial_tab,
            loading: false,
            last_error: None,
            next_seq: 0,
            latest_seq: None,
        }
    }

    pub fn active_tab(&self) -> Granularity {
        self.active_tab
    }

    /// Data on display and the granularity it was fetched for. After a tab
    /// switch these can differ until the new fetch lands.
    pub fn data(&self) -> (&[EnergyReading], Granularity) {
        (&self.data, self.data_granularity)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn last_error(&self) -> Option<&ApiError> {
        self.last_error.as_ref()
    }

    /// Switch tab and start a fetch for it.
    pub fn select(&mut self, tab: Granularity) -> FetchTicket {
        self.active_tab = tab;
        self.issue()
    }

    /// Refetch the active tab.
    pub fn refresh(&mut self) -> FetchTicket {
        self.issue()
    }

    fn issue(&mut self) -> FetchTicket {
        let ticket = FetchTicket {
            seq: self.next_seq,
            granularity: self.active_tab,
        };
        self.next_seq += 1;
        self.latest_seq = Some(ticket.seq);
        self.loading = true;
        ticket
    }

    /// Apply a finished fetch. Returns `false` when the ticket has been
    /// superseded and the result was dropped.
    pub fn apply(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<EnergyReading>, ApiError>,
    ) -> bool {
        if self.latest_seq != Some(ticket.seq) {
            debug!(seq = ticket.seq, granularity = %ticket.granularity, "Dropping stale fetch result");
            return false;
        }

        self.loading = false;
        match result {
            Ok(readings) => {
                self.data = readings;
                self.data_granularity = ticket.granularity;
                self.last_error = None;
            }
            Err(e) => {
                error!(error = %e, granularity = %ticket.granularity, "Failed to fetch energy data");
                self.last_error = Some(e);
            }
        }
        true
    }
}
