//! Session state for the what-if explorer.
//!
//! All mutation goes through [`SessionState::update`] (or the named methods it
//! dispatches to). The state never touches the DOM or the network: handlers
//! return an [`Effect`] and the page performs it, feeding results back in as
//! messages.

use std::collections::BTreeSet;
use std::num::NonZeroU32;

use crate::api::{Profile, SweepPoint};
use crate::config::DashboardConfig;
use crate::engine::debounce::{Debouncer, Ticket};
use crate::engine::marginal::MarginalTable;
use crate::engine::score::{feature_cards, FeatureCard, ScoreSummary};
use crate::engine::sweep::{resample, TrendView};
use crate::error::DashboardError;

/// Monotonic id of an issued profile fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestId(u64);

/// A profile fetch the caller should perform.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    pub id: RequestId,
    pub entity: String,
    /// Decimal fraction (percent / 100), as the backend expects.
    pub delta: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadStatus {
    Idle,
    Loading,
    Ready,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    SelectEntity(String),
    EditDelta { value: f64, now_ms: f64 },
    DebounceElapsed(Ticket),
    SetStep(u32),
    ToggleFeature(String),
    ProfileLoaded {
        request: RequestId,
        result: Result<Profile, DashboardError>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Fetch(FetchRequest),
    ScheduleRefresh(Ticket),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Applied,
    /// A newer fetch was issued after this one; its data was dropped.
    Stale,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    entity: Option<String>,
    profile: Profile,
    selection: BTreeSet<String>,
    step: Option<NonZeroU32>,
    default_step: NonZeroU32,
    delta_percent: f64,
    delta_min: f64,
    delta_max: f64,
    debounce: Debouncer,
    last_issued: u64,
    status: LoadStatus,
}

impl SessionState {
    pub fn new(config: &DashboardConfig) -> Self {
        Self {
            entity: None,
            profile: Profile::default(),
            selection: BTreeSet::new(),
            step: None,
            default_step: NonZeroU32::new(config.default_step).unwrap_or(NonZeroU32::MIN),
            delta_percent: config.delta_default,
            delta_min: config.delta_min,
            delta_max: config.delta_max,
            debounce: Debouncer::new(config.debounce_ms),
            last_issued: 0,
            status: LoadStatus::Idle,
        }
    }

    // -- Accessors --

    pub fn entity(&self) -> Option<&str> {
        self.entity.as_deref()
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn selection(&self) -> &BTreeSet<String> {
        &self.selection
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == LoadStatus::Loading
    }

    pub fn delta_percent(&self) -> f64 {
        self.delta_percent
    }

    pub fn delta_decimal(&self) -> f64 {
        self.delta_percent / 100.0
    }

    pub fn delta_bounds(&self) -> (f64, f64) {
        (self.delta_min, self.delta_max)
    }

    /// Last step the user picked, or the configured default.
    pub fn active_step(&self) -> NonZeroU32 {
        self.step.unwrap_or(self.default_step)
    }

    pub fn pending_refresh(&self) -> Option<Ticket> {
        self.debounce.pending()
    }

    // -- Derived views, all from the same snapshot --

    pub fn summary(&self) -> ScoreSummary {
        ScoreSummary::compute(
            self.profile.baseline_score,
            &self.profile.rankings,
            &self.selection,
        )
    }

    pub fn cards(&self) -> Vec<FeatureCard> {
        feature_cards(&self.profile.rankings, &self.selection)
    }

    pub fn filtered_sweep(&self) -> Vec<SweepPoint> {
        resample(&self.profile.sweep, self.active_step())
    }

    pub fn trend(&self) -> TrendView {
        TrendView::build(&self.filtered_sweep())
    }

    pub fn marginal_table(&self) -> MarginalTable {
        MarginalTable::build(&self.profile.marginal)
    }

    // -- Transitions --

    pub fn update(&mut self, msg: Msg) -> Result<Effect, DashboardError> {
        let effect = match msg {
            Msg::SelectEntity(name) => Effect::Fetch(self.load_entity(&name)),
            Msg::EditDelta { value, now_ms } => match self.set_delta(value, now_ms) {
                Some(ticket) => Effect::ScheduleRefresh(ticket),
                None => Effect::None,
            },
            Msg::DebounceElapsed(ticket) => match self.debounce_elapsed(ticket) {
                Some(req) => Effect::Fetch(req),
                None => Effect::None,
            },
            Msg::SetStep(n) => {
                self.set_step(n);
                Effect::None
            }
            Msg::ToggleFeature(name) => {
                self.toggle_feature(&name);
                Effect::None
            }
            Msg::ProfileLoaded { request, result } => {
                self.apply_profile(request, result)?;
                Effect::None
            }
        };
        Ok(effect)
    }

    /// Switch to a new entity: selection cleared, pending delta refresh dropped, fetch issued.
    pub fn load_entity(&mut self, name: &str) -> FetchRequest {
        self.entity = Some(name.to_string());
        self.selection.clear();
        self.debounce.cancel();
        self.issue_fetch(name.to_string())
    }

    /// Fetch for the current entity at the current delta, if an entity is loaded.
    pub fn begin_refresh(&mut self) -> Option<FetchRequest> {
        let entity = self.entity.clone()?;
        Some(self.issue_fetch(entity))
    }

    fn issue_fetch(&mut self, entity: String) -> FetchRequest {
        self.last_issued += 1;
        self.status = LoadStatus::Loading;
        let req = FetchRequest {
            id: RequestId(self.last_issued),
            entity,
            delta: self.delta_decimal(),
        };
        log::info!(
            "Fetching profile #{} for '{}' at delta {}",
            self.last_issued,
            req.entity,
            req.delta
        );
        req
    }

    /// Mirror an edit from either input and restart the quiet period.
    ///
    /// Non-finite values are ignored; everything else is clamped into range.
    pub fn set_delta(&mut self, value: f64, now_ms: f64) -> Option<Ticket> {
        if !value.is_finite() {
            return None;
        }
        self.delta_percent = value.clamp(self.delta_min, self.delta_max);
        Some(self.debounce.schedule(now_ms))
    }

    /// Virtual-clock variant of the timer callback, for tests and replays.
    pub fn poll_debounce(&mut self, now_ms: f64) -> Option<FetchRequest> {
        self.debounce.poll(now_ms)?;
        self.begin_refresh()
    }

    pub fn debounce_elapsed(&mut self, ticket: Ticket) -> Option<FetchRequest> {
        if self.debounce.fire(ticket) {
            self.begin_refresh()
        } else {
            None
        }
    }

    /// Apply a fetch result. Only the most recently issued request counts.
    pub fn apply_profile(
        &mut self,
        request: RequestId,
        result: Result<Profile, DashboardError>,
    ) -> Result<RefreshOutcome, DashboardError> {
        if request.0 != self.last_issued {
            log::debug!(
                "Discarding stale profile #{} (latest is #{})",
                request.0,
                self.last_issued
            );
            return Ok(RefreshOutcome::Stale);
        }

        match result {
            Ok(profile) => {
                self.selection
                    .retain(|f| profile.rankings.iter().any(|r| &r.feature == f));
                self.profile = profile;
                self.status = LoadStatus::Ready;
                log::info!(
                    "Applied profile #{}: {} rankings, {} sweep points, {} marginal rows",
                    request.0,
                    self.profile.rankings.len(),
                    self.profile.sweep.len(),
                    self.profile.marginal.len()
                );
                Ok(RefreshOutcome::Applied)
            }
            Err(e) => {
                log::warn!("Profile #{} failed: {}", request.0, e);
                self.status = LoadStatus::Failed(e.to_string());
                Err(e)
            }
        }
    }

    /// Flip membership; unknown features are ignored. Returns whether anything changed.
    pub fn toggle_feature(&mut self, name: &str) -> bool {
        if !self.profile.rankings.iter().any(|r| r.feature == name) {
            log::debug!("Ignoring toggle of unknown feature '{}'", name);
            return false;
        }
        if !self.selection.remove(name) {
            self.selection.insert(name.to_string());
        }
        true
    }

    /// Pick a resampling step. Zero is rejected. Never refetches.
    pub fn set_step(&mut self, n: u32) -> bool {
        match NonZeroU32::new(n) {
            Some(step) => {
                self.step = Some(step);
                true
            }
            None => false,
        }
    }
}

/// Parse the numeric field; blank or non-numeric text is not an edit.
pub fn parse_delta_input(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Text the numeric field should switch to once `value` changes, if any.
///
/// A focused field keeps what is being typed; an unfocused one only follows
/// when its text no longer reads as `value`.
pub fn mirror_field_text(current: &str, value: f64, focused: bool) -> Option<String> {
    if focused || parse_delta_input(current) == Some(value) {
        return None;
    }
    Some(value.to_string())
}
