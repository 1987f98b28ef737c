/// Scan stage definitions for tracking orchestration progress
///
/// This module defines the stages of a scan and the legal transitions between them.
use crate::ScanError;
use std::fmt;
use std::time::Instant;

/// Represents the current stage of a scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScanStage {
    // ===== Active Stages =====
    /// Loading the page in the browser and reading its timing
    Fetching,

    /// Parsing the rendered HTML into a document tree
    Parsing,

    /// Deriving metadata, headings, images, links, keywords
    Extracting,

    /// Sampling internal links for liveness
    LinkChecking,

    /// Looking for sitemap and robots.txt files
    Probing,

    /// Folding all facets into the composite score
    Scoring,

    // ===== Terminal Stages =====
    /// Scan finished with a full result
    Done,

    /// Scan hit a fatal failure and produced a degraded result
    Failed,
}

impl ScanStage {
    /// Returns true if no further work happens after this stage
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }

    /// Returns true if a failure in this stage aborts the scan
    ///
    /// Later stages absorb their own failures and never abort.
    pub fn is_fatal_on_error(&self) -> bool {
        matches!(self, Self::Fetching | Self::Parsing)
    }

    /// Returns the stage that normally follows this one
    pub fn next(&self) -> Option<Self> {
        match self {
            Self::Fetching => Some(Self::Parsing),
            Self::Parsing => Some(Self::Extracting),
            Self::Extracting => Some(Self::LinkChecking),
            Self::LinkChecking => Some(Self::Probing),
            Self::Probing => Some(Self::Scoring),
            Self::Scoring => Some(Self::Done),
            Self::Done | Self::Failed => None,
        }
    }

    /// Returns true if moving from `self` to `to` is allowed
    pub fn can_transition_to(&self, to: Self) -> bool {
        if to == Self::Failed {
            return self.is_fatal_on_error();
        }
        self.next() == Some(to)
    }

    /// Short lowercase name used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fetching => "fetching",
            Self::Parsing => "parsing",
            Self::Extracting => "extracting",
            Self::LinkChecking => "link_checking",
            Self::Probing => "probing",
            Self::Scoring => "scoring",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }

    /// Returns all stages in pipeline order, followed by `Failed`
    pub fn all_stages() -> Vec<Self> {
        vec![
            Self::Fetching,
            Self::Parsing,
            Self::Extracting,
            Self::LinkChecking,
            Self::Probing,
            Self::Scoring,
            Self::Done,
            Self::Failed,
        ]
    }
}

impl fmt::Display for ScanStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Tracks the stage of one scan and logs each transition
#[derive(Debug)]
pub struct StageTracker {
    url: String,
    stage: ScanStage,
    entered_at: Instant,
    history: Vec<ScanStage>,
}

impl StageTracker {
    /// Starts tracking a scan in the `Fetching` stage
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            stage: ScanStage::Fetching,
            entered_at: Instant::now(),
            history: vec![ScanStage::Fetching],
        }
    }

    pub fn stage(&self) -> ScanStage {
        self.stage
    }

    /// Stages visited so far, in order
    pub fn history(&self) -> &[ScanStage] {
        &self.history
    }

    /// Moves to the next stage
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Transition applied
    /// * `Err(ScanError::InvalidTransition)` - The pipeline does not allow it
    pub fn advance(&mut self, to: ScanStage) -> Result<(), ScanError> {
        if !self.stage.can_transition_to(to) {
            return Err(ScanError::InvalidTransition {
                from: self.stage,
                to,
            });
        }

        tracing::debug!(
            "{}: {} -> {} ({}ms in {})",
            self.url,
            self.stage,
            to,
            self.entered_at.elapsed().as_millis(),
            self.stage
        );

        self.stage = to;
        self.entered_at = Instant::now();
        self.history.push(to);
        Ok(())
    }
}
