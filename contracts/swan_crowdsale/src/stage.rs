//! # Stage state machine
//!
//! Pure transition logic over [`SaleState`]. Nothing here touches storage or
//! the environment; entry points in `lib.rs` load the state, apply one of
//! these transitions and persist the result only when it returned `Ok`.

use crate::types::{SaleState, Stage};
use crate::Error;

/// Label reported by `get_stage_label` while the pause overlay is active.
pub const PAUSED_LABEL: &str = "paused";

impl Stage {
    /// Human-readable label of the stage.
    pub fn label(self) -> &'static str {
        match self {
            Stage::NotStarted => "CrowdSale Not Started",
            Stage::PrivateSaleOpen => "Private Sale Start",
            Stage::PrivateSaleClosed => "Private Sale End",
            Stage::PreSaleOpen => "Presale Started",
            Stage::PreSaleClosed => "Presale Ended",
            Stage::RoundOneOpen => "CrowdSale Round One Started",
            Stage::RoundOneClosed => "CrowdSale Round One End",
            Stage::RoundTwoOpen => "CrowdSale Round Two Started",
            Stage::RoundTwoClosed => "CrowdSale Round Two End",
            Stage::RoundThreeOpen => "CrowdSale Round Three Started",
            Stage::RoundThreeClosed => "CrowdSale Round Three End",
            Stage::RoundFourOpen => "CrowdSale Round Four Started",
            Stage::RoundFourClosed => "CrowdSale Round Four End",
            Stage::Finalized => "CrowdSale Finalized",
        }
    }

    /// `true` for the stages that accept purchases.
    pub fn is_open(self) -> bool {
        matches!(
            self,
            Stage::PrivateSaleOpen
                | Stage::PreSaleOpen
                | Stage::RoundOneOpen
                | Stage::RoundTwoOpen
                | Stage::RoundThreeOpen
                | Stage::RoundFourOpen
        )
    }

    /// Successor on the linear chain. `Finalized` is reached only through
    /// finalization, never by advancing.
    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::NotStarted => Some(Stage::PrivateSaleOpen),
            Stage::PrivateSaleOpen => Some(Stage::PrivateSaleClosed),
            Stage::PrivateSaleClosed => Some(Stage::PreSaleOpen),
            Stage::PreSaleOpen => Some(Stage::PreSaleClosed),
            Stage::PreSaleClosed => Some(Stage::RoundOneOpen),
            Stage::RoundOneOpen => Some(Stage::RoundOneClosed),
            Stage::RoundOneClosed => Some(Stage::RoundTwoOpen),
            Stage::RoundTwoOpen => Some(Stage::RoundTwoClosed),
            Stage::RoundTwoClosed => Some(Stage::RoundThreeOpen),
            Stage::RoundThreeOpen => Some(Stage::RoundThreeClosed),
            Stage::RoundThreeClosed => Some(Stage::RoundFourOpen),
            Stage::RoundFourOpen => Some(Stage::RoundFourClosed),
            Stage::RoundFourClosed | Stage::Finalized => None,
        }
    }
}

impl Default for SaleState {
    fn default() -> Self {
        Self::new()
    }
}

impl SaleState {
    pub fn new() -> Self {
        SaleState {
            stage: Stage::NotStarted,
            started: false,
            paused: false,
            pre_pause_stage: None,
        }
    }

    pub fn is_finalized(&self) -> bool {
        self.stage == Stage::Finalized
    }

    /// Fails with `SaleFinalized` once the terminal stage is reached.
    pub fn ensure_not_finalized(&self) -> Result<(), Error> {
        if self.is_finalized() {
            return Err(Error::SaleFinalized);
        }
        Ok(())
    }

    /// Move along the chain from `expected_from` to `to`.
    ///
    /// Every `start_*` / `end_*` entry point is a call to this function with a
    /// fixed pair. The transition is rejected unless the current stage equals
    /// `expected_from`, `to` is its direct successor, and the sale is not paused.
    pub fn advance(&mut self, expected_from: Stage, to: Stage) -> Result<(), Error> {
        self.ensure_not_finalized()?;
        if self.paused || self.stage != expected_from || expected_from.next() != Some(to) {
            return Err(Error::InvalidTransition);
        }
        self.stage = to;
        if to.is_open() && !self.started {
            self.started = true;
        }
        Ok(())
    }

    pub fn pause(&mut self) -> Result<(), Error> {
        self.ensure_not_finalized()?;
        if self.paused {
            return Err(Error::AlreadyPaused);
        }
        self.pre_pause_stage = Some(self.stage);
        self.paused = true;
        Ok(())
    }

    /// Lift the pause overlay and return the restored stage.
    pub fn resume(&mut self) -> Result<Stage, Error> {
        self.ensure_not_finalized()?;
        if !self.paused {
            return Err(Error::NotPaused);
        }
        if let Some(stage) = self.pre_pause_stage.take() {
            self.stage = stage;
        }
        self.paused = false;
        Ok(self.stage)
    }

    /// Enter the terminal stage. Clears the pause overlay.
    ///
    /// Returns the stage the sale was in before finalizing.
    pub fn finalize(&mut self) -> Result<Stage, Error> {
        if self.is_finalized() {
            return Err(Error::AlreadyFinalized);
        }
        let previous = self.stage;
        self.stage = Stage::Finalized;
        self.paused = false;
        self.pre_pause_stage = None;
        Ok(previous)
    }

    /// Label reported to callers: `"paused"` while paused, otherwise the
    /// label of the current stage.
    pub fn label(&self) -> &'static str {
        if self.paused {
            PAUSED_LABEL
        } else {
            self.stage.label()
        }
    }

    /// Stage a purchase would be priced at, or the reason purchases are refused.
    pub fn ensure_purchasable(&self) -> Result<Stage, Error> {
        self.ensure_not_finalized()?;
        if !self.started || self.paused {
            return Err(Error::SaleNotActive);
        }
        if !self.stage.is_open() {
            return Err(Error::SaleNotActive);
        }
        Ok(self.stage)
    }
}
