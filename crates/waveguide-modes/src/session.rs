//! Active mode held across reconfigurations

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{info, warn};

use crate::error::ModeError;
use crate::solver::Solver;
use crate::validate::{IndexCorrection, ModeConfiguration, RawConfiguration};

/// A validated configuration together with its solver.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfiguredMode {
    pub config: ModeConfiguration,
    pub solver: Solver,
    /// Set when the requested mode indices were replaced
    pub correction: Option<IndexCorrection>,
}

/// Holds the mode currently shown to the user.
///
/// [`Session::apply`] builds the replacement off to the side and swaps it in
/// whole, so readers holding a snapshot from [`Session::current`] keep a
/// consistent solver for as long as they need it.
#[derive(Debug)]
pub struct Session {
    active: RwLock<Arc<ConfiguredMode>>,
}

impl Session {
    /// Start a session from an initial configuration.
    pub fn new(raw: &RawConfiguration) -> Result<Self, ModeError> {
        let mode = crate::configure(raw)?;
        Ok(Self {
            active: RwLock::new(Arc::new(mode)),
        })
    }

    /// Snapshot of the active mode
    pub fn current(&self) -> Arc<ConfiguredMode> {
        Arc::clone(&*self.active.read())
    }

    /// Validate `raw`, build its solver and make it active.
    ///
    /// Returns the index correction, if any. On error the previous mode stays
    /// active.
    pub fn apply(&self, raw: &RawConfiguration) -> Result<Option<IndexCorrection>, ModeError> {
        let mode = match crate::configure(raw) {
            Ok(mode) => mode,
            Err(e) => {
                warn!("Reconfiguration rejected, keeping previous mode: {}", e);
                return Err(e);
            }
        };

        info!("Active mode: {}", mode.config.describe());
        let correction = mode.correction.clone();
        *self.active.write() = Arc::new(mode);
        Ok(correction)
    }
}
