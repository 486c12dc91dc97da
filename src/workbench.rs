//! Single-owner session holding the current composite of an editor.

use tracing::{debug, info};

use crate::builder::{Composite, Design, SolidBuilder};
use crate::error::{ExportError, Result};
use crate::export::export_stl;
use crate::extrude::{Extruder, PrismExtruder};
use crate::outline::GlyphOutliner;

/// Permission check performed before an export is finalized.
///
/// The check may block (for example on a network round trip); the design
/// is read only after it returns.
pub trait ExportGate {
    /// # Errors
    ///
    /// Returns a reason when the export is not allowed.
    fn authorize(&mut self) -> std::result::Result<(), String>;
}

impl<F> ExportGate for F
where
    F: FnMut() -> std::result::Result<(), String>,
{
    fn authorize(&mut self) -> std::result::Result<(), String> {
        self()
    }
}

/// Gate that permits every export.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl ExportGate for AllowAll {
    fn authorize(&mut self) -> std::result::Result<(), String> {
        Ok(())
    }
}

/// Owns a builder and the composite last built from it.
///
/// Every operation takes `&mut self`, so a rebuild and an export can never
/// overlap on the same workbench.
#[derive(Debug)]
pub struct Workbench<O, E = PrismExtruder> {
    builder: SolidBuilder<O, E>,
    current: Option<Composite>,
}

impl<O: GlyphOutliner, E: Extruder> Workbench<O, E> {
    #[must_use]
    pub fn new(builder: SolidBuilder<O, E>) -> Self {
        Self {
            builder,
            current: None,
        }
    }

    /// The composite from the last successful rebuild or export.
    #[must_use]
    pub fn composite(&self) -> Option<&Composite> {
        self.current.as_ref()
    }

    /// Rebuilds from `design`, replacing the current composite.
    ///
    /// On failure the previous composite is kept.
    ///
    /// # Errors
    ///
    /// Propagates build errors.
    pub fn rebuild(&mut self, design: &Design) -> Result<&Composite> {
        let composite = self.builder.build(design)?;
        Ok(self.current.insert(composite))
    }

    /// Checks `gate`, then reads the design and runs the full pipeline
    /// again before serializing.
    ///
    /// The design is produced after the gate returns so that edits made
    /// while waiting are exported.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::GateDenied`] if the gate refuses, otherwise
    /// any build or export error.
    pub fn export<G, D>(&mut self, gate: &mut G, design: D) -> Result<Vec<u8>>
    where
        G: ExportGate + ?Sized,
        D: FnOnce() -> Design,
    {
        gate.authorize().map_err(ExportError::GateDenied)?;
        debug!("export authorized");

        let design = design();
        let composite = self.builder.build(&design)?;
        let bytes = export_stl(&composite)?;
        self.current = Some(composite);
        info!(design = design.name(), bytes = bytes.len(), "export complete");
        Ok(bytes)
    }
}
