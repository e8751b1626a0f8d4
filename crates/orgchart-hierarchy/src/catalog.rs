//! Designation catalog: rank lookup, root-rank resolution, level insertion.
//!
//! Levels are plain `f64` ranks where lower means more authority. New
//! designations are slotted between two existing ranks by taking the
//! midpoint of their levels, so the catalog never has to renumber:
//!
//! - Director 1.0, Manager 2.0 → a rank inserted below Director gets 1.5
//! - below the lowest rank the level is extrapolated by `LEVEL_STEP`
//!
//! The root designation is whichever designation holds the minimum level.
//! It is resolved from the store on every call and never cached, because
//! both the catalog and the tree may change after startup.

use orgchart_protocol::{Designation, DesignationId, NewDesignation, LEVEL_STEP};
use orgchart_state::DesignationStore;

use crate::{HierarchyError, Rejection};

/// Owns the designation store and answers rank questions about it.
pub struct DesignationCatalog<S> {
    store: S,
}

impl<S: DesignationStore> DesignationCatalog<S> {
    /// Wrap a designation store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Borrow the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn find_by_id(&self, id: DesignationId) -> Result<Option<Designation>, HierarchyError> {
        Ok(self.store.find_by_id(id)?)
    }

    /// Exact title lookup.
    pub fn find_by_title(&self, title: &str) -> Result<Option<Designation>, HierarchyError> {
        Ok(self.store.find_by_title(title)?)
    }

    pub fn find_by_level(&self, level: f64) -> Result<Vec<Designation>, HierarchyError> {
        Ok(self.store.find_by_level(level)?)
    }

    /// Every designation, highest authority first.
    pub fn all_ordered_by_level_ascending(&self) -> Result<Vec<Designation>, HierarchyError> {
        Ok(self.store.find_all_ordered_by_level()?)
    }

    /// Compute a level strictly between `anchor` and the next lower rank.
    ///
    /// The next rank is the designation with the smallest level strictly
    /// greater than the anchor's. When the anchor is already the lowest
    /// rank the level is extrapolated by [`LEVEL_STEP`]. Fails with
    /// `InvalidDesignation` when no representable level remains in between.
    pub fn compute_inserted_level(&self, anchor: &Designation) -> Result<f64, HierarchyError> {
        let next = self
            .all_ordered_by_level_ascending()?
            .into_iter()
            .find(|d| d.level > anchor.level);

        let level = match &next {
            Some(next) => (anchor.level + next.level) / 2.0,
            None => anchor.level + LEVEL_STEP,
        };

        // Adjacent floats have no midpoint; rounding would land on a neighbour.
        let below_next = next.as_ref().map_or(true, |n| level < n.level);
        if !(level > anchor.level && below_next && level.is_finite()) {
            return Err(HierarchyError::InvalidDesignation(match next {
                Some(next) => format!(
                    "no level left between '{}' and '{}'",
                    anchor.title, next.title
                ),
                None => format!("no level left below '{}'", anchor.title),
            }));
        }

        tracing::debug!(
            anchor = %anchor.title,
            anchor_level = anchor.level,
            level,
            "Computed inserted designation level"
        );

        Ok(level)
    }

    /// The minimum level present in the catalog, if any designation exists.
    pub fn root_level(&self) -> Result<Option<f64>, HierarchyError> {
        Ok(self
            .all_ordered_by_level_ascending()?
            .first()
            .map(|d| d.level))
    }

    /// Whether `designation` sits at the catalog's minimum level.
    ///
    /// This does not check that the root rank is unambiguous; use
    /// [`root_designation`](Self::root_designation) for that.
    pub fn holds_root_rank(&self, designation: &Designation) -> Result<bool, HierarchyError> {
        Ok(self
            .root_level()?
            .is_some_and(|root| designation.level <= root))
    }

    /// Resolve the single root designation.
    ///
    /// Rejects with `RootUnverifiable` when the catalog is empty or more
    /// than one designation shares the minimum level.
    pub fn root_designation(&self) -> Result<Designation, HierarchyError> {
        let Some(root_level) = self.root_level()? else {
            tracing::warn!("Designation catalog is empty, root rank cannot be verified");
            return Err(Rejection::RootUnverifiable.into());
        };

        let mut candidates = self.find_by_level(root_level)?;
        if candidates.len() != 1 {
            tracing::warn!(
                level = root_level,
                count = candidates.len(),
                "Root rank is ambiguous"
            );
            return Err(Rejection::RootUnverifiable.into());
        }

        Ok(candidates.remove(0))
    }

    pub fn len(&self) -> Result<usize, HierarchyError> {
        Ok(self.store.find_all()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, HierarchyError> {
        Ok(self.len()? == 0)
    }
}

// ── Administration ──

impl<S: DesignationStore> DesignationCatalog<S> {
    /// Register a designation at an explicit level.
    pub fn add(&mut self, title: &str, level: f64) -> Result<Designation, HierarchyError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(HierarchyError::InvalidDesignation(
                "title cannot be empty".into(),
            ));
        }
        if !level.is_finite() {
            return Err(HierarchyError::InvalidDesignation(format!(
                "level for '{}' must be a finite number",
                title
            )));
        }
        if self.store.find_by_title(title)?.is_some() {
            return Err(HierarchyError::InvalidDesignation(format!(
                "title '{}' already exists",
                title
            )));
        }

        let designation = self.store.insert(NewDesignation {
            title: title.to_string(),
            level,
        })?;

        tracing::info!(
            designation = %designation.id,
            title = %designation.title,
            level = designation.level,
            "Designation added"
        );

        Ok(designation)
    }

    /// Register a designation ranked directly below `anchor_title`.
    pub fn insert_after(
        &mut self,
        anchor_title: &str,
        title: &str,
    ) -> Result<Designation, HierarchyError> {
        let anchor = self
            .find_by_title(anchor_title)?
            .ok_or_else(|| Rejection::DesignationNotFound(anchor_title.to_string()))?;
        let level = self.compute_inserted_level(&anchor)?;
        self.add(title, level)
    }
}
