use crate::demand::DemandMatrix;
use crate::model::{AreaId, Assignment, Slot, StaffId};
use crate::roster::Roster;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;
use uuid::Uuid;

/// Choix faits avant une génération : zones et personnel retenus (dans
/// l'ordre donné), budgets horaires et retouches ponctuelles de la
/// configuration. `None` = tout retenir, dans l'ordre du fichier.
///
/// Les retouches remplacent la valeur configurée pour cette génération
/// seulement ; la [`Config`](crate::Config) n'est jamais modifiée.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    pub areas: Option<Vec<AreaId>>,
    pub staff: Option<Vec<StaffId>>,
    pub max_hours: BTreeMap<StaffId, u32>,
    pub area_shifts: BTreeMap<AreaId, BTreeSet<Slot>>,
    pub area_staff: BTreeMap<AreaId, BTreeSet<StaffId>>,
    pub staff_availability: BTreeMap<StaffId, BTreeSet<Slot>>,
    pub staff_areas: BTreeMap<StaffId, BTreeSet<AreaId>>,
}

impl Selection {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_areas<I, S>(mut self, areas: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.areas = Some(areas.into_iter().map(AreaId::new).collect());
        self
    }

    pub fn with_staff<I, S>(mut self, staff: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.staff = Some(staff.into_iter().map(StaffId::new).collect());
        self
    }

    pub fn with_max_hours<S: AsRef<str>>(mut self, staff: S, hours: u32) -> Self {
        self.max_hours.insert(StaffId::new(staff), hours);
        self
    }

    /// Créneaux demandés par la zone pour cette génération.
    pub fn with_area_shifts<S, I>(mut self, area: S, slots: I) -> Self
    where
        S: AsRef<str>,
        I: IntoIterator<Item = Slot>,
    {
        self.area_shifts
            .insert(AreaId::new(area), slots.into_iter().collect());
        self
    }

    pub fn with_area_staff<S, I, T>(mut self, area: S, staff: I) -> Self
    where
        S: AsRef<str>,
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        self.area_staff.insert(
            AreaId::new(area),
            staff.into_iter().map(StaffId::new).collect(),
        );
        self
    }

    pub fn with_staff_availability<S, I>(mut self, staff: S, slots: I) -> Self
    where
        S: AsRef<str>,
        I: IntoIterator<Item = Slot>,
    {
        self.staff_availability
            .insert(StaffId::new(staff), slots.into_iter().collect());
        self
    }

    pub fn with_staff_areas<S, I, T>(mut self, staff: S, areas: I) -> Self
    where
        S: AsRef<str>,
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        self.staff_areas.insert(
            StaffId::new(staff),
            areas.into_iter().map(AreaId::new).collect(),
        );
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlanStatus {
    /// Toute la demande est couverte.
    Complete,
    /// Au moins un couple (créneau, zone) demandé reste vide.
    Gaps { count: usize },
    /// Aucune affectation possible.
    NoAssignments,
}

/// Résultat complet d'une génération.
#[derive(Debug, Clone, Serialize)]
pub struct Plan {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub status: PlanStatus,
    pub demand: DemandMatrix,
    /// Triées par créneau ; dans un créneau, ordre d'engagement.
    pub assignments: Vec<Assignment>,
    pub roster: Roster,
}

impl Plan {
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}

#[derive(Error, Debug)]
pub enum SchedError {
    #[error("unknown area in selection: {0}")]
    UnknownArea(String),
    #[error("unknown staff member in selection: {0}")]
    UnknownStaff(String),
    #[error("override for unselected staff member: {0}")]
    OverrideOutsideSelection(String),
    #[error("override for unselected area: {0}")]
    AreaOverrideOutsideSelection(String),
}
