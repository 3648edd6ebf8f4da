mod fill;
mod preferred;
mod state;
mod types;
mod util;

pub use state::HourBudget;
pub use types::{Plan, PlanStatus, SchedError, Selection};

use crate::config::Config;
use crate::demand::DemandMatrix;
use crate::model::{Area, AreaId, Staff};
use crate::roster::Roster;
use chrono::Utc;
use state::RunState;
use tracing::{info, warn};
use uuid::Uuid;

/// Scheduler : génère un planning hebdomadaire à partir d'une configuration
/// immuable. Ne garde aucun état entre deux appels à [`Scheduler::generate`].
#[derive(Debug, Clone, Copy)]
pub struct Scheduler<'a> {
    config: &'a Config,
}

/// Copies des zones et du personnel retenus pour une génération, retouches
/// de la sélection appliquées. Ordre : celui de la sélection, sinon du fichier.
#[derive(Debug)]
struct Scope {
    areas: Vec<Area>,
    staff: Vec<Staff>,
}

impl Scope {
    fn resolve(config: &Config, selection: &Selection) -> Result<Self, SchedError> {
        let mut areas: Vec<Area> = match &selection.areas {
            None => config.areas().to_vec(),
            Some(ids) => {
                let mut picked: Vec<Area> = Vec::with_capacity(ids.len());
                for id in ids {
                    let area = config
                        .area(id)
                        .ok_or_else(|| SchedError::UnknownArea(id.to_string()))?;
                    if !picked.iter().any(|a| &a.id == id) {
                        picked.push(area.clone());
                    }
                }
                picked
            }
        };
        let mut staff: Vec<Staff> = match &selection.staff {
            None => config.staff().to_vec(),
            Some(ids) => {
                let mut picked: Vec<Staff> = Vec::with_capacity(ids.len());
                for id in ids {
                    let member = config
                        .staff_member(id)
                        .ok_or_else(|| SchedError::UnknownStaff(id.to_string()))?;
                    if !picked.iter().any(|s| &s.id == id) {
                        picked.push(member.clone());
                    }
                }
                picked
            }
        };

        let staff_keys = selection
            .max_hours
            .keys()
            .chain(selection.staff_availability.keys())
            .chain(selection.staff_areas.keys());
        for id in staff_keys {
            if config.staff_member(id).is_none() {
                return Err(SchedError::UnknownStaff(id.to_string()));
            }
            if !staff.iter().any(|s| &s.id == id) {
                return Err(SchedError::OverrideOutsideSelection(id.to_string()));
            }
        }
        for id in selection.area_shifts.keys().chain(selection.area_staff.keys()) {
            if config.area(id).is_none() {
                return Err(SchedError::UnknownArea(id.to_string()));
            }
            if !areas.iter().any(|a| &a.id == id) {
                return Err(SchedError::AreaOverrideOutsideSelection(id.to_string()));
            }
        }
        for id in selection.area_staff.values().flatten() {
            if config.staff_member(id).is_none() {
                return Err(SchedError::UnknownStaff(id.to_string()));
            }
        }
        for id in selection.staff_areas.values().flatten() {
            if config.area(id).is_none() {
                return Err(SchedError::UnknownArea(id.to_string()));
            }
        }

        for area in &mut areas {
            if let Some(slots) = selection.area_shifts.get(&area.id) {
                area.demand = slots.clone();
            }
            if let Some(eligible) = selection.area_staff.get(&area.id) {
                area.eligible_staff = eligible.clone();
            }
        }
        for member in &mut staff {
            if let Some(slots) = selection.staff_availability.get(&member.id) {
                member.available = slots.clone();
            }
            if let Some(qualified) = selection.staff_areas.get(&member.id) {
                member.qualified_areas = qualified.clone();
            }
        }

        Ok(Self { areas, staff })
    }
}

impl<'a> Scheduler<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &'a Config {
        self.config
    }

    /// Génère un planning complet. Le budget horaire repart de la
    /// configuration à chaque appel.
    pub fn generate(&self, selection: &Selection) -> Result<Plan, SchedError> {
        let scope = Scope::resolve(self.config, selection)?;
        let demand = DemandMatrix::build(&scope.areas);
        let budget = HourBudget::fresh(&scope.staff, &selection.max_hours);
        let mut state = RunState::new(budget);

        preferred::assign_preferred(self.config, &scope, &demand, &mut state);
        fill::fill_by_scarcity(self.config.rules(), &scope, &demand, &mut state);

        let assignments = state.into_assignments();
        let area_ids: Vec<AreaId> = scope.areas.iter().map(|a| a.id.clone()).collect();
        let roster = Roster::materialize(&area_ids, &assignments, &demand);

        let gaps = roster.gaps().len();
        let status = if assignments.is_empty() {
            PlanStatus::NoAssignments
        } else if gaps > 0 {
            PlanStatus::Gaps { count: gaps }
        } else {
            PlanStatus::Complete
        };

        let run_id = Uuid::new_v4();
        info!(
            %run_id,
            areas = scope.areas.len(),
            staff = scope.staff.len(),
            demanded = demand.demanded_count(),
            assigned = assignments.len(),
            gaps,
            "roster generated"
        );
        if status == PlanStatus::NoAssignments {
            warn!(%run_id, "no assignments possible");
        }

        Ok(Plan {
            run_id,
            generated_at: Utc::now(),
            status,
            demand,
            assignments,
            roster,
        })
    }
}
