use super::{state::RunState, util, Scope};
use crate::config::Rules;
use crate::demand::DemandMatrix;
use crate::model::{Area, Slot, Staff};
use tracing::debug;

/// Seconde passe, créneau par créneau : la zone ouverte qui a le moins de
/// candidats est servie en premier. Les ensembles de candidats sont recalculés
/// après chaque engagement.
pub(super) fn fill_by_scarcity(
    rules: &Rules,
    scope: &Scope,
    demand: &DemandMatrix,
    state: &mut RunState,
) {
    for slot in Slot::ALL {
        let mut open: Vec<&Area> = scope
            .areas
            .iter()
            .filter(|a| demand.is_demanded(slot, &a.id) && !state.is_filled(slot, &a.id))
            .collect();

        while let Some((pos, pool)) = scarcest_open_area(rules, scope, slot, &open, state) {
            let area = open.remove(pos);
            let Some(chosen) = pick_staff(rules, area, &pool, state) else {
                continue;
            };
            debug!(
                %slot,
                area = %area.id,
                staff = %chosen.id,
                candidates = pool.len(),
                "filled"
            );
            state.commit(slot, &area.id, &chosen.id);
        }

        for area in open {
            debug!(%slot, area = %area.id, "coverage gap");
        }
    }
}

fn candidates<'s>(scope: &'s Scope, area: &Area, slot: Slot, state: &RunState) -> Vec<&'s Staff> {
    scope
        .staff
        .iter()
        .filter(|staff| util::can_take(state, staff, area, slot))
        .collect()
}

/// Position de la prochaine zone à servir et ses candidats, ou `None` quand
/// plus aucune zone ouverte n'a de candidat. Égalités : ordre de sélection.
fn scarcest_open_area<'s>(
    rules: &Rules,
    scope: &'s Scope,
    slot: Slot,
    open: &[&Area],
    state: &RunState,
) -> Option<(usize, Vec<&'s Staff>)> {
    let mut sets: Vec<Vec<&'s Staff>> = open
        .iter()
        .map(|area| candidates(scope, area, slot, state))
        .collect();

    if rules.defer_secondary_reception {
        let competing = open
            .iter()
            .zip(&sets)
            .any(|(area, set)| !set.is_empty() && rules.defers_secondary_behind(&area.id));
        if competing {
            for (area, set) in open.iter().zip(sets.iter_mut()) {
                if rules.is_secondary_reception(&area.id) {
                    set.clear();
                }
            }
        }
    }

    sets.into_iter()
        .enumerate()
        .filter(|(_, set)| !set.is_empty())
        .min_by_key(|(_, set)| set.len())
}

/// Priorité réception d'abord ; sinon le moins d'heures restantes, puis le
/// moins de zones qualifiées, puis l'ordre de sélection.
fn pick_staff<'a>(
    rules: &Rules,
    area: &Area,
    candidates: &[&'a Staff],
    state: &RunState,
) -> Option<&'a Staff> {
    if rules.is_reception(&area.id) {
        if let Some(priority) = &rules.reception_priority {
            if let Some(staff) = candidates.iter().find(|s| &s.id == priority) {
                return Some(*staff);
            }
        }
    }
    candidates
        .iter()
        .copied()
        .min_by_key(|s| (state.budget().remaining(&s.id), s.qualified_areas.len()))
}
