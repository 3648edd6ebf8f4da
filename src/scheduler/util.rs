use super::state::RunState;
use crate::model::{Area, Slot, Staff};

/// Conditions communes aux deux passes : heures restantes, disponibilité,
/// qualification côté personne, admission côté zone, et pas déjà occupé
/// dans ce créneau.
pub(super) fn can_take(state: &RunState, staff: &Staff, area: &Area, slot: Slot) -> bool {
    state.budget().has_capacity(&staff.id)
        && staff.is_available(slot)
        && staff.is_qualified(&area.id)
        && area.admits(&staff.id)
        && !state.is_busy(slot, &staff.id)
}
