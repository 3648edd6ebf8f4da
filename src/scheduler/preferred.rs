use super::{state::RunState, util, Scope};
use crate::config::Config;
use crate::demand::DemandMatrix;
use crate::model::Slot;
use tracing::debug;

/// Première passe : reprend le planning standard partout où la personne
/// prévue remplit encore toutes les conditions. Sinon le couple reste ouvert.
pub(super) fn assign_preferred(
    config: &Config,
    scope: &Scope,
    demand: &DemandMatrix,
    state: &mut RunState,
) {
    for slot in Slot::ALL {
        for area in &scope.areas {
            if !demand.is_demanded(slot, &area.id) {
                continue;
            }
            let Some(pinned) = config.preferred(slot, &area.id) else {
                continue;
            };
            let Some(staff) = scope.staff.iter().find(|s| &s.id == pinned) else {
                debug!(%slot, area = %area.id, staff = %pinned, "preferred staff not selected");
                continue;
            };

            if util::can_take(state, staff, area, slot) {
                debug!(%slot, area = %area.id, staff = %staff.id, "preferred assignment kept");
                state.commit(slot, &area.id, &staff.id);
            } else {
                debug!(%slot, area = %area.id, staff = %staff.id, "preferred assignment skipped");
            }
        }
    }
}
