use crate::model::{AreaId, Assignment, Slot, Staff, StaffId};
use std::collections::{BTreeMap, BTreeSet};

/// Heures restantes par personne, reconstruites à chaque génération.
/// Une personne absente de la table n'a aucun budget.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HourBudget {
    remaining: BTreeMap<StaffId, u32>,
}

impl HourBudget {
    pub fn fresh<'a, I>(staff: I, overrides: &BTreeMap<StaffId, u32>) -> Self
    where
        I: IntoIterator<Item = &'a Staff>,
    {
        let remaining = staff
            .into_iter()
            .map(|s| {
                let hours = overrides.get(&s.id).copied().unwrap_or(s.max_hours);
                (s.id.clone(), hours)
            })
            .collect();
        Self { remaining }
    }

    pub fn remaining(&self, staff: &StaffId) -> u32 {
        self.remaining.get(staff).copied().unwrap_or(0)
    }

    pub fn has_capacity(&self, staff: &StaffId) -> bool {
        self.remaining(staff) > 0
    }

    fn consume(&mut self, staff: &StaffId) {
        if let Some(hours) = self.remaining.get_mut(staff) {
            *hours = hours.saturating_sub(1);
        }
    }
}

/// État de travail d'une génération : budget, personnes occupées par créneau,
/// affectations engagées.
#[derive(Debug)]
pub(super) struct RunState {
    budget: HourBudget,
    busy: BTreeMap<Slot, BTreeSet<StaffId>>,
    filled: BTreeSet<(Slot, AreaId)>,
    committed: Vec<Assignment>,
}

impl RunState {
    pub(super) fn new(budget: HourBudget) -> Self {
        Self {
            budget,
            busy: BTreeMap::new(),
            filled: BTreeSet::new(),
            committed: Vec::new(),
        }
    }

    pub(super) fn budget(&self) -> &HourBudget {
        &self.budget
    }

    pub(super) fn is_busy(&self, slot: Slot, staff: &StaffId) -> bool {
        self.busy.get(&slot).is_some_and(|set| set.contains(staff))
    }

    pub(super) fn is_filled(&self, slot: Slot, area: &AreaId) -> bool {
        self.filled.contains(&(slot, area.clone()))
    }

    pub(super) fn commit(&mut self, slot: Slot, area: &AreaId, staff: &StaffId) {
        debug_assert!(!self.is_busy(slot, staff), "{staff} double-booked in {slot}");
        self.budget.consume(staff);
        self.busy.entry(slot).or_default().insert(staff.clone());
        self.filled.insert((slot, area.clone()));
        self.committed.push(Assignment {
            slot,
            area: area.clone(),
            staff: staff.clone(),
        });
    }

    /// Affectations triées par créneau (tri stable : l'ordre d'engagement est
    /// conservé à l'intérieur d'un créneau).
    pub(super) fn into_assignments(self) -> Vec<Assignment> {
        let mut out = self.committed;
        out.sort_by_key(|a| a.slot);
        out
    }
}
