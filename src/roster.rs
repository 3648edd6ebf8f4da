use crate::demand::DemandMatrix;
use crate::model::{AreaId, Assignment, Slot, StaffId};
use serde::Serialize;

/// Marqueur d'une cellule sans affectation.
pub const UNFILLED: &str = "-";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Cell {
    Staffed { staff: StaffId },
    /// `gap` : la zone demandait ce créneau mais personne n'a pu être affecté.
    Empty { gap: bool },
}

impl Cell {
    /// Texte affiché : identifiant de la personne ou [`UNFILLED`].
    pub fn label(&self) -> &str {
        match self {
            Cell::Staffed { staff } => staff.as_str(),
            Cell::Empty { .. } => UNFILLED,
        }
    }

    pub fn staff(&self) -> Option<&StaffId> {
        match self {
            Cell::Staffed { staff } => Some(staff),
            Cell::Empty { .. } => None,
        }
    }

    pub fn is_gap(&self) -> bool {
        matches!(self, Cell::Empty { gap: true })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterRow {
    pub slot: Slot,
    pub cells: Vec<Cell>,
}

/// Grille créneau × zone, sur l'ordre canonique des créneaux et les zones
/// sélectionnées.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Roster {
    areas: Vec<AreaId>,
    rows: Vec<RosterRow>,
}

impl Roster {
    pub fn materialize(areas: &[AreaId], assignments: &[Assignment], demand: &DemandMatrix) -> Self {
        let rows = Slot::ALL
            .iter()
            .map(|&slot| {
                let cells = areas
                    .iter()
                    .map(|area| {
                        assignments
                            .iter()
                            .find(|a| a.slot == slot && &a.area == area)
                            .map(|a| Cell::Staffed {
                                staff: a.staff.clone(),
                            })
                            .unwrap_or(Cell::Empty {
                                gap: demand.is_demanded(slot, area),
                            })
                    })
                    .collect();
                RosterRow { slot, cells }
            })
            .collect();
        Self {
            areas: areas.to_vec(),
            rows,
        }
    }

    pub fn areas(&self) -> &[AreaId] {
        &self.areas
    }

    pub fn rows(&self) -> &[RosterRow] {
        &self.rows
    }

    pub fn cell(&self, slot: Slot, area: &AreaId) -> Option<&Cell> {
        let col = self.areas.iter().position(|a| a == area)?;
        self.rows.get(slot.index()).and_then(|row| row.cells.get(col))
    }

    /// Couples (créneau, zone) demandés mais non couverts.
    pub fn gaps(&self) -> Vec<(Slot, &AreaId)> {
        self.rows
            .iter()
            .flat_map(|row| {
                row.cells
                    .iter()
                    .zip(&self.areas)
                    .filter(|(cell, _)| cell.is_gap())
                    .map(move |(_, area)| (row.slot, area))
            })
            .collect()
    }

    pub fn staffed_count(&self) -> usize {
        self.rows
            .iter()
            .flat_map(|row| &row.cells)
            .filter(|cell| cell.staff().is_some())
            .count()
    }
}
