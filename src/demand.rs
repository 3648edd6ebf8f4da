use crate::model::{Area, AreaId, Slot};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Matrice de besoin (créneau × zone) calculée une fois par génération.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemandMatrix {
    areas: Vec<AreaId>,
    cells: Vec<[bool; Slot::COUNT]>,
}

impl DemandMatrix {
    /// Une cellule est vraie ssi la zone liste cette demi-journée ce jour-là.
    pub fn build<'a, I>(areas: I) -> Self
    where
        I: IntoIterator<Item = &'a Area>,
    {
        let mut ids = Vec::new();
        let mut cells = Vec::new();
        for area in areas {
            let mut row = [false; Slot::COUNT];
            for slot in &area.demand {
                row[slot.index()] = true;
            }
            ids.push(area.id.clone());
            cells.push(row);
        }
        Self { areas: ids, cells }
    }

    pub fn areas(&self) -> &[AreaId] {
        &self.areas
    }

    /// Faux pour une zone hors sélection.
    pub fn is_demanded(&self, slot: Slot, area: &AreaId) -> bool {
        self.areas
            .iter()
            .position(|a| a == area)
            .is_some_and(|idx| self.cells[idx][slot.index()])
    }

    pub fn demanded_areas(&self, slot: Slot) -> impl Iterator<Item = &AreaId> + '_ {
        self.areas
            .iter()
            .zip(&self.cells)
            .filter(move |(_, row)| row[slot.index()])
            .map(|(area, _)| area)
    }

    /// Nombre total de couples (créneau, zone) demandés.
    pub fn demanded_count(&self) -> usize {
        self.cells
            .iter()
            .map(|row| row.iter().filter(|d| **d).count())
            .sum()
    }
}

/// Sérialisé en `{ "<zone>": ["Monday Morning", ...] }`, ordre de sélection.
impl Serialize for DemandMatrix {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.areas.len()))?;
        for (area, row) in self.areas.iter().zip(&self.cells) {
            let slots: Vec<Slot> = Slot::ALL
                .iter()
                .copied()
                .filter(|slot| row[slot.index()])
                .collect();
            map.serialize_entry(area, &slots)?;
        }
        map.end()
    }
}
