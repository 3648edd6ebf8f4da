use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Jour ouvré de la semaine planifiée.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl Day {
    pub const ALL: [Day; 5] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
        }
    }
}

impl FromStr for Day {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "monday" | "montag" => Ok(Day::Monday),
            "tuesday" | "dienstag" => Ok(Day::Tuesday),
            "wednesday" | "mittwoch" => Ok(Day::Wednesday),
            "thursday" | "donnerstag" => Ok(Day::Thursday),
            "friday" | "freitag" => Ok(Day::Friday),
            _ => Err(LabelError::Day(s.to_string())),
        }
    }
}

/// Demi-journée (type de shift).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Shift {
    Morning,
    Afternoon,
}

impl Shift {
    pub const ALL: [Shift; 2] = [Shift::Morning, Shift::Afternoon];

    pub fn as_str(&self) -> &'static str {
        match self {
            Shift::Morning => "Morning",
            Shift::Afternoon => "Afternoon",
        }
    }
}

impl FromStr for Shift {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "morning" | "vormittag" => Ok(Shift::Morning),
            "afternoon" | "nachmittag" => Ok(Shift::Afternoon),
            _ => Err(LabelError::Shift(s.to_string())),
        }
    }
}

/// Créneau (jour × demi-journée). L'ordre dérivé est l'ordre canonique
/// Monday Morning < Monday Afternoon < … < Friday Afternoon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Slot {
    pub day: Day,
    pub shift: Shift,
}

impl Slot {
    pub const COUNT: usize = 10;

    pub const ALL: [Slot; Slot::COUNT] = [
        Slot::new(Day::Monday, Shift::Morning),
        Slot::new(Day::Monday, Shift::Afternoon),
        Slot::new(Day::Tuesday, Shift::Morning),
        Slot::new(Day::Tuesday, Shift::Afternoon),
        Slot::new(Day::Wednesday, Shift::Morning),
        Slot::new(Day::Wednesday, Shift::Afternoon),
        Slot::new(Day::Thursday, Shift::Morning),
        Slot::new(Day::Thursday, Shift::Afternoon),
        Slot::new(Day::Friday, Shift::Morning),
        Slot::new(Day::Friday, Shift::Afternoon),
    ];

    pub const fn new(day: Day, shift: Shift) -> Self {
        Self { day, shift }
    }

    /// Position dans l'ordre canonique (0..10).
    pub fn index(&self) -> usize {
        self.day as usize * Shift::ALL.len() + self.shift as usize
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.day.as_str(), self.shift.as_str())
    }
}

/// Parse `"<Jour> <Shift>"` (espace ou tiret), ex. `Montag Vormittag`, `monday-morning`.
impl FromStr for Slot {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s
            .split(|c: char| c.is_whitespace() || c == '-')
            .filter(|p| !p.is_empty())
            .collect();
        let [day, shift] = parts.as_slice() else {
            return Err(LabelError::Slot(s.to_string()));
        };
        let day = day.parse().map_err(|_| LabelError::Slot(s.to_string()))?;
        let shift = shift.parse().map_err(|_| LabelError::Slot(s.to_string()))?;
        Ok(Slot::new(day, shift))
    }
}

macro_rules! string_conversions {
    ($($ty:ty),*) => {$(
        impl TryFrom<String> for $ty {
            type Error = LabelError;
            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl From<$ty> for String {
            fn from(value: $ty) -> String {
                value.to_string()
            }
        }
    )*};
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

string_conversions!(Day, Shift, Slot);

/// Libellé de jour, de demi-journée ou de créneau illisible.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LabelError {
    #[error("unknown day: {0:?}")]
    Day(String),
    #[error("unknown shift: {0:?}")]
    Shift(String),
    #[error("malformed slot label: {0:?} (expected \"<Day> <Shift>\")")]
    Slot(String),
}

/// Identifiant fort pour Area
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AreaId(String);

impl AreaId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AreaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifiant fort pour Staff
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StaffId(String);

impl StaffId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StaffId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Zone (poste) à couvrir : créneaux demandés et personnel admis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Area {
    pub id: AreaId,
    pub demand: BTreeSet<Slot>,
    pub eligible_staff: BTreeSet<StaffId>,
}

impl Area {
    pub fn requires(&self, slot: Slot) -> bool {
        self.demand.contains(&slot)
    }
    pub fn admits(&self, staff: &StaffId) -> bool {
        self.eligible_staff.contains(staff)
    }
}

/// Membre du personnel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Staff {
    pub id: StaffId,
    /// Budget hebdomadaire, une unité consommée par créneau affecté.
    pub max_hours: u32,
    pub available: BTreeSet<Slot>,
    pub qualified_areas: BTreeSet<AreaId>,
}

impl Staff {
    pub fn is_available(&self, slot: Slot) -> bool {
        self.available.contains(&slot)
    }
    pub fn is_qualified(&self, area: &AreaId) -> bool {
        self.qualified_areas.contains(area)
    }
}

/// Affectation (créneau, zone, personne)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub slot: Slot,
    pub area: AreaId,
    pub staff: StaffId,
}
