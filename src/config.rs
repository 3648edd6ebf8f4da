use crate::model::{Area, AreaId, Day, LabelError, Shift, Slot, Staff, StaffId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Jour → liste de demi-journées, tel qu'écrit dans le fichier.
pub type RawWeek = BTreeMap<String, Vec<String>>;

/// Forme brute du fichier JSON. Les clés allemandes historiques sont acceptées en alias.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawConfig {
    #[serde(default, alias = "bereiche")]
    pub areas: Option<Vec<String>>,
    #[serde(default, alias = "mitarbeiter")]
    pub staff: Option<Vec<String>>,
    #[serde(default, alias = "bereich_schichten")]
    pub area_shifts: Option<BTreeMap<String, RawWeek>>,
    #[serde(default, alias = "bereich_mitarbeiter")]
    pub area_staff: Option<BTreeMap<String, Vec<String>>>,
    #[serde(default, alias = "mitarbeiter_verfuegbarkeit")]
    pub staff_availability: Option<BTreeMap<String, RawWeek>>,
    #[serde(default, alias = "mitarbeiter_bereiche")]
    pub staff_areas: Option<BTreeMap<String, Vec<String>>>,
    #[serde(default, alias = "mitarbeiter_max_stunden")]
    pub staff_max_hours: Option<BTreeMap<String, u32>>,
    #[serde(default, alias = "standard_dienstplan")]
    pub preferred_plan: Option<BTreeMap<String, BTreeMap<String, String>>>,
    #[serde(default, alias = "spezial_regeln")]
    pub rules: Option<RawRules>,
    #[serde(default)]
    pub meta: Option<Meta>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawRules {
    #[serde(default, alias = "rezeption_prioritaet")]
    pub reception_priority: Option<String>,
    #[serde(default)]
    pub defer_secondary_reception: bool,
    #[serde(default)]
    pub deferral_scope: DeferralScope,
    #[serde(default)]
    pub reception_prefixes: Option<Vec<String>>,
    #[serde(default)]
    pub secondary_reception_areas: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    #[serde(default, alias = "praxis_name")]
    pub practice_name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

/// Quelles zones ouvertes font passer une réception secondaire en dernier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeferralScope {
    /// Toute zone qui n'est pas elle-même une réception secondaire.
    #[default]
    AllOtherAreas,
    /// Seulement les zones hors réception.
    NonReceptionOnly,
}

/// Règles spéciales (priorité réception, report de la réception secondaire).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rules {
    pub reception_priority: Option<StaffId>,
    pub defer_secondary_reception: bool,
    pub deferral_scope: DeferralScope,
    pub reception_prefixes: Vec<String>,
    pub secondary_reception_areas: BTreeSet<AreaId>,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            reception_priority: None,
            defer_secondary_reception: false,
            deferral_scope: DeferralScope::default(),
            reception_prefixes: default_reception_prefixes(),
            secondary_reception_areas: BTreeSet::new(),
        }
    }
}

fn default_reception_prefixes() -> Vec<String> {
    vec!["Rezeption".to_string(), "Reception".to_string()]
}

impl Rules {
    /// Zone de réception : l'identifiant commence par un des préfixes (casse ignorée).
    pub fn is_reception(&self, area: &AreaId) -> bool {
        let id = area.as_str().to_lowercase();
        self.reception_prefixes
            .iter()
            .any(|prefix| id.starts_with(&prefix.to_lowercase()))
    }

    /// Réception secondaire : liste explicite si fournie, sinon réception
    /// dont le numéro final est >= 2 (`Rezeption 2`, `Reception-3`).
    pub fn is_secondary_reception(&self, area: &AreaId) -> bool {
        if !self.secondary_reception_areas.is_empty() {
            return self.secondary_reception_areas.contains(area);
        }
        self.is_reception(area) && trailing_number(area.as_str()).is_some_and(|n| n >= 2)
    }

    /// Une zone ouverte avec candidats repousse-t-elle les réceptions secondaires ?
    pub fn defers_secondary_behind(&self, area: &AreaId) -> bool {
        if self.is_secondary_reception(area) {
            return false;
        }
        match self.deferral_scope {
            DeferralScope::AllOtherAreas => true,
            DeferralScope::NonReceptionOnly => !self.is_reception(area),
        }
    }
}

fn trailing_number(id: &str) -> Option<u32> {
    let digits: String = id
        .chars()
        .rev()
        .take_while(char::is_ascii_digit)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    digits.parse().ok()
}

/// Configuration validée et immuable.
#[derive(Debug, Clone)]
pub struct Config {
    meta: Meta,
    areas: Vec<Area>,
    staff: Vec<Staff>,
    preferred: BTreeMap<(Slot, AreaId), StaffId>,
    rules: Rules,
}

impl Config {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = serde_json::from_str(json)?;
        Self::try_from(raw)
    }

    pub fn meta(&self) -> &Meta {
        &self.meta
    }
    /// Zones dans l'ordre du fichier.
    pub fn areas(&self) -> &[Area] {
        &self.areas
    }
    /// Personnel dans l'ordre du fichier.
    pub fn staff(&self) -> &[Staff] {
        &self.staff
    }
    pub fn rules(&self) -> &Rules {
        &self.rules
    }
    pub fn area(&self, id: &AreaId) -> Option<&Area> {
        self.areas.iter().find(|a| &a.id == id)
    }
    pub fn staff_member(&self, id: &StaffId) -> Option<&Staff> {
        self.staff.iter().find(|s| &s.id == id)
    }
    /// Affectation standard prévue pour (créneau, zone), si configurée.
    pub fn preferred(&self, slot: Slot, area: &AreaId) -> Option<&StaffId> {
        self.preferred.get(&(slot, area.clone()))
    }
    pub fn preferred_len(&self) -> usize {
        self.preferred.len()
    }
}

impl TryFrom<RawConfig> for Config {
    type Error = ConfigError;

    fn try_from(raw: RawConfig) -> Result<Self, Self::Error> {
        validate(raw).map_err(ConfigError::Invalid)
    }
}

pub fn load_config_from_file<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let data = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Config::from_json_str(&data)
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("reading config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("parsing config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid configuration ({} problem(s))", .0.len())]
    Invalid(Vec<ConfigProblem>),
}

impl ConfigError {
    /// Problèmes de validation (vide pour une erreur d'I/O ou de syntaxe).
    pub fn problems(&self) -> &[ConfigProblem] {
        match self {
            ConfigError::Invalid(problems) => problems,
            _ => &[],
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigProblem {
    #[error("missing required key: {0}")]
    MissingKey(&'static str),
    #[error("duplicate area: {0:?}")]
    DuplicateArea(String),
    #[error("duplicate staff member: {0:?}")]
    DuplicateStaff(String),
    #[error("area {0:?} missing from area_shifts")]
    AreaWithoutShifts(String),
    #[error("staff member {staff:?} missing from {key}")]
    StaffMissingFrom { staff: String, key: &'static str },
    #[error("{context}: unknown area {area:?}")]
    UnknownArea { context: String, area: String },
    #[error("{context}: unknown staff member {staff:?}")]
    UnknownStaff { context: String, staff: String },
    #[error("{context}: {source}")]
    Label { context: String, source: LabelError },
    #[error("preferred_plan: {slot} / {area:?} pinned to both {first:?} and {second:?}")]
    ConflictingPreferred {
        slot: Slot,
        area: String,
        first: String,
        second: String,
    },
}

fn required<T>(value: Option<T>, key: &'static str, problems: &mut Vec<ConfigProblem>) -> Option<T> {
    if value.is_none() {
        problems.push(ConfigProblem::MissingKey(key));
    }
    value
}

fn validate(raw: RawConfig) -> Result<Config, Vec<ConfigProblem>> {
    let mut problems = Vec::new();

    let areas = required(raw.areas, "areas", &mut problems);
    let staff = required(raw.staff, "staff", &mut problems);
    let area_shifts = required(raw.area_shifts, "area_shifts", &mut problems);
    let area_staff = required(raw.area_staff, "area_staff", &mut problems);
    let availability = required(raw.staff_availability, "staff_availability", &mut problems);
    let staff_areas = required(raw.staff_areas, "staff_areas", &mut problems);
    let max_hours = required(raw.staff_max_hours, "staff_max_hours", &mut problems);

    let (
        Some(areas),
        Some(staff),
        Some(area_shifts),
        Some(area_staff),
        Some(availability),
        Some(staff_areas),
        Some(max_hours),
    ) = (areas, staff, area_shifts, area_staff, availability, staff_areas, max_hours)
    else {
        return Err(problems);
    };

    let mut known_areas = BTreeSet::new();
    for area in &areas {
        if !known_areas.insert(area.as_str()) {
            problems.push(ConfigProblem::DuplicateArea(area.clone()));
        }
    }
    let mut known_staff = BTreeSet::new();
    for member in &staff {
        if !known_staff.insert(member.as_str()) {
            problems.push(ConfigProblem::DuplicateStaff(member.clone()));
        }
    }

    let check_area = |context: String, area: &str, problems: &mut Vec<ConfigProblem>| {
        if !known_areas.contains(area) {
            problems.push(ConfigProblem::UnknownArea {
                context,
                area: area.to_string(),
            });
        }
    };
    let check_staff = |context: String, member: &str, problems: &mut Vec<ConfigProblem>| {
        if !known_staff.contains(member) {
            problems.push(ConfigProblem::UnknownStaff {
                context,
                staff: member.to_string(),
            });
        }
    };

    for area in &areas {
        if !area_shifts.contains_key(area) {
            problems.push(ConfigProblem::AreaWithoutShifts(area.clone()));
        }
    }
    for area in area_shifts.keys() {
        check_area("area_shifts".into(), area, &mut problems);
    }
    for (area, members) in &area_staff {
        check_area("area_staff".into(), area, &mut problems);
        for member in members {
            check_staff(format!("area_staff[{area}]"), member, &mut problems);
        }
    }

    for member in &staff {
        for (key, present) in [
            ("staff_availability", availability.contains_key(member)),
            ("staff_areas", staff_areas.contains_key(member)),
            ("staff_max_hours", max_hours.contains_key(member)),
        ] {
            if !present {
                problems.push(ConfigProblem::StaffMissingFrom {
                    staff: member.clone(),
                    key,
                });
            }
        }
    }
    for member in availability.keys() {
        check_staff("staff_availability".into(), member, &mut problems);
    }
    for member in max_hours.keys() {
        check_staff("staff_max_hours".into(), member, &mut problems);
    }
    for (member, qualified) in &staff_areas {
        check_staff("staff_areas".into(), member, &mut problems);
        for area in qualified {
            check_area(format!("staff_areas[{member}]"), area, &mut problems);
        }
    }

    let mut preferred = BTreeMap::new();
    for (label, by_area) in raw.preferred_plan.unwrap_or_default() {
        let slot = match label.parse::<Slot>() {
            Ok(slot) => Some(slot),
            Err(source) => {
                problems.push(ConfigProblem::Label {
                    context: "preferred_plan".into(),
                    source,
                });
                None
            }
        };
        for (area, member) in by_area {
            check_area(format!("preferred_plan[{label}]"), &area, &mut problems);
            check_staff(format!("preferred_plan[{label}][{area}]"), &member, &mut problems);
            let Some(slot) = slot else { continue };
            let pinned = StaffId::new(&member);
            // "Monday Morning" et "Montag Vormittag" désignent le même créneau.
            if let Some(previous) = preferred.insert((slot, AreaId::new(&area)), pinned.clone()) {
                if previous != pinned {
                    problems.push(ConfigProblem::ConflictingPreferred {
                        slot,
                        area,
                        first: previous.to_string(),
                        second: member,
                    });
                }
            }
        }
    }

    let raw_rules = raw.rules.unwrap_or_default();
    if let Some(member) = &raw_rules.reception_priority {
        check_staff("rules.reception_priority".into(), member, &mut problems);
    }
    for area in &raw_rules.secondary_reception_areas {
        check_area("rules.secondary_reception_areas".into(), area, &mut problems);
    }

    let typed_areas: Vec<Area> = areas
        .iter()
        .map(|id| Area {
            id: AreaId::new(id),
            demand: area_shifts
                .get(id)
                .map(|week| parse_week(week, &format!("area_shifts[{id}]"), &mut problems))
                .unwrap_or_default(),
            eligible_staff: area_staff
                .get(id)
                .map(|members| members.iter().map(StaffId::new).collect())
                .unwrap_or_default(),
        })
        .collect();

    let typed_staff: Vec<Staff> = staff
        .iter()
        .map(|id| Staff {
            id: StaffId::new(id),
            max_hours: max_hours.get(id).copied().unwrap_or_default(),
            available: availability
                .get(id)
                .map(|week| parse_week(week, &format!("staff_availability[{id}]"), &mut problems))
                .unwrap_or_default(),
            qualified_areas: staff_areas
                .get(id)
                .map(|qualified| qualified.iter().map(AreaId::new).collect())
                .unwrap_or_default(),
        })
        .collect();

    if !problems.is_empty() {
        return Err(problems);
    }

    Ok(Config {
        meta: raw.meta.unwrap_or_default(),
        areas: typed_areas,
        staff: typed_staff,
        preferred,
        rules: Rules {
            reception_priority: raw_rules.reception_priority.map(StaffId::new),
            defer_secondary_reception: raw_rules.defer_secondary_reception,
            deferral_scope: raw_rules.deferral_scope,
            reception_prefixes: raw_rules
                .reception_prefixes
                .unwrap_or_else(default_reception_prefixes),
            secondary_reception_areas: raw_rules
                .secondary_reception_areas
                .iter()
                .map(AreaId::new)
                .collect(),
        },
    })
}

/// Convertit `{ "Montag": ["Vormittag"] }` en ensemble de créneaux.
fn parse_week(week: &RawWeek, context: &str, problems: &mut Vec<ConfigProblem>) -> BTreeSet<Slot> {
    let mut slots = BTreeSet::new();
    for (day, shifts) in week {
        let day = match day.parse::<Day>() {
            Ok(day) => day,
            Err(source) => {
                problems.push(ConfigProblem::Label {
                    context: context.to_string(),
                    source,
                });
                continue;
            }
        };
        for shift in shifts {
            match shift.parse::<Shift>() {
                Ok(shift) => {
                    slots.insert(Slot::new(day, shift));
                }
                Err(source) => problems.push(ConfigProblem::Label {
                    context: context.to_string(),
                    source,
                }),
            }
        }
    }
    slots
}
