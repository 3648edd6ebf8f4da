#![allow(dead_code)]
use planning_hebdo::Config;
use serde_json::{json, Map, Value};

/// Petit constructeur de configurations JSON (clés anglaises).
#[derive(Debug, Default, Clone)]
pub struct Fixture {
    areas: Vec<String>,
    area_shifts: Map<String, Value>,
    area_staff: Map<String, Value>,
    staff: Vec<String>,
    availability: Map<String, Value>,
    staff_areas: Map<String, Value>,
    max_hours: Map<String, Value>,
    preferred: Map<String, Value>,
    rules: Option<Value>,
}

impl Fixture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn area(mut self, id: &str, week: Value, eligible: &[&str]) -> Self {
        self.areas.push(id.to_string());
        self.area_shifts.insert(id.to_string(), week);
        self.area_staff.insert(id.to_string(), json!(eligible));
        self
    }

    pub fn staff(mut self, id: &str, hours: u32, week: Value, qualified: &[&str]) -> Self {
        self.staff.push(id.to_string());
        self.availability.insert(id.to_string(), week);
        self.staff_areas.insert(id.to_string(), json!(qualified));
        self.max_hours.insert(id.to_string(), json!(hours));
        self
    }

    pub fn prefer(mut self, slot: &str, area: &str, staff: &str) -> Self {
        let entry = self
            .preferred
            .entry(slot.to_string())
            .or_insert_with(|| json!({}));
        if let Value::Object(map) = entry {
            map.insert(area.to_string(), json!(staff));
        }
        self
    }

    pub fn rules(mut self, rules: Value) -> Self {
        self.rules = Some(rules);
        self
    }

    pub fn json(&self) -> Value {
        let mut value = json!({
            "areas": self.areas,
            "staff": self.staff,
            "area_shifts": self.area_shifts,
            "area_staff": self.area_staff,
            "staff_availability": self.availability,
            "staff_areas": self.staff_areas,
            "staff_max_hours": self.max_hours,
            "preferred_plan": self.preferred,
        });
        if let (Some(rules), Value::Object(map)) = (&self.rules, &mut value) {
            map.insert("rules".to_string(), rules.clone());
        }
        value
    }

    pub fn build(&self) -> Config {
        Config::from_json_str(&self.json().to_string()).expect("fixture config must be valid")
    }
}

pub fn monday_morning() -> Value {
    json!({ "Monday": ["Morning"] })
}

pub fn full_week() -> Value {
    json!({
        "Monday": ["Morning", "Afternoon"],
        "Tuesday": ["Morning", "Afternoon"],
        "Wednesday": ["Morning", "Afternoon"],
        "Thursday": ["Morning", "Afternoon"],
        "Friday": ["Morning", "Afternoon"],
    })
}

/// Configuration réaliste d'un cabinet, avec les clés allemandes d'origine.
pub fn practice_json() -> Value {
    let ganze_woche = json!({
        "Montag": ["Vormittag", "Nachmittag"],
        "Dienstag": ["Vormittag", "Nachmittag"],
        "Mittwoch": ["Vormittag", "Nachmittag"],
        "Donnerstag": ["Vormittag", "Nachmittag"],
        "Freitag": ["Vormittag", "Nachmittag"],
    });
    json!({
        "meta": { "praxis_name": "Praxis Sonnenschein", "version": "2" },
        "bereiche": ["Rezeption 1", "Rezeption 2", "Labor", "Behandlung"],
        "mitarbeiter": ["Anna", "Berta", "Clara", "Dora", "Eva"],
        "bereich_schichten": {
            "Rezeption 1": ganze_woche,
            "Rezeption 2": {
                "Montag": ["Vormittag"],
                "Dienstag": ["Vormittag"],
                "Mittwoch": ["Vormittag"],
                "Donnerstag": ["Vormittag"],
                "Freitag": ["Vormittag"]
            },
            "Labor": {
                "Montag": ["Vormittag", "Nachmittag"],
                "Mittwoch": ["Vormittag"],
                "Freitag": ["Vormittag"]
            },
            "Behandlung": ganze_woche
        },
        "bereich_mitarbeiter": {
            "Rezeption 1": ["Anna", "Eva", "Berta"],
            "Rezeption 2": ["Berta", "Eva", "Dora"],
            "Labor": ["Clara", "Dora"],
            "Behandlung": ["Clara", "Dora", "Berta"]
        },
        "mitarbeiter_verfuegbarkeit": {
            "Anna": ganze_woche,
            "Berta": {
                "Montag": ["Vormittag", "Nachmittag"],
                "Dienstag": ["Vormittag"],
                "Mittwoch": ["Vormittag", "Nachmittag"],
                "Donnerstag": ["Vormittag"]
            },
            "Clara": ganze_woche,
            "Dora": {
                "Montag": ["Vormittag"],
                "Dienstag": ["Vormittag", "Nachmittag"],
                "Freitag": ["Vormittag", "Nachmittag"]
            },
            "Eva": {
                "Montag": ["Vormittag"],
                "Mittwoch": ["Vormittag"],
                "Freitag": ["Vormittag"]
            }
        },
        "mitarbeiter_bereiche": {
            "Anna": ["Rezeption 1"],
            "Berta": ["Rezeption 1", "Rezeption 2", "Behandlung"],
            "Clara": ["Labor", "Behandlung"],
            "Dora": ["Rezeption 2", "Labor", "Behandlung"],
            "Eva": ["Rezeption 1", "Rezeption 2"]
        },
        "mitarbeiter_max_stunden": { "Anna": 6, "Berta": 5, "Clara": 8, "Dora": 4, "Eva": 3 },
        "standard_dienstplan": {
            "Montag Vormittag": { "Rezeption 1": "Anna", "Labor": "Clara" },
            "Dienstag Vormittag": { "Behandlung": "Dora" }
        },
        "spezial_regeln": {
            "rezeption_prioritaet": "Eva",
            "defer_secondary_reception": true
        }
    })
}

pub fn practice() -> Config {
    Config::from_json_str(&practice_json().to_string()).expect("practice config must be valid")
}
