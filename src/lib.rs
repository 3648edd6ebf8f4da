#![forbid(unsafe_code)]
//! Planning hebdo : génération locale d'un planning de cabinet (sans BD).
//!
//! - Configuration JSON validée d'un bloc (toutes les erreurs remontées ensemble).
//! - Passe « planning standard » puis remplissage glouton par rareté.
//! - Grille créneau × zone avec marquage des trous de couverture.
//! - Exports CSV / JSON / HTML en dehors du moteur.

pub mod config;
pub mod demand;
pub mod io;
pub mod model;
pub mod render;
pub mod roster;
pub mod scheduler;

pub use config::{
    load_config_from_file, Config, ConfigError, ConfigProblem, DeferralScope, Meta, RawConfig,
    Rules,
};
pub use demand::DemandMatrix;
pub use model::{Area, AreaId, Assignment, Day, Shift, Slot, Staff, StaffId};
pub use render::{HtmlPage, PlanRenderer, TextTable};
pub use roster::{Cell, Roster, UNFILLED};
pub use scheduler::{HourBudget, Plan, PlanStatus, SchedError, Scheduler, Selection};
