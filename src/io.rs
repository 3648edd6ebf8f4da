use crate::model::Assignment;
use crate::render::PlanRenderer;
use crate::roster::Roster;
use crate::scheduler::Plan;
use anyhow::Context;
use chrono::{DateTime, Utc};
use csv::WriterBuilder;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Grille CSV : header `Slot,<zone…>`, une ligne par créneau, `-` si vide.
pub fn write_roster_csv<W: Write>(writer: W, roster: &Roster) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().from_writer(writer);
    let mut header = vec!["Slot"];
    header.extend(roster.areas().iter().map(|a| a.as_str()));
    w.write_record(&header)?;
    for row in roster.rows() {
        let slot = row.slot.to_string();
        let mut record = vec![slot.as_str()];
        record.extend(row.cells.iter().map(|c| c.label()));
        w.write_record(&record)?;
    }
    w.flush()?;
    Ok(())
}

/// Affectations brutes : header `slot,area,staff`
pub fn write_assignments_csv<W: Write>(writer: W, assignments: &[Assignment]) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().from_writer(writer);
    w.write_record(["slot", "area", "staff"])?;
    for a in assignments {
        let slot = a.slot.to_string();
        w.write_record([slot.as_str(), a.area.as_str(), a.staff.as_str()])?;
    }
    w.flush()?;
    Ok(())
}

pub fn export_roster_csv<P: AsRef<Path>>(path: P, roster: &Roster) -> anyhow::Result<()> {
    let mut buf = Vec::new();
    write_roster_csv(&mut buf, roster)?;
    write_atomic(path, &buf)
}

pub fn export_assignments_csv<P: AsRef<Path>>(path: P, plan: &Plan) -> anyhow::Result<()> {
    let mut buf = Vec::new();
    write_assignments_csv(&mut buf, &plan.assignments)?;
    write_atomic(path, &buf)
}

/// Export JSON du plan complet (jolie mise en forme)
pub fn export_plan_json<P: AsRef<Path>>(path: P, plan: &Plan) -> anyhow::Result<()> {
    let json = serde_json::to_vec_pretty(plan)?;
    write_atomic(path, &json)
}

/// Classeur xlsx : feuille `Dienstplan` (grille, trous demandés sur fond
/// rouge) puis feuille `Raw_Data` (une ligne par affectation).
pub fn write_roster_xlsx(plan: &Plan) -> anyhow::Result<Vec<u8>> {
    let header = Format::new()
        .set_bold()
        .set_text_wrap()
        .set_align(FormatAlign::Top)
        .set_background_color(Color::RGB(0xD7E4BC))
        .set_border(FormatBorder::Thin);
    let cell = Format::new()
        .set_text_wrap()
        .set_align(FormatAlign::Top)
        .set_border(FormatBorder::Thin);
    let gap = cell.clone().set_background_color(Color::RGB(0xFFC7CE));

    let mut workbook = Workbook::new();

    let grid = workbook.add_worksheet().set_name("Dienstplan")?;
    grid.set_column_width(0, 20.0)?;
    grid.write_string_with_format(0, 0, "Slot", &header)?;
    for (col, area) in (1u16..).zip(plan.roster.areas()) {
        grid.set_column_width(col, 14.0)?;
        grid.write_string_with_format(0, col, area.as_str(), &header)?;
    }
    for (row, line) in (1u32..).zip(plan.roster.rows()) {
        grid.write_string_with_format(row, 0, line.slot.to_string(), &header)?;
        for (col, value) in (1u16..).zip(&line.cells) {
            let format = if value.is_gap() { &gap } else { &cell };
            grid.write_string_with_format(row, col, value.label(), format)?;
        }
    }

    let raw = workbook.add_worksheet().set_name("Raw_Data")?;
    for (col, title) in (0u16..).zip(["slot", "area", "staff"]) {
        raw.write_string_with_format(0, col, title, &header)?;
    }
    for (row, a) in (1u32..).zip(&plan.assignments) {
        raw.write_string(row, 0, a.slot.to_string())?;
        raw.write_string(row, 1, a.area.as_str())?;
        raw.write_string(row, 2, a.staff.as_str())?;
    }

    Ok(workbook.save_to_buffer()?)
}

pub fn export_roster_xlsx<P: AsRef<Path>>(path: P, plan: &Plan) -> anyhow::Result<()> {
    let bytes = write_roster_xlsx(plan)?;
    write_atomic(path, &bytes)
}

pub fn export_rendered<P: AsRef<Path>>(
    path: P,
    plan: &Plan,
    renderer: &dyn PlanRenderer,
) -> anyhow::Result<()> {
    write_atomic(path, renderer.render(plan).as_bytes())
}

/// Nom de fichier horodaté, ex. `roster_20251024_0930.csv`.
pub fn timestamped_file_name(stem: &str, extension: &str, at: DateTime<Utc>) -> String {
    format!("{stem}_{}.{extension}", at.format("%Y%m%d_%H%M"))
}

/// Écriture atomique : fichier temporaire dans le même dossier puis rename.
pub fn write_atomic<P: AsRef<Path>>(path: P, bytes: &[u8]) -> anyhow::Result<()> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("creating temp file in {}", dir.display()))?;
    tmp.write_all(bytes)?;
    tmp.flush()?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)
        .with_context(|| format!("atomic rename to {}", path.display()))?;
    Ok(())
}
