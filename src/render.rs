use crate::roster::Cell;
use crate::scheduler::{Plan, PlanStatus};
use std::fmt::Write;

/// Permet de customiser le rendu d'un planning (terminal, page imprimable, etc.).
pub trait PlanRenderer {
    fn render(&self, plan: &Plan) -> String;
}

/// Tableau texte aligné pour le terminal. Les trous de couverture sont
/// suffixés par `!`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextTable;

impl PlanRenderer for TextTable {
    fn render(&self, plan: &Plan) -> String {
        let roster = &plan.roster;
        let header: Vec<String> = std::iter::once("Slot".to_string())
            .chain(roster.areas().iter().map(|a| a.to_string()))
            .collect();
        let body: Vec<Vec<String>> = roster
            .rows()
            .iter()
            .map(|row| {
                std::iter::once(row.slot.to_string())
                    .chain(row.cells.iter().map(text_cell))
                    .collect()
            })
            .collect();

        let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
        for line in &body {
            for (width, cell) in widths.iter_mut().zip(line) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let mut out = String::new();
        for line in std::iter::once(&header).chain(&body) {
            let padded: Vec<String> = line
                .iter()
                .zip(&widths)
                .map(|(cell, &width)| format!("{cell:<width$}"))
                .collect();
            let _ = writeln!(out, "{}", padded.join(" | ").trim_end());
        }

        match plan.status {
            PlanStatus::Complete => out.push_str("\nall demand covered\n"),
            PlanStatus::Gaps { count } => {
                let _ = writeln!(out, "\n{count} coverage gap(s) marked with !");
            }
            PlanStatus::NoAssignments => out.push_str("\nno assignments possible\n"),
        }
        out
    }
}

fn text_cell(cell: &Cell) -> String {
    if cell.is_gap() {
        format!("{}!", cell.label())
    } else {
        cell.label().to_string()
    }
}

/// Page HTML autonome, imprimable. Les trous portent `class="gap"`.
#[derive(Debug, Clone)]
pub struct HtmlPage {
    pub title: String,
}

impl Default for HtmlPage {
    fn default() -> Self {
        Self {
            title: "Weekly roster".to_string(),
        }
    }
}

impl PlanRenderer for HtmlPage {
    fn render(&self, plan: &Plan) -> String {
        let title = escape_html(&self.title);
        let mut out = String::new();
        let _ = writeln!(
            out,
            "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>{title}</title>"
        );
        out.push_str(
            "<style>#roster{border-collapse:collapse;width:100%;}\
             #roster th,#roster td{border:1px solid #ddd;padding:8px;text-align:center;}\
             #roster th{background-color:#f2f2f2;font-weight:bold;}\
             #roster td.gap{background-color:#FFC7CE;}\
             @media print{body{margin:0;}}</style></head><body>\n",
        );
        let _ = writeln!(out, "<h1>{title}</h1>");
        let _ = writeln!(
            out,
            "<p>Generated: {}</p>",
            plan.generated_at.format("%d.%m.%Y %H:%M")
        );

        out.push_str("<table id=\"roster\">\n<thead><tr><th>Slot</th>");
        for area in plan.roster.areas() {
            let _ = write!(out, "<th>{}</th>", escape_html(area.as_str()));
        }
        out.push_str("</tr></thead>\n<tbody>\n");
        for row in plan.roster.rows() {
            let _ = write!(out, "<tr><th>{}</th>", row.slot);
            for cell in &row.cells {
                let class = if cell.is_gap() { " class=\"gap\"" } else { "" };
                let _ = write!(out, "<td{class}>{}</td>", escape_html(cell.label()));
            }
            out.push_str("</tr>\n");
        }
        out.push_str("</tbody>\n</table>\n</body></html>\n");
        out
    }
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
