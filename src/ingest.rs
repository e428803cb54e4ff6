use std::path::Path;

use anyhow::Context;

use crate::models::{Discrepancy, Student};

/// Rows with fewer cells than this are incomplete and skipped outright.
const MIN_COLUMNS: usize = 11;

#[derive(Debug, Default)]
pub struct Roster {
    pub students: Vec<Student>,
    pub discrepancies: Vec<Discrepancy>,
}

fn parse_score(cell: &str) -> f64 {
    // dirty cells count as zero rather than failing the row
    cell.parse().unwrap_or(0.0)
}

/// `None` means the row is incomplete; a partial record is never emitted.
pub fn parse_row(cells: &[String]) -> Option<Student> {
    if cells.len() < MIN_COLUMNS {
        return None;
    }

    Some(Student {
        empl_id: cells[2].clone(),
        campus_id: cells[3].clone(),
        quiz: parse_score(&cells[4]),
        mid_sem: parse_score(&cells[5]),
        lab_test: parse_score(&cells[6]),
        weekly_labs: parse_score(&cells[7]),
        pre_compre: parse_score(&cells[8]),
        compre: parse_score(&cells[9]),
        total: parse_score(&cells[10]),
    })
}

/// The total a row should carry. Pre-compre is excluded: it is already
/// folded into the comprehensive score.
pub fn expected_total(student: &Student) -> f64 {
    student.quiz + student.mid_sem + student.lab_test + student.weekly_labs + student.compre
}

/// Consume every row of the sheet. The first row is always the header,
/// whatever it contains. Totals are compared with exact equality (sheet
/// values are clean decimals); mismatches are recorded, not corrected.
pub fn collect_roster<I>(rows: I) -> Roster
where
    I: IntoIterator<Item = Vec<String>>,
{
    let mut roster = Roster::default();

    for (index, cells) in rows.into_iter().enumerate() {
        if index == 0 {
            continue;
        }
        let Some(student) = parse_row(&cells) else {
            continue;
        };

        let expected = expected_total(&student);
        if expected != student.total {
            roster.discrepancies.push(Discrepancy {
                empl_id: student.empl_id.clone(),
                expected_total: expected,
                actual_total: student.total,
            });
        }

        roster.students.push(student);
    }

    roster
}

pub fn load_roster(path: &Path) -> anyhow::Result<Roster> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record =
            record.with_context(|| format!("failed to read a row from {}", path.display()))?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(collect_roster(rows))
}
