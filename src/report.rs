use std::fmt::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::models::{Discrepancy, Student, SummaryReport};
use crate::stats::{self, Category};

/// Ranked entries kept per category.
const TOP_N: usize = 3;

/// Assemble the one report value both output modes read from.
pub fn build_report(students: &[Student], discrepancies: Vec<Discrepancy>) -> SummaryReport {
    let top_students = Category::ALL
        .iter()
        .map(|&category| {
            (
                category.label().to_string(),
                stats::top_students(students, category, TOP_N),
            )
        })
        .collect();

    SummaryReport {
        general_averages: stats::general_averages(students),
        branch_averages: stats::branch_averages(students),
        top_students,
        discrepancies,
    }
}

pub fn render_console(report: &SummaryReport) -> String {
    let mut output = String::new();
    let averages = &report.general_averages;

    let _ = writeln!(output, "General Averages:");
    let _ = writeln!(output, "Quiz: {:.2}", averages.quiz);
    let _ = writeln!(output, "Mid-Sem: {:.2}", averages.mid_sem);
    let _ = writeln!(output, "Lab Test: {:.2}", averages.lab_test);
    let _ = writeln!(output, "Weekly Labs: {:.2}", averages.weekly_labs);
    let _ = writeln!(output, "Pre-Compre: {:.2}", averages.pre_compre);
    let _ = writeln!(output, "Compre: {:.2}", averages.compre);
    let _ = writeln!(output, "Overall Total: {:.2}", averages.total);

    let _ = writeln!(output);
    let _ = writeln!(output, "Branch-wise Averages (2024 Batch):");
    for (code, average) in &report.branch_averages {
        let _ = writeln!(output, "Branch {}: {:.2}", code, average);
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "Top 3 Students for Each Category:");
    for category in Category::ALL {
        let _ = writeln!(output);
        let _ = writeln!(output, "{}:", category.label());
        if let Some(rankings) = report.top_students.get(category.label()) {
            for entry in rankings {
                let _ = writeln!(
                    output,
                    "{}. EmplID: {}, Marks: {:.2}",
                    entry.rank, entry.empl_id, entry.marks
                );
            }
        }
    }

    output
}

/// Sibling of the input file, extension replaced by `_report.json`:
/// `scores.xlsx` becomes `scores_report.json`.
pub fn export_path(input: &Path) -> PathBuf {
    let mut name = input.file_stem().unwrap_or(input.as_os_str()).to_os_string();
    name.push("_report.json");
    input.with_file_name(name)
}

pub fn write_json(report: &SummaryReport, path: &Path) -> anyhow::Result<()> {
    let payload =
        serde_json::to_string_pretty(report).context("failed to serialize the report to JSON")?;
    std::fs::write(path, payload)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_student(empl_id: &str, campus_id: &str, quiz: f64, total: f64) -> Student {
        Student {
            empl_id: empl_id.to_string(),
            campus_id: campus_id.to_string(),
            quiz,
            mid_sem: 0.0,
            lab_test: 0.0,
            weekly_labs: 0.0,
            pre_compre: 0.0,
            compre: 0.0,
            total,
        }
    }

    #[test]
    fn report_carries_all_seven_categories() {
        let students = vec![sample_student("E001", "2024CS001", 8.0, 8.0)];
        let report = build_report(&students, Vec::new());
        assert_eq!(report.top_students.len(), 7);
        for category in Category::ALL {
            assert!(report.top_students.contains_key(category.label()));
        }
    }

    #[test]
    fn console_sections_come_out_in_order() {
        let students = vec![
            sample_student("E001", "2024CS001", 8.0, 90.0),
            sample_student("E002", "2024EE001", 6.0, 70.0),
        ];
        let report = build_report(&students, Vec::new());
        let text = render_console(&report);

        let general = text.find("General Averages:").unwrap();
        let branches = text.find("Branch-wise Averages (2024 Batch):").unwrap();
        let top = text.find("Top 3 Students for Each Category:").unwrap();
        assert!(general < branches && branches < top);

        assert!(text.contains("Quiz: 7.00"));
        assert!(text.contains("Overall Total: 80.00"));
        // branch lines are sorted by code
        let cs = text.find("Branch CS: 90.00").unwrap();
        let ee = text.find("Branch EE: 70.00").unwrap();
        assert!(cs < ee);
        assert!(text.contains("1. EmplID: E001, Marks: 90.00"));
    }

    #[test]
    fn console_and_export_read_the_same_averages() {
        let students = vec![
            sample_student("E001", "2024CS001", 5.0, 60.0),
            sample_student("E002", "2024CS002", 10.0, 80.0),
        ];
        let report = build_report(&students, Vec::new());
        let text = render_console(&report);
        let json = serde_json::to_value(&report).unwrap();

        assert!(text.contains("Quiz: 7.50"));
        assert_eq!(json["generalAverages"]["quiz"], 7.5);
        assert_eq!(json["branchAverages"]["CS"], 70.0);
        assert_eq!(json["topStudents"]["Total"][0]["emplID"], "E002");
        assert_eq!(json["topStudents"]["Total"][0]["rank"], 1);
    }

    #[test]
    fn export_uses_the_original_field_names() {
        let report = build_report(
            &[],
            vec![Discrepancy {
                empl_id: "E001".to_string(),
                expected_total: 50.0,
                actual_total: 60.0,
            }],
        );
        let json = serde_json::to_string(&report).unwrap();
        for field in [
            "generalAverages",
            "branchAverages",
            "topStudents",
            "discrepancies",
            "midSem",
            "labTest",
            "weeklyLabs",
            "preCompre",
            "emplID",
            "expectedTotal",
            "actualTotal",
        ] {
            assert!(json.contains(&format!("\"{field}\"")), "missing {field}");
        }
    }

    #[test]
    fn empty_roster_renders_a_well_defined_report() {
        let report = build_report(&[], Vec::new());
        assert!(report.branch_averages.is_empty());
        assert!(report.discrepancies.is_empty());
        assert!(report.top_students.values().all(|rankings| rankings.is_empty()));

        let text = render_console(&report);
        assert!(text.contains("Quiz: 0.00"));
        assert!(text.contains("Overall Total: 0.00"));
        assert!(text.contains("Top 3 Students for Each Category:"));
    }

    #[test]
    fn export_path_replaces_the_extension() {
        assert_eq!(
            export_path(Path::new("scores.xlsx")),
            PathBuf::from("scores_report.json")
        );
        assert_eq!(
            export_path(Path::new("data/fall/marks.csv")),
            PathBuf::from("data/fall/marks_report.json")
        );
        assert_eq!(
            export_path(Path::new("marks")),
            PathBuf::from("marks_report.json")
        );
    }
}
