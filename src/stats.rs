use std::collections::BTreeMap;

use crate::models::{CategoryAverages, Student, StudentRanking};

/// The batch whose students are grouped into branch cohorts.
const COHORT_BATCH: &str = "2024";

/// The seven scoring categories. The set is closed, so a selector per
/// variant stands in for the label-to-accessor table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Quiz,
    MidSem,
    LabTest,
    WeeklyLabs,
    PreCompre,
    Compre,
    Total,
}

impl Category {
    /// Report order.
    pub const ALL: [Category; 7] = [
        Category::Quiz,
        Category::MidSem,
        Category::LabTest,
        Category::WeeklyLabs,
        Category::PreCompre,
        Category::Compre,
        Category::Total,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Quiz => "Quiz",
            Category::MidSem => "Mid-Sem",
            Category::LabTest => "Lab Test",
            Category::WeeklyLabs => "Weekly Labs",
            Category::PreCompre => "Pre-Compre",
            Category::Compre => "Compre",
            Category::Total => "Total",
        }
    }

    pub fn score(self, student: &Student) -> f64 {
        match self {
            Category::Quiz => student.quiz,
            Category::MidSem => student.mid_sem,
            Category::LabTest => student.lab_test,
            Category::WeeklyLabs => student.weekly_labs,
            Category::PreCompre => student.pre_compre,
            Category::Compre => student.compre,
            Category::Total => student.total,
        }
    }
}

/// Branch code for cohort grouping: the two characters after the batch
/// year on ids of the form "2024XX...". Students without one still count
/// toward the general averages.
pub fn branch_code(campus_id: &str) -> Option<&str> {
    if !campus_id.starts_with(COHORT_BATCH) {
        return None;
    }
    campus_id.get(COHORT_BATCH.len()..COHORT_BATCH.len() + 2)
}

/// Per-category mean across all valid students. An empty roster reports
/// 0.0 for every category rather than dividing by zero.
pub fn general_averages(students: &[Student]) -> CategoryAverages {
    if students.is_empty() {
        return CategoryAverages::default();
    }

    let count = students.len() as f64;
    let mean =
        |category: Category| students.iter().map(|s| category.score(s)).sum::<f64>() / count;

    CategoryAverages {
        quiz: mean(Category::Quiz),
        mid_sem: mean(Category::MidSem),
        lab_test: mean(Category::LabTest),
        weekly_labs: mean(Category::WeeklyLabs),
        pre_compre: mean(Category::PreCompre),
        compre: mean(Category::Compre),
        total: mean(Category::Total),
    }
}

/// Mean total per branch, over current-batch students only.
pub fn branch_averages(students: &[Student]) -> BTreeMap<String, f64> {
    let mut buckets: BTreeMap<String, Vec<f64>> = BTreeMap::new();

    for student in students {
        if let Some(code) = branch_code(&student.campus_id) {
            buckets.entry(code.to_string()).or_default().push(student.total);
        }
    }

    buckets
        .into_iter()
        .map(|(code, totals)| {
            let average = totals.iter().sum::<f64>() / totals.len() as f64;
            (code, average)
        })
        .collect()
}

/// Top `limit` students for one category, rank 1-based, marks descending.
/// Sorts a per-category view so the base list is never reordered. The
/// sort is stable: tied students keep their sheet order.
pub fn top_students(students: &[Student], category: Category, limit: usize) -> Vec<StudentRanking> {
    let mut ordered: Vec<&Student> = students.iter().collect();
    ordered.sort_by(|a, b| {
        category
            .score(b)
            .partial_cmp(&category.score(a))
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    ordered
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(index, student)| StudentRanking {
            empl_id: student.empl_id.clone(),
            marks: category.score(student),
            rank: index + 1,
        })
        .collect()
}
