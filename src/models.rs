use std::collections::BTreeMap;

use serde::Serialize;

#[derive(Debug, Clone)]
pub struct Student {
    pub empl_id: String,
    pub campus_id: String,
    pub quiz: f64,
    pub mid_sem: f64,
    pub lab_test: f64,
    pub weekly_labs: f64,
    pub pre_compre: f64,
    pub compre: f64,
    pub total: f64,
}

/// One entry per row whose recorded total disagrees with the recomputed
/// total; never deduplicated.
#[derive(Debug, Clone, Serialize)]
pub struct Discrepancy {
    #[serde(rename = "emplID")]
    pub empl_id: String,
    #[serde(rename = "expectedTotal")]
    pub expected_total: f64,
    #[serde(rename = "actualTotal")]
    pub actual_total: f64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CategoryAverages {
    pub quiz: f64,
    #[serde(rename = "midSem")]
    pub mid_sem: f64,
    #[serde(rename = "labTest")]
    pub lab_test: f64,
    #[serde(rename = "weeklyLabs")]
    pub weekly_labs: f64,
    #[serde(rename = "preCompre")]
    pub pre_compre: f64,
    pub compre: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct StudentRanking {
    #[serde(rename = "emplID")]
    pub empl_id: String,
    pub marks: f64,
    pub rank: usize,
}

/// Terminal aggregate of one run; the console rendering and the JSON
/// export both read from this one value. BTreeMaps keep branch lines and
/// export keys in a stable order.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryReport {
    #[serde(rename = "generalAverages")]
    pub general_averages: CategoryAverages,
    #[serde(rename = "branchAverages")]
    pub branch_averages: BTreeMap<String, f64>,
    #[serde(rename = "topStudents")]
    pub top_students: BTreeMap<String, Vec<StudentRanking>>,
    pub discrepancies: Vec<Discrepancy>,
}
