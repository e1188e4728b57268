//! Analysis report and the static learning resources per category.

use serde::{Deserialize, Serialize};

use crate::classifier::SkillCategory;

const BEGINNER_RESOURCES: [&str; 3] = [
    "Chess Basics Tutorial",
    "Pawn Structure Strategies",
    "Opening Principles",
];
const INTERMEDIATE_RESOURCES: [&str; 3] = [
    "Tactics Training",
    "Middle Game Planning",
    "Endgame Essentials",
];
const EXPERT_RESOURCES: [&str; 3] = [
    "Advanced Tactics and Combinations",
    "Strategic Planning",
    "Endgame Mastery",
];
const PROFESSIONAL_RESOURCES: [&str; 3] = [
    "Grandmaster Game Analysis",
    "Advanced Opening Theory",
    "Positional Sacrifices",
];

/// Study material for a category name; unknown names get an empty list.
pub fn learning_resources(category: &str) -> &'static [&'static str] {
    match category.parse::<SkillCategory>() {
        Ok(category) => resources_for(category),
        Err(_) => &[],
    }
}

pub fn resources_for(category: SkillCategory) -> &'static [&'static str] {
    match category {
        SkillCategory::Beginner => &BEGINNER_RESOURCES,
        SkillCategory::Intermediate => &INTERMEDIATE_RESOURCES,
        SkillCategory::Professional => &PROFESSIONAL_RESOURCES,
        SkillCategory::Expert => &EXPERT_RESOURCES,
    }
}

/// Outcome of one analysis run, handed to whatever renders it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Designated-side moves, including ones without a finite score.
    pub total_moves: u32,
    /// Mean of the normalized loss centroids.
    pub average_centroid: f64,
    pub category: SkillCategory,
    pub learning_resources: Vec<String>,
    pub player_color: String,
    pub games_analyzed: usize,
    /// Moves that contributed a loss value.
    pub scored_moves: usize,
}

impl AnalysisReport {
    pub fn assemble(
        total_moves: u32,
        average_centroid: f64,
        category: SkillCategory,
        player_color: &str,
        games_analyzed: usize,
        scored_moves: usize,
    ) -> Self {
        Self {
            total_moves,
            average_centroid,
            category,
            learning_resources: learning_resources(category.name())
                .iter()
                .map(|s| s.to_string())
                .collect(),
            player_color: player_color.to_string(),
            games_analyzed,
            scored_moves,
        }
    }

    /// Generate a text report
    pub fn generate_report(&self) -> String {
        let mut report = String::new();
        report.push_str(&format!("=== Skill analysis ({}) ===\n\n", self.player_color));
        report.push_str(&format!("Games analyzed:   {}\n", self.games_analyzed));
        report.push_str(&format!(
            "Moves analyzed:   {} ({} scored)\n",
            self.total_moves, self.scored_moves
        ));
        report.push_str(&format!("Average centroid: {:.4}\n", self.average_centroid));
        report.push_str(&format!("Category:         {}\n\n", self.category));

        report.push_str("Learning resources:\n");
        for resource in &self.learning_resources {
            report.push_str(&format!("  - {resource}\n"));
        }
        report
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod report_tests;
