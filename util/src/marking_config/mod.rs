use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

use crate::paths::{ensure_parent_dir, marking_config_path};

/// How the student parser treats lines that hold more than one answer anchor.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ParseMode {
    /// Marking mode: numbered anchors only, or the first bare anchor of a chatty line.
    FirstAnchor,
    /// Renumbering mode: every anchor on the line.
    LineGreedy,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ComparisonScheme {
    Canonical,
    Exact,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackScheme {
    Auto,
    Summary,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MarkingOptions {
    #[serde(default = "default_parse_mode")]
    pub parse_mode: ParseMode,

    #[serde(default = "default_comparison")]
    pub comparison: ComparisonScheme,

    #[serde(default = "default_feedback_scheme")]
    pub feedback_scheme: FeedbackScheme,

    /// Minimum percentage at which the reference answer link is released (0–100).
    #[serde(default = "default_pass_mark")]
    pub pass_mark: u32,
}

impl Default for MarkingOptions {
    fn default() -> Self {
        Self {
            parse_mode: default_parse_mode(),
            comparison: default_comparison(),
            feedback_scheme: default_feedback_scheme(),
            pass_mark: default_pass_mark(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct FeedbackOptions {
    #[serde(default = "default_min_words")]
    pub min_words: usize,

    #[serde(default = "default_max_words")]
    pub max_words: usize,

    /// Upper bound on wrong items named in the feedback.
    #[serde(default = "default_max_listed_items")]
    pub max_listed_items: usize,

    /// Course level named in the opening sentence ("Good effort for A1 objectives").
    #[serde(default = "default_level_label")]
    pub level_label: String,

    #[serde(default = "default_tips")]
    pub tips: Vec<String>,
}

impl Default for FeedbackOptions {
    fn default() -> Self {
        Self {
            min_words: default_min_words(),
            max_words: default_max_words(),
            max_listed_items: default_max_listed_items(),
            level_label: default_level_label(),
            tips: default_tips(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct MarkingConfig {
    #[serde(default)]
    pub marking: MarkingOptions,

    #[serde(default)]
    pub feedback: FeedbackOptions,
}

impl MarkingConfig {
    pub fn default_config() -> Self {
        MarkingConfig {
            marking: MarkingOptions::default(),
            feedback: FeedbackOptions::default(),
        }
    }

    /// Swaps an inverted word window so `min_words <= max_words` always holds.
    pub fn sanitize(mut self) -> Self {
        if self.feedback.min_words > self.feedback.max_words {
            std::mem::swap(&mut self.feedback.min_words, &mut self.feedback.max_words);
        }
        self.marking.pass_mark = self.marking.pass_mark.min(100);
        self
    }

    pub fn from_json_str(raw: &str) -> Result<Self, String> {
        let cfg: MarkingConfig =
            serde_json::from_str(raw).map_err(|_| "Invalid marking config JSON format".to_string())?;
        Ok(cfg.sanitize())
    }

    pub fn load(path: &Path) -> Result<Self, String> {
        let contents = fs::read_to_string(path)
            .map_err(|_| format!("Failed to read marking config at {path:?}"))?;
        Self::from_json_str(&contents)
    }

    /// Per-assignment overrides; an assignment without a config file marks with defaults.
    pub fn for_assignment(assignment_id: &str) -> Result<Self, String> {
        let path = marking_config_path(assignment_id);
        if !path.exists() {
            tracing::debug!(assignment = assignment_id, "no marking config, using defaults");
            return Ok(Self::default_config());
        }
        Self::load(&path)
    }

    pub fn save(&self, assignment_id: &str) -> Result<(), String> {
        let path = marking_config_path(assignment_id);
        ensure_parent_dir(&path)
            .map_err(|e| format!("Failed to create config directory: {e:?}"))?;

        let json = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize config to JSON: {e}"))?;

        fs::write(&path, json).map_err(|e| format!("Failed to write config file to disk: {e:?}"))?;

        Ok(())
    }
}

//Default Functions

fn default_parse_mode() -> ParseMode {
    ParseMode::FirstAnchor
}

fn default_comparison() -> ComparisonScheme {
    ComparisonScheme::Canonical
}

fn default_feedback_scheme() -> FeedbackScheme {
    FeedbackScheme::Auto
}

fn default_pass_mark() -> u32 {
    60
}

fn default_min_words() -> usize {
    40
}

fn default_max_words() -> usize {
    60
}

fn default_max_listed_items() -> usize {
    6
}

fn default_level_label() -> String {
    "A1".to_string()
}

fn default_tips() -> Vec<String> {
    vec![
        "Slow down, read each stem fully, and match letters carefully.".to_string(),
        "Use umlauts (ä/ö/ü) and verify meaning before choosing.".to_string(),
        "Underline keywords, compare similar options, and double-check B/C confusions."
            .to_string(),
    ]
}
