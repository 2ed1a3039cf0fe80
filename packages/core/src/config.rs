//! Layout and session configuration
//!
//! All graph construction reads its geometry and question counts from these
//! values, which are loaded once at session start and passed by value. No
//! component reads configuration through shared mutable state.

use crate::models::Position;
use serde::{Deserialize, Serialize};

/// Geometry constants for mind-map layout.
///
/// Distances are canvas pixels. Defaults match the layout the canvas was
/// designed around: the entry node on the left, question/answer columns
/// growing to the right, vertical fans centered on their parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Position of the `main` node
    pub main_position: Position,

    /// Horizontal distance from the main node to the initial question column
    pub question_x_offset: f64,

    /// Vertical spacing between initial question nodes
    pub question_spacing: f64,

    /// Vertical spacing between follow-up question nodes
    pub follow_up_spacing: f64,

    /// Horizontal spacing between a node and its children (answers,
    /// follow-ups, comments)
    pub horizontal_spacing: f64,

    /// Downward offset applied to comment nodes so they sit below their
    /// target instead of overlapping its other children
    pub comment_y_offset: f64,

    /// Max characters of diary text shown in the main node preview
    pub preview_chars: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            main_position: Position::new(50.0, 250.0),
            question_x_offset: 450.0,
            question_spacing: 200.0,
            follow_up_spacing: 150.0,
            horizontal_spacing: 300.0,
            comment_y_offset: 80.0,
            preview_chars: 150,
        }
    }
}

impl LayoutConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.question_spacing <= 0.0 || self.follow_up_spacing <= 0.0 {
            return Err("vertical spacings must be positive".to_string());
        }

        if self.horizontal_spacing <= 0.0 {
            return Err("horizontal_spacing must be positive".to_string());
        }

        if self.preview_chars == 0 {
            return Err("preview_chars must be greater than 0".to_string());
        }

        Ok(())
    }
}

/// Per-session configuration: question counts plus layout geometry.
///
/// Built from [`AppSettings`](crate::settings::AppSettings) when a mind-map
/// session opens and held by value for the session's lifetime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSettings {
    /// Number of questions fanned out from the main node
    pub initial_question_count: usize,

    /// Number of follow-up questions generated per answer
    pub followup_question_count: usize,

    /// Layout geometry
    pub layout: LayoutConfig,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            initial_question_count: 2,
            followup_question_count: 2,
            layout: LayoutConfig::default(),
        }
    }
}

impl SessionSettings {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.initial_question_count == 0 {
            return Err("initial_question_count must be at least 1".to_string());
        }

        if self.followup_question_count == 0 {
            return Err("followup_question_count must be at least 1".to_string());
        }

        self.layout.validate()
    }
}
