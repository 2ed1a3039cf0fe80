//! Rendering Contract
//!
//! The canvas that draws a mind-map consumes the `{nodes, edges}` snapshot
//! plus the declarative styling below, and feeds user gestures back as
//! [`NodeInteraction`] events. This module is the whole surface the core
//! shares with a renderer - nothing here depends on any canvas library.

use crate::models::{NodeKind, Position};
use serde::{Deserialize, Serialize};

/// User gesture on a rendered node, reported by the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum NodeInteraction {
    /// Primary click/tap
    Clicked { node_id: String },

    /// Secondary action (right-click, long-press); carries the screen
    /// position so the host can anchor a context menu
    SecondaryAction {
        node_id: String,
        screen_position: Position,
    },
}

/// Declarative visual style for one node kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeStyle {
    /// Fill color (CSS hex)
    pub background: &'static str,
    /// Border color (CSS hex)
    pub border: &'static str,
    /// Text color (CSS hex)
    pub text: &'static str,
    /// Node width in canvas pixels
    pub width: u32,
}

/// Declarative visual style for edges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeStyle {
    pub stroke: &'static str,
    pub stroke_width: f32,
}

/// Style for all edges.
pub const EDGE_STYLE: EdgeStyle = EdgeStyle {
    stroke: "#9ca3af",
    stroke_width: 1.5,
};

/// Style keyed by node kind.
pub fn node_style(kind: NodeKind) -> NodeStyle {
    match kind {
        NodeKind::Main => NodeStyle {
            background: "#ede9fe",
            border: "#c4b5fd",
            text: "#374151",
            width: 280,
        },
        NodeKind::Question => NodeStyle {
            background: "#e0f2fe",
            border: "#7dd3fc",
            text: "#1f2937",
            width: 240,
        },
        NodeKind::Answer => NodeStyle {
            background: "#dcfce7",
            border: "#86efac",
            text: "#1f2937",
            width: 240,
        },
        NodeKind::Comment => NodeStyle {
            background: "#fef3c7",
            border: "#fcd34d",
            text: "#374151",
            width: 200,
        },
    }
}
