//! JSON command protocol for scripted guide sessions.
//!
//! Drives a [`TestHarness`] with the same events the viewport produces.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use shared::CabinetBox;

use crate::guides::{EventOutcome, GuideRecord, ToolKey};
use crate::harness::TestHarness;

/// A command an agent or test script can execute.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum AgentCommand {
    /// Add a box to the scene
    AddBox {
        #[serde(default)]
        id: String,
        width: f64,
        height: f64,
        depth: f64,
        #[serde(default)]
        position: [f64; 3],
    },
    /// Move the pointer to a screen position
    PointerMove { x: f32, y: f32 },
    /// Press the primary button at a screen position
    PointerDown { x: f32, y: f32 },
    /// Click on the screen projection of a world point
    ClickWorld { point: [f32; 3] },
    /// Hover over the screen projection of a world point
    HoverWorld { point: [f32; 3] },
    /// Press a tool key
    Key { key: ToolKey },
    /// Type a distance expression and commit it
    TypeDistance { text: String },
    /// Enable or disable the guide tool
    SetEnabled { enabled: bool },
    /// Remove the most recent guide.
    DeleteLastGuide,
    /// Remove all guides.
    ClearGuides,
    /// Inspect tool state and guide counts.
    Inspect,
    /// Export guides as JSON.
    ExportGuides,
}

/// Response from executing a command.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl CommandResponse {
    fn ok() -> Self {
        Self {
            success: true,
            error: None,
            data: None,
        }
    }

    fn ok_with_data(data: serde_json::Value) -> Self {
        Self {
            success: true,
            error: None,
            data: Some(data),
        }
    }

    fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(msg.into()),
            data: None,
        }
    }
}

/// JSON summary of an event outcome
fn outcome_json(outcome: &EventOutcome) -> serde_json::Value {
    match outcome {
        EventOutcome::Ignored => serde_json::json!({ "outcome": "ignored" }),
        EventOutcome::HoverChanged(key) => serde_json::json!({
            "outcome": "hover_changed",
            "hovering": key.is_some(),
        }),
        EventOutcome::Anchored(kind) => serde_json::json!({
            "outcome": "anchored",
            "anchor": kind,
        }),
        EventOutcome::PreviewUpdated => serde_json::json!({ "outcome": "preview_updated" }),
        EventOutcome::LockChanged(axis) => serde_json::json!({
            "outcome": "lock_changed",
            "axis": axis,
        }),
        EventOutcome::Finalized(record) => serde_json::json!({
            "outcome": "finalized",
            "guide": record,
        }),
        EventOutcome::Cancelled => serde_json::json!({ "outcome": "cancelled" }),
        EventOutcome::Deleted(record) => serde_json::json!({
            "outcome": "deleted",
            "guide": record,
        }),
    }
}

fn world_point(point: [f32; 3]) -> Vec3 {
    Vec3::from_array(point)
}

/// Execute a single command on the harness.
pub fn execute_command(harness: &mut TestHarness, cmd: AgentCommand) -> CommandResponse {
    match cmd {
        AgentCommand::AddBox {
            id,
            width,
            height,
            depth,
            position,
        } => {
            if width <= 0.0 || height <= 0.0 || depth <= 0.0 {
                return CommandResponse::err(format!(
                    "Box dimensions must be positive, got {width} x {height} x {depth}"
                ));
            }
            let id = harness
                .scene
                .add_box(CabinetBox::new(id, width, height, depth).at(position));
            CommandResponse::ok_with_data(serde_json::json!({ "id": id }))
        }

        AgentCommand::PointerMove { x, y } => {
            let outcome = harness.hover(Vec2::new(x, y));
            CommandResponse::ok_with_data(outcome_json(&outcome))
        }

        AgentCommand::PointerDown { x, y } => {
            let outcome = harness.click(Vec2::new(x, y));
            CommandResponse::ok_with_data(outcome_json(&outcome))
        }

        AgentCommand::ClickWorld { point } => match harness.screen_of(world_point(point)) {
            Some(screen) => {
                let outcome = harness.click(screen);
                CommandResponse::ok_with_data(outcome_json(&outcome))
            }
            None => CommandResponse::err(format!("Point {point:?} is behind the camera")),
        },

        AgentCommand::HoverWorld { point } => match harness.screen_of(world_point(point)) {
            Some(screen) => {
                let outcome = harness.hover(screen);
                CommandResponse::ok_with_data(outcome_json(&outcome))
            }
            None => CommandResponse::err(format!("Point {point:?} is behind the camera")),
        },

        AgentCommand::Key { key } => {
            let outcome = harness.press(key);
            CommandResponse::ok_with_data(outcome_json(&outcome))
        }

        AgentCommand::TypeDistance { text } => {
            let outcome = harness.type_distance(&text);
            CommandResponse::ok_with_data(outcome_json(&outcome))
        }

        AgentCommand::SetEnabled { enabled } => {
            harness.set_enabled(enabled);
            CommandResponse::ok()
        }

        AgentCommand::DeleteLastGuide => {
            let deleted = harness.delete_last_guide();
            CommandResponse::ok_with_data(serde_json::json!({ "deleted": deleted }))
        }

        AgentCommand::ClearGuides => {
            let removed = harness.clear_guides();
            CommandResponse::ok_with_data(serde_json::json!({ "removed": removed }))
        }

        AgentCommand::Inspect => {
            let preview = harness.preview().map(|p| {
                serde_json::json!({
                    "anchor": p.anchor.kind(),
                    "distance": p.distance,
                    "snapped_axis": p.snapped_axis,
                })
            });
            CommandResponse::ok_with_data(serde_json::json!({
                "enabled": harness.is_enabled(),
                "idle": harness.is_idle(),
                "box_count": harness.box_count(),
                "guide_count": harness.guides().len(),
                "point_count": harness.points().len(),
                "locked_axis": harness.locked_axis(),
                "preview": preview,
                "transients": harness.transient_count(),
            }))
        }

        AgentCommand::ExportGuides => {
            CommandResponse::ok_with_data(harness.export_guides_json())
        }
    }
}

/// Parse and execute a single JSON command string.
pub fn execute_json(harness: &mut TestHarness, json: &str) -> Result<CommandResponse, String> {
    let cmd: AgentCommand =
        serde_json::from_str(json).map_err(|e| format!("Invalid command JSON: {e}"))?;
    Ok(execute_command(harness, cmd))
}

/// Parse and execute multiple JSON commands (array).
pub fn execute_json_batch(
    harness: &mut TestHarness,
    json: &str,
) -> Result<Vec<CommandResponse>, String> {
    let cmds: Vec<AgentCommand> =
        serde_json::from_str(json).map_err(|e| format!("Invalid commands JSON: {e}"))?;
    Ok(cmds
        .into_iter()
        .map(|cmd| execute_command(harness, cmd))
        .collect())
}

/// The guide a response finalized, if any
pub fn finalized_guide(resp: &CommandResponse) -> Option<GuideRecord> {
    let data = resp.data.as_ref()?;
    if data["outcome"] != "finalized" {
        return None;
    }
    serde_json::from_value(data["guide"].clone()).ok()
}
