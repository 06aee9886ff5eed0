//! WebAssembly bindings for browser hosts.
//!
//! The canvas UI calls these functions with JSON strings and receives JSON
//! strings back, so the binding layer stays free of host-specific types.

use ahash::{AHashMap, AHashSet};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

use crate::flow::{Flow, NodeId, Position, validate};
use crate::graph;

/// Render options accepted by [`build_canvas_graph`]. Every field is
/// optional; an absent options object means "show everything, no manual
/// positions".
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CanvasOptions {
    solo_root: Option<bool>,
    invalid_ids: Option<Vec<NodeId>>,
    positions: Option<AHashMap<NodeId, Position>>,
}

fn js_error(message: impl ToString) -> JsValue {
    JsValue::from_str(&message.to_string())
}

/// Projects a flow document into renderable canvas geometry.
///
/// `flow_json` is the canonical document; `options_json` may carry
/// `soloRoot`, `invalidIds` and `positions`. Returns the serialized graph
/// view.
#[wasm_bindgen]
pub fn build_canvas_graph(
    flow_json: &str,
    options_json: Option<String>,
) -> Result<String, JsValue> {
    let flow: Flow = serde_json::from_str(flow_json).map_err(js_error)?;
    let options = match options_json {
        Some(raw) => serde_json::from_str::<CanvasOptions>(&raw).map_err(js_error)?,
        None => CanvasOptions::default(),
    };

    let invalid: AHashSet<NodeId> = options
        .invalid_ids
        .unwrap_or_default()
        .into_iter()
        .collect();
    let overrides = options.positions.unwrap_or_default();
    let view = graph::build_graph(
        &flow,
        options.solo_root.unwrap_or(false),
        &invalid,
        &overrides,
    );
    serde_json::to_string(&view).map_err(js_error)
}

/// Runs the validator over a flow document and returns the serialized
/// issue report.
#[wasm_bindgen]
pub fn validate_flow(flow_json: &str) -> Result<String, JsValue> {
    let flow: Flow = serde_json::from_str(flow_json).map_err(js_error)?;
    serde_json::to_string(&validate(&flow)).map_err(js_error)
}

/// Computes fresh grid positions for every node of a flow document,
/// returned as an id-to-position map.
#[wasm_bindgen]
pub fn compute_auto_layout(flow_json: &str) -> Result<String, JsValue> {
    let flow: Flow = serde_json::from_str(flow_json).map_err(js_error)?;
    serde_json::to_string(&graph::auto_layout(&flow)).map_err(js_error)
}
