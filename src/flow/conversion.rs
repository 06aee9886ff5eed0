use super::document::Flow;
use crate::error::FlowConversionError;

/// Conversion from a custom host document model into a canonical [`Flow`].
///
/// The engine only understands [`Flow`] documents. Host applications that
/// persist flows in their own shape (an id-keyed map, a wrapped API payload,
/// a legacy export) implement this trait once and hand the result to the
/// editor, validator and graph builder.
///
/// # Example
///
/// ```
/// use std::collections::BTreeMap;
///
/// use charla::error::FlowConversionError;
/// use charla::flow::{Flow, FlowNode, IntoFlow, NodeAction};
///
/// /// A host document that keys its nodes by id instead of storing a list.
/// struct KeyedDocument {
///     root: String,
///     nodes: BTreeMap<String, KeyedNode>,
/// }
///
/// struct KeyedNode {
///     label: String,
///     action: NodeAction,
/// }
///
/// impl IntoFlow for KeyedDocument {
///     fn into_flow(self) -> Result<Flow, FlowConversionError> {
///         let nodes = self
///             .nodes
///             .into_iter()
///             .map(|(id, node)| FlowNode::new(id, node.label, node.action))
///             .collect::<Vec<_>>();
///         let flow = Flow { root_id: self.root, nodes };
///         if flow.root().is_none() {
///             return Err(FlowConversionError::RootNotFound(flow.root_id));
///         }
///         Ok(flow)
///     }
/// }
/// # let doc = KeyedDocument {
/// #     root: "start".to_string(),
/// #     nodes: BTreeMap::from([(
/// #         "start".to_string(),
/// #         KeyedNode { label: "Welcome".to_string(), action: NodeAction::End },
/// #     )]),
/// # };
/// # assert!(doc.into_flow().is_ok());
/// ```
pub trait IntoFlow {
    /// Consumes the object and converts it into a canonical flow document.
    fn into_flow(self) -> Result<Flow, FlowConversionError>;
}

impl IntoFlow for Flow {
    fn into_flow(self) -> Result<Flow, FlowConversionError> {
        Ok(self)
    }
}
