pub mod graph;
pub mod model;

pub use graph::GraphError;
pub use model::{
    EdgeData, EdgeKind, GraphData, GraphEdge, GraphNode, NodeData,
    NodeKind, Status,
};
