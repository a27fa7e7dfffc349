//! Scene graph module
//!
//! Provides scene nodes, group composition with child notifications,
//! attach/detach propagation to a render host, hit testing and draw traversal.

mod node;
mod render_host;
mod hit_test;
mod scene_graph;

pub use node::{
    NodeKey, Node, NodeKind, GroupNode, NodeContent, EmptyContent,
    Attachable, HitTestable, Drawable, Disposable,
    Operation, ChildNodeChanged,
};
pub use render_host::RenderHost;
pub use hit_test::{Ray, HitTestResult, AABB, BoxNode, sort_hits};
pub use scene_graph::SceneGraph;
