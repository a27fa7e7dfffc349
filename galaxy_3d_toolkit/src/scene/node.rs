/// Scene node - identity, attachment state and node capabilities.
///
/// Nodes live in a `SceneGraph` arena and are addressed by `NodeKey`.
/// Behavior is provided by a `NodeContent` object composed of four
/// capabilities (attach, hit test, draw, dispose); composite structure is a
/// `NodeKind::Group` variant holding child keys.

use std::sync::Arc;
use rustc_hash::FxHashSet;
use slotmap::new_key_type;
use crate::graphics_device::DeviceContext;
use crate::scene::{RenderHost, Ray, HitTestResult};
use crate::utils::EventHandlers;

new_key_type! {
    /// Stable identity of a node inside its `SceneGraph`.
    ///
    /// Keys are never reused for a different node, so a key of a disposed
    /// node behaves like a null node.
    pub struct NodeKey;
}

// ===== CAPABILITIES =====

/// Reaction to the node being attached to / detached from a render host
pub trait Attachable {
    /// Called by the base attach step. Returning false aborts the attach.
    fn on_attach(&mut self, _host: &Arc<dyn RenderHost>) -> bool {
        true
    }

    /// Called by the base detach step, after all children are detached.
    fn on_detach(&mut self) {}
}

/// Ray query against the node's own geometry
pub trait HitTestable {
    /// Append hits for `node` to `hits` and return whether anything was hit.
    fn hit_test(&self, _node: NodeKey, _ray: &Ray, _hits: &mut Vec<HitTestResult>) -> bool {
        false
    }
}

/// Per-frame drawing
pub trait Drawable {
    /// Record draw commands. Only called while attached and visible.
    fn render(&mut self, _context: &mut dyn DeviceContext) {}
}

/// Final release of the node's own resources
pub trait Disposable {
    /// Called once, after the node is detached and removed from the graph.
    fn on_dispose(&mut self) {}
}

/// Everything a node's behavior object provides
pub trait NodeContent: Attachable + HitTestable + Drawable + Disposable + Send {}

impl<T> NodeContent for T where T: Attachable + HitTestable + Drawable + Disposable + Send {}

/// Content with no behavior of its own (plain groups)
#[derive(Debug, Default)]
pub struct EmptyContent;

impl Attachable for EmptyContent {}
impl HitTestable for EmptyContent {}
impl Drawable for EmptyContent {}
impl Disposable for EmptyContent {}

// ===== CHILD NOTIFICATIONS =====

/// Structural change applied to a group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Remove,
    Clear,
}

/// Payload of a child-changed notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildNodeChanged {
    /// Group that changed
    pub group: NodeKey,
    /// Affected child (`None` for `Clear`)
    pub node: Option<NodeKey>,
    /// What happened
    pub operation: Operation,
}

// ===== NODE =====

/// Child bookkeeping of a group node
///
/// `children` is the traversal/draw order, `members` the O(1) identity index.
/// Both always hold the same keys.
#[derive(Default)]
pub struct GroupNode {
    pub(crate) children: Vec<NodeKey>,
    pub(crate) members: FxHashSet<NodeKey>,
    pub(crate) on_child_changed: EventHandlers<ChildNodeChanged>,
}

impl GroupNode {
    /// Children in insertion order
    pub fn children(&self) -> &[NodeKey] {
        &self.children
    }

    /// Whether `key` is a direct child
    pub fn contains(&self, key: NodeKey) -> bool {
        self.members.contains(&key)
    }

    /// Number of direct children
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Whether the group has no children
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub(crate) fn insert(&mut self, key: NodeKey) {
        self.members.insert(key);
        self.children.push(key);
    }

    pub(crate) fn remove(&mut self, key: NodeKey) -> bool {
        if !self.members.remove(&key) {
            return false;
        }
        if let Some(pos) = self.children.iter().position(|k| *k == key) {
            self.children.remove(pos);
        }
        true
    }

    pub(crate) fn notify(&mut self, change: ChildNodeChanged) {
        self.on_child_changed.emit(&change);
    }
}

/// Leaf or composite
pub enum NodeKind {
    Leaf,
    Group(GroupNode),
}

/// A scene node
pub struct Node {
    pub(crate) name: String,
    pub(crate) parent: Option<NodeKey>,
    pub(crate) host: Option<Arc<dyn RenderHost>>,
    pub(crate) visible: bool,
    pub(crate) hit_test_visible: bool,
    pub(crate) content: Box<dyn NodeContent>,
    pub(crate) kind: NodeKind,
}

impl Node {
    pub(crate) fn new(name: String, content: Box<dyn NodeContent>, kind: NodeKind) -> Self {
        Self {
            name,
            parent: None,
            host: None,
            visible: true,
            hit_test_visible: true,
            content,
            kind,
        }
    }

    /// Node name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Owning group (`None` for roots and unparented nodes)
    pub fn parent(&self) -> Option<NodeKey> {
        self.parent
    }

    /// Whether the node is attached to a render host
    pub fn is_attached(&self) -> bool {
        self.host.is_some()
    }

    /// Host the node is attached to
    pub fn host(&self) -> Option<&Arc<dyn RenderHost>> {
        self.host.as_ref()
    }

    /// Visibility flag (hidden nodes are neither drawn nor hit-tested)
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Whether the node takes part in hit testing
    pub fn is_hit_test_visible(&self) -> bool {
        self.hit_test_visible
    }

    /// Attached, visible and hit-test visible
    pub fn can_hit_test(&self) -> bool {
        self.is_attached() && self.visible && self.hit_test_visible
    }

    /// Whether the node is a group
    pub fn is_group(&self) -> bool {
        matches!(self.kind, NodeKind::Group(_))
    }

    /// Group bookkeeping, if this is a group
    pub fn as_group(&self) -> Option<&GroupNode> {
        match &self.kind {
            NodeKind::Group(group) => Some(group),
            NodeKind::Leaf => None,
        }
    }

    pub(crate) fn as_group_mut(&mut self) -> Option<&mut GroupNode> {
        match &mut self.kind {
            NodeKind::Group(group) => Some(group),
            NodeKind::Leaf => None,
        }
    }

    /// Children in traversal order (empty for leaves)
    pub fn children(&self) -> &[NodeKey] {
        self.as_group().map(GroupNode::children).unwrap_or(&[])
    }

    /// Behavior object
    pub fn content(&self) -> &dyn NodeContent {
        self.content.as_ref()
    }

    /// Mutable behavior object
    pub fn content_mut(&mut self) -> &mut dyn NodeContent {
        self.content.as_mut()
    }
}
