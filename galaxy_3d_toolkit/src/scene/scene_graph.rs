/// SceneGraph - arena owning every scene node, plus the composite operations.
///
/// Uses a SlotMap so node keys stay stable while other nodes are removed.
/// A group's children are owned by the arena and referenced by key; the
/// child's `parent` is a plain key back into the arena, never an owner.
///
/// All structural operations keep two invariants:
/// - a node's `parent` and its group's child set always agree
/// - every child of a group shares the group's attach state

use std::sync::Arc;
use slotmap::SlotMap;
use crate::error::{Error, Result};
use crate::graphics_device::DeviceContext;
use crate::utils::SubscriptionId;
use super::node::{
    Node, NodeKey, NodeKind, NodeContent, GroupNode, EmptyContent,
    ChildNodeChanged, Operation, Attachable, HitTestable, Drawable, Disposable,
};
use super::{RenderHost, Ray, HitTestResult};

const SOURCE: &str = "galaxy3d::SceneGraph";

/// A tree of scene nodes rooted at a group
pub struct SceneGraph {
    nodes: SlotMap<NodeKey, Node>,
    root: NodeKey,
}

impl SceneGraph {
    /// Create a graph containing only the root group
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node::new(
            "root".to_string(),
            Box::new(EmptyContent),
            NodeKind::Group(GroupNode::default()),
        ));
        Self { nodes, root }
    }

    /// Root group
    pub fn root(&self) -> NodeKey {
        self.root
    }

    // ===== NODE CREATION / ACCESS =====

    /// Create an unparented leaf node
    pub fn create_leaf<C: NodeContent + 'static>(&mut self, name: &str, content: C) -> NodeKey {
        self.nodes.insert(Node::new(name.to_string(), Box::new(content), NodeKind::Leaf))
    }

    /// Create an unparented, empty group
    pub fn create_group(&mut self, name: &str) -> NodeKey {
        self.create_group_with_content(name, EmptyContent)
    }

    /// Create an unparented group with its own behavior (attach hooks, drawing)
    pub fn create_group_with_content<C: NodeContent + 'static>(&mut self, name: &str, content: C) -> NodeKey {
        self.nodes.insert(Node::new(
            name.to_string(),
            Box::new(content),
            NodeKind::Group(GroupNode::default()),
        ))
    }

    /// Get a node by key
    pub fn node(&self, key: NodeKey) -> Option<&Node> {
        self.nodes.get(key)
    }

    /// Get a mutable node by key
    ///
    /// Structure and attach state are only changed through the graph, so
    /// this gives access to the node's content.
    pub fn node_mut(&mut self, key: NodeKey) -> Option<&mut Node> {
        self.nodes.get_mut(key)
    }

    /// Whether `key` refers to a live node
    pub fn contains(&self, key: NodeKey) -> bool {
        self.nodes.contains_key(key)
    }

    /// Number of live nodes, root included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the root group cannot be disposed
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Parent of a node
    pub fn parent(&self, key: NodeKey) -> Option<NodeKey> {
        self.nodes.get(key).and_then(Node::parent)
    }

    /// Read-only view of a group's children (empty for leaves / unknown keys)
    pub fn children(&self, group: NodeKey) -> &[NodeKey] {
        self.nodes.get(group).map(Node::children).unwrap_or(&[])
    }

    /// Whether a node is attached to a render host
    pub fn is_attached(&self, key: NodeKey) -> bool {
        self.nodes.get(key).is_some_and(Node::is_attached)
    }

    /// Show or hide a node. Returns false if the key is invalid.
    pub fn set_visible(&mut self, key: NodeKey, visible: bool) -> bool {
        match self.nodes.get_mut(key) {
            Some(node) => {
                node.visible = visible;
                true
            }
            None => false,
        }
    }

    /// Include or exclude a node from hit testing. Returns false if the key is invalid.
    pub fn set_hit_test_visible(&mut self, key: NodeKey, hit_test_visible: bool) -> bool {
        match self.nodes.get_mut(key) {
            Some(node) => {
                node.hit_test_visible = hit_test_visible;
                true
            }
            None => false,
        }
    }

    // ===== COMPOSITE OPERATIONS =====

    /// Append `child` to `group`
    ///
    /// Returns `Ok(false)` without changing anything if `child` is not a live
    /// node or is already a member of `group`. Returns an error if `child`
    /// belongs to a different group, if `group` is not a group, or if the add
    /// would create a cycle. When `group` is attached, `child` is attached to
    /// the same host; if that fails the add is rolled back and `Ok(false)` is
    /// returned.
    pub fn add_child(&mut self, group: NodeKey, child: NodeKey) -> Result<bool> {
        let group_node = self.nodes.get(group).ok_or_else(|| {
            Self::log_and_return_error(Error::InvalidResource("unknown group key".to_string()))
        })?;
        let members = group_node.as_group().ok_or_else(|| {
            Self::log_and_return_error(Error::NotAGroup(group_node.name.clone()))
        })?;

        let Some(child_node) = self.nodes.get(child) else {
            return Ok(false);
        };
        if members.contains(child) {
            return Ok(false);
        }
        if let Some(current_parent) = child_node.parent {
            let current_parent = self
                .nodes
                .get(current_parent)
                .map(|p| p.name.clone())
                .unwrap_or_default();
            return Err(Self::log_and_return_error(Error::NodeAlreadyParented {
                node: child_node.name.clone(),
                current_parent,
            }));
        }
        if self.is_ancestor_or_self(child, group) {
            return Err(Self::log_and_return_error(Error::CyclicHierarchy(format!(
                "'{}' is an ancestor of '{}'",
                child_node.name, group_node.name
            ))));
        }

        let host = group_node.host.clone();
        self.group_mut(group).insert(child);
        self.nodes[child].parent = Some(group);

        match host {
            Some(host) => {
                if !self.attach(child, &host) {
                    crate::engine_warn!(SOURCE, "Child '{}' failed to attach to '{}', add rolled back",
                        self.nodes[child].name, host.name());
                    self.group_mut(group).remove(child);
                    self.nodes[child].parent = None;
                    return Ok(false);
                }
            }
            None => self.detach(child),
        }

        crate::engine_debug!(SOURCE, "Added '{}' to '{}'", self.nodes[child].name, self.nodes[group].name);
        self.group_mut(group).notify(ChildNodeChanged {
            group,
            node: Some(child),
            operation: Operation::Add,
        });
        Ok(true)
    }

    /// Remove `child` from `group`, detaching it first
    ///
    /// Returns false if `child` is not a live member of `group`.
    pub fn remove_child(&mut self, group: NodeKey, child: NodeKey) -> bool {
        let is_member = self
            .nodes
            .get(group)
            .and_then(Node::as_group)
            .is_some_and(|g| g.contains(child));
        if !is_member || !self.nodes.contains_key(child) {
            return false;
        }

        self.detach(child);
        self.group_mut(group).remove(child);
        self.nodes[child].parent = None;

        crate::engine_debug!(SOURCE, "Removed '{}' from '{}'", self.nodes[child].name, self.nodes[group].name);
        self.group_mut(group).notify(ChildNodeChanged {
            group,
            node: Some(child),
            operation: Operation::Remove,
        });
        true
    }

    /// Detach and un-parent every child of `group`, then emit one `Clear`
    ///
    /// No-op for leaves and unknown keys.
    pub fn clear(&mut self, group: NodeKey) {
        let Some(children) = self
            .nodes
            .get(group)
            .and_then(Node::as_group)
            .map(|g| g.children.clone())
        else {
            return;
        };

        for child in &children {
            self.detach(*child);
            if let Some(node) = self.nodes.get_mut(*child) {
                node.parent = None;
            }
        }

        let members = self.group_mut(group);
        members.children.clear();
        members.members.clear();

        crate::engine_debug!(SOURCE, "Cleared {} children from '{}'", children.len(), self.nodes[group].name);
        self.group_mut(group).notify(ChildNodeChanged {
            group,
            node: None,
            operation: Operation::Clear,
        });
    }

    /// O(1) lookup of a direct child by identity
    pub fn try_get_child(&self, group: NodeKey, id: NodeKey) -> Option<&Node> {
        let members = self.nodes.get(group)?.as_group()?;
        if members.contains(id) {
            self.nodes.get(id)
        } else {
            None
        }
    }

    /// Register a handler for Add / Remove / Clear on `group`
    pub fn subscribe_child_changed<F>(&mut self, group: NodeKey, handler: F) -> Result<SubscriptionId>
    where
        F: FnMut(&ChildNodeChanged) + Send + 'static,
    {
        let node = self.nodes.get_mut(group).ok_or_else(|| {
            Self::log_and_return_error(Error::InvalidResource("unknown group key".to_string()))
        })?;
        let name = node.name.clone();
        let members = node
            .as_group_mut()
            .ok_or_else(|| Self::log_and_return_error(Error::NotAGroup(name)))?;
        Ok(members.on_child_changed.subscribe(handler))
    }

    /// Remove a child-changed handler. Returns false if unknown.
    pub fn unsubscribe_child_changed(&mut self, group: NodeKey, id: SubscriptionId) -> bool {
        self.nodes
            .get_mut(group)
            .and_then(Node::as_group_mut)
            .is_some_and(|g| g.on_child_changed.unsubscribe(id))
    }

    // ===== ATTACH / DETACH =====

    /// Attach a node (and, for groups, its whole subtree) to `host`
    ///
    /// Idempotent for the same host. A node attached to another host is
    /// detached first. The node's own attach runs before its children are
    /// attached in order; if it fails nothing is attached. If a child fails,
    /// the node is detached again and false is returned.
    ///
    /// Children mirror their group's attach state only while attach and
    /// detach are driven from the root of a subtree. Attaching a child
    /// directly leaves its parent group detached.
    pub fn attach(&mut self, key: NodeKey, host: &Arc<dyn RenderHost>) -> bool {
        let current = match self.nodes.get(key) {
            Some(node) => node.host.clone(),
            None => return false,
        };
        if let Some(current) = current {
            if Arc::ptr_eq(&current, host) {
                return true;
            }
            self.detach(key);
        }

        if !self.base_attach(key, host) {
            return false;
        }

        let children = self.children(key).to_vec();
        for child in children {
            if !self.attach(child, host) {
                crate::engine_warn!(SOURCE, "Child '{}' of '{}' failed to attach to '{}'",
                    self.nodes[child].name, self.nodes[key].name, host.name());
                self.detach(key);
                return false;
            }
        }
        true
    }

    /// Detach a node from its host, children first. No-op if not attached.
    pub fn detach(&mut self, key: NodeKey) {
        if !self.is_attached(key) {
            return;
        }

        let children = self.children(key).to_vec();
        for child in children {
            self.detach(child);
        }

        let node = &mut self.nodes[key];
        node.content.on_detach();
        node.host = None;
        crate::engine_trace!(SOURCE, "Detached '{}'", node.name);
    }

    fn base_attach(&mut self, key: NodeKey, host: &Arc<dyn RenderHost>) -> bool {
        if !host.is_ready() {
            crate::engine_debug!(SOURCE, "Host '{}' not ready, cannot attach '{}'",
                host.name(), self.nodes[key].name);
            return false;
        }
        let node = &mut self.nodes[key];
        if !node.content.on_attach(host) {
            return false;
        }
        node.host = Some(host.clone());
        crate::engine_trace!(SOURCE, "Attached '{}' to '{}'", node.name, host.name());
        true
    }

    // ===== TRAVERSAL =====

    /// Hit-test a node and its subtree
    ///
    /// Every child of a group is queried even after an earlier hit; all hits
    /// are appended to `hits`. Returns whether anything was hit.
    pub fn hit_test(&self, key: NodeKey, ray: &Ray, hits: &mut Vec<HitTestResult>) -> bool {
        let Some(node) = self.nodes.get(key) else {
            return false;
        };
        if !node.can_hit_test() {
            return false;
        }

        match &node.kind {
            NodeKind::Group(group) => {
                let mut hit = false;
                for child in &group.children {
                    if self.hit_test(*child, ray, hits) {
                        hit = true;
                    }
                }
                hit
            }
            NodeKind::Leaf => node.content.hit_test(key, ray, hits),
        }
    }

    /// Draw a node and its subtree depth-first in insertion order
    ///
    /// Detached or hidden nodes are skipped together with their subtree.
    pub fn render(&mut self, key: NodeKey, context: &mut dyn DeviceContext) {
        let Some(node) = self.nodes.get_mut(key) else {
            return;
        };
        if !node.is_attached() || !node.visible {
            return;
        }
        node.content.render(context);

        let children = node.children().to_vec();
        for child in children {
            self.render(child, context);
        }
    }

    /// Keys in the order `render` would visit them
    pub fn collect_draw_order(&self, key: NodeKey) -> Vec<NodeKey> {
        let mut order = Vec::new();
        self.collect_draw_order_into(key, &mut order);
        order
    }

    fn collect_draw_order_into(&self, key: NodeKey, order: &mut Vec<NodeKey>) {
        let Some(node) = self.nodes.get(key) else {
            return;
        };
        if !node.is_attached() || !node.visible {
            return;
        }
        order.push(key);
        for child in node.children() {
            self.collect_draw_order_into(*child, order);
        }
    }

    // ===== DISPOSAL =====

    /// Dispose a node
    ///
    /// The node is removed from its parent, a group clears its children
    /// (detaching and un-parenting them, they stay alive as roots) and drops
    /// its subscribers, then the node is detached, removed from the arena
    /// and its content disposed. The root group cannot be disposed.
    pub fn dispose(&mut self, key: NodeKey) -> bool {
        if key == self.root {
            crate::engine_warn!(SOURCE, "The root group cannot be disposed");
            return false;
        }
        if !self.nodes.contains_key(key) {
            return false;
        }

        if let Some(parent) = self.parent(key) {
            self.remove_child(parent, key);
        }

        if self.nodes[key].is_group() {
            self.clear(key);
            self.group_mut(key).on_child_changed.clear();
        }

        self.detach(key);

        if let Some(mut node) = self.nodes.remove(key) {
            node.content.on_dispose();
            crate::engine_debug!(SOURCE, "Disposed '{}'", node.name);
        }
        true
    }

    // ===== HELPERS =====

    /// Whether `candidate` is `key` or one of its ancestors
    fn is_ancestor_or_self(&self, candidate: NodeKey, key: NodeKey) -> bool {
        let mut current = Some(key);
        while let Some(k) = current {
            if k == candidate {
                return true;
            }
            current = self.parent(k);
        }
        false
    }

    /// Group bookkeeping of a key already known to be a live group
    fn group_mut(&mut self, group: NodeKey) -> &mut GroupNode {
        match &mut self.nodes[group].kind {
            NodeKind::Group(members) => members,
            NodeKind::Leaf => unreachable!("group_mut called on a leaf"),
        }
    }

    fn log_and_return_error(error: Error) -> Error {
        crate::engine_error!(SOURCE, "{}", error);
        error
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for SceneGraph {
    fn drop(&mut self) {
        let roots: Vec<NodeKey> = self
            .nodes
            .iter()
            .filter(|(_, node)| node.parent.is_none())
            .map(|(key, _)| key)
            .collect();
        for root in roots {
            self.detach(root);
        }
        for (_, node) in self.nodes.iter_mut() {
            node.content.on_dispose();
        }
    }
}

#[cfg(test)]
#[path = "scene_graph_tests.rs"]
mod tests;
