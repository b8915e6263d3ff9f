//! Scene graph: a tree of nodes stored in a hecs world.
//!
//! Every node carries a [`SceneNode`] (category, parent back-reference,
//! ordered children) and a local [`Transform`]. Parents own their children:
//! removing a node releases its whole subtree. The parent link is a plain
//! handle used for world-transform composition, never for ownership.
//!
//! Traversals are strictly pre-order, children front to back. Nodes marked
//! destroyed stay in the tree until [`SceneGraph::prune_destroyed`] runs, so
//! the tree never changes shape underneath an update pass.

use std::time::Duration;

use glam::{Affine2, Vec2};
use hecs::DynamicBundle;
use tracing::trace;

use tankduel_core::components::{Body, Sprite, Transform};
use tankduel_core::enums::Category;
use tankduel_core::events::GameEvent;

use crate::command::{Command, CommandQueue};
use crate::entity;
use crate::error::SceneError;
use crate::render::RenderTarget;

/// Handle to a scene node.
pub type NodeId = hecs::Entity;

/// Tree links and routing category of a node.
#[derive(Debug, Clone)]
pub struct SceneNode {
    category: Category,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl SceneNode {
    fn new(category: Category) -> Self {
        Self {
            category,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// The scene tree plus the component storage of every node in it.
pub struct SceneGraph {
    world: hecs::World,
    root: NodeId,
    despawn_buffer: Vec<NodeId>,
    events: Vec<GameEvent>,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph {
    /// Create a graph holding only the root node (category `SCENE`).
    pub fn new() -> Self {
        let mut world = hecs::World::new();
        let root = world.spawn((SceneNode::new(Category::SCENE), Transform::IDENTITY));
        Self {
            world,
            root,
            despawn_buffer: Vec::new(),
            events: Vec::new(),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Component storage, for queries across all nodes.
    pub fn ecs(&self) -> &hecs::World {
        &self.world
    }

    pub fn ecs_mut(&mut self) -> &mut hecs::World {
        &mut self.world
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.world.contains(node)
    }

    /// Number of live nodes, including the root and any detached nodes.
    pub fn node_count(&self) -> usize {
        self.world.len() as usize
    }

    /// Spawn a node that is not yet part of the tree. The caller owns it
    /// until it is attached or removed.
    pub fn spawn_node(
        &mut self,
        category: Category,
        transform: Transform,
        components: impl DynamicBundle,
    ) -> NodeId {
        let node = self.world.spawn((SceneNode::new(category), transform));
        // The entity was spawned on the line above.
        let _ = self.world.insert(node, components);
        node
    }

    /// Spawn a node directly under `parent`.
    pub fn spawn_child(
        &mut self,
        parent: NodeId,
        category: Category,
        transform: Transform,
        components: impl DynamicBundle,
    ) -> Result<NodeId, SceneError> {
        let node = self.spawn_node(category, transform, components);
        if let Err(err) = self.attach_child(parent, node) {
            let _ = self.world.despawn(node);
            return Err(err);
        }
        Ok(node)
    }

    /// Move `child` to the end of `parent`'s children. A child attached
    /// elsewhere is detached from its old parent first.
    pub fn attach_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), SceneError> {
        if child == self.root {
            return Err(SceneError::RootNode);
        }
        if !self.contains(child) {
            return Err(SceneError::NoSuchNode(child));
        }
        if !self.contains(parent) {
            return Err(SceneError::NoSuchNode(parent));
        }

        let mut ancestor = Some(parent);
        while let Some(node) = ancestor {
            if node == child {
                return Err(SceneError::Cycle { parent, child });
            }
            ancestor = self.parent(node);
        }

        if let Some(old_parent) = self.parent(child) {
            self.unlink(old_parent, child);
        }
        if let Ok(mut node) = self.world.get::<&mut SceneNode>(parent) {
            node.children.push(child);
        }
        if let Ok(mut node) = self.world.get::<&mut SceneNode>(child) {
            node.parent = Some(parent);
        }
        Ok(())
    }

    /// Remove `child` from `parent` and hand it back to the caller, still
    /// alive but outside the tree. Fails without mutating anything when
    /// `child` is not a direct child of `parent`.
    pub fn detach_child(&mut self, parent: NodeId, child: NodeId) -> Result<NodeId, SceneError> {
        if !self.contains(parent) {
            return Err(SceneError::NoSuchNode(parent));
        }
        if !self.unlink(parent, child) {
            return Err(SceneError::NotAChild { parent, child });
        }
        if let Ok(mut node) = self.world.get::<&mut SceneNode>(child) {
            node.parent = None;
        }
        Ok(child)
    }

    /// Remove a node and release its whole subtree. Returns how many nodes
    /// were despawned.
    pub fn remove_node(&mut self, node: NodeId) -> Result<usize, SceneError> {
        if node == self.root {
            return Err(SceneError::RootNode);
        }
        if !self.contains(node) {
            return Err(SceneError::NoSuchNode(node));
        }
        if let Some(parent) = self.parent(node) {
            self.unlink(parent, node);
        }

        let mut removed = 0;
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            if let Ok(scene_node) = self.world.get::<&SceneNode>(current) {
                stack.extend(scene_node.children.iter().copied());
            }
            if self.world.despawn(current).is_ok() {
                removed += 1;
            }
        }
        Ok(removed)
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.world.get::<&SceneNode>(node).ok()?.parent
    }

    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.world
            .get::<&SceneNode>(node)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    pub fn child_at(&self, node: NodeId, index: usize) -> Option<NodeId> {
        self.world
            .get::<&SceneNode>(node)
            .ok()?
            .children
            .get(index)
            .copied()
    }

    pub fn category(&self, node: NodeId) -> Option<Category> {
        self.world.get::<&SceneNode>(node).ok().map(|n| n.category)
    }

    pub fn transform(&self, node: NodeId) -> Option<Transform> {
        self.world.get::<&Transform>(node).ok().map(|t| *t)
    }

    /// Compose local transforms from the root down to `node`.
    /// Recomputed on every call, so ancestor moves are always visible.
    pub fn world_transform(&self, node: NodeId) -> Option<Affine2> {
        let mut transform = self.transform(node)?.to_affine();
        let mut ancestor = self.parent(node);
        while let Some(current) = ancestor {
            if let Some(local) = self.transform(current) {
                transform = local.to_affine() * transform;
            }
            ancestor = self.parent(current);
        }
        Some(transform)
    }

    pub fn world_position(&self, node: NodeId) -> Option<Vec2> {
        self.world_transform(node).map(|t| t.translation)
    }

    /// Nodes reachable from the root that carry a `C` component.
    pub fn count_in_tree<C: hecs::Component>(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self.root];
        while let Some(node) = stack.pop() {
            if self.world.get::<&C>(node).is_ok() {
                count += 1;
            }
            stack.extend(self.children(node));
        }
        count
    }

    /// Time-step the tree: each node updates itself, then its children.
    pub fn update(&mut self, dt: Duration, commands: &mut CommandQueue) {
        self.update_node(self.root, dt, commands);
    }

    fn update_node(&mut self, node: NodeId, dt: Duration, commands: &mut CommandQueue) {
        entity::update_current(self, node, dt, commands);

        let mut index = 0;
        while let Some(child) = self.child_at(node, index) {
            self.update_node(child, dt, commands);
            index += 1;
        }
    }

    /// Route a command through the tree. The action runs on every node whose
    /// category intersects the command's; traversal always continues into
    /// the children.
    pub fn on_command(&mut self, command: &Command, dt: Duration) {
        self.command_node(self.root, command, dt);
    }

    fn command_node(&mut self, node: NodeId, command: &Command, dt: Duration) {
        if self.category(node).is_some_and(|c| command.matches(c)) {
            command.invoke(self, node, dt);
        }

        let mut index = 0;
        while let Some(child) = self.child_at(node, index) {
            self.command_node(child, command, dt);
            index += 1;
        }
    }

    /// Remove every node in the tree whose body is destroyed, along with its
    /// subtree. Detached nodes belong to the caller and are left alone.
    /// Returns the number of nodes released.
    pub fn prune_destroyed(&mut self) -> usize {
        let mut doomed = std::mem::take(&mut self.despawn_buffer);
        doomed.clear();

        let mut stack = vec![self.root];
        while let Some(node) = stack.pop() {
            for child in self.children(node).into_iter().rev() {
                if self.world.get::<&Body>(child).is_ok_and(|b| b.destroyed) {
                    doomed.push(child);
                } else {
                    stack.push(child);
                }
            }
        }

        let mut removed = 0;
        for node in doomed.drain(..) {
            // Already gone if an ancestor was pruned first.
            if let Ok(count) = self.remove_node(node) {
                removed += count;
            }
        }
        self.despawn_buffer = doomed;

        if removed > 0 {
            trace!(removed, "pruned destroyed nodes");
        }
        removed
    }

    /// Draw every node carrying a sprite, pre-order.
    pub fn draw(&self, target: &mut dyn RenderTarget) {
        self.draw_node(self.root, Affine2::IDENTITY, target);
    }

    fn draw_node(&self, node: NodeId, parent: Affine2, target: &mut dyn RenderTarget) {
        let Some(local) = self.transform(node) else {
            return;
        };
        let transform = parent * local.to_affine();

        if let Ok(sprite) = self.world.get::<&Sprite>(node) {
            target.draw_sprite(sprite.texture, transform);
        }

        let mut index = 0;
        while let Some(child) = self.child_at(node, index) {
            self.draw_node(child, transform, target);
            index += 1;
        }
    }

    /// Record a gameplay event for the current update.
    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Remove `child` from `parent`'s child list. Returns whether it was there.
    fn unlink(&mut self, parent: NodeId, child: NodeId) -> bool {
        let Ok(mut node) = self.world.get::<&mut SceneNode>(parent) else {
            return false;
        };
        match node.children.iter().position(|&c| c == child) {
            Some(index) => {
                node.children.remove(index);
                true
            }
            None => false,
        }
    }
}
