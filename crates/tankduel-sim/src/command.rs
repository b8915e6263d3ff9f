//! Deferred, category-filtered units of work.
//!
//! Producers (player input, tanks deciding to fire) push commands; the world
//! driver drains the queue once per tick and routes each command through the
//! scene graph.

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tankduel_core::enums::Category;
use tracing::trace;

use crate::scene::{NodeId, SceneGraph};

/// Closure run against every node whose category matches.
pub type Action = dyn Fn(&mut SceneGraph, NodeId, Duration) + Send + Sync;

/// A category filter plus the action to run on matching nodes.
///
/// Cloning is cheap; the action is shared.
#[derive(Clone)]
pub struct Command {
    category: Category,
    action: Arc<Action>,
}

impl Command {
    pub fn new<F>(category: Category, action: F) -> Self
    where
        F: Fn(&mut SceneGraph, NodeId, Duration) + Send + Sync + 'static,
    {
        Self {
            category,
            action: Arc::new(action),
        }
    }

    /// Build a command whose action only needs one component of the target.
    /// Nodes lacking the component are left untouched.
    pub fn derived<T, F>(category: Category, action: F) -> Self
    where
        T: hecs::Component,
        F: Fn(&mut T, Duration) + Send + Sync + 'static,
    {
        Self::new(category, move |graph, node, dt| {
            if let Ok(component) = graph.ecs_mut().query_one_mut::<&mut T>(node) {
                action(component, dt);
            }
        })
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// Whether this command applies to a node of the given category.
    pub fn matches(&self, category: Category) -> bool {
        self.category.intersects(category)
    }

    /// Run the action on `node`. Callers are responsible for the category check.
    pub fn invoke(&self, graph: &mut SceneGraph, node: NodeId, dt: Duration) {
        (self.action)(graph, node, dt);
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("category", &self.category)
            .finish_non_exhaustive()
    }
}

/// FIFO buffer of commands. Insertion order is execution order.
#[derive(Debug, Default)]
pub struct CommandQueue {
    commands: VecDeque<Command>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: Command) {
        trace!(category = ?command.category(), "command queued");
        self.commands.push_back(command);
    }

    /// Remove and return the oldest command, or `None` when empty.
    pub fn pop(&mut self) -> Option<Command> {
        self.commands.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_pop_on_empty_queue() {
        let mut queue = CommandQueue::new();
        assert!(queue.is_empty());
        assert!(queue.pop().is_none());
    }

    #[test]
    fn test_fifo_order() {
        let log = Arc::new(std::sync::Mutex::new(Vec::new()));
        let mut queue = CommandQueue::new();
        for i in 0..8 {
            let log = log.clone();
            queue.push(Command::new(Category::SCENE, move |_, _, _| {
                log.lock().unwrap().push(i);
            }));
        }
        assert_eq!(queue.len(), 8);

        let mut graph = SceneGraph::new();
        let root = graph.root();
        while let Some(command) = queue.pop() {
            command.invoke(&mut graph, root, Duration::ZERO);
        }
        assert_eq!(*log.lock().unwrap(), (0..8).collect::<Vec<_>>());
        assert!(queue.is_empty());
    }

    #[test]
    fn test_clone_shares_action() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let command = Command::new(Category::PICKUP, move |_, _, _| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let copy = command.clone();

        let mut graph = SceneGraph::new();
        let root = graph.root();
        command.invoke(&mut graph, root, Duration::ZERO);
        copy.invoke(&mut graph, root, Duration::ZERO);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(copy.category(), Category::PICKUP);
        assert!(copy.matches(Category::PICKUP | Category::SCENE));
        assert!(!copy.matches(Category::SCENE));
    }
}
