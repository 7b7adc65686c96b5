//! Flat arena scene graph.
//!
//! Nodes live in one `Vec`, reference their parent by index, and carry a
//! position / z-rotation / scale triple, the only degrees of freedom the
//! carousel needs. World matrices are rebuilt once per frame by
//! [`SceneGraph::update_world_transforms`] in a single in-order pass; a
//! node's parent is always created before it, so the pass never reads a
//! stale parent matrix.

use glam::{Mat4, Quat, Vec3};

/// Handle to a node in a [`SceneGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeId(usize);

/// One transform node: local TRS plus a cached world matrix.
#[derive(Debug, Clone)]
pub struct Node {
    parent: Option<NodeId>,
    /// Local translation.
    pub position: Vec3,
    /// Local rotation about the Z axis, in radians.
    pub rotation_z: f32,
    /// Local scale.
    pub scale: Vec3,
    world: Mat4,
}

impl Node {
    fn new(parent: Option<NodeId>) -> Self {
        Self {
            parent,
            position: Vec3::ZERO,
            rotation_z: 0.0,
            scale: Vec3::ONE,
            world: Mat4::IDENTITY,
        }
    }

    fn local_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            self.scale,
            Quat::from_rotation_z(self.rotation_z),
            self.position,
        )
    }
}

/// Arena of transform nodes with explicit parent indices.
#[derive(Debug, Default)]
pub struct SceneGraph {
    nodes: Vec<Node>,
}

impl SceneGraph {
    /// Empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Add a node under `parent` (or at the root with `None`).
    ///
    /// Because a parent handle must already exist to be passed here,
    /// insertion order is a topological order; the recompute pass relies
    /// on that.
    pub fn add_node(&mut self, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(parent));
        id
    }

    /// Immutable access to a node.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Mutable access to a node's local transform.
    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    /// Number of nodes in the scene.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the scene has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Rebuild every node's world matrix from its local TRS and its
    /// parent's (already rebuilt) world matrix.
    pub fn update_world_transforms(&mut self) {
        for i in 0..self.nodes.len() {
            let local = self.nodes[i].local_matrix();
            self.nodes[i].world = match self.nodes[i].parent {
                Some(parent) => self.nodes[parent.0].world * local,
                None => local,
            };
        }
    }

    /// The world matrix computed by the last
    /// [`update_world_transforms`](Self::update_world_transforms) pass.
    #[must_use]
    pub fn world_matrix(&self, id: NodeId) -> Mat4 {
        self.nodes[id.0].world
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_world_matrix_is_local() {
        let mut scene = SceneGraph::new();
        let root = scene.add_node(None);
        scene.node_mut(root).position = Vec3::new(1.0, 2.0, 3.0);
        scene.update_world_transforms();

        let p = scene.world_matrix(root).transform_point3(Vec3::ZERO);
        assert!((p - Vec3::new(1.0, 2.0, 3.0)).length() < 1e-6);
    }

    #[test]
    fn child_composes_with_parent() {
        let mut scene = SceneGraph::new();
        let parent = scene.add_node(None);
        let child = scene.add_node(Some(parent));
        scene.node_mut(parent).position = Vec3::new(5.0, 0.0, 0.0);
        scene.node_mut(child).position = Vec3::new(0.0, -1.0, 0.0);
        scene.update_world_transforms();

        let p = scene.world_matrix(child).transform_point3(Vec3::ZERO);
        assert!((p - Vec3::new(5.0, -1.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn child_inherits_parent_scale() {
        let mut scene = SceneGraph::new();
        let parent = scene.add_node(None);
        let child = scene.add_node(Some(parent));
        scene.node_mut(parent).scale = Vec3::new(4.0, 2.0, 1.0);
        // Local offset of half a parent-height downward.
        scene.node_mut(child).position = Vec3::new(0.0, -0.5, 0.0);
        scene.update_world_transforms();

        let p = scene.world_matrix(child).transform_point3(Vec3::ZERO);
        assert!((p.y - (-1.0)).abs() < 1e-6);
    }

    #[test]
    fn recompute_pass_tracks_mutation() {
        let mut scene = SceneGraph::new();
        let node = scene.add_node(None);
        scene.update_world_transforms();
        let before = scene.world_matrix(node);

        scene.node_mut(node).rotation_z = std::f32::consts::FRAC_PI_2;
        scene.update_world_transforms();
        let after = scene.world_matrix(node);

        assert_ne!(before, after);
        let p = after.transform_point3(Vec3::X);
        assert!((p - Vec3::Y).length() < 1e-6);
    }
}
