use std::convert::TryInto;

use crate::error::{IntersectionError, Result};
use crate::geometry::{aabb_intersects_triangle, coplanar_epsilon, triangles_intersect, Aabb, Triangle};

/// Leaf capacity before a node splits into 8 octants.
pub const MAX_TRIANGLES_PER_NODE: usize = 10;
/// Absolute recursion depth cap; triangles that would split past this depth
/// are instead deposited on the node they reached (the same fate as a
/// triangle that straddles every child of an interior node).
pub const MAX_DEPTH: u32 = 32;

/// A node of the spatial-division tree. Owns its children and its triangle
/// bucket outright (`Box`-owned, no `Rc`/`Weak`): the tree is rebuilt
/// wholesale on every input change and never needs in-place relocation.
#[derive(Debug)]
pub struct OctreeNode {
    bbox: Aabb,
    children: Option<Box<[OctreeNode; 8]>>,
    triangles: Vec<Triangle>,
}

impl OctreeNode {
    fn new_leaf(bbox: Aabb) -> Self {
        Self {
            bbox,
            children: None,
            triangles: Vec::new(),
        }
    }

    pub fn bbox(&self) -> &Aabb {
        &self.bbox
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn children(&self) -> Option<&[OctreeNode; 8]> {
        self.children.as_deref()
    }

    fn insert(&mut self, tri: Triangle, depth: u32) {
        if depth > MAX_DEPTH {
            self.triangles.push(tri);
            return;
        }

        if self.is_leaf() {
            if self.triangles.len() < MAX_TRIANGLES_PER_NODE {
                self.triangles.push(tri);
            } else {
                self.split();
                self.insert(tri, depth + 1);
            }
            return;
        }

        let accepting: Vec<usize> = self
            .children
            .as_ref()
            .expect("just checked non-leaf")
            .iter()
            .enumerate()
            .filter(|(_, c)| c.bbox.contains_any_vertex(&tri))
            .map(|(i, _)| i)
            .collect();

        if accepting.is_empty() {
            // stuck at interior: no child's region contains a vertex of
            // this triangle. Kept here and included by the traversal fix
            // in `traversal.rs` rather than dropped.
            self.triangles.push(tri);
        } else {
            let children = self.children.as_mut().expect("just checked non-leaf");
            for i in accepting {
                children[i].insert(tri, depth + 1);
            }
        }
    }

    /// Subdivide this leaf into 8 octant children and redistribute its
    /// current triangles among them. Never recurses; `insert` retries
    /// against the now-interior node, which re-splits naturally if needed.
    fn split(&mut self) {
        let children_vec: Vec<OctreeNode> = (0..8u8)
            .map(|i| OctreeNode::new_leaf(self.bbox.octant(i)))
            .collect();
        let mut children: [OctreeNode; 8] = children_vec
            .try_into()
            .unwrap_or_else(|_| panic!("octree always splits into exactly 8 octants"));

        for tri in std::mem::take(&mut self.triangles) {
            let target = (0..8)
                .find(|&i| children[i].bbox.contains_all_vertices(&tri))
                .unwrap_or_else(|| nearest_child_by_centroid(&children, &tri));
            children[target].triangles.push(tri);
        }

        self.children = Some(Box::new(children));
    }

    /// BFS collection of every stored triangle that actually intersects
    /// `tri` (§4.2's `intersect_triangle` query). A stored triangle may
    /// appear more than once if it was duplicated across nodes at insert
    /// time; callers dedup by `Triangle::key`.
    fn collect_intersections(&self, tri: &Triangle, eps: f64, out: &mut Vec<Triangle>) {
        if !aabb_intersects_triangle(&self.bbox, tri) {
            return;
        }
        for stored in &self.triangles {
            if triangles_intersect(stored, tri, eps) {
                out.push(*stored);
            }
        }
        if let Some(children) = &self.children {
            for c in children.iter() {
                c.collect_intersections(tri, eps, out);
            }
        }
    }
}

fn nearest_child_by_centroid(children: &[OctreeNode; 8], tri: &Triangle) -> usize {
    let c = tri.centroid();
    (0..8)
        .min_by(|&a, &b| {
            let da = dist2(children[a].bbox.center(), c);
            let db = dist2(children[b].bbox.center(), c);
            da.partial_cmp(&db)
                .expect("triangle and box coordinates must be finite")
        })
        .expect("8 children always present")
}

fn dist2(a: cgmath::Point3<f64>, b: cgmath::Point3<f64>) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    let dz = a.z - b.z;
    dx * dx + dy * dy + dz * dz
}

/// A single mesh's spatial index: one octree root plus the coplanar-test
/// epsilon derived from its own bounding box at build time.
#[derive(Debug)]
pub struct OctreeKernel {
    root: OctreeNode,
    eps: f64,
}

impl OctreeKernel {
    /// Build a kernel over `triangles`, all already expressed in world
    /// space, bounded by `bbox` (also world space).
    pub fn build(bbox: Aabb, triangles: impl IntoIterator<Item = Triangle>) -> Result<Self> {
        if let Some(axis) = bbox.degenerate_axis() {
            return Err(IntersectionError::DegenerateBBox { axis });
        }

        let eps = coplanar_epsilon(bbox.diagonal());
        let mut root = OctreeNode::new_leaf(bbox);
        let mut count = 0usize;
        for tri in triangles {
            root.insert(tri, 0);
            count += 1;
        }
        if count == 0 {
            tracing::debug!("octree kernel built from an empty triangle soup");
        }

        Ok(Self { root, eps })
    }

    pub fn root(&self) -> &OctreeNode {
        &self.root
    }

    pub fn bbox(&self) -> &Aabb {
        self.root.bbox()
    }

    pub fn eps(&self) -> f64 {
        self.eps
    }

    /// Every stored triangle that intersects `tri`, deduplicated by
    /// `(face_id, triangle_index)`.
    pub fn intersect_triangle(&self, tri: &Triangle) -> Vec<Triangle> {
        let mut out = Vec::new();
        self.root.collect_intersections(tri, self.eps, &mut out);
        out.sort_by_key(Triangle::key);
        out.dedup_by_key(|t| t.key());
        out
    }
}
