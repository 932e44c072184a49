use std::collections::HashSet;

use crate::geometry::{triangles_intersect, Triangle};

use super::octree::OctreeNode;

/// Simultaneous descent of two octrees, collecting the face ids of every
/// triangle pair that actually intersects.
///
/// Grounded on the teacher's `descend_heirarchy` worklist-based dual BVH
/// walk, generalized from binary to 8-ary children. Unlike a naive
/// leaf-vs-leaf-only descent, a node's own triangle bucket (leaf *or*
/// interior — see `octree.rs`'s "stuck at interior" case) is always paired
/// against every triangle reachable from the current node on the other
/// side, so no triangle is silently skipped.
pub fn query(a: &OctreeNode, b: &OctreeNode, eps: f64) -> (HashSet<u32>, HashSet<u32>) {
    let mut faces_a = HashSet::new();
    let mut faces_b = HashSet::new();
    descend(a, b, eps, &mut faces_a, &mut faces_b);
    (faces_a, faces_b)
}

fn descend(
    a: &OctreeNode,
    b: &OctreeNode,
    eps: f64,
    faces_a: &mut HashSet<u32>,
    faces_b: &mut HashSet<u32>,
) {
    if !a.bbox().intersects(b.bbox()) {
        return;
    }

    if !a.triangles().is_empty() {
        let reachable_b = collect_all(b);
        pair_and_record(a.triangles(), &reachable_b, eps, faces_a, faces_b);
    }
    if !b.triangles().is_empty() {
        let reachable_a = collect_all(a);
        pair_and_record(&reachable_a, b.triangles(), eps, faces_a, faces_b);
    }

    match (a.children(), b.children()) {
        (None, None) => {}
        (None, Some(bc)) => {
            for c in bc {
                descend(a, c, eps, faces_a, faces_b);
            }
        }
        (Some(ac), None) => {
            for c in ac {
                descend(c, b, eps, faces_a, faces_b);
            }
        }
        (Some(ac), Some(bc)) => {
            for ca in ac {
                for cb in bc {
                    descend(ca, cb, eps, faces_a, faces_b);
                }
            }
        }
    }
}

/// Every triangle stored anywhere in `node`'s subtree (its own bucket plus
/// all descendants).
fn collect_all(node: &OctreeNode) -> Vec<Triangle> {
    let mut out = node.triangles().to_vec();
    if let Some(children) = node.children() {
        for c in children {
            out.extend(collect_all(c));
        }
    }
    out
}

#[cfg(feature = "parallel")]
fn pair_and_record(
    a_tris: &[Triangle],
    b_tris: &[Triangle],
    eps: f64,
    faces_a: &mut HashSet<u32>,
    faces_b: &mut HashSet<u32>,
) {
    use rayon::prelude::*;

    let hits: Vec<(u32, u32)> = a_tris
        .par_iter()
        .flat_map_iter(|ta| {
            b_tris.iter().filter_map(move |tb| {
                if triangles_intersect(ta, tb, eps) {
                    Some((ta.face_id, tb.face_id))
                } else {
                    None
                }
            })
        })
        .collect();

    for (fa, fb) in hits {
        faces_a.insert(fa);
        faces_b.insert(fb);
    }
}

#[cfg(not(feature = "parallel"))]
fn pair_and_record(
    a_tris: &[Triangle],
    b_tris: &[Triangle],
    eps: f64,
    faces_a: &mut HashSet<u32>,
    faces_b: &mut HashSet<u32>,
) {
    for ta in a_tris {
        for tb in b_tris {
            if triangles_intersect(ta, tb, eps) {
                faces_a.insert(ta.face_id);
                faces_b.insert(tb.face_id);
            }
        }
    }
}
