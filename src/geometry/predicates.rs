//! Intersection predicates: AABB-AABB (on `Aabb` itself), AABB-triangle (a
//! 13-axis separating-axis test), and a robust triangle-triangle test with
//! an explicit coplanar fallback.
//!
//! The triangle-triangle predicate is a port of the teacher's
//! `TriangleTriangleCPU::moller_test` and its helper functions, adapted to
//! operate on triangles that already carry world-space vertices (the
//! teacher's version re-applied a world transform on every call).

use cgmath::{InnerSpace, Point3, Vector3};

use super::aabb::Aabb;
use super::triangle::Triangle;

/// Separating-axis test between an AABB and a triangle: 3 box face axes, 1
/// triangle normal, 9 edge-edge cross products. Touching counts as
/// overlapping (no strict separation found).
pub fn aabb_intersects_triangle(aabb: &Aabb, tri: &Triangle) -> bool {
    // box axes: equivalent to checking the triangle's own AABB against `aabb`
    if !aabb.intersects(&tri.bbox()) {
        return false;
    }

    let center = aabb.center();
    let extent = Vector3::new(
        (aabb.max.x - aabb.min.x) / 2.0,
        (aabb.max.y - aabb.min.y) / 2.0,
        (aabb.max.z - aabb.min.z) / 2.0,
    );

    let v0 = tri.v0 - center;
    let v1 = tri.v1 - center;
    let v2 = tri.v2 - center;

    let f0 = v1 - v0;
    let f1 = v2 - v1;
    let f2 = v0 - v2;

    let box_axes = [
        Vector3::new(1.0, 0.0, 0.0),
        Vector3::new(0.0, 1.0, 0.0),
        Vector3::new(0.0, 0.0, 1.0),
    ];

    // 9 edge-edge cross product axes
    for edge in &[f0, f1, f2] {
        for axis in &box_axes {
            let a = axis.cross(*edge);
            if a.magnitude2() < 1e-18 {
                continue; // parallel edge/box-axis, no separating axis here
            }
            if separates(a, v0, v1, v2, extent) {
                return false;
            }
        }
    }

    // triangle face normal axis
    let n = f0.cross(f1);
    if n.magnitude2() > 1e-18 && separates(n, v0, v1, v2, extent) {
        return false;
    }

    true
}

/// Returns true if `axis` separates the (already box-centered) triangle
/// vertices from the box of half-extents `extent` centered at the origin.
fn separates(
    axis: Vector3<f64>,
    v0: Vector3<f64>,
    v1: Vector3<f64>,
    v2: Vector3<f64>,
    extent: Vector3<f64>,
) -> bool {
    let p0 = v0.dot(axis);
    let p1 = v1.dot(axis);
    let p2 = v2.dot(axis);
    let r = extent.x * axis.x.abs() + extent.y * axis.y.abs() + extent.z * axis.z.abs();
    let tri_min = p0.min(p1).min(p2);
    let tri_max = p0.max(p1).max(p2);
    tri_min > r || tri_max < -r
}

/// Epsilon for the triangle-triangle predicate, scaled to scene size per
/// the coplanar-tolerance design decision in `DESIGN.md`.
pub fn coplanar_epsilon(scene_bbox_diagonal: f64) -> f64 {
    1e-9 * scene_bbox_diagonal.max(1.0)
}

/// Robust triangle-triangle overlap test (Moller 1997), including the
/// coplanar case. Returns true iff the closed triangles share a point.
pub fn triangles_intersect(a: &Triangle, b: &Triangle, eps: f64) -> bool {
    let (n_a, d_a) = plane_of(a);
    let (n_b, d_b) = plane_of(b);

    let dist_a_to_b = signed_distances(a, n_b, d_b);
    if is_coplanar(dist_a_to_b, eps) {
        return coplanar_test(a, b, n_a, eps);
    }
    if same_sign_nonzero(dist_a_to_b, eps) {
        return false;
    }

    let dist_b_to_a = signed_distances(b, n_a, d_a);
    if same_sign_nonzero(dist_b_to_a, eps) {
        return false;
    }

    let line_dir = n_a.cross(n_b);
    if line_dir.magnitude2() < eps * eps {
        // nearly parallel, non-coplanar planes: treat as a degenerate miss
        return false;
    }

    let (a_min, a_max) = interval_on_line(a, dist_a_to_b, line_dir);
    let (b_min, b_max) = interval_on_line(b, dist_b_to_a, line_dir);
    interval_overlap(a_min, a_max, b_min, b_max, eps)
}

fn plane_of(t: &Triangle) -> (Vector3<f64>, f64) {
    let n = (t.v1 - t.v0).cross(t.v2 - t.v0);
    let d = -n.dot(t.v0.to_vec());
    (n, d)
}

fn signed_distances(t: &Triangle, n: Vector3<f64>, d: f64) -> [f64; 3] {
    [
        n.dot(t.v0.to_vec()) + d,
        n.dot(t.v1.to_vec()) + d,
        n.dot(t.v2.to_vec()) + d,
    ]
}

fn same_sign_nonzero(d: [f64; 3], eps: f64) -> bool {
    (d[0] > eps && d[1] > eps && d[2] > eps) || (d[0] < -eps && d[1] < -eps && d[2] < -eps)
}

fn is_coplanar(d: [f64; 3], eps: f64) -> bool {
    d.iter().all(|&x| x.abs() <= eps)
}

/// Index of the vertex lying alone on one side of the other triangle's
/// plane (ties broken toward index 2, matching the teacher's `opp_vert`).
fn opp_vert(d: [f64; 3]) -> usize {
    let sign = |x: f64| x >= 0.0;
    if sign(d[0]) == sign(d[1]) {
        2
    } else if sign(d[1]) == sign(d[2]) {
        0
    } else {
        1
    }
}

fn get_t(d_iso: f64, d_other: f64) -> f64 {
    let denom = d_iso - d_other;
    if denom.abs() < 1e-18 {
        0.5
    } else {
        d_iso / denom
    }
}

fn interval_on_line(t: &Triangle, d: [f64; 3], line_dir: Vector3<f64>) -> (f64, f64) {
    let verts = t.vertices();
    let iso = opp_vert(d);
    let o1 = (iso + 1) % 3;
    let o2 = (iso + 2) % 3;

    let t1 = get_t(d[iso], d[o1]);
    let t2 = get_t(d[iso], d[o2]);

    let p1 = verts[iso] + t1 * (verts[o1] - verts[iso]);
    let p2 = verts[iso] + t2 * (verts[o2] - verts[iso]);

    let proj1 = line_dir.dot(p1.to_vec());
    let proj2 = line_dir.dot(p2.to_vec());
    order_interval(proj1, proj2)
}

fn order_interval(a: f64, b: f64) -> (f64, f64) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

fn interval_overlap(a_min: f64, a_max: f64, b_min: f64, b_max: f64, eps: f64) -> bool {
    a_min <= b_max + eps && b_min <= a_max + eps
}

/// Coplanar case: project both triangles onto the axis-aligned plane that
/// best preserves area (the plane orthogonal to the dominant normal
/// component, per `abs_max_dim`), then run a 2D triangle-triangle test.
fn coplanar_test(a: &Triangle, b: &Triangle, normal: Vector3<f64>, eps: f64) -> bool {
    let drop_axis = abs_max_dim(normal);
    let proj = |p: Point3<f64>| -> (f64, f64) {
        match drop_axis {
            0 => (p.y, p.z),
            1 => (p.x, p.z),
            _ => (p.x, p.y),
        }
    };
    let ta: Vec<(f64, f64)> = a.vertices().iter().map(|&v| proj(v)).collect();
    let tb: Vec<(f64, f64)> = b.vertices().iter().map(|&v| proj(v)).collect();
    triangle_intersection_2d(&ta, &tb, eps)
}

fn abs_max_dim(v: Vector3<f64>) -> usize {
    let ax = v.x.abs();
    let ay = v.y.abs();
    let az = v.z.abs();
    if ax >= ay && ax >= az {
        0
    } else if ay >= az {
        1
    } else {
        2
    }
}

fn cross2(o: (f64, f64), a: (f64, f64), b: (f64, f64)) -> f64 {
    (a.0 - o.0) * (b.1 - o.1) - (a.1 - o.1) * (b.0 - o.0)
}

fn line_intersection_2d(
    p1: (f64, f64),
    p2: (f64, f64),
    p3: (f64, f64),
    p4: (f64, f64),
    eps: f64,
) -> bool {
    let d1 = cross2(p3, p4, p1);
    let d2 = cross2(p3, p4, p2);
    let d3 = cross2(p1, p2, p3);
    let d4 = cross2(p1, p2, p4);
    ((d1 > eps && d2 < -eps) || (d1 < -eps && d2 > eps))
        && ((d3 > eps && d4 < -eps) || (d3 < -eps && d4 > eps))
}

fn point_in_triangle_2d(p: (f64, f64), t: &[(f64, f64)], eps: f64) -> bool {
    let d0 = cross2(t[0], t[1], p);
    let d1 = cross2(t[1], t[2], p);
    let d2 = cross2(t[2], t[0], p);
    let has_neg = d0 < -eps || d1 < -eps || d2 < -eps;
    let has_pos = d0 > eps || d1 > eps || d2 > eps;
    !(has_neg && has_pos)
}

fn triangle_intersection_2d(a: &[(f64, f64)], b: &[(f64, f64)], eps: f64) -> bool {
    for i in 0..3 {
        for j in 0..3 {
            if line_intersection_2d(a[i], a[(i + 1) % 3], b[j], b[(j + 1) % 3], eps) {
                return true;
            }
        }
    }
    a.iter().any(|&p| point_in_triangle_2d(p, b, eps))
        || b.iter().any(|&p| point_in_triangle_2d(p, a, eps))
}

#[cfg(test)]
mod test {
    use super::*;
    use cgmath::Point3;

    fn tri(v0: (f64, f64, f64), v1: (f64, f64, f64), v2: (f64, f64, f64)) -> Triangle {
        Triangle::new(
            0,
            0,
            Point3::new(v0.0, v0.1, v0.2),
            Point3::new(v1.0, v1.1, v1.2),
            Point3::new(v2.0, v2.1, v2.2),
            Vector3::new(0.0, 0.0, 1.0),
        )
    }

    #[test]
    fn aabb_triangle_overlap() {
        let b = Aabb::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0));
        let t = tri((0.0, 0.0, 0.0), (2.0, 0.0, 0.0), (0.0, 2.0, 0.0));
        assert!(aabb_intersects_triangle(&b, &t));
    }

    #[test]
    fn aabb_triangle_disjoint() {
        let b = Aabb::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0));
        let t = tri((5.0, 5.0, 5.0), (6.0, 5.0, 5.0), (5.0, 6.0, 5.0));
        assert!(!aabb_intersects_triangle(&b, &t));
    }

    #[test]
    fn aabb_triangle_edge_only_separation() {
        // thin triangle that straddles the box's corner region along a
        // diagonal, requiring an edge-edge axis to separate.
        let b = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0));
        let t = tri((2.0, -1.0, 0.5), (-1.0, 2.0, 0.5), (10.0, 10.0, 0.5));
        assert!(!aabb_intersects_triangle(&b, &t));
    }

    #[test]
    fn crossing_triangles_intersect() {
        let a = tri((-1.0, 0.0, -1.0), (1.0, 0.0, -1.0), (0.0, 0.0, 1.0));
        let b = tri((0.0, -1.0, 0.0), (0.0, 1.0, -1.0), (0.0, 1.0, 1.0));
        assert!(triangles_intersect(&a, &b, 1e-9));
    }

    #[test]
    fn disjoint_triangles_do_not_intersect() {
        let a = tri((0.0, 0.0, 0.0), (1.0, 0.0, 0.0), (0.0, 1.0, 0.0));
        let b = tri((10.0, 10.0, 10.0), (11.0, 10.0, 10.0), (10.0, 11.0, 10.0));
        assert!(!triangles_intersect(&a, &b, 1e-9));
    }

    #[test]
    fn coplanar_overlapping_triangles_intersect() {
        let a = tri((0.0, 0.0, 0.0), (2.0, 0.0, 0.0), (0.0, 2.0, 0.0));
        let b = tri((1.0, 1.0, 0.0), (3.0, 1.0, 0.0), (1.0, 3.0, 0.0));
        assert!(triangles_intersect(&a, &b, 1e-9));
    }

    #[test]
    fn coplanar_disjoint_triangles_do_not_intersect() {
        let a = tri((0.0, 0.0, 0.0), (1.0, 0.0, 0.0), (0.0, 1.0, 0.0));
        let b = tri((5.0, 5.0, 0.0), (6.0, 5.0, 0.0), (5.0, 6.0, 0.0));
        assert!(!triangles_intersect(&a, &b, 1e-9));
    }

    #[test]
    fn coplanar_contained_triangle_intersects() {
        let outer = tri((-5.0, -5.0, 0.0), (5.0, -5.0, 0.0), (0.0, 5.0, 0.0));
        let inner = tri((0.0, -1.0, 0.0), (1.0, 0.0, 0.0), (-1.0, 0.0, 0.0));
        assert!(triangles_intersect(&outer, &inner, 1e-9));
    }

    #[test]
    fn touching_triangles_intersect() {
        let a = tri((0.0, 0.0, 0.0), (1.0, 0.0, 0.0), (0.0, 1.0, 0.0));
        let b = tri((1.0, 0.0, 0.0), (2.0, 0.0, 0.0), (1.0, 1.0, 0.0));
        assert!(triangles_intersect(&a, &b, 1e-9));
    }
}
