/// Ray queries: rays, hit records, and a box-shaped leaf content.

use std::cmp::Ordering;
use glam::Vec3;
use crate::scene::{NodeKey, Attachable, HitTestable, Drawable, Disposable};

/// A ray in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Start point
    pub origin: Vec3,
    /// Unit direction
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray; `direction` is normalized
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Point at distance `t` along the ray
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// One intersection found during a hit test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitTestResult {
    /// Node that was hit
    pub node: NodeKey,
    /// Distance from the ray origin
    pub distance: f32,
    /// World-space hit point
    pub point: Vec3,
}

/// Sort hits nearest first
pub fn sort_hits(hits: &mut [HitTestResult]) {
    hits.sort_by(|a, b| a.distance.partial_cmp(&b.distance).unwrap_or(Ordering::Equal));
}

/// Axis-Aligned Bounding Box
#[derive(Debug, Clone, Copy, PartialEq)]
#[allow(clippy::upper_case_acronyms)]
pub struct AABB {
    /// Minimum corner (x, y, z)
    pub min: Vec3,
    /// Maximum corner (x, y, z)
    pub max: Vec3,
}

impl AABB {
    /// Box from two corners (order does not matter)
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self { min: a.min(b), max: a.max(b) }
    }

    /// Test if a point lies inside or on the boundary
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Slab test. Returns the distance to the entry point, or 0 when the ray
    /// starts inside the box. `None` if the ray misses or the box is behind it.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        let mut t_min = 0.0_f32;
        let mut t_max = f32::INFINITY;

        for axis in 0..3 {
            let origin = ray.origin[axis];
            let direction = ray.direction[axis];
            if direction.abs() < f32::EPSILON {
                if origin < self.min[axis] || origin > self.max[axis] {
                    return None;
                }
                continue;
            }
            let inv = 1.0 / direction;
            let mut t0 = (self.min[axis] - origin) * inv;
            let mut t1 = (self.max[axis] - origin) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            t_min = t_min.max(t0);
            t_max = t_max.min(t1);
            if t_min > t_max {
                return None;
            }
        }

        Some(t_min)
    }
}

/// Leaf content shaped as an axis-aligned box
#[derive(Debug, Clone, Copy)]
pub struct BoxNode {
    pub bounds: AABB,
}

impl BoxNode {
    pub fn new(bounds: AABB) -> Self {
        Self { bounds }
    }
}

impl HitTestable for BoxNode {
    fn hit_test(&self, node: NodeKey, ray: &Ray, hits: &mut Vec<HitTestResult>) -> bool {
        match self.bounds.intersect_ray(ray) {
            Some(distance) => {
                hits.push(HitTestResult { node, distance, point: ray.at(distance) });
                true
            }
            None => false,
        }
    }
}

impl Attachable for BoxNode {}
impl Drawable for BoxNode {}
impl Disposable for BoxNode {}

#[cfg(test)]
#[path = "hit_test_tests.rs"]
mod tests;
