use crate::collision::Polygon;
use crate::math::Vec2;

/// Broad phase: do the bounding boxes of `a` at `pos_a` and `b` at `pos_b` overlap?
///
/// Never false when [`intersect`] would report a hit.
pub fn aabb_overlap(a: &Polygon, pos_a: Vec2, b: &Polygon, pos_b: Vec2) -> bool {
    let (one_min, one_max) = a.bounds(pos_a);
    let (two_min, two_max) = b.bounds(pos_b);

    !(two_min.x > one_max.x
        || two_max.x < one_min.x
        || two_min.y > one_max.y
        || two_max.y < one_min.y)
}

#[derive(Copy, Clone, Debug)]
struct Axis {
    normal: Vec2,
    magnitude: f32,
}

// Tests the normals of `sides` and returns the one with the smallest overlap,
// or None as soon as one of them separates the shapes.
fn least_overlap_axis(
    sides: &[Vec2],
    a: &Polygon,
    pos_a: Vec2,
    b: &Polygon,
    pos_b: Vec2,
) -> Option<Axis> {
    let mut best = Axis {
        normal: Vec2::ZERO,
        magnitude: f32::MAX,
    };

    for &side in sides {
        let axis = side.normalize();

        let one = a.project(axis, pos_a);
        let two = b.project(axis, pos_b);
        if one.is_disjoint(two) {
            return None;
        }

        // Touching counts as separated.
        let overlap = one.overlap(two);
        if overlap <= 0.0 {
            return None;
        }

        if overlap < best.magnitude {
            best = Axis {
                normal: axis,
                magnitude: overlap,
            };
        }
    }

    Some(best)
}

/// Narrow phase: separating-axis test between `a` at `pos_a` and `b` at `pos_b`.
///
/// Returns the minimum translation vector to apply to `a` to push it out of
/// `b` (apply the negation to `b`), or `None` if the shapes do not overlap.
pub fn intersect(a: &Polygon, pos_a: Vec2, b: &Polygon, pos_b: Vec2) -> Option<Vec2> {
    intersect_from(a, pos_a, pos_a, b, pos_b)
}

/// Like [`intersect`] with `a` tested at `goal`, but the result is oriented
/// from `a`'s centroid at `origin`, where it was before the move.
///
/// A body whose goal already crossed the middle of `b` is still pushed back
/// the way it came. The result is flipped only when it has a strictly positive
/// dot product with the centroid-to-centroid vector; a tie keeps the sign.
pub fn intersect_from(
    a: &Polygon,
    origin: Vec2,
    goal: Vec2,
    b: &Polygon,
    pos_b: Vec2,
) -> Option<Vec2> {
    if !aabb_overlap(a, goal, b, pos_b) {
        return None;
    }

    let one = least_overlap_axis(a.sides(), a, goal, b, pos_b)?;
    let two = least_overlap_axis(b.sides(), a, goal, b, pos_b)?;

    let result = if one.magnitude < two.magnitude {
        one.normal * one.magnitude
    } else {
        -(two.normal * two.magnitude)
    };

    // Point away from b.
    let direction = b.center(pos_b) - a.center(origin);
    if direction.dot(result) > 0.0 {
        Some(-result)
    } else {
        Some(result)
    }
}
