use bevy::prelude::*;

/// Distance along `dir` to an oriented box of `size` centred on `xf`.
pub fn ray_hits_obb(origin: Vec3, dir: Vec3, xf: &GlobalTransform, size: Vec3) -> Option<f32> {
    let inv = xf.compute_matrix().inverse();
    let local_origin = inv.transform_point3(origin);
    let local_dir = inv.transform_vector3(dir);
    let half = size * 0.5;
    let t = ray_aabb_hit_t(local_origin, local_dir, -half, half)?;

    // `t` is in local units; report it in world units for depth sorting.
    let world_hit = xf.transform_point(local_origin + local_dir * t);
    Some(world_hit.distance(origin) / dir.length().max(f32::EPSILON))
}

/// Slab-method ray/AABB intersection. Returns the nearest `t >= 0`, or the
/// exit distance when the origin is inside the box.
pub fn ray_aabb_hit_t(origin: Vec3, dir: Vec3, min: Vec3, max: Vec3) -> Option<f32> {
    let mut t_near = f32::NEG_INFINITY;
    let mut t_far = f32::INFINITY;

    for axis in 0..3 {
        let (o, d) = (origin[axis], dir[axis]);
        if d == 0.0 {
            if o < min[axis] || o > max[axis] {
                return None;
            }
            continue;
        }

        let (mut t0, mut t1) = ((min[axis] - o) / d, (max[axis] - o) / d);
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        t_near = t_near.max(t0);
        t_far = t_far.min(t1);
        if t_near > t_far {
            return None;
        }
    }

    if t_far < 0.0 {
        return None;
    }
    Some(if t_near >= 0.0 { t_near } else { t_far })
}
