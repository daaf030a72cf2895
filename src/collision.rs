//! Circle-circle contact detection and response.
//!
//! Every unordered pair is tested each frame. A contact is first resolved positionally (the
//! overlap is split by inverse mass) and then, if the pair is still closing along the contact
//! normal, by an equal-and-opposite impulse. Pairs are handled one at a time with no iteration,
//! so piles of simultaneous contacts settle over several frames.

use crate::{body::Body, vector::Vec2};

/// Geometry of an overlapping pair, computed before any correction is applied.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Contact {
    /// Unit vector from the first body's center to the second's.
    pub normal: Vec2,
    /// Distance between centers.
    pub distance: f32,
    /// Penetration depth, `r_a + r_b - distance`.
    pub overlap: f32,
}

/// What happened to a pair during resolution.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PairOutcome {
    /// Not touching.
    Apart,
    /// Centers (nearly) coincide; no normal exists, so the pair is skipped this frame.
    Coincident,
    /// Overlap corrected but velocities kept, because the pair was already separating.
    Separated,
    /// Overlap corrected and an impulse of the given magnitude applied.
    Impulse(f32),
}

/// Returns the contact between `a` and `b` if they overlap.
///
/// A contact exists iff `eps < |pb - pa|^2 < (ra + rb)^2`. Use [`is_coincident`] to tell a
/// degenerate overlap apart from no overlap.
pub fn detect(a: &Body, b: &Body, eps: f32) -> Option<Contact> {
    let delta = b.pos - a.pos;
    let dist_sq = delta.mag_sq();
    let min_dist = a.radius() + b.radius();
    if dist_sq <= eps || dist_sq >= min_dist * min_dist {
        return None;
    }
    let distance = dist_sq.sqrt();
    Some(Contact {
        normal: delta / distance,
        distance,
        overlap: min_dist - distance,
    })
}

/// True if the centers of `a` and `b` are within `sqrt(eps)` of each other.
#[inline]
pub fn is_coincident(a: &Body, b: &Body, eps: f32) -> bool {
    (b.pos - a.pos).mag_sq() <= eps
}

/// Pushes the pair apart along the contact normal until they just touch.
///
/// Each body moves by its share of the combined inverse mass; nothing moves if both are
/// immovable.
pub fn separate(a: &mut Body, b: &mut Body, contact: &Contact) {
    let total_inv_mass = a.inv_mass() + b.inv_mass();
    if total_inv_mass <= 0.0 {
        return;
    }
    let correction = contact.normal * (contact.overlap / total_inv_mass);
    a.pos -= correction * a.inv_mass();
    b.pos += correction * b.inv_mass();
}

/// Applies the restitution impulse along the contact normal.
///
/// Returns the impulse magnitude, or `None` if the bodies are not approaching each other
/// (`dot(vb - va, n) >= 0`) or both are immovable.
pub fn apply_impulse(a: &mut Body, b: &mut Body, contact: &Contact, restitution: f32) -> Option<f32> {
    let n = contact.normal;
    let vel_along_normal = (b.vel - a.vel).dot(n);
    if vel_along_normal >= 0.0 {
        return None;
    }
    let total_inv_mass = a.inv_mass() + b.inv_mass();
    if total_inv_mass <= 0.0 {
        return None;
    }

    let j = -(1.0 + restitution) * vel_along_normal / total_inv_mass;
    let impulse = n * j;
    a.vel -= impulse * a.inv_mass();
    b.vel += impulse * b.inv_mass();
    Some(j)
}

/// Detects and resolves a single pair.
pub fn resolve_pair(a: &mut Body, b: &mut Body, restitution: f32, eps: f32) -> PairOutcome {
    let Some(contact) = detect(a, b, eps) else {
        return if is_coincident(a, b, eps) {
            PairOutcome::Coincident
        } else {
            PairOutcome::Apart
        };
    };

    separate(a, b, &contact);
    match apply_impulse(a, b, &contact, restitution) {
        Some(j) => PairOutcome::Impulse(j),
        None => PairOutcome::Separated,
    }
}

/// Resolves every unordered pair of `bodies` in index order.
///
/// Returns the number of impulse events applied.
pub fn resolve_all(bodies: &mut [Body], restitution: f32, eps: f32) -> u64 {
    let mut impulses = 0;
    for j in 1..bodies.len() {
        let (head, tail) = bodies.split_at_mut(j);
        let b = &mut tail[0];
        for (i, a) in head.iter_mut().enumerate() {
            match resolve_pair(a, b, restitution, eps) {
                PairOutcome::Impulse(magnitude) => {
                    impulses += 1;
                    log::trace!("impulse {magnitude} between bodies {i} and {j}");
                }
                PairOutcome::Coincident => {
                    log::trace!("bodies {i} and {j} share a center, skipping");
                }
                PairOutcome::Apart | PairOutcome::Separated => {}
            }
        }
    }
    impulses
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-6;

    fn body(pos: (f32, f32), vel: (f32, f32), mass: f32, radius: f32) -> Body {
        Body::new(Vec2::new(pos.0, pos.1), Vec2::new(vel.0, vel.1), mass, radius).unwrap()
    }

    #[test]
    fn detects_overlap_only() {
        let a = body((0.0, 0.0), (0.0, 0.0), 1.0, 1.0);
        let b = body((1.5, 0.0), (0.0, 0.0), 1.0, 1.0);
        let c = detect(&a, &b, EPS).unwrap();
        assert_eq!(c.normal, Vec2::new(1.0, 0.0));
        assert!((c.distance - 1.5).abs() < 1e-6);
        assert!((c.overlap - 0.5).abs() < 1e-6);

        let touching = body((2.0, 0.0), (0.0, 0.0), 1.0, 1.0);
        assert!(detect(&a, &touching, EPS).is_none());
    }

    #[test]
    fn coincident_centers_are_skipped() {
        let mut a = body((3.0, 3.0), (1.0, 0.0), 1.0, 1.0);
        let mut b = body((3.0, 3.0), (-1.0, 0.0), 1.0, 1.0);
        assert_eq!(resolve_pair(&mut a, &mut b, 1.0, EPS), PairOutcome::Coincident);
        assert_eq!(a.pos, b.pos);
        assert_eq!(a.vel, Vec2::new(1.0, 0.0));
        assert_eq!(b.vel, Vec2::new(-1.0, 0.0));
    }

    #[test]
    fn separation_splits_by_inverse_mass() {
        let mut a = body((0.0, 0.0), (0.0, 0.0), 1.0, 1.0);
        let mut b = body((1.0, 0.0), (0.0, 0.0), 1.0, 1.0);
        let c = detect(&a, &b, EPS).unwrap();
        separate(&mut a, &mut b, &c);
        assert!((a.pos.x + 0.5).abs() < 1e-6);
        assert!((b.pos.x - 1.5).abs() < 1e-6);

        // heavier body moves less
        let mut a = body((0.0, 0.0), (0.0, 0.0), 3.0, 1.0);
        let mut b = body((1.0, 0.0), (0.0, 0.0), 1.0, 1.0);
        let c = detect(&a, &b, EPS).unwrap();
        separate(&mut a, &mut b, &c);
        assert!((a.pos.x + 0.25).abs() < 1e-6);
        assert!((b.pos.x - 1.75).abs() < 1e-6);
    }

    #[test]
    fn immovable_body_takes_all_of_nothing() {
        let mut wall = Body::immovable(Vec2::new(0.0, 0.0), 1.0).unwrap();
        let mut b = body((1.0, 0.0), (-4.0, 0.0), 2.0, 1.0);
        let outcome = resolve_pair(&mut wall, &mut b, 1.0, EPS);
        assert!(matches!(outcome, PairOutcome::Impulse(_)));
        assert_eq!(wall.pos, Vec2::zero());
        assert_eq!(wall.vel, Vec2::zero());
        assert!((b.pos.x - 2.0).abs() < 1e-6);
        assert!((b.vel.x - 4.0).abs() < 1e-5);
    }

    #[test]
    fn both_immovable_is_a_no_op() {
        let mut a = Body::immovable(Vec2::new(0.0, 0.0), 1.0).unwrap();
        let mut b = Body::immovable(Vec2::new(1.0, 0.0), 1.0).unwrap();
        assert_eq!(resolve_pair(&mut a, &mut b, 1.0, EPS), PairOutcome::Separated);
        assert_eq!(a.pos, Vec2::new(0.0, 0.0));
        assert_eq!(b.pos, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn separating_pair_keeps_velocities() {
        let mut a = body((0.0, 0.0), (-1.0, 2.0), 1.0, 1.0);
        let mut b = body((1.0, 0.0), (3.0, 0.0), 1.0, 1.0);
        assert_eq!(resolve_pair(&mut a, &mut b, 1.0, EPS), PairOutcome::Separated);
        assert_eq!(a.vel, Vec2::new(-1.0, 2.0));
        assert_eq!(b.vel, Vec2::new(3.0, 0.0));
        // positions were still corrected
        assert!(((b.pos - a.pos).mag() - 2.0).abs() < 1e-5);
    }

    #[test]
    fn inelastic_contact_kills_normal_velocity() {
        let mut a = body((0.0, 0.0), (5.0, 1.0), 1.0, 1.0);
        let mut b = body((1.5, 0.0), (-5.0, -1.0), 1.0, 1.0);
        resolve_pair(&mut a, &mut b, 0.0, EPS);
        assert!(a.vel.x.abs() < 1e-5);
        assert!(b.vel.x.abs() < 1e-5);
        // tangential components untouched
        assert_eq!(a.vel.y, 1.0);
        assert_eq!(b.vel.y, -1.0);
    }

    #[test]
    fn resolve_all_counts_impulses() {
        let mut bodies = vec![
            body((0.0, 0.0), (1.0, 0.0), 1.0, 1.0),
            body((1.5, 0.0), (-1.0, 0.0), 1.0, 1.0),
            body((10.0, 0.0), (0.0, 0.0), 1.0, 1.0),
            body((10.0, 1.0), (0.0, 1.0), 1.0, 1.0),
        ];
        assert_eq!(resolve_all(&mut bodies, 1.0, EPS), 1);
        assert_eq!(bodies[0].vel, Vec2::new(-1.0, 0.0));
        assert_eq!(bodies[1].vel, Vec2::new(1.0, 0.0));
        // the second pair was separating, only pushed apart
        assert_eq!(bodies[3].vel, Vec2::new(0.0, 1.0));
        assert!(((bodies[3].pos - bodies[2].pos).mag() - 2.0).abs() < 1e-5);
    }
}
