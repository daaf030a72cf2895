//! Native interface for a host that owns the window, the input loop and the renderer.
//!
//! Status-returning calls yield `0` on success and `-1` on failure; index-returning calls
//! yield `-1` when there is no result.

use crate::{
    body::Body,
    bounds::Bounds,
    config::SimConfig,
    scene::{self, RandomSetup},
    simulation::Simulation,
};
use ultraviolet::Vec2;

fn into_handle(sim: crate::Result<Simulation>) -> *mut Simulation {
    match sim {
        Ok(sim) => Box::into_raw(Box::new(sim)),
        Err(e) => {
            log::warn!("simulation not created: {e}");
            std::ptr::null_mut()
        }
    }
}

fn index_or_minus_one(index: Option<usize>) -> i64 {
    index.map_or(-1, |i| i as i64)
}

/// Creates an empty simulation with default world settings in a `width` x `height` box.
/// Returns null if the size is invalid.
#[unsafe(no_mangle)]
pub extern "C" fn Simulation_Create(width: f32, height: f32) -> *mut Simulation {
    let sim = Bounds::from_size(width, height).and_then(|bounds| {
        Simulation::new(SimConfig {
            bounds,
            ..SimConfig::default()
        })
    });
    into_handle(sim)
}

/// Creates a box of `n` random balls. Returns null if they do not fit.
#[unsafe(no_mangle)]
pub extern "C" fn Simulation_CreateRandom(n: usize, seed: u64, width: f32, height: f32) -> *mut Simulation {
    let sim = Bounds::from_size(width, height).and_then(|bounds| {
        let setup = RandomSetup {
            count: n,
            bounds,
            ..RandomSetup::default()
        };
        scene::random_scene(&setup, seed)
    });
    into_handle(sim)
}

/// # Safety
/// `handle` must be null or a pointer returned by one of the create functions, not yet destroyed.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_Destroy(handle: *mut Simulation) {
    if !handle.is_null() {
        unsafe { drop(Box::from_raw(handle)) };
    }
}

/// # Safety
/// `handle` must be null or a live simulation handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_Step(handle: *mut Simulation, dt: f32) -> i32 {
    let Some(sim) = (unsafe { handle.as_mut() }) else {
        return -1;
    };
    match sim.step(dt) {
        Ok(()) => 0,
        Err(e) => {
            log::warn!("step rejected: {e}");
            -1
        }
    }
}

/// Adds a body before the first step. Returns its index, or -1 if rejected.
///
/// # Safety
/// `handle` must be null or a live simulation handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_AddBody(
    handle: *mut Simulation,
    x: f32,
    y: f32,
    vx: f32,
    vy: f32,
    mass: f32,
    radius: f32,
) -> i64 {
    let Some(sim) = (unsafe { handle.as_mut() }) else {
        return -1;
    };
    let added = Body::new(Vec2::new(x, y), Vec2::new(vx, vy), mass, radius)
        .and_then(|body| sim.add_body(body));
    match added {
        Ok(index) => index as i64,
        Err(e) => {
            log::warn!("body rejected: {e}");
            -1
        }
    }
}

/// # Safety
/// `handle` must be null or a live simulation handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_GetBodyCount(handle: *const Simulation) -> usize {
    unsafe { handle.as_ref() }.map_or(0, |sim| sim.bodies().len())
}

/// Pointer to `Simulation_GetBodyCount` bodies, valid until the next mutating call.
///
/// # Safety
/// `handle` must be null or a live simulation handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_GetBodies(handle: *const Simulation) -> *const Body {
    unsafe { handle.as_ref() }.map_or(std::ptr::null(), |sim| sim.bodies().as_ptr())
}

/// # Safety
/// `handle` must be null or a live simulation handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_GetCollisionCount(handle: *const Simulation) -> u64 {
    unsafe { handle.as_ref() }.map_or(0, |sim| sim.collision_count())
}

/// # Safety
/// `handle` must be null or a live simulation handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_PointerPress(handle: *mut Simulation, x: f32, y: f32) -> i64 {
    let index = unsafe { handle.as_mut() }.and_then(|sim| sim.press(Vec2::new(x, y)));
    index_or_minus_one(index)
}

/// # Safety
/// `handle` must be null or a live simulation handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_PointerDrag(handle: *mut Simulation, x: f32, y: f32) -> i32 {
    let moved = unsafe { handle.as_mut() }.is_some_and(|sim| sim.drag(Vec2::new(x, y)));
    if moved { 0 } else { -1 }
}

/// # Safety
/// `handle` must be null or a live simulation handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_PointerRelease(handle: *mut Simulation) -> i64 {
    index_or_minus_one(unsafe { handle.as_mut() }.and_then(Simulation::release))
}

/// # Safety
/// `handle` must be null or a live simulation handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_PointerCancel(handle: *mut Simulation) -> i64 {
    index_or_minus_one(unsafe { handle.as_mut() }.and_then(Simulation::cancel))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifecycle_through_handle() {
        let h = Simulation_Create(100.0, 100.0);
        assert!(!h.is_null());
        unsafe {
            assert_eq!(Simulation_AddBody(h, 50.0, 50.0, 10.0, 0.0, 1.0, 5.0), 0);
            assert_eq!(Simulation_AddBody(h, 50.0, 50.0, 0.0, 0.0, 1.0, -5.0), -1);
            assert_eq!(Simulation_GetBodyCount(h), 1);
            assert_eq!(Simulation_Step(h, 0.01), 0);
            assert_eq!(Simulation_Step(h, -0.01), -1);

            let first = std::slice::from_raw_parts(Simulation_GetBodies(h), Simulation_GetBodyCount(h))[0];
            assert!(first.pos.x > 50.0);
            assert_eq!(Simulation_GetCollisionCount(h), 0);

            let grabbed = Simulation_PointerPress(h, first.pos.x, first.pos.y);
            assert_eq!(grabbed, 0);
            assert_eq!(Simulation_PointerDrag(h, 20.0, 20.0), 0);
            assert_eq!(Simulation_PointerCancel(h), 0);
            assert_eq!(Simulation_PointerRelease(h), -1);
            assert_eq!(Simulation_PointerDrag(h, 20.0, 20.0), -1);

            Simulation_Destroy(h);
        }
    }

    #[test]
    fn invalid_inputs_yield_null_or_sentinels() {
        assert!(Simulation_Create(-1.0, 100.0).is_null());
        assert!(Simulation_CreateRandom(3, 0, 10.0, 10.0).is_null());
        unsafe {
            let null = std::ptr::null_mut();
            assert_eq!(Simulation_Step(null, 0.01), -1);
            assert_eq!(Simulation_GetBodyCount(null), 0);
            assert!(Simulation_GetBodies(null).is_null());
            assert_eq!(Simulation_PointerPress(null, 0.0, 0.0), -1);
            Simulation_Destroy(null);
        }
    }

    #[test]
    fn drag_moves_held_body_through_handle() {
        let h = Simulation_Create(200.0, 200.0);
        unsafe {
            assert_eq!(Simulation_AddBody(h, 100.0, 100.0, 0.0, 0.0, 1.0, 10.0), 0);
            assert_eq!(Simulation_PointerDrag(h, 150.0, 100.0), -1);
            assert_eq!(Simulation_PointerPress(h, 102.0, 100.0), 0);
            assert_eq!(Simulation_PointerDrag(h, 152.0, 120.0), 0);

            let held = *Simulation_GetBodies(h);
            assert_eq!(held.pos, Vec2::new(150.0, 120.0));
            assert!(held.controlled);
            assert_eq!(Simulation_PointerDrag(std::ptr::null_mut(), 0.0, 0.0), -1);

            Simulation_Destroy(h);
        }
    }

    #[test]
    fn random_handle_has_requested_bodies() {
        let h = Simulation_CreateRandom(8, 42, 800.0, 600.0);
        assert!(!h.is_null());
        unsafe {
            assert_eq!(Simulation_GetBodyCount(h), 8);
            for _ in 0..10 {
                assert_eq!(Simulation_Step(h, 1.0 / 60.0), 0);
            }
            Simulation_Destroy(h);
        }
    }
}
