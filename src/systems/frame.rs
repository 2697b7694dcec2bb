//! Per-frame scheduling pass.
//!
//! [`run_frame`] is the whole of one frame:
//!
//! 1. clear the surface;
//! 2. snapshot the live objects in frame order (sort layer, then creation);
//! 3. per object: `start` on its first pass, otherwise each component gets
//!    `start` on its own first pass or `update`, `physics_update` and a
//!    scoped `draw`, then the object gets `update`;
//! 4. flush input edge state;
//! 5. commit pending creations and destructions.
//!
//! A failing hook is logged and the failing component sits out the rest of
//! the frame; the other components and objects are unaffected.

use log::{error, trace};

use crate::components::attached::ComponentHandle;
use crate::components::gameobject::Lifecycle;
use crate::error::{EngineError, Result};
use crate::events::lifecycle::GameEvent;
use crate::render::{Rect, RenderSurface, SurfaceScope};
use crate::scene::{ObjectHandle, Scene};
use crate::systems::commit::commit;

/// Run one scheduling pass with `delta` seconds of elapsed time.
pub fn run_frame(scene: &mut Scene, surface: &mut dyn RenderSurface, delta: f32) {
    let size = surface.size();
    surface.clear(Rect::new(0.0, 0.0, size.x, size.y));

    let order = scene.frame_order();
    trace!("frame over {} objects", order.len());
    for object in order {
        if !scene.contains(object) || !scene.is_active(object) {
            continue;
        }
        if !scene.is_started(object) {
            scene.set_lifecycle(object, Lifecycle::Started);
            if let Err(e) = scene.dispatch_object(object, GameEvent::Start) {
                report(scene, object, "object", &e);
            }
            continue;
        }

        for handle in scene.component_handles(object) {
            match scene.component_started(object, handle) {
                None => {}
                Some(false) => {
                    scene.mark_component_started(object, handle);
                    if let Err(e) = scene.dispatch_component(object, handle, GameEvent::Start) {
                        report(scene, object, "component start", &e);
                    }
                }
                Some(true) => {
                    if let Err(e) = run_component(scene, object, handle, surface, delta) {
                        report(scene, object, "component", &e);
                    }
                }
            }
        }

        if let Err(e) = scene.dispatch_object(object, GameEvent::Update { delta }) {
            report(scene, object, "object update", &e);
        }
    }

    scene.input_mut().flush_edge_state();
    commit(scene);
}

/// `update`, `physics_update`, then `draw` inside the object's render
/// transform. Stops at the first failure.
fn run_component(
    scene: &mut Scene,
    object: ObjectHandle,
    handle: ComponentHandle,
    surface: &mut dyn RenderSurface,
    delta: f32,
) -> Result<()> {
    scene.dispatch_component(object, handle, GameEvent::Update { delta })?;
    scene.dispatch_component(object, handle, GameEvent::PhysicsUpdate { delta })?;

    let Some(world) = scene.world_matrix(object) else {
        return Ok(());
    };
    let matrix = scene.camera().object_matrix(surface.size(), world);
    let mut scope = SurfaceScope::new(surface, matrix);
    scene.dispatch_component(
        object,
        handle,
        GameEvent::Draw {
            surface: scope.surface(),
        },
    )
}

fn report(scene: &Scene, object: ObjectHandle, stage: &str, e: &EngineError) {
    error!(
        "<{}> {stage} hook failed: {e}",
        scene.id(object).unwrap_or_default()
    );
}
