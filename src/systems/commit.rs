//! Commit point of the scene registry.
//!
//! Runs once at the end of every frame. Pending creations are committed
//! first, in arrival order, then pending destructions. Objects queued while
//! the commit runs (for example from an `init` hook) wait for the next one.

use log::{debug, error};

use crate::components::gameobject::{Lifecycle, Live};
use crate::events::lifecycle::GameEvent;
use crate::scene::{ObjectHandle, Scene};

pub fn commit(scene: &mut Scene) {
    let created = std::mem::take(&mut scene.pending_create);
    for entity in created {
        commit_create(scene, ObjectHandle::new(entity));
    }

    let destroyed = std::mem::take(&mut scene.pending_destroy);
    for entity in destroyed {
        commit_destroy(scene, ObjectHandle::new(entity));
    }
}

/// `init`, then insert into the live set.
fn commit_create(scene: &mut Scene, object: ObjectHandle) {
    let Some(id) = scene.id(object).map(str::to_owned) else {
        return;
    };
    if let Err(e) = scene.dispatch_object(object, GameEvent::Init) {
        error!("<{id}> failed to init: {e}");
    }
    scene.set_lifecycle(object, Lifecycle::Initialized);
    scene.world.entity_mut(object.entity()).insert(Live);
    scene.live.insert(id.clone(), object.entity());
    debug!("game object <{id}> is live");
}

/// `dispose` to the object and its components, unlink it from the hierarchy,
/// then despawn it.
fn commit_destroy(scene: &mut Scene, object: ObjectHandle) {
    let Some(id) = scene.id(object).map(str::to_owned) else {
        return;
    };
    if let Err(e) = scene.dispatch_object(object, GameEvent::Dispose) {
        error!("<{id}> failed to dispose: {e}");
    }
    for handle in scene.component_handles(object) {
        if let Err(e) = scene.remove_component(object, handle) {
            error!("<{id}> failed to drop component {handle:?}: {e}");
        }
    }

    // Children outlive their parent and become roots.
    for child in scene.children(object) {
        if let Err(e) = scene.clear_parent(child) {
            error!("<{id}> failed to orphan child: {e}");
        }
    }
    if let Err(e) = scene.clear_parent(object) {
        error!("<{id}> failed to leave its parent: {e}");
    }

    scene.set_lifecycle(object, Lifecycle::Disposed);
    scene.live.remove(&id);
    scene.world.despawn(object.entity());
    debug!("game object <{id}> removed");
}
