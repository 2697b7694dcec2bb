//! Serializable view of a scene, for `--dump-scene` and debugging.

use serde::Serialize;

use crate::components::gameobject::Lifecycle;
use crate::components::globaltransform2d::GlobalTransform2D;
use crate::components::transform::Transform;
use crate::error::Result;
use crate::math::Vector2;
use crate::scene::Scene;

#[derive(Clone, Debug, Serialize)]
pub struct ObjectSnapshot {
    pub id: String,
    pub sort_layer: i32,
    pub active: bool,
    pub lifecycle: Option<Lifecycle>,
    pub transform: Transform,
    pub world: Option<GlobalTransform2D>,
    pub parent: Option<String>,
    pub children: Vec<String>,
    pub components: Vec<&'static str>,
}

#[derive(Clone, Debug, Serialize)]
pub struct CameraSnapshot {
    pub position: Vector2,
    pub pivot: Vector2,
    pub angle: f32,
}

#[derive(Clone, Debug, Serialize)]
pub struct SceneSnapshot {
    pub frame: u64,
    pub elapsed: f32,
    pub camera: CameraSnapshot,
    /// Live objects sorted by id.
    pub objects: Vec<ObjectSnapshot>,
}

impl SceneSnapshot {
    pub fn capture(scene: &Scene) -> Self {
        let mut ids: Vec<&str> = scene.live_ids().collect();
        ids.sort_unstable();

        let name_of = |h| scene.id(h).map(str::to_owned);
        let objects = ids
            .into_iter()
            .filter_map(|id| {
                let h = scene.get_object(id)?;
                Some(ObjectSnapshot {
                    id: id.to_owned(),
                    sort_layer: scene.sort_layer(h).unwrap_or_default(),
                    active: scene.is_active(h),
                    lifecycle: scene.lifecycle(h),
                    transform: scene.transform(h).copied().unwrap_or_default(),
                    world: scene.world_transform(h),
                    parent: scene.parent(h).and_then(name_of),
                    children: scene.children(h).into_iter().filter_map(name_of).collect(),
                    components: scene.component_names(h),
                })
            })
            .collect();

        let camera = scene.camera();
        let time = scene.time();
        Self {
            frame: time.frame_count,
            elapsed: time.elapsed,
            camera: CameraSnapshot {
                position: camera.position,
                pivot: camera.pivot,
                angle: camera.angle,
            },
            objects,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
