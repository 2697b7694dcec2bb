//! Hook context.
//!
//! Every hook receives a [`Ctx`]: mutable access to the [`Scene`] plus the
//! handle of the object the hook belongs to. The `owner`-relative helpers
//! cover the common cases; everything else goes through [`Ctx::scene_mut`].

use crate::behaviors::{GameComponent, ObjectBehavior};
use crate::components::attached::ComponentHandle;
use crate::components::globaltransform2d::GlobalTransform2D;
use crate::components::transform::Transform;
use crate::error::Result;
use crate::resources::camera2d::Camera2D;
use crate::resources::imagestore::{ImageHandle, ImageStore};
use crate::resources::input::InputState;
use crate::resources::worldtime::WorldTime;
use crate::scene::{ObjectHandle, ObjectProps, Scene};

pub struct Ctx<'a> {
    scene: &'a mut Scene,
    owner: ObjectHandle,
}

impl<'a> Ctx<'a> {
    pub(crate) fn new(scene: &'a mut Scene, owner: ObjectHandle) -> Self {
        Self { scene, owner }
    }

    pub fn owner(&self) -> ObjectHandle {
        self.owner
    }

    /// Id of the owner object.
    pub fn id(&self) -> &str {
        self.scene.id(self.owner).unwrap_or_default()
    }

    pub fn scene(&self) -> &Scene {
        self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        self.scene
    }

    /// Copy of the owner's local transform.
    pub fn transform(&self) -> Transform {
        self.scene.transform(self.owner).copied().unwrap_or_default()
    }

    pub fn transform_mut(&mut self) -> Option<&mut Transform> {
        self.scene.transform_mut(self.owner)
    }

    pub fn world_transform(&self) -> Option<GlobalTransform2D> {
        self.scene.world_transform(self.owner)
    }

    pub fn input(&self) -> &InputState {
        self.scene.input()
    }

    pub fn camera(&self) -> &Camera2D {
        self.scene.camera()
    }

    pub fn camera_mut(&mut self) -> &mut Camera2D {
        self.scene.camera_mut()
    }

    pub fn images(&self) -> &ImageStore {
        self.scene.images()
    }

    pub fn images_mut(&mut self) -> &mut ImageStore {
        self.scene.images_mut()
    }

    pub fn load_image(&mut self, path: &str) -> ImageHandle {
        self.scene.images_mut().load(path)
    }

    pub fn time(&self) -> &WorldTime {
        self.scene.time()
    }

    pub fn add_component<T: GameComponent>(&mut self, component: T) -> Result<ComponentHandle> {
        self.scene.add_component(self.owner, component)
    }

    pub fn remove_component(&mut self, handle: ComponentHandle) -> Result<bool> {
        self.scene.remove_component(self.owner, handle)
    }

    /// First sibling component (or self, outside its own hook) of type `T`.
    pub fn component<T: GameComponent>(&self) -> Option<&T> {
        self.scene.component::<T>(self.owner)
    }

    pub fn component_mut<T: GameComponent>(&mut self) -> Option<&mut T> {
        self.scene.component_mut::<T>(self.owner)
    }

    pub fn component_of<T: GameComponent>(&self, handle: ComponentHandle) -> Option<&T> {
        self.scene.component_of::<T>(self.owner, handle)
    }

    pub fn component_of_mut<T: GameComponent>(&mut self, handle: ComponentHandle) -> Option<&mut T> {
        self.scene.component_of_mut::<T>(self.owner, handle)
    }

    pub fn create_object<B: ObjectBehavior>(
        &mut self,
        behavior: B,
        props: ObjectProps,
        id: Option<&str>,
    ) -> Result<ObjectHandle> {
        self.scene.create_object(behavior, props, id)
    }

    pub fn remove_object(&mut self, id: &str) -> Result<()> {
        self.scene.remove_object(id)
    }

    /// Queue the owner for destruction.
    pub fn remove_self(&mut self) -> Result<()> {
        self.scene.remove_handle(self.owner)
    }
}
