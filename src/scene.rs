//! Scene registry.
//!
//! [`Scene`] owns every game object of a session. Objects are entities of a
//! private ECS [`World`]; the registry keeps the id → entity map of the live
//! set and the two deferred queues:
//!
//! - `create_object*` spawns the entity immediately (so it can be configured
//!   and parented right away) but only queues it; it joins the live set at the
//!   next commit point.
//! - `remove_object` queues a live object; it keeps running until the next
//!   commit point, where it receives `dispose` and is despawned.
//!
//! The per-frame algorithm lives in [`crate::systems::frame`] and the commit
//! point in [`crate::systems::commit`].

use bevy_ecs::prelude::*;
use log::{debug, error, trace};
use rustc_hash::FxHashMap;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::behaviors::{EmptyObject, GameComponent, ObjectBehavior};
use crate::components::attached::{AttachedComponents, ComponentHandle, ComponentSlot};
use crate::components::gameobject::{Lifecycle, Live, ObjectId, ObjectLogic, ObjectState};
use crate::components::globaltransform2d::GlobalTransform2D;
use crate::components::hierarchy::{ChildObjects, ParentObject};
use crate::components::sortlayer::SortLayer;
use crate::components::transform::Transform;
use crate::context::Ctx;
use crate::error::{EngineError, Result};
use crate::events::lifecycle::GameEvent;
use crate::math::Matrix2D;
use crate::resources::camera2d::Camera2D;
use crate::resources::imagestore::ImageStore;
use crate::resources::input::InputState;
use crate::resources::typeregistry::TypeRegistry;
use crate::resources::worldtime::WorldTime;
use crate::systems::propagate_transforms::world_transform;

/// Non-owning reference to a game object.
///
/// Wraps the object's entity. A handle to a disposed object stays invalid
/// forever; lookups through it return `None`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObjectHandle(Entity);

impl ObjectHandle {
    pub(crate) fn new(entity: Entity) -> Self {
        Self(entity)
    }

    pub fn entity(self) -> Entity {
        self.0
    }
}

/// Initial values of a new object.
#[derive(Clone, Copy, Debug, Default)]
pub struct ObjectProps {
    pub transform: Transform,
    pub sort_layer: i32,
}

impl ObjectProps {
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            transform: Transform::from_position(x, y),
            ..Self::default()
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_sort_layer(mut self, sort_layer: i32) -> Self {
        self.sort_layer = sort_layer;
        self
    }
}

pub struct Scene {
    pub(crate) world: World,
    pub(crate) live: FxHashMap<String, Entity>,
    pub(crate) pending_create: Vec<Entity>,
    pub(crate) pending_destroy: Vec<Entity>,
    types: TypeRegistry,
    next_seq: u64,
    next_component: u64,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        let mut world = World::new();
        world.insert_resource(Camera2D::default());
        world.insert_resource(InputState::default());
        world.insert_resource(WorldTime::default());
        world.insert_resource(ImageStore::default());
        Self {
            world,
            live: FxHashMap::default(),
            pending_create: Vec::new(),
            pending_destroy: Vec::new(),
            types: TypeRegistry::default(),
            next_seq: 0,
            next_component: 0,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn types(&self) -> &TypeRegistry {
        &self.types
    }

    pub fn types_mut(&mut self) -> &mut TypeRegistry {
        &mut self.types
    }

    // ------------------------------------------------------------------
    // Resources
    // ------------------------------------------------------------------

    pub fn camera(&self) -> &Camera2D {
        self.world.resource::<Camera2D>()
    }

    pub fn camera_mut(&mut self) -> &mut Camera2D {
        self.world.resource_mut::<Camera2D>().into_inner()
    }

    pub fn input(&self) -> &InputState {
        self.world.resource::<InputState>()
    }

    pub fn input_mut(&mut self) -> &mut InputState {
        self.world.resource_mut::<InputState>().into_inner()
    }

    pub fn images(&self) -> &ImageStore {
        self.world.resource::<ImageStore>()
    }

    pub fn images_mut(&mut self) -> &mut ImageStore {
        self.world.resource_mut::<ImageStore>().into_inner()
    }

    pub fn time(&self) -> &WorldTime {
        self.world.resource::<WorldTime>()
    }

    // ------------------------------------------------------------------
    // Object registry
    // ------------------------------------------------------------------

    /// Queue a new object driven by `behavior`.
    ///
    /// Fails with [`EngineError::DuplicateId`] when `id` is already live or
    /// pending. A generated id is used when `id` is `None`.
    pub fn create_object<B: ObjectBehavior>(
        &mut self,
        behavior: B,
        props: ObjectProps,
        id: Option<&str>,
    ) -> Result<ObjectHandle> {
        self.spawn_object(Box::new(behavior), props, id)
    }

    /// Queue a new object with no behavior of its own.
    pub fn create_empty(&mut self, props: ObjectProps, id: Option<&str>) -> Result<ObjectHandle> {
        self.create_object(EmptyObject, props, id)
    }

    /// Queue a new object of a registered type.
    ///
    /// Fails with [`EngineError::InvalidObjectType`] for unregistered names.
    pub fn create_object_named(
        &mut self,
        type_name: &str,
        props: ObjectProps,
        id: Option<&str>,
    ) -> Result<ObjectHandle> {
        let behavior = self.types.make_object(type_name)?;
        self.spawn_object(behavior, props, id)
    }

    fn spawn_object(
        &mut self,
        behavior: Box<dyn ObjectBehavior>,
        props: ObjectProps,
        id: Option<&str>,
    ) -> Result<ObjectHandle> {
        let id = match id {
            Some(id) if self.id_taken(id) => return Err(EngineError::DuplicateId(id.to_owned())),
            Some(id) => id.to_owned(),
            None => self.generate_id(),
        };

        let seq = self.next_seq;
        self.next_seq += 1;
        let kind = behavior.name();
        let entity = self
            .world
            .spawn((
                ObjectId(id.clone()),
                ObjectState::new(seq),
                props.transform,
                SortLayer(props.sort_layer),
                ChildObjects::default(),
                AttachedComponents::default(),
                ObjectLogic::new(behavior),
            ))
            .id();
        self.pending_create.push(entity);
        debug!("creating game object <{id}> ({kind})");
        Ok(ObjectHandle(entity))
    }

    fn id_taken(&self, id: &str) -> bool {
        self.live.contains_key(id)
            || self
                .pending_create
                .iter()
                .any(|e| self.world.get::<ObjectId>(*e).is_some_and(|o| o.as_str() == id))
    }

    fn generate_id(&self) -> String {
        loop {
            let id = generate_name();
            if !self.id_taken(&id) {
                return id;
            }
        }
    }

    /// Queue a live object for destruction at the next commit point.
    ///
    /// The object stays retrievable and keeps receiving events until then.
    pub fn remove_object(&mut self, id: &str) -> Result<()> {
        let entity = *self
            .live
            .get(id)
            .ok_or_else(|| EngineError::ObjectNotFound(id.to_owned()))?;
        if self.pending_destroy.contains(&entity) {
            trace!("game object <{id}> already queued for removal");
            return Ok(());
        }
        self.pending_destroy.push(entity);
        debug!("game object <{id}> queued for removal");
        Ok(())
    }

    /// [`remove_object`](Self::remove_object) by handle.
    pub fn remove_handle(&mut self, object: ObjectHandle) -> Result<()> {
        let id = self
            .id(object)
            .map(str::to_owned)
            .ok_or_else(|| not_found(object))?;
        self.remove_object(&id)
    }

    /// Live object with this id. Pending objects are not returned.
    pub fn get_object(&self, id: &str) -> Option<ObjectHandle> {
        self.live.get(id).copied().map(ObjectHandle)
    }

    /// Ids of live objects, unordered.
    pub fn live_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.live.keys().map(String::as_str)
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn pending_create_count(&self) -> usize {
        self.pending_create.len()
    }

    pub fn pending_destroy_count(&self) -> usize {
        self.pending_destroy.len()
    }

    /// True while the object exists, live or pending.
    pub fn contains(&self, object: ObjectHandle) -> bool {
        self.world.get::<ObjectId>(object.0).is_some()
    }

    pub fn is_live(&self, object: ObjectHandle) -> bool {
        self.world.get::<Live>(object.0).is_some()
    }

    pub fn id(&self, object: ObjectHandle) -> Option<&str> {
        self.world.get::<ObjectId>(object.0).map(ObjectId::as_str)
    }

    pub fn lifecycle(&self, object: ObjectHandle) -> Option<Lifecycle> {
        self.world.get::<ObjectState>(object.0).map(|s| s.lifecycle)
    }

    pub fn is_started(&self, object: ObjectHandle) -> bool {
        self.lifecycle(object) == Some(Lifecycle::Started)
    }

    pub fn is_active(&self, object: ObjectHandle) -> bool {
        self.world
            .get::<ObjectState>(object.0)
            .is_some_and(|s| s.active)
    }

    /// Inactive objects are skipped by the scheduler.
    pub fn set_active(&mut self, object: ObjectHandle, active: bool) -> Result<()> {
        {
            let mut state = self
                .world
                .get_mut::<ObjectState>(object.0)
                .ok_or_else(|| not_found(object))?;
            state.active = active;
        }
        debug!(
            "game object <{}> active state is [{active}]",
            self.id(object).unwrap_or_default()
        );
        Ok(())
    }

    pub fn sort_layer(&self, object: ObjectHandle) -> Option<i32> {
        self.world.get::<SortLayer>(object.0).map(|l| l.0)
    }

    pub fn set_sort_layer(&mut self, object: ObjectHandle, layer: i32) -> Result<()> {
        let mut sort_layer = self
            .world
            .get_mut::<SortLayer>(object.0)
            .ok_or_else(|| not_found(object))?;
        sort_layer.0 = layer;
        Ok(())
    }

    pub fn transform(&self, object: ObjectHandle) -> Option<&Transform> {
        self.world.get::<Transform>(object.0)
    }

    pub fn transform_mut(&mut self, object: ObjectHandle) -> Option<&mut Transform> {
        self.world
            .get_mut::<Transform>(object.0)
            .map(|t| t.into_inner())
    }

    /// World-space transform composed through the parent chain.
    pub fn world_transform(&self, object: ObjectHandle) -> Option<GlobalTransform2D> {
        world_transform(&self.world, object.0)
    }

    pub fn world_matrix(&self, object: ObjectHandle) -> Option<Matrix2D> {
        self.world_transform(object).map(|gt| gt.matrix())
    }

    /// The object's own behavior, if it is a `B`.
    pub fn behavior<B: ObjectBehavior>(&self, object: ObjectHandle) -> Option<&B> {
        self.world
            .get::<ObjectLogic>(object.0)?
            .0
            .as_deref()?
            .as_any()
            .downcast_ref::<B>()
    }

    pub fn behavior_mut<B: ObjectBehavior>(&mut self, object: ObjectHandle) -> Option<&mut B> {
        self.world
            .get_mut::<ObjectLogic>(object.0)?
            .into_inner()
            .0
            .as_deref_mut()?
            .as_any_mut()
            .downcast_mut::<B>()
    }

    // ------------------------------------------------------------------
    // Hierarchy
    // ------------------------------------------------------------------

    pub fn parent(&self, object: ObjectHandle) -> Option<ObjectHandle> {
        self.world
            .get::<ParentObject>(object.0)
            .map(|p| ObjectHandle(p.0))
    }

    pub fn children(&self, object: ObjectHandle) -> Vec<ObjectHandle> {
        self.world
            .get::<ChildObjects>(object.0)
            .map(|c| c.iter().map(ObjectHandle).collect())
            .unwrap_or_default()
    }

    /// Make `child` a child of `parent`, detaching it from its previous
    /// parent first. Cycles are not checked.
    pub fn set_parent(&mut self, child: ObjectHandle, parent: ObjectHandle) -> Result<()> {
        self.ensure_exists(child)?;
        self.ensure_exists(parent)?;

        self.detach_from_parent(child);
        self.world.entity_mut(child.0).insert(ParentObject(parent.0));
        if let Some(mut children) = self.world.get_mut::<ChildObjects>(parent.0) {
            children.insert(child.0);
        }
        debug!(
            "<{}> is now a child of <{}>",
            self.id(child).unwrap_or_default(),
            self.id(parent).unwrap_or_default()
        );
        Ok(())
    }

    /// Turn `child` back into a root object.
    pub fn clear_parent(&mut self, child: ObjectHandle) -> Result<()> {
        self.ensure_exists(child)?;
        self.detach_from_parent(child);
        self.world.entity_mut(child.0).remove::<ParentObject>();
        Ok(())
    }

    /// [`set_parent`](Self::set_parent) each of `children` to `target`.
    pub fn set_children(&mut self, target: ObjectHandle, children: &[ObjectHandle]) -> Result<()> {
        for child in children {
            self.set_parent(*child, target)?;
        }
        Ok(())
    }

    fn detach_from_parent(&mut self, child: ObjectHandle) {
        let old_parent = self.world.get::<ParentObject>(child.0).map(|p| p.0);
        if let Some(old_parent) = old_parent {
            if let Some(mut siblings) = self.world.get_mut::<ChildObjects>(old_parent) {
                siblings.remove(child.0);
            }
        }
    }

    fn ensure_exists(&self, object: ObjectHandle) -> Result<()> {
        if self.contains(object) {
            Ok(())
        } else {
            Err(not_found(object))
        }
    }

    // ------------------------------------------------------------------
    // Components
    // ------------------------------------------------------------------

    /// Attach `component` to `owner`.
    ///
    /// The component receives `init` before it joins the owner's set; if
    /// `init` fails the component is dropped and the set is unchanged.
    pub fn add_component<T: GameComponent>(
        &mut self,
        owner: ObjectHandle,
        component: T,
    ) -> Result<ComponentHandle> {
        self.attach(owner, Box::new(component))
    }

    /// Attach a default instance of a registered component type.
    ///
    /// Fails with [`EngineError::InvalidComponentType`] for unregistered
    /// names, leaving the owner untouched.
    pub fn add_component_named(&mut self, owner: ObjectHandle, type_name: &str) -> Result<ComponentHandle> {
        let component = self.types.make_component(type_name)?;
        self.attach(owner, component)
    }

    fn attach(
        &mut self,
        owner: ObjectHandle,
        mut component: Box<dyn GameComponent>,
    ) -> Result<ComponentHandle> {
        if self.world.get::<AttachedComponents>(owner.0).is_none() {
            return Err(not_found(owner));
        }
        component.on_event(&mut Ctx::new(self, owner), GameEvent::Init)?;

        let handle = ComponentHandle(self.next_component);
        self.next_component += 1;
        let name = component.name();
        let mut attached = self
            .world
            .get_mut::<AttachedComponents>(owner.0)
            .ok_or_else(|| not_found(owner))?;
        attached.slots.push(ComponentSlot {
            handle,
            started: false,
            removed: false,
            component: Some(component),
        });
        trace!("attached {name} as {handle:?}");
        Ok(handle)
    }

    /// Detach a component: it receives `dispose`, then leaves the set.
    ///
    /// Returns `false` when `owner` does not hold `handle`. A component may
    /// remove itself from inside its own hook; the removal then completes as
    /// soon as the hook returns.
    pub fn remove_component(&mut self, owner: ObjectHandle, handle: ComponentHandle) -> Result<bool> {
        let taken = {
            let mut attached = self
                .world
                .get_mut::<AttachedComponents>(owner.0)
                .ok_or_else(|| not_found(owner))?;
            let Some(slot) = attached.slot_mut(handle) else {
                return Ok(false);
            };
            if slot.removed {
                return Ok(false);
            }
            slot.removed = true;
            slot.component.take()
        };
        if let Some(component) = taken {
            self.finish_removal(owner, handle, component);
        }
        Ok(true)
    }

    fn finish_removal(
        &mut self,
        owner: ObjectHandle,
        handle: ComponentHandle,
        mut component: Box<dyn GameComponent>,
    ) {
        if let Err(e) = component.on_event(&mut Ctx::new(self, owner), GameEvent::Dispose) {
            error!("{} failed to dispose: {e}", component.name());
        }
        if let Some(mut attached) = self.world.get_mut::<AttachedComponents>(owner.0) {
            attached.slots.retain(|s| s.handle != handle);
        }
        trace!("removed {} ({handle:?})", component.name());
    }

    /// True while `owner` still holds the component instance `handle`.
    pub fn has_component(&self, owner: ObjectHandle, handle: ComponentHandle) -> bool {
        self.world
            .get::<AttachedComponents>(owner.0)
            .and_then(|a| a.slot(handle))
            .is_some_and(|s| !s.removed)
    }

    /// Handles of all components of `owner`, in insertion order.
    pub fn component_handles(&self, owner: ObjectHandle) -> Vec<ComponentHandle> {
        self.world
            .get::<AttachedComponents>(owner.0)
            .map(AttachedComponents::handles)
            .unwrap_or_default()
    }

    /// Names of the components of `owner`, in insertion order.
    pub fn component_names(&self, owner: ObjectHandle) -> Vec<&'static str> {
        self.world
            .get::<AttachedComponents>(owner.0)
            .map(|a| a.iter().map(|(_, c)| c.name()).collect())
            .unwrap_or_default()
    }

    /// First component of type `T`.
    pub fn component<T: GameComponent>(&self, owner: ObjectHandle) -> Option<&T> {
        self.world
            .get::<AttachedComponents>(owner.0)?
            .iter()
            .find_map(|(_, c)| c.as_any().downcast_ref::<T>())
    }

    pub fn component_mut<T: GameComponent>(&mut self, owner: ObjectHandle) -> Option<&mut T> {
        self.world
            .get_mut::<AttachedComponents>(owner.0)?
            .into_inner()
            .slots
            .iter_mut()
            .filter(|s| !s.removed)
            .find_map(|s| s.component.as_deref_mut()?.as_any_mut().downcast_mut::<T>())
    }

    /// Handle of the first component of type `T`.
    pub fn component_handle<T: GameComponent>(&self, owner: ObjectHandle) -> Option<ComponentHandle> {
        self.world
            .get::<AttachedComponents>(owner.0)?
            .iter()
            .find(|(_, c)| c.as_any().is::<T>())
            .map(|(h, _)| h)
    }

    /// Every component of type `T`, in insertion order.
    pub fn components<T: GameComponent>(&self, owner: ObjectHandle) -> Vec<&T> {
        self.world
            .get::<AttachedComponents>(owner.0)
            .map(|a| {
                a.iter()
                    .filter_map(|(_, c)| c.as_any().downcast_ref::<T>())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The exact instance `handle`, if `owner` still holds it and it is a `T`.
    pub fn component_of<T: GameComponent>(&self, owner: ObjectHandle, handle: ComponentHandle) -> Option<&T> {
        let slot = self.world.get::<AttachedComponents>(owner.0)?.slot(handle)?;
        if slot.removed {
            return None;
        }
        slot.component.as_deref()?.as_any().downcast_ref::<T>()
    }

    pub fn component_of_mut<T: GameComponent>(
        &mut self,
        owner: ObjectHandle,
        handle: ComponentHandle,
    ) -> Option<&mut T> {
        let slot = self
            .world
            .get_mut::<AttachedComponents>(owner.0)?
            .into_inner()
            .slot_mut(handle)?;
        if slot.removed {
            return None;
        }
        slot.component.as_deref_mut()?.as_any_mut().downcast_mut::<T>()
    }

    // ------------------------------------------------------------------
    // Dispatch
    // ------------------------------------------------------------------

    /// Whether the component has received `start`. `None` if not attached.
    pub(crate) fn component_started(&self, owner: ObjectHandle, handle: ComponentHandle) -> Option<bool> {
        self.world
            .get::<AttachedComponents>(owner.0)?
            .slot(handle)
            .filter(|s| !s.removed)
            .map(|s| s.started)
    }

    pub(crate) fn mark_component_started(&mut self, owner: ObjectHandle, handle: ComponentHandle) {
        if let Some(mut attached) = self.world.get_mut::<AttachedComponents>(owner.0) {
            if let Some(slot) = attached.slot_mut(handle) {
                slot.started = true;
            }
        }
    }

    pub(crate) fn set_lifecycle(&mut self, object: ObjectHandle, lifecycle: Lifecycle) {
        if let Some(mut state) = self.world.get_mut::<ObjectState>(object.0) {
            state.lifecycle = lifecycle;
        }
    }

    /// Deliver `event` to one component of `owner`.
    ///
    /// The component is moved out of its slot for the duration of the hook.
    /// Missing, removed or already-running components are skipped.
    pub(crate) fn dispatch_component(
        &mut self,
        owner: ObjectHandle,
        handle: ComponentHandle,
        event: GameEvent<'_>,
    ) -> Result<()> {
        let Some(mut component) = self.take_component(owner, handle) else {
            return Ok(());
        };
        trace!("{} <- {}", component.name(), event.kind());
        let result = component.on_event(&mut Ctx::new(self, owner), event);
        self.return_component(owner, handle, component);
        result
    }

    fn take_component(&mut self, owner: ObjectHandle, handle: ComponentHandle) -> Option<Box<dyn GameComponent>> {
        let mut attached = self.world.get_mut::<AttachedComponents>(owner.0)?;
        let slot = attached.slot_mut(handle)?;
        if slot.removed {
            return None;
        }
        slot.component.take()
    }

    fn return_component(&mut self, owner: ObjectHandle, handle: ComponentHandle, component: Box<dyn GameComponent>) {
        let removed = {
            let Some(mut attached) = self.world.get_mut::<AttachedComponents>(owner.0) else {
                return;
            };
            match attached.slot_mut(handle) {
                Some(slot) if !slot.removed => {
                    slot.component = Some(component);
                    return;
                }
                _ => component,
            }
        };
        self.finish_removal(owner, handle, removed);
    }

    /// Deliver `event` to the object's own behavior.
    pub(crate) fn dispatch_object(&mut self, object: ObjectHandle, event: GameEvent<'_>) -> Result<()> {
        let taken = self
            .world
            .get_mut::<ObjectLogic>(object.0)
            .and_then(|mut logic| logic.0.take());
        let Some(mut behavior) = taken else {
            return Ok(());
        };
        trace!(
            "<{}> {} <- {}",
            self.id(object).unwrap_or_default(),
            behavior.name(),
            event.kind()
        );
        let result = behavior.on_event(&mut Ctx::new(self, object), event);
        if let Some(mut logic) = self.world.get_mut::<ObjectLogic>(object.0) {
            logic.0 = Some(behavior);
        }
        result
    }

    /// Live objects in frame order: ascending sort layer, then creation order.
    pub(crate) fn frame_order(&mut self) -> Vec<ObjectHandle> {
        let mut query = self
            .world
            .query_filtered::<(Entity, &SortLayer, &ObjectState), With<Live>>();
        let mut order: Vec<(i32, u64, Entity)> = query
            .iter(&self.world)
            .map(|(entity, layer, state)| (layer.0, state.seq, entity))
            .collect();
        order.sort_by_key(|(layer, seq, _)| (*layer, *seq));
        order.into_iter().map(|(_, _, e)| ObjectHandle(e)).collect()
    }
}

fn not_found(object: ObjectHandle) -> EngineError {
    EngineError::ObjectNotFound(format!("{:?}", object.0))
}

/// Random object id: the current timestamp digits and five lowercase
/// letters, shuffled.
fn generate_name() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    let mut chars: Vec<char> = millis
        .to_string()
        .chars()
        .chain((0..5).map(|_| fastrand::lowercase()))
        .collect();
    fastrand::shuffle(&mut chars);
    chars.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_names_are_distinct() {
        let a = generate_name();
        let b = generate_name();
        assert!(a.len() >= 5);
        assert_ne!(a, b);
    }

    #[test]
    fn created_objects_are_pending_not_live() {
        let mut scene = Scene::new();
        let h = scene.create_empty(ObjectProps::default(), Some("a")).expect("create");
        assert!(scene.contains(h));
        assert!(!scene.is_live(h));
        assert_eq!(scene.get_object("a"), None);
        assert_eq!(scene.lifecycle(h), Some(Lifecycle::Pending));
        assert_eq!(scene.pending_create_count(), 1);
    }

    #[test]
    fn duplicate_pending_id_is_rejected_without_side_effects() {
        let mut scene = Scene::new();
        scene.create_empty(ObjectProps::default(), Some("dup")).expect("create");
        let err = scene.create_empty(ObjectProps::default(), Some("dup")).unwrap_err();
        assert!(matches!(err, EngineError::DuplicateId(id) if id == "dup"));
        assert_eq!(scene.pending_create_count(), 1);
    }

    #[test]
    fn unknown_object_type_is_rejected() {
        let mut scene = Scene::new();
        let err = scene
            .create_object_named("dragon", ObjectProps::default(), Some("d"))
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidObjectType(_)));
        assert_eq!(scene.pending_create_count(), 0);
        assert!(scene.create_object_named("empty", ObjectProps::default(), Some("d")).is_ok());
    }

    #[test]
    fn remove_unknown_id_fails() {
        let mut scene = Scene::new();
        assert!(matches!(
            scene.remove_object("ghost"),
            Err(EngineError::ObjectNotFound(id)) if id == "ghost"
        ));
    }

    #[test]
    fn props_builders() {
        let p = ObjectProps::at(3.0, 4.0).with_sort_layer(-2);
        assert_eq!(p.transform.position.x, 3.0);
        assert_eq!(p.sort_layer, -2);
    }
}
