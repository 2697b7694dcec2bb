//! Registration tables of object and component variants.
//!
//! Only registered variants can be created by name. Typed creation
//! (`Scene::create_object`, `Scene::add_component`) is checked at compile
//! time by the trait bounds and never consults these tables.

use rustc_hash::FxHashMap;

use crate::behaviors::animator::Animator;
use crate::behaviors::physics::Physics;
use crate::behaviors::rectshape::RectShape;
use crate::behaviors::sprite::Sprite;
use crate::behaviors::{EmptyObject, GameComponent, ObjectBehavior};
use crate::error::{EngineError, Result};

pub type ComponentCtor = fn() -> Box<dyn GameComponent>;
pub type ObjectCtor = fn() -> Box<dyn ObjectBehavior>;

fn make_component<T: GameComponent + Default>() -> Box<dyn GameComponent> {
    Box::new(T::default())
}

fn make_object<T: ObjectBehavior + Default>() -> Box<dyn ObjectBehavior> {
    Box::new(T::default())
}

pub struct TypeRegistry {
    components: FxHashMap<&'static str, ComponentCtor>,
    objects: FxHashMap<&'static str, ObjectCtor>,
}

impl Default for TypeRegistry {
    /// Registry preloaded with the built-in variants.
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register_component::<RectShape>("rect_shape");
        registry.register_component::<Sprite>("sprite");
        registry.register_component::<Animator>("animator");
        registry.register_component::<Physics>("physics");
        registry.register_object::<EmptyObject>("empty");
        registry
    }
}

impl TypeRegistry {
    pub fn empty() -> Self {
        Self {
            components: FxHashMap::default(),
            objects: FxHashMap::default(),
        }
    }

    pub fn register_component<T: GameComponent + Default>(&mut self, name: &'static str) {
        if self.components.insert(name, make_component::<T>).is_some() {
            log::warn!("component type <{name}> registered twice, keeping the last one");
        }
    }

    pub fn register_object<T: ObjectBehavior + Default>(&mut self, name: &'static str) {
        if self.objects.insert(name, make_object::<T>).is_some() {
            log::warn!("object type <{name}> registered twice, keeping the last one");
        }
    }

    pub fn make_component(&self, name: &str) -> Result<Box<dyn GameComponent>> {
        self.components
            .get(name)
            .map(|ctor| ctor())
            .ok_or_else(|| EngineError::InvalidComponentType(name.to_owned()))
    }

    pub fn make_object(&self, name: &str) -> Result<Box<dyn ObjectBehavior>> {
        self.objects
            .get(name)
            .map(|ctor| ctor())
            .ok_or_else(|| EngineError::InvalidObjectType(name.to_owned()))
    }

    pub fn has_component(&self, name: &str) -> bool {
        self.components.contains_key(name)
    }

    pub fn has_object(&self, name: &str) -> bool {
        self.objects.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins_are_registered() {
        let r = TypeRegistry::default();
        for name in ["rect_shape", "sprite", "animator", "physics"] {
            assert!(r.has_component(name), "{name} missing");
        }
        assert!(r.has_object("empty"));
    }

    #[test]
    fn unknown_names_are_rejected() {
        let r = TypeRegistry::default();
        assert!(matches!(
            r.make_component("collider"),
            Err(EngineError::InvalidComponentType(n)) if n == "collider"
        ));
        assert!(matches!(
            r.make_object("player"),
            Err(EngineError::InvalidObjectType(n)) if n == "player"
        ));
    }

    #[test]
    fn made_components_have_the_registered_type() {
        let r = TypeRegistry::default();
        let c = r.make_component("sprite").expect("registered");
        assert!((*c).as_any().downcast_ref::<Sprite>().is_some());
    }
}
