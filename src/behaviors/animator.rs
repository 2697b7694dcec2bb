//! Named animations over a sibling [`Sprite`].
//!
//! Each animation is one sprite-sheet image. Selecting an animation swaps the
//! sprite's image and rewinds it. A one-shot selection (`once`) remembers the
//! animation it interrupted and returns to it when the sprite shows its last
//! cell.

use log::debug;

use crate::behaviors::sprite::{Sprite, SpritePatch};
use crate::behaviors::{Configurable, GameComponent, Props};
use crate::components::attached::ComponentHandle;
use crate::context::Ctx;
use crate::error::{EngineError, Result};
use crate::resources::imagestore::ImageHandle;

#[derive(Debug, Default)]
pub struct Animator {
    props: AnimatorProps,
    queue: Vec<String>,
    current: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnimatorProps {
    /// Sprite driven by this animator. `None` picks the owner's first sprite.
    pub sprite: Option<ComponentHandle>,
    /// Animations in registration order; the first one plays on start.
    pub animations: Vec<(String, ImageHandle)>,
}

#[derive(Clone, Debug, Default)]
pub struct AnimatorPatch {
    pub sprite: Option<ComponentHandle>,
    pub animations: Option<Vec<(String, ImageHandle)>>,
}

impl Props for AnimatorProps {
    type Patch = AnimatorPatch;

    fn apply(&mut self, patch: AnimatorPatch) {
        if let Some(sprite) = patch.sprite {
            self.sprite = Some(sprite);
        }
        if let Some(animations) = patch.animations {
            self.animations = animations;
        }
    }
}

impl Configurable for Animator {
    type Props = AnimatorProps;

    fn props(&self) -> &AnimatorProps {
        &self.props
    }

    fn props_mut(&mut self) -> &mut AnimatorProps {
        &mut self.props
    }
}

impl Animator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name`, replacing an animation of the same name in place.
    pub fn with_animation(mut self, name: &str, image: ImageHandle) -> Self {
        self.add_animation(name, image);
        self
    }

    pub fn add_animation(&mut self, name: &str, image: ImageHandle) {
        match self.props.animations.iter_mut().find(|(n, _)| n == name) {
            Some(entry) => entry.1 = image,
            None => self.props.animations.push((name.to_owned(), image)),
        }
    }

    pub fn drive(mut self, sprite: ComponentHandle) -> Self {
        self.props.sprite = Some(sprite);
        self
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    fn image_of(&self, name: &str) -> Option<ImageHandle> {
        self.props
            .animations
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, image)| *image)
    }

    /// Update the selection state. Returns the image to show, or `None` when
    /// `name` is already playing.
    fn select(&mut self, name: &str, once: bool) -> Result<Option<ImageHandle>> {
        let image = self
            .image_of(name)
            .ok_or_else(|| EngineError::UnknownAnimation(name.to_owned()))?;
        if once {
            self.queue.push(std::mem::take(&mut self.current));
        } else if self.current == name {
            return Ok(None);
        }
        self.current = name.to_owned();
        Ok(Some(image))
    }

    /// Play `name` on this animator from within its own hooks.
    pub fn set_animation(&mut self, ctx: &mut Ctx<'_>, name: &str, once: bool) -> Result<()> {
        if let Some(image) = self.select(name, once)? {
            show(ctx, self.props.sprite, image);
        }
        Ok(())
    }

    /// Play `name` on the owner's first animator, from any other hook of the
    /// same object.
    pub fn play(ctx: &mut Ctx<'_>, name: &str, once: bool) -> Result<()> {
        let (image, sprite) = {
            let animator = ctx
                .component_mut::<Animator>()
                .ok_or_else(|| EngineError::Hook("object has no animator".to_owned()))?;
            (animator.select(name, once)?, animator.props.sprite)
        };
        if let Some(image) = image {
            show(ctx, sprite, image);
        }
        Ok(())
    }

    fn sprite_at_last_frame(&self, ctx: &Ctx<'_>) -> bool {
        let sprite = match self.props.sprite {
            Some(handle) => ctx.component_of::<Sprite>(handle),
            None => ctx.component::<Sprite>(),
        };
        sprite.is_some_and(|s| s.is_last_frame(ctx.images()))
    }
}

/// Swap the driven sprite's image and rewind it.
fn show(ctx: &mut Ctx<'_>, sprite: Option<ComponentHandle>, image: ImageHandle) {
    let patch = SpritePatch {
        image: Some(image),
        frame: Some(0.0),
        ..Default::default()
    };
    let target = match sprite {
        Some(handle) => ctx.component_of_mut::<Sprite>(handle),
        None => ctx.component_mut::<Sprite>(),
    };
    match target {
        Some(target) => {
            target.set_props(patch);
        }
        None => debug!("<{}> animator has no sprite to drive", ctx.id()),
    }
}

impl GameComponent for Animator {
    fn on_start(&mut self, ctx: &mut Ctx<'_>) -> Result<()> {
        let Some(first) = self.props.animations.first().map(|(n, _)| n.clone()) else {
            return Ok(());
        };
        self.set_animation(ctx, &first, false)
    }

    fn on_update(&mut self, ctx: &mut Ctx<'_>, _delta: f32) -> Result<()> {
        if self.queue.is_empty() || !self.sprite_at_last_frame(ctx) {
            return Ok(());
        }
        if let Some(previous) = self.queue.pop() {
            if !previous.is_empty() {
                self.set_animation(ctx, &previous, false)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::imagestore::ImageStore;

    fn animator() -> (Animator, ImageHandle, ImageHandle) {
        let mut store = ImageStore::new("");
        let idle = store.load("idle.png");
        let attack = store.load("attack.png");
        let a = Animator::new()
            .with_animation("idle", idle)
            .with_animation("attack", attack);
        (a, idle, attack)
    }

    #[test]
    fn unknown_animation_is_an_error() {
        let (mut a, _, _) = animator();
        assert!(matches!(
            a.select("fly", false),
            Err(EngineError::UnknownAnimation(n)) if n == "fly"
        ));
        assert_eq!(a.current(), "");
    }

    #[test]
    fn reselecting_current_is_a_noop() {
        let (mut a, idle, _) = animator();
        assert_eq!(a.select("idle", false).expect("known"), Some(idle));
        assert_eq!(a.select("idle", false).expect("known"), None);
    }

    #[test]
    fn once_queues_the_interrupted_animation() {
        let (mut a, _, attack) = animator();
        a.select("idle", false).expect("known");
        assert_eq!(a.select("attack", true).expect("known"), Some(attack));
        assert_eq!(a.current(), "attack");
        assert_eq!(a.queued(), 1);
        assert_eq!(a.queue.last().map(String::as_str), Some("idle"));
    }

    #[test]
    fn adding_an_existing_name_replaces_it() {
        let (mut a, _, attack) = animator();
        a.add_animation("idle", attack);
        assert_eq!(a.props().animations.len(), 2);
        assert_eq!(a.image_of("idle"), Some(attack));
    }
}
