//! Demo content for the binary.
//!
//! - `ball`: three nested red squares. `KeyR` spins the root, the arrow keys
//!   move it; the children follow through the hierarchy.
//! - `knight`: a sprite-animated player walking with WASD, a sword child drawn
//!   behind it, a barrel further back and a camera on a leash.

use clap::ValueEnum;
use log::info;

use crate::behaviors::animator::Animator;
use crate::behaviors::physics::Physics;
use crate::behaviors::rectshape::RectShape;
use crate::behaviors::sprite::Sprite;
use crate::behaviors::{EmptyObject, ObjectBehavior};
use crate::components::transform::Transform;
use crate::context::Ctx;
use crate::error::Result;
use crate::math::Vector2;
use crate::render::Color;
use crate::scene::{ObjectHandle, ObjectProps, Scene};

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Demo {
    Ball,
    Knight,
}

/// Register the demo object types and queue the demo's root object.
pub fn setup(scene: &mut Scene, demo: Demo) -> Result<ObjectHandle> {
    scene.types_mut().register_object::<BallController>("ball_controller");
    scene.types_mut().register_object::<Player>("player");
    info!("setting up the {demo:?} demo");
    match demo {
        Demo::Ball => scene.create_object_named("ball_controller", ObjectProps::default(), Some("controller")),
        Demo::Knight => scene.create_object_named("player", ObjectProps::default(), Some("player")),
    }
}

// ----------------------------------------------------------------------
// ball
// ----------------------------------------------------------------------

const BALL_SPIN: f32 = 90.0;
const BALL_SPEED: f32 = 120.0;

#[derive(Debug, Default)]
pub struct BallController {
    root: Option<ObjectHandle>,
}

fn red_square(ctx: &mut Ctx<'_>, id: &str, x: f32, side: f32) -> Result<ObjectHandle> {
    let square = ctx.scene_mut().create_empty(ObjectProps::at(x, 0.0), Some(id))?;
    ctx.scene_mut()
        .add_component(square, RectShape::new(Color::RED, Vector2::new(side, side)))?;
    Ok(square)
}

impl ObjectBehavior for BallController {
    fn on_init(&mut self, ctx: &mut Ctx<'_>) -> Result<()> {
        let root = red_square(ctx, "ball-root", 0.0, 40.0)?;
        let middle = red_square(ctx, "ball-middle", 60.0, 30.0)?;
        let tip = red_square(ctx, "ball-tip", 45.0, 20.0)?;
        ctx.scene_mut().set_parent(middle, root)?;
        ctx.scene_mut().set_parent(tip, middle)?;
        self.root = Some(root);
        Ok(())
    }

    fn on_update(&mut self, ctx: &mut Ctx<'_>, delta: f32) -> Result<()> {
        let Some(root) = self.root else {
            return Ok(());
        };
        let spin = if ctx.input().is_pressed("KeyR") { BALL_SPIN * delta } else { 0.0 };
        let dx = ctx.input().axis("ArrowLeft", "ArrowRight") * BALL_SPEED * delta;
        if let Some(transform) = ctx.scene_mut().transform_mut(root) {
            transform.angle += spin;
            transform.position.x += dx;
        }
        Ok(())
    }
}

// ----------------------------------------------------------------------
// knight
// ----------------------------------------------------------------------

const PLAYER_SPEED: f32 = 80.0;
const CAMERA_LEASH: f32 = 48.0;
const CELL: Vector2 = Vector2::new(32.0, 32.0);

#[derive(Debug, Default)]
pub struct Player;

impl Player {
    fn attacking(ctx: &Ctx<'_>) -> bool {
        ctx.component::<Animator>()
            .is_some_and(|a| a.current() == "attack")
    }

    /// Drag the camera so the player stays within the leash distance.
    fn follow(ctx: &mut Ctx<'_>) {
        let target = ctx.transform().position;
        let camera = ctx.camera_mut();
        let offset = camera.position - target;
        if offset.magnitude() > CAMERA_LEASH {
            camera.position = target + offset.normalize() * CAMERA_LEASH;
        }
    }
}

impl ObjectBehavior for Player {
    fn on_init(&mut self, ctx: &mut Ctx<'_>) -> Result<()> {
        let idle = ctx.load_image("knight/idle.png");
        let run = ctx.load_image("knight/run.png");
        let attack = ctx.load_image("knight/attack.png");

        let sprite = ctx.add_component(Sprite::sheet(idle, CELL))?;
        ctx.add_component(
            Animator::new()
                .with_animation("idle", idle)
                .with_animation("run", run)
                .with_animation("attack", attack)
                .drive(sprite),
        )?;
        ctx.add_component(Physics::default())?;

        let owner = ctx.owner();
        let sword = ctx.create_object(
            EmptyObject,
            ObjectProps::default()
                .with_transform(Transform::from_position(10.0, -4.0).with_pivot(0.5, 1.0))
                .with_sort_layer(-1),
            Some("sword"),
        )?;
        ctx.scene_mut()
            .add_component(sword, RectShape::new(Color::rgb(160, 160, 170), Vector2::new(4.0, 20.0)))?;
        ctx.scene_mut().set_parent(sword, owner)?;

        let barrel_image = ctx.load_image("barrel.png");
        let barrel = ctx.scene_mut().create_empty(
            ObjectProps::at(80.0, 20.0).with_sort_layer(-5),
            Some("barrel"),
        )?;
        ctx.scene_mut().add_component(barrel, Sprite::new(barrel_image))?;
        Ok(())
    }

    fn on_update(&mut self, ctx: &mut Ctx<'_>, _delta: f32) -> Result<()> {
        let input = ctx.input();
        let direction = Vector2::new(input.axis("KeyA", "KeyD"), input.axis("KeyW", "KeyS"));
        let attack = input.is_just_pressed("Space");

        if let Some(physics) = ctx.component_mut::<Physics>() {
            physics.set_velocity(direction.normalize() * PLAYER_SPEED);
        }
        if let Some(transform) = ctx.transform_mut() {
            if direction.x < 0.0 {
                transform.scale.x = -1.0;
            } else if direction.x > 0.0 {
                transform.scale.x = 1.0;
            }
        }

        if !Self::attacking(ctx) {
            if attack {
                Animator::play(ctx, "attack", true)?;
            } else if direction.magnitude() > 0.0 {
                Animator::play(ctx, "run", false)?;
            } else {
                Animator::play(ctx, "idle", false)?;
            }
        }

        Self::follow(ctx);
        Ok(())
    }
}
