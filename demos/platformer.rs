use macroquad::prelude::*;
use platformer_physics_rs::dynamics::{BodyDef, CircleCollider, FixedRect, World};
use platformer_physics_rs::math::{Vec2, random_range};
use platformer_physics_rs::scene::Simulation;
use ::rand::thread_rng;

const PHYSICS_DT: f32 = 1.0 / 30.0;

#[derive(Copy, Clone, Debug)]
enum Demo {
    Demo1,
    Demo2,
    Demo3,
}

impl Demo {
    fn name(self) -> &'static str {
        match self {
            Demo::Demo1 => "Demo 1: Falling Boxes",
            Demo::Demo2 => "Demo 2: Staircase",
            Demo::Demo3 => "Demo 3: Circles",
        }
    }

    fn from_key(key: KeyCode) -> Option<Demo> {
        Some(match key {
            KeyCode::Key1 => Demo::Demo1,
            KeyCode::Key2 => Demo::Demo2,
            KeyCode::Key3 => Demo::Demo3,
            _ => return None,
        })
    }

    fn builder(self) -> fn(&mut World) {
        match self {
            Demo::Demo1 => demo_boxes,
            Demo::Demo2 => demo_stairs,
            Demo::Demo3 => demo_circles,
        }
    }
}

fn add_static(world: &mut World, position: Vec2, size: Vec2) {
    let def = BodyDef::from_properties([("static", "")])
        .map(|def| BodyDef { position, ..def })
        .unwrap_or_default();
    world.create_body(def, size);
}

fn add_box(world: &mut World, position: Vec2, size: Vec2) {
    world.create_body(
        BodyDef {
            position,
            ..Default::default()
        },
        size,
    );
}

fn add_arena(world: &mut World) {
    add_static(world, Vec2::new(0.0, 560.0), Vec2::new(800.0, 40.0));
    add_static(world, Vec2::new(0.0, 0.0), Vec2::new(20.0, 560.0));
    add_static(world, Vec2::new(780.0, 0.0), Vec2::new(20.0, 560.0));
}

fn demo_boxes(world: &mut World) {
    add_arena(world);

    let mut rng = thread_rng();
    for i in 0..12 {
        let x = 60.0 + 55.0 * i as f32;
        let y = random_range(&mut rng, 40.0, 300.0);
        let size = random_range(&mut rng, 20.0, 45.0);
        add_box(world, Vec2::new(x, y), Vec2::splat(size));
    }
}

fn demo_stairs(world: &mut World) {
    add_arena(world);

    for i in 0..6 {
        let step = i as f32;
        add_static(
            world,
            Vec2::new(120.0 + 80.0 * step, 520.0 - 40.0 * step),
            Vec2::new(80.0, 40.0 * (step + 1.0)),
        );
    }
    for i in 0..5 {
        add_box(world, Vec2::new(140.0 + 80.0 * i as f32, 60.0), Vec2::splat(30.0));
    }
}

fn demo_circles(world: &mut World) {
    add_arena(world);

    let mut rng = thread_rng();
    for i in 0..8 {
        let radius = random_range(&mut rng, 12.0, 28.0);
        world.create_actor(
            BodyDef {
                position: Vec2::new(80.0 + 80.0 * i as f32, 80.0),
                restitution: 0.8,
                ..Default::default()
            },
            CircleCollider { sides: 16, radius },
            FixedRect::new(Vec2::ZERO, Vec2::splat(2.0 * radius)),
        );
    }
}

fn draw_world(world: &World) {
    for b in world.bodies() {
        let Some(collider) = &b.collider else {
            continue;
        };
        let color = if b.is_static {
            Color::new(0.5, 0.5, 0.6, 1.0)
        } else if b.is_grounded() {
            Color::new(0.4, 0.9, 0.4, 1.0)
        } else {
            Color::new(0.8, 0.8, 0.9, 1.0)
        };

        let points = collider.points();
        for (i, &p) in points.iter().enumerate() {
            let a = p + b.position;
            let c = points[(i + 1) % points.len()] + b.position;
            draw_line(a.x, a.y, c.x, c.y, 1.5, color);
        }
    }
}

fn window_conf() -> Conf {
    Conf {
        window_title: "platformer-physics-rs".to_owned(),
        window_width: 800,
        window_height: 600,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let mut demo = Demo::Demo1;
    let mut sim = Simulation::default();
    sim.load(demo.builder());

    let mut paused = false;
    let mut accumulator = 0.0;

    loop {
        for key in [KeyCode::Key1, KeyCode::Key2, KeyCode::Key3] {
            if is_key_pressed(key) {
                if let Some(d) = Demo::from_key(key) {
                    demo = d;
                    sim.load(demo.builder());
                }
            }
        }

        if is_key_pressed(KeyCode::R) {
            sim.reset();
        }
        if is_key_pressed(KeyCode::K) {
            paused = !paused;
        }

        if is_key_pressed(KeyCode::Space) {
            let (mx, my) = mouse_position();
            if let Some(world) = sim.world_mut() {
                add_box(world, Vec2::new(mx, my), Vec2::splat(30.0));
            }
        }

        let frame_dt = get_frame_time();
        if !paused {
            accumulator += frame_dt;
            while accumulator >= PHYSICS_DT {
                sim.step(PHYSICS_DT);
                accumulator -= PHYSICS_DT;
            }
            sim.tick(frame_dt);
        } else if is_key_pressed(KeyCode::N) {
            sim.step(PHYSICS_DT);
        }

        clear_background(BLACK);

        if let Some(world) = sim.world() {
            draw_world(world);

            let overlay = format!(
                "{}\nKeys: 1-3 demos | Space box at mouse | R reset | K pause | N step\nactors={} paused={}",
                demo.name(),
                world.len(),
                paused
            );
            draw_text(&overlay, 28.0, 24.0, 18.0, WHITE);
        }

        next_frame().await;
    }
}
