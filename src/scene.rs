//! Ownership of the active world.
//!
//! A [`Simulation`] holds at most one [`World`] plus the builder that filled
//! it, so the scene can be torn down and rebuilt from scratch.

use log::info;

use crate::config::WorldConfig;
use crate::dynamics::World;

pub type SceneBuilder = Box<dyn Fn(&mut World)>;

pub struct Simulation {
    pub config: WorldConfig,
    world: Option<World>,
    builder: Option<SceneBuilder>,
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(WorldConfig::default())
    }
}

impl Simulation {
    pub fn new(config: WorldConfig) -> Self {
        Self {
            config,
            world: None,
            builder: None,
        }
    }

    /// Replaces the current world with a fresh one filled by `builder`.
    pub fn load(&mut self, builder: impl Fn(&mut World) + 'static) -> &mut World {
        self.unload();
        self.builder = Some(Box::new(builder));
        self.build()
    }

    /// Rebuilds the current scene. Returns `false` when nothing is loaded.
    pub fn reset(&mut self) -> bool {
        if self.builder.is_none() {
            return false;
        }
        self.world = None;
        self.build();
        true
    }

    pub fn unload(&mut self) {
        if let Some(world) = self.world.take() {
            info!("unloading scene with {} actors", world.len());
        }
        self.builder = None;
    }

    fn build(&mut self) -> &mut World {
        let mut world = World::with_config(self.config);
        if let Some(builder) = &self.builder {
            builder(&mut world);
        }
        info!("scene loaded with {} actors", world.len());
        self.world.insert(world)
    }

    pub fn world(&self) -> Option<&World> {
        self.world.as_ref()
    }

    pub fn world_mut(&mut self) -> Option<&mut World> {
        self.world.as_mut()
    }

    /// Physics cadence.
    pub fn step(&mut self, dt: f32) {
        if let Some(world) = &mut self.world {
            world.step(dt);
        }
    }

    /// Render cadence.
    pub fn tick(&mut self, dt: f32) {
        if let Some(world) = &mut self.world {
            world.tick(dt);
        }
    }
}
