use log::{debug, info, trace, warn};

use crate::collision::intersect_from;
use crate::config::WorldConfig;
use crate::dynamics::{ActorHooks, Body, BodyDef, FixedRect, PanelCollider, Presentation};
use crate::error::{PhysicsError, Result};
use crate::math::Vec2;

#[repr(transparent)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct BodyHandle(pub usize);

/// A body together with the hooks that drive it and the presentation that shows it.
pub struct Actor {
    pub body: Body,
    hooks: Box<dyn ActorHooks>,
    presentation: Box<dyn Presentation>,
}

impl Actor {
    // Returns whether the actor is ready to simulate.
    fn try_initialize(&mut self) -> bool {
        if self.body.is_initialized() {
            return true;
        }

        let rect = self.presentation.rect();
        if rect.is_empty() {
            return false;
        }

        if self.body.position == Vec2::ZERO {
            self.body.position = rect.position * self.presentation.scale_from_screen();
        }

        match self
            .hooks
            .create_collider(&self.body, self.presentation.as_ref())
        {
            Ok(collider) => self.body.collider = Some(collider),
            Err(e) => {
                warn!("cannot build collider for {:?}: {e}", self.body.handle());
                return false;
            }
        }

        self.body.save_snapshot();
        self.body.mark_initialized();
        debug!(
            "{:?} initialized at {:?}",
            self.body.handle(),
            self.body.position
        );
        true
    }

    fn rebuild_collider(&mut self) {
        match self
            .hooks
            .create_collider(&self.body, self.presentation.as_ref())
        {
            Ok(collider) => self.body.collider = Some(collider),
            Err(e) => warn!(
                "keeping previous collider for {:?}: {e}",
                self.body.handle()
            ),
        }
    }

    fn report_position(&mut self) {
        self.presentation.set_position(self.body.position);
    }
}

struct Spawn {
    def: BodyDef,
    hooks: Box<dyn ActorHooks>,
    presentation: Box<dyn Presentation>,
}

/// World changes requested while a step is running, applied once it finishes.
#[derive(Default)]
pub struct Commands {
    spawns: Vec<Spawn>,
    despawns: Vec<BodyHandle>,
}

impl Commands {
    pub fn spawn(
        &mut self,
        def: BodyDef,
        hooks: impl ActorHooks + 'static,
        presentation: impl Presentation + 'static,
    ) {
        self.spawns.push(Spawn {
            def,
            hooks: Box::new(hooks),
            presentation: Box::new(presentation),
        });
    }

    pub fn despawn(&mut self, handle: BodyHandle) {
        self.despawns.push(handle);
    }

    pub fn is_empty(&self) -> bool {
        self.spawns.is_empty() && self.despawns.is_empty()
    }
}

/// The active set of actors and the driver that steps them.
///
/// Actors are processed in creation order and each sees the effects of the
/// ones before it, so results depend on that order. Every moving body is tested
/// against every other body in each sub-step.
///
/// Slots of destroyed actors are never reused, so storage and the per-slice
/// scan grow with the number of actors ever created until [`World::clear`].
/// Worlds with heavy spawn/despawn churn should be rebuilt through
/// [`Simulation::reset`](crate::scene::Simulation::reset) now and then.
pub struct World {
    pub config: WorldConfig,
    // Despawned actors leave a hole so handles stay valid.
    actors: Vec<Option<Actor>>,
    commands: Commands,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    #[inline]
    pub fn new() -> Self {
        Self::with_config(WorldConfig::default())
    }

    pub fn with_config(config: WorldConfig) -> Self {
        Self {
            config,
            actors: Vec::new(),
            commands: Commands::default(),
        }
    }

    /// Adds an actor. It is initialized right away if its presentation is
    /// already laid out, otherwise on the first [`World::tick`] where it is.
    pub fn create_actor(
        &mut self,
        def: BodyDef,
        hooks: impl ActorHooks + 'static,
        presentation: impl Presentation + 'static,
    ) -> BodyHandle {
        self.insert(Spawn {
            def,
            hooks: Box::new(hooks),
            presentation: Box::new(presentation),
        })
    }

    /// Rectangular actor of `size` placed at `def.position`.
    pub fn create_body(&mut self, def: BodyDef, size: Vec2) -> BodyHandle {
        let presentation = FixedRect::new(def.position, size);
        self.create_actor(def, PanelCollider, presentation)
    }

    fn insert(&mut self, spawn: Spawn) -> BodyHandle {
        let handle = BodyHandle(self.actors.len());
        let mut actor = Actor {
            body: Body::from_def(handle, spawn.def),
            hooks: spawn.hooks,
            presentation: spawn.presentation,
        };
        info!(
            "new actor {handle:?} (mass {}, static {})",
            actor.body.mass(),
            actor.body.is_static
        );
        actor.try_initialize();
        self.actors.push(Some(actor));
        handle
    }

    /// Removes an actor. Bodies standing on it lose their ground link, so the
    /// next step applies no ground friction against it.
    pub fn destroy(&mut self, handle: BodyHandle) -> Result<()> {
        let Some(slot) = self.actors.get_mut(handle.0).filter(|s| s.is_some()) else {
            return Err(PhysicsError::UnknownBody(handle));
        };
        *slot = None;

        for actor in self.actors.iter_mut().flatten() {
            actor.body.forget_ground(handle);
        }
        debug!("{handle:?} destroyed");
        Ok(())
    }

    pub fn clear(&mut self) {
        self.actors.clear();
        self.commands = Commands::default();
    }

    /// Queue used outside of hooks; applied at the end of the next step or tick.
    pub fn commands(&mut self) -> &mut Commands {
        &mut self.commands
    }

    pub fn actor(&self, h: BodyHandle) -> Option<&Actor> {
        self.actors.get(h.0)?.as_ref()
    }

    pub fn body(&self, h: BodyHandle) -> Option<&Body> {
        self.actor(h).map(|a| &a.body)
    }

    pub fn body_mut(&mut self, h: BodyHandle) -> Option<&mut Body> {
        self.actors.get_mut(h.0)?.as_mut().map(|a| &mut a.body)
    }

    pub fn bodies(&self) -> impl Iterator<Item = &Body> {
        self.actors.iter().flatten().map(|a| &a.body)
    }

    pub fn len(&self) -> usize {
        self.actors.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The body `h` stands on, if it still exists.
    pub fn ground_of(&self, h: BodyHandle) -> Option<BodyHandle> {
        self.body(h)?.ground.filter(|g| self.body(*g).is_some())
    }

    /// One physics step for every initialized actor.
    pub fn step(&mut self, dt: f32) {
        let mut commands = std::mem::take(&mut self.commands);
        for i in 0..self.actors.len() {
            self.physics_step(i, dt, &mut commands);
        }
        self.apply(commands);
    }

    /// One render frame: initializes actors that became ready and moves the
    /// rest ahead of the last physics state.
    pub fn tick(&mut self, dt: f32) {
        let mut commands = std::mem::take(&mut self.commands);
        for i in 0..self.actors.len() {
            self.frame_step(i, dt, &mut commands);
        }
        self.apply(commands);
    }

    fn physics_step(&mut self, i: usize, dt: f32, commands: &mut Commands) {
        let config = self.config;
        let Some(actor) = self.actors[i].as_mut() else {
            return;
        };
        if !actor.body.is_initialized() {
            return;
        }

        actor.body.restore_snapshot();
        actor.rebuild_collider();
        actor.hooks.simulate(&mut actor.body, &config, commands);
        actor.body.set_grounded(false);

        if !actor.body.is_static {
            self.process_movement(i, config.physics_substeps, dt);
        }

        if let Some(actor) = self.actors[i].as_mut() {
            actor.body.save_snapshot();
            actor.report_position();
        }
    }

    fn frame_step(&mut self, i: usize, dt: f32, commands: &mut Commands) {
        let substeps = self.config.frame_substeps;
        let Some(actor) = self.actors[i].as_mut() else {
            return;
        };
        if !actor.body.is_initialized() {
            if actor.try_initialize() {
                actor.report_position();
            }
            return;
        }

        actor.hooks.frame_simulate(&mut actor.body, commands);

        if !actor.body.is_static {
            self.process_movement(i, substeps, dt);
        }

        if let Some(actor) = self.actors[i].as_mut() {
            actor.report_position();
        }
    }

    // Advances actor `i` in `steps` slices. Each slice tests the slice's goal
    // position against every other collider, resolves hits on both sides right
    // away, then commits the slice's movement.
    fn process_movement(&mut self, i: usize, steps: u32, dt: f32) {
        let config = self.config;
        let steps = steps.max(1);
        let Some(actor) = self.actors[i].as_ref() else {
            return;
        };
        let velocity_per_step = actor.body.velocity / steps as f32;

        for _ in 0..steps {
            let Some(actor) = self.actors[i].as_ref() else {
                return;
            };
            let goal = actor.body.position + velocity_per_step * dt;

            for j in 0..self.actors.len() {
                if j == i {
                    continue;
                }
                let Some((this, other)) = actors_two_mut(&mut self.actors, i, j) else {
                    continue;
                };
                let (Some(a), Some(b)) = (&this.body.collider, &other.body.collider) else {
                    continue;
                };
                let Some(displacement) =
                    intersect_from(a, this.body.position, goal, b, other.body.position)
                else {
                    continue;
                };

                trace!(
                    "contact {:?} / {:?}: {displacement:?}",
                    this.body.handle(),
                    other.body.handle()
                );
                this.hooks
                    .compute_collision(&mut this.body, &mut other.body, displacement, &config);
                other
                    .hooks
                    .compute_collision(&mut other.body, &mut this.body, -displacement, &config);
            }

            if let Some(actor) = self.actors[i].as_mut() {
                actor.body.position += velocity_per_step * dt;
            }
        }
    }

    fn apply(&mut self, mut commands: Commands) {
        for spawn in commands.spawns.drain(..) {
            let handle = self.insert(spawn);
            debug!("deferred spawn of {handle:?} applied");
        }
        for handle in commands.despawns.drain(..) {
            if let Err(e) = self.destroy(handle) {
                warn!("deferred despawn failed: {e}");
            }
        }
        // Requests made through `World::commands` after the step began.
        if !self.commands.is_empty() {
            let pending = std::mem::take(&mut self.commands);
            self.apply(pending);
        }
    }
}

/// Mutable access to two distinct live actors.
pub fn actors_two_mut(
    actors: &mut [Option<Actor>],
    a: usize,
    b: usize,
) -> Option<(&mut Actor, &mut Actor)> {
    assert!(a != b, "actors_two_mut called with identical indices");

    let (i, j) = if a < b { (a, b) } else { (b, a) };
    let (left, right) = actors.split_at_mut(j);
    let ai = left[i].as_mut()?;
    let aj = right[0].as_mut()?;

    if a < b { Some((ai, aj)) } else { Some((aj, ai)) }
}
