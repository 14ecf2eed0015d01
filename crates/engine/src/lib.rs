pub use bevy_ecs::world::World;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use crate::prelude::*;
pub type Result<T> = anyhow::Result<T>;

pub mod components;
pub mod input;
pub mod layers;
pub mod prelude;

pub trait Layer: 'static {
    fn frame(&mut self, context: &LayerContext) -> Result<()>;
    fn detach(&mut self, context: &LayerContext);
}

pub trait LayerFactory: 'static {
    fn create(&self, context: &LayerContext) -> Result<Box<dyn Layer>>;
}

pub struct LayerContext {
    pub world: Arc<Mutex<World>>,
    pub delta_time: Duration,
}

impl LayerContext {
    /// Lock the shared world for the duration of the returned guard
    pub fn world(&self) -> Result<MutexGuard<'_, World>> {
        lock_world(&self.world)
    }
}

fn lock_world(world: &Mutex<World>) -> Result<MutexGuard<'_, World>> {
    world
        .lock()
        .map_err(|_| anyhow::anyhow!("World lock poisoned by a panicking layer"))
}

pub struct ApplicationBuilder {
    layer_factories: Vec<Box<dyn LayerFactory>>,
}

impl ApplicationBuilder {
    pub fn new() -> Self {
        Self {
            layer_factories: Vec::new(),
        }
    }

    pub fn add_layer<F>(mut self, factory_fn: F) -> Self
    where
        F: Fn(&LayerContext) -> Result<Box<dyn Layer>> + 'static,
    {
        self.layer_factories
            .push(Box::new(ClosureLayerFactory::new(factory_fn)));
        self
    }

    pub fn build(self) -> Application {
        let mut world = World::new();

        // Host resources every layer can rely on
        world.insert_resource(InputState::new());
        world.insert_resource(InputBindings::default());
        world.insert_resource(ActionEvents::default());
        world.insert_resource(Time(Duration::ZERO));
        world.insert_resource(FrameCount(0));

        Application {
            layer_factories: self.layer_factories,
            layers: Vec::new(),
            world: Arc::new(Mutex::new(world)),
            frame: 0,
        }
    }
}

impl Default for ApplicationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

struct ClosureLayerFactory<F> {
    factory_fn: F,
}

impl<F> ClosureLayerFactory<F> {
    fn new(factory_fn: F) -> Self {
        Self { factory_fn }
    }
}

impl<F> LayerFactory for ClosureLayerFactory<F>
where
    F: Fn(&LayerContext) -> Result<Box<dyn Layer>> + 'static,
{
    fn create(&self, context: &LayerContext) -> Result<Box<dyn Layer>> {
        (self.factory_fn)(context)
    }
}

/// Headless host that owns the world and drives every layer once per frame
pub struct Application {
    layer_factories: Vec<Box<dyn LayerFactory>>,
    layers: Vec<Box<dyn Layer>>,
    world: Arc<Mutex<World>>,
    frame: u64,
}

impl Application {
    /// Instantiate all registered layers in registration order.
    ///
    /// Layers may inspect and mutate the world while being created, so
    /// entities the layers depend on should be spawned before this is called.
    pub fn start(&mut self) -> Result<()> {
        if !self.layers.is_empty() {
            anyhow::bail!("Application already started");
        }

        let context = self.context(Duration::ZERO);
        let mut layers: Vec<Box<dyn Layer>> = Vec::with_capacity(self.layer_factories.len());
        for factory in &self.layer_factories {
            match factory.create(&context) {
                Ok(layer) => layers.push(layer),
                Err(error) => {
                    // Undo whatever the layers created so far did to the world
                    while let Some(mut layer) = layers.pop() {
                        layer.detach(&context);
                    }
                    return Err(error);
                }
            }
        }
        self.layers = layers;

        log::info!("Started application with {} layers", self.layers.len());
        Ok(())
    }

    /// Advance the simulation by one frame
    pub fn step(&mut self, delta_time: Duration) -> Result<()> {
        if self.layers.is_empty() {
            anyhow::bail!("Application::step called before start");
        }

        {
            let mut world = lock_world(&self.world)?;
            world.insert_resource(Time(delta_time));
            world.insert_resource(FrameCount(self.frame));
        }

        let context = self.context(delta_time);
        for layer in &mut self.layers {
            layer.frame(&context)?;
        }

        // Raw deltas only live for the frame they were reported in
        {
            let mut world = lock_world(&self.world)?;
            if let Some(mut input_state) = world.get_resource_mut::<InputState>() {
                input_state.reset_frame();
            }
            world.clear_trackers();
        }

        self.frame += 1;
        Ok(())
    }

    /// Step `frames` times with a fixed delta
    pub fn run_for(&mut self, frames: u64, delta_time: Duration) -> Result<()> {
        for _ in 0..frames {
            self.step(delta_time)?;
        }
        Ok(())
    }

    /// Detach every layer, most recently created first
    pub fn shutdown(&mut self) {
        let context = self.context(Duration::ZERO);
        while let Some(mut layer) = self.layers.pop() {
            layer.detach(&context);
        }
        log::info!("Application shut down after {} frames", self.frame);
    }

    pub fn spawn<B: Bundle>(&mut self, label: impl Into<String>, bundle: B) -> Result<Entity> {
        let bundle = (
            Tag {
                label: label.into(),
            },
            bundle,
        );
        let entity = lock_world(&self.world)?.spawn(bundle).id();
        Ok(entity)
    }

    /// Run a closure with exclusive access to the world
    pub fn with_world<R>(&self, f: impl FnOnce(&mut World) -> R) -> Result<R> {
        let mut world = lock_world(&self.world)?;
        Ok(f(&mut world))
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    fn context(&self, delta_time: Duration) -> LayerContext {
        LayerContext {
            world: self.world.clone(),
            delta_time,
        }
    }
}
