pub mod body;
pub mod hooks;
pub mod world;

pub use body::{Body, BodyDef, Snapshot};
pub use hooks::{
    ActorHooks, CircleCollider, FixedRect, PanelCollider, Presentation, Rect, circle_collider,
    panel_collider,
};
pub use world::{Actor, BodyHandle, Commands, World, actors_two_mut};
