//! Compass-arc geometry core.
//!
//! Models a physical drawing compass: plant a center, fix a radius with a
//! second point, then sweep a pointer to trace an arc that closes into a full
//! circle once a complete revolution is detected. The crate owns the arc state
//! machine, the angle bookkeeping that survives the `-π/π` seam, and the
//! hit-testing used to select finished shapes. Drawing goes through an abstract
//! [`render::RenderSink`]; the host supplies the graphics binding.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`point`] | Screen-space `Point` and vector helpers |
//! | [`angle`] | Angle normalization and shortest signed delta |
//! | [`arc`] | The [`arc::CompassArc`] state machine |
//! | [`snapshot`] | JSON snapshot/restore of arc state |
//! | [`hit`] | Distance and closest-point queries, closest-element scan |
//! | [`render`] | Rendering sink trait and arc drawing |
//! | [`radius`] | Preferred-radius state and its persistence |
//! | [`config`] | Environment-driven configuration |
//! | [`input`] | Tools, modifiers, buttons, keys and gesture state |
//! | [`engine`] | Host-side [`engine::EngineCore`] wiring events to the arc |
//! | [`consts`] | Shared numeric constants (epsilon, minimum radii, tolerances) |

pub mod angle;
pub mod arc;
pub mod config;
pub mod consts;
pub mod engine;
pub mod hit;
pub mod input;
pub mod point;
pub mod radius;
pub mod render;
pub mod snapshot;
