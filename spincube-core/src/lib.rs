/// Spincube Core Library - math, mesh and frame loop for the spinning cube
///
/// This library holds everything that does not depend on a particular output:
/// vertex transformations, perspective projection, screen mapping, the
/// renderer that turns a mesh into surface calls, and the animation loop.

pub mod animation;
pub mod error;
pub mod geometry;
pub mod projection;
pub mod render;
pub mod schedule;
pub mod surface;
pub mod transform;
pub mod vertex;

// Re-export commonly used types
pub use animation::{Animation, AnimationState, FPS, POINT_CLOUD_FPS};
pub use error::MeshError;
pub use geometry::{Face, Mesh, CUBE_SIZE};
pub use projection::{screenify, NdcPoint, ScreenPoint, Viewport, HEIGHT, WIDTH};
pub use render::{RenderMode, RenderStyle, Renderer, LINE_WIDTH, POINT_SIZE};
pub use schedule::{FixedStepScheduler, FrameLoop, LoopPhase, RealTimeScheduler, Scheduler, StopHandle, Tick};
pub use surface::{Color, DrawCall, RecordingSurface, Surface, BACKGROUND, FOREGROUND};
pub use transform::Transform;
pub use vertex::Vertex;
