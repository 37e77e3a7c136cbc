//! Media synchronization: the handle contract, the bridge that drives it, and a
//! simulated handle for running without an audio device.

mod bridge;
mod error;
mod handle;
mod position;
mod simulated;

pub use bridge::MediaBridge;
pub use error::MediaError;
pub use handle::{Generation, MediaEvent, MediaEventKind, MediaHandle};
pub use position::{whole_seconds, PlaybackPosition};
pub use simulated::SimulatedHandle;
