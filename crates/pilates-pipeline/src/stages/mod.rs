//! Built-in stage simulators and their fixed marker manifests.
//!
//! File names are reproduced exactly, including their mixed case, because
//! downstream consumers look for them by name.

pub mod activitysim;
pub mod beam;
pub mod postprocessing;
pub mod urbansim;

pub use activitysim::ActivitySimStage;
pub use beam::BeamStage;
pub use postprocessing::PostprocessingStage;
pub use urbansim::UrbanSimStage;
