//! Windows deployment: staging image, Qt runtime harvesting, signing and NSIS.

pub mod deploy;
pub mod dll;
pub mod image;
pub mod nsis;
pub mod qt;
pub mod redist;
pub mod sign;

pub use deploy::{DeployHelper, DeployOutcome};
pub use image::StagingImage;
