/// Wavy circle sampling and smooth outline paths.
pub mod wavy;
