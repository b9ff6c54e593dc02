pub mod certificate;
pub mod locations;
pub mod map;
pub mod player;
pub mod progress;
pub mod util;
