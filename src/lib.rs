// Interactive core of the Myra Keleher cleaning-agency site, as a library:
// the scrub-to-reveal "Evidence" canvas with its particle layer, the
// scroll-progress mapper behind the pinned sections, and the booking mail
// flow. The `reveal` binary drives all three from the command line.

pub mod booking;
pub mod compose;
pub mod config;
pub mod draw;
pub mod error;
pub mod evidence;
pub mod gamma;
pub mod grime;
pub mod particles;
pub mod reveal;
pub mod scroll;
pub mod types;

pub use error::{Error, Result};
