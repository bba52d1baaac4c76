#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`Color`**: A 24-bit RGB value with saturating `scale` and `add`
//! - **`Command`**: A device command (set, fade, read) encoded into an 8-byte report
//! - **`Transport`**: Trait to implement for the device transfer layer
//! - **`Delay`**: Trait to implement for blocking holds between frames
//! - **`Sequence`**: An ordered list of frames with loops and restart points
//! - **`StopHandle`**: Close-only signal that ends an infinite loop
//! - **`Led`**: The device handle that sets, fades, reads and plays sequences
//!
//! Playback is synchronous: every transport call and every hold happens on
//! the calling thread. The only cross-thread interaction is stopping an
//! infinite loop, which is observed when playback reaches the loop frame.

extern crate alloc;

pub mod color;
pub mod colors;
pub mod command;
pub mod led;
pub mod sequence;
pub mod sequencer;
pub mod time;
pub mod transport;
pub mod types;
#[cfg(feature = "usb")]
pub mod usb;

pub use color::{Color, ColorParseError};
pub use command::{Command, REPORT_ID};
pub use led::{Led, LedError};
pub use sequence::{Frame, LoopMarker, Sequence, StopHandle};
pub use sequencer::Advance;
#[cfg(feature = "std")]
pub use time::StdDelay;
pub use time::{Delay, TimeDuration};
pub use transport::{REPORT_LEN, Report, Response, Transport};
pub use types::{LoopCount, SequenceError, Target};
#[cfg(feature = "usb")]
pub use usb::UsbTransport;

pub use colors::{BLUE, GREEN, OFF, RED, WHITE, YELLOW};
