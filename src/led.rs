//! Device-facing handle.
//!
//! [`Led`] owns one open [`Transport`] plus the [`Delay`] used for holds, and
//! exposes immediate set/fade/read operations and sequence playback.

use core::fmt;

use crate::color::Color;
use crate::colors::OFF;
use crate::command::{Command, MIN_READ_RESPONSE_LEN, decode_color};
use crate::sequence::Sequence;
use crate::time::Delay;
use crate::transport::Transport;
use crate::types::Target;

/// Errors that can occur while talking to the device.
///
/// `E` is the transport's error type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedError<E> {
    /// No matching device was found during discovery.
    DeviceNotFound,

    /// The transport failed. Playback stops at the current frame.
    TransportFailure(E),

    /// The operation was called on a handle that cannot perform it, e.g. a
    /// closed or detached one. Reported before any I/O.
    PreconditionViolation(&'static str),

    /// A read response was too short to contain a color.
    MalformedResponse {
        /// Number of bytes received.
        len: usize,
    },
}

impl<E: fmt::Display> fmt::Display for LedError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedError::DeviceNotFound => write!(f, "could not find blink(1) device"),
            LedError::TransportFailure(err) => write!(f, "transport failure: {}", err),
            LedError::PreconditionViolation(reason) => {
                write!(f, "precondition violated: {}", reason)
            }
            LedError::MalformedResponse { len } => {
                write!(
                    f,
                    "malformed read response: expected at least {} bytes, got {}",
                    MIN_READ_RESPONSE_LEN, len
                )
            }
        }
    }
}

#[cfg(feature = "std")]
impl<E> std::error::Error for LedError<E>
where
    E: std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LedError::TransportFailure(err) => Some(err),
            _ => None,
        }
    }
}

/// A handle to one RGB status LED device.
///
/// A handle built with [`Default`] is detached: it owns no transport and
/// every device operation on it fails with
/// [`LedError::PreconditionViolation`]. [`close`](Self::close) is always safe.
///
/// # Type Parameters
/// * `T` - Transport implementation type
/// * `Dl` - Delay implementation type
pub struct Led<T: Transport, Dl: Delay> {
    transport: Option<T>,
    delay: Dl,
    target: Target,
}

impl<T: Transport, Dl: Delay> Led<T, Dl> {
    /// Wraps an opened transport. Commands address all LEDs.
    pub fn new(transport: T, delay: Dl) -> Self {
        Self {
            transport: Some(transport),
            delay,
            target: Target::All,
        }
    }

    /// Selects which LED fades and reads address.
    pub fn with_target(mut self, target: Target) -> Self {
        self.target = target;
        self
    }

    /// Returns the LED addressed by fades and reads.
    pub fn target(&self) -> Target {
        self.target
    }

    /// Returns true while the handle owns an open transport.
    pub fn is_open(&self) -> bool {
        self.transport.is_some()
    }

    /// Lights up the LED with `color` immediately.
    pub fn set(&mut self, color: Color) -> Result<(), LedError<T::Error>> {
        self.send(&Command::SetImmediate {
            color,
            target: self.target,
        })
    }

    /// Lights up the LED with the given channels immediately.
    pub fn set_rgb(&mut self, r: u8, g: u8, b: u8) -> Result<(), LedError<T::Error>> {
        self.set(Color::new(r, g, b))
    }

    /// Starts a fade to `color` over `duration`.
    ///
    /// Returns as soon as the device accepted the command; the fade runs on
    /// the device.
    pub fn fade(&mut self, color: Color, duration: Dl::Duration) -> Result<(), LedError<T::Error>> {
        self.send(&Command::FadeTo {
            color,
            duration,
            target: self.target,
        })
    }

    /// Starts a fade to the given channels over `duration`.
    pub fn fade_rgb(
        &mut self,
        r: u8,
        g: u8,
        b: u8,
        duration: Dl::Duration,
    ) -> Result<(), LedError<T::Error>> {
        self.fade(Color::new(r, g, b), duration)
    }

    /// Reads the color currently shown by the addressed LED.
    pub fn read(&mut self) -> Result<Color, LedError<T::Error>> {
        let request = Command::<Dl::Duration>::ReadCurrent {
            target: self.target,
        }
        .encode();

        let response = self
            .transport()?
            .read(&request)
            .map_err(LedError::TransportFailure)?;

        decode_color(&response).ok_or(LedError::MalformedResponse {
            len: response.len(),
        })
    }

    /// Plays `sequence` to completion. See [`Sequence::play`].
    pub fn play<const N: usize>(
        &mut self,
        sequence: &mut Sequence<Dl::Duration, N>,
    ) -> Result<(), LedError<T::Error>> {
        sequence.play(self)
    }

    /// Closes the device.
    ///
    /// Idempotent: closing a closed or detached handle does nothing.
    pub fn close(&mut self) {
        if let Some(mut transport) = self.transport.take() {
            log::debug!("closing led");
            transport.close();
        }
    }

    /// Fades the LED out over `duration`, waits for the fade, then closes.
    ///
    /// The handle is closed even if the fade fails.
    pub fn fade_out_close(&mut self, duration: Dl::Duration) -> Result<(), LedError<T::Error>> {
        let result = self.fade(OFF, duration);
        if result.is_ok() {
            self.delay.delay(duration);
        }
        self.close();
        result
    }

    pub(crate) fn send(&mut self, command: &Command<Dl::Duration>) -> Result<(), LedError<T::Error>> {
        self.transport()?
            .write(&command.encode())
            .map_err(LedError::TransportFailure)
    }

    pub(crate) fn hold(&mut self, duration: Dl::Duration) {
        self.delay.delay(duration);
    }

    fn transport(&mut self) -> Result<&mut T, LedError<T::Error>> {
        self.transport
            .as_mut()
            .ok_or(LedError::PreconditionViolation("led is not open"))
    }
}

impl<T: Transport, Dl: Delay + Default> Default for Led<T, Dl> {
    fn default() -> Self {
        Self {
            transport: None,
            delay: Dl::default(),
            target: Target::All,
        }
    }
}

impl<T: Transport, Dl: Delay> fmt::Debug for Led<T, Dl> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Led")
            .field("open", &self.is_open())
            .field("target", &self.target)
            .finish()
    }
}
