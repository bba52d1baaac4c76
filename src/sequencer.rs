//! Sequence playback engine.
//!
//! Playback is a small state machine: a cursor over the frame list that
//! [`Sequence::advance`] moves one frame at a time. Loop and restart frames
//! move the cursor instead of producing reports. [`Sequence::play`] drives
//! `advance` to the end and performs the holds between frames.

use log::{debug, info, warn};

use crate::led::{Led, LedError};
use crate::sequence::{Frame, Sequence};
use crate::time::{Delay, TimeDuration};
use crate::transport::Transport;

/// Outcome of executing a single frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance<D> {
    /// A play or wait frame ran. The device should now idle for this long.
    Hold(D),

    /// A loop or restart frame moved the cursor to this index.
    Jump(usize),

    /// The cursor is past the last frame.
    Finished,
}

impl<D: TimeDuration, const N: usize> Sequence<D, N> {
    /// Moves the cursor back to the first frame and re-arms finite loops.
    ///
    /// Infinite loops whose stop handle already fired stay stopped.
    pub fn rewind(&mut self) {
        self.cursor = 0;
        for frame in self.frames.iter_mut() {
            if let Frame::Loop(marker) = frame {
                marker.rearm();
            }
        }
    }

    /// Executes the frame under the cursor without sleeping.
    ///
    /// # Returns
    /// * `Ok(Advance::Hold(d))` - A frame ran; idle for `d` before advancing again
    /// * `Ok(Advance::Jump(i))` - Control flow moved the cursor to `i`
    /// * `Ok(Advance::Finished)` - No frames left
    /// * `Err` - The transport failed; the cursor stays on the failing frame
    pub fn advance<T, Dl>(&mut self, led: &mut Led<T, Dl>) -> Result<Advance<D>, LedError<T::Error>>
    where
        T: Transport,
        Dl: Delay<Duration = D>,
    {
        let index = self.cursor;
        let Some(frame) = self.frames.get_mut(index) else {
            return Ok(Advance::Finished);
        };

        match frame {
            Frame::Play { command, hold } => {
                debug!("frame {}: {:?}, hold {:?}", index, command, hold);
                if let Err(err) = led.send(command) {
                    warn!("frame {}: transport failed, aborting sequence", index);
                    return Err(err);
                }
                self.cursor += 1;
                Ok(Advance::Hold(*hold))
            }
            Frame::Wait { duration } => {
                debug!("frame {}: wait {:?}", index, duration);
                self.cursor += 1;
                Ok(Advance::Hold(*duration))
            }
            Frame::Loop(marker) => {
                let exit = if marker.is_stopped() {
                    info!("frame {}: infinite loop stopped", index);
                    true
                } else {
                    match marker.remaining {
                        Some(remaining) => {
                            let left = remaining.saturating_sub(1);
                            marker.remaining = Some(left);
                            left == 0
                        }
                        None => false,
                    }
                };

                self.cursor = if exit {
                    index + 1
                } else {
                    marker.restart_index
                };
                debug!("frame {}: loop jumps to {}", index, self.cursor);
                Ok(Advance::Jump(self.cursor))
            }
            Frame::Restart { from_index } => {
                self.cursor = *from_index;
                debug!("frame {}: restart point set to {}", index, self.cursor);
                Ok(Advance::Jump(self.cursor))
            }
        }
    }

    /// Plays the sequence on `led`, blocking until every frame has run.
    ///
    /// Starts from the first frame on every call. Holds and waits go through
    /// the LED's delay. A sequence with an infinite loop only returns after
    /// the loop's [`StopHandle`](crate::StopHandle) fires and the current
    /// pass completes.
    ///
    /// # Errors
    /// * `PreconditionViolation` - `led` is closed or detached; nothing was sent
    /// * `TransportFailure` - A report could not be sent. Playback stops and
    ///   the device keeps the last color it accepted.
    pub fn play<T, Dl>(&mut self, led: &mut Led<T, Dl>) -> Result<(), LedError<T::Error>>
    where
        T: Transport,
        Dl: Delay<Duration = D>,
    {
        if !led.is_open() {
            return Err(LedError::PreconditionViolation("led is not open"));
        }

        self.rewind();
        loop {
            match self.advance(led)? {
                Advance::Hold(duration) => led.hold(duration),
                Advance::Jump(_) => {}
                Advance::Finished => break,
            }
        }

        info!("sequence of {} frames finished", self.frames.len());
        Ok(())
    }
}
