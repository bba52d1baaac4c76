use alloc::sync::Arc;
use core::sync::atomic::{AtomicBool, Ordering};

use heapless::Vec;

use crate::color::Color;
use crate::colors::OFF;
use crate::command::Command;
use crate::time::TimeDuration;
use crate::types::{LoopCount, SequenceError};

/// A single entry in a [`Sequence`].
#[derive(Debug)]
pub enum Frame<D: TimeDuration> {
    /// Send `command`, then idle for `hold`.
    Play { command: Command<D>, hold: D },

    /// Idle without touching the device.
    Wait { duration: D },

    /// Send playback back to an earlier frame.
    Loop(LoopMarker),

    /// Everything before `from_index` ran once; later loops rewind to
    /// `from_index` instead of the sequence start.
    Restart { from_index: usize },
}

/// Loop bookkeeping for a [`Frame::Loop`].
#[derive(Debug)]
pub struct LoopMarker {
    pub(crate) count: LoopCount,
    pub(crate) remaining: Option<u32>,
    pub(crate) restart_index: usize,
    pub(crate) stop: Option<Arc<AtomicBool>>,
}

impl LoopMarker {
    fn finite(count: u32, restart_index: usize) -> Self {
        Self {
            count: LoopCount::Finite(count),
            remaining: Some(count),
            restart_index,
            stop: None,
        }
    }

    fn infinite(restart_index: usize, stop: Arc<AtomicBool>) -> Self {
        Self {
            count: LoopCount::Infinite,
            remaining: None,
            restart_index,
            stop: Some(stop),
        }
    }

    /// Configured loop count.
    pub fn count(&self) -> LoopCount {
        self.count
    }

    /// Passes left before a finite loop exits; `None` for infinite loops.
    pub fn remaining(&self) -> Option<u32> {
        self.remaining
    }

    /// Frame index playback rewinds to.
    pub fn restart_index(&self) -> usize {
        self.restart_index
    }

    /// Returns true once an infinite loop's stop handle has fired.
    pub fn is_stopped(&self) -> bool {
        self.stop
            .as_ref()
            .is_some_and(|stop| stop.load(Ordering::Acquire))
    }

    pub(crate) fn rearm(&mut self) {
        if let LoopCount::Finite(count) = self.count {
            self.remaining = Some(count);
        }
    }
}

/// Close-only stop signal for an infinite loop.
///
/// Returned by [`Sequence::loop_forever`]. Calling [`stop`](Self::stop),
/// possibly from another thread, makes the loop exit the next time playback
/// reaches it. A frame that is already playing is never interrupted.
#[derive(Debug)]
pub struct StopHandle {
    flag: Arc<AtomicBool>,
}

impl StopHandle {
    /// Requests the loop to stop after its current pass.
    pub fn stop(self) {
        self.flag.store(true, Ordering::Release);
    }

    /// Returns true if the loop has been asked to stop.
    pub fn is_stopped(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}

/// An ordered list of frames played back on a [`Led`](crate::Led).
///
/// Built with chained calls:
///
/// ```
/// use core::time::Duration;
/// use blink_sequencer::{Sequence, colors};
///
/// let d = Duration::from_millis(500);
/// let sequence = Sequence::<Duration, 8>::new()
///     .fade(colors::RED, d)?
///     .fade(colors::GREEN, d)?
///     .fade(colors::BLUE, d)?
///     .wait(Duration::from_secs(1))?
///     .off()?;
/// assert_eq!(sequence.len(), 5);
/// # Ok::<(), blink_sequencer::SequenceError>(())
/// ```
///
/// A sequence is not safe for concurrent playback; `play` takes it by
/// mutable reference.
///
/// # Type Parameters
/// * `D` - The duration type (e.g., `core::time::Duration`)
/// * `N` - Maximum number of frames this sequence can hold
#[derive(Debug)]
pub struct Sequence<D: TimeDuration, const N: usize> {
    pub(crate) frames: Vec<Frame<D>, N>,
    pub(crate) cursor: usize,
    restart_point: usize,
}

impl<D: TimeDuration, const N: usize> Sequence<D, N> {
    /// Creates an empty sequence.
    pub fn new() -> Self {
        Self {
            frames: Vec::new(),
            cursor: 0,
            restart_point: 0,
        }
    }

    /// Adds a frame that switches the LED off immediately.
    pub fn off(self) -> Result<Self, SequenceError> {
        self.set(OFF, D::ZERO)
    }

    /// Adds a frame that sets `color` immediately and holds it for `hold`.
    pub fn set(self, color: Color, hold: D) -> Result<Self, SequenceError> {
        self.push(Frame::Play {
            command: Command::set(color),
            hold,
        })
    }

    /// Adds a frame that fades to `color` over `duration` and waits for the
    /// fade to finish.
    pub fn fade(self, color: Color, duration: D) -> Result<Self, SequenceError> {
        self.push(Frame::Play {
            command: Command::fade(color, duration),
            hold: duration,
        })
    }

    /// Adds a frame that does nothing for `duration`.
    pub fn wait(self, duration: D) -> Result<Self, SequenceError> {
        self.push(Frame::Wait { duration })
    }

    /// Marks the current position as the restart point for loops added
    /// after it. Frames before the mark play only once.
    pub fn start(mut self) -> Result<Self, SequenceError> {
        let from_index = self.frames.len() + 1;
        self = self.push(Frame::Restart { from_index })?;
        self.restart_point = from_index;
        Ok(self)
    }

    /// Adds a loop that plays everything since the restart point `count`
    /// times in total.
    ///
    /// Counts of 0 and 1 both play the enclosed frames once.
    pub fn loop_n(self, count: u32) -> Result<Self, SequenceError> {
        let restart = self.restart_point;
        self.push(Frame::Loop(LoopMarker::finite(count, restart)))
    }

    /// Adds a loop that repeats everything since the restart point until the
    /// returned handle is stopped.
    pub fn loop_forever(self) -> Result<(Self, StopHandle), SequenceError> {
        let flag = Arc::new(AtomicBool::new(false));
        let restart = self.restart_point;
        let sequence = self.push(Frame::Loop(LoopMarker::infinite(restart, flag.clone())))?;
        Ok((sequence, StopHandle { flag }))
    }

    fn push(mut self, frame: Frame<D>) -> Result<Self, SequenceError> {
        self.frames
            .push(frame)
            .map_err(|_| SequenceError::CapacityExceeded)?;
        Ok(self)
    }

    /// Returns the number of frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Returns true if the sequence has no frames.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Returns the frames in playback order.
    pub fn frames(&self) -> &[Frame<D>] {
        &self.frames
    }

    /// Returns the index of the next frame to play.
    pub fn position(&self) -> usize {
        self.cursor
    }
}

impl<D: TimeDuration, const N: usize> Default for Sequence<D, N> {
    fn default() -> Self {
        Self::new()
    }
}
