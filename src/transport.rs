//! Device transport capability.
//!
//! The core never talks to USB directly. It hands encoded reports to a
//! [`Transport`], which can be a real device (see the `usb` feature), a mock,
//! or a simulator.

/// Length of every report sent to the device.
pub const REPORT_LEN: usize = 8;

/// An encoded report.
pub type Report = [u8; REPORT_LEN];

/// Bytes returned by a read. May be shorter than a full report.
pub type Response = heapless::Vec<u8, REPORT_LEN>;

/// Trait for abstracting the device transfer layer.
///
/// Implementations are single-owner and need no internal locking.
pub trait Transport {
    /// Error produced by a failed transfer.
    type Error;

    /// Sends a report to the device.
    fn write(&mut self, report: &Report) -> Result<(), Self::Error>;

    /// Sends a request report and returns the device's response.
    fn read(&mut self, request: &Report) -> Result<Response, Self::Error>;

    /// Releases the device. Called once when the owning handle closes.
    fn close(&mut self) {}
}

impl<T: Transport + ?Sized> Transport for &mut T {
    type Error = T::Error;

    fn write(&mut self, report: &Report) -> Result<(), Self::Error> {
        (**self).write(report)
    }

    fn read(&mut self, request: &Report) -> Result<Response, Self::Error> {
        (**self).read(request)
    }

    fn close(&mut self) {
        (**self).close()
    }
}
