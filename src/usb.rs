//! USB transport for blink(1) devices, built on `rusb`.
//!
//! Reports travel as HID class control transfers on interface 0: SET_REPORT
//! for commands, SET_REPORT followed by GET_REPORT for reads.

use std::time::Duration;

use log::debug;
use rusb::{DeviceHandle, Direction, GlobalContext, Recipient, RequestType};

use crate::command::REPORT_ID;
use crate::led::{Led, LedError};
use crate::time::StdDelay;
use crate::transport::{Report, Response, Transport};

/// USB vendor identifier of ThingM blink(1) devices.
pub const VENDOR_ID: u16 = 0x27B8;

/// USB product identifier of ThingM blink(1) devices.
pub const PRODUCT_ID: u16 = 0x01ED;

/// Default upper bound for a single control transfer.
pub const DEFAULT_USB_TIMEOUT: Duration = Duration::from_secs(1);

const HID_GET_REPORT: u8 = 0x01;
const HID_SET_REPORT: u8 = 0x09;

/// An open blink(1) device.
pub struct UsbTransport {
    handle: DeviceHandle<GlobalContext>,
    timeout: Duration,
}

impl UsbTransport {
    /// Opens the first connected blink(1) device.
    ///
    /// Returns `Ok(None)` if no device matches.
    pub fn open() -> rusb::Result<Option<Self>> {
        Self::open_with_timeout(DEFAULT_USB_TIMEOUT)
    }

    /// Like [`open`](Self::open) with a custom per-transfer timeout.
    pub fn open_with_timeout(timeout: Duration) -> rusb::Result<Option<Self>> {
        for device in rusb::devices()?.iter() {
            let Ok(descriptor) = device.device_descriptor() else {
                continue;
            };

            if descriptor.vendor_id() != VENDOR_ID || descriptor.product_id() != PRODUCT_ID {
                continue;
            }

            debug!(
                "opening blink(1) on bus {} address {}",
                device.bus_number(),
                device.address()
            );
            let handle = device.open()?;
            return Ok(Some(Self { handle, timeout }));
        }

        Ok(None)
    }

    fn set_report(&mut self, report: &Report) -> rusb::Result<()> {
        let request_type = rusb::request_type(Direction::Out, RequestType::Class, Recipient::Interface);
        let written = self.handle.write_control(
            request_type,
            HID_SET_REPORT,
            u16::from(REPORT_ID),
            0,
            report,
            self.timeout,
        )?;

        if written != report.len() {
            return Err(rusb::Error::Io);
        }
        Ok(())
    }
}

impl Transport for UsbTransport {
    type Error = rusb::Error;

    fn write(&mut self, report: &Report) -> Result<(), Self::Error> {
        self.set_report(report)
    }

    fn read(&mut self, request: &Report) -> Result<Response, Self::Error> {
        self.set_report(request)?;

        let request_type = rusb::request_type(Direction::In, RequestType::Class, Recipient::Interface);
        let mut buf = *request;
        let read = self.handle.read_control(
            request_type,
            HID_GET_REPORT,
            u16::from(REPORT_ID),
            0,
            &mut buf,
            self.timeout,
        )?;

        let mut response = Response::new();
        for &byte in buf.iter().take(read) {
            // Capacity equals the buffer length, so this never fails.
            let _ = response.push(byte);
        }
        Ok(response)
    }
}

impl Led<UsbTransport, StdDelay> {
    /// Connects to the first locally attached blink(1) device.
    ///
    /// With several devices attached, the first one enumerated wins.
    ///
    /// # Errors
    /// * `DeviceNotFound` - No blink(1) is connected
    /// * `TransportFailure` - Enumeration or opening failed
    pub fn open() -> Result<Self, LedError<rusb::Error>> {
        match UsbTransport::open() {
            Ok(Some(transport)) => Ok(Led::new(transport, StdDelay)),
            Ok(None) => Err(LedError::DeviceNotFound),
            Err(err) => Err(LedError::TransportFailure(err)),
        }
    }
}
