//! Integration tests for report encoding

use std::time::Duration;

use blink_sequencer::command::{decode_color, fade_time};
use blink_sequencer::{Color, Command, REPORT_ID, Target, WHITE};

#[test]
fn set_immediate_encodes_color_without_payload() {
    let command = Command::<Duration>::set(Color::new(2, 3, 4));
    assert_eq!(command.encode(), [REPORT_ID, b'n', 2, 3, 4, 0, 0, 0]);
}

#[test]
fn set_immediate_never_transmits_target() {
    let command = Command::<Duration>::SetImmediate {
        color: Color::new(2, 3, 4),
        target: Target::Led(2),
    };
    assert_eq!(command.encode(), [REPORT_ID, b'n', 2, 3, 4, 0, 0, 0]);
}

#[test]
fn fade_encodes_big_endian_time_and_target() {
    let command = Command::FadeTo {
        color: Color::new(2, 3, 4),
        duration: Duration::from_millis(328_010),
        target: Target::Led(1),
    };
    assert_eq!(command.encode(), [REPORT_ID, b'c', 2, 3, 4, 0x80, 0x21, 0x01]);

    let command = Command::fade(WHITE, Duration::from_secs(5));
    assert_eq!(command.encode(), [REPORT_ID, b'c', 0xff, 0xff, 0xff, 0x01, 0xf4, 0x00]);
}

#[test]
fn read_encodes_target_only() {
    let command = Command::<Duration>::ReadCurrent {
        target: Target::Led(1),
    };
    assert_eq!(command.encode(), [REPORT_ID, b'r', 0, 0, 0, 0, 0, 0x01]);
}

#[test]
fn fade_time_uses_ten_millisecond_units() {
    assert_eq!(fade_time(Duration::from_millis(10)), [0x00, 0x01]);
    assert_eq!(fade_time(Duration::from_millis(2_560)), [0x01, 0x00]);
    assert_eq!(fade_time(Duration::from_millis(9)), [0x00, 0x00]);
}

#[test]
fn target_byte_round_trips_through_u8() {
    assert_eq!(Target::from(0), Target::All);
    assert_eq!(Target::from(2), Target::Led(2));
    assert_eq!(Target::All.as_byte(), 0);
    assert_eq!(Target::Led(2).as_byte(), 2);
}

#[test]
fn decode_reads_color_at_offsets_two_to_four() {
    let response = [REPORT_ID, b'r', 9, 8, 7, 0, 0, 0];
    assert_eq!(decode_color(&response), Some(Color::new(9, 8, 7)));
    assert_eq!(decode_color(&response[..4]), None);
}
