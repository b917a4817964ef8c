//! Builds one frame per render iteration

use super::frame::Frame;
use super::icons;
use crate::sources::MetricSnapshot;
use embedded_graphics::image::{Image, ImageRaw};
use embedded_graphics::mono_font::iso_8859_1::FONT_7X13;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};

// The panel is split into four 16px rows with icons on the outer edges.
// Left-column values start at a fixed x; right-column values are anchored
// by their right edge so they grow leftwards.
const ROW_NETWORK: i32 = 0;
const ROW_CPU: i32 = 16;
const ROW_MEMORY: i32 = 32;
const ROW_DISK: i32 = 48;

const ICON_LEFT_X: i32 = 1;
const ICON_RIGHT_X: i32 = 111;
const TEXT_LEFT_X: i32 = 22;
const TEMP_ANCHOR_X: i32 = 107;
const MEM_RATIO_ANCHOR_X: i32 = 125;
const UPTIME_ANCHOR_X: i32 = 107;

/// Renders metric snapshots into the reused frame buffer.
///
/// Holds the cached memory total for the used/total ratio text. Values are
/// drawn exactly as the providers produced them — a malformed string shows
/// up on the panel rather than being validated away.
pub struct FrameComposer {
    frame: Frame,
    total_gb: f64,
}

impl FrameComposer {
    pub fn new(total_gb: f64) -> Self {
        Self {
            frame: Frame::new(),
            total_gb,
        }
    }

    /// Clear the frame and draw the full layout from `snapshot`.
    ///
    /// Deterministic: the same snapshot always yields the same pixels.
    pub fn compose(&mut self, snapshot: &MetricSnapshot) -> &Frame {
        let total_gb = self.total_gb;
        self.frame.clear();

        self.icon(icons::NETWORK, Point::new(ICON_LEFT_X, ROW_NETWORK));
        self.icon(icons::CPU, Point::new(ICON_LEFT_X, ROW_CPU));
        self.icon(icons::TEMPERATURE, Point::new(ICON_RIGHT_X, ROW_CPU));
        self.icon(icons::MEMORY, Point::new(ICON_LEFT_X, ROW_MEMORY));
        self.icon(icons::DISK, Point::new(ICON_LEFT_X, ROW_DISK));
        self.icon(icons::UPTIME, Point::new(ICON_RIGHT_X, ROW_DISK));

        self.text_left(&snapshot.ip, Point::new(TEXT_LEFT_X, ROW_NETWORK));
        self.text_left(
            &format!("{}%", snapshot.cpu_percent),
            Point::new(TEXT_LEFT_X, ROW_CPU),
        );
        self.text_right(
            &format!("{}°C", snapshot.temperature),
            Point::new(TEMP_ANCHOR_X, ROW_CPU),
        );
        self.text_left(
            &format!("{}%", snapshot.mem_used_percent),
            Point::new(TEXT_LEFT_X, ROW_MEMORY),
        );
        self.text_right(
            &format!("{:.1}/{:.1}G", snapshot.mem_used_gb, total_gb),
            Point::new(MEM_RATIO_ANCHOR_X, ROW_MEMORY),
        );
        self.text_left(&snapshot.disk_used, Point::new(TEXT_LEFT_X, ROW_DISK));
        self.text_right(&snapshot.uptime, Point::new(UPTIME_ANCHOR_X, ROW_DISK));

        &self.frame
    }

    fn icon(&mut self, data: &[u8], position: Point) {
        let raw = ImageRaw::<BinaryColor>::new(data, icons::SIZE);
        let _ = Image::new(&raw, position).draw(&mut self.frame);
    }

    fn text_left(&mut self, text: &str, position: Point) {
        self.text(text, position, Alignment::Left);
    }

    fn text_right(&mut self, text: &str, position: Point) {
        self.text(text, position, Alignment::Right);
    }

    fn text(&mut self, text: &str, position: Point, alignment: Alignment) {
        let character = MonoTextStyle::new(&FONT_7X13, BinaryColor::On);
        let style = TextStyleBuilder::new()
            .alignment(alignment)
            .baseline(Baseline::Top)
            .build();
        let _ = Text::with_text_style(text, position, character, style).draw(&mut self.frame);
    }
}
