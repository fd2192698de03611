//! 16×2 character display adapter.
//!
//! Implements [`EventSink`] by rendering [`AppEvent::Display`] pages and
//! the startup splash into a two-row frame buffer.  After every page
//! except the last it blocks for the configured dwell so each value stays
//! readable; the last page remains until the next cycle overwrites it.
//!
//! The panel itself is not driven yet; each frame is flushed to the log.

use embedded_hal::delay::DelayNs;
use heapless::String;
use log::info;

use crate::app::events::{AppEvent, DisplayPage};
use crate::app::ports::EventSink;

/// Characters per row.
pub const COLUMNS: usize = 16;

type Row = String<COLUMNS>;

pub struct CharacterDisplay<D: DelayNs> {
    rows: [Row; 2],
    dwell_ms: u32,
    delay: D,
}

impl<D: DelayNs> CharacterDisplay<D> {
    pub fn new(dwell_ms: u32, delay: D) -> Self {
        Self {
            rows: [Row::new(), Row::new()],
            dwell_ms,
            delay,
        }
    }

    /// Current frame contents.
    pub fn rows(&self) -> (&str, &str) {
        (self.rows[0].as_str(), self.rows[1].as_str())
    }

    fn show(&mut self, top: &str, bottom: &str) {
        self.rows = [fit(top), fit(bottom)];
        info!("LCD | {:<16} | {:<16}", self.rows[0], self.rows[1]);
    }

    pub fn render_page(&mut self, page: &DisplayPage) {
        let value = format!("{:.1}{}", page.value, page.unit);
        self.show(page.label, &value);

        if !page.is_last() {
            self.delay.delay_ms(self.dwell_ms);
        }
    }
}

impl<D: DelayNs> EventSink for CharacterDisplay<D> {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started => self.show("   TrackWatch", "   starting..."),
            AppEvent::Display(page) => self.render_page(page),
            _ => {}
        }
    }
}

/// Copy as many characters as fit on one row.
fn fit(text: &str) -> Row {
    let mut row = Row::new();
    for c in text.chars() {
        if row.push(c).is_err() {
            break;
        }
    }
    row
}
