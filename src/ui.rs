//! Score, time, and game-over display
//!
//! The session only emits events; this module turns them into display
//! updates on whatever sink is attached (the DOM in the browser).

use crate::session::GameEvent;

/// Somewhere to show session status
pub trait StatusSink {
    fn set_score(&mut self, score: u32);
    fn set_time(&mut self, remaining: u32);
    fn set_collect_enabled(&mut self, enabled: bool);
    fn show_game_over(&mut self, final_score: u32);
    fn hide_game_over(&mut self);
}

pub fn score_label(score: u32) -> String {
    format!("Score: {}", score)
}

pub fn time_label(remaining: u32) -> String {
    format!("Time: {}s", remaining)
}

pub fn final_score_label(score: u32) -> String {
    format!("Final Score: {}", score)
}

/// Reflect one session event on the sink
pub fn apply_event(sink: &mut dyn StatusSink, event: &GameEvent) {
    match *event {
        GameEvent::Started { duration } => {
            sink.set_score(0);
            sink.set_time(duration);
            sink.set_collect_enabled(true);
            sink.hide_game_over();
        }
        GameEvent::TimeChanged { remaining } => sink.set_time(remaining),
        GameEvent::Collected { score, .. } => sink.set_score(score),
        GameEvent::Ended { final_score } => {
            sink.set_collect_enabled(false);
            sink.show_game_over(final_score);
        }
    }
}

/// DOM-backed status display
#[cfg(target_arch = "wasm32")]
pub struct DomStatus {
    document: web_sys::Document,
}

#[cfg(target_arch = "wasm32")]
impl DomStatus {
    pub fn new(document: web_sys::Document) -> Self {
        Self { document }
    }

    fn set_text(&self, id: &str, text: &str) {
        if let Some(el) = self.document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_visible(&self, id: &str, visible: bool) {
        use wasm_bindgen::JsCast;

        if let Some(el) = self
            .document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok())
        {
            let display = if visible { "block" } else { "none" };
            if let Err(e) = el.style().set_property("display", display) {
                log::warn!("Failed to toggle #{}: {:?}", id, e);
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl StatusSink for DomStatus {
    fn set_score(&mut self, score: u32) {
        self.set_text("score", &score_label(score));
    }

    fn set_time(&mut self, remaining: u32) {
        self.set_text("time", &time_label(remaining));
    }

    fn set_collect_enabled(&mut self, enabled: bool) {
        use wasm_bindgen::JsCast;

        if let Some(btn) = self
            .document
            .get_element_by_id("collect")
            .and_then(|el| el.dyn_into::<web_sys::HtmlButtonElement>().ok())
        {
            btn.set_disabled(!enabled);
        }
    }

    fn show_game_over(&mut self, final_score: u32) {
        self.set_text("finalScore", &final_score_label(final_score));
        self.set_visible("gameOver", true);
    }

    fn hide_game_over(&mut self) {
        self.set_visible("gameOver", false);
    }
}
