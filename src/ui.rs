//! HUD and overlays
//!
//! The page owns layout; the game only flips overlays and writes numbers.

/// Which overlay is on top of the play surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overlay {
    #[default]
    None,
    StartScreen,
    GameOver,
}

pub trait Hud {
    fn set_score(&mut self, score: u32);
    fn set_best(&mut self, best: u32);
    fn set_fps(&mut self, _fps: u32) {}
    fn show_fps(&mut self, _visible: bool) {}
    fn show_overlay(&mut self, overlay: Overlay, final_score: u32);
}

/// HUD without a page. Remembers what it was told.
#[derive(Debug, Clone, Default)]
pub struct HeadlessHud {
    pub score: u32,
    pub best: u32,
    pub final_score: u32,
    pub overlay: Overlay,
    pub fps_visible: bool,
}

impl Hud for HeadlessHud {
    fn set_score(&mut self, score: u32) {
        self.score = score;
    }

    fn set_best(&mut self, best: u32) {
        self.best = best;
    }

    fn show_fps(&mut self, visible: bool) {
        self.fps_visible = visible;
    }

    fn show_overlay(&mut self, overlay: Overlay, final_score: u32) {
        self.overlay = overlay;
        if overlay == Overlay::GameOver {
            self.final_score = final_score;
        }
    }
}

/// DOM-backed HUD (WASM only)
#[cfg(target_arch = "wasm32")]
pub struct DomHud {
    score: Option<web_sys::Element>,
    best: Option<web_sys::Element>,
    final_score: Option<web_sys::Element>,
    fps: Option<web_sys::Element>,
    fps_wrap: Option<web_sys::Element>,
    start_screen: Option<web_sys::Element>,
    game_overlay: Option<web_sys::Element>,
}

#[cfg(target_arch = "wasm32")]
impl DomHud {
    pub fn new(document: &web_sys::Document) -> Self {
        let el = |id: &str| {
            let found = document.get_element_by_id(id);
            if found.is_none() {
                log::warn!("HUD element #{} not found", id);
            }
            found
        };
        Self {
            score: el("current-score"),
            best: el("best-score"),
            final_score: el("final-score"),
            fps: document.get_element_by_id("fps"),
            fps_wrap: document.get_element_by_id("fps-wrap"),
            start_screen: el("startScreen"),
            game_overlay: el("gameOverlay"),
        }
    }

    fn set_text(el: &Option<web_sys::Element>, value: u32) {
        if let Some(el) = el {
            el.set_text_content(Some(&value.to_string()));
        }
    }

    fn set_hidden(el: &Option<web_sys::Element>, hidden: bool) {
        if let Some(el) = el {
            let classes = el.class_list();
            let _ = if hidden {
                classes.add_1("hidden")
            } else {
                classes.remove_1("hidden")
            };
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl Hud for DomHud {
    fn set_score(&mut self, score: u32) {
        Self::set_text(&self.score, score);
    }

    fn set_best(&mut self, best: u32) {
        Self::set_text(&self.best, best);
    }

    fn set_fps(&mut self, fps: u32) {
        Self::set_text(&self.fps, fps);
    }

    fn show_fps(&mut self, visible: bool) {
        Self::set_hidden(&self.fps_wrap, !visible);
    }

    fn show_overlay(&mut self, overlay: Overlay, final_score: u32) {
        if overlay == Overlay::GameOver {
            Self::set_text(&self.final_score, final_score);
        }
        Self::set_hidden(&self.start_screen, overlay != Overlay::StartScreen);
        Self::set_hidden(&self.game_overlay, overlay != Overlay::GameOver);
    }
}
