//! Text-mode renderer for terminals and logs

use super::{Frame, Renderer, SpriteKind};
use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::sim::{EnemyKind, GamePhase, Owner, PowerUpKind, Rect};

/// Pixels per character cell
const CELL_W: f32 = 8.0;
const CELL_H: f32 = 16.0;

/// Rasterizes frames into a character grid
#[derive(Debug, Clone)]
pub struct AsciiRenderer {
    cols: usize,
    rows: usize,
    last: String,
    frames_drawn: u64,
}

impl Default for AsciiRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl AsciiRenderer {
    pub fn new() -> Self {
        Self {
            cols: (CANVAS_WIDTH / CELL_W) as usize,
            rows: (CANVAS_HEIGHT / CELL_H) as usize,
            last: String::new(),
            frames_drawn: 0,
        }
    }

    /// Text of the most recent frame
    pub fn last_frame(&self) -> &str {
        &self.last
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    /// Glyph for a sprite; animated kinds swap to their second glyph on odd frames
    fn glyph(kind: SpriteKind, frame: u8) -> char {
        let (first, second) = match kind {
            SpriteKind::Enemy(EnemyKind::Top) => ('W', 'w'),
            SpriteKind::Enemy(EnemyKind::Middle) => ('X', 'x'),
            SpriteKind::Enemy(EnemyKind::Bottom) => ('O', 'o'),
            SpriteKind::Player => ('A', 'A'),
            SpriteKind::PlayerExplosion => ('*', '+'),
            SpriteKind::Projectile(Owner::Player) => ('|', '|'),
            SpriteKind::Projectile(Owner::Enemy) => ('!', '!'),
            SpriteKind::BarrierCell => ('#', '#'),
            SpriteKind::Bonus => ('@', '@'),
            SpriteKind::BonusScore(_) => ('$', '$'),
            SpriteKind::PowerUp(PowerUpKind::RapidFire) => ('R', 'R'),
            SpriteKind::PowerUp(PowerUpKind::SpreadShot) => ('S', 'S'),
            SpriteKind::PowerUp(PowerUpKind::Shield) => ('D', 'D'),
            SpriteKind::PowerUp(PowerUpKind::ExtraLife) => ('L', 'L'),
        };
        if frame % 2 == 1 { second } else { first }
    }

    /// Character cells touched by a rect, clipped to the grid
    fn cells(&self, rect: &Rect) -> Option<(usize, usize, usize, usize)> {
        if rect.right() <= 0.0
            || rect.bottom() <= 0.0
            || rect.x >= CANVAS_WIDTH
            || rect.y >= CANVAS_HEIGHT
        {
            return None;
        }
        let c0 = (rect.x.max(0.0) / CELL_W) as usize;
        let r0 = (rect.y.max(0.0) / CELL_H) as usize;
        let c1 = ((rect.right() / CELL_W).ceil() as usize).clamp(c0 + 1, self.cols);
        let r1 = ((rect.bottom() / CELL_H).ceil() as usize).clamp(r0 + 1, self.rows);
        Some((c0, r0, c1, r1))
    }

    fn banner(phase: GamePhase) -> &'static str {
        match phase {
            GamePhase::Menu => "PRESS FIRE TO START",
            GamePhase::Paused => "PAUSED",
            GamePhase::GameOver => "GAME OVER",
            GamePhase::Playing | GamePhase::PlayerDying | GamePhase::LevelComplete => "",
        }
    }

    /// Draw a frame to text (HUD line, playfield, banner line)
    pub fn draw(&self, frame: &Frame) -> String {
        let mut grid = vec![vec![' '; self.cols]; self.rows];

        for sprite in &frame.sprites {
            let Some((c0, r0, c1, r1)) = self.cells(&sprite.rect) else {
                continue;
            };
            let ch = Self::glyph(sprite.kind, sprite.frame);
            for row in grid.iter_mut().take(r1).skip(r0) {
                for cell in row.iter_mut().take(c1).skip(c0) {
                    *cell = ch;
                }
            }
        }

        let hud = &frame.hud;
        let mut out = format!(
            "SCORE {:06}  HI {:06}  LIVES {}  LEVEL {}  x{:.1}\n",
            hud.score, hud.high_score, hud.lives, hud.level, hud.combo
        );
        for row in &grid {
            out.extend(row.iter());
            out.push('\n');
        }
        out.push_str(Self::banner(hud.phase));
        out
    }
}

impl Renderer for AsciiRenderer {
    fn render(&mut self, frame: &Frame) {
        self.last = self.draw(frame);
        self.frames_drawn += 1;
        log::trace!("\n{}", self.last);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GameState;
    use crate::tuning::Tuning;

    fn playing_frame() -> Frame {
        let mut state = GameState::new(8, Tuning::default(), 120);
        crate::sim::start_game(&mut state);
        Frame::capture(&state, 0.0)
    }

    #[test]
    fn test_grid_dimensions() {
        let renderer = AsciiRenderer::new();
        let text = renderer.draw(&playing_frame());
        let lines: Vec<&str> = text.lines().collect();
        // HUD + 40 rows (banner is empty while playing)
        assert_eq!(lines.len(), 41);
        assert!(lines[1..].iter().all(|l| l.chars().count() == 70));
    }

    #[test]
    fn test_hud_and_sprites_drawn() {
        let renderer = AsciiRenderer::new();
        let text = renderer.draw(&playing_frame());
        assert!(text.starts_with("SCORE 000000  HI 000120  LIVES 3  LEVEL 1"));
        for glyph in ['W', 'X', 'O', 'A', '#'] {
            assert!(text.contains(glyph), "missing {glyph}");
        }
    }

    #[test]
    fn test_animation_frames_alternate_glyphs() {
        let top = SpriteKind::Enemy(EnemyKind::Top);
        assert_eq!(AsciiRenderer::glyph(top, 0), 'W');
        assert_eq!(AsciiRenderer::glyph(top, 1), 'w');
        assert_eq!(AsciiRenderer::glyph(top, 2), 'W');
        assert_eq!(AsciiRenderer::glyph(SpriteKind::PlayerExplosion, 3), '+');
        // Static sprites keep one glyph
        assert_eq!(AsciiRenderer::glyph(SpriteKind::Player, 1), 'A');
        assert_eq!(AsciiRenderer::glyph(SpriteKind::BarrierCell, 1), '#');
    }

    #[test]
    fn test_offscreen_sprites_skipped() {
        let renderer = AsciiRenderer::new();
        let rect = Rect::new(glam::Vec2::new(-50.0, 50.0), glam::Vec2::new(32.0, 14.0));
        assert!(renderer.cells(&rect).is_none());
    }

    #[test]
    fn test_render_keeps_last_frame() {
        let mut renderer = AsciiRenderer::new();
        let mut frame = playing_frame();
        frame.hud.phase = GamePhase::GameOver;
        renderer.render(&frame);
        assert_eq!(renderer.frames_drawn(), 1);
        assert!(renderer.last_frame().ends_with("GAME OVER"));
    }
}
