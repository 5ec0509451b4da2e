//! # ASCII Renderer
//!
//! Draws a snapshot as rows of glyphs followed by a status line, the overlay
//! banner when one is showing, and the most recent messages.

use crate::config;
use crate::{EffectColor, ItemKind, Position, RenderSnapshot, Tile};

/// Glyph for a tile.
pub fn tile_glyph(tile: Tile) -> char {
    match tile {
        Tile::Wall => '#',
        Tile::Floor => '.',
    }
}

/// Glyph for an item.
pub fn item_glyph(kind: ItemKind) -> char {
    match kind {
        ItemKind::Potion => '!',
        ItemKind::Sword => '/',
    }
}

/// Glyph for a tile covered only by a live effect.
pub fn effect_glyph(color: EffectColor) -> char {
    match color {
        EffectColor::Swing => '*',
        EffectColor::Hit => 'x',
    }
}

/// Player glyph.
pub const PLAYER_GLYPH: char = '@';
/// Enemy glyph.
pub const ENEMY_GLYPH: char = 'e';

/// Text renderer with a short message history.
#[derive(Debug, Clone)]
pub struct AsciiRenderer {
    /// Message history, oldest first
    pub messages: Vec<String>,
    /// Maximum number of messages to keep
    pub max_messages: usize,
    /// Whether effects are drawn over empty tiles
    pub show_effects: bool,
}

impl Default for AsciiRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl AsciiRenderer {
    /// Creates a renderer that keeps the last three messages.
    ///
    /// # Examples
    ///
    /// ```
    /// use warren::{AsciiRenderer, WorldStore};
    ///
    /// let renderer = AsciiRenderer::new();
    /// let frame = renderer.render(&WorldStore::with_seed(1).snapshot());
    /// assert!(frame.starts_with("####"));
    /// ```
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            max_messages: 3,
            show_effects: true,
        }
    }

    /// Adds a message to the message history.
    pub fn add_message(&mut self, message: String) {
        self.messages.push(message);

        if self.messages.len() > self.max_messages {
            let excess = self.messages.len() - self.max_messages;
            self.messages.drain(..excess);
        }
    }

    /// Renders the map only, one line per row.
    pub fn render_map(&self, snapshot: &RenderSnapshot) -> String {
        let width = snapshot.width as usize;
        let mut cells: Vec<char> = snapshot.tiles.iter().map(|&tile| tile_glyph(tile)).collect();

        let index_of = |pos: Position| -> Option<usize> {
            let in_bounds = pos.x >= 0
                && pos.y >= 0
                && (pos.x as u32) < snapshot.width
                && (pos.y as u32) < snapshot.height;
            in_bounds.then(|| pos.y as usize * width + pos.x as usize)
        };

        // Later layers win: effects, items, enemies, then the player.
        if self.show_effects {
            for effect in &snapshot.effects {
                if let Some(index) = index_of(effect.position) {
                    cells[index] = effect_glyph(effect.color);
                }
            }
        }
        for item in &snapshot.items {
            if let Some(index) = index_of(item.position) {
                cells[index] = item_glyph(item.kind);
            }
        }
        for enemy in &snapshot.enemies {
            if let Some(index) = index_of(enemy.position) {
                cells[index] = ENEMY_GLYPH;
            }
        }
        if let Some(index) = index_of(snapshot.player.position) {
            cells[index] = PLAYER_GLYPH;
        }

        cells
            .chunks(width.max(1))
            .map(|row| row.iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// One-line summary of the player and the floor.
    pub fn status_line(&self, snapshot: &RenderSnapshot) -> String {
        format!(
            "HP {}/{}  ATK {}  Enemies {}  Items {}",
            snapshot.player.hp,
            config::MAX_HP,
            snapshot.player.attack,
            snapshot.enemies.len(),
            snapshot.items.len()
        )
    }

    /// Renders a full frame: map, status line, overlay and messages.
    pub fn render(&self, snapshot: &RenderSnapshot) -> String {
        let mut frame = self.render_map(snapshot);
        frame.push('\n');
        frame.push_str(&self.status_line(snapshot));

        if let Some(text) = &snapshot.overlay_text {
            frame.push_str(&format!("\n*** {} ***  (r to restart)", text));
        }
        for message in &self.messages {
            frame.push('\n');
            frame.push_str(message);
        }
        frame
    }
}
