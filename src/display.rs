//! Rendering layer: all terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! game. No game logic is performed; this module only translates state into
//! terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use spaceship_infinity::compute::Game;
use spaceship_infinity::entities::{Cell, Key};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_AMMO: Color = Color::Cyan;
const C_SHIP: Color = Color::White;
const C_WALL: Color = Color::Grey;
const C_AMMO: Color = Color::DarkGrey;
const C_BONUS: Color = Color::Green;
const C_MALUS: Color = Color::Red;
const C_SECRET: Color = Color::Magenta;
const C_BULLET: Color = Color::Cyan;
const C_HINT: Color = Color::DarkGrey;

/// Top-left corner of the map's first cell on screen.
struct Layout {
    ox: u16,
    oy: u16,
}

impl Layout {
    fn new(game: &Game) -> Self {
        // Debug mode reserves room for row and column numbers.
        let debug = game.options.debug;
        Self {
            ox: 1 + if debug { 3 } else { 0 },
            oy: 2 + if debug { 1 } else { 0 },
        }
    }

    fn at(&self, x: i32, y: i32) -> cursor::MoveTo {
        cursor::MoveTo(self.ox + x as u16, self.oy + y as u16)
    }
}

// ── Public entry points ───────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, game: &Game) -> std::io::Result<()> {
    let layout = Layout::new(game);
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_hud(out, game)?;
    draw_border(out, game, &layout)?;
    draw_map(out, game, &layout)?;
    draw_bullets(out, game, &layout)?;
    draw_ship(out, game, &layout)?;
    if game.options.debug {
        draw_coordinates(out, game, &layout)?;
        draw_debug_panel(out, game, &layout)?;
    }
    draw_controls_hint(out, game, &layout)?;

    out.queue(style::ResetColor)?;
    out.flush()?;
    Ok(())
}

/// Overlay the game-over banner on the last frame.
pub fn render_game_over<W: Write>(out: &mut W, game: &Game) -> std::io::Result<()> {
    let layout = Layout::new(game);
    let score_line = format!("Final Score: {}", game.score());
    let lines: [(&str, Color); 4] = [
        ("╔═══════════╗", Color::Red),
        ("║ GAME OVER ║", Color::Red),
        ("╚═══════════╝", Color::Red),
        (&score_line, Color::Yellow),
    ];

    let cx = layout.ox + game.terrain.width() as u16 / 2;
    let start_row = (layout.oy + game.terrain.height() as u16 / 2).saturating_sub(2);
    for (i, (msg, color)) in lines.iter().enumerate() {
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    out.queue(style::ResetColor)?;
    out.flush()?;
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, game: &Game) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!(
        "Score:{:>7}  Time:{:>6.1}s",
        game.score(),
        game.elapsed_time
    )))?;

    out.queue(style::SetForegroundColor(C_HUD_AMMO))?;
    out.queue(Print(format!(
        "  Ammo:{}/{}",
        game.bullet_max.saturating_sub(game.fired_bullets()),
        game.bullet_max
    )))?;

    if let Some(key) = game.last_input {
        out.queue(style::SetForegroundColor(C_HINT))?;
        out.queue(Print(format!("  Key:{}", key_label(key))))?;
    }
    Ok(())
}

fn key_label(key: Key) -> String {
    match key {
        Key::Char(' ') => "space".to_string(),
        Key::Char(c) => c.to_string(),
        Key::Up => "↑".to_string(),
        Key::Down => "↓".to_string(),
        Key::Left => "←".to_string(),
        Key::Right => "→".to_string(),
    }
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, game: &Game, layout: &Layout) -> std::io::Result<()> {
    let w = game.terrain.width();
    let h = game.terrain.height() as u16;
    let (left, top) = (layout.ox - 1, layout.oy - 1);

    out.queue(style::SetForegroundColor(C_BORDER))?;
    out.queue(cursor::MoveTo(left, top))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w))))?;
    out.queue(cursor::MoveTo(left, layout.oy + h))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w))))?;

    for row in layout.oy..layout.oy + h {
        out.queue(cursor::MoveTo(left, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(layout.ox + w as u16, row))?;
        out.queue(Print("│"))?;
    }
    Ok(())
}

// ── Map ───────────────────────────────────────────────────────────────────────

fn cell_glyph(cell: Cell, pretty: bool) -> (&'static str, Color) {
    match (cell, pretty) {
        (Cell::Empty, _) => (" ", C_HINT),
        (Cell::Wall, true) => ("█", C_WALL),
        (Cell::Wall, false) => ("#", C_WALL),
        (Cell::Ammo, true) => ("•", C_AMMO),
        (Cell::Ammo, false) => ("a", C_AMMO),
        (Cell::Bonus, true) => ("★", C_BONUS),
        (Cell::Bonus, false) => ("+", C_BONUS),
        (Cell::Malus, true) => ("☠", C_MALUS),
        (Cell::Malus, false) => ("-", C_MALUS),
        (Cell::Secret, _) => ("?", C_SECRET),
        (Cell::Unknown, _) => ("!", C_HINT),
    }
}

fn draw_map<W: Write>(out: &mut W, game: &Game, layout: &Layout) -> std::io::Result<()> {
    let pretty = game.options.pretty;
    for (x, column) in game.terrain.columns().enumerate() {
        for (y, &cell) in column.cells().iter().enumerate() {
            if cell == Cell::Empty {
                continue;
            }
            let (glyph, color) = cell_glyph(cell, pretty);
            out.queue(layout.at(x as i32, y as i32))?;
            out.queue(style::SetForegroundColor(color))?;
            out.queue(Print(glyph))?;
        }
    }
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_ship<W: Write>(out: &mut W, game: &Game, layout: &Layout) -> std::io::Result<()> {
    let glyph = match (game.is_alive(), game.options.pretty) {
        (true, true) => "▶",
        (true, false) => ">",
        (false, _) => "X",
    };
    out.queue(layout.at(game.ship.x, game.ship.y))?;
    out.queue(style::SetForegroundColor(C_SHIP))?;
    out.queue(Print(glyph))?;
    Ok(())
}

fn draw_bullets<W: Write>(out: &mut W, game: &Game, layout: &Layout) -> std::io::Result<()> {
    let glyph = if game.options.pretty { "─" } else { "-" };
    let bounds = game.bounds();
    out.queue(style::SetForegroundColor(C_BULLET))?;
    for bullet in game.bullets.live().filter(|&p| bounds.contains(p)) {
        out.queue(layout.at(bullet.x, bullet.y))?;
        out.queue(Print(glyph))?;
    }
    Ok(())
}

// ── Debug overlays ────────────────────────────────────────────────────────────

fn draw_coordinates<W: Write>(out: &mut W, game: &Game, layout: &Layout) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(C_HINT))?;
    for x in (0..game.terrain.width()).step_by(5) {
        out.queue(cursor::MoveTo(layout.ox + x as u16, layout.oy - 2))?;
        out.queue(Print(x))?;
    }
    for y in 0..game.terrain.height() {
        out.queue(cursor::MoveTo(0, layout.oy + y as u16))?;
        out.queue(Print(format!("{:>2}", y)))?;
    }
    Ok(())
}

fn draw_debug_panel<W: Write>(out: &mut W, game: &Game, layout: &Layout) -> std::io::Result<()> {
    let row = layout.oy + game.terrain.height() as u16 + 2;
    let lines = [
        format!("Ship: ({}, {})", game.ship.x, game.ship.y),
        format!("Delay: {:.3}s", game.delay()),
        format!("Bullets: {} / {}", game.fired_bullets(), game.bullet_max),
        format!("Bonus: {}", game.bonus),
    ];
    out.queue(style::SetForegroundColor(C_HINT))?;
    for (i, line) in lines.iter().enumerate() {
        out.queue(cursor::MoveTo(1, row + i as u16))?;
        out.queue(Print(line))?;
    }
    Ok(())
}

// ── Controls hint ─────────────────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, game: &Game, layout: &Layout) -> std::io::Result<()> {
    let mut row = layout.oy + game.terrain.height() as u16 + 1;
    if game.options.debug {
        row += 5;
    }
    let moves = if game.options.difficulty >= 2 {
        "h j k l : Move"
    } else {
        "arrows / h j k l : Move"
    };
    let step = if game.options.still { "   S : Step" } else { "" };
    out.queue(cursor::MoveTo(1, row))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(format!("{}   SPACE : Shoot{}   Q : Quit", moves, step)))?;
    Ok(())
}
