//! Terminal backend on crossterm
//!
//! The arena is scaled onto a half-block pixel grid (two pixels per cell,
//! stacked vertically); text is overlaid on whole cells.

use std::collections::HashMap;
use std::io::{self, Stdout, Write, stdout};
use std::time::{Duration, Instant};

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::style::{self, Attribute, Color as TermColor};
use crossterm::{cursor, execute, queue, terminal};
use glam::IVec2;

use crate::render::{Color, Renderer, TextSize, palette};
use crate::scheduler::InputSource;
use crate::sim::{InputFrame, Keys, Rect};

/// How long a key counts as held after its last press or repeat when the
/// terminal cannot report releases. Longer than the usual auto-repeat delay
/// so a held key bridges the gap before the first repeat.
const HOLD_WINDOW: Duration = Duration::from_millis(550);

/// Map a key code to the game key it stands for
pub fn key_for(code: KeyCode) -> Option<Keys> {
    let key = match code {
        KeyCode::Left => Keys::LEFT,
        KeyCode::Right => Keys::RIGHT,
        KeyCode::Up => Keys::UP,
        KeyCode::Down => Keys::DOWN,
        KeyCode::Char(' ') => Keys::SPACE,
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'a' => Keys::A,
            'd' => Keys::D,
            'w' => Keys::W,
            's' => Keys::S,
            _ => return None,
        },
        _ => return None,
    };
    Some(key)
}

fn is_quit(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Held-key bookkeeping fed by terminal key events
#[derive(Debug, Default)]
pub struct KeyTracker {
    held: HashMap<Keys, Instant>,
    pressed: Keys,
    presses: Vec<Keys>,
    /// Terminal reports key releases, so holds never decay
    release_events: bool,
}

impl KeyTracker {
    pub fn new(release_events: bool) -> Self {
        Self {
            release_events,
            ..Self::default()
        }
    }

    pub fn key_down(&mut self, key: Keys, now: Instant) {
        let fresh = match self.held.get(&key) {
            Some(&last) => !self.release_events && now.duration_since(last) > HOLD_WINDOW,
            None => true,
        };
        if fresh {
            self.pressed |= key;
            self.presses.push(key);
        }
        self.held.insert(key, now);
    }

    pub fn key_up(&mut self, key: Keys) {
        self.held.remove(&key);
    }

    /// Current frame; clears the fresh presses
    pub fn frame(&mut self, now: Instant) -> InputFrame {
        if !self.release_events {
            self.held
                .retain(|_, last| now.duration_since(*last) <= HOLD_WINDOW);
        }
        let held = self.held.keys().fold(Keys::empty(), |acc, k| acc | *k);
        InputFrame {
            held: held | self.pressed,
            pressed: std::mem::take(&mut self.pressed),
            presses: std::mem::take(&mut self.presses),
            quit: false,
        }
    }
}

/// Pixel buffer drawn two pixels per terminal cell
#[derive(Debug)]
pub struct PixelGrid {
    width: usize,
    height: usize,
    arena: IVec2,
    pixels: Vec<Color>,
}

impl PixelGrid {
    pub fn new(cols: u16, rows: u16, arena: IVec2) -> Self {
        let width = cols as usize;
        let height = rows as usize * 2;
        Self {
            width,
            height,
            arena,
            pixels: vec![palette::BLACK; width * height],
        }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.width = cols as usize;
        self.height = rows as usize * 2;
        self.pixels = vec![palette::BLACK; self.width * self.height];
    }

    pub fn get(&self, x: usize, y: usize) -> Color {
        self.pixels[y * self.width + x]
    }

    fn scale_x(&self, x: i32) -> i32 {
        (x as i64 * self.width as i64 / self.arena.x.max(1) as i64) as i32
    }

    fn scale_y(&self, y: i32) -> i32 {
        (y as i64 * self.height as i64 / self.arena.y.max(1) as i64) as i32
    }

    /// Arena rect to pixel bounds, never narrower than one pixel
    fn span(&self, rect: Rect) -> (i32, i32, i32, i32) {
        let x0 = self.scale_x(rect.left());
        let y0 = self.scale_y(rect.top());
        let x1 = self.scale_x(rect.right()).max(x0 + 1);
        let y1 = self.scale_y(rect.bottom()).max(y0 + 1);
        (x0, y0, x1, y1)
    }

    fn set(&mut self, x: i32, y: i32, color: Color) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            self.pixels[y as usize * self.width + x as usize] = color;
        }
    }

    pub fn fill(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        let (x0, y0, x1, y1) = self.span(rect);
        for y in y0..y1 {
            for x in x0..x1 {
                self.set(x, y, color);
            }
        }
    }

    pub fn fill_ellipse(&mut self, rect: Rect, color: Color) {
        let (x0, y0, x1, y1) = self.span(rect);
        let cx = (x0 + x1) as f32 / 2.0;
        let cy = (y0 + y1) as f32 / 2.0;
        let rx = (x1 - x0) as f32 / 2.0;
        let ry = (y1 - y0) as f32 / 2.0;
        for y in y0..y1 {
            for x in x0..x1 {
                let nx = (x as f32 + 0.5 - cx) / rx;
                let ny = (y as f32 + 0.5 - cy) / ry;
                if nx * nx + ny * ny <= 1.0 {
                    self.set(x, y, color);
                }
            }
        }
    }

    /// Terminal cell holding an arena point
    pub fn cell_at(&self, p: IVec2) -> (i32, i32) {
        (self.scale_x(p.x), self.scale_y(p.y) / 2)
    }

    fn render(&self, out: &mut impl Write) -> io::Result<()> {
        queue!(out, cursor::MoveTo(0, 0))?;
        let rows = self.height / 2;
        for row in 0..rows {
            queue!(out, cursor::MoveTo(0, row as u16))?;
            for col in 0..self.width {
                let top = self.get(col, row * 2);
                let bottom = self.get(col, row * 2 + 1);
                queue!(
                    out,
                    style::SetForegroundColor(term_color(top)),
                    style::SetBackgroundColor(term_color(bottom)),
                    style::Print('\u{2580}'),
                )?;
            }
        }
        queue!(out, style::ResetColor)
    }
}

fn term_color(c: Color) -> TermColor {
    TermColor::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    }
}

struct TextRun {
    col: u16,
    row: u16,
    text: String,
    color: Color,
    size: TextSize,
}

/// Full-screen terminal frontend
pub struct TerminalBackend {
    out: Stdout,
    grid: PixelGrid,
    texts: Vec<TextRun>,
    keys: KeyTracker,
    enhanced: bool,
}

impl TerminalBackend {
    pub fn new(arena: IVec2) -> anyhow::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = stdout();
        execute!(
            out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::DisableLineWrap,
        )?;

        let enhanced = matches!(terminal::supports_keyboard_enhancement(), Ok(true))
            && execute!(
                out,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )
            .is_ok();
        if !enhanced {
            log::info!("Terminal cannot report key releases, using hold window");
        }

        let (cols, rows) = terminal::size()?;
        log::debug!("Terminal {}x{} for arena {}x{}", cols, rows, arena.x, arena.y);
        Ok(Self {
            out,
            grid: PixelGrid::new(cols, rows, arena),
            texts: Vec::new(),
            keys: KeyTracker::new(enhanced),
            enhanced,
        })
    }
}

impl Drop for TerminalBackend {
    fn drop(&mut self) {
        if self.enhanced {
            let _ = execute!(self.out, PopKeyboardEnhancementFlags);
        }
        let _ = execute!(
            self.out,
            style::ResetColor,
            terminal::LeaveAlternateScreen,
            cursor::Show,
            terminal::EnableLineWrap,
        );
        let _ = terminal::disable_raw_mode();
    }
}

impl InputSource for TerminalBackend {
    fn poll(&mut self) -> anyhow::Result<InputFrame> {
        let mut quit = false;
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) => {
                    if is_quit(&key) && key.kind != KeyEventKind::Release {
                        quit = true;
                        continue;
                    }
                    let Some(k) = key_for(key.code) else {
                        continue;
                    };
                    match key.kind {
                        KeyEventKind::Release => self.keys.key_up(k),
                        KeyEventKind::Press | KeyEventKind::Repeat => {
                            self.keys.key_down(k, Instant::now())
                        }
                    }
                }
                Event::Resize(cols, rows) => {
                    self.grid.resize(cols, rows);
                    queue!(self.out, terminal::Clear(terminal::ClearType::All))?;
                }
                _ => {}
            }
        }
        let mut frame = self.keys.frame(Instant::now());
        frame.quit = quit;
        Ok(frame)
    }
}

impl Renderer for TerminalBackend {
    fn clear(&mut self, color: Color) {
        self.grid.fill(color);
        self.texts.clear();
    }

    fn draw_rect(&mut self, rect: Rect, color: Color) {
        self.grid.fill_rect(rect, color);
    }

    fn draw_ellipse(&mut self, rect: Rect, color: Color) {
        self.grid.fill_ellipse(rect, color);
    }

    fn draw_text(&mut self, text: &str, center: IVec2, color: Color, size: TextSize) {
        let (col, row) = self.grid.cell_at(center);
        let start = col - text.chars().count() as i32 / 2;
        self.texts.push(TextRun {
            col: start.max(0) as u16,
            row: row.max(0) as u16,
            text: text.to_string(),
            color,
            size,
        });
    }

    fn present(&mut self) -> anyhow::Result<()> {
        self.grid.render(&mut self.out)?;
        for run in &self.texts {
            queue!(
                self.out,
                cursor::MoveTo(run.col, run.row),
                style::SetForegroundColor(term_color(run.color)),
                style::SetBackgroundColor(term_color(palette::BLACK)),
            )?;
            if run.size == TextSize::Large {
                queue!(self.out, style::SetAttribute(Attribute::Bold))?;
            }
            queue!(
                self.out,
                style::Print(&run.text),
                style::SetAttribute(Attribute::Reset)
            )?;
        }
        queue!(self.out, style::ResetColor)?;
        self.out.flush()?;
        Ok(())
    }
}
