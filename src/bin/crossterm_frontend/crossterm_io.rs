use chip8_vm::emulator::input::{Command, EmulatorInput};
use chip8_vm::emulator::keypad::Keypad;
use chip8_vm::emulator::output::{EmulatorOutput, Frame};
use chip8_vm::emulator::screen::Screen;
use chip8_vm::emulator::RunState;

use super::key_buffer::KeyBuffer;

use crossterm::cursor::{self, MoveTo};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue, ErrorKind};
use std::io::{self, stdout, Stdout, Write};
use std::time::Duration;

const KEY_TIMEOUT: Duration = Duration::from_millis(250);

/// The usual layout on the left hand side of a qwerty keyboard.
const KEYMAP: [(char, u8); 16] = [
    ('1', 0x1), ('2', 0x2), ('3', 0x3), ('4', 0xC),
    ('q', 0x4), ('w', 0x5), ('e', 0x6), ('r', 0xD),
    ('a', 0x7), ('s', 0x8), ('d', 0x9), ('f', 0xE),
    ('z', 0xA), ('x', 0x0), ('c', 0xB), ('v', 0xF),
];

pub struct CrosstermInput {
    key_buffer: KeyBuffer,
}

impl CrosstermInput {
    pub fn new() -> CrosstermInput {
        CrosstermInput {
            key_buffer: KeyBuffer::new(KEY_TIMEOUT),
        }
    }

    /// Drain every pending terminal event without blocking.
    fn drain(&mut self) -> crossterm::Result<Vec<Command>> {
        let mut commands = Vec::new();
        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key_event) = event::read()? {
                log::debug!("Got event {:?}", key_event);
                match key_event {
                    KeyEvent { code: KeyCode::Esc, .. } => commands.push(Command::Quit),
                    KeyEvent { code: KeyCode::Char('c'), modifiers } if modifiers.contains(KeyModifiers::CONTROL) => {
                        commands.push(Command::Quit)
                    }
                    KeyEvent { code: KeyCode::Char(' '), .. } => commands.push(Command::TogglePause),
                    KeyEvent { code, .. } => {
                        if let Some(key) = key_to_u8(code) {
                            self.key_buffer.push(key);
                        }
                    }
                }
            }
        }
        Ok(commands)
    }
}

impl EmulatorInput for CrosstermInput {
    fn poll(&mut self, keypad: &mut Keypad) -> Vec<Command> {
        let commands = match self.drain() {
            Ok(commands) => commands,
            Err(e) => {
                log::error!("Could not read terminal events: {}", e);
                vec![Command::Quit]
            }
        };
        self.key_buffer.fill(keypad);
        commands
    }
}

/// How lit and unlit pixels look.
#[derive(Debug, Clone, Copy)]
pub struct Style {
    pub fg: Color,
    pub bg: Color,
    pub outline: bool,
}

pub struct CrosstermOutput {
    stdout: Stdout,
    style: Style,
    width: usize,
    height: usize,
    cells: Option<Screen>,
    sounding: bool,
}

impl CrosstermOutput {
    /// Take over the terminal. It is restored on drop, even if setup fails halfway.
    pub fn new(width: usize, height: usize, style: Style) -> crossterm::Result<CrosstermOutput> {
        terminal::enable_raw_mode()?;
        let mut output = CrosstermOutput {
            stdout: stdout(),
            style,
            width,
            height,
            cells: None,
            sounding: false,
        };
        output.draw_border()?;
        Ok(output)
    }

    fn draw_border(&mut self) -> crossterm::Result<()> {
        execute!(self.stdout, EnterAlternateScreen, cursor::Hide, Clear(ClearType::All))?;

        let bottom = self.height + 1;
        let right = 2 * self.width + 1;
        for y in 0..=bottom {
            for x in 0..=right {
                if y == 0 || y == bottom || x == 0 || x == right {
                    let c = if y == 0 && x == 0 {
                        '┏'
                    } else if y == 0 && x == right {
                        '┓'
                    } else if y == bottom && x == 0 {
                        '┗'
                    } else if y == bottom && x == right {
                        '┛'
                    } else if y == 0 || y == bottom {
                        '━'
                    } else {
                        '┃'
                    };
                    queue!(self.stdout, MoveTo(x as u16, y as u16), Print(c))?;
                }
            }
        }
        self.stdout.flush()?;
        Ok(())
    }

    fn draw(&mut self, x: usize, y: usize, state: bool) -> crossterm::Result<()> {
        let cell = match (state, self.style.outline) {
            (true, true) => "▐▌",
            (true, false) => "██",
            (false, _) => "  ",
        };
        queue!(self.stdout, MoveTo(2 * x as u16 + 1, y as u16 + 1), Print(cell))
    }

    fn draw_frame(&mut self, frame: &Frame<'_>) -> crossterm::Result<()> {
        queue!(self.stdout, SetForegroundColor(self.style.fg), SetBackgroundColor(self.style.bg))?;

        // Only redraw the cells that changed since the last frame
        for y in 0..self.height {
            for x in 0..self.width {
                let state = frame.screen.get(x, y);
                let changed = match &self.cells {
                    Some(cells) => cells.get(x, y) != state,
                    None => true,
                };
                if changed {
                    self.draw(x, y, state)?;
                }
            }
        }
        self.cells = Some(frame.screen.clone());

        let status = match frame.run_state {
            RunState::Running => "running",
            RunState::Paused => "paused ",
            RunState::Halted => "halted ",
        };
        queue!(
            self.stdout,
            ResetColor,
            MoveTo(0, self.height as u16 + 2),
            Print(format!("DT {:3}  ST {:3}  {}  [space] pause  [esc] quit", frame.delay_timer, frame.sound_timer, status))
        )?;

        // Ring the bell when the buzzer starts
        let sounding = frame.sound_timer > 0;
        if sounding && !self.sounding {
            queue!(self.stdout, Print('\x07'))?;
        }
        self.sounding = sounding;

        self.stdout.flush()?;
        Ok(())
    }
}

impl Drop for CrosstermOutput {
    fn drop(&mut self) {
        let _ = execute!(self.stdout, ResetColor, cursor::Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

impl EmulatorOutput for CrosstermOutput {
    fn present(&mut self, frame: &Frame<'_>) -> io::Result<()> {
        self.draw_frame(frame).map_err(into_io_error)
    }
}

fn into_io_error(error: ErrorKind) -> io::Error {
    match error {
        ErrorKind::IoError(e) => e,
        other => io::Error::new(io::ErrorKind::Other, other.to_string()),
    }
}

fn key_to_u8(key: KeyCode) -> Option<u8> {
    match key {
        KeyCode::Char(c) => {
            let c = c.to_ascii_lowercase();
            KEYMAP.iter().find(|(k, _)| *k == c).map(|(_, key)| *key)
        }
        _ => None,
    }
}

/// Parse a colour written as `RRGGBB`, with or without a leading `#`.
pub fn parse_color(s: &str) -> Result<Color, String> {
    let hex = s.trim_start_matches('#');
    if hex.len() != 6 {
        return Err(format!("expected a colour like ff8800, got {:?}", s));
    }
    let value = u32::from_str_radix(hex, 16).map_err(|e| e.to_string())?;
    Ok(Color::Rgb {
        r: (value >> 16) as u8,
        g: (value >> 8) as u8,
        b: value as u8,
    })
}

#[cfg(test)]
mod tests {

    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn keymap_covers_every_key_once() {
        let mut keys: Vec<u8> = KEYMAP.iter().map(|(_, key)| *key).collect();
        keys.sort();
        assert_eq!(keys, (0..16).collect::<Vec<u8>>());
    }

    #[test]
    fn keys_are_mapped() {
        assert_eq!(key_to_u8(KeyCode::Char('x')), Some(0x0));
        assert_eq!(key_to_u8(KeyCode::Char('V')), Some(0xF));
        assert_eq!(key_to_u8(KeyCode::Char('4')), Some(0xC));
        assert_eq!(key_to_u8(KeyCode::Char('p')), None);
        assert_eq!(key_to_u8(KeyCode::Enter), None);
    }

    #[test]
    fn colors_are_parsed() {
        assert_eq!(parse_color("ff8800"), Ok(Color::Rgb { r: 0xFF, g: 0x88, b: 0x00 }));
        assert_eq!(parse_color("#000000"), Ok(Color::Rgb { r: 0, g: 0, b: 0 }));
        assert!(parse_color("fff").is_err());
        assert!(parse_color("gggggg").is_err());
    }
}
