use std::time::Instant;

use nes_director::{Key, KeyAction, KeyCallback, KeySource, Presentation};
use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::pixels::Color;
use sdl2::render::Canvas;
use sdl2::video::Window;
use sdl2::{EventPump, Sdl};

pub const NES_WIDTH: u32 = 256;
pub const NES_HEIGHT: u32 = 240;

/// The SDL window the director presents into. SDL has a single global event
/// pump, so it is owned here and drained on every `poll_events`.
pub struct SdlWindow {
    canvas: Canvas<Window>,
    event_pump: EventPump,
    key_callback: Option<KeyCallback>,
    should_close: bool,
    created_at: Instant,
}

impl SdlWindow {
    /// Initialize the video subsystem, creates a [Window] and its [Canvas].
    pub fn new(sdl: &Sdl, title: &str, scale: u32) -> Result<Self, String> {
        let video_subsystem = sdl.video()?;

        let window = video_subsystem
            .window(title, NES_WIDTH * scale, NES_HEIGHT * scale)
            .position_centered()
            .allow_highdpi()
            .build()
            .map_err(|e| e.to_string())?;

        // Presentation is paced by vsync, the director adds no throttling.
        let mut canvas = window
            .into_canvas()
            .accelerated()
            .present_vsync()
            .build()
            .map_err(|e| e.to_string())?;

        canvas
            .set_logical_size(NES_WIDTH, NES_HEIGHT)
            .map_err(|e| e.to_string())?;

        Ok(Self {
            canvas,
            event_pump: sdl.event_pump()?,
            key_callback: None,
            should_close: false,
            created_at: Instant::now(),
        })
    }

    fn dispatch_key(&mut self, keycode: Keycode, action: KeyAction) {
        if let Some(callback) = self.key_callback.as_mut() {
            callback(translate_keycode(keycode), action);
        }
    }
}

impl Presentation for SdlWindow {
    fn should_close(&self) -> bool {
        self.should_close
    }

    fn clear(&mut self) {
        self.canvas.set_draw_color(Color::RGB(0, 0, 0));
        self.canvas.clear();
    }

    fn swap_buffers(&mut self) {
        self.canvas.present();
    }

    fn poll_events(&mut self) {
        // Collect first, the callback needs `self` while the pump is borrowed.
        let events: Vec<Event> = self.event_pump.poll_iter().collect();
        for event in events {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => self.should_close = true,
                Event::KeyDown {
                    keycode: Some(keycode),
                    repeat,
                    ..
                } => {
                    let action = if repeat {
                        KeyAction::Repeat
                    } else {
                        KeyAction::Press
                    };
                    self.dispatch_key(keycode, action);
                }
                Event::KeyUp {
                    keycode: Some(keycode),
                    ..
                } => self.dispatch_key(keycode, KeyAction::Release),
                _ => {}
            }
        }
    }

    fn set_title(&mut self, title: &str) {
        if let Err(error) = self.canvas.window_mut().set_title(title) {
            log::warn!("Unable to set the window title: {}", error);
        }
    }

    fn time(&self) -> f64 {
        self.created_at.elapsed().as_secs_f64()
    }
}

impl KeySource for SdlWindow {
    fn set_key_callback(&mut self, callback: KeyCallback) {
        self.key_callback = Some(callback);
    }
}

/// Map the SDL keycode to the director's backend-agnostic key.
pub fn translate_keycode(keycode: Keycode) -> Key {
    match keycode {
        Keycode::X => Key::X,
        Keycode::Z => Key::Z,
        Keycode::Space => Key::Space,
        Keycode::Return | Keycode::KpEnter => Key::Enter,
        Keycode::Escape => Key::Escape,
        Keycode::RShift => Key::RightShift,
        Keycode::Up => Key::Up,
        Keycode::Down => Key::Down,
        Keycode::Left => Key::Left,
        Keycode::Right => Key::Right,
        _ => Key::Other,
    }
}
