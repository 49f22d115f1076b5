use std::sync::Arc;

use parking_lot::Mutex;

use crate::definitions::{display, keyboard};

#[cfg_attr(test, mockall::automock)]
/// The traits responsible for the display based code
///
/// Coordinates outside of the `64x32` surface are ignored by every
/// implementation, reading them returns `false`.
pub trait DisplayCommands {
    /// Will clear the display
    fn clear(&mut self);
    /// Will return if the pixel at the given position is lit
    fn get_pixel(&self, x: usize, y: usize) -> bool;
    /// Will flip the pixel at the given position
    fn toggle_pixel(&mut self, x: usize, y: usize);
}

#[cfg_attr(test, mockall::automock)]
/// The trait responsible for reading the keyboard data
pub trait KeyboardCommands {
    /// Is the given key held down, keys outside of `0..16` are never pressed.
    fn is_key_pressed(&self, key: u8) -> bool;
    /// Is any of the keys held down.
    fn any_key_pressed(&self) -> bool;
    /// The lowest key that is held down, `0` if there is none.
    fn lowest_pressed_key(&self) -> u8;
}

/// The black and white pixel grid the interpreter draws onto.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    pixels: Box<[[bool; display::WIDTH]; display::HEIGHT]>,
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self {
            pixels: Box::new([[false; display::WIDTH]; display::HEIGHT]),
        }
    }
}

impl FrameBuffer {
    pub fn new() -> Self {
        FrameBuffer::default()
    }

    #[inline]
    fn contains(x: usize, y: usize) -> bool {
        x < display::WIDTH && y < display::HEIGHT
    }

    /// Will set the pixel to the given state, outside of the surface this is a no-op.
    pub fn set_pixel(&mut self, x: usize, y: usize, on: bool) {
        if Self::contains(x, y) {
            self.pixels[y][x] = on;
        }
    }

    /// All the rows of the display, top to bottom.
    pub fn rows(&self) -> &[[bool; display::WIDTH]] {
        &self.pixels[..]
    }

    /// The amount of lit pixels.
    pub fn lit(&self) -> usize {
        self.pixels
            .iter()
            .map(|row| row.iter().filter(|pixel| **pixel).count())
            .sum()
    }
}

impl DisplayCommands for FrameBuffer {
    fn clear(&mut self) {
        for row in self.pixels.iter_mut() {
            row.fill(false);
        }
    }

    fn get_pixel(&self, x: usize, y: usize) -> bool {
        Self::contains(x, y) && self.pixels[y][x]
    }

    fn toggle_pixel(&mut self, x: usize, y: usize) {
        if Self::contains(x, y) {
            self.pixels[y][x] = !self.pixels[y][x];
        }
    }
}

/// Input is done with a hex keyboard that has 16 keys ranging `0-F`. The `8`, `4`, `6`, and
/// `2` keys are typically used for directional input. Three opcodes are used to detect input.
/// One skips an instruction if a specific key is pressed, while another does the same if a
/// specific key is not pressed. The third waits for a key press, and then stores it in one of
/// the data registers.
///
/// The keys are stored as a bitmask, bit `n` is set while key `n` is held down.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Keyboard {
    keys: u16,
}

impl Keyboard {
    pub fn new() -> Self {
        Keyboard::default()
    }

    #[inline]
    fn mask(key: usize) -> u16 {
        debug_assert!(key < keyboard::SIZE);
        1 << key
    }

    pub fn press(&mut self, key: usize) {
        self.set_key(key, true);
    }

    pub fn release(&mut self, key: usize) {
        self.set_key(key, false);
    }

    pub fn toggle_key(&mut self, key: usize) {
        if key < keyboard::SIZE {
            self.keys ^= Self::mask(key);
        }
    }

    pub fn set_key(&mut self, key: usize, to: bool) {
        if key >= keyboard::SIZE {
            log::warn!("ignoring key {:#X}, the keyboard only has {} keys", key, keyboard::SIZE);
            return;
        }
        if to {
            self.keys |= Self::mask(key);
        } else {
            self.keys &= !Self::mask(key);
        }
    }

    /// Will overwrite all the keys at once.
    pub fn set_mult(&mut self, keys: &[bool; keyboard::SIZE]) {
        self.keys = keys
            .iter()
            .enumerate()
            .filter(|(_, pressed)| **pressed)
            .fold(0, |mask, (key, _)| mask | Self::mask(key));
    }

    pub fn release_all(&mut self) {
        self.keys = 0;
    }

    /// The raw bitmask of the keyboard.
    pub fn bits(&self) -> u16 {
        self.keys
    }

    pub fn get_keys(&self) -> [bool; keyboard::SIZE] {
        let mut keys = [false; keyboard::SIZE];
        for (key, pressed) in keys.iter_mut().enumerate() {
            *pressed = self.keys & Self::mask(key) != 0;
        }
        keys
    }
}

impl KeyboardCommands for Keyboard {
    fn is_key_pressed(&self, key: u8) -> bool {
        (key as usize) < keyboard::SIZE && self.keys & Self::mask(key as usize) != 0
    }

    fn any_key_pressed(&self) -> bool {
        self.keys != 0
    }

    fn lowest_pressed_key(&self) -> u8 {
        if self.keys == 0 {
            0
        } else {
            self.keys.trailing_zeros() as u8
        }
    }
}

/// A device that is shared between the interpreter thread and a host thread,
/// for example a ui thread presenting the frame buffer while the interpreter
/// keeps drawing into it.
pub type Shared<T> = Arc<Mutex<T>>;

/// Wraps the device so that it can be handed to the interpreter and kept by the host.
pub fn shared<T>(device: T) -> Shared<T> {
    Arc::new(Mutex::new(device))
}

impl<T: DisplayCommands> DisplayCommands for Shared<T> {
    fn clear(&mut self) {
        self.lock().clear()
    }

    fn get_pixel(&self, x: usize, y: usize) -> bool {
        self.lock().get_pixel(x, y)
    }

    fn toggle_pixel(&mut self, x: usize, y: usize) {
        self.lock().toggle_pixel(x, y)
    }
}

impl<T: KeyboardCommands> KeyboardCommands for Shared<T> {
    fn is_key_pressed(&self, key: u8) -> bool {
        self.lock().is_key_pressed(key)
    }

    fn any_key_pressed(&self) -> bool {
        self.lock().any_key_pressed()
    }

    fn lowest_pressed_key(&self) -> u8 {
        self.lock().lowest_pressed_key()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_buffer_bounds() {
        let mut fb = FrameBuffer::new();

        fb.toggle_pixel(display::WIDTH, 0);
        fb.toggle_pixel(0, display::HEIGHT);
        fb.set_pixel(display::WIDTH + 3, display::HEIGHT + 3, true);
        assert_eq!(fb.lit(), 0);
        assert!(!fb.get_pixel(display::WIDTH, 0));

        fb.toggle_pixel(display::WIDTH - 1, display::HEIGHT - 1);
        assert!(fb.get_pixel(display::WIDTH - 1, display::HEIGHT - 1));
        assert!(fb.rows()[display::HEIGHT - 1][display::WIDTH - 1]);
        assert_eq!(fb.lit(), 1);

        fb.toggle_pixel(display::WIDTH - 1, display::HEIGHT - 1);
        assert_eq!(fb.lit(), 0);
    }

    #[test]
    fn test_frame_buffer_clear() {
        let mut fb = FrameBuffer::new();
        for i in 0..display::HEIGHT {
            fb.set_pixel(i, i, true);
        }
        assert_eq!(fb.lit(), display::HEIGHT);

        fb.clear();
        assert_eq!(fb, FrameBuffer::new());
    }

    #[test]
    fn test_keyboard_press_release() {
        let mut kb = Keyboard::new();
        assert!(!kb.any_key_pressed());
        assert_eq!(kb.lowest_pressed_key(), 0);

        kb.press(0xA);
        kb.press(0x3);
        assert!(kb.any_key_pressed());
        assert!(kb.is_key_pressed(0xA));
        assert!(kb.is_key_pressed(0x3));
        assert!(!kb.is_key_pressed(0x4));
        assert_eq!(kb.lowest_pressed_key(), 0x3);
        assert_eq!(kb.bits(), 0b0000_0100_0000_1000);

        kb.release(0x3);
        assert_eq!(kb.lowest_pressed_key(), 0xA);

        kb.toggle_key(0xA);
        assert!(!kb.any_key_pressed());
    }

    #[test]
    fn test_keyboard_out_of_range() {
        let mut kb = Keyboard::new();
        kb.set_key(keyboard::SIZE, true);
        kb.toggle_key(keyboard::SIZE + 4);
        assert!(!kb.any_key_pressed());
        assert!(!kb.is_key_pressed(0x10));
        assert!(!kb.is_key_pressed(0xFF));
    }

    #[test]
    fn test_keyboard_set_mult() {
        let mut kb = Keyboard::new();
        let mut keys = [false; keyboard::SIZE];
        for (index, key) in keys.iter_mut().enumerate() {
            *key = index % 2 != 0;
        }

        kb.set_mult(&keys);
        assert_eq!(kb.get_keys(), keys);
        assert_eq!(kb.lowest_pressed_key(), 1);

        kb.release_all();
        assert_eq!(kb.get_keys(), [false; keyboard::SIZE]);
    }

    #[test]
    fn test_shared_devices() {
        let fb = shared(FrameBuffer::new());
        let kb = shared(Keyboard::new());

        let mut vm_side = fb.clone();
        vm_side.toggle_pixel(1, 2);
        assert!(fb.lock().get_pixel(1, 2));

        let host = kb.clone();
        let handle = std::thread::spawn(move || host.lock().press(0x7));
        handle.join().expect("the key thread panicked");

        assert!(kb.is_key_pressed(0x7));
        assert_eq!(kb.lowest_pressed_key(), 0x7);
    }
}
