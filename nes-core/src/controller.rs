/// The number of buttons on a standard NES controller.
pub const BUTTON_COUNT: usize = 8;

/// The buttons in the order the controller shifts them out, A first.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Button {
    A = 0,
    B = 1,
    Select = 2,
    Start = 3,
    Up = 4,
    Down = 5,
    Left = 6,
    Right = 7,
}

impl Button {
    pub const ALL: [Button; BUTTON_COUNT] = [
        Button::A,
        Button::B,
        Button::Select,
        Button::Start,
        Button::Up,
        Button::Down,
        Button::Left,
        Button::Right,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Look up a button by its id, returning `None` for ids outside of the
    /// controller's button set.
    pub fn from_index(index: usize) -> Option<Button> {
        Button::ALL.get(index).copied()
    }

    #[inline]
    pub fn mask(self) -> u8 {
        1 << self.index()
    }
}

/// One of the two serial controller ports at $4016 and $4017.
pub struct Controller {
    buttons: [bool; BUTTON_COUNT],

    // As the controller is read this state gets updated, so it's internal only.
    read_state: u8,

    // The latch is used by the Bus to signal a new controller read. The latch first
    // goes up, which continuously reads the controller state. Once the latch goes
    // down the controller can be read from one bit at a time.
    is_latch_open: bool,
}

impl Controller {
    pub fn new() -> Controller {
        Controller {
            buttons: [false; BUTTON_COUNT],
            read_state: 0,
            is_latch_open: false,
        }
    }

    pub fn set_buttons(&mut self, buttons: [bool; BUTTON_COUNT]) {
        self.buttons = buttons;
    }

    pub fn buttons(&self) -> [bool; BUTTON_COUNT] {
        self.buttons
    }

    pub fn encode_state(&self) -> u8 {
        Button::ALL
            .iter()
            .filter(|button| self.buttons[button.index()])
            .fold(0, |value, button| value | button.mask())
    }

    /// A write to $4016 with bit 0 set opens the latch, bit 0 clear closes it.
    pub fn write_strobe(&mut self, value: u8) {
        if value & 0b0000_0001 == 1 {
            self.open_latch();
        } else {
            self.close_latch();
        }
    }

    /// While the latch is open the controller continuously reloads its state, so
    /// every read returns the A button.
    pub fn open_latch(&mut self) {
        self.is_latch_open = true;
    }

    /// When the latch is closed the controller begins reading out the current
    /// state one bit at a time.
    pub fn close_latch(&mut self) {
        self.is_latch_open = false;
        self.read_state = self.encode_state();
    }

    /// Reads a bit from the controller's state. After all of the bits have been read
    /// the controller only feeds bit value 1 through.
    pub fn read_bit(&mut self) -> u8 {
        if self.is_latch_open {
            self.read_state = self.encode_state();
        }
        let bit = self.read_state & 0b000_0001;
        self.read_state = (self.read_state >> 1) | 0b1000_0000;
        bit
    }
}
