use crate::{System, TransparentSystem};

/// A counter that ticks down to zero.
///
/// Each command subtracts up to its value from the counter and reports the
/// amount actually subtracted.
/// The system is terminal once the counter reaches zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Countdown {
    remaining: u32,
}

impl Countdown {
    pub(crate) fn new(remaining: u32) -> Self {
        Self { remaining }
    }
}

impl System for Countdown {
    type State = u32;
    type Observation = u32;
    type Command = u32;
    type Report = u32;

    fn assign(&mut self, state: u32) {
        self.remaining = state;
    }

    fn observe(&self) -> u32 {
        self.remaining
    }

    fn step(&mut self, command: u32) -> u32 {
        let taken = command.min(self.remaining);
        self.remaining -= taken;
        taken
    }

    fn is_alive(&self) -> bool {
        self.remaining > 0
    }
}

impl TransparentSystem for Countdown {
    fn state(&self) -> u32 {
        self.remaining
    }
}

/// The two rooms of a [`Hallway`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum Room {
    #[default]
    A,
    B,
}

/// A two-state system: `"advance"` moves from room `A` to the terminal room `B`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Hallway {
    room: Room,
}

impl System for Hallway {
    type State = Room;
    type Observation = Room;
    type Command = &'static str;
    type Report = &'static str;

    fn assign(&mut self, state: Room) {
        self.room = state;
    }

    fn observe(&self) -> Room {
        self.room
    }

    fn step(&mut self, command: &'static str) -> &'static str {
        match (self.room, command) {
            (Room::B, _) => "",
            (Room::A, "advance") => {
                self.room = Room::B;
                "A -> B"
            }
            (Room::A, _) => "stayed",
        }
    }

    fn is_alive(&self) -> bool {
        self.room == Room::A
    }
}

impl TransparentSystem for Hallway {
    fn state(&self) -> Room {
        self.room
    }
}

/// A needle on a dial that only reveals which quarter turn it points into.
///
/// The state is the angle in degrees; the observation is the quadrant
/// (`0..4`), a lossy projection of the state. It never terminates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Dial {
    angle: i32,
}

impl System for Dial {
    type State = i32;
    type Observation = u8;
    type Command = i32;
    type Report = ();

    fn assign(&mut self, state: i32) {
        self.angle = state;
    }

    fn observe(&self) -> u8 {
        // Always in 0..4.
        u8::try_from(self.angle.rem_euclid(360) / 90).unwrap_or_default()
    }

    fn step(&mut self, command: i32) {
        self.angle += command;
    }

    fn is_alive(&self) -> bool {
        true
    }
}

impl TransparentSystem for Dial {
    fn state(&self) -> i32 {
        self.angle
    }
}
