//! Test doubles for the pin seam.

use core::cell::RefCell;
use std::rc::Rc;

use crate::pin::{ButtonPin, Direction, DriveMode, Level, Pull};

fn idle_level(pull: Pull) -> Level {
    match pull {
        Pull::Up => Level::High,
        Pull::Down | Pull::None => Level::Low,
    }
}

/// A directly wired pin whose level the test scripts from outside.
///
/// Clones share state, so a test can keep one handle while the scanner
/// owns the other.
#[derive(Clone)]
pub(crate) struct MockPin {
    cell: Rc<RefCell<PinCell>>,
}

struct PinCell {
    level: Level,
    pull: Pull,
    direction: Direction,
    valid: bool,
}

impl MockPin {
    fn new(direction: Direction, pull: Pull, valid: bool) -> Self {
        Self {
            cell: Rc::new(RefCell::new(PinCell {
                level: idle_level(pull),
                pull,
                direction,
                valid,
            })),
        }
    }

    pub(crate) fn input(pull: Pull) -> Self {
        Self::new(Direction::Input, pull, true)
    }

    pub(crate) fn output() -> Self {
        Self::new(Direction::Output, Pull::None, true)
    }

    /// A pin handle that has already been released elsewhere.
    pub(crate) fn released() -> Self {
        Self::new(Direction::Input, Pull::None, false)
    }

    pub(crate) fn set_level(&self, level: Level) {
        self.cell.borrow_mut().level = level;
    }
}

impl ButtonPin for MockPin {
    fn is_valid(&self) -> bool {
        self.cell.borrow().valid
    }

    fn direction(&self) -> Direction {
        self.cell.borrow().direction
    }

    fn pull(&self) -> Pull {
        self.cell.borrow().pull
    }

    fn configure_input(&mut self, pull: Pull) {
        let mut cell = self.cell.borrow_mut();
        cell.direction = Direction::Input;
        cell.pull = pull;
        cell.level = idle_level(pull);
    }

    fn configure_output(&mut self, initial: Level, _drive: DriveMode) {
        let mut cell = self.cell.borrow_mut();
        cell.direction = Direction::Output;
        cell.level = initial;
    }

    fn read(&mut self) -> Level {
        self.cell.borrow().level
    }

    fn write(&mut self, level: Level) {
        self.cell.borrow_mut().level = level;
    }
}

/// Pin roles on the register bus.
#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum Role {
    Data,
    Clock,
    Latch,
}

impl Role {
    fn idx(self) -> usize {
        match self {
            Role::Data => 0,
            Role::Clock => 1,
            Role::Latch => 2,
        }
    }
}

/// How one of the register's pins ended up configured.
#[derive(Clone, Copy)]
pub(crate) struct PinConfig {
    pub(crate) direction: Direction,
    pub(crate) pull: Pull,
    pub(crate) drive: Option<DriveMode>,
    valid: bool,
}

/// A 74HC165-style parallel-in/serial-out register behind three pins.
///
/// A falling edge on `latch` captures the eight parallel lines; each
/// rising edge on `clock` shifts the next captured bit onto `data`. Lines
/// are indexed in clock-out order: line 0 is the first bit out.
pub(crate) struct MockRegister {
    state: Rc<RefCell<RegisterState>>,
}

struct RegisterState {
    lines: [Level; 8],
    shifted: [Level; 8],
    cursor: usize,
    clock: Level,
    latch: Level,
    latch_pulses: usize,
    clock_pulses: usize,
    configs: [PinConfig; 3],
}

impl MockRegister {
    pub(crate) fn new() -> Self {
        let unconfigured = PinConfig {
            direction: Direction::Input,
            pull: Pull::None,
            drive: None,
            valid: true,
        };
        Self {
            state: Rc::new(RefCell::new(RegisterState {
                lines: [Level::High; 8],
                shifted: [Level::High; 8],
                cursor: 8,
                clock: Level::Low,
                latch: Level::Low,
                latch_pulses: 0,
                clock_pulses: 0,
                configs: [unconfigured; 3],
            })),
        }
    }

    /// The (data, clock, latch) pin handles.
    pub(crate) fn pins(&self) -> (RegisterPin, RegisterPin, RegisterPin) {
        let pin = |role| RegisterPin {
            role,
            state: Rc::clone(&self.state),
        };
        (pin(Role::Data), pin(Role::Clock), pin(Role::Latch))
    }

    /// Set all eight lines at once, in clock-out order.
    pub(crate) fn set_lines(&self, lines: [Level; 8]) {
        self.state.borrow_mut().lines = lines;
    }

    /// Ground a line (press its button).
    pub(crate) fn press(&self, line: usize) {
        self.state.borrow_mut().lines[line] = Level::Low;
    }

    /// Release a line back to its pulled-up idle.
    pub(crate) fn release(&self, line: usize) {
        self.state.borrow_mut().lines[line] = Level::High;
    }

    pub(crate) fn release_pin(&self, role: Role) {
        self.state.borrow_mut().configs[role.idx()].valid = false;
    }

    pub(crate) fn config(&self, role: Role) -> PinConfig {
        self.state.borrow().configs[role.idx()]
    }

    pub(crate) fn latch_pulses(&self) -> usize {
        self.state.borrow().latch_pulses
    }

    pub(crate) fn clock_pulses(&self) -> usize {
        self.state.borrow().clock_pulses
    }

    pub(crate) fn clock_level(&self) -> Level {
        self.state.borrow().clock
    }

    pub(crate) fn latch_level(&self) -> Level {
        self.state.borrow().latch
    }
}

/// One of the three bus pins of a [`MockRegister`].
pub(crate) struct RegisterPin {
    role: Role,
    state: Rc<RefCell<RegisterState>>,
}

impl ButtonPin for RegisterPin {
    fn is_valid(&self) -> bool {
        self.state.borrow().configs[self.role.idx()].valid
    }

    fn direction(&self) -> Direction {
        self.state.borrow().configs[self.role.idx()].direction
    }

    fn pull(&self) -> Pull {
        self.state.borrow().configs[self.role.idx()].pull
    }

    fn configure_input(&mut self, pull: Pull) {
        let mut state = self.state.borrow_mut();
        let config = &mut state.configs[self.role.idx()];
        config.direction = Direction::Input;
        config.pull = pull;
    }

    fn configure_output(&mut self, initial: Level, drive: DriveMode) {
        {
            let mut state = self.state.borrow_mut();
            let config = &mut state.configs[self.role.idx()];
            config.direction = Direction::Output;
            config.drive = Some(drive);
        }
        self.write(initial);
    }

    fn read(&mut self) -> Level {
        let state = self.state.borrow();
        match self.role {
            Role::Data => {
                if state.cursor < 8 {
                    state.shifted[state.cursor]
                } else {
                    Level::High
                }
            }
            Role::Clock => state.clock,
            Role::Latch => state.latch,
        }
    }

    fn write(&mut self, level: Level) {
        let mut state = self.state.borrow_mut();
        match self.role {
            Role::Data => {}
            Role::Clock => {
                if state.clock == Level::Low && level == Level::High {
                    state.cursor = (state.cursor + 1).min(8);
                    state.clock_pulses += 1;
                }
                state.clock = level;
            }
            Role::Latch => {
                if state.latch == Level::High && level == Level::Low {
                    state.shifted = state.lines;
                    state.cursor = 0;
                    state.latch_pulses += 1;
                }
                state.latch = level;
            }
        }
    }
}
