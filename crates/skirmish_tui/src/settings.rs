use crossterm::event::KeyCode;
use serde::{Deserialize, Serialize};

use crate::get_data_dir;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub keybinds: Keybinds,
    pub machine_speed: MachineSpeed,
}

impl Settings {
    pub fn disk_path() -> Option<std::path::PathBuf> {
        let mut path = get_data_dir()?;
        path.push("settings.ron");
        tracing::trace!(target: "settings", "path: {:?}", path);
        Some(path)
    }

    pub fn from_disk() -> Option<Self> {
        let path = Self::disk_path()?;
        let raw = std::fs::read_to_string(path).ok()?;
        Self::from_string(&raw)
    }

    pub fn from_string(raw: &str) -> Option<Self> {
        ron::from_str(raw)
            .map_err(|err| tracing::warn!(target: "settings", "ignoring settings: {}", err))
            .ok()
    }

    pub fn to_disk(&self) -> std::io::Result<()> {
        let Some(path) = Self::disk_path() else {
            return Ok(());
        };
        let string = ron::ser::to_string_pretty(&self, ron::ser::PrettyConfig::default())
            .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidData, err))?;
        std::fs::write(path, string)
    }
}

/// struct reflection
#[macro_export]
macro_rules! define_keybinds {
    ( $($field:ident),* ) => {
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        #[serde(default)]
        pub struct Keybinds {
            $(pub $field: KeyCode,)*
        }
        impl Keybinds {
            /// Every binding with its field name, in declaration order
            pub fn bindings(&self) -> Vec<(&'static str, KeyCode)> {
                vec![
                    $((stringify!($field), self.$field),)*
                ]
            }
        }
    };
}

define_keybinds!(
    pause,
    help,
    up,
    down,
    left,
    right,
    fast_up,
    fast_down,
    fast_left,
    fast_right,
    forward,
    next_target,
    attack,
    skill_1,
    skill_2,
    skill_3,
    pickup,
    end_turn,
    pause_queue,
    step_queue
);

impl Default for Keybinds {
    fn default() -> Self {
        Self {
            pause: KeyCode::Esc,
            help: KeyCode::Char('?'),
            up: KeyCode::Char('w'),
            left: KeyCode::Char('a'),
            down: KeyCode::Char('s'),
            right: KeyCode::Char('d'),
            fast_up: KeyCode::Char('W'),
            fast_left: KeyCode::Char('A'),
            fast_down: KeyCode::Char('S'),
            fast_right: KeyCode::Char('D'),
            forward: KeyCode::Char(' '),
            next_target: KeyCode::Char('f'),
            attack: KeyCode::Char('x'),
            skill_1: KeyCode::Char('1'),
            skill_2: KeyCode::Char('2'),
            skill_3: KeyCode::Char('3'),
            pickup: KeyCode::Char('e'),
            end_turn: KeyCode::Tab,
            pause_queue: KeyCode::Char(','),
            step_queue: KeyCode::Char('.'),
        }
    }
}

impl Keybinds {
    pub fn description(field: &str) -> &'static str {
        match field {
            "pause" => "Quits the game",
            "help" => "Shows or hides this list",
            "up" => "Move the cursor up by 1",
            "down" => "Move the cursor down by 1",
            "left" => "Move the cursor left by 1",
            "right" => "Move the cursor right by 1",
            "fast_up" => "Move the cursor up by 10",
            "fast_down" => "Move the cursor down by 10",
            "fast_left" => "Move the cursor left by 10",
            "fast_right" => "Move the cursor right by 10",
            "forward" => "Move the current unit to the cursor",
            "next_target" => "Cycle the cursor through the living opponents",
            "attack" => "Attack the unit under the cursor",
            "skill_1" => "Use the first skill, on the unit under the cursor if any",
            "skill_2" => "Use the second skill",
            "skill_3" => "Use the third skill",
            "pickup" => "Pick up the items on the current unit's tile",
            "end_turn" => "End the turn, passes if no command was issued",
            "pause_queue" => "Halts or resume the machine units",
            "step_queue" => "Makes the machine unit do one command",
            _ => "",
        }
    }

    /// One `key  description` line per binding, for the help overlay
    pub fn help_lines(&self) -> Vec<String> {
        self.bindings()
            .into_iter()
            .map(|(field, key)| format!("{:>6}  {}", key_name(key), Self::description(field)))
            .collect()
    }
}

pub fn key_name(key: KeyCode) -> String {
    match key {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::F(n) => format!("F{}", n),
        other => format!("{:?}", other),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MachineSpeed {
    /// Only on `step_queue`
    StepCommands,
    #[default]
    Slow,
    Fast,
}

impl MachineSpeed {
    /// Frames to wait between two machine commands
    pub fn delay(&self) -> Option<u32> {
        match self {
            MachineSpeed::StepCommands => None,
            MachineSpeed::Slow => Some(10),
            MachineSpeed::Fast => Some(0),
        }
    }
}
