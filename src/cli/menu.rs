//! Main-menu states and choice parsing.

/// States of the interactive session. Every state other than `Exit` returns
/// to `MainMenu` once its command completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    MainMenu,
    AddingData,
    Viewing,
    Analyzing,
    Visualizing,
    Exit,
}

pub const MENU_OPTIONS: [&str; 5] = [
    "1. Add New Data",
    "2. View Dataset",
    "3. Analyze Data",
    "4. Visualize Data",
    "5. Exit",
];

impl MenuState {
    /// Map a main-menu answer (`1`-`5`) to the state it selects.
    pub fn from_choice(choice: &str) -> Option<Self> {
        match choice.trim() {
            "1" => Some(MenuState::AddingData),
            "2" => Some(MenuState::Viewing),
            "3" => Some(MenuState::Analyzing),
            "4" => Some(MenuState::Visualizing),
            "5" => Some(MenuState::Exit),
            _ => None,
        }
    }

    /// State entered after this one completes.
    pub fn next(self) -> Self {
        match self {
            MenuState::Exit => MenuState::Exit,
            _ => MenuState::MainMenu,
        }
    }

    pub fn is_terminal(self) -> bool {
        self == MenuState::Exit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choices_map_to_states() {
        assert_eq!(MenuState::from_choice("1"), Some(MenuState::AddingData));
        assert_eq!(MenuState::from_choice(" 4 "), Some(MenuState::Visualizing));
        assert_eq!(MenuState::from_choice("5"), Some(MenuState::Exit));
        assert_eq!(MenuState::from_choice("6"), None);
        assert_eq!(MenuState::from_choice("exit"), None);
        assert_eq!(MenuState::from_choice(""), None);
    }

    #[test]
    fn test_commands_return_to_main_menu() {
        for state in [
            MenuState::AddingData,
            MenuState::Viewing,
            MenuState::Analyzing,
            MenuState::Visualizing,
        ] {
            assert_eq!(state.next(), MenuState::MainMenu);
            assert!(!state.is_terminal());
        }
        assert_eq!(MenuState::Exit.next(), MenuState::Exit);
        assert!(MenuState::Exit.is_terminal());
    }
}
