use anyhow::Result;
use crossterm::event::{KeyCode, KeyModifiers};
use tzclock_core::app::Command;
use super::model::{TuiModel, ViewMode};

/// Messages that can be sent from the TUI to the clock service
#[derive(Debug, Clone, PartialEq)]
pub enum TuiMessage {
    /// Send a command to the clock service
    Command(Command),

    /// No action needed
    None,
}

/// The Update function - handles user input and updates the model
pub struct TuiUpdate;

impl TuiUpdate {
    /// Handle a key press and update the model accordingly
    /// Returns a TuiMessage that should be sent to the clock service
    pub fn handle_key(model: &mut TuiModel, key: KeyCode, modifiers: KeyModifiers) -> Result<TuiMessage> {
        if key == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(TuiMessage::Command(Command::Quit));
        }

        match model.mode {
            ViewMode::Clock => Self::handle_clock_keys(model, key),
            ViewMode::ZonePicker => Self::handle_picker_keys(model, key),
            ViewMode::Settings => Self::handle_settings_keys(model, key),
            ViewMode::Help => {
                // Any key exits help
                model.mode = ViewMode::Clock;
                Ok(TuiMessage::None)
            }
        }
    }

    /// Toggles shared by the clock face and the settings panel
    fn toggle_for(key: KeyCode) -> Option<Command> {
        match key {
            KeyCode::Char('t') => Some(Command::ToggleHourFormat),
            KeyCode::Char('s') => Some(Command::ToggleSeconds),
            KeyCode::Char('b') => Some(Command::ToggleTickSound),
            _ => None,
        }
    }

    fn handle_clock_keys(model: &mut TuiModel, key: KeyCode) -> Result<TuiMessage> {
        if let Some(cmd) = Self::toggle_for(key) {
            return Ok(TuiMessage::Command(cmd));
        }

        match key {
            KeyCode::Char('q') | KeyCode::Esc => Ok(TuiMessage::Command(Command::Quit)),

            KeyCode::Char('z') | KeyCode::Enter => {
                model.open_picker();
                Ok(TuiMessage::None)
            }

            KeyCode::Char('r') => Ok(TuiMessage::Command(Command::ReloadZones)),

            KeyCode::Char(',') => {
                model.mode = ViewMode::Settings;
                Ok(TuiMessage::None)
            }

            KeyCode::Char('?') => {
                model.mode = ViewMode::Help;
                Ok(TuiMessage::None)
            }

            _ => Ok(TuiMessage::None),
        }
    }

    /// Letters go to the filter, so only arrows navigate here
    fn handle_picker_keys(model: &mut TuiModel, key: KeyCode) -> Result<TuiMessage> {
        match key {
            KeyCode::Up => {
                model.picker_up();
                Ok(TuiMessage::None)
            }

            KeyCode::Down => {
                model.picker_down();
                Ok(TuiMessage::None)
            }

            KeyCode::Enter => {
                let selected = model.highlighted_zone().map(|entry| entry.zone.clone());
                model.mode = ViewMode::Clock;
                Ok(match selected {
                    Some(zone) => TuiMessage::Command(Command::SelectZone { zone }),
                    None => TuiMessage::None,
                })
            }

            KeyCode::Esc => {
                model.mode = ViewMode::Clock;
                Ok(TuiMessage::None)
            }

            KeyCode::Backspace => {
                model.pop_filter();
                Ok(TuiMessage::None)
            }

            KeyCode::Char(c) => {
                model.push_filter(c);
                Ok(TuiMessage::None)
            }

            _ => Ok(TuiMessage::None),
        }
    }

    fn handle_settings_keys(model: &mut TuiModel, key: KeyCode) -> Result<TuiMessage> {
        if let Some(cmd) = Self::toggle_for(key) {
            return Ok(TuiMessage::Command(cmd));
        }

        match key {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char(',') => {
                model.mode = ViewMode::Clock;
                Ok(TuiMessage::None)
            }
            _ => Ok(TuiMessage::None),
        }
    }
}
