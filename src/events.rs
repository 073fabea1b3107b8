use strum::{Display as StrumDisplay, EnumString};

#[derive(Debug, Clone)]
pub enum AppEvent {
    Activate,
    ConfigReload,
}

/// Line commands accepted on the control socket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, StrumDisplay)]
#[strum(ascii_case_insensitive)]
pub enum ControlCommand {
    #[strum(to_string = "activate", serialize = "tap")]
    Activate,
    #[strum(to_string = "reload")]
    Reload,
}

impl From<ControlCommand> for AppEvent {
    fn from(command: ControlCommand) -> Self {
        match command {
            ControlCommand::Activate => AppEvent::Activate,
            ControlCommand::Reload => AppEvent::ConfigReload,
        }
    }
}
