//! Command-based control of the tank.

/// The discrete operations an operator can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TankCommand {
    /// Stop both motors.
    Stop,
    /// Turn in place clockwise.
    RotateRight,
    /// Turn in place counter-clockwise.
    RotateLeft,
    /// Both tracks at full speed forward.
    FullForward,
    /// Both tracks slowly backward.
    SlowBackward,
    /// Fade all LEDs on.
    LightsOn,
    /// Fade all LEDs off.
    LightsOff,
    /// Left turn indicator.
    BlinkLeft,
    /// Right turn indicator.
    BlinkRight,
    /// Clear motor faults.
    Recover,
    /// Emit a status snapshot on the next tick.
    Status,
    /// Set the left motor speed.
    LeftMotor(i32),
    /// Set the right motor speed.
    RightMotor(i32),
}

impl TankCommand {
    /// Looks up a parameterless command by name.
    ///
    /// Returns `None` for unknown names, which callers treat as a no-op.
    pub fn from_name(name: &str) -> Option<Self> {
        let command = match name.trim() {
            "stop" => TankCommand::Stop,
            "rotateRight" => TankCommand::RotateRight,
            "rotateLeft" => TankCommand::RotateLeft,
            "fullForward" => TankCommand::FullForward,
            "slowBackward" => TankCommand::SlowBackward,
            "lightsOn" => TankCommand::LightsOn,
            "lightsOff" => TankCommand::LightsOff,
            "blinkLeft" => TankCommand::BlinkLeft,
            "blinkRight" => TankCommand::BlinkRight,
            "recover" => TankCommand::Recover,
            "status" => TankCommand::Status,
            _ => return None,
        };
        Some(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_resolve_to_commands() {
        assert_eq!(TankCommand::from_name("stop"), Some(TankCommand::Stop));
        assert_eq!(
            TankCommand::from_name("rotateRight"),
            Some(TankCommand::RotateRight)
        );
        assert_eq!(
            TankCommand::from_name(" slowBackward\r\n"),
            Some(TankCommand::SlowBackward)
        );
        assert_eq!(TankCommand::from_name("status"), Some(TankCommand::Status));
    }

    #[test]
    fn unknown_names_are_rejected() {
        assert_eq!(TankCommand::from_name(""), None);
        assert_eq!(TankCommand::from_name("STOP"), None);
        assert_eq!(TankCommand::from_name("launch"), None);
    }
}
