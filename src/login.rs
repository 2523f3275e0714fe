use crate::config::PIN;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoginError {
    #[error("Wrong PIN!")]
    WrongPin,
}

/// Holds whatever is currently typed into the PIN field.
#[derive(Debug, Default)]
pub struct LoginGate {
    input: String,
}

impl LoginGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn push(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn backspace(&mut self) {
        self.input.pop();
    }

    /// Checks the current input against the fixed PIN.
    pub fn submit(&self) -> Result<(), LoginError> {
        verify(&self.input).inspect_err(|_| warn!("wrong PIN entered"))?;
        info!("diary unlocked");
        Ok(())
    }
}

pub fn verify(candidate: &str) -> Result<(), LoginError> {
    if candidate == PIN {
        Ok(())
    } else {
        Err(LoginError::WrongPin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate_with(input: &str) -> LoginGate {
        let mut gate = LoginGate::new();
        input.chars().for_each(|c| gate.push(c));
        gate
    }

    #[test]
    fn correct_pin_unlocks() {
        assert_eq!(gate_with("1234").submit(), Ok(()));
    }

    #[test]
    fn anything_else_is_rejected_without_clearing_input() {
        for candidate in ["", "123", "12345", " 1234", "4321", "abcd"] {
            let gate = gate_with(candidate);
            assert_eq!(gate.submit(), Err(LoginError::WrongPin));
            assert_eq!(gate.input(), candidate);
        }
    }

    #[test]
    fn retries_are_unlimited() {
        let mut gate = gate_with("0000");
        for _ in 0..50 {
            assert!(gate.submit().is_err());
        }
        (0..4).for_each(|_| gate.backspace());
        "1234".chars().for_each(|c| gate.push(c));
        assert!(gate.submit().is_ok());
    }

    #[test]
    fn error_message_matches_field_feedback() {
        assert_eq!(LoginError::WrongPin.to_string(), "Wrong PIN!");
    }
}
