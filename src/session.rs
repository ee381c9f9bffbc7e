//! Calculator session
//!
//! Holds what the form holds: the unit system, the text of both fields and
//! the last result. All arithmetic goes through the pure engine in
//! [`crate::bmi`].

use serde::Serialize;

use crate::bmi::{self, BmiResult, InputError, UnitSystem};

/// Mutable state for one calculator form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    unit_system: UnitSystem,
    weight_text: String,
    height_text: String,
    result: Option<BmiResult>,
}

/// Serializable view of a session
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub unit_system: UnitSystem,
    pub weight_label: String,
    pub height_label: String,
    pub weight: String,
    pub height: String,
    pub result: Option<BmiResult>,
}

impl Session {
    pub fn new(unit_system: UnitSystem) -> Self {
        Self {
            unit_system,
            ..Self::default()
        }
    }

    pub fn unit_system(&self) -> UnitSystem {
        self.unit_system
    }

    pub fn weight_text(&self) -> &str {
        &self.weight_text
    }

    pub fn height_text(&self) -> &str {
        &self.height_text
    }

    /// The last successful result, if any
    pub fn result(&self) -> Option<&BmiResult> {
        self.result.as_ref()
    }

    pub fn has_result(&self) -> bool {
        self.result.is_some()
    }

    pub fn set_weight(&mut self, text: impl Into<String>) {
        self.weight_text = text.into();
    }

    pub fn set_height(&mut self, text: impl Into<String>) {
        self.height_text = text.into();
    }

    /// Run the engine on the current fields
    ///
    /// Returns the new result. When the input is unusable, `None` is returned
    /// and the previous result stays in place.
    pub fn calculate(&mut self) -> Option<&BmiResult> {
        match self.try_calculate() {
            Ok(result) => Some(result),
            Err(e) => {
                tracing::debug!("Keeping previous result: {}", e);
                None
            }
        }
    }

    /// Like [`Session::calculate`], but says why the input was rejected
    pub fn try_calculate(&mut self) -> Result<&BmiResult, InputError> {
        let result = bmi::try_calculate(&self.weight_text, &self.height_text, self.unit_system)?;
        let stored: &BmiResult = self.result.insert(result);
        Ok(stored)
    }

    /// Switch to the other unit system, clearing both fields and the result
    pub fn toggle_units(&mut self) -> UnitSystem {
        self.unit_system = self.unit_system.toggled();
        self.clear();
        tracing::info!("Switched to {} units", self.unit_system.as_str());
        self.unit_system
    }

    /// Select a unit system; selecting the current one changes nothing
    pub fn set_unit_system(&mut self, unit_system: UnitSystem) -> UnitSystem {
        if unit_system != self.unit_system {
            self.toggle_units();
        }
        self.unit_system
    }

    /// Clear fields and result, keeping the unit system
    pub fn reset(&mut self) {
        self.clear();
    }

    fn clear(&mut self) {
        self.weight_text.clear();
        self.height_text.clear();
        self.result = None;
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            unit_system: self.unit_system,
            weight_label: self.unit_system.weight_label(),
            height_label: self.unit_system.height_label(),
            weight: self.weight_text.clone(),
            height: self.height_text.clone(),
            result: self.result,
        }
    }
}
