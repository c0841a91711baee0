//! Edit buffer for numeric property fields.
//!
//! Text typed into a property-panel field is held here until the field
//! commits (blur/enter). Input that does not parse as a finite number
//! reverts to the last valid value, so the layer store never sees NaN or
//! infinity.

/// Local edit state for one numeric text field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditBuffer {
    text: String,
    last_valid: f64,
}

impl EditBuffer {
    /// Seed the buffer from the current property value.
    pub fn begin(value: f64) -> Self {
        Self {
            text: value.to_string(),
            last_valid: value,
        }
    }

    /// Record a keystroke's worth of text. Nothing is validated here; the
    /// user is free to pass through invalid intermediate states like "-"
    /// or "1e".
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn last_valid(&self) -> f64 {
        self.last_valid
    }

    /// Commit the buffer. A finite parse becomes the new valid value and is
    /// returned for the caller to push into the store; anything else
    /// (unparseable, NaN, infinity) returns `None` and the text reverts.
    pub fn commit(&mut self) -> Option<f64> {
        match self.text.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => {
                self.last_valid = value;
                self.text = value.to_string();
                Some(value)
            }
            _ => {
                self.text = self.last_valid.to_string();
                None
            }
        }
    }
}
