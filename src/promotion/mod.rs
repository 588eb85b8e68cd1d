//! Channel-based unit fixed discount configuration
//!
//! A promotion action that takes a fixed amount off every unit carries one
//! amount per sales channel, each expressed in that channel's base
//! currency. This module derives the per-channel entry options an admin UI
//! renders and validates submitted configurations against the channels.

use crate::core::error::{FieldValidationError, ValidationError};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A sales channel as seen by promotion configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub code: String,
    pub name: String,
    pub base_currency_code: String,
}

impl Channel {
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        base_currency_code: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            base_currency_code: base_currency_code.into(),
        }
    }
}

/// Options of one per-channel entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitFixedDiscountEntryOptions {
    /// Shown next to the amount input
    pub label: String,
    /// Currency the amount is expressed in
    pub currency: String,
}

impl From<&Channel> for UnitFixedDiscountEntryOptions {
    fn from(channel: &Channel) -> Self {
        Self {
            label: channel.name.clone(),
            currency: channel.base_currency_code.clone(),
        }
    }
}

/// Fixed discount for one channel, in minor units of its base currency
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct UnitFixedDiscountConfiguration {
    #[validate(range(min = 0, message = "amount must not be negative"))]
    pub amount: i64,
}

/// Channel code -> fixed discount
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelBasedUnitFixedDiscountConfiguration {
    entries: IndexMap<String, UnitFixedDiscountConfiguration>,
}

impl ChannelBasedUnitFixedDiscountConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a submitted configuration (`{"<channel>": {"amount": 100}}`)
    pub fn from_json(value: serde_json::Value) -> Result<Self, ValidationError> {
        serde_json::from_value(value).map_err(|e| ValidationError::FieldError {
            field: "configuration".to_string(),
            message: e.to_string(),
        })
    }

    pub fn with_amount(mut self, channel_code: impl Into<String>, amount: i64) -> Self {
        self.entries
            .insert(channel_code.into(), UnitFixedDiscountConfiguration { amount });
        self
    }

    pub fn amount_for(&self, channel_code: &str) -> Option<i64> {
        self.entries.get(channel_code).map(|entry| entry.amount)
    }

    /// Entry options for each channel, keyed by channel code
    pub fn entry_options(channels: &[Channel]) -> IndexMap<String, UnitFixedDiscountEntryOptions> {
        channels
            .iter()
            .map(|channel| (channel.code.clone(), UnitFixedDiscountEntryOptions::from(channel)))
            .collect()
    }

    /// Check the configuration against the available channels
    ///
    /// Every channel needs a non-negative amount; entries for unknown
    /// channels are rejected.
    pub fn validate_for(&self, channels: &[Channel]) -> Result<(), ValidationError> {
        let mut errors = Vec::new();

        for channel in channels {
            let Some(entry) = self.entries.get(&channel.code) else {
                errors.push(FieldValidationError {
                    field: channel.code.clone(),
                    message: format!("missing discount for channel '{}'", channel.name),
                });
                continue;
            };

            if let Err(entry_errors) = entry.validate() {
                for (field, field_errors) in entry_errors.field_errors() {
                    for error in field_errors {
                        errors.push(FieldValidationError {
                            field: format!("{}.{}", channel.code, field),
                            message: error
                                .message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| error.code.to_string()),
                        });
                    }
                }
            }
        }

        for code in self.entries.keys() {
            if !channels.iter().any(|channel| &channel.code == code) {
                errors.push(FieldValidationError {
                    field: code.clone(),
                    message: "unknown channel".to_string(),
                });
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::FieldErrors(errors))
        }
    }
}
