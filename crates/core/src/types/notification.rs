//! Transient user notifications (toasts).
//!
//! Handlers attach a toast to an HTMX response through the `HX-Trigger`
//! header; the page's toast script listens for the `toast` event and shows
//! it.

use serde::{Deserialize, Serialize};

/// Visual severity of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToastVariant {
    #[default]
    Default,
    Destructive,
}

/// A short message shown to the user after an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub title: String,
    pub description: String,
    pub variant: ToastVariant,
}

impl Toast {
    /// A normal (informational/success) toast.
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: ToastVariant::Default,
        }
    }

    /// A destructive (error) toast.
    #[must_use]
    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: ToastVariant::Destructive,
        }
    }

    /// Value for an `HX-Trigger` header firing a `toast` event.
    ///
    /// Header values must be visible ASCII, so every non-ASCII character is
    /// written as a JSON `\uXXXX` escape (surrogate pairs above the BMP).
    ///
    /// # Errors
    ///
    /// Returns an error if the toast cannot be serialized.
    pub fn hx_trigger_value(&self) -> Result<String, serde_json::Error> {
        self.hx_trigger_with_events(&[])
    }

    /// Like [`Self::hx_trigger_value`], also firing payload-less `events`.
    ///
    /// # Errors
    ///
    /// Returns an error if the toast cannot be serialized.
    pub fn hx_trigger_with_events(&self, events: &[&str]) -> Result<String, serde_json::Error> {
        let mut triggers = serde_json::Map::new();
        for event in events {
            triggers.insert((*event).to_string(), serde_json::Value::Null);
        }
        triggers.insert("toast".to_string(), serde_json::to_value(self)?);

        let json = serde_json::to_string(&triggers)?;
        Ok(escape_non_ascii(&json))
    }
}

fn escape_non_ascii(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    for ch in json.chars() {
        if ch.is_ascii() {
            out.push(ch);
        } else {
            let mut buf = [0u16; 2];
            for unit in ch.encode_utf16(&mut buf) {
                out.push_str(&format!("\\u{unit:04x}"));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hx_trigger_wraps_toast_event() {
        let toast = Toast::new("Item Removed", "Tee has been removed from your cart.");
        let value = toast.hx_trigger_value().expect("serialize");
        let parsed: serde_json::Value = serde_json::from_str(&value).expect("parse");

        assert_eq!(parsed["toast"]["title"], "Item Removed");
        assert_eq!(parsed["toast"]["variant"], "default");
    }

    #[test]
    fn test_hx_trigger_is_ascii_only() {
        let toast = Toast::destructive("Refund Failed", "Café ₨ 🍍");
        let value = toast.hx_trigger_value().expect("serialize");

        assert!(value.is_ascii());
        assert!(value.contains("\\u00e9"));

        let parsed: serde_json::Value = serde_json::from_str(&value).expect("parse");
        assert_eq!(parsed["toast"]["description"], "Café ₨ 🍍");
        assert_eq!(parsed["toast"]["variant"], "destructive");
    }

    #[test]
    fn test_hx_trigger_with_extra_events() {
        let toast = Toast::new("Item Removed", "Mug has been removed from your cart.");
        let value = toast
            .hx_trigger_with_events(&["cart-updated"])
            .expect("serialize");
        let parsed: serde_json::Value = serde_json::from_str(&value).expect("parse");

        assert!(parsed["cart-updated"].is_null());
        assert!(parsed.as_object().expect("object").contains_key("cart-updated"));
        assert_eq!(parsed["toast"]["title"], "Item Removed");
    }
}
