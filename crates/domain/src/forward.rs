//! The outcome value handed back to the request-handler collaborator.

use serde::Serialize;

/// Target view names understood by the handler.
pub mod views {
    /// The buyer input form (booking validation failures return here).
    pub const BUYER_FORM: &str = "buyer_message";

    /// Shown after a successful booking.
    pub const BOOKING_SUCCESS: &str = "booking_success";

    /// The order lookup / cancellation page.
    pub const ORDER_LOOKUP: &str = "check_order";

    /// The merchant password change page.
    pub const PASSWORD_CHANGE: &str = "merchantpassword_change";
}

/// Attribute names set on forwards.
pub mod keys {
    pub const ERROR_MESSAGE: &str = "errorMessage";
    pub const SUCCESS_MESSAGE: &str = "successMessage";
    pub const QUERY_RESULT: &str = "queryResult";
    pub const ORDER_ID: &str = "order_id";
    pub const WORK_NAME: &str = "work_name";
    pub const WORK_PRICE: &str = "work_price";
    pub const SHOW_CANCEL_BUTTON: &str = "showCancelButton";
    pub const ORDER_ID_TO_CANCEL: &str = "orderIdToCancel";
}

/// A "forward with attributes" instruction: the target view plus the string
/// attributes the view renders. This is the only shape business and
/// validation outcomes take; hard failures travel as errors instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Forward {
    view: &'static str,
    attributes: Vec<(&'static str, String)>,
}

impl Forward {
    /// Creates a forward to the given view with no attributes.
    pub fn to(view: &'static str) -> Self {
        Self {
            view,
            attributes: Vec::new(),
        }
    }

    /// Adds an attribute.
    pub fn with_attribute(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.attributes.push((key, value.into()));
        self
    }

    /// Returns the target view name.
    pub fn view(&self) -> &'static str {
        self.view
    }

    /// Returns an attribute value by key.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns true if the attribute is set.
    pub fn has_attribute(&self, key: &str) -> bool {
        self.attribute(key).is_some()
    }

    /// Iterates over all attributes in insertion order.
    pub fn attributes(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.attributes.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attributes_are_retrievable_by_key() {
        let forward = Forward::to(views::BOOKING_SUCCESS)
            .with_attribute(keys::ORDER_ID, "0000000001")
            .with_attribute(keys::WORK_NAME, "Sunset Oil");

        assert_eq!(forward.view(), "booking_success");
        assert_eq!(forward.attribute(keys::ORDER_ID), Some("0000000001"));
        assert_eq!(forward.attribute(keys::WORK_NAME), Some("Sunset Oil"));
        assert_eq!(forward.attribute(keys::WORK_PRICE), None);
        assert!(!forward.has_attribute(keys::ERROR_MESSAGE));
    }

    #[test]
    fn forward_serializes_for_the_handler() {
        let forward =
            Forward::to(views::ORDER_LOOKUP).with_attribute(keys::ERROR_MESSAGE, "order not found");
        let json = serde_json::to_value(&forward).unwrap();
        assert_eq!(json["view"], "check_order");
        assert_eq!(json["attributes"][0][0], "errorMessage");
        assert_eq!(json["attributes"][0][1], "order not found");
    }

    #[test]
    fn attributes_preserve_insertion_order() {
        let forward = Forward::to(views::ORDER_LOOKUP)
            .with_attribute(keys::QUERY_RESULT, "a")
            .with_attribute(keys::SHOW_CANCEL_BUTTON, "true");

        let keys: Vec<_> = forward.attributes().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["queryResult", "showCancelButton"]);
    }
}
