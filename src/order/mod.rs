pub mod relay;

use serde_json::{Map, Value};
use teloxide::utils::html;
use thiserror::Error;

use crate::platform::Customer;

pub const CURRENCY: char = '€';
pub const NO_ITEMS_LINE: &str = "- Aucun article fourni";
const DEFAULT_ITEM_NAME: &str = "Article";
const MISSING_AMOUNT: &str = "—";

/// Decoded mini-app submission. Key order is preserved so the operator sees
/// the payload exactly as sent.
pub type Payload = Map<String, Value>;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("order payload is not valid JSON")]
    Decode(#[from] serde_json::Error),
    #[error("order payload is a JSON {0}, expected an object")]
    NotARecord(&'static str),
    #[error("failed to deliver the order to the operator")]
    OperatorDelivery(#[source] teloxide::RequestError),
}

impl RelayError {
    /// Plain-language text shown to the customer. Never includes the
    /// underlying error.
    pub fn user_message(&self) -> &'static str {
        match self {
            RelayError::Decode(_) | RelayError::NotARecord(_) => {
                "❌ Impossible de lire les informations de commande. Contactez le support."
            }
            RelayError::OperatorDelivery(_) => {
                "❌ Nous n'avons pas pu transmettre votre commande.\n\
                 Merci de contacter le support directement."
            }
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

pub fn decode_payload(raw: &str) -> Result<Payload, RelayError> {
    match serde_json::from_str::<Value>(raw)? {
        Value::Object(map) => Ok(map),
        other => Err(RelayError::NotARecord(json_kind(&other))),
    }
}

/// Empty-ish values count as absent when choosing between alternative field
/// names: null, false, 0, "", [] and {}.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// First truthy value among `keys`, in order.
fn first_truthy<'a>(map: &'a Payload, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| map.get(*key))
        .find(|value| is_truthy(value))
}

/// Text form of a JSON value: strings unquoted, everything else as compact
/// JSON.
pub fn text_form(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// One cart entry after normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEntry {
    /// A keyed record.
    Item {
        /// `title`, then `name`, then "Article"
        name: String,
        /// `quantity`, then `qty`
        quantity: Option<String>,
        /// `price`, then `amount`
        price: Option<String>,
    },
    /// Anything that is not a keyed record, kept as text.
    Raw(String),
}

impl CartEntry {
    pub fn classify(value: &Value) -> Self {
        let Value::Object(map) = value else {
            return CartEntry::Raw(text_form(value));
        };

        let name = first_truthy(map, &["title", "name"])
            .map(text_form)
            .unwrap_or_else(|| DEFAULT_ITEM_NAME.to_string());
        let quantity = first_truthy(map, &["quantity", "qty"]).map(text_form);
        let price = first_truthy(map, &["price"])
            .or_else(|| map.get("amount").filter(|v| !v.is_null()))
            .map(text_form);

        CartEntry::Item {
            name,
            quantity,
            price,
        }
    }

    pub fn is_well_formed(&self) -> bool {
        matches!(self, CartEntry::Item { .. })
    }

    /// `- name (x2, 5€)`; the parenthetical only lists present fields.
    pub fn line(&self) -> String {
        match self {
            CartEntry::Raw(text) => format!("- {text}"),
            CartEntry::Item {
                name,
                quantity,
                price,
            } => {
                let details: Vec<String> = quantity
                    .iter()
                    .map(|q| format!("x{q}"))
                    .chain(price.iter().cloned())
                    .collect();
                if details.is_empty() {
                    format!("- {name}")
                } else {
                    format!("- {name} ({})", details.join(", "))
                }
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    pub entries: Vec<CartEntry>,
    /// Number of entries the mini-app sent; 0 when the cart was not a list.
    pub count: usize,
}

impl Cart {
    pub fn lines(&self) -> Vec<String> {
        if self.entries.is_empty() {
            return vec![NO_ITEMS_LINE.to_string()];
        }
        self.entries.iter().map(CartEntry::line).collect()
    }
}

pub fn normalize_cart(cart: Option<&Value>) -> Cart {
    match cart {
        Some(Value::Array(items)) => Cart {
            entries: items.iter().map(CartEntry::classify).collect(),
            count: items.len(),
        },
        _ => Cart::default(),
    }
}

pub fn format_amount(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => MISSING_AMOUNT.to_string(),
        Some(Value::Number(n)) => {
            let formatted = format!("{:.2}", n.as_f64().unwrap_or_default());
            let formatted = formatted.strip_suffix(".00").unwrap_or(&formatted);
            format!("{formatted}{CURRENCY}")
        }
        Some(other) => {
            let text = text_form(other);
            let text = text.trim();
            if text.ends_with(CURRENCY) {
                text.to_string()
            } else {
                format!("{text}{CURRENCY}")
            }
        }
    }
}

/// Free-text note from `message`, then `notes`.
pub fn comment(payload: &Payload) -> Option<String> {
    first_truthy(payload, &["message", "notes"]).map(text_form)
}

/// Everything derived from one decoded payload.
#[derive(Debug, Clone)]
pub struct Order {
    pub cart: Cart,
    pub total_label: String,
    /// Plain-text summary for the operator.
    pub summary: String,
}

impl Order {
    pub fn prepare(customer: &Customer, payload: &Payload) -> Self {
        let cart = normalize_cart(payload.get("cart"));
        let total_label = format_amount(payload.get("total"));
        let summary = operator_summary(customer, payload, &cart, &total_label);
        Self {
            cart,
            total_label,
            summary,
        }
    }

    pub fn confirmation(&self) -> String {
        confirmation_message(&self.total_label, self.cart.count)
    }
}

pub fn operator_summary(
    customer: &Customer,
    payload: &Payload,
    cart: &Cart,
    total_label: &str,
) -> String {
    let mut parts = vec![
        "🛒 Nouvelle commande reçue".to_string(),
        format!(
            "Client : {} (ID: {})",
            customer.display_name(),
            customer.id_label()
        ),
        format!("Username : {}", customer.handle_label()),
        format!("Total : {total_label}"),
        format!("Articles : {}", cart.count),
        cart.lines().join("\n"),
    ];

    if let Some(comment) = comment(payload) {
        parts.extend([String::new(), "Commentaire :".to_string(), comment]);
    }

    let raw = serde_json::to_string_pretty(payload).unwrap_or_default();
    parts.extend([String::new(), "Données brutes :".to_string(), raw]);

    parts.join("\n")
}

/// HTML confirmation for the customer.
pub fn confirmation_message(total_label: &str, item_count: usize) -> String {
    format!(
        "✅ <b>Commande reçue !</b>\n\n\
         Montant total : <b>{}</b>\n\
         Nombre d'articles : <b>{item_count}</b>\n\n\
         📱 Vous serez contacté rapidement pour finaliser votre commande.\n\n\
         Merci de votre confiance ! 🌿",
        html::escape(total_label)
    )
}
