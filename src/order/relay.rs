use teloxide::types::{ChatId, MessageId};
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::menu;
use crate::order::{decode_payload, Order, RelayError};
use crate::platform::{Customer, Outbox, Reply};

/// How a mini-app submission ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayOutcome {
    /// The operator got the order and the customer was told.
    Forwarded { total_label: String, item_count: usize },
    /// The payload could not be read; nobody else was contacted.
    Rejected,
    /// The operator could not be reached; no confirmation was sent.
    Undelivered,
}

/// Where the submission came from.
#[derive(Debug, Clone)]
pub struct Submission<'a> {
    pub customer: &'a Customer,
    pub chat_id: ChatId,
    pub message_id: Option<MessageId>,
    pub data: &'a str,
}

/// Decode, then deliver to the operator. The only two ways an order can
/// fail.
async fn forward<O: Outbox + ?Sized>(
    outbox: &O,
    config: &Config,
    submission: &Submission<'_>,
) -> Result<Order, RelayError> {
    let payload = decode_payload(submission.data)?;
    let order = Order::prepare(submission.customer, &payload);

    let unstructured = order
        .cart
        .entries
        .iter()
        .filter(|entry| !entry.is_well_formed())
        .count();
    if unstructured > 0 {
        debug!(
            "Order from {} has {} cart entries that are not item records",
            submission.customer.id_label(),
            unstructured
        );
    }

    outbox
        .send_text(config.admin_id, order.summary.clone())
        .await
        .map_err(RelayError::OperatorDelivery)?;

    Ok(order)
}

/// Relay a mini-app order to the operator, then confirm (or apologise) to the
/// customer. Never fails: every error becomes a reply with a support link.
pub async fn relay_order<O: Outbox + ?Sized>(
    outbox: &O,
    config: &Config,
    submission: Submission<'_>,
) -> RelayOutcome {
    let customer_id = submission.customer.id_label();

    let (reply, outcome) = match forward(outbox, config, &submission).await {
        Ok(order) => {
            info!(
                "Order received from {} - total: {}, items: {}",
                customer_id, order.total_label, order.cart.count
            );
            (
                Reply::html(order.confirmation()),
                RelayOutcome::Forwarded {
                    total_label: order.total_label,
                    item_count: order.cart.count,
                },
            )
        }
        Err(e) => {
            let outcome = match &e {
                RelayError::Decode(_) | RelayError::NotARecord(_) => {
                    warn!("Unreadable order from {}: {}", customer_id, e);
                    RelayOutcome::Rejected
                }
                RelayError::OperatorDelivery(source) => {
                    error!(
                        "Failed to forward order from {} to operator {}: {}",
                        customer_id, config.admin_id, source
                    );
                    RelayOutcome::Undelivered
                }
            };
            (Reply::plain(e.user_message()), outcome)
        }
    };

    let reply = reply
        .with_keyboard(menu::support_keyboard(config))
        .replying_to(submission.message_id);

    if let Err(e) = outbox.send_reply(submission.chat_id, reply).await {
        warn!("Couldn't answer order from {}: {}", customer_id, e);
    }

    outcome
}
