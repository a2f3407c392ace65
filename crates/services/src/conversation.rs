//! # Conversation Aggregator
//!
//! Folds a flat message list into one summary per conversation in a single
//! pass. Recency is decided by message id alone: the store hands ids out in
//! strictly increasing order, so a higher id is a later message. Client
//! timestamps are carried along but never compared.

use std::collections::HashMap;

use domains::models::{ConversationSummary, Message};

struct Fold {
    summary: ConversationSummary,
    /// Id of the message currently shown as `last_message`.
    last_id: i64,
    /// Id of the earliest message seen; the label belongs to it.
    first_id: i64,
}

/// One summary per distinct `conversation_id`, in the order each id first
/// appears in `messages`.
///
/// `last_message`/`last_timestamp` come from the highest-id message. The label
/// comes from the lowest-id message, even when that message has none; later
/// messages never change it. Both choices depend only on ids, which makes the
/// summary contents independent of traversal order; only the output order
/// follows the input.
pub fn summarize(messages: &[Message]) -> Vec<ConversationSummary> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut folds: Vec<Fold> = Vec::new();

    for m in messages {
        let Some(&slot) = index.get(m.conversation_id.as_str()) else {
            index.insert(m.conversation_id.as_str(), folds.len());
            folds.push(Fold {
                summary: ConversationSummary {
                    conversation_id: m.conversation_id.clone(),
                    conversation_label: m.conversation_label.clone(),
                    last_message: m.text.clone(),
                    last_timestamp: m.timestamp.clone(),
                },
                last_id: m.id,
                first_id: m.id,
            });
            continue;
        };

        let fold = &mut folds[slot];
        if m.id > fold.last_id {
            fold.last_id = m.id;
            fold.summary.last_message = m.text.clone();
            fold.summary.last_timestamp = m.timestamp.clone();
        }
        if m.id < fold.first_id {
            fold.first_id = m.id;
            fold.summary.conversation_label = m.conversation_label.clone();
        }
    }

    folds.into_iter().map(|f| f.summary).collect()
}
