//! Fire-and-forget user-facing notices.
//!
//! The cart never surfaces errors to its caller through the UI; it emits a
//! [`Notice`] on a broadcast channel instead, and whatever toast/snackbar
//! layer the embedding UI has can subscribe and render them.

use tokio::sync::broadcast;

/// Default channel capacity; notices are transient, lagging readers just
/// miss old ones.
pub(crate) const NOTICE_CHANNEL_CAPACITY: usize = 16;

/// The fixed kinds of user-facing notice the cart can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoticeKind {
    /// Requested quantity exceeds available stock.
    OutOfStock,
    /// Adding a product failed.
    AddFailed,
    /// Removing a product failed.
    RemoveFailed,
    /// Changing a product's quantity failed.
    UpdateFailed,
}

/// A user-facing notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

/// User-facing message text, configurable per deployment.
///
/// Defaults to the storefront's original Portuguese strings.
#[derive(Debug, Clone)]
pub struct NoticeMessages {
    pub out_of_stock: String,
    pub add_failed: String,
    pub remove_failed: String,
    pub update_failed: String,
}

impl Default for NoticeMessages {
    fn default() -> Self {
        Self {
            out_of_stock: "Quantidade solicitada fora de estoque".to_string(),
            add_failed: "Erro na adição do produto".to_string(),
            remove_failed: "Erro na remoção do produto".to_string(),
            update_failed: "Erro na alteração de quantidade do produto".to_string(),
        }
    }
}

impl NoticeMessages {
    /// Build the notice for a given kind.
    #[must_use]
    pub fn notice(&self, kind: NoticeKind) -> Notice {
        let message = match kind {
            NoticeKind::OutOfStock => &self.out_of_stock,
            NoticeKind::AddFailed => &self.add_failed,
            NoticeKind::RemoveFailed => &self.remove_failed,
            NoticeKind::UpdateFailed => &self.update_failed,
        };

        Notice {
            kind,
            message: message.clone(),
        }
    }
}

/// Emit a notice, ignoring the absence of subscribers.
pub(crate) fn emit(sender: &broadcast::Sender<Notice>, messages: &NoticeMessages, kind: NoticeKind) {
    // A send error only means nobody is listening right now.
    let _ = sender.send(messages.notice(kind));
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_messages_are_the_original_strings() {
        let messages = NoticeMessages::default();
        assert_eq!(
            messages.notice(NoticeKind::OutOfStock).message,
            "Quantidade solicitada fora de estoque"
        );
        assert_eq!(
            messages.notice(NoticeKind::AddFailed).message,
            "Erro na adição do produto"
        );
        assert_eq!(
            messages.notice(NoticeKind::RemoveFailed).message,
            "Erro na remoção do produto"
        );
        assert_eq!(
            messages.notice(NoticeKind::UpdateFailed).message,
            "Erro na alteração de quantidade do produto"
        );
    }

    #[test]
    fn test_emit_without_subscribers_is_fire_and_forget() {
        let (sender, _) = broadcast::channel(NOTICE_CHANNEL_CAPACITY);
        let receiver = sender.subscribe();
        drop(receiver);

        // Must not panic or error out.
        emit(&sender, &NoticeMessages::default(), NoticeKind::AddFailed);
    }

    #[test]
    fn test_emit_reaches_subscriber() {
        let (sender, mut receiver) = broadcast::channel(NOTICE_CHANNEL_CAPACITY);
        emit(&sender, &NoticeMessages::default(), NoticeKind::RemoveFailed);

        let notice = receiver.try_recv().unwrap();
        assert_eq!(notice.kind, NoticeKind::RemoveFailed);
    }
}
