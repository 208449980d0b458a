use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};
use tracing::warn;

use super::events::AppEvent;
use crate::controllers::Confirmer;

/// Shows a yes/no prompt in the TUI and waits for the answer.
///
/// The prompt is handed to the UI loop over the event channel; the loop answers through
/// the enclosed oneshot once the user presses y or n. Dropping the reply counts as "no".
#[derive(Clone)]
pub struct ModalConfirmer {
    sender: mpsc::UnboundedSender<AppEvent>,
}

impl ModalConfirmer {
    pub fn new(sender: mpsc::UnboundedSender<AppEvent>) -> Self {
        Self { sender }
    }
}

#[async_trait]
impl Confirmer for ModalConfirmer {
    async fn confirm(&self, prompt: &str) -> bool {
        let (reply, answer) = oneshot::channel();
        let request = AppEvent::ConfirmRequested { prompt: prompt.to_string(), reply };
        if self.sender.send(request).is_err() {
            warn!("UI loop gone, treating confirmation as declined");
            return false;
        }
        answer.await.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_answer_is_forwarded() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let confirmer = ModalConfirmer::new(tx);

        let pending = tokio::spawn(async move { confirmer.confirm("Delete record #3?").await });

        match rx.recv().await {
            Some(AppEvent::ConfirmRequested { prompt, reply }) => {
                assert_eq!(prompt, "Delete record #3?");
                reply.send(true).unwrap();
            }
            other => panic!("unexpected event: {:?}", other),
        }
        assert!(pending.await.unwrap());
    }

    #[tokio::test]
    async fn test_dropped_reply_declines() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let confirmer = ModalConfirmer::new(tx);

        let pending = tokio::spawn(async move { confirmer.confirm("Delete?").await });
        drop(rx.recv().await);

        assert!(!pending.await.unwrap());
    }

    #[tokio::test]
    async fn test_closed_loop_declines() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        assert!(!ModalConfirmer::new(tx).confirm("Delete?").await);
    }
}
