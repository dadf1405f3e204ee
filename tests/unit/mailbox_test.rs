//! Tests for the completion mailbox

use prometheus_event_queue::core::TaskError;
use prometheus_event_queue::infra::mailbox::oneshot::OneshotMailbox;

#[tokio::test]
async fn test_oneshot_mailbox_deliver_and_receive() {
    let mut mailbox = OneshotMailbox::<String>::new();
    let rx = mailbox.register("task-1".to_string());

    assert!(mailbox.deliver(&"task-1".to_string(), Ok("result".to_string())));

    let outcome = rx.await.unwrap();
    assert_eq!(outcome.unwrap(), "result");
}

#[tokio::test]
async fn test_oneshot_mailbox_error_outcome() {
    let mut mailbox = OneshotMailbox::<String>::new();
    let rx = mailbox.register("task-2".to_string());

    mailbox.deliver(
        &"task-2".to_string(),
        Err(TaskError::Failed(anyhow::anyhow!("bad input"))),
    );

    assert!(matches!(rx.await.unwrap(), Err(TaskError::Failed(_))));
}

#[test]
fn test_oneshot_mailbox_deliver_after_receiver_dropped() {
    let mut mailbox = OneshotMailbox::<u8>::new();
    drop(mailbox.register("task-3".to_string()));

    assert!(!mailbox.deliver(&"task-3".to_string(), Ok(1)));
    assert_eq!(mailbox.pending(), 0);
}

#[test]
fn test_oneshot_mailbox_unknown_id() {
    let mut mailbox = OneshotMailbox::<u8>::default();
    assert!(!mailbox.deliver(&"missing".to_string(), Ok(1)));
    assert!(!mailbox.withdraw(&"missing".to_string()));
}
