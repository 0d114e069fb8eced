use crate::canvas::raster::Raster;
use crate::recognize::client::RecognitionClient;
use crate::recognize::error::RecognizeError;
use crate::recognize::vars::VariableEnvironment;
use crate::recognize::wire::RecognitionRecord;
use std::sync::mpsc::Sender;
use std::thread::JoinHandle;

/// Everything a background request needs, captured on the UI thread.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub generation: u64,
    pub raster: Raster,
    pub vars: VariableEnvironment,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecognitionReply {
    pub generation: u64,
    pub result: Result<Vec<RecognitionRecord>, RecognizeError>,
}

/// Run one submission on its own thread. The reply is sent on `tx`, then
/// `notify` runs so the UI can wake up.
pub fn spawn_submission<F>(
    client: RecognitionClient,
    submission: Submission,
    tx: Sender<RecognitionReply>,
    notify: F,
) -> JoinHandle<()>
where
    F: FnOnce() + Send + 'static,
{
    std::thread::spawn(move || {
        let Submission {
            generation,
            raster,
            vars,
        } = submission;
        let result = client.submit(&raster, &vars);
        if let Err(e) = &result {
            tracing::warn!(generation, "recognition failed: {e}");
        }
        if tx.send(RecognitionReply { generation, result }).is_err() {
            tracing::debug!(generation, "reply dropped, receiver closed");
        }
        notify();
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    #[test]
    fn failed_request_still_replies_and_notifies() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().expect("addr");
        drop(listener);
        let client =
            RecognitionClient::new(&format!("http://{addr}"), Duration::from_secs(2)).expect("client");

        let (tx, rx) = std::sync::mpsc::channel();
        let notified = Arc::new(AtomicBool::new(false));
        let flag = notified.clone();
        let handle = spawn_submission(
            client,
            Submission {
                generation: 7,
                raster: Raster::new(2, 2),
                vars: VariableEnvironment::default(),
            },
            tx,
            move || flag.store(true, Ordering::SeqCst),
        );
        handle.join().expect("worker");

        let reply = rx.recv().expect("reply");
        assert_eq!(reply.generation, 7);
        assert!(matches!(reply.result, Err(RecognizeError::Transport(_))));
        assert!(notified.load(Ordering::SeqCst));
    }
}
