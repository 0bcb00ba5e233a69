//! Bounded-concurrency batch orchestration over [`Verifier`].
//!
//! A fixed pool of worker threads pulls addresses from a shared queue and
//! funnels results through a channel into a single collector. Workers share
//! nothing else; a failing address is folded into its own verdict inside
//! [`Verifier::verify`] and never disturbs a sibling.

use std::sync::Mutex;
use std::sync::mpsc;
use std::thread;

use crate::probe::SmtpProber;
use crate::verify::{MailboxProbe, MxLookup, SystemResolver, VerificationResult, Verifier};

/// Worker-pool size used when the caller does not specify one.
pub const DEFAULT_CONCURRENCY: usize = 10;

impl Verifier {
    /// Verifies many addresses with at most `concurrency` pipeline runs in
    /// flight (values below 1 are clamped up).
    ///
    /// Returns exactly one result per input. Results arrive in completion
    /// order, not submission order; identity travels in the result itself.
    pub fn verify_batch<I, S>(&self, addresses: I, concurrency: usize) -> Vec<VerificationResult>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let prober = SmtpProber::new(self.options().probe.clone());
        self.verify_batch_with(&SystemResolver, &prober, addresses, concurrency)
    }

    pub(crate) fn verify_batch_with<R, P, I, S>(
        &self,
        resolver: &R,
        prober: &P,
        addresses: I,
        concurrency: usize,
    ) -> Vec<VerificationResult>
    where
        R: MxLookup + Sync,
        P: MailboxProbe + Sync,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let addresses: Vec<String> = addresses.into_iter().map(Into::into).collect();
        if addresses.is_empty() {
            return Vec::new();
        }
        let workers = concurrency.clamp(1, addresses.len());

        #[cfg(feature = "with-tracing")]
        tracing::debug!(total = addresses.len(), workers, "batch start");

        let (job_tx, job_rx) = mpsc::channel::<String>();
        for address in addresses {
            // the receiver lives until the scope ends, sends cannot fail here
            let _ = job_tx.send(address);
        }
        drop(job_tx);
        let jobs = Mutex::new(job_rx);

        let (result_tx, result_rx) = mpsc::channel::<VerificationResult>();

        thread::scope(|scope| {
            for _ in 0..workers {
                let result_tx = result_tx.clone();
                let jobs = &jobs;
                scope.spawn(move || {
                    loop {
                        let next = match jobs.lock() {
                            Ok(queue) => queue.recv(),
                            // a sibling panicked while holding the queue
                            Err(_) => break,
                        };
                        let Ok(address) = next else { break };
                        let result = self.verify_with(resolver, prober, &address);
                        if result_tx.send(result).is_err() {
                            break;
                        }
                    }
                });
            }
            drop(result_tx);
            result_rx.iter().collect()
        })
    }
}
