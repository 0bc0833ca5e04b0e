use {
    super::checkout::{CheckoutCompletion, MarkPaidOutcome},
    super::error::PipelineError,
    std::{future::Future, pin::Pin},
};

pub trait OrderRepository: Send + Sync {
    /// Atomically record the event, mark the order paid, attach both addresses
    /// and enqueue the confirmation email. Replays and already-paid orders are
    /// reported through [`MarkPaidOutcome`] without side effects.
    fn mark_paid<'a>(
        &'a self,
        completion: &'a CheckoutCompletion,
    ) -> Pin<Box<dyn Future<Output = Result<MarkPaidOutcome, PipelineError>> + Send + 'a>>;
}
