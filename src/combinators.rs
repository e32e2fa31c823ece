//! Combinators over cancellation tokens.
//!
//! [`or`] and [`and`] build a derived token from two operands. The derived
//! token always owns an independent signal and observes its operands purely
//! through completion subscriptions, so independently-owned cancellation
//! sources never end up sharing mutable state. Both combinators are
//! associative, and the [`BitOr`]/[`BitAnd`] operator impls let tokens be
//! combined as `a | b` and `a & b`.

use crate::signal::Signal;
use crate::token::CancellationToken;
use std::ops::{BitAnd, BitOr};
use std::sync::Arc;

/// Returns a token that is cancelled when *either* operand is cancelled.
///
/// The first cancelled operand wins: the result resolves `true` immediately,
/// without waiting for the other side. "Not cancelled" is only declared once
/// *both* operands have resolved `false` — the slower operand could still
/// cancel, so the result must wait for it before committing.
pub fn or(a: &CancellationToken, b: &CancellationToken) -> CancellationToken {
    let signal = Arc::new(Signal::new());

    // First cancel wins, regardless of which operand it comes from.
    let winner = signal.clone();
    b.on_cancel(move || winner.complete(true));

    // `a` drives the rest: a cancelled outcome resolves immediately, a
    // not-cancelled one chains a subscription to `b` so that `false` is only
    // committed once both operands have settled.
    let b = b.clone();
    let chained = signal.clone();
    a.on_complete(move |cancelled| {
        if cancelled {
            chained.complete(true);
        } else {
            b.on_complete(move |cancelled| chained.complete(cancelled));
        }
    });

    CancellationToken::from_signal(signal)
}

/// Returns a token that is cancelled only when *both* operands are cancelled.
///
/// If `a` resolves "not cancelled" the result resolves `false` immediately,
/// without waiting on `b`. If `a` is cancelled but `b` never resolves, the
/// result stays pending indefinitely — a known limitation, not a bug: the
/// conjunction requires full agreement, and an unresolved operand
/// legitimately blocks the combined outcome.
pub fn and(a: &CancellationToken, b: &CancellationToken) -> CancellationToken {
    let b = b.clone();
    a.flat_map(move || b.map(|| true))
}

impl BitOr for &CancellationToken {
    type Output = CancellationToken;

    fn bitor(self, rhs: &CancellationToken) -> CancellationToken {
        or(self, rhs)
    }
}

impl BitOr for CancellationToken {
    type Output = CancellationToken;

    fn bitor(self, rhs: CancellationToken) -> CancellationToken {
        or(&self, &rhs)
    }
}

impl BitAnd for &CancellationToken {
    type Output = CancellationToken;

    fn bitand(self, rhs: &CancellationToken) -> CancellationToken {
        and(self, rhs)
    }
}

impl BitAnd for CancellationToken {
    type Output = CancellationToken;

    fn bitand(self, rhs: CancellationToken) -> CancellationToken {
        and(&self, &rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::CancellationRequest;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    async fn wait_completed(token: &CancellationToken) {
        for _ in 0..500 {
            if token.is_completed() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(2)).await;
        }
        panic!("token never completed");
    }

    #[tokio::test]
    async fn or_resolves_true_without_waiting_for_the_other_operand() {
        let r1 = CancellationRequest::new();
        let r2 = CancellationRequest::new();
        let combined = or(&r1.token(), &r2.token());

        r1.cancel();

        // Sample like a polling task would: up to 100 times at 1ms intervals.
        let mut observed = false;
        for _ in 0..100 {
            if combined.is_cancelled() {
                observed = true;
                break;
            }
            tokio::time::sleep(Duration::from_millis(1)).await;
        }

        assert!(observed);
        assert!(combined.is_cancelled());
        assert!(!r2.is_cancellation_requested());
    }

    #[tokio::test]
    async fn or_resolves_true_when_only_the_second_operand_cancels() {
        let r1 = CancellationRequest::new();
        let r2 = CancellationRequest::new();
        let combined = or(&r1.token(), &r2.token());

        r2.cancel();

        wait_completed(&combined).await;
        assert!(combined.is_cancelled());
    }

    #[tokio::test]
    async fn or_waits_for_both_operands_before_declaring_not_cancelled() {
        let r1 = CancellationRequest::new();
        let r2 = CancellationRequest::new();
        let combined = or(&r1.token(), &r2.token());

        drop(r1);
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!combined.is_completed());

        drop(r2);
        wait_completed(&combined).await;
        assert!(!combined.is_cancelled());
    }

    #[tokio::test]
    async fn or_still_cancels_after_the_first_operand_declined() {
        let r1 = CancellationRequest::new();
        let r2 = CancellationRequest::new();
        let combined = or(&r1.token(), &r2.token());

        drop(r1);
        r2.cancel();

        wait_completed(&combined).await;
        assert!(combined.is_cancelled());
    }

    #[tokio::test]
    async fn and_requires_agreement_from_both_operands() {
        let r1 = CancellationRequest::new();
        let r2 = CancellationRequest::new();
        let combined = and(&r1.token(), &r2.token());

        r1.cancel();
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!combined.is_completed());

        r2.cancel();
        wait_completed(&combined).await;
        assert!(combined.is_cancelled());
    }

    #[tokio::test]
    async fn and_resolves_false_as_soon_as_one_operand_declines() {
        let r1 = CancellationRequest::new();
        let r2 = CancellationRequest::new();
        let combined = and(&r1.token(), &r2.token());

        drop(r1);

        // `r2` is still pending; the conjunction must not wait for it.
        wait_completed(&combined).await;
        assert!(!combined.is_cancelled());
        assert!(!r2.token().is_completed());
    }

    #[tokio::test]
    async fn three_way_and_resolves_only_after_the_last_cancel() {
        let r1 = CancellationRequest::new();
        let r2 = CancellationRequest::new();
        let r3 = CancellationRequest::new();
        let combined = and(&and(&r1.token(), &r2.token()), &r3.token());

        let fired = Arc::new(AtomicBool::new(false));
        {
            let fired = fired.clone();
            combined.on_cancel(move || {
                fired.store(true, Ordering::SeqCst);
            });
        }

        r1.cancel();
        r2.cancel();
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!combined.is_completed());
        assert!(!fired.load(Ordering::SeqCst));

        r3.cancel();
        wait_completed(&combined).await;
        assert!(combined.is_cancelled());

        for _ in 0..500 {
            if fired.load(Ordering::SeqCst) {
                return;
            }
            tokio::time::sleep(Duration::from_millis(2)).await;
        }
        panic!("cancel handler never fired");
    }

    #[tokio::test]
    async fn operators_stand_in_for_the_combinators() {
        let r1 = CancellationRequest::new();
        let r2 = CancellationRequest::new();

        let either = r1.token() | r2.token();
        let both = &r1.token() & &r2.token();

        r1.cancel();
        wait_completed(&either).await;
        assert!(either.is_cancelled());

        r2.cancel();
        wait_completed(&both).await;
        assert!(both.is_cancelled());
    }

    #[tokio::test]
    async fn or_grouping_does_not_change_the_outcome() {
        let r1 = CancellationRequest::new();
        let r2 = CancellationRequest::new();
        let r3 = CancellationRequest::new();

        let left = or(&or(&r1.token(), &r2.token()), &r3.token());
        let right = or(&r1.token(), &or(&r2.token(), &r3.token()));

        r2.cancel();

        wait_completed(&left).await;
        wait_completed(&right).await;
        assert!(left.is_cancelled());
        assert!(right.is_cancelled());
    }
}
